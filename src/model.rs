mod channel;
mod config;

pub use self::channel::*;
pub use self::config::*;
