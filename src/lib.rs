pub mod aggregate;
pub mod dashboard;
pub mod model;
pub mod reconcile;
pub mod remote;
pub mod store;
pub mod timefmt;
pub mod tui;
