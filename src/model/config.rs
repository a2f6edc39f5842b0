use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub version: u32,

    pub base_url: String,

    /// Scope document/metadata listings to one source folder.
    #[serde(default)]
    pub folder_id: Option<String>,

    /// Scope the message counter to one chat workspace.
    #[serde(default)]
    pub team_id: Option<String>,

    /// Upper bound on concurrent per-document version fetches.
    #[serde(default)]
    pub fanout_limit: Option<usize>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: DEFAULT_BASE_URL.to_string(),
            folder_id: None,
            team_id: None,
            fanout_limit: None,
        }
    }
}

impl ConsoleConfig {
    pub fn fanout(&self) -> usize {
        self.fanout_limit
            .unwrap_or(crate::aggregate::DEFAULT_FANOUT_LIMIT)
            .max(1)
    }
}
