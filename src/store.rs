use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::model::ConsoleConfig;

const STORE_DIR: &str = ".syncdeck";
const DIR_ENV: &str = "SYNCDECK_DIR";

/// Local console state: `config.json` plus the generated client identity.
/// This is the only thing the console ever persists; all domain data is
/// refetched from the pipeline on every pass.
#[derive(Clone)]
pub struct ConsoleStore {
    root: PathBuf,
}

impl ConsoleStore {
    /// Open (creating if needed) the console dir: `$SYNCDECK_DIR` when set,
    /// else `~/.syncdeck`.
    pub fn open_default() -> Result<Self> {
        let root = match std::env::var_os(DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => {
                let home = std::env::var_os("HOME")
                    .ok_or_else(|| anyhow!("HOME not set (set {} explicitly)", DIR_ENV))?;
                PathBuf::from(home).join(STORE_DIR)
            }
        };
        Self::open_at(&root)
    }

    pub fn open_at(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("create console dir {}", root.display()))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ConsoleConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(ConsoleConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        serde_json::from_slice(&bytes).context("parse config.json")
    }

    pub fn write_config(&self, cfg: &ConsoleConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientIdentity {
    pub client_id: String,
    pub created_at: String,
}

impl ClientIdentity {
    /// Create-or-load the console's opaque client token. Generated once on
    /// first use, never rotated automatically.
    pub fn load_or_create(store: &ConsoleStore) -> Result<Self> {
        let path = store.root.join("identity.json");
        if path.exists() {
            let bytes = fs::read(&path).context("read identity.json")?;
            return serde_json::from_slice(&bytes).context("parse identity.json");
        }

        let identity = Self {
            client_id: generate_client_token()?,
            created_at: crate::timefmt::now_rfc3339(),
        };
        let bytes = serde_json::to_vec_pretty(&identity).context("serialize identity")?;
        write_atomic(&path, &bytes).context("write identity.json")?;
        Ok(identity)
    }
}

static CLIENT_ID: OnceLock<String> = OnceLock::new();

/// Process-wide identity init. Idempotent; later calls return the token
/// loaded the first time.
pub fn init_identity(store: &ConsoleStore) -> Result<&'static str> {
    if let Some(id) = CLIENT_ID.get() {
        return Ok(id);
    }
    let identity = ClientIdentity::load_or_create(store)?;
    Ok(CLIENT_ID.get_or_init(|| identity.client_id))
}

/// The token set by `init_identity`, if init has run.
pub fn client_id() -> Option<&'static str> {
    CLIENT_ID.get().map(String::as_str)
}

fn generate_client_token() -> Result<String> {
    // 32 bytes of entropy, hex-encoded.
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}
