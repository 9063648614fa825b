use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::Session;

const SESSION_FILE: &str = "session.json";

/// Stored login for the `datasets` CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub server: String,
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub display_name: String,
    pub saved_at: DateTime<Utc>,
}

impl SessionConfig {
    pub fn new(server: &str, session: &Session) -> Self {
        Self {
            server: server.to_string(),
            token: session.token.clone(),
            user_id: session.user.id,
            username: session.user.username.clone(),
            display_name: session.user.display_name.clone(),
            saved_at: Utc::now(),
        }
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("DATASETS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("datasets").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session() -> anyhow::Result<Option<SessionConfig>> {
    load_session_from(&get_config_dir()?)
}

pub fn save_session(session: &SessionConfig) -> anyhow::Result<()> {
    save_session_to(&get_config_dir()?, session)
}

/// Remove the stored session. Returns false when there was none.
pub fn clear_session() -> anyhow::Result<bool> {
    clear_session_in(&get_config_dir()?)
}

fn load_session_from(dir: &Path) -> anyhow::Result<Option<SessionConfig>> {
    let session_file = dir.join(SESSION_FILE);

    if !session_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(session_file)?;
    let session: SessionConfig = serde_json::from_str(&content)?;
    Ok(Some(session))
}

fn save_session_to(dir: &Path, session: &SessionConfig) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let content = serde_json::to_string_pretty(session)?;
    fs::write(dir.join(SESSION_FILE), content)?;
    Ok(())
}

fn clear_session_in(dir: &Path) -> anyhow::Result<bool> {
    let session_file = dir.join(SESSION_FILE);
    if !session_file.exists() {
        return Ok(false);
    }
    fs::remove_file(session_file)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("datasets-cli-{}", Uuid::new_v4().simple()))
    }

    #[test]
    fn session_file_lifecycle() {
        let dir = scratch_dir();
        assert_eq!(load_session_from(&dir).unwrap(), None);
        assert!(!clear_session_in(&dir).unwrap());

        let session = SessionConfig {
            server: "http://localhost:3000".to_string(),
            token: "token".to_string(),
            user_id: Uuid::new_v4(),
            username: "username".to_string(),
            display_name: "Full Name".to_string(),
            saved_at: Utc::now(),
        };
        save_session_to(&dir, &session).unwrap();
        assert_eq!(load_session_from(&dir).unwrap(), Some(session));

        assert!(clear_session_in(&dir).unwrap());
        assert_eq!(load_session_from(&dir).unwrap(), None);
        let _ = fs::remove_dir_all(&dir);
    }
}
