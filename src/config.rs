//! Configuration loading and management
//!
//! Handles parsing of `timeboard.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::user::{User, UserRole};

/// Config file name looked up in the working directory
pub const CONFIG_FILE: &str = "timeboard.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the board blob (defaults to the platform data dir)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Actor configuration
    #[serde(default)]
    pub actor: ActorConfig,

    /// Known users; tasks reference them by email
    #[serde(default = "default_users")]
    pub users: Vec<User>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            actor: ActorConfig::default(),
            users: default_users(),
        }
    }
}

/// Actor-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Default current user when none specified
    #[serde(default = "default_actor")]
    pub default: String,
}

fn default_actor() -> String {
    "admin@example.com".to_string()
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            default: default_actor(),
        }
    }
}

fn default_users() -> Vec<User> {
    let mut users = vec![User {
        id: "1".to_string(),
        name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        role: UserRole::Admin,
    }];
    let members = [
        ("2", "Alex Kit", "alex.kit@example.com"),
        ("3", "Jane Anderson", "jane.anderson@example.com"),
        ("4", "David Smith", "david.smith@example.com"),
        ("5", "Susan David", "susan.david@example.com"),
    ];
    users.extend(members.iter().map(|(id, name, email)| User {
        id: (*id).to_string(),
        name: (*name).to_string(),
        email: (*email).to_string(),
        role: UserRole::User,
    }));
    users
}

impl Config {
    /// Load configuration from an explicit file. Parse and validation
    /// errors propagate.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `timeboard.toml` from a directory, falling back to defaults
    /// when the file does not exist or cannot be parsed.
    pub fn load_from_dir(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_default()
    }

    /// Roster entries must be unique by email, the key tasks store.
    pub fn validate(&self) -> Result<()> {
        let mut emails = std::collections::HashSet::new();
        for user in &self.users {
            if !emails.insert(user.email.as_str()) {
                return Err(crate::error::Error::InvalidConfig(format!(
                    "duplicate user email: {}",
                    user.email
                )));
            }
        }
        Ok(())
    }
}
