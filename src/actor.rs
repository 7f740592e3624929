//! Current-user resolution.
//!
//! The board does not authenticate anyone; a single current user is
//! supplied from outside. Resolution order:
//! 1) CLI --user (explicit)
//! 2) TIMEBOARD_USER environment variable
//! 3) Config default (actor.default)

use crate::config::Config;

pub const ACTOR_ENV_VAR: &str = "TIMEBOARD_USER";

/// Resolve the current user using CLI, environment, and config.
pub fn resolve_actor(config: &Config, cli_user: Option<&str>) -> String {
    if let Some(user) = non_empty(cli_user) {
        return user.to_string();
    }

    if let Ok(env_user) = std::env::var(ACTOR_ENV_VAR) {
        if let Some(user) = non_empty(Some(env_user.as_str())) {
            return user.to_string();
        }
    }

    config.actor.default.clone()
}

fn non_empty(input: Option<&str>) -> Option<&str> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
