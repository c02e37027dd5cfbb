// src/config.rs

use crate::constants::BASE_URL_ENV;
use crate::errors::{AgriChatError, AgriChatResult};
use std::env;

/// Deployment configuration. The backend base URL must be supplied through
/// the environment; a missing URL is a deployment error reported at startup,
/// not something the controller handles.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> AgriChatResult<Self> {
        let base_url = env::var(BASE_URL_ENV).map_err(|_| {
            AgriChatError::config(format!("{} is not set", BASE_URL_ENV))
        })?;

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AgriChatError::config(format!("{} is empty", BASE_URL_ENV)));
        }

        Ok(Self { base_url })
    }
}
