//! Connection settings for a Jira server.

use std::fmt;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;

/// Server URL and Basic-auth credentials, fixed for the lifetime of a client.
///
/// Deserializable so host applications can bind it from their own settings
/// (`serverUrl`, `userName`, `password`, optional `timeoutSecs`).
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JiraConfig {
    pub server_url: String,
    #[serde(alias = "username")]
    pub user_name: String,
    pub password: String,
    #[serde(default, rename = "timeoutSecs", with = "timeout_secs")]
    pub timeout: Option<Duration>,
}

impl JiraConfig {
    pub fn new(server_url: &str, user_name: &str, password: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            user_name: user_name.to_string(),
            password: password.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Server URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    /// The complete `Basic ...` value for the `authorization` header.
    pub fn basic_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.user_name, self.password);
        format!("Basic {}", BASE64.encode(credentials.as_bytes()))
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("server_url", &self.server_url)
            .field("user_name", &self.user_name)
            .field("password", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
