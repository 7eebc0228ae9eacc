use serde::{Deserialize, Serialize};

use super::issue::Author;

/// Metadata of a file attached to an issue. The content itself is only
/// referenced by URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    #[serde(rename = "self")]
    pub self_url: String,
    pub id: String,
    pub filename: String,
    pub author: Option<Author>,
    pub created: String,
    pub size: u64,
    pub mime_type: String,
    pub content: String,
    pub thumbnail: Option<String>,
}
