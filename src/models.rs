use serde::{Deserialize, Serialize};

/// A servable JSON resource backed by a file on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(rename = "FilePath")]
    pub file_path: String,
    #[serde(rename = "URLPath")]
    pub url_path: String,
}

impl Route {
    pub fn new(file_path: String, url_path: String) -> Self {
        Self {
            file_path,
            url_path,
        }
    }
}
