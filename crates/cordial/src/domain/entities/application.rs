//! Application - Bot application reference attached to messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
}
