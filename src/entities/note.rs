use serde::{Deserialize, Serialize};

pub type NoteId = i64;

/// Placeholder title for notes saved without one
pub const UNTITLED: &str = "Untitled";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Note {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }
}

/// Body of note create/update requests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    pub content: String,
}

impl NotePayload {
    /// Payload for an editor buffer: title trimmed, falling back to "Untitled"
    pub fn from_buffer(title: &str, content: &str) -> Self {
        let title = title.trim();
        Self {
            title: if title.is_empty() { UNTITLED.to_string() } else { title.to_string() },
            content: content.to_string(),
        }
    }
}
