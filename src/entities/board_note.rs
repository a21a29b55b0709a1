use serde::{Deserialize, Serialize};

pub type BoardNoteId = i64;

/// Standalone note shown as a card on the notes board (`/api/notes`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardNote {
    pub id: BoardNoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date_created: Option<String>,
}

/// Body of board note create/update requests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardNotePayload {
    pub title: String,
    pub content: String,
}
