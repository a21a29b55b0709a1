use serde::{Deserialize, Serialize};

pub type WorkspaceId = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Option<i64>,
}
