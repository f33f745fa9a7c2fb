use serde::{Deserialize, Serialize};

/// A named collection folder. Ids are assigned by Discogs; folder 0 is the
/// read-only "All" view and folder 1 is "Uncategorized".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

/// Response body of the list-folders endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderList {
    pub folders: Vec<Folder>,
}
