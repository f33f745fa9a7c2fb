use serde::{Deserialize, Serialize};

/// One release instance in the user's collection. The same release id can
/// appear multiple times, once per owned copy; identity for a move is the
/// (release id, instance id) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseInstance {
    /// Release id, shared by every copy of the same pressing.
    pub id: u64,
    pub instance_id: u64,
    /// Folder the instance currently lives in.
    pub folder_id: u64,
    pub basic_information: BasicInformation,
}

impl ReleaseInstance {
    pub fn title(&self) -> &str {
        &self.basic_information.title
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicInformation {
    pub title: String,
    #[serde(default)]
    pub year: Option<u32>,
}

/// Pagination metadata Discogs returns with every collection page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub per_page: u32,
    /// Total instances across all pages.
    pub items: u64,
}

/// One page of the collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionPage {
    pub pagination: Pagination,
    pub releases: Vec<ReleaseInstance>,
}
