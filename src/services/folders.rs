use crate::error::Result;
use crate::models::Folder;
use crate::services::discogs::DiscogsApi;
use std::collections::HashMap;

/// Name -> id map of the user's collection folders.
///
/// Seeded once from the remote folder list before any create decision, then
/// the single source of truth for the rest of the run: a name found here is
/// never created again, so each bracket gets at most one folder no matter
/// how many items map to it. Correct only while access stays sequential.
pub struct FolderCache {
    folders: HashMap<String, u64>,
}

impl FolderCache {
    /// Build the cache from the remote folder list.
    pub async fn seed(api: &dyn DiscogsApi, username: &str) -> Result<Self> {
        let folders = api.list_folders(username).await?;
        println!("🗂️  Found {} existing folder(s)", folders.len());

        Ok(Self {
            folders: folders
                .into_iter()
                .map(|Folder { name, id, .. }| (name, id))
                .collect(),
        })
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.folders.get(name).copied()
    }

    /// Resolve a folder id, creating the folder remotely on first sight of
    /// the name.
    pub async fn get_or_create(
        &mut self,
        api: &dyn DiscogsApi,
        username: &str,
        name: &str,
    ) -> Result<u64> {
        if let Some(id) = self.folders.get(name) {
            return Ok(*id);
        }

        let folder = api.create_folder(username, name).await?;
        println!("📁 Created folder \"{}\" (id {})", folder.name, folder.id);
        self.folders.insert(folder.name, folder.id);
        Ok(folder.id)
    }
}
