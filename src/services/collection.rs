use crate::error::Result;
use crate::models::ReleaseInstance;
use crate::services::discogs::DiscogsApi;

/// Fetch the complete collection, in listing order, by walking every page
/// of the "All" folder.
///
/// The page count reported by the first response drives the walk, but an
/// empty page also terminates it in case the pagination metadata is stale.
/// Everything is held in memory; collections are bounded by what one user
/// can own, so this stays in the low thousands of instances. Any page
/// fetch failure aborts the whole run.
pub async fn fetch_all_items(
    api: &dyn DiscogsApi,
    username: &str,
    per_page: u32,
) -> Result<Vec<ReleaseInstance>> {
    let first = api.collection_page(username, 1, per_page).await?;
    let total_pages = first.pagination.pages;
    let total_items = first.pagination.items;

    println!(
        "📦 Collection: {} release(s) across {} page(s)",
        total_items, total_pages
    );

    let mut items = first.releases;
    let mut page = 1;

    while page < total_pages {
        page += 1;
        let next = api.collection_page(username, page, per_page).await?;
        if next.releases.is_empty() {
            tracing::debug!(
                "COLLECTION_PAGE: page {}/{} came back empty, stopping early",
                page,
                total_pages
            );
            break;
        }
        println!(
            "📦 Fetched page {}/{} ({} releases)",
            page,
            total_pages,
            next.releases.len()
        );
        items.extend(next.releases);
    }

    Ok(items)
}
