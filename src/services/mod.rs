pub mod brackets;
pub mod collection;
pub mod discogs;
pub mod folders;
pub mod pricing;
pub mod sorter;

#[cfg(test)]
pub mod fake;

pub use brackets::BracketSpec;
pub use collection::fetch_all_items;
pub use discogs::{DiscogsApi, DiscogsClient};
pub use folders::FolderCache;
pub use pricing::{PriceErrorPolicy, PriceOutcome, PriceResolver, RetryPolicy};
pub use sorter::{SortOptions, SortStats, Sorter};
