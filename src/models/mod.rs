mod collection;
mod folder;
mod stats;

pub use collection::{BasicInformation, CollectionPage, Pagination, ReleaseInstance};
pub use folder::{Folder, FolderList};
pub use stats::{CollectionValue, MarketStats, PriceValue, StatsEnvelope};
