//! Timing and pagination constants for the Discogs sync loop.
//!
//! Discogs enforces 60 requests/minute for authenticated clients and
//! reports the remaining window quota on every response via the
//! `X-Discogs-Ratelimit-Remaining` header. The sync loop stays well under
//! that budget with a fixed pause between items, and backs off whenever
//! the reported quota hits zero.

/// Pause between consecutive collection items, in milliseconds.
pub const ITEM_DELAY_MS: u64 = 3000;

/// Backoff before retrying a request after the remaining quota reaches
/// zero, in milliseconds.
pub const RATE_LIMIT_BACKOFF_MS: u64 = 10_000;

/// Collection releases requested per page (Discogs maximum is 500).
pub const PAGE_SIZE: u32 = 250;

/// Transport retries per item before giving up, when the price-error
/// policy is `skip`.
pub const TRANSPORT_ATTEMPTS: u32 = 3;

/// Pause between transport retries for the same item, in milliseconds.
pub const TRANSPORT_RETRY_DELAY_MS: u64 = 5000;

/// Discogs REST API root.
pub const API_BASE_URL: &str = "https://api.discogs.com";

/// Discogs rejects requests without an identifying User-Agent.
pub const USER_AGENT: &str = "discsort/0.1 +https://github.com/discsort/discsort";

/// Folder id of the special "All" folder that enumerates every instance
/// in a collection.
pub const ALL_FOLDER_ID: u64 = 0;
