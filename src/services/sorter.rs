use crate::error::Result;
use crate::models::ReleaseInstance;
use crate::services::brackets::BracketSpec;
use crate::services::collection::fetch_all_items;
use crate::services::discogs::DiscogsApi;
use crate::services::folders::FolderCache;
use crate::services::pricing::{PriceErrorPolicy, PriceOutcome, PriceResolver, RetryPolicy};
use std::time::Duration;
use tokio::time::sleep;

/// Everything one sorting run needs, threaded explicitly instead of read
/// from ambient state.
#[derive(Debug, Clone)]
pub struct SortOptions {
    pub username: String,
    pub currency_code: String,
    pub brackets: BracketSpec,
    pub per_page: u32,
    /// Pause between consecutive items, independent of rate-limit backoff.
    pub item_delay: Duration,
    pub retry: RetryPolicy,
    pub on_price_error: PriceErrorPolicy,
    /// Report what would change without creating folders or moving items.
    pub dry_run: bool,
}

/// Counters for the end-of-run summary.
#[derive(Debug, Default, Clone)]
pub struct SortStats {
    pub total: usize,
    pub moved: usize,
    pub already_correct: usize,
    pub skipped_no_price: usize,
    pub soft_failures: usize,
}

enum ItemOutcome {
    Moved,
    AlreadyCorrect,
    SkippedNoPrice,
    SoftFailed,
}

/// Sequential reconciliation loop: price each item, classify it, resolve
/// the target folder, and move it only when its current folder differs.
///
/// Items are processed strictly one at a time in listing order; the folder
/// cache is only ever touched from this loop, which is what keeps the
/// one-folder-per-bracket invariant without locking.
pub struct Sorter<'a> {
    api: &'a dyn DiscogsApi,
    opts: SortOptions,
    cache: FolderCache,
    resolver: PriceResolver,
    stats: SortStats,
}

impl<'a> Sorter<'a> {
    /// Seed the folder cache and set up the resolver.
    pub async fn new(api: &'a dyn DiscogsApi, opts: SortOptions) -> Result<Sorter<'a>> {
        let cache = FolderCache::seed(api, &opts.username).await?;
        let resolver = PriceResolver::new(
            &opts.currency_code,
            opts.retry.clone(),
            opts.on_price_error,
        );

        Ok(Self {
            api,
            opts,
            cache,
            resolver,
            stats: SortStats::default(),
        })
    }

    /// Run one full reconciliation pass over the collection.
    ///
    /// A second pass with no external changes in between issues zero
    /// moves: every item either resolves to the folder it is already in
    /// or is skipped again for the same reason.
    pub async fn run(mut self) -> Result<SortStats> {
        let items = fetch_all_items(self.api, &self.opts.username, self.opts.per_page).await?;
        self.stats.total = items.len();

        if self.opts.dry_run {
            println!("🔍 Dry run: no folders will be created, no items moved\n");
        }

        for (index, item) in items.iter().enumerate() {
            let position = format!("[{}/{}]", index + 1, items.len());

            match self.process_item(item, &position).await? {
                ItemOutcome::Moved => self.stats.moved += 1,
                ItemOutcome::AlreadyCorrect => self.stats.already_correct += 1,
                ItemOutcome::SkippedNoPrice => self.stats.skipped_no_price += 1,
                ItemOutcome::SoftFailed => self.stats.soft_failures += 1,
            }

            // Conservative pacing between items, on top of whatever the
            // rate limiter imposed.
            if index + 1 < items.len() && !self.opts.item_delay.is_zero() {
                sleep(self.opts.item_delay).await;
            }
        }

        self.print_summary();
        Ok(self.stats)
    }

    async fn process_item(
        &mut self,
        item: &ReleaseInstance,
        position: &str,
    ) -> Result<ItemOutcome> {
        let price = match self.resolver.resolve(self.api, item.id).await? {
            PriceOutcome::Listed(price) => price,
            PriceOutcome::NoListing => {
                println!(
                    "{} ⏭️  \"{}\": no copies for sale, skipping",
                    position,
                    item.title()
                );
                return Ok(ItemOutcome::SkippedNoPrice);
            }
            PriceOutcome::Failed(reason) => {
                eprintln!(
                    "{} ⚠️  \"{}\": price lookup failed ({}), leaving in place",
                    position,
                    item.title(),
                    reason
                );
                return Ok(ItemOutcome::SoftFailed);
            }
        };

        let target_name = self.opts.brackets.classify(price);
        let price_label = format!("{}{:.2}", self.opts.brackets.symbol(), price);

        let target_id = if self.opts.dry_run {
            match self.cache.get(&target_name) {
                Some(id) => id,
                None => {
                    println!(
                        "{} 🔍 \"{}\": {} → would create \"{}\" and move there",
                        position,
                        item.title(),
                        price_label,
                        target_name
                    );
                    return Ok(ItemOutcome::Moved);
                }
            }
        } else {
            // Folder creation failure is cosmetic for this item; the rest
            // of the collection still gets sorted.
            match self
                .cache
                .get_or_create(self.api, &self.opts.username, &target_name)
                .await
            {
                Ok(id) => id,
                Err(err) => {
                    eprintln!(
                        "{} ⚠️  \"{}\": could not create folder \"{}\" ({}), leaving in place",
                        position,
                        item.title(),
                        target_name,
                        err
                    );
                    return Ok(ItemOutcome::SoftFailed);
                }
            }
        };

        if target_id == item.folder_id {
            println!(
                "{} ✅ \"{}\": {} → \"{}\" (already correct)",
                position,
                item.title(),
                price_label,
                target_name
            );
            return Ok(ItemOutcome::AlreadyCorrect);
        }

        if self.opts.dry_run {
            println!(
                "{} 🔍 \"{}\": {} → would move to \"{}\"",
                position,
                item.title(),
                price_label,
                target_name
            );
            return Ok(ItemOutcome::Moved);
        }

        // Move failures are fatal: an item half-tracked between folders is
        // worse than stopping with a clear error.
        self.api
            .move_instance(
                &self.opts.username,
                item.folder_id,
                item.id,
                item.instance_id,
                target_id,
            )
            .await?;

        println!(
            "{} 📦 \"{}\": {} → moved to \"{}\"",
            position,
            item.title(),
            price_label,
            target_name
        );
        Ok(ItemOutcome::Moved)
    }

    fn print_summary(&self) {
        let verb = if self.opts.dry_run { "would move" } else { "moved" };
        println!("\n═══════════════════════════════════════════");
        println!("🏁 Sort complete: {} release(s)", self.stats.total);
        println!("   📦 {}: {}", verb, self.stats.moved);
        println!("   ✅ already correct: {}", self.stats.already_correct);
        println!("   ⏭️  no price data: {}", self.stats.skipped_no_price);
        if self.stats.soft_failures > 0 {
            println!("   ⚠️  failed: {}", self.stats.soft_failures);
        }
        println!("═══════════════════════════════════════════");
    }
}
