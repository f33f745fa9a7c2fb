//! Scripted in-memory Discogs host for tests.

use crate::error::{AppError, Result};
use crate::models::{
    BasicInformation, CollectionPage, CollectionValue, Folder, MarketStats, Pagination,
    PriceValue, ReleaseInstance, StatsEnvelope,
};
use crate::services::discogs::DiscogsApi;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Quota reported on stats responses when no override is scripted.
const DEFAULT_REMAINING: u64 = 25;

#[derive(Default)]
pub struct CallLog {
    pub list_folders: u32,
    pub pages: Vec<u32>,
    pub creates: Vec<String>,
    /// (release_id, instance_id, target_folder_id)
    pub moves: Vec<(u64, u64, u64)>,
    pub stats: Vec<u64>,
}

#[derive(Default)]
pub struct FakeState {
    pub folders: Vec<Folder>,
    pub releases: Vec<ReleaseInstance>,
    /// release id -> lowest listed price; missing entry or None = no listing
    pub prices: HashMap<u64, Option<f64>>,
    /// Scripted `requests_remaining` values, consumed one per stats call.
    pub remaining: VecDeque<u64>,
    /// release id -> number of transport failures to inject before success
    pub stats_failures: HashMap<u64, u32>,
    pub fail_creates: bool,
    /// Override the page count reported by pagination metadata.
    pub reported_pages: Option<u32>,
    pub next_folder_id: u64,
    pub calls: CallLog,
}

pub struct FakeDiscogs {
    inner: Mutex<FakeState>,
}

impl FakeDiscogs {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FakeState {
                next_folder_id: 100,
                ..FakeState::default()
            }),
        }
    }

    pub fn add_folder(&self, id: u64, name: &str) {
        let mut state = self.inner.lock().unwrap();
        state.folders.push(Folder {
            id,
            name: name.to_string(),
            count: 0,
        });
    }

    pub fn add_release(&self, id: u64, instance_id: u64, folder_id: u64, title: &str) {
        let mut state = self.inner.lock().unwrap();
        state.releases.push(ReleaseInstance {
            id,
            instance_id,
            folder_id,
            basic_information: BasicInformation {
                title: title.to_string(),
                year: None,
            },
        });
    }

    pub fn set_price(&self, release_id: u64, price: Option<f64>) {
        self.inner.lock().unwrap().prices.insert(release_id, price);
    }

    pub fn script_remaining(&self, values: &[u64]) {
        self.inner.lock().unwrap().remaining.extend(values);
    }

    pub fn inject_stats_failures(&self, release_id: u64, count: u32) {
        self.inner
            .lock()
            .unwrap()
            .stats_failures
            .insert(release_id, count);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.inner.lock().unwrap().fail_creates = fail;
    }

    pub fn report_pages(&self, pages: u32) {
        self.inner.lock().unwrap().reported_pages = Some(pages);
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&FakeState) -> R) -> R {
        f(&self.inner.lock().unwrap())
    }
}

#[async_trait]
impl DiscogsApi for FakeDiscogs {
    async fn list_folders(&self, _username: &str) -> Result<Vec<Folder>> {
        let mut state = self.inner.lock().unwrap();
        state.calls.list_folders += 1;
        Ok(state.folders.clone())
    }

    async fn collection_page(
        &self,
        _username: &str,
        page: u32,
        per_page: u32,
    ) -> Result<CollectionPage> {
        let mut state = self.inner.lock().unwrap();
        state.calls.pages.push(page);

        let total = state.releases.len();
        let start = ((page - 1) * per_page) as usize;
        let end = (start + per_page as usize).min(total);
        let releases = if start < total {
            state.releases[start..end].to_vec()
        } else {
            Vec::new()
        };

        let actual_pages = ((total as u32) + per_page - 1) / per_page;
        Ok(CollectionPage {
            pagination: Pagination {
                page,
                pages: state.reported_pages.unwrap_or(actual_pages.max(1)),
                per_page,
                items: total as u64,
            },
            releases,
        })
    }

    async fn create_folder(&self, _username: &str, name: &str) -> Result<Folder> {
        let mut state = self.inner.lock().unwrap();
        state.calls.creates.push(name.to_string());

        if state.fail_creates {
            return Err(AppError::Api("create folder rejected".to_string()));
        }

        let folder = Folder {
            id: state.next_folder_id,
            name: name.to_string(),
            count: 0,
        };
        state.next_folder_id += 1;
        state.folders.push(folder.clone());
        Ok(folder)
    }

    async fn move_instance(
        &self,
        _username: &str,
        _folder_id: u64,
        release_id: u64,
        instance_id: u64,
        target_folder_id: u64,
    ) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        state.calls.moves.push((release_id, instance_id, target_folder_id));

        let release = state
            .releases
            .iter_mut()
            .find(|r| r.id == release_id && r.instance_id == instance_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("instance {}/{}", release_id, instance_id))
            })?;
        release.folder_id = target_folder_id;
        Ok(())
    }

    async fn marketplace_stats(
        &self,
        release_id: u64,
        _currency_code: &str,
    ) -> Result<StatsEnvelope> {
        let mut state = self.inner.lock().unwrap();
        state.calls.stats.push(release_id);

        if let Some(failures) = state.stats_failures.get_mut(&release_id) {
            if *failures > 0 {
                *failures -= 1;
                return Err(AppError::Network("connection reset".to_string()));
            }
        }
        let remaining = state.remaining.pop_front().unwrap_or(DEFAULT_REMAINING);
        let lowest_price = state
            .prices
            .get(&release_id)
            .cloned()
            .flatten()
            .map(|value| PriceValue {
                value,
                currency: "EUR".to_string(),
            });

        Ok(StatsEnvelope {
            stats: MarketStats {
                lowest_price,
                num_for_sale: None,
                blocked_from_sale: false,
            },
            requests_remaining: Some(remaining),
        })
    }

    async fn collection_value(&self, _username: &str) -> Result<CollectionValue> {
        Ok(CollectionValue {
            minimum: "€100.00".to_string(),
            median: "€250.00".to_string(),
            maximum: "€500.00".to_string(),
        })
    }
}
