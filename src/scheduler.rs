use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::catalog::{CatalogRepository, UpsertOutcome};
use crate::config::SchedulerConfig;
use crate::normalizer::ListingNormalizer;
use crate::stores::registry::{StoreAdapterRef, StoreRegistry};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// Summary of one full pass over every term and store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PassReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub units_attempted: u64,
    /// Units whose store row could not be resolved.
    pub units_failed: u64,
    /// Units skipped because the store is inactive or has collection disabled.
    pub units_skipped: u64,
    pub listings_seen: u64,
    pub created: u64,
    pub changed: u64,
    pub unchanged: u64,
    pub upsert_failures: u64,
    pub stores_refreshed: Vec<String>,
    pub cancelled: bool,
}

impl PassReport {
    fn begin() -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            units_attempted: 0,
            units_failed: 0,
            units_skipped: 0,
            listings_seen: 0,
            created: 0,
            changed: 0,
            unchanged: 0,
            upsert_failures: 0,
            stores_refreshed: Vec::new(),
            cancelled: false,
        }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    fn absorb(&mut self, unit: &UnitResult) {
        self.units_attempted += 1;
        match unit {
            UnitResult::Skipped => self.units_skipped += 1,
            UnitResult::Failed => self.units_failed += 1,
            UnitResult::Done { tally, .. } => {
                self.listings_seen += tally.seen;
                self.created += tally.created;
                self.changed += tally.changed;
                self.unchanged += tally.unchanged;
                self.upsert_failures += tally.upsert_failures;
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub passes_completed: u64,
    /// Scheduled ticks dropped because a pass was already running.
    pub passes_skipped: u64,
    pub last_report: Option<PassReport>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    seen: u64,
    created: u64,
    changed: u64,
    unchanged: u64,
    upsert_failures: u64,
}

#[derive(Debug)]
enum UnitResult {
    Skipped,
    Failed,
    Done { store_id: String, tally: Tally },
}

/// The pass itself, shared between the scheduler handle and the timer job.
struct Collector {
    registry: StoreRegistry,
    catalog: Arc<dyn CatalogRepository>,
    normalizer: ListingNormalizer,
    terms: Vec<String>,
    parallel_stores: bool,
    pass_lock: Mutex<()>,
    running: AtomicBool,
    cancelled: AtomicBool,
    stats: RwLock<SchedulerStats>,
}

impl Collector {
    async fn run_pass(&self) -> PassReport {
        self.running.store(true, Ordering::SeqCst);
        let timer = Instant::now();
        let mut report = PassReport::begin();
        tracing::info!(
            terms = self.terms.len(),
            stores = self.registry.len(),
            parallel = self.parallel_stores,
            "Starting collection pass"
        );

        // store name -> id, for stores with at least one collected unit
        let mut collected: HashMap<String, String> = HashMap::new();

        'terms: for term in &self.terms {
            if self.parallel_stores {
                if self.is_cancelled() {
                    report.cancelled = true;
                    break 'terms;
                }
                let units = self
                    .registry
                    .adapters()
                    .iter()
                    .map(|adapter| self.run_unit(adapter, term));
                let results = join_all(units).await;
                for (adapter, result) in self.registry.adapters().iter().zip(results) {
                    Self::record(&mut report, &mut collected, adapter.name(), result);
                }
            } else {
                for adapter in self.registry.adapters() {
                    if self.is_cancelled() {
                        report.cancelled = true;
                        break 'terms;
                    }
                    let result = self.run_unit(adapter, term).await;
                    Self::record(&mut report, &mut collected, adapter.name(), result);
                }
            }
        }

        if !report.cancelled {
            for adapter in self.registry.adapters() {
                let Some(store_id) = collected.get(adapter.name()) else {
                    continue;
                };
                match self.catalog.mark_store_scraped(store_id, Utc::now()).await {
                    Ok(()) => report.stores_refreshed.push(adapter.name().to_string()),
                    Err(e) => tracing::error!(store = adapter.name(), error = %e, "Failed to record last scrape"),
                }
            }
        }

        report.finished_at = Utc::now();
        metrics::histogram!("pass_duration_seconds").record(timer.elapsed().as_secs_f64());

        if report.cancelled {
            tracing::warn!(units = report.units_attempted, "Collection pass cancelled");
        } else {
            metrics::counter!("passes_completed_total").increment(1);
            tracing::info!(
                units = report.units_attempted,
                failed = report.units_failed,
                listings = report.listings_seen,
                created = report.created,
                changed = report.changed,
                upsert_failures = report.upsert_failures,
                elapsed_ms = timer.elapsed().as_millis() as u64,
                "Collection pass completed"
            );
        }

        {
            let mut stats = self.stats.write().await;
            if !report.cancelled {
                stats.passes_completed += 1;
            }
            stats.last_report = Some(report.clone());
        }

        self.running.store(false, Ordering::SeqCst);
        report
    }

    fn record(
        report: &mut PassReport,
        collected: &mut HashMap<String, String>,
        store: &str,
        result: UnitResult,
    ) {
        report.absorb(&result);
        if let UnitResult::Done { store_id, .. } = result {
            collected.entry(store.to_string()).or_insert(store_id);
        }
    }

    /// One (store, term) unit. Never fails the pass.
    async fn run_unit(&self, adapter: &StoreAdapterRef, term: &str) -> UnitResult {
        let store = match self.catalog.ensure_store(adapter.name(), adapter.website()).await {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(store = adapter.name(), term = %term, error = %e, "Failed to resolve store");
                return UnitResult::Failed;
            }
        };

        if !store.is_collectable() {
            tracing::debug!(store = %store.name, term = %term, "Store disabled, skipping");
            return UnitResult::Skipped;
        }

        let listings = adapter.search(term).await;
        let mut tally = Tally::default();

        for raw in &listings {
            tally.seen += 1;
            let record = self.normalizer.standardize(raw, adapter.name());
            match self.catalog.upsert(&record, &store.id, term).await {
                Ok(UpsertOutcome::Created) => tally.created += 1,
                Ok(UpsertOutcome::Unchanged) => tally.unchanged += 1,
                Ok(UpsertOutcome::PriceChanged { .. }) => tally.changed += 1,
                Err(e) => {
                    tally.upsert_failures += 1;
                    metrics::counter!("upsert_failures_total").increment(1);
                    tracing::error!(
                        product = %record.product_name,
                        store = %store.name,
                        term = %term,
                        error = %e,
                        "Failed to save product"
                    );
                }
            }
        }

        tracing::info!(store = %store.name, term = %term, listings = listings.len(), "Updated products");
        UnitResult::Done { store_id: store.id, tally }
    }

    /// Timer tick: runs a pass unless one is already in flight.
    async fn run_scheduled(&self) {
        if self.is_cancelled() {
            return;
        }
        match self.pass_lock.try_lock() {
            Ok(_guard) => {
                self.run_pass().await;
            }
            Err(_) => {
                self.stats.write().await.passes_skipped += 1;
                tracing::warn!("Previous collection pass still running, skipping tick");
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Drives recurring refresh of the catalog from every registered store.
pub struct CollectionScheduler {
    collector: Arc<Collector>,
    config: SchedulerConfig,
    scheduler: Mutex<Option<JobScheduler>>,
    startup_pass: Mutex<Option<JoinHandle<()>>>,
}

impl CollectionScheduler {
    pub fn new(registry: StoreRegistry, catalog: Arc<dyn CatalogRepository>, config: SchedulerConfig) -> Self {
        let collector = Collector {
            registry,
            catalog,
            normalizer: ListingNormalizer::new(),
            terms: config.resolved_terms(),
            parallel_stores: config.parallel_stores,
            pass_lock: Mutex::new(()),
            running: AtomicBool::new(false),
            cancelled: AtomicBool::new(false),
            stats: RwLock::new(SchedulerStats::default()),
        };

        Self {
            collector: Arc::new(collector),
            config,
            scheduler: Mutex::new(None),
            startup_pass: Mutex::new(None),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.collector.terms
    }

    /// Run one full pass now, waiting for any in-flight pass to finish first.
    /// Works after `stop`: an earlier cancellation does not carry over.
    pub async fn run_once(&self) -> PassReport {
        let _guard = self.collector.pass_lock.lock().await;
        self.collector.cancelled.store(false, Ordering::SeqCst);
        self.collector.run_pass().await
    }

    /// Start the recurring timer, plus an immediate pass when `run_on_start`.
    pub async fn start(&self) -> Result<()> {
        let mut slot = self.scheduler.lock().await;
        if slot.is_some() {
            return Err(anyhow::anyhow!("Collection scheduler is already started"));
        }
        self.collector.cancelled.store(false, Ordering::SeqCst);

        let scheduler = JobScheduler::new().await?;
        let collector = Arc::clone(&self.collector);
        let job = Job::new_repeated_async(self.config.interval(), move |_uuid, _l| {
            let collector = Arc::clone(&collector);
            Box::pin(async move {
                collector.run_scheduled().await;
            })
        })?;
        scheduler.add(job).await?;
        scheduler.start().await?;
        *slot = Some(scheduler);

        if self.config.run_on_start {
            let collector = Arc::clone(&self.collector);
            let handle = tokio::spawn(async move {
                let _guard = collector.pass_lock.lock().await;
                collector.run_pass().await;
            });
            *self.startup_pass.lock().await = Some(handle);
        }

        tracing::info!(
            interval_hours = self.config.interval_hours,
            run_on_start = self.config.run_on_start,
            "Collection scheduler started"
        );
        Ok(())
    }

    /// Stop the timer and wait for an in-flight pass to stop at the next unit
    /// boundary. A later `run_once` or `start` collects normally again.
    pub async fn stop(&self) -> Result<()> {
        self.collector.cancelled.store(true, Ordering::SeqCst);

        if let Some(mut scheduler) = self.scheduler.lock().await.take() {
            scheduler.shutdown().await?;
        }

        if let Some(handle) = self.startup_pass.lock().await.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Startup pass ended abnormally");
            }
        }

        // Drain any pass started by the timer
        drop(self.collector.pass_lock.lock().await);

        tracing::info!("Collection scheduler stopped");
        Ok(())
    }

    pub fn state(&self) -> SchedulerState {
        if self.collector.running.load(Ordering::SeqCst) {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    pub async fn stats(&self) -> SchedulerStats {
        self.collector.stats.read().await.clone()
    }
}
