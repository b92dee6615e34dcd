//! Concurrent balance computation over store snapshots.

use std::{collections::HashMap, sync::Arc};

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::{
    sync::{mpsc, Semaphore},
    task::{self, JoinSet},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{BalanceCache, BalanceResult, BalanceSources};
use crate::calendar::CalendarDay;
use crate::config::EngineConfig;
use crate::errors::{BalanceError, Result};
use crate::storage::{GoalStore, JsonCacheStore};
use crate::time::{Clock, SystemClock};

/// Failure of one (goal, day) pair inside a batch.
#[derive(Debug, Error)]
#[error("balance for goal {goal_id} on {day} failed: {source}")]
pub struct BatchError {
    pub goal_id: Uuid,
    pub day: CalendarDay,
    #[source]
    pub source: BalanceError,
}

pub type BatchItem = std::result::Result<BalanceResult, BatchError>;

/// Computes goal balances by fanning out the paid-in, expense and adjustment totals and
/// joining them against a single store snapshot.
///
/// Cloning is cheap; clones share the store, strategies, cache and concurrency limit.
#[derive(Clone)]
pub struct BalanceAggregator {
    store: Arc<dyn GoalStore>,
    sources: BalanceSources,
    cache: Option<BalanceCache>,
    clock: Arc<dyn Clock>,
    limiter: Arc<Semaphore>,
}

impl BalanceAggregator {
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self {
            store,
            sources: BalanceSources::default(),
            cache: None,
            clock: Arc::new(SystemClock),
            limiter: Arc::new(Semaphore::new(EngineConfig::default_max_concurrency())),
        }
    }

    /// Builds an aggregator with the configured concurrency and a JSON-file balance cache.
    pub fn from_config(store: Arc<dyn GoalStore>, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let cache_store = JsonCacheStore::open(config.resolve_cache_file())?;
        Ok(Self::new(store)
            .with_max_concurrency(config.max_concurrency)
            .with_cache(BalanceCache::new(Arc::new(cache_store))))
    }

    pub fn with_sources(mut self, sources: BalanceSources) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_cache(mut self, cache: BalanceCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Caps how many computations run at once; zero is treated as one.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.limiter = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    pub fn cache(&self) -> Option<&BalanceCache> {
        self.cache.as_ref()
    }

    /// Last balance cached for the goal, zero when none was recorded or no cache is set.
    pub fn cached_balance(&self, goal_id: Uuid) -> Result<Decimal> {
        match &self.cache {
            Some(cache) => cache.get(goal_id),
            None => Ok(Decimal::ZERO),
        }
    }

    /// Computes the balance of `goal_id` on `day`.
    ///
    /// When `day` is today and a balance is present, it is also written to the cache.
    pub async fn calculate_balance(&self, goal_id: Uuid, day: CalendarDay) -> Result<BalanceResult> {
        let _permit = Arc::clone(&self.limiter)
            .acquire_owned()
            .await
            .map_err(|err| BalanceError::Task(err.to_string()))?;
        let result = self.compute(goal_id, day).await?;
        self.remember_today(&result).await;
        Ok(result)
    }

    pub async fn calculate_today(&self, goal_id: Uuid) -> Result<BalanceResult> {
        self.calculate_balance(goal_id, self.clock.today()).await
    }

    /// Computes every (goal, day) pair concurrently and streams results as they complete.
    ///
    /// Completion order is unspecified. Every pair yields exactly one item; a computation that
    /// panics is reported as a [`BalanceError::Task`] for its pair. Dropping the receiver
    /// aborts outstanding work.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn calculate_balances<G, D>(&self, goal_ids: G, days: D) -> mpsc::Receiver<BatchItem>
    where
        G: IntoIterator<Item = Uuid>,
        D: IntoIterator<Item = CalendarDay>,
    {
        let days: Vec<CalendarDay> = days.into_iter().collect();
        let pairs: Vec<(Uuid, CalendarDay)> = goal_ids
            .into_iter()
            .flat_map(|goal_id| days.iter().map(move |day| (goal_id, *day)))
            .collect();
        let (tx, rx) = mpsc::channel(pairs.len().max(1));
        let aggregator = self.clone();

        tokio::spawn(async move {
            info!(pairs = pairs.len(), "starting batch balance computation");
            let mut set = JoinSet::new();
            let mut pending = HashMap::with_capacity(pairs.len());
            for (goal_id, day) in pairs {
                let aggregator = aggregator.clone();
                let handle = set.spawn(async move {
                    aggregator
                        .calculate_balance(goal_id, day)
                        .await
                        .map_err(|source| BatchError {
                            goal_id,
                            day,
                            source,
                        })
                });
                pending.insert(handle.id(), (goal_id, day));
            }

            let mut delivered = 0usize;
            while let Some(joined) = set.join_next_with_id().await {
                let item = match joined {
                    Ok((id, item)) => {
                        pending.remove(&id);
                        item
                    }
                    Err(err) => {
                        let Some((goal_id, day)) = pending.remove(&err.id()) else {
                            error!(error = %err, "unknown balance task did not complete");
                            continue;
                        };
                        error!(%goal_id, %day, error = %err, "balance task did not complete");
                        Err(BatchError {
                            goal_id,
                            day,
                            source: BalanceError::from(err),
                        })
                    }
                };
                if tx.send(item).await.is_err() {
                    debug!(delivered, "batch receiver dropped; aborting remaining work");
                    set.abort_all();
                    return;
                }
                delivered += 1;
            }
            info!(delivered, "finished batch balance computation");
        });

        rx
    }

    async fn compute(&self, goal_id: Uuid, day: CalendarDay) -> Result<BalanceResult> {
        let store = Arc::clone(&self.store);
        let (snapshot, goal) = task::spawn_blocking(move || -> Result<_> {
            let snapshot = store.snapshot()?;
            let goal = snapshot
                .goal(goal_id)?
                .ok_or(BalanceError::GoalNotFound(goal_id))?;
            Ok((snapshot, goal))
        })
        .await??;

        let Some(period) = goal.period_for(day) else {
            debug!(%goal_id, %day, "no billing period covers day");
            return Ok(BalanceResult::absent(goal_id, day));
        };
        debug!(%goal_id, %day, %period, "computing balance");

        let goal = Arc::new(goal);
        let paid = {
            let source = Arc::clone(&self.sources.paid);
            let (snapshot, goal) = (Arc::clone(&snapshot), Arc::clone(&goal));
            task::spawn_blocking(move || source.total_paid(snapshot.as_ref(), &goal, day, &period))
        };
        let expenses = {
            let source = Arc::clone(&self.sources.expenses);
            let (snapshot, goal) = (Arc::clone(&snapshot), Arc::clone(&goal));
            task::spawn_blocking(move || source.total_expenses(snapshot.as_ref(), &goal, &period))
        };
        let adjustments = {
            let source = Arc::clone(&self.sources.adjustments);
            let (snapshot, goal) = (Arc::clone(&snapshot), Arc::clone(&goal));
            task::spawn_blocking(move || {
                source.total_adjustments(snapshot.as_ref(), &goal, &period)
            })
        };

        let (paid, expenses, adjustments) = tokio::try_join!(paid, expenses, adjustments)?;
        // A failed read is never folded into an absent balance.
        let (paid, expenses, adjustments) = (paid?, expenses?, adjustments?);
        debug!(%goal_id, %day, ?paid, %expenses, %adjustments, "joined balance totals");
        Ok(BalanceResult::combine(
            goal_id,
            day,
            paid,
            expenses,
            adjustments,
        ))
    }

    async fn remember_today(&self, result: &BalanceResult) {
        let (Some(cache), Some(amount)) = (self.cache.clone(), result.amount) else {
            return;
        };
        if result.day != self.clock.today() {
            return;
        }
        let goal_id = result.goal_id;
        match task::spawn_blocking(move || cache.set(goal_id, amount)).await {
            Ok(Ok(())) => debug!(%goal_id, %amount, "cached today's balance"),
            Ok(Err(err)) => warn!(%goal_id, error = %err, "failed to cache today's balance"),
            Err(err) => warn!(%goal_id, error = %err, "cache task did not complete"),
        }
    }
}
