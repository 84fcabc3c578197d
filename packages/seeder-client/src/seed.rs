//! Bulk notification seeding.
//!
//! Every seed is generated up front, then each submission is spawned as its
//! own task before anything is awaited. The aggregate wait stops at the first
//! failed submission; tasks still running at that point are left to finish on
//! their own.

use async_trait::async_trait;
use futures_util::FutureExt;
use futures_util::stream::{FuturesUnordered, StreamExt};
use rand::Rng;
use seeder_sdk::{NotificationSeed, NotifyClient, SdkError, SdkResult, StatusCode};
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

pub const DEFAULT_SEED_COUNT: usize = 100;

/// Anything that accepts a single seed notification.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    async fn submit(&self, seed: &NotificationSeed) -> SdkResult<StatusCode>;
}

#[async_trait]
impl NotificationSink for NotifyClient {
    async fn submit(&self, seed: &NotificationSeed) -> SdkResult<StatusCode> {
        self.create_notification(seed).await
    }
}

/// 一次播种的参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub count: usize,
    /// `None` dispatches everything at once.
    pub concurrency: Option<NonZeroUsize>,
}

impl SeedPlan {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            concurrency: None,
        }
    }

    pub fn with_concurrency(mut self, limit: NonZeroUsize) -> Self {
        self.concurrency = Some(limit);
        self
    }
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_COUNT)
    }
}

/// 播种结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub submitted: usize,
    /// Responses outside 2xx. Informational only.
    pub non_success: usize,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("notification #{index} failed: {source}")]
    Transport {
        index: usize,
        #[source]
        source: SdkError,
    },

    #[error("seed worker stopped unexpectedly: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn generate<R: Rng>(rng: &mut R, count: usize) -> Vec<NotificationSeed> {
    (0..count).map(|_| NotificationSeed::fake(rng)).collect()
}

/// Generates `plan.count` fake notifications and submits them all to `sink`.
pub async fn seed<S: NotificationSink>(
    sink: Arc<S>,
    plan: &SeedPlan,
) -> Result<SeedReport, SeedError> {
    let seeds = {
        let mut rng = rand::thread_rng();
        generate(&mut rng, plan.count)
    };
    dispatch(sink, seeds, plan.concurrency).await
}

pub async fn dispatch<S: NotificationSink>(
    sink: Arc<S>,
    seeds: Vec<NotificationSeed>,
    concurrency: Option<NonZeroUsize>,
) -> Result<SeedReport, SeedError> {
    let total = seeds.len();
    let limiter = concurrency.map(|limit| Arc::new(Semaphore::new(limit.get())));
    info!(total, concurrency = ?concurrency, "seeding notifications");

    let mut pending: FuturesUnordered<_> = seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| {
            let sink = Arc::clone(&sink);
            let limiter = limiter.clone();
            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => limiter.acquire_owned().await.ok(),
                    None => None,
                };
                sink.submit(&seed).await
            })
            .map(move |joined| (index, joined))
        })
        .collect();

    let mut report = SeedReport::default();
    while let Some((index, joined)) = pending.next().await {
        match joined? {
            Ok(status) => {
                report.submitted += 1;
                if !status.is_success() {
                    report.non_success += 1;
                }
            }
            Err(source) => {
                warn!(index, error = %source, "seed notification failed");
                return Err(SeedError::Transport { index, source });
            }
        }
    }

    debug!(non_success = report.non_success, "responses outside 2xx");
    info!(submitted = report.submitted, "seeding finished");
    Ok(report)
}
