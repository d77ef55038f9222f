// ABOUTME: Concurrent multi-provider comparison with per-call timeouts
// ABOUTME: Fans one query out to many providers and preserves failure detail
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Side-by-side provider comparison.
//!
//! Unlike the public search path, comparison keeps each provider's failure
//! visible: every requested provider yields a result entry carrying its
//! items (empty on failure), the error string when the call failed, and
//! wall-clock latency. Calls run
//! concurrently under a shared per-call budget, so total latency is bounded
//! by the slowest provider (or the budget), not the sum.

use super::search::SearchTarget;
use crate::models::{NormalizedFoodItem, ProviderInfo};
use crate::providers::{clamp_page_size, FoodDataProvider, FoodProviderRegistry};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::warn;

/// Outcome of one provider's leg of a comparison.
#[derive(Debug, Clone)]
pub struct ComparisonEntry {
    /// Provider metadata as known at registration time.
    pub info: ProviderInfo,
    /// Items returned by the provider; empty when the call failed.
    pub items: Vec<NormalizedFoodItem>,
    /// Human-readable failure description, if the call failed.
    pub error: Option<String>,
    /// Wall-clock time the provider call took.
    pub elapsed_ms: u64,
}

/// Runs the same search target against several providers concurrently
pub struct ComparisonOrchestrator {
    registry: Arc<FoodProviderRegistry>,
    call_timeout: Duration,
}

impl ComparisonOrchestrator {
    /// Create an orchestrator over the given registry.
    #[must_use]
    pub fn new(registry: Arc<FoodProviderRegistry>, call_timeout: Duration) -> Self {
        Self {
            registry,
            call_timeout,
        }
    }

    /// Fan the target out to the named providers (all registered providers
    /// when `providers` is empty) and collect per-provider results in
    /// request order.
    pub async fn compare(&self, providers: &[String], target: &SearchTarget) -> Vec<ComparisonEntry> {
        // Empty request means every registered adapter; resolving by name
        // would collapse same-named entries to the first match.
        let legs: Vec<(ProviderInfo, Option<Arc<dyn FoodDataProvider>>)> = if providers.is_empty() {
            self.registry
                .pairs()
                .into_iter()
                .map(|(info, adapter)| (info, Some(adapter)))
                .collect()
        } else {
            providers
                .iter()
                .map(|name| match self.registry.resolve(name) {
                    Some((info, adapter)) => (info, Some(adapter)),
                    None => {
                        warn!("Comparison requested unknown provider: {name}");
                        (
                            ProviderInfo {
                                name: name.clone(),
                                label: name.clone(),
                                supports_barcode_lookup: false,
                                ready: false,
                                detail: None,
                            },
                            None,
                        )
                    }
                })
                .collect()
        };

        let mut join_set: JoinSet<(usize, ComparisonEntry)> = JoinSet::new();
        let mut results: Vec<Option<ComparisonEntry>> = Vec::with_capacity(legs.len());

        for (index, (info, adapter)) in legs.into_iter().enumerate() {
            results.push(None);
            match adapter {
                Some(adapter) => {
                    let target = target.clone();
                    let timeout = self.call_timeout;
                    join_set.spawn(async move {
                        (index, run_leg(info, adapter, &target, timeout).await)
                    });
                }
                None => {
                    results[index] = Some(ComparisonEntry {
                        info,
                        items: Vec::new(),
                        error: Some("unknown provider".to_owned()),
                        elapsed_ms: 0,
                    });
                }
            }
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, entry)) => results[index] = Some(entry),
                Err(e) => warn!("Comparison task failed to join: {e}"),
            }
        }

        // A panicked leg leaves a hole; drop it rather than invent data.
        results.into_iter().flatten().collect()
    }
}

async fn run_leg(
    info: ProviderInfo,
    adapter: Arc<dyn FoodDataProvider>,
    target: &SearchTarget,
    timeout: Duration,
) -> ComparisonEntry {
    let started = Instant::now();
    let call = async {
        match target {
            SearchTarget::Text {
                query,
                page,
                page_size,
            } => {
                adapter
                    .search(query, (*page).max(1), clamp_page_size(*page_size))
                    .await
            }
            SearchTarget::Barcode { barcode } => adapter.lookup_barcode(barcode).await,
        }
    };

    let (items, error) = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(items)) => (items, None),
        Ok(Err(e)) => (Vec::new(), Some(e.to_string())),
        Err(_) => (
            Vec::new(),
            Some(format!("timed out after {}ms", timeout.as_millis())),
        ),
    };

    ComparisonEntry {
        info,
        items,
        error,
        elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}
