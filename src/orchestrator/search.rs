// ABOUTME: Single-provider search orchestration with graceful degradation
// ABOUTME: Resolves target provider, applies call budget, never surfaces errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search orchestration.
//!
//! The public search path is infallible by contract: provider failures
//! degrade to an empty item list while the response metadata still reports
//! which provider was consulted. Callers that need failure detail use the
//! comparison orchestrator instead.

use crate::models::NormalizedFoodItem;
use crate::providers::{clamp_page_size, FoodDataProvider, FoodProviderRegistry};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// What to ask the selected provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// Free-text search with 1-based pagination.
    Text {
        /// Query string.
        query: String,
        /// 1-based page number.
        page: u32,
        /// Requested page size, clamped by the orchestrator.
        page_size: u32,
    },
    /// Exact barcode lookup.
    Barcode {
        /// GTIN/UPC/EAN digits as received.
        barcode: String,
    },
}

impl SearchTarget {
    fn needs_barcode_capability(&self) -> bool {
        matches!(self, Self::Barcode { .. })
    }
}

/// Result of an orchestrated search against one provider.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Name of the provider consulted; empty when none was available.
    pub provider: String,
    /// Whether that provider can look up barcodes.
    pub supports_barcode_lookup: bool,
    /// Canonical items, possibly empty.
    pub items: Vec<NormalizedFoodItem>,
}

impl SearchOutcome {
    fn unavailable() -> Self {
        Self {
            provider: String::new(),
            supports_barcode_lookup: false,
            items: Vec::new(),
        }
    }
}

/// Orchestrates searches against the registry's default or a named provider
pub struct SearchOrchestrator {
    registry: Arc<FoodProviderRegistry>,
    call_timeout: Duration,
}

impl SearchOrchestrator {
    /// Create an orchestrator over the given registry.
    #[must_use]
    pub fn new(registry: Arc<FoodProviderRegistry>, call_timeout: Duration) -> Self {
        Self {
            registry,
            call_timeout,
        }
    }

    /// Execute a search, selecting the provider by name or capability.
    ///
    /// When `provider` is `None`, the first ready provider in preference
    /// order is used; barcode targets additionally require barcode
    /// capability. A provider that failed its startup readiness probe is
    /// never called, named or not. Provider failures are logged and
    /// degrade to an empty item list.
    pub async fn search(&self, provider: Option<&str>, target: SearchTarget) -> SearchOutcome {
        let resolved = match provider {
            Some(name) => self.registry.resolve(name),
            None if target.needs_barcode_capability() => self.registry.default_barcode_capable(),
            None => self.registry.default_ready(),
        };

        let Some((info, adapter)) = resolved else {
            warn!("No provider available for search target");
            return SearchOutcome::unavailable();
        };

        // Readiness is frozen at startup; a provider that failed its probe
        // stays out of rotation even when named explicitly.
        if !info.ready {
            warn!("Provider {} is not ready, refusing the call", info.name);
            return SearchOutcome {
                provider: info.name,
                supports_barcode_lookup: info.supports_barcode_lookup,
                items: Vec::new(),
            };
        }

        // Capability gate: a barcode call against a text-only provider is
        // never attempted here, even when the provider was named explicitly.
        if target.needs_barcode_capability() && !info.supports_barcode_lookup {
            warn!("Provider {} does not support barcode lookup", info.name);
            return SearchOutcome {
                provider: info.name,
                supports_barcode_lookup: false,
                items: Vec::new(),
            };
        }

        let items = self.call(adapter.as_ref(), &info.name, &target).await;
        SearchOutcome {
            provider: info.name,
            supports_barcode_lookup: info.supports_barcode_lookup,
            items,
        }
    }

    async fn call(
        &self,
        adapter: &dyn FoodDataProvider,
        provider: &str,
        target: &SearchTarget,
    ) -> Vec<NormalizedFoodItem> {
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

        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(items)) => items,
            Ok(Err(e)) => {
                warn!("Provider {provider} search failed, degrading to empty: {e}");
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "Provider {provider} search exceeded {}ms budget, degrading to empty",
                    self.call_timeout.as_millis()
                );
                Vec::new()
            }
        }
    }
}
