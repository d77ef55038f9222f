// ABOUTME: Core provider trait and shared request types for food data access
// ABOUTME: Defines the contract every nutrition database adapter implements
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared adapter contract for nutrition data providers.
//!
//! Every provider (USDA, Open Food Facts, Edamam, Synthetic) implements
//! [`FoodDataProvider`]. Adapters own all vendor-specific concerns: query
//! construction, auth header injection, page-cursor translation, and
//! response parsing. They accept the orchestrator's simple 1-based page
//! number and hide any cursor bookkeeping internally. Adapters never share
//! mutable state with each other.

use crate::models::NormalizedFoodItem;
use crate::providers::errors::ProviderResult;
use crate::providers::spi::ProviderDescriptor;
use async_trait::async_trait;

/// Default page size applied when a caller omits one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on page size accepted from callers.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Startup-time readiness determination for one provider.
#[derive(Debug, Clone)]
pub struct Readiness {
    /// Whether the provider can be queried at all
    pub ready: bool,
    /// Human-readable reason when not ready
    pub detail: Option<String>,
}

impl Readiness {
    /// A ready provider.
    #[must_use]
    pub const fn ready() -> Self {
        Self {
            ready: true,
            detail: None,
        }
    }

    /// A provider excluded from rotation, with the reason.
    #[must_use]
    pub fn unready(detail: impl Into<String>) -> Self {
        Self {
            ready: false,
            detail: Some(detail.into()),
        }
    }
}

/// Core food data provider trait implemented once per vendor.
///
/// All implementations must be `Send + Sync`; each call is pure with
/// respect to request/response aside from internal cursor bookkeeping.
#[async_trait]
pub trait FoodDataProvider: Send + Sync {
    /// Identity and capability metadata for this provider type.
    fn descriptor(&self) -> &dyn ProviderDescriptor;

    /// Unique provider name (shorthand for `descriptor().name()`).
    fn name(&self) -> &'static str {
        self.descriptor().name()
    }

    /// Paginated free-text search, 1-based page numbering.
    ///
    /// # Errors
    ///
    /// Fails with a [`crate::providers::errors::ProviderError`] scoped to
    /// this single call; the layer never retries.
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> ProviderResult<Vec<NormalizedFoodItem>>;

    /// Exact barcode lookup.
    ///
    /// Callers check `ProviderInfo::supports_barcode_lookup` first, but the
    /// default implementation enforces the invariant defensively.
    ///
    /// # Errors
    ///
    /// Fails with `UnsupportedOperation` on text-only providers, otherwise
    /// the same taxonomy as [`Self::search`].
    async fn lookup_barcode(&self, barcode: &str) -> ProviderResult<Vec<NormalizedFoodItem>> {
        let _ = barcode;
        Err(
            crate::providers::errors::ProviderError::UnsupportedOperation {
                provider: self.name(),
                operation: "barcode_lookup",
            },
        )
    }

    /// Startup-time readiness check, called once by the registry.
    ///
    /// Inexpensive: providers whose readiness is fully determined by
    /// configuration presence must not make a network call; others may
    /// issue a lightweight reachability probe.
    async fn check_readiness(&self) -> Readiness;
}

/// Clamp a requested page size into the accepted range.
#[must_use]
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_clamped_to_bounds() {
        assert_eq!(clamp_page_size(0), 1);
        assert_eq!(clamp_page_size(20), 20);
        assert_eq!(clamp_page_size(10_000), MAX_PAGE_SIZE);
    }
}
