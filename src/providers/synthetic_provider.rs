// ABOUTME: In-memory synthetic food data provider for development and testing
// ABOUTME: Supports seeded item sets, artificial latency, and failure injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synthetic provider backed by an in-memory item set.
//!
//! Ready by default, never touches the network. Useful for exercising the
//! orchestrators and HTTP surface without external credentials, and for
//! deterministic latency/failure scenarios in tests.

use crate::models::NormalizedFoodItem;
use crate::providers::core::{FoodDataProvider, Readiness};
use crate::providers::errors::{ProviderError, ProviderResult};
use crate::providers::spi::{names, ProviderDescriptor, SyntheticDescriptor};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Failure mode injected into every call, for orchestrator testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    /// Report the provider's own timeout error without waiting.
    Timeout,
    /// Report an unreachable-upstream error.
    Unreachable,
}

/// In-memory provider with configurable latency and failure injection
pub struct SyntheticProvider {
    descriptor: SyntheticDescriptor,
    items: Arc<RwLock<Vec<NormalizedFoodItem>>>,
    latency: Option<Duration>,
    failure: Option<InjectedFailure>,
    readiness: Readiness,
}

impl SyntheticProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: SyntheticDescriptor,
            items: Arc::new(RwLock::new(Vec::new())),
            latency: None,
            failure: None,
            readiness: Readiness::ready(),
        }
    }

    /// Create a provider seeded with `items`.
    #[must_use]
    pub fn with_items(items: Vec<NormalizedFoodItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            ..Self::new()
        }
    }

    /// Delay every call by `latency` before responding.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every call with the given mode.
    #[must_use]
    pub fn with_failure(mut self, failure: InjectedFailure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Override the startup readiness report, for exercising rotation
    /// exclusion.
    #[must_use]
    pub fn with_readiness(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }

    /// Append an item to the backing set.
    pub async fn push(&self, item: NormalizedFoodItem) {
        self.items.write().await.push(item);
    }

    async fn apply_faults(&self) -> ProviderResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.failure {
            Some(InjectedFailure::Timeout) => Err(ProviderError::Timeout {
                provider: names::SYNTHETIC,
            }),
            Some(InjectedFailure::Unreachable) => Err(ProviderError::Unreachable {
                provider: names::SYNTHETIC,
                message: "injected failure".to_owned(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FoodDataProvider for SyntheticProvider {
    fn descriptor(&self) -> &dyn ProviderDescriptor {
        &self.descriptor
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> ProviderResult<Vec<NormalizedFoodItem>> {
        self.apply_faults().await?;
        let needle = query.to_lowercase();
        let items = self.items.read().await;
        let matched: Vec<NormalizedFoodItem> = items
            .iter()
            .filter(|item| item.description.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let start = (page.max(1) as usize - 1) * page_size as usize;
        Ok(matched
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect())
    }

    async fn lookup_barcode(&self, barcode: &str) -> ProviderResult<Vec<NormalizedFoodItem>> {
        self.apply_faults().await?;
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| item.barcode.as_deref() == Some(barcode))
            .cloned()
            .collect())
    }

    async fn check_readiness(&self) -> Readiness {
        self.readiness.clone()
    }
}
