// ABOUTME: Provider registry for managing all food data providers in a centralized way
// ABOUTME: Handles adapter instantiation, readiness probing, and lookup by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Central registry of food data provider adapters.
//!
//! Built once at startup from [`ServerConfig`]: each enabled adapter is
//! instantiated, its readiness probed a single time, and the result cached
//! in a [`ProviderInfo`] snapshot. Entries preserve the configured
//! preference order, which drives default-provider selection.

use super::core::FoodDataProvider;
use crate::config::ServerConfig;
use crate::models::ProviderInfo;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "provider-edamam")]
use super::edamam_provider::EdamamProvider;
#[cfg(feature = "provider-openfoodfacts")]
use super::off_provider::OpenFoodFactsProvider;
use super::spi::names;
#[cfg(feature = "provider-synthetic")]
use super::synthetic_provider::SyntheticProvider;
#[cfg(feature = "provider-usda")]
use super::usda_provider::UsdaProvider;

/// One registered adapter with its startup readiness snapshot
struct RegistryEntry {
    info: ProviderInfo,
    adapter: Arc<dyn FoodDataProvider>,
}

/// Registry of all configured food data providers
pub struct FoodProviderRegistry {
    entries: Vec<RegistryEntry>,
}

impl FoodProviderRegistry {
    /// Build the registry from configuration, probing each adapter once.
    pub async fn from_config(config: &ServerConfig) -> Self {
        let mut adapters: Vec<Arc<dyn FoodDataProvider>> = Vec::new();
        for name in &config.provider_order {
            match instantiate(name.as_str(), config) {
                Some(adapter) => adapters.push(adapter),
                None => warn!("Unknown or disabled provider in preference order: {name}"),
            }
        }
        Self::with_adapters(adapters).await
    }

    /// Build a registry from pre-constructed adapters, probing each once.
    pub async fn with_adapters(adapters: Vec<Arc<dyn FoodDataProvider>>) -> Self {
        let mut entries = Vec::with_capacity(adapters.len());
        for adapter in adapters {
            let descriptor = adapter.descriptor();
            let name = descriptor.name();
            let label = descriptor.display_name().to_owned();
            let supports_barcode_lookup = descriptor.supports_barcode_lookup();
            let readiness = adapter.check_readiness().await;
            if readiness.ready {
                info!("Provider {name} registered and ready");
            } else {
                warn!(
                    "Provider {name} registered but not ready: {}",
                    readiness.detail.as_deref().unwrap_or("no detail")
                );
            }
            entries.push(RegistryEntry {
                info: ProviderInfo {
                    name: name.to_owned(),
                    label,
                    supports_barcode_lookup,
                    ready: readiness.ready,
                    detail: readiness.detail,
                },
                adapter,
            });
        }

        info!(
            "Food provider registry initialized with {} provider(s): [{}]",
            entries.len(),
            entries
                .iter()
                .map(|e| e.info.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self { entries }
    }

    /// Snapshot of every registered provider, in preference order.
    #[must_use]
    pub fn list(&self) -> Vec<ProviderInfo> {
        self.entries.iter().map(|e| e.info.clone()).collect()
    }

    /// Providers that passed their startup readiness probe.
    #[must_use]
    pub fn list_ready(&self) -> Vec<ProviderInfo> {
        self.entries
            .iter()
            .filter(|e| e.info.ready)
            .map(|e| e.info.clone())
            .collect()
    }

    /// Ready providers that can look up barcodes.
    #[must_use]
    pub fn list_barcode_capable(&self) -> Vec<ProviderInfo> {
        self.entries
            .iter()
            .filter(|e| e.info.ready && e.info.supports_barcode_lookup)
            .map(|e| e.info.clone())
            .collect()
    }

    /// Every registered adapter with its info snapshot, in preference order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(ProviderInfo, Arc<dyn FoodDataProvider>)> {
        self.entries
            .iter()
            .map(|e| (e.info.clone(), Arc::clone(&e.adapter)))
            .collect()
    }

    /// Look up an adapter by provider name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(ProviderInfo, Arc<dyn FoodDataProvider>)> {
        self.entries
            .iter()
            .find(|e| e.info.name == name)
            .map(|e| (e.info.clone(), Arc::clone(&e.adapter)))
    }

    /// First ready provider in preference order, if any.
    #[must_use]
    pub fn default_ready(&self) -> Option<(ProviderInfo, Arc<dyn FoodDataProvider>)> {
        self.entries
            .iter()
            .find(|e| e.info.ready)
            .map(|e| (e.info.clone(), Arc::clone(&e.adapter)))
    }

    /// First ready, barcode-capable provider in preference order, if any.
    #[must_use]
    pub fn default_barcode_capable(&self) -> Option<(ProviderInfo, Arc<dyn FoodDataProvider>)> {
        self.entries
            .iter()
            .find(|e| e.info.ready && e.info.supports_barcode_lookup)
            .map(|e| (e.info.clone(), Arc::clone(&e.adapter)))
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no providers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn instantiate(name: &str, config: &ServerConfig) -> Option<Arc<dyn FoodDataProvider>> {
    match name {
        #[cfg(feature = "provider-usda")]
        names::USDA => Some(Arc::new(UsdaProvider::new(config.usda.clone()))),
        #[cfg(feature = "provider-openfoodfacts")]
        names::OPEN_FOOD_FACTS => Some(Arc::new(OpenFoodFactsProvider::new(
            config.openfoodfacts.clone(),
        ))),
        #[cfg(feature = "provider-edamam")]
        names::EDAMAM => Some(Arc::new(EdamamProvider::new(config.edamam.clone()))),
        #[cfg(feature = "provider-synthetic")]
        names::SYNTHETIC => Some(Arc::new(SyntheticProvider::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::synthetic_provider::SyntheticProvider;

    #[tokio::test]
    async fn registry_snapshots_readiness_once() {
        let registry = FoodProviderRegistry::with_adapters(vec![
            Arc::new(SyntheticProvider::new()) as Arc<dyn FoodDataProvider>
        ])
        .await;

        assert_eq!(registry.len(), 1);
        let list = registry.list();
        assert_eq!(list[0].name, "synthetic");
        assert!(list[0].ready);
        assert!(list[0].supports_barcode_lookup);
        assert_eq!(registry.list_ready().len(), 1);
        assert_eq!(registry.list_barcode_capable().len(), 1);
    }

    #[tokio::test]
    async fn empty_registry_has_no_defaults() {
        let registry = FoodProviderRegistry::with_adapters(Vec::new()).await;
        assert!(registry.is_empty());
        assert!(registry.default_ready().is_none());
        assert!(registry.default_barcode_capable().is_none());
        assert!(registry.resolve("usda").is_none());
    }

    #[tokio::test]
    async fn from_config_skips_unknown_names() {
        let config = ServerConfig {
            provider_order: vec!["synthetic".to_owned(), "bogus".to_owned()],
            ..ServerConfig::default()
        };
        let registry = FoodProviderRegistry::from_config(&config).await;
        assert_eq!(registry.len(), 1);
    }
}
