// ABOUTME: Food data provider module organization and public re-exports
// ABOUTME: Trait contract, SPI descriptors, registry, and concrete adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapters over heterogeneous food databases.
//!
//! Each adapter implements [`FoodDataProvider`], translating one upstream
//! schema into the canonical item shape. The [`FoodProviderRegistry`] owns
//! the configured set and their startup readiness snapshots.

pub mod core;
pub mod errors;
pub mod http_client;
pub mod normalize;
pub mod rate_limit;
pub mod registry;
pub mod spi;

#[cfg(feature = "provider-edamam")]
pub mod edamam_provider;
#[cfg(feature = "provider-openfoodfacts")]
pub mod off_provider;
#[cfg(feature = "provider-synthetic")]
pub mod synthetic_provider;
#[cfg(feature = "provider-usda")]
pub mod usda_provider;

pub use self::core::{
    clamp_page_size, FoodDataProvider, Readiness, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use errors::{ProviderError, ProviderResult};
pub use registry::FoodProviderRegistry;
pub use spi::{names, ProviderCapabilities, ProviderDescriptor};

#[cfg(feature = "provider-edamam")]
pub use edamam_provider::EdamamProvider;
#[cfg(feature = "provider-openfoodfacts")]
pub use off_provider::OpenFoodFactsProvider;
#[cfg(feature = "provider-synthetic")]
pub use synthetic_provider::{InjectedFailure, SyntheticProvider};
#[cfg(feature = "provider-usda")]
pub use usda_provider::UsdaProvider;
