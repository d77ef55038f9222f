// ABOUTME: Service Provider Interface describing food provider identity and capabilities
// ABOUTME: Descriptors are fixed per provider type, independent of per-instance readiness
//
// SPDX-License-Identifier: MIT OR Apache-2.0

bitflags::bitflags! {
    /// Provider capability flags, fixed per provider type.
    ///
    /// Capability is a property of the provider's API contract, not of any
    /// particular configured instance; readiness is tracked separately by
    /// the registry.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ProviderCapabilities: u8 {
        /// Provider supports paginated free-text search
        const TEXT_SEARCH = 0b0000_0001;
        /// Provider supports exact barcode lookup
        const BARCODE_LOOKUP = 0b0000_0010;
    }
}

impl ProviderCapabilities {
    /// Capabilities of a text-search-only provider.
    #[must_use]
    pub const fn text_only() -> Self {
        Self::TEXT_SEARCH
    }

    /// Capabilities of a provider supporting both search and barcode lookup.
    #[must_use]
    pub const fn full() -> Self {
        Self::TEXT_SEARCH.union(Self::BARCODE_LOOKUP)
    }

    /// Check if barcode lookup is supported.
    #[must_use]
    pub const fn supports_barcode_lookup(&self) -> bool {
        self.contains(Self::BARCODE_LOOKUP)
    }
}

/// Describes a provider's identity and capabilities.
///
/// Adapters expose a descriptor so the registry can build `ProviderInfo`
/// entries without instantiating vendor-specific types.
pub trait ProviderDescriptor: Send + Sync {
    /// Unique provider identifier (lowercase, e.g., "usda")
    fn name(&self) -> &'static str;

    /// Human-readable display name (e.g., "USDA FoodData Central")
    fn display_name(&self) -> &'static str;

    /// Capability flags for this provider type
    fn capabilities(&self) -> ProviderCapabilities;

    /// Whether this provider type supports barcode lookup
    fn supports_barcode_lookup(&self) -> bool {
        self.capabilities().supports_barcode_lookup()
    }
}

/// Canonical provider name constants.
pub mod names {
    /// USDA FoodData Central
    pub const USDA: &str = "usda";
    /// Open Food Facts crowd-sourced barcode database
    pub const OPEN_FOOD_FACTS: &str = "openfoodfacts";
    /// Edamam commercial food database API
    pub const EDAMAM: &str = "edamam";
    /// In-memory synthetic provider for development and testing
    pub const SYNTHETIC: &str = "synthetic";
}

/// USDA FoodData Central descriptor
#[cfg(feature = "provider-usda")]
pub struct UsdaDescriptor;

#[cfg(feature = "provider-usda")]
impl ProviderDescriptor for UsdaDescriptor {
    fn name(&self) -> &'static str {
        names::USDA
    }

    fn display_name(&self) -> &'static str {
        "USDA FoodData Central"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::text_only()
    }
}

/// Open Food Facts descriptor
#[cfg(feature = "provider-openfoodfacts")]
pub struct OpenFoodFactsDescriptor;

#[cfg(feature = "provider-openfoodfacts")]
impl ProviderDescriptor for OpenFoodFactsDescriptor {
    fn name(&self) -> &'static str {
        names::OPEN_FOOD_FACTS
    }

    fn display_name(&self) -> &'static str {
        "Open Food Facts"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::full()
    }
}

/// Edamam descriptor
#[cfg(feature = "provider-edamam")]
pub struct EdamamDescriptor;

#[cfg(feature = "provider-edamam")]
impl ProviderDescriptor for EdamamDescriptor {
    fn name(&self) -> &'static str {
        names::EDAMAM
    }

    fn display_name(&self) -> &'static str {
        "Edamam Food Database"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::full()
    }
}

/// Synthetic provider descriptor (for development/testing)
#[cfg(feature = "provider-synthetic")]
pub struct SyntheticDescriptor;

#[cfg(feature = "provider-synthetic")]
impl ProviderDescriptor for SyntheticDescriptor {
    fn name(&self) -> &'static str {
        names::SYNTHETIC
    }

    fn display_name(&self) -> &'static str {
        "Synthetic (Test)"
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::full()
    }
}
