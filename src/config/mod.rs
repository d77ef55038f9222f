// ABOUTME: Configuration module organization for server and provider settings
// ABOUTME: Re-exports environment-driven configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management.

pub mod environment;

pub use environment::{EdamamConfig, OpenFoodFactsConfig, ServerConfig, UsdaConfig};
