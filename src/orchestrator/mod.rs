// ABOUTME: Orchestration module organization for search and comparison flows
// ABOUTME: Re-exports the orchestrators and their request/response types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query orchestration over the provider registry.

pub mod comparison;
pub mod search;

pub use comparison::{ComparisonEntry, ComparisonOrchestrator};
pub use search::{SearchOrchestrator, SearchOutcome, SearchTarget};
