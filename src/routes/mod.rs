// ABOUTME: HTTP route module organization for public, dev, and health surfaces
// ABOUTME: Re-exports per-surface route builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP route handlers.

pub mod dev;
pub mod food;
pub mod health;

pub use dev::DevRoutes;
pub use food::FoodRoutes;
pub use health::HealthRoutes;
