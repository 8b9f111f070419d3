//! Driftline Core - Shared types library.
//!
//! This crate provides common types used across all Driftline components:
//! - `storefront` - Public-facing e-commerce site
//! - `integration-tests` - End-to-end tests against a mocked platform
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Money and sale-price derivation shared by every component
//!   that renders a price

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
