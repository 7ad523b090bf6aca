//! Fakestore Core - Shared types library.
//!
//! This crate provides common types used across the Fakestore components:
//! - `storefront` - Server-rendered shop over the public catalog API
//! - `integration-tests` - Cross-module tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and catalog categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
