//! Core types for Fakestore.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;

pub use category::{Category, CategoryFilter, ParseCategoryError};
pub use id::*;
pub use price::Price;
