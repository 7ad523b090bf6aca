//! Fakestore storefront library.
//!
//! Server-rendered shop over the public Fakestore catalog API: a product
//! listing with category filters, product detail pages, a cart and a checkout
//! form. Exposed as a library so the router can be driven from tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;
