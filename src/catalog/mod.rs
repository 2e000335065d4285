//! Catalog - product documents read by the order service.
//!
//! Products are created and edited by catalog management elsewhere; this
//! crate only reads them and moves their stock counter.

mod product;
pub mod seed;

pub use product::{Category, Product, Ratings, Specifications, PLACEHOLDER_IMAGE};
