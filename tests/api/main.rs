//! Catalog API integration tests.

mod support;
mod catalog;
mod errors;
