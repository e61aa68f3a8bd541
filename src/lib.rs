//! Books and pets catalog services.
//!
//! Each service is a [`catalog_kernel::Module`] exposing CRUD routes over its
//! own document container. [`app`] wires them to a store and an HTTP server.

pub mod app;
pub mod merge;
pub mod modules;
pub mod utils;

pub use app::serve;
pub use modules::register_all;
