//! Core traits, settings, and the module registry shared by every catalog crate.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{ContainerSpec, InitCtx, Module};
pub use registry::ModuleRegistry;
