//! Capability-negotiated contract for Meshport scene-converter plugins
//!
//! The host never calls a plugin hook directly. It queries the advertised
//! [`ConverterFeatures`], goes through the [`Converter`] facade, and the
//! facade checks the capability, dispatches to the [`SceneConverter`] hook,
//! and validates whatever comes back before handing it over. One capability
//! is derived: a plugin implementing only data output gets file output for
//! free through the default file hook.
//!
//! # Modules
//!
//! - [`features`] - Capability flags and their implication/ordering rules
//! - [`converter`] - The hook trait and the capability-gated facade
//! - [`plugin`] - Interface identity and loader search paths

pub mod converter;
pub mod features;
pub mod plugin;

pub use converter::{Converter, SceneConverter};
pub use features::ConverterFeatures;
pub use plugin::{PLUGIN_INTERFACE, plugin_search_paths};

// Re-export the boundary types so plugins only need this crate.
pub use meshport_common::{Buffer, ByteBuffer, MeshData, ReleasePolicy};
