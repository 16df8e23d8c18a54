//! Shared value types for the Meshport converter plugin boundary
//!
//! This crate provides the data that crosses between the host application
//! and scene-converter plugins:
//!
//! - [`buffer`] - Release-policy-tagged buffers ([`Buffer`], [`ByteBuffer`])
//! - [`mesh`] - In-memory mesh data ([`MeshData`] and its attribute vocabulary)
//!
//! The converter contract itself lives in `meshport-convert`; this crate is
//! deliberately free of any conversion logic so concrete plugins can depend
//! on it without pulling in the host-side facade.

pub mod buffer;
pub mod mesh;

pub use buffer::{Buffer, ByteBuffer, ReleasePolicy};
pub use mesh::{
    MeshAttribute, MeshAttributeData, MeshData, MeshDataError, MeshIndexType, MeshPrimitive,
    VertexFormat,
};
