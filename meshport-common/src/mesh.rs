//! In-memory mesh data
//!
//! [`MeshData`] is the value passed into and out of converter plugins. It
//! owns three buffers: the raw index data, the interleaved vertex data, and
//! the attribute descriptors that say how to interpret the vertex bytes.
//! All three carry a release policy (see [`crate::buffer`]); on successful
//! conversion, ownership of the whole value transfers to the caller.

use thiserror::Error;

use crate::buffer::{Buffer, ByteBuffer};

/// Topology of the index stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshPrimitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Width of a single index element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshIndexType {
    U16,
    U32,
}

impl MeshIndexType {
    /// Size of one index in bytes.
    pub fn size(self) -> usize {
        match self {
            MeshIndexType::U16 => 2,
            MeshIndexType::U32 => 4,
        }
    }
}

/// Storage format of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
    Float32x4,
    Unorm8x4,
    Snorm16x2,
    Unorm16x2,
}

impl VertexFormat {
    /// Size of one attribute value in bytes.
    pub fn size(self) -> usize {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
            VertexFormat::Unorm8x4 => 4,
            VertexFormat::Snorm16x2 => 4,
            VertexFormat::Unorm16x2 => 4,
        }
    }
}

/// Semantic of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshAttribute {
    Position,
    Normal,
    Tangent,
    TextureCoordinates,
    Color,
    JointIds,
    Weights,
}

/// Describes one attribute within the interleaved vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshAttributeData {
    pub attribute: MeshAttribute,
    pub format: VertexFormat,
    /// Byte offset of the first value inside the vertex buffer.
    pub offset: usize,
    /// Byte distance between consecutive values.
    pub stride: usize,
}

impl MeshAttributeData {
    pub fn new(attribute: MeshAttribute, format: VertexFormat, offset: usize, stride: usize) -> Self {
        MeshAttributeData {
            attribute,
            format,
            offset,
            stride,
        }
    }
}

/// Construction-time validation failure for [`MeshData`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshDataError {
    #[error("index buffer length {length} is not a multiple of the {index_size}-byte index size")]
    MisalignedIndexData { length: usize, index_size: usize },

    #[error(
        "attribute {attribute:?} overruns its stride (offset {offset} + size {size} > stride {stride})"
    )]
    AttributeOutOfBounds {
        attribute: MeshAttribute,
        offset: usize,
        size: usize,
        stride: usize,
    },

    #[error(
        "vertex buffer too small for attribute {attribute:?}: have {length} bytes, need {required}"
    )]
    VertexDataTooSmall {
        attribute: MeshAttribute,
        length: usize,
        required: usize,
    },
}

/// Indexed mesh with interleaved vertex data and per-attribute descriptors.
#[derive(Debug)]
pub struct MeshData {
    primitive: MeshPrimitive,
    index_type: MeshIndexType,
    index_data: ByteBuffer,
    vertex_data: ByteBuffer,
    attributes: Buffer<MeshAttributeData>,
    vertex_count: u32,
}

impl MeshData {
    /// Create a mesh, validating that the buffers and descriptors agree.
    ///
    /// An empty index buffer describes a non-indexed mesh.
    pub fn new(
        primitive: MeshPrimitive,
        index_type: MeshIndexType,
        index_data: ByteBuffer,
        vertex_data: ByteBuffer,
        attributes: Buffer<MeshAttributeData>,
        vertex_count: u32,
    ) -> Result<Self, MeshDataError> {
        if index_data.len() % index_type.size() != 0 {
            return Err(MeshDataError::MisalignedIndexData {
                length: index_data.len(),
                index_size: index_type.size(),
            });
        }

        for descriptor in attributes.iter() {
            let size = descriptor.format.size();
            if descriptor.offset + size > descriptor.stride {
                return Err(MeshDataError::AttributeOutOfBounds {
                    attribute: descriptor.attribute,
                    offset: descriptor.offset,
                    size,
                    stride: descriptor.stride,
                });
            }

            if vertex_count > 0 {
                let required =
                    descriptor.offset + (vertex_count as usize - 1) * descriptor.stride + size;
                if vertex_data.len() < required {
                    return Err(MeshDataError::VertexDataTooSmall {
                        attribute: descriptor.attribute,
                        length: vertex_data.len(),
                        required,
                    });
                }
            }
        }

        Ok(MeshData {
            primitive,
            index_type,
            index_data,
            vertex_data,
            attributes,
            vertex_count,
        })
    }

    pub fn primitive(&self) -> MeshPrimitive {
        self.primitive
    }

    pub fn index_type(&self) -> MeshIndexType {
        self.index_type
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        (self.index_data.len() / self.index_type.size()) as u32
    }

    pub fn is_indexed(&self) -> bool {
        !self.index_data.is_empty()
    }

    pub fn index_data(&self) -> &ByteBuffer {
        &self.index_data
    }

    pub fn vertex_data(&self) -> &ByteBuffer {
        &self.vertex_data
    }

    pub fn attributes(&self) -> &Buffer<MeshAttributeData> {
        &self.attributes
    }

    /// Mutable index bytes, or `None` if the buffer is a borrowed view.
    pub fn index_data_mut(&mut self) -> Option<&mut [u8]> {
        self.index_data.as_mut_slice()
    }

    /// Mutable vertex bytes, or `None` if the buffer is a borrowed view.
    pub fn vertex_data_mut(&mut self) -> Option<&mut [u8]> {
        self.vertex_data.as_mut_slice()
    }

    /// Typed view of the index buffer, if it holds 16-bit indices.
    pub fn indices_u16(&self) -> Option<&[u16]> {
        if self.index_type != MeshIndexType::U16 {
            return None;
        }
        bytemuck::try_cast_slice(self.index_data.as_slice()).ok()
    }

    /// Typed view of the index buffer, if it holds 32-bit indices.
    pub fn indices_u32(&self) -> Option<&[u32]> {
        if self.index_type != MeshIndexType::U32 {
            return None;
        }
        bytemuck::try_cast_slice(self.index_data.as_slice()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_attribute() -> MeshAttributeData {
        MeshAttributeData::new(MeshAttribute::Position, VertexFormat::Float32x3, 0, 12)
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = MeshData::new(
            MeshPrimitive::Triangles,
            MeshIndexType::U16,
            Buffer::from_vec(vec![0, 0, 1, 0, 2, 0]),
            Buffer::from_vec(vec![0u8; 36]),
            Buffer::from_vec(vec![position_attribute()]),
            3,
        )
        .unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.index_count(), 3);
        assert!(mesh.is_indexed());
        assert_eq!(mesh.indices_u16(), Some(&[0u16, 1, 2][..]));
        assert_eq!(mesh.indices_u32(), None);
    }

    #[test]
    fn test_misaligned_index_data() {
        let err = MeshData::new(
            MeshPrimitive::Triangles,
            MeshIndexType::U32,
            Buffer::from_vec(vec![0u8; 6]),
            Buffer::from_vec(vec![0u8; 36]),
            Buffer::from_vec(vec![position_attribute()]),
            3,
        )
        .unwrap_err();

        assert_eq!(
            err,
            MeshDataError::MisalignedIndexData {
                length: 6,
                index_size: 4
            }
        );
    }

    #[test]
    fn test_attribute_overruns_stride() {
        let bad = MeshAttributeData::new(MeshAttribute::Normal, VertexFormat::Float32x3, 8, 16);
        let err = MeshData::new(
            MeshPrimitive::Triangles,
            MeshIndexType::U16,
            Buffer::new(),
            Buffer::from_vec(vec![0u8; 64]),
            Buffer::from_vec(vec![bad]),
            4,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            MeshDataError::AttributeOutOfBounds {
                attribute: MeshAttribute::Normal,
                ..
            }
        ));
    }

    #[test]
    fn test_vertex_buffer_too_small() {
        let err = MeshData::new(
            MeshPrimitive::Triangles,
            MeshIndexType::U16,
            Buffer::new(),
            Buffer::from_vec(vec![0u8; 24]),
            Buffer::from_vec(vec![position_attribute()]),
            3,
        )
        .unwrap_err();

        assert_eq!(
            err,
            MeshDataError::VertexDataTooSmall {
                attribute: MeshAttribute::Position,
                length: 24,
                required: 36,
            }
        );
    }

    #[test]
    fn test_mutable_buffer_access() {
        let mut mesh = MeshData::new(
            MeshPrimitive::Triangles,
            MeshIndexType::U16,
            Buffer::from_vec(vec![0, 0, 1, 0, 2, 0]),
            Buffer::from_vec(vec![0u8; 36]),
            Buffer::from_vec(vec![position_attribute()]),
            3,
        )
        .unwrap();

        mesh.index_data_mut().unwrap()[0] = 2;
        mesh.vertex_data_mut().unwrap()[0] = 0x7f;
        assert_eq!(mesh.indices_u16(), Some(&[2u16, 1, 2][..]));
        assert_eq!(mesh.vertex_data()[0], 0x7f);
    }

    #[test]
    fn test_non_indexed_mesh() {
        let mesh = MeshData::new(
            MeshPrimitive::Points,
            MeshIndexType::U16,
            Buffer::new(),
            Buffer::from_vec(vec![0u8; 12]),
            Buffer::from_vec(vec![position_attribute()]),
            1,
        )
        .unwrap();

        assert!(!mesh.is_indexed());
        assert_eq!(mesh.index_count(), 0);
    }
}
