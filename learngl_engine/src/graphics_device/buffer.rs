/// Vertex data descriptors
///
/// Interleaved vertex buffers are described by a `VertexLayout`: one
/// stride and a list of float attributes bound to shader locations.

/// Vertex attribute data format
///
/// Defines the component count of a 32-bit float attribute
/// (position, normal, texture coordinates, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum BufferFormat {
    R32_SFLOAT,          // float (4 bytes)
    R32G32_SFLOAT,       // vec2 (8 bytes)
    R32G32B32_SFLOAT,    // vec3 (12 bytes)
    R32G32B32A32_SFLOAT, // vec4 (16 bytes)
}

impl BufferFormat {
    /// Number of float components
    pub fn component_count(&self) -> u32 {
        match self {
            BufferFormat::R32_SFLOAT => 1,
            BufferFormat::R32G32_SFLOAT => 2,
            BufferFormat::R32G32B32_SFLOAT => 3,
            BufferFormat::R32G32B32A32_SFLOAT => 4,
        }
    }

    /// Returns size in bytes for this format
    pub fn size_bytes(&self) -> u32 {
        self.component_count() * 4
    }
}

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Every three vertices form a triangle
    TriangleList,
    /// Each vertex is a point sprite
    PointList,
}

impl PrimitiveTopology {
    /// Number of primitives produced by `vertex_count` vertices
    pub fn primitive_count(&self, vertex_count: u32) -> u32 {
        match self {
            PrimitiveTopology::TriangleList => vertex_count / 3,
            PrimitiveTopology::PointList => vertex_count,
        }
    }
}

/// Vertex attribute descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader location (`layout (location = N)`)
    pub location: u32,
    /// Attribute format
    pub format: BufferFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Interleaved vertex layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    /// Size in bytes of one vertex
    pub stride: u32,
    /// Vertex attributes
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Build a tightly packed layout, assigning locations 0, 1, 2...
    /// in the order the formats are given
    pub fn packed(formats: &[BufferFormat]) -> Self {
        let mut offset = 0;
        let attributes = formats
            .iter()
            .enumerate()
            .map(|(location, format)| {
                let attribute = VertexAttribute {
                    location: location as u32,
                    format: *format,
                    offset,
                };
                offset += format.size_bytes();
                attribute
            })
            .collect();
        Self { stride: offset, attributes }
    }

    /// Number of whole vertices contained in `byte_len` bytes
    pub fn vertex_count(&self, byte_len: usize) -> u32 {
        if self.stride == 0 {
            0
        } else {
            (byte_len / self.stride as usize) as u32
        }
    }
}

/// Descriptor for creating a vertex array
#[derive(Debug, Clone)]
pub struct VertexArrayDesc<'a> {
    /// Interleaved vertex data
    pub vertices: &'a [u8],
    /// Optional 32-bit indices
    pub indices: Option<&'a [u32]>,
    /// How `vertices` is laid out
    pub layout: &'a VertexLayout,
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
