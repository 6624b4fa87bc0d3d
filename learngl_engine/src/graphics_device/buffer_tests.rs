//! Unit tests for buffer.rs
//!
//! Tests BufferFormat, PrimitiveTopology and VertexLayout.

use crate::graphics_device::{BufferFormat, PrimitiveTopology, VertexLayout, VertexAttribute};

// ============================================================================
// BUFFER FORMAT TESTS
// ============================================================================

#[test]
fn test_buffer_format_size_bytes() {
    assert_eq!(BufferFormat::R32_SFLOAT.size_bytes(), 4);
    assert_eq!(BufferFormat::R32G32_SFLOAT.size_bytes(), 8);
    assert_eq!(BufferFormat::R32G32B32_SFLOAT.size_bytes(), 12);
    assert_eq!(BufferFormat::R32G32B32A32_SFLOAT.size_bytes(), 16);
}

#[test]
fn test_buffer_format_component_count() {
    assert_eq!(BufferFormat::R32G32_SFLOAT.component_count(), 2);
    assert_eq!(BufferFormat::R32G32B32A32_SFLOAT.component_count(), 4);
}

// ============================================================================
// PRIMITIVE TOPOLOGY TESTS
// ============================================================================

#[test]
fn test_primitive_count() {
    assert_eq!(PrimitiveTopology::TriangleList.primitive_count(36), 12);
    assert_eq!(PrimitiveTopology::TriangleList.primitive_count(2), 0);
    assert_eq!(PrimitiveTopology::PointList.primitive_count(36), 36);
}

// ============================================================================
// VERTEX LAYOUT TESTS
// ============================================================================

#[test]
fn test_packed_layout_position_normal_uv() {
    let layout = VertexLayout::packed(&[
        BufferFormat::R32G32B32_SFLOAT,
        BufferFormat::R32G32B32_SFLOAT,
        BufferFormat::R32G32_SFLOAT,
    ]);

    assert_eq!(layout.stride, 32);
    assert_eq!(layout.attributes.len(), 3);
    assert_eq!(layout.attributes[1], VertexAttribute {
        location: 1,
        format: BufferFormat::R32G32B32_SFLOAT,
        offset: 12,
    });
    assert_eq!(layout.attributes[2].offset, 24);
    assert_eq!(layout.attributes[2].location, 2);
}

#[test]
fn test_vertex_count_ignores_trailing_bytes() {
    let layout = VertexLayout::packed(&[BufferFormat::R32G32_SFLOAT]);
    assert_eq!(layout.vertex_count(8 * 6), 6);
    assert_eq!(layout.vertex_count(8 * 6 + 3), 6);
}

#[test]
fn test_empty_layout() {
    let layout = VertexLayout::default();
    assert_eq!(layout.stride, 0);
    assert_eq!(layout.vertex_count(128), 0);
}
