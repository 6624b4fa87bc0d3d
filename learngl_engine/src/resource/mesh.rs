//! GPU mesh: one vertex array, its index count and material textures.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use crate::error::Result;
use crate::graphics_device::{
    BufferFormat, GraphicsDevice, PrimitiveTopology, VertexArrayDesc, VertexArrayHandle,
    VertexLayout,
};
use crate::resource::{Texture, TextureKind};
use crate::shader::ShaderProgram;

/// Interleaved vertex: position (location 0), normal (location 1),
/// texture coordinates (location 2)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self { position, normal, uv }
    }

    /// Layout matching the field order
    pub fn layout() -> VertexLayout {
        VertexLayout::packed(&[
            BufferFormat::R32G32B32_SFLOAT,
            BufferFormat::R32G32B32_SFLOAT,
            BufferFormat::R32G32_SFLOAT,
        ])
    }
}

pub struct Mesh {
    vertex_array: Option<VertexArrayHandle>,
    vertex_count: u32,
    index_count: u32,
    textures: Vec<Texture>,
}

impl Mesh {
    /// Upload vertices and indices. An empty index list draws the
    /// vertices in order.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        vertices: &[Vertex],
        indices: &[u32],
        textures: Vec<Texture>,
    ) -> Result<Self> {
        let layout = Vertex::layout();
        let vertex_array = device.create_vertex_array(&VertexArrayDesc {
            vertices: bytemuck::cast_slice(vertices),
            indices: (!indices.is_empty()).then_some(indices),
            layout: &layout,
        })?;
        Ok(Self {
            vertex_array: Some(vertex_array),
            vertex_count: vertices.len() as u32,
            index_count: indices.len() as u32,
            textures,
        })
    }

    /// Bind the textures and draw with `program` (which must be active).
    ///
    /// Texture `i` goes to unit `i`; its sampler is
    /// `material.<prefix><n>` with `n` counting from 1 per kind.
    pub fn draw(&self, device: &mut dyn GraphicsDevice, program: &ShaderProgram) {
        let Some(vertex_array) = self.vertex_array else {
            return;
        };

        let (mut diffuse, mut specular, mut emission) = (0, 0, 0);
        for (unit, texture) in self.textures.iter().enumerate() {
            let counter = match texture.kind {
                TextureKind::Diffuse => &mut diffuse,
                TextureKind::Specular => &mut specular,
                TextureKind::Emission => &mut emission,
            };
            *counter += 1;
            let name = format!("material.{}{}", texture.kind.uniform_prefix(), counter);

            device.bind_texture(unit as u32, Some(texture.handle));
            program.set_i32(device, &name, unit as i32);
        }

        if self.index_count > 0 {
            device.draw_indexed(vertex_array, PrimitiveTopology::TriangleList, self.index_count);
        } else {
            device.draw(vertex_array, PrimitiveTopology::TriangleList, 0, self.vertex_count);
        }
    }

    /// Delete the vertex array (textures belong to their cache)
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        if let Some(vertex_array) = self.vertex_array.take() {
            device.delete_vertex_array(vertex_array);
        }
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
