//! Model: meshes built from an imported scene.
//!
//! An importer (`obj_import` for Wavefront files) hands over a
//! `SceneData` (node tree, meshes, materials). The model walks the node
//! tree depth-first, uploads one `Mesh` per referenced mesh and loads
//! material textures relative to the model file's directory through its
//! own `TextureCache`.

use std::path::{Path, PathBuf};
use glam::{Vec2, Vec3};
use crate::error::{Error, Result};
use crate::graphics_device::GraphicsDevice;
use crate::resource::{Mesh, Texture, TextureCache, TextureKind, Vertex};
use crate::shader::ShaderProgram;
use crate::engine_debug;

/// Imported scene
#[derive(Debug, Clone, Default)]
pub struct SceneData {
    pub root: SceneNode,
    pub meshes: Vec<MeshData>,
    pub materials: Vec<MaterialData>,
}

/// Node of the scene hierarchy
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Indices into `SceneData::meshes`
    pub meshes: Vec<usize>,
    pub children: Vec<SceneNode>,
}

/// Imported triangle mesh
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    /// One normal per position
    pub normals: Vec<[f32; 3]>,
    /// First texture coordinate set, if the mesh has one
    pub uvs: Option<Vec<[f32; 2]>>,
    /// Faces as vertex index lists
    pub faces: Vec<Vec<u32>>,
    /// Index into `SceneData::materials`
    pub material: usize,
}

/// Texture paths of a material, relative to the model file
#[derive(Debug, Clone, Default)]
pub struct MaterialData {
    pub diffuse: Vec<String>,
    pub specular: Vec<String>,
    pub emission: Vec<String>,
}

pub struct Model {
    meshes: Vec<Mesh>,
    textures: TextureCache,
    directory: PathBuf,
}

impl Model {
    /// Upload every mesh reachable from the scene root
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResource` for out-of-range mesh, material or
    ///   vertex indices, or normals/uvs that do not match the positions
    /// - `Error::Io` when a texture cannot be loaded
    pub fn from_scene(
        device: &mut dyn GraphicsDevice,
        scene: &SceneData,
        model_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let directory = model_path
            .as_ref()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut model = Self {
            meshes: Vec::new(),
            textures: TextureCache::new(),
            directory,
        };

        if let Err(err) = model.process_node(device, &scene.root, scene) {
            model.release(device);
            return Err(err);
        }

        engine_debug!("learngl::Model", "Loaded '{}': {} meshes, {} textures",
            model_path.as_ref().display(), model.meshes.len(), model.textures.len());
        Ok(model)
    }

    fn process_node(
        &mut self,
        device: &mut dyn GraphicsDevice,
        node: &SceneNode,
        scene: &SceneData,
    ) -> Result<()> {
        for &index in &node.meshes {
            let data = scene.meshes.get(index).ok_or_else(|| {
                Error::InvalidResource(format!("node references mesh {} of {}", index, scene.meshes.len()))
            })?;
            let mesh = self.process_mesh(device, data, scene)?;
            self.meshes.push(mesh);
        }
        for child in &node.children {
            self.process_node(device, child, scene)?;
        }
        Ok(())
    }

    fn process_mesh(
        &mut self,
        device: &mut dyn GraphicsDevice,
        data: &MeshData,
        scene: &SceneData,
    ) -> Result<Mesh> {
        let vertex_count = data.positions.len();
        if data.normals.len() != vertex_count {
            return Err(Error::InvalidResource(format!(
                "mesh has {} positions but {} normals", vertex_count, data.normals.len()
            )));
        }
        if let Some(uvs) = &data.uvs {
            if uvs.len() != vertex_count {
                return Err(Error::InvalidResource(format!(
                    "mesh has {} positions but {} uvs", vertex_count, uvs.len()
                )));
            }
        }

        let vertices: Vec<Vertex> = (0..vertex_count)
            .map(|i| Vertex {
                position: Vec3::from(data.positions[i]),
                normal: Vec3::from(data.normals[i]),
                uv: data.uvs.as_ref().map_or(Vec2::ZERO, |uvs| Vec2::from(uvs[i])),
            })
            .collect();

        let indices: Vec<u32> = data.faces.iter().flatten().copied().collect();
        if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidResource(format!(
                "face index {} out of {} vertices", bad, vertex_count
            )));
        }

        let material = scene.materials.get(data.material).ok_or_else(|| {
            Error::InvalidResource(format!(
                "mesh references material {} of {}", data.material, scene.materials.len()
            ))
        })?;
        let mut textures = self.load_material_textures(device, &material.diffuse, TextureKind::Diffuse)?;
        textures.extend(self.load_material_textures(device, &material.specular, TextureKind::Specular)?);
        textures.extend(self.load_material_textures(device, &material.emission, TextureKind::Emission)?);

        Mesh::new(device, &vertices, &indices, textures)
    }

    fn load_material_textures(
        &mut self,
        device: &mut dyn GraphicsDevice,
        paths: &[String],
        kind: TextureKind,
    ) -> Result<Vec<Texture>> {
        paths
            .iter()
            .map(|path| self.textures.load(device, self.directory.join(path), kind))
            .collect()
    }

    /// Draw every mesh in load order
    pub fn draw(&self, device: &mut dyn GraphicsDevice, program: &ShaderProgram) {
        for mesh in &self.meshes {
            mesh.draw(device, program);
        }
    }

    /// Delete all meshes and textures
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        for mesh in &mut self.meshes {
            mesh.release(device);
        }
        self.meshes.clear();
        self.textures.release(device);
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Directory texture paths are resolved against
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
