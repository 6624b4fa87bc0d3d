//! Wavefront OBJ import into `SceneData`.
//!
//! Files are parsed with `tobj`, triangulated and re-indexed so every
//! vertex carries one position, normal and uv. Each OBJ object becomes a
//! child node of the scene root holding one mesh. Missing normals are
//! rebuilt by averaging the normals of the faces sharing a vertex.
//! Meshes without a usable material point at an empty trailing material.

use std::path::Path;
use glam::Vec3;
use crate::error::{Error, Result};
use crate::resource::{MaterialData, MeshData, SceneData, SceneNode};
use crate::{engine_debug, engine_warn};

/// `tobj` options: triangles only, one index per vertex
pub fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Parse an OBJ file and the MTL libraries it references
///
/// A missing or broken MTL library is logged and the meshes fall back to
/// the empty material.
///
/// # Errors
///
/// `Error::Io` when the OBJ file cannot be read or parsed.
pub fn load_obj(path: impl AsRef<Path>) -> Result<SceneData> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(path, &obj_load_options())
        .map_err(|err| Error::io(path, err))?;
    let materials = materials.unwrap_or_else(|err| {
        engine_warn!("learngl::ObjImport", "No materials for '{}': {}", path.display(), err);
        Vec::new()
    });

    let scene = scene_from_obj(&models, &materials);
    engine_debug!("learngl::ObjImport", "Parsed '{}': {} meshes, {} materials",
        path.display(), scene.meshes.len(), scene.materials.len());
    Ok(scene)
}

/// Build the scene tree from parsed `tobj` models and materials
pub fn scene_from_obj(models: &[tobj::Model], materials: &[tobj::Material]) -> SceneData {
    let mut scene_materials: Vec<MaterialData> = materials.iter().map(material_data).collect();
    let fallback = scene_materials.len();
    scene_materials.push(MaterialData::default());

    let mut root = SceneNode::default();
    let mut meshes = Vec::with_capacity(models.len());
    for model in models {
        let material = model
            .mesh
            .material_id
            .filter(|&id| id < fallback)
            .unwrap_or(fallback);
        root.children.push(SceneNode { meshes: vec![meshes.len()], children: Vec::new() });
        meshes.push(mesh_data(&model.mesh, material));
    }

    SceneData { root, meshes, materials: scene_materials }
}

fn material_data(material: &tobj::Material) -> MaterialData {
    let emission = material.unknown_param.get("map_Ke").cloned();
    MaterialData {
        diffuse: material.diffuse_texture.iter().cloned().collect(),
        specular: material.specular_texture.iter().cloned().collect(),
        emission: emission.into_iter().collect(),
    }
}

fn mesh_data(mesh: &tobj::Mesh, material: usize) -> MeshData {
    let positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    let faces: Vec<Vec<u32>> = mesh.indices.chunks_exact(3).map(<[u32]>::to_vec).collect();

    let normals = if mesh.normals.len() == mesh.positions.len() {
        mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]).collect()
    } else {
        smooth_normals(&positions, &faces)
    };
    let uvs = (!mesh.texcoords.is_empty() && mesh.texcoords.len() / 2 == positions.len())
        .then(|| mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]).collect());

    MeshData { positions, normals, uvs, faces, material }
}

/// Area-weighted average of the face normals around each vertex
pub(crate) fn smooth_normals(positions: &[[f32; 3]], faces: &[Vec<u32>]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vec3::ZERO; positions.len()];
    for face in faces {
        let [a, b, c] = [face[0], face[1], face[2]].map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let (pa, pb, pc) = (Vec3::from(positions[a]), Vec3::from(positions[b]), Vec3::from(positions[c]));
        let normal = (pb - pa).cross(pc - pa);
        sums[a] += normal;
        sums[b] += normal;
        sums[c] += normal;
    }
    sums.into_iter()
        .map(|sum| sum.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

#[cfg(test)]
#[path = "obj_import_tests.rs"]
mod tests;
