use std::path::PathBuf;
use crate::error::Error;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::UniformValue;
use crate::shader::ShaderProgram;
use super::*;

/// Creates a model directory holding the given textures; returns the model path
fn model_dir(name: &str, textures: &[&str]) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("learngl_model_tests_{}", std::process::id()))
        .join(name);
    std::fs::create_dir_all(&dir).unwrap();
    for texture in textures {
        image::RgbImage::new(2, 2).save(dir.join(texture)).unwrap();
    }
    dir.join("nanosuit.obj")
}

fn quad(material: usize) -> MeshData {
    MeshData {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        uvs: Some(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]),
        faces: vec![vec![0, 1, 2], vec![0, 2, 3]],
        material,
    }
}

fn two_level_scene() -> SceneData {
    SceneData {
        root: SceneNode {
            meshes: vec![1],
            children: vec![SceneNode { meshes: vec![0], children: Vec::new() }],
        },
        meshes: vec![quad(0), MeshData { uvs: None, ..quad(1) }],
        materials: vec![
            MaterialData {
                diffuse: vec!["body_dif.png".to_string()],
                specular: vec!["body_spec.png".to_string()],
                emission: Vec::new(),
            },
            MaterialData {
                diffuse: vec!["body_dif.png".to_string()],
                ..MaterialData::default()
            },
        ],
    }
}

#[test]
fn test_meshes_follow_depth_first_order() {
    let path = model_dir("order", &["body_dif.png", "body_spec.png"]);
    let mut device = MockGraphicsDevice::new();

    let model = Model::from_scene(&mut device, &two_level_scene(), &path).unwrap();

    assert_eq!(model.meshes().len(), 2);
    // Root mesh (material 1, one texture) comes before the child's
    assert_eq!(model.meshes()[0].textures().len(), 1);
    assert_eq!(model.meshes()[1].textures().len(), 2);
    assert_eq!(model.meshes()[1].index_count(), 6);
    assert_eq!(model.directory(), path.parent().unwrap());
}

#[test]
fn test_shared_texture_uploaded_once() {
    let path = model_dir("dedup", &["body_dif.png", "body_spec.png"]);
    let mut device = MockGraphicsDevice::new();

    let model = Model::from_scene(&mut device, &two_level_scene(), &path).unwrap();

    assert_eq!(model.textures().len(), 2);
    assert_eq!(device.calls_starting_with("create_texture").len(), 2);
    assert_eq!(model.meshes()[0].textures()[0].handle, model.meshes()[1].textures()[0].handle);
}

#[test]
fn test_draw_sets_material_samplers() {
    let path = model_dir("draw", &["body_dif.png", "body_spec.png"]);
    let mut device = MockGraphicsDevice::new();
    let program = ShaderProgram::from_sources(
        &mut device, "void main() {}", "void main() {}", None,
    ).unwrap();
    let model = Model::from_scene(&mut device, &two_level_scene(), &path).unwrap();

    program.activate(&mut device);
    model.draw(&mut device, &program);

    assert_eq!(device.stats().draw_calls, 2);
    assert_eq!(device.uniform("material.texture_specular1"), Some(UniformValue::Int(1)));
}

#[test]
fn test_missing_texture_fails_and_releases() {
    let path = model_dir("missing", &["body_dif.png"]);
    let mut device = MockGraphicsDevice::new();

    let result = Model::from_scene(&mut device, &two_level_scene(), &path);
    assert!(matches!(result, Err(Error::Io { .. })));
    assert!(device.textures.is_empty());
    assert!(device.vertex_arrays.is_empty());
}

#[test]
fn test_invalid_indices_rejected() {
    let path = model_dir("invalid", &[]);
    let mut device = MockGraphicsDevice::new();
    let no_textures = vec![MaterialData::default()];

    let bad_node = SceneData {
        root: SceneNode { meshes: vec![3], children: Vec::new() },
        meshes: vec![quad(0)],
        materials: no_textures.clone(),
    };
    assert!(matches!(Model::from_scene(&mut device, &bad_node, &path), Err(Error::InvalidResource(_))));

    let mut bad_face = quad(0);
    bad_face.faces.push(vec![0, 1, 9]);
    let scene = SceneData {
        root: SceneNode { meshes: vec![0], children: Vec::new() },
        meshes: vec![bad_face],
        materials: no_textures.clone(),
    };
    assert!(matches!(Model::from_scene(&mut device, &scene, &path), Err(Error::InvalidResource(_))));

    let mut bad_normals = quad(0);
    bad_normals.normals.pop();
    let scene = SceneData {
        root: SceneNode { meshes: vec![0], children: Vec::new() },
        meshes: vec![bad_normals],
        materials: no_textures,
    };
    assert!(matches!(Model::from_scene(&mut device, &scene, &path), Err(Error::InvalidResource(_))));

    let scene = SceneData {
        root: SceneNode { meshes: vec![0], children: Vec::new() },
        meshes: vec![quad(5)],
        materials: Vec::new(),
    };
    assert!(matches!(Model::from_scene(&mut device, &scene, &path), Err(Error::InvalidResource(_))));
}

#[test]
fn test_release_clears_everything() {
    let path = model_dir("release", &["body_dif.png", "body_spec.png"]);
    let mut device = MockGraphicsDevice::new();
    let mut model = Model::from_scene(&mut device, &two_level_scene(), &path).unwrap();

    model.release(&mut device);
    assert!(model.meshes().is_empty());
    assert!(model.textures().is_empty());
    assert!(device.vertex_arrays.is_empty());
    assert!(device.textures.is_empty());
}
