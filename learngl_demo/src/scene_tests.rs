//! Unit tests for the shipped demo assets

use super::*;

#[test]
fn test_crate_model_parses_into_two_meshes() {
    let scene = load_obj(model_path()).unwrap();

    assert_eq!(scene.meshes.len(), 2);
    assert_eq!(scene.root.children.len(), 2);
    for mesh in &scene.meshes {
        // six quads, triangulated
        assert_eq!(mesh.faces.len(), 12);
        assert!(mesh.uvs.is_some());
        assert_eq!(mesh.material, 0);
    }
}

#[test]
fn test_crate_textures_ship_next_to_the_model() {
    let path = model_path();
    let scene = load_obj(&path).unwrap();
    let directory = path.parent().unwrap();

    let wood = &scene.materials[0];
    assert_eq!(wood.diffuse.len(), 1);
    assert_eq!(wood.specular.len(), 1);
    for texture in wood.diffuse.iter().chain(&wood.specular) {
        let dimensions = image::image_dimensions(directory.join(texture)).unwrap();
        assert_eq!(dimensions, (64, 64));
    }
}
