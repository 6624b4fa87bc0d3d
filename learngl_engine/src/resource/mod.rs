//! Resource module
//!
//! Textures, meshes and models uploaded through a `GraphicsDevice`.
//! Resources are owned by the render loop and released explicitly.

pub mod texture;
pub mod mesh;
pub mod model;
pub mod obj_import;

pub use texture::{Texture, TextureCache, TextureKind};
pub use mesh::{Mesh, Vertex};
pub use model::{Model, SceneData, SceneNode, MeshData, MaterialData};
pub use obj_import::{load_obj, scene_from_obj};
