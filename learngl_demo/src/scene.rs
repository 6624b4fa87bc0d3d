//! Demo scene: a lit cube field and an imported crate model drawn
//! offscreen, then post-processed
//!
//! Pass 1 renders into a multisampled framebuffer, which is resolved
//! into a single-sampled one whose color texture feeds pass 2, a
//! full-screen quad with a selectable kernel effect.

use std::path::{Path, PathBuf};
use learngl_engine::glam::{Mat3, Mat4, Quat, Vec3};
use learngl_engine::learngl::Result;
use learngl_engine::learngl::camera::Camera;
use learngl_engine::learngl::render::{
    BufferFormat, ClearFlags, CullMode, Framebuffer, FramebufferDesc, GraphicsDevice,
    PrimitiveTopology, ShaderProgram, VertexArrayDesc, VertexArrayHandle, VertexLayout,
};
use learngl_engine::learngl::resource::{load_obj, Mesh, Model, TextureCache, TextureKind};
use learngl_engine::{engine_info, engine_warn};
use crate::geometry::{checkerboard, cube_vertices, CUBE_POSITIONS, SCREEN_QUAD};

const SOURCE: &str = "learngl::demo";

/// Samples of the offscreen scene framebuffer
const SCENE_SAMPLES: u32 = 4;

const LIGHT_POSITION: Vec3 = Vec3::new(1.2, 1.0, 2.0);
const MODEL_POSITION: Vec3 = Vec3::new(0.0, -2.0, -1.0);
const CLEAR_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// Full-screen effect applied by the post-processing pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostEffect {
    #[default]
    None,
    Inversion,
    Grayscale,
    EdgeDetect,
}

impl PostEffect {
    fn shader_index(self) -> i32 {
        self as i32
    }
}

fn glsl_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("glsl")
}

fn model_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("crate").join("crate.obj")
}

/// GPU resources of the demo
pub struct Scene {
    lit: ShaderProgram,
    lamp: ShaderProgram,
    post: ShaderProgram,
    /// Geometry-shader markers; the scene still runs without them
    markers: Option<ShaderProgram>,
    cube: Mesh,
    textures: TextureCache,
    /// Imported OBJ with file textures
    model: Model,
    quad: VertexArrayHandle,
    marker_points: VertexArrayHandle,
    multisampled: Framebuffer,
    resolved: Framebuffer,
    width: u32,
    height: u32,
    pub effect: PostEffect,
}

impl Scene {
    /// Build programs, geometry and framebuffers for a `width` x `height` target
    pub fn new(device: &mut dyn GraphicsDevice, width: u32, height: u32) -> Result<Self> {
        let dir = glsl_dir();

        let lit = ShaderProgram::from_files(device, dir.join("lit.vert"), dir.join("lit.frag"), None)?;
        let lamp = ShaderProgram::from_files(device, dir.join("lit.vert"), dir.join("lamp.frag"), None)?;
        let post = ShaderProgram::from_files(device, dir.join("post.vert"), dir.join("post.frag"), None)?;
        let markers = match ShaderProgram::from_files(
            device,
            dir.join("markers.vert"),
            dir.join("markers.frag"),
            Some(dir.join("markers.geom").as_path()),
        ) {
            Ok(program) => Some(program),
            Err(err) => {
                engine_warn!(SOURCE, "Markers disabled: {}", err);
                None
            }
        };

        let mut textures = TextureCache::new();
        let diffuse = textures.insert_pixels(
            device,
            "procedural/checker",
            256,
            256,
            &checkerboard(256, 8, [214, 160, 92], [120, 78, 40]),
            TextureKind::Diffuse,
        )?;
        let specular = textures.insert_pixels(
            device,
            "procedural/specular",
            256,
            256,
            &checkerboard(256, 8, [200, 200, 200], [40, 40, 40]),
            TextureKind::Specular,
        )?;
        let cube = Mesh::new(device, &cube_vertices(), &[], vec![diffuse, specular])?;

        let path = model_path();
        let model = Model::from_scene(device, &load_obj(&path)?, &path)?;

        let quad_layout = VertexLayout::packed(&[BufferFormat::R32G32_SFLOAT, BufferFormat::R32G32_SFLOAT]);
        let quad = device.create_vertex_array(&VertexArrayDesc {
            vertices: bytemuck::cast_slice(&SCREEN_QUAD[..]),
            indices: None,
            layout: &quad_layout,
        })?;

        let point_layout = VertexLayout::packed(&[BufferFormat::R32G32B32_SFLOAT]);
        let points: Vec<[f32; 3]> = CUBE_POSITIONS
            .iter()
            .map(|p| (*p + Vec3::new(0.0, 0.9, 0.0)).to_array())
            .collect();
        let marker_points = device.create_vertex_array(&VertexArrayDesc {
            vertices: bytemuck::cast_slice(&points),
            indices: None,
            layout: &point_layout,
        })?;

        let multisampled = device.create_framebuffer(&FramebufferDesc {
            width,
            height,
            samples: SCENE_SAMPLES,
            depth_stencil: true,
        })?;
        let resolved = device.create_framebuffer(&FramebufferDesc {
            width,
            height,
            samples: 1,
            depth_stencil: false,
        })?;

        engine_info!(SOURCE, "Scene ready ({}x{}, {} cubes, {} model meshes)",
            width, height, CUBE_POSITIONS.len(), model.meshes().len());

        Ok(Self {
            lit,
            lamp,
            post,
            markers,
            cube,
            textures,
            model,
            quad,
            marker_points,
            multisampled,
            resolved,
            width,
            height,
            effect: PostEffect::None,
        })
    }

    /// Render one frame; `time` (seconds) spins the cubes
    pub fn draw(&self, device: &mut dyn GraphicsDevice, camera: &Camera, time: f32) {
        let projection = *camera.projection_matrix();
        let view = *camera.view_matrix();

        device.begin_frame();

        // Pass 1: scene into the multisampled target
        device.bind_framebuffer(Some(self.multisampled.handle));
        device.set_viewport(0, 0, self.width, self.height);
        device.set_depth_test(true);
        device.set_face_culling(CullMode::Back);
        device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, CLEAR_COLOR);

        self.lit.activate(device);
        self.lit.set_mat4(device, "projection", &projection);
        self.lit.set_mat4(device, "view", &view);
        self.lit.set_vec3(device, "viewPos", camera.position);
        self.lit.set_vec3(device, "light.position", LIGHT_POSITION);
        self.lit.set_vec3(device, "light.ambient", Vec3::splat(0.2));
        self.lit.set_vec3(device, "light.diffuse", Vec3::splat(0.5));
        self.lit.set_vec3(device, "light.specular", Vec3::ONE);
        self.lit.set_f32(device, "material.shininess", 32.0);

        for (i, position) in CUBE_POSITIONS.iter().enumerate() {
            let axis = Vec3::new(1.0, 0.3, 0.5).normalize();
            let angle = (20.0 * i as f32).to_radians() + time * 0.5;
            let model = Mat4::from_rotation_translation(Quat::from_axis_angle(axis, angle), *position);
            self.lit.set_mat4(device, "model", &model);
            self.lit.set_mat3(device, "normalMatrix", &Mat3::from_mat4(model.inverse().transpose()));
            self.cube.draw(device, &self.lit);
        }

        let model = Mat4::from_translation(MODEL_POSITION);
        self.lit.set_mat4(device, "model", &model);
        self.lit.set_mat3(device, "normalMatrix", &Mat3::IDENTITY);
        self.model.draw(device, &self.lit);

        self.lamp.activate(device);
        self.lamp.set_mat4(device, "projection", &projection);
        self.lamp.set_mat4(device, "view", &view);
        let model = Mat4::from_translation(LIGHT_POSITION) * Mat4::from_scale(Vec3::splat(0.2));
        self.lamp.set_mat4(device, "model", &model);
        self.lamp.set_mat3(device, "normalMatrix", &Mat3::IDENTITY);
        self.lamp.set_vec3(device, "lampColor", Vec3::ONE);
        self.cube.draw(device, &self.lamp);

        if let Some(markers) = &self.markers {
            device.set_face_culling(CullMode::None);
            markers.activate(device);
            markers.set_mat4(device, "projection", &projection);
            markers.set_mat4(device, "view", &view);
            markers.set_f32(device, "size", 0.08);
            device.draw(self.marker_points, PrimitiveTopology::PointList, 0, CUBE_POSITIONS.len() as u32);
        }

        // Resolve, then pass 2: post-processing onto the window
        device.blit_framebuffer(self.multisampled.handle, Some(self.resolved.handle), self.width, self.height);
        device.bind_framebuffer(None);
        device.set_depth_test(false);
        device.set_face_culling(CullMode::None);
        device.clear(ClearFlags::COLOR, [1.0, 1.0, 1.0, 1.0]);

        self.post.activate(device);
        self.post.set_i32(device, "screenTexture", 0);
        self.post.set_i32(device, "effect", self.effect.shader_index());
        device.bind_texture(0, self.resolved.color_texture);
        device.draw(self.quad, PrimitiveTopology::TriangleList, 0, 6);
    }

    /// Delete every GPU object of the scene
    pub fn release(&mut self, device: &mut dyn GraphicsDevice) {
        self.cube.release(device);
        self.textures.release(device);
        self.model.release(device);
        device.delete_vertex_array(self.quad);
        device.delete_vertex_array(self.marker_points);
        device.delete_framebuffer(&self.multisampled);
        device.delete_framebuffer(&self.resolved);
        self.lit.release(device);
        self.lamp.release(device);
        self.post.release(device);
        if let Some(markers) = &mut self.markers {
            markers.release(device);
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
