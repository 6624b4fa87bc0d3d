//! Procedural demo geometry and textures

use learngl_engine::glam::{Vec2, Vec3};
use learngl_engine::learngl::resource::Vertex;

/// Unit cube centered on the origin, 6 faces of 2 counter-clockwise triangles
pub fn cube_vertices() -> Vec<Vertex> {
    // (normal, u axis, v axis) with u x v = normal
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)];

    faces
        .iter()
        .flat_map(|&(normal, u_axis, v_axis)| {
            corners.iter().map(move |&(u, v)| {
                let position = normal * 0.5 + u_axis * (u - 0.5) + v_axis * (v - 0.5);
                Vertex::new(position, normal, Vec2::new(u, v))
            })
        })
        .collect()
}

/// Two triangles covering clip space: interleaved (x, y, u, v)
pub const SCREEN_QUAD: [f32; 24] = [
    -1.0, 1.0, 0.0, 1.0,
    -1.0, -1.0, 0.0, 0.0,
    1.0, -1.0, 1.0, 0.0,
    -1.0, 1.0, 0.0, 1.0,
    1.0, -1.0, 1.0, 0.0,
    1.0, 1.0, 1.0, 1.0,
];

/// Positions of the ten cubes of the field
pub const CUBE_POSITIONS: [Vec3; 10] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, 5.0, -15.0),
    Vec3::new(-1.5, -2.2, -2.5),
    Vec3::new(-3.8, -2.0, -12.3),
    Vec3::new(2.4, -0.4, -3.5),
    Vec3::new(-1.7, 3.0, -7.5),
    Vec3::new(1.3, -2.0, -2.5),
    Vec3::new(1.5, 2.0, -2.5),
    Vec3::new(1.5, 0.2, -1.5),
    Vec3::new(-1.3, 1.0, -1.5),
];

/// RGB8 checkerboard of `cells` x `cells` squares
pub fn checkerboard(size: u32, cells: u32, light: [u8; 3], dark: [u8; 3]) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let mut pixels = Vec::with_capacity((size * size * 3) as usize);
    for y in 0..size {
        for x in 0..size {
            let color = if ((x / cell) + (y / cell)) % 2 == 0 { light } else { dark };
            pixels.extend_from_slice(&color);
        }
    }
    pixels
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
