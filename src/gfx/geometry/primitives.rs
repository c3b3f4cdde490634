//! # Primitive Shape Generation
//!
//! The unit cube, built face by face so every triangle winds
//! counter-clockwise when seen from outside.

use std::sync::OnceLock;

use super::FLOATS_PER_VERTEX;

/// One cube face: outward normal and the two in-plane axes, with `u × v == normal`
struct Face {
    normal: [f32; 3],
    u: [f32; 3],
    v: [f32; 3],
}

#[rustfmt::skip]
const CUBE_FACES: [Face; 6] = [
    // +Z
    Face { normal: [0.0, 0.0, 1.0], u: [1.0, 0.0, 0.0], v: [0.0, 1.0, 0.0] },
    // -Z
    Face { normal: [0.0, 0.0, -1.0], u: [-1.0, 0.0, 0.0], v: [0.0, 1.0, 0.0] },
    // +X
    Face { normal: [1.0, 0.0, 0.0], u: [0.0, 0.0, -1.0], v: [0.0, 1.0, 0.0] },
    // -X
    Face { normal: [-1.0, 0.0, 0.0], u: [0.0, 0.0, 1.0], v: [0.0, 1.0, 0.0] },
    // +Y
    Face { normal: [0.0, 1.0, 0.0], u: [0.0, 0.0, 1.0], v: [1.0, 0.0, 0.0] },
    // -Y
    Face { normal: [0.0, -1.0, 0.0], u: [1.0, 0.0, 0.0], v: [0.0, 0.0, 1.0] },
];

/// Corner order for the two triangles of a face, in (u, v) half-extents
const FACE_CORNERS: [(f32, f32); 6] = [
    (-0.5, -0.5),
    (0.5, -0.5),
    (0.5, 0.5),
    (0.5, 0.5),
    (-0.5, 0.5),
    (-0.5, -0.5),
];

/// Generate a unit cube centered at the origin
///
/// Vertices span -0.5 to 0.5 on all axes; normals are per face, so corners
/// are duplicated (36 vertices, 12 triangles).
pub fn generate_cube() -> Vec<f32> {
    let mut stream = Vec::with_capacity(CUBE_FACES.len() * FACE_CORNERS.len() * FLOATS_PER_VERTEX);

    for face in &CUBE_FACES {
        for &(a, b) in &FACE_CORNERS {
            for axis in 0..3 {
                stream.push(0.5 * face.normal[axis] + a * face.u[axis] + b * face.v[axis]);
            }
            stream.extend_from_slice(&face.normal);
        }
    }

    stream
}

/// The shared interleaved unit-cube stream
pub fn unit_cube() -> &'static [f32] {
    static CUBE: OnceLock<Vec<f32>> = OnceLock::new();
    CUBE.get_or_init(generate_cube)
}
