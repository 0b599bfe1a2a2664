//! UV sphere mesh for the background.

use std::f32::consts::{PI, TAU};

use crate::buffer::VertexPositionUv;

/// Vertices and triangle indices of a UV sphere.
pub struct SphereMesh {
    pub vertices: Vec<VertexPositionUv>,
    pub indices: Vec<u32>,
}

/// Build a sphere whose triangles face the center, for viewing from inside.
///
/// Vertices form a `(width_segments + 1) x (height_segments + 1)` grid; the
/// duplicated seam column lets the texture wrap without a visible jump. `u`
/// runs around the equator and `v` from the north pole (0) to the south (1),
/// so an equirectangular image maps with its top row at +Y.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> SphereMesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((w + 1) * (h + 1)) as usize);
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let polar = v * PI;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let azimuth = u * TAU;
            vertices.push(VertexPositionUv {
                position: [
                    -radius * azimuth.cos() * polar.sin(),
                    radius * polar.cos(),
                    radius * azimuth.sin() * polar.sin(),
                ],
                uv: [u, v],
            });
        }
    }

    let row = w + 1;
    let mut indices = Vec::with_capacity((6 * w * (h - 1)) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // Pole rows collapse to a single triangle per quad.
            if iy != 0 {
                indices.extend_from_slice(&[a, d, b]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, d, c]);
            }
        }
    }

    SphereMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_vertex_and_index_counts() {
        let mesh = uv_sphere(10.0, 16, 8);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        assert_eq!(mesh.indices.len(), 6 * 16 * 7);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_vertices_on_radius() {
        let mesh = uv_sphere(2000.0, 32, 16);
        for v in &mesh.vertices {
            let len = Vec3::from(v.position).length();
            assert!((len - 2000.0).abs() < 0.5, "vertex at distance {len}");
        }
    }

    #[test]
    fn test_triangles_face_inward() {
        let mesh = uv_sphere(5.0, 12, 6);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from(mesh.vertices[i as usize].position));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) < 0.0, "triangle {tri:?} faces outward");
        }
    }

    #[test]
    fn test_uv_covers_unit_square() {
        let mesh = uv_sphere(1.0, 8, 4);
        assert_eq!(mesh.vertices.first().map(|v| v.uv), Some([0.0, 0.0]));
        assert_eq!(mesh.vertices.last().map(|v| v.uv), Some([1.0, 1.0]));
        // North pole at +Y.
        assert!((mesh.vertices[0].position[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_segments_are_raised() {
        let mesh = uv_sphere(1.0, 0, 0);
        assert_eq!(mesh.vertices.len(), 4 * 3);
    }
}
