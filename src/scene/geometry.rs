//! Triangle meshes and line sets.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec3;

/// Indexed triangle mesh in local space.
///
/// Geometry is shared between clones of a template through an `Arc`, so a
/// field of a hundred neurons holds one copy of each mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Geometry {
    /// Build a geometry from vertex positions and triangle indices.
    ///
    /// Trailing indices that do not form a whole triangle are dropped, as are
    /// triangles that reference missing vertices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let count = positions.len() as u32;
        let indices = indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| i < count))
            .flatten()
            .copied()
            .collect();
        Self { positions, indices }
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle indices, three per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Regular octahedron with vertices at distance `radius` on each axis.
    pub fn octahedron(radius: f32) -> Self {
        let positions = vec![
            Vec3::X * radius,
            -Vec3::X * radius,
            Vec3::Y * radius,
            -Vec3::Y * radius,
            Vec3::Z * radius,
            -Vec3::Z * radius,
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 4,  4, 2, 1,  1, 2, 5,  5, 2, 0,
            4, 3, 0,  1, 3, 4,  5, 3, 1,  0, 3, 5,
        ];
        Self::new(positions, indices)
    }

    /// Geodesic sphere made by subdividing an icosahedron.
    ///
    /// Each subdivision quadruples the triangle count (20, 80, 320, ...).
    pub fn icosphere(radius: f32, subdivisions: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let mut positions: Vec<Vec3> = [
            (-1.0, t, 0.0),
            (1.0, t, 0.0),
            (-1.0, -t, 0.0),
            (1.0, -t, 0.0),
            (0.0, -1.0, t),
            (0.0, 1.0, t),
            (0.0, -1.0, -t),
            (0.0, 1.0, -t),
            (t, 0.0, -1.0),
            (t, 0.0, 1.0),
            (-t, 0.0, -1.0),
            (-t, 0.0, 1.0),
        ]
        .iter()
        .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
        .collect();

        #[rustfmt::skip]
        let mut faces: Vec<[u32; 3]> = vec![
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
            let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let mid = (positions[a as usize] + positions[b as usize]).normalize();
                    positions.push(mid);
                    positions.len() as u32 - 1
                })
            };

            let mut next = Vec::with_capacity(faces.len() * 4);
            for [a, b, c] in faces {
                let ab = midpoint(a, b, &mut positions);
                let bc = midpoint(b, c, &mut positions);
                let ca = midpoint(c, a, &mut positions);
                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }
            faces = next;
        }

        for p in &mut positions {
            *p *= radius;
        }
        Self::new(positions, faces.into_iter().flatten().collect())
    }

    /// Cone along +Y with its base centered on the origin.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut positions: Vec<Vec3> = (0..segments)
            .map(|i| {
                let angle = i as f32 / segments as f32 * TAU;
                Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
            })
            .collect();
        let apex = positions.len() as u32;
        positions.push(Vec3::new(0.0, height, 0.0));
        let center = positions.len() as u32;
        positions.push(Vec3::ZERO);

        let mut indices = Vec::with_capacity(segments as usize * 6);
        for i in 0..segments {
            let next = (i + 1) % segments;
            indices.extend_from_slice(&[i, next, apex]);
            indices.extend_from_slice(&[next, i, center]);
        }
        Self::new(positions, indices)
    }

    /// Axis-aligned box centered on the origin with full extents `size`.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        let positions = box_corners(h).to_vec();
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2,  0, 2, 3, // -z
            4, 6, 5,  4, 7, 6, // +z
            0, 4, 5,  0, 5, 1, // -y
            3, 2, 6,  3, 6, 7, // +y
            0, 3, 7,  0, 7, 4, // -x
            1, 5, 6,  1, 6, 2, // +x
        ];
        Self::new(positions, indices)
    }
}

/// Eight corners of a box with half-extents `h`.
///
/// Bottom face (-y) first, then top, each counter-clockwise seen from +y.
fn box_corners(h: Vec3) -> [Vec3; 8] {
    [
        Vec3::new(-h.x, -h.y, -h.z),
        Vec3::new(h.x, -h.y, -h.z),
        Vec3::new(h.x, h.y, -h.z),
        Vec3::new(-h.x, h.y, -h.z),
        Vec3::new(-h.x, -h.y, h.z),
        Vec3::new(h.x, -h.y, h.z),
        Vec3::new(h.x, h.y, h.z),
        Vec3::new(-h.x, h.y, h.z),
    ]
}

/// Unlit colored line segments (helpers, outlines).
///
/// Lines carry a single color and are never repainted by the flash
/// animation.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegments {
    /// Segments as pairs of endpoints in local space.
    pub lines: Vec<(Vec3, Vec3)>,
    /// Line color.
    pub color: Vec3,
}

impl LineSegments {
    /// Create a line set from explicit segments.
    pub fn new(lines: Vec<(Vec3, Vec3)>, color: Vec3) -> Self {
        Self { lines, color }
    }

    /// Outline of an axis-aligned box with full extents `size` (12 edges).
    pub fn box_helper(size: Vec3, color: Vec3) -> Self {
        let c = box_corners(size * 0.5);
        #[rustfmt::skip]
        let edges = [
            (0, 1), (1, 2), (2, 3), (3, 0),
            (4, 5), (5, 6), (6, 7), (7, 4),
            (0, 4), (1, 5), (2, 6), (3, 7),
        ];
        Self {
            lines: edges.iter().map(|&(a, b)| (c[a], c[b])).collect(),
            color,
        }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// `true` when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icosphere_triangle_counts() {
        assert_eq!(Geometry::icosphere(1.0, 0).triangle_count(), 20);
        assert_eq!(Geometry::icosphere(1.0, 1).triangle_count(), 80);
        assert_eq!(Geometry::icosphere(1.0, 2).triangle_count(), 320);
    }

    #[test]
    fn test_icosphere_vertices_on_sphere() {
        let sphere = Geometry::icosphere(0.5, 2);
        for p in sphere.positions() {
            assert!((p.length() - 0.5).abs() < 1e-4);
        }
        // Shared midpoints: V = 10 * 4^n + 2
        assert_eq!(sphere.positions().len(), 162);
    }

    #[test]
    fn test_cone_shape() {
        let cone = Geometry::cone(0.1, 1.0, 8);
        assert_eq!(cone.triangle_count(), 16);
        let top = cone.positions().iter().map(|p| p.y).fold(f32::MIN, f32::max);
        assert_eq!(top, 1.0);
    }

    #[test]
    fn test_invalid_triangles_dropped() {
        let g = Geometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2, 0, 1, 9, 2]);
        assert_eq!(g.indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_box_helper_edges() {
        let helper = LineSegments::box_helper(Vec3::new(2.0, 4.0, 6.0), Vec3::ONE);
        assert_eq!(helper.len(), 12);
        for (a, b) in &helper.lines {
            assert!(a.x.abs() == 1.0 && a.y.abs() == 2.0 && a.z.abs() == 3.0);
            // Each edge runs along exactly one axis
            let d = (*b - *a).abs();
            let moving = [d.x, d.y, d.z].iter().filter(|&&v| v > 0.0).count();
            assert_eq!(moving, 1);
        }
    }

    #[test]
    fn test_cuboid_extents() {
        let b = Geometry::cuboid(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.triangle_count(), 12);
        let max = b.positions().iter().fold(Vec3::splat(f32::MIN), |m, p| m.max(*p));
        assert_eq!(max, Vec3::new(0.5, 1.0, 1.5));
    }
}
