//! Wireframe octahedron geometry: barycentric face subdivision projected
//! onto a sphere, with exact shared-vertex dedup and unique edge extraction.

use glam::Vec3;
use std::collections::{HashMap, HashSet};

/// Canonical identity of a subdivided vertex: its nonzero integer
/// barycentric weights over base-vertex ids, sorted. Exact across faces,
/// so shared edge vertices dedup without float comparisons.
type VertexKey = Vec<(usize, u32)>;

#[derive(Debug, Clone)]
pub struct WireframeGeometry {
    /// Deduplicated vertex positions on the sphere surface.
    pub vertices: Vec<Vec3>,
    /// Unique undirected edges as vertex index pairs, sorted.
    pub edges: Vec<[u32; 2]>,
}

impl WireframeGeometry {
    /// Builds a subdivided octahedron of the given radius. `detail` splits
    /// every base face into `(detail + 1)^2` triangles before projection.
    pub fn octahedron(radius: f32, detail: u32) -> Self {
        let base = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let faces: [[usize; 3]; 8] = [
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];

        let n = detail + 1;
        let mut index_of: HashMap<VertexKey, u32> = HashMap::new();
        let mut vertices: Vec<Vec3> = Vec::new();
        let mut edge_set: HashSet<(u32, u32)> = HashSet::new();

        for face in faces {
            // Row i walks from the face apex toward the opposite edge; row i
            // holds i + 1 grid points.
            let grid = |i: u32, j: u32, vertices: &mut Vec<Vec3>, index_of: &mut HashMap<VertexKey, u32>| {
                let weights = [(face[0], n - i), (face[1], i - j), (face[2], j)];
                let mut key: VertexKey =
                    weights.iter().copied().filter(|&(_, w)| w > 0).collect();
                key.sort_unstable();
                *index_of.entry(key).or_insert_with(|| {
                    let flat = (base[face[0]] * (n - i) as f32
                        + base[face[1]] * (i - j) as f32
                        + base[face[2]] * j as f32)
                        / n as f32;
                    vertices.push(flat.normalize() * radius);
                    (vertices.len() - 1) as u32
                })
            };

            for i in 0..n {
                for j in 0..=i {
                    let a = grid(i, j, &mut vertices, &mut index_of);
                    let b = grid(i + 1, j, &mut vertices, &mut index_of);
                    let c = grid(i + 1, j + 1, &mut vertices, &mut index_of);
                    push_triangle_edges(&mut edge_set, a, b, c);
                    if j < i {
                        let d = grid(i, j + 1, &mut vertices, &mut index_of);
                        push_triangle_edges(&mut edge_set, a, c, d);
                    }
                }
            }
        }

        let mut edges: Vec<[u32; 2]> = edge_set.into_iter().map(|(a, b)| [a, b]).collect();
        edges.sort_unstable();

        Self { vertices, edges }
    }

    /// Flattened edge endpoint indices for an indexed line-list draw.
    pub fn line_indices(&self) -> Vec<u32> {
        self.edges.iter().flat_map(|e| [e[0], e[1]]).collect()
    }
}

fn push_triangle_edges(edges: &mut HashSet<(u32, u32)>, a: u32, b: u32, c: u32) {
    for (x, y) in [(a, b), (b, c), (c, a)] {
        edges.insert((x.min(y), x.max(y)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_three_counts() {
        let geo = WireframeGeometry::octahedron(6.0, 3);
        // 8 faces * (3 + 1)^2 = 128 triangles; Euler on the closed sphere
        // gives 192 unique edges and 66 unique vertices.
        assert_eq!(geo.edges.len(), 192);
        assert_eq!(geo.vertices.len(), 66);
        assert_eq!(geo.line_indices().len(), 384);
    }

    #[test]
    fn every_vertex_sits_on_the_sphere() {
        let geo = WireframeGeometry::octahedron(6.0, 3);
        for v in &geo.vertices {
            assert!((v.length() - 6.0).abs() < 1e-4, "off-sphere vertex {v:?}");
        }
    }

    #[test]
    fn edges_are_unique_and_in_range() {
        let geo = WireframeGeometry::octahedron(6.0, 3);
        let mut seen = HashSet::new();
        for e in &geo.edges {
            assert!(e[0] < e[1], "edges stored min-first");
            assert!((e[1] as usize) < geo.vertices.len());
            assert!(seen.insert(*e), "duplicate edge {e:?}");
        }
    }

    #[test]
    fn undivided_octahedron_has_twelve_edges() {
        let geo = WireframeGeometry::octahedron(1.0, 0);
        assert_eq!(geo.vertices.len(), 6);
        assert_eq!(geo.edges.len(), 12);
    }
}
