/// Geometry containers shared by the generator, loaders and renderers
use std::collections::BTreeSet;

use nalgebra::Point3;

/// A point set with undirected edges given as index pairs `(i, j)`, `i < j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub vertices: Vec<Point3<f64>>,
    pub edges: Vec<(usize, usize)>,
}

impl Wireframe {
    pub fn new(vertices: Vec<Point3<f64>>, edges: Vec<(usize, usize)>) -> Self {
        Self { vertices, edges }
    }

    /// Unit cube corners at (±1, ±1, ±1) with its 12 edges.
    pub fn cube() -> Self {
        let vertices = vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, 1.0),
            Point3::new(1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, -1.0, -1.0),
        ];
        let edges = vec![
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 4),
            (1, 5),
            (2, 4),
            (2, 6),
            (3, 5),
            (3, 6),
            (4, 7),
            (5, 7),
            (6, 7),
        ];
        Self { vertices, edges }
    }

    /// Number of edges touching each vertex.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertices.len()];
        for &(i, j) in &self.edges {
            degrees[i] += 1;
            degrees[j] += 1;
        }
        degrees
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Each undirected face edge once, as sorted `(low, high)` pairs.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = BTreeSet::new();
        for face in &self.faces {
            for k in 0..3 {
                let a = face[k];
                let b = face[(k + 1) % 3];
                if a != b {
                    edges.insert((a.min(b), a.max(b)));
                }
            }
        }
        edges.into_iter().collect()
    }

    pub fn to_wireframe(&self) -> Wireframe {
        Wireframe::new(self.vertices.clone(), self.edges())
    }
}

/// All pairs `(i, j)`, `i < j`, whose Euclidean distance is below `threshold`,
/// in lexicographic order.
pub fn edges_within(points: &[Point3<f64>], threshold: f64) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if nalgebra::distance(&points[i], &points[j]) < threshold {
                edges.push((i, j));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_topology() {
        let cube = Wireframe::cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.edges.len(), 12);
        assert!(cube.degrees().iter().all(|&d| d == 3));
        // Every cube edge has length 2
        for &(i, j) in &cube.edges {
            let d = nalgebra::distance(&cube.vertices[i], &cube.vertices[j]);
            assert!((d - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cube_edges_match_distance_search() {
        let cube = Wireframe::cube();
        assert_eq!(edges_within(&cube.vertices, 2.1), cube.edges);
    }

    #[test]
    fn test_mesh_edges_are_unique() {
        let mesh = Mesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![[0, 1, 2], [0, 2, 3]],
        };
        assert_eq!(mesh.edges(), vec![(0, 1), (0, 2), (0, 3), (1, 2), (2, 3)]);

        let wireframe = mesh.to_wireframe();
        assert_eq!(wireframe.vertices.len(), 4);
        assert_eq!(wireframe.edges.len(), 5);
    }

    #[test]
    fn test_edges_within_empty() {
        assert!(edges_within(&[], 1.0).is_empty());
        assert!(edges_within(&[Point3::origin()], 1.0).is_empty());
    }
}
