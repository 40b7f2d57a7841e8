/// Truncated icosahedron (C60) construction
///
/// The 60 cage vertices are obtained by cutting every edge of a regular
/// icosahedron at one third from each end, projecting the cut points onto
/// the unit sphere and reconnecting them by proximity.
use log::{debug, warn};
use nalgebra::Point3;

use crate::error::GeometryError;
use crate::geometry::{edges_within, Wireframe};

/// Golden ratio.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Separates icosahedron edges (length 2) from its diagonals.
pub const ICOSAHEDRON_EDGE_THRESHOLD: f64 = 2.1;

/// Separates C60 bonds from the next-nearest vertex pairs on the unit sphere.
pub const BUCKY_EDGE_THRESHOLD: f64 = 0.6;

/// Points closer than this are the same vertex.
pub const DEDUP_TOLERANCE: f64 = 1e-10;

pub const TRUNCATION_FACTOR: f64 = 1.0 / 3.0;

pub const ICOSAHEDRON_VERTEX_COUNT: usize = 12;
pub const ICOSAHEDRON_EDGE_COUNT: usize = 30;
pub const BUCKY_VERTEX_COUNT: usize = 60;
pub const BUCKY_EDGE_COUNT: usize = 90;

/// The 12 vertices of a regular icosahedron with edge length 2.
pub fn icosahedron_vertices() -> Vec<Point3<f64>> {
    let mut vertices = Vec::with_capacity(ICOSAHEDRON_VERTEX_COUNT);
    for s in [-1.0, 1.0] {
        vertices.push(Point3::new(0.0, s, PHI));
        vertices.push(Point3::new(0.0, s, -PHI));
        vertices.push(Point3::new(PHI, 0.0, s));
        vertices.push(Point3::new(-PHI, 0.0, s));
        vertices.push(Point3::new(s, PHI, 0.0));
        vertices.push(Point3::new(s, -PHI, 0.0));
    }
    vertices
}

/// The icosahedron as a wireframe, with its vertex and edge counts checked.
pub fn icosahedron() -> Result<Wireframe, GeometryError> {
    let vertices = icosahedron_vertices();
    expect_count("icosahedron vertices", ICOSAHEDRON_VERTEX_COUNT, vertices.len())?;

    let edges = edges_within(&vertices, ICOSAHEDRON_EDGE_THRESHOLD);
    expect_count("icosahedron edges", ICOSAHEDRON_EDGE_COUNT, edges.len())?;

    Ok(Wireframe::new(vertices, edges))
}

/// Generate the C60 cage: 60 unit-sphere vertices and their bonds.
pub fn generate() -> Result<Wireframe, GeometryError> {
    let seed = icosahedron()?;

    let truncated = truncate(&seed);
    let normalized = normalize(&truncated)?;

    let vertices = dedup(&normalized, DEDUP_TOLERANCE);
    expect_count("deduplicated vertices", BUCKY_VERTEX_COUNT, vertices.len())?;

    let edges = edges_within(&vertices, BUCKY_EDGE_THRESHOLD);
    if edges.len() != BUCKY_EDGE_COUNT {
        warn!(
            "buckyball has {} edges, expected {}",
            edges.len(),
            BUCKY_EDGE_COUNT
        );
    }
    debug!(
        "generated buckyball: {} vertices, {} edges",
        vertices.len(),
        edges.len()
    );

    Ok(Wireframe::new(vertices, edges))
}

/// Two cut points per edge, the one near `i` first.
fn truncate(seed: &Wireframe) -> Vec<Point3<f64>> {
    let mut points = Vec::with_capacity(seed.edges.len() * 2);
    for &(i, j) in &seed.edges {
        let vi = seed.vertices[i];
        let vj = seed.vertices[j];
        points.push(vi + (vj - vi) * TRUNCATION_FACTOR);
        points.push(vj + (vi - vj) * TRUNCATION_FACTOR);
    }
    debug!("truncated {} edges into {} points", seed.edges.len(), points.len());
    points
}

fn normalize(points: &[Point3<f64>]) -> Result<Vec<Point3<f64>>, GeometryError> {
    points
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let norm = p.coords.norm();
            if norm == 0.0 {
                return Err(GeometryError::DegenerateNormalization { index });
            }
            Ok(Point3::from(p.coords / norm))
        })
        .collect()
}

/// Keep the first occurrence of every point, in encounter order.
fn dedup(points: &[Point3<f64>], tolerance: f64) -> Vec<Point3<f64>> {
    let mut unique: Vec<Point3<f64>> = Vec::with_capacity(points.len());
    for p in points {
        let seen = unique
            .iter()
            .any(|u| nalgebra::distance(p, u) < tolerance);
        if !seen {
            unique.push(*p);
        }
    }
    unique
}

fn expect_count(stage: &'static str, expected: usize, actual: usize) -> Result<(), GeometryError> {
    if expected != actual {
        return Err(GeometryError::StructuralInvariantViolation {
            stage,
            expected,
            actual,
        });
    }
    Ok(())
}
