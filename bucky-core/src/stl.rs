/// STL file parser for binary and ASCII formats
///
/// Facets are welded into an indexed [`Mesh`]: corners with bit-identical
/// coordinates share one vertex, so the mesh edges of neighbouring facets
/// coincide.
use std::collections::HashMap;

use log::debug;
use nalgebra::Point3;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{multispace0, multispace1},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::StlError;
use crate::geometry::Mesh;

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

type Corner = [f32; 3];

/// Builds an indexed mesh from raw facet corners.
struct MeshBuilder {
    mesh: Mesh,
    index: HashMap<[u32; 3], usize>,
}

impl MeshBuilder {
    fn with_capacity(facets: usize) -> Self {
        Self {
            mesh: Mesh::with_capacity(facets, facets),
            index: HashMap::new(),
        }
    }

    fn vertex(&mut self, corner: Corner) -> usize {
        let key = corner.map(f32::to_bits);
        let vertices = &mut self.mesh.vertices;
        *self.index.entry(key).or_insert_with(|| {
            vertices.push(Point3::new(
                corner[0] as f64,
                corner[1] as f64,
                corner[2] as f64,
            ));
            vertices.len() - 1
        })
    }

    fn add_facet(&mut self, corners: [Corner; 3]) {
        let face = corners.map(|c| self.vertex(c));
        self.mesh.faces.push(face);
    }

    fn finish(self) -> Mesh {
        self.mesh
    }
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_corner(data: &[u8], offset: usize) -> Corner {
    [
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    ]
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh, StlError> {
    if data.len() < HEADER_LEN + 4 {
        return Err(StlError::TooSmall(data.len()));
    }

    // Skip 80-byte header
    let data = &data[HEADER_LEN..];

    let facet_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    // The header count is untrusted, check it against the payload first
    let available = (data.len() - 4) / FACET_LEN;
    if facet_count > available {
        return Err(StlError::UnexpectedEof(available));
    }

    let mut builder = MeshBuilder::with_capacity(facet_count);
    let mut offset = 4;

    for _ in 0..facet_count {
        // Facet normals are recomputed by consumers, skip them
        offset += 12;

        let mut corners = [[0.0; 3]; 3];
        for corner in &mut corners {
            *corner = read_corner(data, offset);
            offset += 12;
        }

        // Skip attribute byte count (2 bytes)
        offset += 2;

        builder.add_facet(corners);
    }

    Ok(builder.finish())
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh, StlError> {
    match parse_ascii_stl_impl(input) {
        Ok((_, mesh)) => Ok(mesh),
        Err(e) => Err(StlError::Ascii(format!("{:?}", e))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Mesh> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = take_till(|c| c == '\n')(input)?; // Optional name
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let mut builder = MeshBuilder::with_capacity(facets.len());
    for corners in facets {
        builder.add_facet(corners);
    }

    Ok((input, builder.finish()))
}

fn parse_facet(input: &str) -> IResult<&str, [Corner; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = parse_vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v1) = parse_vertex(input)?;
    let (input, v2) = parse_vertex(input)?;
    let (input, v3) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((input, [v1, v2, v3]))
}

fn parse_vertex(input: &str) -> IResult<&str, Corner> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Corner> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, [x, y, z]))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh, StlError> {
    // Binary files may also start with "solid", so fall back on failure
    if data.len() > 5 && &data[0..5] == b"solid" {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                debug!("parsed ASCII STL: {} faces", mesh.faces.len());
                return Ok(mesh);
            }
        }
    }

    let mesh = parse_binary_stl(data)?;
    debug!("parsed binary STL: {} faces", mesh.faces.len());
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "solid square
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 1 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid square
";

    fn binary_stl(facets: &[[Corner; 3]]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&(facets.len() as u32).to_le_bytes());
        for facet in facets {
            data.extend_from_slice(&[0u8; 12]);
            for corner in facet {
                for c in corner {
                    data.extend_from_slice(&c.to_le_bytes());
                }
            }
            data.extend_from_slice(&[0u8; 2]);
        }
        data
    }

    #[test]
    fn test_parse_binary_header() {
        let data = binary_stl(&[]);
        let mesh = parse_binary_stl(&data).unwrap();
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_parse_binary_too_small() {
        assert_eq!(parse_binary_stl(&[0u8; 10]), Err(StlError::TooSmall(10)));
    }

    #[test]
    fn test_parse_binary_truncated() {
        let mut data = binary_stl(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        data.truncate(data.len() - 10);
        assert_eq!(parse_binary_stl(&data), Err(StlError::UnexpectedEof(0)));
    }

    #[test]
    fn test_parse_binary_count_exceeds_payload() {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        assert_eq!(parse_binary_stl(&data), Err(StlError::UnexpectedEof(0)));

        let mut data = binary_stl(&[[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        data[HEADER_LEN..HEADER_LEN + 4].copy_from_slice(&3u32.to_le_bytes());
        assert_eq!(parse_binary_stl(&data), Err(StlError::UnexpectedEof(1)));
    }

    #[test]
    fn test_parse_binary_welds_vertices() {
        let data = binary_stl(&[
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
            [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ]);
        let mesh = parse_stl(&data).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_parse_ascii_square() {
        let mesh = parse_stl(SQUARE.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.vertices[2], Point3::new(1.0, 1.0, 0.0));
        assert_eq!(mesh.edges().len(), 5);
    }

    #[test]
    fn test_parse_ascii_rejects_garbage() {
        assert!(parse_ascii_stl("solid broken\n  facet normal oops").is_err());
    }
}
