/// Wavefront OBJ parser (geometry records only)
use nalgebra::Point3;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{char, i64 as index, space0, space1},
    combinator::{all_consuming, opt},
    multi::many1,
    number::complete::double,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Triangle};

const FORMAT: &str = "OBJ";

enum Record {
    Vertex(Point3<f64>),
    Face(Vec<i64>),
}

fn parse_vertex(input: &str) -> IResult<&str, Record> {
    let (input, _) = terminated(tag("v"), space1)(input)?;
    let (input, x) = double(input)?;
    let (input, y) = preceded(space1, double)(input)?;
    let (input, z) = preceded(space1, double)(input)?;
    // Optional homogeneous weight is ignored
    let (input, _) = opt(preceded(space1, double))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, Record::Vertex(Point3::new(x, y, z))))
}

/// `i`, `i/t`, `i//n` or `i/t/n`; only the position index is kept
fn face_index(input: &str) -> IResult<&str, i64> {
    let (input, _) = space1(input)?;
    terminated(
        index,
        opt(preceded(char('/'), take_till(|c: char| c.is_whitespace()))),
    )(input)
}

fn parse_face(input: &str) -> IResult<&str, Record> {
    let (input, _) = tag("f")(input)?;
    let (input, indices) = many1(face_index)(input)?;
    let (input, _) = space0(input)?;
    Ok((input, Record::Face(indices)))
}

fn parse_record(line: &str) -> IResult<&str, Record> {
    all_consuming(alt((parse_vertex, parse_face)))(line)
}

/// Map a 1-based or negative (relative) OBJ index onto the vertex list
fn resolve(raw: i64, vertex_count: usize, line_no: usize) -> Result<usize> {
    let resolved = match raw {
        0 => None,
        i if i > 0 => usize::try_from(i - 1).ok(),
        i => usize::try_from(i.unsigned_abs())
            .ok()
            .and_then(|back| vertex_count.checked_sub(back)),
    };

    resolved.filter(|&i| i < vertex_count).ok_or_else(|| {
        Error::parse(
            FORMAT,
            format!("line {line_no}: vertex index {raw} out of range ({vertex_count} vertices)"),
        )
    })
}

/// Parse OBJ text into a triangle mesh.
///
/// Polygons are fan-triangulated around their first vertex. Records other
/// than `v` and `f` (normals, texture coordinates, groups, materials) are
/// skipped.
pub fn parse_obj(input: &str) -> Result<Mesh> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut mesh = Mesh::new();

    for (line_no, line) in input.lines().enumerate().map(|(i, l)| (i + 1, l.trim())) {
        let line = line.split_once('#').map_or(line, |(record, _)| record.trim_end());
        let is_geometry = line.starts_with("v ")
            || line.starts_with("v\t")
            || line.starts_with("f ")
            || line.starts_with("f\t");
        if !is_geometry {
            continue;
        }

        let (_, record) = parse_record(line)
            .map_err(|e| Error::parse(FORMAT, format!("line {line_no}: {e:?}")))?;

        match record {
            Record::Vertex(p) => vertices.push(p),
            Record::Face(indices) => {
                if indices.len() < 3 {
                    return Err(Error::parse(
                        FORMAT,
                        format!("line {line_no}: face needs at least 3 vertices"),
                    ));
                }
                let corners = indices
                    .iter()
                    .map(|&raw| resolve(raw, vertices.len(), line_no).map(|i| vertices[i]))
                    .collect::<Result<Vec<_>>>()?;

                for pair in corners[1..].windows(2) {
                    mesh.add_triangle(Triangle::new(corners[0], pair[0], pair[1]));
                }
            }
        }
    }

    Ok(mesh)
}

/// Parse OBJ bytes, which must be UTF-8
pub fn parse_obj_bytes(data: &[u8]) -> Result<Mesh> {
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::parse(FORMAT, format!("not valid UTF-8: {e}")))?;
    parse_obj(text)
}
