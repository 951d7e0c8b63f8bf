/// STL parser for binary and ASCII formats
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    combinator::opt,
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, FLOATS_PER_TRIANGLE};

const FORMAT: &str = "STL";

/// Bytes before the triangle count in a binary file
const HEADER_SIZE: usize = 80;

/// Normal, three vertices and the attribute byte count
const RECORD_SIZE: usize = 50;

fn read_f32(data: &[u8], offset: usize) -> f64 {
    f64::from(f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]))
}

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    if data.len() < HEADER_SIZE + 4 {
        return Err(Error::parse(FORMAT, "file too small to be a valid STL"));
    }

    let data = &data[HEADER_SIZE..];
    let triangle_count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let records = &data[4..];

    let needed = triangle_count
        .checked_mul(RECORD_SIZE)
        .ok_or_else(|| Error::parse(FORMAT, "triangle count overflows"))?;
    if records.len() < needed {
        return Err(Error::parse(
            FORMAT,
            format!(
                "unexpected end of file: {triangle_count} triangles need {needed} bytes, found {}",
                records.len()
            ),
        ));
    }

    let mut positions = Vec::with_capacity(triangle_count * FLOATS_PER_TRIANGLE);
    for record in records.chunks_exact(RECORD_SIZE).take(triangle_count) {
        // Skip the 12-byte facet normal; vertices follow
        for i in 0..FLOATS_PER_TRIANGLE {
            positions.push(read_f32(record, 12 + i * 4));
        }
    }

    Mesh::from_positions(positions)
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    match parse_ascii_stl_impl(input) {
        Ok((_, positions)) => Mesh::from_positions(positions),
        Err(e) => Err(Error::parse(FORMAT, format!("{e:?}"))),
    }
}

fn parse_ascii_stl_impl(input: &str) -> IResult<&str, Vec<f64>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = not_line_ending(input)?; // Optional name
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = opt(not_line_ending)(input)?;

    let mut positions = Vec::with_capacity(facets.len() * FLOATS_PER_TRIANGLE);
    for facet in facets {
        positions.extend_from_slice(&facet);
    }

    Ok((input, positions))
}

fn parse_facet(input: &str) -> IResult<&str, [f64; FLOATS_PER_TRIANGLE]> {
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

    Ok((
        input,
        [v1.0, v1.1, v1.2, v2.0, v2.1, v2.2, v3.0, v3.1, v3.2],
    ))
}

fn parse_vertex(input: &str) -> IResult<&str, (f64, f64, f64)> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_vector3(input)
}

fn parse_vector3(input: &str) -> IResult<&str, (f64, f64, f64)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (f64::from(x), f64::from(y), f64::from(z))))
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    // Binary headers may also begin with "solid", so fall back on failure
    if data.len() > 5 && &data[0..5] == b"solid" {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}
