//! reading and parsing ASCII EnSight Gold files
//!
//! A geometry file is read top to bottom with a single forward-only line cursor:
//!
//! ```text
//! <description line>
//! <description line>
//! node id assign
//! element id assign
//! part
//! <id>
//! <name>
//! coordinates
//! <node count>
//! <x of every node, one per line>
//! <y of every node, one per line>
//! <z of every node, one per line>
//! <element type>
//! <element count>
//! <one line of 1-based node indices per element>
//! ... more element types, then the next `part` or the end of the file
//! ```
//!
//! Variable (field) files are handled in the `field` submodule and the
//! lightweight part name / id scan in the `index` submodule.

mod cursor;
mod error;
pub(crate) mod field;
mod index;

pub use error::ParseError;
pub use error::{MalformedValue, TruncatedFile, UnexpectedKeyword, UnsupportedNumberingMode};
pub use field::{parse_field, read_field};
pub use index::{index_parts, part_ids, part_names, part_position, PartEntry};

use cursor::{parse_token, split_lines, LineCursor};

use crate::prelude::*;

use tracing::{debug, info, trace};

const AXES: [&str; 3] = ["x coordinate", "y coordinate", "z coordinate"];

const MIN_POLYGON_VERTICES: usize = 3;
const MIN_POLYHEDRON_FACES: usize = 4;

/// which element records a geometry reader accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Records {
    /// fixed-length types only, `nsided` and `nfaced` are rejected
    Named,
    /// fixed-length types plus the `nsided` / `nfaced` blocks this crate writes
    Normalized,
}

/// read in and parse an entire ascii geometry file for a given path
pub fn read_geometry<P: AsRef<Path>>(path: P) -> Result<Mesh, Error> {
    read_geometry_with(path, Encoding::Ascii)
}

/// read a geometry file stored with the given encoding
pub fn read_geometry_with<P: AsRef<Path>>(path: P, encoding: Encoding) -> Result<Mesh, Error> {
    encoding.ensure_supported()?;

    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let mesh = read_geometry_from(std::io::BufReader::new(file))?;

    info!(path = %path.display(), parts = mesh.len(), "read EnSight geometry");

    Ok(mesh)
}

/// read a geometry file from any reader
pub fn read_geometry_from<R: Read>(mut reader: R) -> Result<Mesh, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_geometry(&text)
}

/// Parse the text of a geometry file.
///
/// The whole file is parsed before anything is returned: any error aborts the
/// read and no partial mesh is produced.
pub fn parse_geometry(text: &str) -> Result<Mesh, Error> {
    parse_with_records(text, Records::Named)
}

/// Read a geometry file that may hold `nsided` / `nfaced` blocks, such as one
/// produced by [`write_geometry`](crate::write_geometry).
///
/// [`read_geometry`] rejects those blocks.
pub fn read_normalized_geometry<P: AsRef<Path>>(path: P) -> Result<Mesh, Error> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let mesh = parse_normalized_geometry(&text)?;

    info!(path = %path.display(), parts = mesh.len(), "read normalized EnSight geometry");

    Ok(mesh)
}

/// Parse the text of a geometry file that may hold `nsided` / `nfaced` blocks.
pub fn parse_normalized_geometry(text: &str) -> Result<Mesh, Error> {
    parse_with_records(text, Records::Normalized)
}

fn parse_with_records(text: &str, records: Records) -> Result<Mesh, Error> {
    let lines = split_lines(text);
    let mut cursor = LineCursor::new(&lines);

    let [first, second] = read_header(&mut cursor)?;
    let mut mesh = Mesh::default().with_description(first, second);

    while !cursor.is_at_end() {
        let part = read_part_block(&mut cursor, records)?;
        mesh.push(part)?;
    }

    Ok(mesh)
}

/// Read a single part, by name, from a geometry file.
///
/// Parts before the requested one are skipped by scanning for their `part`
/// lines rather than being parsed.
pub fn read_part<P: AsRef<Path>>(path: P, name: &str) -> Result<Part, Error> {
    let text = std::fs::read_to_string(path)?;
    parse_part(&text, name)
}

pub(crate) fn parse_part(text: &str, name: &str) -> Result<Part, Error> {
    let lines = split_lines(text);
    let mut cursor = LineCursor::new(&lines);
    read_header(&mut cursor)?;

    while cursor.skip_to_keyword("part") {
        // look at the name two lines below `part` without consuming the block
        let mut lookahead = cursor.clone();
        lookahead.advance();
        lookahead.next_line("part id")?;

        if lookahead.next_line("part name")? == name {
            return read_part_block(&mut cursor, Records::Named);
        }

        // step over the id and name so a part called `part` is not mistaken for a block start
        cursor = lookahead;
    }

    Err(Error::PartNotFound {
        query: format!("name {name}"),
    })
}

/// read the description and id mode lines, and skip an `extents` block if present
fn read_header(cursor: &mut LineCursor<'_>) -> Result<[String; 2], ParseError> {
    let first = cursor.next_line("description line")?.to_string();
    let second = cursor.next_line("description line")?.to_string();

    read_numbering_mode(cursor, "node")?;
    read_numbering_mode(cursor, "element")?;

    if cursor.at_keyword("extents") {
        cursor.advance();

        for axis in AXES {
            let line_number = cursor.line_number();
            let line = cursor.next_line("extents")?;
            let bounds = line
                .split_whitespace()
                .map(|token| parse_token::<f64>(token, line_number, axis))
                .collect::<Result<Vec<_>, _>>()?;

            if bounds.len() != 2 {
                return Err(MalformedValue::new(line_number, line, "a min / max pair").into());
            }
        }
    }

    Ok([first, second])
}

fn read_numbering_mode(cursor: &mut LineCursor<'_>, entity: &'static str) -> Result<(), ParseError> {
    let line_number = cursor.line_number();
    let line = cursor.next_line("id numbering mode")?;
    let prefix = format!("{entity} id");

    let mode = line
        .strip_prefix(prefix.as_str())
        .map(str::trim)
        .ok_or_else(|| UnexpectedKeyword::new(line_number, format!("{prefix} assign"), line))?;

    if mode != "assign" {
        return Err(UnsupportedNumberingMode::new(line_number, entity, mode.to_string()).into());
    }

    Ok(())
}

/// read one `part` block, up to the next `part` line or the end of the file
fn read_part_block(cursor: &mut LineCursor<'_>, records: Records) -> Result<Part, Error> {
    cursor.expect_keyword("part")?;
    let id: usize = cursor.next_value("part id")?;
    let name = cursor.next_line("part name")?.to_string();

    cursor.expect_keyword("coordinates")?;
    let node_count: usize = cursor.next_value("node count")?;
    let nodes = read_coordinates(cursor, node_count)?;

    let mut elements = Vec::new();
    let mut blocks = Vec::new();

    loop {
        match cursor.peek() {
            None if blocks.is_empty() => {
                let truncated = TruncatedFile::new(cursor.line_number(), "element type");
                return Err(ParseError::from(truncated).into());
            }
            Some("part") if blocks.is_empty() => {
                let keyword = UnexpectedKeyword::new(cursor.line_number(), "element type", "part");
                return Err(ParseError::from(keyword).into());
            }
            None | Some("part") => break,
            Some(_) => {}
        }

        let block = read_element_block(cursor, records, &mut elements)?;
        trace!(part = id, kind = %block.kind, count = block.count, "read element block");
        blocks.push(block);
    }

    let part = Part::with_blocks(id, name, nodes, &elements, blocks)?;

    debug!(
        id = part.id(),
        name = part.name(),
        nodes = part.num_nodes(),
        elements = part.num_elements(),
        dimension = %part.dimension(),
        "read part"
    );

    Ok(part)
}

/// all x values, then all y values, then all z values
fn read_coordinates(cursor: &mut LineCursor<'_>, node_count: usize) -> Result<Array2<f64>, ParseError> {
    let mut columns: [Vec<f64>; 3] = Default::default();

    for (column, expected) in columns.iter_mut().zip(AXES) {
        column.reserve(cursor.capacity_for(node_count));
        for _ in 0..node_count {
            column.push(cursor.next_value(expected)?);
        }
    }

    let [x, y, z] = columns;
    Ok(Array2::from_shape_fn((node_count, 3), |(node, axis)| {
        match axis {
            0 => x[node],
            1 => y[node],
            _ => z[node],
        }
    }))
}

fn read_element_block(
    cursor: &mut LineCursor<'_>,
    records: Records,
    elements: &mut Vec<Element>,
) -> Result<ElementBlock, Error> {
    let kind: ElementType = cursor.next_line("element type")?.parse()?;

    let node_count = match (kind.node_count(), records) {
        (Some(count), _) => count,
        (None, Records::Normalized) => return read_variable_block(cursor, kind, elements),
        (None, Records::Named) => {
            return Err(Error::UnsupportedElementType {
                name: kind.name().to_string(),
            })
        }
    };

    let count: usize = cursor.next_value("element count")?;
    elements.reserve(cursor.capacity_for(count));

    for _ in 0..count {
        let nodes = read_index_line(cursor, kind, node_count)?;
        elements.push(Element::new(kind, nodes));
    }

    Ok(ElementBlock::new(kind, count))
}

/// Read an `nsided` or `nfaced` block.
///
/// `nsided`: the vertex count of every polygon, then one line per polygon.
/// `nfaced`: the face count of every polyhedron, the vertex count of every
/// face, then one line per face.
fn read_variable_block(
    cursor: &mut LineCursor<'_>,
    kind: ElementType,
    elements: &mut Vec<Element>,
) -> Result<ElementBlock, Error> {
    let count_line = cursor.line_number();
    let count: usize = cursor.next_value("element count")?;
    elements.reserve(cursor.capacity_for(count));

    if kind == ElementType::NSided {
        let vertex_counts = read_counts(cursor, count, MIN_POLYGON_VERTICES, "polygon vertex count")?;
        for vertices in vertex_counts {
            elements.push(Element::Polygon(read_index_line(cursor, kind, vertices)?));
        }
    } else {
        let face_counts = read_counts(cursor, count, MIN_POLYHEDRON_FACES, "polyhedron face count")?;
        let total_faces = face_counts
            .iter()
            .try_fold(0usize, |total, &faces| total.checked_add(faces))
            .ok_or_else(|| {
                let expected = "a total face count that fits in memory";
                ParseError::from(MalformedValue::new(count_line, count.to_string(), expected))
            })?;
        let mut face_sizes =
            read_counts(cursor, total_faces, MIN_POLYGON_VERTICES, "face vertex count")?.into_iter();

        for faces in face_counts {
            let polyhedron = face_sizes
                .by_ref()
                .take(faces)
                .map(|vertices| read_index_line(cursor, kind, vertices))
                .collect::<Result<Vec<_>, _>>()?;
            elements.push(Element::Polyhedron(polyhedron));
        }
    }

    Ok(ElementBlock::new(kind, count))
}

/// read `count` lines of one integer each, every one at least `minimum`
fn read_counts(
    cursor: &mut LineCursor<'_>,
    count: usize,
    minimum: usize,
    expected: &str,
) -> Result<Vec<usize>, ParseError> {
    let mut counts = Vec::with_capacity(cursor.capacity_for(count));

    for _ in 0..count {
        let line_number = cursor.line_number();
        let value: usize = cursor.next_value(expected)?;

        if value < minimum {
            let expected = format!("{expected} of at least {minimum}");
            return Err(MalformedValue::new(line_number, value.to_string(), expected).into());
        }

        counts.push(value);
    }

    Ok(counts)
}

fn read_index_line(
    cursor: &mut LineCursor<'_>,
    kind: ElementType,
    node_count: usize,
) -> Result<Vec<usize>, ParseError> {
    let line_number = cursor.line_number();
    let line = cursor.next_line("element connectivity")?;
    parse_connectivity(line, line_number, kind, node_count)
}

/// turn a line of 1-based node indices into 0-based indices
fn parse_connectivity(
    line: &str,
    line_number: usize,
    kind: ElementType,
    node_count: usize,
) -> Result<Vec<usize>, ParseError> {
    let mut nodes = Vec::with_capacity(node_count.min(line.len()));

    for token in line.split_whitespace() {
        let index: usize = parse_token(token, line_number, "1-based node index")?;
        let index = index
            .checked_sub(1)
            .ok_or_else(|| MalformedValue::new(line_number, token, "1-based node index"))?;
        nodes.push(index);
    }

    if nodes.len() != node_count {
        let expected = format!("{node_count} node indices for {kind}");
        return Err(MalformedValue::new(line_number, line, expected).into());
    }

    Ok(nodes)
}
