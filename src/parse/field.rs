//! reading variable files
//!
//! A variable file has one description line followed by one section per part:
//!
//! ```text
//! <description line>
//! part
//! <id>
//! <element type, `nsided`/`nfaced`, or `coordinates` for node values>
//! <values, one per line>
//! ... more element types
//! ... the next `part`
//! ```
//!
//! Vector values are grouped by component inside each sub-block: all x
//! components of the block, then all y, then all z.

use super::cursor::{split_lines, LineCursor};
use super::error::UnexpectedKeyword;
use super::ParseError;

use crate::prelude::*;

use tracing::debug;

/// marker line introducing node-wise values
const NODE_MARKER: &str = "coordinates";

/// Read one part's section of a variable file.
pub fn read_field<P: AsRef<Path>>(
    path: P,
    part: &Part,
    name: &str,
    kind: FieldKind,
    locus: FieldLocus,
) -> Result<Field, Error> {
    let text = std::fs::read_to_string(path)?;
    parse_field(&text, part, name, kind, locus)
}

/// Parse one part's section from the text of a variable file.
///
/// The section is the one whose id matches `part`. It must hold exactly one
/// entry per element (or node, for [`FieldLocus::Node`]) of the part.
pub fn parse_field(
    text: &str,
    part: &Part,
    name: &str,
    kind: FieldKind,
    locus: FieldLocus,
) -> Result<Field, Error> {
    let lines = split_lines(text);
    let cursor = LineCursor::new(&lines);
    read_section(cursor, part, name, kind, locus)
}

/// parse the section of every part in a mesh, in mesh order
pub(crate) fn parse_mesh_field(
    text: &str,
    mesh: &Mesh,
    name: &str,
    kind: FieldKind,
    locus: FieldLocus,
) -> Result<Vec<Field>, Error> {
    let lines = split_lines(text);
    let cursor = LineCursor::new(&lines);

    mesh.parts()
        .iter()
        .map(|part| read_section(cursor.clone(), part, name, kind, locus))
        .collect()
}

/// values that follow one marker line (or the part id, if there is no marker)
#[derive(Debug)]
struct ValueGroup<'a> {
    marker: Option<&'a str>,
    /// line of the marker, or of the first value for an unmarked group
    line: usize,
    values: Vec<f64>,
}

fn read_section(
    mut cursor: LineCursor<'_>,
    part: &Part,
    name: &str,
    kind: FieldKind,
    locus: FieldLocus,
) -> Result<Field, Error> {
    cursor.next_line("description line")?;
    seek_part(&mut cursor, part.id())?;

    let groups = read_value_groups(&mut cursor)?;
    let data = align(groups, part, name, kind, locus)?;

    debug!(part = part.id(), field = name, %kind, %locus, entries = data.length(), "read field");

    Ok(Field::new(name, locus, data))
}

/// leave the cursor just after the id line of the section for `id`
fn seek_part(cursor: &mut LineCursor<'_>, id: usize) -> Result<(), Error> {
    while cursor.skip_to_keyword("part") {
        cursor.advance();
        let section: usize = cursor.next_value("part id")?;

        if section == id {
            return Ok(());
        }
    }

    Err(Error::PartNotFound {
        query: format!("id {id}"),
    })
}

/// read values up to the next `part` line or the end of the file
fn read_value_groups<'a>(cursor: &mut LineCursor<'a>) -> Result<Vec<ValueGroup<'a>>, ParseError> {
    let mut groups: Vec<ValueGroup<'a>> = Vec::new();

    while let Some(line) = cursor.peek() {
        if line == "part" {
            break;
        }

        let line_number = cursor.line_number();

        if is_marker(line) {
            groups.push(ValueGroup {
                marker: Some(line),
                line: line_number,
                values: Vec::new(),
            });
            cursor.advance();
            continue;
        }

        let value: f64 = cursor.next_value("field value")?;

        match groups.last_mut() {
            Some(group) => group.values.push(value),
            None => groups.push(ValueGroup {
                marker: None,
                line: line_number,
                values: vec![value],
            }),
        }
    }

    Ok(groups)
}

fn is_marker(line: &str) -> bool {
    line == NODE_MARKER || ElementType::from_name(line).is_some()
}

/// reshape every group into entries and check them against the part's layout
fn align(
    groups: Vec<ValueGroup<'_>>,
    part: &Part,
    name: &str,
    kind: FieldKind,
    locus: FieldLocus,
) -> Result<FieldData, Error> {
    let per_block = check_markers(&groups, part, locus)?;

    let components = kind.components();
    let expected = part.expected_entries(locus);
    let total_values: usize = groups.iter().map(|group| group.values.len()).sum();

    let mismatch = |expected: usize, actual: usize| Error::FieldLengthMismatch {
        part: part.id(),
        field: name.to_string(),
        expected,
        actual,
    };

    if groups
        .iter()
        .any(|group| group.values.len() % components != 0)
    {
        return Err(mismatch(expected * components, total_values));
    }

    let entries = total_values / components;
    if entries != expected {
        return Err(mismatch(expected, entries));
    }

    if per_block {
        for (group, block) in groups.iter().zip(part.blocks()) {
            let group_entries = group.values.len() / components;
            if group_entries != block.count {
                return Err(mismatch(block.count, group_entries));
            }
        }
    }

    // rows of every group, one entry after the next
    let mut rows = Vec::with_capacity(total_values);
    for group in groups {
        let block = Vector::from_buffer(group.values, components);
        rows.extend(block.iter().copied());
    }

    let data = match kind {
        FieldKind::Scalar => FieldData::Scalar(Scalar::from(rows)),
        FieldKind::Vector => {
            let arr = Array2::from_shape_fn((entries, components), |(entry, component)| {
                rows[entry * components + component]
            });
            FieldData::Vector(Vector::new(arr))
        }
    };

    Ok(data)
}

/// Check the marker lines of a section against the part.
///
/// Node values may only be marked `coordinates`. Element values marked
/// `nsided`/`nfaced` (or not marked at all) are one run over every element,
/// and the marker must agree with the dimension of the part. Once any group
/// names a fixed-length type, the groups must name the part's sub-blocks in
/// geometry order, and `true` is returned so each block count gets checked.
fn check_markers(
    groups: &[ValueGroup<'_>],
    part: &Part,
    locus: FieldLocus,
) -> Result<bool, ParseError> {
    if locus == FieldLocus::Node {
        for group in groups {
            match group.marker {
                Some(marker) if marker != NODE_MARKER => {
                    return Err(UnexpectedKeyword::new(group.line, NODE_MARKER, marker).into())
                }
                _ => {}
            }
        }
        return Ok(false);
    }

    let mut fixed = false;
    for group in groups {
        let marker = match group.marker {
            Some(marker) => marker,
            None => continue,
        };

        match ElementType::from_name(marker) {
            None => {
                return Err(UnexpectedKeyword::new(group.line, "element type", marker).into())
            }
            Some(kind) if kind.is_variable_length() => {
                if kind.dimension() != part.dimension() {
                    let expected = match part.dimension() {
                        Dimension::Volume => ElementType::NFaced,
                        _ => ElementType::NSided,
                    };
                    return Err(UnexpectedKeyword::new(group.line, expected.name(), marker).into());
                }
            }
            Some(_) => fixed = true,
        }
    }

    if !fixed {
        return Ok(false);
    }

    // fewer groups than blocks is left to the entry count check
    let blocks = part.blocks();
    for (position, group) in groups.iter().enumerate() {
        let expected = blocks.get(position).map_or("part", |block| block.kind.name());
        if group.marker != Some(expected) {
            let actual = group.marker.unwrap_or("a value");
            return Err(UnexpectedKeyword::new(group.line, expected, actual).into());
        }
    }

    Ok(true)
}
