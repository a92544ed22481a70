use crate::prelude::*;

use std::fs::File;
use std::io::BufWriter;

use tracing::{debug, info};

/// the marker written in place of an element type for node-wise values
const NODE_MARKER: &str = "coordinates";

/// Write a mesh to an ascii geometry file at `path`
pub fn write_geometry<P: AsRef<Path>>(path: P, mesh: &Mesh) -> Result<(), Error> {
    write_geometry_with(path, mesh, Encoding::Ascii)
}

/// Write a mesh to a geometry file with the given encoding
pub fn write_geometry_with<P: AsRef<Path>>(
    path: P,
    mesh: &Mesh,
    encoding: Encoding,
) -> Result<(), Error> {
    encoding.ensure_supported()?;

    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_geometry_to(&mut writer, mesh)?;
    writer.flush()?;

    info!(path = %path.display(), parts = mesh.len(), "wrote EnSight geometry");

    Ok(())
}

/// Write a mesh as an ascii geometry file to a `Writer`.
///
/// Parts are written in ascending id order. Surface parts are written as a
/// single `nsided` block and volume parts as a single `nfaced` block, whatever
/// element types they were built from.
pub fn write_geometry_to<W: Write>(mut writer: W, mesh: &Mesh) -> Result<(), Error> {
    let [first, second] = mesh.description();
    writeln!(writer, "{first}")?;
    writeln!(writer, "{second}")?;
    writeln!(writer, "node id assign")?;
    writeln!(writer, "element id assign")?;

    for part in mesh.sorted_by_id() {
        write_part(&mut writer, part)?;
    }

    Ok(())
}

fn write_part<W: Write>(writer: &mut W, part: &Part) -> Result<(), Error> {
    writeln!(writer, "part")?;
    writeln!(writer, "{}", part.id())?;
    writeln!(writer, "{}", part.name())?;

    writeln!(writer, "coordinates")?;
    writeln!(writer, "{}", part.num_nodes())?;
    for axis in part.nodes().columns() {
        write_values(writer, axis.iter().copied())?;
    }

    // a part holds polyhedra or polygons, nothing else
    match part.dimension() {
        Dimension::Volume => write_polyhedra(writer, part)?,
        _ => write_polygons(writer, part)?,
    }

    debug!(
        id = part.id(),
        name = part.name(),
        elements = part.num_elements(),
        "wrote part"
    );

    Ok(())
}

/// `nsided`, the element count, the vertex count of every polygon, then one
/// line of vertices per polygon
fn write_polygons<W: Write>(writer: &mut W, part: &Part) -> Result<(), Error> {
    writeln!(writer, "{}", ElementType::NSided)?;
    writeln!(writer, "{}", part.num_elements())?;

    for count in part.vertex_counts() {
        writeln!(writer, "{count}")?;
    }

    for polygon in part.polygons() {
        writeln!(writer, "{}", utils::one_based_line(polygon))?;
    }

    Ok(())
}

/// `nfaced`, the element count, the face count of every polyhedron, the vertex
/// count of every face, then one line of vertices per face
fn write_polyhedra<W: Write>(writer: &mut W, part: &Part) -> Result<(), Error> {
    writeln!(writer, "{}", ElementType::NFaced)?;
    writeln!(writer, "{}", part.num_elements())?;

    for count in part.face_counts() {
        writeln!(writer, "{count}")?;
    }

    for face in part.polyhedra().flatten() {
        writeln!(writer, "{}", face.len())?;
    }

    for face in part.polyhedra().flatten() {
        writeln!(writer, "{}", utils::one_based_line(face))?;
    }

    Ok(())
}

/// Write the field called `name` on every part of `mesh` to a variable file.
pub fn write_field<P: AsRef<Path>>(
    path: P,
    mesh: &Mesh,
    name: &str,
    locus: FieldLocus,
) -> Result<(), Error> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_field_to(&mut writer, mesh, name, locus)?;
    writer.flush()?;

    info!(path = %path.display(), field = name, %locus, "wrote EnSight variable");

    Ok(())
}

/// Write the field called `name` on every part of `mesh` to a `Writer`.
///
/// Every part must carry the field at `locus` with one entry per element (or
/// node). This is checked for all parts before anything is written. Vector
/// values are grouped by component: every x, then every y, then every z.
pub fn write_field_to<W: Write>(
    mut writer: W,
    mesh: &Mesh,
    name: &str,
    locus: FieldLocus,
) -> Result<(), Error> {
    let parts = mesh.sorted_by_id();

    let mut fields = Vec::with_capacity(parts.len());
    for part in &parts {
        let field = part.field(name, locus).ok_or_else(|| Error::FieldNotFound {
            part: part.id(),
            field: name.to_string(),
        })?;

        let expected = part.expected_entries(locus);
        if field.len() != expected {
            return Err(Error::FieldLengthMismatch {
                part: part.id(),
                field: name.to_string(),
                expected,
                actual: field.len(),
            });
        }

        fields.push(field);
    }

    writeln!(writer, "variable {name}")?;

    for (part, field) in parts.iter().zip(fields) {
        writeln!(writer, "part")?;
        writeln!(writer, "{}", part.id())?;
        writeln!(writer, "{}", block_marker(part, locus))?;
        write_values(&mut writer, field.data().grouped_values().into_iter())?;
    }

    Ok(())
}

/// the line introducing a part's values: the element block the values belong to
fn block_marker(part: &Part, locus: FieldLocus) -> &'static str {
    match (locus, part.dimension()) {
        (FieldLocus::Node, _) => NODE_MARKER,
        (FieldLocus::Element, Dimension::Volume) => ElementType::NFaced.name(),
        (FieldLocus::Element, _) => ElementType::NSided.name(),
    }
}

fn write_values<W: Write, I: Iterator<Item = f64>>(writer: &mut W, values: I) -> Result<(), Error> {
    let mut buffer = ryu::Buffer::new();

    for value in values {
        writeln!(writer, "{}", buffer.format(value))?;
    }

    Ok(())
}
