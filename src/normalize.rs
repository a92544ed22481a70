//! # Connectivity normalization
//!
//! Geometry files describe elements with a fixed set of named types (`tria3`,
//! `hexa8`, ...). Everything downstream of the reader only deals with two shapes:
//! a surface element is a polygon (one loop of node indices) and a volume element
//! is a polyhedron (a list of polygon faces). [`normalize`] converts a single
//! element into that form and [`normalize_batch`] converts all of the elements of
//! a part at once.

use crate::prelude::*;

/// A single element of a part.
///
/// Node indices are always 0-based. `Nodal` is the raw form read from a file:
/// the element type and its node list in file order. `Polygon` and `Polyhedron`
/// are the normalized forms, written to disk as `nsided` and `nfaced`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Nodal { kind: ElementType, nodes: Vec<usize> },
    Polygon(Vec<usize>),
    Polyhedron(Vec<Vec<usize>>),
}

impl Element {
    /// construct an element of a named type from its 0-based node list
    pub fn new(kind: ElementType, nodes: Vec<usize>) -> Self {
        Self::Nodal { kind, nodes }
    }

    pub fn kind(&self) -> ElementType {
        match self {
            Self::Nodal { kind, .. } => *kind,
            Self::Polygon(_) => ElementType::NSided,
            Self::Polyhedron(_) => ElementType::NFaced,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.kind().dimension()
    }

    /// whether this element is already a polygon or polyhedron
    pub fn is_normalized(&self) -> bool {
        matches!(self, Self::Polygon(_) | Self::Polyhedron(_))
    }

    /// number of vertices in a polygon element
    pub fn vertex_count(&self) -> Option<usize> {
        match self {
            Self::Polygon(nodes) => Some(nodes.len()),
            _ => None,
        }
    }

    /// number of faces in a polyhedron element
    pub fn face_count(&self) -> Option<usize> {
        match self {
            Self::Polyhedron(faces) => Some(faces.len()),
            _ => None,
        }
    }

    /// every node index referenced by this element, repeated once per use
    pub fn node_indices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            Self::Nodal { nodes, .. } | Self::Polygon(nodes) => Box::new(nodes.iter().copied()),
            Self::Polyhedron(faces) => Box::new(faces.iter().flatten().copied()),
        }
    }
}

/// Convert an element into its polygon (2D) or polyhedron (3D) form.
///
/// Polygon loops of `tria3` / `quad4` are taken as-is, and solid elements gather
/// the vertices of each face from the shape table without reordering them.
/// Normalizing an already normalized element returns a copy of it.
pub fn normalize(element: &Element) -> Result<Element, Error> {
    let (kind, nodes) = match element {
        Element::Polygon(_) | Element::Polyhedron(_) => return Ok(element.clone()),
        Element::Nodal { kind, nodes } => (*kind, nodes),
    };

    match kind.dimension() {
        Dimension::Surface => {
            if kind == ElementType::NSided {
                return Ok(Element::Polygon(nodes.clone()));
            }

            if !kind.is_polygon_loop() {
                return Err(unsupported(kind));
            }

            check_node_count(kind, nodes)?;
            Ok(Element::Polygon(nodes.clone()))
        }
        Dimension::Volume => {
            let faces = kind.faces().ok_or_else(|| unsupported(kind))?;
            check_node_count(kind, nodes)?;

            let faces = faces
                .iter()
                .map(|face| face.iter().map(|&local| nodes[local]).collect())
                .collect();

            Ok(Element::Polyhedron(faces))
        }
        Dimension::Point | Dimension::Curve => Err(unsupported(kind)),
    }
}

/// Normalize every element of a part.
///
/// All elements must share one dimension. This is checked for the whole batch
/// before any element is converted, so a mixed batch always fails with
/// [`Error::InconsistentPartDimension`] even if it also contains types that
/// cannot be normalized.
pub fn normalize_batch(elements: &[Element]) -> Result<(Dimension, Vec<Element>), Error> {
    let first = match elements.first() {
        Some(element) => element.dimension(),
        None => return Ok((Dimension::Surface, Vec::new())),
    };

    if let Some((element, found)) = elements
        .iter()
        .map(Element::dimension)
        .enumerate()
        .find(|(_, dimension)| *dimension != first)
    {
        return Err(Error::InconsistentPartDimension {
            element,
            first,
            found,
        });
    }

    let normalized = elements
        .iter()
        .map(normalize)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((first, normalized))
}

fn check_node_count(kind: ElementType, nodes: &[usize]) -> Result<(), Error> {
    match kind.node_count() {
        Some(expected) if expected != nodes.len() => Err(Error::ConnectivityLength {
            kind,
            expected,
            actual: nodes.len(),
        }),
        _ => Ok(()),
    }
}

fn unsupported(kind: ElementType) -> Error {
    Error::UnsupportedElementType {
        name: kind.name().to_string(),
    }
}
