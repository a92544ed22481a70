#![doc = include_str!("../README.md")]

pub mod array;
pub mod mesh;
pub mod normalize;
pub mod parse;
pub mod prelude;
pub mod shape;
mod traits;
mod utils;
mod write_ensight;

pub use traits::{Components, FromBuffer};

pub use array::{FieldData, Scalar, Vector};
pub use mesh::{ElementBlock, Field, FieldKind, FieldLocus, Mesh, Part};
pub use normalize::{normalize, normalize_batch, Element};
pub use shape::{Dimension, ElementType};

pub use parse::{
    index_parts, parse_field, parse_geometry, parse_normalized_geometry, part_ids, part_names,
    part_position, read_field, read_geometry, read_geometry_from, read_geometry_with,
    read_normalized_geometry, read_part, PartEntry,
};
pub use write_ensight::{
    write_field, write_field_to, write_geometry, write_geometry_to, write_geometry_with,
};

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Error while parsing EnSight file: {0}")]
    Parse(#[from] parse::ParseError),
    #[error("element type `{name}` is not supported")]
    UnsupportedElementType { name: String },
    #[error("element {element} is {found} but the part started with {first} elements")]
    InconsistentPartDimension {
        element: usize,
        first: Dimension,
        found: Dimension,
    },
    #[error("{kind} element lists {actual} nodes, expected {expected}")]
    ConnectivityLength {
        kind: ElementType,
        expected: usize,
        actual: usize,
    },
    #[error("field `{field}` on part {part} has {actual} entries, expected {expected}")]
    FieldLengthMismatch {
        part: usize,
        field: String,
        expected: usize,
        actual: usize,
    },
    #[error("unknown field kind `{kind}`, expected `scalar` or `vector`")]
    UnknownFieldKind { kind: String },
    #[error("no part matching `{query}`")]
    PartNotFound { query: String },
    #[error("part {part} has no field named `{field}`")]
    FieldNotFound { part: usize, field: String },
    #[error("element {element} of part {part} references node {index} but the part has {node_count} nodes")]
    NodeIndexOutOfRange {
        part: usize,
        element: usize,
        index: usize,
        node_count: usize,
    },
    #[error("part {part} has no elements")]
    EmptyPart { part: usize },
    #[error("part id {id} is used more than once")]
    DuplicatePartId { id: usize },
    #[error("part ids start at 1, got {id}")]
    InvalidPartId { id: usize },
    #[error("part name {name:?} must be one line without surrounding whitespace")]
    InvalidPartName { name: String },
    #[error("node coordinates must have 3 columns, got {columns}")]
    CoordinateShape { columns: usize },
    #[error("{encoding} EnSight files are not supported")]
    UnsupportedEncoding { encoding: Encoding },
}

/// the encoding of an EnSight Gold file on disk
///
/// Only `Ascii` files can be read and written. Passing `Binary` to any of the
/// `*_with` entry points returns [`Error::UnsupportedEncoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum Encoding {
    #[default]
    #[display(fmt = "ascii")]
    Ascii,
    #[display(fmt = "binary")]
    Binary,
}

impl Encoding {
    pub(crate) fn ensure_supported(self) -> Result<(), Error> {
        match self {
            Self::Ascii => Ok(()),
            Self::Binary => Err(Error::UnsupportedEncoding { encoding: self }),
        }
    }
}
