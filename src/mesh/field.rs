use crate::prelude::*;

use std::str::FromStr;

/// whether a field stores one value or a 3-component vector per entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FieldKind {
    #[display(fmt = "scalar")]
    Scalar,
    #[display(fmt = "vector")]
    Vector,
}

impl FieldKind {
    /// number of values per entry
    pub fn components(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vector => 3,
        }
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        match kind {
            "scalar" => Ok(Self::Scalar),
            "vector" => Ok(Self::Vector),
            _ => Err(Error::UnknownFieldKind {
                kind: kind.to_string(),
            }),
        }
    }
}

/// whether a field has one entry per element or one entry per node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FieldLocus {
    #[display(fmt = "element")]
    Element,
    #[display(fmt = "node")]
    Node,
}

/// A named field attached to a part.
///
/// A `Field` on its own carries no part information; it is only checked against
/// a part's element or node count when it is attached with
/// [`Part::set_field`](crate::Part::set_field).
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    locus: FieldLocus,
    data: FieldData,
}

impl Field {
    pub fn new<N: Into<String>, D: Into<FieldData>>(name: N, locus: FieldLocus, data: D) -> Self {
        Self {
            name: name.into(),
            locus,
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locus(&self) -> FieldLocus {
        self.locus
    }

    pub fn kind(&self) -> FieldKind {
        self.data.kind()
    }

    pub fn data(&self) -> &FieldData {
        &self.data
    }

    pub fn into_data(self) -> FieldData {
        self.data
    }

    /// number of entries (not values) in the field
    pub fn len(&self) -> usize {
        self.data.length()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
