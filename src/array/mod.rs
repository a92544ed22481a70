//! container types for field data read from / written to variable files

mod scalar;
mod vector;

pub use scalar::Scalar;
pub use vector::Vector;

use crate::prelude::*;

/// The values of one field on one part: a scalar per entry or a 3-component
/// vector per entry.
#[derive(Debug, Clone, PartialEq, From)]
pub enum FieldData {
    Scalar(Scalar),
    Vector(Vector),
}

impl FieldData {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Scalar(_) => FieldKind::Scalar,
            Self::Vector(_) => FieldKind::Vector,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Self::Vector(vector) => Some(vector),
            Self::Scalar(_) => None,
        }
    }
}

impl Components for FieldData {
    fn array_components(&self) -> usize {
        match self {
            Self::Scalar(scalar) => scalar.array_components(),
            Self::Vector(vector) => vector.array_components(),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Scalar(scalar) => scalar.length(),
            Self::Vector(vector) => vector.length(),
        }
    }

    fn grouped_values(&self) -> Vec<f64> {
        match self {
            Self::Scalar(scalar) => scalar.grouped_values(),
            Self::Vector(vector) => vector.grouped_values(),
        }
    }
}
