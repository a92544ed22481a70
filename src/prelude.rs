//! Common traits and types that are useful for working with `ensight`
#![allow(unused_imports)]

pub use crate::array::{FieldData, Scalar, Vector};
pub use crate::mesh::{ElementBlock, Field, FieldKind, FieldLocus, Mesh, Part};
pub use crate::normalize::Element;
pub use crate::shape::{Dimension, ElementType};
pub use crate::traits::{Components, FromBuffer};
pub use crate::Encoding;

pub(crate) use crate::parse::ParseError;
pub(crate) use crate::Error;
pub(crate) use crate::{normalize, parse, shape, utils};

pub(crate) use std::io::{Read, Write};
pub(crate) use std::path::Path;

pub(crate) use derive_more::{Constructor, Deref, DerefMut, Display, From, Into};

pub(crate) use ndarray::{Array1, Array2};
