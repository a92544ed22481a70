//! # Element shapes
//!
//! Static information on every element type that can appear in an EnSight Gold
//! geometry file: its topological dimension, how many nodes it lists per
//! connectivity line, and (for the linear solids) which local vertices form each
//! of its faces.
//!
//! Face tables use the on-disk vertex order. Corner numbering follows EnSight:
//!
//! ```text
//! tetra4    0-1-2 base, 3 apex
//! pyramid5  0-1-2-3 base, 4 apex
//! penta6    0-1-2 bottom cap, 3-4-5 top cap (3 above 0)
//! hexa8     0-1-2-3 bottom, 4-5-6-7 top (4 above 0)
//! ```
//!
//! Every face is wound so that its normal points out of the element, which means
//! each edge of a solid is walked once in each direction across its two faces.

use crate::prelude::*;

use std::str::FromStr;

/// Topological dimension of an element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Dimension {
    #[display(fmt = "0D")]
    Point,
    #[display(fmt = "1D")]
    Curve,
    #[display(fmt = "2D")]
    Surface,
    #[display(fmt = "3D")]
    Volume,
}

impl Dimension {
    /// the dimension as a plain number (0, 1, 2 or 3)
    pub fn rank(self) -> u8 {
        match self {
            Self::Point => 0,
            Self::Curve => 1,
            Self::Surface => 2,
            Self::Volume => 3,
        }
    }
}

/// Every element type name understood by the geometry reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ElementType {
    #[display(fmt = "point")]
    Point,
    #[display(fmt = "bar2")]
    Bar2,
    #[display(fmt = "bar3")]
    Bar3,
    #[display(fmt = "tria3")]
    Tria3,
    #[display(fmt = "tria6")]
    Tria6,
    #[display(fmt = "quad4")]
    Quad4,
    #[display(fmt = "quad8")]
    Quad8,
    #[display(fmt = "tetra4")]
    Tetra4,
    #[display(fmt = "tetra10")]
    Tetra10,
    #[display(fmt = "pyramid5")]
    Pyramid5,
    #[display(fmt = "pyramid13")]
    Pyramid13,
    #[display(fmt = "penta6")]
    Penta6,
    #[display(fmt = "penta15")]
    Penta15,
    #[display(fmt = "hexa8")]
    Hexa8,
    #[display(fmt = "hexa20")]
    Hexa20,
    #[display(fmt = "nsided")]
    NSided,
    #[display(fmt = "nfaced")]
    NFaced,
}

const TETRA4_FACES: &[&[usize]] = &[&[0, 2, 1], &[0, 1, 3], &[1, 2, 3], &[2, 0, 3]];

const PYRAMID5_FACES: &[&[usize]] = &[
    &[0, 3, 2, 1],
    &[0, 1, 4],
    &[1, 2, 4],
    &[2, 3, 4],
    &[3, 0, 4],
];

const PENTA6_FACES: &[&[usize]] = &[
    &[0, 2, 1],
    &[3, 4, 5],
    &[0, 1, 4, 3],
    &[1, 2, 5, 4],
    &[2, 0, 3, 5],
];

const HEXA8_FACES: &[&[usize]] = &[
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
    &[0, 1, 5, 4],
    &[1, 2, 6, 5],
    &[2, 3, 7, 6],
    &[3, 0, 4, 7],
];

impl ElementType {
    pub const ALL: [ElementType; 17] = [
        Self::Point,
        Self::Bar2,
        Self::Bar3,
        Self::Tria3,
        Self::Tria6,
        Self::Quad4,
        Self::Quad8,
        Self::Tetra4,
        Self::Tetra10,
        Self::Pyramid5,
        Self::Pyramid13,
        Self::Penta6,
        Self::Penta15,
        Self::Hexa8,
        Self::Hexa20,
        Self::NSided,
        Self::NFaced,
    ];

    /// the keyword used for this type in geometry and variable files
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Bar2 => "bar2",
            Self::Bar3 => "bar3",
            Self::Tria3 => "tria3",
            Self::Tria6 => "tria6",
            Self::Quad4 => "quad4",
            Self::Quad8 => "quad8",
            Self::Tetra4 => "tetra4",
            Self::Tetra10 => "tetra10",
            Self::Pyramid5 => "pyramid5",
            Self::Pyramid13 => "pyramid13",
            Self::Penta6 => "penta6",
            Self::Penta15 => "penta15",
            Self::Hexa8 => "hexa8",
            Self::Hexa20 => "hexa20",
            Self::NSided => "nsided",
            Self::NFaced => "nfaced",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Self::Point => Dimension::Point,
            Self::Bar2 | Self::Bar3 => Dimension::Curve,
            Self::Tria3 | Self::Tria6 | Self::Quad4 | Self::Quad8 | Self::NSided => {
                Dimension::Surface
            }
            Self::Tetra4
            | Self::Tetra10
            | Self::Pyramid5
            | Self::Pyramid13
            | Self::Penta6
            | Self::Penta15
            | Self::Hexa8
            | Self::Hexa20
            | Self::NFaced => Dimension::Volume,
        }
    }

    /// number of node indices on one connectivity line, `None` for the
    /// variable-length polygon and polyhedron types
    pub fn node_count(self) -> Option<usize> {
        let count = match self {
            Self::Point => 1,
            Self::Bar2 => 2,
            Self::Bar3 => 3,
            Self::Tria3 => 3,
            Self::Tria6 => 6,
            Self::Quad4 => 4,
            Self::Quad8 => 8,
            Self::Tetra4 => 4,
            Self::Tetra10 => 10,
            Self::Pyramid5 => 5,
            Self::Pyramid13 => 13,
            Self::Penta6 => 6,
            Self::Penta15 => 15,
            Self::Hexa8 => 8,
            Self::Hexa20 => 20,
            Self::NSided | Self::NFaced => return None,
        };

        Some(count)
    }

    /// local vertex indices of each face, for solid types that can be
    /// decomposed into a face list
    pub fn faces(self) -> Option<&'static [&'static [usize]]> {
        match self {
            Self::Tetra4 => Some(TETRA4_FACES),
            Self::Pyramid5 => Some(PYRAMID5_FACES),
            Self::Penta6 => Some(PENTA6_FACES),
            Self::Hexa8 => Some(HEXA8_FACES),
            _ => None,
        }
    }

    /// look up a type by its keyword
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// whether the connectivity of this type is already a closed polygon loop
    pub fn is_polygon_loop(self) -> bool {
        matches!(self, Self::Tria3 | Self::Quad4)
    }

    /// the polygon and polyhedron types, whose records carry their own sizes
    pub fn is_variable_length(self) -> bool {
        matches!(self, Self::NSided | Self::NFaced)
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| Error::UnsupportedElementType {
            name: name.to_string(),
        })
    }
}

/// look up the topological dimension of an element type by its name
pub fn dimension_of(name: &str) -> Result<Dimension, Error> {
    Ok(name.parse::<ElementType>()?.dimension())
}
