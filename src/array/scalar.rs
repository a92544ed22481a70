use crate::prelude::*;

#[derive(Deref, DerefMut, Into, Clone, PartialEq, Default, Debug)]
/// Array container for scalar information such as pressure, one value per
/// element (or node) of a part.
pub struct Scalar(Array1<f64>);

impl Scalar {
    /// Construct a `Scalar` from an array.
    pub fn new(arr: Array1<f64>) -> Self {
        Self(arr)
    }

    /// get the array that this type wraps.
    /// usually this method is not required because `Scalar` implements [`DerefMut`](std::ops::DerefMut) and
    /// [`Deref`](std::ops::Deref)
    pub fn inner(self) -> Array1<f64> {
        self.0
    }
}

impl From<Vec<f64>> for Scalar {
    fn from(values: Vec<f64>) -> Self {
        Self(Array1::from(values))
    }
}

impl FromBuffer for Scalar {
    fn from_buffer(buffer: Vec<f64>, _components: usize) -> Self {
        Self::from(buffer)
    }
}

impl Components for Scalar {
    fn array_components(&self) -> usize {
        1
    }

    fn length(&self) -> usize {
        self.0.len()
    }

    fn grouped_values(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}
