use crate::prelude::*;

#[derive(Deref, DerefMut, Into, Clone, PartialEq, Default, Debug)]
/// Array container for vector information such as velocity
///
/// The array has one row per element (or node) and one column per component,
/// so a part with 100 elements stores a velocity field with shape `(100, 3)`.
pub struct Vector(Array2<f64>);

impl Vector {
    /// Construct a `Vector` from an array of shape `(entries, components)`.
    pub fn new(arr: Array2<f64>) -> Self {
        Self(arr)
    }

    /// build a 3-component vector field from one `[x, y, z]` row per entry
    pub fn from_rows(rows: &[[f64; 3]]) -> Self {
        Self(Array2::from_shape_fn((rows.len(), 3), |(i, c)| rows[i][c]))
    }

    /// get the array that this type wraps.
    pub fn inner(self) -> Array2<f64> {
        self.0
    }
}

impl FromBuffer for Vector {
    /// The buffer holds every first component, then every second component, and
    /// so on. Trailing values that do not fill a whole entry are ignored.
    fn from_buffer(buffer: Vec<f64>, components: usize) -> Self {
        if components == 0 {
            return Self::default();
        }

        let entries = buffer.len() / components;
        let arr = Array2::from_shape_fn((entries, components), |(entry, component)| {
            buffer[component * entries + entry]
        });

        Self(arr)
    }
}

impl Components for Vector {
    fn array_components(&self) -> usize {
        self.0.ncols()
    }

    fn length(&self) -> usize {
        self.0.nrows()
    }

    fn grouped_values(&self) -> Vec<f64> {
        // iterating the transpose walks all of component 0, then component 1, ...
        self.0.t().iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshape_grouped_buffer() {
        // two entries: (1, 3, 5) and (2, 4, 6)
        let vector = Vector::from_buffer(vec![1., 2., 3., 4., 5., 6.], 3);

        assert_eq!(vector.length(), 2);
        assert_eq!(vector.row(0).to_vec(), vec![1., 3., 5.]);
        assert_eq!(vector.row(1).to_vec(), vec![2., 4., 6.]);
        assert_eq!(vector.grouped_values(), vec![1., 2., 3., 4., 5., 6.]);
    }

    #[test]
    fn rows_constructor() {
        let vector = Vector::from_rows(&[[1., 2., 3.], [4., 5., 6.]]);
        assert_eq!(vector.array_components(), 3);
        assert_eq!(vector.grouped_values(), vec![1., 4., 2., 5., 3., 6.]);
    }
}
