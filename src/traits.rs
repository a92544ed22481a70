//! # Traits
//!
//! Field data is stored on disk grouped by component: every x component of a
//! block of entries, then every y component, then every z component. These two
//! traits translate between that layout and the in-memory containers in
//! [`array`](crate::array).

/// Describes the layout of a container of field values.
pub trait Components {
    /// number of values stored for each entry (1 for scalars, 3 for vectors)
    fn array_components(&self) -> usize;

    /// number of entries (elements or nodes) in the container
    fn length(&self) -> usize;

    /// every value in the container, grouped by component as it is written to disk
    fn grouped_values(&self) -> Vec<f64>;
}

/// Rebuild a container from a buffer of values grouped by component.
pub trait FromBuffer {
    fn from_buffer(buffer: Vec<f64>, components: usize) -> Self;
}
