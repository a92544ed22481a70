//! # Mesh model
//!
//! A [`Mesh`] is an ordered list of [`Part`]s. Each part owns its nodes, its
//! normalized elements (all of one dimension) and any [`Field`]s that have been
//! attached to it.
//!
//! Parts are usually produced by [`read_geometry`](crate::read_geometry), but they
//! can also be built directly:
//!
//! ```
//! use ensight::{Element, ElementType, Mesh, Part};
//! use ensight::ndarray::array;
//!
//! let nodes = array![[0., 0., 0.], [1., 0., 0.], [0., 1., 0.]];
//! let triangle = Element::new(ElementType::Tria3, vec![0, 1, 2]);
//! let part = Part::new(1, "inlet", nodes, vec![triangle]).unwrap();
//!
//! let mesh = Mesh::new(vec![part]).unwrap();
//! assert_eq!(mesh.part_by_name("inlet").unwrap().id(), 1);
//! ```

mod field;
mod part;

pub use field::{Field, FieldKind, FieldLocus};
pub use part::{ElementBlock, Part};

use crate::prelude::*;

/// description lines written at the top of geometry files built in memory
pub const DEFAULT_DESCRIPTION: [&str; 2] = [
    "EnSight Gold geometry",
    "written by the ensight crate",
];

#[derive(Debug, Clone, PartialEq)]
/// Every part of an EnSight geometry, in file order.
pub struct Mesh {
    description: [String; 2],
    parts: Vec<Part>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.map(String::from),
            parts: Vec::new(),
        }
    }
}

impl Mesh {
    /// Create a mesh from a list of parts. Part ids must be unique.
    pub fn new(parts: Vec<Part>) -> Result<Self, Error> {
        let mut mesh = Self::default();

        for part in parts {
            mesh.push(part)?;
        }

        Ok(mesh)
    }

    /// replace the two free-text lines at the top of the geometry file
    pub fn with_description<A: Into<String>, B: Into<String>>(mut self, first: A, second: B) -> Self {
        self.description = [first.into(), second.into()];
        self
    }

    pub fn description(&self) -> &[String; 2] {
        &self.description
    }

    /// append a part, keeping part ids unique
    pub fn push(&mut self, part: Part) -> Result<(), Error> {
        if self.parts.iter().any(|existing| existing.id() == part.id()) {
            return Err(Error::DuplicatePartId { id: part.id() });
        }

        self.parts.push(part);
        Ok(())
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// mutable access to the parts, for attaching fields
    pub fn parts_mut(&mut self) -> &mut [Part] {
        &mut self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// find a part by its id
    pub fn part(&self, id: usize) -> Result<&Part, Error> {
        self.parts
            .iter()
            .find(|part| part.id() == id)
            .ok_or_else(|| id_not_found(id))
    }

    pub fn part_mut(&mut self, id: usize) -> Result<&mut Part, Error> {
        self.parts
            .iter_mut()
            .find(|part| part.id() == id)
            .ok_or_else(|| id_not_found(id))
    }

    /// find the first part with a given name
    pub fn part_by_name(&self, name: &str) -> Result<&Part, Error> {
        self.parts
            .iter()
            .find(|part| part.name() == name)
            .ok_or_else(|| name_not_found(name))
    }

    pub fn part_by_name_mut(&mut self, name: &str) -> Result<&mut Part, Error> {
        self.parts
            .iter_mut()
            .find(|part| part.name() == name)
            .ok_or_else(|| name_not_found(name))
    }

    /// 1-based position of the first part with a given name
    pub fn position(&self, name: &str) -> Result<usize, Error> {
        self.parts
            .iter()
            .position(|part| part.name() == name)
            .map(|index| index + 1)
            .ok_or_else(|| name_not_found(name))
    }

    /// the parts ordered by ascending id, as they are written to disk
    pub fn sorted_by_id(&self) -> Vec<&Part> {
        let mut parts: Vec<&Part> = self.parts.iter().collect();
        // stable, so equal ids would keep their relative order
        parts.sort_by_key(|part| part.id());
        parts
    }

    /// Load a field for every part from a variable file.
    ///
    /// Each part reads the section with its own id. Nothing is attached unless
    /// every part's section is found and has the right length.
    pub fn load_field<P: AsRef<Path>>(
        &mut self,
        path: P,
        name: &str,
        kind: FieldKind,
        locus: FieldLocus,
    ) -> Result<(), Error> {
        let text = std::fs::read_to_string(path)?;
        let fields = parse::field::parse_mesh_field(&text, self, name, kind, locus)?;

        for (part, field) in self.parts.iter_mut().zip(fields) {
            part.set_field(field)?;
        }

        Ok(())
    }
}

fn id_not_found(id: usize) -> Error {
    Error::PartNotFound {
        query: format!("id {id}"),
    }
}

fn name_not_found(name: &str) -> Error {
    Error::PartNotFound {
        query: format!("name {name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn triangle_part(id: usize, name: &str) -> Part {
        let nodes = array![[0., 0., 0.], [1., 0., 0.], [0., 1., 0.]];
        let element = Element::new(ElementType::Tria3, vec![0, 1, 2]);
        Part::new(id, name, nodes, vec![element]).unwrap()
    }

    #[test]
    fn lookup_by_id_and_name() {
        let mesh = Mesh::new(vec![
            triangle_part(3, "wall"),
            triangle_part(1, "inlet"),
            triangle_part(2, "wall"),
        ])
        .unwrap();

        assert_eq!(mesh.part(2).unwrap().name(), "wall");
        // name lookups resolve to the first match
        assert_eq!(mesh.part_by_name("wall").unwrap().id(), 3);
        assert_eq!(mesh.position("inlet").unwrap(), 2);

        assert!(matches!(mesh.part(7), Err(Error::PartNotFound { .. })));
        assert!(matches!(
            mesh.part_by_name("outlet"),
            Err(Error::PartNotFound { .. })
        ));
    }

    #[test]
    fn sorted_by_id() {
        let mesh = Mesh::new(vec![
            triangle_part(3, "c"),
            triangle_part(1, "a"),
            triangle_part(2, "b"),
        ])
        .unwrap();

        let names: Vec<&str> = mesh.sorted_by_id().iter().map(|part| part.name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        // file order is untouched
        assert_eq!(mesh.parts()[0].name(), "c");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Mesh::new(vec![triangle_part(1, "a"), triangle_part(1, "b")]).unwrap_err();
        assert!(matches!(err, Error::DuplicatePartId { id: 1 }));
    }

    #[test]
    fn description_defaults() {
        let mesh = Mesh::default();
        assert_eq!(mesh.description()[0], DEFAULT_DESCRIPTION[0]);

        let mesh = mesh.with_description("case", "run 4");
        assert_eq!(mesh.description(), &["case".to_string(), "run 4".to_string()]);
    }
}
