use crate::prelude::*;

use std::collections::BTreeMap;

/// One element-type sub-block of a part, as it appeared in the geometry file.
///
/// Variable files list their values in the same sub-blocks, so the layout is
/// kept to check field alignment after the elements have been normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct ElementBlock {
    pub kind: ElementType,
    pub count: usize,
}

/// A named sub-mesh with its own nodes, elements and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    id: usize,
    name: String,
    nodes: Array2<f64>,
    dimension: Dimension,
    elements: Vec<Element>,
    blocks: Vec<ElementBlock>,
    element_fields: BTreeMap<String, Field>,
    node_fields: BTreeMap<String, Field>,
}

impl Part {
    /// Build a part from node coordinates of shape `(node_count, 3)` and a list
    /// of elements using 0-based node indices.
    ///
    /// The elements are normalized to polygons or polyhedra. The element block
    /// layout is taken from consecutive runs of the same element type.
    pub fn new<N: Into<String>>(
        id: usize,
        name: N,
        nodes: Array2<f64>,
        elements: Vec<Element>,
    ) -> Result<Self, Error> {
        let blocks = block_layout(&elements);
        Self::with_blocks(id, name.into(), nodes, &elements, blocks)
    }

    pub(crate) fn with_blocks(
        id: usize,
        name: String,
        nodes: Array2<f64>,
        elements: &[Element],
        blocks: Vec<ElementBlock>,
    ) -> Result<Self, Error> {
        if id == 0 {
            return Err(Error::InvalidPartId { id });
        }

        // the name is written back as a single line and read back trimmed
        if name.contains(['\n', '\r']) || name.trim() != name {
            return Err(Error::InvalidPartName { name });
        }

        if nodes.ncols() != 3 {
            return Err(Error::CoordinateShape {
                columns: nodes.ncols(),
            });
        }

        if elements.is_empty() {
            return Err(Error::EmptyPart { part: id });
        }

        let node_count = nodes.nrows();
        for (element_index, element) in elements.iter().enumerate() {
            if let Some(index) = element.node_indices().find(|&index| index >= node_count) {
                return Err(Error::NodeIndexOutOfRange {
                    part: id,
                    element: element_index,
                    index,
                    node_count,
                });
            }
        }

        let (dimension, elements) = normalize::normalize_batch(elements)?;

        Ok(Self {
            id,
            name,
            nodes,
            dimension,
            elements,
            blocks,
            element_fields: BTreeMap::new(),
            node_fields: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// node coordinates, one `[x, y, z]` row per node
    pub fn nodes(&self) -> &Array2<f64> {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.nrows()
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// `Surface` for parts made of polygons, `Volume` for parts made of polyhedra
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// the normalized elements of this part
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn blocks(&self) -> &[ElementBlock] {
        &self.blocks
    }

    /// vertex loops of every polygon element
    pub fn polygons(&self) -> impl Iterator<Item = &[usize]> {
        self.elements.iter().filter_map(|element| match element {
            Element::Polygon(nodes) => Some(nodes.as_slice()),
            _ => None,
        })
    }

    /// face lists of every polyhedron element
    pub fn polyhedra(&self) -> impl Iterator<Item = &[Vec<usize>]> {
        self.elements.iter().filter_map(|element| match element {
            Element::Polyhedron(faces) => Some(faces.as_slice()),
            _ => None,
        })
    }

    /// number of vertices of each polygon, empty for volume parts
    pub fn vertex_counts(&self) -> Vec<usize> {
        self.elements
            .iter()
            .filter_map(Element::vertex_count)
            .collect()
    }

    /// number of faces of each polyhedron, empty for surface parts
    pub fn face_counts(&self) -> Vec<usize> {
        self.elements.iter().filter_map(Element::face_count).collect()
    }

    /// number of entries a field at `locus` must have on this part
    pub fn expected_entries(&self, locus: FieldLocus) -> usize {
        match locus {
            FieldLocus::Element => self.num_elements(),
            FieldLocus::Node => self.num_nodes(),
        }
    }

    /// Attach a field, replacing any field of the same name and locus.
    ///
    /// Returns the replaced field, if there was one.
    pub fn set_field(&mut self, field: Field) -> Result<Option<Field>, Error> {
        let expected = self.expected_entries(field.locus());
        let components = field.kind().components();
        let data = field.data();

        if data.length() != expected || data.array_components() != components {
            return Err(Error::FieldLengthMismatch {
                part: self.id,
                field: field.name().to_string(),
                expected: expected * components,
                actual: data.length() * data.array_components(),
            });
        }

        let fields = match field.locus() {
            FieldLocus::Element => &mut self.element_fields,
            FieldLocus::Node => &mut self.node_fields,
        };

        Ok(fields.insert(field.name().to_string(), field))
    }

    pub fn field(&self, name: &str, locus: FieldLocus) -> Option<&Field> {
        match locus {
            FieldLocus::Element => self.element_fields.get(name),
            FieldLocus::Node => self.node_fields.get(name),
        }
    }

    pub fn element_field(&self, name: &str) -> Option<&Field> {
        self.element_fields.get(name)
    }

    pub fn node_field(&self, name: &str) -> Option<&Field> {
        self.node_fields.get(name)
    }

    /// every field attached at `locus`, ordered by name
    pub fn fields(&self, locus: FieldLocus) -> impl Iterator<Item = &Field> {
        match locus {
            FieldLocus::Element => self.element_fields.values(),
            FieldLocus::Node => self.node_fields.values(),
        }
    }

    /// read this part's section of a variable file and attach it
    pub fn load_field<P: AsRef<Path>>(
        &mut self,
        path: P,
        name: &str,
        kind: FieldKind,
        locus: FieldLocus,
    ) -> Result<(), Error> {
        let field = parse::read_field(path, self, name, kind, locus)?;
        self.set_field(field)?;
        Ok(())
    }
}

/// collapse consecutive elements of the same type into blocks
fn block_layout(elements: &[Element]) -> Vec<ElementBlock> {
    let mut blocks: Vec<ElementBlock> = Vec::new();

    for element in elements {
        match blocks.last_mut() {
            Some(block) if block.kind == element.kind() => block.count += 1,
            _ => blocks.push(ElementBlock::new(element.kind(), 1)),
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn square_nodes() -> Array2<f64> {
        array![
            [0., 0., 0.],
            [1., 0., 0.],
            [1., 1., 0.],
            [0., 1., 0.],
        ]
    }

    fn mixed_surface() -> Part {
        let elements = vec![
            Element::new(ElementType::Tria3, vec![0, 1, 2]),
            Element::new(ElementType::Tria3, vec![0, 2, 3]),
            Element::new(ElementType::Quad4, vec![0, 1, 2, 3]),
        ];
        Part::new(4, "lid", square_nodes(), elements).unwrap()
    }

    #[test]
    fn elements_are_normalized() {
        let part = mixed_surface();

        assert_eq!(part.dimension(), Dimension::Surface);
        assert!(part.elements().iter().all(Element::is_normalized));
        assert_eq!(part.vertex_counts(), vec![3, 3, 4]);
        assert!(part.face_counts().is_empty());
        assert_eq!(
            part.blocks(),
            &[
                ElementBlock::new(ElementType::Tria3, 2),
                ElementBlock::new(ElementType::Quad4, 1)
            ]
        );
    }

    #[test]
    fn node_index_out_of_range() {
        let elements = vec![
            Element::new(ElementType::Tria3, vec![0, 1, 2]),
            Element::new(ElementType::Tria3, vec![0, 2, 4]),
        ];
        let err = Part::new(1, "bad", square_nodes(), elements).unwrap_err();

        assert!(matches!(
            err,
            Error::NodeIndexOutOfRange {
                part: 1,
                element: 1,
                index: 4,
                node_count: 4
            }
        ));
    }

    #[test]
    fn invalid_parts() {
        let element = || vec![Element::new(ElementType::Tria3, vec![0, 1, 2])];

        assert!(matches!(
            Part::new(0, "zero", square_nodes(), element()),
            Err(Error::InvalidPartId { id: 0 })
        ));
        assert!(matches!(
            Part::new(1, "flat", Array2::zeros((4, 2)), element()),
            Err(Error::CoordinateShape { columns: 2 })
        ));
        assert!(matches!(
            Part::new(1, "empty", square_nodes(), Vec::new()),
            Err(Error::EmptyPart { part: 1 })
        ));

        for name in ["two\nlines", "carriage\r", " padded", "padded\t"] {
            assert!(matches!(
                Part::new(1, name, square_nodes(), element()),
                Err(Error::InvalidPartName { .. })
            ));
        }
        assert!(Part::new(1, "inner space", square_nodes(), element()).is_ok());
    }

    #[test]
    fn field_lengths_checked() {
        let mut part = mixed_surface();

        let pressure = Field::new("p", FieldLocus::Element, Scalar::from(vec![1., 2., 3.]));
        assert!(part.set_field(pressure).unwrap().is_none());

        let short = Field::new("p", FieldLocus::Element, Scalar::from(vec![1., 2.]));
        let err = part.set_field(short).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldLengthMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));

        // node-wise fields follow the node count
        let velocity = Vector::from_rows(&[[0., 0., 1.]; 4]);
        part.set_field(Field::new("u", FieldLocus::Node, velocity))
            .unwrap();
        assert_eq!(part.node_field("u").unwrap().kind(), FieldKind::Vector);
        assert!(part.element_field("u").is_none());

        // replacing by name returns the previous field
        let replaced = part
            .set_field(Field::new("p", FieldLocus::Element, Scalar::from(vec![4., 5., 6.])))
            .unwrap()
            .unwrap();
        assert_eq!(replaced.data().as_scalar().unwrap().to_vec(), vec![1., 2., 3.]);
    }
}
