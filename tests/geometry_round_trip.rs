use approx::assert_relative_eq;
use ensight::ndarray::{array, Array2};
use ensight::{Dimension, Element, ElementType, Encoding, Error, Mesh, Part};

const TWO_PARTS: &str = "\
two part geometry
used for round trips
node id assign
element id assign
part
1
A
coordinates
3
0.0
1.0
0.0
0.0
0.0
1.0
0.0
0.0
0.0
tria3
1
1 2 3
part
2
B
coordinates
4
0.0
1.0
1.0
0.0
0.0
0.0
1.0
1.0
0.5
0.5
0.5
0.5
quad4
1
1 2 3 4
";

fn assert_same_geometry(left: &Mesh, right: &Mesh) {
    assert_eq!(left.len(), right.len());

    for (a, b) in left.parts().iter().zip(right.parts()) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.name(), b.name());
        assert_eq!(a.num_nodes(), b.num_nodes());
        assert_eq!(a.dimension(), b.dimension());
        assert_eq!(a.elements(), b.elements());

        for (x, y) in a.nodes().iter().zip(b.nodes().iter()) {
            assert_relative_eq!(*x, *y);
        }
    }
}

/// a mesh with one surface part and one volume part holding every solid type
fn in_memory_mesh() -> Mesh {
    let surface = Part::new(
        3,
        "skin",
        array![
            [0.1, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0 / 3.0],
        ],
        vec![
            Element::new(ElementType::Quad4, vec![0, 1, 2, 3]),
            Element::new(ElementType::Tria3, vec![0, 2, 3]),
        ],
    )
    .unwrap();

    let nodes = Array2::from_shape_fn((8, 3), |(node, axis)| {
        ((node >> axis) & 1) as f64 * 0.25 + 1e-9 * node as f64
    });
    let solid = Part::new(
        1,
        "core",
        nodes,
        vec![
            Element::new(ElementType::Hexa8, vec![0, 1, 3, 2, 4, 5, 7, 6]),
            Element::new(ElementType::Tetra4, vec![0, 1, 2, 4]),
            Element::new(ElementType::Pyramid5, vec![0, 1, 3, 2, 4]),
            Element::new(ElementType::Penta6, vec![0, 1, 2, 4, 5, 6]),
        ],
    )
    .unwrap();

    Mesh::new(vec![surface, solid])
        .unwrap()
        .with_description("in memory", "mixed parts")
}

#[test]
fn write_read_write_read() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.geo");
    let second = dir.path().join("second.geo");

    let mesh = in_memory_mesh();
    ensight::write_geometry(&first, &mesh).unwrap();
    let once = ensight::read_normalized_geometry(&first).unwrap();
    ensight::write_geometry(&second, &once).unwrap();
    let twice = ensight::read_normalized_geometry(&second).unwrap();

    // written in ascending id order
    assert_eq!(once.parts()[0].name(), "core");
    assert_eq!(once.description()[1], "mixed parts");

    let sorted = Mesh::new(mesh.sorted_by_id().into_iter().cloned().collect()).unwrap();
    assert_same_geometry(&sorted, &once);
    assert_same_geometry(&once, &twice);
}

#[test]
fn written_geometry_needs_normalized_reader() {
    let mesh = in_memory_mesh();
    let mut buffer = Vec::new();
    ensight::write_geometry_to(&mut buffer, &mesh).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert!(text.contains("\nnfaced\n"));
    assert!(text.contains("\nnsided\n"));

    assert!(matches!(
        ensight::parse_geometry(&text),
        Err(Error::UnsupportedElementType { ref name }) if name == "nfaced"
    ));
    assert_eq!(ensight::parse_normalized_geometry(&text).unwrap().len(), 2);
}

#[test]
fn two_part_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.geo");
    let output = dir.path().join("output.geo");
    std::fs::write(&input, TWO_PARTS).unwrap();

    let mesh = ensight::read_geometry(&input).unwrap();
    ensight::write_geometry(&output, &mesh).unwrap();
    let again = ensight::read_normalized_geometry(&output).unwrap();

    assert_same_geometry(&mesh, &again);

    let a = again.part_by_name("A").unwrap();
    assert_eq!(a.num_nodes(), 3);
    assert_eq!(a.elements(), &[Element::Polygon(vec![0, 1, 2])]);

    let b = again.part_by_name("B").unwrap();
    assert_eq!(b.num_nodes(), 4);
    assert_eq!(b.elements(), &[Element::Polygon(vec![0, 1, 2, 3])]);
    assert_relative_eq!(b.nodes()[[2, 2]], 0.5);
}

#[test]
fn nsided_input_rejected_before_any_part() {
    let text = TWO_PARTS.replace("quad4\n1\n1 2 3 4\n", "nsided\n1\n4\n1 2 3 4\n");

    let err = ensight::parse_geometry(&text).unwrap_err();
    assert!(matches!(err, Error::UnsupportedElementType { ref name } if name == "nsided"));
}

#[test]
fn single_volume_part_at_end_of_file() {
    let mut text = String::from("solo\n\nnode id assign\nelement id assign\npart\n1\nbrick\ncoordinates\n8\n");
    for axis in 0..3 {
        for node in 0..8 {
            text.push_str(&format!("{}\n", (node >> axis) & 1));
        }
    }
    text.push_str("hexa8\n1\n1 2 4 3 5 6 8 7");

    let mesh = ensight::read_geometry_from(text.as_bytes()).unwrap();
    let part = mesh.part(1).unwrap();

    assert_eq!(part.dimension(), Dimension::Volume);
    assert_eq!(part.face_counts(), vec![6]);
}

#[test]
fn binary_geometry_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.geo");
    std::fs::write(&path, TWO_PARTS).unwrap();

    assert!(matches!(
        ensight::read_geometry_with(&path, Encoding::Binary),
        Err(Error::UnsupportedEncoding { .. })
    ));
    assert!(ensight::read_geometry_with(&path, Encoding::Ascii).is_ok());
}
