use ensight::ndarray::array;
use ensight::{Element, ElementType, Error, Mesh, Part, PartEntry};

fn written_mesh(dir: &std::path::Path) -> std::path::PathBuf {
    let nodes = array![[0., 0., 0.], [1., 0., 0.], [0., 1., 0.]];
    let triangle = || vec![Element::new(ElementType::Tria3, vec![0, 1, 2])];

    let mesh = Mesh::new(vec![
        Part::new(8, "outlet", nodes.clone(), triangle()).unwrap(),
        Part::new(3, "inlet", nodes.clone(), triangle()).unwrap(),
        Part::new(5, "wall", nodes, triangle()).unwrap(),
    ])
    .unwrap();

    let path = dir.join("index.geo");
    ensight::write_geometry(&path, &mesh).unwrap();
    path
}

#[test]
fn index_follows_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = written_mesh(dir.path());

    let entries = ensight::index_parts(&path).unwrap();
    assert_eq!(
        entries,
        vec![
            PartEntry::new(1, 3, "inlet".into()),
            PartEntry::new(2, 5, "wall".into()),
            PartEntry::new(3, 8, "outlet".into()),
        ]
    );

    assert_eq!(ensight::part_ids(&path).unwrap(), vec![3, 5, 8]);
    assert_eq!(ensight::part_position(&path, "outlet").unwrap(), 3);
}

#[test]
fn unknown_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = written_mesh(dir.path());

    assert!(matches!(
        ensight::part_position(&path, "symmetry"),
        Err(Error::PartNotFound { .. })
    ));
}

#[test]
fn read_single_part() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two.geo");
    std::fs::write(
        &path,
        "two parts\n\nnode id assign\nelement id assign\n\
         part\n1\nfirst\ncoordinates\n3\n0\n1\n0\n0\n0\n1\n0\n0\n0\ntria3\n1\n1 2 3\n\
         part\n2\nsecond\ncoordinates\n3\n0\n2\n0\n0\n0\n2\n0\n0\n0\ntria3\n1\n3 2 1\n",
    )
    .unwrap();

    let part = ensight::read_part(&path, "second").unwrap();
    assert_eq!(part.id(), 2);
    assert_eq!(part.elements(), &[Element::Polygon(vec![2, 1, 0])]);
    assert_eq!(part.nodes()[[1, 0]], 2.0);
}
