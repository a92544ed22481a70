//! scanning a geometry file for part names and ids without reading coordinates

use super::cursor::{split_lines, LineCursor};

use crate::prelude::*;

/// Where a part sits in a geometry file.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct PartEntry {
    /// 1-based position of the part in the file
    pub position: usize,
    pub id: usize,
    pub name: String,
}

/// List every part of a geometry file in file order.
///
/// Only the `part` lines and the two lines after each are looked at, so a large
/// file can be indexed without parsing any node or element data.
pub fn index_parts<P: AsRef<Path>>(path: P) -> Result<Vec<PartEntry>, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(scan_parts(&text)?)
}

/// names of every part, in file order
pub fn part_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Error> {
    Ok(index_parts(path)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// ids of every part, in file order
pub fn part_ids<P: AsRef<Path>>(path: P) -> Result<Vec<usize>, Error> {
    Ok(index_parts(path)?.into_iter().map(|entry| entry.id).collect())
}

/// 1-based position of the first part called `name`
pub fn part_position<P: AsRef<Path>>(path: P, name: &str) -> Result<usize, Error> {
    index_parts(path)?
        .into_iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.position)
        .ok_or_else(|| Error::PartNotFound {
            query: format!("name {name}"),
        })
}

pub(crate) fn scan_parts(text: &str) -> Result<Vec<PartEntry>, ParseError> {
    let lines = split_lines(text);
    let mut cursor = LineCursor::new(&lines);

    cursor.next_line("description line")?;
    cursor.next_line("description line")?;

    let mut entries = Vec::new();

    while cursor.skip_to_keyword("part") {
        cursor.advance();
        let id: usize = cursor.next_value("part id")?;
        let name = cursor.next_line("part name")?;

        entries.push(PartEntry::new(entries.len() + 1, id, name.to_string()));
    }

    Ok(entries)
}
