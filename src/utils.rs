/// space-join 0-based node indices as the 1-based indices written to disk
pub(crate) fn one_based_line(indices: &[usize]) -> String {
    let mut line = String::with_capacity(indices.len() * 4);

    for (i, index) in indices.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&(index + 1).to_string());
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_one_based() {
        assert_eq!(one_based_line(&[0, 4, 9]), "1 5 10");
        assert_eq!(one_based_line(&[]), "");
    }
}
