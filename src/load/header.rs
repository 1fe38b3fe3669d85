use std::collections::HashMap;

/// Turn the raw header cells into usable column names.
///
/// - a blank cell at index `i` becomes `Unnamed: i`
/// - repeated names get `.1`, `.2`, ... appended in file order, skipping any
///   suffix that would collide with a name already taken
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let named: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let cell = cell.as_ref();
            if cell.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                cell.to_string()
            }
        })
        .collect();

    let mut seen: HashMap<String, usize> = HashMap::with_capacity(named.len());
    let mut out = Vec::with_capacity(named.len());
    for name in named {
        let mut count = seen.get(&name).copied().unwrap_or(0);
        if count == 0 {
            seen.insert(name.clone(), 1);
            out.push(name);
            continue;
        }
        let renamed = loop {
            let candidate = format!("{}.{}", name, count);
            count += 1;
            if !seen.contains_key(&candidate) {
                break candidate;
            }
        };
        seen.insert(name, count);
        seen.insert(renamed.clone(), 1);
        out.push(renamed);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_untouched() {
        assert_eq!(normalize_headers(["a", "b", "c"]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_blank_cells_named_by_index() {
        assert_eq!(
            normalize_headers(["", "b", " "]),
            vec!["Unnamed: 0", "b", "Unnamed: 2"]
        );
    }

    #[test]
    fn test_duplicates_suffixed() {
        assert_eq!(
            normalize_headers(["a", "a", "b", "a"]),
            vec!["a", "a.1", "b", "a.2"]
        );
    }

    #[test]
    fn test_suffix_collision_skipped() {
        assert_eq!(
            normalize_headers(["a", "a.1", "a"]),
            vec!["a", "a.1", "a.2"]
        );
    }
}
