use std::io::{self, BufRead};

/// Delimiters tried when none is given, in preference order.
pub const CANDIDATES: [u8; 6] = [b',', b'\t', b';', b'|', b':', b' '];

/// Lines sampled from the top of the file.
const SAMPLE_LINES: usize = 20;

/// Guess the field delimiter from the first lines of `reader`.
///
/// A candidate wins if every sampled line carries the same non-zero number of
/// it outside quotes. Otherwise the candidate seen most often on the header
/// line wins, and a file with no candidate at all is read as one column of
/// `,`-separated values. Returns `None` when there is no non-blank line.
pub fn sniff_delimiter<R: BufRead>(reader: R) -> io::Result<Option<u8>> {
    let mut sample: Vec<Vec<u8>> = Vec::with_capacity(SAMPLE_LINES);
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }
        sample.push(line);
        if sample.len() == SAMPLE_LINES {
            break;
        }
    }

    if sample.is_empty() {
        return Ok(None);
    }

    let counts: Vec<Vec<usize>> = CANDIDATES
        .iter()
        .map(|&delim| {
            sample
                .iter()
                .map(|line| count_outside_quotes(line, delim))
                .collect()
        })
        .collect();

    for (delim, per_line) in CANDIDATES.iter().zip(&counts) {
        let first = per_line[0];
        if first > 0 && per_line.iter().all(|&n| n == first) {
            return Ok(Some(*delim));
        }
    }

    let mut best = (b',', 0);
    for (delim, per_line) in CANDIDATES.iter().zip(&counts) {
        if per_line[0] > best.1 {
            best = (*delim, per_line[0]);
        }
    }
    Ok(Some(best.0))
}

fn count_outside_quotes(line: &[u8], delim: u8) -> usize {
    let mut quoted = false;
    let mut n = 0;
    for &b in line {
        if b == b'"' {
            quoted = !quoted;
        } else if b == delim && !quoted {
            n += 1;
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sniff(text: &str) -> Option<u8> {
        sniff_delimiter(Cursor::new(text.as_bytes())).unwrap()
    }

    #[test]
    fn test_common_delimiters() {
        assert_eq!(sniff("a,b\n1,2\n3,4\n"), Some(b','));
        assert_eq!(sniff("a;b;c\n1;2;3\n"), Some(b';'));
        assert_eq!(sniff("a\tb\r\n1\t2\r\n"), Some(b'\t'));
        assert_eq!(sniff("a|b\n1|2\n"), Some(b'|'));
    }

    #[test]
    fn test_consistency_beats_frequency() {
        // commas appear inside unquoted text, semicolons are the real grid
        let text = "name;note\nx;a,b,c\ny;d\n";
        assert_eq!(sniff(text), Some(b';'));
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        let text = "a;b\n\"1,5\";2\n\"3,25,1\";4\n";
        assert_eq!(sniff(text), Some(b';'));
    }

    #[test]
    fn test_header_frequency_fallback() {
        // ragged sample: no candidate is consistent, header has most ';'
        let text = "a;b;c\n1;2\n";
        assert_eq!(sniff(text), Some(b';'));
    }

    #[test]
    fn test_single_column_defaults_to_comma() {
        assert_eq!(sniff("value\n1\n2\n"), Some(b','));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sniff(""), None);
        assert_eq!(sniff("\n\r\n\n"), None);
    }
}
