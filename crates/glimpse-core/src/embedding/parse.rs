//! Line parser for embedding tables.

/// Outcome of parsing one line.
#[derive(Debug, PartialEq)]
pub(crate) enum ParsedLine {
    /// Blank or whitespace-led line; nothing was appended
    Skipped,
    /// A term whose components were appended to the output buffer
    Entry { term: String },
}

/// Parse `term v1 v2 ... vN`, appending the components to `out`.
///
/// Returns an error message if a component is not a finite number or the
/// term has no components at all. On error `out` may hold a partial row.
pub(crate) fn parse_line(line: &str, out: &mut Vec<f32>) -> Result<ParsedLine, String> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    match line.chars().next() {
        None => return Ok(ParsedLine::Skipped),
        Some(c) if c.is_whitespace() => return Ok(ParsedLine::Skipped),
        Some(_) => {}
    }

    let mut fields = line.split_whitespace();
    let term = match fields.next() {
        Some(t) => t,
        None => return Ok(ParsedLine::Skipped),
    };

    let mut count = 0usize;
    for (i, field) in fields.enumerate() {
        let value: f32 = field
            .parse()
            .map_err(|_| format!("invalid number '{}' (field {})", field, i + 2))?;
        if !value.is_finite() {
            return Err(format!("non-finite value '{}' (field {})", field, i + 2));
        }
        out.push(value);
        count += 1;
    }

    if count == 0 {
        return Err(format!("term '{}' has no vector components", term));
    }

    Ok(ParsedLine::Entry {
        term: term.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry() {
        let mut out = Vec::new();
        let parsed = parse_line("beach 0.5 -1.25e-2 3\n", &mut out).unwrap();
        assert_eq!(
            parsed,
            ParsedLine::Entry {
                term: "beach".to_string()
            }
        );
        assert_eq!(out, vec![0.5, -0.0125, 3.0]);
    }

    #[test]
    fn test_parse_collapses_repeated_spaces() {
        let mut out = Vec::new();
        parse_line("cat  1   2 ", &mut out).unwrap();
        assert_eq!(out, vec![1.0, 2.0]);
    }

    #[test]
    fn test_parse_skips_leading_whitespace() {
        let mut out = Vec::new();
        assert_eq!(parse_line(" cat 1 2", &mut out).unwrap(), ParsedLine::Skipped);
        assert_eq!(parse_line("\n", &mut out).unwrap(), ParsedLine::Skipped);
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_punctuation_terms() {
        let mut out = Vec::new();
        let parsed = parse_line(", 0.1 0.2", &mut out).unwrap();
        assert_eq!(
            parsed,
            ParsedLine::Entry {
                term: ",".to_string()
            }
        );
    }

    #[test]
    fn test_parse_reports_field_position() {
        let mut out = Vec::new();
        let err = parse_line("cat 1 two", &mut out).unwrap_err();
        assert!(err.contains("'two'"));
        assert!(err.contains("field 3"));
    }
}
