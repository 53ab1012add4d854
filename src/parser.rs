//! Line-level CSV parsing for route exports.
//!
//! The dialect is fixed: comma separated, double-quote quoting, `""` as an
//! escaped quote inside a quoted segment. Parsing is permissive and never
//! fails; malformed quoting is split by the toggle rule as-is.

/// Splits one CSV line into its fields.
///
/// Always yields at least one field, so an empty line becomes `[""]`.
/// An unterminated quote simply runs to the end of the line.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Returns the index of the first header containing "note", ignoring case.
pub fn note_column_index(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.to_lowercase().contains("note"))
}

/// Trims a raw note value and strips one surrounding pair of double quotes.
pub fn clean_note(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_plain_fields() {
        assert_eq!(parse_line("a,b,c"), fields(&["a", "b", "c"]));
    }

    #[test]
    fn test_parse_empty_line_yields_one_empty_field() {
        assert_eq!(parse_line(""), fields(&[""]));
    }

    #[test]
    fn test_parse_quoted_comma_stays_intact() {
        assert_eq!(parse_line("a,\"b,c\",d"), fields(&["a", "b,c", "d"]));
    }

    #[test]
    fn test_parse_escaped_quote() {
        assert_eq!(parse_line("\"a\"\"b\""), fields(&["a\"b"]));
    }

    #[test]
    fn test_parse_trailing_comma_adds_empty_field() {
        assert_eq!(parse_line("a,b,"), fields(&["a", "b", ""]));
        assert_eq!(parse_line(","), fields(&["", ""]));
    }

    #[test]
    fn test_parse_unterminated_quote_flushes_buffer() {
        assert_eq!(parse_line("a,\"b,c"), fields(&["a", "b,c"]));
    }

    #[test]
    fn test_parse_lone_quote_toggles_mid_field() {
        // The quote toggles state without being kept, so the comma after it is literal
        assert_eq!(parse_line("ab\"c,d"), fields(&["abc,d"]));
    }

    #[test]
    fn test_doubled_quote_outside_quotes_toggles_twice() {
        assert_eq!(parse_line("a\"\"b,c"), fields(&["ab", "c"]));
    }

    #[test]
    fn test_field_count_matches_unquoted_commas() {
        let line = "1,\"x, y\",\"say \"\"hi\"\"\",,end";
        let parsed = parse_line(line);
        assert_eq!(parsed.len(), 5);
        assert_eq!(parsed[1], "x, y");
        assert_eq!(parsed[2], "say \"hi\"");
        assert_eq!(parsed[3], "");
    }

    #[test]
    fn test_parse_keeps_multibyte_text() {
        assert_eq!(parse_line("één,\"café, bar\""), fields(&["één", "café, bar"]));
    }

    #[test]
    fn test_note_column_index_case_insensitive() {
        let headers = parse_line("Stop,Note,Date");
        assert_eq!(note_column_index(&headers), Some(1));

        let headers = parse_line("Stop,Date,DELIVERY NOTES");
        assert_eq!(note_column_index(&headers), Some(2));
    }

    #[test]
    fn test_note_column_index_picks_first_match() {
        let headers = parse_line("Notes A,Note B");
        assert_eq!(note_column_index(&headers), Some(0));
    }

    #[test]
    fn test_note_column_index_missing() {
        let headers = parse_line("Stop,Date,Name");
        assert_eq!(note_column_index(&headers), None);
    }

    #[test]
    fn test_clean_note_strips_one_layer() {
        assert_eq!(clean_note("  \"Not home\" "), "Not home");
        assert_eq!(clean_note("\"\"x\"\""), "\"x\"");
    }

    #[test]
    fn test_clean_note_leaves_unbalanced_quotes() {
        assert_eq!(clean_note("\"open"), "\"open");
        assert_eq!(clean_note("\""), "\"");
        assert_eq!(clean_note("plain"), "plain");
    }

    #[test]
    fn test_clean_note_pair_only_becomes_empty() {
        assert_eq!(clean_note("\"\""), "");
    }
}
