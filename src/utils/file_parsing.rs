#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Splits on `sep` outside of single or double quotes. Fields are trimmed and
/// keep their quotes.
pub fn split_preserving_quotes(line: &str, sep: char) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                if ch == q {
                    in_quotes = None;
                }
                cur.push(ch);
            }
            None => {
                if ch == '"' || ch == '\'' {
                    in_quotes = Some(ch);
                    cur.push(ch);
                } else if ch == sep {
                    out.push(cur.trim().to_string());
                    cur.clear();
                } else {
                    cur.push(ch);
                }
            }
        }
    }
    if !cur.trim().is_empty() || !out.is_empty() {
        out.push(cur.trim().to_string());
    }
    out
}

/// Drops everything from the first `%` that is not inside quotes.
pub fn strip_comment(line: &str) -> &str {
    let mut in_quotes: Option<char> = None;
    for (i, ch) in line.char_indices() {
        match in_quotes {
            Some(q) if ch == q => in_quotes = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => in_quotes = Some(ch),
            None if ch == '%' => return &line[..i],
            None => {}
        }
    }
    line
}

/// Splits off the first whitespace-delimited token, honouring quotes.
/// Returns the token (quotes removed) and the trimmed remainder.
pub fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    let first = s.chars().next()?;
    if first == '\'' || first == '"' {
        let close = s[1..].find(first)? + 1;
        return Some((&s[1..close], s[close + 1..].trim()));
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], s[end..].trim())),
        None => Some((s, "")),
    }
}

/// Parses a braced nominal domain such as `{a, 'b c', d}`.
pub fn parse_nominal_domain(spec: &str) -> Option<Vec<String>> {
    let inner = spec.trim().strip_prefix('{')?.strip_suffix('}')?;
    let values: Vec<String> = split_preserving_quotes(inner, ',')
        .iter()
        .map(|v| strip_surrounding_quotes(v).to_string())
        .collect();
    if values.is_empty() || values.iter().any(String::is_empty) {
        return None;
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_quotes_works() {
        assert_eq!(strip_surrounding_quotes("'a,b'"), "a,b");
        assert_eq!(strip_surrounding_quotes(r#""x""#), "x");
        assert_eq!(strip_surrounding_quotes("nq"), "nq");
    }

    #[test]
    fn split_preserving_quotes_on_commas() {
        let line = r#"'sunny',hot,"a,b",FALSE,no"#;
        let p = split_preserving_quotes(line, ',');
        assert_eq!(p, vec!["'sunny'", "hot", "\"a,b\"", "FALSE", "no"]);
    }

    #[test]
    fn split_of_blank_line_is_empty() {
        assert!(split_preserving_quotes("   ", ',').is_empty());
        assert_eq!(split_preserving_quotes("a,", ','), vec!["a", ""]);
    }

    #[test]
    fn comments_outside_quotes_are_removed() {
        assert_eq!(strip_comment("a,b % trailing"), "a,b ");
        assert_eq!(strip_comment("'50%',b"), "'50%',b");
        assert_eq!(strip_comment("% whole line"), "");
    }

    #[test]
    fn tokens_respect_quotes() {
        assert_eq!(next_token("@attribute x {a}"), Some(("@attribute", "x {a}")));
        assert_eq!(next_token("'tumor size' {a, b}"), Some(("tumor size", "{a, b}")));
        assert_eq!(next_token("single"), Some(("single", "")));
        assert_eq!(next_token("   "), None);
        assert_eq!(next_token("'unterminated"), None);
    }

    #[test]
    fn nominal_domains() {
        assert_eq!(
            parse_nominal_domain("{ yes, 'no way' ,maybe}"),
            Some(vec!["yes".to_string(), "no way".to_string(), "maybe".to_string()])
        );
        assert_eq!(parse_nominal_domain("numeric"), None);
        assert_eq!(parse_nominal_domain("{}"), None);
        assert_eq!(parse_nominal_domain("{a,,b}"), None);
    }
}
