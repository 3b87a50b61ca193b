//! Header row handling: delimiter sniffing and column name normalization.

use std::collections::HashSet;

/// Pick `,` or `;` from the header line.
///
/// Semicolon wins only when it splits the header into more fields than the
/// comma does. Delimiters inside double quotes are ignored.
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let mut commas = 0usize;
    let mut semicolons = 0usize;
    let mut in_quotes = false;
    for ch in header.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => commas += 1,
            ';' if !in_quotes => semicolons += 1,
            _ => {}
        }
    }
    if semicolons > commas { b';' } else { b',' }
}

/// Trim header names, name blank headers by position, and make repeats unique.
///
/// Repeats get a `.N` suffix in order of appearance (`value`, `value.1`).
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers = Vec::new();
    for (idx, name) in raw.into_iter().enumerate() {
        let trimmed = name.as_ref().trim().trim_start_matches('\u{feff}').trim();
        let base = if trimmed.is_empty() {
            format!("column_{}", idx + 1)
        } else {
            trimmed.to_string()
        };
        let mut candidate = base.clone();
        let mut counter = 1;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{base}.{counter}");
            counter += 1;
        }
        headers.push(candidate);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_comma_by_default() {
        assert_eq!(sniff_delimiter("country,year,inflation_rate\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(sniff_delimiter("Date;All Commodity Price Index\n2020;95,5\n"), b';');
    }

    #[test]
    fn test_sniff_ignores_quoted_delimiters() {
        assert_eq!(sniff_delimiter("\"a;b;c\",d\n"), b',');
    }

    #[test]
    fn test_normalize_headers() {
        let headers = normalize_headers(["  country ", "", "value", "value", "\u{feff}x"]);
        assert_eq!(headers, vec!["country", "column_2", "value", "value.1", "x"]);
    }
}
