/// Marker the source appends to teams that reached the postseason.
pub const QUALIFIER_MARKER: char = '*';

/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Canonical form of a team cell: cleaned, qualifier marker removed.
pub fn clean_team(raw: &str) -> String {
    clean_str(raw).replace(QUALIFIER_MARKER, "").trim().to_string()
}

/// True for rows with nothing but empty cells.
pub fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// Parse a whole-number cell. The scraper writes integer columns that once held a
/// NaN as floats (`82.0`), so those are accepted when the fraction is zero.
pub fn parse_count(raw: &str) -> Option<u32> {
    let s = clean_str(raw);
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    let f = s.parse::<f64>().ok()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then(|| f as u32)
}

/// Parse a numeric cell; `None` for empty, `nan` or otherwise unparseable text.
pub fn parse_number(raw: &str) -> Option<f64> {
    clean_str(raw).parse::<f64>().ok().filter(|f| f.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_quotes_and_whitespace() {
        assert_eq!(clean_str("  \"Boston Celtics\" "), "Boston Celtics");
        assert_eq!(clean_str("\""), "\"");
    }

    #[test]
    fn strips_qualifier_marker_anywhere() {
        assert_eq!(clean_team("Miami Heat*"), "Miami Heat");
        assert_eq!(clean_team(" *Utah Jazz "), "Utah Jazz");
        assert_eq!(clean_team("Detroit Pistons"), "Detroit Pistons");
    }

    #[test]
    fn parses_counts_and_numbers() {
        assert_eq!(parse_count("82"), Some(82));
        assert_eq!(parse_count("82.0"), Some(82));
        assert_eq!(parse_count("81.5"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_number(".357"), Some(0.357));
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number(""), None);
    }
}
