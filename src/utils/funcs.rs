/// Canonical catalog key: surrounding whitespace dropped, lowercased.
pub fn normalize_product(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parses the yes/no style flags found in training sources.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_padding() {
        assert_eq!(normalize_product("  Water Bottle "), "water bottle");
        assert_eq!(normalize_product("   "), "");
    }

    #[test]
    fn parses_flags() {
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
