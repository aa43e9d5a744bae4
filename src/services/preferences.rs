/// Split a buyer's raw preference string into normalized waste types.
///
/// Entries are comma separated, trimmed and lower-cased; empty entries are
/// dropped. Stored values are never rewritten, so this runs on every read.
pub fn parse_preferences(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(|entry| entry.trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_blank_mean_no_preferences() {
        assert!(parse_preferences(None).is_empty());
        assert!(parse_preferences(Some("")).is_empty());
        assert!(parse_preferences(Some(" , ,")).is_empty());
    }

    #[test]
    fn test_entries_are_trimmed_and_lowercased() {
        assert_eq!(
            parse_preferences(Some(" Metal,PLASTIC , glass,")),
            vec!["metal", "plastic", "glass"]
        );
    }
}
