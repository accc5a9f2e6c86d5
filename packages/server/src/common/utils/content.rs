/// Pure utility functions for user-supplied text
///
/// These functions contain NO side effects - they take inputs and return outputs
/// without touching the store.

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// Applied to every free-text field before validation, so length bounds and
/// emptiness checks see the same text that gets stored.
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length in characters, not bytes.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_internal_runs() {
        assert_eq!(
            normalize_whitespace("Main   Street\t\tClinic"),
            "Main Street Clinic"
        );
    }

    #[test]
    fn test_normalize_trims_ends() {
        assert_eq!(normalize_whitespace("  \n Pharmacy  "), "Pharmacy");
    }

    #[test]
    fn test_normalize_whitespace_only_is_empty() {
        assert_eq!(normalize_whitespace(" \t\r\n "), "");
    }

    #[test]
    fn test_char_len_counts_characters() {
        assert_eq!(char_len("Zürich"), 6);
        assert_eq!("Zürich".len(), 7);
    }
}
