//! String conversion utilities.

/// Trims a string and converts the result to `None` if it is empty.
///
/// Optional form fields arrive as empty or whitespace-only strings when the
/// user leaves them blank.
///
/// # Examples
///
/// ```
/// use ballotbox_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("  hello "), Some("hello"));
/// assert_eq!(none_if_blank(""), None);
/// assert_eq!(none_if_blank("   "), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_blank() {
        assert_eq!(none_if_blank("test"), Some("test"));
        assert_eq!(none_if_blank("\t\n"), None);
    }

    #[test]
    fn test_none_if_blank_trims() {
        assert_eq!(none_if_blank("  padded  "), Some("padded"));
    }
}
