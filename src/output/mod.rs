// Output formatting: terminal display of rankings, taxonomy and batch results.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Descriptions are full of umlauts and ß, so this counts characters rather
/// than slicing bytes.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("Straßenbahn", 6), "Straße...");
        assert_eq!(truncate_chars("Mühle", 5), "Mühle");
    }
}
