use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// A markdown bullet whose text opens with bold emphasis: `- **Fast** lookups`
static BOLD_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-*]\s+\*\*([^*]+)\*\*").expect("bold bullet pattern is valid")
});

/// Collect feature names from a README preview followed by manifest keywords.
///
/// Duplicates are dropped, keeping the first occurrence.
pub fn extract_features(readme_preview: &str, keywords: &[String]) -> Vec<String> {
    let from_readme = readme_preview
        .lines()
        .filter_map(|line| BOLD_BULLET.captures(line.trim()))
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());

    let mut seen = HashSet::new();
    from_readme
        .chain(keywords.iter().cloned())
        .filter(|feature| seen.insert(feature.clone()))
        .collect()
}

/// Decode a README prefix as text.
///
/// A multi-byte character cut off by the byte limit is dropped; any other
/// invalid byte becomes U+FFFD so the rest of the preview survives.
pub fn preview_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(trim_partial_char(bytes)).into_owned()
}

fn trim_partial_char(bytes: &[u8]) -> &[u8] {
    let tail = bytes.len().saturating_sub(3);
    for index in (tail..bytes.len()).rev() {
        let byte = bytes[index];
        // continuation byte: keep looking for the lead byte
        if byte & 0b1100_0000 == 0b1000_0000 {
            continue;
        }
        let width = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        return if index + width > bytes.len() {
            &bytes[..index]
        } else {
            bytes
        };
    }
    bytes
}
