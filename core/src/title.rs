//! Sub-area detection from map window titles
//!
//! The map window appends the name of a pocket area in parentheses, e.g.
//! `Northern Thanalan (The Footfalls)`. Japanese clients use full-width
//! brackets: `北方ザナラーン（モードゥナ）`.

/// Bracket pairs in the order they are tried
const BRACKETS: [(char, char); 2] = [('（', '）'), ('(', ')')];

/// Extract the label inside the last bracket pair of a map title.
///
/// Full-width brackets win over ASCII ones. Returns `None` when no
/// well-formed pair exists. An empty pair yields `Some("")`.
pub fn extract_sub_area(title: &str) -> Option<&str> {
    BRACKETS
        .iter()
        .find_map(|&(open, close)| enclosed(title, open, close))
}

fn enclosed(title: &str, open: char, close: char) -> Option<&str> {
    let start = title.rfind(open)?;
    let end = title.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(title[start + open.len_utf8()..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_brackets() {
        assert_eq!(
            extract_sub_area("Northern Thanalan (The Footfalls)"),
            Some("The Footfalls")
        );
    }

    #[test]
    fn test_full_width_brackets() {
        assert_eq!(
            extract_sub_area("北方ザナラーン（モードゥナ）"),
            Some("モードゥナ")
        );
    }

    #[test]
    fn test_no_brackets() {
        assert_eq!(extract_sub_area("Limsa Lominsa"), None);
        assert_eq!(extract_sub_area(""), None);
    }

    #[test]
    fn test_unmatched_brackets() {
        assert_eq!(extract_sub_area("(unterminated"), None);
        assert_eq!(extract_sub_area("closed only)"), None);
        assert_eq!(extract_sub_area("backwards ) ("), None);
    }

    #[test]
    fn test_last_pair_wins_and_label_is_trimmed() {
        assert_eq!(extract_sub_area("A (first) B (  second  )"), Some("second"));
        assert_eq!(extract_sub_area("東ラノシア（　ブロンズレイク　）"), Some("ブロンズレイク"));
    }

    #[test]
    fn test_full_width_preferred_over_ascii() {
        assert_eq!(extract_sub_area("Zone（Inner）(Outer)"), Some("Inner"));
    }

    #[test]
    fn test_broken_full_width_falls_back_to_ascii() {
        assert_eq!(extract_sub_area("Zone）（ (Outer)"), Some("Outer"));
    }

    #[test]
    fn test_empty_pair_is_present_but_empty() {
        assert_eq!(extract_sub_area("Zone ()"), Some(""));
    }
}
