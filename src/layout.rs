// 📐 Layout Engine - two-column ledger over plain text
//
// Lines may carry style tokens, so every width is measured with
// `markup::visible_width` while the original text is what gets emitted.
// Title lines (leading glyph from TITLE_MARKERS) do not count toward the
// left column width and are joined without the separator glyph.

use crate::markup::{pad_visible, strip_markup, visible_width};

/// The left column is never narrower than this.
pub const MIN_LEFT_WIDTH: usize = 30;

pub const COLUMN_SEPARATOR: &str = " │ ";

/// Gap used instead of the separator when a row involves a title line.
pub const TITLE_GAP: &str = "   ";

/// Extra indent past the left column for rows that only have a right line.
pub const RIGHT_ONLY_GAP: usize = 2;

/// Leading glyphs that mark a title line. Closed set.
pub const TITLE_MARKERS: &[&str] = &["📊", "🛡", "🎯", "✨", "⚔", "💍", "🪖", "🗡", "💰"];

pub fn is_title_line(line: &str) -> bool {
    let stripped = strip_markup(line);
    let visible = stripped.trim_start();
    TITLE_MARKERS.iter().any(|marker| visible.starts_with(marker))
}

/// Widest non-title left line, floored at [`MIN_LEFT_WIDTH`].
pub fn left_column_width<S: AsRef<str>>(left: &[S]) -> usize {
    left.iter()
        .map(AsRef::as_ref)
        .filter(|line| !is_title_line(line))
        .map(visible_width)
        .max()
        .unwrap_or(0)
        .max(MIN_LEFT_WIDTH)
}

fn indent(width: usize) -> String {
    " ".repeat(width)
}

/// Merge two columns row by row.
///
/// Every input line appears exactly once, in its column's order. Rows with
/// only a right line are indented past the left column by [`RIGHT_ONLY_GAP`].
pub fn merge_columns<L: AsRef<str>, R: AsRef<str>>(left: &[L], right: &[R]) -> Vec<String> {
    let width = left_column_width(left);
    let rows = left.len().max(right.len());
    let mut merged = Vec::with_capacity(rows);

    for i in 0..rows {
        let l = left.get(i).map(AsRef::as_ref);
        let r = right.get(i).map(AsRef::as_ref);

        let line = match (l, r) {
            (Some(l), Some(r)) if !is_title_line(l) && !is_title_line(r) => {
                format!("{}{}{}", pad_visible(l, width), COLUMN_SEPARATOR, r)
            }
            (Some(l), Some(r)) => format!("{}{}{}", pad_visible(l, width), TITLE_GAP, r),
            (Some(l), None) => l.to_string(),
            (None, Some(r)) => format!("{}{}", indent(width + RIGHT_ONLY_GAP), r),
            (None, None) => unreachable!("row index is below the longer column's length"),
        };
        merged.push(line);
    }

    merged
}

/// Render paired cells as aligned rows (jewelry layout).
///
/// Unlike [`merge_columns`] the left width is taken from these cells only,
/// with no minimum, so each paired table is normalized on its own.
pub fn pair_rows(rows: &[(Option<String>, Option<String>)]) -> Vec<String> {
    let width = rows
        .iter()
        .filter_map(|(left, _)| left.as_deref())
        .map(visible_width)
        .max()
        .unwrap_or(0);

    rows.iter()
        .filter_map(|row| match row {
            (Some(l), Some(r)) => Some(format!("{}{}{}", pad_visible(l, width), COLUMN_SEPARATOR, r)),
            (Some(l), None) => Some(l.clone()),
            (None, Some(r)) => Some(format!("{}{}", indent(width + RIGHT_ONLY_GAP), r)),
            (None, None) => None,
        })
        .collect()
}

/// Full-width horizontal rule.
pub fn rule_line(width: usize) -> String {
    "─".repeat(width)
}

/// Widest visible line in a block.
pub fn block_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines.iter().map(|l| visible_width(l.as_ref())).max().unwrap_or(0)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::styled;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_merge_empty() {
        assert!(merge_columns(NONE, NONE).is_empty());
    }

    #[test]
    fn test_merge_left_only_is_unchanged() {
        let left = ["Strength: 75/101", "Dexterity: 60/101"];
        assert_eq!(merge_columns(&left, NONE), vec!["Strength: 75/101", "Dexterity: 60/101"]);
    }

    #[test]
    fn test_merge_uneven_columns() {
        let merged = merge_columns(&["AAAA", "B"], &["X"]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], format!("AAAA{} │ X", " ".repeat(MIN_LEFT_WIDTH - 4)));
        assert_eq!(merged[1], "B");
    }

    #[test]
    fn test_merge_right_only_rows_indent_past_left_width() {
        let merged = merge_columns(&["A"], &["X", "Y"]);
        assert_eq!(merged[1].find('Y').unwrap(), MIN_LEFT_WIDTH + 2);
        assert_eq!(merged[1], format!("{}Y", " ".repeat(32)));
    }

    #[test]
    fn test_merge_pads_by_visible_width() {
        let price = styled("price", "Dexterity: 60/101");
        let merged = merge_columns(&[price.clone()], &["Crush: 26%"]);
        assert!(merged[0].starts_with(&price));
        assert_eq!(visible_width(&merged[0]), MIN_LEFT_WIDTH + 3 + "Crush: 26%".len());
    }

    #[test]
    fn test_merge_wide_left_column() {
        let long = "x".repeat(40);
        let merged = merge_columns(&[long.as_str(), "short"], &["a", "b"]);
        assert_eq!(merged[1], format!("short{} │ b", " ".repeat(35)));
    }

    #[test]
    fn test_title_rows_use_plain_gap() {
        let merged = merge_columns(&["📊 Stats", "Strength: 75/101"], &["🛡️ Resists", "Crush: 26%"]);
        assert!(!merged[0].contains('│'));
        assert!(merged[0].contains("   🛡️ Resists"));
        assert!(merged[1].contains(" │ "));
    }

    #[test]
    fn test_titles_do_not_widen_left_column() {
        let title = format!("📊 {}", "T".repeat(50));
        assert_eq!(left_column_width(&[title.as_str(), "abc"]), MIN_LEFT_WIDTH);
    }

    #[test]
    fn test_title_detection_ignores_markup() {
        assert!(is_title_line(&styled("title", "💰 Total")));
        assert!(is_title_line("  ⚔️ Weapons"));
        assert!(!is_title_line("Strength: 75/101"));
    }

    #[test]
    fn test_pair_rows() {
        let rows = vec![
            (Some("Neck: Choker".to_string()), Some("Cloak: Shades".to_string())),
            (Some("Left Ring: Band".to_string()), None),
            (None, Some("Right Wrist: Cuff".to_string())),
            (None, None),
        ];
        let lines = pair_rows(&rows);
        assert_eq!(
            lines,
            vec![
                "Neck: Choker    │ Cloak: Shades".to_string(),
                "Left Ring: Band".to_string(),
                format!("{}Right Wrist: Cuff", " ".repeat(15 + 2)),
            ]
        );
    }

    #[test]
    fn test_rule_and_block_width() {
        assert_eq!(rule_line(3), "───");
        assert_eq!(block_width(&["ab", "abcd"]), 4);
    }

    proptest! {
        #[test]
        fn prop_merge_keeps_every_line_in_order(
            left in prop::collection::vec("[a-z ]{0,12}", 0..8),
            right in prop::collection::vec("[a-z ]{0,12}", 0..8),
        ) {
            let merged = merge_columns(&left, &right);
            prop_assert_eq!(merged.len(), left.len().max(right.len()));
            for (i, line) in merged.iter().enumerate() {
                if let Some(l) = left.get(i) {
                    prop_assert!(line.starts_with(l.as_str()));
                }
                if let Some(r) = right.get(i) {
                    prop_assert!(line.ends_with(r.as_str()));
                }
            }
        }
    }
}
