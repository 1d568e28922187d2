//! Pagination: lays text blocks out as fixed-height lines on pages.

use crate::layout::font_metrics::{FontMetrics, PageConfig};
use crate::layout::wrap::wrap_line;

/// Splits each block on `\n`, wraps every display line to the text width, and cuts
/// pages every `lines_per_page` lines. Consecutive blocks are separated by one blank
/// line; a separator that would open a page is dropped.
///
/// Always returns at least one page.
pub fn paginate(blocks: &[String], metrics: &FontMetrics<'_>, config: &PageConfig) -> Vec<Vec<String>> {
    let max_width_em = config.text_width_mm() / config.em_mm();
    let per_page = config.lines_per_page();

    let mut pages: Vec<Vec<String>> = Vec::new();
    let mut page: Vec<String> = Vec::new();

    let mut push = |line: String, is_separator: bool, page: &mut Vec<String>| {
        if page.len() == per_page {
            pages.push(std::mem::take(page));
        }
        if is_separator && page.is_empty() {
            return;
        }
        page.push(line);
    };

    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            push(String::new(), true, &mut page);
        }
        for raw_line in block.split('\n') {
            for line in wrap_line(raw_line, metrics, max_width_em) {
                push(line, false, &mut page);
            }
        }
    }

    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;
    use crate::layout::font_metrics::testing::test_metrics;

    #[test]
    fn test_empty_report_has_one_page() {
        let pages = paginate(&[], &test_metrics(), &default_page_config());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let blocks = vec!["[A - x]\nline".to_string(), "[B - y]".to_string()];
        let pages = paginate(&blocks, &test_metrics(), &default_page_config());
        assert_eq!(pages, vec![vec!["[A - x]", "line", "", "[B - y]"]]);
    }

    #[test]
    fn test_pages_never_exceed_line_budget() {
        let config = default_page_config();
        let block = (0..100).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let pages = paginate(&[block], &test_metrics(), &config);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.len() <= config.lines_per_page()));
        let total: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(total, 100);
        assert_eq!(pages[2].last().map(String::as_str), Some("line 99"));
    }

    #[test]
    fn test_separator_not_placed_at_page_top() {
        let config = default_page_config();
        let per_page = config.lines_per_page();
        let first = vec!["x"; per_page].join("\n");
        let pages = paginate(&[first, "next".to_string()], &test_metrics(), &config);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], vec!["next"]);
    }
}
