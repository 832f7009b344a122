//! Best-effort extraction of product rows from pipe-delimited markdown text.
//!
//! This is the last-resort fallback when the backend returns prose instead of
//! structured data. It is allowed to return zero rows; its job is graceful
//! degradation, not accuracy.

use std::sync::LazyLock;

use ff_core::numeric;
use ff_model::ProductCard;
use regex::Regex;

static TICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Za-z][A-Za-z0-9.\-]{0,9})\)").expect("ticker regex"));

static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?\s*%").expect("percent regex"));

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s:|\-]+$").expect("separator regex"));

/// Extract product rows from lines shaped like `| name | a | b | c |`.
pub fn extract_table_rows(text: &str) -> Vec<ProductCard> {
    text.lines()
        .filter_map(parse_row)
        .filter_map(|cells| row_to_card(&cells))
        .collect()
}

/// Split one `| a | b | c |` line into trimmed cells, rejecting non-table
/// lines and `|---|---|` separator rows.
fn parse_row(line: &str) -> Option<Vec<String>> {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') || !trimmed.ends_with('|') || trimmed.len() < 2 {
        return None;
    }
    if SEPARATOR_RE.is_match(trimmed) {
        return None;
    }
    let cells: Vec<String> = trimmed
        .trim_matches('|')
        .split('|')
        .map(|c| c.trim().to_string())
        .collect();
    if cells.len() < 2 || cells.iter().all(|c| c.is_empty()) {
        return None;
    }
    Some(cells)
}

fn row_to_card(cells: &[String]) -> Option<ProductCard> {
    if is_header_row(cells) {
        return None;
    }

    let mut card = ProductCard::placeholder();
    let name_cell = &cells[0];

    if let Some(m) = TICKER_RE.captures(name_cell) {
        card.ticker = m[1].to_uppercase();
    }
    let name = TICKER_RE.replace(name_cell, "").trim().to_string();
    if !name.is_empty() {
        card.name = name;
    }

    // Column convention observed in backend prose: name, expense ratio,
    // one-year return, then category/provider text.
    match cells.len() {
        2 => {
            card.performance.one_year = numeric::lenient_number(&cells[1]);
        }
        _ => {
            card.expense_ratio = numeric::lenient_number(&cells[1]);
            card.performance.one_year = numeric::lenient_number(&cells[2]);
            for extra in &cells[3..] {
                if extra.is_empty() || PERCENT_RE.is_match(extra) {
                    continue;
                }
                if card.category == "N/A" {
                    card.category = extra.clone();
                } else if card.provider == "N/A" {
                    card.provider = extra.clone();
                }
            }
        }
    }

    Some(card)
}

/// Header heuristic: first cell names the column ("Fund", "Name") and the row
/// carries no percentage value. A data row like `| Fund B (FB) | 0.40% | ... |`
/// contains percentages and must survive.
fn is_header_row(cells: &[String]) -> bool {
    let first = cells[0].to_ascii_lowercase();
    let looks_like_label = first.contains("fund") || first.contains("name");
    looks_like_label && !cells.iter().any(|c| PERCENT_RE.is_match(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_data_row() {
        let rows = extract_table_rows("| Fund B (FB) | 0.40% | +8.3% | Equity |");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "FB");
        assert_eq!(rows[0].name, "Fund B");
        assert_eq!(rows[0].expense_ratio, 0.40);
        assert_eq!(rows[0].performance.one_year, 8.3);
        assert_eq!(rows[0].category, "Equity");
    }

    #[test]
    fn skips_header_and_separator_rows() {
        let text = "\
Here are some options:

| Fund Name | Expense Ratio | 1Y Return | Category |
|-----------|---------------|-----------|----------|
| Vanguard Growth ETF (VUG) | 0.04% | 12.5% | Equity |
| Core Bond Fund (CBF) | 0.15% | 3.1% | Fixed Income |
";
        let rows = extract_table_rows(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ticker, "VUG");
        assert_eq!(rows[1].category, "Fixed Income");
    }

    #[test]
    fn missing_ticker_and_numbers_fall_back() {
        let rows = extract_table_rows("| Some ETF | n/a | n/a | Balanced |");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "N/A");
        assert_eq!(rows[0].expense_ratio, 0.0);
        assert_eq!(rows[0].performance.one_year, 0.0);
        assert_eq!(rows[0].category, "Balanced");
    }

    #[test]
    fn prose_without_tables_yields_no_rows() {
        let rows = extract_table_rows("I could not find matching products for that query.");
        assert!(rows.is_empty());
    }
}
