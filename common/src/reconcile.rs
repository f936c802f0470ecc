//! 原本合計との照合
//!
//! - 原本合計: シート上の合計セル（F8）の値
//! - 店舗小計合計: 35行目以降で連番列が「계」の行の箱数を足し上げた値
//!
//! 判定は店舗小計合計に対して行う。

use crate::grid::Grid;
use crate::layout::{ColumnFamily, SUBTOTAL_SCAN_START_ROW, SUM_MARKER, TOTAL_CELL};
use crate::types::{DailyRecord, MatchResult, ValidationRow};

/// シート上の原本合計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetTotals {
    pub original_total: i64,
    pub original_store_sum: Option<i64>,
}

/// 合計セルと店舗小計行を読む
pub fn read_sheet_totals<G: Grid + ?Sized>(
    grid: &G,
    families: &[ColumnFamily],
    with_store_subtotals: bool,
) -> SheetTotals {
    let (total_row, total_col) = TOTAL_CELL;
    let original_total = grid.int(total_row, total_col).unwrap_or(0);

    let original_store_sum = with_store_subtotals.then(|| store_subtotal_sum(grid, families));

    SheetTotals { original_total, original_store_sum }
}

/// 店舗小計行（連番列が「계」）の箱数合計
pub fn store_subtotal_sum<G: Grid + ?Sized>(grid: &G, families: &[ColumnFamily]) -> i64 {
    let (max_row, _) = grid.occupied_range();
    let mut sum: i64 = 0;

    for row in SUBTOTAL_SCAN_START_ROW..=max_row {
        for family in families {
            let cols = family.columns();
            if grid.text(row, cols.seq) != SUM_MARKER {
                continue;
            }
            match grid.int(row, cols.box_qty) {
                Some(value) if value > 0 => sum = sum.saturating_add(value),
                _ => {}
            }
        }
    }

    sum
}

/// 抽出合計と店舗小計合計を比較
///
/// 合計は飽和加算なので、極端な値のセルがあっても不一致として報告される。
pub fn classify(extracted_sum: i64, original_store_sum: Option<i64>) -> MatchResult {
    match original_store_sum {
        Some(original) if original > 0 => {
            if extracted_sum == original {
                MatchResult::Match
            } else {
                MatchResult::Mismatch { diff: extracted_sum.saturating_sub(original) }
            }
        }
        _ => MatchResult::NoOriginalData,
    }
}

/// 指定日付の抽出済み箱数合計
pub fn extracted_sum_for(records: &[DailyRecord], date: &str) -> i64 {
    records
        .iter()
        .filter(|r| r.date == date)
        .fold(0i64, |acc, r| acc.saturating_add(r.box_qty))
}

/// 検証行を組み立てる
///
/// 抽出合計は全抽出が終わった後のレコードから計算する。
pub fn build_validation_row(
    records: &[DailyRecord],
    date: &str,
    day_name: &str,
    totals: SheetTotals,
) -> ValidationRow {
    let extracted_sum = extracted_sum_for(records, date);
    ValidationRow {
        date: date.to_string(),
        day_name: day_name.to_string(),
        extracted_sum,
        original_total: totals.original_total,
        original_store_sum: totals.original_store_sum,
        match_result: classify(extracted_sum, totals.original_store_sum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellValue, MemoryGrid};

    fn record(date: &str, box_qty: i64) -> DailyRecord {
        DailyRecord {
            date: date.to_string(),
            code: "S001".to_string(),
            display_name: "강남점".to_string(),
            product_name: "우유".to_string(),
            box_qty,
            secondary_text: String::new(),
            mapping_failed: false,
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(10, Some(10)), MatchResult::Match);
        assert_eq!(classify(7, Some(10)), MatchResult::Mismatch { diff: -3 });
        assert_eq!(classify(12, Some(10)), MatchResult::Mismatch { diff: 2 });
        assert_eq!(classify(0, Some(0)), MatchResult::NoOriginalData);
        assert_eq!(classify(5, Some(-1)), MatchResult::NoOriginalData);
        assert_eq!(classify(5, None), MatchResult::NoOriginalData);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let records = vec![record("2026-01-12", i64::MAX), record("2026-01-12", i64::MAX)];
        assert_eq!(extracted_sum_for(&records, "2026-01-12"), i64::MAX);

        let totals = SheetTotals { original_total: 0, original_store_sum: Some(3) };
        let row = build_validation_row(&records, "2026-01-12", "월", totals);
        assert_eq!(row.match_result, MatchResult::Mismatch { diff: i64::MAX - 3 });

        let mut grid = MemoryGrid::new();
        grid.set_text(36, 2, "계");
        grid.set(36, 6, CellValue::Float(1e19));
        grid.set_text(37, 2, "계");
        grid.set(37, 6, CellValue::Float(1e19));
        assert_eq!(store_subtotal_sum(&grid, &ColumnFamily::DEFAULTS), i64::MAX);
    }

    #[test]
    fn test_family_c_subtotal_is_counted() {
        let mut grid = MemoryGrid::new();
        grid.set_text(36, 20, "계");
        grid.set_int(36, 24, 8);
        grid.set_text(36, 2, "계");
        grid.set_int(36, 6, 3);

        assert_eq!(store_subtotal_sum(&grid, &[ColumnFamily::C]), 8);
        assert_eq!(store_subtotal_sum(&grid, &[ColumnFamily::A, ColumnFamily::C]), 11);
        assert_eq!(store_subtotal_sum(&grid, &ColumnFamily::DEFAULTS), 3);
    }

    #[test]
    fn test_read_sheet_totals() {
        let mut grid = MemoryGrid::new();
        grid.set_text(8, 6, "42");
        grid.set_text(20, 2, "계");
        grid.set_int(20, 6, 99);
        grid.set_text(36, 2, "계");
        grid.set_int(36, 6, 10);
        grid.set_text(36, 11, "계");
        grid.set_int(36, 15, 7);
        grid.set_text(50, 2, "계");
        grid.set_int(50, 6, -4);
        grid.set_text(51, 11, "계");
        grid.set_text(51, 15, "없음");

        let totals = read_sheet_totals(&grid, &ColumnFamily::DEFAULTS, true);
        assert_eq!(totals.original_total, 42);
        assert_eq!(totals.original_store_sum, Some(17));

        let without = read_sheet_totals(&grid, &ColumnFamily::DEFAULTS, false);
        assert_eq!(without.original_store_sum, None);
    }

    #[test]
    fn test_unparsable_total_is_zero() {
        let mut grid = MemoryGrid::new();
        grid.set_text(8, 6, "합계");
        assert_eq!(read_sheet_totals(&grid, &ColumnFamily::DEFAULTS, true).original_total, 0);
    }

    #[test]
    fn test_build_validation_row_counts_only_that_date() {
        let records = vec![record("2026-01-12", 3), record("2026-01-13", 4), record("2026-01-12", 2)];
        let totals = SheetTotals { original_total: 6, original_store_sum: Some(5) };

        let row = build_validation_row(&records, "2026-01-12", "월", totals);
        assert_eq!(row.extracted_sum, 5);
        assert_eq!(row.match_result, MatchResult::Match);
        assert_eq!(row.original_total, 6);
    }
}
