//! 店舗ブロックの検出
//!
//! 各行・各列ファミリーのアンカーセルに `※ 店舗名 : 件数` 形式の文字列があれば
//! ブロックとして扱う。出力順は行優先、同じ行内はファミリーの設定順。

use crate::grid::{CellValue, Grid};
use crate::layout::{ColumnFamily, STORE_MARKER};
use crate::types::BlockDescriptor;
use regex::Regex;

/// アンカー文字列から店舗名を取り出す
pub fn extract_store_name(value: &str) -> Option<String> {
    if !value.contains(STORE_MARKER) {
        return None;
    }

    lazy_static::lazy_static! {
        static ref STORE_RE: Regex = Regex::new(r"※\s*(.+?)\s*:\s*\d*").unwrap();
    }

    STORE_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// シート内の店舗ブロックを列挙
pub fn find_blocks<G: Grid + ?Sized>(grid: &G, families: &[ColumnFamily]) -> Vec<BlockDescriptor> {
    let (max_row, _) = grid.occupied_range();
    let mut blocks = Vec::new();

    for row in 1..=max_row {
        for &family in families {
            let cols = family.columns();
            let Some(CellValue::String(value)) = grid.cell(row, cols.seq) else {
                continue;
            };
            if let Some(store_name) = extract_store_name(value) {
                blocks.push(BlockDescriptor {
                    store_name,
                    anchor_row: row,
                    column_family: family,
                    col_sequence_no: cols.seq,
                    col_secondary: cols.secondary,
                    col_product_name: cols.product,
                    col_box_qty: cols.box_qty,
                });
            }
        }
    }

    blocks
}
