//! ブロック内の商品行抽出
//!
//! アンカー行の4行下から最大 `max_products` 行を読む。
//! - 連番セルが空または整数でない → そのブロックの読み取りを終了
//! - 商品名が空 → その行だけスキップ
//! - 箱数が0以下（または数値でない） → その行だけスキップ

use crate::grid::Grid;
use crate::layout::HEADER_ROWS;
use crate::types::{BlockDescriptor, ProductLine};

/// 1ブロック分の商品行を抽出
pub fn extract_products<G: Grid + ?Sized>(
    grid: &G,
    block: &BlockDescriptor,
    max_products: usize,
) -> Vec<ProductLine> {
    let mut products = Vec::new();
    let start_row = block.anchor_row + HEADER_ROWS;

    for row in (start_row..).take(max_products) {
        if grid.text(row, block.col_sequence_no).trim().parse::<i64>().is_err() {
            break;
        }

        let product_name = grid.text(row, block.col_product_name);
        let product_name = product_name.trim();
        if product_name.is_empty() {
            continue;
        }

        let box_qty = grid.int(row, block.col_box_qty).unwrap_or(0);
        if box_qty <= 0 {
            continue;
        }

        let secondary_text = block
            .col_secondary
            .map(|col| grid.text(row, col).trim().to_string())
            .unwrap_or_default();

        products.push(ProductLine {
            store_name: block.store_name.clone(),
            product_name: product_name.to_string(),
            box_qty,
            secondary_text,
        });
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;
    use crate::layout::ColumnFamily;
    use crate::locator::find_blocks;

    /// 10行目にA列ファミリーのブロックを置いたシート
    fn block_sheet(lines: &[(Option<&str>, &str, i64)]) -> (MemoryGrid, BlockDescriptor) {
        let mut grid = MemoryGrid::new();
        grid.set_text(10, 2, "※ 강남점 : 3");
        for (i, (seq, product, qty)) in lines.iter().enumerate() {
            let row = 14 + i as u32;
            if let Some(seq) = seq {
                grid.set_text(row, 2, seq);
            }
            grid.set_text(row, 3, " 오후 ");
            grid.set_text(row, 5, product);
            grid.set_int(row, 6, *qty);
        }
        let block = find_blocks(&grid, &[ColumnFamily::A]).remove(0);
        (grid, block)
    }

    #[test]
    fn test_family_c_has_no_secondary_column() {
        let mut grid = MemoryGrid::new();
        grid.set_text(10, 20, "※ 역삼점 : 1");
        grid.set_int(14, 20, 1);
        grid.set_text(14, 21, "오후");
        grid.set_text(14, 23, "김치");
        grid.set_int(14, 24, 6);

        let blocks = find_blocks(&grid, &[ColumnFamily::C]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].col_secondary, None);

        let products = extract_products(&grid, &blocks[0], 25);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "김치");
        assert_eq!(products[0].box_qty, 6);
        assert_eq!(products[0].secondary_text, "");
    }

    #[test]
    fn test_extracts_trimmed_lines() {
        let (grid, block) = block_sheet(&[(Some("1"), " 우유 ", 3), (Some("2"), "두부", 5)]);
        let products = extract_products(&grid, &block, 25);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].product_name, "우유");
        assert_eq!(products[0].box_qty, 3);
        assert_eq!(products[0].secondary_text, "오후");
        assert_eq!(products[0].store_name, "강남점");
    }

    #[test]
    fn test_blank_product_skips_without_terminating() {
        let (grid, block) = block_sheet(&[(Some("1"), "", 3), (Some("2"), "두부", 5)]);
        let products = extract_products(&grid, &block, 25);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "두부");
    }

    #[test]
    fn test_zero_quantity_is_skipped() {
        let (grid, block) = block_sheet(&[(Some("1"), "우유", 0), (Some("2"), "두부", 2)]);
        let products = extract_products(&grid, &block, 25);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].box_qty, 2);
    }

    #[test]
    fn test_non_numeric_sequence_terminates() {
        let (grid, block) = block_sheet(&[
            (Some("1"), "우유", 1),
            (Some("계"), "합계", 10),
            (Some("3"), "두부", 2),
        ]);
        let products = extract_products(&grid, &block, 25);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "우유");
    }

    #[test]
    fn test_missing_sequence_terminates() {
        let (grid, block) = block_sheet(&[(Some("1"), "우유", 1), (None, "두부", 2), (Some("3"), "김치", 4)]);
        assert_eq!(extract_products(&grid, &block, 25).len(), 1);
    }

    #[test]
    fn test_max_products_limits_rows() {
        let lines: Vec<_> = (1..=5).map(|_| (Some("1"), "우유", 1)).collect();
        let (grid, block) = block_sheet(&lines);

        assert_eq!(extract_products(&grid, &block, 3).len(), 3);
        assert_eq!(extract_products(&grid, &block, 25).len(), 5);
    }
}
