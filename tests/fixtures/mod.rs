//! テスト用ワークブック生成
//!
//! 位置はすべて1始まり（配送表レイアウトと同じ）で指定する。

#![allow(dead_code)]

use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::{Path, PathBuf};

pub const FAMILY_A: u32 = 2;
pub const FAMILY_B: u32 = 11;

/// 商品行 (連番, 商品名, 箱数, 午後陳列)
pub type Line<'a> = (Option<&'a str>, &'a str, i64, &'a str);

pub struct Block<'a> {
    pub anchor_row: u32,
    /// 連番列（FAMILY_A / FAMILY_B）
    pub seq_col: u32,
    pub store: &'a str,
    pub lines: Vec<Line<'a>>,
}

pub struct Sheet<'a> {
    pub name: &'a str,
    pub blocks: Vec<Block<'a>>,
    /// F8 の合計
    pub total: Option<i64>,
    /// 店舗小計行 (行, 連番列, 箱数)
    pub subtotals: Vec<(u32, u32, i64)>,
}

pub fn line<'a>(seq: &'a str, product: &'a str, qty: i64) -> Line<'a> {
    (Some(seq), product, qty, "")
}

fn text(ws: &mut Worksheet, row: u32, col: u32, value: &str) {
    ws.write_string(row - 1, (col - 1) as u16, value).unwrap();
}

fn number(ws: &mut Worksheet, row: u32, col: u32, value: i64) {
    ws.write_number(row - 1, (col - 1) as u16, value as f64).unwrap();
}

pub fn write_origin(dir: &Path, file_name: &str, sheets: &[Sheet<'_>]) -> PathBuf {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(sheet.name).unwrap();

        if let Some(total) = sheet.total {
            number(ws, 8, 6, total);
        }

        for block in &sheet.blocks {
            text(ws, block.anchor_row, block.seq_col, &format!("※ {} : {}", block.store, block.lines.len()));
            for (i, (seq, product, qty, afternoon)) in block.lines.iter().enumerate() {
                let row = block.anchor_row + 4 + i as u32;
                if let Some(seq) = seq {
                    match seq.parse::<i64>() {
                        Ok(n) => number(ws, row, block.seq_col, n),
                        Err(_) => text(ws, row, block.seq_col, seq),
                    }
                }
                if !afternoon.is_empty() {
                    text(ws, row, block.seq_col + 1, afternoon);
                }
                if !product.is_empty() {
                    text(ws, row, block.seq_col + 3, product);
                }
                number(ws, row, block.seq_col + 4, *qty);
            }
        }

        for &(row, seq_col, value) in &sheet.subtotals {
            text(ws, row, seq_col, "계");
            number(ws, row, seq_col + 4, value);
        }
    }

    let path = dir.join(file_name);
    workbook.save(&path).unwrap();
    path
}

/// マッピング表 (原本店舗名, コード, 店舗名)
pub fn write_mapping(dir: &Path, entries: &[(&str, &str, &str)]) -> PathBuf {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    text(ws, 1, 1, "코드");
    text(ws, 1, 2, "원본 사업장명");
    text(ws, 1, 3, "사업장명");
    for (i, (original, code, name)) in entries.iter().enumerate() {
        let row = i as u32 + 2;
        text(ws, row, 1, code);
        text(ws, row, 2, original);
        text(ws, row, 3, name);
    }

    let path = dir.join("mapping.xlsx");
    workbook.save(&path).unwrap();
    path
}

/// 標準のテスト用配送表
///
/// 월: 강남점(A) 3+2, Downtown Store(B) 4, 하단에 Downtown Store(A) 1 / 小計 10
/// 화: Downtown Store(A) 5, 역삼점(B) 공란行あり 2+6 / 小計 12（意図的な不一致）
pub fn standard_origin(dir: &Path, file_name: &str) -> PathBuf {
    write_origin(
        dir,
        file_name,
        &[
            Sheet {
                name: "월",
                blocks: vec![
                    Block {
                        anchor_row: 10,
                        seq_col: FAMILY_A,
                        store: "강남점",
                        lines: vec![(Some("1"), " 우유 ", 3, " 오후 "), line("2", "두부", 2)],
                    },
                    Block {
                        anchor_row: 10,
                        seq_col: FAMILY_B,
                        store: "Downtown Store",
                        lines: vec![line("1", "김치", 4)],
                    },
                    Block {
                        anchor_row: 20,
                        seq_col: FAMILY_A,
                        store: "Downtown Store",
                        lines: vec![line("1", "계란", 1)],
                    },
                ],
                total: Some(10),
                subtotals: vec![(40, FAMILY_A, 5), (40, FAMILY_B, 4), (41, FAMILY_A, 1)],
            },
            Sheet {
                name: "화",
                blocks: vec![
                    Block {
                        anchor_row: 10,
                        seq_col: FAMILY_A,
                        store: "Downtown Store",
                        lines: vec![line("1", "우유", 5)],
                    },
                    Block {
                        anchor_row: 10,
                        seq_col: FAMILY_B,
                        store: "역삼점",
                        lines: vec![line("1", "두부", 2), line("2", "", 9), line("3", "김치", 6)],
                    },
                ],
                total: Some(13),
                subtotals: vec![(40, FAMILY_A, 5), (40, FAMILY_B, 7)],
            },
            Sheet {
                name: "메모",
                blocks: vec![Block {
                    anchor_row: 2,
                    seq_col: FAMILY_A,
                    store: "무시되는 매장",
                    lines: vec![line("1", "우유", 100)],
                }],
                total: None,
                subtotals: vec![],
            },
        ],
    )
}

pub fn standard_mapping(dir: &Path) -> PathBuf {
    write_mapping(dir, &[("강남점", "S001", "강남 1호점"), ("역삼점", "S002", "역삼 본점")])
}
