//! シートの読み取り専用ビュー
//!
//! 行・列ともに1始まりの絶対位置でセルを参照する。
//! ワークブックの形式（xlsx/xls等）はここでは扱わず、
//! 読み込み側が `MemoryGrid` を組み立てて渡す。

use serde::{Deserialize, Serialize};

/// セル値
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// 表示用の文字列に変換
    ///
    /// 整数値の浮動小数点は小数部なしで表示する（`3.0` → `"3"`）。
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => format!("{}", f),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// 整数に変換（変換できなければ None）
    ///
    /// 浮動小数点は0方向に切り捨て、文字列は前後の空白を除いて10進整数として解釈する。
    pub fn to_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            CellValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// グリッドアクセサ
pub trait Grid {
    /// セル値を取得（1始まり）。範囲外・空セルは None
    fn cell(&self, row: u32, col: u32) -> Option<&CellValue>;

    /// 使用範囲（最大行, 最大列）
    fn occupied_range(&self) -> (u32, u32);

    /// セルの文字列表現（空なら空文字列）
    fn text(&self, row: u32, col: u32) -> String {
        self.cell(row, col).map(CellValue::to_text).unwrap_or_default()
    }

    /// セルの整数値
    fn int(&self, row: u32, col: u32) -> Option<i64> {
        self.cell(row, col).and_then(CellValue::to_int)
    }
}

/// メモリ上の密な行列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryGrid {
    rows: Vec<Vec<CellValue>>,
    max_col: u32,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行の配列から構築（先頭要素が1行目・A列）
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let max_col = rows.iter().map(|r| r.len() as u32).max().unwrap_or(0);
        Self { rows, max_col }
    }

    /// セル値を設定（1始まり）。必要に応じて領域を拡張する
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        if row == 0 || col == 0 {
            return;
        }
        let (r, c) = ((row - 1) as usize, (col - 1) as usize);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let line = &mut self.rows[r];
        if line.len() <= c {
            line.resize(c + 1, CellValue::Empty);
        }
        line[c] = value;
        self.max_col = self.max_col.max(col);
    }

    pub fn set_text(&mut self, row: u32, col: u32, value: &str) {
        self.set(row, col, CellValue::String(value.to_string()));
    }

    pub fn set_int(&mut self, row: u32, col: u32, value: i64) {
        self.set(row, col, CellValue::Int(value));
    }
}

impl Grid for MemoryGrid {
    fn cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        if row == 0 || col == 0 {
            return None;
        }
        self.rows
            .get((row - 1) as usize)
            .and_then(|line| line.get((col - 1) as usize))
            .filter(|value| !matches!(value, CellValue::Empty))
    }

    fn occupied_range(&self) -> (u32, u32) {
        (self.rows.len() as u32, self.max_col)
    }
}
