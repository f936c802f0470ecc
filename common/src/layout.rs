//! 配送表レイアウト定義
//!
//! 週間配送表の各シートは、店舗ブロックを横方向に複数並べた固定レイアウトになっている。
//! 列位置はすべて1始まり（A列 = 1）。

use serde::{Deserialize, Serialize};

/// 店舗マーカー文字
pub const STORE_MARKER: char = '※';

/// 店舗小計行のマーカー
pub const SUM_MARKER: &str = "계";

/// アンカー行の下にある固定ヘッダー行数
pub const HEADER_ROWS: u32 = 4;

/// 1ブロックあたりの最大商品行数（デフォルト）
pub const DEFAULT_MAX_PRODUCTS: usize = 25;

/// シート全体の合計セル（F8）
pub const TOTAL_CELL: (u32, u32) = (8, 6);

/// 店舗小計行の走査開始行
pub const SUBTOTAL_SCAN_START_ROW: u32 = 35;

/// 曜日シート名（処理順）
pub const WEEKDAY_LABELS: [&str; 5] = ["월", "화", "수", "목", "금"];

/// ブロックの横位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnFamily {
    A,
    B,
    C,
}

/// 列ファミリーごとの列位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyColumns {
    /// 連番列（アンカー列を兼ねる）
    pub seq: u32,
    /// 補助列（午後陳列）
    pub secondary: Option<u32>,
    pub product: u32,
    pub box_qty: u32,
}

/// ファミリーごとの列位置（`ColumnFamily` の宣言順）
const FAMILY_TABLE: [FamilyColumns; 3] = [
    FamilyColumns { seq: 2, secondary: Some(3), product: 5, box_qty: 6 },
    FamilyColumns { seq: 11, secondary: Some(12), product: 14, box_qty: 15 },
    FamilyColumns { seq: 20, secondary: None, product: 23, box_qty: 24 },
];

impl ColumnFamily {
    /// 標準で有効なファミリー
    pub const DEFAULTS: [ColumnFamily; 2] = [ColumnFamily::A, ColumnFamily::B];

    pub fn columns(self) -> FamilyColumns {
        match self {
            ColumnFamily::A => FAMILY_TABLE[0],
            ColumnFamily::B => FAMILY_TABLE[1],
            ColumnFamily::C => FAMILY_TABLE[2],
        }
    }
}

impl std::fmt::Display for ColumnFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnFamily::A => write!(f, "A"),
            ColumnFamily::B => write!(f, "B"),
            ColumnFamily::C => write!(f, "C"),
        }
    }
}

impl std::str::FromStr for ColumnFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(ColumnFamily::A),
            "B" => Ok(ColumnFamily::B),
            "C" => Ok(ColumnFamily::C),
            _ => Err(format!("Unknown column family: {}. Use A, B, or C", s)),
        }
    }
}
