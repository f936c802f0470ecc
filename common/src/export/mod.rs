//! 変換結果ワークブックの生成

#[cfg(feature = "excel")]
pub mod excel_core;
