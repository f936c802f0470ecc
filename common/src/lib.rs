//! Delivery Convert Common Library
//!
//! 週間配送表からの抽出・店舗名解決・照合の中核ロジック。
//! ワークブックの読み書きは呼び出し側が担当する。

pub mod aggregate;
pub mod date;
pub mod error;
pub mod export;
pub mod extractor;
pub mod grid;
pub mod layout;
pub mod locator;
pub mod mapping;
pub mod pipeline;
pub mod reconcile;
pub mod types;

pub use error::{Error, Result};
pub use grid::{CellValue, Grid, MemoryGrid};
pub use layout::ColumnFamily;
pub use mapping::{MappingTable, NameMapper};
pub use pipeline::{ConversionInput, Converter, ExtractionSettings, ReferenceConverter, WeeklyWorkbook};
pub use types::{
    BlockDescriptor, ConversionResult, DailyRecord, MappingEntry, MatchResult, ProductLine,
    StoreDailyAggregate, ValidationRow,
};
