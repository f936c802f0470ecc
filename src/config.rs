use crate::cli::BackendMode;
use crate::error::{ConvertError, Result};
use delivery_convert_common::date::{parse_iso_date, DEFAULT_BASE_DATE};
use delivery_convert_common::layout::DEFAULT_MAX_PRODUCTS;
use delivery_convert_common::{ColumnFamily, ExtractionSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 出力ファイル名のサフィックス（拡張子を置き換える）
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_변환결과.xlsx";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ファイル名から日付が取れないときの基準日 (YYYY-MM-DD)
    pub default_base_date: String,
    pub max_products: usize,
    pub output_suffix: String,
    pub backend: BackendMode,
    /// 並列バックエンドのスレッド数（None = CPU数）
    pub threads: Option<usize>,
    pub families: Vec<ColumnFamily>,
    /// 店舗小計行（계）による照合
    pub reconcile_store_subtotals: bool,
}

impl Default for Config {
    fn default() -> Self {
        let (y, m, d) = DEFAULT_BASE_DATE;
        Self {
            default_base_date: format!("{:04}-{:02}-{:02}", y, m, d),
            max_products: DEFAULT_MAX_PRODUCTS,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.into(),
            backend: BackendMode::Auto,
            threads: None,
            families: ColumnFamily::DEFAULTS.to_vec(),
            reconcile_store_subtotals: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConvertError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("delivery-convert").join("config.json"))
    }

    /// 抽出設定に変換
    ///
    /// 重複したファミリーは最初の1つだけ残す（同じブロックを二重に数えない）。
    pub fn extraction_settings(&self) -> Result<ExtractionSettings> {
        if self.families.is_empty() {
            return Err(ConvertError::Config("families が空です".into()));
        }

        let mut families = Vec::with_capacity(self.families.len());
        for &family in &self.families {
            if families.contains(&family) {
                tracing::warn!(%family, "duplicate column family in config ignored");
                continue;
            }
            families.push(family);
        }
        if self.max_products == 0 {
            return Err(ConvertError::Config("max_products は1以上にしてください".into()));
        }

        Ok(ExtractionSettings {
            families,
            max_products: self.max_products,
            default_base_date: parse_iso_date(&self.default_base_date)?,
            reconcile_store_subtotals: self.reconcile_store_subtotals,
        })
    }

    pub fn set_default_date(&mut self, date: &str) -> Result<()> {
        let parsed = parse_iso_date(date)?;
        self.default_base_date = parsed.format("%Y-%m-%d").to_string();
        Ok(())
    }
}
