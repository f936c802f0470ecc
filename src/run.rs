//! 変換の実行
//!
//! 1回の変換に必要なものはすべて `RunContext` に持たせ、呼び出しに渡していく。
//! 入力は非同期に読み込み、変換本体は blocking タスクで同期的に実行する。
//! 出力ワークブックはメモリ上で完成させてから書き込むので、途中で失敗しても部分的なファイルは残らない。

use crate::backend::select_backend;
use crate::cli::BackendMode;
use crate::config::Config;
use crate::error::{ConvertError, Result};
use crate::export::{self, excel};
use crate::reader;
use delivery_convert_common::{ConversionInput, ConversionResult, ExtractionSettings, MappingTable, WeeklyWorkbook};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// 変換要求（入力が揃うまで実行できない）
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub origin: Option<PathBuf>,
    pub mapping: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub backend: Option<BackendMode>,
    pub threads: Option<usize>,
    pub max_products: Option<usize>,
    pub json_output: Option<PathBuf>,
}

impl RunRequest {
    /// 両方の入力が揃っていれば実行コンテキストを作る
    pub fn ready(self, config: &Config) -> Result<RunContext> {
        let origin = self.origin.ok_or(ConvertError::MissingInput("原本ファイル"))?;
        let mapping = self.mapping.ok_or(ConvertError::MissingInput("マッピングファイル"))?;

        let mut settings = config.extraction_settings()?;
        if let Some(max) = self.max_products {
            if max == 0 {
                return Err(ConvertError::Config("max_products は1以上にしてください".into()));
            }
            settings.max_products = max;
        }

        Ok(RunContext {
            origin,
            mapping,
            output_dir: self.output_dir,
            settings,
            backend: self.backend.unwrap_or(config.backend),
            threads: self.threads.or(config.threads),
            output_suffix: config.output_suffix.clone(),
            json_output: self.json_output,
        })
    }
}

/// 1回の変換の実行コンテキスト
#[derive(Debug, Clone)]
pub struct RunContext {
    pub origin: PathBuf,
    pub mapping: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub settings: ExtractionSettings,
    pub backend: BackendMode,
    pub threads: Option<usize>,
    pub output_suffix: String,
    pub json_output: Option<PathBuf>,
}

impl RunContext {
    pub fn output_path(&self) -> PathBuf {
        export::output_path_for(&self.origin, self.output_dir.as_deref(), &self.output_suffix)
    }

    /// 同じ設定で別の原本を処理するコンテキスト
    pub fn with_origin(&self, origin: PathBuf) -> Self {
        Self { origin, json_output: None, ..self.clone() }
    }
}

/// 変換結果の概要
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub row_count: usize,
    pub elapsed: Duration,
    pub backend: &'static str,
    pub fell_back: bool,
    pub result: ConversionResult,
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

async fn read_input(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(ConvertError::FileNotFound(path.display().to_string()));
    }
    Ok(tokio::fs::read(path).await?)
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ConvertError::Task(e.to_string()))?
}

/// マッピング表を読み込む
pub async fn acquire_mapping(path: &Path) -> Result<MappingTable> {
    let bytes = read_input(path).await?;
    let name = file_name_of(path);
    blocking(move || reader::load_mapping(&name, bytes)).await
}

/// 原本配送表を読み込む
pub async fn acquire_origin(path: &Path) -> Result<WeeklyWorkbook> {
    let bytes = read_input(path).await?;
    let name = file_name_of(path);
    blocking(move || reader::load_origin(&name, bytes)).await
}

/// 読み込み済みの入力で変換し、結果ファイルを書き出す
pub async fn convert_loaded(ctx: &RunContext, workbook: WeeklyWorkbook, mapping: MappingTable) -> Result<RunSummary> {
    let started = Instant::now();
    let selected = select_backend(ctx.backend, ctx.threads);
    let backend = selected.name();
    let fell_back = selected.fell_back;

    let input = ConversionInput { workbook, mapping, settings: ctx.settings.clone() };
    let (result, bytes) = blocking(move || {
        let result = selected.converter.convert(&input);
        let bytes = excel::encode_result(&result)?;
        Ok((result, bytes))
    })
    .await?;

    let output_path = ctx.output_path();
    excel::write_result(&output_path, bytes).await?;
    if let Some(json_path) = &ctx.json_output {
        excel::write_json(json_path, &result).await?;
    }

    let summary = RunSummary {
        output_path,
        row_count: result.data.len(),
        elapsed: started.elapsed(),
        backend,
        fell_back,
        result,
    };

    tracing::info!(
        output = %summary.output_path.display(),
        rows = summary.row_count,
        backend = summary.backend,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "conversion finished"
    );

    Ok(summary)
}

/// 1件の変換を最初から最後まで実行
pub async fn run(ctx: &RunContext) -> Result<RunSummary> {
    let started = Instant::now();
    let mapping = acquire_mapping(&ctx.mapping).await?;
    let workbook = acquire_origin(&ctx.origin).await?;

    let mut summary = convert_loaded(ctx, workbook, mapping).await?;
    summary.elapsed = started.elapsed();
    Ok(summary)
}
