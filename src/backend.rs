//! 実行バックエンド
//!
//! 並列バックエンドは曜日シートごとに rayon のタスクを立て、曜日順に結合する。
//! スレッドプールが作れない環境ではリファレンス実装に切り替える。

use crate::cli::BackendMode;
use delivery_convert_common::pipeline::{assemble, plan_days, process_day};
use delivery_convert_common::{ConversionInput, ConversionResult, Converter, ReferenceConverter};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// 曜日シート単位の並列実装
pub struct ParallelConverter {
    pool: ThreadPool,
}

impl ParallelConverter {
    pub fn new(threads: Option<usize>) -> Result<Self, ThreadPoolBuildError> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("convert-{}", i));
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        Ok(Self { pool: builder.build()? })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Converter for ParallelConverter {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn convert(&self, input: &ConversionInput) -> ConversionResult {
        let tasks = plan_days(input);
        let days = self.pool.install(|| {
            tasks
                .par_iter()
                .map(|task| process_day(task, &input.mapping, &input.settings))
                .collect::<Vec<_>>()
        });
        assemble(days)
    }
}

/// 選択されたバックエンド
pub struct SelectedBackend {
    pub converter: Box<dyn Converter>,
    /// 並列を要求したがリファレンスに切り替えた
    pub fell_back: bool,
}

impl SelectedBackend {
    pub fn name(&self) -> &'static str {
        self.converter.name()
    }
}

/// モードに応じてバックエンドを選ぶ
pub fn select_backend(mode: BackendMode, threads: Option<usize>) -> SelectedBackend {
    match mode {
        BackendMode::Reference => SelectedBackend {
            converter: Box::new(ReferenceConverter),
            fell_back: false,
        },
        BackendMode::Auto | BackendMode::Parallel => match ParallelConverter::new(threads) {
            Ok(parallel) => {
                tracing::debug!(threads = parallel.threads(), "parallel backend ready");
                SelectedBackend { converter: Box::new(parallel), fell_back: false }
            }
            Err(e) => {
                tracing::warn!(error = %e, "thread pool unavailable, falling back to reference backend");
                SelectedBackend { converter: Box::new(ReferenceConverter), fell_back: true }
            }
        },
    }
}
