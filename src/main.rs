use clap::Parser;
use delivery_convert::{cli, config, error, logging, run, scanner};
use delivery_convert_common::extractor::extract_products;
use delivery_convert_common::locator::find_blocks;
use delivery_convert_common::pipeline::plan_days;
use delivery_convert_common::{ConversionInput, Converter, MappingTable, ReferenceConverter, ValidationRow};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use run::RunRequest;

fn print_validation(rows: &[ValidationRow]) {
    for v in rows {
        let store_sum = v
            .original_store_sum
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "  {} ({})  抽出 {:>6}  原本総計 {:>6}  店舗小計 {:>6}  {}",
            v.date, v.day_name, v.extracted_sum, v.original_total, store_sum, v.match_result
        );
    }
}

fn print_failures(failures: &[String]) {
    if failures.is_empty() {
        return;
    }
    println!("\n⚠ マッピング失敗: {}店舗", failures.len());
    for name in failures {
        println!("  - {}", name);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Convert { origin, mapping, output, backend, threads, max_products, json } => {
            println!("📦 delivery-convert - 配送表変換\n");

            let ctx = RunRequest {
                origin: Some(origin),
                mapping: Some(mapping),
                output_dir: output,
                backend,
                threads,
                max_products,
                json_output: json,
            }
            .ready(&config)?;

            // 1. 入力読み込み
            println!("[1/3] 入力ファイルを読み込み中...");
            let mapping_table = run::acquire_mapping(&ctx.mapping).await?;
            let workbook = run::acquire_origin(&ctx.origin).await?;
            println!(
                "✔ マッピング {}件 / 曜日シート {}枚\n",
                mapping_table.len(),
                workbook.sheet_names().count()
            );

            // 2. 変換
            println!("[2/3] 変換中...");
            let summary = run::convert_loaded(&ctx, workbook, mapping_table).await?;
            println!(
                "✔ {}行を抽出 ({:.2}秒, バックエンド: {}{})\n",
                summary.row_count,
                summary.elapsed.as_secs_f64(),
                summary.backend,
                if summary.fell_back { " ※並列処理が使えないため切替" } else { "" }
            );

            // 3. 照合結果
            println!("[3/3] 照合結果");
            print_validation(&summary.result.validation);
            print_failures(&summary.result.mapping_failures);

            println!("\n✔ 結果を保存: {}", summary.output_path.display());
            if let Some(json_path) = &ctx.json_output {
                println!("✔ JSONを保存: {}", json_path.display());
            }
            println!("\n✅ 変換完了");
        }

        Commands::Batch { folder, mapping, output, backend } => {
            println!("🚀 delivery-convert - 一括変換\n");

            let files = scanner::scan_origin_files(&folder, &mapping, &config.output_suffix)?;
            println!("✔ {}件の配送表を検出\n", files.len());
            if files.is_empty() {
                return Ok(());
            }

            let base_ctx = RunRequest {
                origin: files.first().cloned(),
                mapping: Some(mapping),
                output_dir: output.or_else(|| Some(folder.clone())),
                backend,
                ..Default::default()
            }
            .ready(&config)?;

            let mapping_table = run::acquire_mapping(&base_ctx.mapping).await?;

            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );

            let mut succeeded = 0;
            let mut failed = 0;
            for file in files {
                let ctx = base_ctx.with_origin(file.clone());
                pb.set_message(file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());

                let outcome = match run::acquire_origin(&ctx.origin).await {
                    Ok(workbook) => run::convert_loaded(&ctx, workbook, mapping_table.clone()).await,
                    Err(e) => Err(e),
                };
                match outcome {
                    Ok(summary) => {
                        succeeded += 1;
                        pb.println(format!(
                            "✔ {} ({}行, 不一致 {}日, マッピング失敗 {}店舗)",
                            summary.output_path.display(),
                            summary.row_count,
                            summary.result.mismatch_count(),
                            summary.result.mapping_failures.len()
                        ));
                    }
                    Err(e) => {
                        failed += 1;
                        pb.println(format!("✘ {}: {}", file.display(), e));
                    }
                }
                pb.inc(1);
            }
            pb.finish_and_clear();

            println!("\n✅ 一括変換完了: 成功 {}件 / 失敗 {}件", succeeded, failed);
        }

        Commands::Inspect { origin, mapping } => {
            println!("🔍 delivery-convert - ブロック確認\n");

            let settings = config.extraction_settings()?;
            let mapping = match mapping {
                Some(path) => run::acquire_mapping(&path).await?,
                None => MappingTable::default(),
            };
            let workbook = run::acquire_origin(&origin).await?;
            let input = ConversionInput { workbook, mapping, settings };

            for task in plan_days(&input) {
                let blocks = find_blocks(task.grid, &input.settings.families);
                println!("[{}] {} - {}ブロック", task.label, task.date, blocks.len());
                for block in &blocks {
                    let lines = extract_products(task.grid, block, input.settings.max_products);
                    let boxes: i64 = lines.iter().map(|l| l.box_qty).sum();
                    let mapped = if input.mapping.get(&block.store_name).is_some() { "" } else { " (未登録)" };
                    println!(
                        "  行{:>4} {}列  {}{}: {}品目 / {}箱",
                        block.anchor_row, block.column_family, block.store_name, mapped, lines.len(), boxes
                    );
                }
            }

            let result = ReferenceConverter.convert(&input);
            println!("\n照合結果:");
            print_validation(&result.validation);
            print_failures(&result.mapping_failures);
        }

        Commands::Config { show, set_default_date, set_max_products, set_backend } => {
            let mut config = config;
            let mut changed = false;

            if let Some(date) = set_default_date {
                config.set_default_date(&date)?;
                changed = true;
                println!("✔ デフォルト基準日を設定しました: {}", config.default_base_date);
            }

            if let Some(max) = set_max_products {
                config.max_products = max;
                config.extraction_settings()?;
                changed = true;
                println!("✔ 最大商品行数を設定しました: {}", max);
            }

            if let Some(backend) = set_backend {
                config.backend = backend;
                changed = true;
                println!("✔ バックエンドを設定しました: {}", backend);
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!("  デフォルト基準日: {}", config.default_base_date);
                println!("  最大商品行数: {}", config.max_products);
                println!("  出力サフィックス: {}", config.output_suffix);
                println!("  バックエンド: {}", config.backend);
                println!(
                    "  スレッド数: {}",
                    config.threads.map(|n| n.to_string()).unwrap_or_else(|| "自動".into())
                );
                let families: Vec<String> = config.families.iter().map(|f| f.to_string()).collect();
                println!("  列ファミリー: {}", families.join(", "));
                println!(
                    "  店舗小計照合: {}",
                    if config.reconcile_store_subtotals { "有効" } else { "無効" }
                );
            }
        }
    }

    Ok(())
}
