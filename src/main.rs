use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use pantry_ai_common::{Phase, SelectedFile};
use pantry_ai_rust::{cli, config, controller, error, picker, view};

use cli::{Cli, Commands};
use config::Config;
use controller::{ControllerOptions, UploadController};
use error::PantryAiError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 構造化ログ初期化（--verboseでdebugまで出す）
    let default_filter = if cli.verbose {
        "pantry_ai_rust=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let mut config = Config::load().context("設定の読み込みに失敗")?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }

    match cli.command {
        Commands::Analyze { image } => {
            if !image.exists() {
                return Err(PantryAiError::FileNotFound(image.display().to_string()).into());
            }
            run_analysis(&config, image).await?;
        }

        Commands::Pick { folder } => {
            let folder = folder.unwrap_or_else(|| PathBuf::from("."));
            match picker::choose_image(&folder)? {
                Some(image) => run_analysis(&config, image).await?,
                None => println!("キャンセルしました"),
            }
        }

        Commands::Config { set_endpoint, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ 解析サーバのURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  解析サーバ: {}", config.endpoint);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

/// レシート1枚を解析して結果を表示する
async fn run_analysis(config: &Config, image: PathBuf) -> anyhow::Result<()> {
    println!("🧾 pantry-ai - レシート解析\n");

    let options = ControllerOptions {
        endpoint: config.endpoint.clone(),
        timeout: Duration::from_secs(config.timeout_seconds),
        ..ControllerOptions::default()
    };
    let controller = UploadController::new(options)?;

    controller.select_file(Some(SelectedFile::new(image)));

    let progress = view::render_progress(controller.subscribe());
    tokio::join!(controller.submit(), progress);

    let state = controller.snapshot();
    match state.phase {
        Phase::Succeeded => view::print_items(&state.items),
        Phase::Failed => {
            let message = state
                .error_message
                .unwrap_or_else(|| "不明なエラー".to_string());
            anyhow::bail!(message);
        }
        _ => {}
    }

    Ok(())
}
