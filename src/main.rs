use clap::Parser;
use sector_flows::config::toml_config::TomlConfig;
use sector_flows::utils::error::FlowError;
use sector_flows::utils::{logger, validation::Validate};
use sector_flows::{CliConfig, FlowEngine, FlowPipeline, LocalStorage};

fn fail(e: FlowError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting sector-flows");

    // 載入 TOML 配置（選用）
    let file_config = match cli.config.as_deref() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let file = TomlConfig::from_file(path).unwrap_or_else(|e| fail(e));
            if let Err(e) = file.validate() {
                fail(e);
            }
            Some(file)
        }
        None => None,
    };

    let config = cli.resolve(file_config);
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = FlowPipeline::new(storage, config);
    let engine = FlowEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Flow specs generated");
            println!("✅ Flow specs generated");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail(e),
    }

    Ok(())
}
