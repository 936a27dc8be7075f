use clap::Parser;
use ledger_classifier::utils::{logger, validation::Validate};
use ledger_classifier::{ClassificationEngine, CliConfig, OllamaClassifier, RuleBook};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };
    tracing::debug!("Settings: {:?}", settings);

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    println!("--- Starting AI Classifier ({}) ---", settings.model);

    // 規則只建立一次，之後每一列共用
    let rules = Arc::new(RuleBook::standard());
    let classifier = OllamaClassifier::new(&settings, rules)?;
    let engine = ClassificationEngine::new(classifier);

    match engine.run(&settings).await {
        Ok(summary) => {
            tracing::info!("✅ Classification completed: {} rows", summary.rows_written);
            println!("\n\n✅ SUCCESS! Classification complete.");
            println!("Output file: {}", summary.output_path.display());
        }
        Err(e) => {
            let exit_code = e.exit_code();

            // 缺少輸入檔：提示後正常返回
            if exit_code == 0 {
                tracing::warn!("{}", e);
                println!("\n{}", e.user_friendly_message());
                println!("{}", e.recovery_suggestion());
                return Ok(());
            }

            tracing::error!(
                "❌ Classification failed: {} (Severity: {:?})",
                e,
                e.severity()
            );

            eprintln!("\n{}", e.user_friendly_message());
            eprintln!("{}", e.recovery_suggestion());
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
