use anyhow::Context;
use clap::Parser;
use ledger_classifier::config::cli::EndpointArgs;
use ledger_classifier::domain::ports::Classifier;
use ledger_classifier::utils::{logger, validation::Validate};
use ledger_classifier::{OllamaClassifier, RuleBook, Settings, TransactionRow};
use std::sync::Arc;
use std::time::Duration;

/// Sends a single transaction to the model and prints the answer.
#[derive(Parser)]
#[command(name = "classify-one")]
#[command(about = "Classify one account / cost-center pair against the local model")]
struct Args {
    #[arg(long)]
    account: String,

    #[arg(long)]
    cost_center: String,

    #[command(flatten)]
    endpoint: EndpointArgs,

    /// Print the composed prompt before sending it
    #[arg(long)]
    show_prompt: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let settings = Settings {
        model: args.endpoint.model.clone(),
        endpoint: args.endpoint.endpoint.clone(),
        timeout: args.endpoint.timeout_seconds.map(Duration::from_secs),
        ..Settings::default()
    };
    settings.validate().context("invalid endpoint settings")?;

    let classifier = OllamaClassifier::new(&settings, Arc::new(RuleBook::standard()))
        .context("failed to build HTTP client")?;
    let row = TransactionRow::new(args.account.trim(), args.cost_center.trim());

    if args.show_prompt {
        println!("{}\n", classifier.prompt_for(&row));
    }

    println!(
        "🔎 {} ({}) -> {} @ {}",
        row.account,
        row.cost_center,
        classifier.model(),
        classifier.endpoint()
    );

    match classifier.classify(&row).await {
        Ok(label) => println!("{}", label),
        Err(e) => {
            // 與批次模式相同：錯誤標記照常輸出，不視為程式失敗
            tracing::warn!("Inference failed: {}", e);
            println!("{}", e);
        }
    }

    Ok(())
}
