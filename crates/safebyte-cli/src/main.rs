mod cli;
mod display;
mod score;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use clap::Parser;
use safebyte_ai::RiskModel;
use safebyte_explain::ExplainClient;

use crate::cli::{Cli, Command, PredictArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("safebyte v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let model = RiskModel::load(&cli.artifacts)
        .with_context(|| format!("loading model artifacts from {}", cli.artifacts.display()))?;

    match cli.command {
        Command::Vocab => {
            display::print_vocabulary(&model);
            Ok(())
        }
        Command::Predict(args) => predict(&model, args).await,
        Command::Score(args) => {
            let summary = score::run_score(&model, &args.input, args.output.as_deref())?;
            display::print_score_summary(&summary);
            Ok(())
        }
    }
}

async fn predict(model: &RiskModel, args: PredictArgs) -> anyhow::Result<()> {
    let record = args.record();
    record.validate_ranges()?;
    cli::check_vocabulary(model, &record)?;

    let label = model.infer(&record).context("running risk inference")?;
    display::print_risk_level(&label);

    if args.no_explain {
        return Ok(());
    }

    let client = ExplainClient::new(args.explain.into_config())
        .context("configuring explanation client")?;
    let explanation = client
        .explain(&record.food_item, &record.guideline, &label)
        .await
        .context("generating AI explanation")?;
    display::print_explanation(&explanation);
    Ok(())
}
