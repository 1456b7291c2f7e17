//! Command-line arguments and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use safebyte_ai::RiskModel;
use safebyte_core::{CATEGORICAL_FIELDS, FeatureRecord};
use safebyte_explain::ExplainConfig;
use safebyte_explain::http::{DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// SafeByte: food spoilage risk predictor.
#[derive(Debug, Parser)]
#[command(name = "safebyte", version, about)]
pub struct Cli {
    /// Directory holding the exported model artifacts.
    #[arg(long, env = "SAFEBYTE_ARTIFACTS", default_value = ".", global = true)]
    pub artifacts: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the accepted values for each categorical input.
    Vocab,
    /// Predict the risk level of one food item and explain it.
    Predict(PredictArgs),
    /// Score every row of a Parquet file of feature records.
    Score(ScoreArgs),
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    #[arg(long)]
    pub food_item: String,
    /// Visual spoilage signs.
    #[arg(long)]
    pub visual_sign: String,
    /// Odor spoilage signs.
    #[arg(long)]
    pub odor_sign: String,
    #[arg(long)]
    pub storage_type: String,
    #[arg(long)]
    pub guideline: String,
    /// Observed fridge days (0-60).
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(0..=60))]
    pub fridge_days: u32,
    /// Observed freezer days (0-365).
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=365))]
    pub freezer_days: u32,
    /// Skip the AI explanation request.
    #[arg(long)]
    pub no_explain: bool,

    #[command(flatten)]
    pub explain: ExplainArgs,
}

impl PredictArgs {
    pub fn record(&self) -> FeatureRecord {
        FeatureRecord {
            food_item: self.food_item.clone(),
            spoilage_visual_signs: self.visual_sign.clone(),
            spoilage_odor_signs: self.odor_sign.clone(),
            storage_type: self.storage_type.clone(),
            guideline: self.guideline.clone(),
            observed_fridge_days: self.fridge_days,
            observed_freezer_days: self.freezer_days,
        }
    }
}

/// Settings for the hosted explanation model.
#[derive(Debug, Args)]
pub struct ExplainArgs {
    /// API token for the inference endpoint.
    #[arg(long, env = "HF_TOKEN", hide_env_values = true, default_value = "")]
    pub hf_token: String,
    #[arg(long, env = "SAFEBYTE_LLM_MODEL", default_value = DEFAULT_MODEL)]
    pub llm_model: String,
    #[arg(long, env = "SAFEBYTE_LLM_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub llm_base_url: String,
    #[arg(long, env = "SAFEBYTE_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
    #[arg(long, env = "SAFEBYTE_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    pub temperature: f32,
    /// Request timeout in seconds; unset uses the HTTP client default.
    #[arg(long, env = "SAFEBYTE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl ExplainArgs {
    pub fn into_config(self) -> ExplainConfig {
        ExplainConfig {
            base_url: self.llm_base_url,
            model: self.llm_model,
            token: self.hf_token,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Parquet file with the seven feature columns.
    pub input: PathBuf,
    /// Write the input rows plus a `risk_level` column to this Parquet file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Reject categorical values outside the fitted vocabulary, listing the accepted ones.
pub fn check_vocabulary(model: &RiskModel, record: &FeatureRecord) -> anyhow::Result<()> {
    for &field in CATEGORICAL_FIELDS {
        let (Some(value), Some(vocab)) = (record.category(field), model.vocabulary(field)) else {
            continue;
        };
        if !vocab.iter().any(|v| v == value) {
            anyhow::bail!(
                "{value:?} is not a valid {field}; choose one of: {}",
                vocab.join(", ")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn predict_args_build_record() {
        let cli = Cli::try_parse_from([
            "safebyte",
            "--artifacts",
            "models",
            "predict",
            "--food-item",
            "Milk",
            "--visual-sign",
            "None",
            "--odor-sign",
            "None",
            "--storage-type",
            "Fridge",
            "--guideline",
            "USDA",
            "--no-explain",
        ])
        .unwrap();
        assert_eq!(cli.artifacts, PathBuf::from("models"));
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        let record = args.record();
        assert_eq!(record.food_item, "Milk");
        assert_eq!(record.observed_fridge_days, 2);
        assert_eq!(record.observed_freezer_days, 0);
        assert!(args.no_explain);
    }

    #[test]
    fn fridge_days_bounded() {
        let result = Cli::try_parse_from([
            "safebyte",
            "predict",
            "--food-item",
            "Milk",
            "--visual-sign",
            "None",
            "--odor-sign",
            "None",
            "--storage-type",
            "Fridge",
            "--guideline",
            "USDA",
            "--fridge-days",
            "61",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn explain_args_into_config() {
        let args = ExplainArgs {
            hf_token: "hf_abc".into(),
            llm_model: DEFAULT_MODEL.into(),
            llm_base_url: DEFAULT_BASE_URL.into(),
            max_tokens: 64,
            temperature: 0.1,
            timeout_secs: Some(30),
        };
        let config = args.into_config();
        assert_eq!(config.token, "hf_abc");
        assert_eq!(config.max_tokens, 64);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }
}
