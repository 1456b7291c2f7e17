//! Terminal rendering for predictions, explanations, and vocabularies.
//!
//! Risk levels are colored by tier: red for high, orange for medium, green
//! otherwise. Color is dropped when stdout is not a terminal or `NO_COLOR`
//! is set.

use std::io::IsTerminal;

use safebyte_ai::RiskModel;
use safebyte_core::{CATEGORICAL_FIELDS, RiskLabel, RiskTier};
use safebyte_explain::Explanation;

use crate::score::ScoreSummary;

const RESET: &str = "\x1b[0m";

fn ansi(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "\x1b[1;31m",
        // 256-color orange.
        RiskTier::Medium => "\x1b[1;38;5;208m",
        RiskTier::Low => "\x1b[1;32m",
    }
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Human-readable field label, as shown on the input form.
fn field_title(field: &str) -> &str {
    match field {
        "food_item" => "Food Item",
        "spoilage_visual_signs" => "Visual Spoilage Signs",
        "spoilage_odor_signs" => "Odor Spoilage Signs",
        "storage_type" => "Storage Type",
        "guideline" => "Guideline",
        other => other,
    }
}

pub fn format_risk_level(label: &RiskLabel, color: bool) -> String {
    let text = format!("Predicted Risk Level: {label}");
    if color {
        format!("{}{text}{RESET}", ansi(label.tier()))
    } else {
        format!("{text} [{}]", label.tier().color_name())
    }
}

pub fn print_risk_level(label: &RiskLabel) {
    println!("{}", format_risk_level(label, use_color()));
}

pub fn format_explanation(explanation: &Explanation) -> String {
    format!(
        "AI Explanation ({}, {})\n{}\n",
        explanation.model,
        explanation.generated_at.format("%Y-%m-%d %H:%M UTC"),
        explanation.text
    )
}

pub fn print_explanation(explanation: &Explanation) {
    println!();
    print!("{}", format_explanation(explanation));
}

pub fn format_vocabulary(model: &RiskModel) -> String {
    let mut out = String::new();
    for &field in CATEGORICAL_FIELDS {
        let Some(vocab) = model.vocabulary(field) else {
            continue;
        };
        out.push_str(&format!("── {} ({field}) ──\n", field_title(field)));
        for value in vocab {
            out.push_str(&format!("  {value}\n"));
        }
    }
    out.push_str(&format!(
        "── Risk Levels ──\n  {}\n",
        model.risk_levels().join(", ")
    ));
    out
}

pub fn print_vocabulary(model: &RiskModel) {
    print!("{}", format_vocabulary(model));
}

pub fn format_score_summary(summary: &ScoreSummary) -> String {
    let mut out = format!("Scored {} rows", summary.rows);
    if let Some(path) = &summary.output {
        out.push_str(&format!(" → {}", path.display()));
    }
    out.push('\n');
    for (label, count) in &summary.by_label {
        out.push_str(&format!("  {label:<10} {count}\n"));
    }
    out
}

pub fn print_score_summary(summary: &ScoreSummary) {
    print!("{}", format_score_summary(summary));
}
