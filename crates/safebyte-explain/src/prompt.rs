//! Prompt templates for risk explanations.

use safebyte_core::RiskLabel;

pub const SYSTEM_PROMPT: &str = "\
You are a food safety expert. Respond with EXACTLY 3 complete sentences in one paragraph. \
Do NOT use bullet points, numbering, or headings. \
Make sure each sentence ends properly with a full stop.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: ChatRole,
    pub content: String,
}

pub fn build_user_prompt(food_item: &str, guideline: &str, label: &RiskLabel) -> String {
    format!(
        "Food item: {food_item}\n\
         Guideline followed: {guideline}\n\
         Predicted risk level: {label}\n\
         \n\
         Explain the reason for this risk level in simple language."
    )
}

/// System instruction followed by the user question.
pub fn build_messages(food_item: &str, guideline: &str, label: &RiskLabel) -> [PromptMessage; 2] {
    [
        PromptMessage {
            role: ChatRole::System,
            content: SYSTEM_PROMPT.to_string(),
        },
        PromptMessage {
            role: ChatRole::User,
            content: build_user_prompt(food_item, guideline, label),
        },
    ]
}
