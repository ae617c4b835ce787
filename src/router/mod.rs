//! Routing logic for Monkeyroute
//!
//! Classifies a query and its conversation history, then selects a model tier
//! and the generation parameters to use with it.

pub mod strategy;
pub mod tiered;

pub use strategy::ResponseStrategy;
pub use tiered::{RoutePlan, TieredRouter};

use crate::models::ModelDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Model selection tier
///
/// Maps to config.toml: tiers.low, tiers.mid, tiers.high, tiers.superior.
/// The concrete model for each tier comes from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Low,
    Mid,
    High,
    Superior,
}

impl ModelTier {
    /// Every tier, cheapest first
    pub const ALL: [ModelTier; 4] = [Self::Low, Self::Mid, Self::High, Self::Superior];

    /// Convert to string representation for logging and serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
            Self::Superior => "superior",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One prior turn of the conversation, oldest first in a history slice
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Coarse intent of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Coding,
    Analysis,
    Creative,
    Casual,
    #[default]
    General,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coding => "coding",
            Self::Analysis => "analysis",
            Self::Creative => "creative",
            Self::Casual => "casual",
            Self::General => "general",
        }
    }

    /// Parse a label, falling back to `General` for anything unrecognized
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "coding" => Self::Coding,
            "analysis" => Self::Analysis,
            "creative" => Self::Creative,
            "casual" => Self::Casual,
            _ => Self::General,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rhetorical form of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ProblemSolving,
    Factual,
    YesNo,
    Analysis,
    Casual,
    #[default]
    OpenEnded,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProblemSolving => "problem_solving",
            Self::Factual => "factual",
            Self::YesNo => "yes_no",
            Self::Analysis => "analysis",
            Self::Casual => "casual",
            Self::OpenEnded => "open_ended",
        }
    }

    /// Parse a label, falling back to `OpenEnded` for anything unrecognized
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "problem_solving" => Self::ProblemSolving,
            "factual" => Self::Factual,
            "yes_no" => Self::YesNo,
            "analysis" => Self::Analysis,
            "casual" => Self::Casual,
            _ => Self::OpenEnded,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a routing decision
///
/// Created fresh for every call to [`TieredRouter::route`]. The model is shared
/// with the router's tier table, never copied or mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterConfig {
    /// Tier the model was selected from
    pub tier: ModelTier,
    /// Descriptor of the selected model
    pub model: Arc<ModelDescriptor>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub response_strategy: ResponseStrategy,
    /// Multi-line, human-readable reasoning for the decision
    pub routing_explanation: String,
    /// Classified question form; absent on the casual fast path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_tier_as_str() {
        assert_eq!(ModelTier::Low.as_str(), "low");
        assert_eq!(ModelTier::Mid.as_str(), "mid");
        assert_eq!(ModelTier::High.as_str(), "high");
        assert_eq!(ModelTier::Superior.as_str(), "superior");
    }

    #[test]
    fn test_model_tier_serde() {
        assert_eq!(
            serde_json::from_str::<ModelTier>(r#""superior""#).unwrap(),
            ModelTier::Superior
        );
        assert_eq!(serde_json::to_string(&ModelTier::Mid).unwrap(), r#""mid""#);
        assert!(serde_json::from_str::<ModelTier>(r#""LOW""#).is_err());
    }

    #[test]
    fn test_model_tier_all_is_ordered_cheapest_first() {
        let mut sorted = ModelTier::ALL;
        sorted.sort();
        assert_eq!(sorted, ModelTier::ALL);
    }

    #[test]
    fn test_task_type_default() {
        assert_eq!(TaskType::default(), TaskType::General);
    }

    #[test]
    fn test_question_type_default() {
        assert_eq!(QuestionType::default(), QuestionType::OpenEnded);
    }

    #[test]
    fn test_task_type_from_label_falls_back_to_general() {
        assert_eq!(TaskType::from_label("coding"), TaskType::Coding);
        assert_eq!(TaskType::from_label(" Creative "), TaskType::Creative);
        assert_eq!(TaskType::from_label("poetry-slam"), TaskType::General);
        assert_eq!(TaskType::from_label(""), TaskType::General);
    }

    #[test]
    fn test_question_type_from_label_falls_back_to_open_ended() {
        assert_eq!(QuestionType::from_label("yes_no"), QuestionType::YesNo);
        assert_eq!(
            QuestionType::from_label("problem_solving"),
            QuestionType::ProblemSolving
        );
        assert_eq!(QuestionType::from_label("rhetorical"), QuestionType::OpenEnded);
    }

    #[test]
    fn test_conversation_message_serde() {
        let msg: ConversationMessage =
            serde_json::from_str(r#"{"role":"assistant","content":"hi there"}"#).unwrap();
        assert_eq!(msg, ConversationMessage::assistant("hi there"));

        assert!(
            serde_json::from_str::<ConversationMessage>(r#"{"role":"tool","content":"x"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_role_as_str_matches_serde() {
        for role in [Role::System, Role::User, Role::Assistant] {
            assert_eq!(
                serde_json::to_string(&role).unwrap(),
                format!("\"{}\"", role.as_str())
            );
        }
    }
}
