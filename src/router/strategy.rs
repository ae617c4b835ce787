//! Response strategy selection
//!
//! A response strategy is a hint for the shape of the answer. It drives the
//! expected response length in token estimation.

use super::{ConversationMessage, QuestionType, TaskType};
use crate::analysis::context;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Context length above which step-by-step answers are downgraded
const LONG_CONTEXT_CHARS: usize = 4000;

/// Named generation-shape hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStrategy {
    CasualConversation,
    DirectAnswer,
    ChainOfThought,
    BooleanWithExplanation,
    ComparativeAnalysis,
    OpenDiscussion,
    CodeGeneration,
    DebugExplanation,
}

impl ResponseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CasualConversation => "casual_conversation",
            Self::DirectAnswer => "direct_answer",
            Self::ChainOfThought => "chain_of_thought",
            Self::BooleanWithExplanation => "boolean_with_explanation",
            Self::ComparativeAnalysis => "comparative_analysis",
            Self::OpenDiscussion => "open_discussion",
            Self::CodeGeneration => "code_generation",
            Self::DebugExplanation => "debug_explanation",
        }
    }

    /// Parse a label; `None` for anything unrecognized
    pub fn from_label(label: &str) -> Option<Self> {
        let strategy = match label.trim().to_ascii_lowercase().as_str() {
            "casual_conversation" => Self::CasualConversation,
            "direct_answer" => Self::DirectAnswer,
            "chain_of_thought" => Self::ChainOfThought,
            "boolean_with_explanation" => Self::BooleanWithExplanation,
            "comparative_analysis" => Self::ComparativeAnalysis,
            "open_discussion" => Self::OpenDiscussion,
            "code_generation" => Self::CodeGeneration,
            "debug_explanation" => Self::DebugExplanation,
            _ => return None,
        };
        Some(strategy)
    }

    /// Expected response length relative to the prompt
    pub fn token_multiplier(&self) -> f64 {
        match self {
            Self::CasualConversation => 1.0,
            Self::DirectAnswer => 1.2,
            Self::ChainOfThought => 2.0,
            Self::BooleanWithExplanation => 1.5,
            Self::ComparativeAnalysis => 2.5,
            Self::OpenDiscussion => 1.8,
            Self::CodeGeneration => 3.0,
            Self::DebugExplanation => 2.5,
        }
    }
}

impl fmt::Display for ResponseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token multiplier for a strategy label, 1.0 when the label is unknown
pub fn token_multiplier_for_label(label: &str) -> f64 {
    ResponseStrategy::from_label(label).map_or(1.0, |s| s.token_multiplier())
}

/// Pick the strategy for a classified query
///
/// Casual intent or form always chats; coding tasks either generate code
/// (problem solving) or explain; everything else follows the question form.
pub fn select_strategy(question_type: QuestionType, task_type: TaskType) -> ResponseStrategy {
    if task_type == TaskType::Casual || question_type == QuestionType::Casual {
        return ResponseStrategy::CasualConversation;
    }

    if task_type == TaskType::Coding {
        return if question_type == QuestionType::ProblemSolving {
            ResponseStrategy::CodeGeneration
        } else {
            ResponseStrategy::DebugExplanation
        };
    }

    match question_type {
        QuestionType::ProblemSolving => ResponseStrategy::ChainOfThought,
        QuestionType::Factual => ResponseStrategy::DirectAnswer,
        QuestionType::YesNo => ResponseStrategy::BooleanWithExplanation,
        QuestionType::Analysis => ResponseStrategy::ComparativeAnalysis,
        QuestionType::Casual => ResponseStrategy::CasualConversation,
        QuestionType::OpenEnded => ResponseStrategy::OpenDiscussion,
    }
}

/// Shorten a strategy to suit the conversation so far
///
/// Long contexts drop chain-of-thought; rapid back-and-forth drops everything
/// except casual conversation to a direct answer.
pub fn adjust_strategy(
    strategy: ResponseStrategy,
    history: &[ConversationMessage],
) -> ResponseStrategy {
    let mut adjusted = strategy;

    if adjusted == ResponseStrategy::ChainOfThought
        && context::calculate_context_length(history) > LONG_CONTEXT_CHARS
    {
        adjusted = ResponseStrategy::DirectAnswer;
    }

    if adjusted != ResponseStrategy::CasualConversation && context::has_rapid_exchanges(history) {
        adjusted = ResponseStrategy::DirectAnswer;
    }

    if adjusted != strategy {
        tracing::debug!(
            from = strategy.as_str(),
            to = adjusted.as_str(),
            history_len = history.len(),
            "Adjusted response strategy for conversation shape"
        );
    }

    adjusted
}
