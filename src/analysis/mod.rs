//! Text analyzers
//!
//! Pure feature extraction over a query and its conversation history. Nothing
//! here allocates shared state; patterns are compiled once per process.

pub mod code;
pub mod context;
pub mod tech_stack;

pub use code::CodeIndicator;
pub use tech_stack::TechStack;

use crate::router::{ConversationMessage, QuestionType, TaskType};
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything the router knows about one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFeatures {
    /// Surface complexity of the query text, `0.0..=1.0`
    pub complexity: f64,
    /// Characters across the prior conversation
    pub context_length: usize,
    pub task_type: TaskType,
    pub question_type: QuestionType,
    pub tech_stack: BTreeSet<TechStack>,
    /// Fraction of code indicators present, `0.0..=1.0`
    pub code_complexity: f64,
}

impl QueryFeatures {
    /// Run every analyzer over `query` and `history`
    pub fn extract(query: &str, history: &[ConversationMessage]) -> Self {
        Self {
            complexity: context::assess_complexity(query),
            context_length: context::calculate_context_length(history),
            task_type: context::identify_task_type(query),
            question_type: context::classify_question(query),
            tech_stack: tech_stack::analyze(query),
            code_complexity: code::analyze_complexity(query),
        }
    }

    /// Tech stack as a comma-separated list, or `none`
    pub fn tech_stack_label(&self) -> String {
        if self.tech_stack.is_empty() {
            "none".to_string()
        } else {
            self.tech_stack
                .iter()
                .map(TechStack::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}
