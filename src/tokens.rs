//! Token estimation for context budgeting
//!
//! Character-ratio heuristics, not a tokenizer. Estimates are rounded up so a
//! budget built on them errs on the generous side.

use crate::router::{ConversationMessage, ResponseStrategy, TaskType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Share of a model's context window usable before chunking is advised
const CONTEXT_SAFETY_RATIO: f64 = 0.8;

/// Fenced code block, fences included, non-greedy across newlines
static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));

/// Kind of text being estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// English prose
    En,
    Code,
    Json,
}

impl ContentType {
    /// Tokens per character
    pub fn ratio(&self) -> f64 {
        match self {
            Self::En => 0.25,
            Self::Code => 0.35,
            Self::Json => 0.40,
        }
    }
}

/// Estimated token usage for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenEstimate {
    pub prompt_tokens: usize,
    pub expected_response_tokens: usize,
    /// Always `prompt_tokens + expected_response_tokens`
    pub total_tokens: usize,
}

impl TokenEstimate {
    pub fn new(prompt_tokens: usize, expected_response_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            expected_response_tokens,
            total_tokens: prompt_tokens + expected_response_tokens,
        }
    }
}

/// Expected response length relative to the prompt for a task type
pub fn task_type_multiplier(task_type: TaskType) -> f64 {
    match task_type {
        TaskType::Coding => 2.0,
        TaskType::Analysis => 1.8,
        TaskType::Creative => 1.5,
        TaskType::Casual => 0.8,
        TaskType::General => 1.0,
    }
}

/// Task multiplier for a label, 1.0 when the label is unknown
pub fn task_multiplier_for_label(label: &str) -> f64 {
    // from_label maps unknown labels to General, whose multiplier is 1.0
    task_type_multiplier(TaskType::from_label(label))
}

/// `ceil(chars * ratio)` for the content type
pub fn estimate_tokens(text: &str, content_type: ContentType) -> usize {
    (text.chars().count() as f64 * content_type.ratio()).ceil() as usize
}

/// Estimate text mixing prose and fenced code blocks
///
/// Each block is estimated separately at the code ratio; the prose left after
/// removing the blocks is estimated at the English ratio.
pub fn estimate_code_tokens(text: &str) -> usize {
    let code_tokens: usize = CODE_BLOCK_RE
        .find_iter(text)
        .map(|block| estimate_tokens(block.as_str(), ContentType::Code))
        .sum();
    let prose = CODE_BLOCK_RE.replace_all(text, "");

    code_tokens + estimate_tokens(&prose, ContentType::En)
}

/// Per-message framing overhead: the role serialized as JSON
fn message_overhead(message: &ConversationMessage) -> usize {
    let metadata = serde_json::json!({ "role": message.role.as_str() }).to_string();
    estimate_tokens(&metadata, ContentType::Json)
}

/// Estimate prompt and response size for a conversation
pub fn estimate_conversation_tokens(
    messages: &[ConversationMessage],
    task_type: TaskType,
    response_strategy: ResponseStrategy,
) -> TokenEstimate {
    let prompt_tokens: usize = messages
        .iter()
        .map(|m| estimate_code_tokens(&m.content) + message_overhead(m))
        .sum();

    let expected_response_tokens = (prompt_tokens as f64
        * response_strategy.token_multiplier()
        * task_type_multiplier(task_type))
    .ceil() as usize;

    TokenEstimate::new(prompt_tokens, expected_response_tokens)
}

/// True when the estimate uses more than 80% of `model_limit`
pub fn is_approaching_context_limit(estimate: &TokenEstimate, model_limit: u32) -> bool {
    estimate.total_tokens as f64 > f64::from(model_limit) * CONTEXT_SAFETY_RATIO
}

/// Largest chunk that keeps a 20% safety margin under `model_limit`
///
/// `_total_tokens` is accepted for call-site symmetry; the size depends only on
/// the limit.
pub fn suggest_chunk_size(_total_tokens: usize, model_limit: u32) -> usize {
    (f64::from(model_limit) * CONTEXT_SAFETY_RATIO).floor() as usize
}

/// Cost of the whole estimate at a flat per-token price
pub fn estimate_cost(estimate: &TokenEstimate, price_per_token: f64) -> f64 {
    estimate.total_tokens as f64 * price_per_token
}
