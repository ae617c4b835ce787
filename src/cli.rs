//! Command-line interface for Monkeyroute
//!
//! Provides argument parsing and subcommand handling for the Monkeyroute binary.

use crate::error::{AppError, AppResult};
use crate::router::ConversationMessage;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Heuristic query router for multi-model chat applications
#[derive(Parser)]
#[command(name = "monkeyroute")]
#[command(version)]
#[command(about = "Heuristic query router for multi-model chat applications")]
#[command(
    long_about = "Monkeyroute inspects a query and its conversation history and picks a model \
    tier (low, mid, high, superior), a token budget, a temperature and a response strategy."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Route a query and print the decision with its token estimate as JSON
    Route {
        /// The user's latest message
        query: String,

        /// JSON file holding prior messages: [{"role": "user", "content": "..."}]
        #[arg(long)]
        history: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the features extracted from a query as JSON
    Analyze {
        /// The user's latest message
        query: String,

        /// JSON file holding prior messages
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Generate a template configuration file
    Config {
        /// Output file path (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Read a conversation history from a JSON file, or an empty history
pub fn load_history(path: Option<&Path>) -> AppResult<Vec<ConversationMessage>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::Validation(format!(
            "Failed to read history file {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        AppError::Validation(format!(
            "History file {} is not a JSON array of {{role, content}} messages: {}",
            path.display(),
            e
        ))
    })
}

/// Generate template configuration content
pub fn generate_config_template() -> &'static str {
    r#"# Monkeyroute Configuration
# ==========================
#
# This file declares the model catalog, which model serves each routing tier,
# and router/observability settings.

# ─────────────────────────────────────────────────────────────────────────────
# ROUTER
# ─────────────────────────────────────────────────────────────────────────────

[router]
# Complexity threshold. Queries scoring below threshold * 1.5 go to the high tier.
threshold = 0.5

# ─────────────────────────────────────────────────────────────────────────────
# TIERS
# ─────────────────────────────────────────────────────────────────────────────
#
# Each tier names one model id from the catalog below. All four are required
# and must be different models.
#
#   - LOW: casual chat, terse replies
#   - MID: simple questions over short conversations
#   - HIGH: the default for most technical and general questions
#   - SUPERIOR: code-heavy, architectural or broad multi-technology work

[tiers]
low = "gpt-4o-mini"
mid = "claude-3-haiku"
high = "gpt-4o"
superior = "claude-3-opus"

# ─────────────────────────────────────────────────────────────────────────────
# MODEL CATALOG
# ─────────────────────────────────────────────────────────────────────────────
#
# Fields:
#   - id: Unique identifier referenced by [tiers]
#   - name: Display name, used in routing explanations
#   - provider: openai, anthropic, google, mistral, groq, local (anything else = other)
#   - context_window: Prompt + completion token limit
#   - max_output_tokens: Completion token limit
#   - temperature: Default sampling temperature (0.0-2.0, default 0.7)
#   - top_p: Default nucleus sampling (0.0-1.0, default 1.0)

[[models]]
id = "gpt-4o-mini"
name = "GPT-4o Mini"
provider = "openai"
context_window = 128000
max_output_tokens = 16384
temperature = 0.7
top_p = 1.0

[[models]]
id = "claude-3-haiku"
name = "Claude 3 Haiku"
provider = "anthropic"
context_window = 200000
max_output_tokens = 4096

[[models]]
id = "gpt-4o"
name = "GPT-4o"
provider = "openai"
context_window = 128000
max_output_tokens = 16384

[[models]]
id = "claude-3-opus"
name = "Claude 3 Opus"
provider = "anthropic"
context_window = 200000
max_output_tokens = 4096

# ─────────────────────────────────────────────────────────────────────────────
# OBSERVABILITY
# ─────────────────────────────────────────────────────────────────────────────

[observability]
# Log level: "trace", "debug", "info", "warn", "error" (RUST_LOG overrides)
log_level = "info"
"#
}
