//! Model descriptors
//!
//! A descriptor is an immutable record of one model in the catalog. Fields are
//! private; descriptors are built through deserialization or [`ModelDescriptor::new`]
//! and checked with [`ModelDescriptor::validate`] before a router uses them.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider that serves a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Google,
    Mistral,
    Groq,
    Local,
    #[serde(other)]
    Other,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Google => "google",
            Self::Mistral => "mistral",
            Self::Groq => "groq",
            Self::Local => "local",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Individual model entry in the catalog
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelDescriptor {
    id: String,
    name: String,
    provider: Provider,
    /// Maximum prompt + completion tokens the model accepts
    context_window: u32,
    max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default = "default_top_p")]
    top_p: f64,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    1.0
}

impl ModelDescriptor {
    /// Create a descriptor with default sampling parameters
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        provider: Provider,
        context_window: u32,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider,
            context_window,
            max_output_tokens,
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }

    /// Override the default sampling parameters
    pub fn with_sampling(mut self, temperature: f64, top_p: f64) -> Self {
        self.temperature = temperature;
        self.top_p = top_p;
        self
    }

    /// Unique catalog identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable model name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Token limit for prompt and completion combined
    pub fn context_window(&self) -> u32 {
        self.context_window
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Default sampling temperature
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Default nucleus sampling parameter
    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    /// Check field ranges
    ///
    /// # Errors
    /// Returns `AppError::Config` naming the offending model and field.
    pub fn validate(&self) -> AppResult<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Model '{}' has an empty id",
                self.name
            )));
        }

        if self.context_window == 0 {
            return Err(AppError::Config(format!(
                "Model '{}' has context_window=0. context_window must be greater than 0.",
                self.id
            )));
        }

        if self.max_output_tokens == 0 {
            return Err(AppError::Config(format!(
                "Model '{}' has max_output_tokens=0. max_output_tokens must be greater than 0.",
                self.id
            )));
        }

        if self.max_output_tokens > self.context_window {
            return Err(AppError::Config(format!(
                "Model '{}' has max_output_tokens={} which exceeds its context_window={}",
                self.id, self.max_output_tokens, self.context_window
            )));
        }

        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::Config(format!(
                "Model '{}' has invalid temperature {}. \
                temperature must be a finite number between 0.0 and 2.0.",
                self.id, self.temperature
            )));
        }

        if !self.top_p.is_finite() || self.top_p <= 0.0 || self.top_p > 1.0 {
            return Err(AppError::Config(format!(
                "Model '{}' has invalid top_p {}. top_p must be in (0.0, 1.0].",
                self.id, self.top_p
            )));
        }

        Ok(())
    }
}
