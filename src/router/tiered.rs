//! Tiered heuristic router
//!
//! Deterministic routing from query features to one of four model tiers.
//! Zero I/O: every decision is pure CPU work over the query and history.
//!
//! Routes to generic model tiers (Low, Mid, High, Superior) based on:
//! - Code-complexity indicators and detected tech stack
//! - Surface complexity of the query text
//! - Length and shape of the conversation so far

use super::strategy::{self, ResponseStrategy};
use super::{ConversationMessage, ModelTier, RouterConfig, TaskType};
use crate::analysis::{QueryFeatures, TechStack, context};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ModelCatalog, ModelDescriptor, TierAssignments, TierModels};
use crate::tokens::{self, TokenEstimate};
use serde::Serialize;

/// Complexity threshold used when none is configured
pub const DEFAULT_THRESHOLD: f64 = 0.5;

const CASUAL_MAX_TOKENS: u32 = 50;
const CASUAL_TEMPERATURE: f64 = 0.7;

/// Code complexity above which the superior tier is always chosen
const SUPERIOR_CODE_COMPLEXITY: f64 = 0.8;
const SUPERIOR_MIN_TECH_TAGS: usize = 3;
const SUPERIOR_COMPLEXITY: f64 = 0.7;
const HIGH_CONTEXT_CHARS: usize = 8000;
const MID_CONTEXT_CHARS: usize = 4000;

/// History longer than this nudges temperature up
const LONG_HISTORY_MESSAGES: usize = 5;
const TEMPERATURE_BOOST: f64 = 1.1;
const MAX_TEMPERATURE: f64 = 1.0;
const EXPLANATION_TOKEN_BOOST: f64 = 1.2;
const RAPID_TOKEN_CUT: f64 = 0.8;
const MAX_TOKENS_CEILING: u32 = 4096;
const MAX_TOKENS_FLOOR: u32 = 128;

/// Routing decision paired with a token budget check for the chosen model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub config: RouterConfig,
    pub features: QueryFeatures,
    /// Estimate for the history plus the query as the next user turn
    pub estimate: TokenEstimate,
    /// True when the estimate uses over 80% of the model's context window
    pub approaching_context_limit: bool,
    pub suggested_chunk_size: usize,
}

/// Router with a fixed tier table
///
/// Immutable after construction, so one instance can serve any number of
/// threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TieredRouter {
    tiers: TierModels,
    threshold: f64,
}

impl TieredRouter {
    /// Create a router with the default threshold
    ///
    /// # Errors
    /// Returns an error if any tier's model is missing from the catalog or two
    /// tiers share a model.
    pub fn new(catalog: &ModelCatalog, assignments: &TierAssignments) -> AppResult<Self> {
        Self::with_threshold(catalog, assignments, DEFAULT_THRESHOLD)
    }

    /// Create a router with an explicit complexity threshold
    ///
    /// # Errors
    /// Returns `AppError::Config` for a negative or non-finite threshold, and
    /// the tier resolution errors of [`ModelCatalog::resolve_tiers`].
    pub fn with_threshold(
        catalog: &ModelCatalog,
        assignments: &TierAssignments,
        threshold: f64,
    ) -> AppResult<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AppError::Config(format!(
                "Router threshold must be a finite, non-negative number, got {}",
                threshold
            )));
        }

        let tiers = catalog.resolve_tiers(assignments)?;

        tracing::info!(
            threshold,
            low = tiers.get(ModelTier::Low).id(),
            mid = tiers.get(ModelTier::Mid).id(),
            high = tiers.get(ModelTier::High).id(),
            superior = tiers.get(ModelTier::Superior).id(),
            "Tiered router ready"
        );

        Ok(Self { tiers, threshold })
    }

    /// Build a router from a loaded configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let catalog = config.catalog()?;
        Self::with_threshold(&catalog, &config.tiers, config.router.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Model bound to `tier`
    pub fn tier(&self, tier: ModelTier) -> &ModelDescriptor {
        self.tiers.get(tier)
    }

    /// Extract the features a routing decision is based on
    pub fn analyze(&self, query: &str, history: &[ConversationMessage]) -> QueryFeatures {
        QueryFeatures::extract(query, history)
    }

    /// Choose a model and generation parameters for `query`
    ///
    /// Never fails: empty or degenerate input still yields a configuration.
    pub fn route(&self, query: &str, history: &[ConversationMessage]) -> RouterConfig {
        let features = self.analyze(query, history);
        self.route_with_features(&features, history)
    }

    /// Route, then estimate the resulting request against the chosen model
    pub fn plan(&self, query: &str, history: &[ConversationMessage]) -> RoutePlan {
        let features = self.analyze(query, history);
        let config = self.route_with_features(&features, history);

        let mut messages = history.to_vec();
        messages.push(ConversationMessage::user(query));
        let estimate = tokens::estimate_conversation_tokens(
            &messages,
            features.task_type,
            config.response_strategy,
        );

        let context_window = config.model.context_window();
        let approaching_context_limit = tokens::is_approaching_context_limit(&estimate, context_window);
        if approaching_context_limit {
            tracing::warn!(
                model = config.model.id(),
                context_window,
                total_tokens = estimate.total_tokens,
                "Estimated request is close to the model's context window"
            );
        }

        RoutePlan {
            suggested_chunk_size: tokens::suggest_chunk_size(estimate.total_tokens, context_window),
            approaching_context_limit,
            estimate,
            features,
            config,
        }
    }

    fn route_with_features(
        &self,
        features: &QueryFeatures,
        history: &[ConversationMessage],
    ) -> RouterConfig {
        // Casual chat skips every other rule and adjustment
        if features.task_type == TaskType::Casual {
            tracing::debug!(tier = ModelTier::Low.as_str(), "Casual query, using fixed config");
            return self.casual_config();
        }

        let tier = self.select_tier(features);
        let (max_tokens, temperature) = baseline(tier, features.task_type);
        let model = self.tiers.get(tier).clone();

        let mut config = RouterConfig {
            tier,
            routing_explanation: explain(&model, features),
            model,
            max_tokens,
            temperature,
            response_strategy: strategy::select_strategy(features.question_type, features.task_type),
            question_type: Some(features.question_type),
        };

        adjust_for_history(&mut config, history);

        tracing::debug!(
            tier = tier.as_str(),
            model = config.model.id(),
            complexity = features.complexity,
            code_complexity = features.code_complexity,
            context_length = features.context_length,
            task_type = features.task_type.as_str(),
            question_type = features.question_type.as_str(),
            strategy = config.response_strategy.as_str(),
            max_tokens = config.max_tokens,
            temperature = config.temperature,
            "Route decision made"
        );

        config
    }

    /// Pick a tier; first matching rule wins
    fn select_tier(&self, features: &QueryFeatures) -> ModelTier {
        // Rule 1: Heavy code signals, or a broad stack on a complex query → Superior
        if features.code_complexity > SUPERIOR_CODE_COMPLEXITY
            || (features.tech_stack.len() >= SUPERIOR_MIN_TECH_TAGS
                && features.complexity > SUPERIOR_COMPLEXITY)
        {
            return ModelTier::Superior;
        }

        // Rule 2: Moderate complexity, modest context, or a typed frontend stack → High
        if features.complexity < self.threshold * 1.5
            || features.context_length < HIGH_CONTEXT_CHARS
            || features.tech_stack.contains(&TechStack::Typescript)
            || features.tech_stack.contains(&TechStack::React)
        {
            return ModelTier::High;
        }

        // Rule 3: Simple query over a short context → Mid
        if features.complexity < self.threshold && features.context_length < MID_CONTEXT_CHARS {
            return ModelTier::Mid;
        }

        ModelTier::Low
    }

    fn casual_config(&self) -> RouterConfig {
        let model = self.tiers.get(ModelTier::Low).clone();
        RouterConfig {
            tier: ModelTier::Low,
            routing_explanation: format!(
                "Selected model: {}\nCasual conversation detected, using a short reply budget",
                model.name()
            ),
            model,
            max_tokens: CASUAL_MAX_TOKENS,
            temperature: CASUAL_TEMPERATURE,
            response_strategy: ResponseStrategy::CasualConversation,
            question_type: None,
        }
    }
}

/// Starting `(max_tokens, temperature)` for a tier
fn baseline(tier: ModelTier, task_type: TaskType) -> (u32, f64) {
    let precise = matches!(task_type, TaskType::Coding | TaskType::Analysis);

    match tier {
        ModelTier::Low => {
            let temperature = if task_type == TaskType::Casual { 0.7 } else { 0.5 };
            (256, temperature)
        }
        ModelTier::Mid => {
            let max_tokens = if matches!(task_type, TaskType::Analysis | TaskType::Creative) {
                768
            } else {
                512
            };
            (max_tokens, 0.7)
        }
        ModelTier::High => (1024, if precise { 0.7 } else { 0.9 }),
        ModelTier::Superior => (4096, if precise { 0.5 } else { 0.7 }),
    }
}

/// Explanation lines: model, complexity, context, task, stack, code complexity
fn explain(model: &ModelDescriptor, features: &QueryFeatures) -> String {
    format!(
        "Selected model: {}\nComplexity: {:.2}\nContext length: {}\nTask type: {}\nTech stack: {}\nCode complexity: {:.2}",
        model.name(),
        features.complexity,
        features.context_length,
        features.task_type,
        features.tech_stack_label(),
        features.code_complexity
    )
}

/// Tune temperature and token budget for the conversation so far
fn adjust_for_history(config: &mut RouterConfig, history: &[ConversationMessage]) {
    if history.len() > LONG_HISTORY_MESSAGES {
        config.temperature = (config.temperature * TEMPERATURE_BOOST).min(MAX_TEMPERATURE);
    }

    if context::has_explanation_requests(history) {
        let boosted = (f64::from(config.max_tokens) * EXPLANATION_TOKEN_BOOST).floor() as u32;
        config.max_tokens = boosted.min(MAX_TOKENS_CEILING);
    }

    if context::has_rapid_exchanges(history) {
        let reduced = (f64::from(config.max_tokens) * RAPID_TOKEN_CUT).floor() as u32;
        config.max_tokens = reduced.max(MAX_TOKENS_FLOOR);
    }
}
