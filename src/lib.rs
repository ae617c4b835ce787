//! Monkeyroute - heuristic query router for multi-model chat applications
//!
//! This library inspects a user query and the conversation so far, then picks
//! a model tier, token budget, temperature and response strategy for the
//! next reply. It performs no I/O; dispatching the request is up to the caller.
//!
//! ```no_run
//! use monkeyroute::config::Config;
//! use monkeyroute::router::{ConversationMessage, TieredRouter};
//!
//! let config = Config::from_file("config.toml")?;
//! let router = TieredRouter::from_config(&config)?;
//!
//! let history = vec![ConversationMessage::user("I'm building a chat app")];
//! let decision = router.route("How do I use React hooks with TypeScript?", &history);
//! println!("{} ({} tokens)", decision.model.name(), decision.max_tokens);
//! # Ok::<(), monkeyroute::error::AppError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod telemetry;
pub mod tokens;
