//! Technology keyword detection
//!
//! Each [`TechStack`] tag has one case-insensitive pattern; a tag is present
//! when its pattern matches anywhere in the query.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Detected technology category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TechStack {
    Typescript,
    React,
    Node,
    Database,
    Testing,
    Deployment,
    Security,
}

impl TechStack {
    pub const ALL: [TechStack; 7] = [
        Self::Typescript,
        Self::React,
        Self::Node,
        Self::Database,
        Self::Testing,
        Self::Deployment,
        Self::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Typescript => "typescript",
            Self::React => "react",
            Self::Node => "node",
            Self::Database => "database",
            Self::Testing => "testing",
            Self::Deployment => "deployment",
            Self::Security => "security",
        }
    }

    /// Complexity weight applied by [`complexity_multiplier`]
    pub fn weight(&self) -> f64 {
        match self {
            Self::Typescript => 1.2,
            Self::React => 1.15,
            Self::Node => 1.1,
            Self::Database => 1.25,
            Self::Testing => 1.1,
            Self::Deployment => 1.2,
            Self::Security => 1.3,
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::Typescript => &TYPESCRIPT_RE,
            Self::React => &REACT_RE,
            Self::Node => &NODE_RE,
            Self::Database => &DATABASE_RE,
            Self::Testing => &TESTING_RE,
            Self::Deployment => &DEPLOYMENT_RE,
            Self::Security => &SECURITY_RE,
        }
    }
}

impl fmt::Display for TechStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// -- Regex patterns compiled once via LazyLock --

static TYPESCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(typescript|tsx?|tsconfig)\b").expect("valid regex"));

static REACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(react|jsx|hooks?|use(state|effect|memo|callback|context|reducer|ref)|redux|next\.?js)\b",
    )
    .expect("valid regex")
});

static NODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(node(\.?js)?|npm|yarn|pnpm|express|deno)\b").expect("valid regex")
});

static DATABASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(databases?|db|sql|postgres(ql)?|mysql|sqlite|mongo(db)?|redis|supabase|firebase|pinecone|schemas?|migrations?)\b",
    )
    .expect("valid regex")
});

static TESTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(tests?|testing|jest|vitest|mocha|cypress|playwright|e2e|coverage|mocks?|mocking)\b",
    )
    .expect("valid regex")
});

static DEPLOYMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(deploy(s|ed|ing|ment)?|docker|kubernetes|k8s|ci/cd|vercel|netlify|heroku|aws|pipelines?)\b",
    )
    .expect("valid regex")
});

static SECURITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(security|secure|auth|authentication|authorization|oauth|jwt|encrypt(ion|ed)?|xss|csrf|vulnerabilit(y|ies)|passwords?)\b",
    )
    .expect("valid regex")
});

/// Detect every technology category mentioned in `query`
pub fn analyze(query: &str) -> BTreeSet<TechStack> {
    TechStack::ALL
        .into_iter()
        .filter(|tag| tag.pattern().is_match(query))
        .collect()
}

/// Product of the weights of `tags`, starting from 1.0
pub fn complexity_multiplier(tags: &BTreeSet<TechStack>) -> f64 {
    tags.iter().fold(1.0, |acc, tag| acc * tag.weight())
}
