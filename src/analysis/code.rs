//! Code complexity indicators
//!
//! Seven fixed indicator patterns. The complexity score is the fraction of
//! indicators that match; routing uses that unweighted ratio.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Code-complexity signal category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeIndicator {
    DataStructures,
    Algorithms,
    Patterns,
    Architecture,
    Async,
    Performance,
    Security,
}

impl CodeIndicator {
    pub const ALL: [CodeIndicator; 7] = [
        Self::DataStructures,
        Self::Algorithms,
        Self::Patterns,
        Self::Architecture,
        Self::Async,
        Self::Performance,
        Self::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataStructures => "data_structures",
            Self::Algorithms => "algorithms",
            Self::Patterns => "patterns",
            Self::Architecture => "architecture",
            Self::Async => "async",
            Self::Performance => "performance",
            Self::Security => "security",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::DataStructures => &DATA_STRUCTURES_RE,
            Self::Algorithms => &ALGORITHMS_RE,
            Self::Patterns => &PATTERNS_RE,
            Self::Architecture => &ARCHITECTURE_RE,
            Self::Async => &ASYNC_RE,
            Self::Performance => &PERFORMANCE_RE,
            Self::Security => &SECURITY_RE,
        }
    }
}

impl fmt::Display for CodeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static DATA_STRUCTURES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(arrays?|linked lists?|lists?|hash ?maps?|hash ?tables?|dictionar(y|ies)|trees?|graphs?|queues?|stacks?|heaps?|tries|buffers?|connections?)\b",
    )
    .expect("valid regex")
});

static ALGORITHMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(algorithms?|sort(ing)?|search(ing)?|recursion|recursive|dynamic programming|big[- ]?o|time complexity|travers(al|e)|consensus|distributed|shard(ing)?|hashing)\b",
    )
    .expect("valid regex")
});

static PATTERNS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(design|patterns?|singleton|factory|observer|decorator|adapter|dependency injection|mvc|mvvm)\b",
    )
    .expect("valid regex")
});

static ARCHITECTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(architecture|architect|systems?|microservices?|monolith(ic)?|scalab(le|ility)|infrastructure|modules?|layers?)\b",
    )
    .expect("valid regex")
});

static ASYNC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(async|await|asynchronous|promises?|concurren(t|cy)|parallel(ism)?|threads?|multi-?threaded|callbacks?|websockets?|event loop|streams?)\b",
    )
    .expect("valid regex")
});

static PERFORMANCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(performance|optimi[sz](e|ed|ing|ation)|efficien(t|cy)|latency|throughput|millions?|billions?|scal(e|ing)|cach(e|ing)|memory|bottlenecks?)\b",
    )
    .expect("valid regex")
});

static SECURITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(security|secure|vulnerabilit(y|ies)|encrypt(ion|ed)?|auth(entication|orization)?|sanitiz(e|ation)|injection|xss|csrf|exploits?)\b",
    )
    .expect("valid regex")
});

/// Indicators present in `query`
pub fn indicators(query: &str) -> BTreeSet<CodeIndicator> {
    CodeIndicator::ALL
        .into_iter()
        .filter(|indicator| indicator.pattern().is_match(query))
        .collect()
}

/// Fraction of the seven indicators that match, in `0.0..=1.0`
pub fn analyze_complexity(query: &str) -> f64 {
    indicators(query).len() as f64 / CodeIndicator::ALL.len() as f64
}

/// Relative importance of an indicator, in `0.6..=1.0`
pub fn indicator_weight(indicator: CodeIndicator) -> f64 {
    match indicator {
        CodeIndicator::DataStructures => 0.7,
        CodeIndicator::Algorithms => 0.9,
        CodeIndicator::Patterns => 0.6,
        CodeIndicator::Architecture => 1.0,
        CodeIndicator::Async => 0.8,
        CodeIndicator::Performance => 0.8,
        CodeIndicator::Security => 0.9,
    }
}

/// Matched weight over total weight, in `0.0..=1.0`
///
/// Not used by the router's tier gate.
pub fn weighted_complexity(query: &str) -> f64 {
    let total: f64 = CodeIndicator::ALL.into_iter().map(indicator_weight).sum();
    let matched: f64 = indicators(query).into_iter().map(indicator_weight).sum();
    matched / total
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISTRIBUTED: &str =
        "Design a distributed system for handling millions of concurrent websocket connections";

    #[test]
    fn test_distributed_system_query_hits_six_indicators() {
        let found = indicators(DISTRIBUTED);
        assert_eq!(
            found,
            BTreeSet::from([
                CodeIndicator::DataStructures,
                CodeIndicator::Algorithms,
                CodeIndicator::Patterns,
                CodeIndicator::Architecture,
                CodeIndicator::Async,
                CodeIndicator::Performance,
            ])
        );
        assert!(analyze_complexity(DISTRIBUTED) > 0.8);
    }

    #[test]
    fn test_plain_question_has_zero_complexity() {
        assert_eq!(analyze_complexity("How do I use React hooks with TypeScript?"), 0.0);
        assert_eq!(analyze_complexity(""), 0.0);
    }

    #[test]
    fn test_complexity_is_match_count_over_seven() {
        // async + performance
        let score = analyze_complexity("make this async loop faster with caching");
        assert_eq!(score, 2.0 / 7.0);
    }

    #[test]
    fn test_every_indicator_matched_gives_one() {
        let query = "design a secure, scalable system architecture with a priority queue, \
                     a sorting algorithm, async workers and caching";
        assert_eq!(indicators(query).len(), 7);
        assert_eq!(analyze_complexity(query), 1.0);
    }

    #[test]
    fn test_weights_in_documented_range() {
        for indicator in CodeIndicator::ALL {
            let weight = indicator_weight(indicator);
            assert!(
                (0.6..=1.0).contains(&weight),
                "{} weight {} out of range",
                indicator,
                weight
            );
        }
    }

    #[test]
    fn test_weighted_complexity_bounds() {
        assert_eq!(weighted_complexity("hello"), 0.0);
        let full = "design a secure, scalable system architecture with a priority queue, \
                    a sorting algorithm, async workers and caching";
        assert!((weighted_complexity(full) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_complexity_favours_heavier_indicators() {
        // architecture (1.0) outweighs patterns (0.6)
        assert!(weighted_complexity("the architecture") > weighted_complexity("the pattern"));
    }
}
