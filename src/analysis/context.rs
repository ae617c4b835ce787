//! Query intent, question form and conversation shape
//!
//! Classifiers test their patterns in a fixed priority order and return the
//! first match. That order decides boundary cases (a query mentioning both code
//! and comparison is `coding`), so it must not be reshuffled.

use crate::router::{ConversationMessage, QuestionType, TaskType};
use regex::Regex;
use std::sync::LazyLock;

/// Number of trailing messages inspected for rapid exchanges
const RAPID_WINDOW: usize = 4;
/// A message shorter than this many words counts as rapid
const RAPID_MAX_WORDS: usize = 10;
/// Number of trailing messages inspected for explanation requests
const EXPLANATION_WINDOW: usize = 3;
const EXPLANATION_PREFIX: &str = "please explain";

static CODING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(code|coding|functions?|class|method|implement(ation)?|debug(ging)?|bugs?|errors?|exception|compiler?|compile|refactor|script|program(ming)?|api|syntax|typescript|javascript|python|rust|java|react|sql|regex)\b",
    )
    .expect("valid regex")
});

static ANALYSIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(analy[sz]e|analysis|compare|comparison|evaluate|evaluation|assess|review|pros and cons|trade-?offs?|differences?|versus|vs|insights?|statistics|metrics)\b",
    )
    .expect("valid regex")
});

static CREATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(write|story|stories|poem|poetry|creative|imagine|invent|compose|brainstorm|fiction|lyrics|song|narrative)\b",
    )
    .expect("valid regex")
});

static CASUAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(hi|hello|hey|howdy|greetings|good (morning|afternoon|evening)|how are you|how's it going|what's up|thanks|thank you|bye|goodbye)\b",
    )
    .expect("valid regex")
});

static PROBLEM_SOLVING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(how|why|explain)\b").expect("valid regex"));

static FACTUAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(what|who|when|where|which)\b").expect("valid regex"));

static YES_NO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(is|are|am|can|could|do|does|did|will|would|should|shall|has|have|had|was|were|may|might)\b",
    )
    .expect("valid regex")
});

static COMPARISON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(compare|contrast|differences?|versus|vs|better|worse|pros and cons|trade-?offs?)\b",
    )
    .expect("valid regex")
});

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[.!?]+").expect("valid regex"));

/// Classify the intent of `query`
///
/// Priority: coding, analysis, creative, casual; `General` otherwise.
pub fn identify_task_type(query: &str) -> TaskType {
    if CODING_RE.is_match(query) {
        TaskType::Coding
    } else if ANALYSIS_RE.is_match(query) {
        TaskType::Analysis
    } else if CREATIVE_RE.is_match(query) {
        TaskType::Creative
    } else if CASUAL_RE.is_match(query) {
        TaskType::Casual
    } else {
        TaskType::General
    }
}

/// Classify the rhetorical form of `query`
///
/// Priority: how/why/explain, wh-words, leading auxiliary verb, comparison
/// words, greetings; `OpenEnded` otherwise.
pub fn classify_question(query: &str) -> QuestionType {
    if PROBLEM_SOLVING_RE.is_match(query) {
        QuestionType::ProblemSolving
    } else if FACTUAL_RE.is_match(query) {
        QuestionType::Factual
    } else if YES_NO_RE.is_match(query) {
        QuestionType::YesNo
    } else if COMPARISON_RE.is_match(query) {
        QuestionType::Analysis
    } else if CASUAL_RE.is_match(query) {
        QuestionType::Casual
    } else {
        QuestionType::OpenEnded
    }
}

/// Surface complexity of `query` in `0.0..=1.0`
///
/// `0.4 * words/100 + 0.3 * sentences/10 + 0.3 * avg_word_len/10`, capped at 1.0.
/// The terms are summed in that order so scores stay reproducible.
pub fn assess_complexity(query: &str) -> f64 {
    let words: Vec<&str> = query.split_whitespace().collect();
    let word_count = words.len() as f64;
    let sentence_count = (SENTENCE_END_RE.find_iter(query).count() + 1) as f64;
    let avg_word_length = if words.is_empty() {
        0.0
    } else {
        words.iter().map(|w| w.chars().count()).sum::<usize>() as f64 / word_count
    };

    let score =
        0.4 * (word_count / 100.0) + 0.3 * (sentence_count / 10.0) + 0.3 * (avg_word_length / 10.0);
    score.min(1.0)
}

/// Total characters across every message in `history`
pub fn calculate_context_length(history: &[ConversationMessage]) -> usize {
    history.iter().map(|m| m.content.chars().count()).sum()
}

/// True when the last four messages are all short
pub fn has_rapid_exchanges(history: &[ConversationMessage]) -> bool {
    history.len() >= RAPID_WINDOW
        && history[history.len() - RAPID_WINDOW..]
            .iter()
            .all(|m| m.content.split_whitespace().count() < RAPID_MAX_WORDS)
}

/// True when one of the last three messages opens with "please explain"
pub fn has_explanation_requests(history: &[ConversationMessage]) -> bool {
    history
        .iter()
        .rev()
        .take(EXPLANATION_WINDOW)
        .any(|m| m.content.to_lowercase().starts_with(EXPLANATION_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_greeting_is_casual() {
        assert_eq!(identify_task_type("Hello, how are you?"), TaskType::Casual);
        assert_eq!(identify_task_type("Hi, how are you?"), TaskType::Casual);
        assert_eq!(identify_task_type("thanks!"), TaskType::Casual);
    }

    #[test]
    fn test_task_type_each_category() {
        assert_eq!(identify_task_type("Fix this Python function"), TaskType::Coding);
        assert_eq!(
            identify_task_type("Evaluate the pros and cons of remote work"),
            TaskType::Analysis
        );
        assert_eq!(identify_task_type("Write a poem about autumn"), TaskType::Creative);
        assert_eq!(
            identify_task_type("Tell me about the Roman empire"),
            TaskType::General
        );
    }

    #[test]
    fn test_task_type_priority_coding_beats_analysis() {
        assert_eq!(
            identify_task_type("Compare these two sorting functions"),
            TaskType::Coding
        );
    }

    #[test]
    fn test_task_type_priority_analysis_beats_creative_and_casual() {
        assert_eq!(
            identify_task_type("Hi! Write a review of this novel"),
            TaskType::Analysis
        );
        assert_eq!(identify_task_type("Hey, write me a story"), TaskType::Creative);
    }

    #[test]
    fn test_task_type_needs_word_boundaries() {
        // "this" contains "hi", "codec" contains "code"
        assert_eq!(identify_task_type("this codec"), TaskType::General);
    }

    #[test]
    fn test_question_type_each_category() {
        assert_eq!(
            classify_question("Why does the sky look blue?"),
            QuestionType::ProblemSolving
        );
        assert_eq!(
            classify_question("Who painted the Mona Lisa?"),
            QuestionType::Factual
        );
        assert_eq!(
            classify_question("Is Rust memory safe?"),
            QuestionType::YesNo
        );
        assert_eq!(
            classify_question("Rust versus Go for servers"),
            QuestionType::Analysis
        );
        assert_eq!(classify_question("hey there"), QuestionType::Casual);
        assert_eq!(
            classify_question("Tell me about volcanoes"),
            QuestionType::OpenEnded
        );
    }

    #[test]
    fn test_question_type_priority_order() {
        // "how" wins over the greeting
        assert_eq!(
            classify_question("Hello, how are you?"),
            QuestionType::ProblemSolving
        );
        // wh-word wins over the leading auxiliary
        assert_eq!(
            classify_question("Is it known who wrote this?"),
            QuestionType::Factual
        );
    }

    #[test]
    fn test_yes_no_requires_leading_auxiliary() {
        assert_eq!(classify_question("  Can I mix oil and water"), QuestionType::YesNo);
        assert_eq!(
            classify_question("I wonder if it can rain"),
            QuestionType::OpenEnded
        );
    }

    #[test]
    fn test_assess_complexity_formula() {
        // 4 words, one terminal mark -> 2 sentences, average length 23/4
        let query = "Rust borrow checker rules.";
        let expected = 0.4 * (4.0 / 100.0) + 0.3 * (2.0 / 10.0) + 0.3 * (23.0 / 4.0 / 10.0);
        assert_eq!(assess_complexity(query), expected);
    }

    #[test]
    fn test_assess_complexity_empty_query() {
        // No words, one implicit sentence, average length defined as 0
        assert_eq!(assess_complexity(""), 0.3 * (1.0 / 10.0));
        assert_eq!(assess_complexity("   \n\t "), 0.3 * (1.0 / 10.0));
    }

    #[test]
    fn test_assess_complexity_is_capped() {
        let long = "word ".repeat(500);
        assert_eq!(assess_complexity(&long), 1.0);
    }

    #[test]
    fn test_assess_complexity_counts_terminal_runs_once() {
        // "?!" is a single sentence end
        let expected = 0.4 * (1.0 / 100.0) + 0.3 * (2.0 / 10.0) + 0.3 * (8.0 / 10.0);
        assert_eq!(assess_complexity("Really?!"), expected);
    }

    #[test]
    fn test_context_length_sums_characters() {
        let history = vec![
            ConversationMessage::user("hello"),
            ConversationMessage::assistant("héllo"),
        ];
        assert_eq!(calculate_context_length(&history), 10);
        assert_eq!(calculate_context_length(&[]), 0);
    }

    #[test]
    fn test_rapid_exchanges_needs_four_messages() {
        let three = vec![ConversationMessage::user("ok"); 3];
        assert!(!has_rapid_exchanges(&three));

        let four = vec![ConversationMessage::user("ok"); 4];
        assert!(has_rapid_exchanges(&four));
    }

    #[test]
    fn test_rapid_exchanges_only_checks_last_four() {
        let mut history = vec![ConversationMessage::user("word ".repeat(50))];
        history.extend(vec![ConversationMessage::assistant("sure thing"); 4]);
        assert!(has_rapid_exchanges(&history));

        history.push(ConversationMessage::user(
            "one two three four five six seven eight nine ten",
        ));
        assert!(!has_rapid_exchanges(&history));
    }

    #[test]
    fn test_explanation_requests_prefix_and_window() {
        let mut history = vec![
            ConversationMessage::user("Please explain lifetimes"),
            ConversationMessage::assistant("Sure."),
            ConversationMessage::user("ok"),
        ];
        assert!(has_explanation_requests(&history));

        history.push(ConversationMessage::assistant("anything else?"));
        assert!(!has_explanation_requests(&history));
    }

    #[test]
    fn test_explanation_requests_must_start_with_phrase() {
        let history = vec![ConversationMessage::user("Could you please explain this?")];
        assert!(!has_explanation_requests(&history));
        assert!(!has_explanation_requests(&[]));
    }
}
