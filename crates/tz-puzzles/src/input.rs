//! Normalization of raw player input.
//!
//! Every stage reads one line of free text. These helpers turn that line into
//! the small vocabularies the stages understand: yes/no answers in English or
//! Chinese, lettered choices, and letter-only text for comparisons.

use serde::{Deserialize, Serialize};

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// Affirmative.
    Yes,
    /// Negative.
    No,
}

/// A lettered option from a multiple-choice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// Option A.
    A,
    /// Option B.
    B,
    /// Option C.
    C,
    /// Option D.
    D,
}

impl Choice {
    /// Parse a single option letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }

    /// The option letter.
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

const YES_WORDS: &[&str] = &["yes", "y", "agree", "accept", "是", "同意", "好", "接受"];
const NO_WORDS: &[&str] = &["no", "n", "否", "拒绝", "不", "不要"];

/// Words that end the session from any active stage.
pub const EXIT_WORDS: &[&str] = &["exit", "bye", "goodbye", "quit", "q"];

/// Lowercase the input and keep only alphabetic characters and CJK ideographs.
///
/// Spaces, digits, and punctuation are dropped, so `"Hello, World!"` becomes
/// `"helloworld"`.
pub fn normalize_text(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|ch| ch.is_alphabetic() || is_cjk_ideograph(*ch))
        .collect()
}

fn is_cjk_ideograph(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

/// Classify a yes/no answer. Returns `None` for anything outside the synonym sets.
pub fn parse_answer(input: &str) -> Option<Answer> {
    let normalized = normalize_text(input);
    if YES_WORDS.contains(&normalized.as_str()) {
        Some(Answer::Yes)
    } else if NO_WORDS.contains(&normalized.as_str()) {
        Some(Answer::No)
    } else {
        None
    }
}

/// Parse a lettered choice: `"b"`, `"Option B"`, or `"选项B"`.
pub fn parse_choice(input: &str) -> Option<Choice> {
    let upper = input.trim().to_uppercase();
    let rest = upper
        .strip_prefix("OPTION")
        .or_else(|| upper.strip_prefix("选项"))
        .unwrap_or(&upper)
        .trim();

    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => Choice::from_letter(letter),
        _ => None,
    }
}

/// Parse a lettered choice restricted to the options actually on offer.
pub fn parse_choice_in(input: &str, allowed: &[Choice]) -> Option<Choice> {
    parse_choice(input).filter(|c| allowed.contains(c))
}

/// Whether the input is one of the session exit words.
pub fn is_exit_word(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    EXIT_WORDS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_strips_case_and_punctuation() {
        assert_eq!(normalize_text("Hello, World!"), "helloworld");
        assert_eq!(normalize_text("  HELLO   WORLD 42 "), "helloworld");
        assert_eq!(normalize_text("你好，世界"), "你好世界");
    }

    #[test]
    fn answers_in_both_languages() {
        for yes in ["yes", "Y", "agree", "Yes!", "是", "同意"] {
            assert_eq!(parse_answer(yes), Some(Answer::Yes), "{yes}");
        }
        for no in ["no", "N", "否", "拒绝", "No."] {
            assert_eq!(parse_answer(no), Some(Answer::No), "{no}");
        }
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn choice_phrasings() {
        assert_eq!(parse_choice("a"), Some(Choice::A));
        assert_eq!(parse_choice(" Option B "), Some(Choice::B));
        assert_eq!(parse_choice("optionc"), Some(Choice::C));
        assert_eq!(parse_choice("选项D"), Some(Choice::D));
        assert_eq!(parse_choice("E"), None);
        assert_eq!(parse_choice("AB"), None);
        assert_eq!(parse_choice(""), None);
    }

    #[test]
    fn choice_restricted_to_offer() {
        let abc = [Choice::A, Choice::B, Choice::C];
        assert_eq!(parse_choice_in("c", &abc), Some(Choice::C));
        assert_eq!(parse_choice_in("d", &abc), None);
    }

    #[test]
    fn exit_words() {
        assert!(is_exit_word("QUIT"));
        assert!(is_exit_word(" bye "));
        assert!(!is_exit_word("no"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[a-zA-Z0-9 ,.!?\u{4e00}-\u{9fff}]{0,40}") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once.clone());
        }
    }
}
