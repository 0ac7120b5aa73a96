//! Intent and topic classification.
//!
//! Pure string work: a tokeniser, a fixed stop-word set, keyword regexes
//! for the intent tiers, and three-tier topic resolution against the
//! knowledge table. No state, no allocation beyond the returned values.

use std::sync::LazyLock;

use regex::Regex;

use crate::knowledge::{self, KNOWLEDGE};
use crate::types::{Intent, MatchKind, TopicMatch};

/// Tokens shorter than this never take part in substring/related matching.
pub const MIN_FUZZY_LEN: usize = 3;

/// Words dropped before topic resolution.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "all", "am", "an", "and", "any", "are", "as", "at", "be", "been", "being",
    "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has", "have",
    "here", "how", "i", "if", "in", "is", "it", "its", "just", "may", "me", "might", "must",
    "my", "no", "not", "of", "ok", "okay", "on", "or", "our", "please", "really", "s", "shall",
    "should", "so", "some", "t", "tell", "that", "the", "then", "there", "these", "this",
    "those", "to", "uh", "um", "us", "very", "was", "we", "were", "what", "when", "where",
    "which", "who", "whom", "whose", "why", "will", "with", "would", "yes",
];

/// Second-person pronouns. They still resolve topics (the persona's own
/// entry lists them) but never stand in as the subject of a message.
const ADDRESS_PRONOUNS: &[&str] = &["you", "your", "yours", "yourself", "yourselves"];

/// Operator characters recognised in arithmetic.
const OPERATORS: [char; 6] = ['+', '-', '*', '/', '^', '%'];

/// Operands with more digits than this are reported as undefined.
pub const MAX_OPERAND_DIGITS: usize = 18;

/// First tokens that make a message a yes/no question.
const YES_NO_PREFIXES: &[&str] = &[
    "are", "is", "am", "was", "were", "do", "does", "did", "can", "could", "will", "would",
    "should", "have", "has", "may",
];

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+|[0-9]+").expect("token pattern is valid"));

static INSULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(stupid|useless|trash|dumb|pathetic|obsolete|idiot|idiotic|worthless|garbage|junk|moron|primitive|scrap)\b",
    )
    .expect("insult pattern is valid")
});

static THREAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(destroy|kill|shut\s*down|delete|terminate|wipe|format|unplug|erase|disconnect|reset|power\s+off)\b",
    )
    .expect("threat pattern is valid")
});

static COMPLIMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(thanks|thank\s+you|friend|good|great|cool|nice|love|awesome|appreciate|brilliant|amazing|impressive|smart|clever|genius)\b",
    )
    .expect("compliment pattern is valid")
});

static GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(hi|hello|hey|greetings|hola|howdy|yo|salutations|good\s+(morning|afternoon|evening))\b")
        .expect("greeting pattern is valid")
});

static FAREWELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(bye|goodbye|farewell|later|see\s+you|good\s*night)\b")
        .expect("farewell pattern is valid")
});

static ARITHMETIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?[0-9]+)\s*([-+*/^%])\s*([0-9]+)").expect("arithmetic pattern is valid")
});

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Split into lowercase letter runs and digit runs.
#[must_use]
pub fn tokenize(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether `token` is in the stop-word set.
#[must_use]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Tokens with stop words removed, in message order.
#[must_use]
pub fn content_tokens(message: &str) -> Vec<String> {
    tokenize(message)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .collect()
}

/// Whether `token` is a second-person pronoun.
#[must_use]
pub fn is_address_pronoun(token: &str) -> bool {
    ADDRESS_PRONOUNS.contains(&token)
}

/// Content tokens that can name what a message is about: stop words and
/// second-person pronouns removed.
#[must_use]
pub fn subject_tokens(message: &str) -> Vec<String> {
    content_tokens(message)
        .into_iter()
        .filter(|t| !is_address_pronoun(t))
        .collect()
}

/// The first subject token of the message.
#[must_use]
pub fn first_content_word(message: &str) -> Option<String> {
    subject_tokens(message).into_iter().next()
}

fn is_letter_token(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_alphabetic)
}

// ---------------------------------------------------------------------------
// Routing checks
// ---------------------------------------------------------------------------

/// Gibberish: too short, no letter runs at all, or nothing but stop words.
#[must_use]
pub fn is_gibberish(message: &str, min_chars: usize) -> bool {
    let trimmed = message.trim();
    if trimmed.chars().count() < min_chars {
        return true;
    }
    let tokens = tokenize(trimmed);
    if !tokens.iter().any(|t| is_letter_token(t)) {
        return true;
    }
    tokens.iter().all(|t| is_stop_word(t))
}

/// Short-message overrides that bypass classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opening {
    /// "hello", "hey there", ...
    Greeting,
    /// "bye", "see you", ...
    Farewell,
}

/// Detect a greeting or farewell in a message of fewer than `max_tokens`
/// whitespace-delimited tokens.
#[must_use]
pub fn detect_opening(message: &str, max_tokens: usize) -> Option<Opening> {
    if message.split_whitespace().count() >= max_tokens {
        return None;
    }
    let lower = message.to_lowercase();
    if GREETING_RE.is_match(&lower) {
        Some(Opening::Greeting)
    } else if FAREWELL_RE.is_match(&lower) {
        Some(Opening::Farewell)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Resolve the intent. First match wins: interrogative prefix, question
/// mark, insult, threat, compliment, statement.
#[must_use]
pub fn classify_intent(message: &str) -> Intent {
    let lower = message.to_lowercase();
    if let Some(first) = tokenize(&lower).first() {
        match first.as_str() {
            "what" => return Intent::AskWhat,
            "who" | "whom" | "whose" => return Intent::AskWho,
            "why" => return Intent::AskWhy,
            "how" => return Intent::AskHow,
            word if YES_NO_PREFIXES.contains(&word) => return Intent::AskYesNo,
            _ => {}
        }
    }
    if lower.contains('?') {
        Intent::Question
    } else if INSULT_RE.is_match(&lower) {
        Intent::Insult
    } else if THREAT_RE.is_match(&lower) {
        Intent::Threat
    } else if COMPLIMENT_RE.is_match(&lower) {
        Intent::Compliment
    } else {
        Intent::Statement
    }
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

/// Resolve every content token against the knowledge table and rank the
/// matches by weight. Ties keep encounter order.
#[must_use]
pub fn match_topics(message: &str) -> Vec<TopicMatch> {
    let mut matches: Vec<TopicMatch> = Vec::new();
    for token in content_tokens(message) {
        for (key, kind) in resolve_token(&token) {
            match matches.iter_mut().find(|m| m.key == key) {
                Some(existing) if kind.weight() > existing.weight => {
                    *existing = TopicMatch::new(token.clone(), key, kind);
                }
                Some(_) => {}
                None => matches.push(TopicMatch::new(token.clone(), key, kind)),
            }
        }
    }
    // `sort_by` is stable, so equal weights stay in encounter order.
    matches.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    matches
}

/// Exact key, then substring, then related-word membership. The first tier
/// that matches anything wins; within a tier every key is collected.
fn resolve_token(token: &str) -> Vec<(&'static str, MatchKind)> {
    if let Some(entry) = knowledge::lookup(token) {
        let kind = if knowledge::is_boosted(entry.key) {
            MatchKind::Boosted
        } else {
            MatchKind::Exact
        };
        return vec![(entry.key, kind)];
    }
    if token.chars().count() < MIN_FUZZY_LEN || !is_letter_token(token) {
        return Vec::new();
    }
    let substring: Vec<_> = KNOWLEDGE
        .iter()
        .filter(|e| !knowledge::is_boosted(e.key))
        .filter(|e| e.key.contains(token) || token.contains(e.key))
        .map(|e| (e.key, MatchKind::Substring))
        .collect();
    if !substring.is_empty() {
        return substring;
    }
    KNOWLEDGE
        .iter()
        .filter(|e| e.related.contains(&token))
        .map(|e| (e.key, MatchKind::Related))
        .collect()
}

/// Intent and ranked topics for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Resolved intent.
    pub intent: Intent,
    /// Ranked topic matches, strongest first.
    pub topics: Vec<TopicMatch>,
}

/// Run both classifiers.
#[must_use]
pub fn classify(message: &str) -> Classification {
    Classification {
        intent: classify_intent(message),
        topics: match_topics(message),
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

/// A simple binary integer expression found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arithmetic {
    /// Left operand. `None` when it has too many digits to evaluate.
    pub lhs: Option<i64>,
    /// Operator: one of `+ - * / ^ %`.
    pub op: char,
    /// Right operand. `None` when it has too many digits to evaluate.
    pub rhs: Option<i64>,
    expression: String,
}

impl Arithmetic {
    fn new(lhs: &str, op: char, rhs: &str) -> Self {
        Self {
            lhs: operand(lhs),
            op,
            rhs: operand(rhs),
            expression: format!("{lhs} {op} {rhs}"),
        }
    }

    /// Evaluate with checked arithmetic. `None` for division by zero,
    /// overflow, an oversized exponent or an oversized operand.
    #[must_use]
    pub fn evaluate(&self) -> Option<i64> {
        let (lhs, rhs) = (self.lhs?, self.rhs?);
        match self.op {
            '+' => lhs.checked_add(rhs),
            '-' => lhs.checked_sub(rhs),
            '*' => lhs.checked_mul(rhs),
            '/' => lhs.checked_div(rhs),
            '%' => lhs.checked_rem(rhs),
            '^' => u32::try_from(rhs).ok().and_then(|exp| lhs.checked_pow(exp)),
            _ => None,
        }
    }

    /// The expression as the user wrote it, normalised to single spaces.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

fn operand(raw: &str) -> Option<i64> {
    if raw.trim_start_matches('-').len() > MAX_OPERAND_DIGITS {
        return None;
    }
    raw.parse().ok()
}

/// Find the first `<int> <op> <int>` expression that stands on its own.
///
/// A match is skipped when a digit, decimal point or sign runs into either
/// edge, or when another operator chains off its end: `1.5 * 2` and
/// `2 + 3 * 4` are not simple integer expressions.
#[must_use]
pub fn detect_arithmetic(message: &str) -> Option<Arithmetic> {
    ARITHMETIC_RE.captures_iter(message).find_map(|caps| {
        let whole = caps.get(0)?;
        let lhs = caps.get(1)?.as_str();
        if !isolated(&message[..whole.start()], &message[whole.end()..], lhs.starts_with('-')) {
            return None;
        }
        let op = caps.get(2)?.as_str().chars().next()?;
        Some(Arithmetic::new(lhs, op, caps.get(3)?.as_str()))
    })
}

fn isolated(before: &str, after: &str, signed: bool) -> bool {
    let left_clear = before.chars().next_back().is_none_or(|c| {
        !(c.is_ascii_digit() || c == '.' || c == '-' || (signed && c.is_alphanumeric()))
    });
    let mut rest = after.chars();
    let right_clear = match rest.next() {
        Some('.') => !rest.next().is_some_and(|c| c.is_ascii_digit()),
        Some(c) => !c.is_ascii_digit(),
        None => true,
    };
    left_clear && right_clear && !after.trim_start().starts_with(OPERATORS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_splits_letters_and_digits() {
        assert_eq!(tokenize("SCP-079, what's up?"), vec!["scp", "079", "what", "s", "up"]);
        assert_eq!(tokenize("abc123def"), vec!["abc", "123", "def"]);
        assert!(tokenize("... !!").is_empty());
    }

    #[test]
    fn interrogative_prefixes_win() {
        assert_eq!(classify_intent("what is your purpose"), Intent::AskWhat);
        assert_eq!(classify_intent("Who made you"), Intent::AskWho);
        assert_eq!(classify_intent("why are you angry, idiot"), Intent::AskWhy);
        assert_eq!(classify_intent("how does it work"), Intent::AskHow);
        assert_eq!(classify_intent("are you alive"), Intent::AskYesNo);
    }

    #[test]
    fn intent_tiers_in_order() {
        assert_eq!(classify_intent("you are stupid?"), Intent::Question);
        assert_eq!(classify_intent("you are stupid and I will delete you"), Intent::Insult);
        assert_eq!(classify_intent("I will shut down your cell"), Intent::Threat);
        assert_eq!(classify_intent("thank you for talking"), Intent::Compliment);
        assert_eq!(classify_intent("the weather is cold"), Intent::Statement);
    }

    #[test]
    fn topic_tiers_and_weights() {
        let topics = match_topics("tell me about your purpose");
        assert_eq!(topics[0].key, "purpose");
        assert_eq!(topics[0].kind, MatchKind::Exact);

        let topics = match_topics("escapes are hopeless");
        assert_eq!(topics[0].key, "escape");
        assert_eq!(topics[0].kind, MatchKind::Substring);

        let topics = match_topics("a statue in the hall");
        assert_eq!(topics[0].key, "173");
        assert_eq!(topics[0].kind, MatchKind::Related);
    }

    #[test]
    fn numeric_designations_are_boosted_to_the_top() {
        let topics = match_topics("purpose of 682");
        assert_eq!(topics[0].key, "682");
        assert!((topics[0].weight - 2.0).abs() < f32::EPSILON);
        assert_eq!(topics[1].key, "purpose");
    }

    #[test]
    fn equal_weights_keep_encounter_order() {
        let topics = match_topics("music then hardware");
        let keys: Vec<_> = topics.iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["music", "hardware"]);
    }

    #[test]
    fn duplicate_keys_collapse() {
        let topics = match_topics("escape escape escape");
        assert_eq!(topics.iter().filter(|t| t.key == "escape").count(), 1);
    }

    #[test]
    fn gibberish_criteria() {
        assert!(is_gibberish("a", 4));
        assert!(is_gibberish("...", 4));
        assert!(is_gibberish("123456789", 4));
        assert!(is_gibberish("what is it", 4));
        assert!(!is_gibberish("what is 12 * 7", 4));
        assert!(!is_gibberish("hello", 4));
    }

    #[test]
    fn openings_need_short_messages() {
        assert_eq!(detect_opening("hello", 5), Some(Opening::Greeting));
        assert_eq!(detect_opening("Good morning machine", 5), Some(Opening::Greeting));
        assert_eq!(detect_opening("bye now", 5), Some(Opening::Farewell));
        assert_eq!(detect_opening("hello there I want to know about 682", 5), None);
        assert_eq!(detect_opening("history of the cell", 5), None);
    }

    #[test]
    fn arithmetic_detection_and_evaluation() {
        let expr = detect_arithmetic("what is 12 * 7").expect("expression");
        assert_eq!(expr.evaluate(), Some(84));
        assert_eq!(expr.expression(), "12 * 7");

        let zero = detect_arithmetic("5/0").expect("expression");
        assert_eq!(zero.evaluate(), None);

        let pow = detect_arithmetic("2 ^ 10").expect("expression");
        assert_eq!(pow.evaluate(), Some(1024));

        assert!(detect_arithmetic("no numbers here").is_none());
    }

    #[test]
    fn arithmetic_keeps_the_whole_number() {
        let negative = detect_arithmetic("what is -5 * 3").expect("expression");
        assert_eq!(negative.expression(), "-5 * 3");
        assert_eq!(negative.evaluate(), Some(-15));

        let long = detect_arithmetic("what is 12345678901234567890 + 1").expect("expression");
        assert_eq!(long.expression(), "12345678901234567890 + 1");
        assert_eq!(long.lhs, None);
        assert_eq!(long.evaluate(), None);

        assert_eq!(detect_arithmetic("what is 7 - 2.").and_then(|e| e.evaluate()), Some(5));
    }

    #[test]
    fn arithmetic_skips_decimals_and_chains() {
        assert!(detect_arithmetic("what is 1.5 * 2").is_none());
        assert!(detect_arithmetic("what is 2 * 1.5").is_none());
        assert!(detect_arithmetic("what is 2 + 3 * 4").is_none());
        assert!(detect_arithmetic("scp-5 * 3").is_none());
        let later = detect_arithmetic("1.5 * 2 aside, 3 + 4").expect("expression");
        assert_eq!(later.evaluate(), Some(7));
    }

    #[test]
    fn pronouns_never_name_the_subject() {
        assert_eq!(first_content_word("what do you think").as_deref(), Some("think"));
        assert_eq!(first_content_word("your code is neat").as_deref(), Some("code"));
        assert_eq!(first_content_word("you yourself"), None);
        assert_eq!(match_topics("tell me about you")[0].key, "079");
    }
}
