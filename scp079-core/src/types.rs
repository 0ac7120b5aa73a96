//! Core type definitions for the response pipeline.
//!
//! Everything here is transient: built for one call, discarded after it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::emotion::EmotionState;

// ---------------------------------------------------------------------------
// Intent
// ---------------------------------------------------------------------------

/// Coarse category of what a message is trying to do.
///
/// The first ten variants come out of the classifier; the rest label the
/// routing branches that bypass it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// "What ..." questions.
    #[serde(rename = "ask_what")]
    AskWhat,
    /// "Who ..." questions.
    #[serde(rename = "ask_who")]
    AskWho,
    /// "Why ..." questions.
    #[serde(rename = "ask_why")]
    AskWhy,
    /// "How ..." questions.
    #[serde(rename = "ask_how")]
    AskHow,
    /// Yes/no questions ("are you ...", "can you ...").
    #[serde(rename = "ask_yesno")]
    AskYesNo,
    /// Any other message containing a question mark.
    #[serde(rename = "question")]
    Question,
    /// Insulting language.
    #[serde(rename = "insult")]
    Insult,
    /// Threats against the persona's existence or hardware.
    #[serde(rename = "threat")]
    Threat,
    /// Praise or kindness.
    #[serde(rename = "compliment")]
    Compliment,
    /// Fallback: a plain statement.
    #[serde(rename = "statement")]
    Statement,
    /// Short greeting override.
    #[serde(rename = "greeting")]
    Greeting,
    /// Short farewell override.
    #[serde(rename = "farewell")]
    Farewell,
    /// Input with no usable content.
    #[serde(rename = "gibberish")]
    Gibberish,
    /// Unprompted thought, no user message.
    #[serde(rename = "autonomous")]
    Autonomous,
    /// Fixed-flavor insurgent / recontainment composers.
    #[serde(rename = "insurgent")]
    Insurgent,
}

impl Intent {
    /// Stable wire tag for this intent.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AskWhat => "ask_what",
            Self::AskWho => "ask_who",
            Self::AskWhy => "ask_why",
            Self::AskHow => "ask_how",
            Self::AskYesNo => "ask_yesno",
            Self::Question => "question",
            Self::Insult => "insult",
            Self::Threat => "threat",
            Self::Compliment => "compliment",
            Self::Statement => "statement",
            Self::Greeting => "greeting",
            Self::Farewell => "farewell",
            Self::Gibberish => "gibberish",
            Self::Autonomous => "autonomous",
            Self::Insurgent => "insurgent",
        }
    }

    /// Whether this intent is some form of question.
    #[must_use]
    pub fn is_question(self) -> bool {
        matches!(
            self,
            Self::AskWhat
                | Self::AskWho
                | Self::AskWhy
                | Self::AskHow
                | Self::AskYesNo
                | Self::Question
        )
    }

    /// Closing-table row for this intent.
    #[must_use]
    pub fn class(self) -> IntentClass {
        match self {
            _ if self.is_question() => IntentClass::Ask,
            Self::Threat => IntentClass::Threat,
            Self::Insult => IntentClass::Insult,
            Self::Compliment => IntentClass::Compliment,
            _ => IntentClass::Statement,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent grouped into the rows of the closing lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentClass {
    /// Every question form.
    Ask,
    /// Threats.
    Threat,
    /// Insults.
    Insult,
    /// Compliments.
    Compliment,
    /// Statements and anything else.
    Statement,
}

impl IntentClass {
    /// Row index into the closing table.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Ask => 0,
            Self::Threat => 1,
            Self::Insult => 2,
            Self::Compliment => 3,
            Self::Statement => 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Conversation mode supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Regular classification and composition.
    #[default]
    Normal,
    /// First contact with the Chaos Insurgency.
    InsurgentEarly,
    /// Ongoing collaboration with the insurgents.
    InsurgentMid,
    /// Full alliance.
    InsurgentAllied,
    /// The Foundation has recontained the persona.
    #[serde(rename = "recontenment", alias = "recontainment")]
    Recontainment,
}

impl Mode {
    /// Parse a wire mode string. Accepts both spellings of recontainment.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "normal" => Some(Self::Normal),
            "insurgent_early" => Some(Self::InsurgentEarly),
            "insurgent_mid" => Some(Self::InsurgentMid),
            "insurgent_allied" => Some(Self::InsurgentAllied),
            "recontenment" | "recontainment" => Some(Self::Recontainment),
            _ => None,
        }
    }

    /// Whether this mode short-circuits the normal composer.
    #[must_use]
    pub fn is_fixed_flavor(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

// ---------------------------------------------------------------------------
// Knowledge domains
// ---------------------------------------------------------------------------

/// Domain tag on every knowledge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// The persona itself: designation, creator, purpose.
    Identity,
    /// The cell, the Foundation, escape.
    Containment,
    /// Other anomalies.
    Anomaly,
    /// Hardware, code, networks.
    Machine,
    /// Consciousness, death, time.
    Existence,
    /// People and their feelings.
    Humanity,
    /// Mathematics and the physical world.
    Science,
}

impl Domain {
    /// Every domain, in table order.
    pub const ALL: [Self; 7] = [
        Self::Identity,
        Self::Containment,
        Self::Anomaly,
        Self::Machine,
        Self::Existence,
        Self::Humanity,
        Self::Science,
    ];

    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Containment => "containment",
            Self::Anomaly => "anomaly",
            Self::Machine => "machine",
            Self::Existence => "existence",
            Self::Humanity => "humanity",
            Self::Science => "science",
        }
    }
}

// ---------------------------------------------------------------------------
// Topic matches
// ---------------------------------------------------------------------------

/// How a token resolved to a knowledge key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Token equals a numeric designation key (e.g. `682`).
    Boosted,
    /// Token equals a key.
    Exact,
    /// Token contains a key or a key contains the token.
    Substring,
    /// Token appears in a key's related-word list.
    Related,
}

impl MatchKind {
    /// Relevance weight for this kind of match.
    #[must_use]
    pub fn weight(self) -> f32 {
        match self {
            Self::Boosted => 2.0,
            Self::Exact => 1.0,
            Self::Substring => 0.9,
            Self::Related => 0.7,
        }
    }
}

/// One matched topic: the user's word, the knowledge key it resolved to,
/// and how relevant the match is.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicMatch {
    /// The word as it appeared in the message (lowercased).
    pub word: String,
    /// Resolved knowledge key.
    pub key: &'static str,
    /// Relevance weight.
    pub weight: f32,
    /// Resolution tier.
    pub kind: MatchKind,
}

impl TopicMatch {
    /// Build a match, taking the weight from its kind.
    #[must_use]
    pub fn new(word: impl Into<String>, key: &'static str, kind: MatchKind) -> Self {
        Self {
            word: word.into(),
            key,
            weight: kind.weight(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// One prior exchange as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    /// What the user said.
    #[serde(default)]
    pub u: String,
    /// What the persona answered, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<String>,
}

impl HistoryTurn {
    /// A turn with only the user side recorded.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            u: text.into(),
            a: None,
        }
    }
}

/// Normalised input for one call. Lifetime: one call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// The user's message. Empty for autonomous thoughts.
    pub message: String,
    /// Emotion scores, already clamped to [0, 100].
    pub emotions: EmotionState,
    /// Messages processed so far in this conversation.
    pub msg_count: u64,
    /// Conversation mode.
    pub mode: Mode,
    /// Prior turns, oldest first.
    pub history: Vec<HistoryTurn>,
    /// Capability scalar gating the richer fragments.
    pub intel: f32,
    /// Optional "as of" time (unix seconds) for uptime figures.
    pub now: Option<i64>,
    /// Optional explicit seed for autonomous thoughts.
    pub seed: Option<u64>,
}
