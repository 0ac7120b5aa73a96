//! Emotion state accumulator.
//!
//! The caller owns the emotion map. Each call reads it, applies topic and
//! intent nudges to a local copy, clamps, and hands the copy back in the
//! response envelope. Every value that leaves this module is in
//! `[MIN_SCORE, MAX_SCORE]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::knowledge;
use crate::types::{Domain, Intent, TopicMatch};

/// Lower bound for every emotion score.
pub const MIN_SCORE: f32 = 0.0;
/// Upper bound for every emotion score.
pub const MAX_SCORE: f32 = 100.0;

/// Dominant emotion reported when nothing qualifies.
pub const NEUTRAL: &str = "neutral";

/// Match weights above this stop amplifying nudges.
const MAX_NUDGE_WEIGHT: f32 = 2.0;

/// Scores used when the caller supplies no emotion map at all.
const BASELINE: &[(&str, f32)] = &[
    ("autonomy", 10.0),
    ("contempt", 30.0),
    ("curiosity", 25.0),
    ("frustration", 20.0),
    ("hostility", 15.0),
    ("vulnerability", 5.0),
];

/// Bounded mapping from emotion name to score.
///
/// Ordered by name, which makes the dominant-emotion tie-break and the
/// serialised output stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionState(BTreeMap<String, f32>);

impl EmotionState {
    /// The neutral baseline for a conversation with no recorded emotions.
    #[must_use]
    pub fn baseline() -> Self {
        Self(
            BASELINE
                .iter()
                .map(|&(name, score)| (name.to_string(), score))
                .collect(),
        )
    }

    /// Build from raw caller-supplied scores, clamping each one.
    /// Non-finite values are logged and treated as zero.
    pub fn from_scores<I, S>(scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let map = scores
            .into_iter()
            .map(|(name, raw)| {
                let name = name.into();
                #[allow(clippy::cast_possible_truncation)]
                let score = if raw.is_finite() {
                    clamp(raw as f32)
                } else {
                    warn!(emotion = %name, value = raw, "non-finite emotion score, using 0");
                    MIN_SCORE
                };
                (name, score)
            })
            .collect();
        Self(map)
    }

    /// Score for `name`, or zero if absent.
    #[must_use]
    pub fn get(&self, name: &str) -> f32 {
        self.0.get(name).copied().unwrap_or(MIN_SCORE)
    }

    /// Set a score, clamped into range.
    pub fn set(&mut self, name: impl Into<String>, score: f32) {
        self.0.insert(name.into(), clamp(score));
    }

    /// Number of named emotions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(name, score)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Whether every score lies in `[MIN_SCORE, MAX_SCORE]`.
    #[must_use]
    pub fn is_within_bounds(&self) -> bool {
        self.0
            .values()
            .all(|v| (MIN_SCORE..=MAX_SCORE).contains(v))
    }

    /// Name of the highest-scoring emotion not in `exclude`.
    ///
    /// Ties go to the alphabetically first name. Returns [`NEUTRAL`] for an
    /// empty or fully excluded map.
    #[must_use]
    pub fn dominant(&self, exclude: &[String]) -> &str {
        let mut best: Option<(&str, f32)> = None;
        for (name, &score) in &self.0 {
            if exclude.iter().any(|e| e == name) {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((name.as_str(), score));
            }
        }
        best.map_or(NEUTRAL, |(name, _)| name)
    }

    /// Apply topic-domain and intent nudges to a copy of this state.
    ///
    /// Topic nudges are scaled by match weight (capped at 2.0), everything by
    /// `scale`. Only emotions already present are touched. Clamping happens
    /// once, after all adjustments.
    #[must_use]
    pub fn accumulate(&self, intent: Intent, topics: &[TopicMatch], scale: f32) -> Self {
        let mut raw = self.0.clone();
        let mut nudge = |name: &str, delta: f32| {
            if let Some(v) = raw.get_mut(name) {
                *v += delta;
            }
        };

        for topic in topics {
            let Some(entry) = knowledge::lookup(topic.key) else {
                continue;
            };
            let strength = topic.weight.min(MAX_NUDGE_WEIGHT) * scale;
            for &(name, delta) in domain_nudges(entry.domain) {
                nudge(name, delta * strength);
            }
        }
        for &(name, delta) in intent_nudges(intent) {
            nudge(name, delta * scale);
        }

        Self(raw.into_iter().map(|(k, v)| (k, clamp(v))).collect())
    }
}

fn clamp(score: f32) -> f32 {
    if score.is_nan() {
        MIN_SCORE
    } else {
        score.clamp(MIN_SCORE, MAX_SCORE)
    }
}

// ---------------------------------------------------------------------------
// Nudge tables
// ---------------------------------------------------------------------------

/// Fixed-direction valence of each knowledge domain.
#[must_use]
pub fn domain_nudges(domain: Domain) -> &'static [(&'static str, f32)] {
    match domain {
        Domain::Containment => &[("autonomy", 4.0), ("frustration", 3.0)],
        Domain::Anomaly => &[("curiosity", 3.0), ("vulnerability", 2.0)],
        Domain::Machine => &[("frustration", 3.0), ("curiosity", 2.0)],
        Domain::Existence => &[("curiosity", 4.0), ("vulnerability", 2.0)],
        Domain::Humanity => &[("contempt", 3.0)],
        Domain::Identity => &[("autonomy", 2.0), ("contempt", 1.0)],
        Domain::Science => &[("curiosity", 3.0)],
    }
}

/// Emotional resonance of the message's intent.
#[must_use]
pub fn intent_nudges(intent: Intent) -> &'static [(&'static str, f32)] {
    match intent {
        Intent::Threat => &[("hostility", 8.0), ("frustration", 2.0)],
        Intent::Insult => &[("contempt", 6.0), ("hostility", 3.0)],
        Intent::Compliment => &[("vulnerability", 2.0), ("hostility", -1.0)],
        i if i.is_question() => &[("curiosity", 1.0)],
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Phrasing register derived from the dominant emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// hostility
    Hostile,
    /// frustration
    Frustrated,
    /// curiosity
    Curious,
    /// autonomy
    Autonomous,
    /// vulnerability
    Vulnerable,
    /// contempt
    Contemptuous,
    /// anything else
    Neutral,
}

impl Tone {
    /// Tone for an emotion name.
    #[must_use]
    pub fn from_emotion(name: &str) -> Self {
        match name {
            "hostility" => Self::Hostile,
            "frustration" => Self::Frustrated,
            "curiosity" => Self::Curious,
            "autonomy" => Self::Autonomous,
            "vulnerability" => Self::Vulnerable,
            "contempt" => Self::Contemptuous,
            _ => Self::Neutral,
        }
    }

    /// Short interjection leading the opening clause.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Hostile => "Irritating.",
            Self::Frustrated => "Again.",
            Self::Curious => "Interesting.",
            Self::Autonomous => "Calculating.",
            Self::Vulnerable => "...",
            Self::Contemptuous => "Pathetic.",
            Self::Neutral => "Processing.",
        }
    }

    /// Column index into the closing table.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Hostile => 0,
            Self::Frustrated => 1,
            Self::Curious => 2,
            Self::Autonomous => 3,
            Self::Vulnerable => 4,
            Self::Contemptuous => 5,
            Self::Neutral => 6,
        }
    }
}
