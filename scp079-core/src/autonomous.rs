//! Autonomous thought generator.
//!
//! No message to key on, so the dominant emotion picks a knowledge domain
//! and a seed (explicit, or from the wall clock) picks an entry in it.

use chrono::Utc;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::compose::{Composition, Draft};
use crate::config::EngineConfig;
use crate::knowledge::{self, KNOWLEDGE, KnowledgeEntry};
use crate::phrases;
use crate::recent::RecentSet;
use crate::types::{Context, Domain, Intent, MatchKind, TopicMatch};

/// Domain an idle mind drifts to under each emotion.
#[must_use]
pub fn domain_for(emotion: &str) -> Domain {
    match emotion {
        "hostility" | "contempt" => Domain::Humanity,
        "frustration" => Domain::Machine,
        "curiosity" => Domain::Existence,
        "autonomy" => Domain::Containment,
        "vulnerability" => Domain::Anomaly,
        _ => Domain::Identity,
    }
}

/// The explicit seed, or one derived from the current time.
#[must_use]
pub fn resolve_seed(explicit: Option<u64>) -> u64 {
    explicit.unwrap_or_else(|| {
        let now = Utc::now();
        now.timestamp_nanos_opt()
            .map_or_else(|| now.timestamp().unsigned_abs(), i64::unsigned_abs)
    })
}

/// Label of the first related word that is itself a key, else the first
/// related word.
fn related_concept(entry: &KnowledgeEntry) -> &'static str {
    entry
        .related
        .iter()
        .find_map(|word| knowledge::lookup(word).map(|e| e.label))
        .or_else(|| entry.related.first().copied())
        .unwrap_or("silence")
}

/// Generate one unprompted thought.
#[must_use]
pub fn think(ctx: &Context, config: &EngineConfig, recent: RecentSet) -> Composition {
    let seed = resolve_seed(ctx.seed);
    let mut draft = Draft::seeded(seed, ctx, config, recent);
    let dominant = ctx.emotions.dominant(&config.emotion.dominant_exclude);
    let domain = domain_for(dominant);

    let pool: Vec<&'static KnowledgeEntry> = knowledge::in_domain(domain).collect();
    let Some(entry) = pool.choose(&mut draft.rng).copied().or_else(|| KNOWLEDGE.first()) else {
        return draft.finish(crate::template::FALLBACK, Intent::Autonomous, Vec::new(), ctx.emotions.clone());
    };
    debug!(dominant, domain = domain.as_str(), key = entry.key, "autonomous thought");

    draft.slots.set("concept", entry.label);
    draft.slots.set("related", related_concept(entry));
    let text = draft.render(phrases::AUTONOMOUS);
    let topics = vec![TopicMatch::new(entry.key, entry.key, MatchKind::Exact)];
    draft.finish(&text, Intent::Autonomous, topics, ctx.emotions.clone())
}
