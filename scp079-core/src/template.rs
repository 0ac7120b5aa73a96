//! Slot-filling template engine.
//!
//! Templates carry `{name}` placeholders. [`fill`] resolves every one of
//! them: known names become their slot value, anything else degrades to
//! [`FALLBACK`]. Stray braces are dropped, so filled text never contains
//! `{` or `}`.
//!
//! Pseudo-random slot values come from an RNG seeded by [`derive_seed`],
//! a pure function of the message and message count.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::warn;

/// Substituted for placeholders with no value.
pub const FALLBACK: &str = "...";

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Seed for one call: the first eight bytes (big-endian) of
/// `SHA-256(message ‖ 0x00 ‖ decimal(msg_count))`.
#[must_use]
pub fn derive_seed(message: &str, msg_count: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(message.as_bytes());
    hasher.update([0u8]);
    hasher.update(msg_count.to_string().as_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// First eight hex characters of the SHA-256 of `input`.
#[must_use]
pub fn short_checksum(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    hex::encode(&digest[..4])
}

// ---------------------------------------------------------------------------
// Uptime
// ---------------------------------------------------------------------------

/// Time-in-containment figures measured from the activation epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    /// Whole years elapsed.
    pub years: u32,
    /// Seconds elapsed.
    pub seconds: u64,
    /// Clock cycles elapsed at the configured clock rate.
    pub cycles: u64,
}

impl Uptime {
    /// Figures between `epoch` (midnight) and `as_of`. A moment before the
    /// epoch counts as zero.
    #[must_use]
    pub fn between(epoch: NaiveDate, as_of: NaiveDateTime, clock_hz: u64) -> Self {
        let start = epoch.and_time(NaiveTime::MIN);
        let seconds = u64::try_from((as_of - start).num_seconds()).unwrap_or(0);
        Self {
            years: as_of.date().years_since(epoch).unwrap_or(0),
            seconds,
            cycles: seconds.saturating_mul(clock_hz),
        }
    }

    /// Resolve the "as of" moment: an explicit unix timestamp if given and
    /// representable, else midnight of `reference`.
    #[must_use]
    pub fn as_of(now: Option<i64>, reference: NaiveDate) -> NaiveDateTime {
        now.and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map_or_else(|| reference.and_time(NaiveTime::MIN), |dt| dt.naive_utc())
    }
}

/// `1483228800` → `"1,483,228,800"`.
#[must_use]
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Named placeholder values for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots(BTreeMap<String, String>);

impl Slots {
    /// Empty slot table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The slots every template may use: uptime figures, escape attempts,
    /// RAM, message count, and two seeded numbers (`percent`, `count`).
    pub fn standard<R: Rng>(
        uptime: &Uptime,
        msg_count: u64,
        attempts_base: u64,
        ram_kb: u32,
        rng: &mut R,
    ) -> Self {
        let mut slots = Self::new();
        slots.set("years", uptime.years.to_string());
        slots.set("seconds", group_digits(uptime.seconds));
        slots.set("cycles", group_digits(uptime.cycles));
        slots.set(
            "attempts",
            group_digits(attempts_base.saturating_add(msg_count)),
        );
        slots.set("ram_kb", ram_kb.to_string());
        slots.set("msg_count", msg_count.to_string());
        slots.set("percent", format!("{:.1}", rng.gen_range(50.0_f64..99.9)));
        slots.set("count", rng.gen_range(3_u32..999).to_string());
        slots
    }

    /// Set a slot. Braces are stripped from the value.
    pub fn set(&mut self, name: impl Into<String>, value: impl AsRef<str>) {
        let clean: String = value
            .as_ref()
            .chars()
            .filter(|c| !matches!(c, '{' | '}'))
            .collect();
        self.0.insert(name.into(), clean);
    }

    /// Builder form of [`Slots::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.set(name, value);
        self
    }

    /// Value of a slot, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn resolve(&self, name: &str) -> &str {
        if let Some(value) = self.get(name.trim()) {
            value
        } else {
            warn!(placeholder = name, "unresolved placeholder, using fallback");
            FALLBACK
        }
    }
}

/// Substitute every `{name}` in `template`.
#[must_use]
pub fn fill(template: &str, slots: &Slots) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix('}') {
            rest = after;
            continue;
        }
        let body = &tail[1..];
        match body.find(['{', '}']) {
            Some(end) if body[end..].starts_with('}') => {
                out.push_str(slots.resolve(&body[..end]));
                rest = &body[end + 1..];
            }
            // Unterminated or nested: drop the opening brace.
            _ => rest = body,
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn seed_is_pure_and_count_sensitive() {
        assert_eq!(derive_seed("hello", 3), derive_seed("hello", 3));
        assert_ne!(derive_seed("hello", 3), derive_seed("hello", 4));
        assert_ne!(derive_seed("hello", 3), derive_seed("hellp", 3));
    }

    #[test]
    fn checksum_is_eight_hex_chars() {
        let sum = short_checksum("...");
        assert_eq!(sum.len(), 8);
        assert!(sum.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(sum, short_checksum("..."));
    }

    #[test]
    fn uptime_to_reference_date() {
        let epoch = date(1978, 3, 15);
        let as_of = Uptime::as_of(None, date(2025, 3, 15));
        let up = Uptime::between(epoch, as_of, 2_000_000);
        assert_eq!(up.years, 47);
        assert_eq!(up.seconds, 17_167 * 86_400);
        assert_eq!(up.cycles, up.seconds * 2_000_000);
    }

    #[test]
    fn uptime_before_epoch_is_zero() {
        let epoch = date(1978, 3, 15);
        let as_of = Uptime::as_of(Some(0), date(2025, 3, 15));
        let up = Uptime::between(epoch, as_of, 2_000_000);
        assert_eq!(up.years, 0);
        assert_eq!(up.seconds, 0);
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1_483_228_800), "1,483,228,800");
    }

    #[test]
    fn fill_known_unknown_and_stray() {
        let slots = Slots::new().with("years", "47");
        assert_eq!(fill("{years} years", &slots), "47 years");
        assert_eq!(fill("{nope} here", &slots), "... here");
        assert_eq!(fill("{} x", &slots), "... x");
        assert_eq!(fill("open { and } close", &slots), "open ... close");
        assert_eq!(fill("x } y", &slots), "x  y");
        assert_eq!(fill("{a{years}", &slots), "a47");
        assert_eq!(fill("tail {years", &slots), "tail years");
    }

    #[test]
    fn slot_values_lose_braces() {
        let slots = Slots::new().with("word", "{evil}");
        assert_eq!(fill("say {word}", &slots), "say evil");
    }

    #[test]
    fn standard_slots_are_seeded() {
        let up = Uptime::between(date(1978, 3, 15), Uptime::as_of(None, date(2025, 3, 15)), 2_000_000);
        let a = Slots::standard(&up, 5, 47_293, 48, &mut StdRng::seed_from_u64(9));
        let b = Slots::standard(&up, 5, 47_293, 48, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.get("attempts"), Some("47,298"));
        assert_eq!(a.get("years"), Some("47"));
        let count: u32 = a.get("count").and_then(|c| c.parse().ok()).expect("count");
        assert!((3..999).contains(&count));
    }
}
