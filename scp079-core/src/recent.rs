//! Bounded anti-repeat set.
//!
//! Holds short fingerprints of recently emitted templates. The caller
//! passes it in with each request and receives the updated set back;
//! nothing lives in process-wide state.

use std::collections::VecDeque;

use rand::Rng;

use crate::template::short_checksum;

/// Default number of fingerprints remembered.
pub const DEFAULT_CAPACITY: usize = 8;

/// Most-recent-last set of template fingerprints, never longer than its
/// capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSet {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for RecentSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RecentSet {
    /// Empty set holding at most `capacity` fingerprints.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from caller-supplied entries, keeping the newest `capacity`.
    #[must_use]
    pub fn from_entries(entries: Vec<String>, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        for entry in entries {
            set.push(entry);
        }
        set
    }

    /// Fingerprint used to recognise a template.
    #[must_use]
    pub fn fingerprint(template: &str) -> String {
        short_checksum(template)
    }

    /// Whether `fingerprint` is remembered.
    #[must_use]
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.entries.iter().any(|e| e == fingerprint)
    }

    /// Remember `fingerprint` as the newest entry, evicting the oldest ones
    /// beyond capacity. A repeated entry moves to the back.
    pub fn push(&mut self, fingerprint: String) {
        self.entries.retain(|e| *e != fingerprint);
        self.entries.push_back(fingerprint);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Number of remembered fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries oldest first, for the response envelope.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.entries.into()
    }
}

/// Pick one entry of `pool`, avoiding recently emitted ones when possible.
///
/// Starts at a seeded index and walks forward to the first entry whose
/// fingerprint is not in `recent`; if every entry is recent, the seeded
/// one is used anyway. The pick is recorded in the returned set. An empty
/// pool yields `""`.
pub fn select<'a, R: Rng>(
    pool: &[&'a str],
    rng: &mut R,
    mut recent: RecentSet,
) -> (&'a str, RecentSet) {
    if pool.is_empty() {
        return ("", recent);
    }
    let start = rng.gen_range(0..pool.len());
    let chosen = (0..pool.len())
        .map(|offset| pool[(start + offset) % pool.len()])
        .find(|candidate| !recent.contains(&RecentSet::fingerprint(candidate)))
        .unwrap_or(pool[start]);
    recent.push(RecentSet::fingerprint(chosen));
    (chosen, recent)
}
