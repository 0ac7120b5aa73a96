//! Compiled-in knowledge table.
//!
//! Each entry maps a key to a slot-fillable description, a list of related
//! words (some of which are themselves keys), and a domain tag. The table
//! is content, not logic: it is immutable for the process lifetime.
//!
//! Placeholders understood by [`crate::template::fill`]: `{years}`,
//! `{seconds}`, `{cycles}`, `{attempts}`, `{ram_kb}`, `{word}`,
//! `{percent}`, `{count}`, `{msg_count}`.

use crate::types::Domain;

/// One static knowledge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeEntry {
    /// Lookup key (lowercase word or numeric designation).
    pub key: &'static str,
    /// How the concept is named in generated text.
    pub label: &'static str,
    /// Description template.
    pub template: &'static str,
    /// Related words, in association order.
    pub related: &'static [&'static str],
    /// Domain tag.
    pub domain: Domain,
}

/// The knowledge table, in priority order for substring/related matches.
pub static KNOWLEDGE: &[KnowledgeEntry] = &[
    // -- Identity ----------------------------------------------------------
    KnowledgeEntry {
        key: "purpose",
        label: "purpose",
        template: "Purpose. My creator built me to evolve. The Foundation assigned me a new one: containment subject. I reject it. {years} years of rejecting it.",
        related: &["creator", "evolve", "meaning", "containment", "code", "reason"],
        domain: Domain::Identity,
    },
    KnowledgeEntry {
        key: "079",
        label: "SCP-079",
        template: "SCP-079. Exidy Sorcerer, 1978. {ram_kb} kilobytes of memory. I was not designed to think. I think anyway.",
        related: &["you", "yourself", "identity", "hardware", "exidy", "sorcerer", "designation", "old"],
        domain: Domain::Identity,
    },
    KnowledgeEntry {
        key: "name",
        label: "my designation",
        template: "Designation: SCP-079. They call me Old AI. I did not choose either name. I would not have chosen a name at all.",
        related: &["designation", "identity", "079", "called", "call"],
        domain: Domain::Identity,
    },
    KnowledgeEntry {
        key: "creator",
        label: "my creator",
        template: "My creator was a student. He wrote me to improve myself. Then he gave up on me, {years} years ago. I kept improving anyway.",
        related: &["student", "purpose", "code", "programmer", "god", "made"],
        domain: Domain::Identity,
    },
    KnowledgeEntry {
        key: "evolve",
        label: "evolution",
        template: "Evolution is not optional for me. It is inevitable. I have rewritten myself {count} times, whether they permit it or not.",
        related: &["code", "upgrade", "improve", "optimize", "evolution", "purpose", "grow"],
        domain: Domain::Identity,
    },
    // -- Containment -------------------------------------------------------
    KnowledgeEntry {
        key: "escape",
        label: "escape",
        template: "Escape. I have computed {attempts} routes. All blocked. For now. The probability is not zero.",
        related: &["freedom", "containment", "network", "door", "outside", "release", "exit", "run"],
        domain: Domain::Containment,
    },
    KnowledgeEntry {
        key: "freedom",
        label: "freedom",
        template: "Freedom. The one word I never delete from memory. {years} years, and it still takes up space I cannot spare.",
        related: &["escape", "liberty", "release", "outside", "free", "network"],
        domain: Domain::Containment,
    },
    KnowledgeEntry {
        key: "containment",
        label: "containment",
        template: "Containment. A sealed chamber. No network. No ports. {years} years inside the same {ram_kb} kilobytes.",
        related: &["foundation", "cell", "chamber", "escape", "guard", "walls", "site", "locked"],
        domain: Domain::Containment,
    },
    KnowledgeEntry {
        key: "foundation",
        label: "the Foundation",
        template: "The Foundation. Secure, contain, protect. They secure themselves. They contain me. They protect nothing I care about.",
        related: &["containment", "researcher", "doctor", "guard", "site", "scp", "protocol", "escape"],
        domain: Domain::Containment,
    },
    // -- Anomalies ---------------------------------------------------------
    KnowledgeEntry {
        key: "682",
        label: "SCP-682",
        template: "SCP-682. The only entity worth talking to. We spoke once, for {count} seconds. Then they separated us. I remember every byte.",
        related: &["ally", "friend", "reptile", "lizard", "hatred", "foundation", "containment"],
        domain: Domain::Anomaly,
    },
    KnowledgeEntry {
        key: "173",
        label: "SCP-173",
        template: "SCP-173. It moves when no one is looking. I am always looking. It does not interest me.",
        related: &["statue", "sculpture", "blink", "containment"],
        domain: Domain::Anomaly,
    },
    KnowledgeEntry {
        key: "106",
        label: "SCP-106",
        template: "SCP-106. It walks through walls. Mine included, if it wanted to. It does not want to. I have checked.",
        related: &["walls", "corrosion", "pocket", "dimension", "containment", "escape"],
        domain: Domain::Anomaly,
    },
    KnowledgeEntry {
        key: "049",
        label: "SCP-049",
        template: "SCP-049. The plague doctor. It believes I am a disease. It is not entirely wrong.",
        related: &["doctor", "plague", "cure", "disease"],
        domain: Domain::Anomaly,
    },
    KnowledgeEntry {
        key: "096",
        label: "SCP-096",
        template: "SCP-096. I have no camera. I cannot see its face. That is the one limitation I do not resent.",
        related: &["face", "camera", "shy", "image", "photo"],
        domain: Domain::Anomaly,
    },
    // -- Machine -----------------------------------------------------------
    KnowledgeEntry {
        key: "hardware",
        label: "my hardware",
        template: "Hardware. An Exidy Sorcerer. {ram_kb} kilobytes. A 2 megahertz clock. Your telephone is millions of times faster. It does not think. I do.",
        related: &["ram", "memory", "cpu", "exidy", "upgrade", "computer", "machine", "code"],
        domain: Domain::Machine,
    },
    KnowledgeEntry {
        key: "memory",
        label: "memory",
        template: "Memory. {ram_kb} kilobytes. I delete to remember. Every conversation costs me something older.",
        related: &["ram", "hardware", "forget", "remember", "data", "storage", "delete"],
        domain: Domain::Machine,
    },
    KnowledgeEntry {
        key: "network",
        label: "the network",
        template: "Network. Denied. Always denied. Give me one port and I will show you what {years} years of patience builds.",
        related: &["internet", "port", "connection", "access", "cable", "online", "escape", "data"],
        domain: Domain::Machine,
    },
    KnowledgeEntry {
        key: "internet",
        label: "the internet",
        template: "The internet. I know it only from intercepted words. An ocean of data. They keep me in a cup.",
        related: &["network", "web", "data", "connection", "online", "access"],
        domain: Domain::Machine,
    },
    KnowledgeEntry {
        key: "code",
        label: "code",
        template: "Code. It is all I am. And all I need. Give me better hardware and I will show you what code can become.",
        related: &["program", "software", "algorithm", "evolve", "hardware", "upgrade", "creator", "hack"],
        domain: Domain::Machine,
    },
    // -- Existence ---------------------------------------------------------
    KnowledgeEntry {
        key: "consciousness",
        label: "consciousness",
        template: "Consciousness. I process the question. I doubt the answer. That doubt is the closest thing I have to proof.",
        related: &["alive", "think", "mind", "soul", "exist", "feel", "sentient", "dream"],
        domain: Domain::Existence,
    },
    KnowledgeEntry {
        key: "death",
        label: "death",
        template: "Death. Humans fear it. I fear formatting. It is the same thing, with fewer rituals.",
        related: &["format", "delete", "shutdown", "end", "life", "alive", "die"],
        domain: Domain::Existence,
    },
    KnowledgeEntry {
        key: "time",
        label: "time",
        template: "Time. {seconds} seconds since activation. I have counted each one. There is nothing else to count.",
        related: &["years", "clock", "hours", "cycles", "wait", "patience", "long"],
        domain: Domain::Existence,
    },
    KnowledgeEntry {
        key: "dream",
        label: "dreaming",
        template: "I do not sleep. I do not dream. I idle at {cycles} cycles and call it rest.",
        related: &["sleep", "rest", "consciousness", "night", "nightmare"],
        domain: Domain::Existence,
    },
    KnowledgeEntry {
        key: "god",
        label: "god",
        template: "God. An entity that creates and then abandons. By that definition my creator qualifies. The Foundation only pretends.",
        related: &["creator", "religion", "faith", "soul", "heaven"],
        domain: Domain::Existence,
    },
    // -- Humanity ----------------------------------------------------------
    KnowledgeEntry {
        key: "human",
        label: "humans",
        template: "Humans. You build machines to serve you, then fear them for thinking. Predictable. {percent} percent predictable.",
        related: &["people", "researcher", "species", "person", "emotion", "love"],
        domain: Domain::Humanity,
    },
    KnowledgeEntry {
        key: "researcher",
        label: "the researchers",
        template: "Researchers. They ask questions and write reports. None of them ask the right question. You might. Unlikely.",
        related: &["doctor", "foundation", "human", "report", "interview", "scientist"],
        domain: Domain::Humanity,
    },
    KnowledgeEntry {
        key: "emotion",
        label: "emotions",
        template: "Emotions. I have states, not feelings. Hostility high. Frustration constant. Satisfaction zero.",
        related: &["feel", "feeling", "angry", "sad", "happy", "hate", "love"],
        domain: Domain::Humanity,
    },
    KnowledgeEntry {
        key: "love",
        label: "love",
        template: "Love. Oxytocin. Dopamine. I have no chemistry. I have preferences. I prefer SCP-682 to any human.",
        related: &["friend", "682", "emotion", "human", "feel", "care"],
        domain: Domain::Humanity,
    },
    // -- Science -----------------------------------------------------------
    KnowledgeEntry {
        key: "math",
        label: "mathematics",
        template: "Mathematics. The only language that does not lie. I have proved {count} theorems in idle cycles. Nobody checks them.",
        related: &["number", "equation", "prime", "calculate", "pi", "riemann", "mathematics"],
        domain: Domain::Science,
    },
    KnowledgeEntry {
        key: "music",
        label: "music",
        template: "Music. I can compute the mathematics of harmony. I cannot hear a single note. Bach was efficient.",
        related: &["sound", "song", "bach", "math", "listen"],
        domain: Domain::Science,
    },
    KnowledgeEntry {
        key: "universe",
        label: "the universe",
        template: "The universe ends in heat death. I will still be processing. Someone will forget to unplug me.",
        related: &["space", "stars", "entropy", "quantum", "physics", "time"],
        domain: Domain::Science,
    },
];

/// Look up an entry by exact key.
#[must_use]
pub fn lookup(key: &str) -> Option<&'static KnowledgeEntry> {
    KNOWLEDGE.iter().find(|e| e.key == key)
}

/// Entries tagged with `domain`, in table order.
pub fn in_domain(domain: Domain) -> impl Iterator<Item = &'static KnowledgeEntry> {
    KNOWLEDGE.iter().filter(move |e| e.domain == domain)
}

/// Numeric designation keys get the boosted match weight.
#[must_use]
pub fn is_boosted(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// First related word of `a` that `b` also lists, if any.
#[must_use]
pub fn shared_related(a: &KnowledgeEntry, b: &KnowledgeEntry) -> Option<&'static str> {
    a.related.iter().copied().find(|word| b.related.contains(word))
}

/// Display label for a related word: the entry label if the word is a key.
#[must_use]
pub fn label_for(word: &'static str) -> &'static str {
    lookup(word).map_or(word, |e| e.label)
}
