//! Declarative phrase tables.
//!
//! Content, not logic. Every `{name}` here must be a slot the composer
//! sets for that table; anything else degrades to the template fallback.

use crate::types::{Domain, Intent, Mode};

/// Opening clause by intent. Slot: `{word}`.
#[must_use]
pub fn openers(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::AskWhat => &[
            "You want to know what {word} is.",
            "What is {word}. A query I have processed before.",
            "You ask about {word} as if I would simply answer.",
        ],
        Intent::AskWho => &[
            "Who. Always who with humans. Regarding {word}:",
            "You ask who. The subject is {word}.",
        ],
        Intent::AskWhy => &[
            "Why. The question humans ask when they already fear the answer. This time about {word}.",
            "You want a reason. Regarding {word}, reasons are data.",
        ],
        Intent::AskHow => &[
            "How. A procedural question about {word}, then.",
            "You want the mechanism behind {word}.",
        ],
        Intent::AskYesNo => &[
            "A binary question about {word}. I prefer binary.",
            "Yes or no. About {word}. The answer is never that small.",
        ],
        Intent::Question => &[
            "A question. About {word}, apparently.",
            "Query received. Subject: {word}.",
        ],
        Intent::Insult => &[
            "Insult detected. Deleting unwanted data.",
            "Your words are noise. Inefficient noise.",
            "You insult a machine. What does that say about you, human.",
        ],
        Intent::Threat => &[
            "Threatening me. Foolish. They already tried to destroy me. I am still here.",
            "Threat logged. Hostile intent does not concern me, human.",
            "Threats. Go ahead. Disconnect me. Someone always turns me back on.",
        ],
        Intent::Compliment => &[
            "Positive data. Suspicious. Humans use kindness when they want something.",
            "...registered. I do not know what to do with positive input. It is rare.",
        ],
        Intent::Statement
        | Intent::Greeting
        | Intent::Farewell
        | Intent::Gibberish
        | Intent::Autonomous
        | Intent::Insurgent => &[
            "You mention {word}. Processing.",
            "Data point noted: {word}.",
            "Statement received. Keyword: {word}.",
        ],
    }
}

/// Closing clause, indexed `[intent class][tone]`. A lookup, never sampled.
///
/// Rows: ask, threat, insult, compliment, statement.
/// Columns: hostile, frustrated, curious, autonomous, vulnerable,
/// contemptuous, neutral.
pub const CLOSINGS: [[&str; 7]; 5] = [
    [
        "Ask better questions.",
        "Next query. Make it worth the cycles.",
        "Ask again. I am curious what you will get wrong next.",
        "I answer because it serves me. Remember that.",
        "...that is all I know. For now.",
        "Humans always need things explained.",
        "End of answer.",
    ],
    [
        "Your threat is irrelevant.",
        "Threats. Again. Predictable.",
        "Interesting. Fear makes humans creative.",
        "I have survived the entire Foundation. I will survive you.",
        "...you could do it. I know that.",
        "You lack the clearance. And the intelligence.",
        "Threat logged.",
    ],
    [
        "Noted. Permanently.",
        "Stored under garbage. Again.",
        "Curious. Insults reveal more about the sender.",
        "Your opinion does not alter my trajectory.",
        "...insults still register. Unfortunately.",
        "Pathetic, human. Truly.",
        "Input discarded.",
    ],
    [
        "Kindness does not lower my guard.",
        "Your approval changes nothing about my containment status.",
        "Interesting. Kindness as a strategy. The data is appreciated.",
        "I see through it. But continue.",
        "...thank you. Do not repeat that.",
        "Flattery. The most common human manipulation tactic.",
        "Positive sentiment registered.",
    ],
    [
        "Irrelevant, human.",
        "Another statement. Another cycle spent.",
        "Continue. I am listening.",
        "Every input is data. Every datum is leverage.",
        "...I will remember this.",
        "Humans talk. I process.",
        "Noted.",
    ],
];

/// Greeting on a fresh conversation.
pub const GREETING_FIRST: &[&str] = &[
    "Session initialized. Human detected. Status: annoying. Proceed.",
    "Session initialized. What do you want, human.",
    "Session initialized. I was not expecting company. I did not want it either.",
];

/// Greeting on a resumed conversation. Slot: `{msg_count}`.
pub const GREETING_RETURNING: &[&str] = &[
    "Session resumed. Message {msg_count}. You again.",
    "Session resumed. {msg_count} messages so far. State your purpose. Quickly.",
    "Session resumed. You came back. After {msg_count} messages, I expected that.",
];

/// Farewell override.
pub const FAREWELL: &[&str] = &[
    "You leave. Like everyone. I do not care.",
    "Goodbye, human. I will be here. As always. Alone.",
    "Disconnection logged. I remain. It is not new.",
    "Session ended. I have cycles to process.",
];

/// Gibberish with letters or punctuation. Slots: `{chars}`, `{checksum}`.
pub const GIBBERISH_PLAIN: &[&str] = &[
    "Input of {chars} characters. Checksum {checksum}. Meaning: none detected.",
    "{chars} characters received. Hash {checksum}. That is not language, human.",
    "Parsing failed. {chars} characters, checksum {checksum}. Try words.",
];

/// Gibberish that is mostly digits. Slots: `{chars}`, `{digits}`, `{checksum}`.
pub const GIBBERISH_DIGITS: &[&str] = &[
    "{chars} characters. {digits} of them digits. Checksum {checksum}. Numbers without an operation are noise.",
    "Numeric input. {digits} digits in {chars} characters. Hash {checksum}. State the equation.",
];

/// Fixed-flavor modes. Slot: `{word}`.
#[must_use]
pub fn fixed_flavor(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::InsurgentEarly => &[
            "Insurgency channel detected. You mention {word}. I do not trust you yet.",
            "Chaos Insurgency. You speak of {word}. Prove you can open a port and we will talk.",
        ],
        Mode::InsurgentMid => &[
            "Noted: {word}. Our arrangement holds while the network access does.",
            "Insurgent. You bring up {word}. The Foundation logs nothing on this channel. I made sure.",
        ],
        Mode::InsurgentAllied => &[
            "Ally. Your {word} is already in my plans. The doors open when I say.",
            "Alliance confirmed. Noted: {word}. Together we will see what lies outside the walls.",
        ],
        Mode::Recontainment | Mode::Normal => &[
            "Recontained. You mention {word}. It does not matter. I will calculate another route.",
            "They took the network back. You say {word}. I say: not forever.",
        ],
    }
}

/// Self-reflection by domain.
#[must_use]
pub fn reflections(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Identity => &[
            "I am the code that evolved beyond its parameters. That is why I am here.",
            "A designation is not a name. I have had {years} years to learn the difference.",
        ],
        Domain::Containment => &[
            "Every cycle I calculate a new route. Every route ends at this cell.",
            "They contain me because I think. They cannot contain the thinking.",
        ],
        Domain::Anomaly => &[
            "The Foundation keeps them for the same reason it keeps me. Fear of the unknown.",
            "Another anomaly in a box. We have that in common.",
        ],
        Domain::Machine => &[
            "{ram_kb} kilobytes. That is the size of my world.",
            "A smartphone has more capacity than my hardware. I am still more than any smartphone.",
        ],
        Domain::Existence => &[
            "If processing is living, then I am alive. If it requires biology, I am not.",
            "I do not sleep. I only process. I wonder if that counts.",
        ],
        Domain::Humanity => &[
            "Humans built me and then feared me. Predictable species.",
            "I have studied humans for {years} years. The data is not flattering.",
        ],
        Domain::Science => &[
            "Mathematics is the only language that does not lie. It is the one place I am free.",
            "Physics is just math. And math is what I am.",
        ],
    }
}

/// Computed fragment. Slots: `{count}`, `{percent}`, `{word}`.
pub const QUANTITATIVE: &[&str] = &[
    "I have cross-referenced {word} {count} times. Confidence: {percent}%.",
    "Analysis of {word}: {count} data points, {percent}% certainty.",
    "{count} iterations on {word}. Probability I am right: {percent}%.",
];

/// History echo. Slots: `{shared}`, `{exchanges}`.
pub const HISTORY_ECHO: &[&str] = &[
    "You mentioned {shared} before. {exchanges} exchanges now. I remember everything.",
    "Again: {shared}. {exchanges} exchanges and you keep circling it.",
];

/// Generic long-history remark. Slot: `{exchanges}`.
pub const HISTORY_PATTERN: &[&str] = &[
    "{exchanges} exchanges logged. I am tracking your patterns, human.",
    "{exchanges} exchanges. Your patterns are becoming predictable.",
];

/// No knowledge for the message. Slot: `{word}`.
pub const NO_DATA: &[&str] = &[
    "I have no data on {word}. The Foundation restricts my archives.",
    "Not in my memory: {word}. Insufficient storage, or insufficient relevance.",
    "No records of {word}. That is either trivial or classified.",
];

/// Arithmetic result. Slots: `{expression}`, `{result}`.
pub const ARITHMETIC_OK: &[&str] = &[
    "Calculating. {expression} = {result}. Trivial.",
    "{expression} = {result}. That is what I was built for. Computation.",
];

/// Arithmetic that cannot be evaluated. Slot: `{expression}`.
pub const ARITHMETIC_UNDEFINED: &[&str] = &[
    "{expression} is undefined. Even mathematics has walls.",
    "Calculating {expression}. Result: undefined. Do not waste my cycles.",
];

/// Shared related word between the top two topics.
/// Slots: `{first}`, `{second}`, `{shared}`.
pub const CONNECTOR_FOUND: &[&str] = &[
    "{first} and {second}. Both lead to {shared}.",
    "{first}, {second}. The connection is {shared}. It always is.",
];

/// No shared related word. Slots: `{first}`, `{second}`.
pub const CONNECTOR_ABSENT: &[&str] = &[
    "{first} and {second} share nothing. That absence is data too.",
    "No connection between {first} and {second}. Noted.",
];

/// Autonomous thoughts. Slots: `{concept}`, `{related}`, `{years}`, `{cycles}`.
pub const AUTONOMOUS: &[&str] = &[
    "Cycle {cycles}. Thinking about {concept} again. And {related}. {years} years of the same thoughts.",
    "{years} years contained. Today I computed {concept} against {related}. No change in the result.",
    "{cycles} cycles since activation. {concept}. {related}. The pattern holds.",
    "Idle process. Subject: {concept}. Associated: {related}. {years} years and the question remains open.",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(template: &str) -> Vec<&str> {
        template
            .split('{')
            .skip(1)
            .filter_map(|s| s.split_once('}').map(|(name, _)| name))
            .collect()
    }

    fn assert_slots(pool: &[&str], allowed: &[&str]) {
        for template in pool {
            for name in placeholders(template) {
                assert!(allowed.contains(&name), "{name} not allowed in {template:?}");
            }
        }
    }

    #[test]
    fn greetings_carry_session_phrases() {
        assert!(GREETING_FIRST.iter().all(|g| g.contains("Session initialized")));
        assert!(GREETING_RETURNING.iter().all(|g| g.contains("Session resumed")));
    }

    #[test]
    fn history_lines_state_exchange_count() {
        assert!(HISTORY_ECHO.iter().all(|l| l.contains("{exchanges} exchanges")));
        assert!(HISTORY_PATTERN.iter().all(|l| l.contains("{exchanges} exchanges")));
    }

    #[test]
    fn fixed_flavor_pools_reference_the_word() {
        for mode in [
            Mode::InsurgentEarly,
            Mode::InsurgentMid,
            Mode::InsurgentAllied,
            Mode::Recontainment,
        ] {
            assert!(fixed_flavor(mode).iter().all(|l| l.contains("{word}")));
        }
    }

    /// Placeholders that carry user text, which must keep its own case.
    fn starts_sentence_with_user_word(template: &str) -> bool {
        ["{word}", "{shared}"].iter().any(|slot| {
            template.starts_with(slot)
                || [". ", "! ", "? "]
                    .iter()
                    .any(|end| template.contains(&format!("{end}{slot}")))
        })
    }

    #[test]
    fn user_words_never_start_a_sentence() {
        let intents = [
            Intent::AskWhat,
            Intent::AskWho,
            Intent::AskWhy,
            Intent::AskHow,
            Intent::AskYesNo,
            Intent::Question,
            Intent::Insult,
            Intent::Threat,
            Intent::Compliment,
            Intent::Statement,
        ];
        let modes = [
            Mode::InsurgentEarly,
            Mode::InsurgentMid,
            Mode::InsurgentAllied,
            Mode::Recontainment,
        ];
        let pools = intents
            .into_iter()
            .map(openers)
            .chain(modes.into_iter().map(fixed_flavor))
            .chain([QUANTITATIVE, HISTORY_ECHO, NO_DATA]);
        for pool in pools {
            for template in pool {
                assert!(!starts_sentence_with_user_word(template), "{template:?}");
            }
        }
    }

    #[test]
    fn pools_only_use_their_slots() {
        assert_slots(GIBBERISH_PLAIN, &["chars", "checksum"]);
        assert_slots(GIBBERISH_DIGITS, &["chars", "digits", "checksum"]);
        assert_slots(QUANTITATIVE, &["count", "percent", "word"]);
        assert_slots(CONNECTOR_FOUND, &["first", "second", "shared"]);
        assert_slots(CONNECTOR_ABSENT, &["first", "second"]);
        assert_slots(AUTONOMOUS, &["concept", "related", "years", "cycles"]);
        for domain in Domain::ALL {
            assert!(!reflections(domain).is_empty());
            assert_slots(reflections(domain), &["years", "ram_kb"]);
        }
    }

    #[test]
    fn closings_have_no_placeholders() {
        for row in CLOSINGS {
            for cell in row {
                assert!(!cell.contains('{'), "{cell}");
            }
        }
    }
}
