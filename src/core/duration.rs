use crate::core::numbers::integer_to_word;

const PERIODS: [(&str, f64); 7] = [
    ("year", 3.156e7),
    ("month", 2.63e6),
    ("week", 604_800.0),
    ("day", 86_400.0),
    ("hour", 3_600.0),
    ("minute", 60.0),
    ("second", 1.0),
];

/// `3610` becomes `"1 hour and 10 seconds"`, or `"one hour and ten seconds"`
/// with `as_words`. Fractions of a second are dropped.
pub fn seconds_to_text(seconds: f64, as_words: bool) -> String {
    let count_text = |count: i64| {
        if as_words {
            integer_to_word(count)
        } else {
            count.to_string()
        }
    };

    let mut remaining = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let mut parts = Vec::new();

    for (name, duration) in PERIODS {
        let count = (remaining / duration).floor() as i64;
        if count == 0 {
            continue;
        }

        let plural = if count == 1 { "" } else { "s" };
        parts.push(format!("{} {}{}", count_text(count), name, plural));

        // whole seconds left over
        remaining = (remaining % duration).floor();
    }

    match parts.pop() {
        None => format!("{} seconds", count_text(0)),
        Some(last) if parts.is_empty() => last,
        Some(last) => format!("{} and {}", parts.join(", "), last),
    }
}

pub fn minutes_to_text(minutes: f64, as_words: bool) -> String {
    seconds_to_text(minutes * 60.0, as_words)
}

pub fn hours_to_text(hours: f64, as_words: bool) -> String {
    seconds_to_text(hours * 3600.0, as_words)
}
