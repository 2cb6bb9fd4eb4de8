use crate::utils::error::{RecipeError, Result};
use chrono::Datelike;

const HYPHEN: &str = "-";
const CONJUNCTION: &str = " and ";
const SEPARATOR: &str = ", ";
const NEGATIVE: &str = "negative ";
const DECIMAL: &str = " point ";

const SMALL: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 6] = [
    (1_000_000_000_000_000_000, "quintillion"),
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

pub fn is_number_odd(number: i64) -> bool {
    number % 2 != 0
}

pub fn is_number_even(number: i64) -> bool {
    number % 2 == 0
}

/// Spells out a decimal number: `"864210"` becomes
/// `"eight hundred and sixty-four thousand, two hundred and ten"`,
/// `"-1.25"` becomes `"negative one point two five"`.
pub fn number_to_word(number: &str) -> Result<String> {
    let trimmed = number.trim();
    let not_a_number = || RecipeError::NotANumber {
        value: number.to_string(),
    };

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(integer) || fraction.is_some_and(|f| !is_digits(f)) {
        return Err(not_a_number());
    }
    if integer.is_empty() && fraction.map_or(true, str::is_empty) {
        return Err(not_a_number());
    }

    let value = if integer.is_empty() {
        0
    } else {
        integer
            .parse::<u64>()
            .ok()
            .filter(|v| *v <= i64::MAX as u64)
            .ok_or_else(|| RecipeError::NumberOutOfRange {
                value: number.to_string(),
            })?
    };

    let mut words = String::new();
    if negative && (value > 0 || fraction.is_some_and(|f| f.chars().any(|c| c != '0'))) {
        words.push_str(NEGATIVE);
    }
    words.push_str(&unsigned_to_word(value));

    if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
        words.push_str(DECIMAL);
        let digits: Vec<&str> = fraction
            .bytes()
            .map(|digit| SMALL[(digit - b'0') as usize])
            .collect();
        words.push_str(&digits.join(" "));
    }

    Ok(words)
}

pub fn integer_to_word(number: i64) -> String {
    if number < 0 {
        format!("{}{}", NEGATIVE, unsigned_to_word(number.unsigned_abs()))
    } else {
        unsigned_to_word(number as u64)
    }
}

fn unsigned_to_word(number: u64) -> String {
    match number {
        0..=20 => SMALL[number as usize].to_string(),
        21..=99 => {
            let mut words = TENS[(number / 10) as usize].to_string();
            let units = number % 10;
            if units > 0 {
                words.push_str(HYPHEN);
                words.push_str(SMALL[units as usize]);
            }
            words
        }
        100..=999 => {
            let mut words = format!("{} hundred", SMALL[(number / 100) as usize]);
            let remainder = number % 100;
            if remainder > 0 {
                words.push_str(CONJUNCTION);
                words.push_str(&unsigned_to_word(remainder));
            }
            words
        }
        _ => {
            let (base, unit) = SCALES
                .iter()
                .copied()
                .find(|(base, _)| number >= *base)
                .unwrap_or((1_000, "thousand"));
            let mut words = format!("{} {}", unsigned_to_word(number / base), unit);
            let remainder = number % base;
            if remainder > 0 {
                words.push_str(if remainder < 100 { CONJUNCTION } else { SEPARATOR });
                words.push_str(&unsigned_to_word(remainder));
            }
            words
        }
    }
}

/// `1` becomes `1st`, `12` becomes `12th`, `-22` becomes `-22nd`.
pub fn ordinal(cardinal: i64) -> String {
    let magnitude = cardinal.unsigned_abs();
    let suffix = if (5..=20).contains(&(magnitude % 100)) {
        "th"
    } else {
        match magnitude % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{}{}", cardinal, suffix)
}

/// Days in `month` (1-12) of `year`. Any year outside 1000-9999, or `None`,
/// means the current year. Months out of range give 0.
pub fn days_in_month(month: u32, year: Option<i32>) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }

    let year = year
        .filter(|y| (1000..=9999).contains(y))
        .unwrap_or_else(|| chrono::Local::now().year());

    if month == 2 && (year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)) {
        return 29;
    }

    const DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    DAYS[(month - 1) as usize]
}

/// Binary units, at most two decimals: `17179869184` becomes `16 GB`.
pub fn bytes_to_human_readable_size(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", size);
    let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", formatted, UNITS[unit])
}
