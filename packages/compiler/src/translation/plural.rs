//! Plural form selection
//!
//! A pluralized message lists its forms separated by `|`. A form may pin
//! itself to explicit counts (`{0} No apples`), to an interval
//! (`]1,Inf] %count% apples`), or carry a label (`one: One apple`). Pinned
//! forms win; otherwise the locale's plural rule picks among the rest.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

static EXPLICIT_SET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*\{\s*(-?\d+(?:\.\d+)?(?:\s*,\s*-?\d+(?:\.\d+)?)*)\s*\}\s?(.*)$").unwrap()
});

static INTERVAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)^\s*([\[\]])\s*(-Inf|\*|-?\d+(?:\.\d+)?)\s*,\s*(\+?Inf|\*|-?\d+(?:\.\d+)?)\s*([\[\]])\s?(.*)$",
    )
    .unwrap()
});

static LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^\s*\w+:\s*(.*)$").unwrap());

/// Picks the form of `message` matching `count` for `locale`.
///
/// A message without `|` is returned unchanged.
pub fn choose(message: &str, count: f64, locale: &str) -> String {
    if !message.contains('|') {
        return message.to_string();
    }

    let mut standard: SmallVec<[&str; 4]> = SmallVec::new();
    for part in message.split('|') {
        if let Some(caps) = EXPLICIT_SET.captures(part) {
            let matches = caps[1]
                .split(',')
                .filter_map(|n| n.trim().parse::<f64>().ok())
                .any(|n| n == count);
            if matches {
                return caps.get(2).map_or("", |m| m.as_str()).to_string();
            }
            continue;
        }
        if let Some(caps) = INTERVAL.captures(part) {
            if interval_contains(&caps[1], &caps[2], &caps[3], &caps[4], count) {
                return caps.get(5).map_or("", |m| m.as_str()).to_string();
            }
            continue;
        }
        let form = LABEL
            .captures(part)
            .and_then(|caps| caps.get(1))
            .map_or(part, |m| m.as_str());
        standard.push(form);
    }

    if standard.is_empty() {
        return message.to_string();
    }

    let index = plural_index(count, locale).min(standard.len() - 1);
    standard[index].to_string()
}

fn interval_contains(open: &str, left: &str, right: &str, close: &str, count: f64) -> bool {
    let left = parse_bound(left, f64::NEG_INFINITY);
    let right = parse_bound(right, f64::INFINITY);
    let above_left = if open == "[" { count >= left } else { count > left };
    let below_right = if close == "]" { count <= right } else { count < right };
    above_left && below_right
}

fn parse_bound(bound: &str, infinite: f64) -> f64 {
    match bound {
        "-Inf" | "Inf" | "+Inf" | "*" => infinite,
        n => n.parse().unwrap_or(infinite),
    }
}

/// Index of the plural form for `count` under the rules of `locale`.
pub fn plural_index(count: f64, locale: &str) -> usize {
    let language = locale
        .split(|c: char| c == '_' || c == '-')
        .next()
        .unwrap_or(locale);
    let count = count.abs();

    match language {
        "ja" | "ko" | "zh" | "th" | "tr" | "vi" | "id" | "ms" => 0,
        "fr" | "pt" | "hy" => {
            if count < 2.0 {
                0
            } else {
                1
            }
        }
        _ => {
            if count == 1.0 {
                0
            } else {
                1
            }
        }
    }
}
