//! Orthographic syllable estimation.
//!
//! A heuristic, not a dictionary: vowel runs are counted, a silent trailing
//! `e` (or an `-ely` ending) is subtracted, and a fixed list of patterns that
//! raw vowel runs under-count are added back. The result is deterministic and
//! always at least 1.
//!
//! ```
//! use domain_scout_lib::syllables::count_syllables;
//!
//! assert_eq!(count_syllables("handle"), 2);
//! assert_eq!(count_syllables("synclink"), 2);
//! assert_eq!(count_syllables("ai"), 2);
//! ```

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VOWEL_RUNS: Regex = Regex::new(r"[aeiouy]+").expect("valid vowel pattern");
    static ref SILENT_ENDINGS: Regex =
        Regex::new(r"[^aeiou]e[sd]?$|[^e]ely$").expect("valid silent-ending pattern");
}

/// Short tokens whose pronunciation spells out letters.
const IRREGULAR: &[(&str, i64)] = &[("ai", 2), ("io", 2), ("eo", 2)];

/// Estimate the syllables of a single hyphen-free token.
///
/// Input is lowercased first. Always returns at least 1.
pub fn count_syllables(token: &str) -> u32 {
    floor_at_one(raw_syllables(&token.to_lowercase()))
}

/// Estimate a bare name that may contain hyphens.
///
/// Each hyphen-separated part is estimated without the floor, the parts are
/// summed, and the floor is applied to the total.
pub fn name_syllables(name: &str) -> u32 {
    let lowered = name.to_lowercase();
    let total = lowered
        .split('-')
        .filter(|part| !part.is_empty())
        .map(raw_syllables)
        .sum();
    floor_at_one(total)
}

/// Estimate a stem followed by a suffix whose syllable count is fixed.
///
/// An empty stem contributes nothing; the floor applies to the combined total.
pub fn count_with_suffix(stem: &str, suffix_syllables: u32) -> u32 {
    floor_at_one(raw_syllables(&stem.to_lowercase()) + i64::from(suffix_syllables))
}

fn floor_at_one(raw: i64) -> u32 {
    u32::try_from(raw.max(1)).unwrap_or(u32::MAX)
}

/// Unfloored estimate. Expects lowercase input; may return 0 (e.g. for "").
fn raw_syllables(token: &str) -> i64 {
    if token.is_empty() {
        return 0;
    }

    if let Some((_, count)) = IRREGULAR.iter().find(|(word, _)| *word == token) {
        return *count;
    }

    let vowel_runs = VOWEL_RUNS.find_iter(token).count() as i64;
    let silent = SILENT_ENDINGS.find_iter(token).count() as i64;
    let additions = count_additions(token) as i64;

    vowel_runs - silent + additions
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Length of the under-counted pattern starting at `i`, if any.
///
/// Patterns are tried in order and the first match wins, mirroring
/// leftmost-first regex alternation.
fn addition_at(w: &[char], i: usize) -> Option<usize> {
    let n = w.len();
    let at = |offset: usize| w.get(i + offset).copied();
    let ends_after = |len: usize| i + len == n;

    // -le / -re after a consonant: handle, purple
    if let (Some(c), Some(l), Some('e')) = (at(0), at(1), at(2)) {
        if !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'l' | 'r') && matches!(l, 'l' | 'r') {
            if ends_after(4) && matches!(at(3), Some('s' | 'd')) {
                return Some(4);
            }
            if ends_after(3) {
                return Some(3);
            }
        }
    }

    if ends_after(3) {
        match (at(0), at(1), at(2)) {
            // faces, pages
            (Some('c' | 's' | 'g' | 'z'), Some('e'), Some('s')) => return Some(3),
            // started, needed
            (Some('t' | 'd'), Some('e'), Some('d')) => return Some(3),
            _ => {}
        }
    }

    // media, but not a final -ian
    if at(0) == Some('i') && at(1) == Some('a') && !(ends_after(3) && at(2) == Some('n')) {
        return Some(2);
    }

    match (at(0), at(1)) {
        (Some('i'), Some('o')) | (Some('e'), Some('o')) => return Some(2),
        _ => {}
    }

    if ends_after(3) && (at(0), at(1), at(2)) == (Some('i'), Some('s'), Some('m')) {
        return Some(3);
    }

    // fire, empire
    if ends_after(4) {
        if let (Some(c), Some('i'), Some('r'), Some('e')) = (at(0), at(1), at(2), at(3)) {
            if !is_vowel(c) {
                return Some(4);
            }
        }
    }

    // equal, fluent
    if let (Some(c), Some('u'), Some('a' | 'e')) = (at(0), at(1), at(2)) {
        if !matches!(c, 'g' | 'q') {
            return Some(3);
        }
    }

    match (at(0), at(1), at(2), at(3)) {
        // various, gorgeous
        (Some('i' | 'e'), Some('o'), Some('u'), Some('s')) => Some(4),
        // nation, vision
        (Some('s' | 't'), Some('i'), Some('o'), Some('n')) => Some(4),
        _ => None,
    }
}

fn count_additions(token: &str) -> usize {
    let chars: Vec<char> = token.chars().collect();
    let mut count = 0;
    let mut i = 0;

    while i < chars.len() {
        match addition_at(&chars, i) {
            Some(len) => {
                count += 1;
                i += len;
            }
            None => i += 1,
        }
    }

    count
}
