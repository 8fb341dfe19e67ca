//! Modifier abbreviations and their bitmask encoding.
//!
//! The calculator takes mods as a single integer using the conventional
//! osu! bit layout. Only the difficulty-affecting subset is recognized by
//! the text parser; the remaining bits are defined so masks coming from
//! other sources stay meaningful.

pub const NF: u32 = 1 << 0;
pub const EZ: u32 = 1 << 1;
pub const TD: u32 = 1 << 2;
pub const HD: u32 = 1 << 3;
pub const HR: u32 = 1 << 4;
pub const SD: u32 = 1 << 5;
pub const DT: u32 = 1 << 6;
pub const RX: u32 = 1 << 7;
pub const HT: u32 = 1 << 8;
pub const NC: u32 = 1 << 9;
pub const FL: u32 = 1 << 10;
pub const SO: u32 = 1 << 12;
pub const AP: u32 = 1 << 13;

/// Abbreviations the parser recognizes. Everything else in the bit table
/// exists for mask compatibility only and is never set from text.
const PARSED: [(&str, u32); 6] = [
    ("EZ", EZ),
    ("HT", HT),
    ("HR", HR),
    ("DT", DT),
    ("HD", HD),
    ("FL", FL),
];

/// Parse a whitespace-separated list of modifier abbreviations into a mask.
///
/// Matching is case-insensitive. A leading `+` on a token is stripped
/// because saved map lists historically store mods as `+DT +HR`. Tokens
/// that match nothing contribute nothing; an empty or fully unrecognized
/// string yields 0.
pub fn parse_mods(text: &str) -> u32 {
    let mut mask = 0u32;
    for token in text.split_whitespace() {
        let token = token.trim_start_matches('+');
        for (abbr, bit) in PARSED {
            if token.eq_ignore_ascii_case(abbr) {
                mask |= bit;
            }
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(parse_mods(""), 0);
        assert_eq!(parse_mods("   "), 0);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(parse_mods("dt"), DT);
        assert_eq!(parse_mods("DT"), DT);
        assert_eq!(parse_mods("Dt"), DT);
    }

    #[test]
    fn combines_with_or() {
        assert_eq!(parse_mods("dt hr"), DT | HR);
        assert_eq!(parse_mods("EZ HT FL HD"), EZ | HT | FL | HD);
    }

    #[test]
    fn unknown_tokens_ignored() {
        assert_eq!(parse_mods("xyz"), 0);
        assert_eq!(parse_mods("dt xyz hr"), DT | HR);
        // recognized set only: NC and SD exist in the table but not the parser
        assert_eq!(parse_mods("nc sd"), 0);
    }

    #[test]
    fn plus_prefix_stripped() {
        assert_eq!(parse_mods("+DT +HR"), DT | HR);
    }

    #[test]
    fn duplicates_do_not_double_count() {
        assert_eq!(parse_mods("dt dt dt"), DT);
    }
}
