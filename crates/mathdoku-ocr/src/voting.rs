//! Text cleaning, label parsing, and multi-configuration vote selection.

use std::collections::HashMap;

/// A single OCR attempt's parsed reading. `op = None` means no operator
/// character was present; `Some('?')` is the fallback marker for an
/// unrecognized trailing glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLabel {
    pub digits: String,
    pub op: Option<char>,
}

/// Strip whitespace, fold lookalike glyphs to their canonical form.
pub fn clean_ocr_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' | '÷' | '−' => fold_operator(c),
            'X' => 'x',
            'O' | 'o' | 'Q' => '0',
            'l' | 'I' => '1',
            other => other,
        })
        .collect()
}

fn fold_operator(c: char) -> char {
    match c {
        '×' => 'x',
        '÷' => '/',
        '−' => '-',
        other => other,
    }
}

/// Parse a cleaned OCR string as `(digits[,digits]*)(operator?)`, matching
/// `^(\d[\d,]*)([+\-x/?])?$`. A single non-digit trailing character is
/// salvaged to one of `+ - x / ?` rather than rejected outright, since a
/// misrecognized operator glyph is far more common than a misrecognized
/// digit run; a longer garbled tail matches neither the digit-run nor the
/// salvage grammar and is rejected outright so it can't skew voting.
pub fn parse_label(cleaned: &str) -> Option<ParsedLabel> {
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.is_empty() || !chars[0].is_ascii_digit() {
        return None;
    }

    let mut digit_end = 1;
    while digit_end < chars.len() && (chars[digit_end].is_ascii_digit() || chars[digit_end] == ',') {
        digit_end += 1;
    }
    let digits: String = chars[..digit_end].iter().collect();
    let rest = &chars[digit_end..];

    if rest.is_empty() {
        return Some(ParsedLabel { digits, op: None });
    }
    if rest.len() > 1 {
        return None;
    }

    let op = salvage_operator(rest[0]);
    Some(ParsedLabel { digits, op: Some(op) })
}

fn salvage_operator(c: char) -> char {
    match c {
        '+' => '+',
        '-' | '‐' | '–' | '—' => '-',
        'x' | 'X' => 'x',
        '/' | '÷' | '∕' => '/',
        '×' | '*' | '·' => 'x',
        _ => '?',
    }
}

/// Pick a winning reading from a batch of independent OCR attempts: group
/// by digit-string length (longest first), take the most-voted string at
/// the first length with either >=2 votes or no shorter length left to try,
/// then majority-vote the operator among parses sharing that digit string.
pub fn select_vote(parses: &[ParsedLabel]) -> Option<ParsedLabel> {
    if parses.is_empty() {
        return None;
    }

    let mut lengths: Vec<usize> = parses.iter().map(|p| p.digits.len()).collect();
    lengths.sort_unstable();
    lengths.dedup();
    lengths.reverse();

    let min_length = *lengths.last().unwrap();

    for &len in &lengths {
        let mut counts: Vec<(String, u32)> = Vec::new();
        for p in parses.iter().filter(|p| p.digits.len() == len) {
            match counts.iter_mut().find(|(d, _)| *d == p.digits) {
                Some((_, count)) => *count += 1,
                None => counts.push((p.digits.clone(), 1)),
            }
        }
        let (digits, votes) = counts.into_iter().max_by_key(|(_, c)| *c).unwrap();

        if votes >= 2 || len == min_length {
            let op = vote_operator(parses, &digits);
            return Some(ParsedLabel { digits, op });
        }
    }
    unreachable!("the smallest length is always eventually accepted")
}

fn vote_operator(parses: &[ParsedLabel], digits: &str) -> Option<char> {
    let matching: Vec<&ParsedLabel> = parses.iter().filter(|p| p.digits == digits).collect();

    let mut real_counts: HashMap<char, u32> = HashMap::new();
    let mut fallback_count = 0u32;
    let mut none_count = 0u32;
    let mut first_seen: Vec<char> = Vec::new();

    for p in &matching {
        match p.op {
            Some('?') => fallback_count += 1,
            Some(op) => {
                if !real_counts.contains_key(&op) {
                    first_seen.push(op);
                }
                *real_counts.entry(op).or_insert(0) += 1;
            }
            None => none_count += 1,
        }
    }

    if let Some(&best) = first_seen
        .iter()
        .max_by_key(|op| real_counts[op])
    {
        return Some(best);
    }

    if fallback_count > none_count {
        Some('?')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_folds_lookalike_glyphs() {
        assert_eq!(clean_ocr_text(" 1O2×"), "102x");
    }

    #[test]
    fn parse_splits_digits_and_operator() {
        let parsed = parse_label("12+").unwrap();
        assert_eq!(parsed.digits, "12");
        assert_eq!(parsed.op, Some('+'));
    }

    #[test]
    fn parse_salvages_unrecognized_trailing_glyph() {
        let parsed = parse_label("7~").unwrap();
        assert_eq!(parsed.digits, "7");
        assert_eq!(parsed.op, Some('?'));
    }

    #[test]
    fn parse_fails_without_a_leading_digit() {
        assert!(parse_label("+").is_none());
    }

    #[test]
    fn parse_keeps_commas_inside_the_digit_run() {
        let parsed = parse_label("1,234+").unwrap();
        assert_eq!(parsed.digits, "1,234");
        assert_eq!(parsed.op, Some('+'));
    }

    #[test]
    fn parse_rejects_a_multi_character_garbled_tail() {
        assert!(parse_label("12xy").is_none());
    }

    #[test]
    fn vote_prefers_the_majority_digit_string_at_the_longest_agreeing_length() {
        let parses = vec![
            ParsedLabel { digits: "12".into(), op: Some('+') },
            ParsedLabel { digits: "12".into(), op: Some('+') },
            ParsedLabel { digits: "1".into(), op: None },
        ];
        let winner = select_vote(&parses).unwrap();
        assert_eq!(winner.digits, "12");
        assert_eq!(winner.op, Some('+'));
    }

    #[test]
    fn vote_falls_back_to_the_shortest_length_when_unanimous() {
        let parses = vec![ParsedLabel { digits: "9".into(), op: None }];
        let winner = select_vote(&parses).unwrap();
        assert_eq!(winner.digits, "9");
    }

    #[test]
    fn vote_attaches_fallback_operator_when_it_outweighs_no_operator() {
        let parses = vec![
            ParsedLabel { digits: "6".into(), op: Some('?') },
            ParsedLabel { digits: "6".into(), op: Some('?') },
            ParsedLabel { digits: "6".into(), op: None },
        ];
        let winner = select_vote(&parses).unwrap();
        assert_eq!(winner.op, Some('?'));
    }
}
