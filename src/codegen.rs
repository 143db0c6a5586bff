// WB-Dict Phrase Code Generator
// Derives a fixed 4-letter code for a phrase from per-character base codes

use crate::charcodes::CharCodeTable;
use crate::classifier::is_cjk_char;
use crate::types::{DictError, EncodingRule};
use regex::Regex;
use std::sync::OnceLock;

/// Keep only CJK ideographs (U+4E00..U+9FFF)
///
/// Callers feed the reduced text into [`generate`]; punctuation, digits and
/// Latin letters stay in the stored phrase but never reach the coder.
pub fn extract_cjk(text: &str) -> String {
    text.chars().filter(|&ch| is_cjk_char(ch)).collect()
}

/// First letter of a character's code, or 'x' when the character is uncoded
fn first_code(ch: char, table: &CharCodeTable) -> char {
    table
        .get(ch)
        .and_then(|code| code.chars().next())
        .unwrap_or('x')
}

/// First two letters of a character's code
///
/// A one-letter code is padded with a trailing 'x'; an uncoded character
/// yields "xx".
fn first_two_codes(ch: char, table: &CharCodeTable) -> String {
    match table.get(ch) {
        Some(code) if code.chars().count() >= 2 => code.chars().take(2).collect(),
        Some(code) if !code.is_empty() => format!("{code}x"),
        _ => "xx".to_string(),
    }
}

fn truncate4(code: String) -> String {
    code.chars().take(4).collect()
}

/// Full stored code of a single character, or "xxxx" when uncoded
fn single_char_code(ch: char, table: &CharCodeTable) -> String {
    table
        .get(ch)
        .map(|code| code.to_string())
        .unwrap_or_else(|| "xxxx".to_string())
}

/// Generate a phrase code under the selected rule
///
/// Rules 1-4 always return exactly 4 letters for phrases of two or more
/// characters; a single character returns its raw stored code (or "xxxx"
/// when uncoded). Rule 5 generates nothing and returns an empty string;
/// its code comes from the user via [`validate_user_code`].
///
/// Uncoded characters never abort generation: they degrade to 'x'
/// fragments per the helper definitions above.
///
/// # Examples
/// ```
/// # use wb_dict::charcodes::CharCodeTable;
/// # use wb_dict::codegen::generate;
/// # use wb_dict::types::EncodingRule;
/// let table = CharCodeTable::from_pairs([('你', "wq"), ('好', "vb")]);
/// assert_eq!(generate("你好", &table, EncodingRule::Standard), "wqvb");
/// ```
pub fn generate(phrase: &str, table: &CharCodeTable, rule: EncodingRule) -> String {
    let chars: Vec<char> = phrase.chars().collect();

    match rule {
        EncodingRule::Standard => rule_standard(&chars, table),
        EncodingRule::OnePerChar => rule_one_per_char(&chars, table),
        EncodingRule::TwoThenOne => rule_two_then_one(&chars, table),
        EncodingRule::AllTwoCodes => rule_all_two_codes(&chars, table),
        EncodingRule::Free => String::new(),
    }
}

/// Rule 1: standard coding
fn rule_standard(chars: &[char], table: &CharCodeTable) -> String {
    match chars {
        [] => "xxxx".to_string(),
        [only] => single_char_code(*only, table),
        [a, b] => truncate4(format!(
            "{}{}",
            first_two_codes(*a, table),
            first_two_codes(*b, table)
        )),
        [a, b, c] => truncate4(format!(
            "{}{}{}",
            first_code(*a, table),
            first_code(*b, table),
            first_two_codes(*c, table)
        )),
        [a, b, c, d] => [*a, *b, *c, *d]
            .iter()
            .map(|&ch| first_code(ch, table))
            .collect(),
        // Five or more: first three characters plus the last one
        [a, b, c, .., last] => truncate4(
            [*a, *b, *c, *last]
                .iter()
                .map(|&ch| first_code(ch, table))
                .collect(),
        ),
    }
}

/// Rule 2: one code per character
///
/// Identical to rule 1 up to three characters. From four characters on it
/// takes the first code of every character and truncates. Characters past
/// the fourth are still looked up, then discarded.
fn rule_one_per_char(chars: &[char], table: &CharCodeTable) -> String {
    if chars.len() <= 3 {
        return rule_standard(chars, table);
    }

    let full: String = chars.iter().map(|&ch| first_code(ch, table)).collect();
    truncate4(full)
}

/// Rule 3: first two characters take two codes each, the rest one code
fn rule_two_then_one(chars: &[char], table: &CharCodeTable) -> String {
    if chars.len() <= 2 {
        return rule_standard(chars, table);
    }

    let mut full = String::new();
    full.push_str(&first_two_codes(chars[0], table));
    full.push_str(&first_two_codes(chars[1], table));
    for &ch in &chars[2..] {
        full.push(first_code(ch, table));
    }
    truncate4(full)
}

/// Rule 4: every character contributes its first two codes
///
/// Fragments are appended left to right, each cut down to however many
/// letters are still needed to reach 4; a phrase that runs out early is
/// right-padded with 'x'. A single character keeps the rule-1 behavior
/// (raw stored code or "xxxx").
fn rule_all_two_codes(chars: &[char], table: &CharCodeTable) -> String {
    match chars {
        [] => "xxxx".to_string(),
        [only] => single_char_code(*only, table),
        _ => {
            // Count collected letters in chars, not bytes; the table does
            // not guarantee ASCII code values
            let mut code = String::new();
            let mut collected = 0usize;
            for &ch in chars {
                if collected >= 4 {
                    break;
                }
                let fragment = first_two_codes(ch, table);
                for letter in fragment.chars().take(4 - collected) {
                    code.push(letter);
                    collected += 1;
                }
            }
            while collected < 4 {
                code.push('x');
                collected += 1;
            }
            code
        }
    }
}

/// Validate a user-supplied code for rule 5
///
/// The code must be non-empty and consist solely of ASCII letters; it is
/// returned lowercased.
pub fn validate_user_code(code: &str) -> Result<String, DictError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let pattern = RE.get_or_init(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

    let code = code.trim();
    if code.is_empty() {
        return Err(DictError::EmptyUserCode);
    }
    if !pattern.is_match(code) {
        return Err(DictError::InvalidUserCode {
            code: code.to_string(),
        });
    }

    Ok(code.to_lowercase())
}
