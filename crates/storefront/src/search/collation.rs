//! Vietnamese alphabetical ordering for product names.
//!
//! Names are decomposed (NFD) and compared level by level, the way a
//! Vietnamese dictionary orders words:
//!
//! 1. Base letters. `ă â đ ê ô ơ ư` are letters in their own right and sort
//!    directly after `a`/`d`/`e`/`o`/`u` (`a < ă < â < b`, `d < đ < e`).
//! 2. Tone marks, in the order unmarked, huyền, hỏi, ngã, sắc, nặng.
//! 3. Case, lowercase first.
//! 4. The raw text, so distinct names never compare equal.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const BREVE: char = '\u{306}';
const CIRCUMFLEX: char = '\u{302}';
const HORN: char = '\u{31B}';

/// Precomputed sort key for one name.
///
/// Build it once per name and compare keys, e.g. with
/// `sort_by_cached_key`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    letters: Vec<(char, u8)>,
    tones: Vec<u8>,
    uppercase: Vec<bool>,
    raw: String,
}

impl CollationKey {
    #[must_use]
    pub fn new(name: &str) -> Self {
        let mut letters: Vec<(char, u8)> = Vec::with_capacity(name.len());
        let mut tones: Vec<u8> = Vec::with_capacity(name.len());
        let mut uppercase = Vec::with_capacity(name.len());

        for ch in name.nfd() {
            if is_combining_mark(ch) {
                if let Some(letter) = letters.last_mut()
                    && let Some(rank) = letter_variant(letter.0, ch)
                {
                    letter.1 = rank;
                } else if let Some(tone) = tone_rank(ch)
                    && let Some(slot) = tones.last_mut()
                {
                    *slot = tone;
                }
                continue;
            }

            let lower = ch.to_lowercase().next().unwrap_or(ch);
            uppercase.push(lower != ch);
            letters.push(if lower == 'đ' { ('d', 1) } else { (lower, 0) });
            tones.push(0);
        }

        Self {
            letters,
            tones,
            uppercase,
            raw: name.to_owned(),
        }
    }
}

/// Rank of a base letter modified by `mark`, for the letters Vietnamese
/// treats as distinct.
const fn letter_variant(base: char, mark: char) -> Option<u8> {
    match (base, mark) {
        ('a', BREVE) | ('e' | 'o', CIRCUMFLEX) | ('u', HORN) => Some(1),
        ('a', CIRCUMFLEX) | ('o', HORN) => Some(2),
        _ => None,
    }
}

const fn tone_rank(mark: char) -> Option<u8> {
    match mark {
        '\u{300}' => Some(1), // huyền
        '\u{309}' => Some(2), // hỏi
        '\u{303}' => Some(3), // ngã
        '\u{301}' => Some(4), // sắc
        '\u{323}' => Some(5), // nặng
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|&n| n.to_owned()).collect();
        names.sort_by_cached_key(|n| CollationKey::new(n));
        names
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        assert_eq!(
            sorted(&["Zebra", "Đèn bàn", "Ánh sáng", "Bút chì", "Éclair"]),
            vec!["Ánh sáng", "Bút chì", "Đèn bàn", "Éclair", "Zebra"]
        );
    }

    #[test]
    fn test_vietnamese_letters_follow_their_base() {
        assert_eq!(
            sorted(&["bơ", "bô", "bo", "bư", "bu", "bă", "bâ", "ba"]),
            vec!["ba", "bă", "bâ", "bo", "bô", "bơ", "bu", "bư"]
        );
        assert_eq!(sorted(&["đa", "e", "da", "dz"]), vec!["da", "dz", "đa", "e"]);
    }

    #[test]
    fn test_tones_break_ties_after_letters() {
        assert_eq!(
            sorted(&["mạ", "má", "mã", "mả", "mà", "ma"]),
            vec!["ma", "mà", "mả", "mã", "má", "mạ"]
        );
        // The letter difference in the second syllable outweighs the tone.
        assert_eq!(sorted(&["mà b", "ma c"]), vec!["mà b", "ma c"]);
    }

    #[test]
    fn test_precomposed_and_decomposed_input_agree() {
        let composed = CollationKey::new("Ấm trà");
        let decomposed = CollationKey::new("A\u{302}\u{301}m tra\u{300}");
        assert_eq!(composed.letters, decomposed.letters);
        assert_eq!(composed.tones, decomposed.tones);
    }

    #[test]
    fn test_case_is_a_late_tiebreak() {
        assert_eq!(sorted(&["Banana", "apple", "banana"]), vec!["apple", "banana", "Banana"]);
    }
}
