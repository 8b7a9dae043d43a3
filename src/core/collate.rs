//! Portuguese collation for city names
//!
//! Accented letters sort with their base letter ("Á" next to "A", "Ç" next
//! to "C"). Comparison is multi-level: base letters first, then accents
//! (unaccented before accented), then case (lowercase before uppercase).

use std::cmp::Ordering;

/// Map a lowercase character to its unaccented base letter
fn base_letter(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Strip Portuguese diacritics from an already-lowercased string
pub fn fold_accents(s: &str) -> String {
    s.chars().map(base_letter).collect()
}

/// Primary weight: whitespace < punctuation < digits < letters
fn primary_weight(c: char) -> (u8, char) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let base = base_letter(lower);
    let class = if base.is_whitespace() {
        0
    } else if base.is_alphabetic() {
        3
    } else if base.is_numeric() {
        2
    } else {
        1
    };
    (class, base)
}

fn secondary_weight(c: char) -> u8 {
    let lower = c.to_lowercase().next().unwrap_or(c);
    u8::from(base_letter(lower) != lower)
}

fn tertiary_weight(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

/// Compare two strings with Portuguese collation rules
pub fn compare(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(primary_weight).cmp(b.chars().map(primary_weight));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a
        .chars()
        .map(secondary_weight)
        .cmp(b.chars().map(secondary_weight));
    if secondary != Ordering::Equal {
        return secondary;
    }

    let tertiary = a
        .chars()
        .map(tertiary_weight)
        .cmp(b.chars().map(tertiary_weight));
    if tertiary != Ordering::Equal {
        return tertiary;
    }

    a.cmp(b)
}
