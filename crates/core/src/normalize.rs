/// Letters the reader commonly emits in place of digits.
const CONFUSABLES: [(char, char); 10] = [
    ('s', '5'),
    ('S', '5'),
    ('g', '9'),
    ('H', '4'),
    ('i', '1'),
    ('I', '1'),
    ('l', '1'),
    ('j', '1'),
    ('z', '2'),
    ('Z', '2'),
];

fn substitute(c: char) -> char {
    CONFUSABLES
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |(_, to)| *to)
}

/// Replace OCR-confusable letters with the digits they stand for.
pub fn substitute_confusables(text: &str) -> String {
    text.chars().map(substitute).collect()
}

/// Turn raw score text into a score. Anything that does not parse to a
/// finite, non-negative number is worth 0.
pub fn normalize_points(text: &str) -> f64 {
    let cleaned = substitute_confusables(text);
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}
