/// Strip export noise from a raw CSV field.
///
/// Single quotes, then double quotes, then whitespace are trimmed from both
/// ends, in that order and one pass each. A quote sitting inside outer
/// whitespace survives: `" 'x' "` cleans to `'x'`.
pub fn clean_value(raw: &str) -> &str {
    raw.trim_matches('\'').trim_matches('"').trim()
}

pub fn clean_owned(raw: &str) -> String {
    clean_value(raw).to_string()
}
