//! Canonical matching keys for station names and queries.

/// Substitutions applied after lowercasing, in order.
const SUBSTITUTIONS: [(char, &str); 3] = [('ß', "ss"), ('ö', "oe"), ('ü', "ue")];

/// Normalize text into its matching key.
///
/// Lowercases the input, then spells out `ß`, `ö` and `ü`. Whitespace and
/// every other character pass through untouched, so tokenizing before or
/// after normalizing gives the same tokens.
///
/// # Examples
///
/// ```
/// use station_autocomplete::autocomplete::normalize;
///
/// assert_eq!(normalize("München"), "muenchen");
/// assert_eq!(normalize("Straße"), "strasse");
/// assert_eq!(normalize("Köln Hbf"), "koeln hbf");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len() + 4);

    for ch in lowered.chars() {
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }

    out
}
