//! Registry field positions and the per-field comparison policy.

use std::sync::OnceLock;

use regex::Regex;

/// Recognized positions in a registry address. Positions between them
/// (country, region code, district, ...) exist in the raw data but are
/// never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPosition {
    /// Postal index.
    Index,
    Region,
    City,
    Street,
    Building,
    /// Building suffix (corpus, structure) companion of `Building`.
    BuildingSuffix,
}

/// Comparison order: descending raw position, highest first.
pub const PRIORITY_ORDER: [FieldPosition; 6] = [
    FieldPosition::BuildingSuffix,
    FieldPosition::Building,
    FieldPosition::Street,
    FieldPosition::City,
    FieldPosition::Region,
    FieldPosition::Index,
];

/// Name → raw segment index.
const RAW_POSITIONS: [(FieldPosition, usize); 6] = [
    (FieldPosition::Index, 0),
    (FieldPosition::Region, 3),
    (FieldPosition::City, 6),
    (FieldPosition::Street, 8),
    (FieldPosition::Building, 10),
    (FieldPosition::BuildingSuffix, 11),
];

impl FieldPosition {
    pub fn raw_index(self) -> usize {
        RAW_POSITIONS
            .iter()
            .find(|(pos, _)| *pos == self)
            .map(|(_, idx)| *idx)
            .unwrap_or_default()
    }

    /// Minimum segment count for a registry record to index every position.
    pub fn required_len() -> usize {
        RAW_POSITIONS.iter().map(|(_, idx)| idx + 1).max().unwrap_or(0)
    }
}

impl std::fmt::Display for FieldPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index => write!(f, "index"),
            Self::Region => write!(f, "region"),
            Self::City => write!(f, "city"),
            Self::Street => write!(f, "street"),
            Self::Building => write!(f, "building"),
            Self::BuildingSuffix => write!(f, "building_suffix"),
        }
    }
}

/// How a confirmed mismatch is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchKind {
    Index,
    Address,
}

/// Region is never compared.
///
/// The registry export's original rule read "skip region unless city is
/// empty", but it tested city-emptiness and region-ness on the same
/// position, so the exception could never fire. Only the effective
/// behavior is kept here; the city-aware variant is not restored.
pub fn must_check(position: FieldPosition) -> bool {
    position != FieldPosition::Region
}

/// Only the primary building number gets the designator equivalence check.
pub fn is_building_field(position: FieldPosition) -> bool {
    position == FieldPosition::Building
}

static INDEX_SHAPE: OnceLock<Regex> = OnceLock::new();

/// Classify a mismatch: a six-digit run at the start (followed by a word
/// boundary) is a postal-index error, anything else an address error.
pub fn classify(mismatch: &str) -> MismatchKind {
    let index_shape =
        INDEX_SHAPE.get_or_init(|| Regex::new(r"^\d{6}\b").expect("static regex"));
    if index_shape.is_match(mismatch) {
        MismatchKind::Index
    } else {
        MismatchKind::Address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_is_descending_raw_index() {
        let raw: Vec<usize> = PRIORITY_ORDER.iter().map(|p| p.raw_index()).collect();
        assert_eq!(raw, vec![11, 10, 8, 6, 3, 0]);
    }

    #[test]
    fn required_len_covers_highest_position() {
        assert_eq!(FieldPosition::required_len(), 12);
    }

    #[test]
    fn region_is_the_only_skipped_position() {
        for pos in PRIORITY_ORDER {
            assert_eq!(must_check(pos), pos != FieldPosition::Region, "{pos}");
        }
    }

    #[test]
    fn building_field_excludes_suffix() {
        assert!(is_building_field(FieldPosition::Building));
        assert!(!is_building_field(FieldPosition::BuildingSuffix));
        assert!(!is_building_field(FieldPosition::Street));
    }

    #[test]
    fn classify_index_and_address() {
        assert_eq!(classify("123456"), MismatchKind::Index);
        assert_eq!(classify("123456 москва"), MismatchKind::Index);
        assert_eq!(classify("ленина"), MismatchKind::Address);
        assert_eq!(classify("пр-кт мира"), MismatchKind::Address);
    }

    #[test]
    fn classify_requires_exact_six_digit_run() {
        assert_eq!(classify("12345"), MismatchKind::Address);
        assert_eq!(classify("1234567890"), MismatchKind::Address);
        assert_eq!(classify("123456а"), MismatchKind::Address);
        assert_eq!(classify(" 123456"), MismatchKind::Address);
    }
}
