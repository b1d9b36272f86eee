//! Administrative stop-words stripped from registry address segments.
//!
//! Matching is exact and case-sensitive: `"ул"` and `"ул."` are distinct
//! entries, `"Ул"` matches neither. Inputs are lowercased by the loaders.

/// Fixed stop-word list. Order is irrelevant; lookup is by exact token.
///
/// `"п н.п."` contains a space and can never equal a whitespace-split token.
/// It is kept so the list stays a faithful copy of the registry's term set.
pub const STOP_WORDS: &[&str] = &[
    "ал.",
    "б.",
    "б-р",
    "влд",
    "влд.",
    "влад.",
    "г",
    "г.",
    "г-к",
    "г.о.",
    "г-ж",
    "город",
    "гп",
    "д",
    "д.",
    "двлд.",
    "дп",
    "зд",
    "зд.",
    "им",
    "им.",
    "имени",
    "к.",
    "кв-л",
    "км",
    "комната",
    "кп",
    "литер",
    "литера",
    "мкр",
    "н.п.",
    "наб",
    "п",
    "п.",
    "п н.п.",
    "пгт",
    "помещ.",
    "помещение",
    "проезд",
    "пр-кт",
    "рп",
    "пер",
    "пл",
    "пр-д",
    "с",
    "сети",
    "сл",
    "см",
    "соор.",
    "стр",
    "стр.",
    "ст-ца",
    "тракт",
    "ул",
    "ул.",
    "улично-дорожн.сети",
    "ш",
    "ш.",
    "шоссе",
    "элем.",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Drop stop-word tokens from a registry segment and rejoin the rest with
/// single spaces.
pub fn remove_stop_words(segment: &str) -> String {
    segment
        .split_whitespace()
        .filter(|word| !is_stop_word(word))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}
