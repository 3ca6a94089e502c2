/*!
 * Language affinity of named items.
 *
 * Subtitle releases mark their language in the file name (`.chs`, `.tc`,
 * `[简体]`, ...) or, for tracks extracted from a container, in the
 * stream's `language`/`title` tags. The ranker only ever looks for
 * substrings; it is a tie-breaker and never rejects an item on its own.
 */

use crate::media::NamedItem;

/// Markers for Chinese in any script
pub const CHINESE_TAGS: &[&str] = &[
    "ch", "chi", "chn", "chs", "cn", "zh", "zhs", "sc", "chinese", "zh-cn", "zh-hans", "hans",
    "中文", "汉语", "中", "文", "汉",
];

/// Markers for simplified Chinese
pub const SIMPLIFIED_TAGS: &[&str] = &[
    "simplified", "zh-cn", "zh-hans", "sc", "chs", "zhs", "hans", "简体", "简", "gb",
];

/// Markers for traditional Chinese
pub const TRADITIONAL_TAGS: &[&str] = &[
    "traditional", "tc", "tw", "hk", "hant", "繁", "體", "漢", "big5",
];

const SIMPLIFIED_BIT: u8 = 1 << 0;
const CHINESE_BIT: u8 = 1 << 1;
const NOT_TRADITIONAL_BIT: u8 = 1 << 2;

fn contains_any(haystack: &str, tags: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    tags.iter().any(|tag| haystack.contains(tag))
}

/// Check whether an item carries any of `tags`.
///
/// The lowercased basename is searched first; the `language` and `title`
/// metadata values are only consulted when the item has metadata.
pub fn has_tag<T: NamedItem + ?Sized>(item: &T, tags: &[&str]) -> bool {
    if contains_any(item.basename(), tags) {
        return true;
    }

    match item.language_metadata() {
        Some(metadata) => [metadata.language(), metadata.title()]
            .into_iter()
            .flatten()
            .any(|value| contains_any(value, tags)),
        None => false,
    }
}

/// Three-bit language affinity of an item.
///
/// Bit 0 is set for simplified markers, bit 1 for Chinese markers and bit 2
/// when no traditional marker is present.
pub fn language_score<T: NamedItem + ?Sized>(item: &T) -> u8 {
    let mut score = 0;
    if has_tag(item, SIMPLIFIED_TAGS) {
        score |= SIMPLIFIED_BIT;
    }
    if has_tag(item, CHINESE_TAGS) {
        score |= CHINESE_BIT;
    }
    if !has_tag(item, TRADITIONAL_TAGS) {
        score |= NOT_TRADITIONAL_BIT;
    }
    score
}
