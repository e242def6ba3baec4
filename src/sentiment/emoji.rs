//! Emoji sentiment table and the Unicode-range scanner that feeds it.
//!
//! The scanner works on scalar values, not on a particular string iteration
//! model: one emoji scalar from the supported blocks, optionally followed by
//! VARIATION SELECTOR-16 (U+FE0F). Matches missing from the table are ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Emoji score is weighted above plain lexicon words.
pub const EMOJI_WEIGHT: f64 = 1.2;

// Emoticons, misc symbols & pictographs, transport, regional indicators,
// misc symbols, dingbats. Supplemental symbols (U+1F900..) stay unscanned
// even though some of them sit in the table.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]\x{FE0F}?",
    )
    .expect("emoji regex")
});

#[rustfmt::skip]
const EMOJI_SCORES: &[(&str, i8)] = &[
    ("😀", 2), ("😃", 2), ("😄", 2), ("😁", 2), ("😆", 2), ("😅", 1),
    ("😂", 2), ("🤣", 2), ("😊", 2), ("😇", 2), ("🙂", 1), ("🙃", 1),
    ("😉", 1), ("😌", 1), ("😍", 2), ("🥰", 2), ("😘", 2), ("😗", 1),
    ("😙", 1), ("😚", 1), ("😋", 1), ("😛", 1), ("😝", 1), ("😜", 1),
    ("🤪", 1), ("🤨", 0), ("🧐", 0), ("🤓", 1), ("😎", 1), ("🤩", 2),
    ("🥳", 2), ("😏", 0), ("😒", -1), ("😞", -2), ("😔", -2), ("😟", -2),
    ("😕", -1), ("🙁", -1), ("☹️", -2), ("😣", -2), ("😖", -2), ("😫", -2),
    ("😩", -2), ("🥺", -1), ("😢", -2), ("😭", -2), ("😤", -1), ("😠", -2),
    ("😡", -2), ("🤬", -2), ("🤯", -1), ("😳", 0), ("🥵", -1), ("🥶", -1),
    ("😱", -2), ("😨", -2), ("😰", -2), ("😥", -2), ("😓", -1), ("🤗", 1),
    ("🤔", 0), ("🤭", 1), ("🤫", 0), ("🤥", -1), ("😶", 0), ("😐", 0),
    ("😑", -1), ("😬", -1), ("🙄", -1), ("😯", 0), ("😦", -1), ("😧", -2),
    ("😮", 0), ("😲", 0), ("🥱", -1), ("😴", 0), ("🤤", 0), ("😪", -1),
    ("😵", -2), ("🤐", 0), ("🥴", -1), ("🤢", -2), ("🤮", -2), ("🤧", -1),
    ("😷", -1), ("🤒", -2), ("🤕", -2), ("🤑", 0), ("🤠", 1), ("😈", -1),
    ("👿", -2), ("👹", -2), ("👺", -2), ("🤡", 0), ("💩", -2), ("👻", 0),
    ("💀", -2), ("☠️", -2), ("👽", 0), ("👾", 0), ("🤖", 0), ("🎃", 0),
    ("😺", 2), ("😸", 2), ("😹", 2), ("😻", 2), ("😼", 1), ("😽", 1),
    ("🙀", -2), ("😿", -2), ("😾", -2), ("❤️", 2), ("🧡", 2), ("💛", 2),
    ("💚", 2), ("💙", 2), ("💜", 2), ("🖤", 0), ("🤍", 2), ("🤎", 0),
    ("💔", -2), ("❣️", 2), ("💕", 2), ("💞", 2), ("💓", 2), ("💗", 2),
    ("💖", 2), ("💘", 2), ("💝", 2), ("💟", 2), ("♥️", 2), ("💯", 2),
    ("💢", -2), ("💥", 0), ("💫", 1), ("💦", 0), ("💨", 0), ("🕳️", -1),
    ("💣", -2), ("💬", 0), ("🗨️", 0), ("🗯️", -1), ("💭", 0),
    ("💤", 0), ("👋", 1), ("🤚", 1), ("🖐️", 1), ("✋", 1), ("🖖", 1),
    ("👌", 2), ("🤌", 0), ("🤏", 0), ("✌️", 1), ("🤞", 1), ("🤟", 1),
    ("🤘", 1), ("🤙", 1), ("👈", 0), ("👉", 0), ("👆", 0), ("🖕", -2),
    ("👇", 0), ("☝️", 0), ("👍", 2), ("👎", -2), ("👊", -1), ("✊", 0),
    ("🤛", -1), ("🤜", -1), ("👏", 2), ("🙌", 2), ("👐", 1), ("🤲", 1),
    ("🤝", 2), ("🙏", 1), ("✍️", 0), ("💅", 0), ("🤳", 0), ("💪", 1),
    ("🦾", 1), ("🦿", 0), ("🦵", 0), ("🦶", 0), ("👂", 0), ("🦻", 0),
    ("👃", 0), ("🧠", 1), ("🫀", 1), ("🫁", 0), ("🦷", 0), ("🦴", 0),
    ("👀", 0), ("👁️", 0), ("👅", 0), ("👄", 1), ("💋", 2), ("🩸", -1),
    ("🔥", 1), ("⭐", 2), ("🌟", 2), ("⚡", 1), ("☄️", 1), ("🔆", 1),
    ("☀️", 2), ("🌤️", 1), ("⛅", 0), ("🌦️", -1), ("🌧️", -1), ("⛈️", -2),
    ("🌩️", -1), ("🌨️", 0), ("❄️", 0), ("☃️", 1), ("⛄", 1), ("🌬️", 0),
    ("🌪️", -2), ("🌫️", -1), ("🌈", 2), ("☂️", 0), ("☔", -1), ("💧", 0),
    ("🌊", 0), ("🎉", 2), ("🎊", 2), ("🎈", 2), ("🎁", 2), ("🎀", 1),
    ("🎗️", 1), ("🎟️", 1), ("🎫", 1), ("🎖️", 2), ("🏆", 2), ("🏅", 2),
    ("🥇", 2), ("🥈", 1), ("🥉", 1), ("⚽", 1), ("⚾", 1), ("🥎", 1),
    ("🏀", 1), ("🏐", 1), ("🏈", 1), ("🏉", 1), ("🎾", 1), ("🥏", 1),
    ("🎳", 1), ("🏏", 1), ("🏑", 1), ("🏒", 1), ("🥍", 1), ("🏓", 1),
    ("🏸", 1), ("🥊", 0), ("🥋", 1), ("🎯", 1), ("⛳", 1), ("🪀", 1),
    ("🪁", 1), ("🎣", 1), ("🤿", 1), ("🎽", 1), ("🎿", 1), ("🛷", 1),
    ("🥌", 1), ("🎲", 1), ("🎰", 0), ("🎮", 1), ("🕹️", 1), ("🎧", 1),
    ("🎤", 1), ("🎸", 1), ("🥁", 1), ("🎹", 1), ("🎺", 1), ("🎷", 1),
    ("🎻", 1), ("🪕", 1), ("🥖", 1), ("🍞", 1), ("🥨", 1), ("🥯", 1),
    ("🥞", 1), ("🧇", 1), ("🧀", 1), ("🍖", 1), ("🍗", 1), ("🥩", 1),
    ("🥓", 1), ("🍔", 1), ("🍟", 1), ("🍕", 2), ("🌭", 1), ("🥪", 1),
    ("🌮", 1), ("🌯", 1), ("🥙", 1), ("🧆", 1), ("🥚", 1), ("🍳", 1),
    ("🥘", 1), ("🍲", 1), ("🥣", 1), ("🥗", 1), ("🍿", 1), ("🧈", 1),
    ("🧂", 0), ("🥫", 0), ("🍱", 1), ("🍘", 1), ("🍙", 1), ("🍚", 1),
    ("🍛", 1), ("🍜", 1), ("🍝", 1), ("🍠", 1), ("🍢", 1), ("🍣", 1),
    ("🍤", 1), ("🍥", 1), ("🥮", 1), ("🍡", 1), ("🥟", 1), ("🥠", 1),
    ("🥡", 1), ("🍦", 2), ("🍧", 2), ("🍨", 2), ("🍩", 2), ("🍪", 2),
    ("🎂", 2), ("🍰", 2), ("🧁", 2), ("🥧", 2), ("🍫", 2), ("🍬", 2),
    ("🍭", 2), ("🍮", 1), ("🍯", 1), ("🍼", 1), ("🥛", 1), ("☕", 1),
    ("🍵", 1), ("🍶", 1), ("🍾", 2), ("🍷", 1), ("🍸", 1), ("🍹", 1),
    ("🍺", 1), ("🍻", 2), ("🥂", 2), ("🥃", 1), ("🥤", 1), ("🧋", 1),
    ("🧃", 1), ("🧉", 1), ("🧊", 0),
];

static TABLE: Lazy<HashMap<&'static str, i8>> = Lazy::new(|| EMOJI_SCORES.iter().copied().collect());

/// Table value for one emoji, trying the exact match first and then the bare
/// scalar (so "❤️" and "❤" resolve alike, as do "😀" and "😀\u{FE0F}").
pub fn emoji_score(emoji: &str) -> Option<i8> {
    if let Some(&v) = TABLE.get(emoji) {
        return Some(v);
    }
    let bare = emoji.trim_end_matches('\u{FE0F}');
    if let Some(&v) = TABLE.get(bare) {
        return Some(v);
    }
    let mut qualified = String::with_capacity(bare.len() + 3);
    qualified.push_str(bare);
    qualified.push('\u{FE0F}');
    TABLE.get(qualified.as_str()).copied()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmojiHits {
    /// Unweighted sum of table values.
    pub score: i32,
    /// Number of scanned emojis that were present in the table.
    pub count: usize,
}

pub fn scan_emojis(text: &str) -> EmojiHits {
    let mut hits = EmojiHits::default();
    for m in EMOJI_RE.find_iter(text) {
        if let Some(v) = emoji_score(m.as_str()) {
            hits.score += i32::from(v);
            hits.count += 1;
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbs_and_hearts_are_positive() {
        let h = scan_emojis("👍👍👍");
        assert_eq!(h, EmojiHits { score: 6, count: 3 });
        assert_eq!(scan_emojis("I ❤️ this").score, 2);
        assert_eq!(scan_emojis("I ❤ this").score, 2);
    }

    #[test]
    fn negative_and_neutral_entries() {
        let h = scan_emojis("💩 😐");
        assert_eq!(h.count, 2);
        assert_eq!(h.score, -2);
    }

    #[test]
    fn unknown_emoji_in_range_is_ignored() {
        // U+1F6A7 CONSTRUCTION SIGN is in range but not in the table.
        let h = scan_emojis("\u{1F6A7}");
        assert_eq!(h, EmojiHits::default());
    }

    #[test]
    fn supplemental_block_is_not_scanned() {
        // 🤣 and 🥰 have table entries but live outside the scanned blocks.
        assert_eq!(scan_emojis("🤣🥰"), EmojiHits::default());
        assert_eq!(scan_emojis("🤣 👍").count, 1);
    }

    #[test]
    fn plain_text_has_no_emojis() {
        assert_eq!(scan_emojis("no emoji here :)"), EmojiHits::default());
    }
}
