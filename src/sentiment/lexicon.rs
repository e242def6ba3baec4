//! Static word lists: positive/negative lexicon, intensifiers, negators and the
//! literal tokens used by the short-comment shortcut.
//!
//! Built once per process and shared read-only by every analyzer instance.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "brilliant", "excellent", "fantastic", "great", "incredible",
    "love", "perfect", "wonderful", "outstanding", "superb", "magnificent", "marvelous",
    "good", "nice", "beautiful", "cool", "fun", "happy", "joy", "best", "favorite",
    "impressive", "stunning", "remarkable", "extraordinary", "phenomenal", "terrific",
    "delightful", "charming", "lovely", "gorgeous", "splendid", "divine", "fabulous",
    "glorious", "heavenly", "ideal", "precious", "spectacular", "sublime", "supreme",
    "ultimate", "adorable", "appreciate", "approved", "attractive", "benefit", "bliss",
    "bless", "brave", "calm", "celebrate", "champion", "cheer", "clever", "comfort",
    "complete", "confident", "creative", "cute", "dazzle", "delight", "dream", "easy",
    "elegant", "enjoy", "enthusiasm", "epic", "exciting", "faith", "fancy", "flawless",
    "flourish", "fresh", "genius", "glad", "grace", "grateful", "harmony", "heal",
    "hilarious", "honest", "hope", "hug", "inspire", "kind", "laugh", "luxury", "magical",
    "miracle", "optimistic", "paradise", "peace", "pleasure", "proud", "radiant",
    "refresh", "relax", "relief", "respect", "reward", "rich", "safe", "satisfy", "secure",
    "shine", "smile", "smooth", "special", "success", "sunny", "sweet", "thanks", "thrill",
    "treasure", "triumph", "trust", "value", "victory", "warm", "welcome", "wise", "wow",
    "yes", "yay", "yeah", "like", "liked", "likes",
];

const NEGATIVE_WORDS: &[&str] = &[
    "awful", "bad", "terrible", "horrible", "hate", "disgusting", "worst", "stupid",
    "annoying", "boring", "disappointing", "fail", "failure", "garbage", "lame",
    "pathetic", "ridiculous", "suck", "trash", "ugly", "useless", "waste", "weak",
    "wrong", "broken", "confusing", "crazy", "creepy", "cruel", "dangerous", "dead",
    "difficult", "dirty", "disaster", "disease", "disturbing", "dumb", "evil", "fake",
    "false", "fear", "fight", "gross", "guilty", "harm", "hurt", "ignore", "impossible",
    "kill", "lie", "lost", "mad", "mess", "mistake", "nasty", "never", "no", "noise",
    "pain", "panic", "poison", "problem", "reject", "revenge", "rude", "sad", "scary",
    "serious", "shame", "sick", "slow", "sorry", "stress", "struggle", "suffer", "threat",
    "tired", "trouble", "unfair", "upset", "violence", "war", "worry", "worse", "enemy",
    "angry", "bitter", "dark", "death", "destroy", "devil", "doom", "doubt", "dump",
    "emergency", "explode", "fatal", "final", "fire", "force", "funeral", "ghost", "greed",
    "hard", "harsh", "hell", "helpless", "hopeless", "hostile", "ill", "insane", "jealous",
    "junk", "lazy", "lonely", "loud", "negative", "nobody", "nothing", "old", "poor",
    "pressure", "punk", "quit", "rough", "severe", "shadow", "shock", "shut", "silent",
    "slave", "sore", "strange", "sudden", "suspicious", "thick", "unhappy", "unknown",
    "victim", "virus", "warning", "weird", "wild", "wound", "dislike", "disliked",
];

const INTENSIFIERS: &[&str] = &[
    "very", "really", "extremely", "incredibly", "absolutely", "totally", "completely",
    "quite", "rather", "fairly", "pretty", "somewhat", "highly", "deeply", "truly",
    "genuinely", "particularly", "especially", "remarkably", "exceptionally",
    "extraordinarily", "tremendously", "immensely",
];

// Tokenizace rozbije "don't" na "don" + "t", takže stažené tvary bez apostrofu.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none",
    "without", "lack", "lacking", "absent", "hardly", "scarcely", "barely", "seldom",
    "rarely", "little", "few", "minus", "cannot", "cant", "wont", "wouldnt", "shouldnt",
    "couldnt", "doesnt", "dont", "isnt", "arent", "wasnt", "werent", "hasnt", "havent",
    "hadnt", "aint",
];

/// Literal fragments checked by substring containment on comments under 3 tokens.
pub const SHORT_POSITIVE: &[&str] = &[
    "good", "great", "nice", "cool", "wow", "amazing", "awesome", "perfect", "love", "yes",
    "yay", "👍", "❤️", "😍", "🔥",
];

pub const SHORT_NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "hate", "no", "wrong", "fail", "stupid", "👎", "😡", "💩",
];

static POSITIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| POSITIVE_WORDS.iter().copied().collect());
static NEGATIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| NEGATIVE_WORDS.iter().copied().collect());
static INTENSIFIER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| INTENSIFIERS.iter().copied().collect());
static NEGATOR_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| NEGATORS.iter().copied().collect());

#[inline]
pub fn is_positive(tok: &str) -> bool {
    POSITIVE.contains(tok)
}

#[inline]
pub fn is_negative(tok: &str) -> bool {
    NEGATIVE.contains(tok)
}

#[inline]
pub fn is_intensifier(tok: &str) -> bool {
    INTENSIFIER_SET.contains(tok)
}

#[inline]
pub fn is_negator(tok: &str) -> bool {
    NEGATOR_SET.contains(tok)
}

/// Lexicon polarity of a single lowercase token: +1, -1 or 0.
/// Positive wins if a token ever lands in both lists.
pub fn word_polarity(tok: &str) -> i32 {
    if is_positive(tok) {
        1
    } else if is_negative(tok) {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_lookups() {
        assert_eq!(word_polarity("amazing"), 1);
        assert_eq!(word_polarity("garbage"), -1);
        assert_eq!(word_polarity("video"), 0);
    }

    #[test]
    fn lists_do_not_overlap() {
        for w in POSITIVE_WORDS {
            assert!(!is_negative(w), "'{w}' is in both lexicons");
        }
    }

    #[test]
    fn contractions_are_negators_without_apostrophe() {
        assert!(is_negator("dont"));
        assert!(is_negator("not"));
        assert!(!is_negator("don"));
        assert!(is_intensifier("absolutely"));
    }
}
