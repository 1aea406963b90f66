//! Rule-based polarity scoring in the style of VADER.
//!
//! Each token gets a valence from the [`Lexicon`], adjusted by the words
//! around it: `no`, ALL-CAPS emphasis, boosters and negations in a three-word
//! window, special idioms, `least`, and a `but` clause. The summed valence is
//! squashed into the compound score; the per-token valences are bucketed into
//! positive/negative/neutral proportions.

use crate::lexicon::{
    booster_scalar, is_negation, special_case, Lexicon, C_INCR, N_SCALAR,
};
use crate::types::PolarityScore;

/// Normalization constant for the compound score; approximates the max expected value.
const ALPHA: f64 = 15.0;

/// Per-`!` emphasis, counted up to [`MAX_EXCLAMATIONS`].
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Per-`?` emphasis when there are two or three question marks.
const QUESTION_INCR: f64 = 0.18;
/// Flat emphasis for more than three question marks.
const QUESTION_MAX: f64 = 0.96;

/// Weight of the clause before the first `but`.
const BUT_BEFORE: f64 = 0.5;
/// Weight of the clause after the first `but`.
const BUT_AFTER: f64 = 1.5;

/// A sentiment model that maps text to a [`PolarityScore`].
///
/// Implementations must be total: every input, including empty text, yields
/// a score.
pub trait PolarityScorer: Send + Sync {
    /// Short identifier of the model, used in logs and stored records.
    fn name(&self) -> &'static str;

    /// Score `text`. Never fails; text with no valence scores [`PolarityScore::NEUTRAL`].
    fn score(&self, text: &str) -> PolarityScore;
}

/// Lexicon and rule based scorer.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

/// Tokenized text plus the lowercase forms the rules match against.
struct Tokens<'a> {
    words: Vec<&'a str>,
    lower: Vec<String>,
    cap_differential: bool,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let words: Vec<&str> = text.split_whitespace().map(strip_punctuation).collect();
        let lower = words.iter().map(|w| w.to_lowercase()).collect();
        let caps = words.iter().filter(|w| is_all_caps(w)).count();
        Self {
            cap_differential: caps > 0 && caps < words.len(),
            words,
            lower,
        }
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn lower(&self, i: usize) -> &str {
        &self.lower[i]
    }
}

impl LexiconScorer {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn valences(&self, tokens: &Tokens<'_>) -> Vec<f64> {
        let mut valences = Vec::with_capacity(tokens.len());
        for i in 0..tokens.len() {
            let word = tokens.lower(i);
            let kind_of = word == "kind" && i + 1 < tokens.len() && tokens.lower(i + 1) == "of";
            if booster_scalar(word).is_some() || kind_of {
                valences.push(0.0);
                continue;
            }
            valences.push(self.valence_at(tokens, i));
        }
        apply_but_clause(tokens, &mut valences);
        valences
    }

    fn valence_at(&self, tokens: &Tokens<'_>, i: usize) -> f64 {
        let Some(base) = self.lexicon.get(tokens.lower(i)) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before another sentiment word is a negator, not a word of its own
        if tokens.lower(i) == "no"
            && i + 1 < tokens.len()
            && self.lexicon.contains(tokens.lower(i + 1))
        {
            valence = 0.0;
        }
        if (i > 0 && tokens.lower(i - 1) == "no")
            || (i > 1 && tokens.lower(i - 2) == "no")
            || (i > 2 && tokens.lower(i - 3) == "no" && matches!(tokens.lower(i - 1), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if is_all_caps(tokens.words[i]) && tokens.cap_differential {
            if valence > 0.0 {
                valence += C_INCR;
            } else {
                valence -= C_INCR;
            }
        }

        for distance in 1..=3 {
            if i < distance || self.lexicon.contains(tokens.lower(i - distance)) {
                continue;
            }
            let mut shift = booster_shift(tokens, i - distance, valence);
            if distance == 2 {
                shift *= 0.95;
            } else if distance == 3 {
                shift *= 0.9;
            }
            valence += shift;
            valence = negation_check(tokens, i, distance, valence);
            if distance == 3 {
                valence = idiom_check(tokens, i, valence);
            }
        }

        self.least_check(tokens, i, valence)
    }

    fn least_check(&self, tokens: &Tokens<'_>, i: usize, valence: f64) -> f64 {
        if i == 0 {
            return valence;
        }
        let previous = tokens.lower(i - 1);
        if previous != "least" || self.lexicon.contains(previous) {
            return valence;
        }
        if i > 1 && matches!(tokens.lower(i - 2), "at" | "very") {
            valence
        } else {
            valence * N_SCALAR
        }
    }
}

impl PolarityScorer for LexiconScorer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn score(&self, text: &str) -> PolarityScore {
        let tokens = Tokens::new(text);
        if tokens.is_empty() {
            return PolarityScore::NEUTRAL;
        }
        let valences = self.valences(&tokens);
        compose(&valences, text)
    }
}

/// Strip surrounding ASCII punctuation unless that would leave two chars or fewer,
/// which keeps emoticons such as `:)` intact.
fn strip_punctuation(token: &str) -> &str {
    let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
    if stripped.chars().count() <= 2 {
        token
    } else {
        stripped
    }
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn booster_shift(tokens: &Tokens<'_>, at: usize, valence: f64) -> f64 {
    let Some(mut scalar) = booster_scalar(tokens.lower(at)) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if is_all_caps(tokens.words[at]) && tokens.cap_differential {
        if valence > 0.0 {
            scalar += C_INCR;
        } else {
            scalar -= C_INCR;
        }
    }
    scalar
}

fn negation_check(tokens: &Tokens<'_>, i: usize, distance: usize, valence: f64) -> f64 {
    let back = |d: usize| tokens.lower(i - d);
    match distance {
        1 => {
            if is_negation(back(1)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        2 => {
            if back(2) == "never" && matches!(back(1), "so" | "this") {
                valence * 1.25
            } else if back(2) == "without" && back(1) == "doubt" {
                valence
            } else if is_negation(back(2)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        _ => {
            if (back(3) == "never" && matches!(back(2), "so" | "this"))
                || matches!(back(1), "so" | "this")
            {
                valence * 1.25
            } else if back(3) == "without" && (back(2) == "doubt" || back(1) == "doubt") {
                valence
            } else if is_negation(back(3)) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
    }
}

/// Only called with `i >= 3`.
fn idiom_check(tokens: &Tokens<'_>, i: usize, valence: f64) -> f64 {
    let w = |at: usize| tokens.lower(at);
    let one_zero = format!("{} {}", w(i - 1), w(i));
    let two_one_zero = format!("{} {} {}", w(i - 2), w(i - 1), w(i));
    let two_one = format!("{} {}", w(i - 2), w(i - 1));
    let three_two_one = format!("{} {} {}", w(i - 3), w(i - 2), w(i - 1));
    let three_two = format!("{} {}", w(i - 3), w(i - 2));

    let mut valence = [&one_zero, &two_one_zero, &two_one, &three_two_one, &three_two]
        .iter()
        .find_map(|seq| special_case(seq))
        .unwrap_or(valence);

    if i + 1 < tokens.len() {
        if let Some(v) = special_case(&format!("{} {}", w(i), w(i + 1))) {
            valence = v;
        }
    }
    if i + 2 < tokens.len() {
        if let Some(v) = special_case(&format!("{} {} {}", w(i), w(i + 1), w(i + 2))) {
            valence = v;
        }
    }

    for n_gram in [&three_two_one, &three_two, &two_one] {
        if let Some(scalar) = booster_scalar(n_gram) {
            valence += scalar;
        }
    }
    valence
}

fn apply_but_clause(tokens: &Tokens<'_>, valences: &mut [f64]) {
    let Some(but_at) = tokens.lower.iter().position(|w| w == "but") else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < but_at {
            *valence *= BUT_BEFORE;
        } else if i > but_at {
            *valence *= BUT_AFTER;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    #[allow(clippy::cast_precision_loss)]
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCR,
        _ => QUESTION_MAX,
    };
    #[allow(clippy::cast_precision_loss)]
    let exclamation_emphasis = exclamations as f64 * EXCLAMATION_INCR;
    exclamation_emphasis + question_emphasis
}

/// Squash an unbounded valence sum into `[-1.0, 1.0]`.
#[must_use]
pub fn normalize_compound(sum: f64) -> f64 {
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn compose(valences: &[f64], text: &str) -> PolarityScore {
    let emphasis = punctuation_emphasis(text);

    let mut sum: f64 = valences.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize_compound(sum);

    // Sentiment words count one more than a neutral word in the proportions.
    let mut positive = 0.0_f64;
    let mut negative = 0.0_f64;
    let mut neutral = 0_usize;
    for &valence in valences {
        if valence > 0.0 {
            positive += valence + 1.0;
        } else if valence < 0.0 {
            negative += valence - 1.0;
        } else {
            neutral += 1;
        }
    }
    if positive > negative.abs() {
        positive += emphasis;
    } else if positive < negative.abs() {
        negative -= emphasis;
    }

    #[allow(clippy::cast_precision_loss)]
    let neutral = neutral as f64;
    let total = positive + negative.abs() + neutral;
    PolarityScore {
        negative: (negative / total).abs(),
        neutral: (neutral / total).abs(),
        positive: (positive / total).abs(),
        compound,
    }
}
