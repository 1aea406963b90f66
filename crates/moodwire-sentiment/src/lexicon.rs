//! Valence lexicon and the rule tables the scorer applies around it.
//!
//! The word list is a data asset in the VADER lexicon format: one entry per
//! line, `token<TAB>mean valence`, optionally followed by more tab-separated
//! columns (standard deviation, raw ratings) which are ignored. Lines starting
//! with `#` are comments.

use std::collections::HashMap;
use std::path::Path;

use crate::error::SentimentError;

const BUILTIN_LEXICON: &str = include_str!("../data/lexicon.tsv");

/// Booster increment for intensifiers such as "very".
pub(crate) const B_INCR: f64 = 0.293;
/// Booster decrement for dampeners such as "slightly".
pub(crate) const B_DECR: f64 = -0.293;
/// Emphasis added to an ALL-CAPS word when the rest of the text is not shouting.
pub(crate) const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
pub(crate) const N_SCALAR: f64 = -0.74;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

/// Whether a lowercase token negates the valence that follows it.
pub(crate) fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

/// Scalar shift for intensifiers and dampeners, keyed by lowercase token or n-gram.
pub(crate) fn booster_scalar(word: &str) -> Option<f64> {
    match word {
        "absolutely" | "amazingly" | "awfully" | "completely" | "considerable" | "considerably"
        | "decidedly" | "deeply" | "effing" | "enormous" | "enormously" | "entirely"
        | "especially" | "exceptional" | "exceptionally" | "extreme" | "extremely"
        | "fabulously" | "flipping" | "flippin" | "frackin" | "fracking" | "fricking"
        | "frickin" | "frigging" | "friggin" | "fully" | "fuckin" | "fucking" | "fuggin"
        | "fugging" | "greatly" | "hella" | "highly" | "hugely" | "incredible" | "incredibly"
        | "intensely" | "major" | "majorly" | "more" | "most" | "particularly" | "purely"
        | "quite" | "really" | "remarkably" | "so" | "substantially" | "thoroughly" | "total"
        | "totally" | "tremendous" | "tremendously" | "uber" | "unbelievably" | "unusually"
        | "utter" | "utterly" | "very" => Some(B_INCR),
        "almost" | "barely" | "hardly" | "just enough" | "kind of" | "kinda" | "kindof"
        | "kind-of" | "less" | "little" | "marginal" | "marginally" | "occasional"
        | "occasionally" | "partly" | "scarce" | "scarcely" | "slight" | "slightly"
        | "somewhat" | "sort of" | "sorta" | "sortof" | "sort-of" => Some(B_DECR),
        _ => None,
    }
}

/// Multi-word expressions whose valence overrides the word-level value.
pub(crate) fn special_case(phrase: &str) -> Option<f64> {
    match phrase {
        "the shit" | "the bomb" | "to die for" => Some(3.0),
        "bad ass" | "badass" => Some(1.5),
        "bus stop" => Some(0.0),
        "yeah right" => Some(-2.0),
        "kiss of death" => Some(-1.5),
        "beating heart" => Some(3.1),
        "broken heart" => Some(-2.9),
        _ => None,
    }
}

/// Mapping from lowercase token to mean valence on a `[-4, 4]` scale.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    /// The lexicon bundled with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_LEXICON)
    }

    /// Parse lexicon text. Malformed lines are skipped with a warning.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut valences = HashMap::new();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut columns = line.split('\t');
            let token = columns.next().unwrap_or_default().trim();
            let valence = columns
                .next()
                .and_then(|raw| raw.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite());
            match valence {
                Some(v) if !token.is_empty() => {
                    valences.insert(token.to_lowercase(), v);
                }
                _ => {
                    tracing::warn!(line = line_no + 1, "skipping malformed lexicon line");
                }
            }
        }
        Self { valences }
    }

    /// Load a lexicon file in VADER format.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Lexicon`] if the file cannot be read or
    /// contains no usable entries.
    pub fn from_path(path: &Path) -> Result<Self, SentimentError> {
        let content = std::fs::read_to_string(path).map_err(|e| SentimentError::Lexicon {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let lexicon = Self::parse(&content);
        if lexicon.is_empty() {
            return Err(SentimentError::Lexicon {
                path: path.display().to_string(),
                reason: "no valid entries".to_string(),
            });
        }
        tracing::debug!(path = %path.display(), entries = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    /// Valence of a lowercase token, if it is in the lexicon.
    #[must_use]
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}
