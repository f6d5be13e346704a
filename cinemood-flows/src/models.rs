use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlowError;

/// Closed vocabulary of emotions the analysis flow can produce.
///
/// `Neutral` doubles as the sentinel default: any failure to detect an
/// emotion resolves to it, so downstream code never sees an empty or
/// out-of-vocabulary value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmotionLabel {
    Happy,
    Sad,
    Angry,
    #[default]
    Neutral,
    Excited,
    Disgusted,
    Surprised,
    Fearful,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 8] = [
        EmotionLabel::Happy,
        EmotionLabel::Sad,
        EmotionLabel::Angry,
        EmotionLabel::Neutral,
        EmotionLabel::Excited,
        EmotionLabel::Disgusted,
        EmotionLabel::Surprised,
        EmotionLabel::Fearful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Happy => "Happy",
            EmotionLabel::Sad => "Sad",
            EmotionLabel::Angry => "Angry",
            EmotionLabel::Neutral => "Neutral",
            EmotionLabel::Excited => "Excited",
            EmotionLabel::Disgusted => "Disgusted",
            EmotionLabel::Surprised => "Surprised",
            EmotionLabel::Fearful => "Fearful",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = FlowError;

    /// Interprets free-form model output as a label: the first word,
    /// stripped of punctuation, matched case-insensitively against the
    /// vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let word = s
            .split_whitespace()
            .next()
            .map(|w| w.trim_matches(|c: char| !c.is_alphabetic()))
            .unwrap_or_default();

        EmotionLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(word))
            .ok_or_else(|| {
                FlowError::MalformedOutput(format!("not an emotion label: {:?}", s.trim()))
            })
    }
}

/// A recommended movie. Replaced wholesale on each request; there is no
/// identity beyond the title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Input to the recommendation flow, constructed fresh per user request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendMovieInput {
    pub emotion: EmotionLabel,
    pub language: String,
    pub genre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeEmotionOutput {
    pub emotion: EmotionLabel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendMovieOutput {
    pub movies: Vec<Movie>,
}

/// Languages offered by the recommendation selector.
pub const LANGUAGES: [&str; 18] = [
    "English",
    "Hindi",
    "Spanish",
    "French",
    "German",
    "Mandarin",
    "Japanese",
    "Russian",
    "Bengali",
    "Telugu",
    "Marathi",
    "Tamil",
    "Urdu",
    "Gujarati",
    "Kannada",
    "Odia",
    "Malayalam",
    "Punjabi",
];

/// Genres offered by the recommendation selector.
pub const GENRES: [&str; 16] = [
    "Action",
    "Comedy",
    "Drama",
    "Thriller",
    "Horror",
    "Sci-Fi",
    "Romance",
    "Animation",
    "Adventure",
    "Fantasy",
    "Mystery",
    "Crime",
    "Documentary",
    "Historical",
    "Musical",
    "Western",
];
