use cinemood_flows::{EmotionLabel, Movie};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeEmotionRequest {
    /// Captured webcam frame as a `data:image/...;base64,...` URI.
    pub webcam_feed: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeEmotionResponse {
    pub emotion: EmotionLabel,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub emotion: String,
    pub language: String,
    pub genre: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub movies: Vec<Movie>,
}

/// Selector options for the recommendation UI.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub emotions: Vec<String>,
    pub languages: Vec<String>,
    pub genres: Vec<String>,
}
