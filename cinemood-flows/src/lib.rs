pub mod capture;
pub mod config;
pub mod error;
pub mod flows;
pub mod llm;
pub mod models;
pub mod posters;

// Re-export commonly used types
pub use capture::FramePayload;
pub use config::Config;
pub use error::{CaptureError, FlowError, Result};
pub use flows::{analyze_emotion, recommend_movie};
pub use llm::{Inference, OpenRouterInference};
pub use models::{
    AnalyzeEmotionOutput, EmotionLabel, Movie, RecommendMovieInput, RecommendMovieOutput, GENRES,
    LANGUAGES,
};
pub use posters::{PosterProvider, TmdbPosterClient, PLACEHOLDER_POSTER_URL};
