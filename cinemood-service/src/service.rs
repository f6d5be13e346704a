use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use cinemood_flows::{
    analyze_emotion, recommend_movie, EmotionLabel, FramePayload, Inference, PosterProvider,
    RecommendMovieInput, GENRES, LANGUAGES,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::models::{
    AnalyzeEmotionRequest, AnalyzeEmotionResponse, OptionsResponse, RecommendRequest,
    RecommendResponse,
};

type ApiError = (StatusCode, Json<Value>);

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<dyn Inference>,
    pub posters: Arc<dyn PosterProvider>,
}

async fn health_check() -> &'static str {
    "OK"
}

async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        emotions: EmotionLabel::ALL.iter().map(|e| e.to_string()).collect(),
        languages: LANGUAGES.iter().map(|l| l.to_string()).collect(),
        genres: GENRES.iter().map(|g| g.to_string()).collect(),
    })
}

/// Runs the emotion analysis flow over one captured frame.
///
/// A missing or unusable frame is a 400 ("capture unavailable" surface);
/// no inference call is made for it. Once a frame is accepted the flow is
/// infallible and always yields a vocabulary label.
async fn detect_emotion(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeEmotionRequest>,
) -> Result<Json<AnalyzeEmotionResponse>, ApiError> {
    let frame = FramePayload::from_data_uri(&request.webcam_feed).map_err(|e| {
        warn!("Rejecting emotion request: {}", e);
        bad_request_error(&e.to_string())
    })?;

    let output = analyze_emotion(state.inference.as_ref(), &frame).await;
    Ok(Json(AnalyzeEmotionResponse {
        emotion: output.emotion,
    }))
}

/// Runs the recommendation flow. Unknown emotion strings are coerced to
/// the sentinel `Neutral` so no invalid emotion ever reaches the flow.
async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Json<RecommendResponse> {
    let emotion = request.emotion.parse().unwrap_or_else(|_| {
        warn!(
            "Unknown emotion {:?} in request, using Neutral",
            request.emotion
        );
        EmotionLabel::Neutral
    });

    info!(
        "Recommendation request: emotion={}, language={}, genre={}",
        emotion, request.language, request.genre
    );

    let input = RecommendMovieInput {
        emotion,
        language: request.language,
        genre: request.genre,
    };
    let output = recommend_movie(state.inference.as_ref(), state.posters.as_ref(), &input).await;

    Json(RecommendResponse {
        movies: output.movies,
    })
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/options", get(options))
        .route("/emotion", post(detect_emotion))
        .route("/recommend", post(recommend))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
