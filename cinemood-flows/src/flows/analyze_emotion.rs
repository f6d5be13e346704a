use std::str::FromStr;

use tracing::{info, warn};

use crate::capture::FramePayload;
use crate::error::Result;
use crate::llm::Inference;
use crate::models::{AnalyzeEmotionOutput, EmotionLabel};

const ANALYZE_EMOTION_PROMPT: &str = r#"You are an AI that can analyze a person's emotion from an image. Here are the emotions you can use: "Happy", "Sad", "Angry", "Neutral", "Excited", "Disgusted", "Surprised", "Fearful".
Analyze the user's emotion from the provided webcam frame. Return the detected emotion as a single word.

It is very important that you are accurate in emotion detection.

Detected emotion:"#;

/// Detects the user's emotion from a captured webcam frame.
///
/// External-call failures and unparseable output stay inside this flow:
/// the caller always receives a vocabulary label, with `Neutral` as the
/// sentinel default. No retry is performed.
pub async fn analyze_emotion(
    inference: &dyn Inference,
    frame: &FramePayload,
) -> AnalyzeEmotionOutput {
    match detect(inference, frame).await {
        Ok(emotion) => {
            info!("Detected emotion: {}", emotion);
            AnalyzeEmotionOutput { emotion }
        }
        Err(e) => {
            warn!("Emotion analysis failed, falling back to Neutral: {}", e);
            AnalyzeEmotionOutput {
                emotion: EmotionLabel::Neutral,
            }
        }
    }
}

async fn detect(inference: &dyn Inference, frame: &FramePayload) -> Result<EmotionLabel> {
    let response = inference
        .analyze_image(frame.as_data_uri(), ANALYZE_EMOTION_PROMPT)
        .await?;
    EmotionLabel::from_str(&response)
}
