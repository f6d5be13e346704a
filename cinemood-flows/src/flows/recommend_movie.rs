use futures_util::future::join_all;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{FlowError, Result};
use crate::llm::Inference;
use crate::models::{Movie, RecommendMovieInput, RecommendMovieOutput};
use crate::posters::PosterProvider;

/// A movie entry as produced by the recommendation model, before poster
/// enrichment.
#[derive(Debug, Deserialize)]
struct Candidate {
    title: String,
    genre: String,
}

fn recommendation_prompt(input: &RecommendMovieInput) -> String {
    format!(
        r#"You are a movie expert. Recommend three movies based on the user's detected emotion, selected language, and genre.
The output must be a JSON array of objects. Each object must have a "title" and a "genre" field. Respond with the JSON array only, no explanation and no additional text.

User Emotion: {}
Movie Language: {}
Movie Genre: {}

JSON:"#,
        input.emotion, input.language, input.genre
    )
}

/// Recommends movies for (emotion, language, genre) and enriches each
/// with poster art.
///
/// A failed primary call or malformed model output yields an empty list;
/// the caller never sees an error. Nothing is kept between invocations.
pub async fn recommend_movie(
    inference: &dyn Inference,
    posters: &dyn PosterProvider,
    input: &RecommendMovieInput,
) -> RecommendMovieOutput {
    let candidates = match fetch_candidates(inference, input).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("Movie recommendation failed, returning empty list: {}", e);
            return RecommendMovieOutput { movies: vec![] };
        }
    };

    info!("Model produced {} candidates", candidates.len());

    // Lookups fan out concurrently; join_all matches each result back to
    // its candidate by position, so the output keeps candidate order no
    // matter which lookup settles first.
    let lookups = candidates
        .iter()
        .map(|candidate| posters.lookup_poster(&candidate.title));
    let poster_urls = join_all(lookups).await;

    let movies = candidates
        .into_iter()
        .zip(poster_urls)
        .map(|(candidate, poster_url)| Movie {
            title: candidate.title,
            genre: candidate.genre,
            poster_url: Some(poster_url),
            language: Some(input.language.clone()),
        })
        .collect();

    RecommendMovieOutput { movies }
}

async fn fetch_candidates(
    inference: &dyn Inference,
    input: &RecommendMovieInput,
) -> Result<Vec<Candidate>> {
    let response = inference.complete(&recommendation_prompt(input)).await?;
    parse_candidates(&response)
}

fn parse_candidates(response: &str) -> Result<Vec<Candidate>> {
    let body = strip_code_fences(response);

    let candidates: Vec<Candidate> = serde_json::from_str(body)
        .map_err(|e| FlowError::MalformedOutput(format!("expected JSON array of movies: {}", e)))?;

    if candidates.is_empty() {
        return Err(FlowError::MalformedOutput(
            "model returned no candidates".to_string(),
        ));
    }
    if candidates
        .iter()
        .any(|c| c.title.trim().is_empty() || c.genre.trim().is_empty())
    {
        return Err(FlowError::MalformedOutput(
            "candidate with empty title or genre".to_string(),
        ));
    }

    Ok(candidates)
}

/// Models often wrap JSON in a markdown fence despite instructions.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|body| body.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmotionLabel;
    use crate::posters::PLACEHOLDER_POSTER_URL;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    struct StubInference {
        reply: Option<String>,
    }

    impl StubInference {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
            }
        }

        fn failing() -> Self {
            Self { reply: None }
        }
    }

    #[async_trait]
    impl Inference for StubInference {
        async fn complete(&self, _prompt: &str) -> crate::Result<String> {
            self.reply
                .clone()
                .ok_or_else(|| FlowError::Inference("simulated outage".to_string()))
        }

        async fn analyze_image(&self, _data_uri: &str, _prompt: &str) -> crate::Result<String> {
            unreachable!("recommendation must not use the vision call")
        }
    }

    /// Poster stub: known titles resolve to a canned URL, everything else
    /// to the placeholder, mirroring the provider contract.
    struct StubPosters {
        known: HashMap<String, String>,
    }

    impl StubPosters {
        fn with_posters(titles: &[&str]) -> Self {
            let known = titles
                .iter()
                .map(|t| (t.to_string(), format!("https://posters.test/{}.jpg", t)))
                .collect();
            Self { known }
        }
    }

    #[async_trait]
    impl PosterProvider for StubPosters {
        async fn lookup_poster(&self, title: &str) -> String {
            self.known
                .get(title)
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_POSTER_URL.to_string())
        }
    }

    /// Poster stub whose lookups settle in reverse submission order.
    struct ReversedLatencyPosters;

    #[async_trait]
    impl PosterProvider for ReversedLatencyPosters {
        async fn lookup_poster(&self, title: &str) -> String {
            let delay = match title {
                "First" => 300,
                "Second" => 200,
                _ => 100,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            format!("https://posters.test/{}.jpg", title)
        }
    }

    fn comedy_input() -> RecommendMovieInput {
        RecommendMovieInput {
            emotion: EmotionLabel::Happy,
            language: "English".to_string(),
            genre: "Comedy".to_string(),
        }
    }

    #[tokio::test]
    async fn enriches_candidates_and_substitutes_placeholder_on_miss() {
        let inference = StubInference::replying(
            r#"[{"title":"A","genre":"Comedy"},{"title":"B","genre":"Comedy"},{"title":"C","genre":"Comedy"}]"#,
        );
        let posters = StubPosters::with_posters(&["A", "C"]);

        let output = recommend_movie(&inference, &posters, &comedy_input()).await;

        assert_eq!(output.movies.len(), 3);
        assert_eq!(output.movies[0].title, "A");
        assert_eq!(
            output.movies[0].poster_url.as_deref(),
            Some("https://posters.test/A.jpg")
        );
        assert_eq!(
            output.movies[1].poster_url.as_deref(),
            Some(PLACEHOLDER_POSTER_URL)
        );
        assert_eq!(
            output.movies[2].poster_url.as_deref(),
            Some("https://posters.test/C.jpg")
        );
        for movie in &output.movies {
            assert!(!movie.title.is_empty());
            assert!(!movie.genre.is_empty());
            assert_eq!(movie.language.as_deref(), Some("English"));
        }
    }

    #[tokio::test]
    async fn failing_inference_yields_empty_list() {
        let inference = StubInference::failing();
        let posters = StubPosters::with_posters(&[]);

        let output = recommend_movie(&inference, &posters, &comedy_input()).await;
        assert!(output.movies.is_empty());
    }

    #[tokio::test]
    async fn malformed_output_yields_empty_list() {
        let inference = StubInference::replying("Sure! Here are three great comedies you...");
        let posters = StubPosters::with_posters(&[]);

        let output = recommend_movie(&inference, &posters, &comedy_input()).await;
        assert!(output.movies.is_empty());
    }

    #[tokio::test]
    async fn candidate_with_empty_title_fails_the_whole_response() {
        let inference = StubInference::replying(
            r#"[{"title":"A","genre":"Comedy"},{"title":"","genre":"Comedy"}]"#,
        );
        let posters = StubPosters::with_posters(&["A"]);

        let output = recommend_movie(&inference, &posters, &comedy_input()).await;
        assert!(output.movies.is_empty());
    }

    #[tokio::test]
    async fn fenced_json_is_accepted() {
        let inference = StubInference::replying(
            "```json\n[{\"title\":\"A\",\"genre\":\"Comedy\"}]\n```",
        );
        let posters = StubPosters::with_posters(&["A"]);

        let output = recommend_movie(&inference, &posters, &comedy_input()).await;
        assert_eq!(output.movies.len(), 1);
        assert_eq!(output.movies[0].title, "A");
    }

    #[tokio::test(start_paused = true)]
    async fn output_order_is_candidate_order_not_completion_order() {
        let inference = StubInference::replying(
            r#"[{"title":"First","genre":"Drama"},{"title":"Second","genre":"Drama"},{"title":"Third","genre":"Drama"}]"#,
        );

        let output = recommend_movie(&inference, &ReversedLatencyPosters, &comedy_input()).await;

        let titles: Vec<&str> = output.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
        assert_eq!(
            output.movies[0].poster_url.as_deref(),
            Some("https://posters.test/First.jpg")
        );
    }

    #[test]
    fn prompt_interpolates_all_inputs() {
        let prompt = recommendation_prompt(&comedy_input());
        assert!(prompt.contains("User Emotion: Happy"));
        assert!(prompt.contains("Movie Language: English"));
        assert!(prompt.contains("Movie Genre: Comedy"));
    }
}
