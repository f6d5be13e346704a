mod analyze_emotion;
mod recommend_movie;

pub use analyze_emotion::analyze_emotion;
pub use recommend_movie::recommend_movie;
