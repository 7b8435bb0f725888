pub mod analysis_service;
pub mod bedrock;
pub mod classifier;
pub mod search_service;
pub mod status_service;
pub mod summary_service;
pub mod transcript_service;
pub mod video_service;
pub mod web_search_service;
pub mod youtube_service;
