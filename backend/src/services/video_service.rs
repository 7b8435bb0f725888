use crate::error::ProviderError;
use crate::models::VideoDetails;
use crate::services::transcript_service::TranscriptProvider;
use crate::services::youtube_service::VideoProvider;
use log::{error, info, warn};

/// Metadata for a video, or `None` if it cannot be retrieved for any reason.
pub async fn fetch_details(provider: &dyn VideoProvider, video_id: &str) -> Option<VideoDetails> {
    match provider.video_details(video_id).await {
        Ok(Some(details)) => Some(details),
        Ok(None) => {
            warn!("No video found for id {video_id}");
            None
        }
        Err(ProviderError::NotConfigured(name)) => {
            warn!("Cannot fetch video details for {video_id}: {name} is not configured");
            None
        }
        Err(e) => {
            error!("Error getting video details for {video_id}: {e}");
            None
        }
    }
}

/// Caption text in the first language group that has a track.
///
/// `preference` is tried in order; provider errors move on to the next group.
pub async fn fetch_transcript(
    provider: &dyn TranscriptProvider,
    video_id: &str,
    preference: &[Vec<String>],
) -> Option<String> {
    for languages in preference {
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();
        match provider.fetch_transcript(video_id, &languages).await {
            Ok(text) if !text.is_empty() => {
                info!(
                    "Fetched transcript for {video_id} ({}), {} characters",
                    languages.join(","),
                    text.chars().count()
                );
                return Some(text);
            }
            Ok(_) => warn!("Empty transcript for {video_id} in {}", languages.join(",")),
            Err(e) => warn!(
                "No transcript for {video_id} in {}: {e}",
                languages.join(",")
            ),
        }
    }
    None
}
