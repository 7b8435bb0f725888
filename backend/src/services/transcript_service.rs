use crate::error::ProviderError;
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Caption text for a video.
#[rocket::async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the first track matching `languages` (manual tracks before generated ones)
    /// and return its entries joined as plain text.
    async fn fetch_transcript(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> Result<String, ProviderError>;
}

pub struct YtTranscriptFetcher;

#[rocket::async_trait]
impl TranscriptProvider for YtTranscriptFetcher {
    async fn fetch_transcript(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> Result<String, ProviderError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| ProviderError::Transcript(format!("{e:?}")))?;

        let transcript = api
            .fetch_transcript(video_id, languages, false)
            .await
            .map_err(|e| ProviderError::Transcript(format!("{e:?}")))?;

        let mut lines: Vec<String> = Vec::new();
        for entry in transcript {
            lines.push(entry.text);
        }

        Ok(join_caption_lines(lines))
    }
}

/// Concatenate caption entries into one space-separated text.
pub fn join_caption_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_entries_with_single_spaces() {
        let lines = vec![
            "hello".to_string(),
            "  world ".to_string(),
            String::new(),
            "again".to_string(),
        ];
        assert_eq!(join_caption_lines(lines), "hello world again");
    }

    #[test]
    fn empty_track_is_empty_text() {
        assert_eq!(join_caption_lines(Vec::<String>::new()), "");
    }
}
