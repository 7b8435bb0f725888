use crate::error::ProviderError;
use crate::models::{VideoDetails, VideoSearchResult};
use reqwest::Client;
use serde_json::Value;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Search and metadata lookups against a video platform.
#[rocket::async_trait]
pub trait VideoProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoSearchResult>, ProviderError>;

    /// `Ok(None)` when the platform knows no video with this id.
    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, ProviderError>;
}

/// YouTube Data API v3 client.
pub struct YouTubeClient {
    http: Client,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(http: Client, api_key: Option<String>) -> Self {
        Self { http, api_key }
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("YOUTUBE_API_KEY"))
    }
}

#[rocket::async_trait]
impl VideoProvider for YouTubeClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoSearchResult>, ProviderError> {
        let api_key = self.api_key()?;
        let max_results = max_results.to_string();

        // Documentation: https://developers.google.com/youtube/v3/docs/search/list
        let response = self
            .http
            .get(format!("{YOUTUBE_API_BASE}/search"))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("key", api_key),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(parse_search_items(&response))
    }

    async fn video_details(&self, video_id: &str) -> Result<Option<VideoDetails>, ProviderError> {
        let api_key = self.api_key()?;

        // Documentation: https://developers.google.com/youtube/v3/docs/videos
        let response = self
            .http
            .get(format!("{YOUTUBE_API_BASE}/videos"))
            .query(&[
                ("part", "snippet,statistics,contentDetails"),
                ("id", video_id),
                ("key", api_key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(parse_video_details(video_id, &response))
    }
}

fn str_field(value: &Value) -> String {
    value.as_str().unwrap_or("").to_string()
}

/// Map `search.list` items to results, skipping channels and playlists.
pub fn parse_search_items(response: &Value) -> Vec<VideoSearchResult> {
    let Some(items) = response["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let video_id = item["id"]["videoId"].as_str()?;
            let snippet = &item["snippet"];
            Some(VideoSearchResult {
                title: str_field(&snippet["title"]),
                url: format!("https://www.youtube.com/watch?v={video_id}"),
                thumbnail: str_field(&snippet["thumbnails"]["medium"]["url"]),
                description: str_field(&snippet["description"]),
                channel_title: str_field(&snippet["channelTitle"]),
            })
        })
        .collect()
}

pub fn parse_video_details(video_id: &str, response: &Value) -> Option<VideoDetails> {
    let item = response["items"].as_array()?.first()?;
    let snippet = &item["snippet"];
    let statistics = &item["statistics"];

    Some(VideoDetails {
        id: video_id.to_string(),
        title: str_field(&snippet["title"]),
        description: str_field(&snippet["description"]),
        channel: str_field(&snippet["channelTitle"]),
        published_at: str_field(&snippet["publishedAt"]),
        duration: str_field(&item["contentDetails"]["duration"]),
        view_count: statistics["viewCount"].as_str().unwrap_or("0").to_string(),
        like_count: statistics["likeCount"].as_str().unwrap_or("0").to_string(),
        thumbnail: str_field(&snippet["thumbnails"]["high"]["url"]),
    })
}
