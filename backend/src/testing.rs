//! In-memory provider doubles for unit and route tests.

use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::models::{VideoDetails, VideoSearchResult, WebSearchResult};
use crate::services::bedrock::LanguageModel;
use crate::services::transcript_service::TranscriptProvider;
use crate::services::web_search_service::WebSearchProvider;
use crate::services::youtube_service::VideoProvider;
use crate::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct StubModel {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl StubModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[rocket::async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(ProviderError::Aws)
    }

    fn model_id(&self) -> &str {
        "stub-model"
    }
}

#[derive(Default)]
pub struct StubVideoProvider {
    results: Vec<VideoSearchResult>,
    details: Option<VideoDetails>,
    fail: bool,
    search_calls: AtomicUsize,
    last_search: Mutex<Option<(String, usize)>>,
}

impl StubVideoProvider {
    pub fn with_results(results: Vec<VideoSearchResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn with_details(details: VideoDetails) -> Self {
        Self {
            details: Some(details),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn last_search(&self) -> Option<(String, usize)> {
        self.last_search.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl VideoProvider for StubVideoProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<VideoSearchResult>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_search.lock().unwrap() = Some((query.to_string(), max_results));
        if self.fail {
            return Err(ProviderError::InvalidResponse("quota exceeded".into()));
        }
        Ok(self.results.clone())
    }

    async fn video_details(&self, _video_id: &str) -> Result<Option<VideoDetails>, ProviderError> {
        if self.fail {
            return Err(ProviderError::InvalidResponse("quota exceeded".into()));
        }
        Ok(self.details.clone())
    }
}

#[derive(Default)]
pub struct StubWebSearch {
    results: Vec<WebSearchResult>,
    calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl StubWebSearch {
    pub fn with_results(results: Vec<WebSearchResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl WebSearchProvider for StubWebSearch {
    async fn search(&self, query: &str) -> Result<Vec<WebSearchResult>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.to_string());
        Ok(self.results.clone())
    }
}

/// Serves `text` for requests that include `language`; `None` serves every request.
#[derive(Default)]
pub struct StubTranscripts {
    language: Option<String>,
    text: Option<String>,
    requested: Mutex<Vec<Vec<String>>>,
}

impl StubTranscripts {
    pub fn available(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn only_for(language: &str, text: &str) -> Self {
        Self {
            language: Some(language.to_string()),
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> Vec<Vec<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[rocket::async_trait]
impl TranscriptProvider for StubTranscripts {
    async fn fetch_transcript(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> Result<String, ProviderError> {
        self.requested
            .lock()
            .unwrap()
            .push(languages.iter().map(|l| l.to_string()).collect());

        let language_matches = match &self.language {
            Some(language) => languages.contains(&language.as_str()),
            None => true,
        };
        match (&self.text, language_matches) {
            (Some(text), true) => Ok(text.clone()),
            _ => Err(ProviderError::Transcript(format!(
                "No transcripts were found for {video_id}"
            ))),
        }
    }
}

pub fn sample_details(video_id: &str) -> VideoDetails {
    VideoDetails {
        id: video_id.to_string(),
        title: "Rust ownership explained".to_string(),
        description: "Borrowing, moves and lifetimes.".to_string(),
        channel: "Let's Get Rusty".to_string(),
        published_at: "2024-05-01T12:00:00Z".to_string(),
        duration: "PT12M3S".to_string(),
        view_count: "120000".to_string(),
        like_count: "4500".to_string(),
        thumbnail: format!("https://i.ytimg.com/vi/{video_id}/hqdefault.jpg"),
    }
}

pub fn sample_video_result(video_id: &str) -> VideoSearchResult {
    VideoSearchResult {
        title: format!("Video {video_id}"),
        url: format!("https://www.youtube.com/watch?v={video_id}"),
        thumbnail: format!("https://i.ytimg.com/vi/{video_id}/mqdefault.jpg"),
        description: String::new(),
        channel_title: "Channel".to_string(),
    }
}

pub fn sample_web_result(slug: &str) -> WebSearchResult {
    WebSearchResult {
        title: format!("Page {slug}"),
        url: format!("https://example.com/{slug}"),
        snippet: String::new(),
        thumbnail: String::new(),
    }
}

pub fn app_state(
    model: StubModel,
    videos: StubVideoProvider,
    web: StubWebSearch,
    transcripts: StubTranscripts,
) -> AppState {
    AppState {
        config: AppConfig::default(),
        language_model: Arc::new(model),
        video_provider: Arc::new(videos),
        web_search: Arc::new(web),
        transcripts: Arc::new(transcripts),
    }
}
