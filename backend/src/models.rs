use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

/// Which search backends a query should be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[serde(alias = "video")]
    Youtube,
    Web,
    Both,
}

impl SearchType {
    pub fn includes_video(self) -> bool {
        matches!(self, SearchType::Youtube | SearchType::Both)
    }

    pub fn includes_web(self) -> bool {
        matches!(self, SearchType::Web | SearchType::Both)
    }
}

/// Output of query analysis, returned to clients as `analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub search_type: SearchType,
    pub optimized_youtube_query: String,
    pub optimized_web_query: String,
    pub reasoning: String,
    /// Free-text part of the model answer, or why the local fallback was used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrock_raw_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSearchResult {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub description: String,
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub youtube: Vec<VideoSearchResult>,
    pub web: Vec<WebSearchResult>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub youtube: Vec<VideoSearchResult>,
    pub web: Vec<WebSearchResult>,
    pub analysis: RoutingDecision,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    /// Already returned next to the details as `video_id`
    #[serde(skip_serializing, default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel: String,
    pub published_at: String,
    pub duration: String, // ISO8601, e.g. PT4M13S
    pub view_count: String,
    pub like_count: String,
    pub thumbnail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub video_details: VideoDetails,
    pub transcript_available: bool,
    pub summary: String,
    pub video_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
    pub video_id: Option<String>,
    pub previous_summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub transcript_available: bool,
}

#[derive(Debug, Serialize)]
pub struct BedrockStatus {
    pub bedrock_client_initialized: bool,
    pub aws_region: String,
    pub aws_access_key_exists: bool,
    pub aws_secret_key_exists: bool,
    pub aws_access_key_preview: Option<String>,
    pub bedrock_connection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrock_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: Status,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: Status::BadRequest,
            error: error.into(),
            details: None,
        }
    }

    pub fn internal(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: Status::InternalServerError,
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status;
        (status, Json(self)).respond_to(request)
    }
}
