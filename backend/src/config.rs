use crate::services::bedrock::BedrockClient;
use crate::services::transcript_service::YtTranscriptFetcher;
use crate::services::web_search_service::GoogleSearchClient;
use crate::services::youtube_service::YouTubeClient;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::sync::Arc;

pub const DEFAULT_AWS_REGION: &str = "us-east-1";
pub const DEFAULT_BEDROCK_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";

/// Results requested from the video search per query
pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 10;

/// Transcript characters sent along with a summary request
pub const SUMMARY_TRANSCRIPT_MAX_CHARS: usize = 5000;
pub const SUMMARY_DESCRIPTION_MAX_CHARS: usize = 500;
pub const ANSWER_DESCRIPTION_MAX_CHARS: usize = 1000;
pub const ANSWER_TRANSCRIPT_MAX_CHARS: usize = 3000;
pub const ANSWER_SUMMARY_MAX_CHARS: usize = 500;

/// Output token budgets per model call
pub const ANALYSIS_MAX_TOKENS: u32 = 1000;
pub const SUMMARY_MAX_TOKENS: u32 = 1500;
pub const ANSWER_MAX_TOKENS: u32 = 1500;
pub const STATUS_PROBE_MAX_TOKENS: u32 = 10;

/// Language the model is asked to write summaries and answers in
pub const RESPONSE_LANGUAGE: &str = "Japanese";

pub const DEFAULT_PRIMARY_TRANSCRIPT_LANGUAGE: &str = "ja";
pub const DEFAULT_SECONDARY_TRANSCRIPT_LANGUAGE: &str = "en";

/// Origins accepted when running in production mode
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://search-engine-agent.vercel.app",
    "http://localhost:3000",
    "http://172.20.202.73:3000",
];
pub const VERCEL_ORIGIN_PATTERN: &str = r"^https://[a-zA-Z0-9-]+\.vercel\.app$";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub aws_region: String,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub bedrock_model_id: String,
    pub google_search_api_key: Option<String>,
    pub google_search_cx: Option<String>,
    pub youtube_api_key: Option<String>,
    pub production: bool,
    pub allowed_origins: Vec<String>,
    pub primary_transcript_language: String,
    pub secondary_transcript_language: String,
    pub search_page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            aws_region: DEFAULT_AWS_REGION.to_string(),
            aws_access_key_id: None,
            aws_secret_access_key: None,
            bedrock_model_id: DEFAULT_BEDROCK_MODEL_ID.to_string(),
            google_search_api_key: None,
            google_search_cx: None,
            youtube_api_key: None,
            production: false,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            primary_transcript_language: DEFAULT_PRIMARY_TRANSCRIPT_LANGUAGE.to_string(),
            secondary_transcript_language: DEFAULT_SECONDARY_TRANSCRIPT_LANGUAGE.to_string(),
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let environment = var("APP_ENV").or_else(|| var("FLASK_ENV"));
        let allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_origins);

        Self {
            aws_region: var("AWS_DEFAULT_REGION").unwrap_or(defaults.aws_region),
            aws_access_key_id: var("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
            bedrock_model_id: var("BEDROCK_MODEL_ID").unwrap_or(defaults.bedrock_model_id),
            google_search_api_key: var("GOOGLE_SEARCH_API_KEY"),
            google_search_cx: var("GOOGLE_SEARCH_CX"),
            youtube_api_key: var("YOUTUBE_API_KEY"),
            production: environment.as_deref() == Some("production"),
            allowed_origins,
            primary_transcript_language: var("TRANSCRIPT_PRIMARY_LANGUAGE")
                .unwrap_or(defaults.primary_transcript_language),
            secondary_transcript_language: var("TRANSCRIPT_SECONDARY_LANGUAGE")
                .unwrap_or(defaults.secondary_transcript_language),
            search_page_size: var("SEARCH_PAGE_SIZE")
                .and_then(|size| size.parse::<usize>().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.search_page_size),
        }
    }

    /// Transcript languages in preference order, generated tracks last.
    pub fn transcript_language_preference(&self) -> Vec<Vec<String>> {
        let primary = self.primary_transcript_language.clone();
        let secondary = self.secondary_transcript_language.clone();
        vec![
            vec![primary.clone()],
            vec![secondary.clone()],
            vec![primary, secondary],
        ]
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting search agent backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

fn log_provider_configuration(config: &AppConfig) {
    info!(
        "Bedrock region: {}, model: {}",
        config.aws_region, config.bedrock_model_id
    );
    if config.youtube_api_key.is_none() {
        warn!("YOUTUBE_API_KEY is not set; video search and video details are disabled.");
    }
    if config.google_search_api_key.is_none() || config.google_search_cx.is_none() {
        warn!("GOOGLE_SEARCH_API_KEY / GOOGLE_SEARCH_CX not set; web search is disabled.");
    }
}

pub async fn create_app_state(config: AppConfig) -> AppState {
    log_provider_configuration(&config);

    let http_client = reqwest::Client::new();
    let language_model = BedrockClient::new(&config).await;
    let video_provider = YouTubeClient::new(http_client.clone(), config.youtube_api_key.clone());
    let web_search = GoogleSearchClient::new(
        http_client,
        config.google_search_api_key.clone(),
        config.google_search_cx.clone(),
    );

    AppState {
        config,
        language_model: Arc::new(language_model),
        video_provider: Arc::new(video_provider),
        web_search: Arc::new(web_search),
        transcripts: Arc::new(YtTranscriptFetcher),
    }
}

pub fn create_cors(config: &AppConfig) -> Result<rocket_cors::Cors> {
    let allowed_origins = if config.production {
        info!(
            "Restricting CORS to {} origins plus *.vercel.app",
            config.allowed_origins.len()
        );
        AllowedOrigins::some(&config.allowed_origins, &[VERCEL_ORIGIN_PATTERN])
    } else {
        AllowedOrigins::all()
    };

    let cors = CorsOptions::default()
        .allowed_origins(allowed_origins)
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
