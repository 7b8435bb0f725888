use crate::error::ProviderError;
use crate::models::WebSearchResult;
use reqwest::Client;
use serde_json::Value;

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

#[rocket::async_trait]
pub trait WebSearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<WebSearchResult>, ProviderError>;
}

/// Google Programmable Search (Custom Search JSON API).
pub struct GoogleSearchClient {
    http: Client,
    api_key: Option<String>,
    cx: Option<String>,
}

impl GoogleSearchClient {
    pub fn new(http: Client, api_key: Option<String>, cx: Option<String>) -> Self {
        Self { http, api_key, cx }
    }
}

#[rocket::async_trait]
impl WebSearchProvider for GoogleSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<WebSearchResult>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured("GOOGLE_SEARCH_API_KEY"))?;
        let cx = self
            .cx
            .as_deref()
            .ok_or(ProviderError::NotConfigured("GOOGLE_SEARCH_CX"))?;

        let response = self
            .http
            .get(CUSTOM_SEARCH_URL)
            .query(&[("key", api_key), ("cx", cx), ("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(parse_search_items(&response))
    }
}

pub fn parse_search_items(response: &Value) -> Vec<WebSearchResult> {
    let Some(items) = response["items"].as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| WebSearchResult {
            title: item["title"].as_str().unwrap_or("").to_string(),
            url: item["link"].as_str().unwrap_or("").to_string(),
            snippet: item["snippet"].as_str().unwrap_or("").to_string(),
            thumbnail: item["pagemap"]["cse_thumbnail"][0]["src"]
                .as_str()
                .unwrap_or("")
                .to_string(),
        })
        .collect()
}
