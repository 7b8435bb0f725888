use crate::error::ProviderError;
use crate::models::{RoutingDecision, SearchResults, VideoSearchResult, WebSearchResult};
use crate::services::web_search_service::WebSearchProvider;
use crate::services::youtube_service::VideoProvider;
use log::{error, info, warn};

async fn search_videos(
    provider: &dyn VideoProvider,
    query: &str,
    page_size: usize,
) -> Vec<VideoSearchResult> {
    match provider.search(query, page_size).await {
        Ok(results) => {
            info!("Video search for {query:?} returned {} results", results.len());
            results
        }
        Err(ProviderError::NotConfigured(name)) => {
            warn!("Skipping video search: {name} is not configured");
            Vec::new()
        }
        Err(e) => {
            error!("Video search error: {e}");
            Vec::new()
        }
    }
}

async fn search_web(provider: &dyn WebSearchProvider, query: &str) -> Vec<WebSearchResult> {
    match provider.search(query).await {
        Ok(results) => {
            info!("Web search for {query:?} returned {} results", results.len());
            results
        }
        Err(ProviderError::NotConfigured(name)) => {
            warn!("Skipping web search: {name} is not configured");
            Vec::new()
        }
        Err(e) => {
            error!("Web search error: {e}");
            Vec::new()
        }
    }
}

/// Run the searches a routing decision asks for.
///
/// Both branches run concurrently; a failing branch contributes an empty list.
pub async fn dispatch(
    decision: &RoutingDecision,
    video_provider: &dyn VideoProvider,
    web_provider: &dyn WebSearchProvider,
    page_size: usize,
) -> SearchResults {
    let search_type = decision.search_type;

    let video_branch = async {
        if search_type.includes_video() {
            search_videos(video_provider, &decision.optimized_youtube_query, page_size).await
        } else {
            Vec::new()
        }
    };
    let web_branch = async {
        if search_type.includes_web() {
            search_web(web_provider, &decision.optimized_web_query).await
        } else {
            Vec::new()
        }
    };

    let (youtube, web) = tokio::join!(video_branch, web_branch);
    SearchResults { youtube, web }
}
