use crate::models::{ErrorResponse, SearchResponse};
use crate::services::{analysis_service, search_service};
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{get, State};

#[get("/search?<query>")]
pub async fn search_query(
    query: Option<String>,
    state: &State<AppState>,
) -> Result<Json<SearchResponse>, ErrorResponse> {
    let query = match query {
        Some(query) if !query.trim().is_empty() => query,
        _ => return Err(ErrorResponse::bad_request("Query parameter is required")),
    };

    let analysis = analysis_service::analyze_query(state.language_model.as_ref(), &query).await;
    info!(
        "Routing {query:?} to {:?} (youtube: {:?}, web: {:?})",
        analysis.search_type, analysis.optimized_youtube_query, analysis.optimized_web_query
    );

    let results = search_service::dispatch(
        &analysis,
        state.video_provider.as_ref(),
        state.web_search.as_ref(),
        state.config.search_page_size,
    )
    .await;

    Ok(Json(SearchResponse {
        youtube: results.youtube,
        web: results.web,
        analysis,
    }))
}
