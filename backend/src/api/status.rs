use crate::models::BedrockStatus;
use crate::services::status_service;
use crate::AppState;
use rocket::serde::json::Json;
use rocket::{get, State};

#[get("/")]
pub fn index() -> &'static str {
    "Welcome to the YouTube Search API! Use the /search endpoint with a query parameter."
}

#[get("/bedrock-status")]
pub async fn bedrock_status(state: &State<AppState>) -> Json<BedrockStatus> {
    Json(status_service::bedrock_status(&state.config, state.language_model.as_ref()).await)
}
