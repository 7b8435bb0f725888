#[macro_use]
extern crate rocket;

mod api;
mod config;
mod error;
mod models;
mod services;
#[cfg(test)]
mod testing;
mod utils;

use crate::config::AppConfig;
use crate::services::bedrock::LanguageModel;
use crate::services::transcript_service::TranscriptProvider;
use crate::services::web_search_service::WebSearchProvider;
use crate::services::youtube_service::VideoProvider;
use rocket::{Build, Rocket};
use std::sync::Arc;

/// Shared, read-only for the lifetime of the process.
pub struct AppState {
    pub config: AppConfig,
    pub language_model: Arc<dyn LanguageModel>,
    pub video_provider: Arc<dyn VideoProvider>,
    pub web_search: Arc<dyn WebSearchProvider>,
    pub transcripts: Arc<dyn TranscriptProvider>,
}

pub fn build_rocket(state: AppState) -> anyhow::Result<Rocket<Build>> {
    let cors = config::create_cors(&state.config)?;

    Ok(rocket::build()
        .manage(state)
        .attach(cors)
        .mount(
            "/",
            routes![
                api::index,
                api::bedrock_status,
                api::search_query,
                api::summarize_video,
                api::ask_about_video,
            ],
        )
        .register("/", catchers![api::json_catcher]))
}

#[launch]
async fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state(AppConfig::from_env()).await;
    build_rocket(state).expect("Failed to build the Rocket instance")
}
