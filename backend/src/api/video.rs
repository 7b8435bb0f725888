use crate::models::{AskRequest, AskResponse, ErrorResponse, SummarizeRequest, SummarizeResponse};
use crate::services::{summary_service, video_service};
use crate::utils::extract_video_id;
use crate::AppState;
use log::{error, info, warn};
use rocket::serde::json::{self, Json};
use rocket::{post, State};

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Body that does not deserialize (wrong field types, `null`, broken JSON) is a client error.
fn parse_body<T>(body: Result<Json<T>, json::Error<'_>>) -> Result<T, ErrorResponse> {
    body.map(Json::into_inner).map_err(|e| {
        warn!("Rejected request body: {e}");
        ErrorResponse::bad_request("Invalid request body")
    })
}

#[post("/summarize-video", data = "<request>")]
pub async fn summarize_video(
    request: Result<Json<SummarizeRequest>, json::Error<'_>>,
    state: &State<AppState>,
) -> Result<Json<SummarizeResponse>, ErrorResponse> {
    let url = required(parse_body(request)?.url)
        .ok_or_else(|| ErrorResponse::bad_request("Video URL is required"))?;

    let video_id =
        extract_video_id(&url).ok_or_else(|| ErrorResponse::bad_request("Invalid YouTube URL"))?;

    let video_details = video_service::fetch_details(state.video_provider.as_ref(), &video_id)
        .await
        .ok_or_else(|| ErrorResponse::bad_request("Failed to get video details"))?;

    let transcript = video_service::fetch_transcript(
        state.transcripts.as_ref(),
        &video_id,
        &state.config.transcript_language_preference(),
    )
    .await;

    let summary = summary_service::summarize(
        state.language_model.as_ref(),
        &video_details.title,
        &video_details.description,
        transcript.as_deref(),
    )
    .await;

    info!(
        "Summarized video {video_id} (transcript: {})",
        transcript.is_some()
    );

    Ok(Json(SummarizeResponse {
        video_details,
        transcript_available: transcript.is_some(),
        summary,
        video_id,
    }))
}

#[post("/ask-about-video", data = "<request>")]
pub async fn ask_about_video(
    request: Result<Json<AskRequest>, json::Error<'_>>,
    state: &State<AppState>,
) -> Result<Json<AskResponse>, ErrorResponse> {
    let AskRequest {
        question,
        video_id,
        previous_summary,
    } = parse_body(request)?;

    let (question, video_id) = match (required(question), required(video_id)) {
        (Some(question), Some(video_id)) => (question, video_id),
        _ => {
            return Err(ErrorResponse::bad_request(
                "Question and video_id are required",
            ))
        }
    };

    let video_details = video_service::fetch_details(state.video_provider.as_ref(), &video_id)
        .await
        .ok_or_else(|| ErrorResponse::bad_request("Failed to get video details"))?;

    let transcript = video_service::fetch_transcript(
        state.transcripts.as_ref(),
        &video_id,
        &state.config.transcript_language_preference(),
    )
    .await;

    match summary_service::answer_question(
        state.language_model.as_ref(),
        &question,
        &video_details,
        transcript.as_deref(),
        previous_summary.as_deref(),
    )
    .await
    {
        Ok(answer) => Ok(Json(AskResponse {
            answer,
            transcript_available: transcript.is_some(),
        })),
        Err(e) => {
            error!("Error answering question: {e:#}");
            Err(ErrorResponse::internal(
                format!("Failed to answer the question: {}", e.root_cause()),
                format!("{e:#}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{
        app_state, sample_details, StubModel, StubTranscripts, StubVideoProvider, StubWebSearch,
    };
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    async fn client(model: StubModel, videos: StubVideoProvider, transcripts: StubTranscripts) -> Client {
        let state = app_state(model, videos, StubWebSearch::default(), transcripts);
        Client::tracked(crate::build_rocket(state).unwrap())
            .await
            .unwrap()
    }

    #[rocket::async_test]
    async fn summarize_rejects_unresolvable_url() {
        let client = client(
            StubModel::replying("summary"),
            StubVideoProvider::with_details(sample_details("abc123")),
            StubTranscripts::unavailable(),
        )
        .await;

        let response = client
            .post("/summarize-video")
            .header(ContentType::JSON)
            .body(json!({ "url": "not-a-url" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "Invalid YouTube URL");
    }

    #[rocket::async_test]
    async fn summarize_requires_url() {
        let client = client(
            StubModel::replying("summary"),
            StubVideoProvider::default(),
            StubTranscripts::unavailable(),
        )
        .await;

        let response = client
            .post("/summarize-video")
            .header(ContentType::JSON)
            .body("{}")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "Video URL is required");
    }

    #[rocket::async_test]
    async fn summarize_fails_when_details_are_missing() {
        let client = client(
            StubModel::replying("summary"),
            StubVideoProvider::failing(),
            StubTranscripts::unavailable(),
        )
        .await;

        let response = client
            .post("/summarize-video")
            .header(ContentType::JSON)
            .body(json!({ "url": "https://youtu.be/abc123" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[rocket::async_test]
    async fn summarize_without_transcript_still_succeeds() {
        let client = client(
            StubModel::replying("1. **Overview**: ownership basics"),
            StubVideoProvider::with_details(sample_details("abc123")),
            StubTranscripts::unavailable(),
        )
        .await;

        let response = client
            .post("/summarize-video")
            .header(ContentType::JSON)
            .body(json!({ "url": "https://www.youtube.com/watch?v=abc123" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["transcript_available"], false);
        assert_eq!(body["video_id"], "abc123");
        assert!(body["video_details"].get("id").is_none());
        assert_eq!(body["video_details"]["channel"], "Let's Get Rusty");
        assert_eq!(body["video_details"]["viewCount"], "120000");
        assert!(!body["summary"].as_str().unwrap().is_empty());
    }

    #[rocket::async_test]
    async fn summarize_reports_model_failure_inside_summary() {
        let client = client(
            StubModel::failing("ServiceUnavailable"),
            StubVideoProvider::with_details(sample_details("abc123")),
            StubTranscripts::available("hello and welcome"),
        )
        .await;

        let response = client
            .post("/summarize-video")
            .header(ContentType::JSON)
            .body(json!({ "url": "https://youtu.be/abc123" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["transcript_available"], true);
        assert!(body["summary"]
            .as_str()
            .unwrap()
            .contains("ServiceUnavailable"));
    }

    #[rocket::async_test]
    async fn ask_requires_question_and_video_id() {
        let client = client(
            StubModel::replying("answer"),
            StubVideoProvider::with_details(sample_details("abc123")),
            StubTranscripts::unavailable(),
        )
        .await;

        let response = client
            .post("/ask-about-video")
            .header(ContentType::JSON)
            .body(json!({ "question": "What is it about?" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "Question and video_id are required");
    }

    #[rocket::async_test]
    async fn ask_returns_model_answer() {
        let client = client(
            StubModel::replying("It covers the borrow checker."),
            StubVideoProvider::with_details(sample_details("abc123")),
            StubTranscripts::available("today we talk about borrowing"),
        )
        .await;

        let response = client
            .post("/ask-about-video")
            .header(ContentType::JSON)
            .body(
                json!({
                    "question": "What is it about?",
                    "video_id": "abc123",
                    "previous_summary": "A video about Rust."
                })
                .to_string(),
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["answer"], "It covers the borrow checker.");
        assert_eq!(body["transcript_available"], true);
    }

    #[rocket::async_test]
    async fn ask_model_failure_is_server_error() {
        let client = client(
            StubModel::failing("ModelTimeoutException"),
            StubVideoProvider::with_details(sample_details("abc123")),
            StubTranscripts::unavailable(),
        )
        .await;

        let response = client
            .post("/ask-about-video")
            .header(ContentType::JSON)
            .body(json!({ "question": "Why?", "video_id": "abc123" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::InternalServerError);

        let body: Value = response.into_json().await.unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to answer the question"));
    }

    #[rocket::async_test]
    async fn malformed_body_gets_json_error() {
        let client = client(
            StubModel::replying("answer"),
            StubVideoProvider::default(),
            StubTranscripts::unavailable(),
        )
        .await;

        let response = client
            .post("/summarize-video")
            .header(ContentType::JSON)
            .body("{ not json")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[rocket::async_test]
    async fn mistyped_or_null_bodies_are_bad_requests() {
        let client = client(
            StubModel::replying("answer"),
            StubVideoProvider::with_details(sample_details("abc123")),
            StubTranscripts::unavailable(),
        )
        .await;

        for (path, body) in [
            ("/summarize-video", json!({ "url": 123 }).to_string()),
            ("/summarize-video", "null".to_string()),
            (
                "/ask-about-video",
                json!({ "question": 5, "video_id": "abc123" }).to_string(),
            ),
        ] {
            let response = client
                .post(path)
                .header(ContentType::JSON)
                .body(body.clone())
                .dispatch()
                .await;
            assert_eq!(response.status(), Status::BadRequest, "{path} {body}");
            let body: Value = response.into_json().await.unwrap();
            assert_eq!(body["error"], "Invalid request body");
        }
    }
}
