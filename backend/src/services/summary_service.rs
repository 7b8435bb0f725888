use crate::config::{
    ANSWER_DESCRIPTION_MAX_CHARS, ANSWER_MAX_TOKENS, ANSWER_SUMMARY_MAX_CHARS,
    ANSWER_TRANSCRIPT_MAX_CHARS, RESPONSE_LANGUAGE, SUMMARY_DESCRIPTION_MAX_CHARS,
    SUMMARY_MAX_TOKENS, SUMMARY_TRANSCRIPT_MAX_CHARS,
};
use crate::models::VideoDetails;
use crate::services::bedrock::LanguageModel;
use crate::utils::{truncate_chars, truncate_with_ellipsis};
use anyhow::{Context, Result};
use log::error;

fn or_placeholder<'a>(text: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match text {
        Some(text) if !text.is_empty() => text,
        _ => placeholder,
    }
}

pub fn build_summary_prompt(title: &str, description: &str, transcript: Option<&str>) -> String {
    let description = or_placeholder(
        Some(truncate_chars(description, SUMMARY_DESCRIPTION_MAX_CHARS)),
        "None",
    );
    let transcript = transcript
        .filter(|t| !t.is_empty())
        .map(|t| truncate_with_ellipsis(t, SUMMARY_TRANSCRIPT_MAX_CHARS))
        .unwrap_or_else(|| "Transcript could not be retrieved".to_string());

    format!(
        "Summarize the following YouTube video in {RESPONSE_LANGUAGE}. Make the summary useful and easy to follow for viewers.

Video title: {title}

Video description: {description}

Transcript: {transcript}

Use this structure:
1. **Overview**: the main content of the video in 2-3 sentences
2. **Key points**: 3-5 important points as bullet points
3. **Target audience**: who the video is recommended for
4. **Viewing time**: a rough estimate of the time needed to watch it

Answer in natural, readable {RESPONSE_LANGUAGE}."
    )
}

pub fn build_question_prompt(
    question: &str,
    details: &VideoDetails,
    transcript: Option<&str>,
    previous_summary: Option<&str>,
) -> String {
    let description = or_placeholder(
        Some(truncate_chars(&details.description, ANSWER_DESCRIPTION_MAX_CHARS)),
        "None",
    );
    let transcript = or_placeholder(
        transcript.map(|t| truncate_chars(t, ANSWER_TRANSCRIPT_MAX_CHARS)),
        "No transcript available",
    );
    let previous_summary = or_placeholder(
        previous_summary.map(|s| truncate_chars(s, ANSWER_SUMMARY_MAX_CHARS)),
        "None",
    );

    format!(
        "You are an expert in video analysis. Answer the user's question in detail based on the information below.

Video information:
- Title: {title}
- Channel: {channel}
- Description: {description}

Transcript: {transcript}

Previous summary: {previous_summary}

User question: {question}

Give a concrete, useful answer based on the content of the video. If a transcript is available, use it. If not, answer as far as the title and description allow.

Explain clearly and politely in natural {RESPONSE_LANGUAGE}.",
        title = details.title,
        channel = details.channel,
    )
}

/// Model summary of a video. Provider failures become a readable message
/// instead of an error.
pub async fn summarize(
    model: &dyn LanguageModel,
    title: &str,
    description: &str,
    transcript: Option<&str>,
) -> String {
    let prompt = build_summary_prompt(title, description, transcript);

    match model.complete(&prompt, SUMMARY_MAX_TOKENS).await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Bedrock summarization error: {e}");
            format!("Failed to generate summary: {e}")
        }
    }
}

pub async fn answer_question(
    model: &dyn LanguageModel,
    question: &str,
    details: &VideoDetails,
    transcript: Option<&str>,
    previous_summary: Option<&str>,
) -> Result<String> {
    let prompt = build_question_prompt(question, details, transcript, previous_summary);

    let answer = model
        .complete(&prompt, ANSWER_MAX_TOKENS)
        .await
        .with_context(|| format!("answering question about video {}", details.id))?;

    Ok(answer)
}
