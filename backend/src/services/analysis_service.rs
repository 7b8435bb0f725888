use crate::config::ANALYSIS_MAX_TOKENS;
use crate::models::{RoutingDecision, SearchType};
use crate::services::bedrock::LanguageModel;
use crate::services::classifier::classify_locally;
use crate::utils::json_object_spans;
use log::{error, info, warn};
use serde::Deserialize;

/// The JSON object the model is asked to emit after its prose explanation.
#[derive(Debug, Deserialize)]
struct ModelAnalysis {
    search_type: SearchType,
    #[serde(default)]
    optimized_youtube_query: Option<String>,
    #[serde(default)]
    optimized_web_query: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

pub fn build_analysis_prompt(query: &str) -> String {
    format!(
        r#"You are an expert in search query analysis. Analyze the user's search query and propose the best search strategy.

User query: "{query}"

First, explain your analysis of this query in natural prose.
Then provide the technical result as a JSON object in exactly this format:

{{
    "search_type": "youtube" | "web" | "both",
    "optimized_youtube_query": "query optimized for YouTube",
    "optimized_web_query": "query optimized for web search",
    "reasoning": "reason for the decision"
}}

Criteria:
- Video fits best: tutorials, demonstrations, explanations, music, entertainment
- Web fits best: definitions, news, official information, price comparison
- Both fit: learning, research, comparing options"#
    )
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Read a routing decision out of a free-form model answer.
///
/// The first balanced `{...}` span that deserializes wins; the remaining prose
/// becomes `bedrock_raw_response`.
pub fn parse_model_analysis(query: &str, answer: &str) -> Option<RoutingDecision> {
    json_object_spans(answer).into_iter().find_map(|(start, end)| {
        let analysis: ModelAnalysis = serde_json::from_str(&answer[start..end]).ok()?;

        let explanation = format!("{}{}", &answer[..start], &answer[end..]);
        let explanation = explanation.trim();
        let explanation = if explanation.is_empty() {
            answer.to_string()
        } else {
            explanation.to_string()
        };

        Some(RoutingDecision {
            search_type: analysis.search_type,
            optimized_youtube_query: non_empty_or(analysis.optimized_youtube_query, query),
            optimized_web_query: non_empty_or(analysis.optimized_web_query, query),
            reasoning: analysis.reasoning.unwrap_or_default(),
            bedrock_raw_response: Some(explanation),
        })
    })
}

/// Ask the language model how to route `query`. Never fails: any provider or
/// parsing problem falls back to [`classify_locally`].
pub async fn analyze_query(model: &dyn LanguageModel, query: &str) -> RoutingDecision {
    let prompt = build_analysis_prompt(query);

    match model.complete(&prompt, ANALYSIS_MAX_TOKENS).await {
        Ok(answer) => match parse_model_analysis(query, &answer) {
            Some(decision) => {
                info!(
                    "Model analysis for {query:?}: {:?}",
                    decision.search_type
                );
                decision
            }
            None => {
                warn!("No routing JSON in model answer for {query:?}, using local analysis");
                let mut decision = classify_locally(query);
                decision.bedrock_raw_response = Some(format!(
                    "Failed to parse JSON from model output. Model answer: {answer}"
                ));
                decision
            }
        },
        Err(e) => {
            error!("Bedrock analysis error: {e}");
            let mut decision = classify_locally(query);
            decision.bedrock_raw_response = Some(format!(
                "Bedrock error: {e} (fell back to local analysis)"
            ));
            decision
        }
    }
}
