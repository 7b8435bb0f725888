use crate::config::{AppConfig, STATUS_PROBE_MAX_TOKENS};
use crate::models::BedrockStatus;
use crate::services::bedrock::LanguageModel;
use crate::utils::credential_preview;
use log::{info, warn};

/// Credential presence plus a live one-message probe of the model.
pub async fn bedrock_status(config: &AppConfig, model: &dyn LanguageModel) -> BedrockStatus {
    let mut status = BedrockStatus {
        bedrock_client_initialized: true,
        aws_region: config.aws_region.clone(),
        aws_access_key_exists: config.aws_access_key_id.is_some(),
        aws_secret_key_exists: config.aws_secret_access_key.is_some(),
        aws_access_key_preview: config.aws_access_key_id.as_deref().map(credential_preview),
        bedrock_connection: String::new(),
        test_model: None,
        bedrock_error: None,
    };

    match model.complete("Hello", STATUS_PROBE_MAX_TOKENS).await {
        Ok(_) => {
            info!("Bedrock probe succeeded with {}", model.model_id());
            status.bedrock_connection = "SUCCESS".to_string();
            status.test_model = Some(model.model_id().to_string());
        }
        Err(e) => {
            warn!("Bedrock probe failed: {e}");
            status.bedrock_connection = "FAILED".to_string();
            status.bedrock_error = Some(e.to_string());
        }
    }

    status
}
