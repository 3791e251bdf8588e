use crate::error::ApiError;

/// Maximum text length for synthesis requests
const MAX_TEXT_LENGTH: usize = 5000;
/// Maximum length of a voice identifier
const MAX_VOICE_LENGTH: usize = 64;

/// Validate synthesis request
pub fn validate_synthesize_request(text: &str, voice: Option<&str>) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidInput("Text cannot be empty".to_string()));
    }
    if text.len() > MAX_TEXT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Text too long (max {} characters)",
            MAX_TEXT_LENGTH
        )));
    }

    if let Some(v) = voice {
        if !is_valid_voice_name(v) {
            return Err(ApiError::InvalidInput(format!(
                "Invalid voice name: {}. Expected alphanumeric with '-' or '_', max {} characters",
                v, MAX_VOICE_LENGTH
            )));
        }
    }

    Ok(())
}

/// Voice names are passed through to the remote service, so keep them to a
/// conservative charset.
fn is_valid_voice_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_VOICE_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
