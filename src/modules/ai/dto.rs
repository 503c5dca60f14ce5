use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

fn default_temperature() -> f32 {
    0.5
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCompletionRequest {
    pub video_id: Uuid,
    /// Prompt template; the first `{transcription}` marker is replaced with
    /// the stored transcript.
    pub prompt: String,
    #[serde(default = "default_temperature")]
    #[validate(range(min = 0.0, max = 1.0, message = "temperature must be within [0, 1]"))]
    pub temperature: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(temperature: f32) -> GenerateCompletionRequest {
        GenerateCompletionRequest {
            video_id: Uuid::new_v4(),
            prompt: "Summarize: {transcription}".to_string(),
            temperature,
        }
    }

    #[test]
    fn temperature_in_range_is_valid() {
        assert!(request(0.0).validate().is_ok());
        assert!(request(0.5).validate().is_ok());
        assert!(request(1.0).validate().is_ok());
    }

    #[test]
    fn temperature_above_one_is_rejected() {
        assert!(request(1.5).validate().is_err());
    }

    #[test]
    fn temperature_below_zero_is_rejected() {
        assert!(request(-0.1).validate().is_err());
    }

    #[test]
    fn temperature_defaults_to_half() {
        let req: GenerateCompletionRequest = serde_json::from_str(&format!(
            r#"{{"videoId":"{}","prompt":"p"}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert!((req.temperature - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn malformed_video_id_fails_deserialization() {
        let result: Result<GenerateCompletionRequest, _> =
            serde_json::from_str(r#"{"videoId":"not-a-uuid","prompt":"p"}"#);
        assert!(result.is_err());
    }
}
