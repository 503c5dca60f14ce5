/// Literal marker clients put in their prompt templates.
pub const TRANSCRIPTION_MARKER: &str = "{transcription}";

/// Substitute the transcript into the template. Only the first occurrence of
/// the marker is replaced.
pub fn compose(template: &str, transcription: &str) -> String {
    template.replacen(TRANSCRIPTION_MARKER, transcription, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_marker_with_transcript() {
        let composed = compose("Summarize: {transcription}", "hello world");
        assert_eq!(composed, "Summarize: hello world");
    }

    #[test]
    fn replaces_only_the_first_occurrence() {
        let composed = compose("{transcription} / {transcription}", "hi");
        assert_eq!(composed, "hi / {transcription}");
    }

    #[test]
    fn template_without_marker_is_unchanged() {
        let composed = compose("Summarize the talk", "hello");
        assert_eq!(composed, "Summarize the talk");
    }
}
