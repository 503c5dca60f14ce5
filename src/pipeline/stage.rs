//! Submission pipeline stages.

/// Stages of one upload submission.
///
/// ```text
/// Waiting ──submit──▶ Converting ──audio ready──▶ Uploading
///   ──item created──▶ Generating ──transcription requested──▶ Success
/// ```
///
/// A stage value is owned by one in-flight submission. It advances strictly
/// forward and never regresses; a new submission starts over at `Waiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Waiting,
    Converting,
    Uploading,
    Generating,
    Success,
}

impl Stage {
    /// The stage that follows this one, or `None` once the sequence is done.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Waiting => Some(Stage::Converting),
            Stage::Converting => Some(Stage::Uploading),
            Stage::Uploading => Some(Stage::Generating),
            Stage::Generating => Some(Stage::Success),
            Stage::Success => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Success)
    }

    /// Short label for status display.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Waiting => "Waiting",
            Stage::Converting => "Converting",
            Stage::Uploading => "Uploading",
            Stage::Generating => "Generating",
            Stage::Success => "Success",
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Waiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stage_is_waiting() {
        assert_eq!(Stage::default(), Stage::Waiting);
    }

    #[test]
    fn stages_advance_in_fixed_order() {
        let mut observed = vec![Stage::Waiting];
        while let Some(next) = observed.last().unwrap().next() {
            observed.push(next);
        }

        assert_eq!(
            observed,
            vec![
                Stage::Waiting,
                Stage::Converting,
                Stage::Uploading,
                Stage::Generating,
                Stage::Success,
            ]
        );
    }

    #[test]
    fn success_is_the_only_terminal_stage() {
        assert!(Stage::Success.is_terminal());
        assert!(Stage::Success.next().is_none());

        for stage in [
            Stage::Waiting,
            Stage::Converting,
            Stage::Uploading,
            Stage::Generating,
        ] {
            assert!(!stage.is_terminal());
            assert!(stage.next().is_some());
        }
    }

    #[test]
    fn labels_match_stage_names() {
        assert_eq!(Stage::Waiting.label(), "Waiting");
        assert_eq!(Stage::Converting.label(), "Converting");
        assert_eq!(Stage::Uploading.label(), "Uploading");
        assert_eq!(Stage::Generating.label(), "Generating");
        assert_eq!(Stage::Success.label(), "Success");
    }
}
