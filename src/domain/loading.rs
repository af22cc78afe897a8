/// Progress of one fetch-and-render cycle, shown in the loading view.
///
/// A fresh state starts at 0 and is advanced through [`Stage`]
/// checkpoints; progress never decreases within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingState {
    pub progress: u8,
    pub message: String,
}

impl LoadingState {
    pub fn new() -> Self {
        Self {
            progress: 0,
            message: String::new(),
        }
    }

    /// Advance to a checkpoint. Pure: the result depends only on the
    /// current state and the stage.
    pub fn advance(&self, stage: &Stage) -> Self {
        Self {
            progress: self.progress.max(stage.progress()),
            message: stage.message().to_string(),
        }
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Checkpoints of the content fetch pipeline, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Preparing,
    RequestSent,
    Processing,
    /// Response body parsed; scaled by content size.
    ContentReceived { bytes: usize },
    /// Chinese summary reformatted; scaled by summary length.
    SummaryReady { chars: usize },
    Finalizing,
    Complete,
}

impl Stage {
    pub fn progress(&self) -> u8 {
        match self {
            Stage::Preparing => 5,
            Stage::RequestSent => 10,
            Stage::Processing => 30,
            // +1% per KiB of content, capped at 60.
            Stage::ContentReceived { bytes } => 40 + (bytes / 1024).min(20) as u8,
            // +1% per 64 chars of summary, capped at 85.
            Stage::SummaryReady { chars } => 70 + (chars / 64).min(15) as u8,
            Stage::Finalizing => 95,
            Stage::Complete => 100,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Stage::Preparing => "Preparing request...",
            Stage::RequestSent => "Extracting content...",
            Stage::Processing => "Processing response...",
            Stage::ContentReceived { .. } => "Content received",
            Stage::SummaryReady { .. } => "Generating Chinese summary...",
            Stage::Finalizing => "Almost ready...",
            Stage::Complete => "Ready to display!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(LoadingState::new().progress, 0);
    }

    #[test]
    fn test_advance_sets_progress_and_message() {
        let state = LoadingState::new().advance(&Stage::Preparing);
        assert_eq!(state.progress, 5);
        assert_eq!(state.message, "Preparing request...");
    }

    #[test]
    fn test_progress_is_monotone() {
        let stages = [
            Stage::Preparing,
            Stage::RequestSent,
            Stage::Processing,
            Stage::ContentReceived { bytes: 2048 },
            Stage::SummaryReady { chars: 500 },
            Stage::Finalizing,
            Stage::Complete,
        ];
        let mut state = LoadingState::new();
        let mut last = 0;
        for stage in &stages {
            state = state.advance(stage);
            assert!(state.progress >= last, "regressed at {:?}", stage);
            last = state.progress;
        }
        assert_eq!(state.progress, 100);
    }

    #[test]
    fn test_advance_never_regresses() {
        let state = LoadingState {
            progress: 50,
            message: String::new(),
        };
        let next = state.advance(&Stage::RequestSent);
        assert_eq!(next.progress, 50);
        assert_eq!(next.message, "Extracting content...");
    }

    #[test]
    fn test_content_received_scales_with_size() {
        assert_eq!(Stage::ContentReceived { bytes: 0 }.progress(), 40);
        assert_eq!(Stage::ContentReceived { bytes: 5 * 1024 }.progress(), 45);
        assert_eq!(Stage::ContentReceived { bytes: 1024 * 1024 }.progress(), 60);
    }

    #[test]
    fn test_summary_stage_scales_with_length() {
        assert_eq!(Stage::SummaryReady { chars: 0 }.progress(), 70);
        assert_eq!(Stage::SummaryReady { chars: 320 }.progress(), 75);
        assert_eq!(Stage::SummaryReady { chars: 100_000 }.progress(), 85);
    }
}
