pub mod submission;

pub use submission::{
    SubmissionPhase, SubmissionPipeline, SubmissionResult, SubmissionStatus, IN_PROGRESS_TEXT,
};
