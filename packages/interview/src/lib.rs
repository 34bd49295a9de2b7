//! # Blueprint Interview
//!
//! Turn-based project scoping interview: an explicit field schedule decides
//! what to ask, the generation client phrases the questions, and every answer
//! is normalized and folded into the project draft. A voice bridge can take
//! over the draft exclusively and hand it back.

pub mod engine;
pub mod error;
pub mod normalize;
pub mod schedule;
pub mod voice;

pub use engine::{
    ActiveWriter, InterviewSession, InterviewSnapshot, InterviewState, InterviewTurn,
    PendingQuestion, TranscriptEntry,
};
pub use error::{InterviewError, InterviewResult};
pub use normalize::{clean_answer, parse_affirmative, split_multi_value};
pub use schedule::{
    next_field, progress, AnswerKind, FieldSpec, InterviewField, InterviewPhase,
    InterviewProgress, FIELD_SCHEDULE,
};
pub use voice::{voice_session_config, VoiceSessionConfig};
