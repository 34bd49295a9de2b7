// ABOUTME: Turn-based interview session over the field schedule
// ABOUTME: Owns the draft, the transcript, and the voice/turn writer exclusion

use std::sync::Arc;

use blueprint_ai::{GenerationClient, GenerationError, ModelProfile};
use blueprint_core::{
    InterviewPrompt, MarketingStrategy, ProjectData, ProjectDraft, COMPLETE_SENTINEL,
};
use blueprint_prompts::{
    interview_question_prompt, interview_question_schema, INTERVIEW_SYSTEM_PROMPT,
};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{InterviewError, InterviewResult};
use crate::schedule::{next_field, progress, InterviewField, InterviewPhase, InterviewProgress};
use crate::voice::{voice_session_config, VoiceSessionConfig};

/// Interview lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewState {
    /// The next question is due or being fetched
    AwaitingQuestion,
    /// A question is open, waiting for user input
    AwaitingAnswer,
    /// An answer is being validated and folded
    Submitting,
    /// A secondary lookup runs before the next question
    ResearchInProgress,
    /// The draft has been finalized; the session is inert
    Complete,
}

/// Which channel may currently write into the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveWriter {
    TurnBased,
    Voice,
}

/// Immutable record of one accepted answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub field: String,
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// A question currently awaiting an answer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingQuestion {
    pub field: InterviewField,
    pub phase: InterviewPhase,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Outcome of requesting the next turn
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InterviewTurn {
    Question(PendingQuestion),
    Complete,
}

/// Read-only view of the session for status endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSnapshot {
    pub state: InterviewState,
    pub writer: ActiveWriter,
    pub progress: InterviewProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingQuestion>,
    pub draft: ProjectDraft,
}

/// One project scoping interview. Methods take `&mut self`, so a session
/// behind a lock can never interleave two transitions.
pub struct InterviewSession {
    client: Arc<GenerationClient>,
    draft: ProjectDraft,
    state: InterviewState,
    writer: ActiveWriter,
    transcript: Vec<TranscriptEntry>,
    pending: Option<PendingQuestion>,
    skipped: Vec<InterviewField>,
    marketing_task: Option<JoinHandle<Option<MarketingStrategy>>>,
    completed: Option<ProjectData>,
}

impl InterviewSession {
    pub fn new(client: Arc<GenerationClient>) -> Self {
        Self {
            client,
            draft: ProjectDraft::default(),
            state: InterviewState::AwaitingQuestion,
            writer: ActiveWriter::TurnBased,
            transcript: Vec::new(),
            pending: None,
            skipped: Vec::new(),
            marketing_task: None,
            completed: None,
        }
    }

    pub fn state(&self) -> InterviewState {
        self.state
    }

    pub fn writer(&self) -> ActiveWriter {
        self.writer
    }

    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn progress(&self) -> InterviewProgress {
        progress(&self.draft, &self.skipped)
    }

    pub fn pending_question(&self) -> Option<&PendingQuestion> {
        self.pending.as_ref()
    }

    /// Finalized project data, present once the session is complete
    pub fn completed_data(&self) -> Option<ProjectData> {
        self.completed.clone()
    }

    pub fn snapshot(&self) -> InterviewSnapshot {
        InterviewSnapshot {
            state: self.state,
            writer: self.writer,
            progress: self.progress(),
            pending: self.pending.clone(),
            draft: self.draft.clone(),
        }
    }

    /// Fetch the next question, or finish the interview when the schedule is
    /// exhausted. Re-asking while a question is open returns the open question.
    pub async fn next_question(&mut self) -> InterviewResult<InterviewTurn> {
        self.ensure_turn_writer()?;

        if self.state == InterviewState::Complete {
            return Ok(InterviewTurn::Complete);
        }
        if let Some(pending) = &self.pending {
            return Ok(InterviewTurn::Question(pending.clone()));
        }

        let Some(spec) = next_field(&self.draft, &self.skipped) else {
            return self.finish().await;
        };

        self.state = InterviewState::AwaitingQuestion;
        let field_name = spec.field.wire_name();
        debug!("Requesting question for field '{}'", field_name);

        let prompt = interview_question_prompt(
            &self.draft,
            field_name,
            spec.field.hint(),
            spec.field.option_labels(),
            spec.field.wants_suggestions(),
        );
        let reply = self
            .client
            .generate_structured::<InterviewPrompt>(
                ModelProfile::FastStructured,
                prompt,
                Some(INTERVIEW_SYSTEM_PROMPT.to_string()),
                interview_question_schema(field_name),
            )
            .await?;

        let turn = reply.data;
        if turn.current_field == COMPLETE_SENTINEL {
            // The schedule still has fields, so the sentinel is a model error
            return Err(GenerationError::Parse(format!(
                "model signaled completion while '{}' is still unanswered",
                field_name
            ))
            .into());
        }
        if turn.current_field != field_name {
            return Err(GenerationError::Parse(format!(
                "model answered for field '{}', expected '{}'",
                turn.current_field, field_name
            ))
            .into());
        }

        let pending = PendingQuestion {
            field: spec.field,
            phase: spec.phase,
            question: turn.question,
            suggestions: turn.suggestions,
        };
        self.pending = Some(pending.clone());
        self.state = InterviewState::AwaitingAnswer;
        Ok(InterviewTurn::Question(pending))
    }

    /// Validate and fold an answer for the open question. Rejected input
    /// leaves the draft untouched and the question open.
    pub async fn submit(&mut self, raw: &str) -> InterviewResult<()> {
        self.ensure_turn_writer()?;
        let pending = self.pending.clone().ok_or_else(|| {
            InterviewError::InvalidState("no question is awaiting an answer".to_string())
        })?;

        let Some(answer) = crate::normalize::clean_answer(raw) else {
            return Err(InterviewError::Validation(
                "answer must not be empty".to_string(),
            ));
        };
        let answer = answer.to_string();

        self.state = InterviewState::Submitting;
        if let Err(e) = pending.field.spec().fold(&mut self.draft, &answer) {
            self.state = InterviewState::AwaitingAnswer;
            return Err(e);
        }

        self.transcript.push(TranscriptEntry {
            field: pending.field.wire_name().to_string(),
            question: pending.question.clone(),
            answer: answer.clone(),
            suggestions: pending.suggestions.clone(),
        });
        self.pending = None;
        info!("Accepted answer for '{}'", pending.field.wire_name());

        self.maybe_trigger_marketing();
        if pending.field == InterviewField::ExistingProduct {
            self.run_rebuild_research().await;
        }

        self.state = InterviewState::AwaitingQuestion;
        Ok(())
    }

    /// Skip the open question. Only fields marked skippable may be skipped.
    pub fn skip(&mut self) -> InterviewResult<()> {
        self.ensure_turn_writer()?;
        let pending = self.pending.clone().ok_or_else(|| {
            InterviewError::InvalidState("no question is awaiting an answer".to_string())
        })?;

        if !pending.field.spec().skippable {
            return Err(InterviewError::Validation(format!(
                "'{}' is required and cannot be skipped",
                pending.field.wire_name()
            )));
        }

        self.skipped.push(pending.field);
        self.transcript.push(TranscriptEntry {
            field: pending.field.wire_name().to_string(),
            question: pending.question,
            answer: "(skipped)".to_string(),
            suggestions: None,
        });
        self.pending = None;
        self.state = InterviewState::AwaitingQuestion;
        Ok(())
    }

    /// Submit one of the open question's suggestions verbatim
    pub async fn accept_suggestion(&mut self, index: usize) -> InterviewResult<()> {
        let value = self.suggestion_at(index)?;
        self.submit(&value).await
    }

    /// Merge a suggestion into free text the user is still editing.
    /// Pure helper; nothing is submitted.
    pub fn merge_suggestion(&self, current_input: &str, index: usize) -> InterviewResult<String> {
        let value = self.suggestion_at(index)?;
        let trimmed = current_input.trim_end();
        if trimmed.is_empty() {
            Ok(value)
        } else {
            Ok(format!("{}, {}", trimmed, value))
        }
    }

    fn suggestion_at(&self, index: usize) -> InterviewResult<String> {
        self.pending
            .as_ref()
            .and_then(|p| p.suggestions.as_ref())
            .and_then(|s| s.get(index))
            .cloned()
            .ok_or_else(|| InterviewError::Validation(format!("no suggestion at index {}", index)))
    }

    /// Hand the draft to the voice channel. Turn-based methods reject until
    /// `exit_voice_mode` is called.
    pub fn enter_voice_mode(&mut self) -> InterviewResult<VoiceSessionConfig> {
        if self.state == InterviewState::Complete {
            return Err(InterviewError::InvalidState(
                "interview already complete".to_string(),
            ));
        }
        if self.writer == ActiveWriter::Voice {
            return Err(InterviewError::InvalidState(
                "voice session already active".to_string(),
            ));
        }

        self.writer = ActiveWriter::Voice;
        self.pending = None;
        self.state = InterviewState::AwaitingQuestion;
        info!("Voice writer active, turn-based interview suspended");
        Ok(voice_session_config())
    }

    /// Fold a field reported by the voice session through the same transforms
    /// a typed answer would pass
    pub async fn apply_voice_update(&mut self, field_name: &str, value: &str) -> InterviewResult<()> {
        if self.writer != ActiveWriter::Voice {
            return Err(InterviewError::InvalidState(
                "no voice session active".to_string(),
            ));
        }
        let field = InterviewField::from_wire(field_name).ok_or_else(|| {
            InterviewError::Validation(format!("unknown interview field '{}'", field_name))
        })?;
        let answer = crate::normalize::clean_answer(value)
            .ok_or_else(|| InterviewError::Validation("answer must not be empty".to_string()))?
            .to_string();

        field.spec().fold(&mut self.draft, &answer)?;
        self.transcript.push(TranscriptEntry {
            field: field.wire_name().to_string(),
            question: "(voice)".to_string(),
            answer,
            suggestions: None,
        });
        debug!("Voice update applied to '{}'", field.wire_name());

        self.maybe_trigger_marketing();
        if field == InterviewField::ExistingProduct {
            self.run_rebuild_research().await;
        }
        Ok(())
    }

    /// End the voice session; the next `next_question` call resumes against
    /// whatever fields voice filled
    pub fn exit_voice_mode(&mut self) -> InterviewResult<()> {
        if self.writer != ActiveWriter::Voice {
            return Err(InterviewError::InvalidState(
                "no voice session active".to_string(),
            ));
        }
        self.writer = ActiveWriter::TurnBased;
        self.state = InterviewState::AwaitingQuestion;
        info!("Voice session ended, resuming turn-based interview");
        Ok(())
    }

    async fn finish(&mut self) -> InterviewResult<InterviewTurn> {
        self.attach_marketing().await;

        let data = self.draft.finalize()?;
        info!(
            "Interview complete: '{}' with {} key features",
            data.title,
            data.key_features.len()
        );
        self.completed = Some(data);
        self.state = InterviewState::Complete;
        Ok(InterviewTurn::Complete)
    }

    /// Start marketing-strategy generation once description and audience
    /// exist. Runs detached; failures are logged inside the task.
    fn maybe_trigger_marketing(&mut self) {
        if self.marketing_task.is_some() || self.draft.marketing_strategy.is_some() {
            return;
        }
        if self.draft.description.is_none() || self.draft.target_audience.is_none() {
            return;
        }

        info!("Marketing prerequisites met, generating strategy in the background");
        let client = Arc::clone(&self.client);
        let draft = self.draft.clone();
        self.marketing_task = Some(tokio::spawn(async move {
            match blueprint_analyzers::marketing_strategy(&client, &draft).await {
                Ok(strategy) => Some(strategy),
                Err(e) => {
                    warn!("Marketing strategy generation failed: {}", e);
                    None
                }
            }
        }));
    }

    async fn attach_marketing(&mut self) {
        if let Some(handle) = self.marketing_task.take() {
            match handle.await {
                Ok(Some(strategy)) => {
                    info!("Attaching marketing strategy");
                    self.draft.marketing_strategy = Some(strategy);
                }
                Ok(None) => {} // failure already logged inside the task
                Err(e) => warn!("Marketing task did not finish: {}", e),
            }
        }
    }

    /// Secondary lookup after `existingProduct` is answered. Failure is
    /// logged and the interview continues without the analysis.
    async fn run_rebuild_research(&mut self) {
        let Some(product) = self.draft.existing_product.clone() else {
            return;
        };

        self.state = InterviewState::ResearchInProgress;
        info!("Analyzing existing product '{}'", product);
        match blueprint_analyzers::analyze_existing_product(&self.client, &product).await {
            Ok(analysis) => self.draft.rebuild_analysis = Some(analysis),
            Err(e) => warn!("Rebuild analysis failed, continuing without it: {}", e),
        }
        self.state = InterviewState::AwaitingQuestion;
    }

    fn ensure_turn_writer(&self) -> InterviewResult<()> {
        if self.writer == ActiveWriter::Voice {
            return Err(InterviewError::Validation(
                "a voice session is active; end it before continuing in text".to_string(),
            ));
        }
        Ok(())
    }
}
