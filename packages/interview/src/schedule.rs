// ABOUTME: Ordered interview field schedule with phases, answer kinds, and fold rules
// ABOUTME: Progress is derived from this table; there is no second source of truth

use std::fmt;

use blueprint_core::{
    Complexity, EcosystemPreference, HostingTarget, IdePreference, ModelPreference, ProjectDraft,
    ProjectScope, RepoPlan, SecurityLevel, TestStrategy,
};
use serde::Serialize;

use crate::error::{InterviewError, InterviewResult};
use crate::normalize::{clean_answer, parse_affirmative, split_multi_value};

/// Interview phases, used for progress display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewPhase {
    Concept,
    Features,
    Delivery,
    Tooling,
    Quality,
}

impl fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InterviewPhase::Concept => "Concept",
            InterviewPhase::Features => "Features",
            InterviewPhase::Delivery => "Delivery",
            InterviewPhase::Tooling => "Tooling",
            InterviewPhase::Quality => "Quality",
        };
        write!(f, "{}", label)
    }
}

/// How a raw answer is transformed before entering the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Text,
    MultiValue,
    Boolean,
    Choice,
}

/// Every field the interview can ask about, in no particular order here;
/// `FIELD_SCHEDULE` defines the asking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InterviewField {
    Title,
    Description,
    TargetAudience,
    KeyFeatures,
    IsRebuild,
    ExistingProduct,
    ProjectScope,
    Complexity,
    Ide,
    PreferredModel,
    GithubRepo,
    HostingDeployment,
    TestStrategy,
    SecurityLevel,
    EcosystemPreference,
}

/// One row of the schedule
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: InterviewField,
    pub phase: InterviewPhase,
    pub kind: AnswerKind,
    pub skippable: bool,
}

/// The authoritative asking order. `existingProduct` only applies to rebuilds.
pub const FIELD_SCHEDULE: &[FieldSpec] = &[
    FieldSpec {
        field: InterviewField::Title,
        phase: InterviewPhase::Concept,
        kind: AnswerKind::Text,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::Description,
        phase: InterviewPhase::Concept,
        kind: AnswerKind::Text,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::TargetAudience,
        phase: InterviewPhase::Concept,
        kind: AnswerKind::Text,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::KeyFeatures,
        phase: InterviewPhase::Features,
        kind: AnswerKind::MultiValue,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::IsRebuild,
        phase: InterviewPhase::Features,
        kind: AnswerKind::Boolean,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::ExistingProduct,
        phase: InterviewPhase::Features,
        kind: AnswerKind::Text,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::ProjectScope,
        phase: InterviewPhase::Delivery,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::Complexity,
        phase: InterviewPhase::Delivery,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::Ide,
        phase: InterviewPhase::Tooling,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::PreferredModel,
        phase: InterviewPhase::Tooling,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::GithubRepo,
        phase: InterviewPhase::Tooling,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::HostingDeployment,
        phase: InterviewPhase::Tooling,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::TestStrategy,
        phase: InterviewPhase::Quality,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::SecurityLevel,
        phase: InterviewPhase::Quality,
        kind: AnswerKind::Choice,
        skippable: false,
    },
    FieldSpec {
        field: InterviewField::EcosystemPreference,
        phase: InterviewPhase::Quality,
        kind: AnswerKind::Choice,
        skippable: true,
    },
];

impl InterviewField {
    /// JSON wire name, matching the draft's serialized field names
    pub fn wire_name(self) -> &'static str {
        match self {
            InterviewField::Title => "title",
            InterviewField::Description => "description",
            InterviewField::TargetAudience => "targetAudience",
            InterviewField::KeyFeatures => "keyFeatures",
            InterviewField::IsRebuild => "isRebuild",
            InterviewField::ExistingProduct => "existingProduct",
            InterviewField::ProjectScope => "projectScope",
            InterviewField::Complexity => "complexity",
            InterviewField::Ide => "ide",
            InterviewField::PreferredModel => "preferredModel",
            InterviewField::GithubRepo => "githubRepo",
            InterviewField::HostingDeployment => "hostingDeployment",
            InterviewField::TestStrategy => "testStrategy",
            InterviewField::SecurityLevel => "securityLevel",
            InterviewField::EcosystemPreference => "ecosystemPreference",
        }
    }

    /// Resolve a wire name back to a field (used by voice updates)
    pub fn from_wire(name: &str) -> Option<Self> {
        FIELD_SCHEDULE
            .iter()
            .map(|spec| spec.field)
            .find(|field| field.wire_name() == name)
    }

    /// Short description handed to the question model
    pub fn hint(self) -> &'static str {
        match self {
            InterviewField::Title => "a short working title for the project",
            InterviewField::Description => "what the product does, in a few sentences",
            InterviewField::TargetAudience => "who will use it",
            InterviewField::KeyFeatures => "the core features, comma-separated",
            InterviewField::IsRebuild => "whether this rebuilds an existing product",
            InterviewField::ExistingProduct => "the name or URL of the product being rebuilt",
            InterviewField::ProjectScope => "how far the first delivery should go",
            InterviewField::Complexity => "the overall implementation complexity",
            InterviewField::Ide => "the editor or agent environment for the build",
            InterviewField::PreferredModel => "the coding model that will drive the build",
            InterviewField::GithubRepo => "whether a repository exists or should be created",
            InterviewField::HostingDeployment => "where the project will be hosted",
            InterviewField::TestStrategy => "how thoroughly the build should be tested",
            InterviewField::SecurityLevel => "the required security rigor",
            InterviewField::EcosystemPreference => "a preferred vendor ecosystem, if any",
        }
    }

    /// Option labels for choice fields, shown verbatim as suggestions
    pub fn option_labels(self) -> Option<&'static [&'static str]> {
        match self {
            InterviewField::IsRebuild => Some(&["Yes", "No"]),
            InterviewField::ProjectScope => Some(ProjectScope::labels()),
            InterviewField::Complexity => Some(Complexity::labels()),
            InterviewField::Ide => Some(IdePreference::labels()),
            InterviewField::PreferredModel => Some(ModelPreference::labels()),
            InterviewField::GithubRepo => Some(RepoPlan::labels()),
            InterviewField::HostingDeployment => Some(HostingTarget::labels()),
            InterviewField::TestStrategy => Some(TestStrategy::labels()),
            InterviewField::SecurityLevel => Some(SecurityLevel::labels()),
            InterviewField::EcosystemPreference => Some(EcosystemPreference::labels()),
            _ => None,
        }
    }

    /// Whether the model should invent free-form suggestions
    pub fn wants_suggestions(self) -> bool {
        matches!(
            self,
            InterviewField::TargetAudience | InterviewField::KeyFeatures
        )
    }

    /// Whether the field participates in the schedule for this draft
    pub fn applies(self, draft: &ProjectDraft) -> bool {
        match self {
            InterviewField::ExistingProduct => draft.is_rebuild == Some(true),
            _ => true,
        }
    }

    /// Whether the draft already holds an answer for this field
    pub fn is_filled(self, draft: &ProjectDraft) -> bool {
        match self {
            InterviewField::Title => draft.title.is_some(),
            InterviewField::Description => draft.description.is_some(),
            InterviewField::TargetAudience => draft.target_audience.is_some(),
            InterviewField::KeyFeatures => draft.key_features.is_some(),
            InterviewField::IsRebuild => draft.is_rebuild.is_some(),
            InterviewField::ExistingProduct => draft.existing_product.is_some(),
            InterviewField::ProjectScope => draft.project_scope.is_some(),
            InterviewField::Complexity => draft.complexity.is_some(),
            InterviewField::Ide => draft.ide.is_some(),
            InterviewField::PreferredModel => draft.preferred_model.is_some(),
            InterviewField::GithubRepo => draft.github_repo.is_some(),
            InterviewField::HostingDeployment => draft.hosting_deployment.is_some(),
            InterviewField::TestStrategy => draft.test_strategy.is_some(),
            InterviewField::SecurityLevel => draft.security_level.is_some(),
            InterviewField::EcosystemPreference => draft.ecosystem_preference.is_some(),
        }
    }

    /// Schedule row for this field
    pub fn spec(self) -> &'static FieldSpec {
        FIELD_SCHEDULE
            .iter()
            .find(|spec| spec.field == self)
            .expect("every interview field has a schedule row")
    }
}

impl FieldSpec {
    /// Fold a cleaned answer into the draft according to the field's kind.
    /// Validation failures leave the draft untouched.
    pub fn fold(&self, draft: &mut ProjectDraft, raw: &str) -> InterviewResult<()> {
        let answer = clean_answer(raw)
            .ok_or_else(|| InterviewError::Validation("answer must not be empty".to_string()))?;

        match self.field {
            InterviewField::Title => draft.title = Some(answer.to_string()),
            InterviewField::Description => draft.description = Some(answer.to_string()),
            InterviewField::TargetAudience => draft.target_audience = Some(answer.to_string()),
            InterviewField::ExistingProduct => draft.existing_product = Some(answer.to_string()),
            InterviewField::KeyFeatures => {
                let values = split_multi_value(answer);
                if values.is_empty() {
                    return Err(InterviewError::Validation(
                        "expected at least one comma-separated value".to_string(),
                    ));
                }
                draft.key_features = Some(values);
            }
            InterviewField::IsRebuild => draft.is_rebuild = Some(parse_affirmative(answer)),
            InterviewField::ProjectScope => {
                draft.project_scope = Some(choice(ProjectScope::parse(answer), self.field)?)
            }
            InterviewField::Complexity => {
                draft.complexity = Some(choice(Complexity::parse(answer), self.field)?)
            }
            InterviewField::Ide => draft.ide = Some(choice(IdePreference::parse(answer), self.field)?),
            InterviewField::PreferredModel => {
                draft.preferred_model = Some(choice(ModelPreference::parse(answer), self.field)?)
            }
            InterviewField::GithubRepo => {
                draft.github_repo = Some(choice(RepoPlan::parse(answer), self.field)?)
            }
            InterviewField::HostingDeployment => {
                draft.hosting_deployment = Some(choice(HostingTarget::parse(answer), self.field)?)
            }
            InterviewField::TestStrategy => {
                draft.test_strategy = Some(choice(TestStrategy::parse(answer), self.field)?)
            }
            InterviewField::SecurityLevel => {
                draft.security_level = Some(choice(SecurityLevel::parse(answer), self.field)?)
            }
            InterviewField::EcosystemPreference => {
                draft.ecosystem_preference =
                    Some(choice(EcosystemPreference::parse(answer), self.field)?)
            }
        }

        Ok(())
    }
}

fn choice<T>(parsed: Option<T>, field: InterviewField) -> InterviewResult<T> {
    parsed.ok_or_else(|| {
        InterviewError::Validation(format!(
            "could not match the answer to one of the {} options: {}",
            field.wire_name(),
            field.option_labels().unwrap_or(&[]).join(", ")
        ))
    })
}

/// First unanswered, applicable, unskipped field in schedule order
pub fn next_field(draft: &ProjectDraft, skipped: &[InterviewField]) -> Option<&'static FieldSpec> {
    FIELD_SCHEDULE.iter().find(|spec| {
        spec.field.applies(draft) && !spec.field.is_filled(draft) && !skipped.contains(&spec.field)
    })
}

/// Progress derived from the schedule and the current draft
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewProgress {
    pub phase: Option<InterviewPhase>,
    pub answered: usize,
    pub total: usize,
}

pub fn progress(draft: &ProjectDraft, skipped: &[InterviewField]) -> InterviewProgress {
    let applicable: Vec<&FieldSpec> = FIELD_SCHEDULE
        .iter()
        .filter(|spec| spec.field.applies(draft))
        .collect();
    let answered = applicable
        .iter()
        .filter(|spec| spec.field.is_filled(draft) || skipped.contains(&spec.field))
        .count();

    InterviewProgress {
        phase: next_field(draft, skipped).map(|spec| spec.phase),
        answered,
        total: applicable.len(),
    }
}
