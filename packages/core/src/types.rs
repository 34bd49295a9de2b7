// ABOUTME: Schema types for the Blueprint generation pipeline
// ABOUTME: Project data accumulator, stage outputs, analyzer results, and saved runs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::PROJECTS_VERSION;

/// Sentinel the question model emits when it believes no fields remain
pub const COMPLETE_SENTINEL: &str = "COMPLETE";

/// Case-insensitive lookup of an enum variant by its accepted spellings.
/// Exact alias matches win; otherwise a substring match is accepted only
/// when it is unambiguous.
fn match_label<T: Copy>(input: &str, table: &[(T, &[&str])]) -> Option<T> {
    let needle = input.trim();
    if needle.is_empty() {
        return None;
    }
    for (variant, aliases) in table {
        if aliases.iter().any(|a| a.eq_ignore_ascii_case(needle)) {
            return Some(*variant);
        }
    }
    let lowered = needle.to_lowercase();
    let mut found = None;
    for (variant, aliases) in table {
        if aliases.iter().any(|a| a.contains(lowered.as_str())) {
            if found.is_some() {
                return None;
            }
            found = Some(*variant);
        }
    }
    found
}

/// Delivery scope the user is aiming for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectScope {
    Prototype,
    Mvp,
    FullScale,
    Enterprise,
}

const PROJECT_SCOPE_ALIASES: &[(ProjectScope, &[&str])] = &[
    (ProjectScope::Prototype, &["prototype", "prototyp"]),
    (ProjectScope::Mvp, &["mvp"]),
    (
        ProjectScope::FullScale,
        &["full-scale app", "full-scale", "full scale"],
    ),
    (ProjectScope::Enterprise, &["enterprise system", "enterprise"]),
];

impl ProjectScope {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, PROJECT_SCOPE_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &["Prototype", "MVP", "Full-Scale App", "Enterprise System"]
    }
}

impl fmt::Display for ProjectScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectScope::Prototype => "Prototype",
            ProjectScope::Mvp => "MVP",
            ProjectScope::FullScale => "Full-Scale App",
            ProjectScope::Enterprise => "Enterprise System",
        };
        write!(f, "{}", label)
    }
}

/// Overall implementation complexity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Basic,
    Interactive,
    Advanced,
}

const COMPLEXITY_ALIASES: &[(Complexity, &[&str])] = &[
    (Complexity::Basic, &["basic", "simple", "crud", "einfach"]),
    (
        Complexity::Interactive,
        &["interactive", "medium", "mittelschwer"],
    ),
    (
        Complexity::Advanced,
        &["advanced", "complex", "realtime", "real-time", "hoch"],
    ),
];

impl Complexity {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, COMPLEXITY_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &["Basic (CRUD)", "Interactive", "Advanced (AI/Realtime)"]
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Complexity::Basic => "Basic (CRUD)",
            Complexity::Interactive => "Interactive",
            Complexity::Advanced => "Advanced (AI/Realtime)",
        };
        write!(f, "{}", label)
    }
}

/// Editor/agent environment the generated prompts should target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdePreference {
    Cursor,
    Windsurf,
    VsCodeCopilot,
    VsCodeCline,
    Other,
}

const IDE_ALIASES: &[(IdePreference, &[&str])] = &[
    (IdePreference::Cursor, &["cursor"]),
    (IdePreference::Windsurf, &["windsurf"]),
    (
        IdePreference::VsCodeCopilot,
        &["vs code + copilot", "vscode copilot", "copilot"],
    ),
    (
        IdePreference::VsCodeCline,
        &["vs code + cline", "vscode cline", "cline", "pear"],
    ),
    (IdePreference::Other, &["other", "andere"]),
];

impl IdePreference {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, IDE_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &[
            "Cursor",
            "Windsurf",
            "VS Code + Copilot",
            "VS Code + Cline",
            "Other",
        ]
    }
}

impl fmt::Display for IdePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IdePreference::Cursor => "Cursor",
            IdePreference::Windsurf => "Windsurf",
            IdePreference::VsCodeCopilot => "VS Code + Copilot",
            IdePreference::VsCodeCline => "VS Code + Cline",
            IdePreference::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Coding model the user plans to drive the build with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelPreference {
    ClaudeSonnet,
    Gpt4o,
    GeminiPro,
    Other,
}

const MODEL_ALIASES: &[(ModelPreference, &[&str])] = &[
    (
        ModelPreference::ClaudeSonnet,
        &["claude 3.5 sonnet", "claude", "sonnet"],
    ),
    (ModelPreference::Gpt4o, &["gpt-4o", "gpt4o", "gpt"]),
    (ModelPreference::GeminiPro, &["gemini 3 pro", "gemini"]),
    (ModelPreference::Other, &["other", "andere"]),
];

impl ModelPreference {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, MODEL_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &["Claude 3.5 Sonnet", "GPT-4o", "Gemini 3 Pro", "Other"]
    }
}

impl fmt::Display for ModelPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModelPreference::ClaudeSonnet => "Claude 3.5 Sonnet",
            ModelPreference::Gpt4o => "GPT-4o",
            ModelPreference::GeminiPro => "Gemini 3 Pro",
            ModelPreference::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Whether a repository already exists for the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepoPlan {
    Existing,
    CreateNew,
    NotNeeded,
}

const REPO_ALIASES: &[(RepoPlan, &[&str])] = &[
    (RepoPlan::Existing, &["existing", "bestehend"]),
    (
        RepoPlan::CreateNew,
        &["create new", "new", "neu erstellen", "neu"],
    ),
    (
        RepoPlan::NotNeeded,
        &["not needed", "none", "nicht benötigt"],
    ),
];

impl RepoPlan {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, REPO_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &["Existing", "Create New", "Not Needed"]
    }
}

impl fmt::Display for RepoPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepoPlan::Existing => "Existing",
            RepoPlan::CreateNew => "Create New",
            RepoPlan::NotNeeded => "Not Needed",
        };
        write!(f, "{}", label)
    }
}

/// Hosting / deployment target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostingTarget {
    Vercel,
    Render,
    GoogleCloud,
    Aws,
    Hetzner,
    Other,
}

const HOSTING_ALIASES: &[(HostingTarget, &[&str])] = &[
    (HostingTarget::Vercel, &["vercel"]),
    (HostingTarget::Render, &["render"]),
    (HostingTarget::GoogleCloud, &["google cloud", "gcp"]),
    (HostingTarget::Aws, &["aws"]),
    (HostingTarget::Hetzner, &["hetzner"]),
    (HostingTarget::Other, &["other", "andere"]),
];

impl HostingTarget {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, HOSTING_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &["Vercel", "Render", "Google Cloud", "AWS", "Hetzner", "Other"]
    }
}

impl fmt::Display for HostingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HostingTarget::Vercel => "Vercel",
            HostingTarget::Render => "Render",
            HostingTarget::GoogleCloud => "Google Cloud",
            HostingTarget::Aws => "AWS",
            HostingTarget::Hetzner => "Hetzner",
            HostingTarget::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Testing posture for the generated plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestStrategy {
    Tdd,
    IntegrationFocus,
    Minimal,
    #[serde(rename = "none")]
    NoTests,
}

const TEST_ALIASES: &[(TestStrategy, &[&str])] = &[
    (TestStrategy::Tdd, &["tdd"]),
    (
        TestStrategy::IntegrationFocus,
        &["integration-focus", "integration"],
    ),
    (TestStrategy::Minimal, &["minimal"]),
    (TestStrategy::NoTests, &["none", "keine", "no tests"]),
];

impl TestStrategy {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, TEST_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &["TDD", "Integration-Focus", "Minimal", "None"]
    }
}

impl fmt::Display for TestStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestStrategy::Tdd => "TDD",
            TestStrategy::IntegrationFocus => "Integration-Focus",
            TestStrategy::Minimal => "Minimal",
            TestStrategy::NoTests => "None",
        };
        write!(f, "{}", label)
    }
}

/// Required security rigor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityLevel {
    Standard,
    High,
    Prototype,
}

const SECURITY_ALIASES: &[(SecurityLevel, &[&str])] = &[
    (SecurityLevel::Standard, &["standard"]),
    (
        SecurityLevel::High,
        &["high (fintech/medical)", "high", "fintech", "medical"],
    ),
    (SecurityLevel::Prototype, &["prototype", "prototyp"]),
];

impl SecurityLevel {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, SECURITY_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &["Standard", "High (Fintech/Medical)", "Prototype"]
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SecurityLevel::Standard => "Standard",
            SecurityLevel::High => "High (Fintech/Medical)",
            SecurityLevel::Prototype => "Prototype",
        };
        write!(f, "{}", label)
    }
}

/// Preferred vendor ecosystem for stack recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EcosystemPreference {
    GoogleFirebase,
    MicrosoftAzure,
    AwsAnthropic,
    VercelNext,
    Open,
}

const ECOSYSTEM_ALIASES: &[(EcosystemPreference, &[&str])] = &[
    (
        EcosystemPreference::GoogleFirebase,
        &["google cloud / firebase", "firebase", "google"],
    ),
    (
        EcosystemPreference::MicrosoftAzure,
        &["microsoft / azure / openai", "azure", "microsoft", "openai"],
    ),
    (
        EcosystemPreference::AwsAnthropic,
        &["aws / anthropic", "anthropic", "aws"],
    ),
    (
        EcosystemPreference::VercelNext,
        &["vercel / next.js stack", "vercel", "next.js", "nextjs"],
    ),
    (
        EcosystemPreference::Open,
        &["open (best-of-breed)", "open", "best-of-breed", "offen"],
    ),
];

impl EcosystemPreference {
    pub fn parse(input: &str) -> Option<Self> {
        match_label(input, ECOSYSTEM_ALIASES)
    }

    pub fn labels() -> &'static [&'static str] {
        &[
            "Google Cloud / Firebase",
            "Microsoft / Azure / OpenAI",
            "AWS / Anthropic",
            "Vercel / Next.js Stack",
            "Open (Best-of-Breed)",
        ]
    }
}

impl fmt::Display for EcosystemPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EcosystemPreference::GoogleFirebase => "Google Cloud / Firebase",
            EcosystemPreference::MicrosoftAzure => "Microsoft / Azure / OpenAI",
            EcosystemPreference::AwsAnthropic => "AWS / Anthropic",
            EcosystemPreference::VercelNext => "Vercel / Next.js Stack",
            EcosystemPreference::Open => "Open (Best-of-Breed)",
        };
        write!(f, "{}", label)
    }
}

/// Fully-scoped project description produced by the interview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub title: String,
    pub description: String,
    pub target_audience: String,
    pub key_features: Vec<String>,
    pub project_scope: ProjectScope,
    pub complexity: Complexity,
    pub ide: IdePreference,
    pub preferred_model: ModelPreference,
    pub github_repo: RepoPlan,
    pub hosting_deployment: HostingTarget,
    pub test_strategy: TestStrategy,
    pub security_level: SecurityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecosystem_preference: Option<EcosystemPreference>,
    #[serde(default)]
    pub is_rebuild: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_strategy: Option<MarketingStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation: Option<Estimation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebuild_analysis: Option<RebuildAnalysis>,
}

/// Partial project description the interview accumulates one field at a time.
/// `finalize` succeeds only when every required field has been answered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub key_features: Option<Vec<String>>,
    pub project_scope: Option<ProjectScope>,
    pub complexity: Option<Complexity>,
    pub ide: Option<IdePreference>,
    pub preferred_model: Option<ModelPreference>,
    pub github_repo: Option<RepoPlan>,
    pub hosting_deployment: Option<HostingTarget>,
    pub test_strategy: Option<TestStrategy>,
    pub security_level: Option<SecurityLevel>,
    pub ecosystem_preference: Option<EcosystemPreference>,
    pub is_rebuild: Option<bool>,
    pub existing_product: Option<String>,
    pub marketing_strategy: Option<MarketingStrategy>,
    pub estimation: Option<Estimation>,
    pub rebuild_analysis: Option<RebuildAnalysis>,
}

/// Raised by `ProjectDraft::finalize` when a required field is still unanswered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required interview field: {field}")]
pub struct FinalizeError {
    pub field: &'static str,
}

fn require<T: Clone>(value: &Option<T>, field: &'static str) -> Result<T, FinalizeError> {
    value.clone().ok_or(FinalizeError { field })
}

impl ProjectDraft {
    /// Convert the draft into an immutable `ProjectData`, reporting the first
    /// missing required field. Optional fields (`ecosystemPreference`,
    /// `existingProduct`) never block finalization.
    pub fn finalize(&self) -> Result<ProjectData, FinalizeError> {
        Ok(ProjectData {
            title: require(&self.title, "title")?,
            description: require(&self.description, "description")?,
            target_audience: require(&self.target_audience, "targetAudience")?,
            key_features: require(&self.key_features, "keyFeatures")?,
            project_scope: require(&self.project_scope, "projectScope")?,
            complexity: require(&self.complexity, "complexity")?,
            ide: require(&self.ide, "ide")?,
            preferred_model: require(&self.preferred_model, "preferredModel")?,
            github_repo: require(&self.github_repo, "githubRepo")?,
            hosting_deployment: require(&self.hosting_deployment, "hostingDeployment")?,
            test_strategy: require(&self.test_strategy, "testStrategy")?,
            security_level: require(&self.security_level, "securityLevel")?,
            ecosystem_preference: self.ecosystem_preference,
            is_rebuild: require(&self.is_rebuild, "isRebuild")?,
            existing_product: self.existing_product.clone(),
            marketing_strategy: self.marketing_strategy.clone(),
            estimation: self.estimation.clone(),
            rebuild_analysis: self.rebuild_analysis.clone(),
        })
    }
}

/// Next question to put to the user, as produced by the question model.
/// `current_field` is the wire name of a draft field, or `COMPLETE`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPrompt {
    pub current_field: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// One entity extracted from the project idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityModel {
    pub name: String,
    pub description: String,
    pub properties: Vec<String>,
}

/// Stage-1 output: logical model of the system under design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemModel {
    pub entities: Vec<EntityModel>,
    pub relationships: Vec<String>,
    pub user_flows: Vec<String>,
    pub core_logic: String,
}

/// A recommended technology with the reasoning behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechOption {
    pub name: String,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStack {
    pub frontend: Vec<TechOption>,
    pub backend: Vec<TechOption>,
    pub database: Vec<TechOption>,
    pub additional: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoint {
    pub method: String,
    pub path: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<EndpointParameter>,
    #[serde(default)]
    pub response: String,
}

/// Operational guardrails grouped by concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guardrails {
    pub security: Vec<String>,
    pub performance: Vec<String>,
    pub reliability: Vec<String>,
}

/// Stage-2 output: concrete technical architecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalArchitecture {
    pub tech_stack: TechStack,
    pub folder_structure: String,
    pub api_endpoints: Vec<ApiEndpoint>,
    pub security_requirements: Vec<String>,
    pub guardrails: Guardrails,
}

/// One file of the generated agent workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceFile {
    pub name: String,
    pub content: String,
    pub description: String,
    pub language: String,
}

/// Stage-3 output: the master prompt plus its supporting workspace files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceBundle {
    pub master_prompt: String,
    pub workspace_files: Vec<WorkspaceFile>,
}

/// Progressively-filled container for the three stage outputs.
/// The only pipeline object that is mutated across a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage1: Option<SystemModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage2: Option<TechnicalArchitecture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage3: Option<WorkspaceBundle>,
}

impl PipelineResult {
    pub fn is_complete(&self) -> bool {
        self.stage1.is_some() && self.stage2.is_some() && self.stage3.is_some()
    }
}

/// Commercial effort estimate. All numeric fields are required; the
/// estimation call either returns a complete object or fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimation {
    pub dev_hours_min: u32,
    pub dev_hours_max: u32,
    pub estimated_tokens: u64,
    pub api_cost_usd: f64,
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

/// Go-to-market enrichment attached once audience and description exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingStrategy {
    pub positioning: String,
    pub swot: SwotAnalysis,
    pub channels: Vec<String>,
    pub monetization_ideas: Vec<String>,
}

/// Web source a grounded generation call cited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// Competitive analysis of an existing product the user wants to rebuild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuildAnalysis {
    pub features: Vec<String>,
    pub weaknesses: Vec<String>,
    pub optimizations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monetization: Option<String>,
    #[serde(default)]
    pub sources: Vec<GroundingSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementKind {
    Modification,
    Refactor,
    Performance,
    Readability,
}

/// One improvement proposal for a selected artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementSuggestion {
    #[serde(rename = "type")]
    pub kind: RefinementKind,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

/// A completed pipeline run kept in the saved-projects list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub data: ProjectData,
    pub result: PipelineResult,
}

/// Versioned on-disk envelope for the saved-projects list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProjectsFile {
    pub version: String,
    pub projects: Vec<SavedProject>,
}

impl Default for SavedProjectsFile {
    fn default() -> Self {
        Self {
            version: PROJECTS_VERSION.to_string(),
            projects: Vec::new(),
        }
    }
}

/// Where a run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    Idle,
    Interviewing,
    Structure,
    Architecture,
    Workspace,
    Completed,
    Failed,
}

impl PipelineStage {
    /// Whether a run currently holds the register
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            PipelineStage::Structure | PipelineStage::Architecture | PipelineStage::Workspace
        )
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Interviewing => "interviewing",
            PipelineStage::Structure => "structure",
            PipelineStage::Architecture => "architecture",
            PipelineStage::Workspace => "workspace",
            PipelineStage::Completed => "completed",
            PipelineStage::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_draft() -> ProjectDraft {
        ProjectDraft {
            title: Some("TaskFlow".to_string()),
            description: Some("Kanban board for small teams".to_string()),
            target_audience: Some("Agencies".to_string()),
            key_features: Some(vec!["auth".to_string(), "kanban".to_string()]),
            project_scope: Some(ProjectScope::Mvp),
            complexity: Some(Complexity::Interactive),
            ide: Some(IdePreference::Cursor),
            preferred_model: Some(ModelPreference::ClaudeSonnet),
            github_repo: Some(RepoPlan::CreateNew),
            hosting_deployment: Some(HostingTarget::Vercel),
            test_strategy: Some(TestStrategy::IntegrationFocus),
            security_level: Some(SecurityLevel::Standard),
            is_rebuild: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn finalize_reports_first_missing_field() {
        let mut draft = full_draft();
        draft.description = None;
        let err = draft.finalize().unwrap_err();
        assert_eq!(err.field, "description");
    }

    #[test]
    fn finalize_does_not_require_optional_fields() {
        let draft = full_draft();
        let data = draft.finalize().unwrap();
        assert_eq!(data.title, "TaskFlow");
        assert!(data.ecosystem_preference.is_none());
        assert!(data.existing_product.is_none());
    }

    #[test]
    fn scope_parses_exact_and_alias() {
        assert_eq!(ProjectScope::parse("MVP"), Some(ProjectScope::Mvp));
        assert_eq!(
            ProjectScope::parse("  full scale "),
            Some(ProjectScope::FullScale)
        );
        assert_eq!(
            ProjectScope::parse("enterprise"),
            Some(ProjectScope::Enterprise)
        );
        assert_eq!(ProjectScope::parse("mainframe"), None);
    }

    #[test]
    fn ambiguous_substring_is_rejected() {
        // "vs code" prefixes two IDE options and cannot be resolved
        assert_eq!(IdePreference::parse("vs code"), None);
        assert_eq!(
            IdePreference::parse("vs code + copilot"),
            Some(IdePreference::VsCodeCopilot)
        );
    }

    #[test]
    fn project_data_serializes_camel_case() {
        let data = full_draft().finalize().unwrap();
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("targetAudience").is_some());
        assert!(value.get("keyFeatures").is_some());
        // unset enrichments are omitted entirely
        assert!(value.get("marketingStrategy").is_none());
    }

    #[test]
    fn pipeline_stage_uses_screaming_wire_names() {
        let json = serde_json::to_string(&PipelineStage::Completed).unwrap();
        assert_eq!(json, "\"COMPLETED\"");
        let back: PipelineStage = serde_json::from_str("\"FAILED\"").unwrap();
        assert_eq!(back, PipelineStage::Failed);
    }

    #[test]
    fn only_running_stages_hold_the_register() {
        assert!(PipelineStage::Structure.is_active());
        assert!(PipelineStage::Architecture.is_active());
        assert!(PipelineStage::Workspace.is_active());
        assert!(!PipelineStage::Idle.is_active());
        assert!(!PipelineStage::Completed.is_active());
        assert!(!PipelineStage::Failed.is_active());
    }
}
