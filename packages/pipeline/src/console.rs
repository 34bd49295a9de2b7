// ABOUTME: Command parser and executor for the in-app agent console
// ABOUTME: Read-only queries over the run register, plus a refinement delegation

use blueprint_core::{PipelineResult, ProjectData};
use serde::Serialize;

/// One parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Ls,
    Cat { file: Option<String> },
    Inspect { target: Option<String> },
    Export,
    Status,
    Clear,
    Help,
}

impl ConsoleCommand {
    /// Parse one non-empty input line. The command word is case-insensitive;
    /// `Err` carries the unrecognized word for the help hint.
    pub fn parse(input: &str) -> Result<ConsoleCommand, String> {
        let mut parts = input.split_whitespace();
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next().map(|s| s.to_string());

        match head.as_str() {
            "ls" => Ok(ConsoleCommand::Ls),
            "cat" => Ok(ConsoleCommand::Cat { file: arg }),
            "inspect" => Ok(ConsoleCommand::Inspect { target: arg }),
            "export" => Ok(ConsoleCommand::Export),
            "status" => Ok(ConsoleCommand::Status),
            "clear" => Ok(ConsoleCommand::Clear),
            "help" => Ok(ConsoleCommand::Help),
            _ => Err(head),
        }
    }
}

/// Side effect a command asks the host surface to perform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConsoleEffect {
    /// Clear the scrollback
    Clear,
    /// Hand the master prompt to the user
    ExportMasterPrompt { master_prompt: String },
    /// Route the target into component refinement
    OpenRefinement { target: String },
}

/// Printable output of one command plus any effect for the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleOutput {
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<ConsoleEffect>,
}

impl ConsoleOutput {
    fn print(lines: Vec<String>) -> Self {
        Self {
            lines,
            effect: None,
        }
    }

    fn with_effect(lines: Vec<String>, effect: ConsoleEffect) -> Self {
        Self {
            lines,
            effect: Some(effect),
        }
    }
}

/// Execute one console input line against the current run.
/// Every command is a read-only query; `inspect` additionally returns a
/// delegation the caller routes into component refinement.
pub fn run_command(input: &str, project: &ProjectData, result: &PipelineResult) -> ConsoleOutput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ConsoleOutput::print(Vec::new());
    }
    match ConsoleCommand::parse(trimmed) {
        Ok(command) => execute(command, project, result),
        Err(unknown) => ConsoleOutput::print(vec![format!(
            "Unknown command: {}. Type \"help\".",
            unknown
        )]),
    }
}

fn execute(command: ConsoleCommand, project: &ProjectData, result: &PipelineResult) -> ConsoleOutput {
    let files = result
        .stage3
        .as_ref()
        .map(|bundle| bundle.workspace_files.as_slice())
        .unwrap_or_default();

    match command {
        ConsoleCommand::Help => ConsoleOutput::print(vec![
            "Available commands:".to_string(),
            "  ls              - List workspace files".to_string(),
            "  cat [file]      - Print file content".to_string(),
            "  inspect [file]  - Start a refinement analysis".to_string(),
            "  export          - Copy the master prompt".to_string(),
            "  status          - Show project metadata".to_string(),
            "  clear           - Clear the terminal".to_string(),
        ]),
        ConsoleCommand::Ls => {
            let mut lines = vec!["Workspace Files:".to_string()];
            lines.extend(
                files
                    .iter()
                    .map(|f| format!("  {} ({})", f.name, f.language)),
            );
            ConsoleOutput::print(lines)
        }
        ConsoleCommand::Cat { file } => {
            let Some(name) = file else {
                return ConsoleOutput::print(vec![
                    "Error: name a file (try \"ls\").".to_string()
                ]);
            };
            match files.iter().find(|f| f.name.eq_ignore_ascii_case(&name)) {
                Some(file) => ConsoleOutput::print(vec![
                    format!("--- {} ---", file.name),
                    file.content.clone(),
                    "------------------".to_string(),
                ]),
                None => ConsoleOutput::print(vec![format!(
                    "Error: file \"{}\" not found.",
                    name
                )]),
            }
        }
        ConsoleCommand::Inspect { target } => match target {
            Some(target) => ConsoleOutput::with_effect(
                vec![format!("Inspector for \"{}\" started...", target)],
                ConsoleEffect::OpenRefinement {
                    target: format!("CLI Inspect: {}", target),
                },
            ),
            None => ConsoleOutput::print(vec![
                "Error: name a target (e.g. inspect .cursorrules).".to_string(),
            ]),
        },
        ConsoleCommand::Export => match &result.stage3 {
            Some(bundle) => ConsoleOutput::with_effect(
                vec!["SUCCESS: master prompt copied to the export buffer.".to_string()],
                ConsoleEffect::ExportMasterPrompt {
                    master_prompt: bundle.master_prompt.clone(),
                },
            ),
            None => ConsoleOutput::print(vec![
                "Error: no master prompt yet; run the pipeline first.".to_string(),
            ]),
        },
        ConsoleCommand::Status => ConsoleOutput::print(vec![
            format!("Project: {}", project.title),
            format!("Scope: {}", project.project_scope),
            format!("Complexity: {}", project.complexity),
            format!("IDE: {}", project.ide),
            format!("Model: {}", project.preferred_model),
        ]),
        ConsoleCommand::Clear => ConsoleOutput::with_effect(Vec::new(), ConsoleEffect::Clear),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::{
        Complexity, HostingTarget, IdePreference, ModelPreference, ProjectScope, RepoPlan,
        SecurityLevel, TestStrategy, WorkspaceBundle, WorkspaceFile,
    };
    use pretty_assertions::assert_eq;

    fn project() -> ProjectData {
        ProjectData {
            title: "TaskFlow".to_string(),
            description: "Kanban board for freelancers".to_string(),
            target_audience: "Freelancers".to_string(),
            key_features: vec!["auth".to_string(), "kanban".to_string()],
            project_scope: ProjectScope::Mvp,
            complexity: Complexity::Interactive,
            ide: IdePreference::Cursor,
            preferred_model: ModelPreference::ClaudeSonnet,
            github_repo: RepoPlan::CreateNew,
            hosting_deployment: HostingTarget::Vercel,
            test_strategy: TestStrategy::IntegrationFocus,
            security_level: SecurityLevel::Standard,
            ecosystem_preference: None,
            is_rebuild: false,
            existing_product: None,
            marketing_strategy: None,
            estimation: None,
            rebuild_analysis: None,
        }
    }

    fn completed() -> PipelineResult {
        PipelineResult {
            stage3: Some(WorkspaceBundle {
                master_prompt: "# Build TaskFlow".to_string(),
                workspace_files: vec![
                    WorkspaceFile {
                        name: ".cursorrules".to_string(),
                        content: "Always write tests.".to_string(),
                        description: "Agent rules".to_string(),
                        language: "markdown".to_string(),
                    },
                    WorkspaceFile {
                        name: "ARCHITECTURE.md".to_string(),
                        content: "Three layers.".to_string(),
                        description: "Architecture notes".to_string(),
                        language: "markdown".to_string(),
                    },
                ],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn command_words_parse_case_insensitively() {
        assert_eq!(ConsoleCommand::parse("ls"), Ok(ConsoleCommand::Ls));
        assert_eq!(ConsoleCommand::parse("LS"), Ok(ConsoleCommand::Ls));
        assert_eq!(
            ConsoleCommand::parse("cat README.md"),
            Ok(ConsoleCommand::Cat {
                file: Some("README.md".to_string())
            })
        );
        assert_eq!(
            ConsoleCommand::parse("inspect"),
            Ok(ConsoleCommand::Inspect { target: None })
        );
        assert_eq!(ConsoleCommand::parse("deploy"), Err("deploy".to_string()));
    }

    #[test]
    fn unknown_command_points_at_help() {
        let output = run_command("deploy now", &project(), &completed());
        assert_eq!(
            output.lines,
            vec!["Unknown command: deploy. Type \"help\".".to_string()]
        );
        assert!(output.effect.is_none());
    }

    #[test]
    fn ls_lists_workspace_files_with_languages() {
        let output = run_command("ls", &project(), &completed());
        assert_eq!(output.lines[0], "Workspace Files:");
        assert!(output.lines.contains(&"  .cursorrules (markdown)".to_string()));
        assert!(output.lines.contains(&"  ARCHITECTURE.md (markdown)".to_string()));
    }

    #[test]
    fn cat_prints_the_file_or_an_error() {
        let output = run_command("cat architecture.md", &project(), &completed());
        assert_eq!(output.lines[0], "--- ARCHITECTURE.md ---");
        assert_eq!(output.lines[1], "Three layers.");

        let output = run_command("cat missing.txt", &project(), &completed());
        assert_eq!(
            output.lines,
            vec!["Error: file \"missing.txt\" not found.".to_string()]
        );
    }

    #[test]
    fn inspect_delegates_into_refinement() {
        let output = run_command("inspect .cursorrules", &project(), &completed());
        assert_eq!(
            output.effect,
            Some(ConsoleEffect::OpenRefinement {
                target: "CLI Inspect: .cursorrules".to_string()
            })
        );
        assert_eq!(
            output.lines,
            vec!["Inspector for \".cursorrules\" started...".to_string()]
        );

        let output = run_command("inspect", &project(), &completed());
        assert!(output.effect.is_none());
        assert!(output.lines[0].starts_with("Error: name a target"));
    }

    #[test]
    fn export_carries_the_master_prompt() {
        let output = run_command("export", &project(), &completed());
        assert_eq!(
            output.effect,
            Some(ConsoleEffect::ExportMasterPrompt {
                master_prompt: "# Build TaskFlow".to_string()
            })
        );

        let output = run_command("export", &project(), &PipelineResult::default());
        assert!(output.effect.is_none());
        assert!(output.lines[0].starts_with("Error: no master prompt yet"));
    }

    #[test]
    fn status_shows_project_metadata() {
        let output = run_command("status", &project(), &completed());
        assert_eq!(output.lines[0], "Project: TaskFlow");
        assert!(output.lines.contains(&"Scope: MVP".to_string()));
        assert!(output.lines.contains(&"IDE: Cursor".to_string()));
    }

    #[test]
    fn clear_is_an_effect_with_no_output() {
        let output = run_command("clear", &project(), &completed());
        assert!(output.lines.is_empty());
        assert_eq!(output.effect, Some(ConsoleEffect::Clear));
    }

    #[test]
    fn blank_input_produces_nothing() {
        let output = run_command("   ", &project(), &completed());
        assert!(output.lines.is_empty());
        assert!(output.effect.is_none());
    }
}
