// ABOUTME: JSON file repository for saved pipeline runs
// ABOUTME: Keeps the list in memory and rewrites ~/.blueprint/projects.json whole on every change

use blueprint_core::constants::{blueprint_dir, projects_file, MAX_SAVED_PROJECTS};
use blueprint_core::{SavedProject, SavedProjectsFile};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::error::{StorageError, StorageResult};

/// Ensures the .blueprint directory and projects.json file exist
pub async fn ensure_projects_file() -> StorageResult<()> {
    let blueprint_path = blueprint_dir();
    let projects_path = projects_file();

    // Create .blueprint directory if it doesn't exist
    if !blueprint_path.exists() {
        debug!("Creating Blueprint directory: {:?}", blueprint_path);
        fs::create_dir_all(&blueprint_path).await?;
    }

    // Create projects.json if it doesn't exist
    if !projects_path.exists() {
        debug!("Creating projects.json file: {:?}", projects_path);
        let default_file = SavedProjectsFile::default();
        let json_content = serde_json::to_string_pretty(&default_file)?;
        fs::write(&projects_path, json_content).await?;
    }

    Ok(())
}

/// Reads the saved-projects file from disk
pub async fn read_projects_file() -> StorageResult<SavedProjectsFile> {
    ensure_projects_file().await?;

    let projects_path = projects_file();
    debug!("Reading saved projects from: {:?}", projects_path);

    match fs::read_to_string(&projects_path).await {
        Ok(content) => match serde_json::from_str::<SavedProjectsFile>(&content) {
            Ok(file) => {
                debug!("Successfully loaded {} saved projects", file.projects.len());
                Ok(file)
            }
            Err(e) => {
                error!("Failed to parse projects.json: {}", e);
                warn!("Starting with an empty saved-projects list");
                Ok(SavedProjectsFile::default())
            }
        },
        Err(e) => {
            error!("Failed to read projects.json: {}", e);
            warn!("Starting with an empty saved-projects list");
            Ok(SavedProjectsFile::default())
        }
    }
}

/// Writes the saved-projects file to disk
pub async fn write_projects_file(file: &SavedProjectsFile) -> StorageResult<()> {
    ensure_projects_file().await?;

    let projects_path = projects_file();
    debug!("Writing saved projects to: {:?}", projects_path);

    let json_content = serde_json::to_string_pretty(file)?;
    fs::write(&projects_path, json_content).await?;

    debug!(
        "Successfully wrote {} saved projects to disk",
        file.projects.len()
    );
    Ok(())
}

/// In-memory view over the saved-projects list, flushed whole on every write.
/// Ordering invariant: newest first by timestamp.
pub struct ProjectRepository {
    projects: RwLock<Vec<SavedProject>>,
}

impl ProjectRepository {
    /// Load the repository from disk, creating an empty file when none exists
    pub async fn load() -> StorageResult<Self> {
        let file = read_projects_file().await?;
        let mut projects = file.projects;
        projects.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        info!("Loaded {} saved projects", projects.len());
        Ok(Self {
            projects: RwLock::new(projects),
        })
    }

    /// Create an empty repository without touching the disk (used before any run is recorded)
    pub fn empty() -> Self {
        Self {
            projects: RwLock::new(Vec::new()),
        }
    }

    /// List saved projects, newest first
    pub async fn list(&self) -> Vec<SavedProject> {
        self.projects.read().await.clone()
    }

    /// Look up a single saved project by id
    pub async fn get(&self, id: &str) -> Option<SavedProject> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Record a completed run. Re-recording an id replaces the earlier entry;
    /// entries past the cap are evicted oldest-first.
    pub async fn record(&self, project: SavedProject) -> StorageResult<()> {
        let mut projects = self.projects.write().await;

        projects.retain(|p| p.id != project.id);
        projects.push(project);
        projects.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if projects.len() > MAX_SAVED_PROJECTS {
            let evicted = projects.len() - MAX_SAVED_PROJECTS;
            warn!(
                "Saved-project cap of {} reached, evicting {} oldest entries",
                MAX_SAVED_PROJECTS, evicted
            );
            projects.truncate(MAX_SAVED_PROJECTS);
        }

        info!("Recorded saved project ({} total)", projects.len());
        persist(&projects).await
    }

    /// Delete a saved project by id
    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        let mut projects = self.projects.write().await;

        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Err(StorageError::NotFound(id.to_string()));
        }

        info!("Deleted saved project {}", id);
        persist(&projects).await
    }
}

async fn persist(projects: &[SavedProject]) -> StorageResult<()> {
    let file = SavedProjectsFile {
        version: blueprint_core::constants::PROJECTS_VERSION.to_string(),
        projects: projects.to_vec(),
    };
    write_projects_file(&file).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::with_temp_home;
    use blueprint_core::{
        Complexity, HostingTarget, IdePreference, ModelPreference, PipelineResult, ProjectData,
        ProjectScope, RepoPlan, SecurityLevel, TestStrategy,
    };
    use chrono::{Duration, Utc};

    fn sample_data(title: &str) -> ProjectData {
        ProjectData {
            title: title.to_string(),
            description: "A task manager for small teams".to_string(),
            target_audience: "Freelancers".to_string(),
            key_features: vec!["Boards".to_string(), "Reminders".to_string()],
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

    fn sample_project(id: &str, age_minutes: i64) -> SavedProject {
        SavedProject {
            id: id.to_string(),
            timestamp: Utc::now() - Duration::minutes(age_minutes),
            data: sample_data(id),
            result: PipelineResult::default(),
        }
    }

    #[tokio::test]
    async fn test_ensure_projects_file() {
        with_temp_home(|| async {
            let result = ensure_projects_file().await;
            assert!(result.is_ok());

            assert!(blueprint_dir().exists());
            assert!(projects_file().exists());
        })
        .await;
    }

    #[tokio::test]
    async fn test_corrupt_file_falls_back_to_empty() {
        with_temp_home(|| async {
            ensure_projects_file().await.unwrap();
            fs::write(projects_file(), "not json at all").await.unwrap();

            let file = read_projects_file().await.unwrap();
            assert!(file.projects.is_empty());
        })
        .await;
    }

    #[tokio::test]
    async fn test_record_and_reload_round_trip() {
        with_temp_home(|| async {
            let repo = ProjectRepository::load().await.unwrap();
            repo.record(sample_project("alpha", 5)).await.unwrap();
            repo.record(sample_project("beta", 0)).await.unwrap();

            // Fresh load sees what the first repository wrote
            let reloaded = ProjectRepository::load().await.unwrap();
            let listed = reloaded.list().await;
            assert_eq!(listed.len(), 2);
            assert_eq!(listed[0].id, "beta");
            assert_eq!(listed[1].id, "alpha");
        })
        .await;
    }

    #[tokio::test]
    async fn test_record_dedupes_by_id() {
        with_temp_home(|| async {
            let repo = ProjectRepository::load().await.unwrap();
            repo.record(sample_project("alpha", 10)).await.unwrap();

            let mut replacement = sample_project("alpha", 0);
            replacement.data.description = "Updated description".to_string();
            repo.record(replacement).await.unwrap();

            let listed = repo.list().await;
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0].data.description, "Updated description");
        })
        .await;
    }

    #[tokio::test]
    async fn test_record_evicts_oldest_past_cap() {
        with_temp_home(|| async {
            let repo = ProjectRepository::load().await.unwrap();

            for i in 0..MAX_SAVED_PROJECTS + 1 {
                // Higher i means older
                let project = sample_project(&format!("run-{}", i), i as i64);
                repo.record(project).await.unwrap();
            }

            let listed = repo.list().await;
            assert_eq!(listed.len(), MAX_SAVED_PROJECTS);
            // The oldest entry is the one that got evicted
            assert!(!listed.iter().any(|p| p.id == format!("run-{}", MAX_SAVED_PROJECTS)));
            assert_eq!(listed[0].id, "run-0");
        })
        .await;
    }

    #[tokio::test]
    async fn test_get_and_delete() {
        with_temp_home(|| async {
            let repo = ProjectRepository::load().await.unwrap();
            repo.record(sample_project("alpha", 0)).await.unwrap();

            assert!(repo.get("alpha").await.is_some());
            assert!(repo.get("missing").await.is_none());

            repo.delete("alpha").await.unwrap();
            assert!(repo.get("alpha").await.is_none());

            let err = repo.delete("alpha").await.unwrap_err();
            assert!(matches!(err, StorageError::NotFound(_)));
        })
        .await;
    }
}
