use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use uuid::Uuid;

use crate::config::default_data_dir;
use crate::error::TaskError;
use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

const DEFAULT_FILE_NAME: &str = "tasks.json";

/// All owners' tasks in one pretty-printed JSON array.
#[derive(Clone, Debug)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    /// Opens `<base_dir>/tasks.json`, creating the directory and an empty
    /// array when missing. `None` means `~/.tasklane`.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<Task>::new())?;
            writer.flush()?;
            debug!(path = %path.display(), "initialized task store");
        }

        Ok(FileTaskRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_tasks(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("failed to open {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)
            .with_context(|| format!("failed to parse {}", self.file_path.display()))?;
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn create(&self, task: Task) -> Result<Task> {
        let mut tasks = self.read_tasks()?;
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        Ok(task)
    }

    fn list(&self, owner: &str) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .read_tasks()?
            .into_iter()
            .filter(|t| t.owner == owner)
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    fn get(&self, owner: &str, id: &Uuid) -> Result<Task> {
        self.read_tasks()?
            .into_iter()
            .find(|t| t.id == *id && t.owner == owner)
            .ok_or_else(|| TaskError::NotFound { id: *id }.into())
    }

    fn update(&self, owner: &str, task: &Task) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        let pos = tasks
            .iter()
            .position(|t| t.id == task.id && t.owner == owner)
            .ok_or(TaskError::NotFound { id: task.id })?;
        // Ownership is not transferable through an edit.
        tasks[pos] = Task { owner: owner.to_string(), ..task.clone() };
        self.write_tasks(&tasks)
    }

    fn delete(&self, owner: &str, id: &Uuid) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        let initial_len = tasks.len();
        tasks.retain(|t| !(t.id == *id && t.owner == owner));

        if tasks.len() == initial_len {
            return Err(TaskError::NotFound { id: *id }.into());
        }

        self.write_tasks(&tasks)
    }
}
