mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use tasklane_core::{
    apply_fields, parse_args, FileTaskRepository, Settings, SortKey, SortOrder, SortStrategy, TaskDraft,
    TaskService, FIELD_KEYS,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tasklane")]
#[command(about = "Track tasks by priority, severity, status and due date", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.tasklane/config.toml)
    #[arg(long, env = "TASKLANE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Directory holding tasks.json (default: ~/.tasklane)
    #[arg(long, env = "TASKLANE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Acting user; every command only sees this owner's tasks
    #[arg(long, env = "TASKLANE_OWNER", global = true)]
    owner: Option<String>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task (usage: add Deploy hotfix due:2030-01-01 time:10:00 pri:High sev:Critical)
    Add {
        /// Title words followed by key:value fields
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Replace a task's fields; unspecified fields keep their current value
    Edit {
        /// Task ID or unique prefix
        id: String,
        /// New title words and/or key:value fields
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task
    Delete {
        /// Task ID or unique prefix
        id: String,
    },
    /// Show one task in full
    Show {
        /// Task ID or unique prefix
        id: String,
    },
    /// List tasks in ranked order
    List {
        /// priority, severity, status or due-date (default from config: status)
        #[arg(short, long)]
        sort: Option<SortKey>,
        /// asc or desc (default from config: asc)
        #[arg(short, long)]
        order: Option<SortOrder>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &settings.logging.level);

    let owner = cli
        .owner
        .or_else(|| settings.owner.clone())
        .filter(|o| !o.trim().is_empty())
        .ok_or_else(|| anyhow!("No owner set. Pass --owner, set TASKLANE_OWNER, or add `owner` to the config file."))?;
    let repo = FileTaskRepository::new(cli.data_dir.or_else(|| settings.data_dir.clone()))?;
    debug!(path = %repo.path().display(), owner = %owner, "opened task store");
    let service = TaskService::new(repo);

    match cli.command {
        Commands::Add { args } => {
            let parsed = parse_args(&args, &FIELD_KEYS)?;
            let mut draft = TaskDraft::new(parsed.title, "");
            warn_all(apply_fields(&mut draft, &parsed.fields)?);
            if draft.due_date.is_empty() {
                return Err(anyhow!("A due date is required (due:YYYY-MM-DD)."));
            }

            let task = service.add_task(&owner, draft, now())?;
            println!("Task added: {} (ID: {})", task.title, task.id);
            render::print_detail(&task);
        }
        Commands::Edit { id, args } => {
            let id = resolve_id(&service, &owner, &id)?;
            let current = service.get_task(&owner, &id)?;
            let parsed = parse_args(&args, &FIELD_KEYS)?;

            let mut draft = TaskDraft::from_task(&current);
            if !parsed.title.is_empty() {
                draft.title = parsed.title;
            }
            warn_all(apply_fields(&mut draft, &parsed.fields)?);

            let task = service.edit_task(&owner, &id, draft, now())?;
            println!("Task updated: {}", task.title);
            render::print_detail(&task);
        }
        Commands::Delete { id } => {
            let id = resolve_id(&service, &owner, &id)?;
            service.delete_task(&owner, &id)?;
            println!("Task deleted: {}", id);
        }
        Commands::Show { id } => {
            let id = resolve_id(&service, &owner, &id)?;
            render::print_detail(&service.get_task(&owner, &id)?);
        }
        Commands::List { sort, order, format } => {
            let strategy = SortStrategy::new(
                sort.unwrap_or(settings.list.key),
                order.unwrap_or(settings.list.order),
            );
            let tasks = service.list_tasks(&owner, strategy)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
                OutputFormat::Table => render::print_table(&tasks, now()),
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured)),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn warn_all(warnings: Vec<String>) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Accepts a full ID or a unique prefix of one of the owner's task IDs, as
/// shown in the list table.
fn resolve_id(service: &TaskService<FileTaskRepository>, owner: &str, text: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(text) {
        return Ok(id);
    }

    let needle = text.to_lowercase();
    let matches: Vec<Uuid> = service
        .list_tasks(owner, SortStrategy::default())?
        .into_iter()
        .map(|t| t.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow!("No task matches ID '{}'", text)),
        _ => Err(anyhow!("ID prefix '{}' matches {} tasks", text, matches.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_flags_parse() {
        let cli = Cli::try_parse_from(["tasklane", "--owner", "a@x.io", "list", "--sort", "due-date", "--order", "desc"]).unwrap();
        match cli.command {
            Commands::List { sort, order, .. } => {
                assert_eq!(sort, Some(SortKey::DueDate));
                assert_eq!(order, Some(SortOrder::Descending));
            }
            _ => panic!("expected list"),
        }
        assert_eq!(cli.owner.as_deref(), Some("a@x.io"));
    }

    #[test]
    fn test_add_keeps_field_args() {
        let cli = Cli::try_parse_from(["tasklane", "add", "Deploy", "hotfix", "due:2030-01-01", "pri:h"]).unwrap();
        match cli.command {
            Commands::Add { args } => assert_eq!(args, vec!["Deploy", "hotfix", "due:2030-01-01", "pri:h"]),
            _ => panic!("expected add"),
        }
    }
}
