//! Repository command handlers.

use clap::ValueEnum;
use console::Term;
use tabled::{Table, Tabled};

use warden::sync::ListState;
use warden::{Repo, RepoRequest};

use super::Session;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Output format for the list view.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

/// A repository row for display.
#[derive(Debug, Clone, serde::Serialize, Tabled)]
pub(crate) struct RepoRow {
    #[tabled(rename = "Repository")]
    #[serde(rename = "full_name")]
    pub full_name: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Language")]
    pub language: String,
}

impl RepoRow {
    fn from_repo(repo: &Repo) -> Self {
        Self {
            full_name: repo.full_name(),
            description: repo.description.clone(),
            language: repo.language.clone().unwrap_or_default(),
        }
    }
}

pub(crate) async fn handle_list(session: &Session, output: OutputFormat) -> CommandResult {
    match session.list.refresh().await {
        ListState::Loaded(items) if items.is_empty() => {
            println!("No se encontraron repositorios");
            Ok(())
        }
        ListState::Loaded(items) => {
            let rows: Vec<RepoRow> = items.iter().map(RepoRow::from_repo).collect();
            match output {
                OutputFormat::Table => println!("{}", Table::new(&rows)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            }
            Ok(())
        }
        ListState::Failed(kind) => Err(kind.user_message().into()),
        state => Err(format!("unexpected list state: {state:?}").into()),
    }
}

pub(crate) async fn handle_create(
    session: &Session,
    name: String,
    description: String,
) -> CommandResult {
    match session
        .mutations
        .submit_create(RepoRequest::new(name, description))
        .await
    {
        Ok(repo) => {
            tracing::info!(repo = %repo.full_name(), "repository created");
            println!("Repositorio creado exitosamente");
            Ok(())
        }
        Err(err) => Err(err.user_message().into()),
    }
}

pub(crate) async fn handle_update(
    session: &Session,
    owner: &str,
    name: &str,
    rename: Option<String>,
    description: String,
) -> CommandResult {
    let new_name = rename.unwrap_or_else(|| name.to_string());
    match session
        .mutations
        .submit_update(owner, name, RepoRequest::new(new_name, description))
        .await
    {
        Ok(repo) => {
            tracing::info!(repo = %repo.full_name(), "repository updated");
            println!("Repositorio actualizado exitosamente");
            Ok(())
        }
        Err(err) => Err(err.user_message().into()),
    }
}

pub(crate) async fn handle_delete(
    session: &Session,
    owner: &str,
    name: &str,
    yes: bool,
) -> CommandResult {
    if !yes && !confirm_delete(name)? {
        println!("Cancelado");
        return Ok(());
    }

    match session.mutations.submit_delete(owner, name).await {
        Ok(()) => {
            tracing::info!(repo = %format!("{owner}/{name}"), "repository deleted");
            println!("Repositorio eliminado exitosamente");
            Ok(())
        }
        Err(err) => Err(err.user_message().into()),
    }
}

/// Ask for confirmation on stderr. Accepts y/Y and s/S (sí).
fn confirm_delete(name: &str) -> std::io::Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!(
        "¿Estás seguro de que deseas eliminar el repositorio '{}'? [y/N] ",
        name
    ))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim(), "y" | "Y" | "s" | "S"))
}
