use std::fmt::Write;

use crate::api::{Page, Pagination, Repository};
use crate::bootstrap::AdminApp;
use crate::ui::RepoCommands;

pub fn render_repositories(page: &Page<Repository>) -> String {
    let mut out = String::new();
    if page.items.is_empty() {
        out.push_str("No repositories found\n");
        return out;
    }
    for repo in &page.items {
        let mark = if repo.enabled { "x" } else { " " };
        let _ = write!(out, "[{mark}] {:<10} {}", repo.id, repo.name);
        if let Some(desc) = repo.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(out, " - {desc}");
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{}-{} of {}",
        page.offset as usize + 1,
        page.offset as usize + page.items.len(),
        page.total_size
    );
    out
}

pub async fn run(app: &AdminApp, command: RepoCommands) -> anyhow::Result<()> {
    let (organization_id, repository_id, enabled) = match command {
        RepoCommands::List {
            organization_id,
            offset,
            limit,
            keyword,
        } => {
            let page = app
                .client
                .list_repositories(organization_id, Pagination::new(offset, limit), Some(&keyword))
                .await?;
            print!("{}", render_repositories(&page));
            return Ok(());
        }
        RepoCommands::Enable {
            organization_id,
            repository_id,
        } => (organization_id, repository_id, true),
        RepoCommands::Disable {
            organization_id,
            repository_id,
        } => (organization_id, repository_id, false),
    };
    app.client
        .set_repository_enabled(repository_id, organization_id, enabled)
        .await?;
    println!(
        "Repository {repository_id} {}",
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}
