use anyhow::Result;

use super::output::{Output, or_dash};
use crate::http::ApiClient;
use crate::resources::Pages;
use crate::runtime::Runtime;
use crate::validate::ProjectName;

#[derive(clap::Subcommand, Debug)]
pub enum PagesCommand {
    /// List projects
    List,

    /// Show one project
    Get { name: ProjectName },

    /// List deployments of a project
    Deployments { name: ProjectName },

    /// Delete a project
    Delete { name: ProjectName },
}

#[tracing::instrument(skip(client, output))]
pub async fn run<R: Runtime>(client: &ApiClient<R>, command: PagesCommand, output: Output) -> Result<()> {
    let pages = Pages::new(client);

    match command {
        PagesCommand::List => {
            let projects = pages.list_projects().await?;
            output.emit(&projects, |projects| {
                if projects.is_empty() {
                    println!("No projects found.");
                }
                for p in projects {
                    println!("{:<40} {}", p.name, or_dash(p.subdomain.as_deref()));
                }
            })
        }
        PagesCommand::Get { name } => {
            let project = pages.project(&name).await?;
            output.emit(&project, |p| {
                println!("Name:              {}", p.name);
                println!("Subdomain:         {}", or_dash(p.subdomain.as_deref()));
                println!(
                    "Production branch: {}",
                    or_dash(p.production_branch.as_deref())
                );
                println!("Domains:           {}", p.domains.join(", "));
            })
        }
        PagesCommand::Deployments { name } => {
            let deployments = pages.deployments(&name).await?;
            output.emit(&deployments, |deployments| {
                for d in deployments {
                    let stage = d
                        .latest_stage
                        .as_ref()
                        .map(|s| format!("{}:{}", s.name, s.status));
                    println!(
                        "{:<38} {:<11} {:<16} {}",
                        d.id,
                        or_dash(d.environment.as_deref()),
                        or_dash(stage.as_deref()),
                        or_dash(d.url.as_deref())
                    );
                }
            })
        }
        PagesCommand::Delete { name } => {
            pages.delete_project(&name).await?;
            output.done(&format!("Deleted project {}.", name))
        }
    }
}
