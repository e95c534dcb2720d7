//! web2app CLI

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use web2app::dispatch::{dispatch_workflow, DispatchRequest, DEFAULT_BRANCH, DEFAULT_WORKFLOW};
use web2app::models::request::DEFAULT_PRIMARY_COLOR;
use web2app::{generate_project, AssetSource, BuildRequest, ProgressSink, Stage, WorkspaceRoot};

#[derive(Parser)]
#[command(name = "web2app")]
#[command(about = "Turn a website URL or site archive into a buildable native-shell project", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a native-shell project scaffold
    Build {
        /// Display name of the app
        #[arg(short, long)]
        name: String,

        /// Reverse-domain app identifier, e.g. com.example.app
        #[arg(short, long)]
        id: String,

        /// Remote site URL to wrap in the generated shell
        #[arg(short, long, conflicts_with = "archive")]
        url: Option<String>,

        /// Path to a ZIP archive of the site
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Splash and background color
        #[arg(short, long, default_value = DEFAULT_PRIMARY_COLOR)]
        color: String,

        /// Directory ephemeral build workspaces are created under
        #[arg(long, default_value = "temp_builds")]
        workspace_root: PathBuf,

        /// Directory the downloadable archive is written to
        #[arg(short, long, default_value = "public/downloads")]
        output: PathBuf,
    },

    /// Trigger a remote CI build of the scaffold
    Dispatch {
        /// CI access token
        #[arg(short, long)]
        token: String,

        /// Target repository as owner/name
        #[arg(short, long)]
        repo: String,

        /// Display name of the app
        #[arg(short, long)]
        name: String,

        /// Reverse-domain app identifier
        #[arg(short, long)]
        id: String,

        /// Remote site URL forwarded to the workflow
        #[arg(short, long)]
        url: Option<String>,

        /// Workflow file name
        #[arg(short, long, default_value = DEFAULT_WORKFLOW)]
        workflow: String,

        /// Branch the workflow runs against
        #[arg(short, long, default_value = DEFAULT_BRANCH)]
        branch: String,
    },
}

/// Renders real stage-completion events; no simulated percentages.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(Stage::ALL.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid progress template")
                .progress_chars("=> "),
        );
        Self { bar }
    }
}

impl ProgressSink for CliProgress {
    fn stage_started(&self, stage: Stage) {
        self.bar.set_message(stage.describe());
    }

    fn stage_completed(&self, _stage: Stage) {
        self.bar.inc(1);
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            name,
            id,
            url,
            archive,
            color,
            workspace_root,
            output,
        } => {
            println!("{}", "web2app project generator".bold().blue());
            println!("{}", "=".repeat(50).blue());
            println!();

            let source = if let Some(path) = archive {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("failed to read site archive {}", path.display()));
                match bytes {
                    Ok(bytes) => AssetSource::Archive(bytes),
                    Err(e) => {
                        eprintln!("{}", "❌ Failed to read site archive!".red().bold());
                        eprintln!("{}", format!("Error: {:#}", e).red());
                        std::process::exit(1);
                    }
                }
            } else if let Some(url) = url {
                AssetSource::Url(url)
            } else {
                AssetSource::None
            };

            let request = BuildRequest::new(name, id, source).with_primary_color(color);
            let progress = CliProgress::new();

            match generate_project(request, &WorkspaceRoot::new(workspace_root), &output, &progress) {
                Ok(artifact) => {
                    progress.bar.finish_and_clear();
                    println!("{}", "✅ Project generated successfully!".green().bold());
                    println!();
                    println!("📊 Summary:");
                    println!("  - Build ID: {}", artifact.build_id);
                    println!("  - Archive: {}", artifact.archive_path.display());
                    println!("  - Download URL: {}", artifact.public_url);
                }
                Err(e) => {
                    progress.bar.finish_and_clear();
                    eprintln!("{}", "❌ Build failed!".red().bold());
                    eprintln!("{}", format!("Error: {}", e).red());
                    std::process::exit(1);
                }
            }
        }

        Commands::Dispatch {
            token,
            repo,
            name,
            id,
            url,
            workflow,
            branch,
        } => {
            println!("{}", "Dispatching CI workflow".bold().blue());
            println!();

            let mut request = DispatchRequest::new(token, repo, name, id);
            request.workflow = workflow;
            request.branch = branch;
            request.web_url = url;

            let runtime = tokio::runtime::Runtime::new()
                .expect("failed to initialize async runtime");

            match runtime.block_on(dispatch_workflow(&request)) {
                Ok(()) => {
                    println!("{}", "✅ Workflow dispatch accepted!".green().bold());
                    println!();
                    println!("The remote build runs asynchronously; check the repository's");
                    println!("workflow runs for status.");
                }
                Err(e) => {
                    eprintln!("{}", "❌ Dispatch failed!".red().bold());
                    eprintln!("{}", format!("Error: {}", e).red());
                    std::process::exit(1);
                }
            }
        }
    }
}
