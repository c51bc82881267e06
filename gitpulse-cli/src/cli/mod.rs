//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches to the command handlers.

mod commits;
mod repos;
mod user;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

use crate::clients::create_github_client_from_settings;
use crate::config::Settings;

/// Top-level CLI command for gitpulse
#[derive(Parser)]
#[command(name = "gitpulse")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Your GitHub profile, repositories and recent commits")]
#[command(
  long_about = "gitpulse reads your GitHub account through the REST API.\n\n\
        It shows the authenticated profile, lists your repositories, collects the\n\
        commits you pushed recently across a set of repositories, and prints\n\
        individual commits and their diffs."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Path to the configuration file
  #[arg(long, global = true, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// GitHub token (defaults to $GITHUB_TOKEN, then ~/.netrc)
  #[arg(long, global = true, value_name = "TOKEN")]
  pub token: Option<String>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for gitpulse
#[derive(Subcommand)]
pub enum Commands {
  /// Show the authenticated user
  #[command(long_about = "Print the profile of the user the token belongs to, as JSON.")]
  Whoami,

  /// List your repositories
  #[command(long_about = "List the full names of every repository visible to you.\n\n\
            All pages are fetched. If a page fails, the repositories gathered so\n\
            far are printed along with a warning.")]
  Repos(repos::ReposArgs),

  /// Show one repository
  #[command(long_about = "Print the details of a repository as JSON.")]
  Repo(repos::RepoArgs),

  /// Show your recent commits
  #[command(long_about = "List the commits you authored recently, one line per commit.\n\n\
            Repositories are read from the command line, or from the `repos` list\n\
            in the [github] table of the configuration file. Repositories that\n\
            cannot be read are skipped with a warning.")]
  Commits(commits::CommitsArgs),

  /// Show one commit
  #[command(long_about = "Print the metadata of a commit as JSON.")]
  Commit(commits::CommitArgs),

  /// Show the diff of one commit
  #[command(long_about = "Print the unified diff of a commit exactly as GitHub returns it.")]
  Diff(commits::CommitArgs),
}

/// Handle the parsed command line
pub fn handle_cli(cli: Cli) -> Result<()> {
  let settings = Settings::load_from(cli.config.as_deref())?;
  let client = create_github_client_from_settings(&settings.github, cli.token.as_deref())?;

  match cli.command {
    Commands::Whoami => user::handle_whoami_command(&client),
    Commands::Repos(args) => repos::handle_repos_command(&client, &args),
    Commands::Repo(args) => repos::handle_repo_command(&client, &args),
    Commands::Commits(args) => commits::handle_commits_command(&client, &settings.github, &args),
    Commands::Commit(args) => commits::handle_commit_command(&client, &args),
    Commands::Diff(args) => commits::handle_diff_command(&client, &args),
  }
}
