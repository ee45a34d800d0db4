use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Configuration for the dropsync command-line tool.
#[derive(Parser, Debug)]
#[command(name = "dropsync")]
#[command(about = "Move staged files to and from a remote FTP drop directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload members of the store's 'new' area to the drop directory
    Export(JobArgs),
    /// Ingest drop-directory entries into the store's 'new' area
    Import(JobArgs),
}

/// Store and connection options shared by both directions.
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Base directory of the local staging store
    #[arg(long, env = "DROPSYNC_STORE_DIR")]
    pub store_dir: PathBuf,

    /// FTP server hostname
    #[arg(long, env = "DROPSYNC_HOST")]
    pub host: String,

    /// FTP server port
    #[arg(long, default_value = "21", env = "DROPSYNC_PORT")]
    pub port: u16,

    /// FTP user name
    #[arg(long, env = "DROPSYNC_USER")]
    pub user: String,

    /// FTP password
    #[arg(long, env = "DROPSYNC_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Remote drop directory
    #[arg(long, env = "DROPSYNC_REMOTE_DIR")]
    pub remote_dir: String,
}
