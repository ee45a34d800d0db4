mod config;
mod ftp;

use clap::Parser;
use dropsync_core::{export, import, FileStore, Outcome};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{Cli, Command, JobArgs};
use ftp::FtpConnector;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let outcome = match &cli.command {
        Command::Export(job) => {
            info!("starting dropsync export");
            let (store, connector) = setup(job)?;
            export(&store, &connector, &job.remote_dir)
        }
        Command::Import(job) => {
            info!("starting dropsync import");
            let (store, connector) = setup(job)?;
            import(&store, &connector, &job.remote_dir)
        }
    };

    match &outcome {
        Outcome::NoOp => info!("nothing to do"),
        Outcome::Completed => info!("all transfers completed"),
        Outcome::Failed(cause) => error!("run failed: {}", cause),
    }
    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn setup(job: &JobArgs) -> anyhow::Result<(FileStore, FtpConnector)> {
    info!("  store dir: {}", job.store_dir.display());
    info!("  remote: {}:{} {}", job.host, job.port, job.remote_dir);

    let store = FileStore::open(&job.store_dir);
    store.prepare()?;

    let connector = FtpConnector {
        host: job.host.clone(),
        port: job.port,
        user: job.user.clone(),
        password: job.password.clone(),
    };
    Ok((store, connector))
}
