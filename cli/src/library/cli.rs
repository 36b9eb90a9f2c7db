use std::process::ExitCode;

use clap::{ArgAction, Parser};
use snapit_library::{Escalation, Settings, Snapper, SystemRunner};

use crate::library::{form::SnapshotForm, logging};

/// A really simple form for quickly creating on-demand Snapper snapshots.
#[derive(Parser, Debug)]
#[command(name = "snap-it", version)]
#[command(about = "Snapper Snapshot Form", long_about = None)]
pub struct Cli {
    /// Take a single snapshot with this description instead of opening the form.
    #[arg(short, long)]
    pub description: Option<String>,

    /// Print the snapshot report as JSON.
    #[arg(long, requires = "description")]
    pub json: bool,

    /// Snapper configuration to snapshot.
    #[arg(short, long)]
    pub config: Option<String>,

    /// How to gain the privileges snapper needs.
    #[arg(long, value_enum, default_value_t = Escalation::Sudo)]
    pub escalation: Escalation,

    /// Snapper binary to run.
    #[arg(long, default_value = "snapper")]
    pub snapper: String,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            escalation: self.escalation,
            snapper: self.snapper.clone(),
            config: self.config.clone(),
        }
    }
}

pub async fn run() -> anyhow::Result<ExitCode> {
    if !cfg!(unix) {
        return Err(anyhow::anyhow!(
            "This program is only supported on Unix systems"
        ));
    }

    let args = Cli::parse();

    logging::init(args.verbose);

    let snapper = Snapper::new(SystemRunner, args.settings());
    let mut form = SnapshotForm::new(snapper);

    match &args.description {
        Some(description) => form.run_once(description, args.json).await,
        None => {
            form.run().await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
