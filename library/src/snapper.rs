use std::fmt;

use chrono::{DateTime, Local};
use log::debug;
use serde::Serialize;

use crate::{
    command::{CommandOutput, CommandRunner, Invocation},
    config::Settings,
    error::{Error, Result},
    parse::{parse_snapshot_number, parse_snapshot_size, parse_subvolume, snapshot_path},
};

const SNAPSHOT_TYPE: &str = "single";

/// A snapshot description that is known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(text: &str) -> Result<Self> {
        let text = text.trim();

        if text.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Description(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Progress of a snapshot request, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Creating,
    ReadingConfig,
    MeasuringSize,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Step::Creating => "Creating snapshot...",
            Step::ReadingConfig => "Reading subvolume path...",
            Step::MeasuringSize => "Reading snapshot size...",
        };

        f.write_str(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotReport {
    pub number: String,
    pub description: String,
    pub subvolume: String,
    pub path: String,
    pub size: Option<String>,
    pub created_at: DateTime<Local>,
}

impl SnapshotReport {
    pub fn size_or_unknown(&self) -> &str {
        self.size.as_deref().unwrap_or("Unknown")
    }

    pub fn summary(&self) -> String {
        format!(
            "Snapshot #{} created successfully!\n\nSize: {}\nLocation: {}",
            self.number,
            self.size_or_unknown(),
            self.path
        )
    }
}

/// Talks to the snapper command line tool through a [`CommandRunner`].
pub struct Snapper<R> {
    runner: R,
    settings: Settings,
}

impl<R: CommandRunner> Snapper<R> {
    pub fn new(runner: R, settings: Settings) -> Self {
        Snapper { runner, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    async fn execute(&self, subcommand: &[&str]) -> Result<CommandOutput> {
        self.run_checked(self.settings.invocation(subcommand.iter().copied()))
            .await
    }

    async fn run_checked(&self, invocation: Invocation) -> Result<CommandOutput> {
        let output = self.runner.run(&invocation).await?;

        if !output.success() {
            return Err(Error::CommandFailed {
                command: invocation.to_string(),
                code: output.code,
                stderr: output.stderr,
            });
        }

        Ok(output)
    }

    /// Refreshes the escalation credentials, prompting for a password if needed.
    pub async fn authenticate(&self) -> Result<()> {
        if let Some(invocation) = self.settings.authentication() {
            debug!("Authenticating: {}", invocation);
            self.run_checked(invocation).await?;
        }

        Ok(())
    }

    /// Creates a single snapshot and returns the number snapper assigned to it.
    pub async fn create(&self, description: &Description) -> Result<String> {
        let output = self
            .execute(&[
                "create",
                "--description",
                description.as_str(),
                "--type",
                SNAPSHOT_TYPE,
                "--print-number",
            ])
            .await?;

        let number = parse_snapshot_number(&output.stdout)
            .ok_or(Error::MissingField("snapshot number"))?;
        debug!("Got snapshot number: {}", number);

        Ok(number)
    }

    pub async fn subvolume(&self) -> Result<String> {
        let output = self.execute(&["get-config"]).await?;

        let subvolume =
            parse_subvolume(&output.stdout).ok_or(Error::MissingField("subvolume path"))?;
        debug!("Found subvolume: {}", subvolume);

        Ok(subvolume)
    }

    /// Looks up the used space of a snapshot. `None` when snapper does not report one.
    pub async fn size_of(&self, number: &str) -> Result<Option<String>> {
        let output = self.execute(&["list", "-t", SNAPSHOT_TYPE]).await?;

        let size = parse_snapshot_size(&output.stdout, number);
        debug!("Got size: {:?}", size);

        Ok(size)
    }

    pub async fn take_snapshot(
        &self,
        description: &str,
        mut on_step: impl FnMut(Step),
    ) -> Result<SnapshotReport> {
        let description = Description::new(description)?;

        self.authenticate().await?;

        on_step(Step::Creating);
        let number = self.create(&description).await?;

        on_step(Step::ReadingConfig);
        let subvolume = self.subvolume().await?;
        let path = snapshot_path(&subvolume, &number);
        debug!("Snapshot path: {}", path);

        on_step(Step::MeasuringSize);
        let size = self.size_of(&number).await?;

        Ok(SnapshotReport {
            number,
            description: description.as_str().to_string(),
            subvolume,
            path,
            size,
            created_at: Local::now(),
        })
    }
}
