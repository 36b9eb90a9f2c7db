mod library;

use std::process::ExitCode;

use library::cli::run;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    run().await
}
