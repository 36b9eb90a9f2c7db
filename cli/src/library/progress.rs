use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use snapit_library::Step;

/// Stands in for the status line while a snapshot request runs.
///
/// Nothing is drawn until the first [`Step`] arrives, so prompts written to the
/// terminal before that (a `sudo` password prompt) are left alone.
pub struct StepSpinner {
    style: ProgressStyle,
    bar: Option<ProgressBar>,
}

impl StepSpinner {
    pub fn new() -> anyhow::Result<Self> {
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")?.tick_strings(&[
            "▹▹▹▹▹",
            "▸▹▹▹▹",
            "▹▸▹▹▹",
            "▹▹▸▹▹",
            "▹▹▹▸▹",
            "▹▹▹▹▸",
            "▪▪▪▪▪",
        ]);

        Ok(StepSpinner { style, bar: None })
    }

    pub fn is_spinning(&self) -> bool {
        self.bar.is_some()
    }

    pub fn show(&mut self, step: Step) {
        let bar = self.bar.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();

            pb.set_style(self.style.clone());
            pb.enable_steady_tick(Duration::from_millis(100));

            pb
        });

        bar.set_message(step.to_string());
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
