use std::{cell::Cell, process::ExitCode};

use console::style;
use indoc::printdoc;
use inquire::{InquireError, Text};
use log::{debug, error, info};
use snapit_library::{CommandRunner, Description, Snapper, SnapshotReport, Step};

use crate::library::{
    constant::{APP_TITLE, BUTTON_LABEL, PLACEHOLDER, TAGLINE, VERSION},
    dialog::Dialog,
    progress::StepSpinner,
    table::print_report_table,
};

const STATUS_READY: &str = "Ready";
const STATUS_SUCCESS: &str = "Snapshot created successfully";
const STATUS_ERROR: &str = "Error creating snapshot";

/// The "Take Snapshot" button. Disabled while a snapshot request is in flight.
#[derive(Debug)]
pub struct SnapButton {
    enabled: Cell<bool>,
}

impl SnapButton {
    pub fn new() -> Self {
        SnapButton {
            enabled: Cell::new(true),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Disables the button until the returned guard is dropped. `None` if already disabled.
    pub fn press(&self) -> Option<Pressed<'_>> {
        if !self.enabled.replace(false) {
            return None;
        }

        Some(Pressed { button: self })
    }
}

impl Default for SnapButton {
    fn default() -> Self {
        SnapButton::new()
    }
}

pub struct Pressed<'a> {
    button: &'a SnapButton,
}

impl Drop for Pressed<'_> {
    fn drop(&mut self) {
        self.button.enabled.set(true);
    }
}

pub struct Outcome {
    pub dialog: Dialog,
    pub report: Option<SnapshotReport>,
}

/// The window: a description field, the snapshot button and a status line.
pub struct SnapshotForm<R> {
    snapper: Snapper<R>,
    button: SnapButton,
    status: String,
}

impl<R: CommandRunner> SnapshotForm<R> {
    pub fn new(snapper: Snapper<R>) -> Self {
        SnapshotForm {
            snapper,
            button: SnapButton::new(),
            status: STATUS_READY.to_string(),
        }
    }

    pub fn button(&self) -> &SnapButton {
        &self.button
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Handles a click on the button. Returns `None` when the click was ignored.
    pub async fn submit(
        &mut self,
        description: &str,
        mut on_step: impl FnMut(Step),
    ) -> Option<Outcome> {
        if Description::new(description).is_err() {
            return Some(Outcome {
                dialog: Dialog::empty_description(),
                report: None,
            });
        }

        let Some(_pressed) = self.button.press() else {
            debug!("Ignoring click while a snapshot is being taken");
            return None;
        };

        let status = &mut self.status;
        let result = self
            .snapper
            .take_snapshot(description, |step| {
                *status = step.to_string();
                on_step(step);
            })
            .await;

        let outcome = match result {
            Ok(report) => {
                let dialog = Dialog::success(&report);
                info!("{}", dialog.message);
                self.status = STATUS_SUCCESS.to_string();

                Outcome {
                    dialog,
                    report: Some(report),
                }
            }
            Err(err) => {
                let dialog = Dialog::from_error(&err);
                error!("{}", dialog.message);
                debug!("{:?}", err);
                self.status = STATUS_ERROR.to_string();

                Outcome {
                    dialog,
                    report: None,
                }
            }
        };

        Some(outcome)
    }

    /// Submits with a spinner standing in for the status line.
    async fn submit_with_spinner(&mut self, description: &str) -> anyhow::Result<Option<Outcome>> {
        let mut spinner = StepSpinner::new()?;

        let outcome = self.submit(description, |step| spinner.show(step)).await;

        spinner.finish();

        Ok(outcome)
    }

    fn print_banner(&self) {
        printdoc!(
            "

            {} {}
            {}

            ",
            style(APP_TITLE).cyan().bold(),
            style(format!("v{}", VERSION.as_str())).dim(),
            TAGLINE,
        );
    }

    fn print_status(&self) {
        println!("{}", style(format!("[{}]", self.status)).dim());
    }

    /// Runs the form until the user closes it with Esc or Ctrl-C.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.print_banner();

        let mut draft = String::new();

        loop {
            self.print_status();

            let input = Text::new(&format!("{}:", BUTTON_LABEL))
                .with_placeholder(PLACEHOLDER)
                .with_initial_value(&draft)
                .with_help_message("enter to take the snapshot, esc to close")
                .prompt();

            let input = match input {
                Ok(input) => input,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    debug!("Form closed");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };

            let Some(outcome) = self.submit_with_spinner(&input).await? else {
                continue;
            };

            outcome.dialog.show();

            match &outcome.report {
                Some(report) => {
                    print_report_table(report);
                    draft.clear();
                }
                None => draft = input,
            }

            outcome.dialog.acknowledge()?;
        }
    }

    /// Takes a single snapshot without showing the form.
    pub async fn run_once(&mut self, description: &str, json: bool) -> anyhow::Result<ExitCode> {
        let Some(outcome) = self.submit_with_spinner(description).await? else {
            return Ok(ExitCode::FAILURE);
        };

        match (&outcome.report, json) {
            (Some(report), true) => println!("{}", serde_json::to_string_pretty(report)?),
            (Some(report), false) => {
                outcome.dialog.show();
                print_report_table(report);
            }
            (None, _) => eprintln!("{}", outcome.dialog.render()),
        }

        match outcome.report {
            Some(_) => Ok(ExitCode::SUCCESS),
            None => Ok(ExitCode::FAILURE),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use snapit_library::{CommandOutput, Invocation, Settings};

    use super::*;
    use crate::library::dialog::DialogKind;

    /// Replays canned outputs and journals every invocation alongside the
    /// steps reported to the form.
    #[derive(Default)]
    struct ScriptedRunner {
        outputs: Mutex<VecDeque<CommandOutput>>,
        journal: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        fn new(outputs: Vec<(i32, &str, &str)>) -> Self {
            let outputs = outputs
                .into_iter()
                .map(|(code, stdout, stderr)| CommandOutput {
                    code: Some(code),
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                })
                .collect();

            ScriptedRunner {
                outputs: Mutex::new(outputs),
                journal: Mutex::default(),
            }
        }

        fn record(&self, entry: String) {
            self.journal.lock().unwrap().push(entry);
        }

        fn journal(&self) -> Vec<String> {
            self.journal.lock().unwrap().clone()
        }

        fn calls(&self) -> usize {
            self.journal()
                .iter()
                .filter(|entry| entry.starts_with("run "))
                .count()
        }
    }

    impl CommandRunner for &ScriptedRunner {
        async fn run(&self, invocation: &Invocation) -> snapit_library::Result<CommandOutput> {
            self.record(format!("run {}", invocation));

            Ok(self.outputs.lock().unwrap().pop_front().unwrap_or_default())
        }
    }

    fn form(runner: &ScriptedRunner) -> SnapshotForm<&ScriptedRunner> {
        SnapshotForm::new(Snapper::new(runner, Settings::default()))
    }

    #[test]
    fn button_is_disabled_while_pressed() {
        let button = SnapButton::new();

        let pressed = button.press();
        assert!(pressed.is_some());
        assert!(!button.is_enabled());
        assert!(button.press().is_none());

        drop(pressed);
        assert!(button.is_enabled());
    }

    #[tokio::test]
    async fn empty_description_warns_without_running_snapper() {
        let runner = ScriptedRunner::default();
        let mut form = form(&runner);

        let outcome = form.submit("  ", |_| {}).await.unwrap();

        assert_eq!(outcome.dialog, Dialog::empty_description());
        assert_eq!(runner.calls(), 0);
        assert_eq!(form.status(), STATUS_READY);
        assert!(form.button().is_enabled());
    }

    #[tokio::test]
    async fn sudo_prompt_comes_before_the_first_step() {
        let runner = ScriptedRunner::new(vec![
            (0, "", ""),
            (0, "5\n", ""),
            (0, "SUBVOLUME │ /\n", ""),
            (0, "5 │ single │ root │ 1.5 MiB │ test\n", ""),
        ]);
        let mut form = form(&runner);

        form.submit("test", |step| runner.record(format!("step {}", step)))
            .await
            .unwrap();

        assert_eq!(
            runner.journal(),
            vec![
                "run sudo -v",
                "step Creating snapshot...",
                "run sudo snapper create --description test --type single --print-number",
                "step Reading subvolume path...",
                "run sudo snapper get-config",
                "step Reading snapshot size...",
                "run sudo snapper list -t single",
            ]
        );
    }

    #[tokio::test]
    async fn button_reenabled_after_success() {
        let runner = ScriptedRunner::new(vec![
            (0, "", ""),
            (0, "5\n", ""),
            (0, "SUBVOLUME │ /\n", ""),
            (0, "5 │ single │ root │ 1.5 MiB │ test\n", ""),
        ]);
        let mut form = form(&runner);
        let mut steps = Vec::new();

        let outcome = form
            .submit("test", |step| steps.push(step))
            .await
            .unwrap();

        assert_eq!(outcome.dialog.kind, DialogKind::Information);
        assert_eq!(
            outcome.dialog.message,
            "Snapshot #5 created successfully!\n\nSize: 1.5 MiB\nLocation: /.snapshots/5/snapshot"
        );
        assert_eq!(steps.len(), 3);
        assert_eq!(form.status(), STATUS_SUCCESS);
        assert!(form.button().is_enabled());
    }

    #[tokio::test]
    async fn button_reenabled_after_failure() {
        let runner = ScriptedRunner::new(vec![
            (0, "", ""),
            (1, "", "Creating snapshot failed.\n"),
        ]);
        let mut form = form(&runner);

        let outcome = form.submit("test", |_| {}).await.unwrap();

        assert!(outcome.report.is_none());
        assert_eq!(outcome.dialog.kind, DialogKind::Critical);
        assert_eq!(
            outcome.dialog.message,
            "Failed to create snapshot. Error: Creating snapshot failed.\n"
        );
        assert_eq!(runner.calls(), 2);
        assert_eq!(form.status(), STATUS_ERROR);
        assert!(form.button().is_enabled());
    }
}
