use console::{Term, style};
use snapit_library::{Error, SnapshotReport};
use tabled::{builder::Builder, settings::Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Information,
    Warning,
    Critical,
}

/// A framed message box. In interactive mode it blocks until acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn new(kind: DialogKind, title: &str, message: String) -> Self {
        Dialog {
            kind,
            title: title.to_string(),
            message,
        }
    }

    pub fn empty_description() -> Self {
        Dialog::new(
            DialogKind::Warning,
            "Warning",
            "Please enter a description for the snapshot.".to_string(),
        )
    }

    pub fn success(report: &SnapshotReport) -> Self {
        Dialog::new(DialogKind::Information, "Success", report.summary())
    }

    pub fn from_error(error: &Error) -> Self {
        match error {
            Error::EmptyDescription => Dialog::empty_description(),
            Error::CommandFailed { stderr, .. } => Dialog::new(
                DialogKind::Critical,
                "Error",
                format!("Failed to create snapshot. Error: {}", stderr),
            ),
            error => Dialog::new(
                DialogKind::Critical,
                "Error",
                format!("An unexpected error occurred: {}", error),
            ),
        }
    }

    pub fn render(&self) -> String {
        let title = match self.kind {
            DialogKind::Information => style(format!("✔ {}", self.title)).green().bold(),
            DialogKind::Warning => style(format!("⚠ {}", self.title)).yellow().bold(),
            DialogKind::Critical => style(format!("✘ {}", self.title)).red().bold(),
        };

        let mut builder = Builder::default();
        builder.push_record([self.message.trim_end()]);

        let mut frame = builder.build();
        frame.with(Style::rounded());

        format!("{}\n{}", title, frame)
    }

    pub fn show(&self) {
        println!("{}", self.render());
    }

    /// Waits for a key press when attached to a terminal.
    pub fn acknowledge(&self) -> anyhow::Result<()> {
        let term = Term::stdout();

        if term.is_term() {
            term.write_line(&style("Press any key to continue").dim().to_string())?;
            term.read_key()?;
            term.clear_last_lines(1)?;
        }

        Ok(())
    }
}
