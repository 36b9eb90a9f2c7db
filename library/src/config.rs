use clap::ValueEnum;

use crate::command::Invocation;

/// How privileged commands are elevated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Escalation {
    #[default]
    Sudo,
    Pkexec,
    /// Run the tool directly, e.g. when already root.
    #[value(name = "none")]
    Direct,
}

impl Escalation {
    fn program(&self) -> Option<&'static str> {
        match self {
            Escalation::Sudo => Some("sudo"),
            Escalation::Pkexec => Some("pkexec"),
            Escalation::Direct => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub escalation: Escalation,
    pub snapper: String,
    /// Snapper configuration name, `-c NAME`. The tool's default (`root`) when unset.
    pub config: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            escalation: Escalation::default(),
            snapper: "snapper".to_string(),
            config: None,
        }
    }
}

impl Settings {
    pub fn invocation<I, S>(&self, subcommand: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Vec::new();

        if let Some(config) = &self.config {
            args.push("-c".to_string());
            args.push(config.clone());
        }

        args.extend(subcommand.into_iter().map(Into::into));

        match self.escalation.program() {
            Some(program) => {
                args.insert(0, self.snapper.clone());
                Invocation::new(program, args)
            }
            None => Invocation::new(self.snapper.clone(), args),
        }
    }

    /// Credential check to run before anything draws over the terminal.
    ///
    /// `sudo` prompts on the tty, so the password is asked for up front and
    /// the cached timestamp covers the snapper calls that follow.
    pub fn authentication(&self) -> Option<Invocation> {
        match self.escalation {
            Escalation::Sudo => Some(Invocation::new("sudo", vec!["-v".to_string()])),
            Escalation::Pkexec | Escalation::Direct => None,
        }
    }
}
