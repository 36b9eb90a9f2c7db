use std::sync::LazyLock;

pub static VERSION: LazyLock<String> = LazyLock::new(|| env!("CARGO_PKG_VERSION").to_string());

pub const APP_TITLE: &str = "Snap-It";

pub const TAGLINE: &str =
    "A really simple GUI for quickly creating on-demand\nSnapper snapshots in OpenSUSE";

pub const PLACEHOLDER: &str = "Enter snapshot description...";

pub const BUTTON_LABEL: &str = "Take Snapshot";
