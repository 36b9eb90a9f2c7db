use env_logger::Env;
use log::LevelFilter;

/// Installs the global logger. `RUST_LOG` wins over the verbosity flags when set.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_target(false)
        .init();
}
