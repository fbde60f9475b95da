use hoku_config::{Config, Warning};
use yansi::Paint;

/// Initializes a tracing subscriber for logging, filtered by `RUST_LOG`.
pub fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Disables terminal colors if `NO_COLOR` is set or stdout is not a terminal.
pub fn enable_paint() {
    yansi::whenever(yansi::Condition::TTY_AND_COLOR);
}

/// Prints the config's warnings to stderr.
pub fn emit_warnings(config: &Config) {
    for warning in config.warnings() {
        eprintln!("{}", format_warning(warning));
    }
}

fn format_warning(warning: &Warning) -> String {
    format!("{} {warning}", "Warning:".yellow().bold())
}

/// Loads the config from the given arguments and prints its warnings.
pub trait LoadConfig {
    /// Loads the [`Config`] and returns it.
    fn load_config_emit_warnings(&self) -> eyre::Result<Config>;
}

impl LoadConfig for crate::opts::ProjectArgs {
    fn load_config_emit_warnings(&self) -> eyre::Result<Config> {
        let config = self.load_config()?;
        emit_warnings(&config);
        Ok(config)
    }
}
