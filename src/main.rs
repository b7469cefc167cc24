//! Entry point for the bundle export command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use js_i18n_bundle_export::Exporter;
use js_i18n_bundle_export::config::{
    ConfigManager,
    SettingsOverrides,
};
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Exports Java resource bundles as `js/i18n/messages_<locale>.js` lookup scripts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Project directory holding `.js-i18n-export.json`
    #[arg(long, default_value = ".")]
    project: PathBuf,

    /// Comma separated locales, e.g. `pt,pt_BR,en,es`
    #[arg(long)]
    locales: Option<String>,

    /// Output encoding label (default: UTF-8)
    #[arg(long)]
    encoding: Option<String>,

    /// Bundle base name (default: messages)
    #[arg(long)]
    base_name: Option<String>,

    /// Directory containing the `.properties` files
    #[arg(long)]
    resources: Option<PathBuf>,

    /// Directory under which `js/i18n/` is written
    #[arg(long)]
    output_root: Option<PathBuf>,
}

impl Cli {
    /// Values that take precedence over the settings file.
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            locales: self.locales.clone(),
            encoding: self.encoding.clone(),
            base_name: self.base_name.clone(),
            resources_dir: self.resources.clone(),
            output_root: self.output_root.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let dispatch = Dispatch::new(tracing_subscriber::fmt().with_env_filter(filter).finish());

    tracing::dispatcher::with_default(&dispatch, || run(&cli, &dispatch))
}

/// Loads the settings and runs the export.
///
/// Only unusable settings fail the process; export problems are logged.
fn run(cli: &Cli, dispatch: &Dispatch) -> ExitCode {
    let mut config = ConfigManager::new();
    if let Err(error) = config.load_settings(Some(cli.project.clone())) {
        tracing::error!("{error}");
        return ExitCode::FAILURE;
    }
    if let Err(error) = config.apply_overrides(cli.overrides()) {
        tracing::error!("{error}");
        return ExitCode::FAILURE;
    }

    let exporter = match Exporter::from_config(&config) {
        Ok(exporter) => exporter.with_dispatch(dispatch.clone()),
        Err(error) => {
            tracing::error!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let report = exporter.run();
    for (locale, error) in report.failures() {
        tracing::debug!(%locale, "Not exported: {error}");
    }

    ExitCode::SUCCESS
}
