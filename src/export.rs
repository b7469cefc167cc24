//! Startup hook: resolve locales, then load, render and write each bundle.
//!
//! Failures never propagate to the caller. A missing locale list disables the
//! export, a failing locale is logged and the next one is processed.

use std::path::PathBuf;

use tracing::Dispatch;

use crate::bundle::{
    BundleStore,
    PropertiesStore,
};
use crate::config::{
    ConfigManager,
    ExportSettings,
};
use crate::error::ExportError;
use crate::locale::{
    ConfigurationError,
    LocaleSpec,
    resolve_locales,
};
use crate::script::{
    ScriptWriter,
    WriteError,
    render,
};

/// What happened to one locale.
#[derive(Debug)]
pub enum LocaleOutcome {
    /// The script was written to this path.
    Written(PathBuf),
    /// The bundle had no keys, nothing was written.
    Empty,
    /// The locale was abandoned.
    Failed(ExportError),
}

/// Summary of one export run.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Set when the locale list could not be resolved; nothing was processed.
    pub aborted: Option<ConfigurationError>,
    /// Outcome per locale, in configuration order.
    pub locales: Vec<(LocaleSpec, LocaleOutcome)>,
}

impl ExportReport {
    /// Paths of the written scripts.
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.locales.iter().filter_map(|(_, outcome)| match outcome {
            LocaleOutcome::Written(path) => Some(path),
            LocaleOutcome::Empty | LocaleOutcome::Failed(_) => None,
        })
    }

    /// Locales that were abandoned, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (&LocaleSpec, &ExportError)> {
        self.locales.iter().filter_map(|(locale, outcome)| match outcome {
            LocaleOutcome::Failed(error) => Some((locale, error)),
            LocaleOutcome::Written(_) | LocaleOutcome::Empty => None,
        })
    }

    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }
}

/// Exports every configured locale of one store into one output root.
#[derive(Debug)]
pub struct Exporter<S> {
    /// Comma separated locale list as configured.
    locales: Option<String>,
    /// Bundle base name.
    base_name: String,
    /// Source of the bundles.
    store: S,
    /// Destination of the scripts.
    writer: ScriptWriter,
    /// Log destination; `None` logs to whatever subscriber is current.
    dispatch: Option<Dispatch>,
}

impl Exporter<PropertiesStore> {
    /// Builds an exporter reading `.properties` files as configured.
    ///
    /// # Errors
    /// `WriteError::UnknownEncoding` when the configured encoding is unknown.
    pub fn from_config(config: &ConfigManager) -> Result<Self, WriteError> {
        let settings = config.get_settings();
        let writer =
            ScriptWriter::with_encoding_label(config.output_root(), settings.encoding_label())?;
        Ok(Self::new(settings, PropertiesStore::new(config.resources_dir()), writer))
    }
}

impl<S: BundleStore> Exporter<S> {
    #[must_use]
    pub fn new(settings: &ExportSettings, store: S, writer: ScriptWriter) -> Self {
        Self {
            locales: settings.locales.clone(),
            base_name: settings.base_name.clone(),
            store,
            writer,
            dispatch: None,
        }
    }

    /// Sends this exporter's logs to `dispatch` instead of the current subscriber.
    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    /// Runs the export once. Never fails; see the returned report for details.
    pub fn run(&self) -> ExportReport {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || self.run_locales()),
            None => self.run_locales(),
        }
    }

    /// Exports one locale.
    ///
    /// # Errors
    /// Bundle loading or writing errors of this locale.
    pub fn export_locale(&self, locale: &LocaleSpec) -> Result<LocaleOutcome, ExportError> {
        let bundle = self.store.load(&self.base_name, locale)?;
        tracing::debug!(keys = bundle.len(), "Loaded bundle");

        let Some(script) = render(&bundle) else {
            tracing::info!("Bundle has no keys, no file is written");
            return Ok(LocaleOutcome::Empty);
        };

        let path = self.writer.write(&script)?;
        Ok(LocaleOutcome::Written(path))
    }

    /// Body of [`Self::run`], under the configured dispatcher.
    fn run_locales(&self) -> ExportReport {
        tracing::info!("Generating the Javascript files for i18n.");

        let locales = match resolve_locales(self.locales.as_deref()) {
            Ok(locales) => locales,
            Err(error) => {
                tracing::error!("Could not deploy the Javascript files: {error}");
                return ExportReport { aborted: Some(error), locales: Vec::new() };
            }
        };

        let mut report = ExportReport::default();
        for locale in locales {
            let span = tracing::info_span!("export", locale = %locale);
            let _guard = span.enter();

            let outcome = match self.export_locale(&locale) {
                Ok(outcome) => outcome,
                Err(error) if error.is_not_found() => {
                    tracing::warn!("Skipping locale: {error}");
                    LocaleOutcome::Failed(error)
                }
                Err(error) => {
                    tracing::error!("Could not deploy the Javascript file: {error}");
                    LocaleOutcome::Failed(error)
                }
            };
            report.locales.push((locale, outcome));
        }

        tracing::info!(
            written = report.written().count(),
            failed = report.failures().count(),
            "Finished generating the Javascript files for i18n."
        );
        report
    }
}
