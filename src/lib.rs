//! js-i18n-bundle-export
//!
//! Java の resource bundle (`.properties`) を jQuery の `$.msg(key)` プラグインとして
//! JavaScript ファイルに書き出す

pub mod bundle;
pub mod config;
pub mod error;
pub mod export;
pub mod locale;
pub mod script;

#[cfg(test)]
mod test_utils;

pub use error::ExportError;
pub use export::{
    ExportReport,
    Exporter,
    LocaleOutcome,
};
