//! Persists rendered scripts under `<root>/js/i18n/`.

use std::fs::{
    self,
    File,
};
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use encoding_rs::{
    EncoderResult,
    Encoding,
    UTF_8,
};
use thiserror::Error;

use super::RenderedScript;
use crate::locale::LocaleSpec;

/// Errors raised while writing a script file.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error(
        "Could not create the destination folder of i18n javascript files {}: {source}",
        .path.display()
    )]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not remove the previous file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),
}

/// Directory holding the scripts, relative to the output root.
#[must_use]
pub fn script_dir(output_root: &Path) -> PathBuf {
    output_root.join("js").join("i18n")
}

/// `<root>/js/i18n/messages_<locale>.js`
#[must_use]
pub fn target_path(output_root: &Path, locale: &LocaleSpec) -> PathBuf {
    script_dir(output_root).join(format!("messages_{locale}.js"))
}

/// Writes scripts below one output root in one encoding.
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    /// Root the `js/i18n` tree is created under.
    output_root: PathBuf,
    /// Encoding of the written files.
    encoding: &'static Encoding,
}

impl ScriptWriter {
    /// Writer producing UTF-8 files.
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self { output_root: output_root.into(), encoding: UTF_8 }
    }

    /// Writer for an encoding label such as `"ISO-8859-1"`.
    ///
    /// # Errors
    /// `WriteError::UnknownEncoding` when the label is not recognised.
    pub fn with_encoding_label(
        output_root: impl Into<PathBuf>,
        label: &str,
    ) -> Result<Self, WriteError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| WriteError::UnknownEncoding(label.to_string()))?;
        if encoding.output_encoding() != encoding {
            tracing::warn!(
                requested = encoding.name(),
                used = encoding.output_encoding().name(),
                "Encoding cannot be used for output, falling back"
            );
        }
        Ok(Self { output_root: output_root.into(), encoding: encoding.output_encoding() })
    }

    #[must_use]
    pub const fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Writes `script`, replacing any previous file for its locale.
    ///
    /// Returns the written path.
    pub fn write(&self, script: &RenderedScript) -> Result<PathBuf, WriteError> {
        let dir = script_dir(&self.output_root);
        fs::create_dir_all(&dir)
            .map_err(|source| WriteError::CreateDir { path: dir.clone(), source })?;

        let path = target_path(&self.output_root, script.locale());
        // A symlink at the target is replaced, not written through.
        if fs::symlink_metadata(&path).is_ok() {
            fs::remove_file(&path)
                .map_err(|source| WriteError::Remove { path: path.clone(), source })?;
        }

        let (bytes, replaced) = encode(script.source(), self.encoding);
        if replaced > 0 {
            tracing::warn!(
                locale = %script.locale(),
                encoding = self.encoding.name(),
                replaced,
                "Characters not representable in the encoding were written as '?'"
            );
        }

        let write_all = || -> std::io::Result<()> {
            let mut file = File::create(&path)?;
            file.write_all(&bytes)?;
            file.flush()
        };
        write_all().map_err(|source| WriteError::Write { path: path.clone(), source })?;

        let file_name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
        tracing::info!(locale = %script.locale(), "The file {file_name} was deployed successfully.");
        Ok(path)
    }
}

/// Encodes `text`, writing `?` for unmappable characters.
///
/// Returns the bytes and the number of replaced characters.
fn encode(text: &str, encoding: &'static Encoding) -> (Vec<u8>, usize) {
    if encoding == UTF_8 {
        return (text.as_bytes().to_vec(), 0);
    }

    let mut encoder = encoding.new_encoder();
    let mut bytes = Vec::with_capacity(text.len());
    let mut replaced = 0;
    let mut rest = text;
    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(rest.len())
            .unwrap_or_else(|| rest.len().saturating_mul(4));
        bytes.reserve(needed.max(1));

        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut bytes, true);
        rest = rest.get(read..).unwrap_or_default();
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => {
                bytes.push(b'?');
                replaced += 1;
            }
        }
    }
    (bytes, replaced)
}
