//! Center-label OCR collaborator.
//!
//! An extractor turns a center-label photo into an optional
//! catalog-number-like hint. Failures surface as [`ScopeError`]; callers log
//! them and continue without a hint.

use std::path::Path;
use std::sync::LazyLock;

use async_trait::async_trait;
use cratedig_core::sanitize_catalog;
use regex::Regex;
use thiserror::Error;

/// Letters, optional separator, digits: `PCS 7088`, `SO-383`, `CBS70232`.
static CATALOG_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{1,6}[ -]?\d{2,7}\b").expect("valid regex")
});

const IMAGE_PLACEHOLDER: &str = "{image}";

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("OCR command is empty")]
    EmptyCommand,

    #[error("failed to run OCR command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("OCR command '{command}' exited with {status}")]
    Failed { command: String, status: String },
}

#[async_trait]
pub trait HintExtractor: Send + Sync {
    /// Returns a catalog hint read from the image at `image`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError`] when the extractor itself fails. Absence of a
    /// hint is `Ok(None)`.
    async fn extract_hint(&self, image: &str) -> Result<Option<String>, ScopeError>;
}

/// Extractor used when OCR is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHints;

#[async_trait]
impl HintExtractor for NoHints {
    async fn extract_hint(&self, _image: &str) -> Result<Option<String>, ScopeError> {
        Ok(None)
    }
}

/// Runs an external OCR program and scans its stdout.
///
/// The command line is split on whitespace; a `{image}` argument is replaced
/// by the image path, otherwise the path is appended. For Tesseract:
/// `tesseract {image} stdout`.
#[derive(Debug, Clone)]
pub struct CommandHints {
    command: String,
}

impl CommandHints {
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn arguments(&self, image: &str) -> Result<(String, Vec<String>), ScopeError> {
        let mut parts = self.command.split_whitespace().map(str::to_owned);
        let program = parts.next().ok_or(ScopeError::EmptyCommand)?;
        let mut args: Vec<String> = parts.collect();
        if let Some(slot) = args.iter_mut().find(|a| a.as_str() == IMAGE_PLACEHOLDER) {
            image.clone_into(slot);
        } else {
            args.push(image.to_owned());
        }
        Ok((program, args))
    }
}

#[async_trait]
impl HintExtractor for CommandHints {
    async fn extract_hint(&self, image: &str) -> Result<Option<String>, ScopeError> {
        let lower = image.trim().to_ascii_lowercase();
        if lower.is_empty() || lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(None);
        }
        if !Path::new(image.trim()).is_file() {
            tracing::debug!(image, "center label photo not found, skipping OCR");
            return Ok(None);
        }

        let (program, args) = self.arguments(image.trim())?;
        let output = tokio::process::Command::new(&program)
            .args(&args)
            .output()
            .await
            .map_err(|e| ScopeError::Spawn {
                command: program.clone(),
                source: e,
            })?;
        if !output.status.success() {
            return Err(ScopeError::Failed {
                command: program,
                status: output.status.to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(first_catalog_token(&text))
    }
}

/// First catalog-like token in OCR text, skipping bare years.
#[must_use]
pub fn first_catalog_token(text: &str) -> Option<String> {
    let upper = text.to_uppercase();
    CATALOG_TOKEN_RE
        .find_iter(&upper)
        .find_map(|m| sanitize_catalog(m.as_str()))
}
