use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ShaderError;

/// Where a variant's fragment source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Source compiled into the binary.
    Inline(Cow<'static, str>),
    /// Source read from disk on every `load`.
    File(PathBuf),
}

impl ShaderSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Inline(_) => None,
            Self::File(path) => Some(path),
        }
    }

    /// Returns the current text. Unreadable files map to `ShaderError::MissingSource`.
    pub fn load(&self) -> Result<String, ShaderError> {
        match self {
            Self::Inline(text) => Ok(text.to_string()),
            Self::File(path) => fs::read_to_string(path).map_err(|source| ShaderError::MissingSource {
                path: path.clone(),
                source,
            }),
        }
    }
}

impl From<&'static str> for ShaderSource {
    fn from(text: &'static str) -> Self {
        Self::Inline(Cow::Borrowed(text))
    }
}
