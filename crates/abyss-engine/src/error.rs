//! Error taxonomy shared by the surface, program and renderer layers.

use std::path::PathBuf;

use thiserror::Error;

use crate::device::ShaderStage;
use crate::render::RendererState;

/// Failures while bringing up the windowing backend or its window.
#[derive(Debug, Error)]
pub enum WindowError {
    /// Backend bring-up failed; no window exists.
    #[error("unable to initialize the windowing backend: {0}")]
    Init(String),

    /// Backend is alive but the window (or its context) could not be created.
    #[error("unable to create a window: {0}")]
    Create(String),
}

/// Failures while producing a linked shader program.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// A shader file path does not resolve to readable text.
    #[error("failed to read fragment shader {}: {source}", path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single stage failed to compile; `log` is the backend diagnostic.
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// Both stages compiled but the program failed to link.
    #[error("shader program linking failed: {log}")]
    Link { log: String },
}

/// Top-level renderer error.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// A setup call was made out of order.
    #[error("renderer is {actual:?}, operation requires {expected:?}")]
    InvalidState {
        expected: RendererState,
        actual: RendererState,
    },
}
