//! Entity-relationship diagram rendering.
//!
//! The DOT source comes from [`DotCompiler`]; turning it into an image is
//! delegated to the Graphviz `dot` executable, which reads DOT on stdin.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::db::schema::compilers::DotCompiler;
use crate::db::schema::SchemaRelation;

/// Graphviz executable used when nothing else is configured.
pub const DEFAULT_DOT_BIN: &str = "dot";

/// Default output path for the rendered diagram.
pub const DEFAULT_OUTPUT: &str = "diagram.png";

#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Graphviz executable '{bin}' not found; install Graphviz or set GRAPHVIZ_DOT")]
    GraphvizNotFound { bin: String },

    #[error("Graphviz exited with {status}: {stderr}")]
    RenderFailed { status: String, stderr: String },

    #[error("Unsupported diagram format '{extension}' (expected png, svg, pdf or dot)")]
    UnsupportedFormat { extension: String },

    #[error("Failed to write diagram '{path}': {message}")]
    WriteFailed { path: String, message: String },
}

/// Output format, taken from the extension of the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramFormat {
    Png,
    Svg,
    Pdf,
    Dot,
}

impl DiagramFormat {
    /// Format for `path`. A path without an extension renders as PNG.
    pub fn from_path(path: &Path) -> Result<Self, DiagramError> {
        let Some(extension) = path.extension() else {
            return Ok(Self::Png);
        };
        match extension.to_string_lossy().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" | "gv" => Ok(Self::Dot),
            other => Err(DiagramError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Value passed to Graphviz as `-T<format>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDiagram {
    pub output: PathBuf,
    pub format: DiagramFormat,
    pub relations: usize,
    pub edges: usize,
}

/// Graphviz executable from `GRAPHVIZ_DOT`, falling back to `dot`.
pub fn dot_bin_from_env() -> String {
    std::env::var("GRAPHVIZ_DOT").unwrap_or_else(|_| DEFAULT_DOT_BIN.to_string())
}

/// Render the ER diagram of `relations` to `output`.
pub fn render_er(relations: &[&SchemaRelation], output: &Path) -> Result<RenderedDiagram, DiagramError> {
    render_er_with(relations, output, &dot_bin_from_env())
}

/// Render the ER diagram with an explicit Graphviz executable.
pub fn render_er_with(
    relations: &[&SchemaRelation],
    output: &Path,
    dot_bin: &str,
) -> Result<RenderedDiagram, DiagramError> {
    let format = DiagramFormat::from_path(output)?;
    let source = DotCompiler::compile(relations);
    let edges = relations
        .iter()
        .flat_map(|r| r.foreign_keys())
        .filter(|(_, fk)| relations.iter().any(|r| r.name == fk.relation))
        .count();

    match format {
        DiagramFormat::Dot => std::fs::write(output, &source).map_err(|e| DiagramError::WriteFailed {
            path: output.display().to_string(),
            message: e.to_string(),
        })?,
        _ => run_graphviz(dot_bin, format, &source, output)?,
    }

    info!(output = %output.display(), %format, "diagram rendered");
    Ok(RenderedDiagram {
        output: output.to_path_buf(),
        format,
        relations: relations.len(),
        edges,
    })
}

fn run_graphviz(dot_bin: &str, format: DiagramFormat, source: &str, output: &Path) -> Result<(), DiagramError> {
    let write_failed = |e: std::io::Error| DiagramError::WriteFailed {
        path: output.display().to_string(),
        message: e.to_string(),
    };

    debug!(dot_bin, %format, "spawning graphviz");
    let mut child = Command::new(dot_bin)
        .arg(format!("-T{}", format.as_str()))
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                DiagramError::GraphvizNotFound {
                    bin: dot_bin.to_string(),
                }
            } else {
                write_failed(e)
            }
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // A child that exits early closes the pipe; its exit status says why.
        if let Err(e) = stdin.write_all(source.as_bytes()) {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(write_failed(e));
            }
        }
    }

    let result = child.wait_with_output().map_err(write_failed)?;
    if !result.status.success() {
        return Err(DiagramError::RenderFailed {
            status: result.status.to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }
    Ok(())
}
