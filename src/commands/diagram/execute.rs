use std::path::PathBuf;

use super::DiagramCmd;
use crate::config::DiagramConfig;
use crate::db::schema::ALL_RELATIONS;
use crate::diagram::{dot_bin_from_env, render_er_with, DiagramError, RenderedDiagram, DEFAULT_OUTPUT};

impl DiagramCmd {
    /// Output path and Graphviz binary: flag, then config file, then
    /// environment, then defaults.
    pub fn resolve(&self, config: Option<&DiagramConfig>) -> (PathBuf, String) {
        let output = self
            .output
            .clone()
            .or_else(|| config.and_then(|c| c.output.clone()))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        let dot_bin = self
            .dot_bin
            .clone()
            .or_else(|| config.and_then(|c| c.dot_bin.clone()))
            .unwrap_or_else(dot_bin_from_env);
        (output, dot_bin)
    }

    pub fn render(self, config: Option<&DiagramConfig>) -> Result<RenderedDiagram, DiagramError> {
        let (output, dot_bin) = self.resolve(config);
        render_er_with(ALL_RELATIONS, &output, &dot_bin)
    }
}
