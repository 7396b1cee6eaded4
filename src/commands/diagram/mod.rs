mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

/// Render the entity-relationship diagram of the schema
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  social_schema diagram                       # Write diagram.png
  social_schema diagram -o docs/er.svg        # Format follows the extension
  social_schema diagram -o er.dot             # DOT source only, no Graphviz needed
  social_schema diagram --dot-bin /opt/gv/dot # Use a specific Graphviz binary")]
pub struct DiagramCmd {
    /// Output file (png, svg, pdf or dot); defaults to diagram.png
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Graphviz executable; defaults to $GRAPHVIZ_DOT or `dot`
    #[arg(long)]
    pub dot_bin: Option<String>,
}
