//! Output formatting for diagram command results.

use crate::diagram::RenderedDiagram;
use crate::output::Outputable;

impl Outputable for RenderedDiagram {
    fn to_table(&self) -> String {
        format!(
            "Diagram written to {} ({}): {} relations, {} relationships\n",
            self.output.display(),
            self.format,
            self.relations,
            self.edges
        )
    }
}
