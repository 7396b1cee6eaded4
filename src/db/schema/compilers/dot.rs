//! Graphviz DOT compiler.
//!
//! Generates an entity-relationship diagram from backend-agnostic schema
//! definitions. Each relation becomes an HTML-table node with one row per
//! column; each foreign key becomes an edge drawn with crow's-foot ends and
//! labelled `*` at the referencing relation, `1` at the referenced relation.

use crate::db::schema::definition::{
    ForeignKey, RelationshipKind, SchemaField, SchemaRelation,
};

const HEADER_COLOR: &str = "#dbe8f6";

/// Compiler for generating DOT source from schema definitions.
pub struct DotCompiler;

impl DotCompiler {
    /// Generate the complete `digraph` for a set of relations.
    ///
    /// Edges are only emitted when both ends are part of `relations`.
    pub fn compile(relations: &[&SchemaRelation]) -> String {
        let mut lines = vec![
            "digraph er {".to_string(),
            "  graph [rankdir=LR, fontname=\"Helvetica\", nodesep=0.6, ranksep=1.2];".to_string(),
            "  node [shape=plaintext, fontname=\"Helvetica\", fontsize=11];".to_string(),
            "  edge [fontname=\"Helvetica\", fontsize=9, dir=both, arrowtail=crow, arrowhead=tee];"
                .to_string(),
            String::new(),
        ];

        for relation in relations {
            lines.push(Self::compile_node(relation));
        }

        let edges: Vec<String> = relations
            .iter()
            .flat_map(|relation| {
                relation
                    .foreign_keys()
                    .filter(|(_, fk)| relations.iter().any(|r| r.name == fk.relation))
                    .map(|(field, fk)| Self::compile_edge(relations, relation, field, fk))
                    .collect::<Vec<_>>()
            })
            .collect();

        if !edges.is_empty() {
            lines.push(String::new());
            lines.extend(edges);
        }

        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }

    /// Generate the node statement for one relation.
    pub fn compile_node(relation: &SchemaRelation) -> String {
        let mut rows = vec![format!(
            "<TR><TD BGCOLOR=\"{}\"><B>{}</B></TD></TR>",
            HEADER_COLOR,
            escape_html(relation.entity)
        )];

        for field in relation.key_fields {
            rows.push(format!(
                "<TR><TD ALIGN=\"LEFT\" PORT=\"{}\"><U>{}</U></TD></TR>",
                field.name,
                escape_html(&Self::column_label(field, true))
            ));
        }
        for field in relation.value_fields {
            rows.push(format!(
                "<TR><TD ALIGN=\"LEFT\" PORT=\"{}\">{}</TD></TR>",
                field.name,
                escape_html(&Self::column_label(field, false))
            ));
        }

        format!(
            "  \"{}\" [label=<<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">{}</TABLE>>];",
            relation.name,
            rows.join("")
        )
    }

    /// Human-readable column description, e.g. `post_id : INTEGER FK post.id`.
    pub fn column_label(field: &SchemaField, is_key: bool) -> String {
        let data_type = if field.is_enumerated() {
            let variants = field
                .allowed_values
                .iter()
                .map(|v| format!("'{}'", v))
                .collect::<Vec<_>>()
                .join(",");
            format!("ENUM({})", variants)
        } else {
            match field.max_len {
                Some(len) => format!("{}({})", field.data_type.diagram_type(), len),
                None => field.data_type.diagram_type().to_string(),
            }
        };

        let mut label = format!("{} : {}", field.name, data_type);
        if is_key {
            label.push_str(" PK");
        }
        if let Some(fk) = field.references {
            label.push_str(&format!(" FK {}.{}", fk.relation, fk.field));
        }
        if !field.nullable && !is_key {
            label.push_str(" NOT NULL");
        }
        label
    }

    fn compile_edge(
        relations: &[&SchemaRelation],
        relation: &SchemaRelation,
        field: &SchemaField,
        fk: ForeignKey,
    ) -> String {
        let label = Self::accessor_names(relations, relation, field, fk).join(" / ");
        let mut attrs = vec!["taillabel=\"*\"".to_string(), "headlabel=\"1\"".to_string()];
        if !label.is_empty() {
            attrs.push(format!("label=\"{}\"", label));
        }
        let attrs = format!(" [{}]", attrs.join(", "));
        format!(
            "  \"{}\":\"{}\" -> \"{}\":\"{}\"{};",
            relation.name, field.name, fk.relation, fk.field, attrs
        )
    }

    /// Accessor names backed by a foreign key: the one-to-many accessor on the
    /// referenced relation first, then the many-to-one accessor on the owner.
    fn accessor_names(
        relations: &[&SchemaRelation],
        relation: &SchemaRelation,
        field: &SchemaField,
        fk: ForeignKey,
    ) -> Vec<&'static str> {
        let mut names = Vec::new();

        if let Some(target) = relations.iter().find(|r| r.name == fk.relation) {
            names.extend(
                target
                    .relationships
                    .iter()
                    .filter(|r| {
                        r.kind == RelationshipKind::OneToMany
                            && r.target == relation.name
                            && r.foreign_key == field.name
                    })
                    .map(|r| r.name),
            );
        }

        names.extend(
            relation
                .relationships
                .iter()
                .filter(|r| r.kind == RelationshipKind::ManyToOne && r.foreign_key == field.name)
                .map(|r| r.name),
        );

        names
    }
}

/// Escape text for inclusion in a Graphviz HTML-like label.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            c => result.push(c),
        }
    }
    result
}
