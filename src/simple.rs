//! Fixed-width text report over a [`SpecDiff`].
//!
//! One banner per changed entity followed by one line per diff-tree leaf,
//! with old and new value columns and `N/A` marking an absent side.
//! Unchanged entities and empty collection sections are not printed.

use std::fmt::Write;

use crate::comparator::{EntityDiff, SpecDiff};
use crate::differ::{DiffKind, DiffNode};
use crate::value::normalize_identifier;

const LABEL_WIDTH: usize = 30;
const COLUMN_WIDTH: usize = 26;
const ABSENT: &str = "N/A";

/// Renderer-level filters applied over the diff tree.
///
/// These only control what is shown; the underlying comparison always
/// covers every field.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Show the auxiliary `properties` sections of enum constants.
    pub show_properties: bool,
    /// Show the `annotations` sections of type elements.
    pub show_annotations: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            show_properties: true,
            show_annotations: true,
        }
    }
}

impl ReportOptions {
    pub(crate) fn hides(&self, label: &str) -> bool {
        (label == "properties" && !self.show_properties)
            || (label == "annotations" && !self.show_annotations)
    }
}

/// Render the diff as a fixed-width text report.
///
/// Returns an empty string when nothing changed.
pub fn render_text(diff: &SpecDiff, options: &ReportOptions) -> String {
    let mut out = String::new();
    write_entity_group(&mut out, &diff.request_diffs, "REQUEST", options);
    write_entity_group(&mut out, &diff.type_diffs, "TYPE", options);
    out
}

fn write_entity_group<T>(
    out: &mut String,
    diffs: &[EntityDiff<T>],
    noun: &str,
    options: &ReportOptions,
) {
    for diff in diffs {
        let verdict = match diff.kind {
            DiffKind::Added => "ADDED",
            DiffKind::Deleted => "DELETED",
            DiffKind::Modified => "MODIFIED",
            DiffKind::NoChange => continue,
        };
        let _ = writeln!(
            out,
            "******************** {} {} {} ********************\n",
            verdict,
            noun,
            normalize_identifier(&diff.key)
        );
        write_nodes(out, &diff.tree, options);
        out.push_str("\n\n");
    }
}

fn write_nodes(out: &mut String, nodes: &[DiffNode], options: &ReportOptions) {
    for node in nodes {
        if node.is_section() {
            if node.children.is_empty() || options.hides(node.label) {
                continue;
            }
            let _ = writeln!(out, "{}{}:", "  ".repeat(node.depth), node.label);
            write_nodes(out, &node.children, options);
        } else {
            let label = format!("{}{}:", "  ".repeat(node.depth), node.label);
            let old = node.old_value.as_deref().unwrap_or(ABSENT);
            let new = node.new_value.as_deref().unwrap_or(ABSENT);
            let _ = writeln!(
                out,
                "{label:<lw$}{old:<cw$}{new}",
                lw = LABEL_WIDTH,
                cw = COLUMN_WIDTH
            );
        }
    }
}
