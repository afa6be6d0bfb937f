//! Self-contained HTML report over a [`SpecDiff`].
//!
//! One table per changed entity. Row classes carry the diff kind so the
//! embedded stylesheet can color added, deleted and modified fields;
//! indentation comes from each node's depth.

use std::fmt::Write;

use crate::comparator::{EntityDiff, SpecDiff};
use crate::differ::{DiffKind, DiffNode};
use crate::simple::ReportOptions;
use crate::value::normalize_identifier;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }\n\
table { border-collapse: collapse; margin-bottom: 2em; }\n\
th, td { border: 1px solid #ccc; padding: 2px 10px; text-align: left; }\n\
tr.added { background-color: #e2f5e2; }\n\
tr.deleted { background-color: #f5e2e2; }\n\
tr.modified { background-color: #f5f0d8; }\n\
td.section { font-weight: bold; }\n";

/// Render the diff as a standalone HTML document.
pub fn render_html(diff: &SpecDiff, options: &ReportOptions) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Contract comparison</title>\n");
    let _ = writeln!(out, "<style>\n{STYLE}</style>");
    out.push_str("</head>\n<body>\n<h1>Contract comparison</h1>\n");

    write_entity_group(&mut out, &diff.request_diffs, "Requests", "request", options);
    write_entity_group(&mut out, &diff.type_diffs, "Types", "type", options);

    out.push_str("</body>\n</html>\n");
    out
}

fn write_entity_group<T>(
    out: &mut String,
    diffs: &[EntityDiff<T>],
    heading: &str,
    noun: &str,
    options: &ReportOptions,
) {
    if diffs.iter().all(|d| d.kind == DiffKind::NoChange) {
        return;
    }
    let _ = writeln!(out, "<h2>{heading}</h2>");

    for diff in diffs {
        let verdict = match diff.kind {
            DiffKind::Added => "Added",
            DiffKind::Deleted => "Deleted",
            DiffKind::Modified => "Modified",
            DiffKind::NoChange => continue,
        };
        let _ = writeln!(
            out,
            "<h3 class=\"{}\">{} {}: {}</h3>",
            verdict.to_lowercase(),
            verdict,
            noun,
            escape(normalize_identifier(&diff.key))
        );
        out.push_str("<table>\n<tr><th>Field</th><th>Old</th><th>New</th></tr>\n");
        write_rows(out, &diff.tree, options);
        out.push_str("</table>\n");
    }
}

fn write_rows(out: &mut String, nodes: &[DiffNode], options: &ReportOptions) {
    for node in nodes {
        let indent = node.depth * 16;
        if node.is_section() {
            if node.children.is_empty() || options.hides(node.label) {
                continue;
            }
            let _ = writeln!(
                out,
                "<tr><td class=\"section\" style=\"padding-left: {}px\">{}</td><td></td><td></td></tr>",
                indent, node.label
            );
            write_rows(out, &node.children, options);
        } else {
            let class = match node.kind {
                DiffKind::Added => "added",
                DiffKind::Deleted => "deleted",
                DiffKind::Modified => "modified",
                DiffKind::NoChange => "nochange",
            };
            let _ = writeln!(
                out,
                "<tr class=\"{}\"><td style=\"padding-left: {}px\">{}</td><td>{}</td><td>{}</td></tr>",
                class,
                indent,
                node.label,
                escape(node.old_value.as_deref().unwrap_or("")),
                escape(node.new_value.as_deref().unwrap_or("")),
            );
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
