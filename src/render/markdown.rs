//! Wiki page bodies for scopes, functions and events.

use crate::model::*;
use crate::render::footer;

/// Scope list page: the grouped signature lines plus footer.
pub fn render_scope_page(body: &str, generated_on: &str) -> String {
    format!("{}{}", body, footer(generated_on))
}

pub fn render_event_index(body: &str, generated_on: &str) -> String {
    format!("{}{}", body, footer(generated_on))
}

/// Function detail page: summary, argument table and example.
pub fn render_function_page(entry: &FunctionEntry, generated_on: &str) -> String {
    let mut out = format!("{}\n", entry.summary);
    if !entry.argument.is_empty() {
        out.push_str(&format!("### Arguments\n{}\n", entry.argument));
    }
    out.push_str(&format!("### Example\n{}\n", entry.example));
    out.push_str(&footer(generated_on));
    out
}

/// Event page: exported variables and a handler stub printing each of them.
///
/// Exports with no known type are documented as `int`.
pub fn render_event_page(event: &EventRecord, generated_on: &str) -> String {
    let mut out = format!("{}\n", event.name);
    let mut says = String::new();

    if !event.exports.is_empty() {
        out.push_str("### Exports\n**Name**|**Type**|**Description**\n:-----|:-----|:-----\n");
        for export in event.exports.iter().filter(|e| !e.name.is_empty()) {
            let ty = export.ty.unwrap_or(ValueType::Int);
            out.push_str(&format!("{}|{}|\n", export.name, ty));
            says.push_str(&format!("\tquest::say(${}); # returns {}\n", export.name, ty));
        }
    }

    out.push_str("### Example\n");
    out.push_str(&format!("```perl\nsub {} {{\n{}}}\n```", event.name, says));
    out.push_str(&footer(generated_on));
    out
}
