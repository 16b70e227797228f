//! Group functions by scope into list pages and the sample catalog.

use crate::config::Lookups;
use crate::model::*;
use crate::naming;
use crate::summary;
use indexmap::IndexMap;

/// Page bodies and catalog built from all scanned files.
#[derive(Debug, Default)]
pub struct Grouped {
    /// Scope → markdown list of its function signatures, in first-seen order.
    pub scope_pages: IndexMap<String, String>,
    /// Markdown list linking every event page.
    pub event_index: String,
    pub catalog: Catalog,
}

/// Build scope pages, the event index and the catalog.
///
/// Both lists are expected sorted by name. The catalog keeps the first
/// function seen per (scope, name); scope pages list every record.
pub fn group(functions: &[FunctionRecord], events: &[EventRecord], lookups: &Lookups) -> Grouped {
    let mut grouped = Grouped::default();

    for event in events {
        grouped.event_index.push_str(&format!(
            "* [[{}|{}]]\n",
            event.name,
            naming::event_link(&event.name)
        ));
    }

    for func in functions {
        if func.scope.is_empty() {
            continue;
        }

        grouped
            .scope_pages
            .entry(func.scope.clone())
            .or_default()
            .push_str(&signature_line(func));

        let scope = grouped.catalog.scope_mut(&func.scope);
        if scope.contains(&func.function) {
            continue;
        }
        scope.functions.push(FunctionEntry {
            name: func.function.clone(),
            summary: summary::summarize(lookups, &scope.name, &func.function),
            example: summary::example_for(func),
            argument: summary::argument_table(func),
        });
    }

    grouped
}

/// `* [[$client->SetLevel(uint set_level) # void|Perl-Client-SetLevel]]`
fn signature_line(func: &FunctionRecord) -> String {
    let args: Vec<String> = func
        .call_arguments()
        .map(|a| match a.ty {
            Some(ty) => format!("{} {}", ty, a.name),
            None => a.name.clone(),
        })
        .collect();
    format!(
        "* [[{}{}({}) # {}|{}]]\n",
        func.object,
        func.function,
        args.join(", "),
        func.return_name(),
        naming::function_link(&func.scope, &func.function)
    )
}

/// Sort functions and events by name, keeping source order among equals.
pub fn sort_by_name(functions: &mut [FunctionRecord], events: &mut [EventRecord]) {
    functions.sort_by(|a, b| a.function.cmp(&b.function));
    events.sort_by(|a, b| a.name.cmp(&b.name));
}
