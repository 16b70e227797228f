//! Line-by-line probes over an XS binding file.

use super::Parser;
use crate::model::*;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Prefix of the croak call whose message documents a function's signature.
const USAGE_MARKER: &str = "Perl_croak(aTHX_ \"Usage:";

/// `case EVENT_SAY:` in the event dispatcher switch.
const EVENT_CASE_MARKER: &str = "case EVENT";

const EXPORT_MARKER: &str = "ExportVar(package_name.c_str(), \"";

// -- Scan state ---------------------------------------------------------------

#[derive(Default)]
pub(super) struct ScanState {
    // Results
    pub functions: Vec<FunctionRecord>,
    pub events: Vec<EventRecord>,
    pub argument_uses: BTreeMap<String, Vec<ArgumentUse>>,

    /// Function whose usage line was seen last; its arguments are still open
    /// to type inference.
    current: Option<FunctionRecord>,
    /// Event labels waiting for their exports. Consecutive labels share one group.
    pending_events: Vec<EventRecord>,
}

impl ScanState {
    /// Flush the open function and any pending events at end of input.
    pub fn finish(&mut self) {
        self.close_function();
        self.events.append(&mut self.pending_events);
    }

    fn close_function(&mut self) {
        let Some(func) = self.current.take() else {
            return;
        };
        for arg in &func.arguments {
            self.argument_uses
                .entry(arg.name.clone())
                .or_default()
                .push(ArgumentUse {
                    function: func.function.clone(),
                    ty: arg.ty,
                });
        }
        record_function(&mut self.functions, func);
    }
}

/// Add `func`, keeping the declaration with the most arguments per name.
///
/// A recorded function with more arguments wins over `func`; recorded ones
/// with fewer are replaced in place. Equal counts keep both.
pub(super) fn record_function(functions: &mut Vec<FunctionRecord>, func: FunctionRecord) {
    let count = func.arguments.len();
    let same_name = |f: &FunctionRecord| f.function == func.function;

    if functions
        .iter()
        .any(|f| same_name(f) && f.arguments.len() > count)
    {
        debug!("skipping {} since it has fewer arguments", func.function);
        return;
    }

    let replaced: Vec<usize> = functions
        .iter()
        .enumerate()
        .filter(|(_, f)| same_name(f) && f.arguments.len() < count)
        .map(|(i, _)| i)
        .collect();

    match replaced.first() {
        Some(&pos) => {
            for &i in replaced.iter().rev() {
                functions.remove(i);
            }
            functions.insert(pos, func);
        }
        None => functions.push(func),
    }
}

// -- Line processing ----------------------------------------------------------

impl Parser<'_> {
    pub(super) fn scan_line(&self, s: &mut ScanState, line_num: usize, line: &str) {
        if line.is_empty() {
            return;
        }

        if self.options.events {
            // 1. Event label
            if let Some(idx) = line.find(EVENT_CASE_MARKER) {
                start_event(s, line, idx);
                return;
            }

            // 2. Exported variable
            if let Some(idx) = line.find(EXPORT_MARKER) {
                self.export_variable(s, line, idx);
                return;
            }
        }

        // 3. Return value push
        if let Some(ty) = self.lookups.return_type(line) {
            if let Some(func) = s.current.as_mut() {
                func.returns = Some(ty);
            }
        }

        // 4. Argument declarations
        if let Some(func) = s.current.as_mut() {
            self.infer_argument_types(func, line_num, line);
        }

        // 5. Usage string
        if let Some(idx) = line.find(USAGE_MARKER) {
            if let Some((name, raw_args)) = parse_usage(&line[idx + USAGE_MARKER.len()..]) {
                s.close_function();
                let mut func = FunctionRecord::new(&name);
                func.arguments = raw_args.iter().map(|raw| self.build_argument(raw)).collect();
                s.current = Some(func);
            }
        }
    }

    fn export_variable(&self, s: &mut ScanState, line: &str, idx: usize) {
        let rest = &line[idx + EXPORT_MARKER.len()..];
        let name = match rest.find('"') {
            Some(end) if end > 0 => &rest[..end],
            _ => rest,
        };
        let export = EventExport {
            name: name.to_string(),
            ty: self.lookups.event_type(name),
        };
        for event in &mut s.pending_events {
            event.exports.push(export.clone());
        }
    }

    /// Type untyped arguments from a declaration reading their `ST(n)` slot.
    fn infer_argument_types(&self, func: &mut FunctionRecord, line_num: usize, line: &str) {
        for (i, arg) in func.arguments.iter_mut().enumerate() {
            if arg.ty.is_some() || !line.contains(&format!("ST({})", i)) {
                continue;
            }
            let Some(caps) = self.declaration.captures(line) else {
                continue;
            };
            let keyword = caps[1].trim();
            arg.ty = declared_type(keyword, line);
            if arg.ty.is_none() {
                warn!(
                    "unknown type \"{}\" for {} on line {}",
                    keyword, arg.name, line_num
                );
            }
        }
    }

    fn build_argument(&self, raw: &str) -> Argument {
        let name = self.brackets.replace_all(raw, "").to_string();
        Argument {
            ty: self.lookups.argument_type(&name),
            optional: raw.contains(']'),
            name,
        }
    }
}

/// Begin a new event group member, flushing the previous group once it has exports.
fn start_event(s: &mut ScanState, line: &str, idx: usize) {
    if s
        .pending_events
        .first()
        .is_some_and(|e| !e.exports.is_empty())
    {
        s.events.append(&mut s.pending_events);
    }

    // Name starts at "EVENT", after "case ".
    let rest = &line[idx + "case ".len()..];
    let name = match rest.find(':') {
        Some(end) if end > 0 => &rest[..end],
        _ => rest,
    };
    s.pending_events.push(EventRecord {
        name: name.to_string(),
        exports: Vec::new(),
    });
}

/// Map a declaration keyword to its semantic type.
fn declared_type(keyword: &str, line: &str) -> Option<ValueType> {
    match keyword {
        "int" | "int32" => Some(ValueType::Int),
        "float" => Some(ValueType::Float),
        "unsigned int" | "uint" | "uint8" | "uint16" | "uint32" => Some(ValueType::Uint),
        "bool" => Some(ValueType::Bool),
        "long" => Some(ValueType::Long),
        "unsigned long" => Some(ValueType::UnsignedLong),
        k if k.contains("char") => Some(ValueType::String),
        k if k.contains("auto") && line.contains("glm::vec4") => Some(ValueType::Float),
        _ => None,
    }
}

/// Split the text after the usage marker into a function name and raw arguments.
///
/// ` quest::say(message, [language_id])");` → `("quest::say", ["message", "[language_id]"])`
fn parse_usage(text: &str) -> Option<(String, Vec<String>)> {
    let mut function = text;
    if let Some(end) = function.find("\");") {
        function = &function[..end];
    }

    let mut arg_line = "";
    if let Some(open) = function.find('(') {
        arg_line = &function[open + 1..];
        function = &function[..open];
        if let Some(close) = arg_line.find(')') {
            arg_line = &arg_line[..close];
        }
        // Drop default values
        if let Some(eq) = arg_line.find('=') {
            arg_line = &arg_line[..eq];
        }
    }

    let function = function.trim();
    if function.is_empty() {
        return None;
    }

    let args = arg_line
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    Some((function.to_string(), args))
}
