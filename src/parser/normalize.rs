//! Post-pass turning raw usage names into object, function and scope parts.

use crate::config::{Lookups, GENERAL_NAMESPACE, GENERAL_SCOPE};
use crate::model::{FunctionRecord, SourceTarget};
use crate::naming::scope_title;

/// Normalize every record scanned from `target`, dropping placeholders.
pub(super) fn normalize(
    target: &SourceTarget,
    functions: Vec<FunctionRecord>,
    lookups: &Lookups,
) -> Vec<FunctionRecord> {
    let replace = target.replace_token();
    functions
        .into_iter()
        .filter_map(|func| normalize_function(target, &replace, func, lookups))
        .collect()
}

fn normalize_function(
    target: &SourceTarget,
    replace: &str,
    mut func: FunctionRecord,
    lookups: &Lookups,
) -> Option<FunctionRecord> {
    func.function = func.function.trim().to_string();
    if func.function.is_empty() || func.function == "%s" {
        return None;
    }

    func.object = derive_object(target, replace, &func);
    func.function = bare_function(&func.function).to_string();
    func.scope = scope_title(&scope_from_object(&func.object));

    for arg in &mut func.arguments {
        // `int item_id` → `item_id`; a known name keeps its known type.
        if let Some(last) = arg.name.split_whitespace().last() {
            if last != arg.name {
                arg.name = last.to_string();
                if let Some(ty) = lookups.argument_type(&arg.name) {
                    arg.ty = Some(ty);
                }
            }
        }
    }

    Some(func)
}

/// Receiver expression for a raw usage name.
///
/// `General` functions all share the quest namespace; the object carries no
/// function name there, pages append it. Other scopes become a lowercased
/// Perl variable with an arrow, e.g. `Client::GetName` → `$client->`.
fn derive_object(target: &SourceTarget, replace: &str, func: &FunctionRecord) -> String {
    if target.scope == GENERAL_SCOPE {
        if func.object.contains(replace) {
            return func.object.clone();
        }
        return GENERAL_NAMESPACE.to_string();
    }

    let mut object = format!("${}", func.function.to_lowercase())
        .replace("entitylist", "entity_list")
        .replace("hateentry", "hate_entry");
    if let Some(idx) = object.find("::").filter(|&i| i > 0) {
        object = format!("{}->", &object[..idx]);
    }
    if let Some(idx) = object.find("->").filter(|&i| i > 0) {
        object.truncate(idx + 2);
    }
    object
}

/// Strip the namespace, trailing arrow and sigil from a usage name.
fn bare_function(name: &str) -> &str {
    let mut name = name;
    if let Some(idx) = name.find("::") {
        name = &name[idx + 2..];
    }
    if let Some(idx) = name.find("->") {
        name = &name[..idx];
    }
    name.strip_prefix('$').unwrap_or(name)
}

/// `$client->` → `client`, `quest::` → `quest`.
fn scope_from_object(object: &str) -> String {
    let mut scope = "";
    if let Some(idx) = object.find("::").filter(|&i| i > 0) {
        scope = &object[..idx];
    }
    if let Some(idx) = object.find("->").filter(|&i| i > 0) {
        scope = &object[..idx];
    }
    match scope.find('$') {
        Some(idx) => scope[idx + 1..].to_string(),
        None => scope.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Argument, ValueType};

    fn record(name: &str) -> FunctionRecord {
        FunctionRecord::new(name)
    }

    fn run(target: &SourceTarget, names: &[&str]) -> Vec<FunctionRecord> {
        let lookups = Lookups::default();
        normalize(
            target,
            names.iter().map(|n| record(n)).collect(),
            &lookups,
        )
    }

    #[test]
    fn general_scope_uses_namespace() {
        let target = SourceTarget::new("embparser_api.cpp", GENERAL_SCOPE).with_replace("quest");
        let out = run(&target, &["quest::say"]);
        assert_eq!(out[0].object, "quest::");
        assert_eq!(out[0].function, "say");
        assert_eq!(out[0].scope, "Quest");
        assert_eq!(out[0].return_name(), "void");
    }

    #[test]
    fn placeholders_dropped() {
        let target = SourceTarget::new("perl_mob.cpp", "Mob");
        let out = run(&target, &["%s", "  ", "Mob::GetHP"]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].function, "GetHP");
        assert_eq!(out[0].object, "$mob->");
        assert_eq!(out[0].scope, "Mob");
    }

    #[test]
    fn special_scopes() {
        let entity = SourceTarget::new("perl_entity.cpp", "EntityList");
        let out = run(&entity, &["EntityList::GetMobByID"]);
        assert_eq!(out[0].object, "$entity_list->");
        assert_eq!(out[0].scope, "EntityList");

        let hate = SourceTarget::new("perl_hateentry.cpp", "HateEntry");
        let out = run(&hate, &["HateEntry::GetEnt"]);
        assert_eq!(out[0].object, "$hate_entry->");
        assert_eq!(out[0].scope, "HateEntry");

        let npc = SourceTarget::new("perl_npc.cpp", "NPC");
        let out = run(&npc, &["NPC::SignalNPC"]);
        assert_eq!(out[0].object, "$npc->");
        assert_eq!(out[0].scope, "NPC");
    }

    #[test]
    fn object_without_separator_has_no_scope() {
        let target = SourceTarget::new("perl_doors.cpp", "Doors").with_replace("door");
        let out = run(&target, &["GetID"]);
        assert_eq!(out[0].object, "$getid");
        assert_eq!(out[0].scope, "");
    }

    #[test]
    fn declared_type_word_stripped_from_argument() {
        let target = SourceTarget::new("perl_client.cpp", "Client");
        let mut func = record("Client::SummonItem");
        func.arguments = vec![
            Argument {
                name: "THIS".into(),
                ty: None,
                optional: false,
            },
            Argument {
                name: "uint32 item_id".into(),
                ty: None,
                optional: false,
            },
        ];
        let out = normalize(&target, vec![func], &Lookups::default());
        assert_eq!(out[0].arguments[0].name, "THIS");
        assert_eq!(out[0].arguments[1].name, "item_id");
        assert_eq!(out[0].arguments[1].ty, Some(ValueType::Int));
    }

    #[test]
    fn known_name_overrides_declared_type() {
        let target = SourceTarget::new("perl_client.cpp", "Client");
        let mut func = record("Client::SummonItem");
        func.arguments = vec![Argument {
            name: "uint32 item_id".into(),
            ty: Some(ValueType::Uint),
            optional: false,
        }];
        let out = normalize(&target, vec![func], &Lookups::default());
        assert_eq!(out[0].arguments[0].name, "item_id");
        assert_eq!(out[0].arguments[0].ty, Some(ValueType::Int));
    }

    #[test]
    fn unknown_name_keeps_declared_type() {
        let target = SourceTarget::new("perl_client.cpp", "Client");
        let mut func = record("Client::SetLevel");
        func.arguments = vec![Argument {
            name: "uint8 set_level".into(),
            ty: Some(ValueType::Uint),
            optional: false,
        }];
        let out = normalize(&target, vec![func], &Lookups::default());
        assert_eq!(out[0].arguments[0].ty, Some(ValueType::Uint));
    }
}
