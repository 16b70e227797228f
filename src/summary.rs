//! One-line summaries and example snippets synthesized from function names.
//!
//! These are rough heuristics; the sentences are a starting point for wiki
//! editors, not finished prose.

use crate::config::Lookups;
use crate::model::{FunctionRecord, ValueType};

/// Camel-case runs that must not be split at their inner capitals.
const UNSPLIT_WORDS: &[&str] = &["ID", "MP3", "NPC"];

/// Header of the markdown argument table.
const ARGUMENT_HEADER: &str = "**Name**|**Type**|**Description**\n:---|:---|:---\n";

/// Verb for the first verb stem `function` starts with, if any.
pub fn verb_for<'l>(lookups: &'l Lookups, function: &str) -> Option<&'l str> {
    let lower = function.to_lowercase();
    lookups
        .verbs
        .iter()
        .find(|(stem, _)| lower.starts_with(stem.as_str()))
        .map(|(_, verb)| verb.as_str())
}

/// Noun for the remainder of `function` once verb stems are stripped.
pub fn noun_for<'l>(lookups: &'l Lookups, function: &str) -> Option<&'l str> {
    let rest = strip_verbs(lookups, function).to_lowercase();
    lookups
        .nouns
        .iter()
        .find(|(key, _)| rest.contains(key.as_str()))
        .map(|(_, noun)| noun.as_str())
}

/// Words of `function` after its verb stem: snake_case splits on `_`,
/// anything else on capital letters.
///
/// `GetNPCName` → `["NPC", "Name"]`, `get_zone_id` → `["", "zone", "id"]`
pub fn split_function_parts(lookups: &Lookups, function: &str) -> Vec<String> {
    let function = strip_verbs(lookups, function);

    if function.contains('_') {
        return function.split('_').map(str::to_string).collect();
    }

    let mut parts = Vec::new();
    let mut rest = function;
    while !rest.is_empty() {
        let mut len = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_uppercase())
            .map_or(rest.len(), |(i, _)| i);
        for word in UNSPLIT_WORDS {
            if rest.starts_with(word) && len < word.len() {
                len = word.len();
            }
        }
        parts.push(rest[..len].to_string());
        rest = &rest[len..];
    }
    parts
}

/// Strip each matching verb stem in table order.
fn strip_verbs<'f>(lookups: &Lookups, function: &'f str) -> &'f str {
    let mut function = function;
    for (stem, _) in &lookups.verbs {
        if function.len() >= stem.len()
            && function.is_char_boundary(stem.len())
            && function[..stem.len()].eq_ignore_ascii_case(stem)
        {
            function = &function[stem.len()..];
        }
    }
    function
}

/// One-line description of `function` within `scope`.
pub fn summarize(lookups: &Lookups, scope: &str, function: &str) -> String {
    let verb = verb_for(lookups, function);
    let noun = noun_for(lookups, function);
    let parts = split_function_parts(lookups, function);
    let scope = scope.to_lowercase();

    match (verb, noun) {
        (Some(verb), _) if !parts.is_empty() => {
            let words: Vec<String> = parts.iter().map(|p| p.to_lowercase()).collect();
            format!("{} a {} {}.", verb, scope, words.join(" "))
        }
        (Some(verb), Some(noun)) => format!("{} a {}'s {}.", verb, scope, noun),
        _ => format!("{}.", function),
    }
}

/// Markdown table of the caller-visible arguments; empty when there are none.
pub fn argument_table(func: &FunctionRecord) -> String {
    let rows: String = func
        .call_arguments()
        .map(|a| {
            let note = if a.optional { "optional" } else { "" };
            format!("{}|{}|{}\n", a.name, crate::model::type_name(a.ty), note)
        })
        .collect();
    if rows.is_empty() {
        return rows;
    }
    format!("{}{}", ARGUMENT_HEADER, rows)
}

/// Perl snippet calling `func` with placeholder arguments.
pub fn example_for(func: &FunctionRecord) -> String {
    let mut prep = String::new();
    let mut call_args = Vec::new();

    for arg in func.call_arguments() {
        if arg.name.trim() == "..." {
            call_args.push(arg.name.clone());
            continue;
        }
        let placeholder = match arg.ty {
            Some(ValueType::String) => "\"test\"",
            _ => "1",
        };
        prep.push_str(&format!("my ${} = {};\n", arg.name, placeholder));
        call_args.push(format!("${}", arg.name));
    }

    let call = format!("{}{}({})", func.object, func.function, call_args.join(", "));
    if func.returns.is_none() {
        format!(
            "\n```perl\n{}\n{}; # Returns {}\n```",
            prep,
            call,
            func.return_name()
        )
    } else {
        format!(
            "\n```perl\n{}my $val = {};\nquest::say($val); # Returns {}\n```",
            prep,
            call,
            func.return_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Argument;
    use pretty_assertions::assert_eq;

    fn arg(name: &str, ty: Option<ValueType>) -> Argument {
        Argument {
            name: name.to_string(),
            ty,
            optional: false,
        }
    }

    #[test]
    fn verbs_by_prefix() {
        let l = Lookups::default();
        assert_eq!(verb_for(&l, "GetName"), Some("gets"));
        assert_eq!(verb_for(&l, "teleport"), Some("teleports"));
        assert_eq!(verb_for(&l, "IsEngaged"), Some("is"));
        assert_eq!(verb_for(&l, "depop"), None);
    }

    #[test]
    fn nouns_after_verb() {
        let l = Lookups::default();
        assert_eq!(noun_for(&l, "gettaskid"), Some("[task](Task)"));
        assert_eq!(noun_for(&l, "GetAccountID"), Some("[account](Task)"));
        assert_eq!(noun_for(&l, "GetName"), None);
    }

    #[test]
    fn split_camel_case() {
        let l = Lookups::default();
        assert_eq!(split_function_parts(&l, "GetHPRatio"), vec!["H", "P", "Ratio"]);
        assert_eq!(split_function_parts(&l, "GetNPCTypeID"), vec!["NPC", "Type", "ID"]);
        assert_eq!(split_function_parts(&l, "PlayMP3"), vec!["MP3"]);
        // Acronyms stay whole at the end of a name too: `Item`, `ID`, never `I`, `D`.
        assert_eq!(split_function_parts(&l, "GetItemID"), vec!["Item", "ID"]);
        assert_eq!(split_function_parts(&l, "SignalNPC"), vec!["Signal", "NPC"]);
        assert_eq!(split_function_parts(&l, "depop"), vec!["depop"]);
        assert!(split_function_parts(&l, "get").is_empty());
    }

    #[test]
    fn split_snake_case() {
        let l = Lookups::default();
        assert_eq!(
            split_function_parts(&l, "get_zone_id"),
            vec!["", "zone", "id"]
        );
    }

    #[test]
    fn summaries() {
        let l = Lookups::default();
        assert_eq!(summarize(&l, "Client", "GetName"), "gets a client name.");
        assert_eq!(summarize(&l, "Mob", "GetNPCTypeID"), "gets a mob npc type id.");
        assert_eq!(summarize(&l, "Quest", "depop"), "depop.");
    }

    #[test]
    fn example_void() {
        let func = FunctionRecord {
            object: "quest::".into(),
            function: "say".into(),
            scope: "Quest".into(),
            returns: None,
            arguments: vec![arg("message", Some(ValueType::String)), arg("language_id", None)],
        };
        assert_eq!(
            example_for(&func),
            "\n```perl\nmy $message = \"test\";\nmy $language_id = 1;\n\nquest::say($message, $language_id); # Returns void\n```"
        );
    }

    #[test]
    fn example_with_return_skips_receiver() {
        let func = FunctionRecord {
            object: "$client->".into(),
            function: "GetItemAt".into(),
            scope: "Client".into(),
            returns: Some(ValueType::Int),
            arguments: vec![arg("THIS", None), arg("slot", Some(ValueType::Int)), arg("...", None)],
        };
        assert_eq!(
            example_for(&func),
            "\n```perl\nmy $slot = 1;\nmy $val = $client->GetItemAt($slot, ...);\nquest::say($val); # Returns int\n```"
        );
    }

    #[test]
    fn argument_tables() {
        let mut func = FunctionRecord::new("GetName");
        func.arguments = vec![arg("THIS", None)];
        assert_eq!(argument_table(&func), "");

        func.arguments.push(arg("slot", Some(ValueType::Int)));
        func.arguments.push(arg("flag", None));
        func.arguments.push(Argument {
            optional: true,
            ..arg("language_id", Some(ValueType::Int))
        });
        assert_eq!(
            argument_table(&func),
            "**Name**|**Type**|**Description**\n:---|:---|:---\nslot|int|\nflag||\nlanguage_id|int|optional\n"
        );
    }
}
