//! Binding parser: scans XS source files for usage strings, argument
//! declarations, return pushes and event exports.
//!
//! One [`Parser`] handles both the plain binding files and the event
//! dispatcher; [`ParseOptions::events`] switches the event probes on.

mod normalize;
mod scan;

use crate::config::Lookups;
use crate::error::{GenError, Result};
use crate::model::*;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

/// Characters dropped from argument names (`[`, `]`, `?`).
const BRACKET_PATTERN: &str = r"\]+|\[+|\?+";

/// A C declaration feeding a variable, e.g. `int item_id = (int)SvIV(ST(0));`.
const DECLARATION_PATTERN: &str =
    r"(unsigned long|long|int32|bool|uint[0-9]+|int|auto|float|unsigned int|char[ \*]).+([. a-zA-Z]+=)";

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Recognize `case EVENT_*` labels and `ExportVar` calls.
    pub events: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { events: true }
    }
}

/// Everything extracted from one source file.
#[derive(Debug, Default)]
pub struct FileScan {
    pub functions: Vec<FunctionRecord>,
    pub events: Vec<EventRecord>,
    /// Argument name → every function using it, with the type it resolved to.
    pub argument_uses: BTreeMap<String, Vec<ArgumentUse>>,
}

pub struct Parser<'a> {
    lookups: &'a Lookups,
    options: ParseOptions,
    brackets: Regex,
    declaration: Regex,
}

impl<'a> Parser<'a> {
    pub fn new(lookups: &'a Lookups, options: ParseOptions) -> Result<Self> {
        let brackets = Regex::new(BRACKET_PATTERN).map_err(|source| GenError::Regex {
            name: "bracket",
            source,
        })?;
        let declaration =
            Regex::new(DECLARATION_PATTERN).map_err(|source| GenError::Regex {
                name: "type",
                source,
            })?;
        Ok(Self {
            lookups,
            options,
            brackets,
            declaration,
        })
    }

    /// Scan `target` (resolved against `root`) and normalize its records.
    pub fn parse_file(&self, target: &SourceTarget, root: &Path) -> Result<FileScan> {
        let path = root.join(&target.path);
        let file = File::open(&path).map_err(|source| GenError::Open {
            path: path.clone(),
            source,
        })?;

        // Binding sources are not guaranteed to be clean UTF-8.
        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(|source| GenError::Read {
                path: path.clone(),
                source,
            })?;

        Ok(self.parse_str(target, &String::from_utf8_lossy(&bytes)))
    }

    /// Scan in-memory source text as if it were the file of `target`.
    pub fn parse_str(&self, target: &SourceTarget, input: &str) -> FileScan {
        let mut state = scan::ScanState::default();
        for (idx, line) in input.lines().enumerate() {
            self.scan_line(&mut state, idx + 1, line);
        }
        self.finish(target, state)
    }

    fn finish(&self, target: &SourceTarget, mut state: scan::ScanState) -> FileScan {
        state.finish();
        report(&target.scope, &state.argument_uses);

        FileScan {
            functions: normalize::normalize(target, state.functions, self.lookups),
            events: state.events,
            argument_uses: state.argument_uses,
        }
    }
}

/// Log which argument names never resolved to a type.
fn report(scope: &str, uses: &BTreeMap<String, Vec<ArgumentUse>>) {
    info!("=========={}==========", scope);
    let mut found = 0;
    let mut missing = 0;
    for (name, list) in uses {
        if name == "THIS" {
            continue;
        }
        if list.iter().any(|u| u.ty.is_none()) {
            let detail = list
                .iter()
                .map(|u| format!("{}({} {})", u.function, type_name(u.ty), name))
                .collect::<Vec<_>>()
                .join(", ");
            warn!("{} used by {} functions: {}", name, list.len(), detail);
            missing += 1;
        } else {
            found += 1;
        }
    }
    info!(
        "{} functions properly identified, {} have errors",
        found, missing
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GENERAL_SCOPE;
    use pretty_assertions::assert_eq;

    fn general() -> SourceTarget {
        SourceTarget::new("zone/embparser_api.cpp", GENERAL_SCOPE).with_replace("quest")
    }

    #[test]
    fn additem_end_to_end() {
        let input = r#"
XS(XS__additem) {
	dXSARGS;
	if (items < 1 || items > 2)
		Perl_croak(aTHX_ "Usage: quest::additem(int item_id, int quantity)");
	int item_id = (int) SvIV(ST(0));
	int quantity = (int) SvIV(ST(1));
	dXSTARG;
	XSprePUSH;
	PUSHi((IV) quest_manager.additem(item_id, quantity));
	XSRETURN(1);
}
"#;
        let lookups = Lookups::default();
        let parser = Parser::new(&lookups, ParseOptions::default()).unwrap();
        let scan = parser.parse_str(&general(), input);

        assert_eq!(scan.functions.len(), 1);
        let f = &scan.functions[0];
        assert_eq!(f.function, "additem");
        assert_eq!(f.object, "quest::");
        assert_eq!(f.scope, "Quest");
        assert_eq!(f.return_name(), "int");
        let args: Vec<_> = f
            .arguments
            .iter()
            .map(|a| (a.name.as_str(), a.ty))
            .collect();
        assert_eq!(
            args,
            vec![("item_id", Some(ValueType::Int)), ("quantity", Some(ValueType::Int))]
        );
    }

    #[test]
    fn client_method() {
        let input = r#"
XS(XS_Client_GetName) {
	dXSARGS;
	if (items != 2)
		Perl_croak(aTHX_ "Usage: Client::SetLevel(THIS, uint8 set_level)");
	Client* THIS;
	uint8 set_level = (uint8) SvUV(ST(1));
}
"#;
        let lookups = Lookups::default();
        let parser = Parser::new(&lookups, ParseOptions::default()).unwrap();
        let scan = parser.parse_str(&SourceTarget::new("zone/perl_client.cpp", "Client"), input);

        let f = &scan.functions[0];
        assert_eq!(f.function, "SetLevel");
        assert_eq!(f.object, "$client->");
        assert_eq!(f.scope, "Client");
        assert_eq!(f.return_name(), "void");
        assert_eq!(f.arguments[1].name, "set_level");
        assert_eq!(f.arguments[1].ty, Some(ValueType::Uint));
        assert!(scan.argument_uses.contains_key("THIS"));
    }

    #[test]
    fn known_argument_type_survives_declaration() {
        let input = r#"
		Perl_croak(aTHX_ "Usage: Client::SummonItem(THIS, uint32 item_id)");
	{
		Client* THIS;
		uint32 item_id = (uint32) SvUV(ST(1));
	}
"#;
        let lookups = Lookups::default();
        let parser = Parser::new(&lookups, ParseOptions::default()).unwrap();
        let client = SourceTarget::new("zone/perl_client.cpp", "Client");

        let with_decl = parser.parse_str(&client, input);
        let without = parser.parse_str(
            &client,
            "\t\tPerl_croak(aTHX_ \"Usage: Client::SummonItem(THIS, uint32 item_id)\");\n",
        );

        for scan in [&with_decl, &without] {
            let arg = &scan.functions[0].arguments[1];
            assert_eq!(arg.name, "item_id");
            assert_eq!(arg.ty, lookups.argument_type("item_id"));
            assert_eq!(arg.ty, Some(ValueType::Int));
        }
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let lookups = Lookups::default();
        let parser = Parser::new(&lookups, ParseOptions::default()).unwrap();
        let err = parser
            .parse_file(&general(), Path::new("/nonexistent/root"))
            .unwrap_err();
        assert!(matches!(err, GenError::Open { .. }));
    }
}
