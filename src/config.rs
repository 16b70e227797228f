//! Static configuration: the binding file table and the lookup tables the
//! scanner and grouper consult.
//!
//! Tables are plain data; [`Lookups`] indexes them once at startup and is then
//! shared read-only by every stage.

use crate::model::{SourceTarget, ValueType};
use std::collections::HashMap;
use std::path::PathBuf;

/// Scope whose functions live in the script's global namespace.
pub const GENERAL_SCOPE: &str = "General";

/// Namespace prefix used for every `General` function.
pub const GENERAL_NAMESPACE: &str = "quest::";

/// Scope of the file that dispatches script events.
pub const EVENT_SCOPE: &str = "Event";

/// The binding files, in processing order.
pub fn targets() -> Vec<SourceTarget> {
    vec![
        SourceTarget::new("zone/embparser_api.cpp", GENERAL_SCOPE).with_replace("quest"),
        SourceTarget::new("zone/perl_client.cpp", "Client"),
        SourceTarget::new("zone/perl_doors.cpp", "Doors").with_replace("door"),
        SourceTarget::new("zone/perl_entity.cpp", "EntityList"),
        SourceTarget::new("zone/perl_groups.cpp", "Group"),
        SourceTarget::new("zone/perl_hateentry.cpp", "HateEntry"),
        SourceTarget::new("zone/perl_mob.cpp", "Mob"),
        SourceTarget::new("zone/perl_npc.cpp", "NPC"),
        SourceTarget::new("zone/perl_object.cpp", "Object"),
        SourceTarget::new("zone/perl_perlpacket.cpp", "PerlPacket").with_replace("packet"),
        SourceTarget::new("zone/perl_player_corpse.cpp", "Corpse"),
        SourceTarget::new("zone/perl_QuestItem.cpp", "QuestItem"),
        SourceTarget::new("zone/perl_raids.cpp", "Raid"),
        SourceTarget::new("zone/embparser.cpp", EVENT_SCOPE),
    ]
}

/// Runtime settings assembled by the CLI.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory the target paths are relative to.
    pub source_root: PathBuf,
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// Scan for event cases and exports; when off the event file is skipped too.
    pub events: bool,
    /// RFC3339 timestamp written into page footers.
    pub generated_on: String,
}

impl Settings {
    /// Targets to scan under these settings.
    pub fn targets(&self) -> Vec<SourceTarget> {
        targets()
            .into_iter()
            .filter(|t| self.events || t.scope != EVENT_SCOPE)
            .collect()
    }
}

// -- Lookup tables ------------------------------------------------------------

/// Calls that put a return value on the Perl stack, checked in order.
const RETURN_MARKERS: &[(&str, ValueType)] = &[
    ("boolSV(", ValueType::Bool),
    ("PUSHu(", ValueType::Uint),
    ("PUSHi(", ValueType::Int),
    ("sv_setpv(", ValueType::String),
    ("PUSHn(", ValueType::Double),
];

/// Leading verb stems and the verb used in summaries.
const VERBS: &[(&str, &str)] = &[
    ("get", "gets"),
    ("send", "sends"),
    ("set", "sets"),
    ("teleport", "teleports"),
    ("is", "is"),
    ("play", "plays"),
    ("add", "adds"),
];

const NOUNS: &[(&str, &str)] = &[
    ("taskid", "[task](Task)"),
    ("account_id", "[account](Task)"),
    ("accountid", "[account](Task)"),
];

/// Parameter names whose type is known regardless of the surrounding code.
const KNOWN_ARGUMENT_TYPES: &[(&str, ValueType)] = &[
    ("activity_id", ValueType::Uint),
    ("alt_mode", ValueType::Bool),
    ("anim_num", ValueType::Int),
    ("best_z", ValueType::Float),
    ("buttons", ValueType::Int),
    ("channel_id", ValueType::Int),
    ("char_id", ValueType::Int),
    ("charges", ValueType::Int),
    ("class_id", ValueType::Int),
    ("client_name", ValueType::String),
    ("color", ValueType::Int),
    ("color_id", ValueType::Int),
    ("condition_id", ValueType::Int),
    ("copper", ValueType::Int),
    ("count", ValueType::Int),
    ("debug_level", ValueType::Int),
    ("decay_time", ValueType::Int),
    ("dest_heading", ValueType::Float),
    ("dest_x", ValueType::Float),
    ("dest_y", ValueType::Float),
    ("dest_z", ValueType::Float),
    ("in_lastname", ValueType::String),
    ("distance", ValueType::Int),
    ("door_id", ValueType::Int),
    ("value", ValueType::Int),
    ("cost", ValueType::Int),
    ("slot", ValueType::Int),
    ("type", ValueType::Int),
    ("iSendToSelf", ValueType::Int),
    ("iFromDB", ValueType::Bool),
    ("duration", ValueType::Int),
    ("effect_id", ValueType::Int),
    ("elite_material_id", ValueType::Int),
    ("enforce_level_requirement", ValueType::Bool),
    ("explore_id", ValueType::Uint),
    ("faction_value", ValueType::Int),
    ("fade_in", ValueType::Int),
    ("fade_out", ValueType::Int),
    ("fadeout", ValueType::Uint),
    ("firstname", ValueType::String),
    ("format", ValueType::String),
    ("from", ValueType::String),
    ("gender_id", ValueType::Int),
    ("gold", ValueType::Int),
    ("grid_id", ValueType::Int),
    ("guild_rank_id", ValueType::Int),
    ("heading", ValueType::Float),
    ("hero_forge_model_id", ValueType::Int),
    ("ignore_quest_update", ValueType::Bool),
    ("instance_id", ValueType::Int),
    ("int_unused", ValueType::Int),
    ("int_value", ValueType::Int),
    ("is_enabled", ValueType::Bool),
    ("is_strict", ValueType::Bool),
    ("item_id", ValueType::Int),
    ("key", ValueType::String),
    ("language_id", ValueType::Int),
    ("lastname", ValueType::String),
    ("leader_name", ValueType::String),
    ("level", ValueType::Int),
    ("link_name", ValueType::String),
    ("macro_id", ValueType::Int),
    ("max_level", ValueType::Int),
    ("max_x", ValueType::Float),
    ("max_y", ValueType::Float),
    ("max_z", ValueType::Float),
    ("message", ValueType::String),
    ("milliseconds", ValueType::Int),
    ("min_level", ValueType::Int),
    ("min_x", ValueType::Float),
    ("min_y", ValueType::Float),
    ("min_z", ValueType::Float),
    ("name", ValueType::String),
    ("new_hour", ValueType::Int),
    ("new_min", ValueType::Int),
    ("node1", ValueType::Int),
    ("node2", ValueType::Int),
    ("npc_id", ValueType::Int),
    ("npc_type_id", ValueType::Int),
    ("object_type", ValueType::Int),
    ("options", ValueType::Int),
    ("platinum", ValueType::Int),
    ("popup_id", ValueType::Int),
    ("priority", ValueType::Int),
    ("quantity", ValueType::Int),
    ("race_id", ValueType::Int),
    ("remove_item", ValueType::Bool),
    ("requested_id", ValueType::Int),
    ("reset_base", ValueType::Bool),
    ("saveguard", ValueType::Bool),
    ("seconds", ValueType::Int),
    ("send_to_world", ValueType::Bool),
    ("signal_id", ValueType::Int),
    ("silent", ValueType::Bool),
    ("silver", ValueType::Int),
    ("size", ValueType::Int),
    ("spell_id", ValueType::Int),
    ("stat_id", ValueType::Int),
    ("str_value", ValueType::String),
    ("subject", ValueType::String),
    ("target_enum", ValueType::String),
    ("target_id", ValueType::Int),
    ("task", ValueType::Int),
    ("task_id", ValueType::Uint),
    ("task_id1", ValueType::Int),
    ("number", ValueType::Int),
    ("task_id10", ValueType::Int),
    ("task_id2", ValueType::Int),
    ("task_set", ValueType::Int),
    ("taskid", ValueType::Int),
    ("taskid1", ValueType::Int),
    ("taskid2", ValueType::Int),
    ("taskid3", ValueType::Int),
    ("taskid4", ValueType::Int),
    ("teleport", ValueType::Int),
    ("temp", ValueType::Int),
    ("texture_id", ValueType::Int),
    ("theme_id", ValueType::Int),
    ("update_world", ValueType::Int),
    ("updated_time_till_repop", ValueType::Uint),
    ("version", ValueType::Int),
    ("wait_ms", ValueType::Int),
    ("window_title", ValueType::String),
    ("x", ValueType::Float),
    ("y", ValueType::Float),
    ("z", ValueType::Float),
    ("zone_id", ValueType::Int),
    ("zone_short", ValueType::String),
    ("task_id%i", ValueType::Int),
];

/// Types of variables exported to event handlers.
const KNOWN_EVENT_TYPES: &[(&str, ValueType)] = &[
    ("activity_id", ValueType::Int),
    ("caster_id", ValueType::Int),
    ("charid", ValueType::Int),
    ("class", ValueType::Int),
    ("clicker_id", ValueType::Int),
    ("combat_state", ValueType::Int),
    ("copper", ValueType::Int),
    ("corpse", ValueType::Int),
    ("data", ValueType::String),
    ("donecount", ValueType::Int),
    ("doorid", ValueType::Int),
    ("env_damage", ValueType::Int),
    ("env_damage_type", ValueType::Int),
    ("env_final_damage", ValueType::Int),
    ("faction", ValueType::Int),
    ("fished_item", ValueType::Int),
    ("foraged_item", ValueType::Int),
    ("gold", ValueType::Int),
    ("grouped", ValueType::Int),
    ("h", ValueType::Int),
    ("hate_state", ValueType::Int),
    ("hpevent", ValueType::Int),
    ("hpratio", ValueType::Int),
    ("inchpevent", ValueType::Int),
    ("instanceid", ValueType::Int),
    ("instanceversion", ValueType::Int),
    ("itemid", ValueType::Int),
    ("itemname", ValueType::String),
    ("killed", ValueType::Int),
    ("killed_npc_id", ValueType::Int),
    ("killer_damage", ValueType::Int),
    ("killer_id", ValueType::Int),
    ("killer_skill", ValueType::Int),
    ("killer_spell", ValueType::Int),
    ("langid", ValueType::Int),
    ("looted_charges", ValueType::Int),
    ("looted_id", ValueType::Int),
    ("mlevel", ValueType::Int),
    ("mname", ValueType::String),
    ("mobid", ValueType::Int),
    ("name", ValueType::String),
    ("objectid", ValueType::Int),
    ("option", ValueType::Int),
    ("picked_up_entity_id", ValueType::Int),
    ("picked_up_id", ValueType::Int),
    ("platinum", ValueType::Int),
    ("popupid", ValueType::Int),
    ("quantity", ValueType::Int),
    ("race", ValueType::Int),
    ("raided", ValueType::Int),
    ("recipe_id", ValueType::Int),
    ("recipe_name", ValueType::String),
    ("resurrect", ValueType::Int),
    ("signal", ValueType::Int),
    ("silver", ValueType::Int),
    ("skill_id", ValueType::Int),
    ("skill_level", ValueType::Int),
    ("slotid", ValueType::Int),
    ("spawned_entity_id", ValueType::Int),
    ("spawned_npc_id", ValueType::Int),
    ("spell_id", ValueType::Int),
    ("status", ValueType::Int),
    ("target_zone_id", ValueType::Int),
    ("targetid", ValueType::Int),
    ("targetname", ValueType::String),
    ("task_id", ValueType::Int),
    ("text", ValueType::String),
    ("timer", ValueType::Int),
    ("uguild_id", ValueType::Int),
    ("uguildrank", ValueType::Int),
    ("ulevel", ValueType::Int),
    ("userid", ValueType::Int),
    ("version", ValueType::Int),
    ("wp", ValueType::Int),
    ("x", ValueType::Int),
    ("y", ValueType::Int),
    ("z", ValueType::Int),
    ("zonehour", ValueType::Int),
    ("zoneid", ValueType::Int),
    ("zoneln", ValueType::String),
    ("zonemin", ValueType::Int),
    ("zonesn", ValueType::String),
    ("zonetime", ValueType::Int),
    ("zoneweather", ValueType::Int),
];

/// Indexed lookup tables, built once and passed to the parser and grouper.
#[derive(Debug, Clone)]
pub struct Lookups {
    pub return_markers: Vec<(String, ValueType)>,
    pub verbs: Vec<(String, String)>,
    pub nouns: Vec<(String, String)>,
    pub argument_types: HashMap<String, ValueType>,
    pub event_types: HashMap<String, ValueType>,
}

impl Default for Lookups {
    fn default() -> Self {
        Self {
            return_markers: RETURN_MARKERS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            verbs: pairs(VERBS),
            nouns: pairs(NOUNS),
            argument_types: KNOWN_ARGUMENT_TYPES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            event_types: KNOWN_EVENT_TYPES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }
}

impl Lookups {
    /// Type of the first return marker found in `line`.
    pub fn return_type(&self, line: &str) -> Option<ValueType> {
        self.return_markers
            .iter()
            .find(|(marker, _)| line.contains(marker.as_str()))
            .map(|(_, ty)| *ty)
    }

    pub fn argument_type(&self, name: &str) -> Option<ValueType> {
        self.argument_types.get(name).copied()
    }

    pub fn event_type(&self, name: &str) -> Option<ValueType> {
        self.event_types.get(name).copied()
    }
}

fn pairs(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_markers_first_match_wins() {
        let lookups = Lookups::default();
        assert_eq!(
            lookups.return_type("ST(0) = boolSV(RETVAL); PUSHi(1);"),
            Some(ValueType::Bool)
        );
        assert_eq!(lookups.return_type("PUSHn((double)RETVAL);"), Some(ValueType::Double));
        assert_eq!(lookups.return_type("XSRETURN_EMPTY;"), None);
    }

    #[test]
    fn known_argument_types() {
        let lookups = Lookups::default();
        assert_eq!(lookups.argument_type("item_id"), Some(ValueType::Int));
        assert_eq!(lookups.argument_type("task_id"), Some(ValueType::Uint));
        assert_eq!(lookups.argument_type("task_id%i"), Some(ValueType::Int));
        assert_eq!(lookups.argument_type("THIS"), None);
    }

    #[test]
    fn event_target_dropped_without_events() {
        let settings = Settings {
            source_root: PathBuf::from("."),
            output_dir: PathBuf::from("out"),
            manifest_path: PathBuf::from("perlsample.yml"),
            events: false,
            generated_on: String::new(),
        };
        let scopes: Vec<_> = settings.targets().into_iter().map(|t| t.scope).collect();
        assert_eq!(scopes.len(), 13);
        assert!(!scopes.iter().any(|s| s == EVENT_SCOPE));
    }
}
