use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Default name of the reserved key holding a collection's items.
pub const DEFAULT_SPECIAL_COLLECTION_MEMBER: &str = "__items__";

// -----------------------------------------------------------------------------
// SerializerSettings

/// Configuration consumed by the codecs.
///
/// Missing fields take their default value when deserialized, so a partial
/// configuration file is valid.
///
/// # Examples
///
/// ```
/// use vc_codec::SerializerSettings;
///
/// let settings: SerializerSettings =
///     serde_json::from_str(r#"{ "limit_flow_sequence": 4 }"#).unwrap();
///
/// assert_eq!(settings.limit_flow_sequence, 4);
/// assert_eq!(settings.special_collection_member, "__items__");
/// assert!(!settings.emit_capacity_for_list);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerSettings {
    /// Reserved key for the item sequence of a mapping-shaped collection.
    ///
    /// Must not collide with any member name.
    pub special_collection_member: String,
    /// Sequences with fewer items than this are written in flow style.
    ///
    /// `0` means always block.
    pub limit_flow_sequence: usize,
    /// Whether a collection's `Capacity` member is written.
    pub emit_capacity_for_list: bool,
    /// Whether objects reachable more than once are written with anchors and aliases.
    pub emit_alias: bool,
    /// Whether unknown mapping keys are skipped instead of rejected.
    ///
    /// A skipped node is not typed, so anchors defined inside it are not
    /// registered and a later alias to one of them stays unresolved.
    pub ignore_unmapped: bool,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            special_collection_member: String::from(DEFAULT_SPECIAL_COLLECTION_MEMBER),
            limit_flow_sequence: 0,
            emit_capacity_for_list: false,
            emit_alias: true,
            ignore_unmapped: false,
        }
    }
}
