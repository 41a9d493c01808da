use serde::{Deserialize, Serialize};

/// Requested visibility for one expandable context field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandLevel {
    /// Do not attach the field.
    #[default]
    #[serde(alias = "")]
    None,
    /// A fixed, non-sensitive subset of the object's attributes.
    Summary,
    /// The full object, less fields that are never returned.
    All,
    /// A level this server does not recognize. Treated as omit, not an error.
    #[serde(other)]
    Unknown,
}

impl ExpandLevel {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether the level grants any visibility after redaction.
    #[must_use]
    pub fn grants_visibility(&self) -> bool {
        matches!(self, Self::Summary | Self::All)
    }
}

/// Per-field visibility directive attached to a call.
///
/// Absence of the whole directive means "expand nothing"; absence of a field
/// defaults to [`ExpandLevel::None`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expand {
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub acting_user: ExpandLevel,
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub app: ExpandLevel,
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub channel: ExpandLevel,
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub config: ExpandLevel,
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub post: ExpandLevel,
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub root_post: ExpandLevel,
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub team: ExpandLevel,
    #[serde(skip_serializing_if = "ExpandLevel::is_none")]
    pub user: ExpandLevel,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_default_to_none() {
        let expand: Expand = serde_json::from_value(serde_json::json!({
            "user": "all",
            "channel": "summary",
        }))
        .unwrap();
        assert_eq!(expand.user, ExpandLevel::All);
        assert_eq!(expand.channel, ExpandLevel::Summary);
        assert_eq!(expand.acting_user, ExpandLevel::None);
        assert_eq!(expand.team, ExpandLevel::None);
    }

    #[test]
    fn empty_string_reads_as_none() {
        let expand: Expand =
            serde_json::from_value(serde_json::json!({ "user": "" })).unwrap();
        assert_eq!(expand.user, ExpandLevel::None);
    }

    #[test]
    fn unrecognized_level_reads_as_unknown() {
        let expand: Expand =
            serde_json::from_value(serde_json::json!({ "user": "everything" })).unwrap();
        assert_eq!(expand.user, ExpandLevel::Unknown);
        assert!(!expand.user.grants_visibility());
    }

    #[test]
    fn none_levels_are_omitted_on_the_wire() {
        let expand = Expand {
            user: ExpandLevel::All,
            ..Default::default()
        };
        let value = serde_json::to_value(expand).unwrap();
        assert_eq!(value, serde_json::json!({ "user": "all" }));
    }
}
