#![forbid(unsafe_code)]

//! Persistable widget state.
//!
//! A plain record the host can stash across restarts. The loaded cells are
//! stored as a codec token, a traced pattern over them as a second optional
//! token, and the display mode as its stable ordinal.

use tracepad_core::display_mode::DisplayMode;

/// Everything [`PatternView`](crate::PatternView) needs to come back as it
/// was.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedState {
    /// Codec token of every loaded cell, in load order.
    pub serialized_pattern: String,
    /// Codec token of the traced pattern, when it differs from the load
    /// order of `serialized_pattern`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub traced_pattern: Option<String>,
    /// [`DisplayMode::ordinal`] of the saved mode.
    pub display_mode: i32,
    pub input_enabled: bool,
    pub stealth_mode: bool,
    pub haptic_enabled: bool,
}

impl Default for SavedState {
    fn default() -> Self {
        Self {
            serialized_pattern: String::new(),
            traced_pattern: None,
            display_mode: DisplayMode::Correct.ordinal(),
            input_enabled: true,
            stealth_mode: false,
            haptic_enabled: true,
        }
    }
}

#[cfg(feature = "state-persistence")]
impl SavedState {
    /// Serialize to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_an_enabled_empty_correct_pattern() {
        let s = SavedState::default();
        assert!(s.serialized_pattern.is_empty());
        assert!(s.traced_pattern.is_none());
        assert_eq!(s.display_mode, 1);
        assert!(s.input_enabled);
        assert!(!s.stealth_mode);
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn json_layout_uses_field_names() {
        let s = SavedState {
            serialized_pattern: "0011".into(),
            traced_pattern: Some("11".into()),
            display_mode: 3,
            input_enabled: false,
            stealth_mode: true,
            haptic_enabled: false,
        };
        let json = s.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["serialized_pattern"], "0011");
        assert_eq!(value["traced_pattern"], "11");
        assert_eq!(value["display_mode"], 3);
        assert_eq!(SavedState::from_json(&json).unwrap(), s);
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn missing_trace_field_reads_as_untraced() {
        let json = r#"{"serialized_pattern":"0011","display_mode":1,"input_enabled":true,"stealth_mode":false,"haptic_enabled":true}"#;
        let s = SavedState::from_json(json).unwrap();
        assert_eq!(s.serialized_pattern, "0011");
        assert!(s.traced_pattern.is_none());
        let out = SavedState::default().to_json().unwrap();
        assert!(!out.contains("traced_pattern"));
    }
}
