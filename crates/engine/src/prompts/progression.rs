//! Progression snapshot selection for chapter prompts.

use lightnovel_domain::{Progression, ProgressionSnapshot};
use serde_json::Value;

use super::clip;

/// The only tracking fields rendered into a chapter prompt, in render order.
pub const PROGRESSION_PROMPT_KEYS: [&str; 4] = [
    "current_plot_points",
    "unresolved_threads",
    "foreshadowing",
    "next_major_events",
];

pub(crate) const PROGRESSION_FIELD_MAX_CHARS: usize = 300;

/// Selected, clipped progression fields as `(key, value)` pairs.
///
/// Encoded progression is parsed first; text that is not a JSON object
/// yields no entries.
pub fn progression_entries(progression: Option<&Progression>) -> Vec<(&'static str, String)> {
    match progression {
        None => Vec::new(),
        Some(Progression::Snapshot(snapshot)) => snapshot_entries(snapshot),
        Some(Progression::Encoded(raw)) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => select(|key| map.get(key).and_then(value_text)),
            _ => Vec::new(),
        },
    }
}

fn snapshot_entries(snapshot: &ProgressionSnapshot) -> Vec<(&'static str, String)> {
    select(|key| snapshot.get(key).map(str::to_string))
}

fn select(lookup: impl Fn(&str) -> Option<String>) -> Vec<(&'static str, String)> {
    PROGRESSION_PROMPT_KEYS
        .iter()
        .filter_map(|&key| {
            let value = lookup(key)?;
            let value = value.trim();
            (!value.is_empty()).then(|| (key, clip(value, PROGRESSION_FIELD_MAX_CHARS).to_string()))
        })
        .collect()
}

/// Authors sometimes store lists instead of prose; those read as `a; b; c`.
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join("; "),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightnovel_domain::StoryId;

    #[test]
    fn only_selected_keys_in_fixed_order() {
        let snapshot = ProgressionSnapshot::new(StoryId::new(1))
            .with_field("pacing_notes", "slow burn")
            .with_field("next_major_events", "The siege")
            .with_field("current_plot_points", "Escape the capital");
        let entries = progression_entries(Some(&Progression::Snapshot(snapshot)));
        assert_eq!(
            entries,
            vec![
                ("current_plot_points", "Escape the capital".to_string()),
                ("next_major_events", "The siege".to_string()),
            ]
        );
    }

    #[test]
    fn encoded_lists_are_joined() {
        let raw = r#"{"unresolved_threads": ["Who rang the bell", "The missing sister"]}"#;
        let entries = progression_entries(Some(&Progression::Encoded(raw.to_string())));
        assert_eq!(
            entries,
            vec![("unresolved_threads", "Who rang the bell; The missing sister".to_string())]
        );
    }

    #[test]
    fn non_object_json_yields_nothing() {
        for raw in ["[1, 2]", "\"text\"", "{broken", ""] {
            assert!(progression_entries(Some(&Progression::Encoded(raw.to_string()))).is_empty());
        }
        assert!(progression_entries(None).is_empty());
    }

    #[test]
    fn values_are_clipped() {
        let long = "x".repeat(500);
        let snapshot = ProgressionSnapshot::new(StoryId::new(1)).with_field("foreshadowing", long);
        let entries = progression_entries(Some(&snapshot.into()));
        assert_eq!(entries[0].1.chars().count(), PROGRESSION_FIELD_MAX_CHARS);
    }
}
