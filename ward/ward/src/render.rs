//! Text and JSON views of registry data. Every function returns the lines
//! to print so the menu session can be tested without a terminal.

use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use ward_index::{LevelEntry, SearchTree};
use ward_record::{PatientRecord, Priority};
use ward_registry::{DischargeHistory, Registry, Statistics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputMode {
    Text,
    Json,
}

fn json_lines(value: &JsonValue) -> Vec<String> {
    match serde_json::to_string_pretty(value) {
        Ok(s) => s.lines().map(str::to_string).collect(),
        Err(e) => vec![format!("error: failed to encode JSON: {e}")],
    }
}

/// `value` as JSON, or an `{"error": ...}` object when it cannot be encoded.
fn to_json<T: Serialize + ?Sized>(value: &T) -> JsonValue {
    serde_json::to_value(value).unwrap_or_else(|e| json!({ "error": e.to_string() }))
}

fn patients_json(patients: &[PatientRecord]) -> JsonValue {
    to_json(patients)
}

pub fn patient(p: &PatientRecord, mode: OutputMode) -> Vec<String> {
    match mode {
        OutputMode::Text => vec![p.to_string()],
        OutputMode::Json => json_lines(&to_json(p)),
    }
}

pub fn patient_list(patients: &[PatientRecord], mode: OutputMode) -> Vec<String> {
    match mode {
        OutputMode::Text => {
            if patients.is_empty() {
                return vec!["No patients found!".to_string()];
            }
            let mut lines: Vec<String> = patients.iter().map(ToString::to_string).collect();
            lines.push(format!("Total: {} patients", patients.len()));
            lines
        }
        OutputMode::Json => json_lines(&patients_json(patients)),
    }
}

pub fn priority_groups(reg: &Registry, mode: OutputMode) -> Vec<String> {
    match mode {
        OutputMode::Text => {
            let mut lines = Vec::new();
            for tier in Priority::ALL {
                lines.push(format!("{tier} PATIENTS:"));
                lines.extend(patient_list(&reg.by_priority(tier), mode));
            }
            lines
        }
        OutputMode::Json => {
            let mut obj = serde_json::Map::new();
            for tier in Priority::ALL {
                obj.insert(tier.label().to_string(), patients_json(&reg.by_priority(tier)));
            }
            json_lines(&JsonValue::Object(obj))
        }
    }
}

pub fn statistics(stats: &Statistics, mode: OutputMode) -> Vec<String> {
    match mode {
        OutputMode::Text => vec![
            format!("Total Patients: {}", stats.total_patients),
            format!("Tree Height (ID BST): {}", stats.ordered_height),
            format!("Tree Height (AVL): {}", stats.balanced_height),
            format!("AVL Tree Balanced: {}", if stats.balanced { "Yes" } else { "No" }),
            format!("Indices In Sync: {}", if stats.indices_in_sync { "Yes" } else { "No" }),
            "Patients by Priority:".to_string(),
            format!("  Emergency: {}", stats.emergency),
            format!("  Critical: {}", stats.critical),
            format!("  Non-Critical: {}", stats.non_critical),
            format!("Average Priority: {:.2}", stats.average_priority),
            format!("Discharged: {}", stats.discharged),
        ],
        OutputMode::Json => json_lines(&to_json(stats)),
    }
}

fn levels_json<B>(tree: &SearchTree<B>) -> JsonValue {
    let levels: Vec<Vec<JsonValue>> = tree
        .levels()
        .iter()
        .map(|level| {
            level
                .iter()
                .map(|LevelEntry { id, deleted }| json!({ "id": id, "deleted": deleted }))
                .collect()
        })
        .collect();
    json!({ "height": tree.height(), "size": tree.size(), "levels": levels })
}

pub fn trees(reg: &Registry, mode: OutputMode) -> Vec<String> {
    match mode {
        OutputMode::Text => {
            let (ordered, balanced) = reg.tree_dumps();
            let mut lines = vec!["=== ID BST STRUCTURE ===".to_string()];
            lines.extend(ordered.lines().map(str::to_string));
            lines.push("=== AVL STRUCTURE ===".to_string());
            lines.extend(balanced.lines().map(str::to_string));
            lines
        }
        OutputMode::Json => json_lines(&json!({
            "ordered": levels_json(reg.ordered_index()),
            "balanced": levels_json(reg.balanced_index()),
        })),
    }
}

pub fn history(hist: &DischargeHistory, mode: OutputMode) -> Vec<String> {
    match mode {
        OutputMode::Text => {
            let mut lines = vec!["=== DISCHARGED PATIENT HISTORY ===".to_string()];
            lines.extend(hist.entries().iter().map(ToString::to_string));
            lines.push(format!("Total: {} patients", hist.len()));
            lines
        }
        OutputMode::Json => json_lines(&patients_json(hist.entries())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_a_message() {
        assert_eq!(patient_list(&[], OutputMode::Text), vec!["No patients found!"]);
        assert_eq!(patient_list(&[], OutputMode::Json), vec!["[]"]);
    }

    #[test]
    fn text_list_ends_with_total() {
        let reg = Registry::with_sample_data();
        let lines = patient_list(&reg.patients(), OutputMode::Text);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.last().map(String::as_str), Some("Total: 5 patients"));
    }

    #[test]
    fn tree_json_carries_both_indices() {
        let reg = Registry::with_sample_data();
        let text = trees(&reg, OutputMode::Json).join("\n");
        let v: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(v["balanced"]["height"], 3);
        assert_eq!(v["ordered"]["height"], 5);
        assert_eq!(v["balanced"]["levels"][0][0]["id"], 102);
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no JSON form"))
        }
    }

    #[test]
    fn encoding_failures_become_error_objects() {
        assert_eq!(to_json(&Unencodable), json!({ "error": "no JSON form" }));
        let reg = Registry::with_sample_data();
        let text = patient(reg.search(101).unwrap(), OutputMode::Json).join("\n");
        let v: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(v["id"], 101);
        let text = statistics(&reg.statistics(), OutputMode::Json).join("\n");
        let v: JsonValue = serde_json::from_str(&text).unwrap();
        assert_eq!(v["total_patients"], 5);
    }

    #[test]
    fn priority_groups_list_every_tier() {
        let reg = Registry::with_sample_data();
        let lines = priority_groups(&reg, OutputMode::Text);
        assert!(lines.iter().any(|l| l == "EMERGENCY PATIENTS:"));
        assert!(lines.iter().any(|l| l == "NON_CRITICAL PATIENTS:"));
    }
}
