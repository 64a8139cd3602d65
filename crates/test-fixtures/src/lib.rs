//! Loader for the golden diagnosis scenarios shared by the workspace tests.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // Walk up from whichever crate is running the tests.
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// All JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Load every scenario in a subdirectory, in file-name order.
pub fn load_scenarios<T: DeserializeOwned>(subdir: &str) -> Vec<T> {
    list_fixtures(subdir)
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
            serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
        })
        .collect()
}

/// Token-level backward query against the built-in catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CausalScenario {
    pub name: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub dtcs: Vec<String>,
    pub expected: CausalExpectation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CausalExpectation {
    pub candidate_count: usize,
    /// Leading failure ids, in rank order.
    #[serde(default)]
    pub ranking_prefix: Vec<String>,
    #[serde(default)]
    pub top_probability: Option<f64>,
}

/// A sensor reading as recorded in a session scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorReading {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

/// End-to-end session scenario: free text, codes and readings in, diagnosis out.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionScenario {
    pub name: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub dtcs: Vec<String>,
    #[serde(default)]
    pub sensors: Vec<SensorReading>,
    pub expected: SessionExpectation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionExpectation {
    pub primary: String,
    pub phase: String,
    /// Evidence tokens the session must have accumulated, in arrival order.
    #[serde(default)]
    pub evidence: Vec<String>,
    #[serde(default)]
    pub min_confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn causal_scenarios_parse() {
        let scenarios: Vec<CausalScenario> = load_scenarios("golden/causal");
        assert!(scenarios.len() >= 4);
        assert!(scenarios.iter().all(|s| !s.name.is_empty()));
    }

    #[test]
    fn session_scenarios_parse() {
        let scenarios: Vec<SessionScenario> = load_scenarios("golden/session");
        assert!(scenarios.len() >= 3);
    }

    #[test]
    fn every_golden_file_is_valid_json() {
        for dir in ["golden/causal", "golden/session"] {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file).unwrap();
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
            }
        }
    }
}
