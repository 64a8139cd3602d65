//! Validated, immutable registry of authored knowledge with lookup indexes.

use std::collections::HashMap;
use std::sync::Arc;

use torque_core::errors::{KnowledgeError, TorqueResult};

use crate::model::{ComponentDef, FailureMode, SystemDef};

/// Accumulates systems, components, and failure modes, rejecting
/// inconsistencies as they are added.
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    systems: Vec<SystemDef>,
    components: Vec<ComponentDef>,
    failures: Vec<Arc<FailureMode>>,
    system_ids: HashMap<String, usize>,
    component_ids: HashMap<String, usize>,
    failure_ids: HashMap<String, usize>,
}

impl KnowledgeBaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_system(&mut self, system: SystemDef) -> TorqueResult<&mut Self> {
        if self.system_ids.contains_key(&system.id) {
            return Err(KnowledgeError::DuplicateSystem { id: system.id }.into());
        }
        self.system_ids.insert(system.id.clone(), self.systems.len());
        self.systems.push(system);
        Ok(self)
    }

    pub fn add_component(&mut self, component: ComponentDef) -> TorqueResult<&mut Self> {
        if self.component_ids.contains_key(&component.id) {
            return Err(KnowledgeError::DuplicateComponent { id: component.id }.into());
        }
        if !self.system_ids.contains_key(&component.system_id) {
            return Err(KnowledgeError::UnknownSystem {
                owner: component.id,
                system_id: component.system_id,
            }
            .into());
        }
        self.component_ids
            .insert(component.id.clone(), self.components.len());
        self.components.push(component);
        Ok(self)
    }

    /// Register a failure mode. Duplicate ids are rejected, never overwritten.
    ///
    /// Expected DTCs are stored trimmed and upper-cased whichever way the
    /// record was built.
    pub fn add_failure(&mut self, mut failure: FailureMode) -> TorqueResult<&mut Self> {
        if self.failure_ids.contains_key(&failure.id) {
            return Err(KnowledgeError::DuplicateFailure { id: failure.id }.into());
        }
        if !failure.relative_frequency.is_finite() || failure.relative_frequency < 0.0 {
            return Err(KnowledgeError::InvalidFrequency {
                id: failure.id,
                value: failure.relative_frequency,
            }
            .into());
        }
        if !self.system_ids.contains_key(&failure.system_id) {
            return Err(KnowledgeError::UnknownSystem {
                owner: failure.id,
                system_id: failure.system_id,
            }
            .into());
        }
        let component = self
            .component_ids
            .get(&failure.component_id)
            .map(|&idx| &self.components[idx]);
        match component {
            None => {
                return Err(KnowledgeError::UnknownComponent {
                    owner: failure.id,
                    component_id: failure.component_id,
                }
                .into());
            }
            Some(c) if c.system_id != failure.system_id => {
                return Err(KnowledgeError::ComponentSystemMismatch {
                    failure_id: failure.id.clone(),
                    component_id: failure.component_id.clone(),
                    expected: failure.system_id.clone(),
                    actual: c.system_id.clone(),
                }
                .into());
            }
            Some(_) => {}
        }
        failure.expected_dtcs = normalize_dtcs(&failure.expected_dtcs);
        self.failure_ids
            .insert(failure.id.clone(), self.failures.len());
        self.failures.push(Arc::new(failure));
        Ok(self)
    }

    /// Freeze into an immutable, indexed knowledge base.
    pub fn build(self) -> KnowledgeBase {
        let mut by_system: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_component: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_dtc: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, failure) in self.failures.iter().enumerate() {
            by_system
                .entry(failure.system_id.clone())
                .or_default()
                .push(idx);
            by_component
                .entry(failure.component_id.clone())
                .or_default()
                .push(idx);
            for code in &failure.expected_dtcs {
                let slot = by_dtc.entry(code.clone()).or_default();
                if !slot.contains(&idx) {
                    slot.push(idx);
                }
            }
        }

        tracing::info!(
            systems = self.systems.len(),
            components = self.components.len(),
            failures = self.failures.len(),
            "knowledge base loaded"
        );

        KnowledgeBase {
            systems: self.systems,
            components: self.components,
            failures: self.failures,
            system_ids: self.system_ids,
            component_ids: self.component_ids,
            failure_ids: self.failure_ids,
            by_system,
            by_component,
            by_dtc,
        }
    }
}

fn normalize_dtcs(codes: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.trim().to_ascii_uppercase();
        if !code.is_empty() && !normalized.contains(&code) {
            normalized.push(code);
        }
    }
    normalized
}

/// Read-only knowledge registry. Safe to share across threads.
#[derive(Debug)]
pub struct KnowledgeBase {
    systems: Vec<SystemDef>,
    components: Vec<ComponentDef>,
    failures: Vec<Arc<FailureMode>>,
    system_ids: HashMap<String, usize>,
    component_ids: HashMap<String, usize>,
    failure_ids: HashMap<String, usize>,
    by_system: HashMap<String, Vec<usize>>,
    by_component: HashMap<String, Vec<usize>>,
    by_dtc: HashMap<String, Vec<usize>>,
}

impl KnowledgeBase {
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::new()
    }

    /// All failure modes in registration order.
    pub fn failures(&self) -> &[Arc<FailureMode>] {
        &self.failures
    }

    pub fn systems(&self) -> &[SystemDef] {
        &self.systems
    }

    pub fn components(&self) -> &[ComponentDef] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn get_failure_by_id(&self, id: &str) -> Option<&Arc<FailureMode>> {
        self.failure_ids.get(id).map(|&idx| &self.failures[idx])
    }

    pub fn get_system(&self, id: &str) -> Option<&SystemDef> {
        self.system_ids.get(id).map(|&idx| &self.systems[idx])
    }

    pub fn get_component(&self, id: &str) -> Option<&ComponentDef> {
        self.component_ids.get(id).map(|&idx| &self.components[idx])
    }

    pub fn get_failures_for_system(&self, system_id: &str) -> Vec<&Arc<FailureMode>> {
        self.collect(self.by_system.get(system_id))
    }

    pub fn get_failures_for_component(&self, component_id: &str) -> Vec<&Arc<FailureMode>> {
        self.collect(self.by_component.get(component_id))
    }

    /// Ids of failures that list `code` as an expected DTC.
    pub fn get_failures_for_dtc(&self, code: &str) -> Vec<&str> {
        self.by_dtc
            .get(&code.trim().to_ascii_uppercase())
            .map(|idxs| idxs.iter().map(|&i| self.failures[i].id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Ids of failures with an authored symptom whose description contains
    /// `text` (case-insensitive).
    pub fn get_failures_for_symptom(&self, text: &str) -> Vec<&str> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.failures
            .iter()
            .filter(|f| {
                f.symptoms
                    .iter()
                    .any(|s| s.description.to_lowercase().contains(&needle))
            })
            .map(|f| f.id.as_str())
            .collect()
    }

    fn collect(&self, idxs: Option<&Vec<usize>>) -> Vec<&Arc<FailureMode>> {
        idxs.map(|idxs| idxs.iter().map(|&i| &self.failures[i]).collect())
            .unwrap_or_default()
    }
}
