//! Execution ordering of record generators.
//!
//! A template runs only after every template it references has produced all
//! of its records. Ordering repeatedly places the first not-yet-placed
//! template (in declaration order) whose producers are all placed. When a
//! scan places nothing, the remaining templates (cycles or references to
//! templates that do not exist) are appended in declaration order and
//! listed in [`ExecutionPlan::unresolved`], so every template still runs.
//! Planning itself does not log; the run that executes a plan does.

use crate::record::RecordGenerator;
use ahash::AHashSet;
use serde::Serialize;
use tracing::warn;

/// A template placed without all of its producers ahead of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedTemplate {
    /// Index into the planned generator list
    pub index: usize,
    pub name: String,
    /// Producers that were not placed before it
    pub missing: Vec<String>,
    /// Subset of `missing` naming templates that do not exist at all
    pub unknown: Vec<String>,
}

impl UnresolvedTemplate {
    pub fn describe(&self) -> String {
        let deps: Vec<String> = self
            .missing
            .iter()
            .map(|m| {
                if self.unknown.contains(m) {
                    format!("{} (no such template)", m)
                } else {
                    format!("{} (cyclic)", m)
                }
            })
            .collect();
        format!("{} -> {}", self.name, deps.join(", "))
    }
}

/// Planned execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionPlan {
    /// Indices into the planned generator list, in execution order
    pub order: Vec<usize>,
    /// Templates appended after ordering stalled
    pub unresolved: Vec<UnresolvedTemplate>,
}

impl ExecutionPlan {
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Log one warning per unresolved template
    pub fn warn_unresolved(&self) {
        for entry in &self.unresolved {
            warn!(
                template = %entry.name,
                "unresolved dependencies, running anyway: {}",
                entry.describe()
            );
        }
    }
}

/// Order record generators so producers run before their consumers
pub fn plan(generators: &[RecordGenerator]) -> ExecutionPlan {
    let nodes: Vec<(&str, Vec<&str>)> = generators
        .iter()
        .map(|g| (g.name(), g.producers()))
        .collect();
    plan_nodes(&nodes)
}

/// Order `(name, producer names)` pairs.
///
/// A template's dependency on itself never blocks it: its references read
/// values from its own earlier records.
pub fn plan_nodes(nodes: &[(&str, Vec<&str>)]) -> ExecutionPlan {
    let known: AHashSet<&str> = nodes.iter().map(|(name, _)| *name).collect();
    let mut placed = vec![false; nodes.len()];
    let mut placed_names: AHashSet<&str> = AHashSet::new();
    let mut order = Vec::with_capacity(nodes.len());

    let is_ready = |i: usize, placed_names: &AHashSet<&str>| {
        let (name, producers) = &nodes[i];
        producers
            .iter()
            .all(|p| p == name || placed_names.contains(p))
    };

    while let Some(next) = (0..nodes.len()).find(|&i| !placed[i] && is_ready(i, &placed_names)) {
        placed[next] = true;
        placed_names.insert(nodes[next].0);
        order.push(next);
    }

    let mut unresolved = Vec::new();
    for (i, (name, producers)) in nodes.iter().enumerate() {
        if placed[i] {
            continue;
        }

        let missing: Vec<String> = producers
            .iter()
            .filter(|p| *p != name && !placed_names.contains(*p))
            .map(|p| p.to_string())
            .collect();
        let unknown: Vec<String> = missing
            .iter()
            .filter(|m| !known.contains(m.as_str()))
            .cloned()
            .collect();

        let entry = UnresolvedTemplate {
            index: i,
            name: name.to_string(),
            missing,
            unknown,
        };
        order.push(i);
        unresolved.push(entry);
    }

    ExecutionPlan { order, unresolved }
}
