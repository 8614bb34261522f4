//! Dependency graph walks.
//!
//! Pure graph logic: where dependency declarations come from and what
//! "installed" means is supplied through [`DependencySource`], so the walks
//! can be exercised with a plain map in tests.
//!
//! # Install order
//!
//! A depth-first walk from the target. Each node is visited at most once;
//! a node's not-yet-installed dependencies are walked first, then the node is
//! appended unless it is already installed. Nodes carry one of three states
//! (unvisited, in progress, done). Reaching an in-progress node means the
//! walk followed a back edge, which is recorded as a cycle and not followed,
//! so the walk always terminates and still yields an order that respects
//! every edge not on a cycle.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{DomainError, LeafName};

/// Where the walks get their graph from.
pub trait DependencySource {
    /// Declared dependencies of `leaf`, deduplicated, in declaration order.
    /// Empty when the leaf has no readable manifest.
    fn dependencies_of(&self, leaf: &LeafName) -> Vec<LeafName>;

    /// Whether `leaf` is already materialised in the project.
    fn is_installed(&self, leaf: &LeafName) -> bool;
}

/// Result of [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Leafs to install, dependencies before dependents.
    pub order: Vec<LeafName>,
    /// Every back edge found, as a closed path (`a -> b -> a`).
    pub cycles: Vec<Vec<LeafName>>,
}

impl Resolution {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// The order, or a [`DomainError::DependencyCycle`] naming the first cycle.
    pub fn into_strict(self) -> Result<Vec<LeafName>, DomainError> {
        match self.cycles.first() {
            Some(cycle) => Err(DomainError::DependencyCycle {
                cycle: format_cycle(cycle),
            }),
            None => Ok(self.order),
        }
    }
}

/// Render a cycle path as `a -> b -> a`.
pub fn format_cycle(cycle: &[LeafName]) -> String {
    cycle
        .iter()
        .map(LeafName::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InProgress,
    Done,
}

/// Compute the install order for `target` and report any cycles.
pub fn resolve(target: &LeafName, source: &dyn DependencySource) -> Resolution {
    let mut walk = Walk {
        source,
        state: HashMap::new(),
        path: Vec::new(),
        resolution: Resolution::default(),
    };
    walk.visit(target);
    walk.resolution
}

struct Walk<'a> {
    source: &'a dyn DependencySource,
    state: HashMap<LeafName, State>,
    path: Vec<LeafName>,
    resolution: Resolution,
}

impl Walk<'_> {
    fn visit(&mut self, node: &LeafName) {
        if self.state.contains_key(node) {
            return;
        }

        self.state.insert(node.clone(), State::InProgress);
        self.path.push(node.clone());

        for dep in self.source.dependencies_of(node) {
            if self.source.is_installed(&dep) {
                continue;
            }
            match self.state.get(&dep).copied() {
                Some(State::InProgress) => self.record_cycle(&dep),
                Some(State::Done) => {}
                None => self.visit(&dep),
            }
        }

        if !self.source.is_installed(node) {
            self.resolution.order.push(node.clone());
        }

        self.path.pop();
        self.state.insert(node.clone(), State::Done);
    }

    fn record_cycle(&mut self, back_to: &LeafName) {
        if let Some(start) = self.path.iter().position(|n| n == back_to) {
            let mut cycle = self.path[start..].to_vec();
            cycle.push(back_to.clone());
            self.resolution.cycles.push(cycle);
        }
    }
}

/// Every leaf `target` transitively needs that is not installed yet.
///
/// Deduplicated, in order of first discovery; never contains `target`.
pub fn missing_dependencies(target: &LeafName, source: &dyn DependencySource) -> Vec<LeafName> {
    let mut seen: HashSet<LeafName> = HashSet::new();
    let mut missing = Vec::new();
    seen.insert(target.clone());
    collect_missing(target, source, &mut seen, &mut missing);
    missing
}

fn collect_missing(
    node: &LeafName,
    source: &dyn DependencySource,
    seen: &mut HashSet<LeafName>,
    missing: &mut Vec<LeafName>,
) {
    for dep in source.dependencies_of(node) {
        if source.is_installed(&dep) || !seen.insert(dep.clone()) {
            continue;
        }
        missing.push(dep.clone());
        collect_missing(&dep, source, seen, missing);
    }
}
