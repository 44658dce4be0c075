//! This module provides opt-in checks over a [`Definition`] to detect common mistakes before
//! running it: an initial state with no rules, dead-end states, unreachable states and accepting
//! states nothing leads to.
//!
//! Building a definition never runs these checks. A table with gaps is still a valid definition;
//! a machine running it simply halts with `Status::Error`.

use crate::definition::Definition;
use crate::types::{MachineError, State};
use std::collections::{HashMap, HashSet, VecDeque};

/// Represents the problems the analyzer can find in a definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The initial state is not accepting and has no outgoing rule.
    InvalidStartState(String),
    /// States entered by some rule that are neither accepting nor have outgoing rules.
    DeadEndStates(Vec<String>),
    /// States with outgoing rules that cannot be reached from the initial state.
    UnreachableStates(Vec<String>),
    /// Accepting states that no rule leads to.
    AcceptingStatesNotFound(Vec<String>),
}

impl From<AnalysisError> for MachineError {
    /// Converts an `AnalysisError` into a `MachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        let message = match error {
            AnalysisError::InvalidStartState(state) => format!("Invalid start state: {}", state),
            AnalysisError::DeadEndStates(states) => {
                format!("States without outgoing transitions: {:?}", states)
            }
            AnalysisError::UnreachableStates(states) => {
                format!("Unreachable states detected: {:?}", states)
            }
            AnalysisError::AcceptingStatesNotFound(states) => {
                format!("Accepting states never entered: {:?}", states)
            }
        };

        MachineError::ValidationError(message)
    }
}

/// Analyzes a definition and reports the first problem found.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(MachineError::ValidationError)` describing the first failed check.
pub fn analyze<S: State>(definition: &Definition<S>) -> Result<(), MachineError> {
    match check_all(definition).into_iter().next() {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Runs every check and returns all the problems found, in check order.
pub fn check_all<S: State>(definition: &Definition<S>) -> Vec<AnalysisError> {
    let graph = Graph::new(definition);
    let results = [
        check_valid_start_state(definition, &graph),
        check_dead_ends(definition, &graph),
        check_unreachable_states(definition, &graph),
        check_accepting_states(definition, &graph),
    ];

    results.into_iter().filter_map(Result::err).collect()
}

/// Successor lists of every state that has outgoing rules.
struct Graph<'a, S> {
    edges: HashMap<&'a S, HashSet<&'a S>>,
}

impl<'a, S: State> Graph<'a, S> {
    fn new(definition: &'a Definition<S>) -> Self {
        let mut edges: HashMap<&S, HashSet<&S>> = HashMap::new();
        for action in definition.actions() {
            edges
                .entry(&action.state)
                .or_default()
                .insert(&action.next_state);
        }

        Self { edges }
    }

    fn has_rules(&self, state: &S) -> bool {
        self.edges.contains_key(state)
    }

    fn targets(&self) -> impl Iterator<Item = &'a S> + '_ {
        self.edges.values().flat_map(|targets| targets.iter().copied())
    }

    fn reachable_from(&self, start: &'a S) -> HashSet<&'a S> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(state) = queue.pop_front() {
            for &next in self.edges.get(state).into_iter().flatten() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen
    }
}

fn sorted_names<'a, S: State + 'a>(states: impl IntoIterator<Item = &'a S>) -> Vec<String> {
    let mut names: Vec<String> = states.into_iter().map(|state| state.to_string()).collect();
    names.sort();
    names
}

fn check_valid_start_state<'a, S: State>(
    definition: &'a Definition<S>,
    graph: &Graph<'a, S>,
) -> Result<(), AnalysisError> {
    let initial = definition.initial_state();
    if !definition.is_accepting(initial) && !graph.has_rules(initial) {
        return Err(AnalysisError::InvalidStartState(initial.to_string()));
    }

    Ok(())
}

fn check_dead_ends<'a, S: State>(
    definition: &'a Definition<S>,
    graph: &Graph<'a, S>,
) -> Result<(), AnalysisError> {
    let dead_ends: HashSet<&S> = graph
        .targets()
        .filter(|state| !definition.is_accepting(state) && !graph.has_rules(state))
        .collect();

    if dead_ends.is_empty() {
        return Ok(());
    }

    Err(AnalysisError::DeadEndStates(sorted_names(dead_ends)))
}

fn check_unreachable_states<'a, S: State>(
    definition: &'a Definition<S>,
    graph: &Graph<'a, S>,
) -> Result<(), AnalysisError> {
    let reachable = graph.reachable_from(definition.initial_state());
    let unreachable: Vec<&S> = graph
        .edges
        .keys()
        .copied()
        .filter(|state| !reachable.contains(state))
        .collect();

    if unreachable.is_empty() {
        return Ok(());
    }

    Err(AnalysisError::UnreachableStates(sorted_names(unreachable)))
}

fn check_accepting_states<'a, S: State>(
    definition: &'a Definition<S>,
    graph: &Graph<'a, S>,
) -> Result<(), AnalysisError> {
    let entered: HashSet<&S> = graph.targets().collect();
    let missing: Vec<&S> = definition
        .final_states()
        .iter()
        .filter(|state| *state != definition.initial_state() && !entered.contains(state))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(AnalysisError::AcceptingStatesNotFound(sorted_names(missing)))
}
