//! This module defines the immutable machine `Definition`: an initial state, a set of accepting
//! states and the transition table keyed by (state, symbol).
//!
//! A definition is never checked for completeness or reachability when it is built. A machine
//! running a table with gaps halts with [`Status::Error`](crate::Status::Error) instead. The only
//! construction-time rule is that transition keys are unique.

use crate::types::{Direction, MachineError, State, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A single rule as it appears in the external definition shape:
/// `(state, read) -> (write, direction, next_state)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action<S> {
    /// The state this rule fires in.
    pub state: S,
    /// The symbol that must be under the head.
    pub read: Symbol,
    /// The symbol written before moving.
    pub write: Symbol,
    /// The head movement applied after writing.
    pub direction: Direction,
    /// The state entered after moving.
    pub next_state: S,
}

/// The right-hand side of a rule, applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<'a, S> {
    pub write: Symbol,
    pub direction: Direction,
    pub next_state: &'a S,
}

/// The serializable shape of a definition: `initial_state`, `final_states` and `actions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionDocument<S> {
    pub initial_state: S,
    pub final_states: Vec<S>,
    pub actions: Vec<Action<S>>,
}

/// An immutable transition table.
///
/// Actions are kept in the order they were supplied so exports are stable; lookups go through
/// a hash index on `(state, symbol)`.
#[derive(Debug, Clone)]
pub struct Definition<S: State> {
    initial_state: S,
    final_states: HashSet<S>,
    actions: Vec<Action<S>>,
    index: HashMap<(S, Symbol), usize>,
}

impl<S: State> Definition<S> {
    /// Builds a definition from its parts.
    ///
    /// # Returns
    ///
    /// * `Ok(Definition)` when every `(state, read)` pair appears at most once.
    /// * `Err(MachineError::DuplicateTransition)` for the first repeated pair.
    pub fn new<F, A>(initial_state: S, final_states: F, actions: A) -> Result<Self, MachineError>
    where
        F: IntoIterator<Item = S>,
        A: IntoIterator<Item = Action<S>>,
    {
        let actions: Vec<Action<S>> = actions.into_iter().collect();
        let mut index = HashMap::with_capacity(actions.len());

        for (i, action) in actions.iter().enumerate() {
            let key = (action.state.clone(), action.read);
            if index.insert(key, i).is_some() {
                return Err(MachineError::DuplicateTransition {
                    state: action.state.to_string(),
                    symbol: action.read,
                });
            }
        }

        Ok(Self {
            initial_state,
            final_states: final_states.into_iter().collect(),
            actions,
            index,
        })
    }

    /// Rebuilds a definition from its serializable shape.
    pub fn from_document(document: DefinitionDocument<S>) -> Result<Self, MachineError> {
        Self::new(
            document.initial_state,
            document.final_states,
            document.actions,
        )
    }

    /// Returns the serializable shape, actions in the order they were supplied.
    pub fn to_document(&self) -> DefinitionDocument<S> {
        let mut final_states: Vec<S> = self.final_states.iter().cloned().collect();
        // Hash set order is not stable; sort by rendered name so exports are reproducible.
        final_states.sort_by_key(|state| state.to_string());

        DefinitionDocument {
            initial_state: self.initial_state.clone(),
            final_states,
            actions: self.actions.clone(),
        }
    }

    /// Returns the rule for `state` reading `symbol`, if there is one.
    pub fn lookup(&self, state: &S, symbol: Symbol) -> Option<Transition<'_, S>> {
        // Tuple keys cannot be borrowed piecewise, so the lookup key owns a clone of the state.
        self.index.get(&(state.clone(), symbol)).map(|&i| {
            let action = &self.actions[i];
            Transition {
                write: action.write,
                direction: action.direction,
                next_state: &action.next_state,
            }
        })
    }

    pub fn initial_state(&self) -> &S {
        &self.initial_state
    }

    pub fn final_states(&self) -> &HashSet<S> {
        &self.final_states
    }

    /// Whether reaching `state` ends a run successfully.
    pub fn is_accepting(&self, state: &S) -> bool {
        self.final_states.contains(state)
    }

    pub fn actions(&self) -> &[Action<S>] {
        &self.actions
    }

    /// Number of transitions in the table.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Every distinct state named by the table, the initial and the final states.
    pub fn states(&self) -> HashSet<&S> {
        let mut states: HashSet<&S> = self
            .actions
            .iter()
            .flat_map(|action| [&action.state, &action.next_state])
            .collect();
        states.insert(&self.initial_state);
        states.extend(self.final_states.iter());
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BLANK_SYMBOL;

    fn action(
        state: &str,
        read: Symbol,
        write: Symbol,
        direction: Direction,
        next: &str,
    ) -> Action<String> {
        Action {
            state: state.to_string(),
            read,
            write,
            direction,
            next_state: next.to_string(),
        }
    }

    fn flip_definition() -> Definition<String> {
        Definition::new(
            "start".to_string(),
            ["done".to_string()],
            vec![
                action("start", '0', '1', Direction::Right, "start"),
                action("start", '1', '0', Direction::Right, "start"),
                action("start", BLANK_SYMBOL, BLANK_SYMBOL, Direction::Stay, "done"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_hits_and_misses() {
        let definition = flip_definition();
        let start = "start".to_string();

        let transition = definition.lookup(&start, '0').unwrap();
        assert_eq!(transition.write, '1');
        assert_eq!(transition.direction, Direction::Right);
        assert_eq!(transition.next_state, "start");

        assert!(definition.lookup(&start, 'x').is_none());
        assert!(definition.lookup(&"done".to_string(), '0').is_none());
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let result = Definition::new(
            "start".to_string(),
            Vec::<String>::new(),
            vec![
                action("start", '0', '1', Direction::Right, "a"),
                action("start", '0', '0', Direction::Left, "b"),
            ],
        );

        assert_eq!(
            result.unwrap_err(),
            MachineError::DuplicateTransition {
                state: "start".to_string(),
                symbol: '0'
            }
        );
    }

    #[test]
    fn test_incomplete_definition_is_accepted() {
        let definition = Definition::new(
            "nowhere".to_string(),
            Vec::<String>::new(),
            Vec::new(),
        )
        .unwrap();

        assert!(definition.is_empty());
        assert_eq!(definition.initial_state(), "nowhere");
    }

    #[test]
    fn test_states_and_accepting() {
        let definition = flip_definition();

        assert_eq!(definition.len(), 3);
        assert_eq!(definition.states().len(), 2);
        assert!(definition.is_accepting(&"done".to_string()));
        assert!(!definition.is_accepting(&"start".to_string()));
    }

    #[test]
    fn test_document_json_round_trip() {
        let definition = flip_definition();

        let json = serde_json::to_string(&definition.to_document()).unwrap();
        assert!(json.contains("\"initial_state\":\"start\""));
        assert!(json.contains("\"final_states\":[\"done\"]"));

        let document: DefinitionDocument<String> = serde_json::from_str(&json).unwrap();
        let restored = Definition::from_document(document).unwrap();

        assert_eq!(restored.actions(), definition.actions());
        assert_eq!(restored.final_states(), definition.final_states());
    }
}
