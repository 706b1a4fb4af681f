use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;
use shared::domain::{Character, ListKind};

/// Read access to a roster. Channels never mutate the roster they observe.
pub trait CharacterManager: Send + Sync {
    fn character_count(&self) -> usize;
    fn is_on_list(&self, name: &str, list: ListKind) -> bool;
    fn find(&self, name: &str) -> Option<Character>;
}

#[derive(Debug, Default)]
struct RosterState {
    online: HashMap<String, Character>,
    lists: HashMap<ListKind, HashSet<String>>,
}

/// Default roster: online characters plus named list memberships.
#[derive(Debug, Default)]
pub struct ChannelCharacterManager {
    state: RwLock<RosterState>,
}

impl ChannelCharacterManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or refreshes an online character. Returns `true` when newly added.
    pub fn sign_on(&self, character: Character) -> bool {
        let mut state = self.state.write();
        state
            .online
            .insert(character.name.clone(), character)
            .is_none()
    }

    pub fn sign_off(&self, name: &str) -> bool {
        self.state.write().online.remove(name).is_some()
    }

    pub fn clear(&self) {
        self.state.write().online.clear();
    }

    pub fn add_to_list(&self, name: &str, list: ListKind) -> bool {
        self.state
            .write()
            .lists
            .entry(list)
            .or_default()
            .insert(name.to_string())
    }

    pub fn remove_from_list(&self, name: &str, list: ListKind) -> bool {
        self.state
            .write()
            .lists
            .get_mut(&list)
            .is_some_and(|members| members.remove(name))
    }

    /// Snapshot of the online characters in no particular order.
    pub fn characters(&self) -> Vec<Character> {
        self.state.read().online.values().cloned().collect()
    }
}

impl CharacterManager for ChannelCharacterManager {
    fn character_count(&self) -> usize {
        self.state.read().online.len()
    }

    fn is_on_list(&self, name: &str, list: ListKind) -> bool {
        self.state
            .read()
            .lists
            .get(&list)
            .is_some_and(|members| members.contains(name))
    }

    fn find(&self, name: &str) -> Option<Character> {
        self.state.read().online.get(name).cloned()
    }
}
