use huddle_core::{Participant, ParticipantId};
use std::collections::HashMap;

/// Derived, observable map of call membership. It has no authority of its
/// own: remote entries come from signaling evidence, the local entry from
/// local toggle actions, removals from leave notifications.
pub struct ParticipantDirectory {
    local_id: ParticipantId,
    entries: HashMap<ParticipantId, Participant>,
}

impl ParticipantDirectory {
    pub fn new(local: Participant) -> Self {
        let local_id = local.id.clone();
        let mut entries = HashMap::new();
        entries.insert(local_id.clone(), local);
        Self { local_id, entries }
    }

    /// Record a remote member from its first signaling evidence. Returns
    /// true when a new entry was created; known members are untouched.
    pub fn observe_remote(&mut self, id: &ParticipantId, display_name: Option<&str>) -> bool {
        if id == &self.local_id || self.entries.contains_key(id) {
            return false;
        }
        self.entries.insert(
            id.clone(),
            Participant::remote(id.clone(), display_name.unwrap_or("Guest")),
        );
        true
    }

    /// Remove a departed member. The local entry is never removed.
    pub fn remove(&mut self, id: &ParticipantId) -> bool {
        if id == &self.local_id {
            return false;
        }
        self.entries.remove(id).is_some()
    }

    pub fn set_local_muted(&mut self, muted: bool) {
        if let Some(local) = self.entries.get_mut(&self.local_id) {
            local.is_muted = muted;
        }
    }

    pub fn set_local_video_off(&mut self, video_off: bool) {
        if let Some(local) = self.entries.get_mut(&self.local_id) {
            local.is_video_off = video_off;
        }
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable snapshot for publication: local member first, then remotes
    /// ordered by id.
    pub fn snapshot(&self) -> Vec<Participant> {
        let mut remotes: Vec<Participant> = self
            .entries
            .values()
            .filter(|p| !p.is_local)
            .cloned()
            .collect();
        remotes.sort_by(|a, b| a.id.0.cmp(&b.id.0));

        let mut all = Vec::with_capacity(remotes.len() + 1);
        if let Some(local) = self.entries.get(&self.local_id) {
            all.push(local.clone());
        }
        all.extend(remotes);
        all
    }
}
