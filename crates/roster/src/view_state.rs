use std::collections::HashMap;

use shared::domain::{GroupId, PersonId};
use thiserror::Error;

use crate::member::Member;

/// A group with its members in canonical (computed) order.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterGroup {
    pub id: GroupId,
    pub name: String,
    pub status: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub group: GroupId,
    pub index: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown group {0}")]
    UnknownGroup(GroupId),
    #[error("no member at index {index} of group {group} ({len} members)")]
    SourceIndexOutOfRange {
        group: GroupId,
        index: usize,
        len: usize,
    },
}

/// Session state over one loaded roster. Manual moves live in a display
/// override layered on top of the canonical order and never touch it.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    groups: Vec<RosterGroup>,
    overrides: HashMap<GroupId, Vec<Member>>,
    collapsed: HashMap<GroupId, bool>,
    all_statuses: Vec<String>,
    selected_statuses: Vec<String>,
}

impl ViewState {
    pub fn new(groups: Vec<RosterGroup>) -> Self {
        let mut all_statuses: Vec<String> = Vec::new();
        for group in &groups {
            if !all_statuses.contains(&group.status) {
                all_statuses.push(group.status.clone());
            }
        }
        let collapsed = groups.iter().map(|g| (g.id, true)).collect();

        Self {
            selected_statuses: all_statuses.clone(),
            all_statuses,
            collapsed,
            overrides: HashMap::new(),
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[RosterGroup] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&RosterGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Displayed member list: the override if one exists, else canonical order.
    pub fn members(&self, id: GroupId) -> Option<&[Member]> {
        if let Some(list) = self.overrides.get(&id) {
            return Some(list);
        }
        self.group(id).map(|g| g.members.as_slice())
    }

    pub fn canonical_members(&self, id: GroupId) -> Option<&[Member]> {
        self.group(id).map(|g| g.members.as_slice())
    }

    pub fn has_override(&self, id: GroupId) -> bool {
        self.overrides.contains_key(&id)
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    fn ensure_group(&self, id: GroupId) -> Result<&RosterGroup, ViewError> {
        self.group(id).ok_or(ViewError::UnknownGroup(id))
    }

    fn override_mut(&mut self, id: GroupId) -> &mut Vec<Member> {
        let canonical = &self.groups;
        self.overrides.entry(id).or_insert_with(|| {
            canonical
                .iter()
                .find(|g| g.id == id)
                .map(|g| g.members.clone())
                .unwrap_or_default()
        })
    }

    /// Moves the member at `source_index` to `destination`. Without a
    /// destination nothing happens. Destination indices past the end append.
    pub fn move_member(
        &mut self,
        source: GroupId,
        source_index: usize,
        destination: Option<DropTarget>,
    ) -> Result<Option<PersonId>, ViewError> {
        let Some(destination) = destination else {
            return Ok(None);
        };
        self.ensure_group(source)?;
        self.ensure_group(destination.group)?;

        let len = self.members(source).map_or(0, <[Member]>::len);
        if source_index >= len {
            return Err(ViewError::SourceIndexOutOfRange {
                group: source,
                index: source_index,
                len,
            });
        }

        let moved = self.override_mut(source).remove(source_index);
        let moved_id = moved.id;
        let target = self.override_mut(destination.group);
        let at = destination.index.min(target.len());
        target.insert(at, moved);

        Ok(Some(moved_id))
    }

    pub fn is_collapsed(&self, id: GroupId) -> bool {
        self.collapsed.get(&id).copied().unwrap_or(true)
    }

    pub fn toggle_collapse(&mut self, id: GroupId) -> Result<bool, ViewError> {
        self.ensure_group(id)?;
        let flag = self.collapsed.entry(id).or_insert(true);
        *flag = !*flag;
        Ok(*flag)
    }

    /// Collapses every currently visible group.
    pub fn collapse_all(&mut self) {
        self.set_visible_collapsed(true);
    }

    /// Expands every currently visible group.
    pub fn expand_all(&mut self) {
        self.set_visible_collapsed(false);
    }

    fn set_visible_collapsed(&mut self, collapsed: bool) {
        let visible: Vec<GroupId> = self.visible_groups().map(|g| g.id).collect();
        for id in visible {
            self.collapsed.insert(id, collapsed);
        }
    }

    pub fn all_statuses(&self) -> &[String] {
        &self.all_statuses
    }

    pub fn selected_statuses(&self) -> &[String] {
        &self.selected_statuses
    }

    /// An empty selection means "no filter", not "show nothing".
    pub fn set_status_filter<I, S>(&mut self, selected: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_statuses.clear();
        for status in selected {
            let status = status.into();
            if !self.selected_statuses.contains(&status) {
                self.selected_statuses.push(status);
            }
        }
    }

    /// Checkbox behaviour: adds the status if absent, removes it otherwise.
    pub fn toggle_status(&mut self, status: &str) -> bool {
        if let Some(pos) = self.selected_statuses.iter().position(|s| s == status) {
            self.selected_statuses.remove(pos);
            false
        } else {
            self.selected_statuses.push(status.to_string());
            true
        }
    }

    pub fn is_visible(&self, group: &RosterGroup) -> bool {
        self.selected_statuses.is_empty() || self.selected_statuses.contains(&group.status)
    }

    pub fn visible_groups(&self) -> impl Iterator<Item = &RosterGroup> {
        self.groups.iter().filter(|g| self.is_visible(g))
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
