//! Multi-select roster picking: a working copy of the selection, a text
//! filter over name and department, and a commit that snapshots the selection
//! in roster order.

use std::collections::HashSet;

use crate::models::employee::Employee;
use crate::providers::RosterProvider;

#[derive(Debug, Clone)]
pub struct RosterSession {
    roster: Vec<Employee>,
    selected: HashSet<String>,
    filter: String,
}

impl RosterSession {
    /// Seeds the working selection from the caller's committed one. The
    /// roster is snapshotted once per session.
    pub fn open(provider: &impl RosterProvider, initial: &[Employee]) -> Self {
        Self {
            roster: provider.list_employees(),
            selected: initial.iter().map(|e| e.id.clone()).collect(),
            filter: String::new(),
        }
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    /// Roster entries matching the filter, in source order. An empty filter
    /// shows everyone.
    pub fn visible(&self) -> Vec<&Employee> {
        let needle = self.filter.trim();
        self.roster
            .iter()
            .filter(|employee| needle.is_empty() || employee.matches(needle))
            .collect()
    }

    /// Flips membership of one employee in the working selection.
    pub fn toggle(&mut self, employee_id: &str) {
        if !self.selected.remove(employee_id) {
            self.selected.insert(employee_id.to_string());
        }
    }

    pub fn is_selected(&self, employee_id: &str) -> bool {
        self.selected.contains(employee_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Ends the session, returning the selection ordered by the roster, not
    /// by toggle order. Cancelling is just dropping the session.
    pub fn commit(self) -> Vec<Employee> {
        self.roster
            .into_iter()
            .filter(|employee| self.selected.contains(&employee.id))
            .collect()
    }
}
