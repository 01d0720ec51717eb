//! Result quota shared by content and glob searches
//!
//! Project matches are collected first and are never evicted. External
//! matches only pad the remaining room: collection stops once
//! `project + min(external, max - project) >= max`.

use crate::vfs::PathEntry;
use std::cmp::Reverse;
use std::time::SystemTime;

/// Collects project and external matches under a `max_results` quota
#[derive(Debug)]
pub struct ResultBudget {
    max: usize,
    project: Vec<PathEntry>,
    external: Vec<PathEntry>,
    limit_reached: bool,
}

impl ResultBudget {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            project: Vec::new(),
            external: Vec::new(),
            limit_reached: false,
        }
    }

    fn room_for_external(&self) -> usize {
        self.max.saturating_sub(self.project.len())
    }

    /// Whether the quota is satisfied
    pub fn is_full(&self) -> bool {
        self.project.len() + self.external.len().min(self.room_for_external()) >= self.max
    }

    /// Whether project matches alone leave room, i.e. the external phase should run
    pub fn wants_external(&self) -> bool {
        self.project.len() < self.max
    }

    /// Add a project match; returns whether collection should continue
    pub fn push_project(&mut self, entry: PathEntry) -> bool {
        if self.project.len() < self.max {
            self.project.push(entry);
        }
        !self.is_full()
    }

    /// Add an external match; returns whether collection should continue
    pub fn push_external(&mut self, entry: PathEntry) -> bool {
        if !self.is_full() {
            self.external.push(entry);
        }
        if self.is_full() {
            self.limit_reached = true;
            return false;
        }
        true
    }

    pub fn project_count(&self) -> usize {
        self.project.len()
    }

    pub fn external_count(&self) -> usize {
        self.external.len()
    }

    /// Final entries and whether external padding hit the quota.
    ///
    /// Each group is ordered newest first; externals follow the project
    /// entries and are cut to the remaining room.
    pub fn finish<F>(self, modified: F) -> (Vec<PathEntry>, bool)
    where
        F: Fn(&PathEntry) -> SystemTime,
    {
        let room = self.room_for_external();
        let Self {
            mut project,
            mut external,
            limit_reached,
            ..
        } = self;

        project.sort_by_cached_key(|entry| (Reverse(modified(entry)), entry.path.clone()));
        external.sort_by_cached_key(|entry| (Reverse(modified(entry)), entry.path.clone()));
        external.truncate(room);

        project.extend(external);
        (project, limit_reached)
    }
}
