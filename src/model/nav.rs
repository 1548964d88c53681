//! src/model/nav.rs
//! ============================================================================
//! # NavigationStack: Breadcrumb Trail
//!
//! Ordered trail of directories drilled into from a selected root. Element 0
//! is always the root; the only mutations are resetting to a new root,
//! pushing a drill-down, and truncating back to a breadcrumb index.

use crate::store::registry::DirectoryEntry;

#[derive(Debug, Clone, Default)]
pub struct NavigationStack {
    trail: Vec<DirectoryEntry>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self { trail: Vec::new() }
    }

    /// Starts a fresh trail rooted at `root`.
    pub fn reset(&mut self, root: DirectoryEntry) {
        self.trail.clear();
        self.trail.push(root);
    }

    /// Records a drill-down into `child` as the new current level.
    pub fn push(&mut self, child: DirectoryEntry) {
        self.trail.push(child);
    }

    /// Truncates the trail back to breadcrumb `index` (keeping it) and
    /// returns the new current level. Out-of-range indices are ignored.
    pub fn truncate_to(&mut self, index: usize) -> Option<&DirectoryEntry> {
        if index < self.trail.len() {
            self.trail.truncate(index + 1);
        }
        self.current()
    }

    /// The directory whose contents are currently displayed.
    pub fn current(&self) -> Option<&DirectoryEntry> {
        self.trail.last()
    }

    pub fn root(&self) -> Option<&DirectoryEntry> {
        self.trail.first()
    }

    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    pub fn trail(&self) -> &[DirectoryEntry] {
        &self.trail
    }

    pub fn clear(&mut self) {
        self.trail.clear();
    }
}

// ------------------------------------------------------------------------- //
// Tests
// ------------------------------------------------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn drill_and_truncate() {
        let mut nav: NavigationStack = NavigationStack::new();
        nav.reset(DirectoryEntry::new("/root"));
        nav.push(DirectoryEntry::new("/root/a"));
        nav.push(DirectoryEntry::new("/root/a/b"));

        assert_eq!(nav.depth(), 3);
        assert_eq!(nav.current().unwrap().path, Path::new("/root/a/b"));
        assert_eq!(nav.root().unwrap().path, Path::new("/root"));

        let level: &DirectoryEntry = nav.truncate_to(1).unwrap();
        assert_eq!(level.path, Path::new("/root/a"));
        assert_eq!(nav.depth(), 2);

        // Out-of-range breadcrumb clicks are ignored.
        nav.truncate_to(9);
        assert_eq!(nav.depth(), 2);
    }

    #[test]
    fn reset_replaces_the_whole_trail() {
        let mut nav: NavigationStack = NavigationStack::new();
        nav.reset(DirectoryEntry::new("/one"));
        nav.push(DirectoryEntry::new("/one/sub"));
        nav.reset(DirectoryEntry::new("/two"));

        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.root().unwrap().path, Path::new("/two"));
    }
}
