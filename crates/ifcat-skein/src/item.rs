//! Skein tree nodes.

use std::fmt;

use uuid::Uuid;

/// Opaque identifier for a skein node, unique within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single knot in the skein: one move of a recorded play session, with the
/// alternate continuations as children.
///
/// Each item is owned by exactly one parent (the root by its [`Skein`]), so
/// the single-parent tree invariant holds by construction.
///
/// [`Skein`]: crate::Skein
#[derive(Debug, Clone)]
pub struct SkeinItem {
    id: NodeId,
    command: Option<String>,
    result: Option<String>,
    annotation: Option<String>,
    commentary: Option<String>,
    played: bool,
    changed: bool,
    temporary: bool,
    temporary_score: i32,
    children: Vec<SkeinItem>,
}

impl SkeinItem {
    /// Create an unplayed, temporary item for `command`.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            ..Self::empty()
        }
    }

    /// Create an unplayed, temporary item with no command or text fields.
    pub fn empty() -> Self {
        Self {
            id: NodeId::new(),
            command: None,
            result: None,
            annotation: None,
            commentary: None,
            played: false,
            changed: false,
            temporary: true,
            temporary_score: 0,
            children: Vec::new(),
        }
    }

    /// Builder-style result text.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Builder-style annotation.
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Builder-style commentary.
    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = Some(commentary.into());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    pub fn commentary(&self) -> Option<&str> {
        self.commentary.as_deref()
    }

    pub fn played(&self) -> bool {
        self.played
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn temporary(&self) -> bool {
        self.temporary
    }

    pub fn temporary_score(&self) -> i32 {
        self.temporary_score
    }

    /// The item's children, in play-creation order.
    pub fn children(&self) -> &[SkeinItem] {
        &self.children
    }

    pub fn set_command(&mut self, command: impl Into<String>) {
        self.command = Some(command.into());
    }

    /// Replace the result text.
    ///
    /// `changed` records whether the new text differs from the previously
    /// recorded result, so replays expose output drift.
    pub fn set_result(&mut self, result: impl Into<String>) {
        let result = result.into();
        self.changed = match &self.result {
            Some(existing) => *existing != result,
            None => false,
        };
        self.result = Some(result);
    }

    pub fn set_annotation(&mut self, annotation: impl Into<String>) {
        self.annotation = Some(annotation.into());
    }

    pub fn set_commentary(&mut self, commentary: impl Into<String>) {
        self.commentary = Some(commentary.into());
    }

    pub fn set_played(&mut self, played: bool) {
        self.played = played;
    }

    pub fn set_temporary(&mut self, temporary: bool) {
        self.temporary = temporary;
    }

    pub fn set_temporary_score(&mut self, score: i32) {
        self.temporary_score = score;
    }

    /// Flip the temporary flag for this item and its whole subtree.
    pub fn set_branch_temporary(&mut self, temporary: bool) {
        self.temporary = temporary;
        for child in &mut self.children {
            child.set_branch_temporary(temporary);
        }
    }

    /// Add `child` under this item.
    ///
    /// When a child with the same command already exists the two are merged:
    /// the incoming item's children are folded in recursively, missing text
    /// fields are adopted, and the existing child survives. Returns the id
    /// of the child now in the tree.
    pub fn add_child(&mut self, child: SkeinItem) -> NodeId {
        let existing = child.command().and_then(|command| {
            self.children
                .iter()
                .position(|c| c.command() == Some(command))
        });
        match existing {
            Some(index) => {
                let target = &mut self.children[index];
                target.merge(child);
                target.id()
            }
            None => {
                let id = child.id();
                self.children.push(child);
                id
            }
        }
    }

    fn merge(&mut self, other: SkeinItem) {
        if self.result.is_none() {
            self.result = other.result;
        }
        if self.annotation.is_none() {
            self.annotation = other.annotation;
        }
        if self.commentary.is_none() {
            self.commentary = other.commentary;
        }
        self.played |= other.played;
        if !other.temporary {
            self.temporary = false;
        }
        for grandchild in other.children {
            self.add_child(grandchild);
        }
    }

    /// Direct child with the given command, if any.
    pub fn child_with_command(&self, command: &str) -> Option<&SkeinItem> {
        self.children
            .iter()
            .find(|child| child.command() == Some(command))
    }

    /// Find an item in this subtree by id (including this item).
    pub fn find(&self, id: NodeId) -> Option<&SkeinItem> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Mutable lookup by id (including this item).
    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut SkeinItem> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// True when `id` names this item or anything below it.
    pub fn has_descendant(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Detach and return the subtree rooted at `id`, searching below this
    /// item. Returns `None` when `id` is not a strict descendant.
    pub fn remove_descendant(&mut self, id: NodeId) -> Option<SkeinItem> {
        if let Some(index) = self.children.iter().position(|child| child.id == id) {
            return Some(self.children.remove(index));
        }
        self.children
            .iter_mut()
            .find_map(|child| child.remove_descendant(id))
    }

    /// Number of items in this subtree, including this item.
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(SkeinItem::subtree_size)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_result_tracks_changes() {
        let mut item = SkeinItem::new("look");
        item.set_result("A dark room.");
        assert!(!item.changed());

        item.set_result("A dark room.");
        assert!(!item.changed());

        item.set_result("A dimly lit room.");
        assert!(item.changed());
    }

    #[test]
    fn add_child_merges_same_command() {
        let mut parent = SkeinItem::new("- start -");
        let first = parent.add_child(SkeinItem::new("go north").with_result("A clearing."));
        let second = parent.add_child(SkeinItem::new("go north"));
        assert_eq!(first, second);
        assert_eq!(parent.children().len(), 1);
        assert_eq!(parent.children()[0].result(), Some("A clearing."));
    }

    #[test]
    fn merge_folds_grandchildren() {
        let mut parent = SkeinItem::new("- start -");
        let mut branch = SkeinItem::new("go north");
        branch.add_child(SkeinItem::new("take lamp"));
        parent.add_child(branch);

        let mut again = SkeinItem::new("go north");
        again.add_child(SkeinItem::new("take lamp"));
        again.add_child(SkeinItem::new("go east"));
        parent.add_child(again);

        let north = parent.child_with_command("go north").unwrap();
        let commands: Vec<_> = north.children().iter().map(SkeinItem::command).collect();
        assert_eq!(commands, [Some("take lamp"), Some("go east")]);
    }

    #[test]
    fn find_and_remove_descendant() {
        let mut root = SkeinItem::new("- start -");
        let mut north = SkeinItem::new("go north");
        let lamp_id = north.add_child(SkeinItem::new("take lamp"));
        root.add_child(north);

        assert!(root.has_descendant(lamp_id));
        let removed = root.remove_descendant(lamp_id).unwrap();
        assert_eq!(removed.command(), Some("take lamp"));
        assert!(!root.has_descendant(lamp_id));
        assert_eq!(root.subtree_size(), 2);
    }

    #[test]
    fn branch_temporary_flips_subtree() {
        let mut root = SkeinItem::new("- start -");
        let mut north = SkeinItem::new("go north");
        north.add_child(SkeinItem::new("take lamp"));
        let north_id = root.add_child(north);

        root.set_branch_temporary(false);
        assert!(!root.temporary());
        let north = root.find(north_id).unwrap();
        assert!(!north.temporary());
        assert!(!north.children()[0].temporary());
    }
}
