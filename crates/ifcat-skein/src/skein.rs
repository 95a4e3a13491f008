//! The skein: a session's transcript tree plus the recording state that
//! grows it.

use tracing::debug;

use crate::item::{NodeId, SkeinItem};

/// The command stored on every root item.
pub const ROOT_COMMAND: &str = "- start -";

/// A transcript tree with an active position.
///
/// The skein acts as the interpreter's output receiver: commands descend
/// into (or create) children of the active item, and game output accumulates
/// until the interpreter waits for input, at which point it becomes the
/// active item's result. Every operation is synchronous and touches no
/// shared state; independent skeins can be processed in parallel freely.
#[derive(Debug, Clone)]
pub struct Skein {
    root: SkeinItem,
    active: NodeId,
    pending_output: String,
}

impl Skein {
    /// An empty skein: a permanent, played root and nothing else.
    pub fn new() -> Self {
        let mut root = SkeinItem::new(ROOT_COMMAND);
        root.set_temporary(false);
        root.set_played(true);
        let active = root.id();
        Self {
            root,
            active,
            pending_output: String::new(),
        }
    }

    pub fn root(&self) -> &SkeinItem {
        &self.root
    }

    /// Mutable access to the tree. Callers editing the tree directly own
    /// the single-parent and active-node invariants.
    pub fn root_mut(&mut self) -> &mut SkeinItem {
        &mut self.root
    }

    /// Identifier of the currently selected item.
    pub fn active(&self) -> NodeId {
        self.active
    }

    /// Select a different item. Returns false (and leaves the selection
    /// alone) when `id` is not in the tree.
    pub fn set_active(&mut self, id: NodeId) -> bool {
        if self.root.has_descendant(id) {
            self.active = id;
            true
        } else {
            false
        }
    }

    /// Lookup by id anywhere in the tree.
    pub fn item(&self, id: NodeId) -> Option<&SkeinItem> {
        self.root.find(id)
    }

    /// Mutable lookup by id anywhere in the tree.
    pub fn item_mut(&mut self, id: NodeId) -> Option<&mut SkeinItem> {
        self.root.find_mut(id)
    }

    /// Record a player command.
    ///
    /// Pending output is flushed to the current item first. The command is
    /// matched against the active item's children: an existing child is
    /// revisited, otherwise a new temporary child is appended. The child is
    /// marked played, becomes active, and the whole active path's temporary
    /// scores are bumped. Trailing line terminators are stripped.
    pub fn input_command(&mut self, command: &str) -> NodeId {
        self.flush_output();
        let command = command.trim_end_matches(['\n', '\r']);
        // a dangling active id can only come from direct tree edits
        if !self.root.has_descendant(self.active) {
            self.active = self.root.id();
        }
        let active_id = self.active;
        let Some(active) = self.root.find_mut(active_id) else {
            return active_id;
        };
        let child_id = match active.child_with_command(command).map(SkeinItem::id) {
            Some(id) => id,
            None => active.add_child(SkeinItem::new(command)),
        };
        if let Some(child) = self.root.find_mut(child_id) {
            child.set_played(true);
        }
        self.active = child_id;
        self.increase_temporary_score();
        child_id
    }

    /// Accumulate interpreter output for the active item.
    pub fn output_text(&mut self, text: &str) {
        self.pending_output.push_str(text);
    }

    /// The interpreter is waiting for input: commit accumulated output as
    /// the active item's result.
    pub fn waiting_for_input(&mut self) {
        self.flush_output();
    }

    /// The interpreter restarted: commit pending output and return to the
    /// root.
    pub fn interpreter_restart(&mut self) {
        self.flush_output();
        debug!("session restarted");
        self.active = self.root.id();
    }

    fn flush_output(&mut self) {
        if self.pending_output.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_output);
        let active = self.active;
        if let Some(item) = self.root.find_mut(active) {
            item.set_result(text);
        }
    }

    /// Bump the temporary score of every item on the root-to-active path.
    /// Recently played paths survive pruning the longest.
    pub fn increase_temporary_score(&mut self) {
        let ids: Vec<NodeId> = match path_to(&self.root, self.active) {
            Some(path) => path.iter().map(|item| item.id()).collect(),
            None => return,
        };
        for id in ids {
            if let Some(item) = self.root.find_mut(id) {
                item.set_temporary_score(item.temporary_score() + 1);
            }
        }
    }

    /// Prune temporary items until at most `max_temps` remain.
    ///
    /// Removal proceeds from the lowest-scored temporary leaves upward; the
    /// active item is never removed. Interior temporary items become
    /// removable once their subtrees are gone.
    pub fn remove_temporary_items(&mut self, max_temps: usize) {
        loop {
            let total = count_temporary(&self.root);
            if total <= max_temps {
                return;
            }
            let mut leaves = Vec::new();
            collect_temporary_leaves(&self.root, &mut leaves);
            leaves.sort_by_key(|(score, _)| *score);
            let Some((_, victim)) = leaves
                .into_iter()
                .find(|(_, id)| *id != self.active)
            else {
                debug!(total, "no prunable temporary items remain");
                return;
            };
            let _ = self.root.remove_descendant(victim);
        }
    }

    /// Commands and results along the path from the root to `id`, in play
    /// order. `None` when `id` is not in the tree.
    pub fn transcript_to_point(&self, id: NodeId) -> Option<String> {
        let path = path_to(&self.root, id)?;
        let root_id = self.root.id();
        let mut transcript = String::new();
        for item in path {
            if item.id() != root_id {
                if let Some(command) = item.command() {
                    transcript.push_str(command);
                    transcript.push('\n');
                }
            }
            if let Some(result) = item.result() {
                transcript.push_str(result);
                if !result.ends_with('\n') {
                    transcript.push('\n');
                }
            }
        }
        Some(transcript)
    }

    /// The command lines needed to replay from the root to `id`, one per
    /// line. `None` when `id` is not in the tree.
    pub fn recording_to_point(&self, id: NodeId) -> Option<String> {
        let path = path_to(&self.root, id)?;
        let root_id = self.root.id();
        let mut recording = String::new();
        for item in path {
            if item.id() == root_id {
                continue;
            }
            if let Some(command) = item.command() {
                recording.push_str(command);
                recording.push('\n');
            }
        }
        Some(recording)
    }

    /// Every distinct annotation in the tree, sorted.
    pub fn annotations(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_annotations(&self.root, &mut out);
        out.sort_unstable();
        out.dedup();
        out
    }

    /// All items carrying the given annotation.
    pub fn items_with_annotation(&self, annotation: &str) -> Vec<&SkeinItem> {
        let mut out = Vec::new();
        collect_items_with_annotation(&self.root, annotation, &mut out);
        out
    }
}

impl Default for Skein {
    fn default() -> Self {
        Self::new()
    }
}

fn path_to(root: &SkeinItem, id: NodeId) -> Option<Vec<&SkeinItem>> {
    fn walk<'a>(item: &'a SkeinItem, id: NodeId, path: &mut Vec<&'a SkeinItem>) -> bool {
        path.push(item);
        if item.id() == id {
            return true;
        }
        for child in item.children() {
            if walk(child, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

fn count_temporary(item: &SkeinItem) -> usize {
    usize::from(item.temporary())
        + item
            .children()
            .iter()
            .map(count_temporary)
            .sum::<usize>()
}

fn collect_temporary_leaves(item: &SkeinItem, out: &mut Vec<(i32, NodeId)>) {
    if item.children().is_empty() {
        if item.temporary() {
            out.push((item.temporary_score(), item.id()));
        }
        return;
    }
    for child in item.children() {
        collect_temporary_leaves(child, out);
    }
}

fn collect_annotations<'a>(item: &'a SkeinItem, out: &mut Vec<&'a str>) {
    if let Some(annotation) = item.annotation() {
        if !annotation.is_empty() {
            out.push(annotation);
        }
    }
    for child in item.children() {
        collect_annotations(child, out);
    }
}

fn collect_items_with_annotation<'a>(
    item: &'a SkeinItem,
    annotation: &str,
    out: &mut Vec<&'a SkeinItem>,
) {
    if item.annotation() == Some(annotation) {
        out.push(item);
    }
    for child in item.children() {
        collect_items_with_annotation(child, annotation, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded_session() -> Skein {
        let mut skein = Skein::new();
        skein.input_command("go north\n");
        skein.output_text("A clearing. Paths lead east and south.\n");
        skein.waiting_for_input();
        skein.input_command("go east");
        skein.output_text("A riverbank.\n");
        skein.waiting_for_input();
        skein
    }

    #[test]
    fn recording_builds_a_played_path() {
        let skein = recorded_session();
        assert_eq!(skein.root().subtree_size(), 3);

        let north = skein.root().child_with_command("go north").unwrap();
        assert!(north.played());
        assert_eq!(
            north.result(),
            Some("A clearing. Paths lead east and south.\n")
        );

        let east = north.child_with_command("go east").unwrap();
        assert_eq!(east.id(), skein.active());
        assert_eq!(east.result(), Some("A riverbank.\n"));
    }

    #[test]
    fn replay_reuses_children_and_tracks_drift() {
        let mut skein = recorded_session();
        skein.interpreter_restart();
        assert_eq!(skein.active(), skein.root().id());

        skein.input_command("go north");
        skein.output_text("A clearing. Paths lead east and south.\n");
        skein.waiting_for_input();
        assert_eq!(skein.root().subtree_size(), 3);
        let north = skein.root().child_with_command("go north").unwrap();
        assert!(!north.changed());

        skein.interpreter_restart();
        skein.input_command("go north");
        skein.output_text("A clearing. A fallen tree blocks the east path.\n");
        skein.waiting_for_input();
        let north = skein.root().child_with_command("go north").unwrap();
        assert!(north.changed());
    }

    #[test]
    fn scores_accumulate_along_active_path() {
        let skein = recorded_session();
        let north = skein.root().child_with_command("go north").unwrap();
        let east = north.child_with_command("go east").unwrap();
        // north was on the active path for both commands, east for one
        assert_eq!(north.temporary_score(), 2);
        assert_eq!(east.temporary_score(), 1);
    }

    #[test]
    fn prune_removes_lowest_scored_leaves_first() {
        let mut skein = Skein::new();
        for (command, score) in [("a", 5), ("b", 1), ("c", 3)] {
            let id = skein.root_mut().add_child(SkeinItem::new(command));
            skein.root_mut().find_mut(id).unwrap().set_temporary_score(score);
        }
        skein.remove_temporary_items(1);

        let commands: Vec<_> = skein
            .root()
            .children()
            .iter()
            .map(SkeinItem::command)
            .collect();
        assert_eq!(commands, [Some("a")]);
    }

    #[test]
    fn prune_never_removes_the_active_item() {
        let mut skein = Skein::new();
        let keep = skein.input_command("go north");
        skein.root_mut().add_child(SkeinItem::new("go south"));
        skein.remove_temporary_items(0);

        assert!(skein.root().has_descendant(keep));
        assert!(skein.root().child_with_command("go south").is_none());
    }

    #[test]
    fn transcript_and_recording_follow_the_path() {
        let skein = recorded_session();
        let transcript = skein.transcript_to_point(skein.active()).unwrap();
        assert_eq!(
            transcript,
            "go north\nA clearing. Paths lead east and south.\ngo east\nA riverbank.\n"
        );

        let recording = skein.recording_to_point(skein.active()).unwrap();
        assert_eq!(recording, "go north\ngo east\n");
    }

    #[test]
    fn annotations_are_sorted_and_deduplicated() {
        let mut skein = Skein::new();
        skein
            .root_mut()
            .add_child(SkeinItem::new("x").with_annotation("maze"));
        skein
            .root_mut()
            .add_child(SkeinItem::new("y").with_annotation("bridge puzzle"));
        skein
            .root_mut()
            .add_child(SkeinItem::new("z").with_annotation("maze"));

        assert_eq!(skein.annotations(), ["bridge puzzle", "maze"]);
        assert_eq!(skein.items_with_annotation("maze").len(), 2);
    }

    #[test]
    fn set_active_rejects_unknown_ids() {
        let mut skein = Skein::new();
        let before = skein.active();
        assert!(!skein.set_active(NodeId::new()));
        assert_eq!(skein.active(), before);
    }
}
