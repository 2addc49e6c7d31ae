use crate::editing::slash::{CatalogEntry, SlashCommand};
use crate::editing::{Cmd, Patch};
use crate::models::{Block, BlockId, BlockList, BlockPatch, BlockType};

/// In-memory editing model for one post body.
///
/// Owns the block list exclusively, plus the advisory UI state that goes with
/// it: which block has focus and whether a slash-command menu is open.
/// Every operation is total; commands naming unknown blocks are ignored.
#[derive(Debug, Clone)]
pub struct BlockEditor {
    blocks: BlockList,
    focused: Option<BlockId>,
    slash: Option<SlashCommand>,
    /// Incremented on each effective content change
    version: u64,
}

impl BlockEditor {
    pub fn new(blocks: BlockList) -> Self {
        Self {
            blocks,
            focused: None,
            slash: None,
            version: 0,
        }
    }

    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    pub fn into_blocks(self) -> BlockList {
        self.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn focused(&self) -> Option<&BlockId> {
        self.focused.as_ref()
    }

    pub fn slash_command(&self) -> Option<&SlashCommand> {
        self.slash.as_ref()
    }

    /// Menu entries for the open slash command (empty when none is open)
    pub fn slash_candidates(&self) -> Vec<&'static CatalogEntry> {
        self.slash
            .as_ref()
            .map(SlashCommand::candidates)
            .unwrap_or_default()
    }

    /// Apply a command and report what changed
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let changed = match cmd {
            Cmd::Insert { block_type, after } => {
                vec![self.insert_block(block_type, after.as_ref())]
            }
            Cmd::Update { id, patch } => self.update_block(&id, patch),
            Cmd::EditText { id, text } => self.edit_block_text(&id, text),
            Cmd::Delete { id } => self.delete_block(&id),
            Cmd::Reorder { from, to } => self.move_block(from, to),
            Cmd::MoveOnto { active, over } => {
                match (self.blocks.position(&active), self.blocks.position(&over)) {
                    (Some(from), Some(to)) => self.move_block(from, to),
                    _ => Vec::new(),
                }
            }
            Cmd::BackspaceOnEmpty { id } => self.backspace_block(&id),
            Cmd::Focus { id } => {
                self.focused = self.blocks.get(&id).map(|b| b.id.clone());
                Vec::new()
            }
            Cmd::Blur => {
                self.focused = None;
                Vec::new()
            }
            Cmd::AcceptSlash { block_type } => self.accept_slash_type(block_type),
            Cmd::AcceptFirstSlash => match self.slash.as_ref().and_then(|s| s.first_match()) {
                Some(entry) => self.accept_slash_type(entry.block_type),
                None => Vec::new(),
            },
            Cmd::CancelSlash => self.cancel_slash_command(),
        };

        if !changed.is_empty() {
            self.version += 1;
        }

        Patch {
            changed,
            focus: self.focused.clone(),
            version: self.version,
        }
    }

    /// Insert an empty block and return its id so the caller can focus it
    pub fn insert(&mut self, block_type: BlockType, after: Option<&BlockId>) -> BlockId {
        let id = self.insert_block(block_type, after);
        self.version += 1;
        id
    }

    pub fn update(&mut self, id: &BlockId, patch: BlockPatch) -> Patch {
        self.apply(Cmd::Update {
            id: id.clone(),
            patch,
        })
    }

    pub fn edit_text(&mut self, id: &BlockId, text: impl Into<String>) -> Patch {
        self.apply(Cmd::EditText {
            id: id.clone(),
            text: text.into(),
        })
    }

    pub fn delete(&mut self, id: &BlockId) -> Patch {
        self.apply(Cmd::Delete { id: id.clone() })
    }

    pub fn reorder(&mut self, from: usize, to: usize) -> Patch {
        self.apply(Cmd::Reorder { from, to })
    }

    pub fn move_onto(&mut self, active: &BlockId, over: &BlockId) -> Patch {
        self.apply(Cmd::MoveOnto {
            active: active.clone(),
            over: over.clone(),
        })
    }

    /// Returns true if the block was removed
    pub fn backspace_on_empty(&mut self, id: &BlockId) -> bool {
        !self
            .apply(Cmd::BackspaceOnEmpty { id: id.clone() })
            .is_noop()
    }

    pub fn focus(&mut self, id: &BlockId) {
        self.apply(Cmd::Focus { id: id.clone() });
    }

    pub fn blur(&mut self) {
        self.apply(Cmd::Blur);
    }

    pub fn accept_slash(&mut self, block_type: BlockType) -> Patch {
        self.apply(Cmd::AcceptSlash { block_type })
    }

    pub fn accept_first_slash(&mut self) -> Patch {
        self.apply(Cmd::AcceptFirstSlash)
    }

    pub fn cancel_slash(&mut self) -> Patch {
        self.apply(Cmd::CancelSlash)
    }

    fn insert_block(&mut self, block_type: BlockType, after: Option<&BlockId>) -> BlockId {
        let block = Block::new(block_type);
        let id = block.id.clone();

        match after.and_then(|after| self.blocks.position(after)) {
            Some(index) => self.blocks.insert(index + 1, block),
            None => {
                if let Some(after) = after {
                    log::debug!("insert anchor {after} not found, appending");
                }
                self.blocks.push(block);
            }
        }

        self.focused = Some(id.clone());
        self.slash = None;
        id
    }

    fn update_block(&mut self, id: &BlockId, patch: BlockPatch) -> Vec<BlockId> {
        match self.blocks.get_mut(id) {
            Some(block) => {
                if block.apply_patch(patch) {
                    vec![id.clone()]
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        }
    }

    fn edit_block_text(&mut self, id: &BlockId, text: String) -> Vec<BlockId> {
        let Some(block) = self.blocks.get_mut(id) else {
            return Vec::new();
        };

        let next_slash = SlashCommand::from_text(id, &text);
        let content_changed = block.apply_patch(BlockPatch::content(text));

        let slash_before = self.slash.clone();
        match next_slash {
            Some(cmd) => self.slash = Some(cmd),
            None => {
                if self.slash.as_ref().is_some_and(|s| &s.block == id) {
                    self.slash = None;
                }
            }
        }

        if content_changed || slash_before != self.slash {
            vec![id.clone()]
        } else {
            Vec::new()
        }
    }

    fn delete_block(&mut self, id: &BlockId) -> Vec<BlockId> {
        let Some(index) = self.blocks.position(id) else {
            return Vec::new();
        };
        if self.blocks.remove(index).is_none() {
            log::debug!("refusing to delete {id}: last block in the list");
            return Vec::new();
        }

        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
        if self.slash.as_ref().is_some_and(|s| &s.block == id) {
            self.slash = None;
        }
        vec![id.clone()]
    }

    fn move_block(&mut self, from: usize, to: usize) -> Vec<BlockId> {
        if !self.blocks.move_block(from, to) {
            return Vec::new();
        }
        let (lo, hi) = (from.min(to), from.max(to));
        self.blocks.as_slice()[lo..=hi]
            .iter()
            .map(|b| b.id.clone())
            .collect()
    }

    fn backspace_block(&mut self, id: &BlockId) -> Vec<BlockId> {
        let Some(index) = self.blocks.position(id) else {
            return Vec::new();
        };
        let is_empty = self
            .blocks
            .get(id)
            .is_some_and(|block| block.content.is_empty());
        let slash_open_here = self.slash.as_ref().is_some_and(|s| &s.block == id);

        if !is_empty || slash_open_here || self.blocks.len() <= 1 {
            return Vec::new();
        }

        let previous = index
            .checked_sub(1)
            .and_then(|i| self.blocks.as_slice().get(i))
            .map(|b| b.id.clone());

        let changed = self.delete_block(id);
        if !changed.is_empty() {
            self.focused = previous;
        }
        changed
    }

    /// Only entries the current query still offers can be picked
    fn accept_slash_type(&mut self, block_type: BlockType) -> Vec<BlockId> {
        let offered = self
            .slash_candidates()
            .iter()
            .any(|entry| entry.block_type == block_type);
        if !offered {
            log::debug!("ignoring slash pick {block_type:?}: not among candidates");
            return Vec::new();
        }
        let Some(cmd) = self.slash.take() else {
            return Vec::new();
        };
        let patch = BlockPatch {
            block_type: Some(block_type),
            content: Some(String::new()),
            ..BlockPatch::default()
        };
        if let Some(block) = self.blocks.get_mut(&cmd.block) {
            block.apply_patch(patch);
        }
        vec![cmd.block]
    }

    fn cancel_slash_command(&mut self) -> Vec<BlockId> {
        let Some(cmd) = self.slash.take() else {
            return Vec::new();
        };
        if let Some(block) = self.blocks.get_mut(&cmd.block) {
            block.apply_patch(BlockPatch::content(""));
        }
        vec![cmd.block]
    }
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self::new(BlockList::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor_with(ids: &[&str]) -> BlockEditor {
        let blocks = ids
            .iter()
            .map(|id| Block::with_id((*id).into(), BlockType::Paragraph).content(*id))
            .collect();
        BlockEditor::new(BlockList::normalized(blocks))
    }

    fn ids(editor: &BlockEditor) -> Vec<String> {
        editor
            .blocks()
            .iter()
            .map(|b| b.id.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_insert_after_places_block_immediately_after() {
        let mut editor = editor_with(&["a", "b", "c"]);

        let new_id = editor.insert(BlockType::Quote, Some(&"a".into()));

        assert_eq!(ids(&editor), vec!["a", new_id.as_str(), "b", "c"]);
        let new_block = editor.blocks().get(&new_id).unwrap();
        assert_eq!(new_block.block_type, BlockType::Quote);
        assert_eq!(new_block.content, "");
    }

    #[test]
    fn test_insert_without_anchor_appends() {
        let mut editor = editor_with(&["a", "b", "c"]);
        let new_id = editor.insert(BlockType::Paragraph, None);
        assert_eq!(ids(&editor), vec!["a", "b", "c", new_id.as_str()]);
    }

    #[test]
    fn test_insert_with_unknown_anchor_appends() {
        let mut editor = editor_with(&["a", "b"]);
        let new_id = editor.insert(BlockType::Paragraph, Some(&"missing".into()));
        assert_eq!(ids(&editor), vec!["a", "b", new_id.as_str()]);
    }

    #[test]
    fn test_insert_focuses_new_block() {
        let mut editor = editor_with(&["a"]);
        let patch = editor.apply(Cmd::Insert {
            block_type: BlockType::Callout,
            after: None,
        });
        assert_eq!(patch.focus, patch.changed.first().cloned());
        assert_eq!(editor.focused(), patch.focus.as_ref());
    }

    #[test]
    fn test_inserted_callout_has_placeholder_emoji() {
        let mut editor = editor_with(&["a"]);
        let id = editor.insert(BlockType::Callout, None);
        assert_eq!(
            editor.blocks().get(&id).unwrap().emoji.as_deref(),
            Some("💡")
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut editor = editor_with(&["a"]);
        let patch = editor.update(&"zzz".into(), BlockPatch::content("x"));
        assert!(patch.is_noop());
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut editor = editor_with(&["a"]);
        editor.update(&"a".into(), BlockPatch::retype(BlockType::Heading2));
        let block = editor.blocks().get(&"a".into()).unwrap();
        assert_eq!(block.block_type, BlockType::Heading2);
        assert_eq!(block.content, "a");
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn test_update_with_identical_fields_is_noop() {
        let mut editor = editor_with(&["a"]);
        let patch = editor.update(&"a".into(), BlockPatch::content("a"));
        assert!(patch.is_noop());
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn test_delete_last_block_is_noop() {
        let mut editor = editor_with(&["only"]);
        let patch = editor.delete(&"only".into());
        assert!(patch.is_noop());
        assert_eq!(ids(&editor), vec!["only"]);
    }

    #[test]
    fn test_delete_removes_block_and_focus() {
        let mut editor = editor_with(&["a", "b"]);
        editor.focus(&"b".into());
        editor.delete(&"b".into());
        assert_eq!(ids(&editor), vec!["a"]);
        assert_eq!(editor.focused(), None);
    }

    #[test]
    fn test_delete_never_empties_list() {
        let mut editor = editor_with(&["a", "b", "c"]);
        for id in ["a", "b", "c"] {
            editor.delete(&id.into());
        }
        assert_eq!(ids(&editor), vec!["c"]);
    }

    #[test]
    fn test_reorder_moves_block_preserving_others() {
        let mut editor = editor_with(&["a", "b", "c", "d"]);
        editor.reorder(0, 2);
        assert_eq!(ids(&editor), vec!["b", "c", "a", "d"]);
        editor.reorder(3, 0);
        assert_eq!(ids(&editor), vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut editor = editor_with(&["a", "b"]);
        assert!(editor.reorder(0, 5).is_noop());
        assert!(editor.reorder(1, 1).is_noop());
        assert_eq!(ids(&editor), vec!["a", "b"]);
    }

    #[test]
    fn test_move_onto_uses_target_position() {
        let mut editor = editor_with(&["a", "b", "c"]);
        editor.move_onto(&"c".into(), &"a".into());
        assert_eq!(ids(&editor), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_focus_unknown_id_clears_focus() {
        let mut editor = editor_with(&["a"]);
        editor.focus(&"a".into());
        editor.focus(&"nope".into());
        assert_eq!(editor.focused(), None);
    }

    #[test]
    fn test_backspace_on_empty_deletes_and_focuses_previous() {
        let mut editor = editor_with(&["a", "b"]);
        editor.edit_text(&"b".into(), "");
        assert!(editor.backspace_on_empty(&"b".into()));
        assert_eq!(ids(&editor), vec!["a"]);
        assert_eq!(editor.focused().map(BlockId::as_str), Some("a"));
    }

    #[test]
    fn test_backspace_on_non_empty_block_does_nothing() {
        let mut editor = editor_with(&["a", "b"]);
        assert!(!editor.backspace_on_empty(&"b".into()));
        assert_eq!(ids(&editor), vec!["a", "b"]);
    }

    #[test]
    fn test_slash_command_opens_and_filters() {
        let mut editor = editor_with(&["a"]);
        editor.edit_text(&"a".into(), "/head");

        let cmd = editor.slash_command().unwrap();
        assert_eq!(cmd.query, "head");
        let labels: Vec<_> = editor.slash_candidates().iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Heading 1", "Heading 2", "Heading 3"]);
    }

    #[test]
    fn test_accept_first_slash_retypes_and_clears_content() {
        let mut editor = editor_with(&["a"]);
        editor.edit_text(&"a".into(), "/h2");
        editor.accept_first_slash();

        let block = editor.blocks().get(&"a".into()).unwrap();
        assert_eq!(block.block_type, BlockType::Heading2);
        assert_eq!(block.content, "");
        assert!(editor.slash_command().is_none());
    }

    #[test]
    fn test_accept_slash_picks_offered_entry() {
        let mut editor = editor_with(&["a"]);
        editor.edit_text(&"a".into(), "/head");
        let patch = editor.accept_slash(BlockType::Heading3);

        assert_eq!(patch.changed, vec![BlockId::from("a")]);
        let block = editor.blocks().get(&"a".into()).unwrap();
        assert_eq!(block.block_type, BlockType::Heading3);
        assert_eq!(block.content, "");
    }

    #[test]
    fn test_accept_slash_ignores_filtered_out_type() {
        let mut editor = editor_with(&["a"]);
        editor.edit_text(&"a".into(), "/head");
        let patch = editor.accept_slash(BlockType::Quote);

        assert!(patch.is_noop());
        assert!(editor.slash_command().is_some());
        let block = editor.blocks().get(&"a".into()).unwrap();
        assert_eq!(block.block_type, BlockType::Paragraph);
        assert_eq!(block.content, "/head");
    }

    #[test]
    fn test_accept_first_slash_without_match_keeps_menu_open() {
        let mut editor = editor_with(&["a"]);
        editor.edit_text(&"a".into(), "/zzz");
        let patch = editor.accept_first_slash();
        assert!(patch.is_noop());
        assert!(editor.slash_command().is_some());
        assert_eq!(editor.blocks().get(&"a".into()).unwrap().content, "/zzz");
    }

    #[test]
    fn test_cancel_slash_clears_content_keeps_type() {
        let mut editor = editor_with(&["a"]);
        editor.update(&"a".into(), BlockPatch::retype(BlockType::Quote));
        editor.edit_text(&"a".into(), "/co");
        editor.cancel_slash();

        let block = editor.blocks().get(&"a".into()).unwrap();
        assert_eq!(block.block_type, BlockType::Quote);
        assert_eq!(block.content, "");
        assert!(editor.slash_command().is_none());
    }

    #[test]
    fn test_removing_trigger_exits_slash_command() {
        let mut editor = editor_with(&["a"]);
        editor.edit_text(&"a".into(), "/h");
        editor.edit_text(&"a".into(), "h");
        assert!(editor.slash_command().is_none());
        let block = editor.blocks().get(&"a".into()).unwrap();
        assert_eq!(block.content, "h");
        assert_eq!(block.block_type, BlockType::Paragraph);
    }

    #[test]
    fn test_backspace_is_ignored_while_slash_menu_open() {
        let mut editor = editor_with(&["a", "b"]);
        editor.edit_text(&"b".into(), "/");
        editor.update(&"b".into(), BlockPatch::content(""));
        assert!(!editor.backspace_on_empty(&"b".into()));
    }
}
