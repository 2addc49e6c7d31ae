/*!
 * # Block Editing
 *
 * The editor keeps a post body as an ordered [`BlockList`](crate::models::BlockList)
 * and mutates it only through commands.
 *
 * ## Command-Based Editing
 * - Every edit is a [`Cmd`] applied with [`BlockEditor::apply`]
 * - Each application returns a [`Patch`] naming the blocks that changed, the
 *   block that should hold focus, and the new version number
 * - Named helpers (`insert`, `update`, `delete`, `reorder`, ...) are thin
 *   wrappers over `apply`
 *
 * ## Invariants
 * - Block ids are unique and stable for the life of a block
 * - The list is never empty: deleting the last block is refused
 * - Commands naming unknown ids are silently ignored
 *
 * ## Slash Commands
 * Typing `/` at the start of a block opens a menu over the fixed block-type
 * [`slash::CATALOG`]. The text after the trigger filters the menu; accepting
 * an entry converts the block and discards the typed command.
 *
 * ## Usage Pattern
 *
 * ```rust
 * use blogpad_engine::editing::{BlockEditor, Cmd};
 * use blogpad_engine::models::{BlockList, BlockType};
 *
 * let mut editor = BlockEditor::new(BlockList::new());
 * let first = editor.blocks().iter().next().unwrap().id.clone();
 *
 * let heading = editor.insert(BlockType::Heading1, Some(&first));
 * editor.edit_text(&heading, "Hello");
 *
 * let patch = editor.apply(Cmd::Reorder { from: 1, to: 0 });
 * assert_eq!(patch.version, editor.version());
 * assert_eq!(editor.blocks().len(), 2);
 * ```
 */

pub mod commands;
pub mod editor;
pub mod patch;
pub mod slash;

pub use commands::Cmd;
pub use editor::BlockEditor;
pub use patch::Patch;
pub use slash::{CATALOG, CatalogEntry, SlashCommand};
