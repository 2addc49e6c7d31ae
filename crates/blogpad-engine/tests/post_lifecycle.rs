use blogpad_engine::convert::{self, ExternalBlock};
use blogpad_engine::models::{Block, BlockList, BlockType};
use blogpad_engine::render::{self, Rendered};
use blogpad_engine::store::{FsPostStore, LocalAuth, PostStore, User};
use blogpad_engine::{BlockEditor, EditorSession};
use pretty_assertions::assert_eq;
use serde_json::json;

fn author() -> User {
    User {
        id: "author-1".to_string(),
        email: "author@example.com".to_string(),
    }
}

fn every_type() -> Vec<Block> {
    vec![
        Block::new(BlockType::Paragraph).content("Plain words"),
        Block::new(BlockType::Heading1).content("Top").emoji("🧘"),
        Block::new(BlockType::Heading2).content("Middle"),
        Block::new(BlockType::Heading3).content("Low").emoji("🌱"),
        Block::new(BlockType::BulletList).content("a\nb"),
        Block::new(BlockType::NumberedList).content("one\ntwo"),
        Block::new(BlockType::Quote).content("Said once"),
        Block::new(BlockType::Divider),
        Block::new(BlockType::Callout).content("Careful"),
        Block::new(BlockType::Code).content("let x = 1;"),
        Block::new(BlockType::Image)
            .image_url("https://x/y.png")
            .content("Caption"),
    ]
}

#[test]
fn every_block_type_survives_storage_round_trip() {
    let original = every_type();

    let stored = serde_json::to_value(convert::to_external(&original)).unwrap();
    let reloaded = convert::from_external(&convert::parse_blocks(&stored));

    assert_eq!(reloaded, original);
}

#[test]
fn stored_heading_shape_matches_rich_block_schema() {
    let heading = Block::new(BlockType::Heading1).content("Hello").emoji("🧘");

    let stored = serde_json::to_value(convert::to_external(&[heading])).unwrap();

    assert_eq!(stored[0]["type"], "heading-1");
    assert_eq!(stored[0]["content"][0]["text"], "🧘 Hello");
    assert_eq!(stored[0]["props"], json!({"level": 1}));
}

#[test]
fn empty_stored_body_opens_as_one_paragraph() {
    let blocks: Vec<ExternalBlock> = convert::parse_blocks(&json!([]));
    let list = convert::load_block_list(&blocks);

    let editor = BlockEditor::new(list);

    assert_eq!(editor.blocks().len(), 1);
    assert_eq!(
        editor.blocks().iter().next().map(|b| (b.block_type, b.content.as_str())),
        Some((BlockType::Paragraph, ""))
    );
}

#[test]
fn slash_command_converts_block_before_saving() {
    let data_dir = tempfile::tempdir().unwrap();
    let mut store = FsPostStore::open(data_dir.path()).unwrap();
    let auth = LocalAuth::signed_in(author());

    let mut session = EditorSession::open_new();
    session.draft_mut().title = "Lists".to_string();
    let editor = &mut session.draft_mut().editor;
    let first = editor.blocks().iter().next().unwrap().id.clone();
    editor.edit_text(&first, "/bul");
    editor.accept_first_slash();
    editor.edit_text(&first, "milk\neggs\nbread");
    let saved = session.save(&mut store, &auth).unwrap();

    let post = store.get(&saved.id).unwrap().unwrap();
    let rendered = render::render_blocks(post.block_list().as_slice());

    assert_eq!(
        rendered,
        vec![Rendered::BulletList(vec![
            "milk".to_string(),
            "eggs".to_string(),
            "bread".to_string()
        ])]
    );
}

#[test]
fn deleting_the_only_block_keeps_it() {
    let mut editor = BlockEditor::new(BlockList::new());
    let only = editor.blocks().iter().next().unwrap().id.clone();

    let patch = editor.delete(&only);

    assert!(patch.is_noop());
    assert_eq!(editor.blocks().len(), 1);
}
