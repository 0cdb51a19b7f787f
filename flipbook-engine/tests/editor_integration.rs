//! End-to-end editor scenarios: overflow, summary pagination, history and
//! persistence working through the public surface.

use flipbook_core::{
    Document, EditorConfig, Element, ElementKind, Page, PageKind, Rect, ELEMENT_GAP, PAGE_HEIGHT,
    TOP_MARGIN,
};
use flipbook_engine::{
    new_summary_page, Editor, GestureKind, Insertion, HISTORY_CAPACITY,
};

fn inserted(editor: &mut Editor, kind: ElementKind, content: &str) -> flipbook_core::ElementId {
    match editor.insert_element(kind, content).expect("insert") {
        Insertion::Inserted(id) => id,
        Insertion::NeedsConfirmation(_) => panic!("unexpected confirmation request"),
    }
}

fn full_page() -> Page {
    // One band covering the whole usable column.
    Page::with_elements(
        PageKind::Standard,
        vec![Element::new(ElementKind::Shape, "").with_frame(Rect::new(
            40.0,
            TOP_MARGIN,
            400.0,
            PAGE_HEIGHT - TOP_MARGIN - 60.0,
        ))],
    )
}

fn part_title(n: usize, y: f32) -> Element {
    Element::new(ElementKind::PartTitle, format!("Part {n}"))
        .with_frame(Rect::new(40.0, y, 400.0, 60.0))
}

// ---------------------------------------------------------------------------
// Overflow
// ---------------------------------------------------------------------------

#[test]
fn overflow_creates_page_and_places_at_top_margin() {
    let document = Document::from_pages(vec![full_page()]).expect("doc");
    let mut editor = Editor::with_document(EditorConfig::new(), document);
    let first_page = editor.active_page();

    // Model3d defaults to 400x300; the page has no room anywhere.
    let id = inserted(&mut editor, ElementKind::Model3d, "model");

    assert_eq!(editor.document().page_count(), 2);
    assert_ne!(editor.active_page(), first_page);
    let page = editor.document().page(editor.active_page()).expect("page");
    assert_eq!(page.kind, PageKind::Standard);
    let element = page.element(id).expect("element");
    assert!((element.frame.y - TOP_MARGIN).abs() < f32::EPSILON);
}

#[test]
fn overflow_page_lands_before_back_cover() {
    let document = Document::from_pages(vec![full_page(), Page::new(PageKind::BackCover)])
        .expect("doc");
    let mut editor = Editor::with_document(EditorConfig::new(), document);

    inserted(&mut editor, ElementKind::Model3d, "model");

    let pages = editor.document().pages();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[1].kind, PageKind::Standard);
    assert_eq!(pages[2].kind, PageKind::BackCover);
    assert_eq!(editor.active_page(), pages[1].id);
}

#[test]
fn overflow_is_one_history_entry() {
    let document = Document::from_pages(vec![full_page()]).expect("doc");
    let mut editor = Editor::with_document(EditorConfig::new(), document);
    let before = editor.history_len();

    inserted(&mut editor, ElementKind::Model3d, "model");
    assert_eq!(editor.history_len(), before + 1);

    // One undo removes both the element and the page.
    assert!(editor.undo());
    assert_eq!(editor.document().page_count(), 1);
}

// ---------------------------------------------------------------------------
// Summary pagination
// ---------------------------------------------------------------------------

#[test]
fn forty_four_toc_items_produce_two_summary_pages() {
    // 44 part titles across four standard pages, 11 each.
    let mut pages = vec![new_summary_page()];
    for page_index in 0..4_usize {
        let elements = (0..11_usize)
            .map(|i| {
                let n = page_index * 11 + i + 1;
                part_title(n, TOP_MARGIN + (i as f32) * 80.0)
            })
            .collect();
        pages.push(Page::with_elements(PageKind::Standard, elements));
    }
    let document = Document::from_pages(pages).expect("doc");
    let editor = Editor::with_document(EditorConfig::new(), document);

    assert_eq!(editor.structure().toc().len(), 44);
    assert_eq!(editor.document().summary_count(), 2);
    assert_eq!(editor.toc_slice(0).len(), 22);
    assert_eq!(editor.toc_slice(1).len(), 22);
    assert_eq!(editor.toc_slice(1)[0].title, "Part 23");
}

#[test]
fn summary_pages_track_toc_growth_and_shrink() {
    let mut editor = Editor::default();
    editor.set_summary_enabled(true);
    assert_eq!(editor.document().summary_count(), 1);

    // Push the TOC past one page: 23 part titles spill over several pages.
    let mut ids = Vec::new();
    for n in 1..=23 {
        ids.push(inserted(&mut editor, ElementKind::PartTitle, &format!("P{n}")));
    }
    assert_eq!(editor.structure().toc().len(), 23);
    assert_eq!(editor.document().summary_count(), 2);

    // Deleting back below the threshold drops the trailing summary page.
    let page_id = editor
        .document()
        .find_element(ids[22])
        .map(|(page, _)| page.id)
        .expect("element");
    editor.delete_element(page_id, ids[22]).expect("delete");
    assert_eq!(editor.structure().toc().len(), 22);
    assert_eq!(editor.document().summary_count(), 1);
}

#[test]
fn summary_disable_removes_all_summary_pages() {
    let mut editor = Editor::default();
    editor.set_summary_enabled(true);
    inserted(&mut editor, ElementKind::SequenceTitle, "Seq");
    assert!(editor.document().summary_count() >= 1);

    editor.set_summary_enabled(false);
    assert_eq!(editor.document().summary_count(), 0);

    // Feature off: further structural edits do not resurrect summary pages.
    inserted(&mut editor, ElementKind::PartTitle, "Part");
    assert_eq!(editor.document().summary_count(), 0);
}

#[test]
fn summary_pages_sit_after_cover_prefix() {
    let document = Document::from_pages(vec![
        Page::new(PageKind::Cover),
        Page::new(PageKind::White),
        Page::new(PageKind::Standard),
    ])
    .expect("doc");
    let mut editor = Editor::with_document(EditorConfig::new(), document);
    editor.set_summary_enabled(true);

    let pages = editor.document().pages();
    assert_eq!(pages[0].kind, PageKind::Cover);
    assert_eq!(pages[1].kind, PageKind::White);
    assert_eq!(pages[2].kind, PageKind::Summary);
    assert_eq!(pages[3].kind, PageKind::Standard);
}

// ---------------------------------------------------------------------------
// Numbering across pages
// ---------------------------------------------------------------------------

#[test]
fn numbering_spans_pages_and_resets_on_new_sequence() {
    let page1 = Page::with_elements(
        PageKind::Standard,
        vec![
            Element::new(ElementKind::SequenceTitle, "Alpha")
                .with_frame(Rect::new(0.0, TOP_MARGIN, 794.0, 90.0)),
            part_title(1, 200.0),
        ],
    );
    let page2 = Page::with_elements(
        PageKind::Standard,
        vec![
            part_title(2, TOP_MARGIN),
            Element::new(ElementKind::SequenceTitle, "Beta")
                .with_frame(Rect::new(0.0, 300.0, 794.0, 90.0)),
            part_title(3, 500.0),
        ],
    );
    let document = Document::from_pages(vec![page1, page2]).expect("doc");
    let editor = Editor::with_document(EditorConfig::new(), document);

    let toc = editor.structure().toc();
    let labels: Vec<&str> = toc.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["SÉQUENCE 1", "1 -", "2 -", "SÉQUENCE 2", "1 -"]
    );
    assert_eq!(toc[0].page_ordinal, 1);
    assert_eq!(toc[2].page_ordinal, 2);
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[test]
fn undo_after_three_commits_then_redo_reaches_second() {
    let mut editor = Editor::default();
    inserted(&mut editor, ElementKind::Text, "one");
    inserted(&mut editor, ElementKind::Text, "two");
    let after_two = editor.document().clone();
    inserted(&mut editor, ElementKind::Text, "three");

    assert!(editor.undo());
    assert!(editor.undo());
    assert!(editor.redo());
    assert_eq!(*editor.document(), after_two);
}

#[test]
fn history_is_bounded() {
    let mut editor = Editor::default();
    for n in 0..(HISTORY_CAPACITY + 25) {
        let page_id = editor.active_page();
        let id = inserted(&mut editor, ElementKind::Text, &format!("e{n}"));
        editor.delete_element(page_id, id).expect("delete");
    }
    assert_eq!(editor.history_len(), HISTORY_CAPACITY);

    let mut undos = 0;
    while editor.undo() {
        undos += 1;
    }
    assert_eq!(undos, HISTORY_CAPACITY - 1);
}

#[test]
fn undo_restores_summary_state_verbatim() {
    let mut editor = Editor::default();
    editor.set_summary_enabled(true);
    let with_summary = editor.document().clone();

    editor.set_summary_enabled(false);
    assert_eq!(editor.document().summary_count(), 0);

    assert!(editor.undo());
    assert_eq!(*editor.document(), with_summary);
}

// ---------------------------------------------------------------------------
// Drag sessions
// ---------------------------------------------------------------------------

#[test]
fn drag_preview_is_not_committed_until_release() {
    let mut editor = Editor::default();
    let page_id = editor.active_page();
    let id = inserted(&mut editor, ElementKind::Text, "drag me");
    let committed_y = editor
        .document()
        .page(page_id)
        .and_then(|p| p.element(id))
        .expect("element")
        .frame
        .y;
    let history_before = editor.history_len();

    editor
        .begin_drag(page_id, id, GestureKind::Move)
        .expect("begin");
    editor.drag_by(10.0, 300.0).expect("preview");
    editor.drag_by(10.0, 400.0).expect("preview");

    // Committed document untouched, preview reflects the gesture.
    assert!(
        (editor.document().page(page_id).and_then(|p| p.element(id)).expect("element").frame.y
            - committed_y)
            .abs()
            < f32::EPSILON
    );
    assert_eq!(editor.history_len(), history_before);

    editor.end_drag().expect("end");
    assert_eq!(editor.history_len(), history_before + 1);
    // Sole element settles back to the top margin.
    let settled_y = editor
        .document()
        .page(page_id)
        .and_then(|p| p.element(id))
        .expect("element")
        .frame
        .y;
    assert!((settled_y - TOP_MARGIN).abs() < f32::EPSILON);
}

#[test]
fn cancelled_drag_leaves_no_trace() {
    let mut editor = Editor::default();
    let page_id = editor.active_page();
    let id = inserted(&mut editor, ElementKind::Text, "escape");
    let before = editor.document().clone();
    let history_before = editor.history_len();

    editor
        .begin_drag(page_id, id, GestureKind::Move)
        .expect("begin");
    editor.drag_by(100.0, 100.0).expect("preview");
    assert!(editor.cancel_drag());

    assert_eq!(*editor.document(), before);
    assert_eq!(editor.history_len(), history_before);
}

#[test]
fn drag_settle_resolves_created_overlap() {
    let mut editor = Editor::default();
    let page_id = editor.active_page();
    let a = inserted(&mut editor, ElementKind::Text, "a");
    let b = inserted(&mut editor, ElementKind::Text, "b");

    // Drag B on top of A, then release.
    editor
        .begin_drag(page_id, b, GestureKind::Move)
        .expect("begin");
    let a_frame = editor
        .document()
        .page(page_id)
        .and_then(|p| p.element(a))
        .expect("a")
        .frame;
    let b_frame = editor
        .document()
        .page(page_id)
        .and_then(|p| p.element(b))
        .expect("b")
        .frame;
    editor
        .drag_by(0.0, a_frame.y - b_frame.y + 5.0)
        .expect("preview");
    editor.end_drag().expect("end");

    let page = editor.document().page(page_id).expect("page");
    let a_after = page.element(a).expect("a").frame;
    let b_after = page.element(b).expect("b").frame;
    assert!(
        !(a_after.overlaps_horizontally(&b_after) && a_after.overlaps_vertically(&b_after)),
        "settle left an overlap"
    );
    // Stacked with the standard gap.
    let (top, bottom) = if a_after.y < b_after.y {
        (a_after, b_after)
    } else {
        (b_after, a_after)
    };
    assert!((bottom.y - (top.bottom() + ELEMENT_GAP)).abs() < f32::EPSILON);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("document.json");

    let mut editor = Editor::default();
    editor.set_summary_enabled(true);
    inserted(&mut editor, ElementKind::SequenceTitle, "Saved");
    let saved = editor.document().clone();
    editor.save_to_file(&path).expect("save");

    let mut fresh = Editor::default();
    fresh.load_from_file(&path).expect("load");
    assert_eq!(*fresh.document(), saved);
    assert_eq!(fresh.structure().toc().len(), 1);
}

#[test]
fn failed_load_leaves_document_untouched() {
    let mut editor = Editor::default();
    inserted(&mut editor, ElementKind::Text, "keep me");
    let before = editor.document().clone();

    assert!(editor.load_json("{\"title\": \"no pages\"}").is_err());
    assert!(editor.load_json("not json at all").is_err());
    assert!(editor.load_json("{\"pages\": []}").is_err());
    assert_eq!(*editor.document(), before);
}

#[test]
fn load_resets_history() {
    let mut editor = Editor::default();
    inserted(&mut editor, ElementKind::Text, "one");
    let json = editor.to_json().expect("serialize");

    let mut fresh = Editor::default();
    inserted(&mut fresh, ElementKind::Text, "junk");
    fresh.load_json(&json).expect("load");
    assert!(!fresh.can_undo());
    assert!(!fresh.can_redo());
}

// ---------------------------------------------------------------------------
// Page management
// ---------------------------------------------------------------------------

#[test]
fn removing_active_page_activates_neighbor() {
    let mut editor = Editor::default();
    let first = editor.active_page();
    let second = editor.insert_page_after(first).expect("insert page");
    assert_eq!(editor.active_page(), second);

    editor.remove_page(second).expect("remove");
    assert_eq!(editor.active_page(), first);
    assert_eq!(editor.document().page_count(), 1);
}

#[test]
fn new_page_via_editor_respects_back_cover() {
    let document = Document::from_pages(vec![
        Page::new(PageKind::Standard),
        Page::new(PageKind::BackCover),
    ])
    .expect("doc");
    let mut editor = Editor::with_document(EditorConfig::new(), document);
    let back_cover = editor.document().pages()[1].id;

    editor.insert_page_after(back_cover).expect("insert");
    let pages = editor.document().pages();
    assert_eq!(pages[2].kind, PageKind::BackCover);
    assert_eq!(pages[1].kind, PageKind::Standard);
}
