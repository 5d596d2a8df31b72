//! Visibility projection tests.

use std::sync::Arc;

use parking_lot::Mutex;

use horizon_datasource::model::{
    DataSource, HeaderFooter, IndexPath, KindDescriptor, ListHost, Row, Section,
};

struct Host;

impl ListHost for Host {
    type Cell = String;
    type View = String;

    fn dequeue_cell(&self, _template: &str, _path: IndexPath) -> String {
        String::new()
    }
}

type Source = DataSource<&'static str, Host>;

fn item() -> KindDescriptor<&'static str, String> {
    KindDescriptor::new("item").with_configure(|row: &Row<&'static str>, cell: &mut String, _| {
        cell.push_str(row.item())
    })
}

fn section(key: &str, items: &[&'static str]) -> Section<&'static str> {
    Section::new(items.iter().map(|item| Row::new("item", *item)).collect()).with_key(key)
}

fn visible_items(source: &Source) -> Vec<Vec<&'static str>> {
    source
        .visible_sections()
        .iter()
        .map(|section| section.rows().iter().map(|row| *row.item()).collect())
        .collect()
}

#[test]
fn test_hidden_row_keeps_its_section() {
    let source = Source::builder([item()])
        .with_row_hidden(|row, _| *row.item() == "r2")
        .with_sections(vec![section("A", &["r1", "r2"]), section("B", &["r3"])])
        .build();

    assert_eq!(visible_items(&source), vec![vec!["r1"], vec!["r3"]]);
    assert_eq!(source.number_of_sections(), 2);
    assert_eq!(source.number_of_rows(0), 1);
    assert_eq!(source.number_of_rows(1), 1);
}

#[test]
fn test_section_with_only_hidden_rows_collapses() {
    let source = Source::builder([item()])
        .with_row_hidden(|row, _| *row.item() == "r4")
        .with_sections(vec![
            section("A", &["r1"]),
            // Its own override says visible, but it has no visible rows left.
            section("C", &["r4"]).with_hidden(|_, _| false),
        ])
        .build();

    assert_eq!(visible_items(&source), vec![vec!["r1"]]);
    assert!(source.snapshot().visible_path(IndexPath::new(1, 0)).is_none());
}

#[test]
fn test_recomputing_is_idempotent() {
    let source = Source::builder([item()])
        .with_row_hidden(|row, path| row.item().starts_with('x') || path.row() > 2)
        .with_section_hidden(|section, _| section.key() == Some("drop"))
        .with_sections(vec![
            section("a", &["a1", "x2", "a3", "a4"]),
            section("drop", &["d1"]),
            section("b", &["x1", "b2"]),
        ])
        .build();

    let first = source.snapshot();
    source.refresh_visibility();
    let second = source.snapshot();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.visible(), second.visible());
    assert_eq!(visible_items(&source), vec![vec!["a1", "a3"], vec!["b2"]]);
}

#[test]
fn test_projection_preserves_model_order() {
    let items: [&'static str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let sections: Vec<_> = items
        .chunks(3)
        .enumerate()
        .map(|(index, chunk)| section(&format!("s{index}"), chunk))
        .collect();
    let source = Source::builder([item()])
        .with_row_hidden(|row, path| (row.item().as_bytes()[0] + path.section() as u8) % 2 == 0)
        .with_sections(sections)
        .build();

    let snapshot = source.snapshot();
    let mut last_source = None;
    for (visible_index, visible) in snapshot.visible().iter().enumerate() {
        assert!(last_source < Some(visible.source_index()));
        last_source = Some(visible.source_index());

        let rows = visible.source_rows();
        assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
        for (visible_row, &source_row) in rows.iter().enumerate() {
            let source_path = IndexPath::new(visible.source_index(), source_row);
            let visible_path = IndexPath::new(visible_index, visible_row);
            assert_eq!(snapshot.source_path(visible_path), source_path);
            assert_eq!(
                snapshot.visible_row(visible_path).item(),
                snapshot.row(source_path).item()
            );
        }
    }
}

#[test]
fn test_row_override_wins_over_global_predicate() {
    let source = Source::builder([item()])
        .with_row_hidden(|_, _| true)
        .with_sections(vec![Section::new(vec![
            Row::new("item", "pinned").with_hidden(|_, _| false),
            Row::new("item", "other"),
        ])])
        .build();

    assert_eq!(visible_items(&source), vec![vec!["pinned"]]);
}

#[test]
fn test_section_override_wins_over_global_predicate() {
    let source = Source::builder([item()])
        .with_section_hidden(|_, _| true)
        .with_sections(vec![
            section("kept", &["a"]).with_hidden(|_, _| false),
            section("dropped", &["b"]),
        ])
        .build();

    assert_eq!(visible_items(&source), vec![vec!["a"]]);
    assert_eq!(source.visible_section(0).key(), Some("kept"));
}

#[test]
fn test_predicates_see_full_model_positions() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let source = Source::builder([item()])
        .with_section_hidden(|_, index| index == 0)
        .with_row_hidden(move |_, path| {
            recorder.lock().push(path);
            false
        })
        .with_sections(vec![section("a", &["a1"]), section("b", &["b1", "b2"])])
        .build();

    assert_eq!(
        *seen.lock(),
        vec![
            IndexPath::new(0, 0),
            IndexPath::new(1, 0),
            IndexPath::new(1, 1)
        ]
    );
    assert_eq!(source.source_path(IndexPath::new(0, 1)), IndexPath::new(1, 1));
}

#[test]
fn test_visibility_follows_external_state() {
    let show_archived = Arc::new(Mutex::new(false));
    let flag = show_archived.clone();

    let source = Source::builder([item()])
        .with_sections(vec![
            section("inbox", &["mail"]),
            section("archive", &["old"]).with_hidden(move |_, _| !*flag.lock()),
        ])
        .build();
    assert_eq!(source.number_of_sections(), 1);

    *show_archived.lock() = true;
    source.refresh_visibility();
    assert_eq!(source.number_of_sections(), 2);
}

#[test]
fn test_replace_by_key_swaps_only_that_slot() {
    let source = Source::builder([item()])
        .with_sections(vec![
            section("k1", &["a"]),
            section("k2", &["b"]),
            section("k3", &["c"]),
        ])
        .build();

    assert!(source.replace(Some("k2"), section("new", &["x", "y"])));

    let keys: Vec<_> = source
        .sections()
        .iter()
        .map(|section| section.key().map(str::to_owned))
        .collect();
    assert_eq!(
        keys,
        vec![
            Some("k1".to_owned()),
            Some("new".to_owned()),
            Some("k3".to_owned())
        ]
    );
    assert_eq!(visible_items(&source), vec![vec!["a"], vec!["x", "y"], vec!["c"]]);
}

#[test]
fn test_replace_uses_replacement_key_when_none_given() {
    let source = Source::builder([item()])
        .with_sections(vec![section("k1", &["a"]), section("k2", &["b"])])
        .build();

    assert!(source.replace(None, section("k1", &["z"])));
    assert_eq!(visible_items(&source), vec![vec!["z"], vec!["b"]]);
}

#[test]
fn test_replace_without_keys_targets_first_unkeyed_section() {
    let unkeyed = |name: &'static str| Section::new(vec![Row::new("item", name)]);
    let source = Source::builder([item()])
        .with_sections(vec![unkeyed("old"), section("k", &["keyed"]), unkeyed("later")])
        .build();

    assert!(source.replace(None, unkeyed("new")));
    assert_eq!(
        visible_items(&source),
        vec![vec!["new"], vec!["keyed"], vec!["later"]]
    );
}

#[test]
fn test_replace_without_match_changes_nothing() {
    let source = Source::builder([item()])
        .with_sections(vec![section("k1", &["a"])])
        .build();
    let resets = Arc::new(Mutex::new(0));
    let counter = resets.clone();
    source.signals().model_reset.connect(move |_| *counter.lock() += 1);

    assert!(!source.replace(Some("missing"), section("k9", &["z"])));
    assert!(!source.replace(None, Section::new(vec![Row::new("item", "z")])));

    assert_eq!(*resets.lock(), 0);
    assert_eq!(visible_items(&source), vec![vec!["a"]]);
}

#[test]
fn test_snapshot_survives_replacement() {
    let source = Source::builder([item()])
        .with_sections(vec![section("a", &["old"])])
        .build();
    let before = source.snapshot();

    source.set_sections(vec![section("a", &["new"]).with_header(HeaderFooter::title("New"))]);

    assert_eq!(before.visible_row(IndexPath::new(0, 0)).item(), &"old");
    assert_eq!(source.visible_row(IndexPath::new(0, 0)).item(), &"new");
}

#[test]
fn test_debug_tree_marks_hidden_entries() {
    let source = Source::builder([item()])
        .with_row_hidden(|row, _| *row.item() == "b")
        .with_sections(vec![section("s", &["a", "b"])])
        .build();

    let tree = source.debug_tree();
    assert!(tree.starts_with("Sections (1 total, 1 visible):"));
    assert!(tree.contains("[0, 0] item (visible)"));
    assert!(tree.contains("[0, 1] item (hidden)"));
}
