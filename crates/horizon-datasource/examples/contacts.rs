//! Contacts list example.
//!
//! Builds a sectioned contacts list with two row kinds, hides blocked
//! contacts, and walks the queries a host list widget would make.
//!
//! Run with: cargo run -p horizon-datasource --example contacts
//! Set `RUST_LOG=horizon_datasource=trace` to watch the resolution chain.

use horizon_datasource::model::{SectionTreeDebug, TreeFormatOptions};
use horizon_datasource::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug)]
enum Entry {
    Contact { name: String, blocked: bool },
    AddContact,
}

impl Entry {
    fn contact(name: &str) -> Self {
        Entry::Contact {
            name: name.to_string(),
            blocked: false,
        }
    }

    fn blocked(name: &str) -> Self {
        Entry::Contact {
            name: name.to_string(),
            blocked: true,
        }
    }
}

/// Host that renders cells as plain strings.
struct ConsoleList;

impl ListHost for ConsoleList {
    type Cell = String;
    type View = String;

    fn dequeue_cell(&self, template: &str, _path: IndexPath) -> String {
        format!("<{template}> ")
    }

    fn template_exists(&self, template: &str) -> bool {
        template == "ContactCell"
    }

    fn register_template(&self, template: &str) {
        println!("  (registered template {template})");
    }
}

/// Answers what no handler covers.
struct Fallback;

impl DataSourceFallback<ConsoleList> for Fallback {
    fn cell_for_row(&self, _host: &ConsoleList, path: IndexPath) -> String {
        format!("<fallback> {path}")
    }
}

fn sections(show_blocked: bool) -> Vec<Section<Entry>> {
    let mut friends = vec![
        Row::new("contact", Entry::contact("Ada Lovelace")).with_key("ada"),
        Row::new("contact", Entry::blocked("Mallory")).with_key("mallory"),
        Row::new("contact", Entry::contact("Grace Hopper")).with_key("grace"),
    ];
    if show_blocked {
        friends.push(Row::new("contact", Entry::blocked("Eve")).with_key("eve"));
    }

    vec![
        Section::new(friends)
            .with_key("friends")
            .with_header(HeaderFooter::title("Friends")),
        Section::new(vec![Row::new("contact", Entry::blocked("Trudy"))])
            .with_key("blocked-only")
            .with_header(HeaderFooter::title("Blocked")),
        Section::new(vec![Row::new("add", Entry::AddContact)])
            .with_key("actions")
            .with_footer(HeaderFooter::title("Contacts sync every hour")),
    ]
}

fn main() -> horizon_datasource::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Contacts data source example");
    println!("============================");
    println!();

    let contact = KindDescriptor::new("contact")
        .with_template("ContactCell")
        .with_configure(|row: &Row<Entry>, cell: &mut String, _| {
            if let Entry::Contact { name, .. } = row.item() {
                cell.push_str(name);
            }
        })
        .with_can_edit(|_, _| true)
        .with_edit_actions(|_, _| {
            Some(vec![
                RowAction::new("favorite", "Favorite"),
                RowAction::destructive("delete", "Delete"),
            ])
        })
        .with_perform_action(|row, action, path| {
            if let Entry::Contact { name, .. } = row.item() {
                println!("  {action} {name} at {path}");
            }
        })
        .with_height(|_, _| Height::Value(56.0));

    let add = KindDescriptor::new("add")
        .with_editing_style(|_, _| EditingStyle::Insert)
        .with_did_select(|_, path| {
            println!("  add contact tapped at {path}");
            SelectionResult::Deselect
        });

    let data_source = DataSource::<Entry, ConsoleList>::builder([contact, add])
        .with_row_hidden(|row, _| matches!(row.item(), Entry::Contact { blocked: true, .. }))
        .with_fallback(Fallback)
        .with_sections(sections(false))
        .build();
    data_source.validate()?;

    println!("{}", data_source.debug_tree());
    println!();

    let host = ConsoleList;
    for section in 0..data_source.number_of_sections() {
        if let Some(title) = data_source.title_for_header(section) {
            println!("[{title}]");
        }
        for row in 0..data_source.number_of_rows(section) {
            let path = IndexPath::new(section, row);
            let cell = data_source.cell_for_row(&host, path)?;
            println!(
                "  {cell}  height={:?} style={:?}",
                data_source.height(path)?,
                data_source.editing_style(path)?
            );
        }
        if let Some(title) = data_source.title_for_footer(section) {
            println!("  -- {title}");
        }
    }
    println!();

    let actions = data_source.number_of_sections() - 1;
    let selection = data_source.did_select(IndexPath::new(actions, 0))?;
    println!("selection after tap: {selection:?}");

    // Swipe the first contact and pick its first action.
    let first = IndexPath::new(0, 0);
    if let Some(swipe) = data_source.edit_actions(first)? {
        let titles: Vec<_> = swipe.iter().map(RowAction::title).collect();
        println!("swipe actions: {titles:?}");
        if let Some(action) = swipe.first() {
            data_source.perform_action(action.id(), first)?;
        }
    }
    println!();

    // Blocked contacts become visible; Eve joins the list.
    data_source.set_row_hidden(|_, _| false);
    data_source.update(Some(sections(true)), &host);

    let tree = SectionTreeDebug::with_options(TreeFormatOptions::detailed())
        .format(&data_source.snapshot());
    println!("{tree}");

    Ok(())
}
