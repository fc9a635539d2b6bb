use super::strings;
use crate::form::FormBuilder;
use crate::node::Widget;
use crate::registry::{Category, Describe};
use crate::synth::{Synthesis, indent, literal, quoted, string_vec, vec_of};
use serde::{Deserialize, Serialize};

/// Collapsible sections, one per title.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Accordion {
    pub sections: Vec<String>,
    pub open: Option<usize>,
}

impl Accordion {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: strings(sections),
            open: None,
        }
    }
}

impl Widget for Accordion {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let salt = ui.next_auto_id();
        ui.vertical(|ui| {
            for (i, title) in self.sections.iter().enumerate() {
                egui::CollapsingHeader::new(title)
                    .id_salt((salt, i))
                    .default_open(self.open == Some(i))
                    .show(ui, |ui| {
                        ui.weak(format!("{title} content"));
                    });
            }
        })
        .response
    }
}

impl Describe for Accordion {
    const KIND: &'static str = "widget.Accordion";
    const NAME: &'static str = "Accordion";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new(["Section A", "Section B"])
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.list(
            "Sections",
            |w| w.sections.clone(),
            |w, v| {
                if w.open.is_some_and(|i| i >= v.len()) {
                    w.open = None;
                }
                w.sections = v;
            },
        )
        .select(
            "Open",
            |w| {
                let mut options = vec!["(All Closed)".to_owned()];
                options.extend(w.sections.iter().cloned());
                options
            },
            |w| Some(w.open.map_or(0, |i| i + 1)),
            |w, i| w.open = i.checked_sub(1),
        );
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if self.open.is_none() {
            return format!("widget::Accordion::new({})", string_vec(&self.sections));
        }
        literal(
            "widget::Accordion",
            &[
                ("sections", string_vec(&self.sections)),
                ("open", format!("{:?}", self.open)),
            ],
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

impl Card {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            body: String::new(),
        }
    }
}

impl Widget for Card {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        egui::Frame::group(ui.style())
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.heading(&self.title);
                    if !self.subtitle.is_empty() {
                        ui.weak(&self.subtitle);
                    }
                    if !self.body.is_empty() {
                        ui.separator();
                        ui.label(&self.body);
                    }
                });
            })
            .response
    }
}

impl Describe for Card {
    const KIND: &'static str = "widget.Card";
    const NAME: &'static str = "Card";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new("Title", "Subtitle")
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.entry("Title", |w| w.title.clone(), |w, v| w.title = v)
            .entry("Subtitle", |w| w.subtitle.clone(), |w, v| w.subtitle = v)
            .multi_line("Body", |w| w.body.clone(), |w, v| w.body = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if self.body.is_empty() {
            return format!(
                "widget::Card::new({}, {})",
                quoted(&self.title),
                quoted(&self.subtitle)
            );
        }
        literal(
            "widget::Card",
            &[
                ("title", format!("{}.into()", quoted(&self.title))),
                ("subtitle", format!("{}.into()", quoted(&self.subtitle))),
                ("body", format!("{}.into()", quoted(&self.body))),
            ],
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct List {
    pub items: Vec<String>,
    pub selected: Option<usize>,
}

impl List {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: strings(items),
            selected: None,
        }
    }
}

impl Widget for List {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.scope(|ui| {
            egui::ScrollArea::vertical()
                .id_salt(ui.next_auto_id())
                .max_height(160.0)
                .show(ui, |ui| {
                    for (i, item) in self.items.iter().enumerate() {
                        if ui.selectable_label(self.selected == Some(i), item).clicked() {
                            self.selected = Some(i);
                        }
                    }
                });
        })
        .response
    }
}

impl Describe for List {
    const KIND: &'static str = "widget.List";
    const NAME: &'static str = "List";
    const CATEGORY: Category = Category::Collections;

    fn create() -> Self {
        Self::new(["Item 1", "Item 2", "Item 3"])
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.list(
            "Items",
            |w| w.items.clone(),
            |w, v| {
                if w.selected.is_some_and(|i| i >= v.len()) {
                    w.selected = None;
                }
                w.items = v;
            },
        );
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if self.selected.is_none() {
            return format!("widget::List::new({})", string_vec(&self.items));
        }
        literal(
            "widget::List",
            &[
                ("items", string_vec(&self.items)),
                ("selected", format!("{:?}", self.selected)),
            ],
        )
    }
}

/// Static table. Rows are edited one per line with comma separated cells.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    fn row_lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.join(", ")).collect()
    }

    fn set_row_lines(&mut self, lines: Vec<String>) {
        self.rows = lines
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(',').map(|cell| cell.trim().to_owned()).collect())
            .collect();
    }
}

impl Widget for Table {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        use egui_extras::{Column, TableBuilder};

        let columns = self
            .headers
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0))
            .max(1);
        ui.push_id(ui.next_auto_id(), |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(60.0), columns)
                .header(20.0, |mut header| {
                    for i in 0..columns {
                        header.col(|ui| {
                            ui.strong(self.headers.get(i).map_or("", String::as_str));
                        });
                    }
                })
                .body(|mut body| {
                    for row in &self.rows {
                        body.row(18.0, |mut cells| {
                            for i in 0..columns {
                                cells.col(|ui| {
                                    ui.label(row.get(i).map_or("", String::as_str));
                                });
                            }
                        });
                    }
                });
        })
        .response
    }
}

impl Describe for Table {
    const KIND: &'static str = "widget.Table";
    const NAME: &'static str = "Table";
    const CATEGORY: Category = Category::Collections;

    fn create() -> Self {
        Self::new(
            strings(["Name", "Value"]),
            vec![strings(["alpha", "1"]), strings(["beta", "2"])],
        )
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.list("Headers", |w| w.headers.clone(), |w, v| w.headers = v)
            .list("Rows", Table::row_lines, Table::set_row_lines);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        let rows: Vec<String> = self.rows.iter().map(|row| string_vec(row)).collect();
        format!(
            "widget::Table::new(\n{},\n{},\n)",
            indent(&string_vec(&self.headers)),
            indent(&vec_of(&rows))
        )
    }
}

/// Indented outline. Two leading spaces mark one level of nesting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tree {
    pub lines: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
struct Branch {
    label: String,
    children: Vec<Branch>,
}

fn parse_branches(lines: &[String]) -> Vec<Branch> {
    fn build<I: Iterator<Item = (usize, String)>>(
        iter: &mut std::iter::Peekable<I>,
        level: usize,
    ) -> Vec<Branch> {
        let mut out = Vec::new();
        // Over-indented lines nest one level below their predecessor.
        while let Some((_, label)) = iter.next_if(|(depth, _)| *depth >= level) {
            let children = build(iter, level + 1);
            out.push(Branch { label, children });
        }
        out
    }

    let mut items = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let depth = line.chars().take_while(|c| *c == ' ').count() / 2;
            (depth, line.trim().to_owned())
        })
        .peekable();
    build(&mut items, 0)
}

fn show_branches(ui: &mut egui::Ui, branches: &[Branch]) {
    for branch in branches {
        if branch.children.is_empty() {
            ui.label(&branch.label);
        } else {
            ui.collapsing(&branch.label, |ui| show_branches(ui, &branch.children));
        }
    }
}

impl Tree {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: strings(lines),
        }
    }
}

impl Widget for Tree {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let branches = parse_branches(&self.lines);
        ui.push_id(ui.next_auto_id(), |ui| {
            ui.vertical(|ui| show_branches(ui, &branches)).response
        })
        .inner
    }
}

impl Describe for Tree {
    const KIND: &'static str = "widget.Tree";
    const NAME: &'static str = "Tree";
    const CATEGORY: Category = Category::Collections;

    fn create() -> Self {
        Self::new(["Animals", "  Mammals", "    Dogs", "    Cats", "  Birds", "Plants"])
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.list("Nodes", |w| w.lines.clone(), |w, v| w.lines = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        format!("widget::Tree::new({})", string_vec(&self.lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> Branch {
        Branch {
            label: label.into(),
            children: vec![],
        }
    }

    #[test]
    fn test_parse_branches() {
        let tree = Tree::create();
        let branches = parse_branches(&tree.lines);
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].label, "Animals");
        assert_eq!(
            branches[0].children,
            vec![
                Branch {
                    label: "Mammals".into(),
                    children: vec![leaf("Dogs"), leaf("Cats")],
                },
                leaf("Birds"),
            ]
        );
        assert_eq!(branches[1], leaf("Plants"));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let branches = parse_branches(&strings(["", "Root", "   ", "  Child"]));
        assert_eq!(
            branches,
            vec![Branch {
                label: "Root".into(),
                children: vec![leaf("Child")],
            }]
        );
    }

    #[test]
    fn test_table_rows_from_lines() {
        let mut table = Table::default();
        table.set_row_lines(strings(["a, 1", "", "b,2"]));
        assert_eq!(table.rows, vec![strings(["a", "1"]), strings(["b", "2"])]);
        assert_eq!(table.row_lines(), strings(["a, 1", "b, 2"]));
    }
}
