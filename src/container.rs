//! Containers: nodes that own an ordered list of children.

use crate::form::FormBuilder;
use crate::node::{Node, Widget};
use crate::registry::{Category, Describe, RegistryError, RegistryResult};
use crate::synth::{Synthesis, indent, literal, vec_of};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    VBox,
    HBox,
    Grid,
    Center,
    Stack,
    Padded,
}

impl Layout {
    pub const CHOICES: &'static [(&'static str, Layout)] = &[
        ("VBox", Layout::VBox),
        ("HBox", Layout::HBox),
        ("Grid", Layout::Grid),
        ("Center", Layout::Center),
        ("Stack", Layout::Stack),
        ("Padded", Layout::Padded),
    ];

    fn constructor(&self) -> &'static str {
        match self {
            Layout::VBox => "vbox",
            Layout::HBox => "hbox",
            Layout::Grid => "grid",
            Layout::Center => "center",
            Layout::Stack => "stack",
            Layout::Padded => "padded",
        }
    }
}

/// Children arranged by a [`Layout`]. Children are not part of the
/// serialized fields; documents store them separately.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    pub layout: Layout,
    /// Column count, used by [`Layout::Grid`].
    pub columns: usize,
    #[serde(skip)]
    pub children: Vec<Node>,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            layout: Layout::VBox,
            columns: 2,
            children: Vec::new(),
        }
    }
}

impl Container {
    pub fn new(layout: Layout, children: Vec<Node>) -> Self {
        Self {
            layout,
            children,
            ..Default::default()
        }
    }

    pub fn vbox(children: Vec<Node>) -> Self {
        Self::new(Layout::VBox, children)
    }

    pub fn hbox(children: Vec<Node>) -> Self {
        Self::new(Layout::HBox, children)
    }

    pub fn grid(columns: usize, children: Vec<Node>) -> Self {
        Self {
            columns: columns.max(1),
            ..Self::new(Layout::Grid, children)
        }
    }

    pub fn center(children: Vec<Node>) -> Self {
        Self::new(Layout::Center, children)
    }

    pub fn stack(children: Vec<Node>) -> Self {
        Self::new(Layout::Stack, children)
    }

    pub fn padded(children: Vec<Node>) -> Self {
        Self::new(Layout::Padded, children)
    }
}

impl Widget for Container {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let children = &self.children;
        let mut slot = |ui: &mut egui::Ui, i: usize| {
            children[i].show(ui);
        };
        arrange_layout(self.layout, self.columns, ui, children.len(), &mut slot)
    }

    fn children(&self) -> &[Node] {
        &self.children
    }

    fn arrange(
        &self,
        ui: &mut egui::Ui,
        count: usize,
        slot: &mut dyn FnMut(&mut egui::Ui, usize),
    ) -> Option<egui::Response> {
        Some(arrange_layout(self.layout, self.columns, ui, count, slot))
    }
}

fn arrange_layout(
    layout: Layout,
    columns: usize,
    ui: &mut egui::Ui,
    count: usize,
    slot: &mut dyn FnMut(&mut egui::Ui, usize),
) -> egui::Response {
    let mut all = |ui: &mut egui::Ui| {
        for i in 0..count {
            slot(ui, i);
        }
    };
    match layout {
        Layout::VBox => ui.vertical(&mut all).response,
        Layout::HBox => ui.horizontal(&mut all).response,
        Layout::Center => ui.vertical_centered(&mut all).response,
        Layout::Padded => {
            egui::Frame::NONE
                .inner_margin(8.0)
                .show(ui, |ui| ui.vertical(&mut all))
                .response
        }
        Layout::Grid => {
            let columns = columns.max(1);
            egui::Grid::new(ui.next_auto_id())
                .num_columns(columns)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    for i in 0..count {
                        slot(ui, i);
                        if (i + 1) % columns == 0 {
                            ui.end_row();
                        }
                    }
                })
                .response
        }
        Layout::Stack => {
            let area = ui.available_rect_before_wrap();
            let mut used = egui::Rect::from_min_size(area.min, egui::Vec2::ZERO);
            for i in 0..count {
                let mut child = ui.new_child(egui::UiBuilder::new().max_rect(area));
                slot(&mut child, i);
                used = used.union(child.min_rect());
            }
            ui.allocate_rect(used, egui::Sense::hover())
        }
    }
}

impl Describe for Container {
    const KIND: &'static str = "container.Container";
    const NAME: &'static str = "Container";
    const CATEGORY: Category = Category::Containers;
    const CONTAINER: bool = true;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.choice("Layout", Layout::CHOICES, |w| w.layout, |w, v| w.layout = v)
            .rebuilds_form();
        if self.layout == Layout::Grid {
            form.parsed(
                "Columns",
                "positive whole number",
                |w| w.columns,
                |w, v: usize| w.columns = v.max(1),
            );
        }
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        let children = vec_of(&cx.children(&self.children));
        match self.layout {
            Layout::Grid => format!(
                "container::Container::grid({}, {children})",
                self.columns.max(1)
            ),
            layout if self.columns == Container::default().columns => {
                format!("container::Container::{}({children})", layout.constructor())
            }
            // Keeps a column count left over from an earlier grid layout.
            layout => literal(
                "container::Container",
                &[
                    ("layout", format!("container::Layout::{layout:?}")),
                    ("columns", self.columns.to_string()),
                    ("children", children),
                ],
            ),
        }
    }

    fn namespaces(&self) -> Vec<&'static str> {
        vec!["container"]
    }

    fn push_child(&mut self, child: Node) -> RegistryResult<()> {
        self.children.push(child);
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    #[default]
    Vertical,
    Horizontal,
    Both,
}

impl ScrollDirection {
    pub const CHOICES: &'static [(&'static str, ScrollDirection)] = &[
        ("Vertical", ScrollDirection::Vertical),
        ("Horizontal", ScrollDirection::Horizontal),
        ("Both", ScrollDirection::Both),
    ];
}

/// Scrollable wrapper around at most one child.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scroll {
    pub direction: ScrollDirection,
    #[serde(skip)]
    pub content: Option<Node>,
}

impl Scroll {
    pub fn new(content: Node) -> Self {
        Self {
            direction: ScrollDirection::default(),
            content: Some(content),
        }
    }

    fn area(&self) -> egui::ScrollArea {
        let area = match self.direction {
            ScrollDirection::Vertical => egui::ScrollArea::vertical(),
            ScrollDirection::Horizontal => egui::ScrollArea::horizontal(),
            ScrollDirection::Both => egui::ScrollArea::both(),
        };
        area.max_height(240.0)
    }
}

impl Widget for Scroll {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let content = self.content.clone();
        let mut slot = |ui: &mut egui::Ui, _: usize| {
            if let Some(content) = &content {
                content.show(ui);
            }
        };
        let count = usize::from(self.content.is_some());
        self.arrange(ui, count, &mut slot)
            .unwrap_or_else(|| ui.label(""))
    }

    fn children(&self) -> &[Node] {
        self.content.as_slice()
    }

    fn arrange(
        &self,
        ui: &mut egui::Ui,
        count: usize,
        slot: &mut dyn FnMut(&mut egui::Ui, usize),
    ) -> Option<egui::Response> {
        let area = self.area().id_salt(ui.next_auto_id());
        Some(
            ui.scope(|ui| {
                area.show(ui, |ui| {
                    for i in 0..count {
                        slot(ui, i);
                    }
                });
            })
            .response,
        )
    }
}

impl Describe for Scroll {
    const KIND: &'static str = "container.Scroll";
    const NAME: &'static str = "Scroll";
    const CATEGORY: Category = Category::Containers;
    const CONTAINER: bool = true;
    // Resolvable by lookup, never offered in the palette.
    const LISTED: bool = false;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.choice(
            "Direction",
            ScrollDirection::CHOICES,
            |w| w.direction,
            |w, v| w.direction = v,
        );
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        let content = self
            .content
            .as_ref()
            .map(|content| format!("{}.into()", cx.node(content)));
        match (content, self.direction) {
            (None, ScrollDirection::Vertical) => "container::Scroll::default()".to_owned(),
            (Some(content), ScrollDirection::Vertical) => {
                format!("container::Scroll::new(\n{},\n)", indent(&content))
            }
            (content, direction) => {
                let content = content.map_or_else(|| "None".to_owned(), |c| format!("Some({c})"));
                literal(
                    "container::Scroll",
                    &[
                        ("direction", format!("container::ScrollDirection::{direction:?}")),
                        ("content", content),
                    ],
                )
            }
        }
    }

    fn namespaces(&self) -> Vec<&'static str> {
        vec!["container"]
    }

    fn push_child(&mut self, child: Node) -> RegistryResult<()> {
        if self.content.is_some() {
            return Err(RegistryError::ContainerFull(Self::KIND));
        }
        self.content = Some(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::synth::{CodeSynthesizer, NodeProperties};
    use crate::theme::ThemeIcons;
    use crate::widget::Label;

    #[test]
    fn test_constructors_set_layout() {
        assert_eq!(Container::vbox(vec![]).layout, Layout::VBox);
        assert_eq!(Container::hbox(vec![]).layout, Layout::HBox);
        assert_eq!(Container::center(vec![]).layout, Layout::Center);
        assert_eq!(Container::stack(vec![]).layout, Layout::Stack);
        assert_eq!(Container::padded(vec![]).layout, Layout::Padded);

        let grid = Container::grid(0, vec![]);
        assert_eq!(grid.layout, Layout::Grid);
        assert_eq!(grid.columns, 1);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let a: Node = Label::new("a").into();
        let b: Node = Label::new("b").into();
        let mut container = Container::hbox(vec![a.clone()]);
        container.push_child(b.clone()).unwrap();
        assert_eq!(container.children(), &[a, b]);
    }

    #[test]
    fn test_scroll_holds_one_child() {
        let mut scroll = Scroll::default();
        assert!(scroll.children().is_empty());
        scroll.push_child(Label::new("a").into()).unwrap();
        assert!(matches!(
            scroll.push_child(Label::new("b").into()),
            Err(RegistryError::ContainerFull("container.Scroll"))
        ));
        assert_eq!(scroll.children().len(), 1);
    }

    fn source_of(container: Container) -> String {
        let registry = Registry::standard().unwrap();
        let properties = NodeProperties::new();
        CodeSynthesizer::new(&registry, &properties, &ThemeIcons)
            .synthesize(&Node::new(container))
            .source
    }

    #[test]
    fn test_source_keeps_columns_of_non_grid_layouts() {
        assert_eq!(source_of(Container::vbox(vec![])), "container::Container::vbox(vec![])");

        let mut former_grid = Container::grid(4, vec![]);
        former_grid.layout = Layout::VBox;
        let source = source_of(former_grid);
        assert!(source.starts_with("container::Container {\n"), "{source}");
        assert!(source.contains("layout: container::Layout::VBox,"));
        assert!(source.contains("columns: 4,"));
    }

    #[test]
    fn test_children_are_not_serialized() {
        let container = Container::vbox(vec![Label::new("a").into()]);
        let fields = serde_json::to_value(&container).unwrap();
        assert_eq!(fields, serde_json::json!({ "layout": "VBox", "columns": 2 }));
    }
}
