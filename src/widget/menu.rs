use crate::form::FormBuilder;
use crate::node::Widget;
use crate::registry::{Category, Describe};
use crate::synth::{Synthesis, quoted, string_vec, vec_of};
use crate::theme::{self, Resource};
use serde::{Deserialize, Serialize};

/// Drop-down menu of plain items.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Menu {
    pub title: String,
    pub items: Vec<String>,
}

impl Menu {
    pub fn new<I, S>(title: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            items: super::strings(items),
        }
    }
}

impl Widget for Menu {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.menu_button(self.title.as_str(), |ui| {
            for item in &self.items {
                if ui.button(item.as_str()).clicked() {
                    ui.close_kind(egui::UiKind::Menu);
                }
            }
        })
        .response
    }
}

impl Describe for Menu {
    const KIND: &'static str = "widget.Menu";
    const NAME: &'static str = "Menu";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new("Menu Name", ["Item 1", "Item 2", "Item 3"])
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.entry("Title", |w| w.title.clone(), |w, v| w.title = v)
            .list("Items", |w| w.items.clone(), |w, v| w.items = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        format!(
            "widget::Menu::new({}, {})",
            quoted(&self.title),
            string_vec(&self.items)
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ToolItem {
    Action(Resource),
    Separator,
    /// Pushes the items after it to the trailing edge.
    Spacer,
}

impl ToolItem {
    fn show(&self, ui: &mut egui::Ui) {
        match self {
            ToolItem::Action(icon) => {
                ui.add(egui::Button::new(icon.glyph()).frame(false));
            }
            ToolItem::Separator => {
                ui.separator();
            }
            ToolItem::Spacer => ui.add_space(8.0),
        }
    }

    fn source(&self, cx: &mut Synthesis<'_>) -> String {
        match self {
            ToolItem::Action(icon) => format!("widget::ToolItem::Action({})", cx.icon(icon)),
            ToolItem::Separator => "widget::ToolItem::Separator".to_owned(),
            ToolItem::Spacer => "widget::ToolItem::Spacer".to_owned(),
        }
    }
}

/// Horizontal strip of icon buttons.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolbar {
    pub items: Vec<ToolItem>,
}

impl Toolbar {
    pub fn new(items: Vec<ToolItem>) -> Self {
        Self { items }
    }
}

impl Widget for Toolbar {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let split = self
            .items
            .iter()
            .position(|item| *item == ToolItem::Spacer)
            .unwrap_or(self.items.len());
        let (leading, trailing) = self.items.split_at(split);
        ui.horizontal(|ui| {
            for item in leading {
                item.show(ui);
            }
            if let Some((_, trailing)) = trailing.split_first() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    for item in trailing.iter().rev() {
                        item.show(ui);
                    }
                });
            }
        })
        .response
    }
}

impl Describe for Toolbar {
    const KIND: &'static str = "widget.Toolbar";
    const NAME: &'static str = "Toolbar";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new(vec![
            ToolItem::Action(theme::icon("FileIcon")),
            ToolItem::Separator,
            ToolItem::Action(theme::icon("ViewRefreshIcon")),
            ToolItem::Action(theme::icon("NavigateBackIcon")),
            ToolItem::Action(theme::icon("NavigateNextIcon")),
            ToolItem::Spacer,
            ToolItem::Action(theme::help_icon()),
        ])
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        let items: Vec<String> = self.items.iter().map(|item| item.source(cx)).collect();
        format!("widget::Toolbar::new({})", vec_of(&items))
    }
}
