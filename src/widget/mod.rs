//! Leaf widgets and collections.
//!
//! Every type here is both a live, renderable widget and the target of
//! generated code: `widget::Label::new("Hello")` in a generated file builds
//! exactly the value the builder was showing.

mod collection;
mod input;
mod menu;
mod text;
mod unknown;

pub use collection::{Accordion, Card, List, Table, Tree};
pub use input::{Button, Check, DateEntry, Entry, EntryMode, Form, RadioGroup, Select, Slider};
pub use menu::{Menu, ToolItem, Toolbar};
pub use text::{Hyperlink, Icon, Label, ProgressBar, RichText, Separator, TextGrid};
pub use unknown::Unknown;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Callback attached to an interactive widget.
#[derive(Clone)]
pub struct Action(Rc<dyn Fn()>);

impl Action {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new(|| {})
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    #[default]
    Medium,
    High,
    Low,
    Danger,
    Warning,
    Success,
}

impl Importance {
    pub const CHOICES: &'static [(&'static str, Importance)] = &[
        ("Medium", Importance::Medium),
        ("High", Importance::High),
        ("Low", Importance::Low),
        ("Danger", Importance::Danger),
        ("Warning", Importance::Warning),
        ("Success", Importance::Success),
    ];

    fn fill(&self, visuals: &egui::Visuals) -> Option<egui::Color32> {
        match self {
            Importance::Medium | Importance::Low => None,
            Importance::High => Some(visuals.selection.bg_fill),
            Importance::Danger => Some(egui::Color32::from_rgb(196, 58, 58)),
            Importance::Warning => Some(egui::Color32::from_rgb(214, 140, 30)),
            Importance::Success => Some(egui::Color32::from_rgb(56, 142, 60)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAlign {
    Leading,
    #[default]
    Center,
    Trailing,
}

impl ButtonAlign {
    pub const CHOICES: &'static [(&'static str, ButtonAlign)] = &[
        ("Leading", ButtonAlign::Leading),
        ("Center", ButtonAlign::Center),
        ("Trailing", ButtonAlign::Trailing),
    ];

    fn align(&self) -> egui::Align {
        match self {
            ButtonAlign::Leading => egui::Align::Min,
            ButtonAlign::Center => egui::Align::Center,
            ButtonAlign::Trailing => egui::Align::Max,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Leading,
    Center,
    Trailing,
}

impl TextAlign {
    pub const CHOICES: &'static [(&'static str, TextAlign)] = &[
        ("Leading", TextAlign::Leading),
        ("Center", TextAlign::Center),
        ("Trailing", TextAlign::Trailing),
    ];

    fn align(&self) -> egui::Align {
        match self {
            TextAlign::Leading => egui::Align::Min,
            TextAlign::Center => egui::Align::Center,
            TextAlign::Trailing => egui::Align::Max,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextWrap {
    #[default]
    Off,
    Word,
    Break,
}

impl TextWrap {
    pub const CHOICES: &'static [(&'static str, TextWrap)] = &[
        ("Off", TextWrap::Off),
        ("Word", TextWrap::Word),
        ("Break", TextWrap::Break),
    ];

    fn mode(&self) -> egui::TextWrapMode {
        match self {
            TextWrap::Off => egui::TextWrapMode::Extend,
            TextWrap::Word => egui::TextWrapMode::Wrap,
            TextWrap::Break => egui::TextWrapMode::Truncate,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub monospace: bool,
}

impl TextStyle {
    fn apply(&self, text: &str) -> egui::RichText {
        let mut rich = egui::RichText::new(text);
        if self.bold {
            rich = rich.strong();
        }
        if self.italic {
            rich = rich.italics();
        }
        if self.monospace {
            rich = rich.monospace();
        }
        rich
    }

    fn source(&self) -> String {
        format!(
            "widget::TextStyle {{ bold: {}, italic: {}, monospace: {} }}",
            self.bold, self.italic, self.monospace
        )
    }
}

fn strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_action_calls_closure() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let action = Action::new(move || counter.set(counter.get() + 1));
        action.call();
        action.clone().call();
        assert_eq!(hits.get(), 2);
        Action::default().call();
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Importance::default(), Importance::Medium);
        assert_eq!(ButtonAlign::default(), ButtonAlign::Center);
        assert_eq!(TextAlign::default(), TextAlign::Leading);
        assert_eq!(TextWrap::default(), TextWrap::Off);
        assert_eq!(TextStyle::default(), TextStyle { bold: false, italic: false, monospace: false });
    }

    #[test]
    fn test_choices_cover_every_variant_once() {
        let names: Vec<_> = Importance::CHOICES.iter().map(|(n, _)| *n).collect();
        for (name, value) in Importance::CHOICES {
            assert_eq!(format!("{value:?}"), *name);
        }
        assert_eq!(names.len(), 6);
        for (name, value) in ButtonAlign::CHOICES {
            assert_eq!(format!("{value:?}"), *name);
        }
        for (name, value) in TextWrap::CHOICES {
            assert_eq!(format!("{value:?}"), *name);
        }
    }
}
