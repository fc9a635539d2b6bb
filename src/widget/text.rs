use super::{TextAlign, TextStyle, TextWrap};
use crate::form::FormBuilder;
use crate::node::Widget;
use crate::registry::{Category, Describe};
use crate::synth::{Synthesis, literal, quoted};
use crate::theme::{self, Resource};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub text: String,
    pub alignment: TextAlign,
    pub wrapping: TextWrap,
    pub style: TextStyle,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_style(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            ..Default::default()
        }
    }
}

impl Widget for Label {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let label = egui::Label::new(self.style.apply(&self.text)).wrap_mode(self.wrapping.mode());
        ui.with_layout(egui::Layout::top_down(self.alignment.align()), |ui| {
            ui.add(label)
        })
        .inner
    }
}

impl Describe for Label {
    const KIND: &'static str = "widget.Label";
    const NAME: &'static str = "Label";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new("Label")
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.entry("Text", |w| w.text.clone(), |w, v| w.text = v)
            .toggles("Alignment", TextAlign::CHOICES, |w| w.alignment, |w, v| w.alignment = v)
            .choice("Wrapping", TextWrap::CHOICES, |w| w.wrapping, |w, v| w.wrapping = v)
            .check("Bold", |w| w.style.bold, |w, v| w.style.bold = v)
            .check("Italic", |w| w.style.italic, |w, v| w.style.italic = v)
            .check("Monospace", |w| w.style.monospace, |w, v| w.style.monospace = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        let plain = Label::default();
        if self.alignment == plain.alignment && self.wrapping == plain.wrapping {
            if self.style == plain.style {
                return format!("widget::Label::new({})", quoted(&self.text));
            }
            return format!(
                "widget::Label::with_style({}, {})",
                quoted(&self.text),
                self.style.source()
            );
        }

        let mut fields = vec![
            ("text", format!("{}.into()", quoted(&self.text))),
            ("alignment", format!("widget::TextAlign::{:?}", self.alignment)),
            ("wrapping", format!("widget::TextWrap::{:?}", self.wrapping)),
        ];
        if self.style != plain.style {
            fields.push(("style", self.style.source()));
        }
        literal("widget::Label", &fields)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperlink {
    pub text: String,
    pub url: String,
}

impl Hyperlink {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

impl Widget for Hyperlink {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.hyperlink_to(&self.text, &self.url)
    }
}

impl Describe for Hyperlink {
    const KIND: &'static str = "widget.Hyperlink";
    const NAME: &'static str = "Hyperlink";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new("Open website", "https://example.com")
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.entry("Text", |w| w.text.clone(), |w, v| w.text = v)
            .entry("URL", |w| w.url.clone(), |w, v| w.url = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        format!(
            "widget::Hyperlink::new({}, {})",
            quoted(&self.text),
            quoted(&self.url)
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icon {
    pub resource: Option<Resource>,
}

impl Icon {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource: Some(resource),
        }
    }
}

impl Widget for Icon {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let glyph = self.resource.as_ref().map_or("", Resource::glyph);
        ui.label(egui::RichText::new(glyph).size(20.0))
    }
}

impl Describe for Icon {
    const KIND: &'static str = "widget.Icon";
    const NAME: &'static str = "Icon";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new(theme::help_icon())
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.icon("Resource", |w| w.resource.clone(), |w, v| w.resource = v);
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        match &self.resource {
            Some(resource) => format!("widget::Icon::new({})", cx.icon(resource)),
            None => "widget::Icon::default()".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressBar {
    /// Fraction done, `0.0..=1.0`.
    pub value: f32,
    pub show_percentage: bool,
}

impl ProgressBar {
    pub fn with_value(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            ..Default::default()
        }
    }
}

impl Widget for ProgressBar {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let mut bar = egui::ProgressBar::new(self.value.clamp(0.0, 1.0));
        if self.show_percentage {
            bar = bar.show_percentage();
        }
        ui.add(bar)
    }
}

impl Describe for ProgressBar {
    const KIND: &'static str = "widget.ProgressBar";
    const NAME: &'static str = "Progress Bar";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::with_value(0.25)
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.number(
            "Value",
            "number between 0 and 1",
            |w| w.value,
            |w, v: f32| w.value = v.clamp(0.0, 1.0),
        )
        .check(
            "Show Percentage",
            |w| w.show_percentage,
            |w, v| w.show_percentage = v,
        );
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if !self.show_percentage {
            return format!("widget::ProgressBar::with_value({:?})", self.value);
        }
        literal(
            "widget::ProgressBar",
            &[
                ("value", format!("{:?}", self.value)),
                ("show_percentage", self.show_percentage.to_string()),
            ],
        )
    }
}

/// Markdown text. The source is kept verbatim; rendering understands
/// headings, bullets and plain paragraphs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichText {
    pub markdown: String,
    pub wrapping: TextWrap,
}

impl RichText {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            ..Default::default()
        }
    }
}

impl Widget for RichText {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.vertical(|ui| {
            ui.style_mut().wrap_mode = Some(self.wrapping.mode());
            for line in self.markdown.lines() {
                let trimmed = line.trim_start();
                if let Some(heading) = trimmed.strip_prefix("# ") {
                    ui.heading(heading);
                } else if let Some(sub) = trimmed.strip_prefix("## ") {
                    ui.strong(sub);
                } else if let Some(item) = trimmed
                    .strip_prefix("- ")
                    .or_else(|| trimmed.strip_prefix("* "))
                {
                    ui.label(format!("• {item}"));
                } else if trimmed.is_empty() {
                    ui.add_space(4.0);
                } else {
                    ui.label(trimmed);
                }
            }
        })
        .response
    }
}

impl Describe for RichText {
    const KIND: &'static str = "widget.RichText";
    const NAME: &'static str = "Rich Text";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new("# Heading\n\nSome *rich* text.\n\n- first\n- second")
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.multi_line("Markdown", |w| w.markdown.clone(), |w, v| w.markdown = v)
            .choice("Wrapping", TextWrap::CHOICES, |w| w.wrapping, |w, v| w.wrapping = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if self.wrapping == TextWrap::default() {
            return format!("widget::RichText::new({})", quoted(&self.markdown));
        }
        literal(
            "widget::RichText",
            &[
                ("markdown", format!("{}.into()", quoted(&self.markdown))),
                ("wrapping", format!("widget::TextWrap::{:?}", self.wrapping)),
            ],
        )
    }
}

/// Fixed-width text block. Every character occupies one grid cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextGrid {
    pub text: String,
}

impl TextGrid {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Widget for TextGrid {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.add(
            egui::Label::new(egui::RichText::new(&self.text).monospace())
                .wrap_mode(egui::TextWrapMode::Extend),
        )
    }
}

impl Describe for TextGrid {
    const KIND: &'static str = "widget.TextGrid";
    const NAME: &'static str = "Text Grid";
    const CATEGORY: Category = Category::Widgets;

    fn create() -> Self {
        Self::new("ABCD\nEFGH")
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.multi_line("Text", |w| w.text.clone(), |w, v| w.text = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        format!("widget::TextGrid::new({})", quoted(&self.text))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separator {
    pub vertical: bool,
}

impl Widget for Separator {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let separator = egui::Separator::default();
        if self.vertical {
            ui.add(separator.vertical())
        } else {
            ui.add(separator.horizontal())
        }
    }
}

impl Describe for Separator {
    const KIND: &'static str = "widget.Separator";
    const NAME: &'static str = "Separator";
    const CATEGORY: Category = Category::Widgets;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.check("Vertical", |w| w.vertical, |w, v| w.vertical = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if self.vertical {
            literal("widget::Separator", &[("vertical", "true".to_owned())])
        } else {
            "widget::Separator::default()".to_owned()
        }
    }
}
