//! Canvas primitives: plain shapes and free text.

use crate::form::FormBuilder;
use crate::node::Widget;
use crate::registry::{Category, Describe};
use crate::synth::{Synthesis, literal, quoted};
use egui::{Color32, CornerRadius, Sense, Stroke, StrokeKind, vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA colour as `#rrggbb` or `#rrggbbaa` text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hex(pub [u8; 4]);

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseHexError;

impl FromStr for Hex {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').ok_or(ParseHexError)?;
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(ParseHexError);
        }
        let mut rgba = [255u8; 4];
        for (i, channel) in rgba.iter_mut().take(digits.len() / 2).enumerate() {
            *channel =
                u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| ParseHexError)?;
        }
        Ok(Hex(rgba))
    }
}

fn color([r, g, b, a]: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn rgba_source([r, g, b, a]: [u8; 4]) -> String {
    format!("[{r}, {g}, {b}, {a}]")
}

const CORNFLOWER: [u8; 4] = [100, 149, 237, 255];
const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];
const WHITE: [u8; 4] = [255, 255, 255, 255];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rectangle {
    pub fill: [u8; 4],
    pub stroke: [u8; 4],
    pub stroke_width: f32,
    pub size: [f32; 2],
    pub corner_radius: u8,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            fill: CORNFLOWER,
            stroke: TRANSPARENT,
            stroke_width: 0.0,
            size: [100.0, 60.0],
            corner_radius: 0,
        }
    }
}

impl Rectangle {
    pub fn new(fill: [u8; 4]) -> Self {
        Self {
            fill,
            ..Default::default()
        }
    }
}

impl Widget for Rectangle {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(vec2(self.size[0], self.size[1]), Sense::hover());
        ui.painter().rect(
            rect,
            CornerRadius::same(self.corner_radius),
            color(self.fill),
            Stroke::new(self.stroke_width, color(self.stroke)),
            StrokeKind::Inside,
        );
        response
    }
}

impl Describe for Rectangle {
    const KIND: &'static str = "graphics.Rectangle";
    const NAME: &'static str = "Rectangle";
    const CATEGORY: Category = Category::Graphics;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.parsed("Fill", "colour (#rrggbb)", |w| Hex(w.fill), |w, v: Hex| w.fill = v.0)
            .parsed("Stroke", "colour (#rrggbb)", |w| Hex(w.stroke), |w, v: Hex| w.stroke = v.0)
            .number("Stroke Width", "number", |w| w.stroke_width, |w, v: f32| w.stroke_width = v.max(0.0))
            .number("Width", "number", |w| w.size[0], |w, v: f32| w.size[0] = v.max(1.0))
            .number("Height", "number", |w| w.size[1], |w, v: f32| w.size[1] = v.max(1.0))
            .parsed("Corner Radius", "whole number", |w| w.corner_radius, |w, v| w.corner_radius = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        let plain = Rectangle::new(self.fill);
        if *self == plain {
            return format!("graphics::Rectangle::new({})", rgba_source(self.fill));
        }
        literal(
            "graphics::Rectangle",
            &[
                ("fill", rgba_source(self.fill)),
                ("stroke", rgba_source(self.stroke)),
                ("stroke_width", format!("{:?}", self.stroke_width)),
                ("size", format!("[{:?}, {:?}]", self.size[0], self.size[1])),
                ("corner_radius", self.corner_radius.to_string()),
            ],
        )
    }

    fn namespaces(&self) -> Vec<&'static str> {
        vec!["graphics"]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Circle {
    pub fill: [u8; 4],
    pub stroke: [u8; 4],
    pub stroke_width: f32,
    pub radius: f32,
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            fill: CORNFLOWER,
            stroke: TRANSPARENT,
            stroke_width: 0.0,
            radius: 30.0,
        }
    }
}

impl Circle {
    pub fn new(fill: [u8; 4], radius: f32) -> Self {
        Self {
            fill,
            radius,
            ..Default::default()
        }
    }
}

impl Widget for Circle {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let radius = self.radius.max(0.0);
        let (rect, response) = ui.allocate_exact_size(egui::Vec2::splat(radius * 2.0), Sense::hover());
        ui.painter().circle(
            rect.center(),
            radius,
            color(self.fill),
            Stroke::new(self.stroke_width, color(self.stroke)),
        );
        response
    }
}

impl Describe for Circle {
    const KIND: &'static str = "graphics.Circle";
    const NAME: &'static str = "Circle";
    const CATEGORY: Category = Category::Graphics;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.parsed("Fill", "colour (#rrggbb)", |w| Hex(w.fill), |w, v: Hex| w.fill = v.0)
            .parsed("Stroke", "colour (#rrggbb)", |w| Hex(w.stroke), |w, v: Hex| w.stroke = v.0)
            .number("Stroke Width", "number", |w| w.stroke_width, |w, v: f32| w.stroke_width = v.max(0.0))
            .number("Radius", "number", |w| w.radius, |w, v: f32| w.radius = v.max(1.0));
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if *self == Circle::new(self.fill, self.radius) {
            return format!(
                "graphics::Circle::new({}, {:?})",
                rgba_source(self.fill),
                self.radius
            );
        }
        literal(
            "graphics::Circle",
            &[
                ("fill", rgba_source(self.fill)),
                ("stroke", rgba_source(self.stroke)),
                ("stroke_width", format!("{:?}", self.stroke_width)),
                ("radius", format!("{:?}", self.radius)),
            ],
        )
    }

    fn namespaces(&self) -> Vec<&'static str> {
        vec!["graphics"]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    pub text: String,
    pub color: [u8; 4],
    pub size: f32,
    pub bold: bool,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: WHITE,
            size: 14.0,
            bold: false,
        }
    }
}

impl Text {
    pub fn new(text: impl Into<String>, color: [u8; 4]) -> Self {
        Self {
            text: text.into(),
            color,
            ..Default::default()
        }
    }
}

impl Widget for Text {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let mut rich = egui::RichText::new(&self.text)
            .color(color(self.color))
            .size(self.size.max(1.0));
        if self.bold {
            rich = rich.strong();
        }
        ui.add(egui::Label::new(rich).selectable(false))
    }
}

impl Describe for Text {
    const KIND: &'static str = "graphics.Text";
    const NAME: &'static str = "Text";
    const CATEGORY: Category = Category::Graphics;

    fn create() -> Self {
        Self::new("Text", WHITE)
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.entry("Text", |w| w.text.clone(), |w, v| w.text = v)
            .parsed("Colour", "colour (#rrggbb)", |w| Hex(w.color), |w, v: Hex| w.color = v.0)
            .number("Size", "number", |w| w.size, |w, v: f32| w.size = v.max(1.0))
            .check("Bold", |w| w.bold, |w, v| w.bold = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if *self == Text::new(self.text.clone(), self.color) {
            return format!(
                "graphics::Text::new({}, {})",
                quoted(&self.text),
                rgba_source(self.color)
            );
        }
        literal(
            "graphics::Text",
            &[
                ("text", format!("{}.into()", quoted(&self.text))),
                ("color", rgba_source(self.color)),
                ("size", format!("{:?}", self.size)),
                ("bold", self.bold.to_string()),
            ],
        )
    }

    fn namespaces(&self) -> Vec<&'static str> {
        vec!["graphics"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::registry::Registry;
    use crate::synth::{CodeSynthesizer, NodeProperties};
    use crate::theme::ThemeIcons;

    #[test]
    fn test_hex_parse_and_display() {
        assert_eq!("#6495ed".parse::<Hex>(), Ok(Hex(CORNFLOWER)));
        assert_eq!("#00000080".parse::<Hex>(), Ok(Hex([0, 0, 0, 128])));
        assert_eq!(Hex(CORNFLOWER).to_string(), "#6495ed");
        assert_eq!(Hex([0, 0, 0, 128]).to_string(), "#00000080");
    }

    #[test]
    fn test_hex_rejects_malformed_input() {
        for bad in ["6495ed", "#6495e", "#gg0000", "#", "#ééé"] {
            assert_eq!(bad.parse::<Hex>(), Err(ParseHexError), "{bad}");
        }
    }

    #[test]
    fn test_minimal_forms() {
        let registry = Registry::standard().unwrap();
        let properties = NodeProperties::new();
        let synth = CodeSynthesizer::new(&registry, &properties, &ThemeIcons);

        let circle: Node = Circle::new(WHITE, 10.0).into();
        assert_eq!(
            synth.synthesize(&circle).source,
            "graphics::Circle::new([255, 255, 255, 255], 10.0)"
        );

        let mut rect = Rectangle::new(WHITE);
        rect.corner_radius = 4;
        let source = synth.synthesize(&rect.into()).source;
        assert!(source.starts_with("graphics::Rectangle {"));
        assert!(source.contains("corner_radius: 4,"));
    }
}
