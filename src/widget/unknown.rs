use crate::node::{Node, Widget};

/// Stand-in for a node whose kind is not registered. Keeps the original
/// kind, raw fields and children so that saving after loading loses nothing.
#[derive(Debug)]
pub struct Unknown {
    kind: String,
    fields: serde_json::Value,
    children: Vec<Node>,
}

impl Unknown {
    pub const KIND: &'static str = "widget.Unknown";

    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: serde_json::Value::Null,
            children: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: serde_json::Value) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn fields(&self) -> &serde_json::Value {
        &self.fields
    }
}

impl Widget for Unknown {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        egui::Frame::NONE
            .stroke(egui::Stroke::new(1.0, egui::Color32::GRAY))
            .corner_radius(4.0)
            .inner_margin(4.0)
            .show(ui, |ui| {
                ui.weak(format!("? {}", self.kind));
            })
            .response
    }

    fn children(&self) -> &[Node] {
        &self.children
    }
}
