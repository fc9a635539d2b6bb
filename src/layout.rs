//! Layout helpers that take space without drawing anything.

use crate::form::FormBuilder;
use crate::node::Widget;
use crate::registry::{Category, Describe};
use crate::synth::Synthesis;
use serde::{Deserialize, Serialize};

/// Empty space. A size of zero fills whatever the parent leaves over.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacer {
    pub size: f32,
}

impl Spacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixed(size: f32) -> Self {
        Self {
            size: size.max(0.0),
        }
    }
}

impl Widget for Spacer {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let size = if self.size > 0.0 {
            egui::Vec2::splat(self.size)
        } else {
            // Expand along the main axis of the parent layout.
            let available = ui.available_size_before_wrap();
            if ui.layout().main_dir().is_horizontal() {
                egui::vec2(available.x.max(0.0), 0.0)
            } else {
                egui::vec2(0.0, available.y.max(0.0))
            }
        };
        ui.allocate_exact_size(size, egui::Sense::hover()).1
    }
}

impl Describe for Spacer {
    const KIND: &'static str = "layout.Spacer";
    const NAME: &'static str = "Spacer";
    const CATEGORY: Category = Category::Widgets;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.number(
            "Size",
            "number (0 fills the space)",
            |w| w.size,
            |w, v: f32| w.size = v.max(0.0),
        );
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if self.size > 0.0 {
            format!("layout::Spacer::fixed({:?})", self.size)
        } else {
            "layout::Spacer::new()".to_owned()
        }
    }

    fn namespaces(&self) -> Vec<&'static str> {
        vec!["layout"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rejects_negative_sizes() {
        assert_eq!(Spacer::fixed(-4.0), Spacer::new());
        assert_eq!(Spacer::fixed(12.0).size, 12.0);
    }
}
