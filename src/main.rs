//! Visual builder for `egui` widget trees.

use eframe::egui;
use egui_tree_builder::app::BuilderApp;
use egui_tree_builder::registry::Registry;

const PALETTE_WIDTH: f32 = 220.0;
const INSPECTOR_WIDTH: f32 = 320.0;
const CANVAS_SIZE: egui::Vec2 = egui::vec2(640.0, 520.0);

fn initial_inner_size() -> egui::Vec2 {
    // Canvas plus both side panels, menubar and side padding
    egui::vec2(
        CANVAS_SIZE.x + PALETTE_WIDTH + INSPECTOR_WIDTH + 16.0,
        CANVAS_SIZE.y + 40.0,
    )
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let registry = match Registry::standard() {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("widget registry: {e}");
            std::process::exit(1);
        }
    };

    let mut native_options = eframe::NativeOptions::default();
    let size = initial_inner_size();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_inner_size(size)
        .with_min_inner_size(size * 0.75)
        .with_resizable(true);

    eframe::run_native(
        "egui Tree Builder",
        native_options,
        Box::new(|_cc| Ok(Box::new(BuilderApp::new(registry)))),
    )
}
