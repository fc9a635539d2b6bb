use crate::{
    editor::Editor,
    highlight::Highlighter,
    node::NodeId,
    persist::{self, EXTENSION},
    project,
    registry::{Category, Registry},
    synth::{CodeSynthesizer, NAME_PROPERTY, NodeProperties},
};
use egui::Sense;
use std::path::PathBuf;

/// Text typed into the inspector's per-node property fields. Kept apart from
/// the node so that an invalid name stays visible while it is being typed.
#[derive(Default)]
struct InspectorState {
    node: Option<NodeId>,
    name: String,
    name_error: Option<String>,
    actions: Vec<(&'static str, String)>,
}

#[derive(Default)]
struct NewProjectDialog {
    open: bool,
    parent: Option<PathBuf>,
    name: String,
}

pub struct BuilderApp {
    editor: Editor,
    palette_open: bool,
    inspector: InspectorState,
    new_project: NewProjectDialog,
    /// Current tree document (for Save)
    current_file: Option<PathBuf>,
    /// Error/status message to display
    status_message: Option<(String, std::time::Instant)>,
    /// Syntax highlighter for code preview
    highlighter: Highlighter,
    /// Whether to show syntax highlighting (can be toggled for performance)
    syntax_highlighting: bool,
    /// Regenerate code after every change
    auto_generate: bool,
    /// Borders around unselected widgets
    show_overlay_borders: bool,
    /// Active tab in the right panel (0 = Inspector, 1 = Code)
    right_panel_tab: usize,
}

impl BuilderApp {
    pub fn new(registry: Registry) -> Self {
        Self {
            editor: Editor::new(registry),
            palette_open: true,
            inspector: InspectorState::default(),
            new_project: NewProjectDialog::default(),
            current_file: None,
            status_message: None,
            highlighter: Highlighter::new(),
            syntax_highlighting: true,
            auto_generate: true,
            show_overlay_borders: true,
            right_panel_tab: 0,
        }
    }

    /// Set a status message that will auto-clear after a few seconds
    fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, std::time::Instant::now()));
    }

    fn document_dialog() -> rfd::FileDialog {
        rfd::FileDialog::new().add_filter("GUI document", &["json"])
    }

    fn save_document(&mut self, path: PathBuf) {
        if let Err(e) = self.editor.save(&path) {
            log::error!("saving {} failed: {e}", path.display());
            self.set_status(format!("Save failed: {e}"));
            return;
        }
        let generated = self.editor.generate().clone();
        match project::update_generated(&path, &generated) {
            Ok(true) => self.set_status(format!("Saved {} and its generated code", path.display())),
            Ok(false) => self.set_status(format!("Saved to {}", path.display())),
            Err(e) => {
                log::error!("{e}");
                self.set_status(format!("Saved, but updating generated code failed: {e}"));
            }
        }
        self.current_file = Some(path);
    }

    fn open_document(&mut self, path: PathBuf) {
        match self.editor.open(&path) {
            Ok(()) => {
                self.set_status(format!("Loaded {}", path.display()));
                self.current_file = Some(path);
            }
            Err(e) => self.set_status(format!("Load failed: {e}")),
        }
    }

    fn save(&mut self) {
        if let Some(path) = self.current_file.clone() {
            self.save_document(path);
        } else {
            self.save_as();
        }
    }

    fn save_as(&mut self) {
        if let Some(path) = Self::document_dialog()
            .set_file_name(format!("main.{EXTENSION}"))
            .save_file()
        {
            self.save_document(path);
        }
    }

    fn open(&mut self) {
        if let Some(path) = Self::document_dialog().pick_file() {
            self.open_document(path);
        }
    }

    fn new_tree(&mut self) {
        let root = self.editor.registry().create("container.Container");
        match root {
            Ok(root) => {
                self.editor.set_tree(root, NodeProperties::new());
                self.current_file = None;
                self.set_status("New tree created".into());
            }
            Err(e) => self.set_status(format!("New tree failed: {e}")),
        }
    }

    fn create_project(&mut self) {
        let name = self.new_project.name.trim().to_owned();
        let Some(parent) = self.new_project.parent.clone() else {
            self.set_status("Choose a parent directory first".into());
            return;
        };

        let root = project::starter_tree(&name);
        let properties = NodeProperties::new();
        let generated =
            CodeSynthesizer::new(self.editor.registry(), &properties, self.editor.icons())
                .synthesize(&root);
        let doc = match persist::encode(self.editor.registry(), &root, &properties) {
            Ok(doc) => doc,
            Err(e) => {
                self.set_status(format!("Create failed: {e}"));
                return;
            }
        };

        match project::create_project(&parent, &name, &generated, &doc) {
            Ok(dir) => {
                project::fetch_dependencies(dir.clone());
                self.editor.set_tree(root, properties);
                self.current_file = Some(dir.join(project::GUI_DOCUMENT));
                self.new_project = NewProjectDialog::default();
                self.set_status(format!("Created project {}", dir.display()));
            }
            Err(e) => {
                log::error!("{e}");
                self.set_status(format!("Create failed: {e}"));
            }
        }
    }

    fn generate(&mut self) {
        self.editor.generate();
        self.right_panel_tab = 1;
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        // Show status message if recent
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed().as_secs() < 3 {
                ui.horizontal(|ui| {
                    ui.label(msg);
                });
            } else {
                self.status_message = None;
            }
        }

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .button("New")
                    .on_hover_text("Start over with an empty container")
                    .clicked()
                {
                    self.new_tree();
                    ui.close_kind(egui::UiKind::Menu);
                }
                if ui
                    .button("New Project...")
                    .on_hover_text("Create a cargo project around a starter tree")
                    .clicked()
                {
                    self.new_project.open = true;
                    ui.close_kind(egui::UiKind::Menu);
                }
                ui.separator();
                if ui
                    .button("Open...")
                    .on_hover_text("Open a GUI document (Ctrl+O)")
                    .clicked()
                {
                    self.open();
                    ui.close_kind(egui::UiKind::Menu);
                }
                if ui
                    .button("Save")
                    .on_hover_text("Save the GUI document (Ctrl+S)")
                    .clicked()
                {
                    self.save();
                    ui.close_kind(egui::UiKind::Menu);
                }
                if ui
                    .button("Save As...")
                    .on_hover_text("Save the GUI document to a new file")
                    .clicked()
                {
                    self.save_as();
                    ui.close_kind(egui::UiKind::Menu);
                }
                ui.separator();
                if ui
                    .button("Generate Code")
                    .on_hover_text("Generate Rust code (Ctrl+G)")
                    .clicked()
                {
                    self.generate();
                    ui.close_kind(egui::UiKind::Menu);
                }
            });

            ui.menu_button("Edit", |ui| {
                ui.add_enabled_ui(self.editor.selected().is_some(), |ui| {
                    if ui
                        .button("Deselect")
                        .on_hover_text("Clear the selection (Esc)")
                        .clicked()
                    {
                        self.editor.clear_selection();
                        ui.close_kind(egui::UiKind::Menu);
                    }
                });
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut self.palette_open, "Palette");
                ui.checkbox(&mut self.show_overlay_borders, "Widget Borders")
                    .on_hover_text("Outline every widget, not just the selected one");
                ui.checkbox(&mut self.syntax_highlighting, "Syntax Highlighting");
                ui.checkbox(&mut self.auto_generate, "Auto Generate")
                    .on_hover_text("Regenerate code after every change");
            });
        });
    }

    fn palette_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Palette");
        ui.separator();
        ui.label("Click to add to the selected container");
        ui.add_space(4.0);

        let mut picked = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let registry = self.editor.registry();
                for category in Category::ALL {
                    egui::CollapsingHeader::new(category.display_name())
                        .default_open(true)
                        .show(ui, |ui| {
                            for kind in registry.all_kinds(category) {
                                let name = registry
                                    .lookup(kind)
                                    .map_or(kind, |descriptor| descriptor.name());
                                if ui
                                    .add(egui::Button::new(name).sense(Sense::click()))
                                    .on_hover_text(kind)
                                    .clicked()
                                {
                                    picked = Some(kind);
                                }
                            }
                        });
                }

                ui.add_space(8.0);
                ui.separator();
                egui::CollapsingHeader::new("Shortcuts")
                    .default_open(false)
                    .show(ui, |ui| {
                        ui.small("Esc: deselect");
                        ui.small("Ctrl+S: save");
                        ui.small("Ctrl+O: open");
                        ui.small("Ctrl+G: generate");
                    });
            });

        if let Some(kind) = picked
            && let Err(e) = self.editor.insert(kind)
        {
            self.set_status(format!("Cannot add {kind}: {e}"));
        }
    }

    /// Re-reads the inspector's property fields when the selection moved.
    fn sync_inspector(&mut self) {
        let selected = self.editor.selected().map(|node| node.id());
        if self.inspector.node == selected {
            return;
        }
        let keys = self
            .editor
            .selected()
            .map(|node| {
                self.editor
                    .registry()
                    .descriptor_or_unknown(node.kind())
                    .properties()
            })
            .unwrap_or_default();
        self.inspector = InspectorState {
            node: selected,
            name: self
                .editor
                .property(NAME_PROPERTY)
                .unwrap_or_default()
                .to_owned(),
            name_error: None,
            actions: keys
                .iter()
                .map(|key| (*key, self.editor.property(key).unwrap_or_default().to_owned()))
                .collect(),
        };
    }

    fn inspector_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Inspector");
        ui.separator();
        self.sync_inspector();

        if let Some(node) = self.editor.selected().cloned() {
            let name = self
                .editor
                .registry()
                .descriptor_or_unknown(node.kind())
                .name();
            ui.label(format!("{name} ({})", node.kind()));
            ui.add_space(6.0);

            egui::Grid::new("node_properties")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Name");
                    if ui
                        .text_edit_singleline(&mut self.inspector.name)
                        .on_hover_text("Reference name in generated code")
                        .changed()
                    {
                        self.inspector.name_error = self
                            .editor
                            .set_name(&self.inspector.name)
                            .err()
                            .map(|e| e.to_string());
                    }
                    ui.end_row();

                    for (key, value) in &mut self.inspector.actions {
                        ui.label(*key);
                        if ui
                            .add(egui::TextEdit::singleline(value).code_editor())
                            .on_hover_text("Closure source, e.g. || println!(\"hi\")")
                            .changed()
                            && let Err(e) = self.editor.set_property(key, value)
                        {
                            log::warn!("{e}");
                        }
                        ui.end_row();
                    }
                });
            if let Some(error) = &self.inspector.name_error {
                ui.colored_label(ui.visuals().error_fg_color, error);
            } else if self.editor.name_owner(&self.inspector.name).is_some() {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    "Another widget already uses this name; its definition is shared",
                );
            }
            ui.separator();
        }

        egui::ScrollArea::vertical()
            .id_salt("inspector_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| self.editor.form_ui(ui));
    }

    fn generated_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Generated Output");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut self.syntax_highlighting, "Syntax Highlighting")
                    .on_hover_text(
                        "Toggle syntax highlighting (may affect performance with large code)",
                    );
            });
        });

        let stale = self.editor.is_stale();
        ui.horizontal(|ui| {
            if ui.button("Generate").clicked() {
                self.editor.generate();
            }
            if stale {
                ui.weak("Out of date");
            }
        });

        let code = self.editor.generated().render_file();
        ui.horizontal(|ui| {
            if ui.button("Copy").clicked() {
                ui.ctx().copy_text(code.clone());
            }
        });

        egui::ScrollArea::vertical()
            .id_salt("generated_output_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.syntax_highlighting {
                    let job = self.highlighter.layout_job(&code);
                    ui.add(egui::Label::new(job).selectable(true));
                } else {
                    ui.add(
                        egui::TextEdit::multiline(&mut code.as_str())
                            .code_editor()
                            .desired_rows(18)
                            .desired_width(f32::INFINITY),
                    );
                }
            });
    }

    fn new_project_window(&mut self, ctx: &egui::Context) {
        if !self.new_project.open {
            return;
        }
        let mut open = true;
        let mut create = false;
        egui::Window::new("Create project")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("new_project")
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Parent directory");
                        let shown = self
                            .new_project
                            .parent
                            .as_ref()
                            .map_or_else(|| "Choose directory".to_owned(), |p| p.display().to_string());
                        if ui.button(shown).clicked()
                            && let Some(dir) = rfd::FileDialog::new().pick_folder()
                        {
                            self.new_project.parent = Some(dir);
                        }
                        ui.end_row();

                        ui.label("Project name");
                        ui.text_edit_singleline(&mut self.new_project.name);
                        ui.end_row();
                    });

                let name = self.new_project.name.trim();
                let valid = project::is_valid_name(name);
                if !name.is_empty() && !valid {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        "Letters, digits, '-' and '_', starting with a letter",
                    );
                }
                ui.add_enabled_ui(valid && self.new_project.parent.is_some(), |ui| {
                    if ui.button("Create").clicked() {
                        create = true;
                    }
                });
            });
        if create {
            self.create_project();
        } else if !open {
            self.new_project.open = false;
        }
    }
}

impl eframe::App for BuilderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (generate_pressed, save_pressed, open_pressed, escape_pressed) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::G),
                i.modifiers.command && i.key_pressed(egui::Key::S),
                i.modifiers.command && i.key_pressed(egui::Key::O),
                i.key_pressed(egui::Key::Escape),
            )
        });
        if generate_pressed {
            self.generate();
        }
        if save_pressed {
            self.save();
        }
        if open_pressed {
            self.open();
        }
        if escape_pressed {
            self.editor.clear_selection();
        }

        self.editor.set_show_borders(self.show_overlay_borders);

        egui::TopBottomPanel::top("menubar").show(ctx, |ui| self.top_bar(ui));
        if self.palette_open {
            egui::SidePanel::left("palette")
                .resizable(true)
                .show(ctx, |ui| {
                    self.palette_ui(ui);
                });
        }
        egui::SidePanel::right("inspector")
            .default_width(320.0)
            .show(ctx, |ui| {
                // Tab bar for right panel
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(self.right_panel_tab == 0, "Inspector")
                        .clicked()
                    {
                        self.right_panel_tab = 0;
                    }
                    if ui
                        .selectable_label(self.right_panel_tab == 1, "Code")
                        .clicked()
                    {
                        self.right_panel_tab = 1;
                    }
                });
                ui.separator();

                match self.right_panel_tab {
                    0 => self.inspector_ui(ui),
                    1 => self.generated_panel(ui),
                    _ => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .id_salt("canvas_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| self.editor.canvas_ui(ui));
        });

        self.new_project_window(ctx);

        if self.auto_generate && self.editor.is_stale() {
            self.editor.generate();
        }
        if self.editor.take_repaint() {
            ctx.request_repaint();
        }
    }
}
