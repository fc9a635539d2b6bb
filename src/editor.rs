//! The editing session.
//!
//! [`Editor`] is the single owner of everything a builder window edits: the
//! logical tree, per-node properties, the selection overlay, the form of the
//! selected node and the last generated source. Every change goes through a
//! `&mut self` method, so there is never more than one writer.

use crate::container::Container;
use crate::form::{EditError, EditForm, FormEvent, Input};
use crate::node::{Node, NodeId};
use crate::overlay::{OverlayId, SelectionOverlay};
use crate::persist::{self, PersistError, TreeDoc};
use crate::registry::{Registry, RegistryError};
use crate::synth::{CodeSynthesizer, Generated, NAME_PROPERTY, NodeProperties, is_identifier};
use crate::theme::{IconCatalog, ThemeIcons};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("nothing is selected")]
    NoSelection,
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub type EditorResult<T> = Result<T, EditorError>;

pub struct Editor {
    registry: Registry,
    icons: Box<dyn IconCatalog>,
    root: Node,
    properties: NodeProperties,
    overlay: SelectionOverlay,
    form: Option<EditForm>,
    generated: Generated,
    stale: bool,
    repaint: bool,
}

impl Editor {
    /// A session on an empty vertical container.
    pub fn new(registry: Registry) -> Self {
        let root = Node::new(Container::vbox(Vec::new()));
        Self::with_tree(registry, root, NodeProperties::new())
    }

    pub fn with_tree(registry: Registry, root: Node, properties: NodeProperties) -> Self {
        let mut overlay = SelectionOverlay::new();
        overlay.wrap(&registry, root.clone());
        Self {
            registry,
            icons: Box::new(ThemeIcons),
            root,
            properties,
            overlay,
            form: None,
            generated: Generated::default(),
            stale: true,
            repaint: true,
        }
    }

    pub fn with_icons(mut self, icons: Box<dyn IconCatalog>) -> Self {
        self.icons = icons;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn icons(&self) -> &dyn IconCatalog {
        self.icons.as_ref()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn properties(&self) -> &NodeProperties {
        &self.properties
    }

    pub fn overlay(&self) -> &SelectionOverlay {
        &self.overlay
    }

    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    pub fn selected(&self) -> Option<&Node> {
        self.overlay.selected_node()
    }

    /// Whether the tree changed since the last [`Editor::generate`].
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Last generated source. May be stale.
    pub fn generated(&self) -> &Generated {
        &self.generated
    }

    pub fn set_show_borders(&mut self, show: bool) {
        if self.overlay.show_borders != show {
            self.overlay.show_borders = show;
            self.repaint = true;
        }
    }

    /// Replaces the whole tree. Clears the selection and its form.
    pub fn set_tree(&mut self, root: Node, properties: NodeProperties) {
        self.overlay.wrap(&self.registry, root.clone());
        self.root = root;
        self.properties = properties;
        self.form = None;
        self.mark_changed();
    }

    pub fn select(&mut self, id: OverlayId) -> Option<Node> {
        let node = self.overlay.select(id)?;
        self.selected_changed(&node);
        Some(node)
    }

    /// Selects the first overlay that wraps `node`.
    pub fn select_node(&mut self, node: &Node) -> Option<Node> {
        let id = self.overlay.overlay_of(node)?;
        self.select(id)
    }

    pub fn clear_selection(&mut self) {
        self.overlay.clear_selection();
        self.form = None;
    }

    fn selected_changed(&mut self, node: &Node) {
        if self.form.as_ref().is_some_and(|form| form.node() == node.id()) {
            return;
        }
        self.rebuild_form(node);
    }

    fn rebuild_form(&mut self, node: &Node) {
        let descriptor = self.registry.descriptor_or_unknown(node.kind());
        self.form = Some(descriptor.edit(node, self.icons.as_ref(), &mut |_| {}));
        self.repaint = true;
    }

    /// Applies one edit to property `index` of the selected node's form.
    pub fn edit(&mut self, index: usize, input: Input) -> EditorResult<()> {
        let node = self.selected().cloned().ok_or(EditorError::NoSelection)?;
        let form = self.form.as_mut().ok_or(EditorError::NoSelection)?;
        let mut events = Vec::new();
        let result = form.edit(index, input, &node, &mut |event| events.push(event));
        self.handle_events(&node, events);
        Ok(result?)
    }

    fn handle_events(&mut self, node: &Node, events: Vec<FormEvent>) {
        for event in events {
            match event {
                FormEvent::Changed => self.mark_changed(),
                FormEvent::FormsChanged => self.rebuild_form(node),
            }
        }
    }

    fn mark_changed(&mut self) {
        self.stale = true;
        self.repaint = true;
    }

    /// A per-node text property of the selected node.
    pub fn property(&self, key: &str) -> Option<&str> {
        let node = self.selected()?;
        self.properties
            .get(&node.id())?
            .get(key)
            .map(String::as_str)
    }

    /// Sets a per-node text property of the selected node. Blank values
    /// remove the property.
    pub fn set_property(&mut self, key: &str, value: &str) -> EditorResult<()> {
        let id = self.selected().ok_or(EditorError::NoSelection)?.id();
        let entry = self.properties.entry(id).or_default();
        let changed = if value.trim().is_empty() {
            entry.remove(key).is_some()
        } else {
            entry.insert(key.to_owned(), value.to_owned()).as_deref() != Some(value)
        };
        if entry.is_empty() {
            self.properties.remove(&id);
        }
        if changed {
            log::debug!("node {id}: {key} = {value:?}");
            self.mark_changed();
        }
        Ok(())
    }

    /// Sets the reference name of the selected node. Names must be Rust
    /// identifiers; an empty name removes the reference.
    pub fn set_name(&mut self, name: &str) -> EditorResult<()> {
        let name = name.trim();
        if !name.is_empty() && !is_identifier(name) {
            return Err(EditError::Malformed {
                input: name.to_owned(),
                expected: "identifier",
            }
            .into());
        }
        self.set_property(NAME_PROPERTY, name)
    }

    /// Another node that already uses reference `name`. Synthesis reuses the
    /// first definition of a name for every node that carries it.
    pub fn name_owner(&self, name: &str) -> Option<NodeId> {
        let selected = self.selected().map(Node::id);
        let name = name.trim();
        self.properties
            .iter()
            .filter(|(id, _)| Some(**id) != selected)
            .find(|(_, props)| props.get(NAME_PROPERTY).is_some_and(|n| n == name))
            .map(|(id, _)| *id)
    }

    /// Creates a `kind` node and appends it to the selected container, or to
    /// the root when the selection is not a container. The new node becomes
    /// the selection.
    pub fn insert(&mut self, kind: &str) -> EditorResult<Node> {
        let descriptor = self.registry.lookup(kind)?;
        let parent = self
            .overlay
            .selected()
            .filter(|id| self.overlay.is_container(*id))
            .or_else(|| self.overlay.root())
            .ok_or(EditorError::NoSelection)?;
        let node = descriptor.create();
        let id = self.overlay.append(&self.registry, parent, node.clone())?;
        log::debug!("inserted {kind} ({})", node.id());
        self.mark_changed();
        self.select(id);
        Ok(node)
    }

    /// Synthesizes source for the current tree.
    pub fn generate(&mut self) -> &Generated {
        if self.stale {
            self.generated = CodeSynthesizer::new(&self.registry, &self.properties, self.icons.as_ref())
                .synthesize(&self.root);
            self.stale = false;
        }
        &self.generated
    }

    pub fn document(&self) -> EditorResult<TreeDoc> {
        Ok(persist::encode(&self.registry, &self.root, &self.properties)?)
    }

    pub fn load_document(&mut self, doc: TreeDoc) -> EditorResult<()> {
        let (root, properties) = persist::decode(&self.registry, doc)?;
        self.set_tree(root, properties);
        Ok(())
    }

    pub fn save(&self, path: &Path) -> EditorResult<()> {
        persist::save(path, &self.document()?)?;
        Ok(())
    }

    pub fn open(&mut self, path: &Path) -> EditorResult<()> {
        let doc = persist::load(path)?;
        self.load_document(doc)
    }

    /// Whether anything visible changed since the last call.
    pub fn take_repaint(&mut self) -> bool {
        let redraws = !self.overlay.take_redraws().is_empty();
        std::mem::take(&mut self.repaint) || redraws
    }

    /// Draws the tree with its selection overlay.
    pub fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        if let Some(node) = self.overlay.ui(ui) {
            self.selected_changed(&node);
        }
    }

    /// Draws the form of the selected node.
    pub fn form_ui(&mut self, ui: &mut egui::Ui) {
        let Some(node) = self.selected().cloned() else {
            ui.weak("Select a widget to edit it.");
            return;
        };
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if form.is_empty() {
            ui.weak("No editable properties.");
            return;
        }
        let mut events = Vec::new();
        form.ui(ui, &node, &mut |event| events.push(event));
        self.handle_events(&node, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Layout;
    use crate::form::Control;
    use crate::widget::{Button, Label};

    fn editor() -> (Editor, Node, Node) {
        let registry = Registry::standard().unwrap();
        let label: Node = Label::new("Hello").into();
        let button: Node = Button::new("Click", || {}).into();
        let root = Node::new(Container::vbox(vec![label.clone(), button.clone()]));
        (
            Editor::with_tree(registry, root, NodeProperties::new()),
            label,
            button,
        )
    }

    #[test]
    fn test_select_builds_form() {
        let (mut editor, label, button) = editor();
        assert!(editor.form().is_none());

        editor.select_node(&label);
        assert_eq!(editor.form().map(EditForm::node), Some(label.id()));
        editor.select_node(&button);
        assert_eq!(editor.form().map(EditForm::node), Some(button.id()));

        editor.clear_selection();
        assert!(editor.form().is_none());
        assert!(editor.selected().is_none());
    }

    #[test]
    fn test_edit_marks_source_stale() {
        let (mut editor, label, _) = editor();
        editor.generate();
        assert!(!editor.is_stale());

        editor.select_node(&label);
        let text = editor.form().and_then(|f| f.position("Text")).unwrap();
        editor.edit(text, Input::Text("Bye".into())).unwrap();
        assert!(editor.is_stale());
        assert!(editor.generate().source.contains("widget::Label::new(\"Bye\")"));
    }

    #[test]
    fn test_malformed_edit_changes_nothing() {
        let registry = Registry::standard().unwrap();
        let root = registry.create("widget.ProgressBar").unwrap();
        let mut editor = Editor::with_tree(registry, root.clone(), NodeProperties::new());
        editor.generate();
        editor.select_node(&root);

        let value = editor.form().and_then(|f| f.position("Value")).unwrap();
        let result = editor.edit(value, Input::Text("abc".into()));
        assert!(matches!(
            result,
            Err(EditorError::Edit(EditError::Malformed { .. }))
        ));
        assert!(!editor.is_stale());
    }

    #[test]
    fn test_layout_change_rebuilds_form() {
        let (mut editor, _, _) = editor();
        let root = editor.root().clone();
        editor.select_node(&root);
        assert!(editor.form().and_then(|f| f.position("Columns")).is_none());

        let layout = editor.form().and_then(|f| f.position("Layout")).unwrap();
        let grid = Layout::CHOICES
            .iter()
            .position(|(_, l)| *l == Layout::Grid)
            .unwrap();
        editor.edit(layout, Input::Selected(grid)).unwrap();

        let form = editor.form().unwrap();
        let columns = form.position("Columns").unwrap();
        assert_eq!(
            form.control(columns),
            Some(&Control::Entry { text: "2".into() })
        );
    }

    #[test]
    fn test_names_must_be_identifiers() {
        let (mut editor, label, _) = editor();
        assert!(matches!(editor.set_name("x"), Err(EditorError::NoSelection)));

        editor.select_node(&label);
        assert!(matches!(
            editor.set_name("not valid"),
            Err(EditorError::Edit(EditError::Malformed { .. }))
        ));
        assert_eq!(editor.property(NAME_PROPERTY), None);

        editor.set_name("greeting").unwrap();
        assert_eq!(editor.property(NAME_PROPERTY), Some("greeting"));
        let generated = editor.generate().clone();
        assert_eq!(generated.definitions.get("greeting"), Some("widget::Label::new(\"Hello\")"));

        editor.set_name("").unwrap();
        assert!(editor.properties().is_empty());
    }

    #[test]
    fn test_name_owner_reports_other_nodes() {
        let (mut editor, label, button) = editor();
        editor.select_node(&label);
        editor.set_name("greeting").unwrap();
        assert_eq!(editor.name_owner("greeting"), None);

        editor.select_node(&button);
        assert_eq!(editor.name_owner(" greeting "), Some(label.id()));
        assert_eq!(editor.name_owner("other"), None);
    }

    #[test]
    fn test_action_property_reaches_source() {
        let (mut editor, _, button) = editor();
        editor.select_node(&button);
        editor.set_property("on_tapped", "|| println!(\"hi\")").unwrap();
        assert!(editor.generate().source.contains("println!(\"hi\")"));
    }

    #[test]
    fn test_insert_into_selected_container_or_root() {
        let (mut editor, label, _) = editor();
        let root = editor.root().clone();

        editor.select_node(&label);
        let inner = editor.insert("container.Container").unwrap();
        assert_eq!(root.widget().children().len(), 3);
        assert_eq!(editor.selected(), Some(&inner));

        let nested = editor.insert("widget.Check").unwrap();
        assert_eq!(inner.widget().children(), &[nested.clone()]);
        assert_eq!(editor.selected(), Some(&nested));

        assert!(matches!(
            editor.insert("widget.Nope"),
            Err(EditorError::Registry(RegistryError::UnknownKind(_)))
        ));
    }

    #[test]
    fn test_insert_into_leaf_root_fails() {
        let registry = Registry::standard().unwrap();
        let root = registry.create("widget.Label").unwrap();
        let mut editor = Editor::with_tree(registry, root.clone(), NodeProperties::new());
        assert!(matches!(
            editor.insert("widget.Button"),
            Err(EditorError::Registry(RegistryError::NotAContainer(_)))
        ));
        assert_eq!(editor.overlay().len(), 1);
    }

    #[test]
    fn test_save_and_open() {
        let (mut editor, label, _) = editor();
        editor.select_node(&label);
        editor.set_name("greeting").unwrap();
        let before = editor.generate().render_file();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.gui.json");
        editor.save(&path).unwrap();

        let mut other = Editor::new(Registry::standard().unwrap());
        other.open(&path).unwrap();
        assert!(other.selected().is_none());
        assert_eq!(other.generate().render_file(), before);
    }

    #[test]
    fn test_repaint_follows_selection() {
        let (mut editor, label, _) = editor();
        editor.take_repaint();
        assert!(!editor.take_repaint());
        editor.select_node(&label);
        assert!(editor.take_repaint());
        assert!(!editor.take_repaint());
    }
}
