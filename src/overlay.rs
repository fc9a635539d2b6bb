//! Selection overlay.
//!
//! Every logical node is wrapped once by an overlay entry. Overlays record
//! where their node was drawn, intercept taps on it and paint a border on
//! top of it. The wrapped widgets never see the overlay: layout is the
//! node's own, and the border is painted over the node's rect without
//! allocating space.

use crate::node::Node;
use crate::registry::{Registry, RegistryError, RegistryResult};
use egui::{Color32, CornerRadius, Pos2, Rect, Sense, Stroke, StrokeKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(usize);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected,
}

/// Border colour of an overlay. Depends on nothing but the selection flag
/// and the active theme.
pub fn border_color(selected: bool, visuals: &egui::Visuals) -> Color32 {
    if selected {
        visuals.selection.stroke.color
    } else {
        visuals.widgets.noninteractive.bg_stroke.color.gamma_multiply(0.5)
    }
}

#[derive(Debug)]
struct Overlay {
    node: Node,
    container: bool,
    children: Vec<OverlayId>,
    state: SelectionState,
    depth: usize,
    rect: Option<Rect>,
}

#[derive(Debug, Default)]
pub struct SelectionOverlay {
    overlays: Vec<Overlay>,
    root: Option<OverlayId>,
    selected: Option<OverlayId>,
    redraws: Vec<OverlayId>,
    /// Paint borders around unselected nodes too.
    pub show_borders: bool,
}

impl SelectionOverlay {
    pub fn new() -> Self {
        Self {
            show_borders: true,
            ..Default::default()
        }
    }

    /// Wraps `root` and, recursively, every child its descriptor lists.
    /// Replaces any previous tree and clears the selection.
    pub fn wrap(&mut self, registry: &Registry, root: Node) -> OverlayId {
        self.overlays.clear();
        self.selected = None;
        self.redraws.clear();
        let id = self.wrap_node(registry, root, 0);
        self.root = Some(id);
        id
    }

    fn wrap_node(&mut self, registry: &Registry, node: Node, depth: usize) -> OverlayId {
        let descriptor = registry.descriptor_or_unknown(node.kind());
        let container = descriptor.is_container();
        let children: Vec<OverlayId> = descriptor
            .children(&node)
            .into_iter()
            .map(|child| self.wrap_node(registry, child, depth + 1))
            .collect();

        let id = OverlayId(self.overlays.len());
        self.overlays.push(Overlay {
            node,
            container,
            children,
            state: SelectionState::Unselected,
            depth,
            rect: None,
        });
        id
    }

    pub fn root(&self) -> Option<OverlayId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// The logical node an overlay wraps.
    pub fn node(&self, id: OverlayId) -> Option<&Node> {
        self.overlays.get(id.0).map(|o| &o.node)
    }

    pub fn children(&self, id: OverlayId) -> &[OverlayId] {
        self.overlays.get(id.0).map_or(&[], |o| &o.children)
    }

    pub fn is_container(&self, id: OverlayId) -> bool {
        self.overlays.get(id.0).is_some_and(|o| o.container)
    }

    /// First overlay wrapping `node`, in wrap order.
    pub fn overlay_of(&self, node: &Node) -> Option<OverlayId> {
        self.overlays
            .iter()
            .position(|o| o.node == *node)
            .map(OverlayId)
    }

    pub fn state(&self, id: OverlayId) -> SelectionState {
        self.overlays
            .get(id.0)
            .map_or(SelectionState::Unselected, |o| o.state)
    }

    pub fn selected(&self) -> Option<OverlayId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.and_then(|id| self.node(id))
    }

    /// Makes `id` the only selected overlay and returns its logical node.
    ///
    /// The previous selection is moved back to unselected and both overlays
    /// are queued for redraw.
    pub fn select(&mut self, id: OverlayId) -> Option<Node> {
        let node = self.node(id)?.clone();
        if self.selected == Some(id) {
            return Some(node);
        }

        if let Some(old) = self.selected.take() {
            if let Some(overlay) = self.overlays.get_mut(old.0) {
                overlay.state = SelectionState::Unselected;
            }
            self.redraws.push(old);
        }
        self.overlays[id.0].state = SelectionState::Selected;
        self.selected = Some(id);
        self.redraws.push(id);

        log::debug!("selected {} ({})", node.kind(), node.id());
        Some(node)
    }

    pub fn clear_selection(&mut self) {
        if let Some(old) = self.selected.take() {
            if let Some(overlay) = self.overlays.get_mut(old.0) {
                overlay.state = SelectionState::Unselected;
            }
            self.redraws.push(old);
        }
    }

    /// Overlays whose appearance changed since the last call.
    pub fn take_redraws(&mut self) -> Vec<OverlayId> {
        std::mem::take(&mut self.redraws)
    }

    /// Records where an overlay was drawn this frame.
    pub fn record(&mut self, id: OverlayId, rect: Rect) {
        if let Some(overlay) = self.overlays.get_mut(id.0) {
            overlay.rect = Some(rect);
        }
    }

    pub fn rect(&self, id: OverlayId) -> Option<Rect> {
        self.overlays.get(id.0).and_then(|o| o.rect)
    }

    /// The innermost overlay drawn under `pos`.
    pub fn hit_test(&self, pos: Pos2) -> Option<OverlayId> {
        self.overlays
            .iter()
            .enumerate()
            .filter(|(_, o)| o.rect.is_some_and(|r| r.contains(pos)))
            .max_by_key(|(i, o)| (o.depth, *i))
            .map(|(i, _)| OverlayId(i))
    }

    /// Selects whatever is drawn under `pos`.
    pub fn tap(&mut self, pos: Pos2) -> Option<Node> {
        let id = self.hit_test(pos)?;
        self.select(id)
    }

    /// Wraps `child` and splices it into the container wrapped by `parent`,
    /// both in the overlay tree and in the logical tree.
    pub fn append(
        &mut self,
        registry: &Registry,
        parent: OverlayId,
        child: Node,
    ) -> RegistryResult<OverlayId> {
        let (parent_node, depth) = match self.overlays.get(parent.0) {
            Some(overlay) => (overlay.node.clone(), overlay.depth),
            None => return Err(RegistryError::NoSuchOverlay(parent.0)),
        };

        let mark = self.overlays.len();
        let id = self.wrap_node(registry, child.clone(), depth + 1);
        let descriptor = registry.descriptor_or_unknown(parent_node.kind());
        if let Err(err) = descriptor.append_child(&parent_node, child) {
            self.overlays.truncate(mark);
            return Err(err);
        }
        self.overlays[parent.0].children.push(id);
        Ok(id)
    }

    /// Draws the wrapped tree. Returns the logical node tapped this frame.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<Node> {
        let root = self.root?;
        let mut tapped = None;
        self.show_overlay(ui, root, &mut tapped);
        tapped.and_then(|id| self.select(id))
    }

    fn show_overlay(&mut self, ui: &mut egui::Ui, id: OverlayId, tapped: &mut Option<OverlayId>) {
        let Some(overlay) = self.overlays.get(id.0) else {
            return;
        };
        let node = overlay.node.clone();
        let children = overlay.children.clone();
        let container = overlay.container;
        let previous = overlay.rect;
        let sense_id = ui.id().with(("overlay", id));

        let rect = if container {
            // Registered before the children so that they sit on top of it.
            if let Some(rect) = previous
                && ui.interact(rect, sense_id, Sense::click()).clicked()
            {
                *tapped = Some(id);
            }
            if children.is_empty() {
                let name = crate::registry::short_name(node.kind()).to_owned();
                ui.add_sized(
                    [120.0, 32.0],
                    egui::Label::new(egui::RichText::new(format!("{name} (empty)")).weak()),
                )
                .rect
            } else {
                let widget = node.widget();
                let mut slot = |ui: &mut egui::Ui, i: usize| {
                    self.show_overlay(ui, children[i], tapped);
                };
                let arranged = widget.arrange(ui, children.len(), &mut slot);
                drop(widget);
                match arranged {
                    Some(response) => response.rect,
                    None => node.show(ui).rect,
                }
            }
        } else {
            let rect = node.show(ui).rect;
            if ui.interact(rect, sense_id, Sense::click()).clicked() {
                *tapped = Some(id);
            }
            rect
        };

        self.record(id, rect);
        let selected = self.state(id) == SelectionState::Selected;
        if selected || self.show_borders {
            let width = if selected { 2.0 } else { 1.0 };
            ui.painter().rect_stroke(
                rect,
                CornerRadius::same(2),
                Stroke::new(width, border_color(selected, ui.visuals())),
                StrokeKind::Outside,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::widget::{Button, Label};
    use egui::pos2;

    fn tree() -> (Registry, Node, Node, Node) {
        let registry = Registry::standard().unwrap();
        let a: Node = Label::new("a").into();
        let b: Node = Button::new("b", || {}).into();
        let root = Node::new(Container::vbox(vec![a.clone(), b.clone()]));
        (registry, root, a, b)
    }

    #[test]
    fn test_wrap_follows_children_order() {
        let (registry, root, a, b) = tree();
        let mut overlay = SelectionOverlay::new();
        let id = overlay.wrap(&registry, root.clone());

        assert_eq!(overlay.node(id), Some(&root));
        assert!(overlay.is_container(id));
        let children: Vec<_> = overlay
            .children(id)
            .iter()
            .map(|c| overlay.node(*c).cloned())
            .collect();
        assert_eq!(children, vec![Some(a), Some(b)]);
        assert_eq!(overlay.len(), 3);
    }

    #[test]
    fn test_selection_is_exclusive() {
        let (registry, root, a, b) = tree();
        let mut overlay = SelectionOverlay::new();
        overlay.wrap(&registry, root);
        let oa = overlay.overlay_of(&a).unwrap();
        let ob = overlay.overlay_of(&b).unwrap();

        assert_eq!(overlay.select(oa), Some(a));
        assert_eq!(overlay.take_redraws(), vec![oa]);

        assert_eq!(overlay.select(ob), Some(b.clone()));
        assert_eq!(overlay.state(oa), SelectionState::Unselected);
        assert_eq!(overlay.state(ob), SelectionState::Selected);
        assert_eq!(overlay.take_redraws(), vec![oa, ob]);

        let selected = (0..overlay.len())
            .filter(|i| overlay.state(OverlayId(*i)) == SelectionState::Selected)
            .count();
        assert_eq!(selected, 1);
        assert_eq!(overlay.selected_node(), Some(&b));
    }

    #[test]
    fn test_hit_test_prefers_innermost() {
        let (registry, root, a, _) = tree();
        let mut overlay = SelectionOverlay::new();
        let root_id = overlay.wrap(&registry, root);
        let oa = overlay.overlay_of(&a).unwrap();

        overlay.record(root_id, Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0)));
        overlay.record(oa, Rect::from_min_max(pos2(10.0, 10.0), pos2(50.0, 30.0)));

        assert_eq!(overlay.hit_test(pos2(20.0, 20.0)), Some(oa));
        assert_eq!(overlay.hit_test(pos2(80.0, 80.0)), Some(root_id));
        assert_eq!(overlay.hit_test(pos2(200.0, 200.0)), None);
        assert_eq!(overlay.tap(pos2(20.0, 20.0)), Some(a));
    }

    #[test]
    fn test_append_wraps_and_splices() {
        let (registry, root, a, _) = tree();
        let mut overlay = SelectionOverlay::new();
        let root_id = overlay.wrap(&registry, root.clone());

        let c: Node = Label::new("c").into();
        let id = overlay.append(&registry, root_id, c.clone()).unwrap();
        assert_eq!(overlay.children(root_id).last(), Some(&id));
        assert_eq!(root.widget().children().last(), Some(&c));

        let oa = overlay.overlay_of(&a).unwrap();
        let before = overlay.len();
        assert!(overlay.append(&registry, oa, Label::new("x").into()).is_err());
        assert_eq!(overlay.len(), before);
    }

    #[test]
    fn test_rewrap_clears_selection() {
        let (registry, root, a, _) = tree();
        let mut overlay = SelectionOverlay::new();
        overlay.wrap(&registry, root.clone());
        let oa = overlay.overlay_of(&a).unwrap();
        overlay.select(oa);
        overlay.wrap(&registry, root);
        assert_eq!(overlay.selected(), None);
        assert_eq!(overlay.state(oa), SelectionState::Unselected);
    }

    #[test]
    fn test_border_color_depends_on_selection() {
        let visuals = egui::Visuals::dark();
        assert_eq!(border_color(true, &visuals), visuals.selection.stroke.color);
        assert_ne!(border_color(true, &visuals), border_color(false, &visuals));
    }
}
