//! Live widget nodes.
//!
//! A [`Node`] is a shared handle to one widget instance. Identity is the
//! handle, not the value: two nodes holding equal widgets are still two
//! nodes, and cloning a `Node` yields another handle to the same widget.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Upcast helper so trait objects can be downcast to their concrete kind.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A concrete widget that can live in the tree and draw itself with egui.
pub trait Widget: AsAny + fmt::Debug {
    /// Type tag used to find this widget's descriptor in the registry.
    fn kind(&self) -> &str;

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response;

    /// Ordered children. Empty for leaves.
    fn children(&self) -> &[Node] {
        &[]
    }

    /// Lays out `count` child slots the way this widget arranges its
    /// children. Only containers return `Some`.
    fn arrange(
        &self,
        _ui: &mut egui::Ui,
        _count: usize,
        _slot: &mut dyn FnMut(&mut egui::Ui, usize),
    ) -> Option<egui::Response> {
        None
    }
}

struct Inner {
    id: NodeId,
    kind: String,
    widget: RefCell<Box<dyn Widget>>,
}

#[derive(Clone)]
pub struct Node(Rc<Inner>);

impl Node {
    pub fn new<W: Widget + 'static>(widget: W) -> Self {
        Self::from_boxed(Box::new(widget))
    }

    pub fn from_boxed(widget: Box<dyn Widget>) -> Self {
        let kind = widget.kind().to_owned();
        Self(Rc::new(Inner {
            id: NodeId::next(),
            kind,
            widget: RefCell::new(widget),
        }))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// The registry key of the wrapped widget. Fixed for the node's lifetime.
    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    pub fn widget(&self) -> Ref<'_, dyn Widget + 'static> {
        Ref::map(self.0.widget.borrow(), |w| &**w)
    }

    pub fn widget_mut(&self) -> RefMut<'_, dyn Widget + 'static> {
        RefMut::map(self.0.widget.borrow_mut(), |w| &mut **w)
    }

    pub fn downcast<T: Widget + 'static>(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.0.widget.borrow(), |w| {
            let widget: &dyn Widget = &**w;
            widget.as_any().downcast_ref::<T>()
        })
        .ok()
    }

    pub fn downcast_mut<T: Widget + 'static>(&self) -> Option<RefMut<'_, T>> {
        RefMut::filter_map(self.0.widget.borrow_mut(), |w| {
            let widget: &mut dyn Widget = &mut **w;
            widget.as_any_mut().downcast_mut::<T>()
        })
        .ok()
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        self.widget_mut().show(ui)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.0.id)
            .field("kind", &self.0.kind)
            .finish()
    }
}

impl<W: Widget + 'static> From<W> for Node {
    fn from(widget: W) -> Self {
        Node::new(widget)
    }
}
