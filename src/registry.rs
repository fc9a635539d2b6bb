//! The widget registry: one capability bundle per widget kind.
//!
//! Each concrete widget type implements [`Describe`], the typed capability
//! bundle. The registry stores them behind the object-safe
//! [`WidgetDescriptor`] so that new kinds can be added at start-up without
//! touching any dispatch code.

use crate::container::{Container, Scroll};
use crate::form::{EditForm, FormBuilder, FormEvent};
use crate::graphics::{Circle, Rectangle, Text};
use crate::layout::Spacer;
use crate::node::{Node, Widget};
use crate::synth::{Synthesis, escape};
use crate::theme::IconCatalog;
use crate::widget::{
    Accordion, Button, Card, Check, DateEntry, Entry, Form, Hyperlink, Icon, Label, List, Menu,
    ProgressBar, RadioGroup, RichText, Select, Separator, Slider, Table, TextGrid, Toolbar, Tree,
    Unknown,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Widgets,
    Collections,
    Containers,
    Graphics,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Widgets,
        Category::Collections,
        Category::Containers,
        Category::Graphics,
    ];

    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Widgets => "Widgets",
            Category::Collections => "Collections",
            Category::Containers => "Containers",
            Category::Graphics => "Graphics",
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown widget kind: {0}")]
    UnknownKind(String),
    #[error("widget kind {0} is already registered")]
    DuplicateKind(&'static str),
    #[error("{0} cannot hold children")]
    NotAContainer(String),
    #[error("{0} already holds its only child")]
    ContainerFull(&'static str),
    #[error("a {found} node was handed to the {expected} descriptor")]
    KindMismatch { expected: &'static str, found: String },
    #[error("adding this child would make the tree cyclic")]
    Cycle,
    #[error("no overlay with id {0}")]
    NoSuchOverlay(usize),
    #[error("invalid fields for {kind}: {source}")]
    Fields {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Typed capability bundle implemented by every concrete widget type.
pub trait Describe: Widget + Default + Serialize + DeserializeOwned + 'static {
    /// Registry key, `namespace.ShortName`.
    const KIND: &'static str;
    const NAME: &'static str;
    const CATEGORY: Category;
    const CONTAINER: bool = false;
    /// Whether palette listings show this kind. Lookup works either way.
    const LISTED: bool = true;
    /// Per-node text properties the kind reads during synthesis.
    const PROPERTIES: &'static [&'static str] = &[];

    /// Instance inserted from the palette.
    fn create() -> Self {
        Self::default()
    }

    /// Declares the editable properties. May depend on the current values.
    fn edit(&self, _form: &mut FormBuilder<'_, Self>) {}

    /// Canonical constructor source for the current field values.
    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String;

    fn namespaces(&self) -> Vec<&'static str> {
        vec!["widget"]
    }

    fn push_child(&mut self, _child: Node) -> RegistryResult<()> {
        Err(RegistryError::NotAContainer(Self::KIND.to_owned()))
    }
}

/// Object-safe view of a kind's capabilities, as stored in the registry.
pub trait WidgetDescriptor {
    fn kind(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn category(&self) -> Category;
    fn listed(&self) -> bool;
    fn is_container(&self) -> bool;
    fn properties(&self) -> &'static [&'static str];
    fn create(&self) -> Node;
    fn children(&self, node: &Node) -> Vec<Node>;
    fn append_child(&self, parent: &Node, child: Node) -> RegistryResult<()>;
    fn edit(
        &self,
        node: &Node,
        icons: &dyn IconCatalog,
        notify: &mut dyn FnMut(FormEvent),
    ) -> EditForm;
    fn synthesize(&self, node: &Node, cx: &mut Synthesis<'_>) -> String;
    fn namespaces(&self, node: &Node) -> Vec<&'static str>;
    fn encode(&self, node: &Node) -> RegistryResult<serde_json::Value>;
    fn decode(&self, fields: serde_json::Value) -> RegistryResult<Node>;
}

/// Adapts a [`Describe`] implementation to [`WidgetDescriptor`].
pub struct Descriptor<T>(PhantomData<fn() -> T>);

impl<T> Descriptor<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Descriptor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Describe> Descriptor<T> {
    fn mismatch(node: &Node) -> RegistryError {
        RegistryError::KindMismatch {
            expected: T::KIND,
            found: node.kind().to_owned(),
        }
    }
}

impl<T: Describe> WidgetDescriptor for Descriptor<T> {
    fn kind(&self) -> &'static str {
        T::KIND
    }

    fn name(&self) -> &'static str {
        T::NAME
    }

    fn category(&self) -> Category {
        T::CATEGORY
    }

    fn listed(&self) -> bool {
        T::LISTED
    }

    fn is_container(&self) -> bool {
        T::CONTAINER
    }

    fn properties(&self) -> &'static [&'static str] {
        T::PROPERTIES
    }

    fn create(&self) -> Node {
        Node::new(T::create())
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        node.widget().children().to_vec()
    }

    fn append_child(&self, parent: &Node, child: Node) -> RegistryResult<()> {
        if !T::CONTAINER {
            return Err(RegistryError::NotAContainer(T::KIND.to_owned()));
        }
        if child == *parent || contains(&child, parent) {
            return Err(RegistryError::Cycle);
        }
        let mut widget = parent
            .downcast_mut::<T>()
            .ok_or_else(|| Self::mismatch(parent))?;
        widget.push_child(child)
    }

    fn edit(
        &self,
        node: &Node,
        icons: &dyn IconCatalog,
        notify: &mut dyn FnMut(FormEvent),
    ) -> EditForm {
        let mut form = FormBuilder::<T>::new(icons);
        {
            let Some(widget) = node.downcast::<T>() else {
                log::warn!("{} form requested for a {} node", T::KIND, node.kind());
                return EditForm::empty(node);
            };
            widget.edit(&mut form);
        }
        form.finish(node, notify)
    }

    fn synthesize(&self, node: &Node, cx: &mut Synthesis<'_>) -> String {
        match node.downcast::<T>() {
            Some(widget) => widget.synthesize(cx),
            None => UnknownDescriptor.synthesize(node, cx),
        }
    }

    fn namespaces(&self, node: &Node) -> Vec<&'static str> {
        node.downcast::<T>()
            .map(|widget| widget.namespaces())
            .unwrap_or_else(|| vec!["widget"])
    }

    fn encode(&self, node: &Node) -> RegistryResult<serde_json::Value> {
        let widget = node.downcast::<T>().ok_or_else(|| Self::mismatch(node))?;
        serde_json::to_value(&*widget).map_err(|source| RegistryError::Fields {
            kind: T::KIND.to_owned(),
            source,
        })
    }

    fn decode(&self, fields: serde_json::Value) -> RegistryResult<Node> {
        // Missing fields mean all defaults.
        let fields = match fields {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            fields => fields,
        };
        serde_json::from_value::<T>(fields)
            .map(Node::new)
            .map_err(|source| RegistryError::Fields {
                kind: T::KIND.to_owned(),
                source,
            })
    }
}

/// Whether `needle` is `root` or anywhere below it.
fn contains(root: &Node, needle: &Node) -> bool {
    root == needle
        || root
            .widget()
            .children()
            .iter()
            .any(|child| contains(child, needle))
}

/// Fallback for kinds the registry does not know. No form, no children
/// management, and a placeholder constructor in generated code.
pub struct UnknownDescriptor;

impl WidgetDescriptor for UnknownDescriptor {
    fn kind(&self) -> &'static str {
        Unknown::KIND
    }

    fn name(&self) -> &'static str {
        "Unknown"
    }

    fn category(&self) -> Category {
        Category::Widgets
    }

    fn listed(&self) -> bool {
        false
    }

    fn is_container(&self) -> bool {
        false
    }

    fn properties(&self) -> &'static [&'static str] {
        &[]
    }

    fn create(&self) -> Node {
        Node::new(Unknown::new(Unknown::KIND))
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        node.widget().children().to_vec()
    }

    fn append_child(&self, parent: &Node, _child: Node) -> RegistryResult<()> {
        Err(RegistryError::NotAContainer(parent.kind().to_owned()))
    }

    fn edit(
        &self,
        node: &Node,
        _icons: &dyn IconCatalog,
        _notify: &mut dyn FnMut(FormEvent),
    ) -> EditForm {
        EditForm::empty(node)
    }

    fn synthesize(&self, node: &Node, _cx: &mut Synthesis<'_>) -> String {
        format!("widget::Unknown::new(\"{}\")", escape(node.kind()))
    }

    fn namespaces(&self, _node: &Node) -> Vec<&'static str> {
        vec!["widget"]
    }

    fn encode(&self, node: &Node) -> RegistryResult<serde_json::Value> {
        Ok(node
            .downcast::<Unknown>()
            .map(|unknown| unknown.fields().clone())
            .unwrap_or(serde_json::Value::Null))
    }

    fn decode(&self, fields: serde_json::Value) -> RegistryResult<Node> {
        Ok(Node::new(
            Unknown::new(Unknown::KIND).with_fields(fields),
        ))
    }
}

static UNKNOWN: UnknownDescriptor = UnknownDescriptor;

/// Collects descriptors before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    descriptors: HashMap<&'static str, Box<dyn WidgetDescriptor>>,
}

impl RegistryBuilder {
    pub fn register<T: Describe>(self) -> RegistryResult<Self> {
        self.register_descriptor(Box::new(Descriptor::<T>::new()))
    }

    pub fn register_descriptor(
        mut self,
        descriptor: Box<dyn WidgetDescriptor>,
    ) -> RegistryResult<Self> {
        let kind = descriptor.kind();
        if self.descriptors.contains_key(kind) {
            return Err(RegistryError::DuplicateKind(kind));
        }
        self.descriptors.insert(kind, descriptor);
        Ok(self)
    }

    pub fn build(self) -> Registry {
        log::debug!("registry built with {} kinds", self.descriptors.len());
        Registry {
            descriptors: self.descriptors,
        }
    }
}

/// Immutable table of widget kinds. Lookups are pure.
pub struct Registry {
    descriptors: HashMap<&'static str, Box<dyn WidgetDescriptor>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Every built-in kind.
    pub fn standard() -> RegistryResult<Self> {
        Ok(Self::builder()
            .register::<Accordion>()?
            .register::<Button>()?
            .register::<Card>()?
            .register::<Check>()?
            .register::<DateEntry>()?
            .register::<Entry>()?
            .register::<Form>()?
            .register::<Hyperlink>()?
            .register::<Icon>()?
            .register::<Label>()?
            .register::<Menu>()?
            .register::<ProgressBar>()?
            .register::<RadioGroup>()?
            .register::<RichText>()?
            .register::<Select>()?
            .register::<Separator>()?
            .register::<Slider>()?
            .register::<Spacer>()?
            .register::<TextGrid>()?
            .register::<Toolbar>()?
            .register::<List>()?
            .register::<Table>()?
            .register::<Tree>()?
            .register::<Container>()?
            .register::<Scroll>()?
            .register::<Rectangle>()?
            .register::<Circle>()?
            .register::<Text>()?
            .build())
    }

    pub fn lookup(&self, kind: &str) -> RegistryResult<&dyn WidgetDescriptor> {
        self.descriptors
            .get(kind)
            .map(|d| d.as_ref())
            .ok_or_else(|| RegistryError::UnknownKind(kind.to_owned()))
    }

    /// Like [`Registry::lookup`], but fails closed to [`UnknownDescriptor`].
    pub fn descriptor_or_unknown(&self, kind: &str) -> &dyn WidgetDescriptor {
        match self.lookup(kind) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                log::warn!("{err}");
                &UNKNOWN
            }
        }
    }

    pub fn create(&self, kind: &str) -> RegistryResult<Node> {
        self.lookup(kind).map(|d| d.create())
    }

    /// Listed kinds of one category, sorted by the short name after the dot.
    pub fn all_kinds(&self, category: Category) -> Vec<&'static str> {
        let mut kinds: Vec<&'static str> = self
            .descriptors
            .values()
            .filter(|d| d.category() == category && d.listed())
            .map(|d| d.kind())
            .collect();
        kinds.sort_by(|a, b| short_name(a).cmp(short_name(b)).then_with(|| a.cmp(b)));
        kinds
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// `widget.Button` -> `Button`.
pub fn short_name(kind: &str) -> &str {
    kind.split_once('.').map_or(kind, |(_, name)| name)
}
