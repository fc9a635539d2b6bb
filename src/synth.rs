//! Source synthesis: turns a live tree back into constructor code.
//!
//! Traversal is depth first with children finished before their parent.
//! Every kind picks its own canonical constructor through
//! [`Describe::synthesize`](crate::registry::Describe::synthesize), using the
//! helpers on [`Synthesis`] so that quoting, indentation and named references
//! come out the same way for every kind.

use crate::node::{Node, NodeId};
use crate::registry::Registry;
use crate::theme::{IconCatalog, Resource};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;

/// Per-node out-of-band text properties, keyed by node identity.
pub type NodeProperties = HashMap<NodeId, BTreeMap<String, String>>;

/// Property that turns a node into a named, shared definition.
pub const NAME_PROPERTY: &str = "name";

/// Closure source used when a node has no action property.
pub const NOOP_ACTION: &str = "|| {}";

const INDENT: &str = "    ";

/// Escapes `text` for embedding between double quotes in Rust source.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out
}

/// `text` as a quoted string literal.
pub fn quoted(text: &str) -> String {
    format!("\"{}\"", escape(text))
}

/// Whether `name` can be used as a `let` binding in generated code.
pub fn is_identifier(name: &str) -> bool {
    const KEYWORDS: &[&str] = &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual",
        "yield",
    ];
    // Patterns on these resolve to items in scope of the generated module.
    const IN_SCOPE: &[&str] = &[
        "Node", "Some", "None", "Ok", "Err", "make_ui", "widget", "container", "layout",
        "graphics", "theme",
    ];
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && name != "_"
        && !KEYWORDS.contains(&name)
        && !IN_SCOPE.contains(&name)
}

/// Prefixes every non-empty line with one indentation level.
pub fn indent(code: &str) -> String {
    code.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `vec![..]` with one item per line.
pub fn vec_of(items: &[String]) -> String {
    if items.is_empty() {
        return "vec![]".to_owned();
    }
    let mut out = String::from("vec![\n");
    for item in items {
        let _ = writeln!(out, "{},", indent(item));
    }
    out.push(']');
    out
}

/// `vec!["a".into(), ..]` for a list of strings.
pub fn string_vec(items: &[String]) -> String {
    let items: Vec<String> = items
        .iter()
        .map(|item| format!("{}.into()", quoted(item)))
        .collect();
    vec_of(&items)
}

/// Struct literal over `fields`, closed with `..Default::default()`.
pub fn literal(path: &str, fields: &[(&str, String)]) -> String {
    let mut out = format!("{path} {{\n");
    for (name, value) in fields {
        let _ = writeln!(out, "{},", indent(&format!("{name}: {value}")));
    }
    out.push_str(INDENT);
    out.push_str("..Default::default()\n}");
    out
}

/// Write-once table from reference name to its defining snippet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Definitions {
    entries: Vec<(String, String)>,
}

impl Definitions {
    /// Records `code` under `name` unless the name is already defined.
    /// Returns whether this call wrote the entry.
    pub fn define(&mut self, name: &str, code: String) -> bool {
        if self.contains(name) {
            return false;
        }
        self.entries.push((name.to_owned(), code));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, code)| code.as_str())
    }

    /// Entries in first-definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State of one synthesis pass, handed to every kind's synthesizer.
pub struct Synthesis<'a> {
    registry: &'a Registry,
    properties: &'a NodeProperties,
    icons: &'a dyn IconCatalog,
    definitions: Definitions,
    namespaces: BTreeSet<&'static str>,
    current: Vec<NodeId>,
}

impl<'a> Synthesis<'a> {
    fn new(
        registry: &'a Registry,
        properties: &'a NodeProperties,
        icons: &'a dyn IconCatalog,
    ) -> Self {
        Self {
            registry,
            properties,
            icons,
            definitions: Definitions::default(),
            namespaces: BTreeSet::new(),
            current: Vec::new(),
        }
    }

    /// Source for `node`, or a reference to it when the node is named.
    pub fn node(&mut self, node: &Node) -> String {
        let name = self.name_of(node);
        if let Some(name) = &name
            && self.definitions.contains(name)
        {
            return format!("{name}.clone()");
        }

        let registry = self.registry;
        let descriptor = registry.descriptor_or_unknown(node.kind());
        self.namespaces.extend(descriptor.namespaces(node));
        self.current.push(node.id());
        let code = descriptor.synthesize(node, self);
        self.current.pop();

        match name {
            Some(name) => {
                self.definitions.define(&name, code);
                format!("{name}.clone()")
            }
            None => code,
        }
    }

    /// Source for each child, converted to `Node`.
    pub fn children(&mut self, children: &[Node]) -> Vec<String> {
        children
            .iter()
            .map(|child| format!("{}.into()", self.node(child)))
            .collect()
    }

    fn name_of(&self, node: &Node) -> Option<String> {
        let name = self.properties.get(&node.id())?.get(NAME_PROPERTY)?;
        if is_identifier(name) {
            Some(name.clone())
        } else {
            log::warn!("ignoring invalid reference name {name:?} on node {}", node.id());
            None
        }
    }

    /// A per-node property of the node being synthesized.
    pub fn property(&self, key: &str) -> Option<&'a str> {
        let id = self.current.last()?;
        self.properties
            .get(id)?
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Closure source for an action property, defaulting to a no-op.
    pub fn action(&self, key: &str) -> String {
        self.property(key).unwrap_or(NOOP_ACTION).trim().to_owned()
    }

    /// Source for an icon resource, by catalog name where possible.
    pub fn icon(&mut self, resource: &Resource) -> String {
        self.namespaces.insert("theme");
        match self.icons.icon_name(resource) {
            Some(name) => format!("theme::icon({})", quoted(name)),
            None => format!("theme::Resource::new({})", quoted(resource.glyph())),
        }
    }

    pub fn optional_icon(&mut self, resource: Option<&Resource>) -> String {
        match resource {
            Some(resource) => format!("Some({})", self.icon(resource)),
            None => "None".to_owned(),
        }
    }
}

/// Output of one synthesis pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generated {
    /// Expression that builds the root.
    pub source: String,
    pub namespaces: BTreeSet<&'static str>,
    pub definitions: Definitions,
}

impl Generated {
    /// A complete module exposing `make_ui`.
    pub fn render_file(&self) -> String {
        let mut imports = vec!["Node"];
        imports.extend(self.namespaces.iter().copied());

        let mut out = String::new();
        out.push_str("// Code generated by egui-tree-builder. DO NOT EDIT.\n\n");
        let _ = writeln!(out, "use egui_tree_builder::{{{}}};\n", imports.join(", "));
        out.push_str("/// Builds the designed widget tree.\n");
        out.push_str("pub fn make_ui() -> Node {\n");
        for (name, code) in self.definitions.iter() {
            let _ = writeln!(out, "{}", indent(&format!("let {name}: Node = {code}.into();")));
        }
        if !self.definitions.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", indent(&format!("{}.into()", self.source)));
        out.push_str("}\n");
        out
    }
}

/// Runs synthesis over logical trees.
pub struct CodeSynthesizer<'a> {
    registry: &'a Registry,
    properties: &'a NodeProperties,
    icons: &'a dyn IconCatalog,
}

impl<'a> CodeSynthesizer<'a> {
    pub fn new(
        registry: &'a Registry,
        properties: &'a NodeProperties,
        icons: &'a dyn IconCatalog,
    ) -> Self {
        Self {
            registry,
            properties,
            icons,
        }
    }

    pub fn synthesize(&self, root: &Node) -> Generated {
        let mut cx = Synthesis::new(self.registry, self.properties, self.icons);
        let source = cx.node(root);
        log::debug!(
            "synthesized {} definitions, namespaces {:?}",
            cx.definitions.len(),
            cx.namespaces
        );
        Generated {
            source,
            namespaces: cx.namespaces,
            definitions: cx.definitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::theme::{ThemeIcons, help_icon};
    use crate::widget::{Button, Importance, Label, Select, TextWrap};

    fn unescape(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('0') => out.push('\0'),
                Some(other) => out.push(other),
                None => {}
            }
        }
        out
    }

    fn generate(root: &Node, properties: &NodeProperties) -> Generated {
        let registry = Registry::standard().unwrap();
        CodeSynthesizer::new(&registry, properties, &ThemeIcons).synthesize(root)
    }

    fn vbox(children: Vec<Node>) -> Node {
        Node::new(Container::vbox(children))
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let root = vbox(vec![
            Label::new("Hello").into(),
            Button::new("Click", || {}).into(),
            Select::new(["A", "B"]).into(),
        ]);
        let properties = NodeProperties::new();
        let first = generate(&root, &properties).render_file();
        let second = generate(&root, &properties).render_file();
        assert_eq!(first, second);
    }

    #[test]
    fn test_named_node_defined_once() {
        let shared: Node = Label::new("Shared").into();
        let root = vbox(vec![shared.clone(), shared.clone()]);
        let mut properties = NodeProperties::new();
        properties
            .entry(shared.id())
            .or_default()
            .insert(NAME_PROPERTY.into(), "g1".into());

        let generated = generate(&root, &properties);
        assert_eq!(generated.definitions.len(), 1);
        assert_eq!(
            generated.definitions.get("g1"),
            Some("widget::Label::new(\"Shared\")")
        );

        let file = generated.render_file();
        assert_eq!(file.matches("let g1").count(), 1);
        assert_eq!(file.matches("g1.clone()").count(), 2);
    }

    #[test]
    fn test_definitions_first_writer_wins() {
        let mut definitions = Definitions::default();
        assert!(definitions.define("a", "first".into()));
        assert!(!definitions.define("a", "second".into()));
        assert_eq!(definitions.get("a"), Some("first"));
        assert_eq!(definitions.len(), 1);
    }

    #[test]
    fn test_invalid_names_are_inlined() {
        let label: Node = Label::new("x").into();
        let mut properties = NodeProperties::new();
        properties
            .entry(label.id())
            .or_default()
            .insert(NAME_PROPERTY.into(), "not a name".into());
        let generated = generate(&label, &properties);
        assert!(generated.definitions.is_empty());
        assert_eq!(generated.source, "widget::Label::new(\"x\")");
    }

    #[test]
    fn test_escaping_round_trips() {
        let original = "say \"hi\"\nthen \\ leave";
        let label: Node = Label::new(original).into();
        let source = generate(&label, &NodeProperties::new()).source;

        let start = source.find("(\"").unwrap() + 2;
        let end = source.rfind("\")").unwrap();
        assert_eq!(unescape(&source[start..end]), original);
        assert!(!source.contains('\n'));
    }

    #[test]
    fn test_button_default_form_is_minimal() {
        let button: Node = Button::new("Click", || {}).into();
        let properties = NodeProperties::new();
        assert_eq!(
            generate(&button, &properties).source,
            "widget::Button::new(\"Click\", || {})"
        );

        if let Some(mut b) = button.downcast_mut::<Button>() {
            b.importance = Importance::High;
        }
        let verbose = generate(&button, &properties).source;
        assert!(verbose.starts_with("widget::Button {"));
        assert!(verbose.contains("text: \"Click\".into(),"));
        assert!(verbose.contains("importance: widget::Importance::High,"));
        assert!(verbose.contains("action: widget::Action::new(|| {}),"));
        assert!(verbose.ends_with("..Default::default()\n}"));
    }

    #[test]
    fn test_action_property_replaces_noop() {
        let button: Node = Button::new("Go", || {}).into();
        let mut properties = NodeProperties::new();
        properties
            .entry(button.id())
            .or_default()
            .insert("on_tapped".into(), "|| log::info!(\"go\")".into());
        assert_eq!(
            generate(&button, &properties).source,
            "widget::Button::new(\"Go\", || log::info!(\"go\"))"
        );
    }

    #[test]
    fn test_icon_uses_catalog_name() {
        let mut button = Button::new("Help", || {});
        button.icon = Some(help_icon());
        let generated = generate(&button.into(), &NodeProperties::new());
        assert!(
            generated
                .source
                .contains("icon: Some(theme::icon(\"HelpIcon\")),")
        );
        assert!(generated.namespaces.contains("theme"));
    }

    #[test]
    fn test_vbox_scenario() {
        let root = vbox(vec![
            Label::new("Hello").into(),
            Button::new("Click", || {}).into(),
        ]);
        let generated = generate(&root, &NodeProperties::new());
        assert_eq!(
            generated.source,
            "container::Container::vbox(vec![\n    \
             widget::Label::new(\"Hello\").into(),\n    \
             widget::Button::new(\"Click\", || {}).into(),\n\
             ])"
        );
        assert_eq!(
            generated.namespaces.into_iter().collect::<Vec<_>>(),
            vec!["container", "widget"]
        );
    }

    #[test]
    fn test_label_wrap_scenario() {
        let label: Node = Label::new("Hello").into();
        let properties = NodeProperties::new();
        assert_eq!(
            generate(&label, &properties).source,
            "widget::Label::new(\"Hello\")"
        );

        if let Some(mut l) = label.downcast_mut::<Label>() {
            l.wrapping = TextWrap::Word;
        }
        assert_eq!(
            generate(&label, &properties).source,
            "widget::Label {\n    \
             text: \"Hello\".into(),\n    \
             alignment: widget::TextAlign::Leading,\n    \
             wrapping: widget::TextWrap::Word,\n    \
             ..Default::default()\n\
             }"
        );
    }

    #[test]
    fn test_render_file_layout() {
        let root = vbox(vec![Label::new("Hello").into()]);
        let file = generate(&root, &NodeProperties::new()).render_file();
        assert!(file.starts_with("// Code generated by egui-tree-builder. DO NOT EDIT."));
        assert!(file.contains("use egui_tree_builder::{Node, container, widget};"));
        assert!(file.contains("pub fn make_ui() -> Node {\n    container::Container::vbox("));
        assert!(file.ends_with("    ]).into()\n}\n"));
    }

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("g1"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("1g"));
        assert!(!is_identifier("fn"));
        assert!(!is_identifier("_"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("try"));
        for taken in ["Node", "Some", "None", "Ok", "Err", "widget", "make_ui"] {
            assert!(!is_identifier(taken), "{taken}");
        }
        assert!(is_identifier("node"));
    }
}
