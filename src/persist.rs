//! Tree documents: the JSON form of a widget tree and its node properties.

use crate::node::Node;
use crate::registry::{Registry, RegistryError};
use crate::synth::NodeProperties;
use crate::widget::Unknown;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// File extension used for saved trees.
pub const EXTENSION: &str = "gui.json";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type PersistResult<T> = Result<T, PersistError>;

/// One node of a saved tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeDoc {
    pub kind: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub fields: serde_json::Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeDoc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

/// Captures `root` and everything below it.
///
/// A node reachable from several places is written once per place; named
/// copies synthesize to the same shared definition after reloading.
pub fn encode(
    registry: &Registry,
    root: &Node,
    properties: &NodeProperties,
) -> PersistResult<TreeDoc> {
    let descriptor = registry.descriptor_or_unknown(root.kind());
    let children = descriptor
        .children(root)
        .iter()
        .map(|child| encode(registry, child, properties))
        .collect::<PersistResult<Vec<_>>>()?;
    Ok(TreeDoc {
        kind: root.kind().to_owned(),
        fields: descriptor.encode(root)?,
        children,
        properties: properties.get(&root.id()).cloned().unwrap_or_default(),
    })
}

/// Rebuilds a tree. Kinds the registry does not know become
/// [`Unknown`] nodes that keep their fields and children.
pub fn decode(registry: &Registry, doc: TreeDoc) -> PersistResult<(Node, NodeProperties)> {
    let mut properties = NodeProperties::new();
    let root = decode_node(registry, doc, &mut properties)?;
    Ok((root, properties))
}

fn decode_node(
    registry: &Registry,
    doc: TreeDoc,
    properties: &mut NodeProperties,
) -> PersistResult<Node> {
    let TreeDoc {
        kind,
        fields,
        children,
        properties: own,
    } = doc;

    let node = match registry.lookup(&kind) {
        Ok(descriptor) => {
            let node = descriptor.decode(fields)?;
            for child in children {
                let child = decode_node(registry, child, properties)?;
                descriptor.append_child(&node, child)?;
            }
            node
        }
        Err(err) => {
            log::warn!("{err}; keeping it as an opaque node");
            let children = children
                .into_iter()
                .map(|child| decode_node(registry, child, properties))
                .collect::<PersistResult<Vec<_>>>()?;
            Node::new(
                Unknown::new(kind)
                    .with_fields(fields)
                    .with_children(children),
            )
        }
    };

    if !own.is_empty() {
        properties.insert(node.id(), own);
    }
    Ok(node)
}

pub fn to_json(doc: &TreeDoc) -> PersistResult<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

pub fn from_json(json: &str) -> PersistResult<TreeDoc> {
    Ok(serde_json::from_str(json)?)
}

pub fn save(path: &Path, doc: &TreeDoc) -> PersistResult<()> {
    std::fs::write(path, to_json(doc)?)?;
    log::info!("saved {}", path.display());
    Ok(())
}

pub fn load(path: &Path) -> PersistResult<TreeDoc> {
    let doc = from_json(&std::fs::read_to_string(path)?)?;
    log::info!("loaded {}", path.display());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::registry::Category;
    use crate::synth::{CodeSynthesizer, NAME_PROPERTY};
    use crate::theme::ThemeIcons;
    use crate::widget::{Button, Label};

    fn registry() -> Registry {
        Registry::standard().unwrap()
    }

    #[test]
    fn test_every_kind_round_trips() {
        let registry = registry();
        let mut kinds: Vec<&str> = Category::ALL
            .iter()
            .flat_map(|c| registry.all_kinds(*c))
            .collect();
        kinds.push("container.Scroll");

        for kind in kinds {
            let node = registry.create(kind).unwrap();
            let doc = encode(&registry, &node, &NodeProperties::new()).unwrap();
            let json = to_json(&doc).unwrap();
            let (decoded, _) = decode(&registry, from_json(&json).unwrap()).unwrap();
            assert_eq!(decoded.kind(), kind);
            let again = encode(&registry, &decoded, &NodeProperties::new()).unwrap();
            assert_eq!(again, doc, "{kind} did not round trip");
        }
    }

    #[test]
    fn test_children_and_properties_round_trip() {
        let registry = registry();
        let label: Node = Label::new("Hello").into();
        let root = Node::new(Container::vbox(vec![
            label.clone(),
            Button::new("Click", || {}).into(),
        ]));
        let mut properties = NodeProperties::new();
        properties
            .entry(label.id())
            .or_default()
            .insert(NAME_PROPERTY.into(), "greeting".into());

        let doc = encode(&registry, &root, &properties).unwrap();
        assert_eq!(doc.children.len(), 2);
        assert_eq!(doc.children[0].properties[NAME_PROPERTY], "greeting");

        let (decoded, decoded_props) = decode(&registry, doc.clone()).unwrap();
        assert_eq!(encode(&registry, &decoded, &decoded_props).unwrap(), doc);

        let synth = |root: &Node, props: &NodeProperties| {
            CodeSynthesizer::new(&registry, props, &ThemeIcons)
                .synthesize(root)
                .render_file()
        };
        assert_eq!(synth(&decoded, &decoded_props), synth(&root, &properties));
    }

    #[test]
    fn test_unknown_kinds_are_kept() {
        let registry = registry();
        let json = r#"{
            "kind": "custom.Gauge",
            "fields": { "needle": 3 },
            "children": [ { "kind": "widget.Label", "fields": { "text": "inner" } } ]
        }"#;
        let doc = from_json(json).unwrap();
        let (node, _) = decode(&registry, doc.clone()).unwrap();
        assert_eq!(node.kind(), "custom.Gauge");
        assert_eq!(node.widget().children().len(), 1);

        let again = encode(&registry, &node, &NodeProperties::new()).unwrap();
        assert_eq!(again.kind, doc.kind);
        assert_eq!(again.fields, doc.fields);
        assert_eq!(again.children[0].kind, "widget.Label");
    }

    #[test]
    fn test_children_of_leaves_are_rejected() {
        let registry = registry();
        let json = r#"{ "kind": "widget.Label", "children": [ { "kind": "widget.Label" } ] }"#;
        assert!(matches!(
            decode(&registry, from_json(json).unwrap()),
            Err(PersistError::Registry(RegistryError::NotAContainer(_)))
        ));
    }

    #[test]
    fn test_bad_fields_are_reported() {
        let registry = registry();
        let json = r#"{ "kind": "widget.Label", "fields": { "text": 5 } }"#;
        assert!(matches!(
            decode(&registry, from_json(json).unwrap()),
            Err(PersistError::Registry(RegistryError::Fields { .. }))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let registry = registry();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("main.{EXTENSION}"));
        let root = Node::new(Container::vbox(vec![Label::new("x").into()]));
        let doc = encode(&registry, &root, &NodeProperties::new()).unwrap();

        save(&path, &doc).unwrap();
        assert_eq!(load(&path).unwrap(), doc);
        assert!(matches!(
            load(&dir.path().join("missing.gui.json")),
            Err(PersistError::Io(_))
        ));
    }
}
