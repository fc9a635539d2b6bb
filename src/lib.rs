//! A visual builder for `egui` widget trees.
//!
//! The builder edits a live tree of [`Node`]s and turns it back into Rust
//! source that rebuilds the same tree against this crate's widget model.
//! Generated code only needs the model modules: [`widget`], [`container`],
//! [`layout`], [`graphics`] and [`theme`].

pub mod app;
pub mod container;
pub mod editor;
pub mod form;
pub mod graphics;
pub mod highlight;
pub mod layout;
pub mod node;
pub mod overlay;
pub mod persist;
pub mod project;
pub mod registry;
pub mod synth;
pub mod theme;
pub mod widget;

pub use node::{Node, NodeId, Widget};
