//! New-project scaffolding: a runnable cargo project around a generated tree.

use crate::container::Container;
use crate::node::Node;
use crate::persist::{self, TreeDoc};
use crate::synth::{Generated, escape};
use crate::widget::Label;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Generated module file, next to `main.rs`.
pub const GUI_SOURCE: &str = "src/main_gui.rs";
/// Tree document the builder reopens.
pub const GUI_DOCUMENT: &str = "main.gui.json";
/// Source of this crate. Scaffolded projects depend on it by path, since
/// the generated module imports its widget types.
pub const BUILDER_DIR: &str = env!("CARGO_MANIFEST_DIR");

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{0:?} is not a valid package name")]
    InvalidName(String),
    #[error("{} already exists", .0.display())]
    Exists(PathBuf),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Persist(#[from] persist::PersistError),
}

/// Cargo package names: ASCII letters, digits, `-` and `_`, starting with a letter.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The tree a fresh project starts from.
pub fn starter_tree(name: &str) -> Node {
    Node::new(Container::vbox(vec![
        Label::new(format!("Hello {name}!")).into(),
    ]))
}

fn cargo_toml(name: &str) -> String {
    format!(
        r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2024"

[dependencies]
eframe = "0.33"
egui-tree-builder = {{ version = "{version}", path = "{path}" }}
"#,
        version = env!("CARGO_PKG_VERSION"),
        path = escape(BUILDER_DIR),
    )
}

fn main_rs(name: &str) -> String {
    format!(
        r#"mod main_gui;

use eframe::egui;

fn main() -> eframe::Result<()> {{
    let root = main_gui::make_ui();
    eframe::run_simple_native("{title}", eframe::NativeOptions::default(), move |ctx, _frame| {{
        egui::CentralPanel::default().show(ctx, |ui| {{
            root.show(ui);
        }});
    }})
}}
"#,
        title = escape(name),
    )
}

fn write(dir: &Path, file: &str, contents: &str) -> Result<(), ProjectError> {
    let path = dir.join(file);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ProjectError::Io {
            path: parent.to_owned(),
            source,
        })?;
    }
    std::fs::write(&path, contents).map_err(|source| ProjectError::Io { path, source })
}

/// Creates `parent/name` with a manifest, an entry point, the generated
/// module and the tree document.
///
/// Files written before a failure are left on disk.
pub fn create_project(
    parent: &Path,
    name: &str,
    generated: &Generated,
    doc: &TreeDoc,
) -> Result<PathBuf, ProjectError> {
    if !is_valid_name(name) {
        return Err(ProjectError::InvalidName(name.to_owned()));
    }
    let dir = parent.join(name);
    if dir.exists() {
        return Err(ProjectError::Exists(dir));
    }
    std::fs::create_dir_all(&dir).map_err(|source| ProjectError::Io {
        path: dir.clone(),
        source,
    })?;

    write(&dir, "Cargo.toml", &cargo_toml(name))?;
    write(&dir, "src/main.rs", &main_rs(name))?;
    write(&dir, GUI_SOURCE, &generated.render_file())?;
    write(&dir, GUI_DOCUMENT, &persist::to_json(doc)?)?;

    log::info!("created project {}", dir.display());
    Ok(dir)
}

/// Rewrites the generated module of the project that owns `document`.
///
/// Returns `false` without writing when `document` is not a project's tree
/// document or the project has no generated module yet.
pub fn update_generated(document: &Path, generated: &Generated) -> Result<bool, ProjectError> {
    let Some(dir) = document.parent() else {
        return Ok(false);
    };
    let is_project_document = document
        .file_name()
        .is_some_and(|name| name == GUI_DOCUMENT);
    if !is_project_document || !dir.join(GUI_SOURCE).is_file() {
        return Ok(false);
    }
    write(dir, GUI_SOURCE, &generated.render_file())?;
    log::info!("updated {}", dir.join(GUI_SOURCE).display());
    Ok(true)
}

/// Runs `cargo fetch` in `dir` on a background thread. Failures are logged.
pub fn fetch_dependencies(dir: PathBuf) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        match Command::new("cargo").arg("fetch").current_dir(&dir).output() {
            Ok(output) if output.status.success() => {
                log::info!("fetched dependencies for {}", dir.display());
            }
            Ok(output) => log::warn!(
                "cargo fetch in {} failed: {}",
                dir.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(err) => log::warn!("could not run cargo fetch in {}: {err}", dir.display()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::synth::{CodeSynthesizer, NodeProperties};
    use crate::theme::ThemeIcons;

    fn starter(name: &str) -> (Generated, TreeDoc) {
        let registry = Registry::standard().unwrap();
        let properties = NodeProperties::new();
        let root = starter_tree(name);
        let generated = CodeSynthesizer::new(&registry, &properties, &ThemeIcons).synthesize(&root);
        let doc = persist::encode(&registry, &root, &properties).unwrap();
        (generated, doc)
    }

    #[test]
    fn test_names() {
        assert!(is_valid_name("hello"));
        assert!(is_valid_name("my-app_2"));
        for bad in ["", "2fast", "-x", "has space", "dots.bad", "ünï"] {
            assert!(!is_valid_name(bad), "{bad}");
        }
    }

    #[test]
    fn test_create_project_writes_every_file() {
        let parent = tempfile::tempdir().unwrap();
        let (generated, doc) = starter("hello");
        let dir = create_project(parent.path(), "hello", &generated, &doc).unwrap();

        assert_eq!(dir, parent.path().join("hello"));
        let manifest = std::fs::read_to_string(dir.join("Cargo.toml")).unwrap();
        assert!(manifest.contains("name = \"hello\""));
        let dependency = format!(
            "egui-tree-builder = {{ version = \"{}\", path = \"{}\" }}",
            env!("CARGO_PKG_VERSION"),
            escape(BUILDER_DIR),
        );
        assert!(manifest.contains(&dependency), "{manifest}");
        assert!(std::path::Path::new(BUILDER_DIR).join("Cargo.toml").is_file());
        let main = std::fs::read_to_string(dir.join("src/main.rs")).unwrap();
        assert!(main.contains("mod main_gui;"));
        assert!(main.contains("run_simple_native(\"hello\""));
        let gui = std::fs::read_to_string(dir.join(GUI_SOURCE)).unwrap();
        assert_eq!(gui, generated.render_file());
        assert!(gui.contains("widget::Label::new(\"Hello hello!\")"));
        assert_eq!(persist::load(&dir.join(GUI_DOCUMENT)).unwrap(), doc);
    }

    #[test]
    fn test_create_project_rejects_bad_names_and_existing_dirs() {
        let parent = tempfile::tempdir().unwrap();
        let (generated, doc) = starter("x");
        assert!(matches!(
            create_project(parent.path(), "bad name", &generated, &doc),
            Err(ProjectError::InvalidName(_))
        ));

        std::fs::create_dir(parent.path().join("taken")).unwrap();
        assert!(matches!(
            create_project(parent.path(), "taken", &generated, &doc),
            Err(ProjectError::Exists(_))
        ));
    }

    #[test]
    fn test_update_generated_only_touches_projects() {
        let parent = tempfile::tempdir().unwrap();
        let (generated, doc) = starter("app");
        let dir = create_project(parent.path(), "app", &generated, &doc).unwrap();

        let registry = Registry::standard().unwrap();
        let properties = NodeProperties::new();
        let root = Node::new(Label::new("changed"));
        let changed = CodeSynthesizer::new(&registry, &properties, &ThemeIcons).synthesize(&root);

        assert!(update_generated(&dir.join(GUI_DOCUMENT), &changed).unwrap());
        let gui = std::fs::read_to_string(dir.join(GUI_SOURCE)).unwrap();
        assert!(gui.contains("widget::Label::new(\"changed\")"));

        let loose = parent.path().join("loose.gui.json");
        assert!(!update_generated(&loose, &changed).unwrap());
    }

    #[test]
    fn test_create_project_reports_unwritable_parent() {
        let parent = tempfile::tempdir().unwrap();
        let file = parent.path().join("plain-file");
        std::fs::write(&file, "").unwrap();
        let (generated, doc) = starter("x");
        assert!(matches!(
            create_project(&file, "child", &generated, &doc),
            Err(ProjectError::Io { .. })
        ));
    }
}
