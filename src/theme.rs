//! Icon resources and the catalog that names them.
//!
//! Widgets hold a [`Resource`] (the glyph that is drawn). Generated code never
//! embeds the glyph when the catalog knows it; it refers to the icon by its
//! canonical name through [`icon`].

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    glyph: String,
}

impl Resource {
    pub fn new(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }
}

/// Name to resource lookups, in both directions.
pub trait IconCatalog {
    fn lookup(&self, name: &str) -> Option<Resource>;

    /// Canonical name of a resource, if the catalog owns it.
    fn icon_name(&self, resource: &Resource) -> Option<&str>;

    /// Every icon name, sorted.
    fn names(&self) -> Vec<&str>;
}

// Sorted by name.
const ICONS: &[(&str, &str)] = &[
    ("AccountIcon", "👤"),
    ("CancelIcon", "✖"),
    ("CheckButtonIcon", "☑"),
    ("ConfirmIcon", "✔"),
    ("ContentAddIcon", "➕"),
    ("ContentCopyIcon", "📋"),
    ("DeleteIcon", "🗑"),
    ("DocumentSaveIcon", "💾"),
    ("FileIcon", "🗋"),
    ("FolderIcon", "📁"),
    ("HelpIcon", "❓"),
    ("HomeIcon", "🏠"),
    ("InfoIcon", "ℹ"),
    ("MailSendIcon", "📧"),
    ("MediaPlayIcon", "▶"),
    ("NavigateBackIcon", "⬅"),
    ("NavigateNextIcon", "➡"),
    ("SearchIcon", "🔍"),
    ("SettingsIcon", "⚙"),
    ("ViewRefreshIcon", "🔄"),
    ("WarningIcon", "⚠"),
];

/// The built-in icon set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThemeIcons;

impl IconCatalog for ThemeIcons {
    fn lookup(&self, name: &str) -> Option<Resource> {
        ICONS
            .binary_search_by(|(n, _)| (*n).cmp(name))
            .ok()
            .map(|i| Resource::new(ICONS[i].1))
    }

    fn icon_name(&self, resource: &Resource) -> Option<&str> {
        ICONS
            .iter()
            .find(|(_, glyph)| *glyph == resource.glyph())
            .map(|(name, _)| *name)
    }

    fn names(&self) -> Vec<&str> {
        ICONS.iter().map(|(name, _)| *name).collect()
    }
}

/// Resolves a built-in icon by name. Unknown names fall back to a question mark.
pub fn icon(name: &str) -> Resource {
    ThemeIcons
        .lookup(name)
        .unwrap_or_else(|| Resource::new("?"))
}

pub fn help_icon() -> Resource {
    icon("HelpIcon")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sorted_for_binary_search() {
        let icons = ThemeIcons;
        let names = icons.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_lookup_and_icon_name_are_inverse() {
        let icons = ThemeIcons;
        for name in icons.names() {
            let resource = icons.lookup(name).unwrap();
            assert_eq!(icons.icon_name(&resource), Some(name));
        }
    }

    #[test]
    fn test_unknown_resources() {
        assert!(ThemeIcons.lookup("NoSuchIcon").is_none());
        assert_eq!(ThemeIcons.icon_name(&Resource::new("Z")), None);
        assert_eq!(icon("NoSuchIcon").glyph(), "?");
        assert_eq!(help_icon().glyph(), "❓");
    }
}
