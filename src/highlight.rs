//! Syntax highlighting for generated code using syntect.

use egui::Color32;
use egui::text::LayoutJob;
use std::cell::RefCell;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const THEME: &str = "base16-ocean.dark";

/// Cached syntax highlighting resources.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    /// Last highlighted source and its layout. Generated code only changes
    /// on edits, so most frames reuse it.
    cache: RefCell<Option<(String, LayoutJob)>>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            cache: RefCell::new(None),
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(THEME)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight Rust code and return a list of (text, color) spans.
    pub fn highlight_rust(&self, code: &str) -> Vec<(String, Color32)> {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("rs")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let Some(theme) = self.theme() else {
            return vec![(code.to_owned(), Color32::LIGHT_GRAY)];
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut result = Vec::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    for (style, text) in ranges {
                        result.push((text.to_string(), style_to_color32(style)));
                    }
                }
                Err(e) => {
                    log::debug!("highlighting failed, showing plain text: {e}");
                    result.push((line.to_string(), Color32::LIGHT_GRAY));
                }
            }
        }

        result
    }

    /// Render highlighted code as a LayoutJob for egui.
    pub fn layout_job(&self, code: &str) -> LayoutJob {
        if let Some((cached, job)) = &*self.cache.borrow()
            && cached == code
        {
            return job.clone();
        }

        let mut job = LayoutJob::default();
        for (text, color) in self.highlight_rust(code) {
            job.append(
                &text,
                0.0,
                egui::TextFormat {
                    font_id: egui::FontId::monospace(12.0),
                    color,
                    ..Default::default()
                },
            );
        }

        *self.cache.borrow_mut() = Some((code.to_owned(), job.clone()));
        job
    }
}

/// Convert syntect Style to egui Color32.
fn style_to_color32(style: Style) -> Color32 {
    Color32::from_rgb(style.foreground.r, style.foreground.g, style.foreground.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_basic() {
        let highlighter = Highlighter::new();
        let spans = highlighter.highlight_rust("fn main() {\n    println!(\"Hello\");\n}\n");
        assert!(!spans.is_empty());
        let text: String = spans.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(text, "fn main() {\n    println!(\"Hello\");\n}\n");
    }

    #[test]
    fn test_layout_job_is_cached() {
        let highlighter = Highlighter::new();
        let first = highlighter.layout_job("let x = 42;");
        assert_eq!(first.text, "let x = 42;");
        let again = highlighter.layout_job("let x = 42;");
        assert_eq!(again.text, first.text);
        assert_eq!(highlighter.layout_job("let y = 1;").text, "let y = 1;");
    }
}
