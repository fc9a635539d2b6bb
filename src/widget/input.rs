use super::{Action, ButtonAlign, Importance, strings};
use crate::form::FormBuilder;
use crate::node::Widget;
use crate::registry::{Category, Describe};
use crate::synth::{Synthesis, literal, quoted, string_vec};
use crate::theme::Resource;
use chrono::{Datelike, NaiveDate};
use egui_extras::DatePickerButton;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Button {
    pub text: String,
    pub importance: Importance,
    pub alignment: ButtonAlign,
    pub icon: Option<Resource>,
    #[serde(skip)]
    pub action: Action,
}

impl Button {
    pub fn new(text: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self {
            text: text.into(),
            action: Action::new(action),
            ..Default::default()
        }
    }
}

impl Widget for Button {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let label = match &self.icon {
            Some(icon) if self.text.is_empty() => icon.glyph().to_owned(),
            Some(icon) => format!("{}  {}", icon.glyph(), self.text),
            None => self.text.clone(),
        };
        let mut button = egui::Button::new(label);
        if let Some(fill) = self.importance.fill(ui.visuals()) {
            button = button.fill(fill);
        }
        if self.importance == Importance::Low {
            button = button.frame(false);
        }

        let response = ui
            .with_layout(
                egui::Layout::top_down(self.alignment.align()),
                |ui| ui.add(button),
            )
            .inner;
        if response.clicked() {
            self.action.call();
        }
        response
    }
}

impl Describe for Button {
    const KIND: &'static str = "widget.Button";
    const NAME: &'static str = "Button";
    const CATEGORY: Category = Category::Widgets;
    const PROPERTIES: &'static [&'static str] = &["on_tapped"];

    fn create() -> Self {
        Self::new("Button", || {})
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.entry("Text", |w| w.text.clone(), |w, v| w.text = v)
            .choice("Importance", Importance::CHOICES, |w| w.importance, |w, v| w.importance = v)
            .toggles("Alignment", ButtonAlign::CHOICES, |w| w.alignment, |w, v| w.alignment = v)
            .icon("Icon", |w| w.icon.clone(), |w, v| w.icon = v);
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        let action = cx.action("on_tapped");
        if self.importance == Importance::default()
            && self.alignment == ButtonAlign::default()
            && self.icon.is_none()
        {
            return format!("widget::Button::new({}, {action})", quoted(&self.text));
        }
        let icon = cx.optional_icon(self.icon.as_ref());
        literal(
            "widget::Button",
            &[
                ("text", format!("{}.into()", quoted(&self.text))),
                ("importance", format!("widget::Importance::{:?}", self.importance)),
                ("alignment", format!("widget::ButtonAlign::{:?}", self.alignment)),
                ("icon", icon),
                ("action", format!("widget::Action::new({action})")),
            ],
        )
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Check {
    pub text: String,
    pub checked: bool,
    #[serde(skip)]
    pub on_changed: Action,
}

impl Check {
    pub fn new(text: impl Into<String>, on_changed: impl Fn() + 'static) -> Self {
        Self {
            text: text.into(),
            checked: false,
            on_changed: Action::new(on_changed),
        }
    }
}

impl Widget for Check {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let response = ui.checkbox(&mut self.checked, &self.text);
        if response.changed() {
            self.on_changed.call();
        }
        response
    }
}

impl Describe for Check {
    const KIND: &'static str = "widget.Check";
    const NAME: &'static str = "Check";
    const CATEGORY: Category = Category::Widgets;
    const PROPERTIES: &'static [&'static str] = &["on_changed"];

    fn create() -> Self {
        Self::new("Check", || {})
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.entry("Text", |w| w.text.clone(), |w, v| w.text = v)
            .check("Checked", |w| w.checked, |w, v| w.checked = v);
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        let action = cx.action("on_changed");
        if !self.checked {
            return format!("widget::Check::new({}, {action})", quoted(&self.text));
        }
        literal(
            "widget::Check",
            &[
                ("text", format!("{}.into()", quoted(&self.text))),
                ("checked", "true".to_owned()),
                ("on_changed", format!("widget::Action::new({action})")),
            ],
        )
    }
}

/// Calendar date picker. The date is stored as plain fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateEntry {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Default for DateEntry {
    fn default() -> Self {
        Self {
            year: 2025,
            month: 1,
            day: 1,
        }
    }
}

impl DateEntry {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// The stored date, or the first valid day before it in the same month.
    pub fn date(&self) -> NaiveDate {
        (1..=self.day.clamp(1, 31))
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(self.year, self.month.clamp(1, 12), day))
            .unwrap_or_default()
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.year = date.year();
        self.month = date.month();
        self.day = date.day();
    }
}

impl Widget for DateEntry {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let mut date = self.date();
        let salt = format!("date_entry_{:?}", ui.next_auto_id());
        let response = ui.add(DatePickerButton::new(&mut date).id_salt(&salt));
        if date != self.date() {
            self.set_date(date);
        }
        response
    }
}

impl Describe for DateEntry {
    const KIND: &'static str = "widget.DateEntry";
    const NAME: &'static str = "Date Entry";
    const CATEGORY: Category = Category::Widgets;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.parsed("Date", "date (YYYY-MM-DD)", DateEntry::date, DateEntry::set_date);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        format!(
            "widget::DateEntry::new({}, {}, {})",
            self.year, self.month, self.day
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryMode {
    #[default]
    SingleLine,
    MultiLine,
    Password,
}

impl EntryMode {
    pub const CHOICES: &'static [(&'static str, EntryMode)] = &[
        ("Single Line", EntryMode::SingleLine),
        ("Multi Line", EntryMode::MultiLine),
        ("Password", EntryMode::Password),
    ];

    fn constructor(&self) -> &'static str {
        match self {
            EntryMode::SingleLine => "new",
            EntryMode::MultiLine => "multi_line",
            EntryMode::Password => "password",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub text: String,
    pub placeholder: String,
    pub mode: EntryMode,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            mode: EntryMode::MultiLine,
            ..Default::default()
        }
    }

    pub fn password() -> Self {
        Self {
            mode: EntryMode::Password,
            ..Default::default()
        }
    }
}

impl Widget for Entry {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let edit = match self.mode {
            EntryMode::SingleLine => egui::TextEdit::singleline(&mut self.text),
            EntryMode::MultiLine => egui::TextEdit::multiline(&mut self.text).desired_rows(4),
            EntryMode::Password => egui::TextEdit::singleline(&mut self.text).password(true),
        };
        ui.add(edit.hint_text(self.placeholder.as_str()))
    }
}

impl Describe for Entry {
    const KIND: &'static str = "widget.Entry";
    const NAME: &'static str = "Entry";
    const CATEGORY: Category = Category::Widgets;

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.choice("Mode", EntryMode::CHOICES, |w| w.mode, |w, v| w.mode = v)
            .entry("Placeholder", |w| w.placeholder.clone(), |w, v| w.placeholder = v)
            .multi_line("Text", |w| w.text.clone(), |w, v| w.text = v);
    }

    fn synthesize(&self, _cx: &mut Synthesis<'_>) -> String {
        if self.text.is_empty() && self.placeholder.is_empty() {
            return format!("widget::Entry::{}()", self.mode.constructor());
        }
        literal(
            "widget::Entry",
            &[
                ("text", format!("{}.into()", quoted(&self.text))),
                ("placeholder", format!("{}.into()", quoted(&self.placeholder))),
                ("mode", format!("widget::EntryMode::{:?}", self.mode)),
            ],
        )
    }
}

/// Exclusive choice shown as radio buttons.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioGroup {
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub horizontal: bool,
    #[serde(skip)]
    pub on_changed: Action,
}

impl RadioGroup {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: strings(options),
            ..Default::default()
        }
    }

    fn set_options(&mut self, options: Vec<String>) {
        if self.selected.is_some_and(|i| i >= options.len()) {
            self.selected = None;
        }
        self.options = options;
    }
}

impl Widget for RadioGroup {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let mut picked = None;
        let mut add_buttons = |ui: &mut egui::Ui| {
            for (i, option) in self.options.iter().enumerate() {
                if ui
                    .add(egui::RadioButton::new(self.selected == Some(i), option))
                    .clicked()
                {
                    picked = Some(i);
                }
            }
        };
        let response = if self.horizontal {
            ui.horizontal(&mut add_buttons).response
        } else {
            ui.vertical(&mut add_buttons).response
        };
        if picked.is_some() && picked != self.selected {
            self.selected = picked;
            self.on_changed.call();
        }
        response
    }
}

impl Describe for RadioGroup {
    const KIND: &'static str = "widget.RadioGroup";
    const NAME: &'static str = "Radio Group";
    const CATEGORY: Category = Category::Widgets;
    const PROPERTIES: &'static [&'static str] = &["on_changed"];

    fn create() -> Self {
        Self::new(["Option A", "Option B", "Option C"])
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.list("Options", |w| w.options.clone(), RadioGroup::set_options)
            .select(
                "Selected",
                |w| {
                    let mut options = vec!["(None)".to_owned()];
                    options.extend(w.options.iter().cloned());
                    options
                },
                |w| Some(w.selected.map_or(0, |i| i + 1)),
                |w, i| w.selected = i.checked_sub(1),
            )
            .check("Horizontal", |w| w.horizontal, |w, v| w.horizontal = v);
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        let action = cx.property("on_changed");
        if self.selected.is_none() && !self.horizontal && action.is_none() {
            return format!("widget::RadioGroup::new({})", string_vec(&self.options));
        }
        literal(
            "widget::RadioGroup",
            &[
                ("options", string_vec(&self.options)),
                ("selected", format!("{:?}", self.selected)),
                ("horizontal", self.horizontal.to_string()),
                ("on_changed", format!("widget::Action::new({})", cx.action("on_changed"))),
            ],
        )
    }
}

/// Drop-down choice.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Select {
    pub options: Vec<String>,
    pub selected: Option<usize>,
    #[serde(skip)]
    pub on_changed: Action,
}

impl Select {
    pub const PLACEHOLDER: &'static str = "(Select one)";

    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: strings(options),
            ..Default::default()
        }
    }

    fn set_options(&mut self, options: Vec<String>) {
        if self.selected.is_some_and(|i| i >= options.len()) {
            self.selected = None;
        }
        self.options = options;
    }
}

impl Widget for Select {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let shown = self
            .selected
            .and_then(|i| self.options.get(i))
            .map_or(Self::PLACEHOLDER, String::as_str)
            .to_owned();
        let mut picked = self.selected;
        let response = egui::ComboBox::from_id_salt(ui.next_auto_id())
            .selected_text(shown)
            .show_ui(ui, |ui| {
                for (i, option) in self.options.iter().enumerate() {
                    ui.selectable_value(&mut picked, Some(i), option);
                }
            })
            .response;
        if picked != self.selected {
            self.selected = picked;
            self.on_changed.call();
        }
        response
    }
}

impl Describe for Select {
    const KIND: &'static str = "widget.Select";
    const NAME: &'static str = "Select";
    const CATEGORY: Category = Category::Widgets;
    const PROPERTIES: &'static [&'static str] = &["on_changed"];

    fn create() -> Self {
        Self::new(["Red", "Green", "Blue"])
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.list("Options", |w| w.options.clone(), Select::set_options)
            .select(
                "Initial Option",
                |w| {
                    let mut options = vec![Select::PLACEHOLDER.to_owned()];
                    options.extend(w.options.iter().cloned());
                    options
                },
                |w| Some(w.selected.map_or(0, |i| i + 1)),
                |w, i| w.selected = i.checked_sub(1),
            );
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        if self.selected.is_none() && cx.property("on_changed").is_none() {
            return format!("widget::Select::new({})", string_vec(&self.options));
        }
        literal(
            "widget::Select",
            &[
                ("options", string_vec(&self.options)),
                ("selected", format!("{:?}", self.selected)),
                ("on_changed", format!("widget::Action::new({})", cx.action("on_changed"))),
            ],
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Slider {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
    pub vertical: bool,
    #[serde(skip)]
    pub on_changed: Action,
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

impl Slider {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            value: min,
            step: 0.0,
            vertical: false,
            on_changed: Action::default(),
        }
    }

    fn range(&self) -> std::ops::RangeInclusive<f64> {
        if self.min <= self.max {
            self.min..=self.max
        } else {
            self.max..=self.min
        }
    }
}

impl Widget for Slider {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let range = self.range();
        let mut slider = egui::Slider::new(&mut self.value, range);
        if self.step > 0.0 {
            slider = slider.step_by(self.step);
        }
        if self.vertical {
            slider = slider.vertical();
        }
        let response = ui.add(slider);
        if response.changed() {
            self.on_changed.call();
        }
        response
    }
}

impl Describe for Slider {
    const KIND: &'static str = "widget.Slider";
    const NAME: &'static str = "Slider";
    const CATEGORY: Category = Category::Widgets;
    const PROPERTIES: &'static [&'static str] = &["on_changed"];

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.number("Min", "number", |w| w.min, |w, v| w.min = v)
            .number("Max", "number", |w| w.max, |w, v| w.max = v)
            .number("Value", "number", |w| w.value, |w, v| w.value = v)
            .number("Step", "number", |w| w.step, |w, v: f64| w.step = v.max(0.0))
            .check("Vertical", |w| w.vertical, |w, v| w.vertical = v);
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        let plain = Slider::new(self.min, self.max);
        if self.value == plain.value
            && self.step == plain.step
            && !self.vertical
            && cx.property("on_changed").is_none()
        {
            return format!("widget::Slider::new({:?}, {:?})", self.min, self.max);
        }
        literal(
            "widget::Slider",
            &[
                ("min", format!("{:?}", self.min)),
                ("max", format!("{:?}", self.max)),
                ("value", format!("{:?}", self.value)),
                ("step", format!("{:?}", self.step)),
                ("vertical", self.vertical.to_string()),
                ("on_changed", format!("widget::Action::new({})", cx.action("on_changed"))),
            ],
        )
    }
}

/// Labelled entries with submit and cancel buttons. Fields whose label
/// mentions a password are masked.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Form {
    pub fields: Vec<String>,
    #[serde(skip)]
    pub values: Vec<String>,
    #[serde(skip)]
    pub on_submit: Action,
    #[serde(skip)]
    pub on_cancel: Action,
}

impl Form {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: strings(fields),
            ..Default::default()
        }
    }

    fn is_secret(field: &str) -> bool {
        field.to_ascii_lowercase().contains("password")
    }
}

impl Widget for Form {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        self.values.resize(self.fields.len(), String::new());
        let fields = &self.fields;
        let values = &mut self.values;
        let (mut submit, mut cancel) = (false, false);
        let response = ui
            .vertical(|ui| {
                egui::Grid::new(ui.next_auto_id())
                    .num_columns(2)
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for (field, value) in fields.iter().zip(values.iter_mut()) {
                            ui.label(field.as_str());
                            ui.add(egui::TextEdit::singleline(value).password(Form::is_secret(field)));
                            ui.end_row();
                        }
                    });
                ui.horizontal(|ui| {
                    cancel = ui.button("Cancel").clicked();
                    submit = ui.button("Submit").clicked();
                });
            })
            .response;
        if submit {
            self.on_submit.call();
        }
        if cancel {
            self.on_cancel.call();
        }
        response
    }
}

impl Describe for Form {
    const KIND: &'static str = "widget.Form";
    const NAME: &'static str = "Form";
    const CATEGORY: Category = Category::Widgets;
    const PROPERTIES: &'static [&'static str] = &["on_submit", "on_cancel"];

    fn create() -> Self {
        Self::new(["Username", "Password"])
    }

    fn edit(&self, form: &mut FormBuilder<'_, Self>) {
        form.list("Fields", |w| w.fields.clone(), |w, v| w.fields = v);
    }

    fn synthesize(&self, cx: &mut Synthesis<'_>) -> String {
        if cx.property("on_submit").is_none() && cx.property("on_cancel").is_none() {
            return format!("widget::Form::new({})", string_vec(&self.fields));
        }
        literal(
            "widget::Form",
            &[
                ("fields", string_vec(&self.fields)),
                ("on_submit", format!("widget::Action::new({})", cx.action("on_submit"))),
                ("on_cancel", format!("widget::Action::new({})", cx.action("on_cancel"))),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::registry::Registry;
    use crate::synth::{CodeSynthesizer, NodeProperties};
    use crate::theme::ThemeIcons;

    fn source_of(widget: impl Widget + 'static) -> String {
        let registry = Registry::standard().unwrap();
        let properties = NodeProperties::new();
        CodeSynthesizer::new(&registry, &properties, &ThemeIcons)
            .synthesize(&Node::new(widget))
            .source
    }

    #[test]
    fn test_form_source_and_masking() {
        assert_eq!(
            source_of(Form::create()),
            "widget::Form::new(vec![\n    \"Username\".into(),\n    \"Password\".into(),\n])"
        );
        assert!(Form::is_secret("New Password"));
        assert!(!Form::is_secret("Username"));

        let registry = Registry::standard().unwrap();
        let form = Node::new(Form::create());
        let mut properties = NodeProperties::new();
        properties
            .entry(form.id())
            .or_default()
            .insert("on_submit".into(), "|| save()".into());
        let source = CodeSynthesizer::new(&registry, &properties, &ThemeIcons)
            .synthesize(&form)
            .source;
        assert!(source.contains("on_submit: widget::Action::new(|| save()),"));
        assert!(source.contains("on_cancel: widget::Action::new(|| {}),"));
    }

    #[test]
    fn test_date_entry_source_keeps_stored_fields() {
        assert_eq!(
            source_of(DateEntry::new(2025, 2, 31)),
            "widget::DateEntry::new(2025, 2, 31)"
        );
    }

    #[test]
    fn test_date_entry_clamps_invalid_days() {
        let date = DateEntry::new(2025, 2, 31).date();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

        let mut entry = DateEntry::default();
        entry.set_date(NaiveDate::from_ymd_opt(2024, 12, 24).unwrap());
        assert_eq!(entry, DateEntry::new(2024, 12, 24));
    }

    #[test]
    fn test_shrinking_options_clears_selection() {
        let mut select = Select::new(["A", "B", "C"]);
        select.selected = Some(2);
        select.set_options(vec!["A".into()]);
        assert_eq!(select.selected, None);

        let mut radio = RadioGroup::new(["A", "B"]);
        radio.selected = Some(0);
        radio.set_options(vec!["A".into()]);
        assert_eq!(radio.selected, Some(0));
    }

    #[test]
    fn test_entry_modes() {
        assert_eq!(Entry::new().mode, EntryMode::SingleLine);
        assert_eq!(Entry::multi_line().mode, EntryMode::MultiLine);
        assert_eq!(Entry::password().mode, EntryMode::Password);
    }

    #[test]
    fn test_vertical_slider_source() {
        assert_eq!(source_of(Slider::new(0.0, 5.0)), "widget::Slider::new(0.0, 5.0)");
        let slider = Slider {
            vertical: true,
            ..Slider::new(0.0, 5.0)
        };
        assert!(source_of(slider).contains("vertical: true,"));
    }

    #[test]
    fn test_slider_range_tolerates_swapped_bounds() {
        let slider = Slider::new(10.0, 0.0);
        assert_eq!(slider.range(), 0.0..=10.0);
        assert_eq!(slider.value, 10.0);
    }
}
