//! Property edit forms.
//!
//! A kind declares its editable properties once through [`FormBuilder`];
//! the result is an [`EditForm`], an ordered list of labelled controls bound
//! to one live node. The form is retained between frames so that typed text,
//! mirrored controls and toggle groups keep consistent state.

use crate::node::{Node, NodeId, Widget};
use crate::registry::Describe;
use crate::theme::{IconCatalog, Resource};
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

pub const NO_ICON: &str = "(No Icon)";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("'{input}' is not a valid {expected}")]
    Malformed {
        input: String,
        expected: &'static str,
    },
    #[error("option {0} is out of range")]
    OutOfRange(usize),
    #[error("control expected {expected} input")]
    WrongInput { expected: &'static str },
    #[error("form for node {form} cannot edit node {node}")]
    WrongNode { form: NodeId, node: NodeId },
    #[error("widget is not a {0}")]
    KindMismatch(&'static str),
    #[error("no property at index {0}")]
    NoSuchProperty(usize),
}

/// Current state of one interactive control.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    Entry { text: String },
    MultiLine { text: String },
    Check { checked: bool },
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
    /// Mutually exclusive button group. The active member is emphasized.
    Toggles {
        options: Vec<&'static str>,
        active: usize,
    },
}

impl Control {
    /// Whether toggle `index` is drawn with emphasis.
    pub fn emphasized(&self, index: usize) -> bool {
        matches!(self, Control::Toggles { active, .. } if *active == index)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Control::Entry { text } | Control::MultiLine { text } => Some(text),
            _ => None,
        }
    }
}

/// A user edit, as delivered by a control.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Text(String),
    Checked(bool),
    Selected(usize),
    Toggled(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// The node changed; generated source is stale.
    Changed,
    /// The set of properties depends on the edited value; rebuild the form.
    FormsChanged,
}

type Reader = Box<dyn Fn(&dyn Widget) -> Option<Control>>;
type Writer = Box<dyn Fn(&mut dyn Widget, &Input) -> Result<(), EditError>>;

struct Property {
    label: &'static str,
    control: Control,
    read: Reader,
    write: Writer,
    rebuilds_form: bool,
}

fn reader<T: Widget + 'static>(read: impl Fn(&T) -> Control + 'static) -> Reader {
    Box::new(move |widget| widget.as_any().downcast_ref::<T>().map(&read))
}

fn writer<T: Describe>(
    write: impl Fn(&mut T, &Input) -> Result<(), EditError> + 'static,
) -> Writer {
    Box::new(move |widget, input| {
        let typed = widget
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(EditError::KindMismatch(T::KIND))?;
        write(typed, input)
    })
}

fn text_input(input: &Input) -> Result<&str, EditError> {
    match input {
        Input::Text(text) => Ok(text),
        _ => Err(EditError::WrongInput { expected: "text" }),
    }
}

/// Splits newline-joined list text.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_owned).collect()
}

/// Declares the properties of one kind. Handed to [`Describe::edit`].
pub struct FormBuilder<'a, T> {
    icons: &'a dyn IconCatalog,
    properties: Vec<Property>,
    _kind: PhantomData<fn(&T)>,
}

impl<'a, T: Describe> FormBuilder<'a, T> {
    pub fn new(icons: &'a dyn IconCatalog) -> Self {
        Self {
            icons,
            properties: Vec::new(),
            _kind: PhantomData,
        }
    }

    fn push(&mut self, label: &'static str, control: Control, read: Reader, write: Writer) -> &mut Self {
        self.properties.push(Property {
            label,
            control,
            read,
            write,
            rebuilds_form: false,
        });
        self
    }

    /// Single line text.
    pub fn entry(
        &mut self,
        label: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> &mut Self {
        self.push(
            label,
            Control::Entry {
                text: String::new(),
            },
            reader(move |w: &T| Control::Entry { text: get(w) }),
            writer(move |w: &mut T, input| {
                set(w, text_input(input)?.to_owned());
                Ok(())
            }),
        )
    }

    /// Single line text parsed into `V`. Unparsable input is dropped.
    pub fn parsed<V>(
        &mut self,
        label: &'static str,
        expected: &'static str,
        get: fn(&T) -> V,
        set: fn(&mut T, V),
    ) -> &mut Self
    where
        V: FromStr + Display + 'static,
    {
        self.parsed_if(label, expected, get, set, |_| true)
    }

    /// Floating point entry. `NaN` and infinities are dropped like any other
    /// malformed input.
    pub fn number<V>(
        &mut self,
        label: &'static str,
        expected: &'static str,
        get: fn(&T) -> V,
        set: fn(&mut T, V),
    ) -> &mut Self
    where
        V: FromStr + Display + Copy + Into<f64> + 'static,
    {
        self.parsed_if(label, expected, get, set, |v: &V| Into::<f64>::into(*v).is_finite())
    }

    fn parsed_if<V>(
        &mut self,
        label: &'static str,
        expected: &'static str,
        get: fn(&T) -> V,
        set: fn(&mut T, V),
        accept: fn(&V) -> bool,
    ) -> &mut Self
    where
        V: FromStr + Display + 'static,
    {
        self.push(
            label,
            Control::Entry {
                text: String::new(),
            },
            reader(move |w: &T| Control::Entry {
                text: get(w).to_string(),
            }),
            writer(move |w: &mut T, input| {
                let text = text_input(input)?;
                let value = text
                    .trim()
                    .parse::<V>()
                    .ok()
                    .filter(accept)
                    .ok_or_else(|| EditError::Malformed {
                        input: text.to_owned(),
                        expected,
                    })?;
                set(w, value);
                Ok(())
            }),
        )
    }

    pub fn multi_line(
        &mut self,
        label: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> &mut Self {
        self.push(
            label,
            Control::MultiLine {
                text: String::new(),
            },
            reader(move |w: &T| Control::MultiLine { text: get(w) }),
            writer(move |w: &mut T, input| {
                set(w, text_input(input)?.to_owned());
                Ok(())
            }),
        )
    }

    /// List value edited as newline-joined text.
    pub fn list(
        &mut self,
        label: &'static str,
        get: fn(&T) -> Vec<String>,
        set: fn(&mut T, Vec<String>),
    ) -> &mut Self {
        self.push(
            label,
            Control::MultiLine {
                text: String::new(),
            },
            reader(move |w: &T| Control::MultiLine {
                text: get(w).join("\n"),
            }),
            writer(move |w: &mut T, input| {
                set(w, split_lines(text_input(input)?));
                Ok(())
            }),
        )
    }

    pub fn check(
        &mut self,
        label: &'static str,
        get: fn(&T) -> bool,
        set: fn(&mut T, bool),
    ) -> &mut Self {
        self.push(
            label,
            Control::Check { checked: false },
            reader(move |w: &T| Control::Check { checked: get(w) }),
            writer(move |w: &mut T, input| match input {
                Input::Checked(on) => {
                    set(w, *on);
                    Ok(())
                }
                _ => Err(EditError::WrongInput { expected: "checked" }),
            }),
        )
    }

    /// Choice among options derived from the node itself.
    pub fn select(
        &mut self,
        label: &'static str,
        options: fn(&T) -> Vec<String>,
        get: fn(&T) -> Option<usize>,
        set: fn(&mut T, usize),
    ) -> &mut Self {
        self.push(
            label,
            Control::Select {
                options: Vec::new(),
                selected: None,
            },
            reader(move |w: &T| Control::Select {
                options: options(w),
                selected: get(w),
            }),
            writer(move |w: &mut T, input| match input {
                Input::Selected(index) if *index < options(w).len() => {
                    set(w, *index);
                    Ok(())
                }
                Input::Selected(index) => Err(EditError::OutOfRange(*index)),
                _ => Err(EditError::WrongInput { expected: "selected" }),
            }),
        )
    }

    /// Choice among a fixed set of values.
    pub fn choice<E>(
        &mut self,
        label: &'static str,
        choices: &'static [(&'static str, E)],
        get: fn(&T) -> E,
        set: fn(&mut T, E),
    ) -> &mut Self
    where
        E: Copy + PartialEq + 'static,
    {
        self.push(
            label,
            Control::Select {
                options: Vec::new(),
                selected: None,
            },
            reader(move |w: &T| Control::Select {
                options: choices.iter().map(|(name, _)| (*name).to_owned()).collect(),
                selected: choices.iter().position(|(_, value)| *value == get(w)),
            }),
            writer(move |w: &mut T, input| match input {
                Input::Selected(index) => {
                    let (_, value) = choices.get(*index).ok_or(EditError::OutOfRange(*index))?;
                    set(w, *value);
                    Ok(())
                }
                _ => Err(EditError::WrongInput { expected: "selected" }),
            }),
        )
    }

    /// Mutually exclusive button group over a fixed set of values.
    pub fn toggles<E>(
        &mut self,
        label: &'static str,
        choices: &'static [(&'static str, E)],
        get: fn(&T) -> E,
        set: fn(&mut T, E),
    ) -> &mut Self
    where
        E: Copy + PartialEq + 'static,
    {
        self.push(
            label,
            Control::Toggles {
                options: choices.iter().map(|(name, _)| *name).collect(),
                active: 0,
            },
            reader(move |w: &T| Control::Toggles {
                options: choices.iter().map(|(name, _)| *name).collect(),
                active: choices
                    .iter()
                    .position(|(_, value)| *value == get(w))
                    .unwrap_or(0),
            }),
            writer(move |w: &mut T, input| match input {
                Input::Toggled(index) => {
                    let (_, value) = choices.get(*index).ok_or(EditError::OutOfRange(*index))?;
                    set(w, *value);
                    Ok(())
                }
                _ => Err(EditError::WrongInput { expected: "toggled" }),
            }),
        )
    }

    /// Icon picker over the catalog, with a leading "(No Icon)" option.
    pub fn icon(
        &mut self,
        label: &'static str,
        get: fn(&T) -> Option<Resource>,
        set: fn(&mut T, Option<Resource>),
    ) -> &mut Self {
        let entries: Vec<(String, Resource)> = self
            .icons
            .names()
            .into_iter()
            .filter_map(|name| Some((name.to_owned(), self.icons.lookup(name)?)))
            .collect();
        let mut options = vec![NO_ICON.to_owned()];
        options.extend(entries.iter().map(|(name, _)| name.clone()));
        let lookup = entries.clone();

        self.push(
            label,
            Control::Select {
                options: options.clone(),
                selected: Some(0),
            },
            reader(move |w: &T| Control::Select {
                options: options.clone(),
                selected: match get(w) {
                    None => Some(0),
                    Some(resource) => entries
                        .iter()
                        .position(|(_, r)| *r == resource)
                        .map(|i| i + 1),
                },
            }),
            writer(move |w: &mut T, input| match input {
                Input::Selected(0) => {
                    set(w, None);
                    Ok(())
                }
                Input::Selected(index) => {
                    let (_, resource) = lookup
                        .get(index - 1)
                        .ok_or(EditError::OutOfRange(*index))?;
                    set(w, Some(resource.clone()));
                    Ok(())
                }
                _ => Err(EditError::WrongInput { expected: "selected" }),
            }),
        )
    }

    /// Marks the most recent property as one whose edits change the form.
    pub fn rebuilds_form(&mut self) -> &mut Self {
        if let Some(property) = self.properties.last_mut() {
            property.rebuilds_form = true;
        }
        self
    }

    /// Populates every control from `node`, then runs one synchronized pass
    /// over the toggle groups before edits start notifying.
    pub fn finish(self, node: &Node, notify: &mut dyn FnMut(FormEvent)) -> EditForm {
        let mut form = EditForm {
            node: node.id(),
            properties: self.properties,
            ready: false,
        };
        form.refresh(node);

        for index in 0..form.properties.len() {
            if let Control::Toggles { active, .. } = form.properties[index].control
                && let Err(err) = form.edit(index, Input::Toggled(active), node, notify)
            {
                log::warn!("initial state for {:?} failed: {err}", form.properties[index].label);
            }
        }

        form.ready = true;
        form
    }
}

/// Labelled controls bound to one node.
pub struct EditForm {
    node: NodeId,
    properties: Vec<Property>,
    ready: bool,
}

impl EditForm {
    /// A form with no properties, for kinds without editable state.
    pub fn empty(node: &Node) -> Self {
        Self {
            node: node.id(),
            properties: Vec::new(),
            ready: true,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn items(&self) -> impl Iterator<Item = (&'static str, &Control)> {
        self.properties.iter().map(|p| (p.label, &p.control))
    }

    pub fn control(&self, index: usize) -> Option<&Control> {
        self.properties.get(index).map(|p| &p.control)
    }

    /// Index of the property with `label`.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.label == label)
    }

    /// Re-reads every control from the node.
    pub fn refresh(&mut self, node: &Node) {
        self.refresh_except(node, None);
    }

    fn refresh_except(&mut self, node: &Node, skip: Option<usize>) {
        let widget = node.widget();
        for (index, property) in self.properties.iter_mut().enumerate() {
            if Some(index) == skip {
                continue;
            }
            if let Some(control) = (property.read)(&*widget) {
                property.control = control;
            }
        }
    }

    /// Applies one user edit to the node.
    ///
    /// On success the node is mutated, every other control is re-read from it
    /// and, once the form is ready, `notify` receives [`FormEvent::Changed`].
    /// On failure nothing is mutated, nothing is notified and the control is
    /// restored to the node's current value.
    pub fn edit(
        &mut self,
        index: usize,
        input: Input,
        node: &Node,
        notify: &mut dyn FnMut(FormEvent),
    ) -> Result<(), EditError> {
        if node.id() != self.node {
            return Err(EditError::WrongNode {
                form: self.node,
                node: node.id(),
            });
        }
        let property = self
            .properties
            .get(index)
            .ok_or(EditError::NoSuchProperty(index))?;

        let result = {
            let mut widget = node.widget_mut();
            (property.write)(&mut *widget, &input)
        };

        match result {
            Ok(()) => {
                let rebuilds = property.rebuilds_form;
                match input {
                    Input::Text(text) => {
                        if let Control::Entry { text: shown } | Control::MultiLine { text: shown } =
                            &mut self.properties[index].control
                        {
                            *shown = text;
                        }
                        self.refresh_except(node, Some(index));
                    }
                    _ => self.refresh(node),
                }
                if self.ready {
                    notify(FormEvent::Changed);
                    if rebuilds {
                        notify(FormEvent::FormsChanged);
                    }
                }
                Ok(())
            }
            Err(err) => {
                let widget = node.widget();
                if let Some(control) = (self.properties[index].read)(&*widget) {
                    self.properties[index].control = control;
                }
                Err(err)
            }
        }
    }

    /// Draws the form and applies any edit made this frame.
    pub fn ui(&mut self, ui: &mut egui::Ui, node: &Node, notify: &mut dyn FnMut(FormEvent)) {
        let mut edit = None;
        egui::Grid::new(("edit_form", self.node))
            .num_columns(2)
            .spacing([8.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for (index, property) in self.properties.iter_mut().enumerate() {
                    ui.label(property.label);
                    if let Some(input) = control_ui(ui, (self.node, index), &mut property.control) {
                        edit = Some((index, input));
                    }
                    ui.end_row();
                }
            });

        if let Some((index, input)) = edit
            && let Err(err) = self.edit(index, input, node, notify)
        {
            log::warn!("edit dropped: {err}");
        }
    }
}

fn control_ui(ui: &mut egui::Ui, salt: (NodeId, usize), control: &mut Control) -> Option<Input> {
    match control {
        Control::Entry { text } => {
            let mut buf = text.clone();
            ui.text_edit_singleline(&mut buf)
                .changed()
                .then_some(Input::Text(buf))
        }
        Control::MultiLine { text } => {
            let mut buf = text.clone();
            ui.add(egui::TextEdit::multiline(&mut buf).desired_rows(4))
                .changed()
                .then_some(Input::Text(buf))
        }
        Control::Check { checked } => {
            let mut on = *checked;
            ui.checkbox(&mut on, "")
                .changed()
                .then_some(Input::Checked(on))
        }
        Control::Select { options, selected } => {
            let shown = selected
                .and_then(|i| options.get(i))
                .cloned()
                .unwrap_or_default();
            let mut picked = None;
            egui::ComboBox::from_id_salt(salt)
                .selected_text(shown)
                .show_ui(ui, |ui| {
                    for (i, option) in options.iter().enumerate() {
                        if ui
                            .selectable_label(*selected == Some(i), option)
                            .clicked()
                        {
                            picked = Some(i);
                        }
                    }
                });
            picked.map(Input::Selected)
        }
        Control::Toggles { options, active } => {
            let mut picked = None;
            ui.horizontal(|ui| {
                for (i, option) in options.iter().enumerate() {
                    if ui
                        .add(egui::Button::selectable(*active == i, *option))
                        .clicked()
                    {
                        picked = Some(i);
                    }
                }
            });
            picked.map(Input::Toggled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeIcons;
    use crate::widget::{Button, ButtonAlign, Importance, Label, ProgressBar, Select, Slider};
    use crate::registry::{Descriptor, WidgetDescriptor};

    fn form_for<T: Describe>(node: &Node, notified: &mut Vec<FormEvent>) -> EditForm {
        Descriptor::<T>::new().edit(node, &ThemeIcons, &mut |e| notified.push(e))
    }

    #[test]
    fn test_initial_population_does_not_notify() {
        let node = Node::new(Button::new("Go", || {}));
        let mut events = Vec::new();
        let form = form_for::<Button>(&node, &mut events);
        assert!(form.is_ready());
        assert!(events.is_empty());

        let text = form.position("Text").unwrap();
        assert_eq!(form.control(text).and_then(Control::text), Some("Go"));
    }

    #[test]
    fn test_edit_mutates_and_notifies() {
        let node = Node::new(Label::new("Before"));
        let mut events = Vec::new();
        let mut form = form_for::<Label>(&node, &mut Vec::new());
        let text = form.position("Text").unwrap();

        form.edit(text, Input::Text("After".into()), &node, &mut |e| events.push(e))
            .unwrap();

        assert_eq!(node.downcast::<Label>().unwrap().text, "After");
        assert_eq!(events, vec![FormEvent::Changed]);
    }

    #[test]
    fn test_toggle_group_emphasis_follows_every_change() {
        let node = Node::new(Button::new("Go", || {}));
        let mut form = form_for::<Button>(&node, &mut Vec::new());
        let align = form.position("Alignment").unwrap();

        let emphasis = |form: &EditForm| {
            let control = form.control(align).unwrap();
            (0..3).map(|i| control.emphasized(i)).collect::<Vec<_>>()
        };
        assert_eq!(emphasis(&form), vec![false, true, false]);

        form.edit(align, Input::Toggled(2), &node, &mut |_| {}).unwrap();
        assert_eq!(emphasis(&form), vec![false, false, true]);
        assert_eq!(node.downcast::<Button>().unwrap().alignment, ButtonAlign::Trailing);

        form.edit(align, Input::Toggled(0), &node, &mut |_| {}).unwrap();
        assert_eq!(emphasis(&form), vec![true, false, false]);
    }

    #[test]
    fn test_malformed_input_is_dropped() {
        let node = Node::new(ProgressBar::with_value(0.25));
        let mut events = Vec::new();
        let mut form = form_for::<ProgressBar>(&node, &mut Vec::new());
        let value = form.position("Value").unwrap();

        let result = form.edit(value, Input::Text("abc".into()), &node, &mut |e| events.push(e));

        assert!(matches!(result, Err(EditError::Malformed { .. })));
        assert!(events.is_empty());
        assert_eq!(node.downcast::<ProgressBar>().unwrap().value, 0.25);
        assert_eq!(form.control(value).and_then(Control::text), Some("0.25"));
    }

    fn assert_rejects_non_finite<T: Describe>(labels: &[&str]) {
        let node = Node::new(T::create());
        let descriptor = Descriptor::<T>::new();
        let before = descriptor.encode(&node).unwrap();
        let mut form = form_for::<T>(&node, &mut Vec::new());

        for label in labels {
            let index = form.position(label).unwrap();
            for text in ["NaN", "inf", "-infinity"] {
                let mut events = Vec::new();
                let result =
                    form.edit(index, Input::Text(text.into()), &node, &mut |e| events.push(e));
                assert!(
                    matches!(result, Err(EditError::Malformed { .. })),
                    "{} {label} accepted {text}",
                    T::KIND
                );
                assert!(events.is_empty());
            }
        }
        assert_eq!(descriptor.encode(&node).unwrap(), before);
    }

    #[test]
    fn test_numbers_must_be_finite() {
        assert_rejects_non_finite::<ProgressBar>(&["Value"]);
        assert_rejects_non_finite::<Slider>(&["Min", "Max", "Value", "Step"]);
        assert_rejects_non_finite::<crate::layout::Spacer>(&["Size"]);
        assert_rejects_non_finite::<crate::graphics::Rectangle>(&[
            "Stroke Width",
            "Width",
            "Height",
        ]);
        assert_rejects_non_finite::<crate::graphics::Circle>(&["Stroke Width", "Radius"]);
        assert_rejects_non_finite::<crate::graphics::Text>(&["Size"]);
    }

    #[test]
    fn test_finite_numbers_still_parse() {
        let node = Node::new(Slider::new(0.0, 10.0));
        let mut form = form_for::<Slider>(&node, &mut Vec::new());
        let max = form.position("Max").unwrap();
        form.edit(max, Input::Text(" 1e3 ".into()), &node, &mut |_| {})
            .unwrap();
        assert_eq!(node.downcast::<Slider>().unwrap().max, 1000.0);
    }

    #[test]
    fn test_list_edit_resynchronizes_mirror() {
        let node = Node::new(Select::new(["A", "B"]));
        let mut form = form_for::<Select>(&node, &mut Vec::new());
        let options = form.position("Options").unwrap();
        let initial = form.position("Initial Option").unwrap();

        form.edit(options, Input::Text("A\nB\nC".into()), &node, &mut |_| {})
            .unwrap();

        assert_eq!(node.downcast::<Select>().unwrap().options, vec!["A", "B", "C"]);
        match form.control(initial) {
            Some(Control::Select { options, .. }) => {
                assert_eq!(options, &vec!["(Select one)", "A", "B", "C"]);
            }
            other => panic!("unexpected control {other:?}"),
        }
        assert_eq!(form.control(options).and_then(Control::text), Some("A\nB\nC"));
    }

    #[test]
    fn test_choice_and_wrong_node() {
        let node = Node::new(Button::new("Go", || {}));
        let other = Node::new(Button::new("Other", || {}));
        let mut form = form_for::<Button>(&node, &mut Vec::new());
        let importance = form.position("Importance").unwrap();

        form.edit(importance, Input::Selected(1), &node, &mut |_| {}).unwrap();
        assert_eq!(node.downcast::<Button>().unwrap().importance, Importance::High);

        assert!(matches!(
            form.edit(importance, Input::Selected(0), &other, &mut |_| {}),
            Err(EditError::WrongNode { .. })
        ));
        assert!(matches!(
            form.edit(importance, Input::Selected(99), &node, &mut |_| {}),
            Err(EditError::OutOfRange(99))
        ));
        assert_eq!(node.downcast::<Button>().unwrap().importance, Importance::High);
    }

    #[test]
    fn test_icon_picker() {
        let node = Node::new(Button::new("Go", || {}));
        let mut form = form_for::<Button>(&node, &mut Vec::new());
        let icon = form.position("Icon").unwrap();
        let help = ThemeIcons
            .names()
            .iter()
            .position(|n| *n == "HelpIcon")
            .unwrap()
            + 1;

        form.edit(icon, Input::Selected(help), &node, &mut |_| {}).unwrap();
        assert_eq!(
            node.downcast::<Button>().unwrap().icon,
            Some(crate::theme::help_icon())
        );

        form.edit(icon, Input::Selected(0), &node, &mut |_| {}).unwrap();
        assert_eq!(node.downcast::<Button>().unwrap().icon, None);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines(""), vec![""]);
    }
}
