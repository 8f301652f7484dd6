//! The presentation surface the page controllers draw on.
//!
//! Controllers never look controls up by string; they go through [`Surface`],
//! which keeps them usable with the terminal front end and with
//! [`MemorySurface`] in tests.
use std::collections::{HashMap, HashSet};

use super::validation::DocumentField;

/// Text fields and togglable sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    SelectSubject,
    SelectDate,
    SelectInspectors,
    Editable,
    InfoInspected,
    InfoDepartment,
    InfoSubject,
    InfoDate,
    InfoInspectors,
    InfoSubjectCode,
    InspectedName,
    InspectedDepartment,
    InspectionDate,
    InspectedSubject,
    InspectedSubjectCode,
    Inspectors,
    Message,
    ChosenSemester,
    ScheduleList,
}

/// The five fields of the term summary panel, cleared on every picker change.
pub const RESULT_FIELDS: [Control; 5] = [
    Control::InfoInspected,
    Control::InfoDepartment,
    Control::InfoSubject,
    Control::InfoDate,
    Control::InfoInspectors,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Picker {
    Teacher,
    Subject,
    Date,
    Team,
    Semester,
    AddMember(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListId {
    Items,
    Teams,
    TeamMembers(u32),
    Schedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub text: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        SelectOption {
            text: text.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub key: String,
    pub text: String,
    pub visible: bool,
}

pub trait Surface {
    fn set_text(&mut self, control: Control, text: &str);
    fn set_visible(&mut self, control: Control, visible: bool);
    /// Drops every option; a placeholder, when given, becomes the only option
    /// and carries an empty value.
    fn reset_options(&mut self, picker: Picker, placeholder: Option<&str>);
    fn append_options(&mut self, picker: Picker, options: Vec<SelectOption>);
    /// Selects the option with this value, or the first option for `None`.
    fn select_value(&mut self, picker: Picker, value: Option<&str>);
    fn input_value(&self, field: DocumentField) -> String;
    fn set_input_value(&mut self, field: DocumentField, value: &str);
    fn mark_invalid(&mut self, field: DocumentField, invalid: bool);
    fn render_list(&mut self, list: ListId, items: Vec<ListItem>);
}

#[derive(Debug, Default, Clone)]
struct PickerState {
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

/// Surface kept entirely in memory. Controls start hidden and empty.
#[derive(Debug, Default, Clone)]
pub struct MemorySurface {
    texts: HashMap<Control, String>,
    visible: HashMap<Control, bool>,
    pickers: HashMap<Picker, PickerState>,
    inputs: HashMap<DocumentField, String>,
    invalid: HashSet<DocumentField>,
    lists: HashMap<ListId, Vec<ListItem>>,
}

impl MemorySurface {
    pub fn text(&self, control: Control) -> &str {
        self.texts.get(&control).map(String::as_str).unwrap_or("")
    }

    pub fn is_visible(&self, control: Control) -> bool {
        self.visible.get(&control).copied().unwrap_or(false)
    }

    pub fn options(&self, picker: Picker) -> &[SelectOption] {
        self.pickers
            .get(&picker)
            .map(|state| state.options.as_slice())
            .unwrap_or(&[])
    }

    /// Options with a value, i.e. without the placeholder.
    pub fn choices(&self, picker: Picker) -> Vec<&SelectOption> {
        self.options(picker)
            .iter()
            .filter(|option| !option.value.is_empty())
            .collect()
    }

    pub fn selected_value(&self, picker: Picker) -> Option<&str> {
        let state = self.pickers.get(&picker)?;
        let option = state.options.get(state.selected?)?;
        Some(option.value.as_str())
    }

    pub fn has_picker(&self, picker: Picker) -> bool {
        self.pickers.contains_key(&picker)
    }

    pub fn is_marked_invalid(&self, field: DocumentField) -> bool {
        self.invalid.contains(&field)
    }

    pub fn list(&self, list: ListId) -> &[ListItem] {
        self.lists.get(&list).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn visible_texts(&self, list: ListId) -> Vec<&str> {
        self.list(list)
            .iter()
            .filter(|item| item.visible)
            .map(|item| item.text.as_str())
            .collect()
    }
}

impl Surface for MemorySurface {
    fn set_text(&mut self, control: Control, text: &str) {
        self.texts.insert(control, text.to_owned());
    }

    fn set_visible(&mut self, control: Control, visible: bool) {
        self.visible.insert(control, visible);
    }

    fn reset_options(&mut self, picker: Picker, placeholder: Option<&str>) {
        let state = self.pickers.entry(picker).or_default();
        state.options.clear();
        state.selected = None;
        if let Some(text) = placeholder {
            state.options.push(SelectOption::new(text, ""));
        }
    }

    fn append_options(&mut self, picker: Picker, options: Vec<SelectOption>) {
        self.pickers
            .entry(picker)
            .or_default()
            .options
            .extend(options);
    }

    fn select_value(&mut self, picker: Picker, value: Option<&str>) {
        let state = self.pickers.entry(picker).or_default();
        state.selected = match value {
            Some(value) => state
                .options
                .iter()
                .position(|option| option.value == value),
            None if state.options.is_empty() => None,
            None => Some(0),
        };
    }

    fn input_value(&self, field: DocumentField) -> String {
        self.inputs.get(&field).cloned().unwrap_or_default()
    }

    fn set_input_value(&mut self, field: DocumentField, value: &str) {
        self.inputs.insert(field, value.to_owned());
    }

    fn mark_invalid(&mut self, field: DocumentField, invalid: bool) {
        if invalid {
            self.invalid.insert(field);
        } else {
            self.invalid.remove(&field);
        }
    }

    fn render_list(&mut self, list: ListId, items: Vec<ListItem>) {
        self.lists.insert(list, items);
    }
}
