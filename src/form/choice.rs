use crate::domain::{ChoiceField, ChoiceOption};

pub const PLACEHOLDER_LABEL: &str = "please select";

/// Live state of a choice field: the hidden control value plus the custom
/// dropdown shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceWidget {
    options: Vec<ChoiceOption>,
    value: String,
    display_label: String,
    highlighted: Option<usize>,
    open: bool,
}

impl ChoiceWidget {
    /// Selects the option matching the descriptor default. Without a match
    /// the first option is shown (and becomes the control value) but no
    /// option is highlighted.
    pub fn new(field: &ChoiceField) -> Self {
        let matched = field
            .default
            .as_deref()
            .and_then(|default| field.position_of(default));
        let shown = matched.or_else(|| (!field.options.is_empty()).then_some(0));
        let (value, display_label) = match shown {
            Some(idx) => (
                field.options[idx].value.clone(),
                field.options[idx].label.clone(),
            ),
            None => (String::new(), PLACEHOLDER_LABEL.to_string()),
        };
        Self {
            options: field.options.clone(),
            value,
            display_label,
            highlighted: matched,
            open: false,
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Pick an option from the dropdown. Closes the dropdown either way;
    /// returns whether an option existed at `index`.
    pub fn select(&mut self, index: usize) -> bool {
        self.open = false;
        let Some(option) = self.options.get(index) else {
            return false;
        };
        self.value = option.value.clone();
        self.display_label = option.label.clone();
        self.highlighted = Some(index);
        true
    }

    /// Set the control value verbatim and resynchronise the dropdown. An
    /// unknown value keeps the previous label and clears the highlight.
    pub fn set_value(&mut self, value: String) {
        let matched = self.options.iter().position(|option| option.value == value);
        if let Some(idx) = matched {
            self.display_label = self.options[idx].label.clone();
        }
        self.highlighted = matched;
        self.value = value;
    }
}
