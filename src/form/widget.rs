use serde_json::Value;

use crate::domain::{FieldDescriptor, FieldKind};

use super::{
    choice::ChoiceWidget,
    convert::{item_text, truthy, value_to_text},
    error::FormError,
    sortable::SortableListState,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TextWidget {
    value: String,
    placeholder: String,
}

impl TextWidget {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleWidget {
    checked: bool,
}

impl ToggleWidget {
    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn flip(&mut self) -> bool {
        self.checked = !self.checked;
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    Text(TextWidget),
    Choice(ChoiceWidget),
    Toggle(ToggleWidget),
    OrderedList(SortableListState),
}

impl FieldWidget {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldWidget::Text(_) => FieldKind::Text,
            FieldWidget::Choice(_) => FieldKind::Choice,
            FieldWidget::Toggle(_) => FieldKind::Toggle,
            FieldWidget::OrderedList(_) => FieldKind::OrderedList,
        }
    }
}

/// A rendered field: its descriptor and the live widget built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    descriptor: FieldDescriptor,
    widget: FieldWidget,
}

macro_rules! widget_accessors {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self) -> Result<&$ty, FormError> {
            match &self.widget {
                FieldWidget::$variant(widget) => Ok(widget),
                other => Err(mismatch(self.descriptor.id(), FieldKind::$variant, other.kind())),
            }
        }

        pub fn $get_mut(&mut self) -> Result<&mut $ty, FormError> {
            let id = self.descriptor.id();
            match &mut self.widget {
                FieldWidget::$variant(widget) => Ok(widget),
                other => Err(mismatch(id, FieldKind::$variant, other.kind())),
            }
        }
    };
}

impl FieldState {
    pub fn from_descriptor(descriptor: &FieldDescriptor) -> Self {
        let widget = match descriptor {
            FieldDescriptor::Text(field) => FieldWidget::Text(TextWidget {
                value: field.default.clone(),
                placeholder: field.placeholder.clone(),
            }),
            FieldDescriptor::Choice(field) => FieldWidget::Choice(ChoiceWidget::new(field)),
            FieldDescriptor::Toggle(field) => FieldWidget::Toggle(ToggleWidget {
                checked: field.default,
            }),
            FieldDescriptor::OrderedList(field) => FieldWidget::OrderedList(
                SortableListState::new(&field.id, &field.item_placeholder, &field.default),
            ),
        };
        Self {
            descriptor: descriptor.clone(),
            widget,
        }
    }

    pub fn id(&self) -> &str {
        self.descriptor.id()
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn widget(&self) -> &FieldWidget {
        &self.widget
    }

    widget_accessors!(text, text_mut, Text, TextWidget);
    widget_accessors!(choice, choice_mut, Choice, ChoiceWidget);
    widget_accessors!(toggle, toggle_mut, Toggle, ToggleWidget);
    widget_accessors!(list, list_mut, OrderedList, SortableListState);

    /// Current value as it appears in the serialized data object.
    pub fn current_value(&self) -> Value {
        match &self.widget {
            FieldWidget::Text(text) => Value::String(text.value.clone()),
            FieldWidget::Choice(choice) => Value::String(choice.value().to_string()),
            FieldWidget::Toggle(toggle) => Value::Bool(toggle.checked),
            FieldWidget::OrderedList(list) => Value::Array(
                list.collect_values()
                    .into_iter()
                    .map(Value::String)
                    .collect(),
            ),
        }
    }

    /// Apply an externally supplied value onto the widget.
    pub fn apply_value(&mut self, value: &Value) -> Result<(), FormError> {
        match (&self.descriptor, &mut self.widget) {
            (FieldDescriptor::Text(_), FieldWidget::Text(text)) => {
                text.value = value_to_text(value);
            }
            (FieldDescriptor::Choice(_), FieldWidget::Choice(choice)) => {
                choice.set_value(value_to_text(value));
            }
            (FieldDescriptor::Toggle(_), FieldWidget::Toggle(toggle)) => {
                toggle.checked = truthy(value);
            }
            (FieldDescriptor::OrderedList(_), FieldWidget::OrderedList(list)) => {
                let values = match value {
                    Value::Array(items) => items.iter().map(item_text).collect(),
                    _ => Vec::new(),
                };
                list.replace_all(values);
            }
            (descriptor, widget) => {
                return Err(mismatch(descriptor.id(), descriptor.kind(), widget.kind()));
            }
        }
        Ok(())
    }
}

fn mismatch(id: &str, expected: FieldKind, actual: FieldKind) -> FormError {
    FormError::KindMismatch {
        id: id.to_string(),
        expected,
        actual,
    }
}
