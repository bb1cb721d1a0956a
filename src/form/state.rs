use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::FormModel;

use super::{error::FormError, widget::FieldState};

/// All live widgets of a rendered form, in model order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    fields: Vec<FieldState>,
    // id -> index of the first field rendered under that id
    lookup: IndexMap<String, usize>,
    open_dropdown: Option<usize>,
}

impl FormState {
    pub fn from_model(model: &FormModel) -> Self {
        let fields: Vec<FieldState> = model
            .fields()
            .iter()
            .map(FieldState::from_descriptor)
            .collect();
        let mut lookup = IndexMap::new();
        for (idx, field) in fields.iter().enumerate() {
            lookup.entry(field.id().to_string()).or_insert(idx);
        }
        Self {
            fields,
            lookup,
            open_dropdown: None,
        }
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.lookup.get(id).map(|&idx| &self.fields[idx])
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldState> {
        let idx = *self.lookup.get(id)?;
        self.fields.get_mut(idx)
    }

    pub(crate) fn require_mut(&mut self, id: &str) -> Result<&mut FieldState, FormError> {
        self.field_mut(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))
    }

    /// Id of the dropdown currently open, if any.
    pub fn open_dropdown(&self) -> Option<&str> {
        self.open_dropdown.map(|idx| self.fields[idx].id())
    }

    /// Flip the dropdown of `id`. Opening it closes whichever other dropdown
    /// was open. Returns whether it is open afterwards.
    pub(crate) fn toggle_dropdown(&mut self, id: &str) -> Result<bool, FormError> {
        let idx = *self
            .lookup
            .get(id)
            .ok_or_else(|| FormError::UnknownField(id.to_string()))?;
        let opening = !self.fields[idx].choice()?.is_open();
        self.close_dropdowns();
        if opening {
            self.fields[idx].choice_mut()?.set_open(true);
            self.open_dropdown = Some(idx);
        }
        Ok(opening)
    }

    /// Close the open dropdown. Returns whether one was open.
    pub(crate) fn close_dropdowns(&mut self) -> bool {
        let Some(idx) = self.open_dropdown.take() else {
            return false;
        };
        if let Ok(choice) = self.fields[idx].choice_mut() {
            choice.set_open(false);
        }
        true
    }

    pub(crate) fn forget_dropdown(&mut self, id: &str) {
        if self.open_dropdown() == Some(id) {
            self.open_dropdown = None;
        }
    }

    /// Flat id -> value mapping, one entry per distinct id, in model order.
    pub fn to_data(&self) -> Map<String, Value> {
        self.lookup
            .iter()
            .map(|(id, &idx)| (id.clone(), self.fields[idx].current_value()))
            .collect()
    }

    /// Apply every entry of `data` whose key names a field. Fields applied
    /// before an error stay applied.
    pub fn seed_from_data(&mut self, data: &Map<String, Value>) -> Result<(), FormError> {
        for (id, &idx) in &self.lookup {
            if let Some(value) = data.get(id) {
                self.fields[idx].apply_value(value)?;
            }
        }
        Ok(())
    }
}
