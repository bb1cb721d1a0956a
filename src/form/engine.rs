use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    domain::FormModel,
    notify::{Notification, Notifier},
};

use super::{
    actions::{FieldChange, FormCommand},
    convert::kind_name,
    error::FormError,
    projection::{Container, FieldNode},
    sortable::{ItemKey, SortableListState},
    state::FormState,
};

/// Turns a [`FormModel`] into live widget state and back into data.
#[derive(Debug, Clone)]
pub struct FormEngine {
    model: FormModel,
    state: FormState,
}

impl FormEngine {
    pub fn new(model: FormModel) -> Self {
        let state = FormState::from_model(&model);
        Self { model, state }
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Tear down all widget state, rebuild it from the model and project the
    /// result into `container`.
    pub fn render<C: Container + ?Sized>(&mut self, container: &mut C) {
        let duplicates = self.model.duplicate_ids();
        if !duplicates.is_empty() {
            warn!(ids = ?duplicates, "duplicate field ids, lookups resolve to the first field");
        }
        self.state = FormState::from_model(&self.model);
        self.project(container);
        debug!(fields = self.state.len(), "form rendered");
    }

    /// Re-project the live state without rebuilding it.
    pub fn project<C: Container + ?Sized>(&self, container: &mut C) {
        container.clear();
        for field in self.state.fields() {
            container.append(FieldNode::project(field));
        }
    }

    /// Snapshot of the live state as projection nodes.
    pub fn nodes(&self) -> Vec<FieldNode> {
        let mut nodes = Vec::with_capacity(self.state.len());
        self.project(&mut nodes);
        nodes
    }

    pub fn dispatch(
        &mut self,
        command: FormCommand,
        notifier: &mut dyn Notifier,
    ) -> Result<Option<FieldChange>, FormError> {
        let changed = match command {
            FormCommand::EditText { id, value } => {
                let text = self.state.require_mut(&id)?.text_mut()?;
                text.set_value(value).then(|| FieldChange::of(&id))
            }
            FormCommand::ToggleDropdown { id } => {
                self.state.toggle_dropdown(&id)?;
                None
            }
            FormCommand::SelectOption { id, index } => {
                let choice = self.state.require_mut(&id)?.choice_mut()?;
                let selected = choice.select(index);
                self.state.forget_dropdown(&id);
                if !selected {
                    return Err(FormError::UnknownOption { id, index });
                }
                Some(FieldChange::of(&id))
            }
            FormCommand::OutsideClick => {
                self.state.close_dropdowns();
                None
            }
            FormCommand::FlipToggle { id } => {
                self.state.require_mut(&id)?.toggle_mut()?.flip();
                Some(FieldChange::of(&id))
            }
            FormCommand::AddItem { id } => {
                let list = self.list_mut(&id)?;
                match list.add_item() {
                    Ok(_) => Some(FieldChange::of(&id)),
                    Err(rejection) => {
                        warn!(field = %id, %rejection, "list item not added");
                        notifier.notify(Notification::error(rejection.message()));
                        None
                    }
                }
            }
            FormCommand::DeleteItem { id, key } => {
                let list = self.list_mut(&id)?;
                if !list.remove_item(key) {
                    return Err(unknown_item(id, key));
                }
                Some(FieldChange::of(&id))
            }
            FormCommand::EditItem { id, key, value } => {
                let list = self.known_item(&id, key)?;
                list.set_text(key, value).then(|| FieldChange::of(&id))
            }
            FormCommand::BlurItem { id, key } => {
                let list = self.known_item(&id, key)?;
                list.blur(key).then(|| FieldChange::of(&id))
            }
            FormCommand::DragStart { id, key } => {
                let list = self.list_mut(&id)?;
                if list.drag_start(key).is_none() {
                    return Err(unknown_item(id, key));
                }
                None
            }
            FormCommand::DragOver {
                id,
                pointer_y,
                bounds,
            } => {
                self.list_mut(&id)?.drag_over(pointer_y, &bounds);
                None
            }
            FormCommand::Drop { id } => self
                .list_mut(&id)?
                .drop_dragged()
                .filter(|outcome| outcome.from != outcome.to)
                .map(|_| FieldChange::of(&id)),
            FormCommand::DragEnd { id } => {
                self.list_mut(&id)?.drag_end().then(|| FieldChange::of(&id))
            }
            FormCommand::MoveItem { id, key, delta } => {
                let list = self.known_item(&id, key)?;
                list.move_item(key, delta).then(|| FieldChange::of(&id))
            }
        };
        Ok(changed)
    }

    /// Current form values keyed by field id, in model order.
    pub fn serialize(&self) -> Map<String, Value> {
        self.state.to_data()
    }

    pub fn get_data(&self) -> Map<String, Value> {
        self.serialize()
    }

    /// Push `data` back into the widgets. Keys without a field are ignored,
    /// fields without a key keep their state. Nothing is rolled back when an
    /// error interrupts the walk.
    pub fn deserialize(&mut self, data: &Value) -> Result<(), FormError> {
        let Value::Object(map) = data else {
            return Err(FormError::NotAnObject(kind_name(data)));
        };
        self.state.seed_from_data(map)
    }

    /// [`deserialize`](Self::deserialize) that logs the failure and reports
    /// success as a flag.
    pub fn initialize_with_data(&mut self, data: &Value) -> bool {
        match self.deserialize(data) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "form initialization failed");
                false
            }
        }
    }

    fn list_mut(&mut self, id: &str) -> Result<&mut SortableListState, FormError> {
        self.state.require_mut(id)?.list_mut()
    }

    fn known_item(&mut self, id: &str, key: ItemKey) -> Result<&mut SortableListState, FormError> {
        let list = self.list_mut(id)?;
        if list.item(key).is_none() {
            return Err(unknown_item(id.to_string(), key));
        }
        Ok(list)
    }
}

fn unknown_item(id: String, key: ItemKey) -> FormError {
    FormError::UnknownItem { id, key }
}
