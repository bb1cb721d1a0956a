use crate::domain::FieldKind;

use super::{
    sortable::{ItemKey, SortableItem},
    widget::{FieldState, FieldWidget},
};

/// Mount point the form engine renders into.
pub trait Container {
    /// Drop everything previously rendered.
    fn clear(&mut self);
    fn append(&mut self, node: FieldNode);
}

impl Container for Vec<FieldNode> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn append(&mut self, node: FieldNode) {
        self.push(node);
    }
}

/// Snapshot of one rendered field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub id: String,
    pub kind: FieldKind,
    pub label: String,
    pub description: Option<String>,
    pub control: ControlNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlNode {
    Text {
        value: String,
        placeholder: String,
    },
    Choice {
        value: String,
        selected_label: String,
        options: Vec<OptionNode>,
        open: bool,
    },
    Toggle {
        checked: bool,
    },
    OrderedList {
        items: Vec<ItemNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionNode {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemNode {
    pub key: ItemKey,
    pub name: String,
    pub value: String,
    pub placeholder: String,
    pub position: usize,
    pub dragging: bool,
}

impl FieldNode {
    pub(crate) fn project(field: &FieldState) -> Self {
        let descriptor = field.descriptor();
        let control = match field.widget() {
            FieldWidget::Text(text) => ControlNode::Text {
                value: text.value().to_string(),
                placeholder: text.placeholder().to_string(),
            },
            FieldWidget::Choice(choice) => ControlNode::Choice {
                value: choice.value().to_string(),
                selected_label: choice.display_label().to_string(),
                options: choice
                    .options()
                    .iter()
                    .enumerate()
                    .map(|(idx, option)| OptionNode {
                        value: option.value.clone(),
                        label: option.label.clone(),
                        selected: choice.highlighted() == Some(idx),
                    })
                    .collect(),
                open: choice.is_open(),
            },
            FieldWidget::Toggle(toggle) => ControlNode::Toggle {
                checked: toggle.checked(),
            },
            FieldWidget::OrderedList(list) => ControlNode::OrderedList {
                items: list
                    .items()
                    .iter()
                    .map(|item| ItemNode::project(item, list.placeholder()))
                    .collect(),
            },
        };
        Self {
            id: descriptor.id().to_string(),
            kind: descriptor.kind(),
            label: descriptor.label().to_string(),
            description: descriptor.description().map(str::to_string),
            control,
        }
    }
}

impl ItemNode {
    fn project(item: &SortableItem, placeholder: &str) -> Self {
        Self {
            key: item.key(),
            name: item.name().to_string(),
            value: item.text().to_string(),
            placeholder: placeholder.to_string(),
            position: item.position(),
            dragging: item.is_dragging(),
        }
    }
}
