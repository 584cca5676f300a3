use serde::Serialize;

use crate::form::field::{Field, FieldHandle};

/// Change notification dispatched to page observers after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldEvent {
    Input,
    Change,
}

/// The page as seen by the fill core.
pub trait FormDocument {
    /// Every `<input>` element, in document order.
    fn inputs(&self) -> Vec<Field>;

    fn set_value(&mut self, handle: FieldHandle, value: &str);

    /// Dispatch a bubbling `event` on the field.
    fn notify(&mut self, handle: FieldHandle, event: FieldEvent);
}

/// A mutation recorded against a [`FormSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum FillOp {
    Set { handle: FieldHandle, value: String },
    Dispatch { handle: FieldHandle, event: FieldEvent },
}

/// In-memory document that records every write and notification so they can
/// be replayed against a live page, or inspected in tests.
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    fields: Vec<Field>,
    ops: Vec<FillOp>,
}

impl FormSnapshot {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ops: Vec::new(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, handle: FieldHandle) -> Option<&Field> {
        self.fields.iter().find(|f| f.handle == handle)
    }

    pub fn value(&self, handle: FieldHandle) -> Option<&str> {
        self.field(handle).map(|f| f.value.as_str())
    }

    pub fn ops(&self) -> &[FillOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<FillOp> {
        std::mem::take(&mut self.ops)
    }
}

impl FormDocument for FormSnapshot {
    fn inputs(&self) -> Vec<Field> {
        self.fields.clone()
    }

    fn set_value(&mut self, handle: FieldHandle, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.handle == handle) {
            field.value = value.to_string();
        }
        self.ops.push(FillOp::Set {
            handle,
            value: value.to_string(),
        });
    }

    fn notify(&mut self, handle: FieldHandle, event: FieldEvent) {
        self.ops.push(FillOp::Dispatch { handle, event });
    }
}
