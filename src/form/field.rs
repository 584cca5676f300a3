use serde::{Deserialize, Serialize};

/// Input types that can hold free text we know how to fill.
const TEXT_LIKE_TYPES: &[&str] = &["text", "email", "tel"];

/// Position of an `<input>` among all inputs of the document, in document order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldHandle(pub usize);

/// An `<input>` element as observed on the page.
///
/// Optional attributes are `None` when the attribute is absent from the element.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Field {
    pub handle: FieldHandle,
    /// Raw `type` attribute.
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub id: String,
    pub name: String,
    pub placeholder: String,
    pub aria_label: Option<String>,
    pub value: String,
    pub disabled: bool,
    pub read_only: bool,
    pub pattern: Option<String>,
    /// Raw `maxlength` attribute, parsed lazily by the phone format decision.
    pub max_length: Option<String>,
}

impl Field {
    /// Create an empty text field at the given handle.
    pub fn new(handle: usize) -> Self {
        Self {
            handle: FieldHandle(handle),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_max_length(mut self, max_length: impl Into<String>) -> Self {
        self.max_length = Some(max_length.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Lowercased `id`, `name`, `placeholder` and `aria-label`, space separated.
    pub fn signature(&self) -> String {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.placeholder.as_str(),
            self.aria_label.as_deref().unwrap_or(""),
        ]
        .join(" ")
        .to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Whether the automatic sweep may write to this field.
    pub fn is_editable(&self) -> bool {
        !self.disabled && !self.read_only
    }

    /// `type` absent, or one of `text`, `email`, `tel`.
    pub fn is_text_like(&self) -> bool {
        match self.input_type.as_deref() {
            None => true,
            Some(t) => TEXT_LIKE_TYPES
                .iter()
                .any(|candidate| t.eq_ignore_ascii_case(candidate)),
        }
    }
}

/// Keep the text-like inputs, preserving document order.
pub fn enumerate_candidates(inputs: Vec<Field>) -> Vec<Field> {
    inputs.into_iter().filter(Field::is_text_like).collect()
}
