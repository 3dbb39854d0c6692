/// A host-form value the combobox reads and writes but does not own.
///
/// The combobox only ever changes the value through `set_value`.
pub trait BoundField {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: String);
}

/// The plain string cell the item forms keep for each text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValue(String);

impl FieldValue {
    pub fn new(value: impl Into<String>) -> Self {
        FieldValue(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl BoundField for FieldValue {
    fn value(&self) -> &str {
        &self.0
    }

    fn set_value(&mut self, value: String) {
        self.0 = value;
    }
}

impl BoundField for String {
    fn value(&self) -> &str {
        self
    }

    fn set_value(&mut self, value: String) {
        *self = value;
    }
}
