use serde::{Deserialize, Serialize};

/// A single generated (or literal) value destined for one database property.
///
/// Variants mirror the Notion property type taxonomy; the serialized form is
/// the `{type, value}` shape the row formatter consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Title(String),
    RichText(String),
    Date { start: String },
    Select(String),
    Number(f64),
    MultiSelect(String),
    Phone(String),
}

impl FieldValue {
    /// The property type name as the external database knows it.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Title(_) => "title",
            FieldValue::RichText(_) => "rich_text",
            FieldValue::Date { .. } => "date",
            FieldValue::Select(_) => "select",
            FieldValue::Number(_) => "number",
            FieldValue::MultiSelect(_) => "multi_select",
            FieldValue::Phone(_) => "phone",
        }
    }

    /// Text content for variants that carry a plain string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Title(s)
            | FieldValue::RichText(s)
            | FieldValue::Select(s)
            | FieldValue::MultiSelect(s)
            | FieldValue::Phone(s) => Some(s),
            FieldValue::Date { .. } | FieldValue::Number(_) => None,
        }
    }
}

/// Insertion-ordered map of field name → value.
///
/// The profile's field order is preserved all the way into the persisted row,
/// so this is a thin wrapper over a pair vec rather than a hash map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyMap(Vec<(String, FieldValue)>);

impl PropertyMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a value, replacing any earlier entry with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
