use crate::types::Value;
use serde::{Deserialize, Deserializer, Serialize};

/// Attribute kinds understood by the bulk-import target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrType {
    Bool,
    Number,
    String,
    Text,
    Date,
    Money,
    Quantity,
    Dropdown,
    DropdownMulti,
    Checkboxes,
    Radio,
    #[serde(other)]
    Unknown,
}

impl AttrType {
    #[must_use]
    pub fn takes_options(self) -> bool {
        matches!(self, AttrType::Dropdown | AttrType::DropdownMulti | AttrType::Checkboxes | AttrType::Radio)
    }
}

/// One configurable extra column attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAttributeSpec {
    pub column_name: String,
    #[serde(rename = "type")]
    pub kind: AttrType,
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub quantity_min: Option<i64>,
    #[serde(default)]
    pub quantity_max: Option<i64>,
}

impl CustomAttributeSpec {
    pub fn new(column_name: impl Into<String>, kind: AttrType) -> Self {
        Self {
            column_name: column_name.into(),
            kind,
            constant: false,
            value: None,
            options: Vec::new(),
            quantity_min: None,
            quantity_max: None,
        }
    }

    #[must_use]
    pub fn with_options<S: AsRef<str>>(mut self, options: &[S]) -> Self {
        self.options = options.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.quantity_min = Some(min);
        self.quantity_max = Some(max);
        self
    }

    #[must_use]
    pub fn fixed(mut self, value: impl Into<Value>) -> Self {
        self.constant = true;
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn is_date(&self) -> bool {
        self.kind == AttrType::Date
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(d)?.unwrap_or_default())
}

/// Option pool used for the radio attribute of a default set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioOptions {
    /// A, B, C, D
    Letters,
    /// "1" through "50"
    Numbered,
}

const LETTER_OPTIONS: [&str; 4] = ["A", "B", "C", "D"];

/// The ten stock attributes (`CA_BOOL` .. `CA_TEXT`) under `prefix`.
#[must_use]
pub fn default_set(prefix: &str, radio: RadioOptions) -> Vec<CustomAttributeSpec> {
    let col = |name: &str| format!("{prefix}{name}");
    let radio_options: Vec<String> = match radio {
        RadioOptions::Letters => LETTER_OPTIONS.iter().map(ToString::to_string).collect(),
        RadioOptions::Numbered => (1..=50).map(|i| i.to_string()).collect(),
    };
    vec![
        CustomAttributeSpec::new(col("CA_BOOL"), AttrType::Bool),
        CustomAttributeSpec::new(col("CA_CHECKBOX"), AttrType::Checkboxes).with_options(&LETTER_OPTIONS),
        CustomAttributeSpec::new(col("CA_DATE"), AttrType::Date),
        CustomAttributeSpec::new(col("CA_DROPDOWN"), AttrType::Dropdown).with_options(&LETTER_OPTIONS),
        CustomAttributeSpec::new(col("CA_DROPDOWN_WITH_MULTISELECT"), AttrType::DropdownMulti)
            .with_options(&LETTER_OPTIONS),
        CustomAttributeSpec::new(col("CA_MONEY"), AttrType::Money),
        CustomAttributeSpec::new(col("CA_QUANTITY"), AttrType::Quantity).with_range(1, 50),
        CustomAttributeSpec::new(col("CA_NUMBER"), AttrType::Number),
        CustomAttributeSpec::new(col("CA_RADIO"), AttrType::Radio).with_options(&radio_options),
        CustomAttributeSpec::new(col("CA_TEXT"), AttrType::Text),
    ]
}
