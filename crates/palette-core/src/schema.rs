//! Raw JSON-Schema shapes and the resolved, strongly-typed field model.
//!
//! `RawSchema` mirrors the wire shape a tool's `inputSchema` arrives in.
//! [`crate::resolve::resolve_property`] turns a `RawSchema` plus a `$defs`
//! table into a [`SchemaProperty`] tagged with a concrete [`FieldKind`],
//! so the rest of the crate never re-inspects `type`/`format`/`items`.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-Schema node as received from the catalog, before resolution.
///
/// Every field is optional because a schema node may describe anything
/// from a bare scalar to a `$ref` to an `anyOf` union.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RawSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, RawSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "anyOf", default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<RawSchema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// The date/date-time distinction carried by a resolved `date` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Date,
    DateTime,
}

/// An object schema resolved one level deep: its own ordered properties
/// and required set. Used for the item schema of an `arrayObj` field,
/// which may itself contain further `arrayObj` fields.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, SchemaProperty>,
    pub required: IndexSet<String>,
}

impl ObjectSchema {
    /// The [`FormField`] list for this object, in declaration order.
    pub fn fields(&self) -> Vec<FormField> {
        self.properties
            .iter()
            .map(|(name, prop)| FormField {
                name: name.clone(),
                property: prop.clone(),
                required: self.required.contains(name),
            })
            .collect()
    }
}

/// The seven-and-one editor kinds a resolved property can take (plain
/// `text` has no data of its own, so there are eight variants total).
#[derive(Debug, Clone)]
pub enum FieldKind {
    Text,
    Number,
    Bool,
    Enum(Vec<String>),
    Date(DateFormat),
    ArrayText,
    ArrayEnum(Vec<String>),
    ArrayObj(Box<ObjectSchema>),
}

impl FieldKind {
    /// The dim type badge shown next to a field in the form palette.
    pub fn badge(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Bool => "yes/no",
            FieldKind::Enum(_) => "select",
            FieldKind::ArrayEnum(_) => "multi",
            FieldKind::ArrayText => "list",
            FieldKind::Date(_) => "date",
            FieldKind::ArrayObj(_) => "form",
        }
    }
}

/// A property after `$ref`/`anyOf` resolution and kind classification.
#[derive(Debug, Clone)]
pub struct SchemaProperty {
    pub kind: FieldKind,
    pub description: Option<String>,
    pub examples: Vec<Value>,
    pub default: Option<Value>,
}

/// `(name, resolved property, required)` — the unit the form engine
/// navigates. Derived from a [`ToolDef`] (or an [`ObjectSchema`] for a
/// sub-form) at tool-selection time.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub property: SchemaProperty,
    pub required: bool,
}

/// An immutable tool definition from the catalog.
///
/// Serializes as the wire shape the catalog transport and the 24-hour
/// cache file both use: `properties`/`required`/`$defs` nested under
/// `inputSchema`, matching a JSON-Schema tool descriptor rather than
/// this struct's own flattened fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "WireToolDef", into = "WireToolDef")]
pub struct ToolDef {
    pub name: String,
    pub description: Option<String>,
    pub properties: IndexMap<String, RawSchema>,
    pub required: IndexSet<String>,
    pub defs: IndexMap<String, RawSchema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireInputSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    ty: Option<String>,
    #[serde(default)]
    properties: IndexMap<String, RawSchema>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(rename = "$defs", default)]
    defs: IndexMap<String, RawSchema>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireToolDef {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "inputSchema", default)]
    input_schema: WireInputSchema,
}

impl From<ToolDef> for WireToolDef {
    fn from(tool: ToolDef) -> Self {
        WireToolDef {
            name: tool.name,
            description: tool.description,
            input_schema: WireInputSchema {
                ty: Some("object".to_string()),
                properties: tool.properties,
                required: tool.required.into_iter().collect(),
                defs: tool.defs,
            },
        }
    }
}

impl std::convert::TryFrom<WireToolDef> for ToolDef {
    type Error = std::convert::Infallible;

    fn try_from(wire: WireToolDef) -> Result<Self, Self::Error> {
        Ok(ToolDef {
            name: wire.name,
            description: wire.description,
            properties: wire.input_schema.properties,
            required: wire.input_schema.required.into_iter().collect(),
            defs: wire.input_schema.defs,
        })
    }
}

impl ToolDef {
    /// Resolve every property and return the field list in catalog order.
    pub fn resolve_fields(&self) -> Vec<FormField> {
        self.properties
            .iter()
            .map(|(name, raw)| FormField {
                name: name.clone(),
                property: crate::resolve::resolve_property(raw, &self.defs),
                required: self.required.contains(name),
            })
            .collect()
    }
}
