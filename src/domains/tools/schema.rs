//! Declarative tool metadata.
//!
//! A [`ToolDefinition`] is what clients see in `tools/list` and in the
//! `initialize` capabilities. Its input schema is a flat set of named
//! parameters serialized in the JSON Schema subset MCP clients expect:
//!
//! ```json
//! {
//!   "type": "object",
//!   "properties": { "a": { "type": "number", "description": "First number" } },
//!   "required": ["a"]
//! }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Primitive type tag of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
}

/// One named parameter of a tool's input schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSchema {
    pub name: String,
    pub kind: ParamType,
    pub description: Option<String>,
    /// Enumerated set of accepted values, if restricted.
    pub allowed: Option<Vec<String>>,
    pub required: bool,
}

impl ParamSchema {
    /// A required parameter.
    pub fn required(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            allowed: None,
            required: true,
        }
    }

    /// An optional parameter.
    pub fn optional(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the parameter to an enumerated value set.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

impl Serialize for ParamSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.kind)?;
        if let Some(values) = &self.allowed {
            map.serialize_entry("enum", values)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if !self.required {
            map.serialize_entry("optional", &true)?;
        }
        map.end()
    }
}

/// Input schema of a tool: an object with named parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    params: Vec<ParamSchema>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. A parameter with the same name is replaced in place.
    pub fn param(mut self, param: ParamSchema) -> Self {
        match self.params.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
        self
    }

    pub fn params(&self) -> &[ParamSchema] {
        &self.params
    }

    /// Names of the required parameters, in declaration order.
    pub fn required(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Render the schema as a JSON object.
    pub fn to_json_object(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Properties<'a>(&'a [ParamSchema]);

        impl Serialize for Properties<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for param in self.0 {
                    map.serialize_entry(&param.name, param)?;
                }
                map.end()
            }
        }

        let required = self.required();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &Properties(&self.params))?;
        if !required.is_empty() {
            map.serialize_entry("required", &required)?;
        }
        map.end()
    }
}

/// Metadata of a registered tool.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: InputSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}
