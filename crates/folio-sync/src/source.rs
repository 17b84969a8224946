//! In-memory model of the authored site content, before flattening.
//!
//! Content is loosely typed: besides plain data it can hold icon components,
//! which the artifact replaces with their names.

/// One value of the authored content.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    /// A missing value. Dropped from objects, `null` inside arrays.
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<SourceValue>),
    /// Key order is preserved.
    Object(Vec<(String, SourceValue)>),
    /// A render function such as an icon component. `name` is the
    /// function's own name and may be empty for anonymous functions.
    Component {
        name: String,
        display_name: Option<String>,
    },
}

impl SourceValue {
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, SourceValue)>) -> Self {
        SourceValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array(items: impl IntoIterator<Item = SourceValue>) -> Self {
        SourceValue::Array(items.into_iter().collect())
    }

    /// An icon component whose function name is `name`.
    pub fn icon(name: &str) -> Self {
        SourceValue::Component {
            name: name.to_string(),
            display_name: None,
        }
    }

    /// An icon wrapped in an object that carries `displayName`, the shape
    /// forwardRef components take in some bundlers.
    pub fn icon_object(display_name: &str) -> Self {
        SourceValue::object([
            ("displayName", SourceValue::from(display_name)),
            ("$$typeof", SourceValue::from("react.forward_ref")),
        ])
    }

    pub fn strings<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        SourceValue::array(items.into_iter().map(SourceValue::from))
    }

    /// Truthiness as the content authoring language defines it.
    pub fn is_truthy(&self) -> bool {
        match self {
            SourceValue::Undefined | SourceValue::Null => false,
            SourceValue::Bool(b) => *b,
            SourceValue::Number(n) => *n != 0.0 && !n.is_nan(),
            SourceValue::String(s) => !s.is_empty(),
            SourceValue::Array(_) | SourceValue::Object(_) | SourceValue::Component { .. } => true,
        }
    }

    /// Look up a key on an object. Anything else has no keys.
    pub fn get(&self, key: &str) -> Option<&SourceValue> {
        match self {
            SourceValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<&str> for SourceValue {
    fn from(s: &str) -> Self {
        SourceValue::String(s.to_string())
    }
}

impl From<String> for SourceValue {
    fn from(s: String) -> Self {
        SourceValue::String(s)
    }
}

impl From<f64> for SourceValue {
    fn from(n: f64) -> Self {
        SourceValue::Number(n)
    }
}

impl From<i32> for SourceValue {
    fn from(n: i32) -> Self {
        SourceValue::Number(n as f64)
    }
}

impl From<bool> for SourceValue {
    fn from(b: bool) -> Self {
        SourceValue::Bool(b)
    }
}

impl From<&serde_json::Value> for SourceValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => SourceValue::Null,
            Value::Bool(b) => SourceValue::Bool(*b),
            Value::Number(n) => SourceValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => SourceValue::String(s.clone()),
            Value::Array(items) => SourceValue::Array(items.iter().map(SourceValue::from).collect()),
            Value::Object(map) => SourceValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), SourceValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// The named exports of a content module, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceModule {
    exports: Vec<(String, SourceValue)>,
}

impl SourceModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an export.
    pub fn export(mut self, name: &str, value: SourceValue) -> Self {
        match self.exports.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.exports.push((name.to_string(), value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&SourceValue> {
        self.exports.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.iter().map(|(k, _)| k.as_str())
    }
}

impl From<&serde_json::Map<String, serde_json::Value>> for SourceModule {
    fn from(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        map.iter()
            .fold(SourceModule::new(), |m, (k, v)| m.export(k, SourceValue::from(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        let falsy = [
            SourceValue::Undefined,
            SourceValue::Null,
            SourceValue::Bool(false),
            SourceValue::Number(0.0),
            SourceValue::Number(-0.0),
            SourceValue::Number(f64::NAN),
            SourceValue::from(""),
        ];
        for v in &falsy {
            assert!(!v.is_truthy(), "{v:?} should be falsy");
        }

        let truthy = [
            SourceValue::Bool(true),
            SourceValue::Number(-1.5),
            SourceValue::from("0"),
            SourceValue::array([]),
            SourceValue::object::<&str>([]),
            SourceValue::icon(""),
        ];
        for v in &truthy {
            assert!(v.is_truthy(), "{v:?} should be truthy");
        }
    }

    #[test]
    fn test_export_replaces_in_place() {
        let module = SourceModule::new()
            .export("skills", SourceValue::from(1))
            .export("projects", SourceValue::from(2))
            .export("skills", SourceValue::from(3));
        assert_eq!(module.names().collect::<Vec<_>>(), ["skills", "projects"]);
        assert_eq!(module.get("skills"), Some(&SourceValue::Number(3.0)));
        assert_eq!(module.get("services"), None);
    }

    #[test]
    fn test_object_get() {
        let v = SourceValue::object([("displayName", SourceValue::from("Code2"))]);
        assert_eq!(v.get("displayName"), Some(&SourceValue::from("Code2")));
        assert_eq!(v.get("name"), None);
        assert_eq!(SourceValue::from("x").get("length"), None);
    }
}
