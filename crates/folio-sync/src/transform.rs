use serde_json::{Map, Number, Value};

use crate::source::{SourceModule, SourceValue};

/// Label used for a component that has neither a display name nor a name.
pub const FALLBACK_ICON_LABEL: &str = "Icon";

/// Build the artifact from `source`.
///
/// Keys appear in `include` order. An export is emitted only when it is
/// present and truthy; everything else in the module is ignored.
pub fn process_data(source: &SourceModule, include: &[String]) -> Value {
    let mut result = Map::new();
    for key in include {
        match source.get(key) {
            Some(value) if value.is_truthy() => {
                result.insert(key.clone(), to_json(value).unwrap_or(Value::Null));
            }
            _ => log::debug!("Skipping empty export {key}"),
        }
    }
    log::debug!("Processed {} of {} exports", result.len(), include.len());
    Value::Object(result)
}

/// Replace icon components by their name. Applied to a value before it is
/// serialized, so the replacement itself is not revisited.
fn replace_icon(value: &SourceValue) -> Option<SourceValue> {
    match value {
        SourceValue::Component { name, display_name } => {
            let label = display_name
                .as_deref()
                .filter(|d| !d.is_empty())
                .or(Some(name.as_str()).filter(|n| !n.is_empty()))
                .unwrap_or(FALLBACK_ICON_LABEL);
            Some(SourceValue::from(label))
        }
        SourceValue::Object(_) => value
            .get("displayName")
            .filter(|d| d.is_truthy())
            .cloned(),
        _ => None,
    }
}

/// Serialize one value. `None` means "no value": the caller drops the key
/// (objects) or writes `null` (arrays).
fn to_json(value: &SourceValue) -> Option<Value> {
    let replaced = replace_icon(value);
    let value = replaced.as_ref().unwrap_or(value);

    match value {
        SourceValue::Undefined | SourceValue::Component { .. } => None,
        SourceValue::Null => Some(Value::Null),
        SourceValue::Bool(b) => Some(Value::Bool(*b)),
        SourceValue::Number(n) => Some(number(*n)),
        SourceValue::String(s) => Some(Value::String(s.clone())),
        SourceValue::Array(items) => Some(Value::Array(
            items
                .iter()
                .map(|item| to_json(item).unwrap_or(Value::Null))
                .collect(),
        )),
        SourceValue::Object(entries) => {
            let mut map = Map::new();
            for (key, entry) in entries {
                if let Some(v) = to_json(entry) {
                    map.insert(key.clone(), v);
                }
            }
            Some(Value::Object(map))
        }
    }
}

/// Non-finite values become null. Safe integers are stored as integers;
/// everything else stays a float and is spelled out by the artifact
/// formatter, so larger whole numbers still print without a fraction.
fn number(n: f64) -> Value {
    if !n.is_finite() {
        return Value::Null;
    }
    if n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_992.0 {
        return Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_INCLUDE_KEYS;
    use crate::writer::{render, write_artifact};
    use serde_json::json;

    fn include() -> Vec<String> {
        DEFAULT_INCLUDE_KEYS.iter().map(|k| k.to_string()).collect()
    }

    fn skills(items: SourceValue) -> SourceModule {
        SourceModule::new().export("skills", items)
    }

    #[test]
    fn test_component_with_display_name() {
        let icon = SourceValue::Component {
            name: "ForwardRef".into(),
            display_name: Some("Sparkles".into()),
        };
        let out = process_data(
            &skills(SourceValue::array([SourceValue::object([("icon", icon)])])),
            &include(),
        );
        assert_eq!(out, json!({ "skills": [{ "icon": "Sparkles" }] }));
    }

    #[test]
    fn test_component_falls_back_to_name_then_label() {
        let named = SourceValue::icon("Code2");
        let anonymous = SourceValue::icon("");
        let empty_display = SourceValue::Component {
            name: "Database".into(),
            display_name: Some(String::new()),
        };
        let out = process_data(
            &skills(SourceValue::array([named, anonymous, empty_display])),
            &include(),
        );
        assert_eq!(out, json!({ "skills": ["Code2", "Icon", "Database"] }));
    }

    #[test]
    fn test_object_with_display_name_collapses() {
        let item = SourceValue::object([
            ("title", SourceValue::from("Web")),
            ("icon", SourceValue::icon_object("Globe")),
        ]);
        let out = process_data(&skills(SourceValue::array([item])), &include());
        assert_eq!(out, json!({ "skills": [{ "title": "Web", "icon": "Globe" }] }));
    }

    #[test]
    fn test_object_with_empty_display_name_kept() {
        let item = SourceValue::object([
            ("displayName", SourceValue::from("")),
            ("level", SourceValue::from(3)),
        ]);
        let out = process_data(&skills(SourceValue::array([item])), &include());
        assert_eq!(out, json!({ "skills": [{ "displayName": "", "level": 3 }] }));
    }

    #[test]
    fn test_keys_follow_include_order() {
        let source = SourceModule::new()
            .export("services", SourceValue::strings(["consulting"]))
            .export("projects", SourceValue::strings(["folio"]))
            .export("skills", SourceValue::strings(["rust"]));
        let out = process_data(&source, &include());
        let keys: Vec<&str> = out
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(keys, ["skills", "projects", "services"]);
    }

    #[test]
    fn test_falsy_and_unlisted_exports_skipped() {
        let source = SourceModule::new()
            .export("personalInfo", SourceValue::object([("name", SourceValue::from("A"))]))
            .export("skills", SourceValue::Null)
            .export("skillCategories", SourceValue::from(""))
            .export("experiences", SourceValue::from(0))
            .export("projects", SourceValue::Undefined)
            .export("aboutSkills", SourceValue::array([]))
            .export("services", SourceValue::Bool(false));
        let out = process_data(&source, &include());
        assert_eq!(out, json!({ "aboutSkills": [] }));
    }

    #[test]
    fn test_undefined_dropped_from_objects_null_in_arrays() {
        let item = SourceValue::object([
            ("kept", SourceValue::from(true)),
            ("gone", SourceValue::Undefined),
            ("list", SourceValue::array([SourceValue::Undefined, SourceValue::from(1)])),
        ]);
        let out = process_data(&skills(SourceValue::array([item])), &include());
        assert_eq!(
            out,
            json!({ "skills": [{ "kept": true, "list": [null, 1] }] })
        );
    }

    #[test]
    fn test_numbers() {
        let nums = SourceValue::array([
            SourceValue::from(90),
            SourceValue::from(2.5),
            SourceValue::from(-0.0),
            SourceValue::from(f64::NAN),
            SourceValue::from(f64::INFINITY),
        ]);
        let out = process_data(&skills(nums), &include());
        assert_eq!(out, json!({ "skills": [90, 2.5, 0, null, null] }));
        let text = serde_json::to_string(&out).unwrap_or_default();
        assert_eq!(text, r#"{"skills":[90,2.5,0,null,null]}"#);
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let source = crate::content::portfolio();
        let first = process_data(&source, &include());
        let map = first.as_object().cloned().unwrap_or_default();
        let second = process_data(&SourceModule::from(&map), &include());
        // Value equality ignores key order; compare the bytes instead.
        assert_eq!(
            render(&first).expect("render first"),
            render(&second).expect("render second")
        );
    }

    #[test]
    fn test_rerun_writes_identical_bytes() {
        let dir = std::env::temp_dir().join(format!("folio-sync-rerun-{}", std::process::id()));
        let path = dir.join("portfolioData.json");

        let data = process_data(&crate::content::portfolio(), &include());
        write_artifact(&path, &data).expect("first write");
        let first = std::fs::read(&path).expect("read first");
        let data = process_data(&crate::content::portfolio(), &include());
        write_artifact(&path, &data).expect("second write");
        let second = std::fs::read(&path).expect("read second");
        assert_eq!(first, second);

        let text = String::from_utf8_lossy(&first);
        let positions: Vec<usize> = DEFAULT_INCLUDE_KEYS
            .iter()
            .filter_map(|k| text.find(&format!("\n  \"{k}\": ")))
            .collect();
        assert_eq!(positions.len(), DEFAULT_INCLUDE_KEYS.len());
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "keys out of order");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_large_whole_numbers_print_without_fraction() {
        let nums = SourceValue::array([
            SourceValue::from(1e16),
            SourceValue::from(1.5e300),
            SourceValue::from(9_007_199_254_740_994.0),
            SourceValue::from(1e21),
        ]);
        let out = process_data(&skills(nums), &include());
        let text = render(&out).expect("render");
        assert_eq!(
            text,
            "{\n  \"skills\": [\n    10000000000000000,\n    1.5e+300,\n    9007199254740994,\n    1e+21\n  ]\n}"
        );
    }

    #[test]
    fn test_custom_include_list() {
        let source = SourceModule::new()
            .export("skills", SourceValue::strings(["rust"]))
            .export("navLinks", SourceValue::strings(["home"]));
        let out = process_data(&source, &["navLinks".to_string()]);
        assert_eq!(out, json!({ "navLinks": ["home"] }));
    }
}
