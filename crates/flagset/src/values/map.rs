use std::any::Any;

use indexmap::IndexMap;

use crate::value::{Value, ValueError};

/// `key=value` pairs accumulated across occurrences, in first-seen
/// order. The first parse-time set clears the registration default.
#[derive(Debug, Clone, Default)]
pub struct StringMapValue {
    entries: IndexMap<String, String>,
    changed: bool,
}

impl StringMapValue {
    pub fn new<I, K, V>(default: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: default
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            changed: false,
        }
    }

    pub fn get(&self) -> &IndexMap<String, String> {
        &self.entries
    }
}

impl Value for StringMapValue {
    fn set(&mut self, text: &str) -> Result<(), ValueError> {
        let Some((key, value)) = text.split_once('=') else {
            return Err(format!("{text:?} must be formatted as key=value").into());
        };
        if !self.changed {
            self.entries.clear();
            self.changed = true;
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn text(&self) -> String {
        let body = self
            .entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        format!("[{body}]")
    }

    fn type_name(&self) -> &'static str {
        "map"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
