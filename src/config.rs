//! Extraction options.
//!
//! The surrounding harness owns file discovery and catalog output; the core
//! only needs to know which function/helper names denote translatable
//! messages. Options deserialize from the harness configuration, where
//! `functionName` may be a single name or a list of names.

use serde::{Deserialize, Serialize};

/// Options shared by all extractors.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Names of the translation functions/helpers to recognize. Dotted names
    /// (e.g. `i18n.tr`) are allowed and matched against resolved call paths.
    #[serde(default = "default_function_name")]
    pub function_name: FunctionNames,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            function_name: default_function_name(),
        }
    }
}

impl ExtractOptions {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function_name: FunctionNames::Many(names.into_iter().map(Into::into).collect()),
        }
    }

    /// The configured names, flattened to a slice regardless of whether the
    /// configuration supplied one name or many.
    pub fn function_names(&self) -> &[String] {
        match &self.function_name {
            FunctionNames::One(name) => std::slice::from_ref(name),
            FunctionNames::Many(names) => names,
        }
    }
}

/// One function name or several.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FunctionNames {
    One(String),
    Many(Vec<String>),
}

fn default_function_name() -> FunctionNames {
    FunctionNames::One("tr".to_string())
}
