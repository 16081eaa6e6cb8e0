use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// The subset of `package.json` the portal reads
///
/// Fields with an unexpected shape (a legacy `{"type": "MIT"}` license, a
/// string `keywords`) read as absent, so the record falls back to defaults
/// instead of the folder being dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub author: Option<Author>,
    #[serde(default, deserialize_with = "lenient")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub scripts: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dependencies: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub dev_dependencies: Option<Map<String, Value>>,
}

/// Any JSON value is accepted; one that does not fit `T` becomes `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// npm accepts both `"author": "Jane"` and `"author": {"name": "Jane", ...}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Person {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Author {
    pub fn name(&self) -> Option<String> {
        match self {
            Author::Name(name) => Some(name.clone()),
            Author::Person { name } => name.clone(),
        }
    }
}
