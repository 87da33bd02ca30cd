//! Requests against the Action API
//!
//! A request is an `action` name plus an ordered set of parameters. Values
//! are either a single string or a list, the latter sent joined by `|` as
//! MediaWiki expects for multi-value parameters.

use indexmap::IndexMap;

/// A single wire parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    /// Encode the value the way it goes out on the wire
    pub fn to_wire(&self) -> String {
        match self {
            ParamValue::Single(value) => value.clone(),
            ParamValue::Multi(values) => values.join("|"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multi(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Multi(values.into_iter().map(str::to_owned).collect())
    }
}

/// Ordered mapping of parameter names to values
pub type ActionParameters = IndexMap<String, ParamValue>;

/// Build an [`ActionParameters`] from `key => value` pairs
///
/// ```
/// use mediawiki_api::params;
/// let p = params! { "reason" => "spam", "expiry" => "1 week" };
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::request::ActionParameters::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::request::ActionParameters::new();
        $( map.insert(($key).to_string(), $crate::request::ParamValue::from($value)); )+
        map
    }};
}

/// Merge caller parameters with the ones a service computes itself.
///
/// `extra` is the base and `required` is written over it, so computed
/// fields (subject, token) always win on a key collision.
pub fn merge_params(extra: ActionParameters, required: ActionParameters) -> ActionParameters {
    let mut merged = extra;
    for (key, value) in required {
        merged.insert(key, value);
    }
    merged
}

/// An action name and its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRequest {
    action: String,
    params: ActionParameters,
}

impl SimpleRequest {
    pub fn new(action: impl Into<String>, params: ActionParameters) -> Self {
        Self {
            action: action.into(),
            params,
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn params(&self) -> &ActionParameters {
        &self.params
    }

    /// Look up a parameter as its wire string
    pub fn param(&self, key: &str) -> Option<String> {
        self.params.get(key).map(ParamValue::to_wire)
    }

    /// Flatten into the form/query pairs sent to `api.php`.
    ///
    /// `action` and `format=json` come first; a caller supplied `format`
    /// or `action` key is dropped.
    pub fn to_wire_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("action".to_string(), self.action.clone()),
            ("format".to_string(), "json".to_string()),
        ];
        pairs.extend(
            self.params
                .iter()
                .filter(|(key, _)| key.as_str() != "action" && key.as_str() != "format")
                .map(|(key, value)| (key.clone(), value.to_wire())),
        );
        pairs
    }
}
