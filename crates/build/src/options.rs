use serde::{Serialize, Serializer};

/// Value of an option that may be given bare (`-b`) or with an argument (`-b file`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionalArg {
    Flag,
    Value(String),
}

impl OptionalArg {
    pub fn value(&self) -> Option<&str> {
        match self {
            OptionalArg::Flag => None,
            OptionalArg::Value(v) => Some(v),
        }
    }
}

impl From<Option<String>> for OptionalArg {
    fn from(value: Option<String>) -> Self {
        value.map_or(OptionalArg::Flag, OptionalArg::Value)
    }
}

/// Bare flags serialize as `true`, values as strings.
impl Serialize for OptionalArg {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionalArg::Flag => serializer.serialize_bool(true),
            OptionalArg::Value(v) => serializer.serialize_str(v),
        }
    }
}

/// Options forwarded to the build pipeline, one field per command-line flag.
///
/// No combination rules are checked here (e.g. `initialize` without `backup`);
/// the pipeline owns those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<OptionalArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<OptionalArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<OptionalArg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<OptionalArg>,
    pub initialize: bool,
    pub keep_sql: bool,
    pub query_direct: bool,
    pub unregister: bool,
    pub wipe_views: bool,
    pub client_only: bool,
    pub database_only: bool,
}
