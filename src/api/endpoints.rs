//! Operation verbs and endpoint paths

use reqwest::Method;

/// What an operation verb asks the server to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `get`, `list`, `show`: GET with flags as query parameters
    Retrieve,
    /// `create`, `search`, `find`: POST with flags as JSON body
    Submit,
    /// `update`, `set`: PUT with flags as JSON body
    Replace,
    /// `delete`, `drop`: DELETE, flags ignored
    Remove,
}

impl Action {
    /// Resolve an operation verb, `None` if it is not one we know
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "get" | "list" | "show" => Some(Self::Retrieve),
            "create" | "search" | "find" => Some(Self::Submit),
            "update" | "set" => Some(Self::Replace),
            "delete" | "drop" => Some(Self::Remove),
            _ => None,
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::Retrieve => Method::GET,
            Self::Submit => Method::POST,
            Self::Replace => Method::PUT,
            Self::Remove => Method::DELETE,
        }
    }

    /// Whether flags travel as a JSON request body
    pub fn sends_body(self) -> bool {
        matches!(self, Self::Submit | Self::Replace)
    }

    /// Whether flags travel as query parameters
    pub fn sends_query(self) -> bool {
        self == Self::Retrieve
    }
}

/// Join resource segments into an absolute endpoint path
pub fn build_endpoint<S: AsRef<str>>(resources: &[S]) -> String {
    let segments: Vec<&str> = resources.iter().map(AsRef::as_ref).collect();
    format!("/{}", segments.join("/"))
}
