//! Keyword routing after retrieval: tool reasoning or straight to the answer.

/// Substrings that send a query through tool reasoning. Matched against the
/// lower-cased query by plain containment, so `"listen"` matches `"list"`.
pub const TOOL_KEYWORDS: &[&str] = &[
    "calculate",
    "compute",
    "search web",
    "current",
    "latest",
    "how many",
    "count",
    "find all",
    "list",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    UseTools,
    SkipTools,
}

impl Route {
    /// Router key used in the workflow's conditional edge.
    pub fn as_key(self) -> &'static str {
        match self {
            Route::UseTools => "use_tools",
            Route::SkipTools => "skip_tools",
        }
    }
}

pub fn should_use_tools(query: &str) -> Route {
    let lower = query.to_lowercase();
    if TOOL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Route::UseTools
    } else {
        Route::SkipTools
    }
}
