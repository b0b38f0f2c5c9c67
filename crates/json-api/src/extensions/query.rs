//! Optional text query parameters.

use salvo::oapi::extract::QueryParam;

/// Query values where an empty or whitespace-only value counts as absent.
pub(crate) trait QueryTextExt {
    fn into_non_blank(self) -> Option<String>;
}

impl QueryTextExt for QueryParam<String, false> {
    fn into_non_blank(self) -> Option<String> {
        self.into_inner()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
