//! Keyword search helpers.

/// Escape character used by every `ILIKE ... ESCAPE '!'` clause.
const LIKE_ESCAPE: char = '!';

/// Turn a free-text keyword into a substring `ILIKE` pattern.
///
/// Blank keywords match everything and yield `None`. Wildcards typed by the
/// caller are matched literally.
#[must_use]
pub fn contains_pattern(keyword: Option<&str>) -> Option<String> {
    let keyword = keyword.map(str::trim).filter(|keyword| !keyword.is_empty())?;

    let mut pattern = String::with_capacity(keyword.len() + 2);

    pattern.push('%');

    for c in keyword.chars() {
        if matches!(c, LIKE_ESCAPE | '%' | '_') {
            pattern.push(LIKE_ESCAPE);
        }

        pattern.push(c);
    }

    pattern.push('%');

    Some(pattern)
}
