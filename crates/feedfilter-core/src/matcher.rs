//! Keyword matching.

/// Whether `text` contains any of `keywords` as a literal substring.
///
/// Empty text or an empty keyword list never match. When `case_sensitive`
/// is false both sides are lowercased first. The first matching keyword
/// short-circuits.
pub fn matches<S: AsRef<str>>(text: &str, keywords: &[S], case_sensitive: bool) -> bool {
    if text.is_empty() || keywords.is_empty() {
        return false;
    }

    if case_sensitive {
        return keywords.iter().any(|k| text.contains(k.as_ref()));
    }

    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|k| text.contains(k.as_ref().to_lowercase().as_str()))
}

/// First keyword found in `text`, using the same rules as [`matches`].
pub fn first_match<'k, S: AsRef<str>>(
    text: &str,
    keywords: &'k [S],
    case_sensitive: bool,
) -> Option<&'k str> {
    if text.is_empty() {
        return None;
    }
    let lowered;
    let haystack = if case_sensitive {
        text
    } else {
        lowered = text.to_lowercase();
        lowered.as_str()
    };
    keywords.iter().map(AsRef::as_ref).find(|k| {
        if case_sensitive {
            haystack.contains(k)
        } else {
            haystack.contains(k.to_lowercase().as_str())
        }
    })
}
