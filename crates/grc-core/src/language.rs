//! # Policy Language Table
//!
//! Maps ISO 639-1 language codes to the English display name used when
//! instructing a text-generation collaborator which language to write in.
//!
//! The table is a `const` slice: it is fixed at compile time and never
//! mutated. Unknown codes resolve to [`DEFAULT_LANGUAGE_NAME`].
//!
//! ## Lookup Rules
//!
//! | Input | Result |
//! |-------|--------|
//! | `"de"` | `German` |
//! | `" FR "` | `French` (trimmed, case-folded) |
//! | `"pt-BR"`, `"pt_BR"` | `Portuguese` (primary subtag) |
//! | `"xx"`, `""` | `English` |

/// Code used when neither the caller nor the client profile names a language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Display name returned for unknown or empty codes.
pub const DEFAULT_LANGUAGE_NAME: &str = "English";

/// Supported policy languages in display order.
const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("fi", "Finnish"),
    ("cs", "Czech"),
    ("ro", "Romanian"),
    ("hu", "Hungarian"),
    ("el", "Greek"),
    ("tr", "Turkish"),
    ("ru", "Russian"),
    ("uk", "Ukrainian"),
    ("ar", "Arabic"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("id", "Indonesian"),
];

/// All supported `(code, name)` pairs, in display order.
pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    LANGUAGES
}

/// Display name for a language code, defaulting to English.
pub fn language_name(code: &str) -> &'static str {
    let normalized = code.trim().to_ascii_lowercase();
    lookup(&normalized)
        .or_else(|| {
            let primary = normalized.split(['-', '_']).next().unwrap_or_default();
            lookup(primary)
        })
        .unwrap_or(DEFAULT_LANGUAGE_NAME)
}

/// Whether a code maps to a table entry (directly or via its primary subtag).
pub fn is_supported(code: &str) -> bool {
    let normalized = code.trim().to_ascii_lowercase();
    let primary = normalized.split(['-', '_']).next().unwrap_or_default();
    lookup(&normalized).is_some() || lookup(primary).is_some()
}

/// Pick the effective language code: the explicit request, else the
/// client's stored preference, else [`DEFAULT_LANGUAGE`]. Blank strings
/// count as absent.
pub fn resolve_language<'a>(requested: Option<&'a str>, stored: Option<&'a str>) -> &'a str {
    requested
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or_else(|| stored.map(str::trim).filter(|c| !c.is_empty()))
        .unwrap_or(DEFAULT_LANGUAGE)
}

fn lookup(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}
