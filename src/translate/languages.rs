use serde::Serialize;

/// A target language offered to client UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

const fn lang(name: &'static str, code: &'static str) -> Language {
    Language { name, code }
}

/// Supported target languages. Descriptive only: requests are not validated
/// against this table.
pub static LANGUAGE_CODES: &[Language] = &[
    lang("English", "en"),
    lang("Hindi", "hi"),
    lang("Marathi", "mr"),
    lang("Tamil", "ta"),
    lang("Telugu", "te"),
    lang("Kannada", "kn"),
    lang("Gujarati", "gu"),
    lang("Punjabi", "pa"),
    lang("Malayalam", "ml"),
    lang("Bengali", "bn"),
    lang("Odia", "or"),
    lang("Assamese", "as"),
    lang("Urdu", "ur"),
    lang("Chinese", "zh"),
    lang("Japanese", "ja"),
    lang("Spanish", "es"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_sixteen_unique_codes() {
        assert_eq!(LANGUAGE_CODES.len(), 16);
        let mut codes: Vec<_> = LANGUAGE_CODES.iter().map(|l| l.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 16);
    }

    #[test]
    fn hindi_is_listed() {
        assert!(LANGUAGE_CODES.contains(&Language { name: "Hindi", code: "hi" }));
    }
}
