//! Language resolution for the transcription service.
//!
//! The remote API reports the detected language as an English name
//! ("english", "german"), while callers pass ISO 639-1 codes ("en", "de").
//! Both resolve against the same static table of languages the service
//! supports.

/// A resolved language descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code, e.g. "en".
    pub code: &'static str,
    /// English name, e.g. "English".
    pub name: &'static str,
}

/// Languages supported by the Whisper transcription API, (code, name) pairs.
const LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("hy", "Armenian"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bs", "Bosnian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("zh", "Chinese"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gl", "Galician"),
    ("de", "German"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("kn", "Kannada"),
    ("kk", "Kazakh"),
    ("ko", "Korean"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("mk", "Macedonian"),
    ("ms", "Malay"),
    ("mr", "Marathi"),
    ("mi", "Maori"),
    ("ne", "Nepali"),
    ("no", "Norwegian"),
    ("fa", "Persian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sr", "Serbian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("es", "Spanish"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("tl", "Tagalog"),
    ("ta", "Tamil"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
];

/// Looks up a language by ISO 639-1 code (case-insensitive).
pub fn from_code(code: &str) -> Option<Language> {
    LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|&(code, name)| Language { code, name })
}

/// Looks up a language by English name (case-insensitive).
pub fn from_name(name: &str) -> Option<Language> {
    LANGUAGES
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|&(code, name)| Language { code, name })
}

/// Resolves a service-reported language value, trying code first, then name.
pub fn resolve(reported: &str) -> Option<Language> {
    let reported = reported.trim();
    from_code(reported).or_else(|| from_name(reported))
}

/// Returns all supported languages.
pub fn supported() -> impl Iterator<Item = Language> {
    LANGUAGES.iter().map(|&(code, name)| Language { code, name })
}
