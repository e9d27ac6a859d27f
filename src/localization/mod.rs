use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

type Bundle = FluentBundle<FluentResource>;

const FALLBACK_LANG: SupportedLang = SupportedLang::English;

/// Languages with an embedded FTL resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum SupportedLang {
    English,
    Spanish,
}

impl SupportedLang {
    pub fn code(self) -> &'static str {
        match self {
            SupportedLang::English => "en",
            SupportedLang::Spanish => "es",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            SupportedLang::English => "English",
            SupportedLang::Spanish => "Español",
        }
    }

    /// Accepts "es", "ES", "es-MX", "es_ES.UTF-8" and the like.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.to_ascii_lowercase();
        let sep = code.find(['-', '_', '.']).unwrap_or(code.len());
        match &code[..sep] {
            "en" => Some(SupportedLang::English),
            "es" => Some(SupportedLang::Spanish),
            _ => None,
        }
    }

    fn ftl_source(self) -> &'static str {
        match self {
            SupportedLang::English => include_str!("resources/en.ftl"),
            SupportedLang::Spanish => include_str!("resources/es.ftl"),
        }
    }
}

fn detect_system_lang() -> SupportedLang {
    sys_locale::get_locale()
        .and_then(|l| SupportedLang::from_code(&l))
        .unwrap_or(FALLBACK_LANG)
}

struct LocalizationManager {
    current: SupportedLang,
    bundles: HashMap<SupportedLang, Bundle>,
}

impl LocalizationManager {
    fn new() -> Self {
        let mut bundles: HashMap<SupportedLang, Bundle> = HashMap::new();
        for lang in [SupportedLang::English, SupportedLang::Spanish] {
            match build_bundle(lang) {
                Ok(bundle) => {
                    bundles.insert(lang, bundle);
                }
                Err(e) => log::error!("{e}"),
            }
        }
        Self {
            current: FALLBACK_LANG,
            bundles,
        }
    }

    fn set_current(&mut self, lang: SupportedLang) -> Result<(), LocalizationError> {
        if !self.bundles.contains_key(&lang) {
            return Err(LocalizationError::UnsupportedLanguage(lang.code().to_string()));
        }
        self.current = lang;
        Ok(())
    }

    fn format_in(&self, lang: SupportedLang, id: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&lang)?;
        let pattern = bundle.get_message(id)?.value()?;
        let mut errors = vec![];
        let s = bundle.format_pattern(pattern, args, &mut errors).to_string();
        if !errors.is_empty() {
            log::debug!("fluent errors for {id} ({}): {errors:?}", lang.code());
        }
        Some(s)
    }

    fn format_with_args(&self, id: &str, args: Option<&FluentArgs>) -> String {
        self.format_in(self.current, id, args)
            .or_else(|| self.format_in(FALLBACK_LANG, id, args))
            .unwrap_or_else(|| format!("[missing: {}]", id))
    }
}

fn build_bundle(lang: SupportedLang) -> Result<Bundle, LocalizationError> {
    let langid: LanguageIdentifier = lang
        .code()
        .parse()
        .map_err(|e| LocalizationError::InitError(format!("bad language id {}: {e}", lang.code())))?;
    let mut bundle: Bundle = FluentBundle::new(vec![langid]);
    // Isolation marks around placeables render as stray glyphs in egui.
    bundle.set_use_isolating(false);
    let res = FluentResource::try_new(lang.ftl_source().to_string()).map_err(|(_, errs)| {
        LocalizationError::InitError(format!("{} FTL parse errors: {errs:?}", lang.code()))
    })?;
    bundle
        .add_resource(res)
        .map_err(|errs| LocalizationError::InitError(format!("{} FTL conflicts: {errs:?}", lang.code())))?;
    Ok(bundle)
}

thread_local! {
    static LOCALIZATION: RefCell<LocalizationManager> = RefCell::new(LocalizationManager::new());
}

#[derive(Debug, Error)]
pub enum LocalizationError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Initialization error: {0}")]
    InitError(String),
}

/// Initialize localization system. If preferred_lang is None, system locale will be used.
pub fn initialize_localization(preferred_lang: Option<SupportedLang>) -> Result<(), LocalizationError> {
    let lang = preferred_lang.unwrap_or_else(detect_system_lang);
    LOCALIZATION.with(|cell| {
        let mut mgr = cell.borrow_mut();
        mgr.set_current(lang).or_else(|_| mgr.set_current(FALLBACK_LANG))
    })
}

/// Return current language.
pub fn current_language() -> SupportedLang {
    LOCALIZATION.with(|cell| cell.borrow().current)
}

/// Translate a message without arguments. Returns owned String.
pub fn translate(message_id: &str) -> String {
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(message_id, None))
}

/// Translate a message with named arguments. Pass counts as numbers
/// (`n.into()`) so plural selectors such as `[one]` match.
pub fn translate_with(message_id: &str, args: &[(&str, FluentValue<'_>)]) -> String {
    let mut fargs = FluentArgs::new();
    for (k, v) in args {
        fargs.set(*k, v.clone());
    }
    LOCALIZATION.with(|cell| cell.borrow().format_with_args(message_id, Some(&fargs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Notice;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_locale_codes() {
        assert_eq!(SupportedLang::from_code("es_ES.UTF-8"), Some(SupportedLang::Spanish));
        assert_eq!(SupportedLang::from_code("en-US"), Some(SupportedLang::English));
        assert_eq!(SupportedLang::from_code("ES"), Some(SupportedLang::Spanish));
        assert_eq!(SupportedLang::from_code("ru"), None);
        assert_eq!(SupportedLang::from_code(""), None);
    }

    #[test]
    fn every_notice_is_translated_in_every_language() {
        for lang in SupportedLang::iter() {
            initialize_localization(Some(lang)).unwrap();
            for notice in Notice::ALL {
                let text = translate(notice.message_id());
                assert!(!text.starts_with("[missing"), "{} missing in {}", notice.message_id(), lang.code());
            }
        }
    }

    #[test]
    fn spanish_notices_read_naturally() {
        initialize_localization(Some(SupportedLang::Spanish)).unwrap();
        assert_eq!(current_language(), SupportedLang::Spanish);
        assert_eq!(translate("notice-not-found"), "No se encontró ningún cóctel.");
        assert_eq!(translate("notice-empty-query"), "Por favor, escribe el nombre de un cóctel.");
    }

    #[test]
    fn unknown_id_is_marked_missing() {
        initialize_localization(Some(SupportedLang::English)).unwrap();
        assert_eq!(translate("no-such-message"), "[missing: no-such-message]");
    }

    #[test]
    fn arguments_are_substituted() {
        initialize_localization(Some(SupportedLang::English)).unwrap();
        let text = translate_with("about-version", &[("version", "0.1.0".into())]);
        assert_eq!(text, "Version 0.1.0");
    }

    #[test]
    fn numeric_count_selects_plural_form() {
        initialize_localization(Some(SupportedLang::English)).unwrap();
        assert_eq!(translate_with("results-count", &[("count", 1usize.into())]), "1 cocktail");
        assert_eq!(translate_with("results-count", &[("count", 3usize.into())]), "3 cocktails");

        initialize_localization(Some(SupportedLang::Spanish)).unwrap();
        assert_eq!(translate_with("results-count", &[("count", 1usize.into())]), "1 cóctel");
        assert_eq!(translate_with("results-count", &[("count", 2usize.into())]), "2 cócteles");
    }
}
