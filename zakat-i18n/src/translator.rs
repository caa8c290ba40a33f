use std::sync::Arc;

use fluent_bundle::bundle::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

use crate::formatter::ZakatLocale;

#[derive(RustEmbed)]
#[folder = "assets/locales"]
struct Asset;

type Bundle = FluentBundle<FluentResource, intl_memoizer::concurrent::IntlLangMemoizer>;

/// Resolves user-facing text from the embedded Fluent resource.
///
/// Missing keys resolve to `MISSING:<key>` rather than failing.
#[derive(Clone)]
pub struct Translator {
    locale: ZakatLocale,
    bundle: Arc<Bundle>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator").field("locale", &self.locale).finish()
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(ZakatLocale::default())
    }
}

impl Translator {
    pub fn new(locale: ZakatLocale) -> Self {
        let code = locale.as_str();
        let lang_id: LanguageIdentifier = code.parse().unwrap_or_else(|e| {
            tracing::warn!("Invalid language id {}: {}", code, e);
            LanguageIdentifier::default()
        });

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        // Dialog text goes to alert() and the clipboard verbatim.
        bundle.set_use_isolating(false);

        let file_path = format!("{}/main.ftl", code);
        match Asset::get(&file_path) {
            Some(file) => {
                let source = String::from_utf8_lossy(file.data.as_ref()).into_owned();
                let resource = FluentResource::try_new(source).unwrap_or_else(|(resource, errors)| {
                    tracing::warn!("{} parse errors in {}: {:?}", errors.len(), file_path, errors);
                    resource
                });
                if let Err(errors) = bundle.add_resource(resource) {
                    tracing::warn!("Duplicate messages in {}: {:?}", file_path, errors);
                }
            }
            None => tracing::warn!("Translation file not found for {}", code),
        }

        Translator {
            locale,
            bundle: Arc::new(bundle),
        }
    }

    pub fn locale(&self) -> ZakatLocale {
        self.locale
    }

    pub fn translate(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Resolves `key` with string arguments, e.g. `[("amount", "RM 57.50")]`.
    pub fn translate_with(&self, key: &str, args: &[(&'static str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, value.to_string());
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let Some(pattern) = self.bundle.get_message(key).and_then(|msg| msg.value()) else {
            tracing::warn!("Missing translation key {}", key);
            return format!("MISSING:{}", key);
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::debug!("Formatting {} reported {:?}", key, errors);
        }
        value.into_owned()
    }
}

pub fn default_translator() -> Translator {
    Translator::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        let t = Translator::default();
        assert_eq!(t.translate("tab-emas"), "Emas/Perak");
        assert_eq!(t.translate("results-heading"), "Hasil");
    }

    #[test]
    fn test_message_with_args_has_no_isolation_marks() {
        let t = Translator::default();
        assert_eq!(
            t.translate_with("alert-copied", &[("value", "RM 690.00")]),
            "Disalin: RM 690.00"
        );
        assert_eq!(t.translate_with("placeholder-example", &[("value", "5000")]), "cth: 5000");
    }

    #[test]
    fn test_missing_key() {
        let t = Translator::default();
        assert_eq!(t.translate("no-such-key"), "MISSING:no-such-key");
    }
}
