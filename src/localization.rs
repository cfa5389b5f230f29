use anyhow::Result;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use unic_langid::LanguageIdentifier;

const DEFAULT_LANGUAGE: &str = "en";

/// Catalogues compiled into the binary, keyed by language
const EMBEDDED_RESOURCES: &[(&str, &str)] = &[("en", include_str!("../locales/en/main.ftl"))];

/// Localization manager for the bot's replies
pub struct LocalizationManager {
    bundles: HashMap<String, Arc<FluentBundle<FluentResource>>>,
}

impl LocalizationManager {
    /// Create a new localization manager from the embedded catalogues
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (language, source) in EMBEDDED_RESOURCES {
            let locale: LanguageIdentifier = language.parse()?;
            let bundle = Self::create_bundle(&locale, source);
            bundles.insert(language.to_string(), Arc::new(bundle));
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier, source: &str) -> FluentBundle<FluentResource> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Replies go to chat clients verbatim, so no bidi isolation marks
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                warn!(locale = %locale, errors = ?errors, "Catalogue has syntax errors");
                resource
            }
        };
        if let Err(errors) = bundle.add_resource(resource) {
            warn!(locale = %locale, errors = ?errors, "Catalogue has conflicting entries");
        }

        bundle
    }

    /// Get a localized message
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        let Some(bundle) = self.bundles.get(DEFAULT_LANGUAGE) else {
            return format!("Missing translation: {key}");
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, *value);
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            warn!(key = %key, errors = ?errors, "Errors while formatting message");
        }

        value.into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message(key, Some(&args_map))
    }
}

lazy_static! {
    static ref LOCALIZATION_MANAGER: LocalizationManager =
        LocalizationManager::new().expect("Embedded catalogues should have valid language ids");
}

/// Get the global localization manager
pub fn get_localization_manager() -> &'static LocalizationManager {
    &LOCALIZATION_MANAGER
}

/// Convenience function to get a localized message
pub fn t(key: &str) -> String {
    get_localization_manager().get_message(key, None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)]) -> String {
    get_localization_manager().get_message_with_args(key, args)
}
