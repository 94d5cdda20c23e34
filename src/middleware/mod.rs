pub mod locale;

pub use locale::{ActiveLocale, LocaleResolver, Translations, locale_middleware};
