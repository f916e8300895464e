//! Region codes accepted by the DuckDuckGo provider
//!
//! A region is a `<country>-<language>` pair sent as the `kl` parameter.
//! `wt-wt` means no region.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Region used when the caller does not pick one
pub const DEFAULT_REGION: &str = "wt-wt";

/// Supported regions, in the order they are advertised
pub const REGIONS: &[&str] = &[
    "xa-ar", "xa-en", "ar-es", "au-en", "at-de", "be-fr", "be-nl", "br-pt", "bg-bg", "ca-en",
    "ca-fr", "ct-ca", "cl-es", "cn-zh", "co-es", "hr-hr", "cz-cs", "dk-da", "ee-et", "fi-fi",
    "fr-fr", "de-de", "gr-el", "hk-tzh", "hu-hu", "in-en", "id-id", "id-en", "ie-en", "il-he",
    "it-it", "jp-jp", "kr-kr", "lv-lv", "lt-lt", "xl-es", "my-ms", "my-en", "mx-es", "nl-nl",
    "nz-en", "no-no", "pe-es", "ph-en", "ph-tl", "pl-pl", "pt-pt", "ro-ro", "ru-ru", "sg-en",
    "sk-sk", "sl-sl", "za-en", "es-es", "se-sv", "ch-de", "ch-fr", "ch-it", "tw-tzh", "th-th",
    "tr-tr", "ua-uk", "uk-en", "us-en", "ue-es", "ve-es", "vn-vi", "wt-wt",
];

static REGION_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| REGIONS.iter().copied().collect());

/// Check whether a region code is supported
pub fn is_supported_region(code: &str) -> bool {
    REGION_SET.contains(code)
}

/// Language part of a region code (`"de-de"` -> `"de"`)
pub fn region_language(code: &str) -> Option<&str> {
    code.split_once('-').map(|(_, lang)| lang)
}

/// Accept-Language value matching a region
pub fn accept_language_for(region: &str) -> String {
    let country = region.split('-').next().unwrap_or_default();
    match region_language(region) {
        Some("wt") | None => "en-US,en;q=0.9".to_string(),
        Some(lang) => {
            // Traditional Chinese regions carry a `tzh` language tag
            let lang = if lang == "tzh" { "zh" } else { lang };
            format!(
                "{}-{},{};q=0.9,en;q=0.8",
                lang,
                country.to_uppercase(),
                lang
            )
        }
    }
}
