//! Job-link canonicalization.

use url::Url;

/// Query keys that only carry tracking/referral data.
const TRACKING_KEYS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "yclid",
    "gclid",
    "fbclid",
    "from",
    "source",
    "ref",
    "referer",
    "tracking",
    "track",
    "roistat",
    "roistat_referrer",
    "roistat_pos",
    "roistat_visit",
    "rs",
    "rsid",
    "erid",
];

fn is_tracking_key(key: &str) -> bool {
    let key = key.to_lowercase();
    TRACKING_KEYS.contains(&key.as_str()) || key.starts_with("utm_") || key.starts_with("roistat")
}

/// Drop the fragment and tracking query parameters from a URL.
///
/// Unparseable input falls back to cutting at the first `#`.
pub fn strip_tracking_params(url_like: &str) -> String {
    let Ok(mut url) = Url::parse(url_like.trim()) else {
        return url_like.split('#').next().unwrap_or_default().to_string();
    };

    url.set_fragment(None);

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let kept: Vec<&(String, String)> = pairs.iter().filter(|(k, _)| !is_tracking_key(k)).collect();

    if kept.len() != pairs.len() {
        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
    }

    if url.query() == Some("") {
        url.set_query(None);
    }

    url.to_string()
}
