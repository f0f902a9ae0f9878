use std::collections::BTreeMap;

/// Placeholder for the client's logo reference.
pub const LOGO: &str = "logo";
/// Placeholder for the client or brand name.
pub const CLIENT_NAME: &str = "client_name";
/// Placeholder for the brand tagline.
pub const CLIENT_TAGLINE: &str = "client_tagline";
/// Placeholder for the main marketing message.
pub const MAIN_MESSAGE: &str = "main_message";
/// Placeholder for the call-to-action label.
pub const CTA_TEXT: &str = "cta_text";
/// Placeholder for the client's website.
pub const CLIENT_WEBSITE: &str = "client_website";

/// Values substituted into `{{token}}` placeholders of element content.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ContentVars(BTreeMap<String, String>);

impl ContentVars {
    /// Empty variable set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Replace every `{{key}}` with its non-empty value. Unknown tokens are kept.
    pub fn substitute(&self, content: &str) -> String {
        let mut out = content.to_string();
        for (k, v) in &self.0 {
            if v.trim().is_empty() {
                continue;
            }
            let token = format!("{{{{{k}}}}}");
            if out.contains(&token) {
                out = out.replace(&token, v);
            }
        }
        out
    }

    /// Substitute and return drawable content, or `None` when nothing usable remains.
    pub fn resolve(&self, content: &str) -> Option<String> {
        drawable(&self.substitute(content)).map(str::to_string)
    }
}

/// Trimmed `content`, or `None` when it is blank or still an unresolved `{{placeholder}}`.
pub(crate) fn drawable(content: &str) -> Option<&str> {
    let s = content.trim();
    if s.is_empty() || s.starts_with("{{") {
        return None;
    }
    Some(s)
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContentVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/vars.rs"]
mod tests;
