//! Search URL templates.
//!
//! A template is an absolute `http` or `https` URL containing at least one
//! placeholder:
//!
//! - `{query}` is replaced by the query percent-encoded as a URL component.
//! - `{raw}` is replaced by the query verbatim, for path segments such as
//!   `/ip/{raw}` where the services expect the literal indicator.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::error::TemplateError;

const QUERY_PLACEHOLDER: &str = "{query}";
const RAW_PLACEHOLDER: &str = "{raw}";
const SAMPLE_QUERY: &str = "sample";

/// Characters left unescaped in `{query}` substitutions.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A validated search URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Validates `template` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingPlaceholder`] when the template has
    /// no placeholder, [`TemplateError::NotAUrl`] when substituting a sample
    /// query does not parse, and [`TemplateError::UnsupportedScheme`] when
    /// the result is not `http`/`https`.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        if !template.contains(QUERY_PLACEHOLDER) && !template.contains(RAW_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder {
                template: template.to_owned(),
            });
        }
        let candidate = Self(template.to_owned());
        let sample = candidate
            .render(SAMPLE_QUERY)
            .map_err(|source| TemplateError::NotAUrl {
                template: template.to_owned(),
                source,
            })?;
        match sample.scheme() {
            "http" | "https" => Ok(candidate),
            other => Err(TemplateError::UnsupportedScheme {
                template: template.to_owned(),
                scheme: other.to_owned(),
            }),
        }
    }

    /// Returns the template text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Substitutes `query` into the template.
    ///
    /// # Errors
    ///
    /// Returns the parser error when the substituted text is not a URL,
    /// which can happen when a `{raw}` placeholder receives characters that
    /// are invalid in its position.
    pub fn render(&self, query: &str) -> Result<Url, url::ParseError> {
        let encoded = utf8_percent_encode(query, COMPONENT).to_string();
        let rendered = self
            .0
            .replace(QUERY_PLACEHOLDER, &encoded)
            .replace(RAW_PLACEHOLDER, query);
        Url::parse(&rendered)
    }
}
