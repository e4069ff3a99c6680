//! Hugo shortcode and HTML attribute formatting.
//!
//! Shortcode parameter values are always double quoted. Backslashes and double
//! quotes inside a value are backslash escaped, which Hugo unescapes when it
//! reads the parameter.

use std::fmt::Write as _;

/// An opening shortcode tag under construction, e.g. `{{< figure src="a.jpg" >}}`.
#[derive(Debug, Clone)]
pub struct Shortcode {
    tag: String,
}

impl Shortcode {
    /// Start a shortcode named `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            tag: format!("{{{{< {name}"),
        }
    }

    /// Add a quoted parameter.
    #[must_use]
    pub fn param(mut self, name: &str, value: &str) -> Self {
        let _ = write!(self.tag, " {name}=\"{}\"", escape_param(value));
        self
    }

    /// Add a quoted parameter if `value` is present and not empty.
    #[must_use]
    pub fn optional_param(self, name: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Finish the opening tag.
    #[must_use]
    pub fn build(self) -> String {
        format!("{} >}}}}", self.tag)
    }
}

/// Closing tag for a paired shortcode, e.g. `{{< /gallery >}}`.
#[must_use]
pub fn closing(name: &str) -> String {
    format!("{{{{< /{name} >}}}}")
}

/// Escape a shortcode parameter value.
#[must_use]
pub fn escape_param(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape text for use inside a double-quoted HTML attribute.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use as HTML element content.
#[must_use]
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
