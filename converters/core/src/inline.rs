//! Markdown forms of mobiledoc inline markups.
//!
//! Markups without a Markdown equivalent (`u`, `sub`, `sup`) fall back to the
//! inline HTML tag, which Hugo's renderer passes through when unsafe HTML is
//! enabled. Unknown tags render their text without any wrapper.

use mobiledoc_parser::Markup;

/// Opening delimiter for a markup.
#[must_use]
pub fn open(markup: &Markup) -> &'static str {
    match markup.tag.as_str() {
        "strong" | "b" => "**",
        "em" | "i" => "*",
        "code" => "`",
        "s" | "strike" | "del" => "~~",
        "u" => "<u>",
        "sub" => "<sub>",
        "sup" => "<sup>",
        "a" => "[",
        _ => "",
    }
}

/// Closing delimiter for a markup.
#[must_use]
pub fn close(markup: &Markup) -> String {
    match markup.tag.as_str() {
        "a" => format!(
            "]({})",
            link_destination(markup.attribute("href").unwrap_or_default())
        ),
        "u" => "</u>".to_string(),
        "sub" => "</sub>".to_string(),
        "sup" => "</sup>".to_string(),
        _ => open(markup).to_string(),
    }
}

/// A link destination as Markdown accepts it. Destinations with spaces,
/// parentheses or angle brackets are wrapped in `<...>`.
fn link_destination(href: &str) -> String {
    let needs_brackets =
        href.contains(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'));
    if !needs_brackets {
        return href.to_string();
    }
    let escaped = href
        .replace('\\', "\\\\")
        .replace('<', "\\<")
        .replace('>', "\\>")
        .replace('\n', "%0A")
        .replace('\r', "%0D");
    format!("<{escaped}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markup(tag: &str) -> Markup {
        Markup {
            tag: tag.to_string(),
            attributes: Vec::new(),
        }
    }

    #[rstest::rstest]
    #[case("strong", "**", "**")]
    #[case("b", "**", "**")]
    #[case("em", "*", "*")]
    #[case("code", "`", "`")]
    #[case("s", "~~", "~~")]
    #[case("sup", "<sup>", "</sup>")]
    #[case("mark", "", "")]
    fn test_delimiters(#[case] tag: &str, #[case] opening: &str, #[case] closing: &str) {
        let markup = markup(tag);
        assert_eq!(open(&markup), opening);
        assert_eq!(close(&markup), closing);
    }

    #[test]
    fn test_link_delimiters() {
        let link = Markup {
            tag: "a".to_string(),
            attributes: vec![("href".to_string(), "https://ghost.org".to_string())],
        };
        assert_eq!(open(&link), "[");
        assert_eq!(close(&link), "](https://ghost.org)");
        assert_eq!(close(&markup("a")), "]()");
    }

    #[rstest::rstest]
    #[case("https://en.wikipedia.org/wiki/Rust_(language)", "](<https://en.wikipedia.org/wiki/Rust_(language)>)")]
    #[case("/my post.html", "](</my post.html>)")]
    #[case("https://x.io/?q=<a>", r"](<https://x.io/?q=\<a\>>)")]
    #[case("https://x.io/a\nb", "](<https://x.io/a%0Ab>)")]
    fn test_link_destination_escaping(#[case] href: &str, #[case] expected: &str) {
        let link = Markup {
            tag: "a".to_string(),
            attributes: vec![("href".to_string(), href.to_string())],
        };
        assert_eq!(close(&link), expected);
    }
}
