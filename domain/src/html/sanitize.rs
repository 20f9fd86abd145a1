//! Allow-list sanitizer for operator prompt HTML.

use scraper::{ElementRef, Html, Node};

/// Tags kept as markup. Anything else is flattened to its text content.
pub const ALLOWED_PROMPT_TAGS: &[&str] = &[
    "div", "span", "p", "br", "strong", "em", "b", "i", "u", "ul", "ol", "li", "h1", "h2", "h3",
    "h4",
];

pub const ALLOWED_PROMPT_CLASSES: &[&str] = &["prompt-pass", "prompt-fail", "prompt-large"];

pub const ALLOWED_PROMPT_STYLES: &[&str] = &["font-size", "font-weight", "color", "text-align"];

const UNSAFE_STYLE_MARKERS: &[&str] = &["url(", "expression(", "javascript:"];

/// Sanitize a prompt HTML fragment.
///
/// - comments are removed
/// - disallowed elements are replaced by their (escaped) text content
/// - only `class` and `style` attributes survive, each filtered to the
///   allow-lists above
pub fn sanitize_prompt_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::with_capacity(html.len());
    write_children(fragment.root_element(), &mut out);
    out
}

/// Convert a plain-text message to displayable HTML.
pub fn plain_text_to_html(message: &str) -> String {
    escape_html(message).replace('\n', "<br>")
}

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Filter an inline `style` attribute down to allowed, safe declarations.
///
/// Returns an empty string when nothing survives.
pub fn filter_inline_styles(style: &str) -> String {
    let mut safe_pairs = Vec::new();

    for chunk in style.split(';') {
        let chunk = chunk.trim();
        let Some((property, value)) = chunk.split_once(':') else {
            continue;
        };
        let property = property.trim().to_lowercase();
        let value = value.trim();

        if !ALLOWED_PROMPT_STYLES.contains(&property.as_str()) || !is_safe_style_value(value) {
            continue;
        }
        safe_pairs.push(format!("{}: {}", property, value));
    }

    safe_pairs.join("; ")
}

/// Filter a `class` attribute down to allowed class names.
pub fn filter_classes(class: &str) -> String {
    class
        .split_whitespace()
        .filter(|name| ALLOWED_PROMPT_CLASSES.contains(name))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_safe_style_value(value: &str) -> bool {
    let lowered = value.to_lowercase();
    !UNSAFE_STYLE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

fn write_children(parent: ElementRef<'_>, out: &mut String) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape_text(text)),
            Node::Element(element) => {
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let tag = element.name().to_ascii_lowercase();

                if !ALLOWED_PROMPT_TAGS.contains(&tag.as_str()) {
                    let text: String = child_ref.text().collect();
                    out.push_str(&escape_text(&text));
                    continue;
                }

                out.push('<');
                out.push_str(&tag);
                if let Some(class) = element.attr("class") {
                    let safe = filter_classes(class);
                    if !safe.is_empty() {
                        push_attr(out, "class", &safe);
                    }
                }
                if let Some(style) = element.attr("style") {
                    let safe = filter_inline_styles(style);
                    if !safe.is_empty() {
                        push_attr(out, "style", &safe);
                    }
                }
                out.push('>');

                // void element
                if tag == "br" {
                    continue;
                }

                write_children(child_ref, out);
                out.push_str("</");
                out.push_str(&tag);
                out.push('>');
            }
            // comments, doctypes and processing instructions are dropped
            _ => {}
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&value.replace('&', "&amp;").replace('"', "&quot;"));
    out.push('"');
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_banner_survives() {
        let html = r#"<div class="prompt-large prompt-pass" style="text-align:center;">PASS</div><div>Click Continue to proceed.</div>"#;
        assert_eq!(
            sanitize_prompt_html(html),
            r#"<div class="prompt-large prompt-pass" style="text-align: center">PASS</div><div>Click Continue to proceed.</div>"#
        );
    }

    #[test]
    fn test_disallowed_tags_become_text() {
        let html = r#"<p>Hi <a href="http://x">link</a></p><img src="x.png"><script>var a = 1 < 2;</script>"#;
        assert_eq!(
            sanitize_prompt_html(html),
            "<p>Hi link</p>var a = 1 &lt; 2;"
        );
    }

    #[test]
    fn test_comments_are_removed() {
        assert_eq!(sanitize_prompt_html("<b>ok</b><!-- secret -->"), "<b>ok</b>");
    }

    #[test]
    fn test_attributes_are_filtered() {
        let html = r#"<span id="x" onclick="steal()" class="evil">t</span>"#;
        assert_eq!(sanitize_prompt_html(html), "<span>t</span>");
    }

    #[test]
    fn test_br_is_void() {
        assert_eq!(sanitize_prompt_html("a<br>b"), "a<br>b");
    }

    #[test]
    fn test_nested_lists_are_kept() {
        let html = "<ul><li><strong>one</strong></li><li>two</li></ul>";
        assert_eq!(sanitize_prompt_html(html), html);
    }

    #[test]
    fn test_filter_inline_styles() {
        assert_eq!(
            filter_inline_styles("COLOR: red; background: blue; font-size:48px"),
            "color: red; font-size: 48px"
        );
        assert_eq!(
            filter_inline_styles("color: url(http://evil); font-weight: bold"),
            "font-weight: bold"
        );
        assert_eq!(filter_inline_styles("color: JavaScript:alert(1)"), "");
        assert_eq!(filter_inline_styles(";;nonsense;"), "");
        assert_eq!(filter_inline_styles(""), "");
    }

    #[test]
    fn test_style_value_keeps_extra_colons() {
        assert_eq!(
            filter_inline_styles("font-size: calc(1:2)"),
            "font-size: calc(1:2)"
        );
    }

    #[test]
    fn test_filter_classes() {
        assert_eq!(filter_classes("prompt-fail  other prompt-large"), "prompt-fail prompt-large");
        assert_eq!(filter_classes("other"), "");
    }

    #[test]
    fn test_plain_text_to_html() {
        assert_eq!(
            plain_text_to_html("Tom & \"Jerry\"\nit's <here>"),
            "Tom &amp; &quot;Jerry&quot;<br>it&#39;s &lt;here&gt;"
        );
    }
}
