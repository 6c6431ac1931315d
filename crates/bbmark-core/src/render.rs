use once_cell::sync::Lazy;
use regex::Regex;

use crate::body::{Body, Piece};
use crate::escape::{decode_char_refs, escape_attr_quotes};
use crate::tag::{RenderInput, TagDescriptor};

/// Link target substituted for `javascript:` URLs.
pub const NEUTRAL_HREF: &str = "about:blank";

/// Inline marker that separates list items, as in `[list][*]a[*]b[/list]`.
pub const ITEM_MARKER: &str = "[*]";

const BASE_SIZE_PT: &str = "14";
const SMALL_SIZE_PT: &str = "8";
const LARGE_SIZE_PT: &str = "24";

static IMG_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)h?$").expect("valid image height pattern"));
static IMG_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)w$").expect("valid image width pattern"));
static IMG_WIDTH_HEIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)x([0-9]+)$|^([0-9]+)w([0-9]+)h$").expect("valid image size pattern")
});

pub(crate) fn render_style(tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    format!("<{0}>{1}</{0}>", tag.name, input.body.into_html())
}

pub(crate) fn render_align(tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    format!(
        "<div style=\"text-align: {};\">{}</div>",
        tag.name,
        input.body.into_html()
    )
}

pub(crate) fn render_font(tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    let family = tag.param_or_default(input.param).unwrap_or_default();
    format!(
        "<span style=\"font-family: {};\">{}</span>",
        escape_attr_quotes(family),
        input.body.into_html()
    )
}

pub(crate) fn render_color(tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    let color = tag.param_or_default(input.param).unwrap_or_default();
    format!(
        "<span style=\"color: {};\">{}</span>",
        escape_attr_quotes(color),
        input.body.into_html()
    )
}

pub(crate) fn render_highlight(tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    let color = tag.param_or_default(input.param).unwrap_or_default();
    let element = block_element(input.block);
    format!(
        "<{0} style=\"background-color: {1};\">{2}</{0}>",
        element,
        escape_attr_quotes(color),
        input.body.into_html()
    )
}

pub(crate) fn render_size(_tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    let element = block_element(input.block);
    format!(
        "<{0} style=\"font-size: {1}pt;\">{2}</{0}>",
        element,
        size_pt(input.param),
        input.body.into_html()
    )
}

pub(crate) fn render_url(_tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    let body = input.body.into_html();
    let target = input.param.unwrap_or(body.as_str()).trim();
    let href = if is_script_target(target) {
        NEUTRAL_HREF
    } else {
        target
    };
    format!("<a href=\"{}\">{}</a>", escape_attr_quotes(href), body)
}

pub(crate) fn render_img(_tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    let src = input.body.into_html();
    let (width, height) = input.param.map(image_size).unwrap_or_default();
    let mut out = String::from("<img");
    if let Some(width) = width {
        out.push_str(&format!(" width=\"{}\"", width));
    }
    if let Some(height) = height {
        out.push_str(&format!(" height=\"{}\"", height));
    }
    out.push_str(&format!(" src=\"{}\" />", escape_attr_quotes(&src)));
    out
}

pub(crate) fn render_quote(_tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    format!("<blockquote>{}</blockquote>", input.body.into_html())
}

pub(crate) fn render_list(_tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    let items = list_items(input.body);
    match input.param {
        None => format!("<ul>{}</ul>", items),
        Some(param) => match integer_prefix(param) {
            Some(start) if exceeds_one(start) => {
                format!("<ol type=\"1\" start=\"{}\">{}</ol>", start, items)
            }
            _ => format!("<ol type=\"{}\">{}</ol>", escape_attr_quotes(param), items),
        },
    }
}

pub(crate) fn render_list_item(_tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    format!("<li>{}</li>", input.body.into_html())
}

pub(crate) fn render_code(_tag: &TagDescriptor, input: RenderInput<'_>) -> String {
    format!("<pre>{}</pre>", input.body.into_html())
}

fn block_element(block: bool) -> &'static str {
    if block { "div" } else { "span" }
}

/// Point size for `[size=…]`. A numeric parameter contributes its integer
/// prefix as written, so `12.9` is 12 and `1e3` is 1.
fn size_pt(param: Option<&str>) -> &str {
    let Some(param) = param.map(str::trim) else {
        return BASE_SIZE_PT;
    };
    if is_numeric(param) {
        return integer_prefix(param).unwrap_or(BASE_SIZE_PT);
    }
    if param.eq_ignore_ascii_case("small") {
        SMALL_SIZE_PT
    } else if param.eq_ignore_ascii_case("large") {
        LARGE_SIZE_PT
    } else {
        BASE_SIZE_PT
    }
}

fn is_numeric(param: &str) -> bool {
    param.parse::<f64>().is_ok_and(f64::is_finite)
        && !param
            .chars()
            .any(|ch| ch.is_ascii_alphabetic() && !ch.eq_ignore_ascii_case(&'e'))
}

fn is_script_target(target: &str) -> bool {
    const SCHEME: &str = "javascript";
    let mut scheme = String::new();
    for ch in decode_char_refs(target).chars() {
        if ch.is_whitespace() || ch.is_control() {
            continue;
        }
        scheme.push(ch.to_ascii_lowercase());
        if scheme.len() >= SCHEME.len() {
            break;
        }
    }
    scheme == SCHEME
}

/// Width and height from an `[img=…]` parameter. Unknown forms give neither.
fn image_size(param: &str) -> (Option<&str>, Option<&str>) {
    if let Some(caps) = IMG_HEIGHT.captures(param) {
        return (None, caps.get(1).map(|m| m.as_str()));
    }
    if let Some(caps) = IMG_WIDTH.captures(param) {
        return (caps.get(1).map(|m| m.as_str()), None);
    }
    if let Some(caps) = IMG_WIDTH_HEIGHT.captures(param) {
        let width = caps.get(1).or_else(|| caps.get(3)).map(|m| m.as_str());
        let height = caps.get(2).or_else(|| caps.get(4)).map(|m| m.as_str());
        return (width, height);
    }
    (None, None)
}

/// Signed digit run at the start of `param`, as written: `"3rd"` gives
/// `"3"`, `"-2"` gives `"-2"`, `"+5"` gives `"5"`. Never overflows.
fn integer_prefix(param: &str) -> Option<&str> {
    let trimmed = param.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    Some(if negative {
        &trimmed[..len + 1]
    } else {
        &digits[..len]
    })
}

fn exceeds_one(integer: &str) -> bool {
    if integer.starts_with('-') {
        return false;
    }
    let significant = integer.trim_start_matches('0');
    significant.len() > 1 || significant > "1"
}

/// Turns a list body into `<li>` items.
///
/// With an explicit `[*]` marker the body is split at the markers, otherwise
/// at line breaks. Only literal text is split. Blank items are dropped and
/// items that are already rendered `[li]` elements are kept as they are.
fn list_items(body: Body) -> String {
    let separator = if body.text_contains(ITEM_MARKER) {
        ITEM_MARKER
    } else {
        "\n"
    };
    let mut out = String::new();
    for mut item in body.split_text(separator) {
        item.trim();
        if item.is_empty() {
            continue;
        }
        match rendered_items(&item) {
            Some(items) => out.push_str(&items),
            None => {
                out.push_str("<li>");
                out.push_str(&item.into_html());
                out.push_str("</li>");
            }
        }
    }
    out
}

/// A segment made only of rendered `[li]` elements, optionally separated by
/// blank text, is already itemized. Returns those items in order.
fn rendered_items(segment: &Body) -> Option<String> {
    let mut out = String::new();
    for piece in segment.pieces() {
        match piece {
            Piece::Element { tag: "li", html } => out.push_str(html),
            Piece::Text(text) if text.trim().is_empty() => {}
            _ => return None,
        }
    }
    if out.is_empty() { None } else { Some(out) }
}

#[cfg(test)]
mod tests {
    use super::{
        exceeds_one, image_size, integer_prefix, is_script_target, list_items, size_pt,
    };
    use crate::body::Body;

    #[test]
    fn size_parameter_forms() {
        assert_eq!(size_pt(None), "14");
        assert_eq!(size_pt(Some("20")), "20");
        assert_eq!(size_pt(Some(" 7 ")), "7");
        assert_eq!(size_pt(Some("12.9")), "12");
        assert_eq!(size_pt(Some("-3")), "-3");
        assert_eq!(size_pt(Some("SMALL")), "8");
        assert_eq!(size_pt(Some("large")), "24");
        assert_eq!(size_pt(Some("10 pt")), "14");
        assert_eq!(size_pt(Some("NaN")), "14");
        assert_eq!(size_pt(Some("inf")), "14");
        assert_eq!(size_pt(Some(".5")), "14");
    }

    #[test]
    fn size_takes_integer_prefix_of_numbers() {
        assert_eq!(size_pt(Some("1e3")), "1");
        assert_eq!(size_pt(Some("2E1")), "2");
        assert_eq!(size_pt(Some("+16")), "16");
        assert_eq!(
            size_pt(Some("99999999999999999999999")),
            "99999999999999999999999"
        );
    }

    #[test]
    fn script_targets_are_detected() {
        assert!(is_script_target("javascript:alert(1)"));
        assert!(is_script_target("JavaScript:void(0)"));
        assert!(is_script_target(" java\tscript:x"));
        assert!(is_script_target("&#106;avascript:x"));
        assert!(is_script_target("&#x6A;ava&Tab;script:x"));
        assert!(!is_script_target("http://javascript.info"));
        assert!(!is_script_target("java"));
        assert!(!is_script_target(""));
    }

    #[test]
    fn image_size_forms() {
        assert_eq!(image_size("100"), (None, Some("100")));
        assert_eq!(image_size("100h"), (None, Some("100")));
        assert_eq!(image_size("80w"), (Some("80"), None));
        assert_eq!(image_size("100x50"), (Some("100"), Some("50")));
        assert_eq!(image_size("30w40h"), (Some("30"), Some("40")));
        assert_eq!(image_size("30w40"), (None, None));
        assert_eq!(image_size("big"), (None, None));
        assert_eq!(image_size("١٢"), (None, None));
    }

    #[test]
    fn integer_prefix_is_kept_as_written() {
        assert_eq!(integer_prefix("3"), Some("3"));
        assert_eq!(integer_prefix(" 12th"), Some("12"));
        assert_eq!(integer_prefix("-2"), Some("-2"));
        assert_eq!(integer_prefix("+7"), Some("7"));
        assert_eq!(integer_prefix("007"), Some("007"));
        assert_eq!(integer_prefix("a"), None);
        assert_eq!(integer_prefix("I"), None);
        assert_eq!(integer_prefix("-"), None);
    }

    #[test]
    fn list_start_must_exceed_one() {
        assert!(exceeds_one("2"));
        assert!(exceeds_one("10"));
        assert!(exceeds_one("002"));
        assert!(exceeds_one("99999999999999999999999"));
        assert!(!exceeds_one("1"));
        assert!(!exceeds_one("0001"));
        assert!(!exceeds_one("0"));
        assert!(!exceeds_one("-5"));
    }

    #[test]
    fn list_lines_become_items() {
        let body = Body::text("Lions\n\n  Tigers  \r\nBears");
        assert_eq!(
            list_items(body),
            "<li>Lions</li><li>Tigers</li><li>Bears</li>"
        );
    }

    #[test]
    fn list_marker_takes_precedence_over_lines() {
        let body = Body::text("[*]one\ncontinued [*] two\n");
        assert_eq!(list_items(body), "<li>one\ncontinued</li><li>two</li>");
    }

    #[test]
    fn rendered_items_are_not_wrapped_again() {
        let mut body = Body::text("\n");
        body.push_element("li", "<li>a</li>".to_string());
        body.push_text("\n ");
        body.push_element("b", "<b>b</b>".to_string());
        body.push_text("\n");
        assert_eq!(list_items(body), "<li>a</li><li><b>b</b></li>");
    }

    #[test]
    fn several_rendered_items_on_one_line_stay_flat() {
        let mut body = Body::new();
        body.push_element("li", "<li>a</li>".to_string());
        body.push_text(" ");
        body.push_element("li", "<li>b</li>".to_string());
        body.push_text("\n");
        body.push_element("b", "<b>c</b>".to_string());
        assert_eq!(list_items(body), "<li>a</li><li>b</li><li><b>c</b></li>");
    }
}
