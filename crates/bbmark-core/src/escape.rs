/// Escapes raw markup so it can be embedded in HTML.
///
/// Trailing whitespace is dropped first. `<` and `>` are always replaced; a
/// bare `&` is replaced unless it already starts a character reference such
/// as `&amp;`, `&#169;` or `&#x41;`.
pub fn escape(raw: &str) -> String {
    let text = raw.trim_end();
    let mut out = String::with_capacity(text.len());
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' if !starts_char_ref(&text[idx + 1..]) => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Replaces `"` so a value can sit inside a double-quoted attribute.
///
/// Runs on text that already went through [`escape`], so `&` is left alone.
pub(crate) fn escape_attr_quotes(value: &str) -> String {
    value.replace('"', "&quot;")
}

fn starts_char_ref(rest: &str) -> bool {
    let name = rest.strip_prefix('#').unwrap_or(rest);
    let len = name.bytes().take_while(u8::is_ascii_alphanumeric).count();
    len > 0 && name.as_bytes().get(len) == Some(&b';')
}

/// Decodes numeric references and the few named ones browsers strip from
/// URL schemes. Everything else is kept as written.
pub(crate) fn decode_char_refs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let decoded = tail
            .find(';')
            .and_then(|end| decode_reference(&tail[..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let value = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        return char::from_u32(value);
    }
    match name.to_ascii_lowercase().as_str() {
        "tab" => Some('\t'),
        "newline" => Some('\n'),
        "colon" => Some(':'),
        _ => None,
    }
}
