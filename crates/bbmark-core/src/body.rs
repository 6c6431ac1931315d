/// One run of a parsed body: escaped literal text, or an element that has
/// already been rendered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Piece {
    Text(String),
    Element { tag: &'static str, html: String },
}

/// The parsed content of a tag (or of the whole document).
///
/// Adjacent text is merged on push, so a body never holds two `Text` pieces
/// in a row and never holds an empty one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Body {
    pieces: Vec<Piece>,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: &str) -> Self {
        let mut body = Self::new();
        body.push_text(text);
        body
    }

    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Piece::Text(last)) = self.pieces.last_mut() {
            last.push_str(text);
        } else {
            self.pieces.push(Piece::Text(text.to_string()));
        }
    }

    pub fn push_element(&mut self, tag: &'static str, html: String) {
        self.pieces.push(Piece::Element { tag, html });
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn starts_with_newline(&self) -> bool {
        matches!(self.pieces.first(), Some(Piece::Text(text)) if newline_len(text) > 0)
    }

    /// Drops a single leading `\n` or `\r\n`.
    pub fn trim_leading_newline(&mut self) {
        if let Some(Piece::Text(text)) = self.pieces.first_mut() {
            let len = newline_len(text);
            if len == 0 {
                return;
            }
            text.drain(..len);
            if text.is_empty() {
                self.pieces.remove(0);
            }
        }
    }

    /// Trims whitespace from the outer text runs. Rendered elements are
    /// never touched.
    pub fn trim(&mut self) {
        if let Some(Piece::Text(text)) = self.pieces.first_mut() {
            let cut = text.len() - text.trim_start().len();
            text.drain(..cut);
        }
        if let Some(Piece::Text(text)) = self.pieces.last_mut() {
            let len = text.trim_end().len();
            text.truncate(len);
        }
        self.pieces
            .retain(|piece| !matches!(piece, Piece::Text(text) if text.is_empty()));
    }

    pub fn text_contains(&self, needle: &str) -> bool {
        self.pieces
            .iter()
            .any(|piece| matches!(piece, Piece::Text(text) if text.contains(needle)))
    }

    /// Splits the body at every occurrence of `separator` inside its text
    /// runs. Elements stay whole in whichever segment they fall into.
    pub fn split_text(self, separator: &str) -> Vec<Body> {
        let mut segments = Vec::new();
        let mut current = Body::new();
        for piece in self.pieces {
            match piece {
                Piece::Text(text) => {
                    let mut parts = text.split(separator);
                    if let Some(first) = parts.next() {
                        current.push_text(first);
                    }
                    for part in parts {
                        segments.push(std::mem::take(&mut current));
                        current.push_text(part);
                    }
                }
                element => current.pieces.push(element),
            }
        }
        segments.push(current);
        segments
    }

    pub fn into_html(self) -> String {
        let mut out = String::new();
        for piece in self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(&text),
                Piece::Element { html, .. } => out.push_str(&html),
            }
        }
        out
    }
}

pub(crate) fn trim_leading_newline(text: &str) -> &str {
    &text[newline_len(text)..]
}

fn newline_len(text: &str) -> usize {
    if text.starts_with("\r\n") {
        2
    } else if text.starts_with('\n') {
        1
    } else {
        0
    }
}
