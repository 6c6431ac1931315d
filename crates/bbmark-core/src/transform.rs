use tracing::debug;

use crate::escape::escape;
use crate::options::TransformOptions;
use crate::parser::Parser;
use crate::registry::TagRegistry;
use crate::scanner::Scanner;

/// Result of one transformation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Transformed {
    pub html: String,
    /// Tags left open at the end of the input, innermost first.
    pub unclosed: Vec<String>,
    /// Set when the nesting limit stopped tag interpretation.
    pub depth_limited: bool,
}

impl Transformed {
    pub fn innermost_unclosed(&self) -> Option<&str> {
        self.unclosed.first().map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Transformer<'r> {
    registry: &'r TagRegistry,
    scanner: Scanner,
    options: TransformOptions,
}

impl Transformer<'static> {
    pub fn new(options: TransformOptions) -> Self {
        Self::with_registry(TagRegistry::shared(), options)
    }
}

impl Default for Transformer<'static> {
    fn default() -> Self {
        Self::new(TransformOptions::default())
    }
}

impl<'r> Transformer<'r> {
    pub fn with_registry(registry: &'r TagRegistry, options: TransformOptions) -> Self {
        Self {
            registry,
            scanner: Scanner::new(options.param_grammar),
            options,
        }
    }

    /// Converts bracket-tag markup to HTML. Never fails: anything that is
    /// not a well-formed registered tag ends up as escaped text.
    pub fn transform(&self, markup: &str) -> Transformed {
        let escaped = escape(markup);
        let outcome =
            Parser::new(self.registry, self.scanner, self.options.max_depth).parse_document(&escaped);
        debug!(
            input_len = markup.len(),
            unclosed = outcome.unclosed.len(),
            depth_limited = outcome.depth_limited,
            "transformed markup"
        );
        Transformed {
            html: outcome.body.into_html(),
            unclosed: outcome.unclosed,
            depth_limited: outcome.depth_limited,
        }
    }

    /// The close tag an editor would insert at `cursor`: the innermost tag
    /// still open in the text before it. `cursor` is a byte offset and is
    /// moved back to the nearest char boundary.
    pub fn suggest_close(&self, markup: &str, cursor: usize) -> Option<String> {
        let mut end = cursor.min(markup.len());
        while !markup.is_char_boundary(end) {
            end -= 1;
        }
        self.transform(&markup[..end])
            .innermost_unclosed()
            .map(|name| format!("[/{}]", name))
    }
}

/// Transforms with default options and the shared tag registry.
pub fn transform(markup: &str) -> Transformed {
    Transformer::default().transform(markup)
}

pub fn suggest_close(markup: &str, cursor: usize) -> Option<String> {
    Transformer::default().suggest_close(markup, cursor)
}
