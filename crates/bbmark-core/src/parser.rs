use tracing::{trace, warn};

use crate::body::{Body, trim_leading_newline};
use crate::registry::TagRegistry;
use crate::scanner::Scanner;
use crate::tag::{RenderInput, TagDescriptor};

pub(crate) struct ParseOutcome {
    pub(crate) body: Body,
    pub(crate) unclosed: Vec<String>,
    pub(crate) depth_limited: bool,
}

/// Per-call parser state. Only the unclosed names and the depth flag
/// accumulate here; everything else flows through return values.
pub(crate) struct Parser<'r> {
    registry: &'r TagRegistry,
    scanner: Scanner,
    max_depth: usize,
    unclosed: Vec<String>,
    depth_limited: bool,
}

impl<'r> Parser<'r> {
    pub(crate) fn new(registry: &'r TagRegistry, scanner: Scanner, max_depth: usize) -> Self {
        Self {
            registry,
            scanner,
            max_depth,
            unclosed: Vec::new(),
            depth_limited: false,
        }
    }

    /// Parses already-escaped text at the root, where no tag is open.
    pub(crate) fn parse_document(mut self, escaped: &str) -> ParseOutcome {
        let (body, _) = self.parse_span(escaped, None, 0);
        ParseOutcome {
            body,
            unclosed: self.unclosed,
            depth_limited: self.depth_limited,
        }
    }

    /// Parses `span` until the close tag of `enclosing` (or the end of the
    /// input) and returns the body together with the text after that close.
    fn parse_span<'s>(
        &mut self,
        span: &'s str,
        enclosing: Option<&'r TagDescriptor>,
        depth: usize,
    ) -> (Body, &'s str) {
        let mut body = Body::new();
        let mut rest = span;
        loop {
            let Some(found) = self.scanner.next_tag(rest) else {
                body.push_text(rest);
                self.record_unclosed(enclosing);
                return (body, "");
            };
            body.push_text(&rest[..found.start]);
            let after = &rest[found.end..];

            let Some(tag) = self.registry.lookup(found.name) else {
                trace!(name = found.name, "unknown tag kept as text");
                body.push_text(found.raw);
                rest = after;
                continue;
            };

            if found.is_close {
                if enclosing.is_some_and(|open| open.name == tag.name) {
                    return (body, after);
                }
                trace!(name = tag.name, "stray close tag kept as text");
                body.push_text(found.raw);
                rest = after;
                continue;
            }

            if depth >= self.max_depth {
                warn!(
                    depth,
                    name = tag.name,
                    "nesting limit reached, keeping the rest as text"
                );
                self.depth_limited = true;
                body.push_text(&rest[found.start..]);
                self.record_unclosed(enclosing);
                return (body, "");
            }

            let (mut inner, mut remainder) = self.parse_body(tag, found.param, after, depth);
            let block = tag.layout.is_block(&inner);
            if block {
                inner.trim_leading_newline();
                remainder = trim_leading_newline(remainder);
            }
            let html = tag.render(RenderInput {
                body: inner,
                param: found.param,
                block,
            });
            body.push_element(tag.name, html);
            rest = remainder;
        }
    }

    fn parse_body<'s>(
        &mut self,
        tag: &'r TagDescriptor,
        param: Option<&str>,
        span: &'s str,
        depth: usize,
    ) -> (Body, &'s str) {
        if tag.body.is_literal(param.is_some()) {
            self.capture_literal_body(span, tag.name)
        } else {
            self.parse_span(span, Some(tag), depth + 1)
        }
    }

    /// Takes everything up to the first `[/name]`, compared ignoring ASCII
    /// case. Nothing inside is interpreted.
    fn capture_literal_body<'s>(&mut self, span: &'s str, name: &'static str) -> (Body, &'s str) {
        let close = format!("[/{}]", name);
        match find_ignore_ascii_case(span, &close) {
            Some(at) => (Body::text(&span[..at]), &span[at + close.len()..]),
            None => {
                self.unclosed.push(name.to_string());
                (Body::text(span), "")
            }
        }
    }

    fn record_unclosed(&mut self, enclosing: Option<&TagDescriptor>) {
        if let Some(tag) = enclosing {
            self.unclosed.push(tag.name.to_string());
        }
    }
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
