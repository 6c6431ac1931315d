use std::fmt;

use crate::body::Body;

/// How the body of a tag is read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BodyMode {
    /// Parsed for nested tags.
    Recursive,
    /// Captured verbatim up to the first `[/name]`.
    Literal,
    /// Literal without a parameter, recursive with one (`[url]`).
    LiteralUnlessParam,
}

impl BodyMode {
    pub fn is_literal(self, has_param: bool) -> bool {
        match self {
            BodyMode::Recursive => false,
            BodyMode::Literal => true,
            BodyMode::LiteralUnlessParam => !has_param,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Layout {
    Inline,
    /// Always block; trims one leading line break from the body and from
    /// the text after the close tag.
    Block,
    /// Block only when the body starts with a line break.
    Contextual,
}

impl Layout {
    pub fn is_block(self, body: &Body) -> bool {
        match self {
            Layout::Inline => false,
            Layout::Block => true,
            Layout::Contextual => body.starts_with_newline(),
        }
    }
}

/// Everything a renderer gets for one tag occurrence.
#[derive(Clone, Debug)]
pub struct RenderInput<'a> {
    pub body: Body,
    pub param: Option<&'a str>,
    pub block: bool,
}

pub type RenderFn = fn(&TagDescriptor, RenderInput<'_>) -> String;

#[derive(Clone, Copy)]
pub struct TagDescriptor {
    pub name: &'static str,
    pub body: BodyMode,
    pub layout: Layout,
    pub default_param: Option<&'static str>,
    pub renderer: RenderFn,
}

impl TagDescriptor {
    pub(crate) fn new(name: &'static str, renderer: RenderFn) -> Self {
        Self {
            name,
            body: BodyMode::Recursive,
            layout: Layout::Inline,
            default_param: None,
            renderer,
        }
    }

    pub(crate) fn body_mode(mut self, body: BodyMode) -> Self {
        self.body = body;
        self
    }

    pub(crate) fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub(crate) fn default_param(mut self, param: &'static str) -> Self {
        self.default_param = Some(param);
        self
    }

    /// The given parameter, or this tag's fallback when there is none.
    pub fn param_or_default<'a>(&self, param: Option<&'a str>) -> Option<&'a str> {
        param.or(self.default_param)
    }

    pub fn render(&self, input: RenderInput<'_>) -> String {
        (self.renderer)(self, input)
    }
}

impl fmt::Debug for TagDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagDescriptor")
            .field("name", &self.name)
            .field("body", &self.body)
            .field("layout", &self.layout)
            .field("default_param", &self.default_param)
            .finish_non_exhaustive()
    }
}
