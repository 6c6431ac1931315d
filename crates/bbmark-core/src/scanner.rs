use once_cell::sync::Lazy;
use regex::Regex;

static LOOSE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(/?)([A-Za-z]+)(?:=([^\]]+))?\]").expect("valid tag pattern")
});
static STRICT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(/?)([A-Za-z]+)(?:=([^\]\s]+))?\]").expect("valid tag pattern")
});

/// Which characters a tag parameter may contain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ParamGrammar {
    /// Anything except `]`, so `[size=10 pt]` is a tag.
    #[default]
    Loose,
    /// Anything except `]` and whitespace.
    Strict,
}

/// A bracket tag found in a span. Offsets are byte offsets into that span.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TagMatch<'s> {
    pub start: usize,
    pub end: usize,
    pub is_close: bool,
    pub name: &'s str,
    pub param: Option<&'s str>,
    pub raw: &'s str,
}

#[derive(Clone, Copy, Debug)]
pub struct Scanner {
    pattern: &'static Regex,
}

impl Scanner {
    pub fn new(grammar: ParamGrammar) -> Self {
        let pattern = match grammar {
            ParamGrammar::Loose => &*LOOSE_TAG,
            ParamGrammar::Strict => &*STRICT_TAG,
        };
        Self { pattern }
    }

    /// Leftmost tag in `span`, open or close, registered or not.
    pub fn next_tag<'s>(&self, span: &'s str) -> Option<TagMatch<'s>> {
        let caps = self.pattern.captures(span)?;
        let full = caps.get(0)?;
        let name = caps.get(2)?;
        Some(TagMatch {
            start: full.start(),
            end: full.end(),
            is_close: caps.get(1).is_some_and(|slash| !slash.is_empty()),
            name: name.as_str(),
            param: caps.get(3).map(|param| param.as_str()),
            raw: full.as_str(),
        })
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ParamGrammar::default())
    }
}
