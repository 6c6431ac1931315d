use crate::scanner::ParamGrammar;

/// Deepest tag nesting interpreted before the rest of the input is kept as
/// plain text.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransformOptions {
    pub max_depth: usize,
    pub param_grammar: ParamGrammar,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            param_grammar: ParamGrammar::Loose,
        }
    }
}
