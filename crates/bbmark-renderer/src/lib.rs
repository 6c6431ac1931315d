use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

const BASE_CSS: &str = include_str!("../assets/bbmark.css");

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Theme {
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(Theme::Auto),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Wraps rendered post fragments into a standalone preview page.
#[derive(Debug, Clone)]
pub struct Renderer {
    theme: Theme,
    custom_vars: BTreeMap<String, String>,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            custom_vars: BTreeMap::new(),
        }
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_vars.insert(key.into(), value.into());
        self
    }

    pub fn stylesheet(&self) -> String {
        let mut out = String::new();
        let (light_vars, dark_vars) = default_theme_vars();

        match self.theme {
            Theme::Auto => {
                out.push_str(&root_block(&light_vars, "  ", true));
                out.push_str("@media (prefers-color-scheme: dark) {\n");
                out.push_str(&indent(&root_block(&dark_vars, "  ", true)));
                out.push_str("}\n");
            }
            Theme::Light => out.push_str(&root_block(&light_vars, "  ", true)),
            Theme::Dark => out.push_str(&root_block(&dark_vars, "  ", true)),
        }

        if !self.custom_vars.is_empty() {
            out.push_str(&root_block(&self.custom_vars, "  ", false));
        }

        out.push_str(BASE_CSS);
        out
    }

    /// Builds an HTML document around `html`. With `with_inline_css` off the
    /// page links `bbmark.css` instead (see [`Renderer::generate_files`]).
    pub fn embed_html(&self, html: &str, with_inline_css: bool) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"en\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"utf-8\" />\n");
        out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
        if with_inline_css {
            out.push_str("  <style>\n");
            out.push_str(&self.stylesheet());
            out.push_str("\n  </style>\n");
        } else {
            out.push_str("  <link rel=\"stylesheet\" href=\"bbmark.css\" />\n");
        }
        out.push_str("</head>\n");
        out.push_str("<body>\n");
        out.push_str("<div class=\"bbmark-post\">");
        out.push_str(html);
        out.push_str("</div>\n");
        out.push_str("</body>\n");
        out.push_str("</html>\n");
        out
    }

    pub fn generate_files(&self, out_dir: &Path) -> io::Result<()> {
        fs::create_dir_all(out_dir)?;
        let path = out_dir.join("bbmark.css");
        fs::write(&path, self.stylesheet())?;
        debug!(path = %path.display(), "wrote stylesheet");
        Ok(())
    }
}

fn default_theme_vars() -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let light = BTreeMap::from([
        ("--bbmark-bg".to_string(), "#fbfbf8".to_string()),
        ("--bbmark-fg".to_string(), "#1f2328".to_string()),
        ("--bbmark-accent".to_string(), "#2b6cb0".to_string()),
        ("--bbmark-code-bg".to_string(), "#f4f6f8".to_string()),
        ("--bbmark-code-fg".to_string(), "#1f2328".to_string()),
        ("--bbmark-quote-bg".to_string(), "#f7f6f1".to_string()),
        ("--bbmark-quote-border".to_string(), "#c9c2b8".to_string()),
    ]);

    let dark = BTreeMap::from([
        ("--bbmark-bg".to_string(), "#0e1116".to_string()),
        ("--bbmark-fg".to_string(), "#e6edf3".to_string()),
        ("--bbmark-accent".to_string(), "#63b3ed".to_string()),
        ("--bbmark-code-bg".to_string(), "#202634".to_string()),
        ("--bbmark-code-fg".to_string(), "#f0f6fc".to_string()),
        ("--bbmark-quote-bg".to_string(), "#1b212b".to_string()),
        ("--bbmark-quote-border".to_string(), "#2d3440".to_string()),
    ]);

    (light, dark)
}

fn root_block(
    vars: &BTreeMap<String, String>,
    pad: &str,
    include_color_scheme: bool,
) -> String {
    let mut out = String::new();
    out.push_str(":root {\n");
    if include_color_scheme {
        out.push_str(pad);
        out.push_str("color-scheme: light dark;\n");
    }
    for (key, value) in vars {
        out.push_str(pad);
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(";\n");
    }
    out.push_str("}\n");
    out
}

fn indent(block: &str) -> String {
    block.lines().map(|line| format!("  {}\n", line)).collect()
}
