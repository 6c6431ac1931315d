use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::render::{
    render_align, render_code, render_color, render_font, render_highlight, render_img,
    render_list, render_list_item, render_quote, render_size, render_style, render_url,
};
use crate::tag::{BodyMode, Layout, TagDescriptor};

static SHARED: Lazy<TagRegistry> = Lazy::new(TagRegistry::standard);

/// Read-only map from tag name to descriptor.
#[derive(Clone, Debug)]
pub struct TagRegistry {
    tags: HashMap<&'static str, TagDescriptor>,
}

impl TagRegistry {
    /// Builds the fixed tag set.
    pub fn standard() -> Self {
        let mut tags = Vec::new();
        for name in ["b", "i", "u", "s", "sup", "sub"] {
            tags.push(TagDescriptor::new(name, render_style));
        }
        for name in ["left", "right", "center", "justify"] {
            tags.push(TagDescriptor::new(name, render_align).layout(Layout::Block));
        }
        tags.extend([
            TagDescriptor::new("font", render_font).default_param("Impact,sans-serif"),
            TagDescriptor::new("size", render_size).layout(Layout::Contextual),
            TagDescriptor::new("color", render_color).default_param("red"),
            TagDescriptor::new("highlight", render_highlight)
                .layout(Layout::Contextual)
                .default_param("yellow"),
            TagDescriptor::new("url", render_url).body_mode(BodyMode::LiteralUnlessParam),
            TagDescriptor::new("img", render_img).body_mode(BodyMode::Literal),
            TagDescriptor::new("quote", render_quote).layout(Layout::Block),
            TagDescriptor::new("list", render_list).layout(Layout::Block),
            TagDescriptor::new("li", render_list_item),
            TagDescriptor::new("code", render_code)
                .body_mode(BodyMode::Literal)
                .layout(Layout::Block),
        ]);

        Self {
            tags: tags.into_iter().map(|tag| (tag.name, tag)).collect(),
        }
    }

    /// The standard registry, built on first use and shared by every caller.
    pub fn shared() -> &'static TagRegistry {
        &SHARED
    }

    /// Case-insensitive lookup.
    pub fn lookup(&self, name: &str) -> Option<&TagDescriptor> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.tags.get(name.to_ascii_lowercase().as_str())
        } else {
            self.tags.get(name)
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tags.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
