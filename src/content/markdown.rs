//! Markdown → HTML rendering.
//!
//! Uses pulldown-cmark with the common extended syntax (tables, footnotes,
//! strikethrough, task lists, GFM blockquote tags). Fenced code blocks are
//! intercepted and highlighted with syntect, emitting class-based spans so the
//! page stylesheet decides the colours:
//!
//! ```html
//! <pre><code class="language-rust"><span class="hljs-source hljs-rust">...</span></code></pre>
//! ```

use crate::config::RenderConfig;
use crate::error::{ContentError, Result};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Bundled syntax definitions, loaded once per process.
static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Default CSS class prefix for highlight spans.
pub const DEFAULT_CLASS_PREFIX: &str = "hljs-";

/// Class prefixes in use. syntect's class style wants `&'static str`, so each
/// distinct prefix is leaked exactly once and shared by every renderer.
static CLASS_PREFIXES: LazyLock<Mutex<FxHashSet<&'static str>>> =
    LazyLock::new(|| Mutex::new(FxHashSet::from_iter([DEFAULT_CLASS_PREFIX])));

fn intern_prefix(prefix: &str) -> &'static str {
    let mut prefixes = CLASS_PREFIXES.lock();
    if let Some(&interned) = prefixes.get(prefix) {
        return interned;
    }
    let interned: &'static str = Box::leak(prefix.to_owned().into_boxed_str());
    prefixes.insert(interned);
    interned
}

/// Markdown renderer. Pure: no I/O, usable on any markdown string.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    highlight: bool,
    /// Interned in [`CLASS_PREFIXES`]
    class_prefix: &'static str,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            highlight: true,
            class_prefix: DEFAULT_CLASS_PREFIX,
        }
    }
}

/// A fenced or indented code block being collected.
struct CodeBlock {
    lang: String,
    source: String,
}

impl MarkdownRenderer {
    pub fn new(highlight: bool, class_prefix: &str) -> Self {
        Self {
            highlight,
            class_prefix: intern_prefix(class_prefix),
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.highlight, &config.class_prefix)
    }

    /// Render markdown text to an HTML fragment.
    pub fn render(&self, markdown: &str) -> Result<String> {
        let mut events = Vec::new();
        let mut code: Option<CodeBlock> = None;

        for event in Parser::new_ext(markdown, options()) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
                            .next()
                            .unwrap_or_default()
                            .to_owned(),
                        CodeBlockKind::Indented => String::new(),
                    };
                    code = Some(CodeBlock { lang, source: String::new() });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code.take() {
                        let html = self.code_block(&block)?;
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Text(text) => match code.as_mut() {
                    Some(block) => block.source.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                other => events.push(other),
            }
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        Ok(output)
    }

    fn code_block(&self, block: &CodeBlock) -> Result<String> {
        let class = if block.lang.is_empty() {
            String::new()
        } else {
            format!(" class=\"language-{}\"", escape_html(&block.lang))
        };

        let body = match self.syntax_for(&block.lang) {
            Some(syntax) => self.highlight_code(syntax, &block.source)?,
            None => escape_html(&block.source),
        };

        Ok(format!("<pre><code{class}>{body}</code></pre>\n"))
    }

    fn syntax_for(&self, lang: &str) -> Option<&'static SyntaxReference> {
        if !self.highlight || lang.is_empty() {
            return None;
        }
        SYNTAXES.find_syntax_by_token(lang)
    }

    fn highlight_code(&self, syntax: &SyntaxReference, source: &str) -> Result<String> {
        let style = if self.class_prefix.is_empty() {
            ClassStyle::Spaced
        } else {
            ClassStyle::SpacedPrefixed { prefix: self.class_prefix }
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, style);
        for line in LinesWithEndings::from(source) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| ContentError::Render(err.to_string()))?;
        }
        Ok(generator.finalize())
    }
}

/// Render markdown with the default renderer (highlighting on, `hljs-` prefix).
pub fn render_to_html(markdown: &str) -> Result<String> {
    MarkdownRenderer::default().render(markdown)
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
