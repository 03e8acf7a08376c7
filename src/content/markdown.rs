//! Markdown rendering and reading-time estimation

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;

/// Syntect state, only loaded when highlighting is enabled
struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

/// Markdown renderer
///
/// Raw HTML embedded in the source is passed through untouched: post
/// authors control their own content.
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
}

impl MarkdownRenderer {
    /// Create a renderer without code highlighting
    pub fn new() -> Self {
        Self { highlighter: None }
    }

    /// Create a renderer from the highlight configuration
    pub fn with_config(config: &HighlightConfig) -> Self {
        if !config.enable {
            return Self::new();
        }

        Self {
            highlighter: Some(Highlighter {
                syntax_set: SyntaxSet::load_defaults_newlines(),
                theme_set: ThemeSet::load_defaults(),
                theme_name: config.theme.clone(),
                line_numbers: config.line_number,
            }),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off beforehand, so no metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        match &self.highlighter {
            None => html::push_html(&mut html_output, parser),
            Some(highlighter) => {
                html::push_html(&mut html_output, highlighter.rewrite(parser).into_iter())
            }
        }

        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Replace fenced and indented code blocks with highlighted HTML
    fn rewrite<'a>(&self, parser: Parser<'a>) -> Vec<Event<'a>> {
        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                other => events.push(other),
            }
        }

        events
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                html_escape(code)
            ),
        }
    }
}

/// Add line numbers to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

/// Estimated reading time of a Markdown body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    pub words: usize,
    pub minutes: u64,
}

impl ReadingTime {
    /// Default reading speed
    pub const WORDS_PER_MINUTE: usize = 200;

    /// Estimate reading time at `words_per_minute`
    ///
    /// Each CJK character counts as one word; any other run of
    /// non-whitespace characters counts as one word. Minutes are rounded
    /// to two decimals and then up to a whole minute.
    pub fn estimate(text: &str, words_per_minute: usize) -> Self {
        let words = count_words(text);
        let wpm = if words_per_minute == 0 {
            Self::WORDS_PER_MINUTE
        } else {
            words_per_minute
        };

        let exact = words as f64 / wpm as f64;
        let rounded = (exact * 100.0).round() / 100.0;

        Self {
            words,
            minutes: rounded.ceil() as u64,
        }
    }

    /// Human-readable form, e.g. `"4 min read"`
    pub fn display(&self, label: &str) -> String {
        format!("{} {}", self.minutes, label)
    }
}

/// Count words, treating every CJK character as a word of its own
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            count += 1;
            in_word = true;
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30ff}'   // Hiragana, Katakana
        | '\u{3400}'..='\u{4dbf}' // CJK Extension A
        | '\u{4e00}'..='\u{9fff}' // CJK Unified Ideographs
        | '\u{ac00}'..='\u{d7af}' // Hangul syllables
        | '\u{f900}'..='\u{faff}' // CJK Compatibility Ideographs
        | '\u{20000}'..='\u{2a6df}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_gfm_extensions() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(
            "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\n- [x] done\n- [ ] todo\n",
        );
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_raw_html_is_not_sanitized() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<div class=\"note\">kept</div>\n\ntext");
        assert!(html.contains("<div class=\"note\">kept</div>"));
    }

    #[test]
    fn test_plain_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_highlighted_code_block() {
        let config = HighlightConfig {
            enable: true,
            line_number: true,
            ..HighlightConfig::default()
        };
        let renderer = MarkdownRenderer::with_config(&config);
        let html = renderer.render("Intro\n\n```rust\nfn main() {}\n```\n\nOutro");
        assert!(html.contains("highlight rust"));
        assert!(html.contains("line-number"));
        assert!(html.contains("<p>Intro</p>"));
        assert!(html.contains("<p>Outro</p>"));
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("hello world"), 2);
        assert_eq!(count_words("  spaced   out\ntext "), 3);
        assert_eq!(count_words("你好世界"), 4);
        assert_eq!(count_words("Rust 程式"), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(ReadingTime::estimate("", 200).minutes, 0);
        assert_eq!(ReadingTime::estimate("word", 200).minutes, 1);

        let text = vec!["word"; 400].join(" ");
        assert_eq!(ReadingTime::estimate(&text, 200).minutes, 2);

        let text = vec!["word"; 410].join(" ");
        assert_eq!(ReadingTime::estimate(&text, 200).minutes, 3);

        let rt = ReadingTime::estimate(&vec!["word"; 800].join(" "), 0);
        assert_eq!(rt.minutes, 4);
        assert_eq!(rt.display("min read"), "4 min read");
    }
}
