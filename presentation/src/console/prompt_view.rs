//! Terminal rendering of an operator prompt.
//!
//! The prompt's display HTML is already sanitized, so only the allowed tags
//! and classes can appear. This module flattens it to lines of styled spans:
//!
//! ```text
//! ═══════════════════════════════════════════════════════════════
//!   Operator Prompt (prompt-1)
//! ═══════════════════════════════════════════════════════════════
//!   Verify the DUT status in the fixture.
//!
//!                            P A S S
//!   Click Continue to proceed.
//!
//!   [1] Continue  [2] Abort
//! ```

use colored::Colorize;
use htf_domain::PromptState;
use scraper::{ElementRef, Html, Node};

const WIDTH: usize = 63;

const BLOCK_TAGS: &[&str] = &["div", "p", "ul", "ol", "li", "h1", "h2", "h3", "h4"];
const STRONG_TAGS: &[&str] = &["strong", "b", "h1", "h2", "h3", "h4"];

/// Color of a span, taken from `prompt-pass` / `prompt-fail` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, Default)]
struct Style {
    tone: Tone,
    large: bool,
    strong: bool,
    centered: bool,
}

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub tone: Tone,
    pub large: bool,
    pub strong: bool,
}

/// One rendered line; `centered` comes from `text-align: center`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLine {
    pub spans: Vec<TextSpan>,
    pub centered: bool,
}

impl TextLine {
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Flatten sanitized prompt HTML into display lines.
pub fn html_to_lines(html: &str) -> Vec<TextLine> {
    let fragment = Html::parse_fragment(html);
    let mut builder = LineBuilder::default();
    walk(fragment.root_element(), Style::default(), &mut builder);
    builder.finish()
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<TextLine>,
    current: TextLine,
}

impl LineBuilder {
    fn push_text(&mut self, text: &str, style: Style) {
        let collapsed = collapse_whitespace(text);
        if collapsed.is_empty() {
            return;
        }
        if self.current.spans.is_empty() {
            self.current.centered = style.centered;
        }
        self.current.spans.push(TextSpan {
            text: collapsed,
            tone: style.tone,
            large: style.large,
            strong: style.strong,
        });
    }

    fn break_line(&mut self) {
        let mut line = std::mem::take(&mut self.current);
        if let Some(first) = line.spans.first_mut() {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = line.spans.last_mut() {
            last.text = last.text.trim_end().to_string();
        }
        line.spans.retain(|span| !span.text.is_empty());
        if !line.spans.is_empty() {
            self.lines.push(line);
        }
    }

    fn finish(mut self) -> Vec<TextLine> {
        self.break_line();
        self.lines
    }
}

fn walk(parent: ElementRef<'_>, style: Style, builder: &mut LineBuilder) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => builder.push_text(text, style),
            Node::Element(element) => {
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let tag = element.name();
                if tag == "br" {
                    builder.break_line();
                    continue;
                }

                let mut child_style = style;
                if let Some(class) = element.attr("class") {
                    for name in class.split_whitespace() {
                        match name {
                            "prompt-pass" => child_style.tone = Tone::Pass,
                            "prompt-fail" => child_style.tone = Tone::Fail,
                            "prompt-large" => child_style.large = true,
                            _ => {}
                        }
                    }
                }
                if let Some(css) = element.attr("style")
                    && css.replace(' ', "").to_lowercase().contains("text-align:center")
                {
                    child_style.centered = true;
                }
                if STRONG_TAGS.contains(&tag) {
                    child_style.strong = true;
                }

                let block = BLOCK_TAGS.contains(&tag);
                if block {
                    builder.break_line();
                }
                if tag == "li" {
                    builder.push_text("• ", child_style);
                }
                walk(child_ref, child_style, builder);
                if block {
                    builder.break_line();
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace runs to one space, keeping a single leading/trailing
/// space so adjacent inline spans stay separated.
fn collapse_whitespace(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return if text.is_empty() { String::new() } else { " ".to_string() };
    }
    let mut out = String::new();
    if text.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(&words.join(" "));
    if text.ends_with(char::is_whitespace) {
        out.push(' ');
    }
    out
}

/// Renders [`PromptState`]s for the terminal.
pub struct PromptView;

impl PromptView {
    pub fn render(state: &PromptState) -> String {
        let mut output = String::new();
        let rule = "═".repeat(WIDTH);

        output.push('\n');
        output.push_str(&format!("{}\n", rule.cyan().bold()));
        output.push_str(&format!(
            "{}\n",
            format!("  Operator Prompt ({})", state.id).cyan().bold()
        ));
        output.push_str(&format!("{}\n", rule.cyan().bold()));

        // The message doubles as a caption when HTML replaces it in the body.
        if state.prompt_html.is_some() && !state.message.trim().is_empty() {
            output.push_str(&format!("  {}\n\n", state.message.dimmed()));
        }

        for line in html_to_lines(&state.display_html) {
            output.push_str(&Self::render_line(&line));
            output.push('\n');
        }

        if let Some(url) = &state.image_url {
            output.push_str(&format!("  {} {}\n", "Image:".cyan(), url));
        }

        output.push('\n');
        output.push_str(&Self::render_choices(state));
        output
    }

    /// Hint shown under the prompt describing what the operator can type.
    pub fn render_choices(state: &PromptState) -> String {
        if state.text_input {
            return match &state.default_response {
                Some(default) => format!("  Type a response (Enter for '{}')\n", default),
                None => "  Type a response and press Enter\n".to_string(),
            };
        }

        if !state.is_user_question() {
            return "  Press Enter to acknowledge\n".to_string();
        }

        let choices: Vec<String> = state
            .buttons()
            .map(|(id, label)| {
                let text = format!("[{}] {}", id.number(), label);
                match id.number() {
                    1 => text.green().bold().to_string(),
                    2 => text.red().bold().to_string(),
                    _ => text.yellow().bold().to_string(),
                }
            })
            .collect();
        format!("  {}\n", choices.join("  "))
    }

    fn render_line(line: &TextLine) -> String {
        let width: usize = line
            .spans
            .iter()
            .map(|span| Self::span_text(span).chars().count())
            .sum();
        let indent = if line.centered {
            WIDTH.saturating_sub(width) / 2
        } else {
            2
        };

        let mut out = " ".repeat(indent);
        for span in &line.spans {
            let text = Self::span_text(span);
            let painted = match span.tone {
                Tone::Pass => text.green(),
                Tone::Fail => text.red(),
                Tone::Plain => text.normal(),
            };
            let painted = if span.strong || span.large {
                painted.bold()
            } else {
                painted
            };
            out.push_str(&painted.to_string());
        }
        out
    }

    /// Large text is letter-spaced so it stands out in a terminal.
    fn span_text(span: &TextSpan) -> String {
        if span.large {
            span.text
                .chars()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            span.text.clone()
        }
    }
}
