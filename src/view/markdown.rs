// Markdown slide bodies with highlighted code blocks

use crate::style::{self, Theme};
use eframe::egui;
use eframe::egui::text::LayoutJob;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Loaded once; syntect's default sets are expensive to build
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl CodeHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Highlight `code` as `language` (a fence token such as "java"), falling back to plain text
    pub fn highlight(&self, code: &str, language: &str, theme: Theme) -> LayoutJob {
        let mut job = LayoutJob::default();
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(syntect_theme) = self.theme_set.themes.get(theme.syntax_theme()) else {
            job.append(code, 0.0, code_format(egui::Color32::GRAY));
            return job;
        };

        let mut highlighter = HighlightLines::new(syntax, syntect_theme);
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            for (style, text) in ranges {
                let color = egui::Color32::from_rgb(
                    style.foreground.r,
                    style.foreground.g,
                    style.foreground.b,
                );
                job.append(text, 0.0, code_format(color));
            }
        }
        job
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn code_format(color: egui::Color32) -> egui::TextFormat {
    egui::TextFormat {
        font_id: egui::FontId::monospace(style::CODE_SIZE),
        color,
        ..Default::default()
    }
}

/// Draw highlighted code on a filled panel
pub fn code_block(ui: &mut egui::Ui, job: LayoutJob) {
    egui::Frame::new()
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(job);
        });
}

fn heading_size(level: HeadingLevel) -> f32 {
    match level {
        HeadingLevel::H1 => 24.0,
        HeadingLevel::H2 => 20.0,
        HeadingLevel::H3 => 18.0,
        _ => 16.0,
    }
}

/// Inline styling in effect while walking the event stream
#[derive(Default)]
struct Inline {
    strong: usize,
    emphasis: usize,
    heading: Option<HeadingLevel>,
}

impl Inline {
    fn format(&self, ui: &egui::Ui) -> egui::TextFormat {
        let size = self.heading.map(heading_size).unwrap_or(style::BODY_SIZE);
        let color = if self.strong > 0 || self.heading.is_some() {
            ui.visuals().strong_text_color()
        } else {
            ui.visuals().text_color()
        };
        egui::TextFormat {
            font_id: egui::FontId::proportional(size),
            color,
            italics: self.emphasis > 0,
            ..Default::default()
        }
    }
}

fn flush(ui: &mut egui::Ui, job: &mut LayoutJob) {
    if job.text.is_empty() {
        return;
    }
    let mut finished = std::mem::take(job);
    finished.wrap.max_width = ui.available_width();
    ui.label(finished);
}

pub fn render_markdown(ui: &mut egui::Ui, source: &str, highlighter: &CodeHighlighter, theme: Theme) {
    let mut job = LayoutJob::default();
    let mut inline = Inline::default();
    let mut code: Option<(String, String)> = None;

    for event in Parser::new(source) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(ui, &mut job);
                inline.heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                flush(ui, &mut job);
                inline.heading = None;
                ui.add_space(4.0);
            }
            Event::Start(Tag::Strong) => inline.strong += 1,
            Event::End(TagEnd::Strong) => inline.strong = inline.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => inline.emphasis += 1,
            Event::End(TagEnd::Emphasis) => inline.emphasis = inline.emphasis.saturating_sub(1),
            Event::Start(Tag::CodeBlock(kind)) => {
                flush(ui, &mut job);
                let language = match kind {
                    CodeBlockKind::Fenced(token) => token.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, text)) = code.take() {
                    code_block(ui, highlighter.highlight(text.trim_end(), &language, theme));
                    ui.add_space(6.0);
                }
            }
            Event::Start(Tag::Item) => {
                flush(ui, &mut job);
                job.append("  •  ", 0.0, inline.format(ui));
            }
            Event::End(TagEnd::Item) => flush(ui, &mut job),
            Event::End(TagEnd::List(_)) => ui.add_space(6.0),
            Event::End(TagEnd::Paragraph) => {
                flush(ui, &mut job);
                ui.add_space(6.0);
            }
            Event::Text(text) => match code.as_mut() {
                Some((_, buffer)) => buffer.push_str(&text),
                None => job.append(&text, 0.0, inline.format(ui)),
            },
            Event::Code(text) => {
                let format = egui::TextFormat {
                    font_id: egui::FontId::monospace(style::CODE_SIZE),
                    color: ui.visuals().strong_text_color(),
                    background: ui.visuals().code_bg_color,
                    ..Default::default()
                };
                job.append(&text, 0.0, format);
            }
            Event::SoftBreak => job.append(" ", 0.0, inline.format(ui)),
            Event::HardBreak => job.append("\n", 0.0, inline.format(ui)),
            _ => {}
        }
    }
    flush(ui, &mut job);
}
