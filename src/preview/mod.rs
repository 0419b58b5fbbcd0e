//! Code preview: canned source samples colored by a [`ColorTheme`].
//!
//! Every sample is a static table of tokens tagged with a [`Role`]. Rendering
//! resolves each role through its fallback chain and attaches the
//! [`ColorClick`] a color editor receives when the token is activated.

mod html;
mod samples;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::theme::{ColorTheme, Group};

pub use html::{render_html, render_text, HtmlOptions, DEFAULT_FONT_FAMILY};
pub use samples::{LineHighlight, SampleLine, Token, TokenKind};

/// Semantic category of a source token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Keyword,
    String,
    Comment,
    Operator,
    Type,
    Class,
    Interface,
    Tag,
    Attribute,
    Method,
    Variable,
    Parameter,
    Property,
    Error,
    Boolean,
    Number,
    Function,
    ControlFlow,
}

/// A slot a role color can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    Semantic(Role),
    ForegroundPrimary,
}

impl ColorSource {
    pub fn group(self) -> Group {
        match self {
            Self::Semantic(_) => Group::Semantic,
            Self::ForegroundPrimary => Group::Foreground,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Semantic(role) => role.as_str(),
            Self::ForegroundPrimary => "primary",
        }
    }

    fn lookup(self, theme: &ColorTheme) -> Option<&str> {
        theme.slot(self.group(), self.name())
    }
}

/// What a click on a role token reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickReport {
    /// The token's own role, whatever slot supplied the color.
    Role,
    /// The slot the color actually came from.
    Source,
}

impl Role {
    pub const ALL: [Role; 18] = [
        Role::Keyword,
        Role::String,
        Role::Comment,
        Role::Operator,
        Role::Type,
        Role::Class,
        Role::Interface,
        Role::Tag,
        Role::Attribute,
        Role::Method,
        Role::Variable,
        Role::Parameter,
        Role::Property,
        Role::Error,
        Role::Boolean,
        Role::Number,
        Role::Function,
        Role::ControlFlow,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Comment => "comment",
            Self::Operator => "operator",
            Self::Type => "type",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Tag => "tag",
            Self::Attribute => "attribute",
            Self::Method => "method",
            Self::Variable => "variable",
            Self::Parameter => "parameter",
            Self::Property => "property",
            Self::Error => "error",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Function => "function",
            Self::ControlFlow => "controlFlow",
        }
    }

    /// Slots consulted, in order, for this role's color.
    pub fn fallback_chain(self) -> &'static [ColorSource] {
        use ColorSource::{ForegroundPrimary as Fg, Semantic as S};
        match self {
            Self::Class => &[S(Role::Class), S(Role::Type)],
            Self::Interface => &[S(Role::Interface), S(Role::Type)],
            Self::ControlFlow => &[S(Role::ControlFlow), S(Role::Keyword)],
            Self::Variable => &[S(Role::Variable), Fg],
            Self::Parameter => &[S(Role::Parameter), S(Role::Variable), Fg],
            Self::Property => &[S(Role::Property), Fg],
            Self::Attribute => &[S(Role::Attribute), Fg],
            Self::Tag => &[S(Role::Tag), Fg],
            Self::Keyword => &[S(Role::Keyword)],
            Self::String => &[S(Role::String)],
            Self::Comment => &[S(Role::Comment)],
            Self::Operator => &[S(Role::Operator)],
            Self::Type => &[S(Role::Type)],
            Self::Method => &[S(Role::Method)],
            Self::Error => &[S(Role::Error)],
            Self::Boolean => &[S(Role::Boolean)],
            Self::Number => &[S(Role::Number)],
            Self::Function => &[S(Role::Function)],
        }
    }

    fn click_report(self) -> ClickReport {
        match self {
            Self::Tag | Self::Attribute => ClickReport::Source,
            _ => ClickReport::Role,
        }
    }

    pub fn is_italic(self) -> bool {
        self == Self::Comment
    }

    /// First set slot along the fallback chain.
    pub fn resolve(self, theme: &ColorTheme) -> Option<(ColorSource, &str)> {
        self.fallback_chain()
            .iter()
            .find_map(|source| source.lookup(theme).map(|color| (*source, color)))
    }

    /// The click reported when a token of this role is activated.
    pub fn click(self, theme: &ColorTheme) -> ColorClick {
        let resolved = self.resolve(theme);
        let color = resolved.map(|(_, color)| color.to_string());
        match self.click_report() {
            ClickReport::Role => ColorClick::new(Group::Semantic, self.as_str(), color),
            ClickReport::Source => {
                let source = resolved
                    .map(|(source, _)| source)
                    .or_else(|| self.fallback_chain().last().copied())
                    .unwrap_or(ColorSource::ForegroundPrimary);
                ColorClick::new(source.group(), source.name(), color)
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two sample variants the preview can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    TypeScript,
    CSharp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preview language: {0} (expected typescript or csharp)")]
pub struct UnknownLanguage(String);

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::CSharp => "csharp",
        }
    }

    pub fn sample(self) -> &'static [SampleLine] {
        match self {
            Self::TypeScript => samples::TYPESCRIPT,
            Self::CSharp => samples::CSHARP,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "csharp" | "cs" | "c#" => Ok(Self::CSharp),
            _ => Err(UnknownLanguage(value.to_string())),
        }
    }
}

/// Payload handed to the color editor: which slot was activated and its
/// current color (`None` when the slot and all its fallbacks are unset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorClick {
    pub group: Group,
    pub name: &'static str,
    pub color: Option<String>,
}

impl ColorClick {
    pub fn new(group: Group, name: &'static str, color: Option<String>) -> Self {
        Self { group, name, color }
    }
}

/// Receiver of color clicks; owns the editing UI.
pub trait ColorClickHandler {
    fn on_color_click(&mut self, click: &ColorClick);
}

impl<F> ColorClickHandler for F
where
    F: FnMut(&ColorClick),
{
    fn on_color_click(&mut self, click: &ColorClick) {
        self(click)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSpan {
    pub text: &'static str,
    pub kind: TokenKind,
    pub color: Option<String>,
    pub italic: bool,
    pub click: Option<ColorClick>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Left padding in rem.
    pub indent: u8,
    pub background: Option<String>,
    pub click: Option<ColorClick>,
    /// Draw a separator rule (colored `background.overlay`) above the line.
    pub separator: bool,
    pub spaced: bool,
    pub spans: Vec<RenderedSpan>,
}

impl RenderedLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPreview {
    pub language: Language,
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub overlay: Option<String>,
    pub lines: Vec<RenderedLine>,
}

impl RenderedPreview {
    /// Activate a token. Returns `false` for plain text or out-of-range indices.
    pub fn activate_span<H>(&self, line: usize, span: usize, handler: &mut H) -> bool
    where
        H: ColorClickHandler + ?Sized,
    {
        let click = self
            .lines
            .get(line)
            .and_then(|line| line.spans.get(span))
            .and_then(|span| span.click.as_ref());
        dispatch(click, handler)
    }

    /// Activate a highlighted line's background.
    pub fn activate_line<H>(&self, line: usize, handler: &mut H) -> bool
    where
        H: ColorClickHandler + ?Sized,
    {
        let click = self.lines.get(line).and_then(|line| line.click.as_ref());
        dispatch(click, handler)
    }

    /// Clickable tokens as `(line, span, click)`.
    pub fn clickable_spans(&self) -> impl Iterator<Item = (usize, usize, &ColorClick)> {
        self.lines.iter().enumerate().flat_map(|(line_index, line)| {
            line.spans
                .iter()
                .enumerate()
                .filter_map(move |(span_index, span)| {
                    span.click
                        .as_ref()
                        .map(|click| (line_index, span_index, click))
                })
        })
    }
}

fn dispatch<H>(click: Option<&ColorClick>, handler: &mut H) -> bool
where
    H: ColorClickHandler + ?Sized,
{
    match click {
        Some(click) => {
            handler.on_color_click(click);
            true
        }
        None => false,
    }
}

/// Render the canned sample for `language` with `theme`'s colors.
pub fn render(theme: &ColorTheme, language: Language) -> RenderedPreview {
    let foreground = ColorSource::ForegroundPrimary
        .lookup(theme)
        .map(str::to_string);
    let overlay = theme.slot(Group::Background, "overlay").map(str::to_string);

    let lines = language
        .sample()
        .iter()
        .map(|line| {
            let highlight = line.highlight.map(|highlight| {
                let color = theme
                    .slot(Group::Background, highlight.slot())
                    .map(str::to_string);
                (
                    color.clone(),
                    ColorClick::new(Group::Background, highlight.slot(), color),
                )
            });
            let (background, click) = match highlight {
                Some((color, click)) => (color, Some(click)),
                None => (None, None),
            };

            RenderedLine {
                indent: line.indent,
                background,
                click,
                separator: line.separator,
                spaced: line.spaced,
                spans: line
                    .tokens
                    .iter()
                    .map(|token| render_token(theme, token, foreground.as_deref()))
                    .collect(),
            }
        })
        .collect();

    RenderedPreview {
        language,
        background: theme
            .slot(Group::Background, "primary")
            .map(str::to_string),
        foreground,
        overlay,
        lines,
    }
}

fn render_token(theme: &ColorTheme, token: &Token, foreground: Option<&str>) -> RenderedSpan {
    match token.kind {
        TokenKind::Plain => RenderedSpan {
            text: token.text,
            kind: token.kind,
            color: foreground.map(str::to_string),
            italic: false,
            click: None,
        },
        TokenKind::Space => RenderedSpan {
            text: token.text,
            kind: token.kind,
            color: None,
            italic: false,
            click: None,
        },
        TokenKind::Role(role) => {
            let click = role.click(theme);
            RenderedSpan {
                text: token.text,
                kind: token.kind,
                color: click.color.clone(),
                italic: role.is_italic(),
                click: Some(click),
            }
        }
    }
}
