use super::{ColorClick, RenderedLine, RenderedPreview, RenderedSpan, TokenKind};

pub const DEFAULT_FONT_FAMILY: &str = r#""BerkeleyMono Nerd Font", "Berkeley Mono", monospace"#;

/// Spaces per rem of indentation in the text rendering.
const TEXT_INDENT_PER_REM: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    pub font_family: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// Render `preview` as an HTML fragment.
///
/// Clickable elements carry `data-group`, `data-name` and `data-color`
/// attributes; a page script routes them to the color editor.
pub fn render_html(preview: &RenderedPreview, options: &HtmlOptions) -> String {
    let mut style = Vec::new();
    if let Some(background) = preview.background.as_deref() {
        style.push(format!("background-color: {background}"));
    }
    if let Some(foreground) = preview.foreground.as_deref() {
        style.push(format!("color: {foreground}"));
    }
    style.push(format!("font-family: {}", options.font_family));

    let mut html = format!(
        "<div class=\"code-preview\" data-language=\"{}\" style=\"{}\">\n",
        preview.language.as_str(),
        escape(&style.join("; ")),
    );
    for line in &preview.lines {
        html.push_str(&render_line(line, preview.overlay.as_deref()));
    }
    html.push_str("</div>\n");
    html
}

fn render_line(line: &RenderedLine, overlay: Option<&str>) -> String {
    let mut classes = vec!["code-line"];
    let mut style = Vec::new();
    if line.indent > 0 {
        style.push(format!("padding-left: {}rem", line.indent));
    }
    if line.spaced || line.separator {
        style.push("margin-top: 1rem".to_string());
    }
    if line.separator {
        classes.push("code-line--separator");
        style.push("padding-top: 1rem".to_string());
        match overlay {
            Some(color) => style.push(format!("border-top: 1px solid {color}")),
            None => style.push("border-top: 1px solid".to_string()),
        }
    }
    if let Some(background) = line.background.as_deref() {
        style.push(format!("background-color: {background}"));
    }
    if line.click.is_some() {
        classes.push("code-line--highlight");
    }

    let mut html = format!("  <div class=\"{}\"", classes.join(" "));
    if !style.is_empty() {
        html.push_str(&format!(" style=\"{}\"", escape(&style.join("; "))));
    }
    if let Some(click) = line.click.as_ref() {
        html.push_str(&click_attributes(click));
    }
    html.push('>');

    if line.spans.is_empty() {
        html.push_str("&nbsp;");
    }
    for span in &line.spans {
        html.push_str(&render_span(span));
    }
    html.push_str("</div>\n");
    html
}

fn render_span(span: &RenderedSpan) -> String {
    let text = escape(span.text);
    let role = match span.kind {
        TokenKind::Space => return text,
        TokenKind::Plain => None,
        TokenKind::Role(role) => Some(role),
    };

    let mut style = Vec::new();
    if let Some(color) = span.color.as_deref() {
        style.push(format!("color: {color}"));
    }
    if span.italic {
        style.push("font-style: italic".to_string());
    }

    let mut html = String::from("<span");
    if let Some(role) = role {
        html.push_str(&format!(" class=\"token token-{role}\""));
    }
    if !style.is_empty() {
        html.push_str(&format!(" style=\"{}\"", escape(&style.join("; "))));
    }
    if let Some(click) = span.click.as_ref() {
        html.push_str(&click_attributes(click));
    }
    html.push('>');
    html.push_str(&text);
    html.push_str("</span>");
    html
}

fn click_attributes(click: &ColorClick) -> String {
    let mut attributes = format!(
        " data-group=\"{}\" data-name=\"{}\"",
        click.group.as_str(),
        escape(click.name)
    );
    if let Some(color) = click.color.as_deref() {
        attributes.push_str(&format!(" data-color=\"{}\"", escape(color)));
    }
    attributes
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Plain-text rendering: the sample code followed by a legend of every
/// clickable slot, its color and the tokens that use it.
pub fn render_text(preview: &RenderedPreview) -> String {
    let mut out = String::new();
    for line in &preview.lines {
        let marker = match line.click.as_ref() {
            Some(click) => format!("  <- background.{}", click.name),
            None => String::new(),
        };
        out.push_str(&" ".repeat(usize::from(line.indent) * TEXT_INDENT_PER_REM));
        out.push_str(&line.text());
        out.push_str(&marker);
        out.push('\n');
    }

    let mut legend: Vec<(&ColorClick, Vec<&str>)> = Vec::new();
    let line_clicks = preview
        .lines
        .iter()
        .filter_map(|line| line.click.as_ref().map(|click| (click, "<line>")));
    let span_clicks = preview
        .clickable_spans()
        .map(|(line, span, click)| (click, preview.lines[line].spans[span].text));
    for (click, text) in line_clicks.chain(span_clicks) {
        match legend.iter_mut().find(|(seen, _)| *seen == click) {
            Some((_, texts)) => {
                if !texts.contains(&text) {
                    texts.push(text);
                }
            }
            None => legend.push((click, vec![text])),
        }
    }

    out.push('\n');
    for (click, texts) in legend {
        out.push_str(&format!(
            "{}.{} = {}  [{}]\n",
            click.group.as_str(),
            click.name,
            click.color.as_deref().unwrap_or("(unset)"),
            texts.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{render, Language};
    use crate::theme::ColorTheme;

    fn theme() -> ColorTheme {
        let mut theme = ColorTheme::default();
        theme
            .background
            .insert("primary".to_string(), "#1e1e1e".to_string());
        theme
            .background
            .insert("errorLine".to_string(), "#3b0000".to_string());
        theme
            .foreground
            .insert("primary".to_string(), "#dddddd".to_string());
        theme
            .semantic
            .insert("keyword".to_string(), "#ff00ff".to_string());
        theme
            .semantic
            .insert("string".to_string(), "#2aa198".to_string());
        theme
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
    }

    #[test]
    fn html_container_uses_theme_and_font() {
        let html = render_html(&render(&theme(), Language::TypeScript), &HtmlOptions::default());
        assert!(html.starts_with("<div class=\"code-preview\" data-language=\"typescript\""));
        assert!(html.contains("background-color: #1e1e1e; color: #dddddd; font-family: &quot;BerkeleyMono Nerd Font&quot;"));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn html_tokens_carry_click_attributes_and_escaped_text() {
        let html = render_html(&render(&theme(), Language::TypeScript), &HtmlOptions::default());
        assert!(html.contains(
            "<span class=\"token token-keyword\" style=\"color: #ff00ff\" data-group=\"semantic\" data-name=\"keyword\" data-color=\"#ff00ff\">function</span>"
        ));
        assert!(html.contains("data-name=\"operator\">&amp;&amp;</span>"));
        assert!(html.contains(">&quot;Success!&quot;</span>"));
        assert!(html.contains("<span style=\"color: #dddddd\">&lt;/</span>"));
    }

    #[test]
    fn html_highlighted_line_is_clickable() {
        let html = render_html(&render(&theme(), Language::TypeScript), &HtmlOptions::default());
        assert!(html.contains(
            "<div class=\"code-line code-line--highlight\" style=\"background-color: #3b0000\" data-group=\"background\" data-name=\"errorLine\" data-color=\"#3b0000\">"
        ));
    }

    #[test]
    fn html_blank_lines_are_non_breaking() {
        let html = render_html(&render(&theme(), Language::CSharp), &HtmlOptions::default());
        assert!(html.contains("<div class=\"code-line\">&nbsp;</div>"));
    }

    #[test]
    fn text_rendering_lists_slots_once() {
        let text = render_text(&render(&theme(), Language::TypeScript));
        assert!(text.starts_with("// Calculate the total price of items\nfunction calculateTotal(items: Item[]) {\n  let total"));
        assert!(text.contains("throw new Error(\"Not implemented\");  <- background.errorLine\n"));
        let keyword_rows: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("semantic.keyword = "))
            .collect();
        assert_eq!(keyword_rows.len(), 1);
        assert!(keyword_rows[0].starts_with("semantic.keyword = #ff00ff  [function, let, number, const"));
        assert!(text.contains("semantic.number = (unset)  [0]\n"));
        assert!(text.contains("background.errorLine = #3b0000  [<line>]\n"));
    }
}
