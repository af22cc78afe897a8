use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::Provider;
use crate::store::{Theme, ViewMode};
use crate::tui::app::{ActivePane, DetailState, TuiApp};

/// Colors derived from the persisted theme.
struct Palette {
    accent: Color,
    text: Color,
    dim: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            accent: Color::Cyan,
            text: Color::White,
            dim: Color::DarkGray,
        },
        Theme::Light => Palette {
            accent: Color::Blue,
            text: Color::Black,
            dim: Color::Gray,
        },
    }
}

fn badge_color(provider: Provider) -> Color {
    match provider {
        Provider::Tavily => Color::Blue,
        Provider::Exa => Color::Green,
        Provider::Fallback => Color::Yellow,
        Provider::Unknown => Color::Reset,
    }
}

pub fn render(frame: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(chunks[0]);

    render_articles_pane(frame, app, panes[0]);
    render_detail_pane(frame, app, panes[1]);
    render_status_bar(frame, app, chunks[1]);
    render_toast(frame, app, chunks[0]);
}

fn render_articles_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect) {
    let colors = palette(app.theme);
    let is_active = app.active_pane == ActivePane::Articles;
    let border_style = if is_active {
        Style::default().fg(colors.accent)
    } else {
        Style::default().fg(colors.dim)
    };

    let items: Vec<ListItem> = app
        .articles
        .iter()
        .enumerate()
        .map(|(i, article)| {
            let marker = if app.is_saved(&article.url) { "★" } else { " " };
            let date = article
                .published_at
                .map(|d| d.format("%m/%d").to_string())
                .unwrap_or_else(|| "     ".to_string());

            let text = match app.view {
                ViewMode::List => Text::from(format!(
                    "{} {} {}",
                    marker,
                    date,
                    article.display_title()
                )),
                ViewMode::Grid => Text::from(vec![
                    Line::from(format!("{} {}", marker, article.display_title())),
                    Line::from(Span::styled(
                        format!("   {} · {}", article.source_label(), date),
                        Style::default().fg(colors.dim),
                    )),
                ]),
            };

            let style = if i == app.article_index && is_active {
                Style::default()
                    .bg(colors.accent)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if i == app.article_index {
                Style::default().bg(colors.dim)
            } else {
                Style::default().fg(colors.text)
            };

            ListItem::new(text).style(style)
        })
        .collect();

    let title = format!(" Articles ({}) ", app.articles.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);
    let is_active = app.active_pane == ActivePane::Detail;
    let border_style = if is_active {
        Style::default().fg(colors.accent)
    } else {
        Style::default().fg(colors.dim)
    };

    match &app.detail {
        DetailState::Empty => {
            let block = Block::default()
                .title(" Preview ")
                .borders(Borders::ALL)
                .border_style(border_style);
            let paragraph = Paragraph::new(Span::styled(
                "No article selected. Enter previews the selected article.",
                Style::default().fg(colors.dim),
            ))
            .block(block)
            .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        DetailState::Loading(state) => {
            let block = Block::default()
                .title(" Loading... ")
                .borders(Borders::ALL)
                .border_style(border_style);
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .split(inner);

            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(colors.accent))
                .percent(state.progress as u16)
                .label(format!("{}%", state.progress));
            frame.render_widget(gauge, rows[0]);

            let message = Paragraph::new(state.message.clone())
                .style(Style::default().fg(colors.text));
            frame.render_widget(message, rows[1]);
        }
        DetailState::Failed(message) => {
            let block = Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red));
            let lines = vec![
                Line::from(Span::styled(
                    "Failed to load content",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(message.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    "R retries, o opens the original article.",
                    Style::default().fg(colors.dim),
                )),
            ];
            let paragraph = Paragraph::new(Text::from(lines))
                .block(block)
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        DetailState::Ready(detail) => {
            let lines = detail_lines(app, area);
            let block = Block::default()
                .title(format!(" {} ", detail.title))
                .borders(Borders::ALL)
                .border_style(border_style);
            let paragraph = Paragraph::new(Text::from(lines))
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((app.detail_scroll, 0));
            frame.render_widget(paragraph, area);
        }
    }
}

fn detail_lines(app: &TuiApp, area: Rect) -> Vec<Line<'static>> {
    let colors = palette(app.theme);
    let DetailState::Ready(detail) = &app.detail else {
        return Vec::new();
    };

    let divider = || {
        Line::from(Span::styled(
            "─".repeat(area.width.saturating_sub(2) as usize),
            Style::default().fg(colors.dim),
        ))
    };

    let mut lines = Vec::new();

    if let Some(provider) = detail.source {
        if let Some(badge) = provider.badge() {
            lines.push(Line::from(Span::styled(
                format!(" {} ", badge),
                Style::default()
                    .fg(Color::Black)
                    .bg(badge_color(provider)),
            )));
            lines.push(Line::from(""));
        }
    }

    if let Some(block) = &detail.summary {
        lines.push(Line::from(Span::styled(
            "中文摘要",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(divider());

        let doc = &block.doc;
        let label_style = Style::default().add_modifier(Modifier::BOLD);
        let labeled = doc.title.is_some() || !doc.key_points.is_empty();

        if let Some(title) = &doc.title {
            lines.push(Line::from(vec![
                Span::styled("标题: ", label_style),
                Span::raw(title.clone()),
            ]));
            lines.push(Line::from(""));
        }

        if let Some(summary) = &doc.summary {
            if labeled {
                lines.push(Line::from(Span::styled("摘要:", label_style)));
            }
            for (i, paragraph) in summary.split("\n\n").enumerate() {
                if i > 0 {
                    lines.push(Line::from(""));
                }
                for text_line in paragraph.lines() {
                    lines.push(Line::from(text_line.to_string()));
                }
            }
            lines.push(Line::from(""));
        }

        if !doc.key_points.is_empty() {
            lines.push(Line::from(Span::styled("关键点:", label_style)));
            for (i, point) in doc.key_points.iter().enumerate() {
                let mut spans = vec![Span::raw(format!("{}. ", i + 1))];
                if let Some(emoji) = &point.emoji {
                    spans.push(Span::styled(
                        format!("{} ", emoji),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                spans.push(Span::raw(point.text.clone()));
                lines.push(Line::from(spans));
            }
            lines.push(Line::from(""));
        }

        let copy_hint = if app.copy_flash_active() {
            Span::styled("✔ 已复制", Style::default().fg(Color::Green))
        } else {
            Span::styled("c: 复制摘要", Style::default().fg(colors.dim))
        };
        lines.push(Line::from(copy_hint));
        lines.push(divider());
    }

    match &detail.content {
        Some(content) => {
            let header = if app.content_open {
                "▾ Original Content (e collapses)"
            } else {
                "▸ Original Content (e expands)"
            };
            lines.push(Line::from(Span::styled(
                header,
                Style::default()
                    .fg(colors.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            if app.content_open {
                lines.push(Line::from(""));
                for text_line in content.lines() {
                    lines.push(Line::from(text_line.to_string()));
                }
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "No content available",
                Style::default().fg(colors.dim),
            )));
        }
    }

    lines
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let colors = palette(app.theme);
    let status =
        "j/k:Navigate  Tab:Pane  Enter:Preview  s:Save  c:Copy  e:Expand  o:Open  t:Theme  v:View  R:Refetch  q:Quit";
    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.text).bg(colors.dim));
    frame.render_widget(paragraph, area);
}

fn render_toast(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };
    let colors = palette(app.theme);

    // Byte length over-allocates for wide glyphs.
    let width = (toast.message().len() as u16 + 4).min(area.width);
    let height = 3u16.min(area.height);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + area.height.saturating_sub(height),
        width,
        height,
    };

    frame.render_widget(Clear, rect);
    let paragraph = Paragraph::new(toast.message().to_string())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.accent)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rect);
}
