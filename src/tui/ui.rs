use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::state::AppState;
use crate::controller::{CarouselView, Phase};

const MARGIN: u16 = 2;

/// Width of the carousel pane for a terminal `width` columns wide.
pub fn carousel_width(width: u16) -> u16 {
    width.saturating_sub(2 * MARGIN + 2)
}

/// Draw the whole screen.
pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(MARGIN)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(f.area());

    let title = Paragraph::new("¿Qué se te antoja?")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let view = state.controller.view();
    render_category_strip(f, chunks[1], state, &view);
    render_carousel(f, chunks[2], &view);
    render_dots(f, chunks[3], &view);

    let help = Paragraph::new(
        "←/→: Page | [/]: Browse | Enter or 1-6: Select | r: Retry | q: Quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);

    render_status_bar(f, chunks[5], state, &view);
}

/// Category strip: the slide under the strip offset is highlighted, the
/// category being shown is bold.
fn render_category_strip(f: &mut Frame, area: Rect, state: &AppState, view: &CarouselView<'_>) {
    let visible = state.selector.visible();
    let mut spans = Vec::new();
    for (i, category) in state.selector.categories().iter().enumerate() {
        let mut style = Style::default();
        if category.id == visible.id {
            style = style.fg(Color::Black).bg(Color::Cyan);
        }
        if category.id == view.category.id {
            style = style.add_modifier(Modifier::BOLD);
        }
        spans.push(Span::styled(
            format!(" {} {} ", i + 1, category.display_name),
            style,
        ));
        spans.push(Span::raw(" "));
    }

    let strip = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Conoce nuestro catálogo "),
        );
    f.render_widget(strip, area);
}

fn render_carousel(f: &mut Frame, area: Rect, view: &CarouselView<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", view.category.display_name));

    let lines: Vec<Line> = match view.phase {
        Phase::Idle => vec![Line::from("Pick a category")],
        Phase::Loading => vec![Line::styled(
            "Loading products...",
            Style::default().fg(Color::Yellow),
        )],
        Phase::Failed => {
            let detail = view
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Unknown error".into());
            vec![
                Line::styled(detail, Style::default().fg(Color::Red)),
                Line::from(""),
                Line::from("Press r to retry"),
            ]
        }
        Phase::Ready => match view.active_product() {
            None => vec![Line::from("No products in this category")],
            Some(p) => {
                let mut lines = vec![
                    Line::styled(
                        p.name.clone(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Line::from(p.display_price()),
                    Line::from(format!(
                        "Disponible: {}",
                        if p.available { "Sí" } else { "No" }
                    )),
                ];
                if let Some(desc) = &p.description {
                    lines.push(Line::from(""));
                    lines.push(Line::from(desc.clone()));
                }
                lines.push(Line::from(""));
                lines.push(Line::styled(
                    p.image_url.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
                lines
            }
        },
    };

    let carousel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(carousel, area);
}

fn render_dots(f: &mut Frame, area: Rect, view: &CarouselView<'_>) {
    let spans: Vec<Span> = view
        .dots()
        .into_iter()
        .map(|active| {
            if active {
                Span::styled("● ", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("● ", Style::default().fg(Color::Gray))
            }
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState, view: &CarouselView<'_>) {
    let status_text = if let Some(error) = view.error {
        format!(" Error: {}", error)
    } else if view.loading {
        format!(" Loading {} from {}", view.category.display_name, state.service_url)
    } else {
        format!(" Connected to: {}", state.service_url)
    };

    let style = if view.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}
