mod field;

use alien_invaders::session::{GameState, Message, Session};
use ratatui::prelude::*;
use ratatui::widgets::*;

const ACCENT: Color = Color::Rgb(80, 255, 80);
const OVERLAY_BG: Color = Color::Rgb(15, 15, 25);

pub fn render(frame: &mut Frame, session: &Session) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(" Alien Invaders ")
        .title_style(Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD));

    let area = frame.area();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(8),    // Playfield
            Constraint::Length(1), // Key help
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(session)), chunks[0]);

    let width = chunks[1].width as usize;
    let height = chunks[1].height as usize;
    if width > 0 && height > 0 {
        let lines = field::render_field(session.wave(), width, height);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    frame.render_widget(Paragraph::new(help_line(session.state())), chunks[2]);

    if let Some(message) = session.message() {
        render_message(frame, chunks[1], message);
    }
}

fn separator() -> Span<'static> {
    Span::styled(" | ", Style::default().fg(Color::DarkGray))
}

fn status_line(session: &Session) -> Line<'static> {
    let (score, lives, survivors) = session
        .wave()
        .map_or((0, 0, 0), |wave| (wave.score(), wave.lives(), wave.survivors()));
    let mute = if session.is_muted() { "Muted" } else { "Sound" };

    Line::from(vec![
        Span::styled(
            format!(" Score: {score} "),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled(
            format!("Lives: {}", "\u{2666} ".repeat(lives as usize)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled(
            format!("Wave: {} ", session.wave_number()),
            Style::default().fg(Color::Green),
        ),
        separator(),
        Span::styled(
            format!("Aliens: {survivors} "),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
        separator(),
        Span::styled(mute, Style::default().fg(Color::Cyan)),
    ])
}

fn help_line(state: GameState) -> Line<'static> {
    let key = Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::DarkGray);
    let gap = Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));

    let mut spans = match state {
        GameState::Active | GameState::NewWave => vec![
            Span::styled(" \u{2190}\u{2192}", key),
            Span::styled(" Move ", text),
            gap.clone(),
            Span::styled("Space", key),
            Span::styled(" Shoot ", text),
            gap.clone(),
            Span::styled("Esc", key),
            Span::styled(" Pause ", text),
        ],
        _ => vec![Span::styled(" S", key), Span::styled(" Continue ", text)],
    };
    spans.extend([
        gap.clone(),
        Span::styled("M", key),
        Span::styled(" Mute ", text),
        gap,
        Span::styled("Q", key),
        Span::styled(" Quit", text),
    ]);
    Line::from(spans)
}

fn render_message(frame: &mut Frame, area: Rect, message: Message) {
    let text = message.to_string();
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
    let tall = text.lines().count() as u16;

    let overlay_w = (widest + 6).min(area.width.saturating_sub(2));
    let overlay_h = (tall + 4).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .style(Style::default().bg(OVERLAY_BG));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![Line::from("")];
    for (i, line) in text.lines().enumerate() {
        let style = if i == 0 {
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Rgb(180, 180, 200))
        };
        lines.push(Line::styled(line.to_string(), style));
    }

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(OVERLAY_BG));
    frame.render_widget(p, inner);
}
