use brightside_core::MotivationRecord;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// The three daily cards: quote, positive thought, productivity tip.
pub fn render_record(frame: &mut Frame, area: Rect, record: &MotivationRecord) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_quote(frame, layout[0], record);
    render_card(
        frame,
        layout[1],
        " Positive Thought ",
        &record.thought,
        Color::Green,
    );
    render_card(
        frame,
        layout[2],
        " Productivity Tip ",
        &record.tip,
        Color::Blue,
    );
}

fn render_quote(frame: &mut Frame, area: Rect, record: &MotivationRecord) {
    let block = Block::default()
        .title(" Quote of the Day ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let text = vec![
        Line::from(Span::styled(
            format!("\u{201c}{}\u{201d}", record.quote.text),
            Style::default().italic(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("\u{2014} {}", record.quote.author),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Right),
    ];
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, body: &str, color: Color) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(body.to_string())
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Full-width centered message, used for loading and error states.
pub fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);
    frame.render_widget(paragraph, vertical[1]);
}
