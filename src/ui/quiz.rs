use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{AnswerOption, Letter};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &question.question);
    render_options(
        frame,
        chunks[2],
        &question.options,
        app.selected_option(),
        app.current_answer(),
    );
    render_controls(frame, chunks[3], app.is_last_question());
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let done = app.current_question_number() as f64 / app.total_questions() as f64;
    let progress = format!(
        "{}/{}  ({:.0}%)",
        app.current_question_number(),
        app.total_questions(),
        done * 100.0
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[AnswerOption],
    selected: usize,
    answered: Option<Letter>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected;
        let is_answer = answered == Some(option.letter);
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else if is_answer {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let chosen = if is_answer { "  *" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option.letter), style),
            Span::styled(option.text.as_str(), style),
            Span::styled(chosen, Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, is_last: bool) {
    let hint = if is_last {
        "j/k navigate  ·  enter submit  ·  p back  ·  esc quit test"
    } else {
        "j/k navigate  ·  enter answer  ·  n/p next/back  ·  esc quit test"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
