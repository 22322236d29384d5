use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use super::truncate;
use crate::app::App;
use crate::models::WrongAnswer;

const QUESTION_PREVIEW_LENGTH: usize = 70;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.calculate_score();
    let total = app.total_questions();
    let percentage = app.percentage();
    let grade_color = get_grade_color(percentage);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app, score, total, grade_color);
    render_review(frame, chunks[2], &app.wrong_answers(), app.result_scroll());
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    score: usize,
    total: usize,
    grade_color: Color,
) {
    let verdict = if app.passed() {
        Span::styled(
            format!("PASS  ·  Congratulations {}!", app.user_name()),
            Style::default().fg(Color::Green).bold(),
        )
    } else {
        Span::styled(
            format!("FAIL  ·  {}, keep studying!", app.user_name()),
            Style::default().fg(Color::Red).bold(),
        )
    };

    let saved = match (app.saved_path(), app.save_error()) {
        (Some(path), _) => Span::styled(
            format!("Results saved to {}", path.display()),
            Style::default().fg(Color::DarkGray),
        ),
        (None, Some(err)) => Span::styled(
            format!("Could not save results: {}", err),
            Style::default().fg(Color::Red),
        ),
        (None, None) => Span::raw(""),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({}%)", score, total, app.percentage()),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(verdict),
        Line::from(saved),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_review(frame: &mut Frame, area: Rect, wrong: &[WrongAnswer], scroll: usize) {
    let mut lines: Vec<Line> = Vec::new();

    if wrong.is_empty() {
        lines.push(Line::from(Span::styled(
            "No incorrect answers.",
            Style::default().fg(Color::Green),
        )));
    }

    for (index, item) in wrong.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate(&item.question, QUESTION_PREVIEW_LENGTH),
                Style::default().fg(Color::White),
            ),
        ]));

        for option in &item.options {
            let (symbol, style, note) = if option.letter == item.correct_answer {
                ("+", Style::default().fg(Color::Green), " (correct answer)")
            } else if item.user_answer == Some(option.letter) {
                ("-", Style::default().fg(Color::Red), " (your answer)")
            } else {
                (" ", Style::default().fg(Color::Gray), "")
            };
            lines.push(Line::from(vec![
                Span::styled(format!("    {} ", symbol), style),
                Span::styled(format!("{}. {}", option.letter, option.text), style),
                Span::styled(note, style),
            ]));
        }

        if item.user_answer.is_none() {
            lines.push(Line::from(Span::styled(
                "      not answered",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Review Incorrect Answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r take another test  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
