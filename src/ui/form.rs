//! Pieces shared by the create/update screens.

use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Whether a form registers a new record or updates the one with this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(i64),
}

impl FormMode {
    pub fn is_update(&self) -> bool {
        matches!(self, FormMode::Update(_))
    }
}

#[derive(Debug, PartialEq)]
pub enum FormAction<D> {
    Cancel,
    Submit(FormMode, D),
}

/// Apply a keystroke to a free-text field.
pub fn edit_text(field: &mut String, key: KeyCode) {
    match key {
        KeyCode::Char(c) => field.push(c),
        KeyCode::Backspace => {
            field.pop();
        }
        _ => {}
    }
}

/// Title, field list and help line, the layout every form screen shares.
pub fn render_form_frame<B: Backend>(
    f: &mut Frame<B>,
    title: &str,
    details_title: &str,
    fields: &[(&str, String)],
    current: usize,
    editing: bool,
    help_text: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new(title.to_string())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_fields(f, chunks[1], details_title, fields, current, editing);

    let help = Paragraph::new(help_text.to_string())
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_fields<B: Backend>(
    f: &mut Frame<B>,
    area: Rect,
    details_title: &str,
    fields: &[(&str, String)],
    current: usize,
    editing: bool,
) {
    let items: Vec<ListItem> = fields
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let content = if i == current && editing {
                Spans::from(vec![
                    Span::styled(format!("{}: ", name), Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{}|", value),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                let style = if i == current {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };

                Spans::from(vec![
                    Span::styled(format!("{}: ", name), style),
                    Span::raw(value.clone()),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(details_title.to_string()));

    f.render_widget(form_list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_text_appends_and_erases() {
        let mut field = String::from("Fia");
        edit_text(&mut field, KeyCode::Char('t'));
        assert_eq!(field, "Fiat");
        edit_text(&mut field, KeyCode::Backspace);
        edit_text(&mut field, KeyCode::Left);
        assert_eq!(field, "Fia");
    }
}
