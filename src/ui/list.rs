use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, TableState},
    Frame,
};

use crate::api::Confirmation;
use crate::models::{Car, Client, Order};
use crate::ui::components::popup::render_confirmation;
use crate::ui::table::{
    CAR_HEADERS, CLIENT_HEADERS, ORDER_HEADERS, TableBody, draw_table, render_car_rows,
    render_client_rows, render_order_rows,
};

/// The three back-office verticals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Car,
    Client,
    Order,
}

impl Entity {
    pub fn title(&self) -> &'static str {
        match self {
            Entity::Car => "Cars",
            Entity::Client => "Clients",
            Entity::Order => "Orders",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Entity::Car => "car",
            Entity::Client => "client",
            Entity::Order => "order",
        }
    }

    fn headers(&self) -> &'static [&'static str] {
        match self {
            Entity::Car => CAR_HEADERS,
            Entity::Client => CLIENT_HEADERS,
            Entity::Order => ORDER_HEADERS,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ListAction {
    Back,
    New(Entity),
    /// Update page address taken from the row's edit trigger.
    Edit(String),
    Delete(Entity, i64, Confirmation),
}

// Represents the state of a list screen
pub struct ListState {
    entity: Entity,
    body: TableBody,
    table_state: TableState,
    pending_delete: Option<i64>,
}

impl ListState {
    pub fn empty(entity: Entity) -> Self {
        Self {
            entity,
            body: TableBody::new(),
            table_state: TableState::default(),
            pending_delete: None,
        }
    }

    pub fn cars(cars: &[Car]) -> Self {
        let mut state = Self::empty(Entity::Car);
        render_car_rows(cars, &mut state.body);
        state.select_first();
        state
    }

    pub fn clients(clients: &[Client]) -> Self {
        let mut state = Self::empty(Entity::Client);
        render_client_rows(clients, &mut state.body);
        state.select_first();
        state
    }

    pub fn orders(orders: &[Order]) -> Self {
        let mut state = Self::empty(Entity::Order);
        render_order_rows(orders, &mut state.body);
        state.select_first();
        state
    }

    fn select_first(&mut self) {
        if !self.body.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn next(&mut self) {
        if self.body.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= self.body.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.body.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.body.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn selected_row(&self) -> Option<&crate::ui::table::TableRow> {
        self.table_state.selected().and_then(|i| self.body.get(i))
    }
}

pub fn render_list<B: Backend>(frame: &mut Frame<B>, state: &mut ListState) {
    let size = frame.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(size);

    draw_table(
        frame,
        chunks[0],
        state.entity.title(),
        state.entity.headers(),
        &state.body,
        &mut state.table_state,
    );

    let noun = state.entity.singular();
    let buttons_text = if state.selected_row().is_some() {
        format!("<N> New {0} | <E> Edit {0} | <D> Delete {0} | <Esc> Back", noun)
    } else {
        format!("<N> New {} | <Esc> Back", noun)
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);

    if state.is_confirming_delete() {
        render_confirmation(frame, &format!("Really remove this {}?", noun));
    }
}

pub fn handle_key(state: &mut ListState, key: KeyCode) -> Option<ListAction> {
    if let Some(id) = state.pending_delete {
        let answer = match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Confirmation::Accepted,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Confirmation::Declined,
            _ => return None,
        };
        state.pending_delete = None;
        return Some(ListAction::Delete(state.entity, id, answer));
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(ListAction::Back),
        KeyCode::Char('n') => return Some(ListAction::New(state.entity)),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(row) = state.selected_row() {
                return Some(ListAction::Edit(row.actions.edit.clone()));
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            state.pending_delete = state.selected_row().map(|row| row.actions.delete);
        }
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Route;

    fn cars() -> Vec<Car> {
        (1..=3)
            .map(|id| Car {
                id,
                brand: "Fiat".into(),
                model: format!("Uno {}", id),
                year: 1995,
                color: "Red".into(),
            })
            .collect()
    }

    #[test]
    fn edit_targets_selected_row() {
        let mut state = ListState::cars(&cars());
        handle_key(&mut state, KeyCode::Down);

        match handle_key(&mut state, KeyCode::Char('e')) {
            Some(ListAction::Edit(url)) => {
                assert_eq!(Route::parse(&url).unwrap(), Route::CarUpdate(cars()[1].clone()));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn delete_waits_for_an_answer() {
        let mut state = ListState::cars(&cars());
        assert_eq!(handle_key(&mut state, KeyCode::Char('d')), None);
        assert!(state.is_confirming_delete());
        assert_eq!(handle_key(&mut state, KeyCode::Char('x')), None);

        assert_eq!(
            handle_key(&mut state, KeyCode::Char('n')),
            Some(ListAction::Delete(Entity::Car, 1, Confirmation::Declined))
        );
        assert!(!state.is_confirming_delete());

        handle_key(&mut state, KeyCode::Up);
        handle_key(&mut state, KeyCode::Char('d'));
        assert_eq!(
            handle_key(&mut state, KeyCode::Char('y')),
            Some(ListAction::Delete(Entity::Car, 3, Confirmation::Accepted))
        );
    }

    #[test]
    fn empty_list_offers_only_new_and_back() {
        let mut state = ListState::empty(Entity::Order);
        assert_eq!(handle_key(&mut state, KeyCode::Char('e')), None);
        assert_eq!(handle_key(&mut state, KeyCode::Char('d')), None);
        assert!(!state.is_confirming_delete());
        assert_eq!(
            handle_key(&mut state, KeyCode::Char('n')),
            Some(ListAction::New(Entity::Order))
        );
        assert_eq!(handle_key(&mut state, KeyCode::Esc), Some(ListAction::Back));
    }
}
