use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::routes::Route;

const ENTRIES: [&str; 3] = ["Cars", "Clients", "Orders"];

fn entry_route(index: usize) -> Option<Route> {
    match index {
        0 => Some(Route::CarList),
        1 => Some(Route::ClientList),
        2 => Some(Route::OrderList),
        _ => None,
    }
}

pub enum HomeAction {
    Exit,
    Open(Route),
}

pub struct HomeState {
    list_state: ListState,
}

impl HomeState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    pub fn next(&mut self) {
        let i = self.list_state.selected().map_or(0, |i| (i + 1) % ENTRIES.len());
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| (i + ENTRIES.len() - 1) % ENTRIES.len());
        self.list_state.select(Some(i));
    }
}

pub fn render_home<B: Backend>(frame: &mut Frame<B>, state: &mut HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)].as_ref())
        .split(frame.size());

    let items: Vec<ListItem> = ENTRIES
        .iter()
        .map(|label| ListItem::new(Spans::from(vec![Span::raw(*label)])))
        .collect();

    let menu = List::new(items)
        .block(Block::default().title("Vehicle Sales").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(menu, chunks[0], &mut state.list_state);

    let help = Paragraph::new("<Enter> Open | <Q> Quit")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(help, chunks[1]);
}

pub fn handle_key(state: &mut HomeState, key: KeyCode) -> Option<HomeAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Some(HomeAction::Exit),
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        KeyCode::Enter => {
            let i = state.list_state.selected().unwrap_or(0);
            return entry_route(i).map(HomeAction::Open);
        }
        _ => {}
    }
    None
}
