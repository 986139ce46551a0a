use chrono::NaiveDate;
use crossterm::event::KeyCode;
use tui::{backend::Backend, Frame};

use crate::models::{Car, Client, Order, OrderDraft};
use crate::ui::components::date_input::DateInputState;
use crate::ui::form::{FormAction, FormMode, edit_text, render_form_frame};

pub type OrderFormAction = FormAction<OrderDraft>;

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum OrderField {
    Client,
    Car,
    Date,
    Amount,
}

/// A drop-down over records loaded from the API: `(id, label)` pairs.
pub struct Select {
    options: Vec<(i64, String)>,
    selected: Option<usize>,
}

impl Select {
    pub fn new(options: Vec<(i64, String)>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    pub fn select_id(&mut self, id: i64) {
        self.selected = self.options.iter().position(|(option, _)| *option == id);
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected.and_then(|i| self.options.get(i)).map(|(id, _)| *id)
    }

    pub fn label(&self) -> String {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|(_, label)| label.clone())
            .unwrap_or_else(|| "<none>".to_string())
    }

    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < self.options.len() => i + 1,
            _ => 0,
        });
    }

    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => self.options.len() - 1,
        });
    }
}

pub struct OrderFormState {
    pub mode: FormMode,
    pub clients: Select,
    pub cars: Select,
    pub date: DateInputState,
    pub amount: String,
    pub current_field: OrderField,
    pub editing: bool,
}

impl OrderFormState {
    pub fn new(clients: &[Client], cars: &[Car], today: Option<NaiveDate>) -> Self {
        Self {
            mode: FormMode::Create,
            clients: Select::new(clients.iter().map(|c| (c.id, c.name.clone())).collect()),
            cars: Select::new(
                cars.iter()
                    .map(|c| (c.id, format!("{} {}", c.brand, c.model)))
                    .collect(),
            ),
            date: DateInputState::new(today),
            amount: String::new(),
            current_field: OrderField::Client,
            editing: false,
        }
    }

    pub fn from_existing(order: &Order, clients: &[Client], cars: &[Car]) -> Self {
        let draft = OrderDraft::from_existing(order);
        let mut state = Self::new(clients, cars, None);
        state.mode = FormMode::Update(order.id);
        state.clients.select_id(order.client_id);
        state.cars.select_id(order.car_id);
        state.date = DateInputState::from_value(&draft.order_date);
        state.amount = draft.amount;
        state
    }

    pub fn draft(&self) -> OrderDraft {
        OrderDraft {
            client_id: self.clients.selected_id(),
            car_id: self.cars.selected_id(),
            order_date: self.date.value(),
            amount: self.amount.clone(),
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.current_field == OrderField::Date {
            self.date.toggle_editing();
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            OrderField::Client => OrderField::Car,
            OrderField::Car => OrderField::Date,
            OrderField::Date => OrderField::Amount,
            OrderField::Amount => OrderField::Client,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            OrderField::Client => OrderField::Amount,
            OrderField::Car => OrderField::Client,
            OrderField::Date => OrderField::Car,
            OrderField::Amount => OrderField::Date,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            OrderField::Client => cycle(&mut self.clients, key),
            OrderField::Car => cycle(&mut self.cars, key),
            OrderField::Date => self.date.handle_input(key),
            OrderField::Amount => edit_text(&mut self.amount, key),
        }
    }
}

fn cycle(select: &mut Select, key: KeyCode) {
    match key {
        KeyCode::Right | KeyCode::Down => select.next(),
        KeyCode::Left | KeyCode::Up => select.previous(),
        _ => {}
    }
}

pub fn render_order_form<B: Backend>(f: &mut Frame<B>, state: &OrderFormState) {
    let title = match state.mode {
        FormMode::Create => "New Order".to_string(),
        FormMode::Update(id) => format!("Update Order #{}", id),
    };

    let fields = [
        ("Client", state.clients.label()),
        ("Car", state.cars.label()),
        ("Date", state.date.get_display_string()),
        ("Amount", state.amount.clone()),
    ];

    let help_text = if !state.editing {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save order | Esc - Cancel"
    } else {
        match state.current_field {
            OrderField::Client | OrderField::Car => "Left/Right - Choose | Enter - Done",
            OrderField::Date => "Digits - Type date | Left/Right - Switch date part | Enter - Done",
            OrderField::Amount => "Enter - Save field | Esc - Stop editing",
        }
    };

    render_form_frame(
        f,
        &title,
        "Order Details",
        &fields,
        state.current_field as usize,
        state.editing,
        help_text,
    );
}

pub fn handle_key(state: &mut OrderFormState, key: KeyCode) -> Option<OrderFormAction> {
    match key {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(FormAction::Cancel);
            }
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            return Some(FormAction::Submit(state.mode, state.draft()));
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}
