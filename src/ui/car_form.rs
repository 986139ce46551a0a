use crossterm::event::KeyCode;
use tui::{backend::Backend, Frame};

use crate::models::{Car, CarDraft};
use crate::ui::components::popup::render_confirmation;
use crate::ui::form::{FormAction, FormMode, edit_text, render_form_frame};

pub type CarFormAction = FormAction<CarDraft>;

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum CarField {
    Brand,
    Model,
    Year,
    Color,
}

pub struct CarFormState {
    pub mode: FormMode,
    pub draft: CarDraft,
    pub current_field: CarField,
    pub editing: bool,
    confirming_update: bool,
}

impl CarFormState {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CarDraft::default(),
            current_field: CarField::Brand,
            editing: false,
            confirming_update: false,
        }
    }

    pub fn from_existing(car: &Car) -> Self {
        Self {
            mode: FormMode::Update(car.id),
            draft: CarDraft::from_existing(car),
            ..Self::new()
        }
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming_update
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            CarField::Brand => CarField::Model,
            CarField::Model => CarField::Year,
            CarField::Year => CarField::Color,
            CarField::Color => CarField::Brand,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            CarField::Brand => CarField::Color,
            CarField::Model => CarField::Brand,
            CarField::Year => CarField::Model,
            CarField::Color => CarField::Year,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let field_value = match self.current_field {
            CarField::Brand => &mut self.draft.brand,
            CarField::Model => &mut self.draft.model,
            CarField::Year => &mut self.draft.year,
            CarField::Color => &mut self.draft.color,
        };
        edit_text(field_value, key);
    }

    fn submit(&self) -> CarFormAction {
        FormAction::Submit(self.mode, self.draft.clone())
    }
}

pub fn render_car_form<B: Backend>(f: &mut Frame<B>, state: &CarFormState) {
    let title = match state.mode {
        FormMode::Create => "New Car".to_string(),
        FormMode::Update(id) => format!("Update Car #{}", id),
    };

    let fields = [
        ("Brand", state.draft.brand.clone()),
        ("Model", state.draft.model.clone()),
        ("Year", state.draft.year.clone()),
        ("Color", state.draft.color.clone()),
    ];

    let help_text = if state.editing {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save car | Esc - Cancel"
    };

    render_form_frame(
        f,
        &title,
        "Car Details",
        &fields,
        state.current_field as usize,
        state.editing,
        help_text,
    );

    if state.is_confirming() {
        render_confirmation(f, "Really update this car?");
    }
}

pub fn handle_key(state: &mut CarFormState, key: KeyCode) -> Option<CarFormAction> {
    if state.confirming_update {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                state.confirming_update = false;
                return Some(state.submit());
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.confirming_update = false;
            }
            _ => {}
        }
        return None;
    }

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
            if state.mode.is_update() {
                state.confirming_update = true;
            } else {
                return Some(state.submit());
            }
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}
