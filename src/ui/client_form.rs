use crossterm::event::KeyCode;
use tui::{backend::Backend, Frame};

use crate::format::{format_phone, format_tax_id};
use crate::models::{Client, ClientDraft};
use crate::ui::form::{FormAction, FormMode, edit_text, render_form_frame};

pub type ClientFormAction = FormAction<ClientDraft>;

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ClientField {
    Name,
    TaxId,
    Phone,
}

pub struct ClientFormState {
    pub mode: FormMode,
    pub draft: ClientDraft,
    pub current_field: ClientField,
    pub editing: bool,
}

impl ClientFormState {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: ClientDraft::default(),
            current_field: ClientField::Name,
            editing: false,
        }
    }

    pub fn from_existing(client: &Client) -> Self {
        Self {
            mode: FormMode::Update(client.id),
            draft: ClientDraft::from_existing(client),
            ..Self::new()
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            ClientField::Name => ClientField::TaxId,
            ClientField::TaxId => ClientField::Phone,
            ClientField::Phone => ClientField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            ClientField::Name => ClientField::Phone,
            ClientField::TaxId => ClientField::Name,
            ClientField::Phone => ClientField::TaxId,
        };
    }

    /// Masked fields are re-formatted after every keystroke.
    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            ClientField::Name => edit_text(&mut self.draft.name, key),
            ClientField::TaxId => {
                edit_text(&mut self.draft.tax_id, key);
                self.draft.tax_id = format_tax_id(&self.draft.tax_id);
            }
            ClientField::Phone => {
                edit_text(&mut self.draft.phone, key);
                self.draft.phone = format_phone(&self.draft.phone);
            }
        }
    }
}

pub fn render_client_form<B: Backend>(f: &mut Frame<B>, state: &ClientFormState) {
    let title = match state.mode {
        FormMode::Create => "New Client".to_string(),
        FormMode::Update(id) => format!("Update Client #{}", id),
    };

    let fields = [
        ("Name", state.draft.name.clone()),
        ("CPF", state.draft.tax_id.clone()),
        ("Phone", state.draft.phone.clone()),
    ];

    let help_text = if state.editing {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save client | Esc - Cancel"
    };

    render_form_frame(
        f,
        &title,
        "Client Details",
        &fields,
        state.current_field as usize,
        state.editing,
        help_text,
    );
}

pub fn handle_key(state: &mut ClientFormState, key: KeyCode) -> Option<ClientFormAction> {
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
            return Some(FormAction::Submit(state.mode, state.draft.clone()));
        }
        _ if state.editing => state.edit_current_field(key),
        _ => {}
    }

    None
}
