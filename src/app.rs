//! Screen orchestration: turns screen actions into API calls and navigation.

use std::collections::VecDeque;

use chrono::{Datelike, Local};
use crossterm::event::KeyCode;
use tracing::{info, warn};
use tui::{backend::Backend, Frame};

use crate::api::{ApiClient, ApiError, Confirmation, DeleteOutcome, Transport};
use crate::models::{CarDraft, ClientDraft, Order, OrderDraft};
use crate::routes::Route;
use crate::ui::{
    car_form::{self, CarFormState, render_car_form},
    client_form::{self, ClientFormState, render_client_form},
    components::popup::{Alert, render_alert},
    form::{FormAction, FormMode},
    home::{self, HomeAction, HomeState, render_home},
    list::{self, Entity, ListAction, ListState, render_list},
    order_form::{self, OrderFormState, render_order_form},
};

// Represents the current screen in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    List(Entity),
    CarForm,
    ClientForm,
    OrderForm,
}

// Main application state
pub struct AppState<T: Transport> {
    api: ApiClient<T>,
    screen: AppScreen,
    home_state: HomeState,
    list_state: Option<ListState>,
    car_form_state: Option<CarFormState>,
    client_form_state: Option<ClientFormState>,
    order_form_state: Option<OrderFormState>,
    alerts: VecDeque<Alert>,
}

impl<T: Transport> AppState<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            screen: AppScreen::Home,
            home_state: HomeState::new(),
            list_state: None,
            car_form_state: None,
            client_form_state: None,
            order_form_state: None,
            alerts: VecDeque::new(),
        }
    }

    pub fn screen(&self) -> AppScreen {
        self.screen
    }

    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn render<B: Backend>(&mut self, f: &mut Frame<B>) {
        match self.screen {
            AppScreen::Home => render_home(f, &mut self.home_state),
            AppScreen::List(_) => {
                if let Some(state) = &mut self.list_state {
                    render_list(f, state);
                }
            }
            AppScreen::CarForm => {
                if let Some(state) = &self.car_form_state {
                    render_car_form(f, state);
                }
            }
            AppScreen::ClientForm => {
                if let Some(state) = &self.client_form_state {
                    render_client_form(f, state);
                }
            }
            AppScreen::OrderForm => {
                if let Some(state) = &self.order_form_state {
                    render_order_form(f, state);
                }
            }
        }

        if let Some(alert) = self.current_alert() {
            render_alert(f, alert);
        }
    }

    /// Feed one key press to the active screen. Returns true to quit.
    pub async fn handle_key(&mut self, key: KeyCode) -> bool {
        if !self.alerts.is_empty() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alerts.pop_front();
            }
            return false;
        }

        match self.screen {
            AppScreen::Home => {
                if let Some(action) = home::handle_key(&mut self.home_state, key) {
                    match action {
                        HomeAction::Exit => return true,
                        HomeAction::Open(route) => self.navigate(route).await,
                    }
                }
            }
            AppScreen::List(_) => {
                let action = self
                    .list_state
                    .as_mut()
                    .and_then(|state| list::handle_key(state, key));
                if let Some(action) = action {
                    self.handle_list_action(action).await;
                }
            }
            AppScreen::CarForm => {
                let action = self
                    .car_form_state
                    .as_mut()
                    .and_then(|state| car_form::handle_key(state, key));
                match action {
                    Some(FormAction::Cancel) => self.navigate(Route::CarList).await,
                    Some(FormAction::Submit(mode, draft)) => self.submit_car(mode, draft).await,
                    None => {}
                }
            }
            AppScreen::ClientForm => {
                let action = self
                    .client_form_state
                    .as_mut()
                    .and_then(|state| client_form::handle_key(state, key));
                match action {
                    Some(FormAction::Cancel) => self.navigate(Route::ClientList).await,
                    Some(FormAction::Submit(mode, draft)) => self.submit_client(mode, draft).await,
                    None => {}
                }
            }
            AppScreen::OrderForm => {
                let action = self
                    .order_form_state
                    .as_mut()
                    .and_then(|state| order_form::handle_key(state, key));
                match action {
                    Some(FormAction::Cancel) => self.navigate(Route::OrderList).await,
                    Some(FormAction::Submit(mode, draft)) => self.submit_order(mode, draft).await,
                    None => {}
                }
            }
        }

        false
    }

    /// Follow a page address, as produced by a row's edit trigger.
    pub async fn open_url(&mut self, url: &str) {
        match Route::parse(url) {
            Ok(route) => self.navigate(route).await,
            Err(err) => {
                warn!(%url, error = %err, "cannot open page");
                self.alerts.push_back(Alert::error(format!("Cannot open page: {}", err)));
            }
        }
    }

    pub async fn navigate(&mut self, route: Route) {
        info!(page = %route.url(), "navigating");

        match route {
            Route::Home => self.screen = AppScreen::Home,
            Route::CarList => self.load_list(Entity::Car).await,
            Route::ClientList => self.load_list(Entity::Client).await,
            Route::OrderList => self.load_list(Entity::Order).await,
            Route::CarCreate => {
                self.car_form_state = Some(CarFormState::new());
                self.screen = AppScreen::CarForm;
            }
            Route::CarUpdate(car) => {
                self.car_form_state = Some(CarFormState::from_existing(&car));
                self.screen = AppScreen::CarForm;
            }
            Route::ClientCreate => {
                self.client_form_state = Some(ClientFormState::new());
                self.screen = AppScreen::ClientForm;
            }
            Route::ClientUpdate(client) => {
                self.client_form_state = Some(ClientFormState::from_existing(&client));
                self.screen = AppScreen::ClientForm;
            }
            Route::OrderCreate => self.open_order_form(None).await,
            Route::OrderUpdate(order) => self.open_order_form(Some(order)).await,
        }
    }

    /// Fetch-then-render. A failed fetch still shows the (empty) screen.
    async fn load_list(&mut self, entity: Entity) {
        let loaded = match entity {
            Entity::Car => self.api.list_cars().await.map(|cars| ListState::cars(&cars)),
            Entity::Client => self.api.list_clients().await.map(|clients| ListState::clients(&clients)),
            Entity::Order => self.api.list_orders().await.map(|orders| ListState::orders(&orders)),
        };

        let state = match loaded {
            Ok(state) => state,
            Err(err) => {
                self.fail(&format!("loading {} list", entity.singular()), &err);
                ListState::empty(entity)
            }
        };

        self.list_state = Some(state);
        self.screen = AppScreen::List(entity);
    }

    async fn open_order_form(&mut self, order: Option<Order>) {
        let clients = match self.api.list_clients().await {
            Ok(clients) => clients,
            Err(err) => return self.fail("loading clients for the order form", &err),
        };
        let cars = match self.api.list_cars().await {
            Ok(cars) => cars,
            Err(err) => return self.fail("loading cars for the order form", &err),
        };

        let state = match &order {
            Some(order) => OrderFormState::from_existing(order, &clients, &cars),
            None => OrderFormState::new(&clients, &cars, Some(Local::now().date_naive())),
        };
        self.order_form_state = Some(state);
        self.screen = AppScreen::OrderForm;
    }

    async fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Back => self.navigate(Route::Home).await,
            ListAction::New(Entity::Car) => self.navigate(Route::CarCreate).await,
            ListAction::New(Entity::Client) => self.navigate(Route::ClientCreate).await,
            ListAction::New(Entity::Order) => self.navigate(Route::OrderCreate).await,
            ListAction::Edit(url) => self.open_url(&url).await,
            ListAction::Delete(entity, id, confirmation) => self.delete(entity, id, confirmation).await,
        }
    }

    async fn delete(&mut self, entity: Entity, id: i64, confirmation: Confirmation) {
        let result = match entity {
            Entity::Car => self.api.delete_car(id, confirmation).await,
            Entity::Client => self.api.delete_client(id, confirmation).await,
            Entity::Order => self.api.delete_order(id, confirmation).await,
        };

        match result {
            Ok(DeleteOutcome::Deleted) => {
                self.alerts.push_back(Alert::info(format!(
                    "{} removed successfully!",
                    capitalized(entity.singular())
                )));
                self.load_list(entity).await;
            }
            Ok(DeleteOutcome::Cancelled) => {}
            Err(err) => self.fail(&format!("removing {} {}", entity.singular(), id), &err),
        }
    }

    async fn submit_car(&mut self, mode: FormMode, draft: CarDraft) {
        let current_year = Local::now().year();
        let result = match mode {
            FormMode::Create => self.api.create_car(&draft, current_year).await,
            FormMode::Update(id) => self.api.update_car(id, &draft, current_year).await,
        };
        self.finish_submit(Entity::Car, mode, result).await;
    }

    async fn submit_client(&mut self, mode: FormMode, draft: ClientDraft) {
        let result = match mode {
            FormMode::Create => self.api.create_client(&draft).await,
            FormMode::Update(id) => self.api.update_client(id, &draft).await,
        };
        self.finish_submit(Entity::Client, mode, result).await;
    }

    async fn submit_order(&mut self, mode: FormMode, draft: OrderDraft) {
        let result = match mode {
            FormMode::Create => self.api.create_order(&draft).await,
            FormMode::Update(id) => self.api.update_order(id, &draft).await,
        };
        self.finish_submit(Entity::Order, mode, result).await;
    }

    /// On success announce and go to the list; on failure stay on the form.
    async fn finish_submit(&mut self, entity: Entity, mode: FormMode, result: Result<(), ApiError>) {
        match result {
            Ok(()) => {
                let verb = if mode.is_update() { "updated" } else { "registered" };
                self.alerts.push_back(Alert::info(format!(
                    "{} {} successfully!",
                    capitalized(entity.singular()),
                    verb
                )));
                let list = match entity {
                    Entity::Car => Route::CarList,
                    Entity::Client => Route::ClientList,
                    Entity::Order => Route::OrderList,
                };
                self.navigate(list).await;
            }
            Err(err) => self.fail(&format!("saving {}", entity.singular()), &err),
        }
    }

    fn fail(&mut self, context: &str, err: &ApiError) {
        match err {
            ApiError::Validation(_) => info!(%context, error = %err, "form rejected"),
            _ => warn!(%context, error = %err, "operation failed"),
        }
        self.alerts.push_back(Alert::error(err.user_message()));
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::api::mock::MockTransport;
    use crate::ui::components::popup::AlertKind;

    fn app() -> AppState<MockTransport> {
        AppState::new(ApiClient::new(MockTransport::new()))
    }

    fn requests(app: &AppState<MockTransport>) -> Vec<crate::api::ApiRequest> {
        app.api.transport().requests()
    }

    async fn type_text(app: &mut AppState<MockTransport>, text: &str) {
        app.handle_key(KeyCode::Enter).await;
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c)).await;
        }
        app.handle_key(KeyCode::Enter).await;
    }

    async fn fill_car_form(app: &mut AppState<MockTransport>) {
        type_text(app, "Fiat").await;
        app.handle_key(KeyCode::Down).await;
        type_text(app, "Uno").await;
        app.handle_key(KeyCode::Down).await;
        type_text(app, "2000").await;
        app.handle_key(KeyCode::Down).await;
        type_text(app, "Red").await;
    }

    #[tokio::test]
    async fn list_page_fetches_then_renders() {
        let mut app = app();
        app.api.transport().respond_json(json!([
            {"idCarro": 1, "marca": "Fiat", "modelo": "Uno", "ano": 1995, "cor": "Red"}
        ]));

        app.navigate(Route::CarList).await;

        assert_eq!(app.screen(), AppScreen::List(Entity::Car));
        assert_eq!(app.list_state.as_ref().unwrap().body().len(), 1);
        assert!(app.current_alert().is_none());
    }

    #[tokio::test]
    async fn failed_list_still_shows_screen_with_alert() {
        let mut app = app();
        app.api.transport().respond(503, "");

        app.navigate(Route::OrderList).await;

        assert_eq!(app.screen(), AppScreen::List(Entity::Order));
        assert!(app.list_state.as_ref().unwrap().body().is_empty());
        assert_eq!(app.current_alert().unwrap().kind, AlertKind::Error);
    }

    #[tokio::test]
    async fn car_create_posts_once_then_returns_to_list() {
        let mut app = app();
        app.navigate(Route::CarCreate).await;
        fill_car_form(&mut app).await;

        app.api.transport().respond(201, "");
        app.api.transport().respond_json(json!([]));
        app.handle_key(KeyCode::Char('s')).await;

        let requests = requests(&app);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].path, "/novo/carro");
        assert_eq!(
            requests[0].body,
            Some(json!({"marca": "Fiat", "modelo": "Uno", "ano": 2000, "cor": "Red"}))
        );
        assert_eq!(requests[1].path, "/lista/carros");
        assert_eq!(app.screen(), AppScreen::List(Entity::Car));
        assert_eq!(
            app.current_alert(),
            Some(&Alert::info("Car registered successfully!"))
        );
    }

    #[tokio::test]
    async fn car_create_rejected_by_server_stays_on_form() {
        let mut app = app();
        app.navigate(Route::CarCreate).await;
        fill_car_form(&mut app).await;

        app.api.transport().respond(500, "");
        app.handle_key(KeyCode::Char('s')).await;

        assert_eq!(requests(&app).len(), 1);
        assert_eq!(app.screen(), AppScreen::CarForm);
        let alert = app.current_alert().unwrap();
        assert_eq!(alert.kind, AlertKind::Error);
        assert!(alert.message.contains("Contact the system administrator"));

        // alert blocks the form until dismissed
        app.handle_key(KeyCode::Char('s')).await;
        assert_eq!(requests(&app).len(), 1);
        app.handle_key(KeyCode::Enter).await;
        assert!(app.current_alert().is_none());
    }

    #[tokio::test]
    async fn invalid_form_alerts_without_request() {
        let mut app = app();
        app.navigate(Route::ClientCreate).await;
        type_text(&mut app, "Ana").await;

        app.handle_key(KeyCode::Char('s')).await;

        assert!(requests(&app).is_empty());
        assert_eq!(app.screen(), AppScreen::ClientForm);
        assert_eq!(
            app.current_alert(),
            Some(&Alert::error("Fill in all the form fields"))
        );
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let mut app = app();
        app.api.transport().respond_json(json!([
            {"idCliente": 5, "nome": "Ana", "cpf": "11122233344", "telefone": "11987654321"}
        ]));
        app.navigate(Route::ClientList).await;

        app.handle_key(KeyCode::Char('d')).await;
        app.handle_key(KeyCode::Char('n')).await;

        assert_eq!(requests(&app).len(), 1);
        assert_eq!(app.screen(), AppScreen::List(Entity::Client));
        assert!(app.current_alert().is_none());
    }

    #[tokio::test]
    async fn confirmed_delete_reloads_the_list() {
        let mut app = app();
        let row = json!([{"idCliente": 5, "nome": "Ana", "cpf": "11122233344", "telefone": "11987654321"}]);
        app.api.transport().respond_json(row);
        app.navigate(Route::ClientList).await;

        app.api.transport().respond(200, "");
        app.api.transport().respond_json(json!([]));
        app.handle_key(KeyCode::Char('d')).await;
        app.handle_key(KeyCode::Char('y')).await;

        let paths: Vec<_> = requests(&app).into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/lista/clientes", "/delete/cliente/5", "/lista/clientes"]);
        assert!(app.list_state.as_ref().unwrap().body().is_empty());
        assert_eq!(
            app.current_alert(),
            Some(&Alert::info("Client removed successfully!"))
        );
    }

    #[tokio::test]
    async fn edit_opens_prefilled_update_form() {
        let mut app = app();
        app.api.transport().respond_json(json!([
            {"idCliente": 5, "nome": "Ana", "cpf": "11122233344", "telefone": "1133334444"}
        ]));
        app.navigate(Route::ClientList).await;

        app.handle_key(KeyCode::Char('e')).await;

        assert_eq!(app.screen(), AppScreen::ClientForm);
        let form = app.client_form_state.as_ref().unwrap();
        assert_eq!(form.mode, FormMode::Update(5));
        assert_eq!(form.draft.tax_id, "111.222.333-44");
        assert_eq!(form.draft.phone, "(11) 3333-4444");

        app.api.transport().respond(200, "");
        app.handle_key(KeyCode::Char('s')).await;
        let update = &requests(&app)[1];
        assert_eq!(update.method, Method::PUT);
        assert_eq!(update.path, "/atualizar/cliente/5");
        assert_eq!(
            update.body,
            Some(json!({"idCliente": 5, "nome": "Ana", "cpf": "11122233344", "telefone": "1133334444"}))
        );
    }

    #[tokio::test]
    async fn order_form_loads_selectors_first() {
        let mut app = app();
        app.api.transport().respond_json(json!([
            {"idCliente": 1, "nome": "Ana", "cpf": "11122233344", "telefone": "11987654321"}
        ]));
        app.api.transport().respond_json(json!([
            {"idCarro": 2, "marca": "Fiat", "modelo": "Uno", "ano": 1995, "cor": "Red"}
        ]));

        app.open_url(r#"atualizar-pedido.html?pedido={"idPedido":9,"idCliente":1,"nomeCliente":"Ana","idCarro":2,"marcaCarro":"Fiat","modeloCarro":"Uno","dataPedido":"2024-05-01T03:00:00.000Z","valorPedido":"1500.50"}"#).await;

        assert_eq!(app.screen(), AppScreen::OrderForm);
        let paths: Vec<_> = requests(&app).into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/lista/clientes", "/lista/carros"]);
        let draft = app.order_form_state.as_ref().unwrap().draft();
        assert_eq!(draft.client_id, Some(1));
        assert_eq!(draft.car_id, Some(2));
        assert_eq!(draft.order_date, "2024-05-01");
    }

    #[tokio::test]
    async fn order_form_not_opened_when_lookups_fail() {
        let mut app = app();
        app.api.transport().fail("connection refused");

        app.navigate(Route::OrderCreate).await;

        assert_eq!(app.screen(), AppScreen::Home);
        assert_eq!(requests(&app).len(), 1);
        assert_eq!(app.current_alert().unwrap().kind, AlertKind::Error);
    }

    #[tokio::test]
    async fn broken_update_link_alerts() {
        let mut app = app();
        app.open_url("atualizar-carro.html").await;
        assert_eq!(app.screen(), AppScreen::Home);
        assert!(app.current_alert().unwrap().message.contains("carro"));
    }

    #[tokio::test]
    async fn quit_from_home() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('q')).await);
    }
}
