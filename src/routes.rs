//! Page addresses of the back office.
//!
//! Screens are addressed by the same page names the web client used; update
//! pages carry the whole record JSON-encoded in a single query parameter.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Car, Client, Order};

const CAR_LIST: &str = "lista-carros.html";
const CAR_CREATE: &str = "cadastro-carro.html";
const CAR_UPDATE: &str = "atualizar-carro.html";
const CLIENT_LIST: &str = "lista-clientes.html";
const CLIENT_CREATE: &str = "cadastro-cliente.html";
const CLIENT_UPDATE: &str = "atualizar-cliente.html";
const ORDER_LIST: &str = "lista-pedidos.html";
const ORDER_CREATE: &str = "cadastro-pedido.html";
const ORDER_UPDATE: &str = "atualizar-pedido.html";
const HOME: &str = "index.html";

const CAR_PARAM: &str = "carro";
const CLIENT_PARAM: &str = "cliente";
const ORDER_PARAM: &str = "pedido";

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("unknown page: {0}")]
    UnknownPage(String),
    #[error("missing query parameter `{0}`")]
    MissingParam(&'static str),
    #[error("invalid record in query string: {0}")]
    InvalidRecord(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    CarList,
    CarCreate,
    CarUpdate(Car),
    ClientList,
    ClientCreate,
    ClientUpdate(Client),
    OrderList,
    OrderCreate,
    OrderUpdate(Order),
}

impl Route {
    pub fn parse(url: &str) -> Result<Self, RouteError> {
        let (page, query) = match url.split_once('?') {
            Some((page, query)) => (page, Some(query)),
            None => (url, None),
        };
        // tolerate "./page.html" and "/page.html"
        let page = page.trim_start_matches("./").trim_start_matches('/');

        match page {
            HOME | "" => Ok(Route::Home),
            CAR_LIST => Ok(Route::CarList),
            CAR_CREATE => Ok(Route::CarCreate),
            CAR_UPDATE => Ok(Route::CarUpdate(record_param(query, CAR_PARAM)?)),
            CLIENT_LIST => Ok(Route::ClientList),
            CLIENT_CREATE => Ok(Route::ClientCreate),
            CLIENT_UPDATE => Ok(Route::ClientUpdate(record_param(query, CLIENT_PARAM)?)),
            ORDER_LIST => Ok(Route::OrderList),
            ORDER_CREATE => Ok(Route::OrderCreate),
            ORDER_UPDATE => Ok(Route::OrderUpdate(record_param(query, ORDER_PARAM)?)),
            other => Err(RouteError::UnknownPage(other.to_string())),
        }
    }

    pub fn url(&self) -> String {
        match self {
            Route::Home => HOME.to_string(),
            Route::CarList => CAR_LIST.to_string(),
            Route::CarCreate => CAR_CREATE.to_string(),
            Route::CarUpdate(car) => update_url(CAR_UPDATE, CAR_PARAM, car),
            Route::ClientList => CLIENT_LIST.to_string(),
            Route::ClientCreate => CLIENT_CREATE.to_string(),
            Route::ClientUpdate(client) => update_url(CLIENT_UPDATE, CLIENT_PARAM, client),
            Route::OrderList => ORDER_LIST.to_string(),
            Route::OrderCreate => ORDER_CREATE.to_string(),
            Route::OrderUpdate(order) => update_url(ORDER_UPDATE, ORDER_PARAM, order),
        }
    }
}

fn update_url<R: Serialize>(page: &str, param: &str, record: &R) -> String {
    // plain records of strings and numbers always serialize
    let json = serde_json::to_string(record).unwrap_or_default();
    format!("{}?{}={}", page, param, urlencoding::encode(&json))
}

fn record_param<R: DeserializeOwned>(query: Option<&str>, param: &'static str) -> Result<R, RouteError> {
    let raw = query
        .into_iter()
        .flat_map(|q| q.split('&'))
        .find_map(|pair| pair.strip_prefix(param)?.strip_prefix('='))
        .ok_or(RouteError::MissingParam(param))?;

    let json = urlencoding::decode(raw).map_err(|err| RouteError::InvalidRecord(err.to_string()))?;
    serde_json::from_str(&json).map_err(|err| RouteError::InvalidRecord(err.to_string()))
}
