mod car;
mod client;
mod order;
mod validation;
mod wire;

pub use car::{Car, CarDraft};
pub use client::{Client, ClientDraft};
pub use order::{Order, OrderDraft};
pub use validation::ValidationError;
