pub mod car_form;
pub mod client_form;
pub mod components;
pub mod form;
pub mod home;
pub mod list;
pub mod order_form;
pub mod table;
