use tui::{
    backend::Backend,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::models::{Car, Client, Order};
use crate::routes::Route;

pub const ACTIONS_LABEL: &str = "Edit | Delete";

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub hidden: bool,
}

impl TableCell {
    fn shown(text: impl ToString) -> Self {
        Self {
            text: text.to_string(),
            hidden: false,
        }
    }

    fn hidden(text: impl ToString) -> Self {
        Self {
            text: text.to_string(),
            hidden: true,
        }
    }
}

/// The two triggers held by a row's last cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RowActions {
    /// Update page address carrying the full record.
    pub edit: String,
    /// Id handed to the delete operation.
    pub delete: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub actions: RowActions,
}

/// Rows of a list screen. Renderers only ever append to it.
#[derive(Debug, Default)]
pub struct TableBody {
    rows: Vec<TableRow>,
}

impl TableBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }
}

pub const CAR_HEADERS: &[&str] = &["Id", "Model", "Brand", "Year", "Color"];
pub const CLIENT_HEADERS: &[&str] = &["Id", "Name", "CPF", "Phone"];
pub const ORDER_HEADERS: &[&str] = &["Id", "Client", "Car", "Date", "Amount"];

pub fn render_car_rows(cars: &[Car], body: &mut TableBody) {
    for car in cars {
        body.append(TableRow {
            cells: vec![
                TableCell::shown(car.id),
                TableCell::shown(&car.model),
                TableCell::shown(&car.brand),
                TableCell::shown(car.year),
                TableCell::shown(&car.color),
            ],
            actions: RowActions {
                edit: Route::CarUpdate(car.clone()).url(),
                delete: car.id,
            },
        });
    }
}

pub fn render_client_rows(clients: &[Client], body: &mut TableBody) {
    for client in clients {
        body.append(TableRow {
            cells: vec![
                TableCell::shown(client.id),
                TableCell::shown(&client.name),
                TableCell::shown(&client.tax_id),
                TableCell::shown(&client.phone),
            ],
            actions: RowActions {
                edit: Route::ClientUpdate(client.clone()).url(),
                delete: client.id,
            },
        });
    }
}

pub fn render_order_rows(orders: &[Order], body: &mut TableBody) {
    for order in orders {
        body.append(TableRow {
            cells: vec![
                TableCell::shown(order.id),
                TableCell::hidden(order.client_id),
                TableCell::shown(&order.client_name),
                TableCell::hidden(order.car_id),
                TableCell::shown(order.display_car()),
                TableCell::shown(order.display_date()),
                TableCell::shown(order.display_amount()),
            ],
            actions: RowActions {
                edit: Route::OrderUpdate(order.clone()).url(),
                delete: order.id,
            },
        });
    }
}

/// Draw a table body with a header row; hidden cells are skipped.
pub fn draw_table<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    title: &str,
    headers: &[&str],
    body: &TableBody,
    table_state: &mut TableState,
) {
    let header_cells = headers
        .iter()
        .chain(std::iter::once(&"Actions"))
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = body.rows().iter().map(|row| {
        let cells = row
            .cells
            .iter()
            .filter(|cell| !cell.hidden)
            .map(|cell| Cell::from(cell.text.clone()))
            .chain(std::iter::once(Cell::from(ACTIONS_LABEL)));
        Row::new(cells).height(1)
    });

    let column_count = headers.len() as u32 + 1;
    let widths: Vec<Constraint> = (0..column_count)
        .map(|_| Constraint::Ratio(1, column_count))
        .collect();

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .widths(&widths)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, table_state);
}
