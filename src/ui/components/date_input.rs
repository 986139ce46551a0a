use chrono::{Datelike, NaiveDate};
use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

/// Digit-by-digit entry of a `YYYY-MM-DD` date. Starts empty on the
/// create screen; the first complete year fills the date in.
pub struct DateInputState {
    date: Option<NaiveDate>,
    pub editing: bool,
    pub date_part: DatePart,
    pending: String,
}

impl DateInputState {
    pub fn new(date: Option<NaiveDate>) -> Self {
        Self {
            date,
            editing: false,
            date_part: DatePart::Year,
            pending: String::new(),
        }
    }

    /// Parse the `YYYY-MM-DD` value of a pre-filled form.
    pub fn from_value(value: &str) -> Self {
        Self::new(NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
        if self.editing {
            self.date_part = DatePart::Year;
        }
        self.pending.clear();
    }

    pub fn next_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Month,
            DatePart::Month => DatePart::Day,
            DatePart::Day => DatePart::Year,
        };
        self.pending.clear();
    }

    pub fn previous_date_part(&mut self) {
        self.date_part = match self.date_part {
            DatePart::Year => DatePart::Day,
            DatePart::Month => DatePart::Year,
            DatePart::Day => DatePart::Month,
        };
        self.pending.clear();
    }

    pub fn handle_input(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.pending.push(c);
                let width = if self.date_part == DatePart::Year { 4 } else { 2 };
                if self.pending.len() == width {
                    self.commit_pending();
                    self.next_date_part();
                }
            }
            KeyCode::Backspace => {
                self.pending.pop();
            }
            KeyCode::Right => self.next_date_part(),
            KeyCode::Left => self.previous_date_part(),
            _ => {}
        }
    }

    fn commit_pending(&mut self) {
        let Ok(number) = self.pending.parse::<u32>() else {
            return;
        };
        let base = self
            .date
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(number as i32, 1, 1).unwrap_or_default());

        let updated = match self.date_part {
            DatePart::Year => NaiveDate::from_ymd_opt(number as i32, base.month(), base.day())
                // Feb 29 into a non-leap year
                .or_else(|| NaiveDate::from_ymd_opt(number as i32, base.month(), 28)),
            DatePart::Month => base.with_month(number),
            DatePart::Day => base.with_day(number),
        };

        if let Some(date) = updated {
            self.date = Some(date);
        }
    }

    /// Form value sent to the API; empty until a date has been entered.
    pub fn value(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn get_display_string(&self) -> String {
        let (year, month, day) = match self.date {
            Some(d) => (
                format!("{:04}", d.year()),
                format!("{:02}", d.month()),
                format!("{:02}", d.day()),
            ),
            None => ("YYYY".to_string(), "MM".to_string(), "DD".to_string()),
        };

        if !self.editing {
            return if self.date.is_some() {
                format!("{}-{}-{}", year, month, day)
            } else {
                String::new()
            };
        }

        let marker = |part: DatePart, text: &str| {
            if part != self.date_part {
                text.to_string()
            } else if self.pending.is_empty() {
                format!("[{}]", text)
            } else {
                format!("[{}]", self.pending)
            }
        };

        format!(
            "{}-{}-{}",
            marker(DatePart::Year, &year),
            marker(DatePart::Month, &month),
            marker(DatePart::Day, &day)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(state: &mut DateInputState, digits: &str) {
        for c in digits.chars() {
            state.handle_input(KeyCode::Char(c));
        }
    }

    #[test]
    fn empty_until_typed() {
        let mut state = DateInputState::new(None);
        assert_eq!(state.value(), "");

        state.toggle_editing();
        type_digits(&mut state, "20240501");
        assert_eq!(state.value(), "2024-05-01");
    }

    #[test]
    fn invalid_day_keeps_previous_date() {
        let mut state = DateInputState::from_value("2024-02-10");
        state.toggle_editing();
        state.next_date_part();
        state.next_date_part();
        type_digits(&mut state, "31");
        assert_eq!(state.value(), "2024-02-10");
    }

    #[test]
    fn leap_day_survives_year_change() {
        let mut state = DateInputState::from_value("2024-02-29");
        state.toggle_editing();
        type_digits(&mut state, "2023");
        assert_eq!(state.value(), "2023-02-28");
    }

    #[test]
    fn display_marks_the_active_part() {
        let mut state = DateInputState::from_value("2024-05-01");
        assert_eq!(state.get_display_string(), "2024-05-01");
        state.toggle_editing();
        state.handle_input(KeyCode::Right);
        assert_eq!(state.get_display_string(), "2024-[05]-01");
        state.handle_input(KeyCode::Char('1'));
        assert_eq!(state.get_display_string(), "2024-[1]-01");
    }
}
