use serde::{Deserialize, Serialize};

use super::validation::{MAX_TEXT_LEN, MIN_CAR_YEAR, MIN_TEXT_LEN, ValidationError};
use super::wire::lenient_i64;

/// A car as listed by `/lista/carros` and sent back on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(rename = "idCarro", deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "ano", deserialize_with = "lenient_i64")]
    pub year: i64,
    #[serde(rename = "cor")]
    pub color: String,
}

/// Body of `POST /novo/carro`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCar {
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "ano")]
    pub year: i64,
    #[serde(rename = "cor")]
    pub color: String,
}

impl NewCar {
    pub fn with_id(self, id: i64) -> Car {
        Car {
            id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            color: self.color,
        }
    }
}

/// Raw form contents of the car screens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarDraft {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: String,
}

impl CarDraft {
    pub fn from_existing(car: &Car) -> Self {
        Self {
            brand: car.brand.clone(),
            model: car.model.clone(),
            year: car.year.to_string(),
            color: car.color.clone(),
        }
    }

    pub fn validate(&self, current_year: i32) -> Result<NewCar, ValidationError> {
        if self.brand.is_empty() || self.model.is_empty() || self.year.is_empty() || self.color.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let year: i64 = self
            .year
            .trim()
            .parse()
            .map_err(|_| ValidationError::YearNotNumeric)?;

        if year < MIN_CAR_YEAR as i64 || year > current_year as i64 {
            return Err(ValidationError::YearOutOfRange { max: current_year });
        }

        let within = |s: &str| (MIN_TEXT_LEN..=MAX_TEXT_LEN).contains(&s.chars().count());
        if !within(&self.color) || !within(&self.brand) || !within(&self.model) {
            return Err(ValidationError::TextLength);
        }

        Ok(NewCar {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year,
            color: self.color.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(brand: &str, model: &str, year: &str, color: &str) -> CarDraft {
        CarDraft {
            brand: brand.to_string(),
            model: model.to_string(),
            year: year.to_string(),
            color: color.to_string(),
        }
    }

    #[test]
    fn accepts_a_valid_car() {
        let car = draft("Fiat", "Uno", "1995", "Red").validate(2024).unwrap();
        assert_eq!(car.year, 1995);
        assert_eq!(car.brand, "Fiat");
    }

    #[test]
    fn year_bounds_are_inclusive() {
        assert!(draft("Fiat", "Uno", "1980", "Red").validate(2024).is_ok());
        assert!(draft("Fiat", "Uno", "2024", "Red").validate(2024).is_ok());
        assert_eq!(
            draft("Fiat", "Uno", "1979", "Red").validate(2024),
            Err(ValidationError::YearOutOfRange { max: 2024 })
        );
        assert_eq!(
            draft("Fiat", "Uno", "2025", "Red").validate(2024),
            Err(ValidationError::YearOutOfRange { max: 2024 })
        );
    }

    #[test]
    fn first_failing_rule_wins() {
        // empty field reported before the bad year and the short model
        assert_eq!(
            draft("", "X", "abc", "Red").validate(2024),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            draft("Fiat", "X", "abc", "Red").validate(2024),
            Err(ValidationError::YearNotNumeric)
        );
        assert_eq!(
            draft("Fiat", "X", "1900", "Red").validate(2024),
            Err(ValidationError::YearOutOfRange { max: 2024 })
        );
        assert_eq!(
            draft("Fiat", "X", "2000", "Red").validate(2024),
            Err(ValidationError::TextLength)
        );
    }

    #[test]
    fn text_lengths_between_three_and_twenty() {
        let twenty = "a".repeat(20);
        let twenty_one = "a".repeat(21);
        assert!(draft(&twenty, "Uno", "2000", "Red").validate(2024).is_ok());
        assert_eq!(
            draft(&twenty_one, "Uno", "2000", "Red").validate(2024),
            Err(ValidationError::TextLength)
        );
        assert_eq!(
            draft("Fiat", "Uno", "2000", "Az").validate(2024),
            Err(ValidationError::TextLength)
        );
        // counted in characters, not bytes
        assert!(draft("Citroën", "Uno", "2000", "Açaí").validate(2024).is_ok());
    }

    #[test]
    fn accepts_iff_year_in_range_and_lengths_ok() {
        let current = 2024;
        for year in [1970, 1980, 2000, 2024, 2030] {
            for len in [2usize, 3, 10, 20, 21] {
                let text = "x".repeat(len);
                let accepted = draft(&text, &text, &year.to_string(), &text)
                    .validate(current)
                    .is_ok();
                let expected = (1980..=current).contains(&year) && (3..=20).contains(&len);
                assert_eq!(accepted, expected, "year {} len {}", year, len);
            }
        }
    }

    #[test]
    fn wire_names_match_the_api() {
        let body = serde_json::to_value(NewCar {
            brand: "Fiat".into(),
            model: "Uno".into(),
            year: 1995,
            color: "Red".into(),
        })
        .unwrap();
        let mut keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["ano", "cor", "marca", "modelo"]);

        let car: Car = serde_json::from_str(
            r#"{"idCarro": 3, "marca": "Fiat", "modelo": "Uno", "ano": "1995", "cor": "Red"}"#,
        )
        .unwrap();
        assert_eq!(car.id, 3);
        assert_eq!(car.year, 1995);
    }
}
