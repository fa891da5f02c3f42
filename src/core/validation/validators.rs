//! Reusable field validators
//!
//! Form inputs hold strings, so every validator receives the field's test id
//! and its raw value. Apart from [`required`], validators let blank values
//! through: an empty optional input satisfies every other constraint.

use regex::Regex;
use std::sync::OnceLock;

/// A constraint attached to a form input
pub type FieldValidator = Box<dyn Fn(&str, &str) -> Result<(), String> + Send + Sync>;

/// Parse the leading integer of a value, ignoring whatever follows
///
/// `"348.5"` gives 348, `"12 €"` gives 12, `""` and `"abc"` give `None`.
pub fn leading_integer(value: &str) -> Option<i64> {
    static LEADING_INT: OnceLock<Regex> = OnceLock::new();
    let regex = LEADING_INT.get_or_init(|| {
        Regex::new(r"^\s*([+-]?\d+)").expect("leading integer pattern is valid")
    });
    regex
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Validator: field is required (not blank)
pub fn required() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.trim().is_empty() {
            Err(format!("Le champ '{}' est requis", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be a number
pub fn numeric() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        if value.trim().is_empty() || value.trim().parse::<f64>().is_ok() {
            Ok(())
        } else {
            Err(format!(
                "Le champ '{}' doit être un nombre (valeur: {})",
                field, value
            ))
        }
    }
}

/// Validator: number must be positive
pub fn positive() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| match value.trim().parse::<f64>() {
        Ok(num) if num <= 0.0 => Err(format!(
            "Le champ '{}' doit être positif (valeur: {})",
            field, num
        )),
        // Non-numbers are left to `numeric()`
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if value.is_empty() || allowed.iter().any(|a| a == value) {
            Ok(())
        } else {
            Err(format!(
                "'{}' doit être l'une des valeurs: {:?} (valeur actuelle: {})",
                field, allowed, value
            ))
        }
    }
}

/// Validator: date must match format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &str| {
        if value.is_empty() {
            return Ok(());
        }
        match chrono::NaiveDate::parse_from_str(value, format) {
            Ok(_) => Ok(()),
            Err(_) => Err(format!(
                "'{}' doit être au format {} (valeur actuelle: {})",
                field, format, value
            )),
        }
    }
}

/// Validator: date must be a full ISO-8601 calendar date (`YYYY-MM-DD`)
///
/// Stricter than `date_format("%Y-%m-%d")`, which also accepts unpadded parts.
pub fn iso_date() -> impl Fn(&str, &str) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &str| {
        static ISO_DATE: OnceLock<Regex> = OnceLock::new();
        let regex = ISO_DATE
            .get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern is valid"));
        if value.is_empty() {
            return Ok(());
        }
        if !regex.is_match(value) {
            return Err(format!(
                "'{}' doit être au format AAAA-MM-JJ (valeur actuelle: {})",
                field, value
            ));
        }
        date_format("%Y-%m-%d")(field, value)
    }
}
