//! FITS-style keyword access for building transforms.
//!
//! [`LinearTransform::from_header`](crate::LinearTransform::from_header)
//! reads its parameters through [`KeywordProvider`], so any header
//! representation can feed it. [`KeywordMap`] is the in-memory one, filled
//! by hand or parsed from header cards:
//!
//! ```
//! use celestial_wcs::{KeywordMap, KeywordProvider};
//!
//! let header = KeywordMap::parse_cards(
//!     "NAXIS   =                    2\n\
//!      CTYPE1  = 'GLON-CAR'           / galactic longitude\n\
//!      CDELT1  =              -0.0015\n\
//!      END",
//! )
//! .unwrap();
//! assert_eq!(header.get_int("NAXIS"), Some(2));
//! assert_eq!(header.get_string("CTYPE1").as_deref(), Some("GLON-CAR"));
//! assert_eq!(header.get_float("CDELT1"), Some(-0.0015));
//! ```

use std::collections::HashMap;

use crate::error::{WcsError, WcsResult};

pub trait KeywordProvider {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_float(&self, key: &str) -> Option<f64>;
    fn get_int(&self, key: &str) -> Option<i64>;

    fn require_int(&self, key: &str) -> WcsResult<i64> {
        self.get_int(key)
            .ok_or_else(|| WcsError::missing_keyword(key))
    }

    fn require_float(&self, key: &str) -> WcsResult<f64> {
        self.get_float(key)
            .ok_or_else(|| WcsError::missing_keyword(key))
    }
}

/// Value of one header card.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordValue {
    Text(String),
    Real(f64),
    Integer(i64),
    Logical(bool),
}

impl KeywordValue {
    /// Parses the value field of a card, comment already removed.
    pub fn parse(key: &str, field: &str) -> WcsResult<Self> {
        let field = field.trim();
        if let Some(quoted) = field.strip_prefix('\'') {
            let Some(body) = quoted.strip_suffix('\'') else {
                return Err(WcsError::invalid_keyword(key, "unterminated string"));
            };
            return Ok(Self::Text(body.replace("''", "'").trim_end().to_string()));
        }
        match field {
            "T" => return Ok(Self::Logical(true)),
            "F" => return Ok(Self::Logical(false)),
            _ => {}
        }
        if let Ok(int) = field.parse::<i64>() {
            return Ok(Self::Integer(int));
        }
        field
            .replace(['D', 'd'], "E")
            .parse::<f64>()
            .map(Self::Real)
            .map_err(|_| WcsError::invalid_keyword(key, format!("unreadable value '{field}'")))
    }
}

/// In-memory keyword store. Keys are case-insensitive.
///
/// Integers also answer float lookups: FITS writers often store whole
/// reals such as `CRPIX1 = 1` without a decimal point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordMap {
    values: HashMap<String, KeywordValue>,
}

impl KeywordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses header cards, one per line.
    ///
    /// `COMMENT`, `HISTORY`, blank cards and cards without a value
    /// indicator are skipped; `END` stops parsing.
    pub fn parse_cards(text: &str) -> WcsResult<Self> {
        let mut map = Self::new();
        for card in text.lines().map(str::trim) {
            let (key, rest) = match card.split_once('=') {
                Some((key, rest)) => (key.trim(), rest),
                None if card.eq_ignore_ascii_case("END") => break,
                None => continue,
            };
            if key.is_empty() || key.contains(' ') {
                continue;
            }
            let value = KeywordValue::parse(key, strip_comment(rest))?;
            map.insert(key, value);
        }
        Ok(map)
    }

    pub fn insert(&mut self, key: &str, value: KeywordValue) -> &mut Self {
        self.values.insert(key.to_ascii_uppercase(), value);
        self
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.insert(key, KeywordValue::Text(value.into()))
    }

    pub fn set_float(&mut self, key: &str, value: f64) -> &mut Self {
        self.insert(key, KeywordValue::Real(value))
    }

    pub fn set_int(&mut self, key: &str, value: i64) -> &mut Self {
        self.insert(key, KeywordValue::Integer(value))
    }

    pub fn get(&self, key: &str) -> Option<&KeywordValue> {
        self.values.get(&key.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeywordProvider for KeywordMap {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            KeywordValue::Text(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            KeywordValue::Real(value) => Some(*value),
            KeywordValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            KeywordValue::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

/// Drops a `/ comment` that is not inside a quoted string.
fn strip_comment(field: &str) -> &str {
    let mut quoted = false;
    for (i, c) in field.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '/' if !quoted => return &field[..i],
            _ => {}
        }
    }
    field
}
