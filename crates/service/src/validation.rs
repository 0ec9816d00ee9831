//! Field-level input validation for JSON bodies.
//!
//! Handlers accept the raw JSON value and every field is checked
//! independently, so one response can report all offending fields at once.
//! Messages follow the wording clients of this API already parse.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_INT: &str = "A valid integer is required.";
pub const INVALID_NUMBER: &str = "A valid number is required.";
pub const INVALID_STRING: &str = "Not a valid string.";
pub const EMPTY_LIST: &str = "This list may not be empty.";

pub fn does_not_exist(pk: i32) -> String {
    format!("Invalid pk \"{pk}\" - object does not exist.")
}

pub fn invalid_choice(value: &str) -> String {
    format!("\"{value}\" is not a valid choice.")
}

/// Field name -> messages. Serializes as a plain JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut e = Self::new();
        e.add(field, message);
        e
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn contains(&self, field: &str) -> bool { self.0.contains_key(field) }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msgs) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, msgs.join(" "))?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

fn as_int(v: &Value) -> Option<i32> {
    let wide = match v {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().filter(|f| f.fract() == 0.0 && f.is_finite()).map(|f| f as i64),
        },
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    i32::try_from(wide).ok()
}

fn as_float(v: &Value) -> Option<f64> {
    let f = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    f.is_finite().then_some(f)
}

/// Reader over one JSON object that accumulates errors while extracting fields.
pub struct Fields<'a> {
    body: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    pub fn new(body: &'a Value) -> Result<Self, FieldErrors> {
        match body {
            Value::Object(map) => Ok(Self { body: map, errors: FieldErrors::new() }),
            other => Err(FieldErrors::single(
                "non_field_errors",
                format!("Invalid data. Expected a dictionary, but got {}.", type_name(other)),
            )),
        }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.body.get(name)
    }

    /// Value that must be present and non-null.
    fn required(&mut self, name: &str) -> Option<&'a Value> {
        match self.present(name) {
            None => {
                self.errors.add(name, REQUIRED);
                None
            }
            Some(Value::Null) => {
                self.errors.add(name, NOT_NULL);
                None
            }
            Some(v) => Some(v),
        }
    }

    pub fn required_int(&mut self, name: &str) -> Option<i32> {
        let v = self.required(name)?;
        let parsed = as_int(v);
        if parsed.is_none() {
            self.errors.add(name, INVALID_INT);
        }
        parsed
    }

    /// Missing and `null` both mean "not given".
    pub fn optional_int(&mut self, name: &str) -> Option<i32> {
        match self.present(name) {
            None | Some(Value::Null) => None,
            Some(v) => {
                let parsed = as_int(v);
                if parsed.is_none() {
                    self.errors.add(name, INVALID_INT);
                }
                parsed
            }
        }
    }

    pub fn required_float(&mut self, name: &str) -> Option<f64> {
        let v = self.required(name)?;
        let parsed = as_float(v);
        if parsed.is_none() {
            self.errors.add(name, INVALID_NUMBER);
        }
        parsed
    }

    /// Trimmed text; numbers are accepted and rendered as text.
    pub fn required_text(&mut self, name: &str, allow_blank: bool) -> Option<String> {
        let v = self.required(name)?;
        let text = match v {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => {
                self.errors.add(name, INVALID_STRING);
                return None;
            }
        };
        if text.is_empty() && !allow_blank {
            self.errors.add(name, BLANK);
            return None;
        }
        Some(text)
    }

    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        match self.present(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(_) => self.required_text(name, true),
        }
    }

    fn list(&mut self, name: &str, allow_empty: bool) -> Option<&'a Vec<Value>> {
        match self.present(name) {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => {
                if items.is_empty() && !allow_empty {
                    self.errors.add(name, EMPTY_LIST);
                    return None;
                }
                Some(items)
            }
            Some(other) => {
                self.errors.add(name, format!("Expected a list of items but got type \"{}\".", type_name(other)));
                None
            }
        }
    }

    /// Optional list of integer ids. Absent or `null` yields an empty list;
    /// an explicit `[]` is rejected unless `allow_empty`.
    pub fn int_list(&mut self, name: &str, allow_empty: bool) -> Vec<i32> {
        let Some(items) = self.list(name, allow_empty) else { return Vec::new() };
        let mut out = Vec::with_capacity(items.len());
        let mut bad = false;
        for item in items {
            match as_int(item) {
                Some(i) => out.push(i),
                None => bad = true,
            }
        }
        if bad {
            self.errors.add(name, INVALID_INT);
        }
        out
    }

    /// Optional list of strings restricted to `choices`.
    pub fn choice_list(&mut self, name: &str, choices: &[&str]) -> Vec<String> {
        let Some(items) = self.list(name, true) else { return Vec::new() };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item.as_str() {
                Some(s) if choices.contains(&s) => {
                    if !out.iter().any(|o: &String| o == s) {
                        out.push(s.to_string());
                    }
                }
                Some(s) => self.errors.add(name, invalid_choice(s)),
                None => self.errors.add(name, invalid_choice(&item.to_string())),
            }
        }
        out
    }

    /// Record an error found by a check outside this reader.
    pub fn reject(&mut self, name: &str, message: impl Into<String>) {
        self.errors.add(name, message);
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        self.errors.into_result()
    }
}
