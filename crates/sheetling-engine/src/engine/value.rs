//! Typed cell values.
//!
//! This module provides the closed set of cell content variants:
//! - [`Value`] - integer, real, text, or formula, with per-variant
//!   validation and display/input string forms
//! - [`Formula`] - formula source text with its cached evaluation state
//!
//! Raw input is classified against the variants in a fixed priority order
//! (integer, real, formula, text); the first variant whose grammar accepts
//! the text wins.

use serde::{Deserialize, Serialize};

use super::error::{EvalError, FormatError};
use super::eval;
use super::grid::Grid;

/// Display form of a formula whose last evaluation failed.
pub const ERROR_SENTINEL: &str = "#ERROR";

/// The content of one occupied grid cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Real(f64),
    /// Stored with its surrounding double quotes.
    Text(String),
    Formula(Formula),
}

impl Value {
    /// Optional leading sign, then one or more digits, nothing else.
    pub fn is_valid_int(text: &str) -> bool {
        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    }

    /// Optional leading sign, digits with at most one decimal point that is
    /// neither leading nor trailing.
    pub fn is_valid_real(text: &str) -> bool {
        let body = text.strip_prefix(['+', '-']).unwrap_or(text);
        if body.is_empty() || !body.as_bytes()[0].is_ascii_digit() || body.ends_with('.') {
            return false;
        }
        let mut seen_point = false;
        for b in body.bytes() {
            match b {
                b'.' if seen_point => return false,
                b'.' => seen_point = true,
                b'0'..=b'9' => {}
                _ => return false,
            }
        }
        true
    }

    /// Wrapped in a matching pair of double quotes (length >= 2).
    pub fn is_valid_text(text: &str) -> bool {
        text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
    }

    /// Classify raw input against the variants in priority order (integer,
    /// real, formula, text) and construct the first match. Formula variants
    /// are evaluated against `grid` immediately; an evaluation failure is
    /// recorded in the formula's error flag, not returned here.
    pub fn from_input(text: &str, grid: &Grid) -> Result<Value, FormatError> {
        if Self::is_valid_int(text) {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Int(n));
            }
            // Out of i64 range: fall through to the real classification.
        }
        if Self::is_valid_real(text) {
            if let Ok(x) = text.parse::<f64>() {
                return Ok(Value::Real(x));
            }
        }
        if Formula::is_valid(text) {
            return Ok(Value::Formula(Formula::new(text, grid)?));
        }
        if Self::is_valid_text(text) {
            return Ok(Value::Text(text.to_string()));
        }
        Err(FormatError::new("cell value", text))
    }

    /// Replace the payload from `text`, re-validated against this variant's
    /// own grammar. Validation happens before any mutation, so on failure
    /// the old payload is untouched.
    pub fn set_value(&mut self, text: &str, grid: &Grid) -> Result<(), FormatError> {
        match self {
            Value::Int(n) => {
                if !Self::is_valid_int(text) {
                    return Err(FormatError::new("integer", text));
                }
                let parsed = text
                    .parse::<i64>()
                    .map_err(|_| FormatError::new("integer", text))?;
                *n = parsed;
            }
            Value::Real(x) => {
                if !Self::is_valid_real(text) {
                    return Err(FormatError::new("real number", text));
                }
                let parsed = text
                    .parse::<f64>()
                    .map_err(|_| FormatError::new("real number", text))?;
                *x = parsed;
            }
            Value::Text(s) => {
                if !Self::is_valid_text(text) {
                    return Err(FormatError::new("quoted text", text));
                }
                *s = text.to_string();
            }
            Value::Formula(f) => f.set_source(text, grid)?,
        }
        Ok(())
    }

    /// The string shown in the rendered table.
    pub fn display_string(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Real(x) => fmt_number(*x),
            Value::Text(s) => s[1..s.len() - 1].to_string(),
            Value::Formula(f) => f.display_string(),
        }
    }

    /// The input form: feeding this back through [`Value::from_input`]
    /// reconstructs an equivalent value. This is the round-trip contract
    /// the storage layer depends on.
    pub fn to_input_string(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Real(x) => fmt_number(*x),
            Value::Text(s) => s.clone(),
            Value::Formula(f) => f.source().to_string(),
        }
    }
}

/// A formula cell: source text plus the cached outcome of its last
/// evaluation. The cached state is always consistent with the stored
/// source, but may be stale with respect to referenced cells until the
/// next recompute pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    source: String,
    result: f64,
    error: bool,
}

impl Formula {
    /// Non-empty text whose first character is `=`.
    pub fn is_valid(text: &str) -> bool {
        text.starts_with('=')
    }

    /// Build a formula cell from source text and evaluate it against
    /// `grid`. A structurally invalid source (missing the leading `=`) is a
    /// [`FormatError`]; an evaluation failure is captured in the error flag
    /// and does not fail construction.
    pub fn new(source: &str, grid: &Grid) -> Result<Formula, FormatError> {
        let mut formula = Formula {
            source: String::new(),
            result: 0.0,
            error: true,
        };
        formula.set_source(source, grid)?;
        Ok(formula)
    }

    /// Replace the source text and re-evaluate. Validation happens before
    /// any mutation.
    pub fn set_source(&mut self, source: &str, grid: &Grid) -> Result<(), FormatError> {
        if !Self::is_valid(source) {
            return Err(FormatError::new("formula", source));
        }
        self.source = source.to_string();
        self.store(eval::evaluate(&self.source, grid));
        Ok(())
    }

    /// Re-run evaluation against the stored source text. This is the only
    /// way referenced-cell changes propagate into the cached result.
    pub fn recalculate(&mut self, grid: &Grid) {
        self.store(eval::evaluate(&self.source, grid));
    }

    /// Record an evaluation outcome in the cached state.
    pub(crate) fn store(&mut self, outcome: Result<f64, EvalError>) {
        match outcome {
            Ok(result) => {
                self.result = result;
                self.error = false;
            }
            Err(_) => {
                self.result = 0.0;
                self.error = true;
            }
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn error(&self) -> bool {
        self.error
    }

    pub fn display_string(&self) -> String {
        if self.error {
            ERROR_SENTINEL.to_string()
        } else {
            fmt_number(self.result)
        }
    }
}

/// Render a numeric value, trimming trailing zeroes after the decimal
/// point (and the point itself when no fractional digits remain). Digits
/// before the point are never removed, so there is always at least one
/// digit ahead of the point.
pub fn fmt_number(value: f64) -> String {
    trim_zeroes(&value.to_string())
}

fn trim_zeroes(rendered: &str) -> String {
    if !rendered.contains('.') {
        return rendered.to_string();
    }
    let trimmed = rendered.trim_end_matches('0');
    trimmed.strip_suffix('.').unwrap_or(trimmed).to_string()
}
