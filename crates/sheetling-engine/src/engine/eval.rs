//! Recursive formula evaluation.
//!
//! The evaluator works directly on expression substrings; no token stream
//! or AST is materialized. At each recursion level it looks for the
//! weakest-binding operator at bracket depth 0 and splits there:
//!
//! 1. rightmost `+`/`-` (a split at position 0 gives unary sign semantics:
//!    the left operand is an implicit zero)
//! 2. leftmost `*` or `/`
//! 3. rightmost `^`
//! 4. numeric literal, then cell reference, else the token is unrecognized
//!
//! The rightmost split for `+`/`-` folds chains left-associatively. `^`
//! chains also group to the left (`2^3^4 == (2^3)^4 == 4096`); callers
//! depend on that exact grouping.

use super::cell_ref::CellRef;
use super::error::EvalError;
use super::grid::Grid;
use super::value::Value;

/// Magnitudes below this count as zero for division.
const ZERO_EPSILON: f64 = 1e-7;

/// Evaluate formula source text (leading `=` included) against `grid`.
///
/// All whitespace is removed up front. A closing bracket that brings the
/// running bracket count below zero fails before any recursion happens.
pub fn evaluate(source: &str, grid: &Grid) -> Result<f64, EvalError> {
    let body: String = source
        .strip_prefix('=')
        .unwrap_or(source)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut balance = 0i32;
    for c in body.chars() {
        match c {
            '(' => balance += 1,
            ')' => {
                balance -= 1;
                if balance < 0 {
                    return Err(EvalError::UnbalancedBrackets);
                }
            }
            _ => {}
        }
    }

    eval_expr(&body, grid)
}

fn eval_expr(expr: &str, grid: &Grid) -> Result<f64, EvalError> {
    if expr.is_empty() {
        return Err(EvalError::MissingOperand);
    }

    if let Some(inner) = enclosed(expr) {
        if inner.is_empty() {
            return Err(EvalError::EmptyBrackets);
        }
        return eval_expr(inner, grid);
    }

    if let Some(pos) = seek_last(expr, &['+', '-']) {
        let left = if pos == 0 {
            0.0
        } else {
            eval_expr(&expr[..pos], grid)?
        };
        let right = eval_expr(&expr[pos + 1..], grid)?;
        return Ok(if expr.as_bytes()[pos] == b'+' {
            left + right
        } else {
            left - right
        });
    }

    if let Some(pos) = seek_first(expr, &['*', '/']) {
        let left = eval_expr(&expr[..pos], grid)?;
        let right = eval_expr(&expr[pos + 1..], grid)?;
        if expr.as_bytes()[pos] == b'*' {
            return Ok(left * right);
        }
        if right.abs() < ZERO_EPSILON {
            return Err(EvalError::DivideByZero);
        }
        return Ok(left / right);
    }

    if let Some(pos) = seek_last(expr, &['^']) {
        let left = eval_expr(&expr[..pos], grid)?;
        let right = eval_expr(&expr[pos + 1..], grid)?;
        return Ok(left.powf(right));
    }

    if Value::is_valid_int(expr) || Value::is_valid_real(expr) {
        if let Ok(x) = expr.parse::<f64>() {
            return Ok(x);
        }
    }

    if let Some(cell) = CellRef::parse(expr) {
        return resolve_reference(cell, grid);
    }

    Err(EvalError::UnrecognizedToken(expr.to_string()))
}

/// If the whole expression is wrapped by one enclosing bracket pair,
/// return the interior. The first and last characters merely both being
/// brackets is not enough: the opening bracket's match must be the final
/// character (`(1)+(2)` is not wrapped).
fn enclosed(expr: &str) -> Option<&str> {
    if !expr.starts_with('(') || !expr.ends_with(')') {
        return None;
    }
    let mut depth = 0i32;
    for (i, b) in expr.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return (i == expr.len() - 1).then(|| &expr[1..expr.len() - 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte position of the leftmost depth-0 occurrence of any of `ops`.
fn seek_first(expr: &str, ops: &[char]) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in expr.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && ops.contains(&c) => return Some(i),
            _ => {}
        }
    }
    None
}

/// Byte position of the rightmost depth-0 occurrence of any of `ops`.
fn seek_last(expr: &str, ops: &[char]) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in expr.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' => depth -= 1,
            _ if depth == 0 && ops.contains(&c) => return Some(i),
            _ => {}
        }
    }
    None
}

/// Numeric contribution of a referenced cell. Out-of-bounds, empty, and
/// text cells contribute zero; an erroring formula fails this evaluation
/// too; everything else contributes its numeric value.
fn resolve_reference(cell: CellRef, grid: &Grid) -> Result<f64, EvalError> {
    match grid.read(cell.row, cell.col) {
        None => Ok(0.0),
        Some(Value::Int(n)) => Ok(*n as f64),
        Some(Value::Real(x)) => Ok(*x),
        Some(Value::Text(_)) => Ok(0.0),
        Some(Value::Formula(f)) => {
            if f.error() {
                Err(EvalError::ErroringReference)
            } else {
                Ok(f.result())
            }
        }
    }
}
