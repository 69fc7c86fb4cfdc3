use std::io::{
    BufWriter,
    Read,
    Write
};

use serde::{
    Deserialize,
    Serialize
};
use tracing::{
    debug,
    warn
};

use crate::function::function::{
    Function,
    EPS
};
use crate::function::functionerror::FunctionError;
use crate::function::functionpoint::FunctionPoint;
use crate::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::tabulated::tabulatedfunction::{
    uniform_grid,
    StorageKind,
    TabulatedFunction
};

// ─────────────────────────────────────────────
// Tabulation
// ─────────────────────────────────────────────

fn sample(function: &dyn Function, left_x: f64, right_x: f64, points_count: usize) -> Result<Vec<FunctionPoint>, FunctionError> {
    if points_count < 2 {
        return Err(FunctionError::invalid_argument("at least two points are required"));
    }
    if !(right_x - left_x > EPS) {
        return Err(FunctionError::invalid_argument(format!(
            "left border {} must be smaller than right border {}",
            left_x, right_x
        )));
    }
    if left_x < function.left_domain_border() - EPS || right_x > function.right_domain_border() + EPS {
        return Err(FunctionError::invalid_argument(format!(
            "segment [{}, {}] is outside the function domain [{}, {}]",
            left_x,
            right_x,
            function.left_domain_border(),
            function.right_domain_border()
        )));
    }

    uniform_grid(left_x, right_x, points_count)?
        .into_iter()
        .map(|x| {
            let y = function.value(x);
            if y.is_nan() {
                Err(FunctionError::invalid_argument(format!("function value is undefined at x = {}", x)))
            } else {
                Ok(FunctionPoint::new(x, y))
            }
        })
        .collect()
}

/// Samples `function` at `points_count` evenly spaced abscissas of
/// `[left_x, right_x]` into an array-backed tabulated function.
pub fn tabulate(function: &dyn Function, left_x: f64, right_x: f64, points_count: usize) -> Result<ArrayTabulatedFunction, FunctionError> {
    let points = sample(function, left_x, right_x, points_count)?;
    debug!(left_x, right_x, points_count, "tabulated function");
    ArrayTabulatedFunction::from_points(&points)
}

pub fn tabulate_into(
    function: &dyn Function,
    left_x: f64,
    right_x: f64,
    points_count: usize,
    storage: StorageKind,
) -> Result<Box<dyn TabulatedFunction>, FunctionError> {
    let points = sample(function, left_x, right_x, points_count)?;
    debug!(left_x, right_x, points_count, ?storage, "tabulated function");
    storage.create_from_points(&points)
}

// ─────────────────────────────────────────────
// Binary stream: i32 count, then (f64 x, f64 y) pairs, big-endian
// ─────────────────────────────────────────────

pub fn output_tabulated_function<W: Write>(function: &dyn TabulatedFunction, out: W) -> Result<(), FunctionError> {
    let count = i32::try_from(function.points_count())
        .map_err(|_| FunctionError::invalid_argument("too many points for the binary format"))?;
    let mut writer = BufWriter::new(out);
    writer.write_all(&count.to_be_bytes())?;
    for pt in function.points() {
        writer.write_all(&pt.x().to_be_bytes())?;
        writer.write_all(&pt.y().to_be_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

fn read_exact_or_malformed<R: Read, const N: usize>(input: &mut R, what: &str) -> Result<[u8; N], FunctionError> {
    let mut buf = [0u8; N];
    input.read_exact(&mut buf).map_err(|error| {
        warn!(%error, "truncated binary tabulated function");
        FunctionError::malformed_input(format!("stream ended while reading {}", what))
    })?;
    Ok(buf)
}

pub fn input_tabulated_function<R: Read>(mut input: R) -> Result<ArrayTabulatedFunction, FunctionError> {
    let count = i32::from_be_bytes(read_exact_or_malformed::<_, 4>(&mut input, "point count")?);
    let count = usize::try_from(count).map_err(|_| {
        warn!(count, "negative point count in binary tabulated function");
        FunctionError::malformed_input(format!("negative point count {}", count))
    })?;
    let mut points = Vec::new();
    for _ in 0..count {
        let x = f64::from_be_bytes(read_exact_or_malformed::<_, 8>(&mut input, "x")?);
        let y = f64::from_be_bytes(read_exact_or_malformed::<_, 8>(&mut input, "y")?);
        points.push(FunctionPoint::new(x, y));
    }
    debug!(count, "decoded binary tabulated function");
    ArrayTabulatedFunction::from_points(&points)
}

// ─────────────────────────────────────────────
// Text stream: "count x0 y0 x1 y1 ...\n"
// ─────────────────────────────────────────────

pub fn write_tabulated_function<W: Write>(function: &dyn TabulatedFunction, out: W) -> Result<(), FunctionError> {
    let mut writer = BufWriter::new(out);
    write!(writer, "{}", function.points_count())?;
    for pt in function.points() {
        write!(writer, " {} {}", pt.x(), pt.y())?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_tabulated_function<R: Read>(mut input: R) -> Result<ArrayTabulatedFunction, FunctionError> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(|error| {
        warn!(%error, "unreadable text tabulated function");
        FunctionError::malformed_input(format!("input is not valid text: {}", error))
    })?;
    let mut tokens = text.split_whitespace();

    let count_token = tokens.next().ok_or_else(|| FunctionError::malformed_input("missing point count"))?;
    let count: usize = count_token.parse().map_err(|_| {
        warn!(token = count_token, "invalid point count token");
        FunctionError::malformed_input(format!("invalid point count '{}'", count_token))
    })?;

    let mut next_number = |what: &str| -> Result<f64, FunctionError> {
        let token = tokens
            .next()
            .ok_or_else(|| FunctionError::malformed_input(format!("stream ended while reading {}", what)))?;
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => {
                warn!(token, "non-numeric token");
                Err(FunctionError::malformed_input(format!("non-numeric token '{}' for {}", token, what)))
            }
        }
    };

    let mut points = Vec::new();
    for _ in 0..count {
        let x = next_number("x")?;
        let y = next_number("y")?;
        points.push(FunctionPoint::new(x, y));
    }
    if let Some(extra) = tokens.next() {
        return Err(FunctionError::malformed_input(format!(
            "unexpected token '{}' after {} points",
            extra, count
        )));
    }
    debug!(count, "decoded text tabulated function");
    ArrayTabulatedFunction::from_points(&points)
}

// ─────────────────────────────────────────────
// JSON: {"points": [{"x": .., "y": ..}, ...]}
// ─────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
struct TabulatedFunctionJsonProp {
    points: Vec<FunctionPoint>,
}

pub fn to_json(function: &dyn TabulatedFunction) -> Result<serde_json::Value, FunctionError> {
    let json_prop = TabulatedFunctionJsonProp { points: function.points() };
    Ok(serde_json::to_value(json_prop)?)
}

pub fn from_json(json_value: serde_json::Value, storage: StorageKind) -> Result<Box<dyn TabulatedFunction>, FunctionError> {
    let json_prop: TabulatedFunctionJsonProp = serde_json::from_value(json_value)?;
    storage.create_from_points(&json_prop.points)
}
