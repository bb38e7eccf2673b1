//! Calculator values and the arithmetic on them.

use std::cmp::Ordering;
use std::fmt;

use super::CalcError;

/// Functions callable from an expression. Nothing else is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Abs,
    Round,
    Min,
    Max,
    Sum,
    Pow,
    Sqrt,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "abs" => Self::Abs,
            "round" => Self::Round,
            "min" => Self::Min,
            "max" => Self::Max,
            "sum" => Self::Sum,
            "pow" => Self::Pow,
            "sqrt" => Self::Sqrt,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Pow => "pow",
            Self::Sqrt => "sqrt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i128),
    Float(f64),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Builtin(Builtin),
}

/// A value usable in arithmetic. Booleans count as integers.
#[derive(Debug, Clone, Copy)]
pub enum Num {
    Int(i128),
    Float(f64),
}

impl Num {
    pub fn as_f64(self) -> f64 {
        match self {
            Num::Int(i) => i as f64,
            Num::Float(f) => f,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Num::Int(i) => Value::Int(i),
            Num::Float(f) => Value::Float(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
}

fn overflow() -> CalcError {
    CalcError::Arithmetic("integer overflow".into())
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Builtin(_) => "builtin_function_or_method",
        }
    }

    pub fn as_num(&self) -> Option<Num> {
        match *self {
            Value::Bool(b) => Some(Num::Int(i128::from(b))),
            Value::Int(i) => Some(Num::Int(i)),
            Value::Float(f) => Some(Num::Float(f)),
            _ => None,
        }
    }

    /// Elements of a list or tuple; any other value is not iterable.
    pub fn items(&self) -> Result<&[Value], CalcError> {
        match self {
            Value::List(v) | Value::Tuple(v) => Ok(v),
            other => Err(CalcError::Type(format!(
                "'{}' object is not iterable",
                other.type_name()
            ))),
        }
    }

    pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value, CalcError> {
        let symbol = match op {
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
        };
        let n = operand.as_num().ok_or_else(|| {
            CalcError::Type(format!(
                "bad operand type for unary {}: '{}'",
                symbol,
                operand.type_name()
            ))
        })?;
        Ok(match (op, n) {
            (UnaryOp::Pos, n) => n.into_value(),
            (UnaryOp::Neg, Num::Int(i)) => Value::Int(i.checked_neg().ok_or_else(overflow)?),
            (UnaryOp::Neg, Num::Float(f)) => Value::Float(-f),
        })
    }

    pub fn binary(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, CalcError> {
        match (lhs.as_num(), rhs.as_num()) {
            (Some(a), Some(b)) => numeric(op, a, b).map(Num::into_value),
            _ => sequence(op, lhs, rhs),
        }
    }

    pub fn compare(op: CmpOp, lhs: &Value, rhs: &Value) -> Result<bool, CalcError> {
        let ord = match op {
            CmpOp::Eq => return Ok(loose_eq(lhs, rhs)),
            CmpOp::Ne => return Ok(!loose_eq(lhs, rhs)),
            _ => num_cmp(lhs, rhs, op.symbol())?,
        };
        Ok(ord.map_or(false, |o| match op {
            CmpOp::Lt => o.is_lt(),
            CmpOp::Le => o.is_le(),
            CmpOp::Gt => o.is_gt(),
            CmpOp::Ge => o.is_ge(),
            CmpOp::Eq => o.is_eq(),
            CmpOp::Ne => o.is_ne(),
        }))
    }
}

/// Numeric ordering; `None` when a NaN is involved.
pub fn num_cmp(lhs: &Value, rhs: &Value, symbol: &str) -> Result<Option<Ordering>, CalcError> {
    match (lhs.as_num(), rhs.as_num()) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => Ok(Some(a.cmp(&b))),
        (Some(a), Some(b)) => Ok(a.as_f64().partial_cmp(&b.as_f64())),
        _ => Err(CalcError::Type(format!(
            "'{}' not supported between instances of '{}' and '{}'",
            symbol,
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loose_eq(x, y))
        }
        (Value::Builtin(a), Value::Builtin(b)) => a == b,
        _ => matches!(num_cmp(lhs, rhs, "=="), Ok(Some(Ordering::Equal))),
    }
}

fn numeric(op: BinOp, a: Num, b: Num) -> Result<Num, CalcError> {
    use Num::{Float, Int};
    Ok(match (op, a, b) {
        (BinOp::Add, Int(x), Int(y)) => Int(x.checked_add(y).ok_or_else(overflow)?),
        (BinOp::Sub, Int(x), Int(y)) => Int(x.checked_sub(y).ok_or_else(overflow)?),
        (BinOp::Mul, Int(x), Int(y)) => Int(x.checked_mul(y).ok_or_else(overflow)?),
        (BinOp::Add, x, y) => Float(x.as_f64() + y.as_f64()),
        (BinOp::Sub, x, y) => Float(x.as_f64() - y.as_f64()),
        (BinOp::Mul, x, y) => Float(x.as_f64() * y.as_f64()),

        (BinOp::Div, x, y) => {
            if y.as_f64() == 0.0 {
                let msg = match (x, y) {
                    (Int(_), Int(_)) => "division by zero",
                    _ => "float division by zero",
                };
                return Err(CalcError::ZeroDivision(msg.into()));
            }
            Float(x.as_f64() / y.as_f64())
        }

        (BinOp::FloorDiv, Int(x), Int(y)) => {
            if y == 0 {
                return Err(CalcError::ZeroDivision(
                    "integer division or modulo by zero".into(),
                ));
            }
            let q = x.checked_div(y).ok_or_else(overflow)?;
            if x % y != 0 && ((x < 0) != (y < 0)) {
                Int(q - 1)
            } else {
                Int(q)
            }
        }
        (BinOp::FloorDiv, x, y) => {
            if y.as_f64() == 0.0 {
                return Err(CalcError::ZeroDivision("float floor division by zero".into()));
            }
            Float((x.as_f64() / y.as_f64()).floor())
        }

        (BinOp::Mod, Int(x), Int(y)) => {
            if y == 0 {
                return Err(CalcError::ZeroDivision("integer modulo by zero".into()));
            }
            let r = x.checked_rem(y).ok_or_else(overflow)?;
            if r != 0 && ((r < 0) != (y < 0)) {
                Int(r + y)
            } else {
                Int(r)
            }
        }
        (BinOp::Mod, x, y) => {
            let (x, y) = (x.as_f64(), y.as_f64());
            if y == 0.0 {
                return Err(CalcError::ZeroDivision("float modulo".into()));
            }
            let r = x % y;
            if r != 0.0 && ((r < 0.0) != (y < 0.0)) {
                Float(r + y)
            } else {
                Float(r)
            }
        }

        (BinOp::Pow, Int(x), Int(y)) if y >= 0 => {
            let exp = u32::try_from(y).map_err(|_| overflow())?;
            Int(x.checked_pow(exp).ok_or_else(overflow)?)
        }
        (BinOp::Pow, x, y) => {
            let (x, y) = (x.as_f64(), y.as_f64());
            if x == 0.0 && y < 0.0 {
                return Err(CalcError::ZeroDivision(
                    "0.0 cannot be raised to a negative power".into(),
                ));
            }
            if x < 0.0 && y.fract() != 0.0 {
                return Err(CalcError::Arithmetic(
                    "negative number cannot be raised to a fractional power".into(),
                ));
            }
            let r = x.powf(y);
            if r.is_infinite() && x.is_finite() && y.is_finite() {
                return Err(CalcError::Arithmetic("numerical result out of range".into()));
            }
            Float(r)
        }
    })
}

/// Values held by `items`, counting every nested list and tuple element.
fn deep_len(items: &[Value]) -> usize {
    items.iter().fold(0usize, |acc, v| {
        let nested = match v {
            Value::List(inner) | Value::Tuple(inner) => deep_len(inner),
            _ => 0,
        };
        acc.saturating_add(1).saturating_add(nested)
    })
}

fn check_size(size: usize) -> Result<(), CalcError> {
    if size > MAX_SEQUENCE_LEN {
        return Err(CalcError::Arithmetic("sequence too long".into()));
    }
    Ok(())
}

fn repeat(items: &[Value], n: i128) -> Result<Vec<Value>, CalcError> {
    let n = usize::try_from(n).unwrap_or(0);
    check_size(deep_len(items).saturating_mul(n))?;
    Ok(items.iter().cloned().cycle().take(items.len() * n).collect())
}

fn concat(a: &[Value], b: &[Value]) -> Result<Vec<Value>, CalcError> {
    check_size(deep_len(a).saturating_add(deep_len(b)))?;
    Ok(a.iter().chain(b).cloned().collect())
}

fn sequence(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, CalcError> {
    match (op, lhs, rhs) {
        (BinOp::Add, Value::List(a), Value::List(b)) => Ok(Value::List(concat(a, b)?)),
        (BinOp::Add, Value::Tuple(a), Value::Tuple(b)) => Ok(Value::Tuple(concat(a, b)?)),
        (BinOp::Mul, Value::List(a), n) | (BinOp::Mul, n, Value::List(a)) => match n.as_num() {
            Some(Num::Int(n)) => Ok(Value::List(repeat(a, n)?)),
            _ => Err(unsupported(op, lhs, rhs)),
        },
        (BinOp::Mul, Value::Tuple(a), n) | (BinOp::Mul, n, Value::Tuple(a)) => match n.as_num() {
            Some(Num::Int(n)) => Ok(Value::Tuple(repeat(a, n)?)),
            _ => Err(unsupported(op, lhs, rhs)),
        },
        _ => Err(unsupported(op, lhs, rhs)),
    }
}

/// Most values, nested elements included, a repetition or concatenation may build.
const MAX_SEQUENCE_LEN: usize = 10_000;

fn unsupported(op: BinOp, lhs: &Value, rhs: &Value) -> CalcError {
    CalcError::Type(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op.symbol(),
        lhs.type_name(),
        rhs.type_name()
    ))
}

/// Shortest round-trip float text with a visible fraction or exponent: `4.0`, `0.1`, `1e+16`, `1.5e-05`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.into();
    }
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let s = format!("{:e}", f);
        if let Some((mantissa, exp)) = s.split_once('e') {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            return format!("{mantissa}e{sign}{digits:0>2}");
        }
        return s;
    }
    let s = f.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::List(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Builtin(b) => write!(f, "<built-in function {}>", b.name()),
        }
    }
}
