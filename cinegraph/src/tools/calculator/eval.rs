//! Evaluation of parsed expressions against the fixed builtin table.

use std::cmp::Ordering;

use super::parser::Expr;
use super::value::{num_cmp, BinOp, Builtin, Num, Value};
use super::CalcError;

pub fn eval(expr: &Expr) -> Result<Value, CalcError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Name(name) => resolve(name).map(Value::Builtin),
        Expr::Unary(op, operand) => Value::unary(*op, &eval(operand)?),
        Expr::Chain(first, rest) => {
            let mut acc = eval(first)?;
            for (op, e) in rest {
                acc = Value::binary(*op, &acc, &eval(e)?)?;
            }
            Ok(acc)
        }
        Expr::Power(base, exp) => Value::binary(BinOp::Pow, &eval(base)?, &eval(exp)?),
        Expr::Compare(first, rest) => {
            let mut lhs = eval(first)?;
            for (op, e) in rest {
                let rhs = eval(e)?;
                if !Value::compare(*op, &lhs, &rhs)? {
                    return Ok(Value::Bool(false));
                }
                lhs = rhs;
            }
            Ok(Value::Bool(true))
        }
        Expr::Call(name, args) => {
            let builtin = resolve(name)?;
            let args = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            call(builtin, &args)
        }
        Expr::List(items) => Ok(Value::List(
            items.iter().map(eval).collect::<Result<_, _>>()?,
        )),
        Expr::Tuple(items) => Ok(Value::Tuple(
            items.iter().map(eval).collect::<Result<_, _>>()?,
        )),
    }
}

fn resolve(name: &str) -> Result<Builtin, CalcError> {
    Builtin::from_name(name).ok_or_else(|| CalcError::UndefinedName(name.to_string()))
}

fn arity(builtin: Builtin, args: &[Value], min: usize, max: usize) -> Result<(), CalcError> {
    if (min..=max).contains(&args.len()) {
        return Ok(());
    }
    let expected = match (min, max) {
        (1, 1) => "exactly one argument".to_string(),
        (a, b) if a == b => format!("exactly {a} arguments"),
        (_, b) => format!("at most {b} arguments"),
    };
    Err(CalcError::Type(format!(
        "{}() takes {} ({} given)",
        builtin.name(),
        expected,
        args.len()
    )))
}

fn number(builtin: Builtin, v: &Value) -> Result<Num, CalcError> {
    v.as_num().ok_or_else(|| {
        CalcError::Type(format!(
            "bad operand type for {}(): '{}'",
            builtin.name(),
            v.type_name()
        ))
    })
}

fn integer(v: &Value) -> Result<i128, CalcError> {
    match v.as_num() {
        Some(Num::Int(i)) => Ok(i),
        _ => Err(CalcError::Type(format!(
            "'{}' object cannot be interpreted as an integer",
            v.type_name()
        ))),
    }
}

fn call(builtin: Builtin, args: &[Value]) -> Result<Value, CalcError> {
    match builtin {
        Builtin::Abs => {
            arity(builtin, args, 1, 1)?;
            Ok(match number(builtin, &args[0])? {
                Num::Int(i) => Value::Int(
                    i.checked_abs()
                        .ok_or_else(|| CalcError::Arithmetic("integer overflow".into()))?,
                ),
                Num::Float(f) => Value::Float(f.abs()),
            })
        }
        Builtin::Round => {
            arity(builtin, args, 1, 2)?;
            let x = number(builtin, &args[0])?;
            match args.get(1) {
                None => round_to_int(x).map(Value::Int),
                Some(n) => round_digits(x, integer(n)?),
            }
        }
        Builtin::Min => extremum(builtin, args, Ordering::Less),
        Builtin::Max => extremum(builtin, args, Ordering::Greater),
        Builtin::Sum => {
            arity(builtin, args, 1, 2)?;
            let start = args.get(1).cloned().unwrap_or(Value::Int(0));
            args[0]
                .items()?
                .iter()
                .try_fold(start, |acc, v| Value::binary(BinOp::Add, &acc, v))
        }
        Builtin::Pow => {
            arity(builtin, args, 2, 3)?;
            match args.get(2) {
                None => Value::binary(BinOp::Pow, &args[0], &args[1]),
                Some(m) => modular_pow(&args[0], &args[1], m),
            }
        }
        Builtin::Sqrt => {
            arity(builtin, args, 1, 1)?;
            let x = args[0]
                .as_num()
                .ok_or_else(|| {
                    CalcError::Type(format!("must be real number, not {}", args[0].type_name()))
                })?
                .as_f64();
            if x < 0.0 {
                return Err(CalcError::Arithmetic("math domain error".into()));
            }
            Ok(Value::Float(x.sqrt()))
        }
    }
}

fn round_to_int(x: Num) -> Result<i128, CalcError> {
    match x {
        Num::Int(i) => Ok(i),
        Num::Float(f) if f.is_nan() => Err(CalcError::Arithmetic(
            "cannot convert float NaN to integer".into(),
        )),
        Num::Float(f) if f.is_infinite() => Err(CalcError::Arithmetic(
            "cannot convert float infinity to integer".into(),
        )),
        Num::Float(f) => {
            let r = f.round_ties_even();
            if r < i128::MIN as f64 || r >= i128::MAX as f64 {
                return Err(CalcError::Arithmetic("integer overflow".into()));
            }
            Ok(r as i128)
        }
    }
}

/// `round(x, n)`: ints stay ints (negative `n` rounds to tens, hundreds, ...), floats stay floats.
fn round_digits(x: Num, digits: i128) -> Result<Value, CalcError> {
    match x {
        Num::Int(i) if digits >= 0 => Ok(Value::Int(i)),
        Num::Int(i) => {
            let Some(p) = u32::try_from(digits.unsigned_abs()).ok().and_then(|e| 10i128.checked_pow(e)) else {
                return Ok(Value::Int(0));
            };
            let (q, r) = (i.div_euclid(p), i.rem_euclid(p));
            let q = match r.cmp(&(p - r)) {
                Ordering::Greater => q + 1,
                Ordering::Equal if q % 2 != 0 => q + 1,
                _ => q,
            };
            q.checked_mul(p)
                .map(Value::Int)
                .ok_or_else(|| CalcError::Arithmetic("integer overflow".into()))
        }
        Num::Float(f) => {
            let p = 10f64.powi(digits.clamp(-400, 400) as i32);
            let scaled = f * p;
            if !f.is_finite() || !p.is_finite() || !scaled.is_finite() {
                return Ok(Value::Float(f));
            }
            if p == 0.0 {
                return Ok(Value::Float(0.0 * f));
            }
            Ok(Value::Float(scaled.round_ties_even() / p))
        }
    }
}

/// `min`/`max` over one iterable argument or over two or more arguments. Ties keep the first.
fn extremum(builtin: Builtin, args: &[Value], want: Ordering) -> Result<Value, CalcError> {
    let candidates: &[Value] = match args {
        [] => {
            return Err(CalcError::Type(format!(
                "{} expected at least 1 argument, got 0",
                builtin.name()
            )))
        }
        [single] => single.items()?,
        many => many,
    };
    let (first, rest) = candidates.split_first().ok_or_else(|| {
        CalcError::Value(format!("{}() arg is an empty sequence", builtin.name()))
    })?;
    let symbol = if want == Ordering::Less { "<" } else { ">" };
    let mut best = first;
    for v in rest {
        if num_cmp(v, best, symbol)? == Some(want) {
            best = v;
        }
    }
    Ok(best.clone())
}

fn modular_pow(base: &Value, exp: &Value, modulus: &Value) -> Result<Value, CalcError> {
    let all_int = [base, exp, modulus]
        .iter()
        .all(|v| matches!(v.as_num(), Some(Num::Int(_))));
    if !all_int {
        return Err(CalcError::Type(
            "pow() 3rd argument not allowed unless all arguments are integers".into(),
        ));
    }
    let (b, e, m) = (integer(base)?, integer(exp)?, integer(modulus)?);
    if m == 0 {
        return Err(CalcError::Value("pow() 3rd argument cannot be 0".into()));
    }
    if e < 0 {
        return Err(CalcError::Value(
            "pow() 2nd argument cannot be negative when 3rd argument specified".into(),
        ));
    }
    let m_abs = m.unsigned_abs();
    let mut b = match b.unsigned_abs() % m_abs {
        r if b < 0 && r != 0 => m_abs - r,
        r => r,
    };
    let mut result = 1 % m_abs;
    let mut e = e;
    while e > 0 {
        if e & 1 == 1 {
            result = mul_mod(result, b, m_abs);
        }
        b = mul_mod(b, b, m_abs);
        e >>= 1;
    }
    // result < |m| <= 2^127, so both conversions stay in range.
    let result = result as i128;
    Ok(Value::Int(if m < 0 && result != 0 { result + m } else { result }))
}

/// `a * b % m` for `a, b < m <= 2^127` without overflowing.
fn mul_mod(mut a: u128, mut b: u128, m: u128) -> u128 {
    let mut acc = 0;
    while b > 0 {
        if b & 1 == 1 {
            acc = (acc + a) % m;
        }
        a = (a + a) % m;
        b >>= 1;
    }
    acc
}
