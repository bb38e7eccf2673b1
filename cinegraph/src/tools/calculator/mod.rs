//! `calculator` tool: a restricted arithmetic evaluator.
//!
//! Expressions are tokenized and parsed into a small AST, then evaluated. The only
//! names in scope are `abs`, `round`, `min`, `max`, `sum`, `pow` and `sqrt` (plus the
//! `True`/`False` literals). Anything else is an error; nothing outside the expression
//! is ever reached. Integer results stay integral and true division yields a float, so
//! `2 + 2` prints `4` and `8 / 2` prints `4.0`. Integers are exact up to 128 bits;
//! anything wider is an overflow error.

mod eval;
mod lexer;
mod parser;
mod value;

pub use value::{Builtin, Value};

use async_trait::async_trait;
use thiserror::Error;

use super::{Tool, ToolExecutionError};

/// Tool name for the calculator.
pub const TOOL_CALCULATOR: &str = "calculator";

const DESCRIPTION: &str = "Perform mathematical calculations.
Use this for arithmetic, comparisons, or computing metrics.
Example: \"125000000 / 50000000\" for ROI calculations
Integers are exact up to 128 bits; larger results are reported as overflow";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid syntax")]
    Syntax,

    #[error("name '{0}' is not defined")]
    UndefinedName(String),

    #[error("{0}")]
    ZeroDivision(String),

    #[error("{0}")]
    Arithmetic(String),

    #[error("{0}")]
    Type(String),

    #[error("{0}")]
    Value(String),

    #[error("expression is too deeply nested")]
    TooDeep,
}

/// Parses and evaluates one expression.
pub fn evaluate(expression: &str) -> Result<Value, CalcError> {
    let tokens = lexer::tokenize(expression)?;
    let expr = parser::Parser::new(tokens).parse()?;
    eval::eval(&expr)
}

#[derive(Debug, Default)]
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        TOOL_CALCULATOR
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    async fn call(&self, input: &str) -> Result<String, ToolExecutionError> {
        let value = evaluate(input.trim())?;
        Ok(format!("Result: {}", value))
    }

    fn render_error(&self, err: &ToolExecutionError) -> String {
        format!("Calculation error: {}", err)
    }
}
