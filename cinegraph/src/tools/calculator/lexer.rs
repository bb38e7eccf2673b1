//! Tokenizer for calculator expressions.

use super::CalcError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i128),
    Float(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() || (c == '.' && next.is_some_and(|n| n.is_ascii_digit())) {
            let (token, len) = number(&chars[i..])?;
            tokens.push(token);
            i += len;
            continue;
        }
        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Name(chars[start..i].iter().collect()));
            continue;
        }

        let (token, len) = match (c, next) {
            ('*', Some('*')) => (Token::DoubleStar, 2),
            ('/', Some('/')) => (Token::DoubleSlash, 2),
            ('<', Some('=')) => (Token::Le, 2),
            ('>', Some('=')) => (Token::Ge, 2),
            ('=', Some('=')) => (Token::EqEq, 2),
            ('!', Some('=')) => (Token::NotEq, 2),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('*', _) => (Token::Star, 1),
            ('/', _) => (Token::Slash, 1),
            ('%', _) => (Token::Percent, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            ('[', _) => (Token::LBracket, 1),
            (']', _) => (Token::RBracket, 1),
            (',', _) => (Token::Comma, 1),
            ('<', _) => (Token::Lt, 1),
            ('>', _) => (Token::Gt, 1),
            _ => return Err(CalcError::Syntax),
        };
        tokens.push(token);
        i += len;
    }
    Ok(tokens)
}

/// Scans `digits [. digits] [e [+-] digits]` or `. digits ...` at the start of `chars`.
fn number(chars: &[char]) -> Result<(Token, usize), CalcError> {
    let digits_from = |mut j: usize| {
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        j
    };

    let mut end = digits_from(0);
    let mut is_float = false;
    if chars.get(end) == Some(&'.') {
        is_float = true;
        end = digits_from(end + 1);
    }
    if matches!(chars.get(end), Some('e' | 'E')) {
        let mut j = end + 1;
        if matches!(chars.get(j), Some('+' | '-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end == j {
            return Err(CalcError::Syntax);
        }
        is_float = true;
        end = exp_end;
    }
    if chars
        .get(end)
        .is_some_and(|c| c.is_alphanumeric() || *c == '_')
    {
        return Err(CalcError::Syntax);
    }

    let text: String = chars[..end].iter().collect();
    let token = if is_float {
        Token::Float(text.parse().map_err(|_| CalcError::Syntax)?)
    } else {
        Token::Int(
            text.parse()
                .map_err(|_| CalcError::Arithmetic("integer literal too large".into()))?,
        )
    };
    Ok((token, end))
}
