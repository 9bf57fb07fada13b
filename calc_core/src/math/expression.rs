//! # Expression Parser
//!
//! Recursive-descent parser for expressions in `x` and `y`, used by the
//! differential equation solver for `dy/dx = f(x, y)`.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary | <implicit> unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | name | name '(' expr ')' | '(' expr ')'
//! ```
//!
//! - `^` is right-associative and binds tighter than unary minus
//!   (`-2^2 = -4`, `2^3^2 = 512`).
//! - Implicit multiplication applies before a name or `(`: `2x`, `3(x+1)`,
//!   `2sin(x)`, `(x+1)(x-1)`.
//! - Names: `x`, `y`, `t` (same as `x`), constants `pi` and `e`, and the
//!   functions `sin cos tan asin acos atan sinh cosh tanh exp ln log sqrt abs`.
//!   `log` is base 10. Names are case-insensitive.
//!
//! Parse errors carry the 0-based character offset of the offending token.
//! Nesting deeper than [`MAX_DEPTH`] and input longer than [`MAX_LENGTH`]
//! characters are rejected as parse errors.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::math::expression::parse;
//!
//! let f = parse("2x + y^2").unwrap();
//! assert_eq!(f.eval(3.0, 2.0), 10.0);
//!
//! let err = parse("x + * 2").unwrap_err();
//! assert_eq!(err.error_code(), "PARSE_ERROR");
//! ```

use std::fmt;

use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }

    fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log,
    Sqrt,
    Abs,
}

impl Function {
    pub const ALL: [Function; 14] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Exp,
        Function::Ln,
        Function::Log,
        Function::Sqrt,
        Function::Abs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
        }
    }

    fn from_name(name: &str) -> Option<Function> {
        Function::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Function::Sin => v.sin(),
            Function::Cos => v.cos(),
            Function::Tan => v.tan(),
            Function::Asin => v.asin(),
            Function::Acos => v.acos(),
            Function::Atan => v.atan(),
            Function::Sinh => v.sinh(),
            Function::Cosh => v.cosh(),
            Function::Tanh => v.tanh(),
            Function::Exp => v.exp(),
            Function::Ln => v.ln(),
            Function::Log => v.log10(),
            Function::Sqrt => v.sqrt(),
            Function::Abs => v.abs(),
        }
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var(Variable),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Function,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate at `(x, y)`. Domain violations give NaN or infinity.
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            Expr::Number(v) => *v,
            Expr::Var(Variable::X) => x,
            Expr::Var(Variable::Y) => y,
            Expr::Neg(inner) => -inner.eval(x, y),
            Expr::Binary { op, lhs, rhs } => op.apply(lhs.eval(x, y), rhs.eval(x, y)),
            Expr::Call { func, arg } => func.apply(arg.eval(x, y)),
        }
    }

    /// True if the expression mentions `y`.
    pub fn uses_y(&self) -> bool {
        match self {
            Expr::Number(_) | Expr::Var(Variable::X) => false,
            Expr::Var(Variable::Y) => true,
            Expr::Neg(inner) => inner.uses_y(),
            Expr::Binary { lhs, rhs, .. } => lhs.uses_y() || rhs.uses_y(),
            Expr::Call { arg, .. } => arg.uses_y(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(v) => write!(f, "{}", v),
            Expr::Var(Variable::X) => write!(f, "x"),
            Expr::Var(Variable::Y) => write!(f, "y"),
            Expr::Neg(inner) => write!(f, "(-{})", inner),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call { func, arg } => write!(f, "{}({})", func.name(), arg),
        }
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Op(char),
    LParen,
    RParen,
    End,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(v) => format!("number {}", v),
            Token::Name(name) => format!("'{}'", name),
            Token::Op(c) => format!("'{}'", c),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::End => "end of input".to_string(),
        }
    }
}

fn tokenize(source: &str) -> CalcResult<Vec<(usize, Token)>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            // Exponent only when digits follow, so "2e" stays 2 times e
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| CalcError::parse(source, start, format!("Invalid number '{}'", text)))?;
            tokens.push((start, Token::Number(value)));
            continue;
        }

        if c.is_alphabetic() {
            while i < chars.len() && chars[i].is_alphabetic() {
                i += 1;
            }
            let name: String = chars[start..i].iter().collect::<String>().to_lowercase();
            tokens.push((start, Token::Name(name)));
            continue;
        }

        let token = match c {
            '+' | '-' | '/' | '^' => Token::Op(c),
            '*' | '×' | '·' => Token::Op('*'),
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => {
                return Err(CalcError::parse(
                    source,
                    start,
                    format!("Unexpected character '{}'", c),
                ))
            }
        };
        tokens.push((start, token));
        i += 1;
    }

    tokens.push((chars.len(), Token::End));
    Ok(tokens)
}

// ============================================================================
// Parser
// ============================================================================

/// Deepest nesting of parentheses, signs and powers accepted
pub const MAX_DEPTH: usize = 256;

/// Longest expression accepted, in characters
pub const MAX_LENGTH: usize = 4_096;

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(usize, Token)>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    // `tokens` always ends with `Token::End` and `pos` never moves past it
    fn peek(&self) -> &Token {
        &self.tokens[self.pos].1
    }

    fn offset(&self) -> usize {
        self.tokens[self.pos].0
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn error(&self, reason: impl Into<String>) -> CalcError {
        CalcError::parse(self.source, self.offset(), reason)
    }

    fn unexpected(&self) -> CalcError {
        self.error(format!("Unexpected {}", self.peek().describe()))
    }

    fn expect_rparen(&mut self) -> CalcResult<()> {
        if *self.peek() == Token::RParen {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("Expected ')' but found {}", self.peek().describe())))
        }
    }

    fn expression(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Token::Op('+') => BinaryOp::Add,
                Token::Op('-') => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> CalcResult<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek() {
                Token::Op('*') => {
                    self.advance();
                    BinaryOp::Mul
                }
                Token::Op('/') => {
                    self.advance();
                    BinaryOp::Div
                }
                Token::Name(_) | Token::LParen => BinaryOp::Mul,
                _ => return Ok(lhs),
            };
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    // Every recursive path passes through here
    fn unary(&mut self) -> CalcResult<Expr> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("Expression nested too deeply"));
        }
        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> CalcResult<Expr> {
        match self.peek() {
            Token::Op('-') => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Token::Op('+') => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> CalcResult<Expr> {
        let base = self.primary()?;
        if *self.peek() == Token::Op('^') {
            self.advance();
            let exponent = self.unary()?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> CalcResult<Expr> {
        match self.peek().clone() {
            Token::Number(v) => {
                self.advance();
                Ok(Expr::Number(v))
            }
            Token::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Token::Name(name) => {
                let name_offset = self.offset();
                self.advance();
                match name.as_str() {
                    "x" | "t" => Ok(Expr::Var(Variable::X)),
                    "y" => Ok(Expr::Var(Variable::Y)),
                    "pi" => Ok(Expr::Number(std::f64::consts::PI)),
                    "e" => Ok(Expr::Number(std::f64::consts::E)),
                    _ => {
                        let func = Function::from_name(&name).ok_or_else(|| {
                            CalcError::parse(self.source, name_offset, format!("Unknown name '{}'", name))
                        })?;
                        if *self.peek() != Token::LParen {
                            return Err(self.error(format!("Expected '(' after {}", name)));
                        }
                        self.advance();
                        let arg = self.expression()?;
                        self.expect_rparen()?;
                        Ok(Expr::Call {
                            func,
                            arg: Box::new(arg),
                        })
                    }
                }
            }
            Token::End => Err(self.error("Unexpected end of expression")),
            _ => Err(self.unexpected()),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// Parse an expression in `x` and `y`.
pub fn parse(source: &str) -> CalcResult<Expr> {
    if source.chars().count() > MAX_LENGTH {
        return Err(CalcError::parse(
            source,
            MAX_LENGTH,
            format!("Expression longer than {} characters", MAX_LENGTH),
        ));
    }
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        depth: 0,
    };
    if *parser.peek() == Token::End {
        return Err(parser.error("Expression is empty"));
    }
    let expr = parser.expression()?;
    if *parser.peek() != Token::End {
        return Err(parser.unexpected());
    }
    Ok(expr)
}

/// Parse and evaluate in one step.
pub fn evaluate(source: &str, x: f64, y: f64) -> CalcResult<f64> {
    parse(source).map(|expr| expr.eval(x, y))
}
