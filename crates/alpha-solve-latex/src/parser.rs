//! LaTeX and plain-text expression parser
//!
//! A recursive descent parser with implicit multiplication, LaTeX scripts
//! and the common math-mode commands.

use crate::ast::{BinaryOperator, Constant, Expr, Statement};
use crate::error::{LatexError, LatexResult};
use crate::functions;

/// Parse worksheet LaTeX into an expression or an equation
///
/// # Example
/// ```rust
/// use alpha_solve_latex::parse_latex;
///
/// let statement = parse_latex(r"x^2 - 4").unwrap();
/// assert!(!statement.is_equation());
///
/// let statement = parse_latex(r"x + a = 5").unwrap();
/// assert!(statement.is_equation());
/// ```
pub fn parse_latex(latex: &str) -> LatexResult<Statement> {
    let mut parser = ExprParser::new(latex.trim(), Dialect::Latex);
    parser.parse_statement()
}

/// Parse plain math text such as `sqrt(2)/2`, `2*pi` or `x**2`
///
/// Used for values stored in variables. Identifiers may span several
/// letters, `**` is a power and functions use call syntax.
pub fn parse_plain(text: &str) -> LatexResult<Expr> {
    let mut parser = ExprParser::new(text.trim(), Dialect::Plain);
    let expr = parser.parse_expression()?;
    parser.expect_end()?;
    Ok(expr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Latex,
    Plain,
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    /// Single LaTeX letter
    Letter(char),
    /// Multi-letter plain identifier
    Identifier(String),
    /// LaTeX command name without the backslash
    Command(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Underscore,
    Equal,
    Comma,
    Pipe,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    Invalid(String),

    // End of input
    Eof,
}

/// Greek letters that name symbols (`\pi` is the constant instead)
const GREEK_LETTERS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta",
    "vartheta", "iota", "kappa", "lambda", "mu", "nu", "xi", "rho", "varrho", "sigma", "tau",
    "upsilon", "phi", "varphi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi",
    "Sigma", "Upsilon", "Phi", "Psi", "Omega",
];

/// Commands that only affect spacing or delimiter size
const IGNORED_COMMANDS: &[&str] = &[
    ",", ";", ":", "!", " ", "quad", "qquad", "left", "right", "big", "Big", "bigg", "Bigg",
    "bigl", "bigr", "Bigl", "Bigr", "displaystyle",
];

pub(crate) fn is_greek_letter(name: &str) -> bool {
    GREEK_LETTERS.contains(&name)
}

struct ExprParser<'a> {
    input: &'a str,
    pos: usize,
    dialect: Dialect,
    current_token: Option<Token>,
    /// Next number token is a script argument and keeps a single digit
    script_pending: bool,
    /// Nesting depth of `|...|`
    abs_depth: usize,
}

impl<'a> ExprParser<'a> {
    fn new(input: &'a str, dialect: Dialect) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            dialect,
            current_token: None,
            script_pending: false,
            abs_depth: 0,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.current_token = Some(self.scan_token());
    }

    fn scan_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let Some(c) = self.peek_char() else {
                return Token::Eof;
            };
            let script = std::mem::take(&mut self.script_pending);

            match c {
                '+' => {
                    self.advance();
                    return Token::Plus;
                }
                '-' => {
                    self.advance();
                    return Token::Minus;
                }
                '*' => {
                    self.advance();
                    if self.dialect == Dialect::Plain && self.peek_char() == Some('*') {
                        self.advance();
                        return Token::Caret;
                    }
                    return Token::Star;
                }
                '/' => {
                    self.advance();
                    return Token::Slash;
                }
                '^' => {
                    self.advance();
                    return self.script_token(Token::Caret);
                }
                '_' if self.dialect == Dialect::Latex => {
                    self.advance();
                    return self.script_token(Token::Underscore);
                }
                '=' => {
                    self.advance();
                    return Token::Equal;
                }
                ',' => {
                    self.advance();
                    return Token::Comma;
                }
                '|' => {
                    self.advance();
                    return Token::Pipe;
                }
                '(' => {
                    self.advance();
                    return Token::LeftParen;
                }
                ')' => {
                    self.advance();
                    return Token::RightParen;
                }
                '{' => {
                    self.advance();
                    return Token::LeftBrace;
                }
                '}' => {
                    self.advance();
                    return Token::RightBrace;
                }
                '[' => {
                    self.advance();
                    return Token::LeftBracket;
                }
                ']' => {
                    self.advance();
                    return Token::RightBracket;
                }
                '\\' if self.dialect == Dialect::Latex => match self.scan_command() {
                    Some(token) => return token,
                    None => {
                        // Spacing or sizing command, keep scanning
                        self.script_pending = script;
                        continue;
                    }
                },
                _ => {}
            }

            if c.is_ascii_digit()
                || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
            {
                return self.scan_number(script);
            }

            if c.is_alphabetic() || (c == '_' && self.dialect == Dialect::Plain) {
                return match self.dialect {
                    Dialect::Latex => {
                        self.advance();
                        Token::Letter(c)
                    }
                    Dialect::Plain => self.scan_identifier(),
                };
            }

            self.advance();
            return Token::Invalid(c.to_string());
        }
    }

    fn script_token(&mut self, token: Token) -> Token {
        if self.dialect == Dialect::Latex {
            self.script_pending = true;
        }
        token
    }

    /// Scan a `\command`; `None` means the command only affects layout
    fn scan_command(&mut self) -> Option<Token> {
        self.advance(); // Skip backslash

        let start = self.pos;
        if self.peek_char().map_or(false, |c| c.is_ascii_alphabetic()) {
            while self.peek_char().map_or(false, |c| c.is_ascii_alphabetic()) {
                self.advance();
            }
        } else {
            self.advance();
        }
        let name = &self.input[start..self.pos];

        if name.is_empty() {
            return Some(Token::Invalid("\\".to_string()));
        }

        if IGNORED_COMMANDS.contains(&name) {
            // Null delimiter after \left or \right
            if name == "left" || name == "right" {
                self.skip_whitespace();
                if self.peek_char() == Some('.') {
                    self.advance();
                }
            }
            return None;
        }

        let token = match name {
            "cdot" | "times" | "ast" => Token::Star,
            "div" => Token::Slash,
            "{" => Token::LeftParen,
            "}" => Token::RightParen,
            "vert" | "lvert" | "rvert" => Token::Pipe,
            _ => Token::Command(name.to_string()),
        };
        Some(token)
    }

    fn scan_number(&mut self, script: bool) -> Token {
        let start = self.pos;

        if script && self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            // `x^23` is `x^{2} 3`
            self.advance();
        } else {
            // Integer part
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }

            // Decimal part
            if self.peek_char() == Some('.') {
                self.advance();
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }

            // Exponent part (plain text only, `2e3` in LaTeX is a product)
            if self.dialect == Dialect::Plain && self.at_exponent() {
                self.advance();
                if self.peek_char().map_or(false, |c| c == '+' || c == '-') {
                    self.advance();
                }
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse::<f64>() {
            Ok(num) => Token::Number(num),
            Err(_) => Token::Invalid(num_str.to_string()),
        }
    }

    fn at_exponent(&self) -> bool {
        if !self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            return false;
        }
        match self.peek_char_at(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+') | Some('-') => self.peek_char_at(2).map_or(false, |c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    /// Read the raw text of a `{...}` group whose opening brace was just scanned
    fn read_raw_group(&mut self) -> LatexResult<String> {
        let start = self.pos;
        let mut depth = 1;
        while let Some(c) = self.peek_char() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            self.advance();
        }
        if depth != 0 {
            return Err(LatexError::Parse("Unterminated '{' group".into()));
        }
        let raw = self.input[start..self.pos].trim().to_string();
        self.advance(); // Skip closing brace
        self.script_pending = false;
        self.advance_token();
        Ok(raw)
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        self.current_token.as_ref().unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.current_token.take().unwrap_or(Token::Eof);
        self.advance_token();
        token
    }

    fn expect(&mut self, expected: &Token) -> LatexResult<()> {
        if self.current_token() == expected {
            self.consume();
            Ok(())
        } else {
            Err(LatexError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    fn expect_end(&self) -> LatexResult<()> {
        match self.current_token() {
            Token::Eof => Ok(()),
            token => Err(LatexError::Parse(format!(
                "Unexpected {:?} after expression",
                token
            ))),
        }
    }

    /// Whether the current token can begin an implicitly multiplied factor
    fn starts_implicit_factor(&self) -> bool {
        if self.dialect != Dialect::Latex {
            return false;
        }
        match self.current_token() {
            Token::Number(_)
            | Token::Letter(_)
            | Token::Command(_)
            | Token::LeftParen
            | Token::LeftBracket
            | Token::LeftBrace => true,
            Token::Pipe => self.abs_depth == 0,
            _ => false,
        }
    }

    fn at_function_command(&self) -> bool {
        matches!(self.current_token(), Token::Command(name) if functions::lookup(name).is_some())
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Equation: = (statement level only)
    // 2. Addition/Subtraction: +, -
    // 3. Multiplication/Division: *, /, \cdot, \times, \div, juxtaposition
    // 4. Unary: -, +
    // 5. Exponentiation: ^, ** (plain)
    // 6. Primary: numbers, symbols, commands, groups, |...|

    fn parse_statement(&mut self) -> LatexResult<Statement> {
        let lhs = self.parse_expression()?;

        if !matches!(self.current_token(), Token::Equal) {
            self.expect_end()?;
            return Ok(Statement::Expression(lhs));
        }

        self.consume();
        let rhs = self.parse_expression()?;
        if matches!(self.current_token(), Token::Equal) {
            return Err(LatexError::Parse("More than one '=' in equation".into()));
        }
        self.expect_end()?;
        Ok(Statement::Equation { lhs, rhs })
    }

    fn parse_expression(&mut self) -> LatexResult<Expr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> LatexResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> LatexResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            if self.starts_implicit_factor() {
                let right = self.parse_power()?;
                left = Expr::binary(BinaryOperator::Multiply, left, right);
                continue;
            }

            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> LatexResult<Expr> {
        match self.current_token() {
            Token::Minus => {
                self.consume();
                let operand = self.parse_unary()?;
                Ok(Expr::negate(operand))
            }
            Token::Plus => {
                self.consume();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> LatexResult<Expr> {
        let base = self.parse_primary()?;

        if matches!(self.current_token(), Token::Caret) {
            self.consume();
            let exponent = self.parse_exponent()?;
            return Ok(Expr::binary(BinaryOperator::Power, base, exponent));
        }

        Ok(base)
    }

    /// Argument of `^` (or `_` on `\log`)
    fn parse_exponent(&mut self) -> LatexResult<Expr> {
        match self.dialect {
            // Right associative
            Dialect::Plain => self.parse_unary(),
            Dialect::Latex => {
                if matches!(self.current_token(), Token::Minus) {
                    self.consume();
                    let operand = self.parse_exponent()?;
                    return Ok(Expr::negate(operand));
                }
                self.parse_primary()
            }
        }
    }

    fn parse_primary(&mut self) -> LatexResult<Expr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume();
                Ok(Expr::Number(n))
            }

            Token::Letter(c) => {
                self.consume();
                let name = self.parse_subscript(c.to_string())?;
                Ok(Expr::Symbol(name))
            }

            Token::Identifier(name) => {
                self.consume();
                self.parse_identifier(name)
            }

            Token::Command(name) => {
                self.consume();
                self.parse_command(&name)
            }

            Token::LeftParen => self.parse_group(Token::RightParen),
            Token::LeftBracket => self.parse_group(Token::RightBracket),
            Token::LeftBrace => self.parse_group(Token::RightBrace),

            Token::Pipe => {
                self.consume();
                self.abs_depth += 1;
                let inner = self.parse_expression();
                self.abs_depth -= 1;
                let inner = inner?;
                self.expect(&Token::Pipe)?;
                Ok(Expr::function("abs", vec![inner]))
            }

            Token::Eof => Err(LatexError::Parse("Unexpected end of input".into())),

            token => Err(LatexError::Parse(format!("Unexpected token: {:?}", token))),
        }
    }

    fn parse_group(&mut self, close: Token) -> LatexResult<Expr> {
        self.consume(); // Opening delimiter
        let expr = self.parse_expression()?;
        self.expect(&close)?;
        Ok(expr)
    }

    /// Braced argument of `\frac` or `\sqrt`, or a single atom
    fn parse_argument(&mut self) -> LatexResult<Expr> {
        match self.current_token() {
            Token::LeftBrace => self.parse_group(Token::RightBrace),
            _ => self.parse_primary(),
        }
    }

    /// Attach an optional `_x` / `_{...}` subscript to a symbol name
    fn parse_subscript(&mut self, base: String) -> LatexResult<String> {
        if !matches!(self.current_token(), Token::Underscore) {
            return Ok(base);
        }
        self.consume();

        let subscript = match self.current_token().clone() {
            Token::LeftBrace => self.read_raw_group()?,
            Token::Number(n) => {
                self.consume();
                format!("{}", n)
            }
            Token::Letter(c) => {
                self.consume();
                c.to_string()
            }
            Token::Command(name) => {
                self.consume();
                format!("\\{}", name)
            }
            token => {
                return Err(LatexError::Parse(format!(
                    "Invalid subscript on {}: {:?}",
                    base, token
                )))
            }
        };

        Ok(format!("{}_{{{}}}", base, subscript))
    }

    fn parse_command(&mut self, name: &str) -> LatexResult<Expr> {
        match name {
            "pi" => Ok(Expr::Constant(Constant::Pi)),

            "frac" | "dfrac" | "tfrac" => {
                let numerator = self.parse_argument()?;
                let denominator = self.parse_argument()?;
                Ok(Expr::binary(BinaryOperator::Divide, numerator, denominator))
            }

            "sqrt" => {
                if matches!(self.current_token(), Token::LeftBracket) {
                    self.consume();
                    let index = self.parse_expression()?;
                    self.expect(&Token::RightBracket)?;
                    let radicand = self.parse_argument()?;
                    return Ok(Expr::function("root", vec![radicand, index]));
                }
                let radicand = self.parse_argument()?;
                Ok(Expr::function("sqrt", vec![radicand]))
            }

            "mathrm" | "operatorname" | "mathit" | "text" => {
                if !matches!(self.current_token(), Token::LeftBrace) {
                    return Err(LatexError::Parse(format!("Expected '{{' after \\{}", name)));
                }
                let text = self.read_raw_group()?;
                self.parse_named(text)
            }

            _ if is_greek_letter(name) => {
                let name = self.parse_subscript(name.to_string())?;
                Ok(Expr::Symbol(name))
            }

            _ => match functions::lookup(name) {
                Some(def) => self.parse_function_application(def.name),
                None => Err(LatexError::Parse(format!("Unsupported command \\{}", name))),
            },
        }
    }

    /// Body of `\mathrm{...}` or `\operatorname{...}`
    fn parse_named(&mut self, text: String) -> LatexResult<Expr> {
        if text == "e" {
            return Ok(Expr::Constant(Constant::E));
        }
        match functions::lookup(&text) {
            Some(def) => self.parse_function_application(def.name),
            None if text.is_empty() => Err(LatexError::Parse("Empty name".into())),
            None => Ok(Expr::Symbol(text)),
        }
    }

    /// `\sin x`, `\sin(x)`, `\sin^2 x`, `\log_{2} 8`
    fn parse_function_application(&mut self, name: &'static str) -> LatexResult<Expr> {
        let mut power = None;
        let mut base = None;

        loop {
            match self.current_token() {
                Token::Caret => {
                    self.consume();
                    power = Some(self.parse_exponent()?);
                }
                Token::Underscore if name == "log" => {
                    self.consume();
                    base = Some(self.parse_exponent()?);
                }
                _ => break,
            }
        }

        let argument = match self.current_token() {
            Token::LeftParen | Token::LeftBracket | Token::LeftBrace => self.parse_primary()?,
            _ => self.parse_function_operand()?,
        };

        let mut args = vec![argument];
        args.extend(base);
        let call = Expr::function(name, args);

        Ok(match power {
            Some(exponent) => Expr::binary(BinaryOperator::Power, call, exponent),
            None => call,
        })
    }

    /// Unparenthesized function argument: a run of juxtaposed factors
    fn parse_function_operand(&mut self) -> LatexResult<Expr> {
        let mut operand = self.parse_unary()?;
        while self.starts_implicit_factor() && !self.at_function_command() {
            let factor = self.parse_power()?;
            operand = Expr::binary(BinaryOperator::Multiply, operand, factor);
        }
        Ok(operand)
    }

    fn parse_identifier(&mut self, name: String) -> LatexResult<Expr> {
        if matches!(self.current_token(), Token::LeftParen) {
            let def = functions::lookup(&name).ok_or(LatexError::UnknownFunction(name))?;
            self.consume();

            let mut args = Vec::new();
            if !matches!(self.current_token(), Token::RightParen) {
                args.push(self.parse_expression()?);
                while matches!(self.current_token(), Token::Comma) {
                    self.consume();
                    args.push(self.parse_expression()?);
                }
            }
            self.expect(&Token::RightParen)?;

            return Ok(Expr::function(def.name, args));
        }

        Ok(match name.as_str() {
            "pi" => Expr::Constant(Constant::Pi),
            "E" => Expr::Constant(Constant::E),
            _ => Expr::Symbol(name),
        })
    }
}
