//! Two-level expressions and their textual form.
//!
//! # Format
//!
//! ```text
//! SOP:  A·B' + C          products joined by " + ", literals by "·"
//! POS:  (A + B')(A' + C)  parenthesised sums, juxtaposed
//! 0, 1                    constants
//! ```
//!
//! A trailing `'` complements a literal. Labels may span several characters,
//! which is why products use an explicit `·` separator (`*` is accepted when parsing).
//!
//! Labels that are `0` or `1`, empty, or contain whitespace or any of
//! `()+*·'"\` are printed in double quotes, escaping `"` and `\` with a
//! backslash. The label `Cin 2` complemented prints as `"Cin 2"'`.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Literal {
    pub name: String,
    pub complemented: bool,
}

impl Literal {
    pub fn new(name: impl Into<String>, complemented: bool) -> Self {
        Self {
            name: name.into(),
            complemented,
        }
    }

    pub fn eval(&self, value: bool) -> bool {
        value != self.complemented
    }
}

/// Characters that cannot appear in a bare (unquoted) label.
fn is_reserved(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '+' | '*' | '·' | '\'' | '"' | '\\')
}

fn needs_quotes(name: &str) -> bool {
    name.is_empty() || name == "0" || name == "1" || name.contains(is_reserved)
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if needs_quotes(&self.name) {
            write!(f, "\"")?;
            for c in self.name.chars() {
                if c == '"' || c == '\\' {
                    write!(f, "\\")?;
                }
                write!(f, "{}", c)?;
            }
            write!(f, "\"")?;
        } else {
            write!(f, "{}", self.name)?;
        }
        if self.complemented {
            write!(f, "'")?;
        }
        Ok(())
    }
}

/// A product (in SOP) or sum (in POS) of literals.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Term {
    pub literals: Vec<Literal>,
}

impl Term {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    fn write_joined(&self, f: &mut Formatter<'_>, sep: &str) -> std::fmt::Result {
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", sep)?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Form {
    Sop,
    Pos,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expression {
    Const(bool),
    /// Disjunction of products.
    Sop(Vec<Term>),
    /// Conjunction of sums.
    Pos(Vec<Term>),
}

impl Expression {
    pub fn form(&self) -> Option<Form> {
        match self {
            Expression::Const(_) => None,
            Expression::Sop(_) => Some(Form::Sop),
            Expression::Pos(_) => Some(Form::Pos),
        }
    }

    pub fn terms(&self) -> &[Term] {
        match self {
            Expression::Const(_) => &[],
            Expression::Sop(terms) | Expression::Pos(terms) => terms,
        }
    }

    pub fn term_count(&self) -> usize {
        self.terms().len()
    }

    pub fn literal_count(&self) -> usize {
        self.terms().iter().map(|t| t.literals.len()).sum()
    }

    /// Evaluates the expression; every variable it mentions must be assigned.
    pub fn eval(&self, assignment: &BTreeMap<String, bool>) -> Result<bool, AnalysisError> {
        let value = |literal: &Literal| -> Result<bool, AnalysisError> {
            assignment
                .get(&literal.name)
                .map(|&v| literal.eval(v))
                .ok_or_else(|| AnalysisError::InvalidExpression(format!("unbound variable '{}'", literal.name)))
        };
        match self {
            Expression::Const(b) => Ok(*b),
            Expression::Sop(terms) => {
                for term in terms {
                    let mut product = true;
                    for literal in term.literals.iter() {
                        product &= value(literal)?;
                    }
                    if product {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Expression::Pos(terms) => {
                for term in terms {
                    let mut sum = false;
                    for literal in term.literals.iter() {
                        sum |= value(literal)?;
                    }
                    if !sum {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Const(b) => write!(f, "{}", if *b { "1" } else { "0" }),
            Expression::Sop(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    term.write_joined(f, "·")?;
                }
                Ok(())
            }
            Expression::Pos(terms) => {
                for term in terms {
                    write!(f, "(")?;
                    term.write_joined(f, " + ")?;
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl Expression {
    /// Parses the textual form produced by [`Display`].
    pub fn parse(text: &str) -> Result<Self, AnalysisError> {
        let tokens = tokenize(text)?;
        match tokens.as_slice() {
            [] => return Err(AnalysisError::InvalidExpression("empty expression".to_string())),
            [Token::Name { text, quoted: false }] if text == "0" => return Ok(Expression::Const(false)),
            [Token::Name { text, quoted: false }] if text == "1" => return Ok(Expression::Const(true)),
            _ => {}
        }

        let mut parser = Parser { tokens, pos: 0 };
        let expr = if parser.peek() == Some(&Token::Open) {
            Expression::Pos(parser.pos_terms()?)
        } else {
            Expression::Sop(parser.sop_terms()?)
        };
        match parser.peek() {
            None => Ok(expr),
            Some(token) => Err(AnalysisError::InvalidExpression(format!(
                "unexpected {} in '{}'",
                token, text
            ))),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Token {
    Name { text: String, quoted: bool },
    Prime,
    Plus,
    Dot,
    Open,
    Close,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Name { text, .. } => write!(f, "name '{}'", text),
            Token::Prime => write!(f, "\"'\""),
            Token::Plus => write!(f, "'+'"),
            Token::Dot => write!(f, "'·'"),
            Token::Open => write!(f, "'('"),
            Token::Close => write!(f, "')'"),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, AnalysisError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '\'' => Token::Prime,
            '+' => Token::Plus,
            '·' | '*' => Token::Dot,
            '(' => Token::Open,
            ')' => Token::Close,
            '"' => Token::Name {
                text: quoted_name(&mut chars).ok_or_else(|| {
                    AnalysisError::InvalidExpression(format!("unterminated quoted name in '{}'", text))
                })?,
                quoted: true,
            },
            '\\' => {
                return Err(AnalysisError::InvalidExpression(format!(
                    "stray backslash in '{}'",
                    text
                )));
            }
            c => {
                let mut name = String::from(c);
                while let Some(&c) = chars.peek() {
                    if is_reserved(c) {
                        break;
                    }
                    name.push(c);
                    chars.next();
                }
                Token::Name { text: name, quoted: false }
            }
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// Reads up to the closing quote, resolving backslash escapes.
fn quoted_name(chars: &mut impl Iterator<Item = char>) -> Option<String> {
    let mut name = String::new();
    loop {
        match chars.next()? {
            '"' => return Some(name),
            '\\' => name.push(chars.next()?),
            c => name.push(c),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, wanted: &str) -> AnalysisError {
        AnalysisError::InvalidExpression(match self.peek() {
            Some(found) => format!("expected {}, found {}", wanted, found),
            None => format!("expected {}, found end of input", wanted),
        })
    }

    fn expect(&mut self, token: &Token) -> Result<(), AnalysisError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected(&token.to_string()))
        }
    }

    fn literal(&mut self) -> Result<Literal, AnalysisError> {
        let name = match self.peek() {
            Some(Token::Name { text, quoted }) if *quoted || (text != "0" && text != "1") => text.clone(),
            _ => return Err(self.unexpected("a variable")),
        };
        self.pos += 1;
        let complemented = self.eat(&Token::Prime);
        Ok(Literal::new(name, complemented))
    }

    fn term(&mut self, separator: &Token) -> Result<Term, AnalysisError> {
        let mut literals = vec![self.literal()?];
        while self.eat(separator) {
            literals.push(self.literal()?);
        }
        Ok(Term::new(literals))
    }

    /// Products joined by `+`.
    fn sop_terms(&mut self) -> Result<Vec<Term>, AnalysisError> {
        let mut terms = vec![self.term(&Token::Dot)?];
        while self.eat(&Token::Plus) {
            terms.push(self.term(&Token::Dot)?);
        }
        Ok(terms)
    }

    /// Parenthesised sums, juxtaposed or joined by `·`.
    fn pos_terms(&mut self) -> Result<Vec<Term>, AnalysisError> {
        let mut terms = Vec::new();
        loop {
            self.expect(&Token::Open)?;
            terms.push(self.term(&Token::Plus)?);
            self.expect(&Token::Close)?;
            if self.peek().is_none() {
                return Ok(terms);
            }
            self.eat(&Token::Dot);
        }
    }
}
