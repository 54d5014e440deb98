//! Recursive descent over the cleaned formula text.
//!
//! The parser never builds a tree, values are folded as the text is scanned. Every grammar
//! rule takes a [`Cursor`] _by value_ and hands back the advanced copy on success, so a
//! failed alternative can never consume input: the caller simply retries with the cursor
//! it still holds.
//!
//! Grammar (whitespace already stripped):
//!
//! ```text
//! expression := binary | call | sign expression
//! binary     := operand (operator operand)*    -- followed by end of text or ')'
//! operand    := literal | 'x' | call | '(' expression ')'
//! call       := name '(' expression ')'
//! ```
//!
//! Operators fold by precedence, `+ -` < `* / // %` < `^`, equal precedence folds left to
//! right except `^` which always binds to its right. A sign only starts an expression, so
//! `2*-3` has to be written `2*(-3)`.

use super::table::{Function, Operator, Precedence};

/// The value substituted for the free variable and for every function application while
/// validating.
pub const DRY_RUN_VALUE: f64 = 1.;

/// The free variable symbol.
pub const VARIABLE: &str = "x";

/// What a parse pass is for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Check the grammar shape only, math functions are never invoked.
    Validate,
    /// Compute the value.
    Evaluate,
}

/// Why parsing stalled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StallKind {
    /// No rule could classify the text at this point.
    Unclassified,
    EndOfInput,
    ExpectedClose,
    UnknownFunction(String),
    Unrecognized(String),
}

/// The point at which parsing stalled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stall {
    pub pos: usize,
    pub kind: StallKind,
}

impl Stall {
    /// Keep whichever stall made the most progress.
    ///
    /// Ties favour `self`, unless `self` carries no specific reason.
    fn furthest(self, other: Stall) -> Stall {
        if other.pos > self.pos || (other.pos == self.pos && self.kind == StallKind::Unclassified)
        {
            other
        } else {
            self
        }
    }
}

pub type Parsed<'a> = Result<(f64, Cursor<'a>), Stall>;

/// A position in the formula text along with the active variable binding.
#[derive(Debug, Copy, Clone)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    arg: f64,
    mode: Mode,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str, arg: f64, mode: Mode) -> Self {
        Self {
            src,
            pos: 0,
            arg,
            mode,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// The token starting at the cursor, for error messages.
    pub fn token(&self) -> String {
        match self.identifier() {
            Some((name, _)) => name.to_string(),
            None => self.src[self.pos..]
                .chars()
                .next()
                .map(String::from)
                .unwrap_or_default(),
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.src.as_bytes()[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.rest().first().copied()
    }

    fn advance(mut self, n: usize) -> Self {
        self.pos += n;
        self
    }

    fn eat(self, byte: u8) -> Option<Self> {
        (self.peek() == Some(byte)).then(|| self.advance(1))
    }

    fn stall(&self, kind: StallKind) -> Stall {
        Stall {
            pos: self.pos,
            kind,
        }
    }

    /// A stall for when nothing at the cursor matched.
    fn nothing(&self) -> Stall {
        if self.at_end() {
            self.stall(StallKind::EndOfInput)
        } else {
            self.stall(StallKind::Unclassified)
        }
    }

    /// Parse a full expression.
    ///
    /// Alternatives are tried in order: a binary fold, a bare function call, then a unary
    /// signed expression. Only the binary fold insists on ending at the end of text or at a
    /// `)`, the other two may leave trailing text behind.
    ///
    /// The first operand is parsed once and shared. A call alternative at the same position
    /// can only repeat that operand's outcome, so it is never reparsed.
    pub fn expression(self) -> Parsed<'a> {
        let (lhs, after) = match self.operand() {
            Ok(x) => x,
            Err(operand) => {
                return match self.unary() {
                    Ok(x) => Ok(x),
                    Err(unary) => Err(operand.furthest(unary)),
                };
            }
        };

        match after.binary(lhs) {
            Ok(x) => Ok(x),
            Err(_) if self.is_call() => Ok((lhs, after)),
            Err(e) => Err(e),
        }
    }

    /// Whether the text at the cursor names a function rather than the variable.
    fn is_call(&self) -> bool {
        matches!(self.identifier(), Some((name, _)) if name != VARIABLE)
    }

    /// Fold the rest of a binary expression onto its first operand.
    fn binary(self, lhs: f64) -> Parsed<'a> {
        let (value, cur) = self.fold(lhs, Precedence::Additive)?;

        match cur.peek() {
            None | Some(b')') => Ok((value, cur)),
            Some(_) => Err(cur.stall(StallKind::Unrecognized(cur.token()))),
        }
    }

    /// Fold `lhs` with every following operator of at least `min` precedence.
    fn fold(self, mut lhs: f64, min: Precedence) -> Parsed<'a> {
        let mut cur = self;

        while let Some((op, after)) = cur.operator() {
            if op.precedence() < min {
                break;
            }

            let (mut rhs, mut next) = after.operand()?;

            while let Some((pending, _)) = next.operator() {
                if !op.yields_to(pending) {
                    break;
                }
                (rhs, next) = next.fold(rhs, pending.precedence())?;
            }

            lhs = op.apply(lhs, rhs);
            cur = next;
        }

        Ok((lhs, cur))
    }

    /// A sign followed by a whole expression, so `-x+1` is `-(x+1)`.
    fn unary(self) -> Parsed<'a> {
        let (negate, cur) = self.sign().ok_or_else(|| self.nothing())?;
        let (value, cur) = cur.expression()?;
        Ok((if negate { -value } else { value }, cur))
    }

    fn operand(self) -> Parsed<'a> {
        if let Some(x) = self.literal() {
            return Ok(x);
        }

        if let Some(x) = self.variable() {
            return Ok(x);
        }

        let call = match self.call() {
            Ok(x) => return Ok(x),
            Err(e) => e,
        };

        let group = match self.group() {
            Ok(x) => return Ok(x),
            Err(e) => e,
        };

        Err(call.furthest(group))
    }

    /// Greedy decimal literal: `digits [. digits] [(e|E) [+|-] digits]`.
    fn literal(self) -> Option<(f64, Self)> {
        let s = self.rest();
        let digits = |from: usize| s[from..].iter().take_while(|b| b.is_ascii_digit()).count();

        let int = digits(0);
        let mut len = int;
        let mut frac = 0;
        if s.get(len) == Some(&b'.') {
            frac = digits(len + 1);
            len += 1 + frac;
        }

        if int + frac == 0 {
            return None;
        }

        if matches!(s.get(len), Some(b'e' | b'E')) {
            let signed = matches!(s.get(len + 1), Some(b'+' | b'-'));
            let start = len + 1 + usize::from(signed);
            let exp = digits(start);
            if exp > 0 {
                len = start + exp;
            }
        }

        let value = self.src[self.pos..self.pos + len].parse::<f64>().ok()?;
        Some((value, self.advance(len)))
    }

    fn variable(self) -> Option<(f64, Self)> {
        match self.identifier() {
            Some((VARIABLE, cur)) => Some((self.arg, cur)),
            _ => None,
        }
    }

    fn call(self) -> Parsed<'a> {
        let (name, cur) = self.identifier().ok_or_else(|| self.nothing())?;
        let cur = cur
            .eat(b'(')
            .ok_or_else(|| self.stall(StallKind::Unrecognized(name.to_string())))?;
        let func = Function::from_name(name)
            .ok_or_else(|| self.stall(StallKind::UnknownFunction(name.to_string())))?;

        let (arg, cur) = cur.expression()?;
        let cur = cur
            .eat(b')')
            .ok_or_else(|| cur.stall(StallKind::ExpectedClose))?;

        let value = match self.mode {
            Mode::Validate => DRY_RUN_VALUE,
            Mode::Evaluate => func.apply(arg),
        };

        Ok((value, cur))
    }

    fn group(self) -> Parsed<'a> {
        let cur = self.eat(b'(').ok_or_else(|| self.nothing())?;
        let (value, cur) = cur.expression()?;
        let cur = cur
            .eat(b')')
            .ok_or_else(|| cur.stall(StallKind::ExpectedClose))?;
        Ok((value, cur))
    }

    fn identifier(self) -> Option<(&'a str, Self)> {
        let s = self.rest();
        match s.first() {
            Some(b) if b.is_ascii_alphabetic() || *b == b'_' => (),
            _ => return None,
        }

        let len = s
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();

        Some((&self.src[self.pos..self.pos + len], self.advance(len)))
    }

    fn operator(self) -> Option<(Operator, Self)> {
        Operator::lex(self.rest()).map(|(op, len)| (op, self.advance(len)))
    }

    /// A leading sign, `true` if negating.
    fn sign(self) -> Option<(bool, Self)> {
        match self.peek() {
            Some(b'+') => Some((false, self.advance(1))),
            Some(b'-') => Some((true, self.advance(1))),
            _ => None,
        }
    }
}
