//! The fixed operator and function tables.

use crate::diff::sign;

/// Binary operators, by symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `//`, floored division.
    IntDiv,
    /// `%`, truncated remainder.
    Rem,
    /// `^`
    Pow,
}

/// Operator precedence classes, lowest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Additive,
    Multiplicative,
    Power,
}

impl Operator {
    /// Match an operator symbol at the start of `s`, returning it along with the symbol length.
    pub fn lex(s: &[u8]) -> Option<(Self, usize)> {
        use Operator::*;

        match s {
            [b'/', b'/', ..] => Some((IntDiv, 2)),
            [b'+', ..] => Some((Add, 1)),
            [b'-', ..] => Some((Sub, 1)),
            [b'*', ..] => Some((Mul, 1)),
            [b'/', ..] => Some((Div, 1)),
            [b'%', ..] => Some((Rem, 1)),
            [b'^', ..] => Some((Pow, 1)),
            _ => None,
        }
    }

    pub fn precedence(self) -> Precedence {
        use Operator::*;

        match self {
            Add | Sub => Precedence::Additive,
            Mul | Div | IntDiv | Rem => Precedence::Multiplicative,
            Pow => Precedence::Power,
        }
    }

    /// Whether a `pending` operator following this one has to be reduced first.
    ///
    /// Power always takes precedence, which makes `^` right associative.
    pub fn yields_to(self, pending: Operator) -> bool {
        pending.precedence() > self.precedence() || pending == Operator::Pow
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        use Operator::*;

        match self {
            Add => lhs + rhs,
            Sub => lhs - rhs,
            Mul => lhs * rhs,
            Div => lhs / rhs,
            IntDiv => (lhs / rhs).floor(),
            Rem => lhs % rhs,
            Pow => lhs.powf(rhs),
        }
    }
}

macro_rules! functions {
    ($($variant:ident => $name:literal, $apply:expr;)*) => {
        /// Unary functions callable as `name(expr)`.
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        pub enum Function {
            $($variant,)*
        }

        impl Function {
            /// Every function, in table order.
            pub const ALL: &'static [Function] = &[$(Function::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Function::$variant => $name,)*
                }
            }

            pub fn apply(self, x: f64) -> f64 {
                let f: fn(f64) -> f64 = match self {
                    $(Function::$variant => $apply,)*
                };
                f(x)
            }
        }
    };
}

functions! {
    Sin => "sin", f64::sin;
    Cos => "cos", f64::cos;
    Tan => "tan", f64::tan;
    Asin => "asin", f64::asin;
    Acos => "acos", f64::acos;
    Atan => "atan", f64::atan;
    Sinh => "sinh", f64::sinh;
    Cosh => "cosh", f64::cosh;
    Tanh => "tanh", f64::tanh;
    Asinh => "asinh", f64::asinh;
    Acosh => "acosh", f64::acosh;
    Atanh => "atanh", f64::atanh;
    Sqrt => "sqrt", f64::sqrt;
    Cbrt => "cbrt", f64::cbrt;
    Exp => "exp", f64::exp;
    Ln => "ln", f64::ln;
    Log => "log", f64::log10;
    Log2 => "log2", f64::log2;
    Log10 => "log10", f64::log10;
    Abs => "abs", f64::abs;
    Floor => "floor", f64::floor;
    Ceil => "ceil", f64::ceil;
    Round => "round", f64::round;
    Sign => "sign", sign;
}

impl Function {
    /// Look up a function by its exact (case sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexing_prefers_integer_division() {
        assert_eq!(Operator::lex(b"//2"), Some((Operator::IntDiv, 2)));
        assert_eq!(Operator::lex(b"/2"), Some((Operator::Div, 1)));
        assert_eq!(Operator::lex(b"^"), Some((Operator::Pow, 1)));
        assert_eq!(Operator::lex(b"x"), None);
        assert_eq!(Operator::lex(b""), None);
    }

    #[test]
    fn power_is_right_associative() {
        assert!(Operator::Pow.yields_to(Operator::Pow));
        assert!(Operator::Add.yields_to(Operator::Mul));
        assert!(Operator::Mul.yields_to(Operator::Pow));
        assert!(!Operator::Sub.yields_to(Operator::Sub));
        assert!(!Operator::Mul.yields_to(Operator::Add));
        assert!(!Operator::Div.yields_to(Operator::Rem));
    }

    #[test]
    fn operator_semantics() {
        assert_eq!(Operator::IntDiv.apply(7., 2.), 3.);
        assert_eq!(Operator::IntDiv.apply(-7., 2.), -4.);
        assert_eq!(Operator::Rem.apply(7., 3.), 1.);
        assert_eq!(Operator::Rem.apply(-7., 3.), -1.);
        assert_eq!(Operator::Pow.apply(2., 10.), 1024.);
    }

    #[test]
    fn function_lookup() {
        assert_eq!(Function::from_name("sin"), Some(Function::Sin));
        assert_eq!(Function::from_name("log10"), Some(Function::Log10));
        assert_eq!(Function::from_name("Sin"), None);
        assert_eq!(Function::from_name("sine"), None);

        for f in Function::ALL {
            assert_eq!(Function::from_name(f.name()), Some(*f));
        }
    }

    #[test]
    fn function_semantics() {
        assert!((Function::Log.apply(1000.) - 3.).abs() < 1e-12);
        assert_eq!(Function::Ln.apply(1.), 0.);
        assert_eq!(Function::Sign.apply(-4.), -1.);
        assert_eq!(Function::Abs.apply(-4.), 4.);
        assert!(Function::Sqrt.apply(-1.).is_nan());
    }
}
