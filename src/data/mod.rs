//! The AST for the notation.
//!
//! This module provides the value tree produced by the reader, its
//! structural equality, and its canonical printed form.
//! For each type, the Display implementation renders the node as a short
//! tagged form (e.g. `A(Integer(5))`, `L( ... )`) used for diagnostics
//! and test comparison. It is not a source re-serializer: strings are not
//! re-escaped on output.
//!
//! Every composite node exclusively owns its children; the whole tree
//! lives as long as the owning [`File`].

/// A numeric value: an integer after base decoding, a float, or a
/// rational as a (numerator, denominator) pair.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Rational(i64, i64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "Integer({})", i),
            Number::Float(d) => write!(f, "Float({})", d),
            Number::Rational(n, d) => write!(f, "Rational({}/{})", n, d),
        }
    }
}

/// A leaf value: number, character, boolean, string, identifier, or symbol.
///
/// A symbol is a quote-prefixed identifier with the quote already
/// stripped; a string holds the text between the quotes with escape
/// sequences already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Number(Number),
    Char(u8),
    Bool(bool),
    String(String),
    Ident(String),
    Symbol(String),
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A(")?;
        match self {
            Atom::Number(n) => write!(f, "{}", n)?,
            Atom::Char(c) => write!(f, "Char({})", *c as char)?,
            Atom::Bool(b) => write!(f, "Bool({})", b)?,
            Atom::String(s) => write!(f, "String({})", s)?,
            Atom::Ident(s) => write!(f, "Ident({})", s)?,
            Atom::Symbol(s) => write!(f, "Symbol('{})", s)?,
        }
        write!(f, ")")
    }
}

/// An atom or a list: the unit a list contains and a file is a sequence of.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Atom(Atom),
    List(List),
}

impl From<Atom> for Value {
    fn from(value: Atom) -> Self {
        Value::Atom(value)
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Value::List(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Atom(a) => write!(f, "V({})", a),
            Value::List(l) => write!(f, "V({})", l),
        }
    }
}

/// An ordered sequence of values.
///
/// `is_cons` records whether the list was introduced by the quote-paren
/// token `'(` rather than a plain `(`. Equality is structural and
/// order-sensitive, and distinguishes the two spellings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
    pub items: Vec<Value>,
    pub is_cons: bool,
}

impl std::fmt::Display for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_cons {
            write!(f, "L'( ")?;
        } else {
            write!(f, "L( ")?;
        }
        for item in &self.items {
            write!(f, "{} ", item)?;
        }
        write!(f, ")")
    }
}

/// The top-level parse result: the expressions of one input, in order.
///
/// Files are not compared for equality; their expressions are.
#[derive(Debug, Clone, Default)]
pub struct File {
    pub exprs: Vec<Value>,
}

impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "File(")?;
        for expr in &self.exprs {
            write!(f, "{}", expr)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(s: &str) -> Value {
        Atom::Ident(s.to_owned()).into()
    }

    #[test]
    fn equality_is_structural() {
        let a = List {
            items: vec![ident("a"), ident("b")],
            is_cons: false,
        };
        let b = List {
            items: vec![ident("a"), ident("b")],
            is_cons: false,
        };
        assert_eq!(a, b);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab = List {
            items: vec![ident("a"), ident("b")],
            is_cons: false,
        };
        let ba = List {
            items: vec![ident("b"), ident("a")],
            is_cons: false,
        };
        assert_ne!(ab, ba);
    }

    #[test]
    fn rationals_compare_by_field() {
        // Both fields participate; distinct rationals are not equal.
        assert_eq!(Number::Rational(1, 2), Number::Rational(1, 2));
        assert_ne!(Number::Rational(1, 2), Number::Rational(1, 3));
        assert_ne!(Number::Rational(1, 2), Number::Rational(2, 2));
    }

    #[test]
    fn numbers_compare_by_kind() {
        assert_ne!(Number::Integer(1), Number::Float(1.0));
        assert_ne!(Number::Integer(1), Number::Rational(1, 1));
    }

    #[test]
    fn cons_lists_are_distinct() {
        let plain = List {
            items: vec![ident("a")],
            is_cons: false,
        };
        let cons = List {
            items: vec![ident("a")],
            is_cons: true,
        };
        assert_ne!(plain, cons);
    }

    #[test]
    fn canonical_forms() {
        for (got, want) in [
            (format!("{}", Number::Integer(5)), "Integer(5)"),
            (format!("{}", Number::Float(3.14)), "Float(3.14)"),
            (format!("{}", Number::Rational(1, 2)), "Rational(1/2)"),
            (format!("{}", Atom::Char(b'c')), "A(Char(c))"),
            (format!("{}", Atom::Bool(true)), "A(Bool(true))"),
            (
                format!("{}", Atom::Symbol("foo".to_owned())),
                "A(Symbol('foo))",
            ),
            (format!("{}", ident("x")), "V(A(Ident(x)))"),
        ] {
            assert_eq!(got, want);
        }
    }

    #[test]
    fn list_form_wraps_elements() {
        let l = List {
            items: vec![ident("a"), ident("b")],
            is_cons: false,
        };
        assert_eq!(format!("{}", l), "L( V(A(Ident(a))) V(A(Ident(b))) )");
        let c = List {
            items: vec![ident("a")],
            is_cons: true,
        };
        assert_eq!(format!("{}", c), "L'( V(A(Ident(a))) )");
    }

    #[test]
    fn file_form_concatenates() {
        let f = File {
            exprs: vec![ident("a"), ident("b")],
        };
        assert_eq!(format!("{}", f), "File(V(A(Ident(a)))V(A(Ident(b))))");
    }
}
