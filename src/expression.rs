/*
 * Safecall: Recovers from panics and turns them into ordinary errors.
 * Copyright (C) 2022-2023  Hee Shin
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use crate::error::type_error;
use crate::keyword::Keyword;
use crate::result::Result;
use sexp::Sexp;
use std::fmt::{self, Display};

/// Represents an atomic value in an S-expression configuration file.
///
/// Bare symbols such as `t` and `nil` are read as `Symbol`; quoted
/// strings are read as `String`.  The sexp crate does not tell the two
/// apart, so both end up here as the same string atom, and the
/// accessors on [`Expression`] decide how to interpret them.
#[derive(Debug)]
pub(crate) enum Atom {
    /// Represents a string or symbol in the configuration file.
    String(String),
    /// Represents an integer value in the configuration file.
    Int(i64),
    /// Represents a float value in the configuration file.
    Float(f64),
    /// Represents a keyword value in the configuration file.
    Keyword(Keyword),
}

/// Represents an expression in an S-expression configuration file.
///
/// An expression is either an atomic value or a list of expressions.
#[derive(Debug)]
pub(crate) enum Expression {
    /// Represents an atomic value within an expression.
    Atom(Atom),
    /// Represents a list of expressions within an expression.
    List(Vec<Expression>),
}

impl Expression {
    /// Translates an S-expression object from the sexp crate into the
    /// crate's internal representation, recognising keywords on the
    /// way.
    pub(crate) fn from_sexp(sexp: Sexp) -> Self {
        match sexp {
            Sexp::Atom(atom) => Expression::Atom(Self::from_atom(atom)),
            Sexp::List(list) => Expression::List(list.into_iter().map(Self::from_sexp).collect()),
        }
    }

    /// Asserts the given expression to be a boolean, and returns it
    /// if it really is.  `t` is true and `nil` or the empty list is
    /// false.  Otherwise returns a type error.
    pub(crate) fn boolean(&self) -> Result<bool> {
        match self {
            Expression::Atom(Atom::String(s)) if s.eq_ignore_ascii_case("t") => Ok(true),
            Expression::Atom(Atom::String(s)) if s.eq_ignore_ascii_case("nil") => Ok(false),
            Expression::List(list) if list.is_empty() => Ok(false),
            _ => Err(type_error("boolean")),
        }
    }

    /// Asserts the given expression to be a string, and returns the
    /// string if it really is.  Otherwise returns a type error.
    pub(crate) fn string(&self) -> Result<&str> {
        if let Expression::Atom(Atom::String(string)) = self {
            Ok(string)
        } else {
            Err(type_error("string"))
        }
    }

    fn from_atom(atom: sexp::Atom) -> Atom {
        match atom {
            sexp::Atom::I(i) => Atom::Int(i),
            sexp::Atom::F(f) => Atom::Float(f),
            sexp::Atom::S(s) => match s.strip_prefix(':') {
                Some(name) => Atom::Keyword(Keyword::new(&name.to_uppercase())),
                None => Atom::String(s),
            },
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Atom(Atom::String(s)) => write!(f, "{}", s),
            Expression::Atom(Atom::Int(i)) => write!(f, "{}", i),
            Expression::Atom(Atom::Float(x)) => write!(f, "{}", x),
            Expression::Atom(Atom::Keyword(keyword)) => keyword.fmt(f),
            Expression::List(list) => {
                write!(f, "(")?;
                for (i, expr) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    expr.fmt(f)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Expression {
        Expression::from_sexp(sexp::parse(text).unwrap())
    }

    #[test]
    fn booleans_follow_lisp_conventions() {
        assert!(parse("t").boolean().unwrap());
        assert!(!parse("nil").boolean().unwrap());
        assert!(!parse("()").boolean().unwrap());
        assert!(parse("42").boolean().is_err());
    }

    #[test]
    fn keywords_are_not_strings() {
        assert!(parse(":app-id").string().is_err());
        assert_eq!(parse("\"SAFECALL\"").string().unwrap(), "SAFECALL");
    }

    #[test]
    fn numbers_are_not_booleans_or_strings() {
        assert!(matches!(parse("42"), Expression::Atom(Atom::Int(42))));
        assert!(matches!(parse("1.5"), Expression::Atom(Atom::Float(_))));
        assert!(parse("1.5").string().is_err());
    }

    #[test]
    fn expressions_display_as_written() {
        assert_eq!(parse("(:app-id 42 (t nil))").to_string(), "(:APP-ID 42 (t nil))");
    }
}
