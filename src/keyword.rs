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
use crate::result::Result;
use sexp::Sexp;
use std::fmt::{self, Display};

/// Represents a keyword in an S-expression configuration.
///
/// Keywords begin with a colon.  The colon is dropped and the name is
/// kept in upper case, so `:log-faults` and `:LOG-FAULTS` name the
/// same configuration key.
///
/// # Examples
///
/// ```rust,ignore
/// use crate::keyword::Keyword;
///
/// let keyword = Keyword::new("APP-ID");
/// assert_eq!(keyword.name(), "APP-ID");
/// assert_eq!(keyword.to_string(), ":APP-ID");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Keyword(String);

impl Keyword {
    /// Creates a new `Keyword` with the specified name.  The name is
    /// taken as is; use upper case to match keywords read from a
    /// configuration file.
    pub(crate) fn new(name: &str) -> Self {
        Keyword(name.to_owned())
    }

    /// Converts an S-expression into a `Keyword`.
    ///
    /// The `sexp` must be a string atom starting with a colon.
    /// Anything else is a type error.
    pub(crate) fn from_sexp(sexp: &Sexp) -> Result<Self> {
        match sexp {
            Sexp::Atom(sexp::Atom::S(s)) => s
                .strip_prefix(':')
                .map(|name| Keyword(name.to_uppercase()))
                .ok_or_else(|| type_error("keyword")),
            _ => Err(type_error("keyword")),
        }
    }

    /// Returns the name of the keyword.
    pub(crate) fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_names_are_upper_cased() {
        let keyword = Keyword::from_sexp(&Sexp::Atom(sexp::Atom::S(":log-faults".to_owned()))).unwrap();
        assert_eq!(keyword, Keyword::new("LOG-FAULTS"));
        assert_eq!(keyword.to_string(), ":LOG-FAULTS");
    }

    #[test]
    fn non_keywords_are_rejected() {
        assert!(Keyword::from_sexp(&Sexp::Atom(sexp::Atom::S("log-faults".to_owned()))).is_err());
        assert!(Keyword::from_sexp(&Sexp::Atom(sexp::Atom::I(1))).is_err());
        assert!(Keyword::from_sexp(&Sexp::List(vec![])).is_err());
    }
}
