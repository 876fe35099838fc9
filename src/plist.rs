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

use crate::error::config_format_error;
use crate::expression::Expression;
use crate::keyword::Keyword;
use crate::result::Result;
use sexp::Sexp;
use std::collections::HashMap;

/// Represents an indicator in a plist.
pub(crate) type Indicator = Keyword;

/// Represents a value in a plist.
pub(crate) type Value = Expression;

/// Represents a Lisp property list where every indicator is a
/// keyword.
///
/// A `KeywordPlist` holds indicator-value pairs in the order they
/// appear in the source.  Lookups are linear; convert it with
/// [`into_hash_map`](KeywordPlist::into_hash_map) for repeated
/// access.  When an indicator repeats, the last value wins.
pub(crate) struct KeywordPlist(Vec<(Indicator, Value)>);

impl KeywordPlist {
    /// Creates a `KeywordPlist` from an S-expression list.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use crate::plist::KeywordPlist;
    ///
    /// let sexp = sexp::parse("(:app-id \"SAFECALL\" :log-faults t)").unwrap();
    /// let plist = KeywordPlist::from_sexp(sexp).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a config format error if:
    ///
    /// - The S-expression is not a list.
    /// - The list has an odd number of items, indicating a
    ///   mismatched indicator-value pair.
    /// - An indicator is not a keyword.
    pub(crate) fn from_sexp(sexp: Sexp) -> Result<Self> {
        match sexp {
            Sexp::List(vec) => Self::from_vec(vec),
            Sexp::Atom(_) => Err(config_format_error("unexpected configuration format")),
        }
    }

    fn from_vec(vec: Vec<Sexp>) -> Result<Self> {
        if vec.len() % 2 != 0 {
            return Err(config_format_error("odd number of items"));
        }
        let mut pairs = Vec::with_capacity(vec.len() / 2);
        let mut items = vec.into_iter();
        while let (Some(indicator), Some(value)) = (items.next(), items.next()) {
            let indicator = Indicator::from_sexp(&indicator)
                .map_err(|_| config_format_error("indicator is not a keyword"))?;
            pairs.push((indicator, Value::from_sexp(value)));
        }
        Ok(KeywordPlist(pairs))
    }

    pub(crate) fn into_hash_map(self) -> HashMap<Indicator, Value> {
        self.0.into_iter().collect()
    }
}
