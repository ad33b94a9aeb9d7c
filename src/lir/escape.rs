// LIR lexical quoting
//
//  Copyright (C) 2014-2023 Ryan Specialty, LLC.
//
//  This file is part of Plumb.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Quoting of tokens for the target grammar's lexer.
//!
//! The launch grammar is whitespace-delimited,
//!   so the only characters requiring protection are the space
//!     (which would split the token)
//!   and,
//!     within a quoted token,
//!     the quote character itself.
//! This rule is bespoke to the target grammar:
//!   it is _not_ shell quoting and it is _not_ a generic string escape,
//!     both of which protect character classes that the target lexer
//!     treats literally and would consequently corrupt.
//!
//! Quoting is avoided whenever it is safe to do so,
//!   keeping the common case compact and human-scannable;
//!     [`quote`] returns [`Cow::Borrowed`] on that path so that the
//!     writer performs no allocation for it.
//!
//! This module is the only part of the system that produces quoted text;
//!   everything upstream of the writer deals solely in raw values,
//!     which prevents erroneous double-quoting.

use memchr::memchr;
use std::borrow::Cow;

/// The quote character of the target grammar.
const QUOTE: char = '"';

/// Quote `value` if the target grammar's lexer would otherwise fail to
///   read it back as a single token.
///
/// A value containing no space is returned unchanged.
/// Otherwise the value is wrapped in [`QUOTE`] and every interior
///   occurrence of [`QUOTE`] is preceded by a backslash.
pub fn quote(value: &str) -> Cow<str> {
    match memchr(b' ', value.as_bytes()) {
        None => Cow::Borrowed(value),
        Some(_) => {
            let mut quoted = String::with_capacity(value.len() + 2);

            quoted.push(QUOTE);

            for ch in value.chars() {
                if ch == QUOTE {
                    quoted.push('\\');
                }

                quoted.push(ch);
            }

            quoted.push(QUOTE);

            Cow::Owned(quoted)
        }
    }
}
