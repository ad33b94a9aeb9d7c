// Launch-text intermediate representation (LIR)
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

//! Intermediate representation of the launch-style textual description.
//!
//! LIR is a stream of [`Tok`]ens,
//!   each of which renders as a single whitespace-delimited word of the
//!   output grammar:
//!
//! ```text
//!   node      := factory attr* link*
//!   container := ["typequalifier "] "(" attr* child* ")"
//!   link      := [name "."] [padname]
//!                  "!" [filterspec [":" filterspec]* "!"]
//!                [name "."] [padname]
//! ```
//!
//! Tokens carry _raw_ values;
//!   quoting is applied by [`writer`] at render time using [`escape`],
//!     which is the only part of the system that deals in quoted text.
//! This prevents double-quoting by construction,
//!   for the same reason that the reference XML writer confines escaping
//!   to a single module.
//!
//! LIR does not know about the graph;
//!   it is produced by [`crate::pg::graph::launch`] and consumed by
//!   [`writer`].

use std::fmt::{self, Display};

pub mod escape;
pub mod writer;

/// A single token of the launch-style description.
///
/// With the exception of [`Tok::PadRef`] with no parts,
///   every token renders as exactly one word of output,
///     separated from its neighbors by a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tok {
    /// Factory identity of an element (`videotestsrc`).
    Factory(String),

    /// Container type qualifier,
    ///   rendered with a trailing `.` (`bin.`).
    ///
    /// Only containers of a non-default kind
    ///   (or any kind under sufficient verbosity)
    ///   receive a qualifier.
    Qualifier(String),

    /// Opening delimiter of a container body.
    BinOpen,

    /// Closing delimiter of a container body.
    BinClose,

    /// An attribute as `name=value`.
    ///
    /// The value is raw;
    ///   the writer quotes it if and only if the target grammar's lexer
    ///   requires it.
    Attr(String, String),

    /// Link connector (`!`).
    Connect,

    /// Caps filter specs folded into a link,
    ///   in traversal order.
    ///
    /// Multiple chained specs collapse into a single `:`-separated word
    ///   between exactly two [`Tok::Connect`]s.
    FilterList(Vec<String>),

    /// Reference to one endpoint of a link:
    ///   optional owner name (with trailing `.`) and optional pad name.
    ///
    /// Both parts may be elided,
    ///   in which case the token renders as nothing at all
    ///     (not even a space).
    PadRef {
        owner: Option<String>,
        pad: Option<String>,
    },
}

impl Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Factory(name) => write!(f, "factory `{name}`"),
            Self::Qualifier(name) => write!(f, "type qualifier `{name}.`"),
            Self::BinOpen => write!(f, "container opening delimiter"),
            Self::BinClose => write!(f, "container closing delimiter"),
            Self::Attr(name, _) => write!(f, "attribute `{name}`"),
            Self::Connect => write!(f, "link connector"),
            Self::FilterList(specs) => {
                write!(f, "filter list of {} spec(s)", specs.len())
            }
            Self::PadRef { owner, pad } => write!(
                f,
                "pad reference `{}.{}`",
                owner.as_deref().unwrap_or(""),
                pad.as_deref().unwrap_or(""),
            ),
        }
    }
}
