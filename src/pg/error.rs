// Pipeline graph errors
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

//! Errors resulting from operations on the pipeline graph.
//!
//! These arise only during graph _construction_.
//! Serialization never produces them:
//!   it treats the graph as read-only and degrades gracefully on any
//!   malformed data that construction could not have prevented.

use std::{
    error::Error,
    fmt::{self, Display},
};

/// An error from a pipeline graph operation.
#[derive(Debug, PartialEq, Eq)]
pub enum PgError {
    /// An attempt was made to link two pads whose directions cannot form
    ///   a link
    ///     (source role to sink role).
    ///
    /// Relay (ghost) pads are exempt:
    ///   a source-direction ghost acts as a sink on its interior side and
    ///   vice versa.
    MismatchedLink(String, String),

    /// The pad is already participating in a link on the requested side.
    AlreadyLinked(String),

    /// The object already has a parent and cannot be adopted again.
    AlreadyParented(String),

    /// The pad named as a template is not a template pad.
    NotATemplate(String),
}

impl Display for PgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use PgError::*;

        match self {
            MismatchedLink(src, sink) => write!(
                f,
                "cannot link pad `{src}` to pad `{sink}`: \
                   incompatible directions"
            ),
            AlreadyLinked(pad) => {
                write!(f, "pad `{pad}` is already linked")
            }
            AlreadyParented(name) => {
                write!(f, "object `{name}` already has a parent")
            }
            NotATemplate(pad) => {
                write!(f, "pad `{pad}` is not a template pad")
            }
        }
    }
}

impl Error for PgError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}
