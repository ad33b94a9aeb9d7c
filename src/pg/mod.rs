// Pipeline graph (PG) intermediate representation
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

//! Pipeline graph.
//!
//! The pipeline graph (PG) represents a processing pipeline as a directed
//!   [graph][] of _objects_:
//!     elements,
//!     containers (bins),
//!     inline caps filters,
//!     and pads.
//! Ownership edges form a tree
//!   (a bin owns its children,
//!     an element owns its pads),
//!   while link edges may relate pads anywhere in the arena;
//!     this mirrors the shape of the data the surrounding application
//!     edits interactively.
//!
//! [graph]: https://en.wikipedia.org/wiki/Graph_(discrete_mathematics)
//!
//! The graph is held entirely by the caller.
//! Objects are never deleted,
//!   so an [`ObjectIndex`] remains valid for the lifetime of the graph
//!   that produced it.
//!
//! Serialization of a graph into its textual description is provided by
//!   [`graph::launch`];
//!     see that module for the output grammar and its elision rules.

mod error;
pub mod graph;

pub use error::PgError;
pub use graph::{
    object::{
        bin::{Bin, BinKind},
        elem::Elem,
        filter::Filter,
        pad::{Dir, Pad, PadTy, Presence},
        prop::{Access, CapsSpec, Prop, Value},
        Object, ObjectIndex, ObjectKind, ObjectTy,
    },
    Pg, PgResult,
};
