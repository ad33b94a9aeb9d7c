// Pipeline-graph description serializer (Plumb)
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

//! Serialization of pipeline processing graphs into a compact launch-style
//!   textual description.
//!
//! The graph itself is modeled by [`pg`]:
//!   an arena of elements, containers (bins), inline caps filters, and
//!   pads,
//!     related by ownership, link, and template edges.
//! The textual form is modeled by [`lir`]:
//!   a token stream and a writer that renders it with exactly one space
//!   between adjacent tokens.
//! The lowering from graph to tokens lives with the graph in
//!   [`pg::graph::launch`].
//!
//! The serializer is a single synchronous pass holding only a shared
//!   reference to the graph;
//!     it never mutates or takes ownership of any object.
//! Reading a description back into a graph is the concern of the canonical
//!   parser for the target grammar and is deliberately not implemented
//!   here.

pub mod global;

#[macro_use]
extern crate static_assertions;

pub mod lir;
pub mod pg;
