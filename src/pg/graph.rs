// Graph abstraction for pipeline objects
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

//! Arena graph of pipeline objects.

use self::object::{
    Bin, BinChild, Dir, Object, ObjectIndex, ObjectKind, Pad, PadOwner,
};
use super::error::PgError;
use crate::global;
use fxhash::FxHashMap;
use petgraph::{
    graph::{DiGraph, Graph, NodeIndex},
    visit::EdgeRef,
    Direction,
};
use std::{fmt::Debug, result::Result};

pub mod launch;
pub mod object;
pub mod resolve;

/// A [`Result`] with a hard-coded [`PgError`] error type.
///
/// This is the result of every [`Pg`] operation that could potentially
///   fail in error.
pub type PgResult<T> = Result<T, PgError>;

/// The relationship an edge represents.
///
/// Edges carry their relationship kind so that ownership,
///   link,
///   and template relations can coexist on one graph and be filtered
///   bidirectionally without a second layer of indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rel {
    /// Parent container → child object.
    Child,

    /// Owning element-like object → pad.
    Pad,

    /// Source-role pad → sink-role pad.
    ///
    /// A relay (ghost) pad participates in one link per side of its
    ///   boundary:
    ///     as the sink role toward whatever feeds it and as the source
    ///     role toward whatever it feeds.
    Link,

    /// Concrete pad → the template that backs it.
    Tpl,
}

/// Each edge of the graph.
type PgEdge = Rel;

/// Each node of the graph.
type Node = Object;

/// Index size for graph nodes and edges.
type Ix = global::PipeObjSize;

/// A pipeline graph of [objects](object).
///
/// This implementation is currently based on [`petgraph`].
///
/// Objects are never deleted from the graph,
///   so [`ObjectIndex`]s will remain valid for the lifetime of the
///   graph.
///
/// The graph holds no locks and no interior mutability;
///   a serialization pass borrows it immutably and it is the caller's
///   responsibility not to mutate a graph shared across threads during
///   such a pass.
pub struct Pg {
    /// Directed graph on which objects are stored.
    graph: DiGraph<Node, PgEdge, Ix>,

    /// Child lookup by `(parent, name)`.
    ///
    /// Sibling names are assumed unique
    ///   (a precondition of the data model,
    ///     not something this graph enforces);
    ///   on violation the most recently added child wins.
    index: FxHashMap<(NodeIndex<Ix>, String), NodeIndex<Ix>>,
}

impl Default for Pg {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Pg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Rendering the graph itself produces far too much output to be
        //   useful even for modestly sized tests;
        //     provide a simple summary instead.
        write!(
            f,
            "[Pg: {} objects, {} edges]",
            self.object_count(),
            self.graph.edge_count(),
        )
    }
}

impl Pg {
    /// Create a new, empty pipeline graph.
    ///
    /// See also [`with_capacity`](Pg::with_capacity).
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Create a pipeline graph with the provided initial capacity.
    ///
    /// The value for `objects` will be used as the capacity for the nodes
    ///   in the graph,
    ///     as well as the initial index capacity.
    pub fn with_capacity(objects: usize, edges: usize) -> Self {
        Self {
            graph: Graph::with_capacity(objects, edges),
            index: FxHashMap::with_capacity_and_hasher(
                objects,
                Default::default(),
            ),
        }
    }

    /// Number of [`Object`]s on the graph.
    pub fn object_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Create a new object on the graph.
    ///
    /// The object is initially parentless;
    ///   see [`add_child`](Pg::add_child) and [`add_pad`](Pg::add_pad)
    ///   for establishing ownership.
    pub fn create<O: ObjectKind>(&mut self, obj: O) -> ObjectIndex<O>
    where
        Object: Into<O> + AsRef<O>,
    {
        ObjectIndex::new(self.graph.add_node(obj.into()))
    }

    /// Retrieve an object from the graph by [`ObjectIndex`].
    ///
    /// Since an [`ObjectIndex`] should only be produced by a [`Pg`],
    ///   and since objects are never deleted from the graph,
    ///   this should never fail so long as indices are not shared between
    ///   multiple graphs.
    /// It is nevertheless wrapped in an [`Option`] just in case.
    #[inline]
    pub fn get<O: ObjectKind>(&self, index: ObjectIndex<O>) -> Option<&O>
    where
        Object: Into<O> + AsRef<O>,
    {
        self.graph.node_weight(index.into()).map(AsRef::as_ref)
    }

    /// Retrieve an object expected to be present,
    ///   panicing otherwise.
    ///
    /// A missing object means that an [`ObjectIndex`] was malformed or
    ///   produced by a different graph,
    ///     both of which are internal errors that cannot be meaningfully
    ///     recovered from.
    pub(super) fn expect_obj<O: ObjectKind>(
        &self,
        index: ObjectIndex<O>,
    ) -> &O
    where
        Object: Into<O> + AsRef<O>,
    {
        self.get(index)
            .expect("invalid ObjectIndex: data are missing from the graph")
    }

    /// Adopt `child` into `parent`,
    ///   appending it to the end of the parent's child sequence.
    ///
    /// Child order is insertion order and is preserved in serialized
    ///   output.
    pub fn add_child<O: BinChild>(
        &mut self,
        parent: ObjectIndex<Bin>,
        child: ObjectIndex<O>,
    ) -> PgResult<()>
    where
        Object: Into<O> + AsRef<O>,
    {
        if self.parent_of(child).is_some() {
            return Err(PgError::AlreadyParented(
                self.expect_obj::<Object>(child.widen()).name().into(),
            ));
        }

        self.graph.add_edge(parent.into(), child.into(), Rel::Child);

        let name = self.expect_obj::<Object>(child.widen()).name().to_string();
        self.index.insert((parent.into(), name), child.into());

        Ok(())
    }

    /// Create `pad` on the graph owned by `owner`,
    ///   appending it to the end of the owner's pad sequence.
    pub fn add_pad<O: PadOwner>(
        &mut self,
        owner: ObjectIndex<O>,
        pad: Pad,
    ) -> ObjectIndex<Pad>
    where
        Object: Into<O> + AsRef<O>,
    {
        let name = pad.name().to_string();
        let oi = self.create::<Pad>(pad);

        self.graph.add_edge(owner.into(), oi.into(), Rel::Pad);
        self.index.insert((owner.into(), name), oi.into());

        oi
    }

    /// Link `src` to `sink`.
    ///
    /// `src` must be of source direction and `sink` of sink direction,
    ///   except that relay (ghost) pads are exempt from the check on the
    ///   side facing into their container.
    /// Template pads cannot be linked.
    /// Each side of a pad supports at most one link.
    pub fn link(
        &mut self,
        src: ObjectIndex<Pad>,
        sink: ObjectIndex<Pad>,
    ) -> PgResult<()> {
        let (src_name, src_ok) = {
            let pad = self.expect_obj(src);
            (
                pad.name().to_string(),
                pad.is_ghost() || pad.dir() == Dir::Src && !pad.is_template(),
            )
        };
        let (sink_name, sink_ok) = {
            let pad = self.expect_obj(sink);
            (
                pad.name().to_string(),
                pad.is_ghost() || pad.dir() == Dir::Sink && !pad.is_template(),
            )
        };

        if !src_ok || !sink_ok {
            return Err(PgError::MismatchedLink(src_name, sink_name));
        }

        if self.linked_to(src).is_some() {
            return Err(PgError::AlreadyLinked(src_name));
        }

        if self.linked_from(sink).is_some() {
            return Err(PgError::AlreadyLinked(sink_name));
        }

        self.graph.add_edge(src.into(), sink.into(), Rel::Link);

        Ok(())
    }

    /// Declare `tpl` as the template backing `pad`.
    ///
    /// A pad has at most one meaningful template;
    ///   if assigned more than once,
    ///     the most recent assignment wins.
    pub fn set_template(
        &mut self,
        pad: ObjectIndex<Pad>,
        tpl: ObjectIndex<Pad>,
    ) -> PgResult<()> {
        if !self.expect_obj(tpl).is_template() {
            return Err(PgError::NotATemplate(
                self.expect_obj(tpl).name().into(),
            ));
        }

        self.graph.add_edge(pad.into(), tpl.into(), Rel::Tpl);

        Ok(())
    }

    /// The parent that owns `oi`,
    ///   or [`None`] if the object is unowned
    ///     (detached, or the root of its tree).
    ///
    /// For a pad this is the element-like object exposing it;
    ///   for anything else it is the parent container.
    pub fn parent_of<O: ObjectKind>(
        &self,
        oi: ObjectIndex<O>,
    ) -> Option<ObjectIndex<Object>>
    where
        Object: Into<O> + AsRef<O>,
    {
        self.graph
            .edges_directed(oi.into(), Direction::Incoming)
            .find(|edge| matches!(*edge.weight(), Rel::Child | Rel::Pad))
            .map(|edge| ObjectIndex::<Object>::new(edge.source()))
    }

    /// Children of `oi` in insertion order.
    ///
    /// Note that petgraph's edge iteration yields edges in the _reverse_
    ///   of the order in which they were added,
    ///     so the collected sequence must be reversed to recover
    ///     insertion order.
    pub fn children_of<O: ObjectKind>(
        &self,
        oi: ObjectIndex<O>,
    ) -> Vec<ObjectIndex<Object>>
    where
        Object: Into<O> + AsRef<O>,
    {
        let mut children: Vec<_> = self
            .graph
            .edges(oi.into())
            .filter(|edge| *edge.weight() == Rel::Child)
            .map(|edge| ObjectIndex::<Object>::new(edge.target()))
            .collect();

        children.reverse();
        children
    }

    /// Pads of `oi` in insertion order.
    ///
    /// See [`children_of`](Pg::children_of) regarding the reversal.
    pub fn pads_of<O: ObjectKind>(
        &self,
        oi: ObjectIndex<O>,
    ) -> Vec<ObjectIndex<Pad>>
    where
        Object: Into<O> + AsRef<O>,
    {
        let mut pads: Vec<_> = self
            .graph
            .edges(oi.into())
            .filter(|edge| *edge.weight() == Rel::Pad)
            .map(|edge| ObjectIndex::<Object>::new(edge.target()).retype::<Pad>())
            .collect();

        pads.reverse();
        pads
    }

    /// The pad that `pad` feeds,
    ///   if any.
    pub fn linked_to(&self, pad: ObjectIndex<Pad>) -> Option<ObjectIndex<Pad>> {
        self.graph
            .edges(pad.into())
            .find(|edge| *edge.weight() == Rel::Link)
            .map(|edge| ObjectIndex::<Object>::new(edge.target()).retype())
    }

    /// The pad that feeds `pad`,
    ///   if any.
    pub fn linked_from(
        &self,
        pad: ObjectIndex<Pad>,
    ) -> Option<ObjectIndex<Pad>> {
        self.graph
            .edges_directed(pad.into(), Direction::Incoming)
            .find(|edge| *edge.weight() == Rel::Link)
            .map(|edge| ObjectIndex::<Object>::new(edge.source()).retype())
    }

    /// The pad on the far side of `pad`'s link in the direction of
    ///   dataflow given by `orient`.
    ///
    /// Walking [`Dir::Src`] follows dataflow downstream;
    ///   walking [`Dir::Sink`] follows it upstream.
    /// Absence of a link on the queried side is not an error.
    pub fn peer_toward(
        &self,
        pad: ObjectIndex<Pad>,
        orient: Dir,
    ) -> Option<ObjectIndex<Pad>> {
        match orient {
            Dir::Src => self.linked_to(pad),
            Dir::Sink => self.linked_from(pad),
        }
    }

    /// The template backing `pad`,
    ///   if any.
    pub fn template_of(
        &self,
        pad: ObjectIndex<Pad>,
    ) -> Option<ObjectIndex<Pad>> {
        self.graph
            .edges(pad.into())
            .find(|edge| *edge.weight() == Rel::Tpl)
            .map(|edge| ObjectIndex::<Object>::new(edge.target()).retype())
    }

    /// Look up a child or pad of `parent` by name.
    pub fn child_by_name<O: ObjectKind>(
        &self,
        parent: ObjectIndex<O>,
        name: &str,
    ) -> Option<ObjectIndex<Object>>
    where
        Object: Into<O> + AsRef<O>,
    {
        self.index
            .get(&(parent.into(), name.to_string()))
            .map(|&ni| ObjectIndex::<Object>::new(ni))
    }
}

#[cfg(test)]
mod test;
