// Link target resolution
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

//! Resolution of a pad's _real_ peer.
//!
//! A pad's immediate peer is frequently not the endpoint that a textual
//!   description should reference:
//!
//!   - Relay (ghost) pads of default-kind containers exist purely to
//!       carry a link across the container boundary.
//!     They are transparent:
//!       the walk replaces one with the pad on its far side and
//!       continues.
//!     Relay pads of specialized containers are _not_ unwrapped,
//!       since such containers manage their own boundary pads;
//!         they are instead addressed by name like any terminal
//!         endpoint.
//!   - Inline caps filters contribute their spec to the link syntax
//!       rather than appearing as nodes,
//!         so the walk threads through them,
//!         collecting each spec encountered
//!           (dropping wildcard/empty specs,
//!             which carry no information).
//!
//! The walk is iterative and bounded by the relay and filter hops
//!   actually present on the graph;
//!     it maintains no visited set.
//! A malformed _cyclic_ relay chain would therefore not terminate;
//!   preventing such graphs is the caller's responsibility,
//!     as ownership edges cannot express them and link edges are
//!     validated pairwise at construction.
//!
//! Malformed but acyclic data
//!   (a missing peer, a filter with no outgoing link)
//!   degrades to "no resolvable peer",
//!     which the link emitter treats as an unlinked pad and omits.

use super::{
    object::{CapsSpec, Dir, Object, ObjectIndex, Pad},
    Pg,
};

/// Outcome of resolving a pad's real peer.
#[derive(Debug, PartialEq)]
pub struct LinkTarget {
    /// The resolved endpoint,
    ///   or [`None`] if the walk ended without finding one.
    pub pad: Option<ObjectIndex<Pad>>,

    /// Filter specs collected along the way,
    ///   in traversal order.
    ///
    /// May be non-empty even when no endpoint was resolved;
    ///   such specs are discarded along with the link.
    pub filters: Vec<CapsSpec>,
}

/// Resolve the real peer of `from`,
///   skipping transparent relay pads and,
///   when `fold_filters` is set,
///   threading through inline caps filters.
///
/// The walk proceeds in the direction of dataflow implied by `from`:
///   downstream from a source pad,
///   upstream from a sink pad.
pub fn resolve(
    pg: &Pg,
    from: ObjectIndex<Pad>,
    fold_filters: bool,
) -> LinkTarget {
    let orient = pg.expect_obj(from).dir();

    let mut filters = Vec::new();
    let mut peer = pg.peer_toward(from, orient);

    while let Some(p) = peer {
        let owner = pg.parent_of(p);

        if pg.expect_obj(p).is_ghost() {
            match owner.map(|oi| pg.expect_obj::<Object>(oi)) {
                // Relay pads of the default container kind are
                //   transparent.
                Some(Object::Bin(bin)) if bin.kind().is_plain() => {
                    peer = pg.peer_toward(p, orient);
                    continue;
                }

                // Specialized containers manage their own boundary pads;
                //   the relay itself is the endpoint to reference.
                _ => break,
            }
        }

        if let (true, Some(owner_oi)) = (fold_filters, owner) {
            if let Object::Filter(filter) = pg.expect_obj::<Object>(owner_oi)
            {
                if !filter.spec().is_trivial() {
                    filters.push(filter.spec().clone());
                }

                peer = far_pad_of_filter(pg, owner_oi, orient)
                    .and_then(|far| pg.peer_toward(far, orient));
                continue;
            }
        }

        break;
    }

    LinkTarget { pad: peer, filters }
}

/// The pad by which the walk leaves a filter:
///   its source pad when walking downstream,
///   its sink pad when walking upstream.
///
/// A malformed filter missing that pad yields [`None`],
///   ending the walk without a resolved peer.
fn far_pad_of_filter(
    pg: &Pg,
    filter: ObjectIndex<Object>,
    orient: Dir,
) -> Option<ObjectIndex<Pad>> {
    pg.pads_of(filter)
        .into_iter()
        .find(|&oi| pg.expect_obj(oi).dir() == orient)
}

#[cfg(test)]
mod test;
