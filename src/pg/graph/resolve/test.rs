// Tests for link target resolution
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

use super::*;
use crate::pg::{Bin, BinKind, Elem, Filter};

/// An element with one source and one sink pad.
fn linkable(
    pg: &mut Pg,
    name: &str,
) -> (ObjectIndex<Elem>, ObjectIndex<Pad>, ObjectIndex<Pad>) {
    let elem = pg.create(Elem::new(name, "identity"));
    let sink = pg.add_pad(elem, Pad::new("sink", Dir::Sink));
    let src = pg.add_pad(elem, Pad::new("src", Dir::Src));

    (elem, src, sink)
}

/// An inline filter with its sink and source pads.
fn inline_filter(
    pg: &mut Pg,
    name: &str,
    spec: CapsSpec,
) -> (ObjectIndex<Filter>, ObjectIndex<Pad>, ObjectIndex<Pad>) {
    let filter = pg.create(Filter::new(name, spec));
    let sink = pg.add_pad(filter, Pad::new("sink", Dir::Sink));
    let src = pg.add_pad(filter, Pad::new("src", Dir::Src));

    (filter, src, sink)
}

#[test]
fn resolves_direct_peer() {
    let mut pg = Pg::new();

    let (_, a_src, _) = linkable(&mut pg, "a");
    let (_, _, b_sink) = linkable(&mut pg, "b");

    pg.link(a_src, b_sink).unwrap();

    assert_eq!(
        LinkTarget {
            pad: Some(b_sink),
            filters: vec![],
        },
        resolve(&pg, a_src, true),
    );

    // And upstream from the sink side.
    assert_eq!(
        LinkTarget {
            pad: Some(a_src),
            filters: vec![],
        },
        resolve(&pg, b_sink, true),
    );
}

#[test]
fn unlinked_pad_resolves_to_none() {
    let mut pg = Pg::new();

    let (_, a_src, _) = linkable(&mut pg, "a");

    assert_eq!(
        LinkTarget {
            pad: None,
            filters: vec![],
        },
        resolve(&pg, a_src, true),
    );
}

#[test]
fn ghost_pad_of_plain_bin_is_transparent() {
    let mut pg = Pg::new();

    // a → [bin: ghostsink → b]
    let bin = pg.create(Bin::new("inner", BinKind::Plain));
    let (_, a_src, _) = linkable(&mut pg, "a");
    let (b, _, b_sink) = linkable(&mut pg, "b");
    pg.add_child(bin, b).unwrap();

    let ghost = pg.add_pad(bin, Pad::ghost("sink", Dir::Sink));

    pg.link(a_src, ghost).unwrap();
    pg.link(ghost, b_sink).unwrap();

    assert_eq!(Some(b_sink), resolve(&pg, a_src, true).pad);

    // The reverse walk crosses the boundary outward.
    assert_eq!(Some(a_src), resolve(&pg, b_sink, true).pad);
}

#[test]
fn ghost_pad_of_specialized_bin_is_terminal() {
    let mut pg = Pg::new();

    let bin = pg.create(Bin::new("play", BinKind::Custom("playbin".into())));
    let (_, a_src, _) = linkable(&mut pg, "a");
    let (b, _, b_sink) = linkable(&mut pg, "b");
    pg.add_child(bin, b).unwrap();

    let ghost = pg.add_pad(bin, Pad::ghost("sink", Dir::Sink));

    pg.link(a_src, ghost).unwrap();
    pg.link(ghost, b_sink).unwrap();

    // The relay itself is the endpoint to reference.
    assert_eq!(Some(ghost), resolve(&pg, a_src, true).pad);
}

#[test]
fn filter_folds_spec_into_walk() {
    let mut pg = Pg::new();

    let (_, a_src, _) = linkable(&mut pg, "a");
    let (_, f_src, f_sink) =
        inline_filter(&mut pg, "f", CapsSpec::spec("video/x-raw"));
    let (_, _, b_sink) = linkable(&mut pg, "b");

    pg.link(a_src, f_sink).unwrap();
    pg.link(f_src, b_sink).unwrap();

    assert_eq!(
        LinkTarget {
            pad: Some(b_sink),
            filters: vec![CapsSpec::spec("video/x-raw")],
        },
        resolve(&pg, a_src, true),
    );
}

#[test]
fn trivial_filter_specs_are_dropped() {
    let mut pg = Pg::new();

    let (_, a_src, _) = linkable(&mut pg, "a");
    let (_, f_src, f_sink) = inline_filter(&mut pg, "f", CapsSpec::Any);
    let (_, _, b_sink) = linkable(&mut pg, "b");

    pg.link(a_src, f_sink).unwrap();
    pg.link(f_src, b_sink).unwrap();

    assert_eq!(
        LinkTarget {
            pad: Some(b_sink),
            filters: vec![],
        },
        resolve(&pg, a_src, true),
    );
}

#[test]
fn chained_filters_collect_in_traversal_order() {
    let mut pg = Pg::new();

    let (_, a_src, _) = linkable(&mut pg, "a");
    let (_, f_src, f_sink) =
        inline_filter(&mut pg, "f", CapsSpec::spec("video/x-raw"));
    let (_, g_src, g_sink) =
        inline_filter(&mut pg, "g", CapsSpec::spec("video/x-raw, width=64"));
    let (_, _, b_sink) = linkable(&mut pg, "b");

    pg.link(a_src, f_sink).unwrap();
    pg.link(f_src, g_sink).unwrap();
    pg.link(g_src, b_sink).unwrap();

    assert_eq!(
        LinkTarget {
            pad: Some(b_sink),
            filters: vec![
                CapsSpec::spec("video/x-raw"),
                CapsSpec::spec("video/x-raw, width=64"),
            ],
        },
        resolve(&pg, a_src, true),
    );
}

#[test]
fn filter_with_no_outgoing_link_ends_walk_unresolved() {
    let mut pg = Pg::new();

    let (_, a_src, _) = linkable(&mut pg, "a");
    let (_, _, f_sink) =
        inline_filter(&mut pg, "f", CapsSpec::spec("video/x-raw"));

    pg.link(a_src, f_sink).unwrap();

    assert_eq!(
        LinkTarget {
            pad: None,
            filters: vec![CapsSpec::spec("video/x-raw")],
        },
        resolve(&pg, a_src, true),
    );
}

#[test]
fn filters_are_terminal_when_not_folding() {
    let mut pg = Pg::new();

    let (_, a_src, _) = linkable(&mut pg, "a");
    let (_, f_src, f_sink) =
        inline_filter(&mut pg, "f", CapsSpec::spec("video/x-raw"));
    let (_, _, b_sink) = linkable(&mut pg, "b");

    pg.link(a_src, f_sink).unwrap();
    pg.link(f_src, b_sink).unwrap();

    assert_eq!(
        LinkTarget {
            pad: Some(f_sink),
            filters: vec![],
        },
        resolve(&pg, a_src, false),
    );
}
