// Tests for graph abstraction
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
use crate::pg::{BinKind, Elem, ObjectTy, PadTy, Presence};

type Sut = Pg;

#[test]
fn create_with_capacity() {
    let node_capacity = 100;
    let edge_capacity = 300;
    let sut = Sut::with_capacity(node_capacity, edge_capacity);

    let (nc, ec) = sut.graph.capacity();
    assert!(nc >= node_capacity);
    assert!(ec >= edge_capacity);
    assert!(sut.index.capacity() >= node_capacity);
}

#[test]
fn create_and_narrow() {
    let mut sut = Sut::new();

    let oi = sut.create(Elem::new("src0", "videotestsrc"));

    let elem = sut.get(oi).unwrap();
    assert_eq!(elem.name(), "src0");
    assert_eq!(elem.factory(), "videotestsrc");

    // Widened access yields the sum type.
    assert_eq!(
        sut.get(oi.widen()).map(Object::ty),
        Some(ObjectTy::Elem)
    );
}

#[test]
fn add_child_establishes_parent() {
    let mut sut = Sut::new();

    let bin = sut.create(Bin::new("top", BinKind::Plain));
    let child = sut.create(Elem::new("src0", "videotestsrc"));

    assert_eq!(None, sut.parent_of(child));

    sut.add_child(bin, child).unwrap();

    assert_eq!(Some(bin.widen()), sut.parent_of(child));
}

#[test]
fn add_child_rejects_second_parent() {
    let mut sut = Sut::new();

    let bin_a = sut.create(Bin::new("a", BinKind::Plain));
    let bin_b = sut.create(Bin::new("b", BinKind::Plain));
    let child = sut.create(Elem::new("src0", "videotestsrc"));

    sut.add_child(bin_a, child).unwrap();

    assert_eq!(
        Err(PgError::AlreadyParented("src0".into())),
        sut.add_child(bin_b, child),
    );
}

#[test]
fn children_iterate_in_insertion_order() {
    let mut sut = Sut::new();

    let bin = sut.create(Bin::new("top", BinKind::Plain));

    let x = sut.create(Elem::new("x", "fakesrc"));
    let y = sut.create(Elem::new("y", "identity"));
    let z = sut.create(Elem::new("z", "fakesink"));

    sut.add_child(bin, x).unwrap();
    sut.add_child(bin, y).unwrap();
    sut.add_child(bin, z).unwrap();

    assert_eq!(
        vec![x.widen(), y.widen(), z.widen()],
        sut.children_of(bin),
    );
}

#[test]
fn pads_iterate_in_insertion_order_and_know_their_owner() {
    let mut sut = Sut::new();

    let elem = sut.create(Elem::new("demux0", "somedemux"));

    let sink = sut.add_pad(elem, Pad::new("sink", Dir::Sink));
    let audio = sut.add_pad(elem, Pad::new("audio_0", Dir::Src));
    let video = sut.add_pad(elem, Pad::new("video_0", Dir::Src));

    assert_eq!(vec![sink, audio, video], sut.pads_of(elem));
    assert_eq!(Some(elem.widen()), sut.parent_of(audio));

    // Pads are not children.
    assert_eq!(Vec::<ObjectIndex<Object>>::new(), sut.children_of(elem));
}

#[test]
fn link_connects_src_to_sink() {
    let mut sut = Sut::new();

    let a = sut.create(Elem::new("a", "fakesrc"));
    let b = sut.create(Elem::new("b", "fakesink"));

    let src = sut.add_pad(a, Pad::new("src", Dir::Src));
    let sink = sut.add_pad(b, Pad::new("sink", Dir::Sink));

    sut.link(src, sink).unwrap();

    assert_eq!(Some(sink), sut.linked_to(src));
    assert_eq!(Some(src), sut.linked_from(sink));

    assert_eq!(Some(sink), sut.peer_toward(src, Dir::Src));
    assert_eq!(Some(src), sut.peer_toward(sink, Dir::Sink));
}

#[test]
fn link_rejects_mismatched_directions() {
    let mut sut = Sut::new();

    let a = sut.create(Elem::new("a", "fakesrc"));
    let b = sut.create(Elem::new("b", "fakesrc"));

    let src_a = sut.add_pad(a, Pad::new("src", Dir::Src));
    let src_b = sut.add_pad(b, Pad::new("src", Dir::Src));

    assert_eq!(
        Err(PgError::MismatchedLink("src".into(), "src".into())),
        sut.link(src_a, src_b),
    );
}

#[test]
fn link_rejects_template_pads() {
    let mut sut = Sut::new();

    let a = sut.create(Elem::new("a", "somedemux"));
    let b = sut.create(Elem::new("b", "fakesink"));

    let tpl =
        sut.add_pad(a, Pad::template("audio_%u", Dir::Src, Presence::Request));
    let sink = sut.add_pad(b, Pad::new("sink", Dir::Sink));

    assert!(matches!(
        sut.link(tpl, sink),
        Err(PgError::MismatchedLink(..)),
    ));
}

#[test]
fn link_rejects_double_linking() {
    let mut sut = Sut::new();

    let a = sut.create(Elem::new("a", "fakesrc"));
    let b = sut.create(Elem::new("b", "fakesink"));
    let c = sut.create(Elem::new("c", "fakesink"));

    let src = sut.add_pad(a, Pad::new("src", Dir::Src));
    let sink_b = sut.add_pad(b, Pad::new("sink", Dir::Sink));
    let sink_c = sut.add_pad(c, Pad::new("sink", Dir::Sink));

    sut.link(src, sink_b).unwrap();

    assert_eq!(
        Err(PgError::AlreadyLinked("src".into())),
        sut.link(src, sink_c),
    );
}

#[test]
fn ghost_pads_are_exempt_from_direction_checks() {
    let mut sut = Sut::new();

    let bin = sut.create(Bin::new("inner", BinKind::Plain));
    let a = sut.create(Elem::new("a", "fakesrc"));
    let b = sut.create(Elem::new("b", "fakesink"));

    let a_src = sut.add_pad(a, Pad::new("src", Dir::Src));
    let b_sink = sut.add_pad(b, Pad::new("sink", Dir::Sink));

    // A source-direction ghost is fed from inside its bin
    //   (where it acts as a sink)
    //   and feeds the outside.
    let ghost = sut.add_pad(bin, Pad::ghost("src", Dir::Src));

    sut.link(a_src, ghost).unwrap();
    sut.link(ghost, b_sink).unwrap();

    assert_eq!(Some(ghost), sut.linked_to(a_src));
    assert_eq!(Some(b_sink), sut.linked_to(ghost));
    assert_eq!(PadTy::Ghost, sut.expect_obj(ghost).ty());
}

#[test]
fn template_assignment_and_lookup() {
    let mut sut = Sut::new();

    let elem = sut.create(Elem::new("demux0", "somedemux"));

    let tpl =
        sut.add_pad(elem, Pad::template("audio_%u", Dir::Src, Presence::Sometimes));
    let pad = sut.add_pad(elem, Pad::new("audio_0", Dir::Src));

    assert_eq!(None, sut.template_of(pad));

    sut.set_template(pad, tpl).unwrap();

    assert_eq!(Some(tpl), sut.template_of(pad));
}

#[test]
fn set_template_rejects_non_template_pad() {
    let mut sut = Sut::new();

    let elem = sut.create(Elem::new("a", "fakesrc"));

    let pad = sut.add_pad(elem, Pad::new("src", Dir::Src));
    let other = sut.add_pad(elem, Pad::new("src2", Dir::Src));

    assert_eq!(
        Err(PgError::NotATemplate("src2".into())),
        sut.set_template(pad, other),
    );
}

#[test]
fn child_by_name_finds_children_and_pads() {
    let mut sut = Sut::new();

    let bin = sut.create(Bin::new("top", BinKind::Plain));
    let child = sut.create(Elem::new("src0", "videotestsrc"));

    sut.add_child(bin, child).unwrap();
    let pad = sut.add_pad(child, Pad::new("src", Dir::Src));

    assert_eq!(Some(child.widen()), sut.child_by_name(bin, "src0"));
    assert_eq!(Some(pad.widen()), sut.child_by_name(child, "src"));
    assert_eq!(None, sut.child_by_name(bin, "missing"));
}

#[test]
fn unlinked_pad_has_no_peer() {
    let mut sut = Sut::new();

    let a = sut.create(Elem::new("a", "fakesrc"));
    let src = sut.add_pad(a, Pad::new("src", Dir::Src));

    assert_eq!(None, sut.linked_to(src));
    assert_eq!(None, sut.linked_from(src));
}
