// System tests for pipeline description serialization
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

//! End-to-end serialization of a representative editing-session graph,
//!   driven through the public API exactly as the surrounding
//!   application would.

use fxhash::FxHashMap;
use plumb::pg::graph::launch::{
    launch_str, write_launch, DescFlags, Diagnostic, Observer, SinkFn,
};
use plumb::pg::{
    Bin, BinKind, CapsSpec, Dir, Elem, Filter, Object, ObjectIndex, Pad, Pg,
    Prop, Value,
};

/// A caller that records per-node layout metadata as the serializer
///   reaches each node,
///     the way the surrounding application persists canvas positions
///     alongside the description.
#[derive(Debug, Default)]
struct LayoutRecorder {
    positions: FxHashMap<String, (u32, u32)>,
    next_x: u32,
    diags: Vec<Diagnostic>,
}

impl Observer for LayoutRecorder {
    fn visit_node(&mut self, _oi: ObjectIndex<Object>, obj: &Object) {
        self.positions
            .insert(obj.name().into(), (self.next_x, 0));
        self.next_x += 64;
    }

    fn diagnostic(&mut self, diag: Diagnostic) {
        self.diags.push(diag);
    }
}

/// Build the session graph:
///
/// ```text
///   pipeline [
///     src (pattern=snow) → [bin: filter(video/x-raw) → conv] → out
///   ]
/// ```
///
/// with the bin boundary crossed by ghost pads on both sides.
fn session() -> (Pg, ObjectIndex<Bin>) {
    let mut pg = Pg::new();

    let top = pg.create(Bin::new("session", BinKind::Pipeline));
    let inner = pg.create(Bin::new("work", BinKind::Plain));

    let src = pg.create(
        Elem::new("src", "videotestsrc")
            .with_prop(
                Prop::new("pattern", Value::EnumNick("snow".into()))
                    .with_default(Value::EnumNick("smpte".into())),
            )
            .with_prop(
                Prop::new("is-live", Value::Bool(false))
                    .with_default(Value::Bool(false)),
            ),
    );
    let src_src = pg.add_pad(src, Pad::new("src", Dir::Src));

    let filter = pg.create(Filter::new(
        "f0",
        CapsSpec::spec("video/x-raw, width=(int)320, height=(int)240"),
    ));
    let f_sink = pg.add_pad(filter, Pad::new("sink", Dir::Sink));
    let f_src = pg.add_pad(filter, Pad::new("src", Dir::Src));

    let conv = pg.create(Elem::new("conv", "videoconvert"));
    let conv_sink = pg.add_pad(conv, Pad::new("sink", Dir::Sink));
    let conv_src = pg.add_pad(conv, Pad::new("src", Dir::Src));

    let out = pg.create(
        Elem::new("out", "autovideosink").with_prop(
            Prop::new("sync", Value::Bool(true))
                .with_default(Value::Bool(true)),
        ),
    );
    let out_sink = pg.add_pad(out, Pad::new("sink", Dir::Sink));

    pg.add_child(top, src).unwrap();
    pg.add_child(top, inner).unwrap();
    pg.add_child(top, out).unwrap();

    pg.add_child(inner, filter).unwrap();
    pg.add_child(inner, conv).unwrap();

    let ghost_sink = pg.add_pad(inner, Pad::ghost("sink", Dir::Sink));
    let ghost_src = pg.add_pad(inner, Pad::ghost("src", Dir::Src));

    pg.link(src_src, ghost_sink).unwrap();
    pg.link(ghost_sink, f_sink).unwrap();
    pg.link(f_src, conv_sink).unwrap();
    pg.link(conv_src, ghost_src).unwrap();
    pg.link(ghost_src, out_sink).unwrap();

    (pg, top)
}

#[test]
fn serializes_session_with_folding_and_elision() {
    let (pg, top) = session();

    // The filter folds into link syntax inside the bin;
    //   the crossing links resolve through the ghost pads;
    //   defaulted attributes vanish.
    assert_eq!(
        r#"videotestsrc pattern=snow ! "video/x-raw, width=(int)320, height=(int)240" ! conv. ( videoconvert ! out. ) autovideosink"#,
        launch_str(&pg, top.widen(), Default::default()).unwrap(),
    );
}

#[test]
fn verbose_session_is_fully_explicit() {
    let (pg, top) = session();

    let out = launch_str(
        &pg,
        top.widen(),
        DescFlags {
            verbose: true,
            ..Default::default()
        },
    )
    .unwrap();

    // Every attribute,
    //   every pad name,
    //   every owner qualification.
    assert_eq!(
        r#"videotestsrc pattern=snow is-live=false src.src ! "video/x-raw, width=(int)320, height=(int)240" ! conv.sink bin. ( videoconvert conv.src ! out.sink ) autovideosink sync=true"#,
        out,
    );
}

#[test]
fn whitespace_discipline_holds_across_flag_combinations() {
    let (pg, top) = session();

    for verbose in [false, true] {
        for wrap_bins in [false, true] {
            for wrap_root in [false, true] {
                for filters_as_elements in [false, true] {
                    let flags = DescFlags {
                        verbose,
                        wrap_bins,
                        wrap_root,
                        filters_as_elements,
                    };

                    let out =
                        launch_str(&pg, top.widen(), flags).unwrap();

                    assert!(!out.contains("  "), "double space in {out:?}");
                    assert!(!out.starts_with(' '), "leading space in {out:?}");
                    assert!(!out.ends_with(' '), "trailing space in {out:?}");

                    // Identical flags must reproduce identical output.
                    assert_eq!(
                        out,
                        launch_str(&pg, top.widen(), flags).unwrap(),
                    );
                }
            }
        }
    }
}

#[test]
fn streams_fragments_and_records_layout_side_channel() {
    let (pg, top) = session();

    let mut frags = Vec::new();
    let mut sink = SinkFn(|frag: &str| {
        frags.push(frag.to_string());
        Ok(())
    });

    let mut layout = LayoutRecorder::default();

    write_launch(&pg, top.widen(), Default::default(), &mut sink, &mut layout)
        .unwrap();

    // The sink saw many small fragments,
    //   not one materialized buffer.
    assert!(frags.len() > 1);
    assert_eq!(
        frags.concat(),
        launch_str(&pg, top.widen(), Default::default()).unwrap(),
    );

    // One layout record per emitted node,
    //   keyed by name;
    //     the folded filter was never emitted and gets none.
    assert_eq!(layout.positions.len(), 5);
    assert!(layout.positions.contains_key("session"));
    assert!(layout.positions.contains_key("work"));
    assert!(layout.positions.contains_key("src"));
    assert!(!layout.positions.contains_key("f0"));
    assert!(layout.diags.is_empty());
}
