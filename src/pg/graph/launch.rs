// Launch-style textual representation of graph objects
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

//! Launch-style textual representation of graph objects via
//!   [LIR](crate::lir).
//!
//! This is the serializer proper:
//!   a recursive pre-order walk of the ownership tree rooted at a caller-
//!   provided object,
//!     lowering each object into [`Tok`]ens that the LIR writer renders
//!     through the caller's sink.
//! The output is deterministic for a static graph:
//!   child order is insertion order,
//!   attribute order is declaration order,
//!   and links are discovered from their source side only.
//!
//! Output is _minimal_ by default.
//! Everything the target grammar's parser can infer is elided:
//!   attribute values equal to their declared default,
//!   pad names where an element exposes only one pad of that direction,
//!   and the owner qualification of link endpoints adjacent in the output
//!   sequence.
//! [`DescFlags::verbose`] disables every elision at once,
//!   trading compactness for full explicitness.
//!
//! Serialization never fails over malformed data;
//!   it emits a best-effort,
//!   syntactically valid description and reports recoverable oddities
//!   through the caller's [`Observer`].
//! The only fatal condition is a write failure of the sink itself,
//!   which propagates immediately and unmodified.

use super::{
    object::{
        Bin, BinKind, CapsSpec, Dir, Elem, Filter, Object, ObjectIndex, Pad,
        Presence, Prop,
    },
    resolve::{resolve, LinkTarget},
    Pg,
};
use crate::global;
use crate::lir::{
    writer::{DescWriter, Result, WriterState},
    Tok,
};
use std::fmt::{self, Display};
use std::io::Write;

pub use crate::lir::writer::{Error, SinkFn};

/// Attribute representing the ownership back-reference,
///   implicit in the tree structure and therefore never serialized.
const PARENT_ATTR: &str = "parent";

/// Configuration of a serialization pass.
///
/// Flags are independent and composable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescFlags {
    /// Disable all elision rules.
    pub verbose: bool,

    /// Give even default-kind containers a type-qualified wrapping.
    pub wrap_bins: bool,

    /// Wrap the top-level graph even at depth zero.
    ///
    /// Useful when its attributes matter and must be preserved,
    ///   since the flat rendition drops them.
    pub wrap_root: bool,

    /// Serialize inline filters as ordinary elements rather than folding
    ///   them into link syntax.
    pub filters_as_elements: bool,
}

/// Nesting depth relative to the serialization root.
///
/// Depth gates connectivity:
///   a lone element serialized at the root omits its links,
///     since their peers may not be co-present in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
struct Depth(global::PipeDepthSize);

impl Depth {
    fn root() -> Self {
        Self::default()
    }

    fn child(self) -> Self {
        match self {
            Self(d) => Self(d + 1),
        }
    }

    fn is_root(self) -> bool {
        self == Self::root()
    }
}

/// A non-fatal oddity encountered during serialization.
///
/// Diagnostics never abort the pass;
///   the affected attribute or subtree is skipped and serialization
///   continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An attribute's type has no canonical textual form.
    UnserializableValue { owner: String, attr: String },

    /// An object kind that has no textual representation
    ///   (a pad in node-emission position).
    UnrepresentableObject { name: String },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnserializableValue { owner, attr } => write!(
                f,
                "attribute `{attr}` of `{owner}` has no textual form \
                   and was skipped"
            ),
            Self::UnrepresentableObject { name } => write!(
                f,
                "object `{name}` cannot be represented and was skipped"
            ),
        }
    }
}

/// Caller extension point for a serialization pass.
///
/// This is an explicit visitor passed into the top-level call;
///   there is no ambient registry.
pub trait Observer {
    /// Invoked once per serialized object,
    ///   immediately before that object's own emission.
    ///
    /// This allows a caller to attach out-of-band metadata
    ///   (e.g. spatial layout)
    ///   keyed by the object's name.
    /// Objects elided from output
    ///   (such as folded inline filters)
    ///   are not visited.
    fn visit_node(&mut self, _oi: ObjectIndex<Object>, _obj: &Object) {}

    /// Invoked for each non-fatal [`Diagnostic`].
    fn diagnostic(&mut self, _diag: Diagnostic) {}
}

/// An [`Observer`] that observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Serialize the graph reachable from `root` into `sink`.
///
/// The graph is borrowed immutably for the duration of the call;
///   the serializer holds no state across calls.
/// See the [module-level documentation](self) for the output grammar and
///   its elision rules.
pub fn write_launch<W: Write, Ob: Observer>(
    pg: &Pg,
    root: ObjectIndex<Object>,
    flags: DescFlags,
    sink: &mut W,
    observer: &mut Ob,
) -> Result<()> {
    let mut emitter = Emitter {
        pg,
        flags,
        sink,
        observer,
        state: WriterState::default(),
        last: None,
    };

    emitter.node_at(root, Depth::root(), None)
}

/// Serialize into a freshly allocated string,
///   discarding diagnostics.
///
/// This is intended primarily for testing;
///   prefer [`write_launch`] with a streaming sink otherwise.
pub fn launch_str(
    pg: &Pg,
    root: ObjectIndex<Object>,
    flags: DescFlags,
) -> Result<String> {
    let mut buf = Vec::new();
    write_launch(pg, root, flags, &mut buf, &mut NullObserver)?;

    // The writer only ever emits complete UTF-8 fragments.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// State of one serialization pass.
///
/// This bundles the context record that the original design threads
///   through its recursion:
///     configuration flags,
///     writer state,
///     and the last-emitted-node marker used for adjacency elision.
/// It is scoped to a single top-level invocation and never shared across
///   calls.
struct Emitter<'a, W: Write, Ob: Observer> {
    pg: &'a Pg,
    flags: DescFlags,
    sink: &'a mut W,
    observer: &'a mut Ob,
    state: WriterState,

    /// The node whose body most recently reached the output.
    ///
    /// A link's source side elides its owner qualification when the
    ///   owner _is_ this node,
    ///     which holds for every link an element emits for itself;
    ///   the common linear chain thus renders as bare connectors.
    last: Option<ObjectIndex<Object>>,
}

impl<'a, W: Write, Ob: Observer> Emitter<'a, W, Ob> {
    fn tok(&mut self, tok: Tok) -> Result<()> {
        self.state = tok.write(self.sink, self.state)?;
        Ok(())
    }

    /// Emit one node and,
    ///   recursively,
    ///   anything it owns.
    ///
    /// `next` is the sibling that will be emitted immediately after this
    ///   node,
    ///     used by link emission to elide the sink-side owner
    ///     qualification.
    fn node_at(
        &mut self,
        oi: ObjectIndex<Object>,
        depth: Depth,
        next: Option<ObjectIndex<Object>>,
    ) -> Result<()> {
        let pg = self.pg;

        match pg.expect_obj::<Object>(oi) {
            Object::Elem(elem) => self.elem(oi, elem, depth, next),
            Object::Filter(filter) => self.filter(oi, filter, depth, next),
            Object::Bin(bin) => self.bin(oi, bin, depth, next),

            // A pad cannot stand alone in node position;
            //   skip it and continue.
            Object::Pad(pad) => {
                self.observer.diagnostic(Diagnostic::UnrepresentableObject {
                    name: pad.name().into(),
                });
                Ok(())
            }
        }
    }

    fn elem(
        &mut self,
        oi: ObjectIndex<Object>,
        elem: &Elem,
        depth: Depth,
        next: Option<ObjectIndex<Object>>,
    ) -> Result<()> {
        let pg = self.pg;

        self.observer.visit_node(oi, pg.expect_obj(oi));
        self.tok(Tok::Factory(elem.factory().into()))?;
        self.last = Some(oi);

        self.attrs(elem.name(), elem.props())?;

        if !depth.is_root() {
            self.links(oi, elem.name(), next)?;
        }

        Ok(())
    }

    /// Emit an inline filter in its element rendition.
    ///
    /// Reached only under the filters-as-elements policy or when a
    ///   filter is itself the serialization root;
    ///     folded filters are skipped by child iteration and threaded
    ///     through by link resolution instead.
    fn filter(
        &mut self,
        oi: ObjectIndex<Object>,
        filter: &Filter,
        depth: Depth,
        next: Option<ObjectIndex<Object>>,
    ) -> Result<()> {
        let pg = self.pg;

        self.observer.visit_node(oi, pg.expect_obj(oi));
        self.tok(Tok::Factory(Filter::FACTORY.into()))?;
        self.last = Some(oi);

        self.attrs(filter.name(), &[filter.caps_prop()])?;

        if !depth.is_root() {
            self.links(oi, filter.name(), next)?;
        }

        Ok(())
    }

    fn bin(
        &mut self,
        oi: ObjectIndex<Object>,
        bin: &Bin,
        depth: Depth,
        next: Option<ObjectIndex<Object>>,
    ) -> Result<()> {
        let pg = self.pg;

        self.observer.visit_node(oi, pg.expect_obj(oi));

        // The top-level graph is orchestration,
        //   not part of the portable description;
        //     it renders as a flat child sequence unless wrapping is
        //     forced or it is nested inside another container
        //       (where flattening would lose it).
        let flat = bin.kind().is_pipeline()
            && depth.is_root()
            && !self.flags.wrap_root;

        if !flat {
            if let Some(qual) = self.qualifier(bin.kind()) {
                self.tok(Tok::Qualifier(qual))?;
            }

            self.tok(Tok::BinOpen)?;
            self.last = Some(oi);
            self.attrs(bin.name(), bin.props())?;
        }

        // Folded inline filters are not children for output purposes;
        //   sibling context must likewise be computed over the filtered
        //   sequence or adjacency elision would break around them.
        let expand = self.flags.filters_as_elements;
        let children: Vec<_> = pg
            .children_of(oi)
            .into_iter()
            .filter(|&child| {
                expand || pg.expect_obj::<Object>(child).as_filter().is_none()
            })
            .collect();

        for (i, &child) in children.iter().enumerate() {
            self.node_at(child, depth.child(), children.get(i + 1).copied())?;
        }

        if !flat {
            self.tok(Tok::BinClose)?;
        }

        Ok(())
    }

    /// Type qualifier for a container's wrapping,
    ///   if it receives one.
    fn qualifier(&self, kind: &BinKind) -> Option<String> {
        match kind {
            BinKind::Plain
                if self.flags.verbose || self.flags.wrap_bins =>
            {
                Some(kind.factory().into())
            }
            BinKind::Plain => None,
            BinKind::Pipeline | BinKind::Custom(_) => {
                Some(kind.factory().into())
            }
        }
    }

    /// Emit the serializable attributes of one object.
    fn attrs(&mut self, owner: &str, props: &[Prop]) -> Result<()> {
        for prop in props {
            let access = prop.access();

            if !access.read {
                continue;
            }

            // Read-only computed attributes cannot be reproduced by the
            //   inverse parser.
            if !access.write && !access.construct {
                continue;
            }

            if prop.name() == PARENT_ATTR {
                continue;
            }

            // The canonical empty structure is emitted even when it is
            //   the declared default;
            //     absence and explicit emptiness are not interchangeable
            //     downstream.
            let explicit_empty = prop.value().is_empty_structure();

            if !self.flags.verbose
                && !explicit_empty
                && prop.default() == Some(prop.value())
            {
                continue;
            }

            match prop.value().serialize_text() {
                Some(text) => {
                    self.tok(Tok::Attr(prop.name().into(), text))?
                }
                None => self.observer.diagnostic(
                    Diagnostic::UnserializableValue {
                        owner: owner.into(),
                        attr: prop.name().into(),
                    },
                ),
            }
        }

        Ok(())
    }

    /// Emit one link per source pad of `oi` that resolves to a real,
    ///   attached peer.
    ///
    /// Sink pads are never the origin of emission:
    ///   every link is discovered from its source side,
    ///     which emits each link exactly once.
    fn links(
        &mut self,
        oi: ObjectIndex<Object>,
        owner_name: &str,
        next: Option<ObjectIndex<Object>>,
    ) -> Result<()> {
        let pg = self.pg;

        for pad_oi in pg.pads_of(oi) {
            let pad = pg.expect_obj(pad_oi);

            if pad.dir() != Dir::Src || pad.is_template() {
                continue;
            }

            let LinkTarget {
                pad: target,
                filters,
            } = resolve(pg, pad_oi, !self.flags.filters_as_elements);

            // Unlinked and dangling endpoints are never serialized.
            let Some(target) = target else { continue };
            let Some(target_owner) = pg.parent_of(target) else {
                continue;
            };
            if pg.parent_of(target_owner).is_none() {
                continue;
            }

            self.link(
                oi,
                owner_name,
                pad_oi,
                target,
                target_owner,
                &filters,
                next,
            )?;
        }

        Ok(())
    }

    /// Emit one resolved link.
    fn link(
        &mut self,
        src_owner: ObjectIndex<Object>,
        src_owner_name: &str,
        src: ObjectIndex<Pad>,
        target: ObjectIndex<Pad>,
        target_owner: ObjectIndex<Object>,
        filters: &[CapsSpec],
        next: Option<ObjectIndex<Object>>,
    ) -> Result<()> {
        let pg = self.pg;
        let verbose = self.flags.verbose;

        // Adjacency is the common case:
        //   the source owner's body was just emitted,
        //   so qualifying it would only repeat what the reader
        //     (and the target grammar's parser)
        //     already knows.
        let qualify_src = verbose || self.last != Some(src_owner);

        self.tok(Tok::PadRef {
            owner: qualify_src.then(|| src_owner_name.into()),
            pad: ref_pad_name(pg, src, verbose),
        })?;

        self.tok(Tok::Connect)?;

        if !filters.is_empty() {
            self.tok(Tok::FilterList(
                filters.iter().map(ToString::to_string).collect(),
            ))?;
            self.tok(Tok::Connect)?;
        }

        // Symmetric on the sink side:
        //   elide the owner about to be emitted next in sequence.
        let qualify_sink = verbose || next != Some(target_owner);

        self.tok(Tok::PadRef {
            owner: qualify_sink.then(|| {
                pg.expect_obj::<Object>(target_owner).name().into()
            }),
            pad: ref_pad_name(pg, target, verbose),
        })
    }
}

/// Decide whether a pad reference must carry an explicit pad name,
///   and which name.
///
/// A pad backed by a template that is not always present must be
///   referenced by the _template's_ name,
///     since the concrete name is not meaningful to the inverse parser.
/// Otherwise the name appears only under verbosity or when the owner
///   exposes more than one concrete pad of the same direction,
///     i.e. whenever eliding it would be ambiguous.
fn ref_pad_name(
    pg: &Pg,
    pad_oi: ObjectIndex<Pad>,
    verbose: bool,
) -> Option<String> {
    let pad = pg.expect_obj(pad_oi);

    if let Some(tpl_oi) = pg.template_of(pad_oi) {
        let tpl = pg.expect_obj(tpl_oi);

        if tpl.presence() != Presence::Always {
            return Some(tpl.name().into());
        }
    }

    let exposed = pg
        .parent_of(pad_oi)
        .map(|owner| {
            pg.pads_of(owner)
                .into_iter()
                .filter(|&other| {
                    let o = pg.expect_obj(other);
                    o.dir() == pad.dir() && !o.is_template()
                })
                .count()
        })
        .unwrap_or(0);

    (verbose || exposed > 1).then(|| pad.name().into())
}
