// Objects represented on the pipeline graph
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

//! Objects represented by the pipeline graph.
//!
//! Dynamic Object Types and Narrowing
//! ==================================
//! Any node on the graph can represent any type of [`Object`].
//! An [`ObjectIndex`] contains an index into the graph,
//!   _not_ a reference,
//!   together with a phantom [`ObjectKind`] stating an _expectation_ of
//!   what type of object that index resolves to.
//! That expectation is verified at runtime when the index is used to read
//!   from the graph,
//!     panicing on mismatch;
//!   a mismatch is an internal inconsistency rather than a user error,
//!     since indices are only ever minted by the graph that owns the
//!     object.
//!
//! To perform an operation on a particular type of object,
//!   we must first _narrow_ it from the [`Object`] sum type into the more
//!   specific inner type,
//!     via the [`From`]/[`AsRef`] impls generated below.
//!
//! Ownership between objects is expressed as graph edges,
//!   never as references;
//!     see [`super::Pg`].
//! The marker traits [`BinChild`] and [`PadOwner`] define which kinds may
//!   appear as the target of ownership edges,
//!     statically closing off nonsensical graphs like a pad that owns a
//!     container.

use petgraph::graph::NodeIndex;
use std::fmt::Display;
use std::marker::PhantomData;

pub mod bin;
pub mod elem;
pub mod filter;
pub mod pad;
pub mod prop;

pub use bin::{Bin, BinKind};
pub use elem::Elem;
pub use filter::Filter;
pub use pad::{Dir, Pad, PadTy, Presence};
pub use prop::{Access, CapsSpec, Prop, Value};

/// Generate the [`Object`] sum type along with its discriminant,
///   narrowing,
///   and accessor boilerplate.
///
/// Each entry provides the variant's inner type and a short description
///   used both for [`Display`] and for narrowing-failure panics.
macro_rules! object_ty {
    (
        $(
            $(#[$attr:meta])+
            $ty:ident ($desc:literal),
        )+
    ) => { paste::paste! {
        /// An object on the pipeline graph.
        ///
        /// See the [module-level documentation](self) for more
        ///   information.
        #[derive(Debug, PartialEq)]
        pub enum Object {
            $(
                $(#[$attr])+
                $ty($ty),
            )+
        }

        /// The type of an [`Object`],
        ///   for contexts that need to dispatch without destructuring.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum ObjectTy {
            $($ty,)+
        }

        impl Object {
            /// The type of this object.
            pub fn ty(&self) -> ObjectTy {
                match self {
                    $(Self::$ty(_) => ObjectTy::$ty,)+
                }
            }

            /// Name of this object.
            ///
            /// Names are assumed
            ///   (but not enforced)
            ///   to be unique among siblings;
            ///     see the module-level documentation.
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$ty(o) => o.name(),)+
                }
            }

            $(
                #[doc = concat!(
                    "Retrieve a [`", stringify!($ty), "`] reference,"
                )]
                ///   or [`None`] if the object is of a different type.
                pub fn [<as_ $ty:lower>](&self) -> Option<&$ty> {
                    match self {
                        Self::$ty(o) => Some(o),
                        _ => None,
                    }
                }
            )+

            /// Diagnostic panic after failing to narrow an object.
            ///
            /// Narrowing failure represents state inconsistency on the
            ///   graph,
            ///     which ought never to occur and cannot be meaningfully
            ///     recovered from;
            ///       see the module-level documentation.
            fn narrowing_panic(&self, expected: &str) -> ! {
                panic!("internal error: expected {expected}, found {self}")
            }
        }

        impl Display for Object {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match self {
                    $(Self::$ty(o) => Display::fmt(o, f),)+
                }
            }
        }

        impl Display for ObjectTy {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                match self {
                    $(Self::$ty => write!(f, "{}", $desc),)+
                }
            }
        }

        $(
            impl From<$ty> for Object {
                fn from(o: $ty) -> Self {
                    Self::$ty(o)
                }
            }

            impl From<Object> for $ty {
                #[doc = concat!(
                    "Narrow an object into ", $desc, ","
                )]
                ///   panicing if the object is of a different type.
                fn from(val: Object) -> Self {
                    match val {
                        Object::$ty(o) => o,
                        _ => val.narrowing_panic($desc),
                    }
                }
            }

            impl AsRef<$ty> for Object {
                fn as_ref(&self) -> &$ty {
                    match self {
                        Object::$ty(o) => o,
                        _ => self.narrowing_panic($desc),
                    }
                }
            }
        )+
    }};
}

object_ty! {
    /// A processing element.
    ///
    /// Elements own pads and are identified for output by their factory
    ///   identity.
    Elem ("a processing element"),

    /// A container (bin) of child objects.
    ///
    /// Child order is insertion order,
    ///   which is also the deliberate output order;
    ///     see [`super::launch`].
    Bin ("a container"),

    /// An inline caps filter.
    ///
    /// Present on the graph like any element,
    ///   but by default folded into the link syntax rather than emitted
    ///   as a standalone node.
    Filter ("an inline filter"),

    /// A pad (connection endpoint) on an element.
    Pad ("a pad"),
}

impl AsRef<Object> for Object {
    fn as_ref(&self) -> &Object {
        self
    }
}

// An `Object` is a node payload of the graph arena;
//   its variants must stay within a couple of cache lines or graph
//   traversal will suffer for it.
const_assert!(std::mem::size_of::<Object>() <= 128);

/// An [`Object`]-compatible entity.
///
/// This type simply must be convertable both to and from [`Object`] so
///   that operations on the graph that retrieve its value can narrow into
///   it,
///     and operations writing it back can expand it back into [`Object`].
///
/// Note that [`Object`] is itself an [`ObjectKind`],
///   if you do not desire narrowing.
pub trait ObjectKind: Into<Object>
where
    Object: Into<Self> + AsRef<Self>,
{
}

impl<O: Into<Object>> ObjectKind for O where Object: Into<O> + AsRef<O> {}

/// [`ObjectKind`]s that may be owned as children of a [`Bin`].
pub trait BinChild: ObjectKind
where
    Object: Into<Self> + AsRef<Self>,
{
}

impl BinChild for Elem {}
impl BinChild for Bin {}
impl BinChild for Filter {}

/// [`ObjectKind`]s that may own [`Pad`]s.
pub trait PadOwner: ObjectKind
where
    Object: Into<Self> + AsRef<Self>,
{
}

impl PadOwner for Elem {}
impl PadOwner for Bin {}
impl PadOwner for Filter {}

/// Index representing an [`Object`] stored on the graph.
///
/// Object references are integer offsets,
///   not pointers;
///     the graph holds every object and an index holds no ownership.
/// Since objects are never deleted,
///   an index remains valid for the lifetime of the graph that minted it.
///
/// The associated [`ObjectKind`] states an _expectation_ that,
///   when this index is used to perform an operation on the graph,
///   it will operate on an object of type `O`;
///     this is verified at runtime during narrowing.
pub struct ObjectIndex<O: ObjectKind>(NodeIndex, PhantomData<O>)
where
    Object: Into<O> + AsRef<O>;

impl<O: ObjectKind> ObjectIndex<O>
where
    Object: Into<O> + AsRef<O>,
{
    pub(in crate::pg) fn new(index: NodeIndex) -> Self {
        Self(index, PhantomData)
    }

    /// Widen to an index of unknown object type.
    pub fn widen(self) -> ObjectIndex<Object> {
        match self {
            Self(index, _) => ObjectIndex::<Object>::new(index),
        }
    }

    /// Assert a different [`ObjectKind`] for this index.
    ///
    /// The assertion will be verified
    ///   (with a panic on failure)
    ///   the next time the index is used to read from the graph,
    ///     so this must only be used where the target kind has already
    ///     been established,
    ///       e.g. after edge-type filtering.
    pub(in crate::pg) fn retype<B: ObjectKind>(self) -> ObjectIndex<B>
    where
        Object: Into<B> + AsRef<B>,
    {
        match self {
            Self(index, _) => ObjectIndex::new(index),
        }
    }
}

impl<O: ObjectKind> Clone for ObjectIndex<O>
where
    Object: Into<O> + AsRef<O>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ObjectKind> Copy for ObjectIndex<O> where Object: Into<O> + AsRef<O> {}

impl<O: ObjectKind> PartialEq for ObjectIndex<O>
where
    Object: Into<O> + AsRef<O>,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self(a, _), Self(b, _)) => a == b,
        }
    }
}

impl<O: ObjectKind> Eq for ObjectIndex<O> where Object: Into<O> + AsRef<O> {}

impl<O: ObjectKind> std::fmt::Debug for ObjectIndex<O>
where
    Object: Into<O> + AsRef<O>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self(index, _) => write!(f, "ObjectIndex({index:?})"),
        }
    }
}

impl<O: ObjectKind> From<ObjectIndex<O>> for NodeIndex
where
    Object: Into<O> + AsRef<O>,
{
    fn from(oi: ObjectIndex<O>) -> Self {
        match oi {
            ObjectIndex(index, _) => index,
        }
    }
}
