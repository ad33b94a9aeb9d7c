// Typed attributes of pipeline graph objects
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

//! Typed attributes (properties) of graph objects.
//!
//! The surrounding application discovers attributes dynamically through
//!   runtime introspection of its widget toolkit;
//!     here that openness collapses into the closed sum [`Value`],
//!       which is all the serializer can represent anyway.
//! An attribute with no textual form
//!   ([`Value::Opaque`])
//!   is not an error:
//!     it is skipped at serialization time with a diagnostic.

use std::fmt::{self, Display};

/// A single typed attribute of an object.
///
/// Attribute order on an object is declaration order and is preserved in
///   output.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    name: String,
    value: Value,
    access: Access,
    default: Option<Value>,
}

impl Prop {
    /// A readable and writable attribute with no declared default.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            access: Access::RW,
            default: None,
        }
    }

    /// Declare a default value.
    ///
    /// An attribute equal to its default is elided from non-verbose
    ///   output.
    pub fn with_default(self, default: Value) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    /// Replace the access flags.
    pub fn with_access(self, access: Access) -> Self {
        Self { access, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

impl Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "attribute `{}`", self.name)
    }
}

/// Access flags of an attribute.
///
/// Only readable attributes that are also writable or
///   construction-settable can be reproduced by the inverse parser;
///     everything else is noise in a description and is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub read: bool,
    pub write: bool,
    pub construct: bool,
}

impl Access {
    /// Readable and writable.
    pub const RW: Self = Self {
        read: true,
        write: true,
        construct: false,
    };

    /// Readable only;
    ///   a computed attribute that no description can reproduce.
    pub const READ_ONLY: Self = Self {
        read: true,
        write: false,
        construct: false,
    };

    /// Settable only at construction time,
    ///   but readable thereafter.
    pub const CONSTRUCT_ONLY: Self = Self {
        read: true,
        write: false,
        construct: true,
    };

    /// Writable but not readable;
    ///   its current value cannot be observed for serialization.
    pub const WRITE_ONLY: Self = Self {
        read: false,
        write: true,
        construct: false,
    };
}

/// A dynamically typed attribute value.
///
/// This is a closed set:
///   the serializer special-cases nothing beyond what is represented
///   here.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),

    /// An enumeration value,
    ///   represented by its nickname as the target grammar expects.
    EnumNick(String),

    /// A capability descriptor.
    Caps(CapsSpec),

    /// A value of a type with no canonical textual form,
    ///   such as a native pointer.
    ///
    /// Unserializable;
    ///   see the module-level documentation.
    Opaque,
}

impl Value {
    /// Canonical textual form of this value,
    ///   or [`None`] if the type has none.
    ///
    /// The result is raw:
    ///   quoting is the writer's concern.
    pub fn serialize_text(&self) -> Option<String> {
        match self {
            Self::Bool(true) => Some("true".into()),
            Self::Bool(false) => Some("false".into()),
            Self::Int(n) => Some(n.to_string()),
            Self::UInt(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Str(s) => Some(s.clone()),
            Self::EnumNick(nick) => Some(nick.clone()),
            Self::Caps(spec) => Some(spec.to_string()),
            Self::Opaque => None,
        }
    }

    /// Whether this value is the canonical empty structure.
    ///
    /// An empty structure is serialized explicitly even where elision
    ///   rules would otherwise drop it,
    ///     since downstream consumers treat an absent value differently
    ///     from an explicitly empty one.
    pub fn is_empty_structure(&self) -> bool {
        matches!(self, Self::Caps(CapsSpec::Empty))
    }
}

/// An opaque capability/format descriptor.
///
/// Carried by inline filters and by caps-typed attributes.
/// The two degenerate forms are distinguished because they are
///   special-cased throughout serialization:
///     [`CapsSpec::Any`] carries no information and is dropped from
///     folded links,
///       while [`CapsSpec::Empty`] must survive into attribute output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapsSpec {
    /// The wildcard descriptor.
    Any,

    /// The canonical empty structure.
    Empty,

    /// A concrete descriptor,
    ///   treated as opaque text.
    Spec(String),
}

impl CapsSpec {
    pub fn spec(text: impl Into<String>) -> Self {
        Self::Spec(text.into())
    }

    /// Whether this descriptor carries no information worth folding into
    ///   a link.
    pub fn is_trivial(&self) -> bool {
        matches!(self, Self::Any | Self::Empty)
    }
}

impl Display for CapsSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Any => write!(f, "ANY"),
            Self::Empty => write!(f, "EMPTY"),
            Self::Spec(text) => write!(f, "{text}"),
        }
    }
}
