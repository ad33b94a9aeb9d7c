// Containers on the pipeline graph
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

//! Containers (bins).

use super::prop::Prop;
use std::fmt::{self, Display};

/// A container of child objects.
///
/// Children are ordered by insertion and that order is preserved in
///   output;
///     it is a deliberate property of the description,
///       not an incidental one,
///     since the surrounding application re-creates graphs in the order
///     its serialized form lists them.
#[derive(Debug, PartialEq)]
pub struct Bin {
    name: String,
    kind: BinKind,
    props: Vec<Prop>,
}

impl Bin {
    pub fn new(name: impl Into<String>, kind: BinKind) -> Self {
        Self {
            name: name.into(),
            kind,
            props: vec![],
        }
    }

    /// Append an attribute,
    ///   preserving declaration order.
    pub fn with_prop(mut self, prop: Prop) -> Self {
        self.props.push(prop);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &BinKind {
        &self.kind
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }
}

impl Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "container `{}` ({})", self.name, self.kind.factory())
    }
}

/// The kind of a container.
///
/// The kind decides three behaviors during serialization:
///   whether the container's wrapping receives a type qualifier,
///   whether its relay (ghost) pads are transparent to link resolution,
///   and whether it may be emitted as a flat child sequence at the top
///   level.
#[derive(Debug, PartialEq, Eq)]
pub enum BinKind {
    /// The generic, default container kind.
    ///
    /// Its wrapping carries no type qualifier unless forced,
    ///   and its ghost pads are transparent to link resolution.
    Plain,

    /// The top-level graph.
    ///
    /// Serialized as a flat sequence of its children at depth zero
    ///   unless wrapping is forced;
    ///     nested deeper it is wrapped like any other container so that
    ///     it is not lost.
    Pipeline,

    /// A specialized container subtype,
    ///   identified by the factory that creates it.
    ///
    /// Specialized containers manage their own boundary pads,
    ///   which are therefore addressed by name rather than resolved
    ///   through.
    Custom(String),
}

impl BinKind {
    /// Factory identity used as the wrapping's type qualifier.
    pub fn factory(&self) -> &str {
        match self {
            Self::Plain => "bin",
            Self::Pipeline => "pipeline",
            Self::Custom(factory) => factory,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }

    pub fn is_pipeline(&self) -> bool {
        matches!(self, Self::Pipeline)
    }
}

impl Display for BinKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.factory())
    }
}
