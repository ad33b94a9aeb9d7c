// Pads on the pipeline graph
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

//! Pads (connection endpoints).

use std::fmt::{self, Display};

/// A connection endpoint on an element.
///
/// A pad's peer and template relations live on the graph as edges,
///   not here;
///     a `Pad` by itself says only what kind of endpoint it is.
#[derive(Debug, PartialEq, Eq)]
pub struct Pad {
    name: String,
    dir: Dir,
    presence: Presence,
    ty: PadTy,
}

impl Pad {
    /// A concrete, always-present pad.
    pub fn new(name: impl Into<String>, dir: Dir) -> Self {
        Self {
            name: name.into(),
            dir,
            presence: Presence::Always,
            ty: PadTy::Concrete,
        }
    }

    /// A relay (ghost) pad forwarding across a container boundary.
    pub fn ghost(name: impl Into<String>, dir: Dir) -> Self {
        Self {
            ty: PadTy::Ghost,
            ..Self::new(name, dir)
        }
    }

    /// A template pad,
    ///   representing a class of endpoints rather than a concrete
    ///   instance.
    pub fn template(
        name: impl Into<String>,
        dir: Dir,
        presence: Presence,
    ) -> Self {
        Self {
            presence,
            ty: PadTy::Template,
            ..Self::new(name, dir)
        }
    }

    /// Override the presence of this pad.
    pub fn with_presence(self, presence: Presence) -> Self {
        Self { presence, ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn ty(&self) -> PadTy {
        self.ty
    }

    pub fn is_ghost(&self) -> bool {
        self.ty == PadTy::Ghost
    }

    pub fn is_template(&self) -> bool {
        self.ty == PadTy::Template
    }
}

impl Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} pad `{}`", self.ty, self.dir, self.name)
    }
}

/// Direction of dataflow through a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    /// Data flows out of the owning element.
    Src,

    /// Data flows into the owning element.
    Sink,
}

impl Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Src => write!(f, "source"),
            Self::Sink => write!(f, "sink"),
        }
    }
}

/// Availability of a pad over the lifetime of its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present for the lifetime of the element.
    Always,

    /// Appears and disappears with the data being processed.
    Sometimes,

    /// Created on explicit request.
    Request,
}

impl Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Always => write!(f, "always-present"),
            Self::Sometimes => write!(f, "sometimes-present"),
            Self::Request => write!(f, "request"),
        }
    }
}

/// The structural kind of a pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadTy {
    /// An ordinary endpoint of a concrete element.
    Concrete,

    /// A relay endpoint crossing a container boundary.
    ///
    /// Transparent to link resolution when its container is of the
    ///   default kind;
    ///     addressed by name otherwise.
    Ghost,

    /// A class of endpoints rather than a concrete instance.
    Template,
}

impl Display for PadTy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Concrete => write!(f, "concrete"),
            Self::Ghost => write!(f, "ghost"),
            Self::Template => write!(f, "template"),
        }
    }
}
