// Processing elements on the pipeline graph
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

//! Processing elements.

use super::prop::Prop;
use std::fmt::{self, Display};

/// A processing element.
///
/// An element's `name` identifies it within its parent and is the name
///   used when a link must reference it explicitly;
///     its `factory` is the identity emitted for the node itself and is
///     the name under which the target grammar's parser will re-create
///     it.
/// The two are distinct namespaces and must not be conflated.
#[derive(Debug, PartialEq)]
pub struct Elem {
    name: String,
    factory: String,
    props: Vec<Prop>,
}

impl Elem {
    pub fn new(name: impl Into<String>, factory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: factory.into(),
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

    pub fn factory(&self) -> &str {
        &self.factory
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }
}

impl Display for Elem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "element `{}` ({})", self.name, self.factory)
    }
}
