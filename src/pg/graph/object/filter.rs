// Inline caps filters on the pipeline graph
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

//! Inline caps filters.

use super::prop::{CapsSpec, Prop, Value};
use std::fmt::{self, Display};

/// An inline caps filter.
///
/// A filter is a single-purpose element with one sink and one source pad
///   whose sole semantic content is its [`CapsSpec`].
/// By default policy it is never emitted as a standalone node:
///   link resolution threads through it and folds its spec into the
///   connecting syntax.
/// Under the filters-as-elements policy
///   (or when a filter is itself the serialization root)
///   it is emitted in its element rendition instead;
///     see [`Filter::caps_prop`].
#[derive(Debug, PartialEq)]
pub struct Filter {
    name: String,
    spec: CapsSpec,
}

impl Filter {
    /// Factory identity of the element rendition.
    pub const FACTORY: &'static str = "capsfilter";

    pub fn new(name: impl Into<String>, spec: CapsSpec) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &CapsSpec {
        &self.spec
    }

    /// The filter's spec as the attribute of its element rendition.
    ///
    /// The wildcard spec is the declared default,
    ///   so a filter that constrains nothing serializes as a bare
    ///   `capsfilter` under the usual elision rules.
    pub fn caps_prop(&self) -> Prop {
        Prop::new("caps", Value::Caps(self.spec.clone()))
            .with_default(Value::Caps(CapsSpec::Any))
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "inline filter `{}`", self.name)
    }
}
