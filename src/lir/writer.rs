// LIR writer
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

//! Lower a LIR token stream into a byte stream via [`Write`].
//!
//! The writer guarantees the whitespace discipline of the output grammar:
//!   exactly one space between any two adjacent words,
//!   never two consecutive spaces,
//!   and no leading or trailing space.
//! It does so with a small state machine
//!   ([`WriterState`])
//!   threaded through each write operation,
//!     in place of the mutable need-space flag a hand-rolled emitter
//!     would otherwise smuggle through its recursion.
//!
//! A write failure of the underlying sink is the only fatal condition of
//!   the entire serializer;
//!     it is propagated immediately and unmodified.

use super::{escape::quote, Tok};
use std::io::{Error as IoError, Write};
use std::{result, str};

pub type Result<T = WriterState> = result::Result<T, Error>;

/// Error while writing a description.
#[derive(Debug)]
pub enum Error {
    Io(IoError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

/// Word-separation state of the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriterState {
    /// Nothing has been written yet;
    ///   the next word must not be preceded by a space.
    #[default]
    LineStart,

    /// A word has been written;
    ///   the next word must be preceded by exactly one space.
    Interword,
}

impl WriterState {
    #[inline]
    fn pad_if_interword<W: Write>(self, sink: &mut W) -> Result<()> {
        if self == Self::Interword {
            sink.write_all(b" ")?;
        }

        Ok(())
    }
}

/// Write a launch-style textual representation.
///
/// This trait is intended for use with LIR [`Tok`] streams.
/// Each write operation takes a previous [`WriterState`]
///   and transitions to a new [`WriterState`] after performing the write
///   operation
///     (which may be the same as the previous state).
/// This returned state must be provided to the next `write` operation to
///   produce valid output.
pub trait DescWriter: Sized {
    /// Write a textual representation into the provided sink.
    #[must_use = "Write operation may fail"]
    fn write<W: Write>(self, sink: &mut W, prev_state: WriterState) -> Result;

    /// Allocate a new buffer and write into it,
    ///   returning both the new buffer and the writer state.
    ///
    /// This is intended primarily for testing;
    ///   it is recommended that you use [`write`](DescWriter::write)
    ///   instead,
    ///     unless you _really_ need a new owned `Vec<u8>`.
    #[must_use]
    fn write_new(
        self,
        prev_state: WriterState,
    ) -> Result<(Vec<u8>, WriterState)> {
        let mut buf = Vec::<u8>::new();
        let state = self.write(&mut buf, prev_state)?;

        Ok((buf, state))
    }
}

impl DescWriter for Tok {
    fn write<W: Write>(self, sink: &mut W, prev_state: WriterState) -> Result {
        type S = WriterState; // More concise

        match self {
            Self::Factory(name) => {
                prev_state.pad_if_interword(sink)?;
                sink.write_all(name.as_bytes())?;

                Ok(S::Interword)
            }

            Self::Qualifier(name) => {
                prev_state.pad_if_interword(sink)?;
                sink.write_all(name.as_bytes())?;
                sink.write_all(b".")?;

                Ok(S::Interword)
            }

            Self::BinOpen => {
                prev_state.pad_if_interword(sink)?;
                sink.write_all(b"(")?;

                Ok(S::Interword)
            }

            Self::BinClose => {
                prev_state.pad_if_interword(sink)?;
                sink.write_all(b")")?;

                Ok(S::Interword)
            }

            Self::Attr(name, value) => {
                prev_state.pad_if_interword(sink)?;
                sink.write_all(name.as_bytes())?;
                sink.write_all(b"=")?;
                sink.write_all(quote(&value).as_bytes())?;

                Ok(S::Interword)
            }

            Self::Connect => {
                prev_state.pad_if_interword(sink)?;
                sink.write_all(b"!")?;

                Ok(S::Interword)
            }

            // An empty filter list renders as nothing;
            //   the emitter does not produce one,
            //     but a stray separator must not depend on that.
            Self::FilterList(specs) if specs.is_empty() => Ok(prev_state),

            Self::FilterList(specs) => {
                prev_state.pad_if_interword(sink)?;

                for (i, spec) in specs.iter().enumerate() {
                    if i > 0 {
                        sink.write_all(b":")?;
                    }

                    sink.write_all(quote(spec).as_bytes())?;
                }

                Ok(S::Interword)
            }

            // A fully elided pad reference renders as nothing at all,
            //   not even a separator.
            Self::PadRef {
                owner: None,
                pad: None,
            } => Ok(prev_state),

            Self::PadRef { owner, pad } => {
                prev_state.pad_if_interword(sink)?;

                if let Some(owner) = owner {
                    sink.write_all(owner.as_bytes())?;
                    sink.write_all(b".")?;
                }

                if let Some(pad) = pad {
                    sink.write_all(pad.as_bytes())?;
                }

                Ok(S::Interword)
            }
        }
    }
}

impl<I: Iterator<Item = Tok>> DescWriter for I {
    fn write<W: Write>(
        mut self,
        sink: &mut W,
        initial_state: WriterState,
    ) -> Result {
        self.try_fold(initial_state, |prev_state, tok| {
            tok.write(sink, prev_state)
        })
    }
}

/// Adapter lifting a fragment callback into a [`Write`] sink.
///
/// The serializer emits successive small text fragments;
///   this forwards each one to the wrapped closure so that callers can
///   stream output anywhere without materializing it first.
pub struct SinkFn<F: FnMut(&str) -> std::io::Result<()>>(pub F);

impl<F: FnMut(&str) -> std::io::Result<()>> Write for SinkFn<F> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // Every fragment written by the serializer is a complete UTF-8
        //   string,
        //     so this conversion cannot fail in practice.
        let frag = str::from_utf8(buf).map_err(|e| {
            IoError::new(std::io::ErrorKind::InvalidData, e)
        })?;

        (self.0)(frag)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
