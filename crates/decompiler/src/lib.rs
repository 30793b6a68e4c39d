// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Turns FlowScript syntax trees back into source text.
//!
//! This is the last stage of decompilation: the tree arrives fully built (from the parser or
//! from control-flow recovery over compiled scripts) and is written out as consistently
//! formatted source that parses back into an equivalent tree.

mod identifier;
mod literal;
mod options;
mod policy;
mod sink;
mod unparse;


pub use crate::identifier::{format_identifier, is_valid_identifier};
pub use crate::literal::{
    format_bool, format_float, format_hex, format_int, format_string, format_uint, is_flag_like,
};
pub use crate::options::{BraceStyle, UnparseOptions};
pub use crate::sink::OutputSink;
pub use crate::unparse::{
    Scope, UnparseError, Unparser, unparse, unparse_to_writer, unparse_with_options,
};
