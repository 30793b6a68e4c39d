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

//! The FlowScript syntax tree.
//!
//! Trees are built by the parser or by control-flow recovery over compiled scripts, and are
//! consumed read-only by the unparser in `flowscript-decompiler`.

mod ast;

pub use crate::ast::{
    BinaryOp, Comment, CompilationUnit, CompoundStatement, Declaration, EnumDeclaration,
    EnumValueDeclaration, Expression, ForStatement, FunctionDeclaration, GotoStatement,
    Identifier, IfStatement, Import, LabelDeclaration, Parameter, ProcedureDeclaration,
    ReturnStatement, Statement, SwitchLabel, SwitchStatement, TypeIdentifier, UnaryOp,
    VariableDeclaration, VariableModifier, VariableModifierKind, WhileStatement,
};
