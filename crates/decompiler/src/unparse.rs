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

use std::io::Write;
use std::ptr;

use flowscript_syntax::{
    Comment, CompilationUnit, CompoundStatement, Declaration, EnumDeclaration,
    EnumValueDeclaration, Expression, ForStatement, FunctionDeclaration, Identifier, IfStatement,
    Import, Parameter, ProcedureDeclaration, ReturnStatement, Statement, SwitchLabel,
    SwitchStatement, VariableDeclaration, WhileStatement,
};
use tracing::{debug, trace, warn};

use crate::identifier::format_identifier;
use crate::literal::{
    format_bool, format_float, format_hex, format_int, format_string, format_uint,
};
use crate::options::{BraceStyle, UnparseOptions};
use crate::policy;
use crate::sink::OutputSink;

#[derive(Debug, thiserror::Error)]
pub enum UnparseError {
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed syntax tree: {0}")]
    MalformedTree(String),
    #[error("rendered output was not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Trees are expected to arrive complete; a missing piece is a bug in whatever built the tree,
/// so it's reported rather than papered over.
fn malformed(message: impl Into<String>) -> UnparseError {
    let message = message.into();
    warn!(%message, "refusing to unparse malformed tree");
    UnparseError::MalformedTree(message)
}

/// Context carried down the traversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope<'t> {
    procedure: Option<&'t ProcedureDeclaration>,
}

impl<'t> Scope<'t> {
    /// Outside of any procedure, e.g. at the top of a compilation unit.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn within(procedure: &'t ProcedureDeclaration) -> Self {
        Self {
            procedure: Some(procedure),
        }
    }

    pub fn procedure(&self) -> Option<&'t ProcedureDeclaration> {
        self.procedure
    }

    /// Whether `stmt` is the final statement of the enclosing procedure's body. Identity, not
    /// equality: an identical `return;` earlier in the body is not trailing.
    fn is_trailing(&self, stmt: &Statement) -> Result<bool, UnparseError> {
        let procedure = self
            .procedure
            .ok_or_else(|| malformed("return statement outside of a procedure"))?;
        Ok(procedure
            .body
            .as_ref()
            .and_then(|body| body.statements.last())
            .is_some_and(|last| ptr::eq(last, stmt)))
    }
}

/// Walks a syntax tree and writes it out as source. One `Unparser` owns one destination; use
/// a fresh one per compilation unit.
pub struct Unparser<W: Write> {
    sink: OutputSink<W>,
    options: UnparseOptions,
}

impl<W: Write> Unparser<W> {
    pub fn new(writer: W, options: UnparseOptions) -> Self {
        Self {
            sink: OutputSink::new(writer, options.indent_width),
            options,
        }
    }

    /// Flushes and hands back the destination.
    pub fn finish(mut self) -> Result<W, UnparseError> {
        self.sink.flush()?;
        Ok(self.sink.into_inner())
    }

    pub fn render_unit(&mut self, unit: &CompilationUnit) -> Result<(), UnparseError> {
        debug!(
            imports = unit.imports.len(),
            declarations = unit.declarations.len(),
            "unparsing compilation unit"
        );

        if !unit.imports.is_empty() {
            self.write_banner("Imports")?;
            for import in &unit.imports {
                self.render_import(import)?;
            }
        }

        let mut seen_function = false;
        let mut seen_variable = false;
        for decl in &unit.declarations {
            match decl {
                Declaration::Function(_) if !seen_function => {
                    self.write_banner("Function prototypes")?;
                    seen_function = true;
                }
                Declaration::Variable(_) if !seen_variable => {
                    self.write_banner("Script-level variable definitions")?;
                    seen_variable = true;
                }
                _ => {}
            }

            self.render_declaration(decl)?;
            if policy::declaration_needs_terminator(decl) {
                self.write_statement_end()?;
            }
        }
        Ok(())
    }

    /// Writes the declaration itself; the caller decides on the terminator.
    pub fn render_declaration(&mut self, decl: &Declaration) -> Result<(), UnparseError> {
        self.keeping_depth(|this| this.dispatch_declaration(decl))
    }

    /// On failure the indentation depth is put back, so the `Unparser` can go on to render other
    /// statements. Whatever was written before the failure, including a partial line, stays.
    pub fn render_statement(
        &mut self,
        stmt: &Statement,
        scope: Scope<'_>,
    ) -> Result<(), UnparseError> {
        self.keeping_depth(|this| this.dispatch_statement(stmt, scope))
    }

    fn keeping_depth(
        &mut self,
        render: impl FnOnce(&mut Self) -> Result<(), UnparseError>,
    ) -> Result<(), UnparseError> {
        let depth = self.sink.depth();
        let result = render(self);
        if result.is_err() {
            self.sink.restore_depth(depth);
        }
        result
    }

    fn dispatch_declaration(&mut self, decl: &Declaration) -> Result<(), UnparseError> {
        match decl {
            Declaration::Function(function) => self.render_function(function),
            Declaration::Variable(variable) => self.render_variable(variable),
            Declaration::Procedure(procedure) => self.render_procedure(procedure),
            Declaration::Enum(enumeration) => self.render_enum(enumeration),
            Declaration::EnumValue(value) => self.render_enum_value(value),
        }
    }

    fn dispatch_statement(
        &mut self,
        stmt: &Statement,
        scope: Scope<'_>,
    ) -> Result<(), UnparseError> {
        if !policy::statement_positions_itself(stmt) {
            self.sink.write_indentation()?;
        }

        match stmt {
            Statement::Compound(block) => self.render_compound(block, scope, false)?,
            Statement::If(if_stmt) => self.render_if(if_stmt, scope)?,
            Statement::While(while_stmt) => self.render_while(while_stmt, scope)?,
            Statement::For(for_stmt) => self.render_for(for_stmt, scope)?,
            Statement::Switch(switch) => self.render_switch(switch, scope)?,
            Statement::Return(ret) => self.render_return(stmt, ret, scope)?,
            Statement::Break => self.sink.write("break")?,
            Statement::Continue => self.sink.write("continue")?,
            Statement::Goto(goto) => {
                self.sink.write("goto ")?;
                self.write_identifier(&goto.label)?;
            }
            Statement::Label(label) => {
                self.write_identifier(&label.identifier)?;
                self.sink.write_line(":")?;
            }
            Statement::Comment(comment) => self.render_comment(comment)?,
            Statement::Expression(expr) => self.render_expression(expr)?,
            Statement::Declaration(decl) => self.render_declaration(decl)?,
        }

        if policy::statement_needs_terminator(stmt) {
            self.write_statement_end()?;
        }
        Ok(())
    }

    pub fn render_expression(&mut self, expr: &Expression) -> Result<(), UnparseError> {
        match expr {
            Expression::Bool(value) => self.sink.write(format_bool(*value))?,
            Expression::Int(value) => self.sink.write(&format_int(*value))?,
            Expression::UInt(value) => self.sink.write(&format_uint(*value))?,
            Expression::Float(value) => self.sink.write(&format_float(*value))?,
            Expression::String(content) => self.sink.write(&format_string(content))?,
            Expression::Identifier(identifier) => self.write_identifier(identifier)?,
            Expression::TypeIdentifier(type_identifier) => {
                self.sink.write(type_identifier.text())?
            }
            Expression::MemberAccess { operand, member } => {
                self.render_expression(operand)?;
                self.sink.write(".")?;
                self.write_identifier(member)?;
            }
            Expression::Call {
                function,
                arguments,
            } => {
                if function.text().is_empty() {
                    return Err(malformed("call without a function name"));
                }
                self.write_identifier(function)?;
                self.sink.write("(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.sink.write(", ")?;
                    }
                    self.render_expression(argument)?;
                }
                self.sink.write(")")?;
            }
            Expression::Unary(op, operand) => {
                if !op.is_postfix() {
                    self.sink.write(&op.to_string())?;
                }
                let parens = policy::unary_operand_needs_parens(*op, operand);
                if parens {
                    self.sink.write("(")?;
                }
                self.render_expression(operand)?;
                if parens {
                    self.sink.write(")")?;
                }
                if op.is_postfix() {
                    self.sink.write(&op.to_string())?;
                }
            }
            Expression::Binary(op, left, right) => {
                let parens = policy::binary_needs_parens(*op);
                if parens {
                    self.sink.write("(")?;
                }
                self.render_expression(left)?;
                self.sink.write(&format!(" {op} "))?;
                self.render_expression(right)?;
                if parens {
                    self.sink.write(")")?;
                }
            }
        }
        Ok(())
    }

    fn render_import(&mut self, import: &Import) -> Result<(), UnparseError> {
        self.sink.write("import(")?;
        self.sink.write(&format_string(&import.file_name))?;
        self.sink.write(")")?;
        self.write_statement_end()
    }

    fn render_function(&mut self, function: &FunctionDeclaration) -> Result<(), UnparseError> {
        if function.identifier.text().is_empty() {
            return Err(malformed(format!(
                "function prototype {} has no name",
                format_hex(function.index)
            )));
        }
        self.sink.write("function(")?;
        self.sink.write(&format_hex(function.index))?;
        self.sink.write(") ")?;
        self.sink.write(function.return_type.text())?;
        self.sink.write(" ")?;
        self.write_identifier(&function.identifier)?;
        self.write_parameters(&function.parameters)
    }

    fn render_procedure(&mut self, procedure: &ProcedureDeclaration) -> Result<(), UnparseError> {
        if procedure.identifier.text().is_empty() {
            return Err(malformed("procedure without a name"));
        }
        debug!(
            procedure = procedure.identifier.text(),
            statements = procedure.body.as_ref().map_or(0, |b| b.statements.len()),
            "unparsing procedure"
        );

        self.sink.write(procedure.return_type.text())?;
        self.sink.write(" ")?;
        self.write_identifier(&procedure.identifier)?;
        self.write_parameters(&procedure.parameters)?;
        match &procedure.body {
            None => self.write_statement_end(),
            Some(body) => self.render_compound(body, Scope::within(procedure), false),
        }
    }

    fn render_variable(&mut self, variable: &VariableDeclaration) -> Result<(), UnparseError> {
        if let Some(modifier) = &variable.modifier {
            self.sink.write(&modifier.kind.to_string())?;
            if let Some(index) = modifier.index {
                self.sink.write("(")?;
                self.sink.write(&format_uint(index))?;
                self.sink.write(")")?;
            }
            self.sink.write(" ")?;
        }

        self.sink.write(variable.type_identifier.text())?;
        self.sink.write(" ")?;
        self.write_identifier(&variable.identifier)?;

        if let Some(initializer) = &variable.initializer {
            self.sink.write(" = ")?;
            self.render_expression(initializer)?;
        }
        Ok(())
    }

    /// The closing brace is left open so the caller's terminator lands as `};`.
    fn render_enum(&mut self, enumeration: &EnumDeclaration) -> Result<(), UnparseError> {
        self.sink.write("enum ")?;
        self.write_identifier(&enumeration.identifier)?;
        self.open_block()?;
        let count = enumeration.values.len();
        for (i, value) in enumeration.values.iter().enumerate() {
            self.sink.write_indentation()?;
            self.render_enum_value(value)?;
            if i + 1 < count {
                self.sink.write_line(",")?;
            } else {
                self.sink.new_line()?;
            }
        }
        self.close_block(true)
    }

    fn render_enum_value(&mut self, value: &EnumValueDeclaration) -> Result<(), UnparseError> {
        self.write_identifier(&value.identifier)?;
        self.sink.write(" = ")?;
        self.render_expression(&value.value)
    }

    /// With `suppress_newline` the closing brace is left mid-line, for a following `else`.
    fn render_compound(
        &mut self,
        block: &CompoundStatement,
        scope: Scope<'_>,
        suppress_newline: bool,
    ) -> Result<(), UnparseError> {
        self.open_block()?;
        for stmt in &block.statements {
            self.render_statement(stmt, scope)?;
        }
        self.close_block(suppress_newline)
    }

    /// Loop and branch bodies are normally blocks, but a lone statement is written on its own
    /// line one level deeper.
    fn render_body(
        &mut self,
        body: &Statement,
        scope: Scope<'_>,
        suppress_newline: bool,
    ) -> Result<(), UnparseError> {
        match body {
            Statement::Compound(block) => self.render_compound(block, scope, suppress_newline),
            other => {
                self.sink.break_line()?;
                self.sink.increase_indentation();
                self.render_statement(other, scope)?;
                self.sink.decrease_indentation();
                Ok(())
            }
        }
    }

    fn render_if(&mut self, if_stmt: &IfStatement, scope: Scope<'_>) -> Result<(), UnparseError> {
        if if_stmt.body.is_none() && if_stmt.else_body.is_none() {
            return Err(malformed("if statement with neither a body nor an else branch"));
        }

        self.sink.write("if ")?;
        let parens = policy::if_condition_needs_parens(&if_stmt.condition);
        if parens {
            self.sink.write("(")?;
        }
        self.render_expression(&if_stmt.condition)?;
        if parens {
            self.sink.write(")")?;
        }

        let Some(else_body) = &if_stmt.else_body else {
            return match if_stmt.body.as_deref() {
                Some(body) => self.render_body(body, scope, false),
                None => Ok(()),
            };
        };

        match if_stmt.body.as_deref() {
            Some(body) => self.render_body(body, scope, true)?,
            None => self.render_compound(&CompoundStatement::default(), scope, true)?,
        }

        self.write_else()?;
        match policy::chained_else_if(else_body) {
            Some(chained) => {
                self.sink.write(" ")?;
                self.render_if(chained, scope)
            }
            None => self.render_compound(else_body, scope, false),
        }
    }

    fn render_while(
        &mut self,
        while_stmt: &WhileStatement,
        scope: Scope<'_>,
    ) -> Result<(), UnparseError> {
        self.sink.write("while (")?;
        self.render_expression(&while_stmt.condition)?;
        self.sink.write(")")?;
        self.render_body(&while_stmt.body, scope, false)
    }

    fn render_for(
        &mut self,
        for_stmt: &ForStatement,
        scope: Scope<'_>,
    ) -> Result<(), UnparseError> {
        self.sink.break_line()?;
        self.sink.new_line()?;
        self.sink.write_indented("for (")?;
        self.render_expression(&for_stmt.initializer)?;
        self.sink.write("; ")?;
        self.render_expression(&for_stmt.condition)?;
        self.sink.write("; ")?;
        self.render_expression(&for_stmt.after_loop)?;
        self.sink.write(")")?;
        self.render_body(&for_stmt.body, scope, false)
    }

    fn render_switch(
        &mut self,
        switch: &SwitchStatement,
        scope: Scope<'_>,
    ) -> Result<(), UnparseError> {
        let defaults = switch
            .labels
            .iter()
            .filter(|label| matches!(label, SwitchLabel::Default { .. }))
            .count();
        if defaults > 1 {
            return Err(malformed(format!(
                "switch statement has {defaults} default labels"
            )));
        }

        self.sink.write("switch (")?;
        self.render_expression(&switch.switch_on)?;
        self.sink.write(")")?;
        self.open_block()?;
        for label in &switch.labels {
            let body = match label {
                SwitchLabel::Condition { condition, body } => {
                    self.sink.write_indented("case ")?;
                    self.render_expression(condition)?;
                    self.sink.write_line(":")?;
                    body
                }
                SwitchLabel::Default { body } => {
                    self.sink.write_indented_line("default:")?;
                    body
                }
            };
            self.sink.increase_indentation();
            for stmt in body {
                self.render_statement(stmt, scope)?;
            }
            self.sink.decrease_indentation();
        }
        self.close_block(false)
    }

    fn render_return(
        &mut self,
        stmt: &Statement,
        ret: &ReturnStatement,
        scope: Scope<'_>,
    ) -> Result<(), UnparseError> {
        match &ret.value {
            Some(value) => {
                self.sink.write_indented("return ")?;
                self.render_expression(value)?;
            }
            None => {
                let trailing = scope.is_trailing(stmt)?;
                if trailing && self.options.elide_trailing_return {
                    trace!(
                        procedure = scope.procedure().map(|p| p.identifier.text()),
                        "eliding trailing return"
                    );
                    return Ok(());
                }
                self.sink.write_indented("return")?;
            }
        }
        self.write_statement_end()
    }

    fn render_comment(&mut self, comment: &Comment) -> Result<(), UnparseError> {
        if comment.inline {
            self.sink.write("/* ")?;
            self.sink.write(&comment.content)?;
            self.sink.write(" */")?;
            return Ok(());
        }
        self.write_comment(&comment.content)
    }

    fn write_comment(&mut self, content: &str) -> Result<(), UnparseError> {
        if content.contains('\n') {
            // Block comments close with "/*", not "*/". Scripts in the wild are written this
            // way and the parser accepts it.
            self.sink.write_indented("/* ")?;
            self.sink.write(content)?;
            self.sink.write_line(" /*")?;
        } else if content.is_empty() {
            self.sink.write_indented_line("//")?;
        } else {
            self.sink.write_indented("// ")?;
            self.sink.write_line(content)?;
        }
        Ok(())
    }

    fn write_banner(&mut self, title: &str) -> Result<(), UnparseError> {
        if !self.options.section_banners {
            return Ok(());
        }
        self.sink.new_line()?;
        self.write_comment("")?;
        self.write_comment(title)?;
        self.write_comment("")?;
        self.sink.new_line()?;
        Ok(())
    }

    fn open_block(&mut self) -> Result<(), UnparseError> {
        match self.options.brace_style {
            BraceStyle::SameLine if self.sink.is_inside_line() => self.sink.write_line(" {")?,
            _ => {
                self.sink.break_line()?;
                self.sink.write_indented_line("{")?;
            }
        }
        self.sink.increase_indentation();
        Ok(())
    }

    fn close_block(&mut self, suppress_newline: bool) -> Result<(), UnparseError> {
        self.sink.decrease_indentation();
        self.sink.break_line()?;
        self.sink.write_indented("}")?;
        if !suppress_newline {
            self.sink.new_line()?;
        }
        Ok(())
    }

    fn write_else(&mut self) -> Result<(), UnparseError> {
        match self.options.brace_style {
            BraceStyle::SameLine if self.sink.is_inside_line() => self.sink.write(" else")?,
            _ => {
                self.sink.break_line()?;
                self.sink.write_indented("else")?;
            }
        }
        Ok(())
    }

    fn write_parameters(&mut self, parameters: &[Parameter]) -> Result<(), UnparseError> {
        self.sink.write("(")?;
        for (i, parameter) in parameters.iter().enumerate() {
            if i > 0 {
                self.sink.write(", ")?;
            }
            self.sink.write(parameter.type_identifier.text())?;
            self.sink.write(" ")?;
            self.write_identifier(&parameter.identifier)?;
        }
        self.sink.write(")")?;
        Ok(())
    }

    fn write_identifier(&mut self, identifier: &Identifier) -> Result<(), UnparseError> {
        self.sink.write(&format_identifier(identifier.text()))?;
        Ok(())
    }

    fn write_statement_end(&mut self) -> Result<(), UnparseError> {
        self.sink.write_line(";")?;
        Ok(())
    }
}

/// Renders a compilation unit to a string with the default layout.
pub fn unparse(unit: &CompilationUnit) -> Result<String, UnparseError> {
    unparse_with_options(unit, &UnparseOptions::default())
}

pub fn unparse_with_options(
    unit: &CompilationUnit,
    options: &UnparseOptions,
) -> Result<String, UnparseError> {
    let mut buffer = Vec::new();
    unparse_to_writer(unit, &mut buffer, options)?;
    Ok(String::from_utf8(buffer)?)
}

/// Renders straight into `writer`, which is dropped when this returns, whether or not rendering
/// succeeded. Output already written before a failure stays written.
pub fn unparse_to_writer<W: Write>(
    unit: &CompilationUnit,
    writer: W,
    options: &UnparseOptions,
) -> Result<(), UnparseError> {
    let mut unparser = Unparser::new(writer, options.clone());
    unparser.render_unit(unit)?;
    unparser.finish()?;
    Ok(())
}
