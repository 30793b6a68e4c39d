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

//! The abstract syntax tree for FlowScript, as produced by the parser or by decompilation of
//! compiled scripts.

use std::fmt::Display;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// The name of a value type, e.g. `int`, `float`, `void`. Type names are keywords and are
/// never escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentifier(pub String);

impl TypeIdentifier {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeIdentifier {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    LogicalNot,
    Negation,
    PrefixIncrement,
    PrefixDecrement,
    PostfixIncrement,
    PostfixDecrement,
}

impl UnaryOp {
    pub fn is_postfix(&self) -> bool {
        matches!(self, Self::PostfixIncrement | Self::PostfixDecrement)
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LogicalNot => write!(f, "!"),
            Self::Negation => write!(f, "-"),
            Self::PrefixIncrement | Self::PostfixIncrement => write!(f, "++"),
            Self::PrefixDecrement | Self::PostfixDecrement => write!(f, "--"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NEq,
    Lt,
    LtE,
    Gt,
    GtE,
    And,
    Or,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

impl BinaryOp {
    /// Plain and compound assignment.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            Self::Assign | Self::AddAssign | Self::SubAssign | Self::MulAssign | Self::DivAssign
        )
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Eq => write!(f, "=="),
            Self::NEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::LtE => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::GtE => write!(f, ">="),
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
            Self::Assign => write!(f, "="),
            Self::AddAssign => write!(f, "+="),
            Self::SubAssign => write!(f, "-="),
            Self::MulAssign => write!(f, "*="),
            Self::DivAssign => write!(f, "/="),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Bool(bool),
    Int(i32),
    UInt(u32),
    /// Single precision, matching the script VM's float registers.
    Float(f32),
    /// Content is stored as it should appear between the quotes.
    String(String),
    Identifier(Identifier),
    TypeIdentifier(TypeIdentifier),
    MemberAccess {
        operand: Box<Expression>,
        member: Identifier,
    },
    Call {
        function: Identifier,
        arguments: Vec<Expression>,
    },
    Unary(UnaryOp, Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn id(name: &str) -> Self {
        Self::Identifier(Identifier::new(name))
    }

    pub fn string(content: &str) -> Self {
        Self::String(content.to_string())
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Self::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn assign(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOp::Assign, left, right)
    }

    pub fn call(function: &str, arguments: Vec<Expression>) -> Self {
        Self::Call {
            function: Identifier::new(function),
            arguments,
        }
    }

    pub fn member(operand: Expression, member: &str) -> Self {
        Self::MemberAccess {
            operand: Box::new(operand),
            member: Identifier::new(member),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub type_identifier: TypeIdentifier,
    pub identifier: Identifier,
}

impl Parameter {
    pub fn new(type_name: &str, name: &str) -> Self {
        Self {
            type_identifier: TypeIdentifier::new(type_name),
            identifier: Identifier::new(name),
        }
    }
}

/// Storage class keywords for variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum VariableModifierKind {
    Global,
    #[strum(serialize = "const")]
    Constant,
    AiLocal,
    AiGlobal,
    Bit,
    Count,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableModifier {
    pub kind: VariableModifierKind,
    /// Explicit storage slot, e.g. `global(12)`.
    pub index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// The index of the native function in the VM's function table.
    pub index: u32,
    pub return_type: TypeIdentifier,
    pub identifier: Identifier,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureDeclaration {
    pub return_type: TypeIdentifier,
    pub identifier: Identifier,
    pub parameters: Vec<Parameter>,
    /// `None` for a forward declaration.
    pub body: Option<CompoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub modifier: Option<VariableModifier>,
    pub type_identifier: TypeIdentifier,
    pub identifier: Identifier,
    pub initializer: Option<Expression>,
}

impl VariableDeclaration {
    pub fn new(type_name: &str, name: &str, initializer: Option<Expression>) -> Self {
        Self {
            modifier: None,
            type_identifier: TypeIdentifier::new(type_name),
            identifier: Identifier::new(name),
            initializer,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDeclaration {
    pub identifier: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDeclaration {
    pub identifier: Identifier,
    pub values: Vec<EnumValueDeclaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Function(FunctionDeclaration),
    Variable(VariableDeclaration),
    Procedure(ProcedureDeclaration),
    Enum(EnumDeclaration),
    EnumValue(EnumValueDeclaration),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundStatement {
    pub statements: Vec<Statement>,
}

impl CompoundStatement {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    /// Decompiled trees may drop an empty consequent when an else branch exists.
    pub body: Option<Box<Statement>>,
    pub else_body: Option<CompoundStatement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub initializer: Expression,
    pub condition: Expression,
    pub after_loop: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Condition {
        condition: Expression,
        body: Vec<Statement>,
    },
    Default {
        body: Vec<Statement>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub switch_on: Expression,
    pub labels: Vec<SwitchLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoStatement {
    pub label: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDeclaration {
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub content: String,
    /// Inline comments are written as `/* .. */` on the current line.
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Compound(CompoundStatement),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    Switch(SwitchStatement),
    Return(ReturnStatement),
    Break,
    Continue,
    Goto(GotoStatement),
    Label(LabelDeclaration),
    Comment(Comment),
    Expression(Expression),
    Declaration(Declaration),
}

impl Statement {
    pub fn expr(expression: Expression) -> Self {
        Self::Expression(expression)
    }

    pub fn block(statements: Vec<Statement>) -> Self {
        Self::Compound(CompoundStatement::new(statements))
    }

    pub fn mk_return(value: Expression) -> Self {
        Self::Return(ReturnStatement { value: Some(value) })
    }

    pub fn mk_return_none() -> Self {
        Self::Return(ReturnStatement { value: None })
    }

    pub fn mk_if(
        condition: Expression,
        body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
    ) -> Self {
        Self::If(IfStatement {
            condition,
            body: Some(Box::new(Self::block(body))),
            else_body: else_body.map(CompoundStatement::new),
        })
    }

    pub fn comment(content: &str) -> Self {
        Self::Comment(Comment {
            content: content.to_string(),
            inline: false,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub file_name: String,
}

/// The root of one source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn modifier_keywords() {
        assert_eq!(VariableModifierKind::Global.to_string(), "global");
        assert_eq!(VariableModifierKind::Constant.to_string(), "const");
        assert_eq!(VariableModifierKind::AiLocal.to_string(), "ai_local");
        assert_eq!(VariableModifierKind::AiGlobal.to_string(), "ai_global");
        assert_eq!(VariableModifierKind::Bit.to_string(), "bit");
        assert_eq!(VariableModifierKind::Count.to_string(), "count");
    }

    #[test]
    fn assignment_family() {
        for op in [
            BinaryOp::Assign,
            BinaryOp::AddAssign,
            BinaryOp::SubAssign,
            BinaryOp::MulAssign,
            BinaryOp::DivAssign,
        ] {
            assert!(op.is_assignment(), "{op} should be an assignment");
        }
        for op in [BinaryOp::Add, BinaryOp::Eq, BinaryOp::And, BinaryOp::LtE] {
            assert!(!op.is_assignment(), "{op} should not be an assignment");
        }
    }

    #[test]
    fn unary_fixity() {
        assert!(UnaryOp::PostfixIncrement.is_postfix());
        assert!(UnaryOp::PostfixDecrement.is_postfix());
        assert!(!UnaryOp::PrefixIncrement.is_postfix());
        assert_eq!(UnaryOp::PostfixDecrement.to_string(), "--");
        assert_eq!(UnaryOp::LogicalNot.to_string(), "!");
    }
}
