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

//! Layout decisions that depend only on the kind of node being written.
//!
//! Parenthesization is deliberately conservative: rather than consulting a precedence table,
//! every non-assignment binary expression wraps itself in parentheses. Output may carry
//! parentheses a human wouldn't write, but it never loses grouping.

use flowscript_syntax::{
    BinaryOp, CompoundStatement, Declaration, Expression, IfStatement, Statement, UnaryOp,
};

pub fn binary_needs_parens(op: BinaryOp) -> bool {
    !op.is_assignment()
}

/// Conditions that are (parenthesized) binary expressions aren't wrapped a second time.
pub fn if_condition_needs_parens(condition: &Expression) -> bool {
    match condition {
        Expression::Binary(op, _, _) => !binary_needs_parens(*op),
        _ => true,
    }
}

/// Unary operands write themselves bare, so the operator has to group two kinds of operand:
/// assignments, which would otherwise capture the operator as their target, and operands whose
/// text starts with the operator's own sign (`-(-5)`, `++(++i)`), which would fuse into a
/// different token. Prefix operands of a postfix operator are grouped too (`(-x)++`).
pub fn unary_operand_needs_parens(op: UnaryOp, operand: &Expression) -> bool {
    match operand {
        Expression::Binary(inner, _, _) => inner.is_assignment(),
        _ if op.is_postfix() => {
            matches!(operand, Expression::Unary(inner, _) if !inner.is_postfix())
        }
        _ => leading_sign(operand).is_some_and(|sign| op.to_string().ends_with(sign)),
    }
}

/// The sign character an expression's text starts with, if any.
fn leading_sign(expr: &Expression) -> Option<char> {
    match expr {
        Expression::Int(value) if *value < 0 => Some('-'),
        Expression::Float(value) if value.is_sign_negative() => Some('-'),
        Expression::Unary(UnaryOp::Negation | UnaryOp::PrefixDecrement, _) => Some('-'),
        Expression::Unary(UnaryOp::PrefixIncrement, _) => Some('+'),
        Expression::Unary(op, operand) if op.is_postfix() => leading_sign(operand),
        Expression::MemberAccess { operand, .. } => leading_sign(operand),
        _ => None,
    }
}

/// Whether `;` and a newline follow the statement. Block-like statements, labels and comments
/// manage their own trailing whitespace, and `return` writes its own terminator.
pub fn statement_needs_terminator(stmt: &Statement) -> bool {
    match stmt {
        Statement::Compound(_)
        | Statement::For(_)
        | Statement::If(_)
        | Statement::Switch(_)
        | Statement::While(_)
        | Statement::Return(_)
        | Statement::Label(_)
        | Statement::Comment(_) => false,
        Statement::Declaration(decl) => declaration_needs_terminator(decl),
        Statement::Break
        | Statement::Continue
        | Statement::Goto(_)
        | Statement::Expression(_) => true,
    }
}

/// Procedures end in their closing brace (or their own `;` when they have no body).
pub fn declaration_needs_terminator(decl: &Declaration) -> bool {
    !matches!(decl, Declaration::Procedure(_))
}

/// Statements that place themselves on the line instead of being prefixed with the current
/// indentation. A bare `return` may not be written at all, blocks may continue the previous
/// line, `for` is preceded by a blank line and inline comments stay where the cursor is.
pub fn statement_positions_itself(stmt: &Statement) -> bool {
    matches!(
        stmt,
        Statement::Return(_) | Statement::Comment(_) | Statement::Compound(_) | Statement::For(_)
    )
}

/// An else branch holding nothing but another `if` is written as `else if`.
pub fn chained_else_if(else_body: &CompoundStatement) -> Option<&IfStatement> {
    match else_body.statements.as_slice() {
        [Statement::If(inner)] => Some(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowscript_syntax::{
        Comment, LabelDeclaration, ProcedureDeclaration, ReturnStatement, TypeIdentifier,
        VariableDeclaration,
    };
    use test_case::test_case;

    fn binary(op: BinaryOp) -> Expression {
        Expression::binary(op, Expression::id("a"), Expression::id("b"))
    }

    #[test_case(BinaryOp::Add, true)]
    #[test_case(BinaryOp::Eq, true)]
    #[test_case(BinaryOp::Or, true)]
    #[test_case(BinaryOp::Assign, false)]
    #[test_case(BinaryOp::MulAssign, false)]
    fn binary_parens(op: BinaryOp, expected: bool) {
        assert_eq!(binary_needs_parens(op), expected);
    }

    #[test]
    fn if_condition_parens() {
        assert!(!if_condition_needs_parens(&binary(BinaryOp::Eq)));
        assert!(!if_condition_needs_parens(&binary(BinaryOp::And)));
        assert!(if_condition_needs_parens(&binary(BinaryOp::Assign)));
        assert!(if_condition_needs_parens(&binary(BinaryOp::SubAssign)));
        assert!(if_condition_needs_parens(&Expression::id("flag")));
        assert!(if_condition_needs_parens(&Expression::call("f", vec![])));
        assert!(if_condition_needs_parens(&Expression::unary(
            UnaryOp::LogicalNot,
            binary(BinaryOp::Eq)
        )));
    }

    #[test_case(UnaryOp::Negation, Expression::Int(-5), true; "negative literal under negation")]
    #[test_case(UnaryOp::Negation, Expression::Int(5), false; "positive literal")]
    #[test_case(UnaryOp::Negation, Expression::Float(-0.5), true; "negative float")]
    #[test_case(UnaryOp::PrefixDecrement, Expression::Int(-1), true; "negative literal under decrement")]
    #[test_case(UnaryOp::Negation, Expression::unary(UnaryOp::Negation, Expression::id("x")), true; "double negation")]
    #[test_case(UnaryOp::Negation, Expression::unary(UnaryOp::PrefixDecrement, Expression::id("x")), true; "negated decrement")]
    #[test_case(UnaryOp::Negation, Expression::unary(UnaryOp::PrefixIncrement, Expression::id("x")), false; "negated increment")]
    #[test_case(UnaryOp::PrefixIncrement, Expression::unary(UnaryOp::PrefixIncrement, Expression::id("x")), true; "double increment")]
    #[test_case(UnaryOp::Negation, Expression::unary(UnaryOp::PostfixIncrement, Expression::id("x")), false; "negated postfix")]
    #[test_case(UnaryOp::LogicalNot, Expression::unary(UnaryOp::LogicalNot, Expression::id("x")), false; "double not")]
    #[test_case(UnaryOp::LogicalNot, binary(BinaryOp::Assign), true; "not over assignment")]
    #[test_case(UnaryOp::Negation, binary(BinaryOp::AddAssign), true; "negated compound assignment")]
    #[test_case(UnaryOp::LogicalNot, binary(BinaryOp::Eq), false; "comparison groups itself")]
    #[test_case(UnaryOp::PostfixIncrement, Expression::unary(UnaryOp::Negation, Expression::id("x")), true; "postfix over prefix")]
    #[test_case(UnaryOp::PostfixIncrement, Expression::id("i"), false; "postfix over identifier")]
    fn unary_parens(op: UnaryOp, operand: Expression, expected: bool) {
        assert_eq!(unary_operand_needs_parens(op, &operand), expected);
    }

    #[test]
    fn terminators() {
        assert!(statement_needs_terminator(&Statement::Break));
        assert!(statement_needs_terminator(&Statement::Continue));
        assert!(statement_needs_terminator(&Statement::expr(Expression::id("x"))));
        assert!(statement_needs_terminator(&Statement::Declaration(
            Declaration::Variable(VariableDeclaration::new("int", "x", None))
        )));

        assert!(!statement_needs_terminator(&Statement::block(vec![])));
        assert!(!statement_needs_terminator(&Statement::mk_if(
            Expression::Bool(true),
            vec![],
            None
        )));
        assert!(!statement_needs_terminator(&Statement::Return(ReturnStatement {
            value: None
        })));
        assert!(!statement_needs_terminator(&Statement::Label(LabelDeclaration {
            identifier: "top".into()
        })));
        assert!(!statement_needs_terminator(&Statement::Comment(Comment {
            content: "x".to_string(),
            inline: true
        })));
        assert!(!statement_needs_terminator(&Statement::Declaration(
            Declaration::Procedure(ProcedureDeclaration {
                return_type: TypeIdentifier::new("void"),
                identifier: "Main".into(),
                parameters: vec![],
                body: None,
            })
        )));
    }

    #[test]
    fn else_if_chaining() {
        let inner = Statement::mk_if(Expression::id("b"), vec![], None);
        assert!(chained_else_if(&CompoundStatement::new(vec![inner.clone()])).is_some());
        assert!(
            chained_else_if(&CompoundStatement::new(vec![inner, Statement::Break])).is_none()
        );
        assert!(chained_else_if(&CompoundStatement::new(vec![Statement::Break])).is_none());
        assert!(chained_else_if(&CompoundStatement::default()).is_none());
    }
}
