use crate::expr::{self, Expr};

/// Renders an expression in prefix form, e.g. `(+ (1.000000 2.000000))`.
/// This is a debugging view of the tree, not a re-printing of the source.
pub fn render(e: &Expr) -> String {
    let mut printer = AstPrinter {};
    e.accept(&mut printer)
}

struct AstPrinter;

impl AstPrinter {
    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut s = String::new();
        s.push('(');
        s.push_str(name);
        s.push(' ');

        let rendered: Vec<_> = exprs.iter().map(|e| e.accept(self)).collect();
        match rendered.as_slice() {
            [single] => s.push_str(single),
            operands => {
                s.push('(');
                s.push_str(operands.join(" ").as_str());
                s.push(')');
            }
        }

        s.push(')');
        s
    }
}

impl expr::Visitor<String> for AstPrinter {
    fn visit_binary_expr(&mut self, e: &expr::Binary) -> String {
        self.parenthesize(
            e.op.lexeme(),
            &[e.left.as_ref(), e.right.as_ref()]
        )
    }

    fn visit_grouping_expr(&mut self, e: &expr::Grouping) -> String {
        self.parenthesize(
            "group",
            &[e.expression.as_ref()]
        )
    }

    fn visit_literal_expr(&mut self, e: &expr::Literal) -> String {
        e.value.to_string()
    }

    fn visit_unary_expr(&mut self, e: &expr::Unary) -> String {
        self.parenthesize(
            e.op.lexeme(),
            &[e.right.as_ref()]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        token::{Token, TokenKind},
        value::Literal,
    };

    fn number(n: f32) -> Box<Expr> {
        Box::new(Expr::new_literal(Literal::Number(n)))
    }

    #[test]
    fn string_literal() {
        let e = Expr::new_literal(Literal::String("yes".into()));
        assert_eq!("yes", render(&e));
    }

    #[test]
    fn bool_and_null_literals() {
        assert_eq!("true", render(&Expr::new_literal(Literal::Bool(true))));
        assert_eq!("false", render(&Expr::new_literal(Literal::Bool(false))));
        assert_eq!("null", render(&Expr::new_literal(Literal::Null)));
    }

    #[test]
    fn numbers_render_with_six_decimals() {
        assert_eq!("531.900024", render(&number(531.9)));
        assert_eq!("0.000000", render(&number(0.0)));
    }

    #[test]
    fn grouped_number() {
        let e = Expr::new_grouping(number(4.0));
        assert_eq!("(group 4.000000)", render(&e));
    }

    #[test]
    fn binary_expression_with_unary_and_grouping_sub_exprs() {
        let e = Expr::new_binary(
            Box::new(Expr::new_unary(
                Token::new(TokenKind::Minus, "-", None, 1, 1),
                number(123.0),
            )),
            Token::new(TokenKind::Star, "*", None, 1, 6),
            Box::new(Expr::new_grouping(number(45.5))),
        );
        assert_eq!("(* ((- 123.000000) (group 45.500000)))", render(&e));
    }

    #[test]
    fn rendering_twice_gives_the_same_text() {
        let e = Expr::new_unary(
            Token::new(TokenKind::Bang, "!", None, 1, 1),
            Box::new(Expr::new_literal(Literal::Bool(false))),
        );
        assert_eq!(render(&e), render(&e));
        assert_eq!("(! false)", render(&e));
    }
}
