use crate::token::Token;
use crate::value;

macro_rules! generate_ast {
    ($($typename:ident => $visitname:ident, $newname:ident { $($propname:ident: $proptype:ty),+ });+ $(;)?) => {
        #[derive(Debug, PartialEq, Clone)]
        pub enum Expr {
            $($typename($typename)),+
        }

        $(
            #[derive(Debug, PartialEq, Clone)]
            pub struct $typename {
                $(pub $propname: $proptype),+
            }
        )+

        /// One method per node kind, dispatched by `Expr::accept`.
        pub trait Visitor<T> {
            $(fn $visitname(&mut self, e: &$typename) -> T;)+
        }

        impl Expr {
            pub fn accept<T, V: Visitor<T>>(&self, v: &mut V) -> T {
                match self {
                    $(Expr::$typename(a) => v.$visitname(a),)+
                }
            }

            $(
                pub fn $newname($($propname: $proptype),+) -> Expr {
                    Expr::$typename($typename { $($propname),+ })
                }
            )+
        }
    };
}

generate_ast!(
    Binary   => visit_binary_expr,   new_binary   { left: Box<Expr>, op: Token, right: Box<Expr> };
    Grouping => visit_grouping_expr, new_grouping { expression: Box<Expr> };
    Literal  => visit_literal_expr,  new_literal  { value: value::Literal };
    Unary    => visit_unary_expr,    new_unary    { op: Token, right: Box<Expr> };
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    struct NodeCounter {
        count: usize,
    }

    impl Visitor<()> for NodeCounter {
        fn visit_binary_expr(&mut self, e: &Binary) {
            self.count += 1;
            e.left.accept(self);
            e.right.accept(self);
        }

        fn visit_grouping_expr(&mut self, e: &Grouping) {
            self.count += 1;
            e.expression.accept(self);
        }

        fn visit_literal_expr(&mut self, _e: &Literal) {
            self.count += 1;
        }

        fn visit_unary_expr(&mut self, e: &Unary) {
            self.count += 1;
            e.right.accept(self);
        }
    }

    #[test]
    fn accept_routes_to_every_node() {
        let minus = Token::new(TokenKind::Minus, "-", None, 1, 1);
        let plus = Token::new(TokenKind::Plus, "+", None, 1, 3);
        let e = Expr::new_binary(
            Box::new(Expr::new_unary(minus, Box::new(Expr::new_literal(value::Literal::Number(1.0))))),
            plus,
            Box::new(Expr::new_grouping(Box::new(Expr::new_literal(true.into())))),
        );

        let mut counter = NodeCounter { count: 0 };
        e.accept(&mut counter);
        assert_eq!(5, counter.count);
    }

    #[test]
    fn constructors_build_the_matching_variant() {
        let e = Expr::new_literal(value::Literal::Null);
        assert_eq!(Expr::Literal(Literal { value: value::Literal::Null }), e);
    }
}
