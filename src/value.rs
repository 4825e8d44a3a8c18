use std::fmt::{self, Display};

/// A decoded literal, as carried by `Number`/`String` tokens and by
/// literal nodes in the tree.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Bool(bool),
    Null,
    Number(f32),
    String(String),
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Literal::*;
        match self {
            Bool(b) => write!(f, "{}", b),
            Null => write!(f, "null"),
            Number(n) => write!(f, "{:.6}", n),
            String(s) => write!(f, "{}", s),
        }
    }
}
