use std::mem;

use crate::interpreter::position::Span;

/// Arithmetic operators of the numeric chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `ADD`
    Add,
    /// `MINUS`
    Subtract,
    /// `MULTIPLY`
    Multiply,
    /// `DIVIDE`
    Divide,
}

/// Operators of the string chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOperator {
    /// `JOIN`: concatenation.
    Join,
    /// `MULTIPLY` with a String operand: repetition.
    Repeat,
}

/// Comparison operators. All of them produce a Boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// `LESSTHAN`
    LessThan,
    /// `MORETHAN`
    MoreThan,
    /// `LESSEQUALS`
    LessEquals,
    /// `MOREEQUALS`
    MoreEquals,
    /// `SAMEAS`
    SameAs,
    /// `NOTSAMEAS`
    NotSameAs,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Prefix `ADD`: returns the operand unchanged.
    Plus,
    /// Prefix `MINUS` or `-`: multiplies the operand by -1.
    Negate,
}

/// One node of the syntax tree.
///
/// Every node carries the source span it was parsed from (the union of its
/// children's spans) and an `output` flag. The flag is set by `OUTPUT[ ... ]`
/// and means "print this value when the node is executed as a statement".
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node is.
    pub kind:   NodeKind,
    /// Where the node came from.
    pub span:   Span,
    /// Whether executing the node as a statement prints its value.
    pub output: bool,
}

/// The closed set of node kinds the evaluator dispatches on.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An `INT` or `FLOAT` literal.
    NumberLiteral(f64),
    /// A `"..."` literal with escapes decoded.
    StringLiteral(String),
    /// `left (ADD|MINUS|MULTIPLY|DIVIDE) right`
    BinaryOp {
        left:  Box<Node>,
        op:    BinaryOperator,
        right: Box<Node>,
    },
    /// `left (JOIN|MULTIPLY) right` on the string chain.
    StringOp {
        left:  Box<Node>,
        op:    StringOperator,
        right: Box<Node>,
    },
    /// `left <comparison> right`
    ComparisonOp {
        left:  Box<Node>,
        op:    ComparisonOperator,
        right: Box<Node>,
    },
    /// Prefix `ADD` or `MINUS`.
    UnaryOp {
        op:      UnaryOperator,
        operand: Box<Node>,
    },
    /// A read of a variable.
    VarRef(String),
    /// `name EQUALS value`
    VarAssign {
        name:  String,
        value: Box<Node>,
    },
    /// `LENGTH operand`
    StringLength(Box<Node>),
    /// `IF c [..] (ELSEIF c [..])* (ELSE [..])?`
    Conditional {
        if_branch:       Branch,
        elseif_branches: Vec<Branch>,
        else_branch:     Option<ElseBranch>,
    },
    /// `FOR variable FROM from TO to [ body ]`, upper bound exclusive.
    ForLoop {
        variable: String,
        from:     Box<Node>,
        to:       Box<Node>,
        body:     Vec<Node>,
    },
    /// `BREAK`
    Break,
}

/// An `IF` or `ELSEIF` clause: a condition and the statements it guards.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Box<Node>,
    pub body:      Vec<Node>,
    /// From the keyword to the closing `]`.
    pub span:      Span,
}

/// The trailing `ELSE` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseBranch {
    pub body: Vec<Node>,
    pub span: Span,
}

impl Node {
    /// Creates a node that does not print.
    #[must_use]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind,
               span,
               output: false }
    }

    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        let span = left.span.to(right.span);
        Self::new(NodeKind::BinaryOp { left: Box::new(left),
                                       op,
                                       right: Box::new(right) },
                  span)
    }

    #[must_use]
    pub fn string_op(left: Self, op: StringOperator, right: Self) -> Self {
        let span = left.span.to(right.span);
        Self::new(NodeKind::StringOp { left: Box::new(left),
                                       op,
                                       right: Box::new(right) },
                  span)
    }

    #[must_use]
    pub fn comparison(left: Self, op: ComparisonOperator, right: Self) -> Self {
        let span = left.span.to(right.span);
        Self::new(NodeKind::ComparisonOp { left: Box::new(left),
                                           op,
                                           right: Box::new(right) },
                  span)
    }

    /// Wraps `operand` in a prefix operator written at `op_span`.
    #[must_use]
    pub fn unary(op: UnaryOperator, op_span: Span, operand: Self) -> Self {
        let span = op_span.to(operand.span);
        Self::new(NodeKind::UnaryOp { op,
                                      operand: Box::new(operand) },
                  span)
    }

    /// Returns `true` for statements that own a body (`IF`, `FOR`).
    ///
    /// Their inner statements print themselves; the compound statement's own
    /// value is never printed.
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self.kind, NodeKind::Conditional { .. } | NodeKind::ForLoop { .. })
    }
}

impl NodeKind {
    const fn is_leaf(&self) -> bool {
        matches!(self,
                 Self::NumberLiteral(_) | Self::StringLiteral(_) | Self::VarRef(_) | Self::Break)
    }

    /// Moves every child node that has children of its own into `pending`.
    fn detach_children(&mut self, pending: &mut Vec<Node>) {
        match self {
            Self::BinaryOp { left, right, .. }
            | Self::StringOp { left, right, .. }
            | Self::ComparisonOp { left, right, .. } => {
                detach(left, pending);
                detach(right, pending);
            },
            Self::UnaryOp { operand, .. }
            | Self::VarAssign { value: operand,
                                .. }
            | Self::StringLength(operand) => detach(operand, pending),
            Self::Conditional { if_branch,
                                elseif_branches,
                                else_branch, } => {
                for branch in std::iter::once(if_branch).chain(elseif_branches.iter_mut()) {
                    detach(&mut branch.condition, pending);
                    pending.append(&mut branch.body);
                }
                if let Some(branch) = else_branch {
                    pending.append(&mut branch.body);
                }
            },
            Self::ForLoop { from, to, body, .. } => {
                detach(from, pending);
                detach(to, pending);
                pending.append(body);
            },
            Self::NumberLiteral(_) | Self::StringLiteral(_) | Self::VarRef(_) | Self::Break => {},
        }
    }
}

fn detach(child: &mut Node, pending: &mut Vec<Node>) {
    if !child.kind.is_leaf() {
        let span = child.span;
        pending.push(mem::replace(child, Node::new(NodeKind::Break, span)));
    }
}

/// Operator chains grow one level per operator, so a long line builds a tree
/// far deeper than the call stack allows. Children are torn down from a heap
/// stack instead of by recursion.
impl Drop for NodeKind {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.kind.detach_children(&mut pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_a_long_chain_does_not_recurse() {
        let mut node = Node::new(NodeKind::NumberLiteral(1.0), Span::default());
        for _ in 0..200_000 {
            let right = Node::new(NodeKind::NumberLiteral(1.0), Span::default());
            node = Node::binary(node, BinaryOperator::Add, right);
        }
        for _ in 0..200_000 {
            node = Node::unary(UnaryOperator::Negate, Span::default(), node);
        }
        drop(node);
    }

    #[test]
    fn leaves_are_not_detached() {
        let mut kind = NodeKind::BinaryOp { left:  Box::new(Node::new(NodeKind::VarRef("x".into()),
                                                                      Span::default())),
                                            op:    BinaryOperator::Add,
                                            right: Box::new(Node::new(NodeKind::NumberLiteral(1.0),
                                                                      Span::default())), };
        let mut pending = Vec::new();
        kind.detach_children(&mut pending);
        assert!(pending.is_empty());
    }
}
