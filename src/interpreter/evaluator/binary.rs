/// Routing of binary operators to their handlers.
pub mod core;

/// Arithmetic on Numbers.
pub mod scalar;

/// `JOIN` and string repetition.
pub mod string;

/// `LESSTHAN`, `MORETHAN`, `LESSEQUALS`, `MOREEQUALS`, `SAMEAS` and
/// `NOTSAMEAS`.
pub mod comparison;
