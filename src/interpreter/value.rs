/// Runtime values.
///
/// Defines the `Value` tagged union produced by evaluation: Numbers, Strings
/// and Booleans, with their display rules and type names for diagnostics.
pub mod core;
