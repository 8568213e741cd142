/// Core reduction logic.
///
/// Holds the per-evaluation state and the AND / OR fold passes that reduce an
/// expression tree to one outcome.
pub mod core;

/// Operand resolution.
///
/// Resolves groups, stored results and policy names, calls the caller's
/// resolver at most once per name, and converts resolver failures into
/// syntax errors.
pub mod resolve;

/// Three-valued logic.
///
/// Implements `AND` and `OR` over pass, fail and not-applicable outcomes.
pub mod logic;
