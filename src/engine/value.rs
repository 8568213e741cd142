/// Outcome types.
///
/// Defines the resolver's boundary outcome, the narrower three-valued outcome
/// used during reduction, and the final satisfied / not satisfied verdict.
pub mod outcome;
