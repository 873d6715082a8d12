//! Hard limits bounding otherwise-unbounded work.

/// Abbreviation width used when a `TYPE_UE` / `TYPE_PARENT` placeholder
/// carries no spec, or an invalid one.
pub const DEFAULT_ABBREV_WIDTH: usize = 3;

/// Upper bound on the collision-suffix probe loop.
///
/// The suffix search is unbounded in principle; this caps it so that a
/// pathological vocabulary (thousands of concepts sharing one label
/// prefix under a single action) surfaces an error instead of spinning.
pub const MAX_ABBREVIATION_PROBES: usize = 1000;

/// First value a fresh sequence counter returns.
pub const FIRST_COUNTER_VALUE: i64 = 1;
