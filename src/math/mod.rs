pub mod bezier_2d;
pub mod distance_2d;
pub mod miter_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Radius within which wall endpoints merge into a shared junction point,
/// in plan units (screen-space when divided by zoom).
pub const MERGE_THRESHOLD: f64 = 15.0;

/// First/last distance below which a wall centerline counts as closed.
pub const CLOSE_TOLERANCE: f64 = 5.0;

/// Segments shorter than this are skipped during open-wall extrusion.
pub const MIN_SEGMENT_LENGTH: f64 = 5.0;

/// Screen-space hit radius for a wall body.
pub const WALL_HIT_THRESHOLD: f64 = 10.0;

/// Screen-space hit radius for a wall endpoint.
pub const ENDPOINT_HIT_THRESHOLD: f64 = 8.0;

/// Screen-space radius for endpoint hover highlighting.
pub const ENDPOINT_HOVER_THRESHOLD: f64 = 12.0;
