
pub use hit_test::{HitTarget, HitTest};
