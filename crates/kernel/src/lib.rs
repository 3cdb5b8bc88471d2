//! Box kernel: the animation state the frame driver advances, and the fixed
//! quad it draws.
//!
//! # Invariants
//! - The offset only changes through `FallState::advance`, once per frame.
//! - The quad is built once and never resized.

pub mod fall;
pub mod quad;

pub use fall::FallState;
pub use quad::{QUAD_HALF_EXTENT, QUAD_VERTEX_COUNT, QuadVertex, quad_vertices};
