//! limbswitch End-to-End Test Infrastructure
//!
//! Integration and property tests for the matching engine:
//!
//! - Scenarios: the bent arm, stump legs, mirrored feet, bake ranges and
//!   selection toggles against complete in-memory rigs
//! - Properties: pole distance, aim matrix orthonormality, Euler round
//!   trips, side and namespace idempotence, IK/FK round trips
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p limbswitch-tests
//! cargo test -p limbswitch-tests --test proptest_geometry
//! ```

pub mod fixtures;

pub use fixtures::{assert_vec3_close, RigFixture};
