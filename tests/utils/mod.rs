pub mod assertions;
pub mod setup;
pub mod stats_builders;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::LeaderboardAssertion;
#[allow(unused_imports)]
pub use setup::{TestServer, TestServerBuilder};
#[allow(unused_imports)]
pub use stats_builders::GameStatsBuilder;
