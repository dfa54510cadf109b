//! # Stockroom Testing
//!
//! Testing utilities and helpers for the Stockroom catalog engine.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use stockroom_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(InventoryReducer::new())
//!     .with_env(test_environment())
//!     .given_state(InventoryState::default())
//!     .when_action(InventoryAction::SetStockFilter { filter: StockFilter::InStock })
//!     .then_state(|state| assert_eq!(state.stock_filter, StockFilter::InStock))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use stockroom_core::environment::{Clock, IdGenerator};

/// Ergonomic testing utilities for reducers
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use stockroom_testing::mocks::FixedClock;
    /// use stockroom_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Sequential id generator
    ///
    /// Hands out `start`, `start + 1`, ... so tests can predict new ids.
    ///
    /// ```
    /// use stockroom_testing::mocks::SequentialIds;
    /// use stockroom_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIds::starting_at(100);
    /// assert_eq!(ids.next_id(), 100);
    /// assert_eq!(ids.next_id(), 101);
    /// ```
    #[derive(Debug)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator whose first id is `start`
        #[must_use]
        pub const fn starting_at(start: u64) -> Self {
            Self {
                next: AtomicU64::new(start),
            }
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::starting_at(1)
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> u64 {
            self.next.fetch_add(1, Ordering::SeqCst)
        }
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, SequentialIds};
pub use reducer_test::{assertions, ReducerTest};
