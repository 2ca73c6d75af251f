//! Leveled assertion macros used to check the internal invariants of the engine.
//!
//! The cheap checks ([`gourd_assert_simple!`]) are always enabled; the more expensive levels are
//! only compiled in when running the tests or when the `debug-checks` feature is enabled.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const GOURD_ASSERT_LEVEL_DEFINITION: u8 = GOURD_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const GOURD_ASSERT_LEVEL_DEFINITION: u8 = GOURD_ASSERT_ADVANCED;

pub const GOURD_ASSERT_SIMPLE: u8 = 1;
pub const GOURD_ASSERT_MODERATE: u8 = 2;
pub const GOURD_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_simple {
    ($($arg:tt)*) => {
        if $crate::gourd_asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::gourd_asserts::GOURD_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::gourd_asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::gourd_asserts::GOURD_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! gourd_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::gourd_asserts::GOURD_ASSERT_LEVEL_DEFINITION >= $crate::gourd_asserts::GOURD_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
