//! Branch condition codes.
//!
//! Each family of conditional branch takes its condition as the first
//! argument. Inverting a condition yields the condition that holds exactly
//! when the original does not, for every input.

use core::fmt;

/// Comparison of two integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationalCondition {
    Equal,
    NotEqual,
    /// Unsigned `>`
    Above,
    /// Unsigned `>=`
    AboveOrEqual,
    /// Unsigned `<`
    Below,
    /// Unsigned `<=`
    BelowOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl RelationalCondition {
    pub const ALL: [Self; 10] = [
        Self::Equal,
        Self::NotEqual,
        Self::Above,
        Self::AboveOrEqual,
        Self::Below,
        Self::BelowOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::NotEqual => "NotEqual",
            Self::Above => "Above",
            Self::AboveOrEqual => "AboveOrEqual",
            Self::Below => "Below",
            Self::BelowOrEqual => "BelowOrEqual",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanOrEqual => "GreaterThanOrEqual",
            Self::LessThan => "LessThan",
            Self::LessThanOrEqual => "LessThanOrEqual",
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Self::Equal => Self::NotEqual,
            Self::NotEqual => Self::Equal,
            Self::Above => Self::BelowOrEqual,
            Self::AboveOrEqual => Self::Below,
            Self::Below => Self::AboveOrEqual,
            Self::BelowOrEqual => Self::Above,
            Self::GreaterThan => Self::LessThanOrEqual,
            Self::GreaterThanOrEqual => Self::LessThan,
            Self::LessThan => Self::GreaterThanOrEqual,
            Self::LessThanOrEqual => Self::GreaterThan,
        }
    }
}

/// Condition on the result of an arithmetic operation or bit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCondition {
    Overflow,
    Signed,
    PositiveOrZero,
    Zero,
    NonZero,
}

impl ResultCondition {
    pub const ALL: [Self; 5] = [
        Self::Overflow,
        Self::Signed,
        Self::PositiveOrZero,
        Self::Zero,
        Self::NonZero,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Overflow => "Overflow",
            Self::Signed => "Signed",
            Self::PositiveOrZero => "PositiveOrZero",
            Self::Zero => "Zero",
            Self::NonZero => "NonZero",
        }
    }

    /// Overflow has no "did not overflow" counterpart a branch can test.
    pub fn inverted(self) -> Option<Self> {
        match self {
            Self::Overflow => None,
            Self::Signed => Some(Self::PositiveOrZero),
            Self::PositiveOrZero => Some(Self::Signed),
            Self::Zero => Some(Self::NonZero),
            Self::NonZero => Some(Self::Zero),
        }
    }
}

/// Comparison of two floating point values.
///
/// The ordered forms are false when either operand is NaN; the unordered
/// forms are true in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubleCondition {
    DoubleEqualAndOrdered,
    DoubleNotEqualAndOrdered,
    DoubleGreaterThanAndOrdered,
    DoubleGreaterThanOrEqualAndOrdered,
    DoubleLessThanAndOrdered,
    DoubleLessThanOrEqualAndOrdered,
    DoubleEqualOrUnordered,
    DoubleNotEqualOrUnordered,
    DoubleGreaterThanOrUnordered,
    DoubleGreaterThanOrEqualOrUnordered,
    DoubleLessThanOrUnordered,
    DoubleLessThanOrEqualOrUnordered,
}

impl DoubleCondition {
    pub const ALL: [Self; 12] = [
        Self::DoubleEqualAndOrdered,
        Self::DoubleNotEqualAndOrdered,
        Self::DoubleGreaterThanAndOrdered,
        Self::DoubleGreaterThanOrEqualAndOrdered,
        Self::DoubleLessThanAndOrdered,
        Self::DoubleLessThanOrEqualAndOrdered,
        Self::DoubleEqualOrUnordered,
        Self::DoubleNotEqualOrUnordered,
        Self::DoubleGreaterThanOrUnordered,
        Self::DoubleGreaterThanOrEqualOrUnordered,
        Self::DoubleLessThanOrUnordered,
        Self::DoubleLessThanOrEqualOrUnordered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::DoubleEqualAndOrdered => "DoubleEqualAndOrdered",
            Self::DoubleNotEqualAndOrdered => "DoubleNotEqualAndOrdered",
            Self::DoubleGreaterThanAndOrdered => "DoubleGreaterThanAndOrdered",
            Self::DoubleGreaterThanOrEqualAndOrdered => "DoubleGreaterThanOrEqualAndOrdered",
            Self::DoubleLessThanAndOrdered => "DoubleLessThanAndOrdered",
            Self::DoubleLessThanOrEqualAndOrdered => "DoubleLessThanOrEqualAndOrdered",
            Self::DoubleEqualOrUnordered => "DoubleEqualOrUnordered",
            Self::DoubleNotEqualOrUnordered => "DoubleNotEqualOrUnordered",
            Self::DoubleGreaterThanOrUnordered => "DoubleGreaterThanOrUnordered",
            Self::DoubleGreaterThanOrEqualOrUnordered => "DoubleGreaterThanOrEqualOrUnordered",
            Self::DoubleLessThanOrUnordered => "DoubleLessThanOrUnordered",
            Self::DoubleLessThanOrEqualOrUnordered => "DoubleLessThanOrEqualOrUnordered",
        }
    }

    /// Negation flips both the comparison and the NaN behaviour.
    pub fn inverted(self) -> Self {
        match self {
            Self::DoubleEqualAndOrdered => Self::DoubleNotEqualOrUnordered,
            Self::DoubleNotEqualAndOrdered => Self::DoubleEqualOrUnordered,
            Self::DoubleGreaterThanAndOrdered => Self::DoubleLessThanOrEqualOrUnordered,
            Self::DoubleGreaterThanOrEqualAndOrdered => Self::DoubleLessThanOrUnordered,
            Self::DoubleLessThanAndOrdered => Self::DoubleGreaterThanOrEqualOrUnordered,
            Self::DoubleLessThanOrEqualAndOrdered => Self::DoubleGreaterThanOrUnordered,
            Self::DoubleEqualOrUnordered => Self::DoubleNotEqualAndOrdered,
            Self::DoubleNotEqualOrUnordered => Self::DoubleEqualAndOrdered,
            Self::DoubleGreaterThanOrUnordered => Self::DoubleLessThanOrEqualAndOrdered,
            Self::DoubleGreaterThanOrEqualOrUnordered => Self::DoubleLessThanAndOrdered,
            Self::DoubleLessThanOrUnordered => Self::DoubleGreaterThanOrEqualAndOrdered,
            Self::DoubleLessThanOrEqualOrUnordered => Self::DoubleGreaterThanAndOrdered,
        }
    }
}

/// Outcome of a compare-and-swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCondition {
    Success,
    Failure,
}

impl StatusCondition {
    pub const ALL: [Self; 2] = [Self::Success, Self::Failure];

    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Self::Success => Self::Failure,
            Self::Failure => Self::Success,
        }
    }
}

macro_rules! impl_display_by_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }
        )*
    };
}

impl_display_by_name!(
    RelationalCondition,
    ResultCondition,
    DoubleCondition,
    StatusCondition
);
