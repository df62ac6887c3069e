use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// What changed since an observer was last notified.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObservationFlags(u8);

impl ObservationFlags {
    pub const NONE: Self = Self(0);
    /// A field of the observed model itself was written.
    pub const SELF: Self = Self(1 << 0);
    /// Some descendant changed (directly or further down).
    pub const CHILDREN: Self = Self(1 << 1);
    /// Forced notification; also what a freshly registered observer receives.
    pub const ALL: Self = Self(!0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ObservationFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ObservationFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ObservationFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ALL {
            return f.write_str("ALL");
        }
        let mut parts = Vec::new();
        if self.contains(Self::SELF) { parts.push("SELF"); }
        if self.contains(Self::CHILDREN) { parts.push("CHILDREN"); }
        if parts.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&parts.join(" | "))
        }
    }
}
