//! MessageFlags - Bit set attached to a message

use serde::{Deserialize, Serialize};

/// Message flag bits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct MessageFlags(u64);

impl MessageFlags {
    pub const CROSSPOSTED: Self = Self(1 << 0);
    pub const IS_CROSSPOST: Self = Self(1 << 1);
    pub const SUPPRESS_EMBEDS: Self = Self(1 << 2);
    pub const SOURCE_MESSAGE_DELETED: Self = Self(1 << 3);
    pub const URGENT: Self = Self(1 << 4);
    pub const HAS_THREAD: Self = Self(1 << 5);
    pub const EPHEMERAL: Self = Self(1 << 6);
    pub const LOADING: Self = Self(1 << 7);
    pub const SUPPRESS_NOTIFICATIONS: Self = Self(1 << 12);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for MessageFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
