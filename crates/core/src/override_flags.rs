//! User-override bitmask
//!
//! An override bit records that a device's state was last changed by a
//! human rather than by automation. On the wire the set is a single raw
//! byte; bits 3-7 are reserved for future device classes and are carried
//! through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Device classes that can carry an override bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverrideDevice {
    /// Smart lighting
    Light,
    /// Heating, ventilation and air conditioning
    Hvac,
    /// Motorized blinds
    Blinds,
}

impl OverrideDevice {
    /// All known device classes in bit order.
    pub const ALL: [OverrideDevice; 3] = [
        OverrideDevice::Light,
        OverrideDevice::Hvac,
        OverrideDevice::Blinds,
    ];

    /// The single-bit set for this device.
    pub const fn flag(self) -> UserOverride {
        match self {
            OverrideDevice::Light => UserOverride::LIGHT,
            OverrideDevice::Hvac => UserOverride::HVAC,
            OverrideDevice::Blinds => UserOverride::BLINDS,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            OverrideDevice::Light => "Light",
            OverrideDevice::Hvac => "HVAC",
            OverrideDevice::Blinds => "Blinds",
        }
    }
}

/// Set of devices under manual override.
///
/// Wraps the raw wire byte. Unknown bits are preserved so that a file
/// written by a newer logger decodes and re-encodes byte-for-byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserOverride(u8);

impl UserOverride {
    /// No override
    pub const NONE: UserOverride = UserOverride(0x00);
    /// Lighting overridden
    pub const LIGHT: UserOverride = UserOverride(0x01);
    /// HVAC overridden
    pub const HVAC: UserOverride = UserOverride(0x02);
    /// Blinds overridden
    pub const BLINDS: UserOverride = UserOverride(0x04);

    /// Mask of the bits assigned to known devices.
    pub const KNOWN_BITS: u8 = 0x07;

    /// Wrap a raw wire byte, keeping every bit.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        UserOverride(bits)
    }

    /// Raw wire byte.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when no bit is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: UserOverride) -> bool {
        self.0 & other.0 == other.0
    }

    /// Membership test for a single device.
    #[inline]
    pub const fn is_overridden(self, device: OverrideDevice) -> bool {
        self.contains(device.flag())
    }

    /// Bits outside [`Self::KNOWN_BITS`].
    #[inline]
    pub const fn unknown_bits(self) -> u8 {
        self.0 & !Self::KNOWN_BITS
    }

    /// Set the bits of `other`.
    pub fn insert(&mut self, other: UserOverride) {
        self.0 |= other.0;
    }

    /// Clear the bits of `other`.
    pub fn remove(&mut self, other: UserOverride) {
        self.0 &= !other.0;
    }

    /// Known devices present in the set, in bit order.
    pub fn devices(self) -> impl Iterator<Item = OverrideDevice> {
        OverrideDevice::ALL
            .into_iter()
            .filter(move |device| self.is_overridden(*device))
    }
}

impl From<OverrideDevice> for UserOverride {
    fn from(device: OverrideDevice) -> Self {
        device.flag()
    }
}

impl FromIterator<OverrideDevice> for UserOverride {
    fn from_iter<I: IntoIterator<Item = OverrideDevice>>(iter: I) -> Self {
        iter.into_iter()
            .fold(UserOverride::NONE, |acc, device| acc | device.flag())
    }
}

impl BitOr for UserOverride {
    type Output = UserOverride;

    fn bitor(self, rhs: UserOverride) -> UserOverride {
        UserOverride(self.0 | rhs.0)
    }
}

impl BitOrAssign for UserOverride {
    fn bitor_assign(&mut self, rhs: UserOverride) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for UserOverride {
    type Output = UserOverride;

    fn bitand(self, rhs: UserOverride) -> UserOverride {
        UserOverride(self.0 & rhs.0)
    }
}

/// Formats as `Light, HVAC, Blinds`, or `None` when no known device is set.
impl fmt::Display for UserOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.devices().map(OverrideDevice::label).collect();
        if labels.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", labels.join(", "))
        }
    }
}
