//! Key events and their signed-integer wire encoding.
//!
//! The simulation's input model speaks raw `i32` codes: the sign is the
//! transition (positive = press, negative = release) and the magnitude is a
//! key id in `1..=255`. Zero is reserved as the "no event" sentinel.

use std::num::NonZeroU8;

/// Key identifier in `1..=255`. Zero is unrepresentable.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId(NonZeroU8);

impl KeyId {
    /// Create a key id, or `None` for 0.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        match NonZeroU8::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Numeric value in `1..=255`.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Key id for an ASCII byte; 0 yields `None`.
    #[inline]
    pub const fn ascii(byte: u8) -> Option<Self> {
        Self::new(byte)
    }

    /// Compile-time key id. Fails to compile (or panics) on 0.
    pub(crate) const fn from_const(id: u8) -> Self {
        match Self::new(id) {
            Some(id) => id,
            None => panic!("key id 0 is reserved"),
        }
    }
}

impl std::fmt::Debug for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyId({:#04x})", self.get())
    }
}

impl From<KeyId> for u8 {
    #[inline]
    fn from(id: KeyId) -> Self {
        id.get()
    }
}

/// A decoded key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// `true` for a press, `false` for a release.
    pub pressed: bool,
    /// The key that changed state.
    pub key: KeyId,
}

impl KeyEvent {
    /// A key press.
    #[inline]
    pub const fn press(key: KeyId) -> Self {
        Self { pressed: true, key }
    }

    /// A key release.
    #[inline]
    pub const fn release(key: KeyId) -> Self {
        Self {
            pressed: false,
            key,
        }
    }

    /// Signed wire code: `+id` for a press, `-id` for a release. Never 0.
    #[inline]
    pub const fn code(self) -> i32 {
        let id = self.key.get() as i32;
        if self.pressed {
            id
        } else {
            -id
        }
    }

    /// Strictly validate a raw code coming from the host.
    ///
    /// Returns `None` for 0 and for magnitudes above 255; such codes must
    /// never enter a queue.
    #[inline]
    pub fn from_code(code: i32) -> Option<Self> {
        let magnitude = u8::try_from(code.unsigned_abs()).ok()?;
        let key = KeyId::new(magnitude)?;
        Some(Self {
            pressed: code > 0,
            key,
        })
    }

    /// Decode a stored code the way the simulation does: the magnitude is
    /// truncated to its low 8 bits.
    ///
    /// Returns `None` for the 0 sentinel, or when truncation leaves 0.
    #[inline]
    pub const fn decode(code: i32) -> Option<Self> {
        #[allow(clippy::cast_possible_truncation)]
        let magnitude = code.unsigned_abs() as u8;
        match KeyId::new(magnitude) {
            Some(key) => Some(Self {
                pressed: code > 0,
                key,
            }),
            None => None,
        }
    }
}

impl From<KeyEvent> for i32 {
    #[inline]
    fn from(event: KeyEvent) -> Self {
        event.code()
    }
}
