//! Host collaborators: the simulation on one side, the display on the other.
//!
//! The bridge never owns the simulation. It borrows a [`PixelSource`] for one
//! tick, hands the finished grid to a [`RenderSink`], and lets the host
//! query game state through [`GameState`] for HUD rendering.

use crate::frame::{CharacterGrid, PixelFrame};
use bitflags::bitflags;
use std::io;

/// Anything that can lend out its current framebuffer.
pub trait PixelSource {
    /// The frame as it stands after the latest simulation step.
    fn frame(&self) -> PixelFrame<'_>;
}

impl PixelSource for PixelFrame<'_> {
    fn frame(&self) -> PixelFrame<'_> {
        *self
    }
}

/// Destination for finished character frames.
pub trait RenderSink {
    /// Display `grid`. The grid is complete and will not change during the
    /// call.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying display.
    fn present(&mut self, grid: &CharacterGrid) -> io::Result<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn present(&mut self, grid: &CharacterGrid) -> io::Result<()> {
        (**self).present(grid)
    }
}

/// Ammunition pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AmmoType {
    /// Bullets (pistol, chaingun).
    Clip = 0,
    /// Shotgun shells.
    Shells = 1,
    /// Energy cells (plasma, BFG).
    Cells = 2,
    /// Rockets.
    Rockets = 3,
}

impl AmmoType {
    /// Every ammo type in index order.
    pub const ALL: [Self; 4] = [Self::Clip, Self::Shells, Self::Cells, Self::Rockets];

    /// Ammo type for a raw host index.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Key cards and skull keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyCard {
    #[allow(missing_docs)]
    BlueCard = 0,
    #[allow(missing_docs)]
    YellowCard = 1,
    #[allow(missing_docs)]
    RedCard = 2,
    #[allow(missing_docs)]
    BlueSkull = 3,
    #[allow(missing_docs)]
    YellowSkull = 4,
    #[allow(missing_docs)]
    RedSkull = 5,
}

impl KeyCard {
    /// Every key in index order.
    pub const ALL: [Self; 6] = [
        Self::BlueCard,
        Self::YellowCard,
        Self::RedCard,
        Self::BlueSkull,
        Self::YellowSkull,
        Self::RedSkull,
    ];

    /// Key for a raw host index.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// The matching flag in a [`KeyCards`] snapshot.
    pub const fn flag(self) -> KeyCards {
        match self {
            Self::BlueCard => KeyCards::BLUE_CARD,
            Self::YellowCard => KeyCards::YELLOW_CARD,
            Self::RedCard => KeyCards::RED_CARD,
            Self::BlueSkull => KeyCards::BLUE_SKULL,
            Self::YellowSkull => KeyCards::YELLOW_SKULL,
            Self::RedSkull => KeyCards::RED_SKULL,
        }
    }
}

bitflags! {
    /// Snapshot of which keys the player holds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyCards: u8 {
        #[allow(missing_docs)]
        const BLUE_CARD = 1 << 0;
        #[allow(missing_docs)]
        const YELLOW_CARD = 1 << 1;
        #[allow(missing_docs)]
        const RED_CARD = 1 << 2;
        #[allow(missing_docs)]
        const BLUE_SKULL = 1 << 3;
        #[allow(missing_docs)]
        const YELLOW_SKULL = 1 << 4;
        #[allow(missing_docs)]
        const RED_SKULL = 1 << 5;
    }
}

impl KeyCards {
    /// Whether either the card or the skull of a color is held.
    ///
    /// Doors accept both.
    pub const fn opens_blue(self) -> bool {
        self.intersects(Self::BLUE_CARD.union(Self::BLUE_SKULL))
    }

    /// See [`KeyCards::opens_blue`].
    pub const fn opens_yellow(self) -> bool {
        self.intersects(Self::YELLOW_CARD.union(Self::YELLOW_SKULL))
    }

    /// See [`KeyCards::opens_blue`].
    pub const fn opens_red(self) -> bool {
        self.intersects(Self::RED_CARD.union(Self::RED_SKULL))
    }
}

/// Weapons in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Weapon {
    #[allow(missing_docs)]
    Fist = 0,
    #[allow(missing_docs)]
    Pistol = 1,
    #[allow(missing_docs)]
    Shotgun = 2,
    #[allow(missing_docs)]
    Chaingun = 3,
    #[allow(missing_docs)]
    RocketLauncher = 4,
    #[allow(missing_docs)]
    Plasma = 5,
    #[allow(missing_docs)]
    Bfg = 6,
    #[allow(missing_docs)]
    Chainsaw = 7,
    #[allow(missing_docs)]
    SuperShotgun = 8,
}

impl Weapon {
    /// Every weapon in index order.
    pub const ALL: [Self; 9] = [
        Self::Fist,
        Self::Pistol,
        Self::Shotgun,
        Self::Chaingun,
        Self::RocketLauncher,
        Self::Plasma,
        Self::Bfg,
        Self::Chainsaw,
        Self::SuperShotgun,
    ];

    /// Weapon for a raw host index.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Ammo pool this weapon draws from; `None` for melee weapons.
    pub const fn ammo_type(self) -> Option<AmmoType> {
        match self {
            Self::Fist | Self::Chainsaw => None,
            Self::Pistol | Self::Chaingun => Some(AmmoType::Clip),
            Self::Shotgun | Self::SuperShotgun => Some(AmmoType::Shells),
            Self::Plasma | Self::Bfg => Some(AmmoType::Cells),
            Self::RocketLauncher => Some(AmmoType::Rockets),
        }
    }
}

/// Ammo readout for the weapon in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponAmmo {
    /// Melee weapon, no ammo needed.
    Unlimited,
    /// Rounds left in the weapon's pool.
    Rounds(i32),
}

impl WeaponAmmo {
    /// Integer form for hosts that want one number: `-1` when unlimited.
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Unlimited => -1,
            Self::Rounds(n) => n,
        }
    }
}

/// Read-only queries over the simulation's player state.
///
/// Implementations must be pure reads: asking for the health never advances
/// the simulation.
pub trait GameState {
    /// Current health.
    fn health(&self) -> i32;
    /// Current armor points.
    fn armor(&self) -> i32;
    /// Weapon in hand.
    fn weapon(&self) -> Weapon;
    /// Rounds held for an ammo type.
    fn ammo(&self, ammo: AmmoType) -> i32;
    /// Capacity for an ammo type (doubled by a backpack).
    fn max_ammo(&self, ammo: AmmoType) -> i32;
    /// Whether the player holds a key.
    fn has_key_card(&self, card: KeyCard) -> bool;
    /// Monsters killed on this level.
    fn kills(&self) -> i32;
    /// Items picked up on this level.
    fn items(&self) -> i32;
    /// Secrets found on this level.
    fn secrets(&self) -> i32;

    /// Ammo for the weapon in hand.
    fn current_weapon_ammo(&self) -> WeaponAmmo {
        match self.weapon().ammo_type() {
            Some(ammo) => WeaponAmmo::Rounds(self.ammo(ammo)),
            None => WeaponAmmo::Unlimited,
        }
    }

    /// All held keys at once.
    fn key_cards(&self) -> KeyCards {
        KeyCard::ALL
            .into_iter()
            .filter(|&card| self.has_key_card(card))
            .fold(KeyCards::empty(), |acc, card| acc | card.flag())
    }

    /// [`GameState::ammo`] by raw index; 0 when out of range.
    fn ammo_at(&self, index: i32) -> i32 {
        AmmoType::from_index(index).map_or(0, |ammo| self.ammo(ammo))
    }

    /// [`GameState::max_ammo`] by raw index; 0 when out of range.
    fn max_ammo_at(&self, index: i32) -> i32 {
        AmmoType::from_index(index).map_or(0, |ammo| self.max_ammo(ammo))
    }

    /// [`GameState::has_key_card`] by raw index as 0 or 1; 0 when out of
    /// range.
    fn key_card_at(&self, index: i32) -> i32 {
        KeyCard::from_index(index).map_or(0, |card| i32::from(self.has_key_card(card)))
    }
}
