//! Board topology.
//!
//! The race track is numbered from each team's point of view:
//! - `-1`: reserve, the piece has not entered yet
//! - `0..=3`: the team's private entry lane
//! - `4..=11`: the shared combat track (same squares for both teams)
//! - `12..=13`: the team's private home stretch
//! - `14`: the terminus, a piece landing here is saved and leaves the board
//!
//! Because the shared squares carry the same number for both teams, fields
//! of the two teams can be compared directly.

use serde::{Deserialize, Serialize};

/// A position on the track, relative to the owning team.
pub type Field = i8;

/// Pieces waiting off-board.
pub const RESERVE: Field = -1;

/// Number of squares in each team's entry lane.
pub const ENTRY_LANE: Field = 4;

/// First square of the shared combat track.
pub const SAFE_START: Field = 4;

/// First square after the combat track (start of the home stretch).
pub const COMBAT: Field = 12;

/// The terminus. Never stored as a resident field.
pub const SAFE_END: Field = 14;

/// Rosette squares. Landing on one grants another turn.
pub const STAR_FIELDS: [Field; 3] = [3, 7, 13];

/// Central rosette. Cannot be entered while the opponent holds it.
pub const CHOKE_POINT: Field = 7;

/// Classification of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Off-board, not yet entered
    Reserve,
    /// Private entry lane (0-3)
    Entry,
    /// Shared combat track (4-11), captures happen here
    Combat,
    /// Private home stretch (12-13)
    Home,
    /// Exit square, the piece is saved
    Terminus,
}

/// Zone of a field, or `None` for values outside the track.
pub fn zone(field: Field) -> Option<Zone> {
    match field {
        RESERVE => Some(Zone::Reserve),
        f if (0..ENTRY_LANE).contains(&f) => Some(Zone::Entry),
        f if is_in_combat_zone(f) => Some(Zone::Combat),
        12..=13 => Some(Zone::Home),
        SAFE_END => Some(Zone::Terminus),
        _ => None,
    }
}

/// True iff the field is on the shared combat track.
pub fn is_in_combat_zone(field: Field) -> bool {
    (SAFE_START..COMBAT).contains(&field)
}

/// True iff the field is a rosette.
pub fn is_field_star(field: Field) -> bool {
    STAR_FIELDS.contains(&field)
}

/// True iff a piece may rest on this field.
pub fn is_board_field(field: Field) -> bool {
    (0..SAFE_END).contains(&field)
}
