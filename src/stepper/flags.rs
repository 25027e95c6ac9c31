/// Bits reported back to the caller describing what happened during a
/// step, and bits the caller can set on the way in to request behavior
/// (jump, ignore dynamic objects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveFlags(u32);

macro_rules! flag_bits {
    ($($(#[$meta:meta])* $name:ident = $bit:expr),+ $(,)?) => {
        impl MoveFlags {
            $($(#[$meta])* pub const $name: MoveFlags = MoveFlags(1 << $bit);)+
        }
    };
}

flag_bits! {
    GROUNDED = 0,
    FALLING = 1,
    SWIMMING = 2,
    /// Input: caller is holding the jump key. Output: set only on the tick
    /// a jump actually triggers (the rising edge while grounded).
    JUMPING = 3,
    STEPPED_UP = 4,
    BLOCKED = 5,
    SLIDING = 6,
    IN_LIQUID = 7,
    ON_STEEP_SLOPE = 8,
    IGNORE_DYNAMIC_OBJECTS = 9,
    /// Output: airborne with a downward vertical velocity.
    FALLINGFAR = 10,
    /// Output: feet moved more than 1mm this step.
    MOVED = 11,
}

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);

    pub fn set(&mut self, other: MoveFlags) {
        self.0 |= other.0;
    }

    pub fn unset(&mut self, other: MoveFlags) {
        self.0 &= !other.0;
    }

    pub fn contains(&self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn from_bits(bits: u32) -> MoveFlags {
        MoveFlags(bits)
    }
}
