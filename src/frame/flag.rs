//! Fin flag, reserved bits and opcode.

/// Fin flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fin {
    /// a byte with its leading bit set
    Y = 0x80,

    /// a byte with its leading bit clear
    N = 0x00,
}

/// Reserved bits, in order `[rsv1, rsv2, rsv3]`.
///
/// These are kept as-is, nonzero values are never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rsv(pub [bool; 3]);

/// Frame opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    /// denotes a continuation frame, 0x00
    Continue,
    /// denotes a text frame, 0x01
    Text,
    /// denotes a binary frame, 0x02
    Binary,

    /// denotes a connection close, 0x08
    Close,
    /// denotes a ping, 0x09
    Ping,
    /// denotes a pong, 0x0a
    Pong,

    /// any other 4-bit value, observed but never acted on
    Reserved(u8),
}

const FIN_MASK: u8 = 0x80;
const RSV_MASKS: [u8; 3] = [0x40, 0x20, 0x10];
const OPCODE_MASK: u8 = 0x0f;

impl Fin {
    /// Parse from byte.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        if b & FIN_MASK != 0 {
            Fin::Y
        } else {
            Fin::N
        }
    }

    #[inline]
    pub const fn to_flag(self) -> u8 { self as u8 }
}

impl Rsv {
    /// All reserved bits clear.
    pub const NONE: Rsv = Rsv([false; 3]);

    /// Parse from byte.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        Rsv([
            b & RSV_MASKS[0] != 0,
            b & RSV_MASKS[1] != 0,
            b & RSV_MASKS[2] != 0,
        ])
    }

    #[inline]
    pub const fn to_flag(self) -> u8 {
        let mut b = 0;
        if self.0[0] {
            b |= RSV_MASKS[0];
        }
        if self.0[1] {
            b |= RSV_MASKS[1];
        }
        if self.0[2] {
            b |= RSV_MASKS[2];
        }
        b
    }
}

impl OpCode {
    /// Parse from byte, only the low 4 bits are taken.
    #[inline]
    pub const fn from_flag(b: u8) -> Self {
        use OpCode::*;
        match b & OPCODE_MASK {
            0x00 => Continue,
            0x01 => Text,
            0x02 => Binary,
            0x08 => Close,
            0x09 => Ping,
            0x0a => Pong,
            x => Reserved(x),
        }
    }

    #[inline]
    pub const fn to_flag(self) -> u8 {
        use OpCode::*;
        match self {
            Continue => 0x00,
            Text => 0x01,
            Binary => 0x02,
            Close => 0x08,
            Ping => 0x09,
            Pong => 0x0a,
            Reserved(x) => x & OPCODE_MASK,
        }
    }

    /// Close, ping or pong.
    #[inline]
    pub const fn is_control(self) -> bool {
        matches!(self, OpCode::Close | OpCode::Ping | OpCode::Pong)
    }
}
