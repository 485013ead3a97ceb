//! Server control frames.
//!
//! A control frame sent by this server is exactly two bytes:
//! the frame head byte and a zero payload length with the mask bit clear.
//! Server-to-client frames carry no mask key.

use super::{FrameHead, Fin, OpCode, Rsv};

/// Control frame kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Ping,
    Pong,
    Close,
}

/// Length of an encoded control frame.
pub const CONTROL_FRAME_LEN: usize = 2;

impl Control {
    #[inline]
    pub const fn opcode(self) -> OpCode {
        match self {
            Control::Ping => OpCode::Ping,
            Control::Pong => OpCode::Pong,
            Control::Close => OpCode::Close,
        }
    }

    /// Map a decoded opcode back to a control kind.
    #[inline]
    pub const fn from_opcode(opcode: OpCode) -> Option<Self> {
        match opcode {
            OpCode::Ping => Some(Control::Ping),
            OpCode::Pong => Some(Control::Pong),
            OpCode::Close => Some(Control::Close),
            _ => None,
        }
    }

    /// Frame head of this control frame: fin set, reserved bits clear.
    #[inline]
    pub const fn head(self) -> FrameHead { FrameHead::new(Fin::Y, Rsv::NONE, self.opcode()) }

    /// Encode an empty control frame.
    #[inline]
    pub const fn encode(self) -> [u8; CONTROL_FRAME_LEN] { [self.head().encode(), 0x00] }
}
