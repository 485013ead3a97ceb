//! Websocket frame head.
//!
//! [RFC-6455 Section5](https://datatracker.ietf.org/doc/html/rfc6455#section-5)
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! ```
//!
//! Only the first byte is handled here. Payload length, mask key and
//! payload data are left untouched.

pub mod flag;
pub mod control;

pub use flag::{Fin, OpCode, Rsv};
pub use control::{Control, CONTROL_FRAME_LEN};

/// Websocket frame head, the first byte of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: Fin,
    pub rsv: Rsv,
    pub opcode: OpCode,
}

impl FrameHead {
    /// Constructor.
    #[inline]
    pub const fn new(fin: Fin, rsv: Rsv, opcode: OpCode) -> Self { Self { fin, rsv, opcode } }

    /// Pack into a single byte.
    #[inline]
    pub const fn encode(&self) -> u8 { self.fin.to_flag() | self.rsv.to_flag() | self.opcode.to_flag() }

    /// Unpack from a single byte. Every byte value is a valid frame head.
    #[inline]
    pub const fn decode(b: u8) -> Self {
        Self {
            fin: Fin::from_flag(b),
            rsv: Rsv::from_flag(b),
            opcode: OpCode::from_flag(b),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frame_head() {
        for b in 0..=u8::MAX {
            let head = FrameHead::decode(b);

            assert_eq!(head.fin == Fin::Y, b & 0x80 != 0);
            assert_eq!(head.rsv.0, [b & 0x40 != 0, b & 0x20 != 0, b & 0x10 != 0]);
            assert_eq!(head.opcode.to_flag(), b & 0x0f);

            assert_eq!(head.encode(), b);

            let head2 = FrameHead::new(head.fin, head.rsv, head.opcode);
            assert_eq!(FrameHead::decode(head2.encode()), head);
        }
    }

    #[test]
    fn client_close_head() {
        // masked close frame from a client, only the first byte matters
        let buf = [0x88, 0x80, 1, 2, 3, 4];
        let head = FrameHead::decode(buf[0]);
        assert_eq!(head.opcode, OpCode::Close);
        assert_eq!(head.fin, Fin::Y);
        assert_eq!(head.rsv, Rsv::NONE);
    }
}
