/// Cursor over a caller provided buffer.
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self { Writer { buf, pos: 0 } }

    #[inline]
    pub const fn pos(&self) -> usize { self.pos }

    #[inline]
    pub fn remaining(&self) -> usize { self.buf.len() - self.pos }

    /// Caller must check [`remaining`](Self::remaining) first.
    #[inline]
    pub fn write_checked(&mut self, src: &[u8]) -> usize {
        let len = src.len();
        self.buf[self.pos..self.pos + len].copy_from_slice(src);
        self.pos += len;
        len
    }

    #[inline]
    pub fn write_or_err<F, E>(&mut self, src: &[u8], f: F) -> Result<usize, E>
    where
        F: Fn() -> E,
        E: std::error::Error,
    {
        if self.remaining() < src.len() {
            Err(f())
        } else {
            Ok(self.write_checked(src))
        }
    }
}
