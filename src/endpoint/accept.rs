use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::handshake::{self, Response};
use crate::error::{Error, HandshakeError};

/// Receive a websocket upgrade request from IO source with a single read,
/// return the number of bytes received.
///
/// The whole request must arrive in this read, it is never continued.
/// Reaching EOF yields a [`HandshakeError::NotEnoughData`] error.
pub async fn recv_request<IO>(io: &mut IO, buf: &mut [u8]) -> Result<usize, Error>
where
    IO: AsyncRead + Unpin,
{
    let n = io.read(buf).await?;

    // EOF, no more data
    if n == 0 {
        return Err(HandshakeError::NotEnoughData.into());
    }

    Ok(n)
}

/// Send websocket upgrade response to IO source, return
/// the number of bytes transferred.
/// Response data are encoded to the provided buffer.
/// This function will wait until all data
/// are written to IO source or an error occurs.
pub async fn send_response<IO>(
    io: &mut IO,
    buf: &mut [u8],
    response: &Response,
) -> Result<usize, Error>
where
    IO: AsyncWrite + Unpin,
{
    let total = response.encode(buf)?;

    let mut offset = 0;

    while offset < total {
        let n = io.write(&buf[offset..total]).await?;

        if n == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::WriteZero).into());
        }

        offset += n;
    }

    io.flush().await?;

    Ok(total)
}

/// Perform a server handshake: receive the request, validate it, and
/// answer with `101 Switching Protocols`.
///
/// Nothing is written if the request is rejected.
pub async fn accept<IO>(io: &mut IO, buf: &mut [u8]) -> Result<Response, Error>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    // recv
    let n = recv_request(io, buf).await?;

    // check
    let response = handshake::negotiate(&buf[..n])?;

    // send
    let _ = send_response(io, buf, &response).await?;

    Ok(response)
}
