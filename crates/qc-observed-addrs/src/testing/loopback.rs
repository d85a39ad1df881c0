//! In-memory connection pair for handshake tests.
//!
//! Each `LoopbackConn` exposes only what a handshake needs: byte I/O through
//! tokio's `AsyncRead`/`AsyncWrite`, `close()`, and the two endpoint
//! addresses. There is no transport, key or peer-id surface to stub out.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use multiaddr::Multiaddr;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, DuplexStream, ReadBuf};

/// Bytes each direction buffers before writers wait for the reader.
pub const LOOPBACK_BUFFER_SIZE: usize = 1 << 20;

/// One end of an in-memory connection.
#[derive(Debug)]
pub struct LoopbackConn {
    stream: DuplexStream,
    local_addr: Multiaddr,
    remote_addr: Multiaddr,
}

/// Create two connected ends. `a` sees itself at `a_addr` and its peer at
/// `b_addr`; `b` the other way round.
///
/// # Example
///
/// ```rust
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// use tokio::io::{AsyncReadExt, AsyncWriteExt};
/// use qc_observed_addrs::testing::loopback_pair;
///
/// let (mut a, mut b) = loopback_pair(
///     "/ip4/10.0.0.1/tcp/4001".parse().unwrap(),
///     "/ip4/10.0.0.2/tcp/4001".parse().unwrap(),
/// );
/// a.write_all(b"ping").await.unwrap();
/// a.close().await.unwrap();
///
/// let mut buf = Vec::new();
/// b.read_to_end(&mut buf).await.unwrap();
/// assert_eq!(buf, b"ping");
/// # });
/// ```
pub fn loopback_pair(a_addr: Multiaddr, b_addr: Multiaddr) -> (LoopbackConn, LoopbackConn) {
    let (a_stream, b_stream) = tokio::io::duplex(LOOPBACK_BUFFER_SIZE);
    let a = LoopbackConn {
        stream: a_stream,
        local_addr: a_addr.clone(),
        remote_addr: b_addr.clone(),
    };
    let b = LoopbackConn {
        stream: b_stream,
        local_addr: b_addr,
        remote_addr: a_addr,
    };
    (a, b)
}

impl LoopbackConn {
    /// Address this end is bound to.
    pub fn local_addr(&self) -> &Multiaddr {
        &self.local_addr
    }

    /// Address of the other end, as this end observes it.
    pub fn remote_addr(&self) -> &Multiaddr {
        &self.remote_addr
    }

    /// Close the write half. The peer reads EOF once buffered bytes drain.
    ///
    /// # Errors
    ///
    /// Propagates the shutdown error of the underlying stream.
    pub async fn close(&mut self) -> io::Result<()> {
        self.stream.shutdown().await
    }
}

impl AsyncRead for LoopbackConn {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_read(cx, buf)
    }
}

impl AsyncWrite for LoopbackConn {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.stream).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.stream).poll_shutdown(cx)
    }
}
