use std::io;

use crate::metrics::Outcome;

/// Triage a transport-layer failure seen before or during authentication.
/// I/O errors are network-level trouble; a remote disconnect counts the same
/// way; anything else the library reports is a protocol-level surprise.
/// Keeping the mapping in one place means a new failure shape gets a
/// deliberate outcome instead of an ad-hoc one at some call site.
pub(crate) fn transport_error(err: &russh::Error) -> Outcome {
    match err {
        russh::Error::IO(source) => io_error(source),
        russh::Error::Disconnect => Outcome::ConnectError,
        _ => Outcome::ProtocolError,
    }
}

pub(crate) fn io_error(err: &io::Error) -> Outcome {
    match err.kind() {
        io::ErrorKind::TimedOut => Outcome::Timeout,
        _ => Outcome::ConnectError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failures_classify_as_connect_errors() {
        for kind in [
            io::ErrorKind::ConnectionRefused,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::NotConnected,
            io::ErrorKind::AddrNotAvailable,
            io::ErrorKind::BrokenPipe,
        ] {
            let err = io::Error::new(kind, "boom");
            assert_eq!(io_error(&err), Outcome::ConnectError, "kind {:?}", kind);
        }
    }

    #[test]
    fn io_timeout_classifies_as_timeout() {
        let err = io::Error::new(io::ErrorKind::TimedOut, "slow");
        assert_eq!(io_error(&err), Outcome::Timeout);
    }

    #[test]
    fn wrapped_io_errors_follow_the_io_mapping() {
        let err = russh::Error::IO(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        assert_eq!(transport_error(&err), Outcome::ConnectError);
    }

    #[test]
    fn remote_disconnect_is_a_connect_error() {
        assert_eq!(transport_error(&russh::Error::Disconnect), Outcome::ConnectError);
    }
}
