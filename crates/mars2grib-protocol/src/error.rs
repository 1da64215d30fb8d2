//! Protocol error kind (§7 "Protocol error").

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("i/o error talking to {peer}: {source}")]
    Io {
        peer: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("nonce mismatch: expected {expected:#x}, call-back carried {actual:#x}")]
    NonceMismatch { expected: u64, actual: u64 },

    #[error("unexpected call-back code {code:?}")]
    UnexpectedCode { code: char },

    #[error("call-back reserved/unimplemented code {code:?} must close the connection with an error")]
    Reserved { code: char },

    #[error("server reported a fatal error: {message}")]
    ServerError { message: String },

    #[error("handshake with {host}:{port} timed out")]
    HandshakeTimeout { host: String, port: u16 },

    #[error("acknowledgement byte was {byte:#x}, expected 'a'")]
    BadAcknowledgement { byte: u8 },

    #[error("malformed environment: {0}")]
    Config(#[from] ConfigError),
}

impl ProtocolError {
    pub fn io(peer: &'static str, source: std::io::Error) -> Self {
        ProtocolError::Io { peer, source }
    }
}

/// Malformed `$MARS_CLIENT_*` / `$ODB_CODES` environment (§10.3).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("${var} is not a valid integer: {value:?}")]
    InvalidInt { var: &'static str, value: String },

    #[error("${var} is not a valid boolean: {value:?}")]
    InvalidBool { var: &'static str, value: String },

    #[error("${proxy_host_var} is set but ${proxy_port_var} is not")]
    ProxyHostWithoutPort {
        proxy_host_var: &'static str,
        proxy_port_var: &'static str,
    },
}
