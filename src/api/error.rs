use thiserror::Error;

/// Shown to the user when no endpoint produced a reply.
pub const APOLOGY: &str =
    "Lo siento, no pude conectar con el servidor. Verifica que el servidor esté ejecutándose.";

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Connection refused, DNS failure or timeout on a single endpoint.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with something other than 200.
    #[error("server returned HTTP {status}")]
    Server { status: u16 },
    #[error("{}", APOLOGY)]
    AllEndpointsExhausted,
    #[error("could not build HTTP client: {0}")]
    Setup(#[source] reqwest::Error),
}
