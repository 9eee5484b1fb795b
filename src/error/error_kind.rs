/// The kind of an error, used to decide how to report it to the client.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// The request itself is malformed or invalid (missing or unparseable identifier or field),
    /// detected before any storage call.
    ClientError,
    /// The requested entity does not exist.
    NotFound,
    /// The entity exists, but the requester is not allowed to access it.
    Unauthorized,
    /// Stored ciphertext could not be decrypted with the current key, which means the row is
    /// corrupt or the key is wrong. Internal detail is never returned to the client.
    DecryptionError,
    /// Any other failure, including storage faults. Internal detail is never returned to
    /// the client.
    Unknown,
}
