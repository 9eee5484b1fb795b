use crate::error::Error;
use anyhow::anyhow;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use openssl::{hash::MessageDigest, symm};

/// AES-256 key size in bytes.
const KEY_SIZE: usize = 32;
/// AES block size in bytes.
const BLOCK_SIZE: usize = 16;

/// Handles encryption/decryption of individual credential field values with AES-256-CBC.
///
/// The key and IV are derived once, at construction, by hashing the operator-supplied seeds with
/// SHA-512 and truncating the hex digest to the required length. The IV is therefore static for
/// the lifetime of the deployment: identical plaintexts always encrypt to identical ciphertexts,
/// so ciphertext equality reveals plaintext equality. A per-record random IV stored alongside the
/// ciphertext would remove that property, but would also invalidate every existing row (see
/// DESIGN.md).
#[derive(Clone)]
pub struct CredentialsCipher {
    key: [u8; KEY_SIZE],
    iv: [u8; BLOCK_SIZE],
}

impl CredentialsCipher {
    /// Creates a new instance with the key and IV derived from the given operator seeds.
    pub fn new(key_seed: &str, iv_seed: &str) -> anyhow::Result<Self> {
        Ok(Self {
            key: derive(key_seed)?,
            iv: derive(iv_seed)?,
        })
    }

    /// Encrypts plaintext and returns a base64 encoding of the raw ciphertext bytes.
    /// Deterministic under a fixed key/IV pair.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, Error> {
        let ciphertext = symm::encrypt(
            symm::Cipher::aes_256_cbc(),
            &self.key,
            Some(&self.iv),
            plaintext.as_bytes(),
        )
        .map_err(|err| anyhow!("Failed to encrypt a credential field: {err}"))?;

        Ok(BASE64_STANDARD.encode(ciphertext))
    }

    /// Decrypts data previously produced by [`Self::encrypt`]. Fails with a decryption error if
    /// the input is not valid base64, not a multiple of the block size, or the padding doesn't
    /// check out (wrong key or corrupted data) — never returns garbled text.
    pub fn decrypt(&self, encoded: &str) -> Result<String, Error> {
        let ciphertext = BASE64_STANDARD.decode(encoded).map_err(|err| {
            Error::decryption(anyhow!("Stored ciphertext is not valid base64: {err}"))
        })?;

        let plaintext = symm::decrypt(
            symm::Cipher::aes_256_cbc(),
            &self.key,
            Some(&self.iv),
            &ciphertext,
        )
        .map_err(|err| Error::decryption(anyhow!("Failed to decrypt stored ciphertext: {err}")))?;

        String::from_utf8(plaintext).map_err(|err| {
            Error::decryption(anyhow!("Decrypted value is not valid UTF-8: {err}"))
        })
    }
}

/// Derives `N` key material bytes from a seed: SHA-512, hex-encode, truncate.
fn derive<const N: usize>(seed: &str) -> anyhow::Result<[u8; N]> {
    let digest = openssl::hash::hash(MessageDigest::sha512(), seed.as_bytes())
        .map_err(|err| anyhow!("Failed to hash a key material seed: {err}"))?;

    let digest_hex = hex::encode(&digest[..]);

    let mut output = [0u8; N];
    output.copy_from_slice(&digest_hex.as_bytes()[..N]);
    Ok(output)
}
