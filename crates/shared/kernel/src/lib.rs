//! Kernel utilities shared across crates.
//! Keep this crate lightweight; it re-exports ergonomic helpers for config loading, request
//! nonces and the system routes every server mounts.
//!
//! ## Nonces
//! Use `csp_nonce!` for the per-request `Content-Security-Policy` nonce:
//! ```rust
//! # use docsite_kernel::csp_nonce;
//! let nonce = csp_nonce!();
//! assert_eq!(nonce.len(), 24);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use docsite_kernel::config::load_config;
//! let cfg: docsite_kernel::domain::config::AppConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
#[cfg(feature = "server")]
pub mod server;

/// Alphabet of nonces: base64 characters without `+`, `/` and `=` so the value can be pasted
/// into a header and an HTML attribute without escaping.
pub const NONCE_ALPHABET: &[char; 62] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];

/// Default nonce length: 24 characters over 62 symbols is ~142 bits.
pub const NONCE_LEN: usize = 24;

pub use docsite_domain as domain;
pub use nanoid::nanoid;

/// Generates a fresh content-security-policy nonce.
#[macro_export]
macro_rules! csp_nonce {
    () => {{
        let size: usize = $crate::NONCE_LEN;
        $crate::nanoid!(size, $crate::NONCE_ALPHABET)
    }};
    ($size:expr) => {
        $crate::nanoid!($size, $crate::NONCE_ALPHABET)
    };
}
