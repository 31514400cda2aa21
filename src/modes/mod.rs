//! The three public encryption modes built on top of the AES-128 core.
//!
//! - [`deterministic::Ipcrypt`]: format-preserving, deterministic,
//!   16-byte-in/16-byte-out.
//! - [`nd::IpcryptNd`]: non-deterministic, KIASU-BC tweakable, emits a
//!   24-byte tweak∥ciphertext bundle.
//! - [`ndx::IpcryptNdx`]: non-deterministic, XEX tweakable with a wider
//!   32-byte key, emits a 32-byte tweak∥ciphertext bundle.

pub mod deterministic;
pub mod nd;
pub mod ndx;

pub use deterministic::Ipcrypt;
pub use nd::{IpcryptNd, NdBundle};
pub use ndx::{IpcryptNdx, NdxBundle};
