//! Privacy-preserving IP address encryption.
//!
//! Three modes, all built on an AES-128 core with portable, AES-NI, and
//! ARMv8 Crypto Extensions backends selected at runtime:
//!
//! - [`Ipcrypt`]: deterministic, format-preserving.
//! - [`IpcryptNd`]: non-deterministic, KIASU-BC tweakable, 24-byte bundle.
//! - [`IpcryptNdx`]: non-deterministic, XEX tweakable, 32-byte key and
//!   32-byte bundle.
//!
//! Every mode operates on [`Ip16`], the uniform 16-byte address
//! representation IPv4 addresses are canonicalized into (as IPv4-mapped
//! IPv6 addresses) before encryption.

mod aes128;
mod error;
mod hexcodec;
mod ip16;
mod modes;
mod tweak;

pub use error::IpCryptError;
pub use ip16::Ip16;
pub use modes::{Ipcrypt, IpcryptNd, IpcryptNdx, NdBundle, NdxBundle};
