//! Calculator routines for Codon.
//!
//! Every function in this crate is pure: validated input in, a result plus a
//! human-readable work trace out. No IO and no session state; the
//! conversation layer owns prompting, validation ordering and rendering.

pub mod audio;
pub mod barcode;
pub mod checksum;
pub mod hamming;
pub mod intcode;
pub mod koi8;
pub mod qr;
pub mod radix;
pub mod redundancy;
