//! Rust rewrite of the uman user store: uniquely named users whose data is
//! kept encrypted at rest behind a password-derived token. This crate is
//! deliberately small and transparent so the credential scheme — the token
//! derivation and the character cipher keyed by the same password — remains
//! readable in-repo.

pub mod crypto;
pub mod registry;
pub mod user;
