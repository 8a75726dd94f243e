//! Framework-independent client core for the Fashion Sales Agent chat UI.
//!
//! Owns chat sessions, message ordering and the shopping cart for the active
//! user, persists them through a key-value collaborator, and carries the thin
//! consumer side of the chat/commerce backend.

// Interdiction stricte de pratiques dangereuses ou non idiomatiques
#![deny(warnings)] // Tous les warnings sont traités comme des erreurs
#![deny(unsafe_code)] // Le code unsafe est interdit
#![deny(missing_docs)] // Toute fonction, struct, enum ou module public doit être documenté
#![deny(dead_code)] // Le code inutilisé est interdit
#![deny(non_camel_case_types)]
// Options supplémentaires pour ne rien laisser passer
#![deny(unused_imports)]
#![deny(unused_variables)]
#![deny(unused_must_use)] // Oblige à gérer explicitement les Result et Option
#![deny(non_snake_case)]
#![deny(non_upper_case_globals)]
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
// Clippy pour stricte discipline
#![deny(clippy::all)]
#![deny(clippy::pedantic)] // Active les lints très strictes de Clippy
#![deny(clippy::unwrap_used)] // Interdit unwrap()
#![deny(clippy::expect_used)] // Interdit expect()
#![deny(clippy::panic)] // Interdit panic!()
#![deny(clippy::print_stdout)] // Interdit println!() en production
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::unwrap_in_result)]
#![deny(clippy::module_inception)]
#![deny(clippy::redundant_clone)]
// Lints pédantiques tolérées dans ce crate
#![allow(clippy::module_name_repetitions)]

/// Chat/commerce backend consumer: wire types, HTTP client, offline mock.
#[allow(clippy::unused_self, clippy::trivially_copy_pass_by_ref)]
pub mod backend;
/// Session and cart state management backed by key-value persistence.
pub mod store;

pub use store::{SessionCartStore, StoreConfig, StoreError};
