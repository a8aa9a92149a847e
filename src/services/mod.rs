// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod chat;
pub mod password;
pub mod reports;
pub mod screening;
pub mod token;

pub use chat::ChatService;
pub use token::{Claims, TokenService};
