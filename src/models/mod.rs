// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod screening;
pub mod user;

pub use screening::{ScreeningResult, Severity};
pub use user::{NewUser, PublicUser, User};
