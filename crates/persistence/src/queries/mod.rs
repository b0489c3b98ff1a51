// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//! Every function takes a bare connection so the same query can run either
//! on its own or inside a mutation's immediate transaction.
//!
//! ## Module Organization
//!
//! - `reference`: Technicians, shifts, duration policies, ownership facts
//! - `reservations`: Reservation reads and the busy-interval schedule

pub mod reference;
pub mod reservations;
