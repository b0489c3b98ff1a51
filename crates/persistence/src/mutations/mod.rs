// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules.
//!
//! This module contains all state-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `reference`: Registration of customers, businesses, devices, technicians,
//!   shift windows and duration policies
//! - `booking`: The create-and-assign transaction
//! - `transitions`: Start, complete and cancel
//!
//! Every check-then-act write runs inside `immediate_transaction`, so the
//! write lock is taken before the first read.

pub mod booking;
pub mod reference;
pub mod transitions;
