// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule module.
//!
//! Rules are opaque strings owned by the validation capability. This module
//! only maps fields to them and recognises paired confirmation fields.

mod map;
mod pairing;

pub use map::{ResolvedRule, RuleMap};
pub use pairing::{Pairing, DEFAULT_CONFIRMATION_PATTERN};
