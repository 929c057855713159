// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Form fields: values and the host element list they are read from.

mod document;
mod value;

pub use document::{Element, ElementKind, FormDocument};
pub use value::{FieldStore, FieldValue};
