//! Type aliases for commonly used shared-ownership types.
//!
//! The settings dialog is single-threaded: controls live in a widget tree
//! and settings hold non-owning references to them. These aliases give the
//! `Rc<RefCell<T>>` / `Weak<RefCell<T>>` pair readable names.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vosettings_core::types::*;
//!
//! let panel: Shared<Panel> = shared(Panel::default());
//! let weak: WeakShared<Panel> = Rc::downgrade(&panel);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Works for unsized targets too, e.g. `Shared<dyn Control>`.
pub type Shared<T> = Rc<RefCell<T>>;

/// Non-owning counterpart of [`Shared`].
pub type WeakShared<T> = Weak<RefCell<T>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
