//! Type aliases for shared ownership.
//!
//! - [`aliases`]: `Rc<RefCell<T>>` handles and their weak counterparts,
//!   used by the single-threaded control model.

pub mod aliases;

pub use aliases::*;
