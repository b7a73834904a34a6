//! Compile-time dependency injection.
//!
//! Services and repositories never reach for globals. They are built from the
//! root [`Context`](crate::context::Context) through [`FromRef`]:
//!
//! - `#[derive(Context)]` on the root makes each field extractable.
//! - `#[derive(FromContext)]` on a service resolves every field from the root.
//!
//! ```ignore
//! use crate::di::{FromContext, FromRef};
//!
//! #[derive(FromContext, Clone)]
//! pub struct HistoryRepository {
//!     storage: AppStorage,
//!     config: Arc<Config>,
//! }
//!
//! let history = HistoryRepository::from_ref(&ctx);
//! ```

/// Extract a value from a reference to `T`.
pub trait FromRef<T> {
    fn from_ref(input: &T) -> Self;
}

/// Any `Clone` type can be extracted from itself.
impl<T: Clone> FromRef<T> for T {
    fn from_ref(input: &T) -> Self {
        input.clone()
    }
}

pub use di_macros::{Context, FromContext};
