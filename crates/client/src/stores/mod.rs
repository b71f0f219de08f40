//! Single-writer state containers.
//!
//! Each store exclusively owns and mutates its own state and persists a
//! write-through JSON record after every committed mutation. Other
//! components may read store state but all writes route through the
//! owning store's operations.

pub mod cart;
pub mod favorites;
pub mod session;

pub use cart::{CartLine, CartState, CartStore};
pub use favorites::FavoritesStore;
pub use session::{SessionState, SessionStore};
