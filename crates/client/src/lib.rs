//! Client-side state synchronization for the Finanzas personal-finance
//! API.
//!
//! The crate is a set of cooperating stores around one [`Session`] and
//! one shared [`ApiClient`]: each resource store owns a server-side
//! collection (accounts, categories, transactions) and republishes it
//! together with loading/error flags after every operation, so a
//! presentation layer can render from [`CollectionState`] snapshots and
//! dispatch intents without doing any I/O of its own.

pub mod accounts;
pub mod api;
pub mod auth;
pub mod balance;
pub mod categories;
pub mod dialog;
pub mod error;
pub mod session;
pub mod store;
pub mod transactions;

pub use accounts::AccountStore;
pub use api::ApiClient;
pub use auth::{AuthState, AuthStore};
pub use balance::{BalanceState, BalanceStore};
pub use categories::CategoryStore;
pub use dialog::{CreateKind, DialogFlow, DialogState};
pub use error::StoreError;
pub use session::Session;
pub use store::CollectionState;
pub use transactions::TransactionStore;
