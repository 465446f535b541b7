//! Unified error handling for the superego client.
//!
//! - **Domain errors**: [`NetworkError`] (transport), [`ProtocolError`]
//!   (backend-signalled), [`StorageError`] (durable writes), [`CryptoError`]
//! - **Unified error**: [`SuperegoError`] with category, user message and code
//! - **Result alias**: [`SuperegoResult<T>`]
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | Backend 5xx, directory load failure | Yes |
//! | User | Missing API key, rejected input | No |
//! | Client | Unreadable backend response | No |
//! | System | Local storage or encryption | No |

mod category;
mod network;
mod protocol;
mod result;
mod storage;
mod superego_error;

pub use category::ErrorCategory;
pub use network::NetworkError;
pub use protocol::ProtocolError;
pub use result::SuperegoResult;
pub use storage::{CryptoError, StorageError};
pub use superego_error::SuperegoError;
