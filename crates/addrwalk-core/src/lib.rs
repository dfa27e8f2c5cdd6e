pub mod amount;
pub mod client;
pub mod error;
pub mod pagination;
pub mod requester;
#[cfg(test)]
pub mod test_util;
pub mod types;

pub use client::{AddressQuery, ApiClient, ClientConfig};
pub use error::{CoreError, TransportError};
pub use types::{BlockHeight, Transaction, UnspentOutput};
