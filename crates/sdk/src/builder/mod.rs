//! Transaction composition.
//!
//! One explicit interface, [`Compose`], with a distinct implementation per
//! protocol version: [`v1::TxBuilderV1`] groups and multicalls against the
//! markets directly; [`v2::TxBuilderV2`] additionally routes market calls
//! through the factory's delegation surface, bracketing the batch with
//! authorization grant/revoke calls when required.

pub mod v1;
pub mod v2;

pub use v1::TxBuilderV1;
pub use v2::TxBuilderV2;

use alloy::primitives::Address;

use crate::errors::Result;
use crate::operation::{Operation, TxArgs};

/// A version-specific transaction composer.
///
/// `on_behalf_of` is the principal the batch acts for; `recipient`, where a
/// call supports one, defaults to the principal. Fails with
/// [`crate::SdkError::NoOperations`] on an empty operation list.
pub trait Compose {
    fn compose(
        &self,
        on_behalf_of: Address,
        operations: &[Operation],
        recipient: Option<Address>,
    ) -> Result<Vec<TxArgs>>;
}
