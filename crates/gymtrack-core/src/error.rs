//! Umbrella error for engine operations

use gymtrack_store::StoreError;
use gymtrack_util::{CheckinError, CheckoutError};
use thiserror::Error;

/// Any failure surfaced by the attendance engine
#[derive(Debug, Error)]
pub enum GymError {
    #[error(transparent)]
    Checkin(#[from] CheckinError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type GymResult<T> = Result<T, GymError>;
