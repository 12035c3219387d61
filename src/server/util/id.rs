use std::num::NonZeroU64;

use crate::server::error::{internal::InternalError, AppError};

/// Converts a stored u64 into a serenity id type.
///
/// Serenity's `new` constructors panic on zero; a zero here comes from a corrupt record,
/// so it is reported as an internal error instead.
pub fn discord_id<T: From<NonZeroU64>>(value: u64) -> Result<T, AppError> {
    NonZeroU64::new(value)
        .map(T::from)
        .ok_or_else(|| InternalError::ZeroId.into())
}
