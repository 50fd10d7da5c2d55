//! Binder factories for the common capture patterns.
//!
//! Each returns a closure suitable for the factory constructors on
//! [`crate::Argument`].  Hosts with richer needs write their own closures.

use std::str::FromStr;

use crate::model::BindError;

/// Capture the value by converting it with [`FromStr`].
///
/// ### Example
/// ```
/// use argot::{Argument, parse_into};
///
/// let mut count: u32 = 0;
/// let mut argument = Argument::optional_value("-count", &[], "How many.", parse_into(&mut count));
/// ```
pub fn parse_into<'a, T>(field: &'a mut T) -> impl FnMut(&str) -> Result<(), BindError> + 'a
where
    T: FromStr,
{
    move |token| {
        *field = T::from_str(token).map_err(|_| {
            BindError::new(format!(
                "cannot convert '{token}' to {}.",
                std::any::type_name::<T>()
            ))
        })?;
        Ok(())
    }
}

/// Capture the value verbatim into a `String`.
pub fn store_into(field: &mut String) -> impl FnMut(&str) -> Result<(), BindError> + '_ {
    move |token| {
        *field = token.to_string();
        Ok(())
    }
}

/// Record that the argument was present, ignoring any value.
pub fn toggle(field: &mut bool) -> impl FnMut(&str) -> Result<(), BindError> + '_ {
    move |_| {
        *field = true;
        Ok(())
    }
}
