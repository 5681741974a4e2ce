mod collection;
mod error;
mod key;
pub mod nested;
#[cfg(feature = "serde")]
mod serialize;
mod transform;

pub use collection::{Collection, Iter};
pub use error::{CollectionError, Result};
pub use key::Key;
pub use nested::{IntoValues, Items, Spread};

/// Builds a [`Collection`].
///
/// - `collection![]` is empty.
/// - `collection![a, b, c]` is a list keyed `0..n`.
/// - `collection! {"k" => v, 3 => w}` uses explicit keys.
#[macro_export]
macro_rules! collection {
    () => {
        $crate::Collection::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Collection::from_pairs([$(($crate::Key::from($key), $value)),+])
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Collection::from_values([$($value),+])
    };
}
