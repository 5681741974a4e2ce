use std::fmt;

use crate::CollectionError;

/// Slot identifier of a collection entry.
///
/// Entries appended without an explicit key get an `Index`. Names that are
/// canonical decimal integers (`"5"`, `"-3"`, not `"05"` or `"+5"`) are the
/// same slot as the integer: the `From` conversions and every collection
/// operation normalize them to `Index`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

/// Parses canonical decimal integers only.
pub(crate) fn parse_index(s: &str) -> Option<i64> {
    let i: i64 = s.parse().ok()?;
    (i.to_string() == s).then_some(i)
}

impl Key {
    pub fn as_index(&self) -> Option<i64> {
        match *self {
            Key::Index(i) => Some(i),
            Key::Name(_) => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Index(_) => None,
            Key::Name(name) => Some(name),
        }
    }

    /// Rewrites a numeric `Name` into the equivalent `Index`.
    pub fn normalized(self) -> Key {
        match self {
            Key::Name(name) => match parse_index(&name) {
                Some(i) => Key::Index(i),
                None => Key::Name(name),
            },
            index => index,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(i: $ty) -> Self {
                    Key::Index(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_int {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for Key {
                type Error = CollectionError;

                fn try_from(i: $ty) -> Result<Self, Self::Error> {
                    i64::try_from(i)
                        .map(Key::Index)
                        .map_err(|_| CollectionError::KeyOutOfRange(i as i128))
                }
            }
        )*
    };
}

impl_try_from_int!(u64, usize, isize);

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned()).normalized()
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name).normalized()
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Key::from(name.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone().normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::Key;
    use crate::CollectionError;

    #[test]
    fn numeric_names_become_indices() {
        assert_eq!(Key::from("5"), Key::Index(5));
        assert_eq!(Key::from("-3"), Key::Index(-3));
        assert_eq!(Key::from(String::from("0")), Key::Index(0));
        assert_eq!(Key::from("05"), Key::Name("05".to_owned()));
        assert_eq!(Key::from("+5"), Key::Name("+5".to_owned()));
        assert_eq!(Key::from("-0"), Key::Name("-0".to_owned()));
        assert_eq!(Key::from("a"), Key::Name("a".to_owned()));
        assert_eq!(
            Key::from("9223372036854775808"),
            Key::Name("9223372036854775808".to_owned())
        );
        assert_eq!(Key::Name("7".to_owned()).normalized(), Key::Index(7));
    }

    #[test]
    fn wide_integers_are_checked() {
        assert_eq!(
            Key::try_from(u64::MAX),
            Err(CollectionError::KeyOutOfRange(u64::MAX as i128))
        );
        assert_eq!(Key::try_from(i64::MAX as u64), Ok(Key::Index(i64::MAX)));
        assert_eq!(Key::try_from(3_usize), Ok(Key::Index(3)));
        assert_eq!(Key::try_from(-2_isize), Ok(Key::Index(-2)));
        assert_eq!(Key::from(u32::MAX), Key::Index(i64::from(u32::MAX)));
        assert_eq!(
            CollectionError::KeyOutOfRange(u64::MAX as i128).to_string(),
            "integer key 18446744073709551615 does not fit in i64"
        );
    }
}
