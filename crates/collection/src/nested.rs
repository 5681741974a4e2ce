use std::collections::VecDeque;

use crate::Collection;

/// An element that is itself an ordered sequence.
///
/// Used by `collapse` and `map_spread` to look one level into the elements.
pub trait Items {
    type Item;

    fn items(&self) -> impl Iterator<Item = &Self::Item>;
}

impl<E> Items for Vec<E> {
    type Item = E;

    fn items(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E, const N: usize> Items for [E; N] {
    type Item = E;

    fn items(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E> Items for VecDeque<E> {
    type Item = E;

    fn items(&self) -> impl Iterator<Item = &E> {
        self.iter()
    }
}

impl<E> Items for Collection<E> {
    type Item = E;

    fn items(&self) -> impl Iterator<Item = &E> {
        self.values()
    }
}

/// A sequence whose values can be taken without their keys.
///
/// Accepted wherever another sequence is combined with a collection (`zip`,
/// `concat`, `combine`), so a `Collection` can be passed as is.
pub trait IntoValues {
    type Value;

    fn into_value_iter(self) -> impl Iterator<Item = Self::Value>;
}

impl<T> IntoValues for Vec<T> {
    type Value = T;

    fn into_value_iter(self) -> impl Iterator<Item = T> {
        self.into_iter()
    }
}

impl<T, const N: usize> IntoValues for [T; N] {
    type Value = T;

    fn into_value_iter(self) -> impl Iterator<Item = T> {
        self.into_iter()
    }
}

impl<T> IntoValues for VecDeque<T> {
    type Value = T;

    fn into_value_iter(self) -> impl Iterator<Item = T> {
        self.into_iter()
    }
}

impl<T> IntoValues for Collection<T> {
    type Value = T;

    fn into_value_iter(self) -> impl Iterator<Item = T> {
        self.into_iter().map(|(_, v)| v)
    }
}

impl<T: Clone> IntoValues for &Collection<T> {
    type Value = T;

    fn into_value_iter(self) -> impl Iterator<Item = T> {
        self.values().cloned()
    }
}

/// A callback that takes the items of a nested sequence as positional
/// arguments.
///
/// Implemented for closures of arity 1 to 6 taking `&E` per argument. `Args`
/// only disambiguates the arities and is inferred from the closure.
pub trait Spread<E, Args, U> {
    const ARITY: usize;

    /// Returns `None` when `args.len() != ARITY`.
    fn spread(&mut self, args: &[&E]) -> Option<U>;
}

macro_rules! spread_arg {
    ($_arg:ident, $ty:ty) => {
        $ty
    };
}

macro_rules! impl_spread {
    ($arity:literal => $($arg:ident),+) => {
        impl<F, E, U> Spread<E, ($(spread_arg!($arg, E),)+), U> for F
        where
            F: FnMut($(spread_arg!($arg, &E)),+) -> U,
        {
            const ARITY: usize = $arity;

            fn spread(&mut self, args: &[&E]) -> Option<U> {
                let [$($arg),+] = args else {
                    return None;
                };
                Some((*self)($(*$arg),+))
            }
        }
    };
}

impl_spread!(1 => a);
impl_spread!(2 => a, b);
impl_spread!(3 => a, b, c);
impl_spread!(4 => a, b, c, d);
impl_spread!(5 => a, b, c, d, e);
impl_spread!(6 => a, b, c, d, e, f);

#[cfg(test)]
mod tests {
    use super::{IntoValues, Items, Spread};

    fn call<E, Args, U, F: Spread<E, Args, U>>(mut f: F, args: &[&E]) -> Option<U> {
        f.spread(args)
    }

    fn arity<E, Args, U, F: Spread<E, Args, U>>(_: &F) -> usize {
        F::ARITY
    }

    #[test]
    fn spread_matches_arity() {
        let one = 1;
        let two = 2;
        let three = 3;

        let sum2 = |a: &i32, b: &i32| a + b;
        assert_eq!(arity(&sum2), 2);
        assert_eq!(call(sum2, &[&one, &two]), Some(3));
        assert_eq!(call(sum2, &[&one]), None);
        assert_eq!(call(sum2, &[&one, &two, &three]), None);

        let sum3 = |a: &i32, b: &i32, c: &i32| a + b + c;
        assert_eq!(arity(&sum3), 3);
        assert_eq!(call(sum3, &[&one, &two, &three]), Some(6));

        let id = |a: &i32| *a;
        assert_eq!(call(id, &[&three]), Some(3));
        assert_eq!(call(id, &[] as &[&i32]), None);
    }

    #[test]
    fn spread_keeps_closure_state() {
        let mut calls = 0;
        let mut count = |a: &&str, b: &&str| {
            calls += 1;
            format!("{a} {b}")
        };
        assert_eq!(
            count.spread(&[&"budiono", &"siregar"]),
            Some("budiono siregar".to_owned())
        );
        assert_eq!(count.spread(&[&"alex", &"budiman"]), Some("alex budiman".to_owned()));
        assert_eq!(calls, 2);
    }

    #[test]
    fn items_of_each_nested_kind() {
        let vec = vec![1, 2, 3];
        let array = [4, 5];
        let deque: std::collections::VecDeque<i32> = [6, 7].into_iter().collect();
        let nested: crate::Collection<i32> = crate::collection![8, 9];

        assert_eq!(vec.items().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(array.items().copied().collect::<Vec<_>>(), [4, 5]);
        assert_eq!(deque.items().copied().collect::<Vec<_>>(), [6, 7]);
        assert_eq!(nested.items().copied().collect::<Vec<_>>(), [8, 9]);
    }

    #[test]
    fn into_values_drops_keys() {
        let keyed: crate::Collection<i32> = crate::collection! {"a" => 1, 7 => 2};
        assert_eq!((&keyed).into_value_iter().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(keyed.into_value_iter().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(vec![3, 4].into_value_iter().collect::<Vec<_>>(), [3, 4]);
        assert_eq!([5].into_value_iter().collect::<Vec<_>>(), [5]);
    }
}
