//! Property tests for the geometry primitives.
//!
//! Layout code leans on this algebra: intersection and union behave like
//! set operations, `contains` agrees with `intersection`, and nothing
//! panics at the edges of the `u16` range.

use porto_core::geometry::{Rect, Sides};
use proptest::prelude::*;

fn rect() -> impl Strategy<Value = Rect> {
    (any::<u16>(), any::<u16>(), 0u16..=600, 0u16..=600)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn sides() -> impl Strategy<Value = Sides> {
    (0u16..=8, 0u16..=8, 0u16..=8, 0u16..=8).prop_map(|(t, r, b, l)| Sides::new(t, r, b, l))
}

proptest! {
    #[test]
    fn intersection_is_commutative(a in rect(), b in rect()) {
        prop_assert_eq!(a.intersection(b), b.intersection(a));
    }

    #[test]
    fn intersection_fits_inside_both(a in rect(), b in rect()) {
        let i = a.intersection(b);
        prop_assert!(i.width <= a.width && i.width <= b.width);
        prop_assert!(i.height <= a.height && i.height <= b.height);
        if !i.is_empty() {
            prop_assert!(i.x >= a.x && i.x >= b.x);
            prop_assert!(i.y >= a.y && i.y >= b.y);
            prop_assert!(i.right() <= a.right() && i.right() <= b.right());
            prop_assert!(i.bottom() <= a.bottom() && i.bottom() <= b.bottom());
        }
    }

    #[test]
    fn union_contains_both(a in rect(), b in rect()) {
        let u = a.union(b);
        for r in [a, b] {
            if !r.is_empty() {
                prop_assert!(u.x <= r.x && u.y <= r.y);
                prop_assert!(u.right() >= r.right() && u.bottom() >= r.bottom());
            }
        }
    }

    #[test]
    fn contains_agrees_with_intersection(
        a in rect(),
        b in rect(),
        x in any::<u16>(),
        y in any::<u16>(),
    ) {
        let in_both = a.contains(x, y) && b.contains(x, y);
        prop_assert_eq!(in_both, a.intersection(b).contains(x, y));
    }

    #[test]
    fn inner_never_grows(a in rect(), s in sides()) {
        let inner = a.inner(s);
        prop_assert!(inner.width <= a.width);
        prop_assert!(inner.height <= a.height);
    }

    #[test]
    fn extreme_coordinates_never_panic(
        x in any::<u16>(),
        y in any::<u16>(),
        w in any::<u16>(),
        h in any::<u16>(),
    ) {
        let r = Rect::new(x, y, w, h);
        let _ = r.right();
        let _ = r.bottom();
        let _ = r.area();
        let _ = r.intersection(Rect::from_size(80, 24));
        let _ = r.union(Rect::from_size(80, 24));
        let _ = r.inner(Sides::all(1));
    }
}
