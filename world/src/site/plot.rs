use vek::*;

/// A square building plot with a flat interior.
///
/// `origin` and `bound` are the inclusive min and max corners of the
/// footprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plot {
    pub(crate) origin: Vec2<i32>,
    pub(crate) bound: Vec2<i32>,
    pub(crate) entrance: Vec2<i32>,
    pub(crate) alt: i32,
}

impl Plot {
    pub fn new(origin: Vec2<i32>, bound: Vec2<i32>, entrance: Vec2<i32>, alt: i32) -> Self {
        debug_assert!(origin.x <= bound.x && origin.y <= bound.y);
        Self {
            origin,
            bound,
            entrance,
            alt,
        }
    }

    pub fn origin(&self) -> Vec2<i32> { self.origin }

    pub fn bound(&self) -> Vec2<i32> { self.bound }

    pub fn entrance(&self) -> Vec2<i32> { self.entrance }

    /// The entrance lifted to the plot's flat altitude.
    pub fn entrance_wpos(&self) -> Vec3<i32> { self.entrance.with_z(self.alt) }

    pub fn alt(&self) -> i32 { self.alt }

    pub fn width(&self) -> i32 { self.bound.x - self.origin.x + 1 }

    pub fn depth(&self) -> i32 { self.bound.y - self.origin.y + 1 }

    pub fn center(&self) -> Vec2<i32> { (self.origin + self.bound) / 2 }

    pub fn aabr(&self) -> Aabr<i32> {
        Aabr {
            min: self.origin,
            max: self.bound,
        }
    }

    /// The footprint grown by `border` cells on every side.
    pub fn aabr_with_border(&self, border: i32) -> Aabr<i32> {
        Aabr {
            min: self.origin - border,
            max: self.bound + border,
        }
    }

    pub fn contains(&self, wpos: Vec2<i32>) -> bool { aabr_contains(self.aabr(), wpos) }

    pub fn intersects(&self, other: &Plot) -> bool {
        !(self.bound.x < other.origin.x
            || self.origin.x > other.bound.x
            || self.bound.y < other.origin.y
            || self.origin.y > other.bound.y)
    }

    /// Every cell of the footprint, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Vec2<i32>> + '_ { aabr_cells(self.aabr()) }
}

/// Whether `wpos` lies inside the inclusive `aabr`.
pub fn aabr_contains(aabr: Aabr<i32>, wpos: Vec2<i32>) -> bool {
    wpos.x >= aabr.min.x && wpos.x <= aabr.max.x && wpos.y >= aabr.min.y && wpos.y <= aabr.max.y
}

/// Whether `inner` lies entirely inside `outer`, both inclusive.
pub fn aabr_within(inner: Aabr<i32>, outer: Aabr<i32>) -> bool {
    aabr_contains(outer, inner.min) && aabr_contains(outer, inner.max)
}

pub fn aabr_cells(aabr: Aabr<i32>) -> impl Iterator<Item = Vec2<i32>> {
    (aabr.min.y..=aabr.max.y)
        .flat_map(move |y| (aabr.min.x..=aabr.max.x).map(move |x| Vec2::new(x, y)))
}
