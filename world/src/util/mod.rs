use vek::*;

pub const CARDINALS: [Vec2<i32>; 4] = [
    Vec2::new(0, 1),
    Vec2::new(1, 0),
    Vec2::new(0, -1),
    Vec2::new(-1, 0),
];

pub fn attempt<T>(max_iters: usize, mut f: impl FnMut() -> Option<T>) -> Option<T> {
    (0..max_iters).find_map(|_| f())
}

/// Integer centroid of a set of points, truncating towards zero on each axis.
/// Returns `None` for an empty set.
pub fn centroid(points: impl IntoIterator<Item = Vec2<i32>>) -> Option<Vec2<i32>> {
    let (sum, n) = points
        .into_iter()
        .fold((Vec2::<i32>::zero(), 0), |(sum, n), p| (sum + p, n + 1));
    if n == 0 { None } else { Some(sum / n) }
}
