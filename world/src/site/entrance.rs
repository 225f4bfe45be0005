use super::plot::Plot;
use rand::prelude::*;
use vek::*;

/// Pick an entrance for `plot` on one of the edges that face the village
/// centre.
///
/// An edge faces the centre when the plot centre lies beyond it as seen from
/// the village centre. The interior cells of every such edge (corners
/// excluded) form one pool that the entrance is drawn from uniformly. When
/// no edge qualifies, i.e. the plot is centred on the village centre, the
/// entrance is the plot centre itself.
pub fn select_entrance(village_center: Vec2<i32>, plot: &Plot, rng: &mut impl Rng) -> Vec2<i32> {
    let center = plot.center();
    let (min, max) = (plot.origin, plot.bound);
    let mut candidates = Vec::new();

    // North edge
    if center.y > village_center.y {
        candidates.extend((min.x + 1..max.x).map(|x| Vec2::new(x, min.y)));
    }
    // South edge
    if center.y < village_center.y {
        candidates.extend((min.x + 1..max.x).map(|x| Vec2::new(x, max.y)));
    }
    // West edge
    if center.x > village_center.x {
        candidates.extend((min.y + 1..max.y).map(|y| Vec2::new(min.x, y)));
    }
    // East edge
    if center.x < village_center.x {
        candidates.extend((min.y + 1..max.y).map(|y| Vec2::new(max.x, y)));
    }

    candidates.choose(rng).copied().unwrap_or(center)
}
