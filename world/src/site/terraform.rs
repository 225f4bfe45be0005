use super::plot::{aabr_cells, Plot};
use crate::Error;
use common::{
    terrain::{Block, BlockKind},
    vol::WriteVol,
};
use tracing::debug;
use vek::*;

/// Material used to raise terrain.
pub const FILL: BlockKind = BlockKind::Earth;

/// Chebyshev distance from `wpos` to the inclusive `aabr`, `0` inside it.
pub fn border_distance(aabr: Aabr<i32>, wpos: Vec2<i32>) -> i32 {
    let below = (aabr.min - wpos).map(|e| e.max(0));
    let above = (wpos - aabr.max).map(|e| e.max(0));
    (below + above).reduce_max()
}

/// How strongly the plot altitude pulls on a cell `distance` cells away from
/// the plot: `1` at the plot edge, falling linearly to `0` at `border`.
pub fn blend_factor(border: i32, distance: i32) -> f64 {
    (border - distance) as f64 / border as f64
}

/// Altitude a cell of the border band is reshaped to.
pub fn blend_height(ground: i32, alt: i32, border: i32, distance: i32) -> i32 {
    let factor = blend_factor(border, distance);
    (ground as f64 + (alt - ground) as f64 * factor).round() as i32
}

/// Reshape the terrain under and around every plot, in order.
///
/// Border bands of neighbouring plots may overlap, in which case the plot
/// processed last decides the final shape.
pub fn terraform_plots<V: WriteVol>(vol: &mut V, plots: &[Plot], border: i32) -> Result<(), Error> {
    for plot in plots {
        let (raised, lowered) = blend_border(vol, plot, border)?;
        flatten_plot(vol, plot)?;
        debug!(
            origin = ?plot.origin(),
            alt = plot.alt(),
            raised,
            lowered,
            "Terraformed plot"
        );
    }
    Ok(())
}

/// Ramp the ground in the band around `plot` towards the plot's altitude.
/// Returns how many columns were raised and lowered.
fn blend_border<V: WriteVol>(
    vol: &mut V,
    plot: &Plot,
    border: i32,
) -> Result<(usize, usize), Error> {
    let (mut raised, mut lowered) = (0, 0);
    if border <= 0 {
        return Ok((raised, lowered));
    }

    for wpos in aabr_cells(plot.aabr_with_border(border)) {
        let distance = border_distance(plot.aabr(), wpos);
        if distance == 0 || distance > border {
            continue;
        }

        let (ground, _) = vol.highest_solid(wpos)?;
        let target = blend_height(ground, plot.alt(), border, distance);

        if target > ground {
            for z in ground + 1..=target {
                vol.set(wpos.with_z(z), Block::new(FILL))?;
            }
            raised += 1;
        } else if target < ground {
            for z in target + 1..=ground {
                vol.set(wpos.with_z(z), Block::empty())?;
            }
            lowered += 1;
        }
    }

    Ok((raised, lowered))
}

/// Make the footprint of `plot` exactly flat at the plot's altitude.
pub fn flatten_plot<V: WriteVol>(vol: &mut V, plot: &Plot) -> Result<(), Error> {
    let max_z = vol.max_z();
    for wpos in plot.cells() {
        for z in plot.alt() + 1..=max_z {
            vol.set(wpos.with_z(z), Block::empty())?;
        }
        let (top, _) = vol.highest_solid(wpos)?;
        for z in top + 1..=plot.alt() {
            vol.set(wpos.with_z(z), Block::new(FILL))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use common::{vol::ReadVol, volumes::ColumnVol};

    fn world(alt: i32) -> ColumnVol {
        let mut vol = ColumnVol::empty(Vec2::broadcast(-32), Vec2::broadcast(64), 80);
        for wpos in aabr_cells(vol.area()) {
            vol.set_column(wpos, alt, Block::new(BlockKind::Grass)).unwrap();
        }
        vol
    }

    fn heightmap(vol: &ColumnVol) -> Vec<(i32, Block)> {
        aabr_cells(vol.area())
            .map(|wpos| vol.highest_solid(wpos).unwrap())
            .collect()
    }

    #[test]
    fn worked_example() {
        assert_relative_eq!(blend_factor(10, 5), 0.5);
        assert_eq!(blend_height(60, 64, 10, 5), 62);
    }

    #[test]
    fn blend_boundaries() {
        // The outer edge of the band is left untouched
        assert_relative_eq!(blend_factor(10, 10), 0.0);
        assert_eq!(blend_height(37, 64, 10, 10), 37);
        // Next to the plot the pull is strong, but never total
        let f = blend_factor(10, 1);
        assert!(f < 1.0 && f > 0.85);
        assert_eq!(blend_height(60, 70, 10, 1), 69);
        // Lowering rounds the same way
        assert_eq!(blend_height(70, 60, 4, 2), 65);
    }

    #[test]
    fn distance_is_chebyshev() {
        let aabr = Aabr {
            min: Vec2::new(0, 0),
            max: Vec2::new(9, 9),
        };
        assert_eq!(border_distance(aabr, Vec2::new(4, 4)), 0);
        assert_eq!(border_distance(aabr, Vec2::new(-3, 5)), 3);
        assert_eq!(border_distance(aabr, Vec2::new(12, -2)), 3);
        assert_eq!(border_distance(aabr, Vec2::new(11, 15)), 6);
    }

    #[test]
    fn raises_ground_around_a_high_plot() {
        let mut vol = world(20);
        let plot = Plot::new(Vec2::new(-5, -5), Vec2::new(8, 8), Vec2::new(0, -5), 28);
        terraform_plots(&mut vol, &[plot.clone()], 4).unwrap();

        for wpos in plot.cells() {
            assert_eq!(vol.highest_solid(wpos).unwrap(), (28, Block::new(FILL)));
        }
        // distance 1: 20 + 8 * 0.75 = 26, distance 2: 24, distance 3: 22, distance 4: 20
        for (d, expected) in [(1, 26), (2, 24), (3, 22), (4, 20), (5, 20)] {
            let wpos = Vec2::new(8 + d, 0);
            assert_eq!(vol.highest_solid(wpos).unwrap().0, expected, "distance {}", d);
        }
        assert_eq!(
            vol.get(Vec3::new(9, 0, 21)).unwrap().kind(),
            FILL,
            "raised cells are filled"
        );
    }

    #[test]
    fn lowers_ground_around_a_low_plot() {
        let mut vol = world(30);
        let plot = Plot::new(Vec2::new(0, 0), Vec2::new(13, 13), Vec2::new(6, 0), 22);
        terraform_plots(&mut vol, &[plot], 8).unwrap();

        // distance 4: 30 - 8 * 0.5 = 26
        assert_eq!(vol.highest_solid(Vec2::new(-4, 6)).unwrap().0, 26);
        assert!(vol.get(Vec3::new(-4, 6, 27)).unwrap().is_air());
        // Inside the plot everything above its altitude is gone
        assert_eq!(vol.highest_solid(Vec2::new(6, 6)).unwrap().0, 22);
        assert_eq!(vol.get(Vec3::new(6, 6, 22)).unwrap().kind(), BlockKind::Grass);
    }

    #[test]
    fn zero_border_only_flattens() {
        let mut vol = world(20);
        let before = heightmap(&vol);
        let plot = Plot::new(Vec2::new(0, 0), Vec2::new(13, 13), Vec2::new(6, 0), 20);
        terraform_plots(&mut vol, &[plot], 0).unwrap();
        assert_eq!(before, heightmap(&vol));
    }

    #[test]
    fn flatten_is_idempotent() {
        let mut vol = world(20);
        // Uneven ground with a floating overhang
        vol.set_column(Vec2::new(2, 3), 26, Block::new(BlockKind::Rock)).unwrap();
        vol.set_column(Vec2::new(4, 1), 12, Block::new(BlockKind::Rock)).unwrap();
        vol.set(Vec3::new(5, 5, 40), Block::new(BlockKind::Leaves)).unwrap();
        let plot = Plot::new(Vec2::new(0, 0), Vec2::new(13, 13), Vec2::new(6, 0), 21);

        flatten_plot(&mut vol, &plot).unwrap();
        let once = heightmap(&vol);
        flatten_plot(&mut vol, &plot).unwrap();
        assert_eq!(once, heightmap(&vol));

        for wpos in plot.cells() {
            assert_eq!(vol.highest_solid(wpos).unwrap().0, 21);
        }
    }

    #[test]
    fn later_plots_win_overlapping_borders() {
        let mut vol = world(20);
        let low = Plot::new(Vec2::new(-20, 0), Vec2::new(-7, 13), Vec2::new(-7, 6), 14);
        let high = Plot::new(Vec2::new(3, 0), Vec2::new(16, 13), Vec2::new(3, 6), 26);
        // Cell (-2, 6) is 5 from `low` and 5 from `high`
        let shared = Vec2::new(-2, 6);

        let mut a = vol.clone();
        terraform_plots(&mut a, &[low.clone(), high.clone()], 10).unwrap();
        terraform_plots(&mut vol, &[high, low], 10).unwrap();

        // low then high: 17 raised halfway to 26, 21.5 -> 22
        assert_eq!(a.highest_solid(shared).unwrap().0, 22);
        // high then low: 23 lowered halfway to 14, 18.5 -> 19
        assert_eq!(vol.highest_solid(shared).unwrap().0, 19);
    }
}
