use super::{min_waypoints, plot::Plot};
use crate::{util::centroid, Error};
use common::vol::ReadVol;
use tracing::{debug, info};
use vek::*;

/// Most plots that share a single waypoint.
pub const GROUP_SIZE: usize = 3;

/// Partition `plots` into groups of up to [`GROUP_SIZE`], returned as
/// indices into `plots`.
///
/// Groups are built greedily in plot order: the first unused plot seeds a
/// group, which then repeatedly absorbs the unused plot whose centre lies
/// nearest to the group's running centroid. Ties go to the earlier plot.
pub fn group_plots(plots: &[Plot]) -> Vec<Vec<usize>> {
    let mut used = vec![false; plots.len()];
    let mut groups = Vec::new();

    for seed in 0..plots.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;
        let mut group = vec![seed];

        while group.len() < GROUP_SIZE {
            let Some(center) = centroid(group.iter().map(|&i| plots[i].center())) else {
                break;
            };
            let nearest = plots
                .iter()
                .enumerate()
                .filter(|(i, _)| !used[*i])
                .min_by_key(|(_, plot)| plot.center().as_::<i64>().distance_squared(center.as_()))
                .map(|(i, _)| i);

            match nearest {
                Some(i) => {
                    used[i] = true;
                    group.push(i);
                },
                None => break,
            }
        }

        groups.push(group);
    }

    groups
}

/// Place one waypoint per plot group, at the group's centroid resting on
/// top of the terrain.
///
/// Groups whose centroid falls inside any plot get no waypoint. Fails if
/// fewer than [`min_waypoints`] waypoints could be placed, unless there were
/// no plots to begin with.
pub fn place_waypoints<V: ReadVol>(vol: &V, plots: &[Plot]) -> Result<Vec<Vec3<i32>>, Error> {
    if plots.is_empty() {
        return Ok(Vec::new());
    }

    let groups = group_plots(plots);
    let mut waypoints = Vec::with_capacity(groups.len());

    for group in &groups {
        let Some(center) = centroid(group.iter().map(|&i| plots[i].center())) else {
            continue;
        };
        if plots.iter().any(|plot| plot.contains(center)) {
            debug!(?center, ?group, "Group centroid lies inside a plot, skipping");
            continue;
        }

        let (z, block) = vol.highest_solid(center)?;
        let alt = if block.is_air() { 0 } else { z + 1 };
        waypoints.push(center.with_z(alt));
    }

    let required = min_waypoints(plots.len());
    info!(
        groups = groups.len(),
        found = waypoints.len(),
        required,
        "Waypoint placement finished"
    );
    if waypoints.len() < required {
        return Err(Error::InsufficientWaypoints {
            required,
            found: waypoints.len(),
        });
    }

    Ok(waypoints)
}
