use std::collections::HashMap;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::modules::helpers::math::Math;
use crate::modules::models::driver::Driver;
use crate::modules::models::simulation::SimulationResult;

/// championship points by finishing position, positions beyond the table
/// score nothing
pub const POINTS_TABLE: [i32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

pub fn points_for_position(position: i32) -> i32 {
    if (1..=POINTS_TABLE.len() as i32).contains(&position) {
        POINTS_TABLE[(position - 1) as usize]
    } else {
        0
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResultSummary {
    pub races: usize,
    pub wins: usize,
    pub podiums: usize,
    pub average_position: f64,
    pub best_time: Option<f64>,
    pub points: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DriverStats {
    pub driver_id: i32,
    pub name: String,
    #[serde(flatten)]
    pub summary: ResultSummary,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StandingsEntry {
    pub driver_id: i32,
    pub name: String,
    pub races: usize,
    pub points: i32,
}

/// # fold historical result snapshots into summary figures
/// a driver without results gets an empty summary, not an error
pub fn summarize(results: &[SimulationResult]) -> ResultSummary {
    let positions: Vec<f64> = results
        .iter()
        .map(|result| f64::from(result.position))
        .collect();
    let average_position = if positions.is_empty() {
        0.0
    } else {
        Math::mean(&positions)
    };
    let best_time = results
        .iter()
        .map(|result| result.total_time)
        .min_by(|a, b| a.partial_cmp(b).unwrap());

    ResultSummary {
        races: results.len(),
        wins: results.iter().filter(|r| r.position == 1).count(),
        podiums: results.iter().filter(|r| r.position <= 3).count(),
        average_position,
        best_time,
        points: results
            .iter()
            .map(|r| points_for_position(r.position))
            .sum(),
    }
}

/// # fold all results into (driver id, races, points) rows
/// sorted descending on points. the sort is stable and drivers enter the
/// list in first appearance order, which is all the tie break there is
pub fn fold_ranking(results: &[SimulationResult]) -> Vec<(i32, usize, i32)> {
    let mut order: Vec<i32> = Vec::new();
    let mut tally: HashMap<i32, (usize, i32)> = HashMap::new();
    for result in results {
        let entry = tally.entry(result.driver_id).or_insert_with(|| {
            order.push(result.driver_id);
            (0, 0)
        });
        entry.0 += 1;
        entry.1 += points_for_position(result.position);
    }

    let mut folded: Vec<(i32, usize, i32)> = order
        .into_iter()
        .map(|driver_id| {
            let (races, points) = tally[&driver_id];
            (driver_id, races, points)
        })
        .collect();
    folded.sort_by(|a, b| b.2.cmp(&a.2));

    folded
}

/// # summary statistics for one driver
/// scans every result snapshot ever recorded for the driver
pub fn driver_stats(conn: &mut PgConnection, driver_id_in: i32) -> Result<DriverStats, ServiceError> {
    let driver = Driver::get_by_id(conn, driver_id_in)
        .optional()?
        .ok_or_else(|| ServiceError::not_found("driver", driver_id_in))?;
    let results = SimulationResult::from_driver(conn, driver.id)?;

    Ok(DriverStats {
        driver_id: driver.id,
        name: driver.name,
        summary: summarize(&results),
    })
}

/// # the championship table over all recorded simulations
pub fn ranking(conn: &mut PgConnection) -> Result<Vec<StandingsEntry>, ServiceError> {
    let results = SimulationResult::get_all(conn)?;
    let folded = fold_ranking(&results);

    let driver_ids: Vec<i32> = folded.iter().map(|entry| entry.0).collect();
    let names: HashMap<i32, String> = Driver::get_by_ids(conn, &driver_ids)?
        .into_iter()
        .map(|driver| (driver.id, driver.name))
        .collect();

    Ok(folded
        .into_iter()
        .map(|(driver_id, races, points)| StandingsEntry {
            driver_id,
            name: names.get(&driver_id).cloned().unwrap_or_default(),
            races,
            points,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(driver_id: i32, position: i32, total_time: f64) -> SimulationResult {
        SimulationResult {
            id: 0,
            simulation_id: 1,
            car_id: 1,
            driver_id,
            straight_speed: 250.0,
            curve_speed: 200.0,
            penalty: 100.0,
            total_time,
            position,
            power: 20,
            aero: 20,
            handling: 20,
            skill: 80,
        }
    }

    #[test]
    fn points_table_is_total() {
        assert_eq!(points_for_position(1), 25);
        assert_eq!(points_for_position(2), 18);
        assert_eq!(points_for_position(3), 15);
        assert_eq!(points_for_position(10), 1);
        assert_eq!(points_for_position(11), 0);
        assert_eq!(points_for_position(0), 0);
        assert_eq!(points_for_position(-4), 0);
    }

    #[test]
    fn summary_counts_wins_and_podiums() {
        let results = vec![
            result(7, 1, 310.0),
            result(7, 3, 325.5),
            result(7, 2, 298.2),
            result(7, 12, 410.0),
        ];
        let summary = summarize(&results);

        assert_eq!(summary.races, 4);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.podiums, 3);
        assert_eq!(summary.average_position, 4.5);
        assert_eq!(summary.best_time, Some(298.2));
        // 25 + 15 + 18 + 0
        assert_eq!(summary.points, 58);
    }

    #[test]
    fn summary_of_no_results_is_empty() {
        let summary = summarize(&[]);

        assert_eq!(summary.races, 0);
        assert_eq!(summary.average_position, 0.0);
        assert_eq!(summary.best_time, None);
        assert_eq!(summary.points, 0);
    }

    #[test]
    fn ranking_sorts_by_points_descending() {
        let results = vec![
            result(1, 2, 320.0),
            result(2, 1, 310.0),
            result(1, 1, 305.0),
            result(2, 3, 330.0),
            result(3, 5, 350.0),
        ];
        let folded = fold_ranking(&results);

        // driver 1: 18 + 25 = 43, driver 2: 25 + 15 = 40, driver 3: 10
        assert_eq!(folded, vec![(1, 2, 43), (2, 2, 40), (3, 1, 10)]);
    }

    #[test]
    fn ranking_ties_keep_first_appearance_order() {
        let results = vec![result(5, 2, 320.0), result(9, 2, 321.0)];
        let folded = fold_ranking(&results);

        assert_eq!(folded, vec![(5, 1, 18), (9, 1, 18)]);
    }
}
