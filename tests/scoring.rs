use pitwall::modules::models::simulation::SimulationResult;
use pitwall::modules::services::simulation::{assign_positions, score, EntrantInput};
use pitwall::modules::services::standings::{fold_ranking, points_for_position, summarize};

fn entrant(car_id: i32, driver_id: i32, power: i32, aero: i32, handling: i32, skill: i32) -> EntrantInput {
    EntrantInput {
        car_id,
        driver_id,
        power,
        aero,
        handling,
        skill,
    }
}

/// score a field on a circuit and materialize the result snapshots the way
/// a persisted simulation would
fn race(simulation_id: i32, distance: f64, curves: i32, grid: &[EntrantInput]) -> Vec<SimulationResult> {
    let scores = grid
        .iter()
        .map(|entrant| score(distance, curves, entrant))
        .collect();

    assign_positions(scores)
        .into_iter()
        .map(|(score, position)| SimulationResult {
            id: 0,
            simulation_id,
            car_id: score.entrant.car_id,
            driver_id: score.entrant.driver_id,
            straight_speed: score.straight_speed,
            curve_speed: score.curve_speed,
            penalty: score.penalty,
            total_time: score.total_time,
            position,
            power: score.entrant.power,
            aero: score.entrant.aero,
            handling: score.entrant.handling,
            skill: score.entrant.skill,
        })
        .collect()
}

fn grid() -> Vec<EntrantInput> {
    vec![
        entrant(1, 1, 32, 34, 30, 93),
        entrant(2, 2, 28, 25, 27, 77),
        entrant(3, 3, 18, 20, 16, 61),
        entrant(4, 4, 24, 30, 21, 70),
        entrant(5, 5, 12, 14, 11, 45),
        entrant(6, 6, 30, 28, 29, 85),
    ]
}

#[test]
fn finishing_order_is_dense_and_monotone() {
    let results = race(1, 5.793, 11, &grid());

    let positions: Vec<i32> = results.iter().map(|result| result.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);

    for pair in results.windows(2) {
        assert!(pair[0].total_time <= pair[1].total_time);
    }
}

#[test]
fn season_points_accumulate_across_races() {
    let field = grid();
    let mut season: Vec<SimulationResult> = race(1, 5.793, 11, &field);
    season.extend(race(2, 4.259, 8, &field));

    let standings = fold_ranking(&season);

    assert_eq!(standings.len(), field.len());
    // every driver raced twice
    assert!(standings.iter().all(|(_, races, _)| *races == 2));
    // totals match a by-hand fold of the individual rows
    for (driver_id, _, points) in &standings {
        let expected: i32 = season
            .iter()
            .filter(|result| result.driver_id == *driver_id)
            .map(|result| points_for_position(result.position))
            .sum();
        assert_eq!(*points, expected);
    }
    // descending on points
    for pair in standings.windows(2) {
        assert!(pair[0].2 >= pair[1].2);
    }
    // the same field on both circuits means the double winner leads with 50
    assert_eq!(standings[0].2, 50);
}

#[test]
fn career_summary_folds_a_drivers_rows() {
    let field = grid();
    let mut season: Vec<SimulationResult> = race(1, 5.793, 11, &field);
    season.extend(race(2, 4.259, 8, &field));
    season.extend(race(3, 6.102, 15, &field));

    let winner_id = season
        .iter()
        .find(|result| result.simulation_id == 1 && result.position == 1)
        .map(|result| result.driver_id)
        .unwrap();
    let rows: Vec<SimulationResult> = season
        .iter()
        .filter(|result| result.driver_id == winner_id)
        .cloned()
        .collect();

    let summary = summarize(&rows);

    assert_eq!(summary.races, 3);
    // the relative strength of the field does not change between circuits
    assert_eq!(summary.wins, 3);
    assert_eq!(summary.podiums, 3);
    assert_eq!(summary.average_position, 1.0);
    assert_eq!(summary.points, 75);

    let best = rows
        .iter()
        .map(|result| result.total_time)
        .fold(f64::MAX, f64::min);
    assert_eq!(summary.best_time, Some(best));
}

#[test]
fn stored_snapshots_are_decoupled_from_later_tuning() {
    let field = grid();
    let season = race(1, 5.793, 11, &field);
    let before = fold_ranking(&season);

    // tune a car after the race, the recorded season does not move
    let mut tuned = field.clone();
    tuned[2].power = 45;
    tuned[2].handling = 40;
    tuned[2].skill = 99;

    assert_eq!(fold_ranking(&season), before);

    // only a new simulation picks the tuning up
    let rerun = race(2, 5.793, 11, &tuned);
    let rerun_winner = rerun.iter().find(|result| result.position == 1).unwrap();
    assert_eq!(rerun_winner.driver_id, 3);
}
