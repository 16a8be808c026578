use chrono::{NaiveDateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::models::{NewSimulation, NewSimulationResult};
use crate::modules::models::car::Car;
use crate::modules::models::circuit::Circuit;
use crate::modules::models::driver::Driver;
use crate::modules::models::simulation::{Simulation, SimulationResult};

/// performance snapshot of one entrant, resolved from the live car and
/// driver rows right before scoring
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct EntrantInput {
    pub car_id: i32,
    pub driver_id: i32,
    pub power: i32,
    pub aero: i32,
    pub handling: i32,
    pub skill: i32,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct EntrantScore {
    pub entrant: EntrantInput,
    pub straight_speed: f64,
    pub curve_speed: f64,
    pub penalty: f64,
    pub total_time: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationReport {
    pub simulation: Simulation,
    pub results: Vec<SimulationResult>,
}

/// # compute the race figures of one entrant
///
/// the fixed lap time model, km/h speeds and a seconds penalty:
///
/// ```text
/// v_straight = 200 + 3P + 0.2H - A
/// v_curve    = 90 + 2A + 2M + 0.2H
/// penalty    = (C * 40) / (1 + H/100)
/// t_total    = (D/v_straight + D/v_curve) * 3600 + penalty
/// ```
///
/// the full circuit distance is charged once at straight speed and once at
/// curve speed. the distance is intentionally not split between the two
/// regimes, that is the inherited contract of the model
pub fn score(distance: f64, curves: i32, entrant: &EntrantInput) -> EntrantScore {
    let power = f64::from(entrant.power);
    let aero = f64::from(entrant.aero);
    let handling = f64::from(entrant.handling);
    let skill = f64::from(entrant.skill);

    let straight_speed = 200.0 + 3.0 * power + 0.2 * skill - aero;
    let curve_speed = 90.0 + 2.0 * aero + 2.0 * handling + 0.2 * skill;
    let penalty = (f64::from(curves) * 40.0) / (1.0 + skill / 100.0);
    let total_time = (distance / straight_speed + distance / curve_speed) * 3600.0 + penalty;

    EntrantScore {
        entrant: entrant.clone(),
        straight_speed,
        curve_speed,
        penalty,
        total_time,
    }
}

/// # rank scored entrants
/// ascending on total time, 1 based positions. the sort is stable so
/// entrants with equal times keep their submission order
pub fn assign_positions(mut scores: Vec<EntrantScore>) -> Vec<(EntrantScore, i32)> {
    scores.sort_by(|a, b| a.total_time.partial_cmp(&b.total_time).unwrap());

    scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| (score, index as i32 + 1))
        .collect()
}

/// # run a simulation on a circuit
///
/// validates everything up front, scores every entrant with the live car
/// totals and driver skill, then persists the simulation row plus one
/// result snapshot per entrant in a single transaction. a failure while
/// writing leaves no partial simulation behind
///
/// ## Arguments
/// * `conn` - the database connection
/// * `circuit_id_in` - the circuit to race on
/// * `car_ids` - the participating cars, each with a driver assigned
/// * `ran_at_in` - timestamp override, defaults to now
///
/// ## Returns
/// * `SimulationReport` - the stored simulation with results by position
pub fn run_simulation(
    conn: &mut PgConnection,
    circuit_id_in: i32,
    car_ids: &[i32],
    ran_at_in: Option<NaiveDateTime>,
) -> Result<SimulationReport, ServiceError> {
    if car_ids.is_empty() {
        return Err(ServiceError::invalid_input(
            "a simulation needs at least one entrant",
        ));
    }

    let circuit = Circuit::get_by_id(conn, circuit_id_in)
        .optional()?
        .ok_or_else(|| ServiceError::not_found("circuit", circuit_id_in))?;

    let mut entrants = Vec::with_capacity(car_ids.len());
    for &car_id in car_ids {
        let car = Car::get_by_id(conn, car_id)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("car", car_id))?;
        let driver_id = car.driver_id.ok_or_else(|| {
            ServiceError::invalid_input(format!("car {} has no driver assigned", car.id))
        })?;
        let driver = Driver::get_by_id(conn, driver_id)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("driver", driver_id))?;

        entrants.push(EntrantInput {
            car_id: car.id,
            driver_id: driver.id,
            power: car.total_power,
            aero: car.total_aero,
            handling: car.total_handling,
            skill: driver.skill,
        });
    }

    let scores: Vec<EntrantScore> = entrants
        .iter()
        .map(|entrant| score(circuit.distance, circuit.curves, entrant))
        .collect();
    let ranked = assign_positions(scores);

    let ran_at = ran_at_in.unwrap_or_else(|| Utc::now().naive_utc());

    let (simulation, results) = conn.transaction::<_, ServiceError, _>(|conn| {
        let simulation = Simulation::insert(
            conn,
            &NewSimulation {
                circuit_id: circuit.id,
                ran_at,
            },
        )?;

        let rows: Vec<NewSimulationResult> = ranked
            .iter()
            .map(|(score, position)| NewSimulationResult {
                simulation_id: simulation.id,
                car_id: score.entrant.car_id,
                driver_id: score.entrant.driver_id,
                straight_speed: score.straight_speed,
                curve_speed: score.curve_speed,
                penalty: score.penalty,
                total_time: score.total_time,
                position: *position,
                power: score.entrant.power,
                aero: score.entrant.aero,
                handling: score.entrant.handling,
                skill: score.entrant.skill,
            })
            .collect();

        let mut results = SimulationResult::insert_bulk(conn, &rows)?;
        results.sort_by_key(|result| result.position);

        Ok((simulation, results))
    })?;

    Ok(SimulationReport {
        simulation,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn entrant(power: i32, aero: i32, handling: i32, skill: i32) -> EntrantInput {
        EntrantInput {
            car_id: 1,
            driver_id: 1,
            power,
            aero,
            handling,
            skill,
        }
    }

    fn close(got: f64, expected: f64) -> bool {
        ((got - expected) / expected).abs() < TOLERANCE
    }

    #[test]
    fn reference_entrant_figures() {
        let score = score(5.793, 11, &entrant(32, 34, 30, 93));

        assert!(close(score.straight_speed, 280.6));
        assert!(close(score.curve_speed, 236.6));
        // penalty: (11 * 40) / 1.93
        assert!(close(score.penalty, 227.979_274_611_398_96));
        assert!(close(score.total_time, 390.445_143_772_346_3));
    }

    #[test]
    fn scoring_is_deterministic() {
        let input = entrant(18, 22, 25, 77);
        let first = score(4.25, 8, &input);
        let second = score(4.25, 8, &input);

        assert_eq!(first.straight_speed, second.straight_speed);
        assert_eq!(first.curve_speed, second.curve_speed);
        assert_eq!(first.penalty, second.penalty);
        assert_eq!(first.total_time, second.total_time);
    }

    #[test]
    fn skill_scales_the_curve_penalty_down() {
        let slow = score(5.0, 10, &entrant(20, 20, 20, 0));
        let fast = score(5.0, 10, &entrant(20, 20, 20, 100));

        assert!(close(slow.penalty, 400.0));
        assert!(close(fast.penalty, 200.0));
    }

    #[test]
    fn no_curves_means_no_penalty() {
        let score = score(6.0, 0, &entrant(20, 20, 20, 50));
        assert_eq!(score.penalty, 0.0);
    }

    #[test]
    fn positions_follow_total_time() {
        let scores = vec![
            score(5.0, 9, &entrant(10, 10, 10, 40)),
            score(5.0, 9, &entrant(35, 30, 32, 95)),
            score(5.0, 9, &entrant(20, 18, 22, 70)),
        ];
        let ranked = assign_positions(scores);

        assert_eq!(
            ranked.iter().map(|(_, p)| *p).collect::<Vec<i32>>(),
            vec![1, 2, 3]
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].0.total_time <= pair[1].0.total_time);
        }
        // the strongest entrant wins
        assert_eq!(ranked[0].0.entrant.power, 35);
    }

    #[test]
    fn equal_times_keep_submission_order() {
        let mut first = score(5.0, 9, &entrant(20, 18, 22, 70));
        let mut second = score(5.0, 9, &entrant(20, 18, 22, 70));
        first.entrant.car_id = 10;
        second.entrant.car_id = 20;

        let ranked = assign_positions(vec![first, second]);

        assert_eq!(ranked[0].0.entrant.car_id, 10);
        assert_eq!(ranked[0].1, 1);
        assert_eq!(ranked[1].0.entrant.car_id, 20);
        assert_eq!(ranked[1].1, 2);
    }
}
