use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{NewSimulation, NewSimulationResult};
use crate::schema::{simulation_results, simulations};

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Simulation {
    pub id: i32,
    pub circuit_id: i32,
    pub ran_at: NaiveDateTime,
}

/// historical snapshot of one entrant in one simulation. the stats and the
/// skill are the values used by the scoring run, decoupled from whatever
/// happens to the car afterwards
#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct SimulationResult {
    pub id: i32,
    pub simulation_id: i32,
    pub car_id: i32,
    pub driver_id: i32,
    pub straight_speed: f64,
    pub curve_speed: f64,
    pub penalty: f64,
    pub total_time: f64,
    pub position: i32,
    pub power: i32,
    pub aero: i32,
    pub handling: i32,
    pub skill: i32,
}

impl Simulation {
    /********** INSERTERS **********/
    /// # insert a simulation row
    /// the caller wraps this together with the result rows in one transaction
    pub fn insert(conn: &mut PgConnection, new_simulation: &NewSimulation) -> QueryResult<Simulation> {
        diesel::insert_into(simulations::table)
            .values(new_simulation)
            .get_result(conn)
    }

    /********** GETTERS **********/
    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Simulation> {
        use crate::schema::simulations::dsl::*;

        simulations.filter(id.eq(id_in)).first(conn)
    }

    /// # get all simulations ran on a circuit, newest first
    pub fn from_circuit(conn: &mut PgConnection, circuit_id_in: i32) -> QueryResult<Vec<Simulation>> {
        use crate::schema::simulations::dsl::*;

        simulations
            .filter(circuit_id.eq(circuit_id_in))
            .order(ran_at.desc())
            .load::<Simulation>(conn)
    }

    /// # get the results of this simulation, ordered by finishing position
    pub fn results(&self, conn: &mut PgConnection) -> QueryResult<Vec<SimulationResult>> {
        simulation_results::table
            .filter(simulation_results::simulation_id.eq(self.id))
            .order(simulation_results::position.asc())
            .load::<SimulationResult>(conn)
    }
}

impl SimulationResult {
    /********** INSERTERS **********/
    /// # insert the result rows of one simulation in bulk
    pub fn insert_bulk(
        conn: &mut PgConnection,
        new_results: &[NewSimulationResult],
    ) -> QueryResult<Vec<SimulationResult>> {
        diesel::insert_into(simulation_results::table)
            .values(new_results)
            .get_results(conn)
    }

    /********** GETTERS **********/
    /// # get every historical result of a driver
    pub fn from_driver(conn: &mut PgConnection, driver_id_in: i32) -> QueryResult<Vec<SimulationResult>> {
        simulation_results::table
            .filter(simulation_results::driver_id.eq(driver_id_in))
            .order(simulation_results::simulation_id.asc())
            .load::<SimulationResult>(conn)
    }

    /// # get the results of a list of simulations
    /// bulk loader used to build simulation history without one query per row
    pub fn from_simulations(
        conn: &mut PgConnection,
        simulation_ids: &[i32],
    ) -> QueryResult<Vec<SimulationResult>> {
        simulation_results::table
            .filter(simulation_results::simulation_id.eq_any(simulation_ids))
            .order((
                simulation_results::simulation_id.asc(),
                simulation_results::position.asc(),
            ))
            .load::<SimulationResult>(conn)
    }

    /// # get all results in the store
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<SimulationResult>> {
        simulation_results::table
            .order(simulation_results::simulation_id.asc())
            .load::<SimulationResult>(conn)
    }

    /// # group results by their simulation id
    pub fn by_simulation(results: &[SimulationResult]) -> HashMap<i32, Vec<SimulationResult>> {
        let mut map: HashMap<i32, Vec<SimulationResult>> = HashMap::new();
        for result in results {
            map.entry(result.simulation_id)
                .or_default()
                .push(result.to_owned());
        }

        map
    }
}
