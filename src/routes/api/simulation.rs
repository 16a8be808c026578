use std::thread;

use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::{db_handle_get_error_http, svc_handle_error_http};
use crate::macros::redis::delete_keys;
use crate::modules::auth::AuthUser;
use crate::modules::models::general::establish_connection;
use crate::modules::models::simulation::Simulation;
use crate::modules::redis::Redis;
use crate::modules::services::simulation::{run_simulation, SimulationReport};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # run a simulation
/// scores every entrant on the circuit, persists the outcome atomically
/// and answers with the results in finishing order
#[post("/simulations", data = "<request>")]
pub fn run(user: AuthUser, request: Json<RunData>) -> Result<Json<SimulationReport>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let data = request.into_inner();
    let conn = &mut establish_connection();
    let report = svc_handle_error_http!(
        run_simulation(conn, data.circuit_id, &data.car_ids, None),
        "routes/api/simulation:run"
    );

    // new results change the standings and every involved driver's stats
    clear_standings_cache("routes/api/simulation:run");

    Ok(Json(report))
}

#[get("/simulations/<simulation_id>")]
pub fn get_one(simulation_id: i32) -> Result<Json<SimulationReport>, Status> {
    let conn = &mut establish_connection();

    let simulation = db_handle_get_error_http!(
        Simulation::get_by_id(conn, simulation_id),
        "routes/api/simulation:get_one",
        "simulation"
    );
    let results = db_handle_get_error_http!(
        simulation.results(conn),
        "routes/api/simulation:get_one",
        "results"
    );

    Ok(Json(SimulationReport {
        simulation,
        results,
    }))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct RunData {
    pub circuit_id: i32,
    pub car_ids: Vec<i32>,
}

/// drop every cached response that folds over simulation results.
/// runs on its own thread, a failed invalidation only gets logged
pub fn clear_standings_cache(target: &'static str) {
    thread::spawn(move || {
        let r_conn = &mut match Redis::connect() {
            Ok(r_conn) => r_conn,
            Err(error) => {
                error!(target:target, "Error connecting to redis: (error: {})", error);
                return;
            }
        };

        let mut keys = vec!["/api/standings".to_string()];
        match Redis::keys(r_conn, "/api/drivers/*/stats") {
            Ok(stat_keys) => keys.extend(stat_keys),
            Err(error) => {
                error!(target:target, "Error listing driver stat keys: (error: {})", error);
            }
        }

        delete_keys!(r_conn, keys, target);
    });
}
