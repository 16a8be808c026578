use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, put};
use serde::Deserialize;

use crate::macros::database_error_handeler::db_handle_get_error_http;
use crate::models::NewCircuit;
use crate::modules::auth::AuthUser;
use crate::modules::helpers::math::Math;
use crate::modules::models::circuit::Circuit;
use crate::modules::models::driver::sanitize_name;
use crate::modules::models::general::establish_connection;
use crate::modules::models::simulation::{Simulation, SimulationResult};
use crate::modules::services::simulation::SimulationReport;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[post("/circuits", data = "<new_circuit>")]
pub fn create(user: AuthUser, new_circuit: Json<CircuitData>) -> Result<Json<Circuit>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let row = match validate(new_circuit.into_inner()) {
        Some(row) => row,
        None => return Err(Status::BadRequest),
    };

    let conn = &mut establish_connection();
    let circuit =
        db_handle_get_error_http!(Circuit::new(conn, &row), "routes/api/circuit:create", "circuit");

    Ok(Json(circuit))
}

#[get("/circuits")]
pub fn list_all() -> Result<Json<Vec<Circuit>>, Status> {
    let conn = &mut establish_connection();
    let circuits =
        db_handle_get_error_http!(Circuit::get_all(conn), "routes/api/circuit:list_all", "circuits");

    Ok(Json(circuits))
}

#[get("/circuits/<circuit_id>")]
pub fn get_one(circuit_id: i32) -> Result<Json<Circuit>, Status> {
    let conn = &mut establish_connection();
    let circuit = db_handle_get_error_http!(
        Circuit::get_by_id(conn, circuit_id),
        "routes/api/circuit:get_one",
        "circuit"
    );

    Ok(Json(circuit))
}

#[put("/circuits/<circuit_id>", data = "<changes>")]
pub fn update(
    user: AuthUser,
    circuit_id: i32,
    changes: Json<CircuitData>,
) -> Result<Json<Circuit>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let row = match validate(changes.into_inner()) {
        Some(row) => row,
        None => return Err(Status::BadRequest),
    };

    let conn = &mut establish_connection();
    let circuit = db_handle_get_error_http!(
        Circuit::get_by_id(conn, circuit_id),
        "routes/api/circuit:update",
        "circuit"
    );
    let circuit =
        db_handle_get_error_http!(circuit.update(conn, &row), "routes/api/circuit:update", "circuit");

    Ok(Json(circuit))
}

/// # the simulation history of a circuit, newest first
#[get("/circuits/<circuit_id>/simulations")]
pub fn get_simulations(circuit_id: i32) -> Result<Json<Vec<SimulationReport>>, Status> {
    let conn = &mut establish_connection();

    let circuit = db_handle_get_error_http!(
        Circuit::get_by_id(conn, circuit_id),
        "routes/api/circuit:get_simulations",
        "circuit"
    );
    let simulations = db_handle_get_error_http!(
        Simulation::from_circuit(conn, circuit.id),
        "routes/api/circuit:get_simulations",
        "simulations"
    );

    let simulation_ids: Vec<i32> = simulations.iter().map(|simulation| simulation.id).collect();
    let results = db_handle_get_error_http!(
        SimulationResult::from_simulations(conn, &simulation_ids),
        "routes/api/circuit:get_simulations",
        "results"
    );
    let mut by_simulation = SimulationResult::by_simulation(&results);

    let reports = simulations
        .into_iter()
        .map(|simulation| {
            let results = by_simulation.remove(&simulation.id).unwrap_or_default();
            SimulationReport {
                simulation,
                results,
            }
        })
        .collect();

    Ok(Json(reports))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct CircuitData {
    pub name: String,
    pub distance: f64,
    pub curves: i32,
}

/// distance is positive km kept at 3 decimals, curve counts are non negative
fn validate(data: CircuitData) -> Option<NewCircuit> {
    if data.name.is_empty() || sanitize_name(&data.name) != data.name {
        return None;
    }
    if !data.distance.is_finite() || data.distance <= 0.0 || data.curves < 0 {
        return None;
    }

    Some(NewCircuit {
        name: data.name,
        distance: Math::round_float_to_n_decimals(data.distance, 3),
        curves: data.curves,
    })
}
