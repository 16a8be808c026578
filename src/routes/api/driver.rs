use log::error;
use rocket::http::uri::Origin;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::Deserialize;

use crate::macros::database_error_handeler::{db_handle_get_error_http, svc_handle_error_http};
use crate::macros::request_caching::{cache_response, read_cache_request};
use crate::modules::auth::AuthUser;
use crate::modules::models::driver::{sanitize_name, skill_in_range, Driver};
use crate::modules::models::general::establish_connection;
use crate::modules::redis::Redis;
use crate::modules::services::standings;
use crate::modules::services::standings::DriverStats;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[post("/drivers", data = "<new_driver>")]
pub fn create(user: AuthUser, new_driver: Json<NewDriverData>) -> Result<Json<Driver>, Status> {
    if !user.role.is_admin() {
        return Err(Status::Forbidden);
    }

    let data = new_driver.into_inner();
    if data.name.is_empty() || sanitize_name(&data.name) != data.name {
        return Err(Status::BadRequest);
    }
    if !skill_in_range(data.skill) {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let driver = db_handle_get_error_http!(
        Driver::new(conn, &data.name, data.skill),
        "routes/api/driver:create",
        "driver"
    );

    Ok(Json(driver))
}

#[get("/drivers")]
pub fn list_all() -> Result<Json<Vec<Driver>>, Status> {
    let conn = &mut establish_connection();
    let drivers = db_handle_get_error_http!(Driver::get_all(conn), "routes/api/driver:list_all", "drivers");

    Ok(Json(drivers))
}

#[get("/drivers/<driver_id>")]
pub fn get_one(driver_id: i32) -> Result<Json<Driver>, Status> {
    let conn = &mut establish_connection();
    let driver =
        db_handle_get_error_http!(Driver::get_by_id(conn, driver_id), "routes/api/driver:get_one", "driver");

    Ok(Json(driver))
}

#[post("/drivers/<driver_id>/skill", data = "<new_skill>")]
pub fn set_skill(
    user: AuthUser,
    driver_id: i32,
    new_skill: Json<SkillData>,
) -> Result<Json<Driver>, Status> {
    if !user.role.is_admin() {
        return Err(Status::Forbidden);
    }

    let skill = new_skill.into_inner().skill;
    if !skill_in_range(skill) {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let driver =
        db_handle_get_error_http!(Driver::get_by_id(conn, driver_id), "routes/api/driver:set_skill", "driver");
    let driver =
        db_handle_get_error_http!(driver.set_skill(conn, skill), "routes/api/driver:set_skill", "driver");

    Ok(Json(driver))
}

/// # per driver career statistics
/// folded from every historical result snapshot of the driver
#[get("/drivers/<driver_id>/stats")]
pub fn get_stats(driver_id: i32, origin: &Origin) -> Result<Json<DriverStats>, Status> {
    read_cache_request!(origin);

    let conn = &mut establish_connection();
    let stats = svc_handle_error_http!(
        standings::driver_stats(conn, driver_id),
        "routes/api/driver:get_stats"
    );

    cache_response!(origin, stats);
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct NewDriverData {
    pub name: String,
    pub skill: i32,
}

#[derive(Deserialize)]
pub struct SkillData {
    pub skill: i32,
}
