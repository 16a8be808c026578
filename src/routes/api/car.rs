use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post};
use serde::{Deserialize, Serialize};

use crate::macros::database_error_handeler::{db_handle_get_error_http, svc_handle_error_http};
use crate::modules::auth::AuthUser;
use crate::modules::models::car::Car;
use crate::modules::models::driver::Driver;
use crate::modules::models::general::establish_connection;
use crate::modules::models::part::Part;
use crate::modules::services::garage;
use crate::routes::api::simulation::clear_standings_cache;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[get("/cars")]
pub fn list_all() -> Result<Json<Vec<Car>>, Status> {
    let conn = &mut establish_connection();
    let cars = db_handle_get_error_http!(Car::get_all(conn), "routes/api/car:list_all", "cars");

    Ok(Json(cars))
}

#[get("/cars/<car_id>")]
pub fn get_one(car_id: i32) -> Result<Json<ApiCar>, Status> {
    let conn = &mut establish_connection();

    let car = db_handle_get_error_http!(Car::get_by_id(conn, car_id), "routes/api/car:get_one", "car");
    let parts = db_handle_get_error_http!(car.installed_parts(conn), "routes/api/car:get_one", "parts");
    let driver = db_handle_get_error_http!(car.driver(conn), "routes/api/car:get_one", "driver");

    Ok(Json(ApiCar::new(car, driver, parts)))
}

/// # install a part into its category slot
/// replaces whatever occupies the slot and consumes one unit of the
/// owning team's holding
#[post("/cars/<car_id>/parts", data = "<install>")]
pub fn install_part(
    user: AuthUser,
    car_id: i32,
    install: Json<InstallData>,
) -> Result<Json<Car>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    let car = svc_handle_error_http!(
        garage::install_part(conn, car_id, install.into_inner().part_id),
        "routes/api/car:install_part"
    );

    Ok(Json(car))
}

#[delete("/cars/<car_id>/parts/<part_id>")]
pub fn uninstall_part(user: AuthUser, car_id: i32, part_id: i32) -> Result<Json<Car>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    let car = svc_handle_error_http!(
        garage::uninstall_part(conn, car_id, part_id),
        "routes/api/car:uninstall_part"
    );

    Ok(Json(car))
}

#[post("/cars/<car_id>/driver", data = "<seat>")]
pub fn set_driver(user: AuthUser, car_id: i32, seat: Json<SeatData>) -> Result<Json<Car>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    let car = svc_handle_error_http!(
        garage::assign_driver(conn, car_id, seat.into_inner().driver_id),
        "routes/api/car:set_driver"
    );

    Ok(Json(car))
}

/// # delete a car
/// removes its slot assignments and historical results, which also
/// invalidates the cached standings
#[delete("/cars/<car_id>")]
pub fn delete(user: AuthUser, car_id: i32) -> Result<Status, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    svc_handle_error_http!(garage::delete_car(conn, car_id), "routes/api/car:delete");

    clear_standings_cache("routes/api/car:delete");

    Ok(Status::NoContent)
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct InstallData {
    pub part_id: i32,
}

#[derive(Deserialize)]
pub struct SeatData {
    pub driver_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ApiCar {
    pub car: Car,
    pub driver: Option<Driver>,
    pub slots: Vec<ApiSlot>,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ApiSlot {
    pub category: String,
    pub part: Part,
}

impl ApiCar {
    pub fn new(car: Car, driver: Option<Driver>, parts: Vec<Part>) -> ApiCar {
        ApiCar {
            car,
            driver,
            slots: parts
                .into_iter()
                .map(|part| ApiSlot {
                    category: part
                        .category()
                        .map(|category| category.label().to_string())
                        .unwrap_or_default(),
                    part,
                })
                .collect(),
        }
    }
}
