use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, put};
use serde::Deserialize;

use crate::macros::database_error_handeler::{db_handle_get_error_http, svc_handle_error_http};
use crate::models::NewPart;
use crate::modules::auth::AuthUser;
use crate::modules::models::driver::sanitize_name;
use crate::modules::models::general::establish_connection;
use crate::modules::models::part::{stat_in_range, Part, PartCategory};
use crate::modules::services::purchasing;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[post("/parts", data = "<new_part>")]
pub fn create(user: AuthUser, new_part: Json<PartData>) -> Result<Json<Part>, Status> {
    if !user.role.is_admin() {
        return Err(Status::Forbidden);
    }

    let data = new_part.into_inner();
    let row = match validate(&data, data.stock) {
        Some(row) => row,
        None => return Err(Status::BadRequest),
    };

    let conn = &mut establish_connection();
    let part = db_handle_get_error_http!(Part::new(conn, &row), "routes/api/part:create", "part");

    Ok(Json(part))
}

#[get("/parts")]
pub fn list_all() -> Result<Json<Vec<Part>>, Status> {
    let conn = &mut establish_connection();
    let parts = db_handle_get_error_http!(Part::get_all(conn), "routes/api/part:list_all", "parts");

    Ok(Json(parts))
}

#[get("/parts/<part_id>")]
pub fn get_one(part_id: i32) -> Result<Json<Part>, Status> {
    let conn = &mut establish_connection();
    let part = db_handle_get_error_http!(Part::get_by_id(conn, part_id), "routes/api/part:get_one", "part");

    Ok(Json(part))
}

#[put("/parts/<part_id>", data = "<changes>")]
pub fn update(user: AuthUser, part_id: i32, changes: Json<PartData>) -> Result<Json<Part>, Status> {
    if !user.role.is_admin() {
        return Err(Status::Forbidden);
    }

    let data = changes.into_inner();
    let conn = &mut establish_connection();
    let part = db_handle_get_error_http!(Part::get_by_id(conn, part_id), "routes/api/part:update", "part");

    // stock is only touched by purchases and restocks, never by an update
    let row = match validate(&data, part.stock) {
        Some(row) => row,
        None => return Err(Status::BadRequest),
    };
    let part = db_handle_get_error_http!(part.update(conn, &row), "routes/api/part:update", "part");

    Ok(Json(part))
}

#[post("/parts/<part_id>/restock", data = "<restock>")]
pub fn restock(user: AuthUser, part_id: i32, restock: Json<RestockData>) -> Result<Json<Part>, Status> {
    if !user.role.is_admin() {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    let part = svc_handle_error_http!(
        purchasing::restock(conn, part_id, restock.into_inner().quantity),
        "routes/api/part:restock"
    );

    Ok(Json(part))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct PartData {
    pub name: String,
    pub brand: String,
    pub category: i32,
    pub power: i32,
    pub aero: i32,
    pub handling: i32,
    pub price: f64,
    #[serde(default)]
    pub stock: i32,
}

#[derive(Deserialize)]
pub struct RestockData {
    pub quantity: i32,
}

/// check the catalog rules and build the insertable row.
/// category must name a slot, stats live in [1, 9], price and stock are
/// non negative
fn validate(data: &PartData, stock: i32) -> Option<NewPart> {
    if PartCategory::from_i32(data.category).is_none() {
        return None;
    }
    if !stat_in_range(data.power) || !stat_in_range(data.aero) || !stat_in_range(data.handling) {
        return None;
    }
    if data.price < 0.0 || stock < 0 {
        return None;
    }
    if data.name.is_empty() || sanitize_name(&data.name) != data.name {
        return None;
    }

    Some(NewPart {
        name: data.name.clone(),
        brand: data.brand.clone(),
        category: data.category,
        power: data.power,
        aero: data.aero,
        handling: data.handling,
        price: data.price,
        stock,
    })
}
