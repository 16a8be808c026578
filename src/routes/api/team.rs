use log::error;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::{Deserialize, Serialize};

use crate::macros::database_error_handeler::{db_handle_get_error_http, svc_handle_error_http};
use crate::models::NewSponsorship;
use crate::modules::auth::AuthUser;
use crate::modules::helpers::math::Math;
use crate::modules::models::car::Car;
use crate::modules::models::driver::sanitize_name;
use crate::modules::models::general::establish_connection;
use crate::modules::models::part::Part;
use crate::modules::models::team::{Order, Team, TeamBudget, TeamPart};
use crate::modules::services::garage;
use crate::modules::services::purchasing;
use crate::modules::services::purchasing::PurchaseDecision;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

#[post("/teams", data = "<new_team>")]
pub fn create(user: AuthUser, new_team: Json<NewTeamData>) -> Result<Json<Team>, Status> {
    if !user.role.is_admin() {
        return Err(Status::Forbidden);
    }

    let name = new_team.into_inner().name;
    if name.is_empty() || sanitize_name(&name) != name {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let team = db_handle_get_error_http!(Team::new(conn, &name), "routes/api/team:create", "team");

    Ok(Json(team))
}

#[get("/teams")]
pub fn list_all() -> Result<Json<Vec<Team>>, Status> {
    let conn = &mut establish_connection();
    let teams = db_handle_get_error_http!(Team::get_all(conn), "routes/api/team:list_all", "teams");

    Ok(Json(teams))
}

#[get("/teams/<team_id>")]
pub fn get_one(team_id: i32) -> Result<Json<ApiTeam>, Status> {
    let conn = &mut establish_connection();

    let team = db_handle_get_error_http!(Team::get_by_id(conn, team_id), "routes/api/team:get_one", "team");
    let cars = db_handle_get_error_http!(Car::from_team(conn, team.id), "routes/api/team:get_one", "cars");
    let budget = db_handle_get_error_http!(Team::budget(conn, team.id), "routes/api/team:get_one", "budget");

    Ok(Json(ApiTeam::new(team, budget, cars)))
}

#[get("/teams/<team_id>/budget")]
pub fn get_budget(team_id: i32) -> Result<Json<TeamBudget>, Status> {
    let conn = &mut establish_connection();

    let team_exists =
        db_handle_get_error_http!(Team::exists(conn, team_id), "routes/api/team:get_budget", "team");
    if !team_exists {
        return Err(Status::NotFound);
    }
    let mut budget =
        db_handle_get_error_http!(Team::budget(conn, team_id), "routes/api/team:get_budget", "budget");
    budget.balance = Math::round_float_to_n_decimals(budget.balance, 2);

    Ok(Json(budget))
}

#[post("/teams/<team_id>/sponsorships", data = "<new_sponsorship>")]
pub fn add_sponsorship(
    user: AuthUser,
    team_id: i32,
    new_sponsorship: Json<NewSponsorshipData>,
) -> Result<Json<TeamBudget>, Status> {
    if !user.role.is_admin() {
        return Err(Status::Forbidden);
    }

    let data = new_sponsorship.into_inner();
    if data.amount <= 0.0 || data.sponsor.is_empty() || sanitize_name(&data.sponsor) != data.sponsor {
        return Err(Status::BadRequest);
    }

    let conn = &mut establish_connection();
    let team_exists = db_handle_get_error_http!(
        Team::exists(conn, team_id),
        "routes/api/team:add_sponsorship",
        "team"
    );
    if !team_exists {
        return Err(Status::NotFound);
    }

    let contribution = NewSponsorship {
        team_id,
        sponsor: data.sponsor,
        amount: data.amount,
    };
    db_handle_get_error_http!(
        Team::add_sponsorship(conn, &contribution),
        "routes/api/team:add_sponsorship",
        "sponsorship"
    );
    let budget = db_handle_get_error_http!(
        Team::budget(conn, team_id),
        "routes/api/team:add_sponsorship",
        "budget"
    );

    Ok(Json(budget))
}

#[get("/teams/<team_id>/holdings")]
pub fn get_holdings(team_id: i32) -> Result<Json<Vec<ApiHolding>>, Status> {
    let conn = &mut establish_connection();

    let team_exists =
        db_handle_get_error_http!(Team::exists(conn, team_id), "routes/api/team:get_holdings", "team");
    if !team_exists {
        return Err(Status::NotFound);
    }
    let holdings =
        db_handle_get_error_http!(Team::holdings(conn, team_id), "routes/api/team:get_holdings", "holdings");

    Ok(Json(holdings.into_iter().map(ApiHolding::new).collect()))
}

#[get("/teams/<team_id>/orders")]
pub fn get_orders(team_id: i32) -> Result<Json<Vec<Order>>, Status> {
    let conn = &mut establish_connection();

    let team_exists =
        db_handle_get_error_http!(Team::exists(conn, team_id), "routes/api/team:get_orders", "team");
    if !team_exists {
        return Err(Status::NotFound);
    }
    let orders =
        db_handle_get_error_http!(Team::order_history(conn, team_id), "routes/api/team:get_orders", "orders");

    Ok(Json(orders))
}

#[post("/teams/<team_id>/cars")]
pub fn create_car(user: AuthUser, team_id: i32) -> Result<Json<Car>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let conn = &mut establish_connection();
    let car = svc_handle_error_http!(garage::create_car(conn, team_id), "routes/api/team:create_car");

    Ok(Json(car))
}

#[get("/teams/<team_id>/purchases/check?<part_id>&<quantity>")]
pub fn check_purchase(
    team_id: i32,
    part_id: i32,
    quantity: i32,
) -> Result<Json<PurchaseDecision>, Status> {
    let conn = &mut establish_connection();
    let decision = svc_handle_error_http!(
        purchasing::can_purchase(conn, team_id, part_id, quantity),
        "routes/api/team:check_purchase"
    );

    Ok(Json(decision))
}

#[post("/teams/<team_id>/purchases", data = "<new_purchase>")]
pub fn purchase(
    user: AuthUser,
    team_id: i32,
    new_purchase: Json<NewPurchaseData>,
) -> Result<Json<Order>, Status> {
    if !user.role.can_manage() {
        return Err(Status::Forbidden);
    }

    let data = new_purchase.into_inner();
    let conn = &mut establish_connection();
    let order = svc_handle_error_http!(
        purchasing::purchase(conn, team_id, data.part_id, data.quantity),
        "routes/api/team:purchase"
    );

    Ok(Json(order))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

#[derive(Deserialize)]
pub struct NewTeamData {
    pub name: String,
}

#[derive(Deserialize)]
pub struct NewSponsorshipData {
    pub sponsor: String,
    pub amount: f64,
}

#[derive(Deserialize)]
pub struct NewPurchaseData {
    pub part_id: i32,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ApiTeam {
    pub team: Team,
    pub budget: TeamBudget,
    pub cars: Vec<Car>,
}

impl ApiTeam {
    pub fn new(team: Team, budget: TeamBudget, cars: Vec<Car>) -> ApiTeam {
        ApiTeam { team, budget, cars }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ApiHolding {
    pub part: Part,
    pub quantity: i32,
}

impl ApiHolding {
    pub fn new((holding, part): (TeamPart, Part)) -> ApiHolding {
        ApiHolding {
            part,
            quantity: holding.quantity,
        }
    }
}
