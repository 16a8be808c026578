use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::*;

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = teams)]
pub struct NewTeam {
    pub name: String,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = sponsorships)]
pub struct NewSponsorship {
    pub team_id: i32,
    pub sponsor: String,
    pub amount: f64,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = parts)]
pub struct NewPart {
    pub name: String,
    pub brand: String,
    pub category: i32,
    pub power: i32,
    pub aero: i32,
    pub handling: i32,
    pub price: f64,
    pub stock: i32,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = team_parts)]
pub struct NewTeamPart {
    pub team_id: i32,
    pub part_id: i32,
    pub quantity: i32,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub team_id: i32,
    pub part_id: i32,
    pub quantity: i32,
    pub total_cost: f64,
    pub ordered_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = drivers)]
pub struct NewDriver {
    pub name: String,
    pub skill: i32,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = cars)]
pub struct NewCar {
    pub team_id: i32,
    pub driver_id: Option<i32>,
    pub total_power: i32,
    pub total_aero: i32,
    pub total_handling: i32,
    pub finalized: bool,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = car_parts)]
pub struct NewCarPart {
    pub car_id: i32,
    pub part_id: i32,
    pub category: i32,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = circuits)]
pub struct NewCircuit {
    pub name: String,
    pub distance: f64,
    pub curves: i32,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = simulations)]
pub struct NewSimulation {
    pub circuit_id: i32,
    pub ran_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Debug, Clone, Deserialize)]
#[diesel(table_name = simulation_results)]
pub struct NewSimulationResult {
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
