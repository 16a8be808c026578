use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::modules::models::driver::Driver;
use crate::modules::models::part::Part;
use crate::schema::{car_parts, cars, simulation_results};

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Car {
    pub id: i32,
    pub team_id: i32,
    pub driver_id: Option<i32>,
    pub total_power: i32,
    pub total_aero: i32,
    pub total_handling: i32,
    pub finalized: bool,
}

impl Car {
    /********** GETTERS **********/
    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Car> {
        use crate::schema::cars::dsl::*;

        cars.filter(id.eq(id_in)).first(conn)
    }

    /// # get a car by id, locking its row for the rest of the transaction
    /// concurrent installs on the same car serialize on this lock
    pub fn get_by_id_locked(conn: &mut PgConnection, id_in: i32) -> QueryResult<Car> {
        use crate::schema::cars::dsl::*;

        cars.filter(id.eq(id_in)).for_update().first(conn)
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Car>> {
        use crate::schema::cars::dsl::*;

        cars.order(id.asc()).load::<Car>(conn)
    }

    /// # get the cars of a team
    pub fn from_team(conn: &mut PgConnection, team_id_in: i32) -> QueryResult<Vec<Car>> {
        use crate::schema::cars::dsl::*;

        cars.filter(team_id.eq(team_id_in))
            .order(id.asc())
            .load::<Car>(conn)
    }

    /// # count the cars of a team
    pub fn count_for_team(conn: &mut PgConnection, team_id_in: i32) -> QueryResult<i64> {
        use crate::schema::cars::dsl::*;

        cars.filter(team_id.eq(team_id_in)).count().get_result(conn)
    }

    /// # get the parts currently installed on this car
    /// one part per occupied category slot
    pub fn installed_parts(&self, conn: &mut PgConnection) -> QueryResult<Vec<Part>> {
        car_parts::table
            .inner_join(crate::schema::parts::table)
            .filter(car_parts::car_id.eq(self.id))
            .order(car_parts::category.asc())
            .select(crate::schema::parts::all_columns)
            .load::<Part>(conn)
    }

    /// # get the assigned driver, if any
    pub fn driver(&self, conn: &mut PgConnection) -> QueryResult<Option<Driver>> {
        match self.driver_id {
            Some(driver_id) => Driver::get_by_id(conn, driver_id).map(Some),
            None => Ok(None),
        }
    }

    /********** UPDATERS **********/
    /// # write back recomputed totals and the completeness flag
    pub fn store_totals(
        &self,
        conn: &mut PgConnection,
        power: i32,
        aero: i32,
        handling: i32,
        finalized_in: bool,
    ) -> QueryResult<Car> {
        use crate::schema::cars::dsl::*;

        diesel::update(cars.filter(id.eq(self.id)))
            .set((
                total_power.eq(power),
                total_aero.eq(aero),
                total_handling.eq(handling),
                finalized.eq(finalized_in),
            ))
            .get_result(conn)
    }

    /// # assign or clear the driver seat
    pub fn set_driver(&self, conn: &mut PgConnection, driver_id_in: Option<i32>) -> QueryResult<Car> {
        use crate::schema::cars::dsl::*;

        diesel::update(cars.filter(id.eq(self.id)))
            .set(driver_id.eq(driver_id_in))
            .get_result(conn)
    }

    /********** DELETERS **********/
    /// # delete this car
    /// cascades to its slot assignments and to every historical simulation
    /// result row that references it. the caller supplies the transaction
    pub fn delete(&self, conn: &mut PgConnection) -> QueryResult<()> {
        diesel::delete(simulation_results::table.filter(simulation_results::car_id.eq(self.id)))
            .execute(conn)?;
        diesel::delete(car_parts::table.filter(car_parts::car_id.eq(self.id))).execute(conn)?;
        diesel::delete(cars::table.filter(cars::id.eq(self.id))).execute(conn)?;

        Ok(())
    }
}
