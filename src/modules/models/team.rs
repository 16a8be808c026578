use chrono::NaiveDateTime;
use diesel::dsl::{exists, sum};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::select;
use serde::{Deserialize, Serialize};

use crate::models::{NewSponsorship, NewTeam};
use crate::modules::models::part::Part;
use crate::schema::{orders, sponsorships, team_parts, teams};

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Team {
    pub id: i32,
    pub name: String,
}

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Sponsorship {
    pub id: i32,
    pub team_id: i32,
    pub sponsor: String,
    pub amount: f64,
}

/// a spend entry, written once per successful purchase
#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Order {
    pub id: i32,
    pub team_id: i32,
    pub part_id: i32,
    pub quantity: i32,
    pub total_cost: f64,
    pub ordered_at: NaiveDateTime,
}

/// a team's holding of one catalog part, filled by purchases and
/// consumed one unit at a time by part installs
#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct TeamPart {
    pub id: i32,
    pub team_id: i32,
    pub part_id: i32,
    pub quantity: i32,
}

/// the budget is never stored, it is recomputed from the two ledgers
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TeamBudget {
    pub team_id: i32,
    pub contributed: f64,
    pub spent: f64,
    pub balance: f64,
}

impl Team {
    /********** INSERTERS **********/
    /// # create a new team
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `name_in` - the name of the team
    ///
    /// ## Returns
    /// * `Team` - the created team
    pub fn new(conn: &mut PgConnection, name_in: &str) -> QueryResult<Team> {
        let new_team = NewTeam {
            name: name_in.to_string(),
        };

        diesel::insert_into(teams::table)
            .values(&new_team)
            .get_result(conn)
    }

    /// # record a sponsor contribution for a team
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `new_sponsorship` - the contribution to record
    ///
    /// ## Returns
    /// * `Sponsorship` - the recorded contribution
    pub fn add_sponsorship(
        conn: &mut PgConnection,
        new_sponsorship: &NewSponsorship,
    ) -> QueryResult<Sponsorship> {
        diesel::insert_into(sponsorships::table)
            .values(new_sponsorship)
            .get_result(conn)
    }

    /********** GETTERS **********/
    /// # check if a team exists
    pub fn exists(conn: &mut PgConnection, id_in: i32) -> QueryResult<bool> {
        use crate::schema::teams::dsl::*;

        select(exists(teams.filter(id.eq(id_in)))).get_result(conn)
    }

    /// # get a team by its id
    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Team> {
        use crate::schema::teams::dsl::*;

        teams.filter(id.eq(id_in)).first(conn)
    }

    /// # get all teams
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Team>> {
        use crate::schema::teams::dsl::*;

        teams.order(id.asc()).load::<Team>(conn)
    }

    /// # compute the current budget of a team
    /// the balance is the sum of all sponsor contributions minus the sum
    /// of all order costs. nothing is cached, both ledgers are folded on
    /// every call
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `team_id_in` - the team to compute the budget for
    ///
    /// ## Returns
    /// * `TeamBudget` - contributed, spent and remaining balance
    pub fn budget(conn: &mut PgConnection, team_id_in: i32) -> QueryResult<TeamBudget> {
        let contributed: Option<f64> = sponsorships::table
            .filter(sponsorships::team_id.eq(team_id_in))
            .select(sum(sponsorships::amount))
            .first(conn)?;
        let spent: Option<f64> = orders::table
            .filter(orders::team_id.eq(team_id_in))
            .select(sum(orders::total_cost))
            .first(conn)?;

        let contributed = contributed.unwrap_or(0.0);
        let spent = spent.unwrap_or(0.0);
        Ok(TeamBudget {
            team_id: team_id_in,
            contributed,
            spent,
            balance: contributed - spent,
        })
    }

    /// # get the part holdings of a team
    /// every part the team owns at least one unit of, with the part row
    /// joined in for display
    pub fn holdings(conn: &mut PgConnection, team_id_in: i32) -> QueryResult<Vec<(TeamPart, Part)>> {
        team_parts::table
            .inner_join(crate::schema::parts::table)
            .filter(team_parts::team_id.eq(team_id_in))
            .order(team_parts::part_id.asc())
            .load::<(TeamPart, Part)>(conn)
    }

    /// # get the orders of a team
    pub fn order_history(conn: &mut PgConnection, team_id_in: i32) -> QueryResult<Vec<Order>> {
        orders::table
            .filter(orders::team_id.eq(team_id_in))
            .order(orders::ordered_at.desc())
            .load::<Order>(conn)
    }
}

