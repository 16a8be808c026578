use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::NewCircuit;
use crate::schema::circuits;

/// a circuit is described by its total distance in km (3 decimals) and its
/// curve count. the scoring formula derives everything else
#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Circuit {
    pub id: i32,
    pub name: String,
    pub distance: f64,
    pub curves: i32,
}

impl Circuit {
    pub fn new(conn: &mut PgConnection, new_circuit: &NewCircuit) -> QueryResult<Circuit> {
        diesel::insert_into(circuits::table)
            .values(new_circuit)
            .get_result(conn)
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Circuit> {
        use crate::schema::circuits::dsl::*;

        circuits.filter(id.eq(id_in)).first(conn)
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Circuit>> {
        use crate::schema::circuits::dsl::*;

        circuits.order(id.asc()).load::<Circuit>(conn)
    }

    pub fn update(&self, conn: &mut PgConnection, changes: &NewCircuit) -> QueryResult<Circuit> {
        use crate::schema::circuits::dsl::*;

        diesel::update(circuits.filter(id.eq(self.id)))
            .set((
                name.eq(&changes.name),
                distance.eq(changes.distance),
                curves.eq(changes.curves),
            ))
            .get_result(conn)
    }
}
