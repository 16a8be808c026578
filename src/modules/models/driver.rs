use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::select;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::NewDriver;
use crate::schema::drivers;

/// strip everything that is not a plain name character.
/// routes compare the sanitized value against the raw input and reject
/// requests that differ
pub fn sanitize_name(name: &str) -> String {
    let re = Regex::new(r"[^a-zA-Z0-9 _\-]").unwrap();
    re.replace_all(name, "").to_string()
}

/// driver skill is a 0..=100 rating used as `H` by the scoring engine
pub fn skill_in_range(value: i32) -> bool {
    (0..=100).contains(&value)
}

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Driver {
    pub id: i32,
    pub name: String,
    pub skill: i32,
}

impl Driver {
    /********** INSERTERS **********/
    /// # create a new driver
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `name_in` - the driver name
    /// * `skill_in` - the skill rating, 0..=100
    ///
    /// ## Returns
    /// * `Driver` - the created driver
    pub fn new(conn: &mut PgConnection, name_in: &str, skill_in: i32) -> QueryResult<Driver> {
        let new_driver = NewDriver {
            name: name_in.to_string(),
            skill: skill_in,
        };

        diesel::insert_into(drivers::table)
            .values(&new_driver)
            .get_result(conn)
    }

    /********** GETTERS **********/
    pub fn exists(conn: &mut PgConnection, id_in: i32) -> QueryResult<bool> {
        use crate::schema::drivers::dsl::*;

        select(exists(drivers.filter(id.eq(id_in)))).get_result(conn)
    }

    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Driver> {
        use crate::schema::drivers::dsl::*;

        drivers.filter(id.eq(id_in)).first(conn)
    }

    pub fn get_by_ids(conn: &mut PgConnection, ids_in: &[i32]) -> QueryResult<Vec<Driver>> {
        use crate::schema::drivers::dsl::*;

        drivers.filter(id.eq_any(ids_in)).load::<Driver>(conn)
    }

    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Driver>> {
        use crate::schema::drivers::dsl::*;

        drivers.order(id.asc()).load::<Driver>(conn)
    }

    /********** UPDATERS **********/
    /// # update the skill rating of a driver
    pub fn set_skill(&self, conn: &mut PgConnection, skill_in: i32) -> QueryResult<Driver> {
        use crate::schema::drivers::dsl::*;

        diesel::update(drivers.filter(id.eq(self.id)))
            .set(skill.eq(skill_in))
            .get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_punctuation() {
        assert_eq!(sanitize_name("Ayrton Senna"), "Ayrton Senna");
        assert_eq!(sanitize_name("Nico'; DROP TABLE"), "Nico DROP TABLE");
        assert_eq!(sanitize_name("jean-eric_33"), "jean-eric_33");
    }

    #[test]
    fn skill_bounds() {
        assert!(skill_in_range(0));
        assert!(skill_in_range(100));
        assert!(!skill_in_range(-1));
        assert!(!skill_in_range(101));
    }
}
