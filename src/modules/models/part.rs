use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::NewPart;
use crate::schema::parts;

/// the 5 slots a car can mount a part into.
/// stored as its 1 based discriminant in the `parts.category` column
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub enum PartCategory {
    PowerUnit,
    Aerodynamics,
    Tires,
    Suspension,
    Gearbox,
}

impl PartCategory {
    pub const COUNT: usize = 5;

    pub fn from_i32(value: i32) -> Option<PartCategory> {
        match value {
            1 => Some(PartCategory::PowerUnit),
            2 => Some(PartCategory::Aerodynamics),
            3 => Some(PartCategory::Tires),
            4 => Some(PartCategory::Suspension),
            5 => Some(PartCategory::Gearbox),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            PartCategory::PowerUnit => 1,
            PartCategory::Aerodynamics => 2,
            PartCategory::Tires => 3,
            PartCategory::Suspension => 4,
            PartCategory::Gearbox => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartCategory::PowerUnit => "Power Unit",
            PartCategory::Aerodynamics => "Aerodynamics",
            PartCategory::Tires => "Tires",
            PartCategory::Suspension => "Suspension",
            PartCategory::Gearbox => "Gearbox",
        }
    }
}

/// a part's three performance stats live in [1, 9]
pub fn stat_in_range(value: i32) -> bool {
    (1..=9).contains(&value)
}

#[derive(Queryable, Serialize, Identifiable, PartialEq, Debug, Clone, Deserialize)]
pub struct Part {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub category: i32,
    pub power: i32,
    pub aero: i32,
    pub handling: i32,
    pub price: f64,
    pub stock: i32,
}

impl Part {
    /********** INSERTERS **********/
    /// # insert a new part into the catalog
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `new_part` - the part to insert
    ///
    /// ## Returns
    /// * `Part` - the inserted part
    pub fn new(conn: &mut PgConnection, new_part: &NewPart) -> QueryResult<Part> {
        diesel::insert_into(parts::table)
            .values(new_part)
            .get_result(conn)
    }

    /********** GETTERS **********/
    /// # get a part by its id
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `id_in` - the id of the part
    ///
    /// ## Returns
    /// * `Part` - the part with the given id
    pub fn get_by_id(conn: &mut PgConnection, id_in: i32) -> QueryResult<Part> {
        use crate::schema::parts::dsl::*;

        parts.filter(id.eq(id_in)).first(conn)
    }

    /// # get the full catalog
    pub fn get_all(conn: &mut PgConnection) -> QueryResult<Vec<Part>> {
        use crate::schema::parts::dsl::*;

        parts.order(id.asc()).load::<Part>(conn)
    }

    /********** UPDATERS **********/
    /// # update a part
    /// explicit catalog update, the only mutation allowed on a referenced part
    ///
    /// ## Arguments
    /// * `conn` - the database connection
    /// * `changes` - the new column values for the part
    ///
    /// ## Returns
    /// * `Part` - the updated part
    pub fn update(&self, conn: &mut PgConnection, changes: &NewPart) -> QueryResult<Part> {
        use crate::schema::parts::dsl::*;

        diesel::update(parts.filter(id.eq(self.id)))
            .set((
                name.eq(&changes.name),
                brand.eq(&changes.brand),
                category.eq(changes.category),
                power.eq(changes.power),
                aero.eq(changes.aero),
                handling.eq(changes.handling),
                price.eq(changes.price),
            ))
            .get_result(conn)
    }

    /********** UTILS **********/
    pub fn category(&self) -> Option<PartCategory> {
        PartCategory::from_i32(self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_discriminants_roundtrip() {
        for value in 1..=5 {
            let category = PartCategory::from_i32(value).unwrap();
            assert_eq!(category.as_i32(), value);
        }
        assert_eq!(PartCategory::from_i32(0), None);
        assert_eq!(PartCategory::from_i32(6), None);
    }

    #[test]
    fn stats_are_bounded() {
        assert!(stat_in_range(1));
        assert!(stat_in_range(9));
        assert!(!stat_in_range(0));
        assert!(!stat_in_range(10));
    }
}
