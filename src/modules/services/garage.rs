use std::collections::HashSet;

use diesel::pg::PgConnection;
use diesel::prelude::*;

use crate::errors::ServiceError;
use crate::models::{NewCar, NewCarPart};
use crate::modules::models::car::Car;
use crate::modules::models::driver::Driver;
use crate::modules::models::part::{Part, PartCategory};
use crate::modules::models::team::{Team, TeamPart};
use crate::schema::{car_parts, cars, team_parts, teams};

pub const CARS_PER_TEAM: i64 = 2;

/// # sum the stat columns of the currently installed parts
/// totals are never stored independently, this is the only way they change
pub fn totals_of(installed: &[Part]) -> (i32, i32, i32) {
    installed.iter().fold((0, 0, 0), |(power, aero, handling), part| {
        (power + part.power, aero + part.aero, handling + part.handling)
    })
}

/// a car is complete exactly when every category slot holds a part
pub fn is_complete(installed: &[Part]) -> bool {
    let occupied: HashSet<i32> = installed.iter().map(|part| part.category).collect();
    occupied.len() == PartCategory::COUNT
}

/// # create a car for a team
/// the team row is locked so two concurrent creates cannot both pass the
/// two cars per team cap
pub fn create_car(conn: &mut PgConnection, team_id_in: i32) -> Result<Car, ServiceError> {
    conn.transaction(|conn| {
        let team: Team = teams::table
            .filter(teams::id.eq(team_id_in))
            .for_update()
            .first(conn)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("team", team_id_in))?;

        let count = Car::count_for_team(conn, team.id)?;
        if count >= CARS_PER_TEAM {
            return Err(ServiceError::LimitExceeded {
                team_id: team.id,
                limit: CARS_PER_TEAM,
            });
        }

        let new_car = NewCar {
            team_id: team.id,
            driver_id: None,
            total_power: 0,
            total_aero: 0,
            total_handling: 0,
            finalized: false,
        };
        let car = diesel::insert_into(cars::table)
            .values(&new_car)
            .get_result(conn)?;

        Ok(car)
    })
}

/// # install a part into its category slot on a car
///
/// whatever occupies the slot is replaced, never duplicated. the replaced
/// part is only unassigned, the unit consumed by its own install is not
/// handed back to the holding. installing consumes one unit of the owning
/// team's holding of the new part and fails when the team holds none.
/// totals and the completeness flag are recomputed before commit
///
/// ## Arguments
/// * `conn` - the database connection
/// * `car_id_in` - the car to mount the part on
/// * `part_id_in` - the catalog part to install
///
/// ## Returns
/// * `Car` - the car with refreshed totals
pub fn install_part(
    conn: &mut PgConnection,
    car_id_in: i32,
    part_id_in: i32,
) -> Result<Car, ServiceError> {
    conn.transaction(|conn| {
        let car = Car::get_by_id_locked(conn, car_id_in)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("car", car_id_in))?;
        let part = Part::get_by_id(conn, part_id_in)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("part", part_id_in))?;
        let category = part.category().ok_or_else(|| {
            ServiceError::invalid_input(format!("part {} has an invalid category", part.id))
        })?;

        // the holding row is locked, concurrent installs drain it one by one
        let holding: Option<TeamPart> = team_parts::table
            .filter(
                team_parts::team_id
                    .eq(car.team_id)
                    .and(team_parts::part_id.eq(part.id)),
            )
            .for_update()
            .first(conn)
            .optional()?;
        let holding = match holding {
            Some(holding) if holding.quantity > 0 => holding,
            _ => {
                return Err(ServiceError::unavailable(format!(
                    "team {} holds no unit of part {}",
                    car.team_id, part.id
                )))
            }
        };

        // replace semantics: clear the slot, then mount the new part
        diesel::delete(
            car_parts::table.filter(
                car_parts::car_id
                    .eq(car.id)
                    .and(car_parts::category.eq(category.as_i32())),
            ),
        )
        .execute(conn)?;
        diesel::insert_into(car_parts::table)
            .values(&NewCarPart {
                car_id: car.id,
                part_id: part.id,
                category: category.as_i32(),
            })
            .execute(conn)?;

        diesel::update(team_parts::table.filter(team_parts::id.eq(holding.id)))
            .set(team_parts::quantity.eq(holding.quantity - 1))
            .execute(conn)?;

        let installed = car.installed_parts(conn)?;
        let (power, aero, handling) = totals_of(&installed);
        let car = car.store_totals(conn, power, aero, handling, is_complete(&installed))?;

        Ok(car)
    })
}

/// # remove a part from a car
/// fails when the part is not currently installed on that car. a complete
/// car regresses to partial, there is no terminal state
pub fn uninstall_part(
    conn: &mut PgConnection,
    car_id_in: i32,
    part_id_in: i32,
) -> Result<Car, ServiceError> {
    conn.transaction(|conn| {
        let car = Car::get_by_id_locked(conn, car_id_in)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("car", car_id_in))?;

        let removed = diesel::delete(
            car_parts::table.filter(
                car_parts::car_id
                    .eq(car.id)
                    .and(car_parts::part_id.eq(part_id_in)),
            ),
        )
        .execute(conn)?;
        if removed == 0 {
            return Err(ServiceError::not_found("installed part", part_id_in));
        }

        let installed = car.installed_parts(conn)?;
        let (power, aero, handling) = totals_of(&installed);
        let car = car.store_totals(conn, power, aero, handling, is_complete(&installed))?;

        Ok(car)
    })
}

/// # put a driver in the seat, or clear it with `None`
pub fn assign_driver(
    conn: &mut PgConnection,
    car_id_in: i32,
    driver_id_in: Option<i32>,
) -> Result<Car, ServiceError> {
    conn.transaction(|conn| {
        let car = Car::get_by_id_locked(conn, car_id_in)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("car", car_id_in))?;

        if let Some(driver_id) = driver_id_in {
            if !Driver::exists(conn, driver_id)? {
                return Err(ServiceError::not_found("driver", driver_id));
            }
        }

        Ok(car.set_driver(conn, driver_id_in)?)
    })
}

/// # delete a car together with its slot and result rows
pub fn delete_car(conn: &mut PgConnection, car_id_in: i32) -> Result<(), ServiceError> {
    conn.transaction(|conn| {
        let car = Car::get_by_id_locked(conn, car_id_in)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("car", car_id_in))?;

        car.delete(conn)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: i32, category: i32, power: i32, aero: i32, handling: i32) -> Part {
        Part {
            id,
            name: format!("part {}", id),
            brand: "Test".to_string(),
            category,
            power,
            aero,
            handling,
            price: 1000.0,
            stock: 10,
        }
    }

    #[test]
    fn totals_sum_over_installed_parts() {
        let installed = vec![part(1, 1, 7, 2, 3), part(2, 2, 1, 8, 2), part(3, 3, 2, 3, 9)];
        assert_eq!(totals_of(&installed), (10, 13, 14));
    }

    #[test]
    fn empty_car_has_zero_totals() {
        assert_eq!(totals_of(&[]), (0, 0, 0));
        assert!(!is_complete(&[]));
    }

    #[test]
    fn install_then_uninstall_restores_totals() {
        let mut installed = vec![part(1, 1, 7, 2, 3), part(2, 2, 1, 8, 2)];
        let before = totals_of(&installed);

        installed.push(part(3, 3, 2, 3, 9));
        assert_ne!(totals_of(&installed), before);

        installed.retain(|p| p.id != 3);
        assert_eq!(totals_of(&installed), before);
    }

    #[test]
    fn complete_needs_all_five_categories() {
        let mut installed: Vec<Part> = (1..=4)
            .map(|category| part(category, category, 5, 5, 5))
            .collect();
        assert!(!is_complete(&installed));

        installed.push(part(5, 5, 5, 5, 5));
        assert!(is_complete(&installed));

        // two parts in the same category do not count as five slots
        let doubled: Vec<Part> = vec![
            part(1, 1, 5, 5, 5),
            part(2, 1, 5, 5, 5),
            part(3, 2, 5, 5, 5),
            part(4, 3, 5, 5, 5),
            part(5, 4, 5, 5, 5),
        ];
        assert!(!is_complete(&doubled));
    }

    #[test]
    fn completeness_regresses_on_uninstall() {
        let mut installed: Vec<Part> = (1..=5)
            .map(|category| part(category, category, 5, 5, 5))
            .collect();
        assert!(is_complete(&installed));

        installed.remove(2);
        assert!(!is_complete(&installed));
    }
}
