use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::models::{NewOrder, NewTeamPart};
use crate::modules::models::part::Part;
use crate::modules::models::team::{Order, Team, TeamPart};
use crate::schema::{orders, parts, team_parts};

/// outcome of a purchase check. the deny variants carry the numbers the
/// caller needs to render a message
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "outcome")]
pub enum PurchaseDecision {
    Approved { total_cost: f64 },
    StockInsufficient { in_stock: i32, requested: i32 },
    BudgetInsufficient { balance: f64, required: f64 },
}

impl PurchaseDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, PurchaseDecision::Approved { .. })
    }
}

/// # the purchase rule
/// a purchase goes through only when the global stock covers the quantity
/// and the recomputed team balance covers the full cost. stock is checked
/// first
pub fn decide(stock: i32, balance: f64, price: f64, quantity: i32) -> PurchaseDecision {
    let required = price * f64::from(quantity);

    if stock < quantity {
        PurchaseDecision::StockInsufficient {
            in_stock: stock,
            requested: quantity,
        }
    } else if balance < required {
        PurchaseDecision::BudgetInsufficient { balance, required }
    } else {
        PurchaseDecision::Approved {
            total_cost: required,
        }
    }
}

/// # check whether a team could buy a part right now
/// read only, nothing is reserved by a positive answer
pub fn can_purchase(
    conn: &mut PgConnection,
    team_id_in: i32,
    part_id_in: i32,
    quantity: i32,
) -> Result<PurchaseDecision, ServiceError> {
    if quantity <= 0 {
        return Err(ServiceError::invalid_input(
            "purchase quantity must be positive",
        ));
    }
    if !Team::exists(conn, team_id_in)? {
        return Err(ServiceError::not_found("team", team_id_in));
    }
    let part = Part::get_by_id(conn, part_id_in)
        .optional()?
        .ok_or_else(|| ServiceError::not_found("part", part_id_in))?;
    let budget = Team::budget(conn, team_id_in)?;

    Ok(decide(part.stock, budget.balance, part.price, quantity))
}

/// # buy a part for a team
///
/// re-checks the purchase rule inside a transaction with the part row
/// locked, then decrements the global stock, tops up the team holding and
/// records the spend. either all three happen or none of them
///
/// ## Arguments
/// * `conn` - the database connection
/// * `team_id_in` - the buying team
/// * `part_id_in` - the catalog part
/// * `quantity` - how many units, must be positive
///
/// ## Returns
/// * `Order` - the recorded spend entry
pub fn purchase(
    conn: &mut PgConnection,
    team_id_in: i32,
    part_id_in: i32,
    quantity: i32,
) -> Result<Order, ServiceError> {
    if quantity <= 0 {
        return Err(ServiceError::invalid_input(
            "purchase quantity must be positive",
        ));
    }

    conn.transaction(|conn| {
        if !Team::exists(conn, team_id_in)? {
            return Err(ServiceError::not_found("team", team_id_in));
        }

        // concurrent purchases of the same part serialize on this lock
        let part: Part = parts::table
            .filter(parts::id.eq(part_id_in))
            .for_update()
            .first(conn)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("part", part_id_in))?;

        let budget = Team::budget(conn, team_id_in)?;
        let total_cost = match decide(part.stock, budget.balance, part.price, quantity) {
            PurchaseDecision::Approved { total_cost } => total_cost,
            PurchaseDecision::StockInsufficient {
                in_stock,
                requested,
            } => {
                return Err(ServiceError::unavailable(format!(
                    "insufficient stock for part {}: {} in stock, {} requested",
                    part.id, in_stock, requested
                )))
            }
            PurchaseDecision::BudgetInsufficient { balance, required } => {
                return Err(ServiceError::unavailable(format!(
                    "insufficient budget for team {}: balance {:.2}, required {:.2}",
                    team_id_in, balance, required
                )))
            }
        };

        diesel::update(parts::table.filter(parts::id.eq(part.id)))
            .set(parts::stock.eq(part.stock - quantity))
            .execute(conn)?;

        let holding: Option<TeamPart> = team_parts::table
            .filter(
                team_parts::team_id
                    .eq(team_id_in)
                    .and(team_parts::part_id.eq(part.id)),
            )
            .for_update()
            .first(conn)
            .optional()?;
        match holding {
            Some(holding) => {
                diesel::update(team_parts::table.filter(team_parts::id.eq(holding.id)))
                    .set(team_parts::quantity.eq(holding.quantity + quantity))
                    .execute(conn)?;
            }
            None => {
                diesel::insert_into(team_parts::table)
                    .values(&NewTeamPart {
                        team_id: team_id_in,
                        part_id: part.id,
                        quantity,
                    })
                    .execute(conn)?;
            }
        }

        let order = diesel::insert_into(orders::table)
            .values(&NewOrder {
                team_id: team_id_in,
                part_id: part.id,
                quantity,
                total_cost,
                ordered_at: Utc::now().naive_utc(),
            })
            .get_result(conn)?;

        Ok(order)
    })
}

/// # add units to the global stock of a part
pub fn restock(
    conn: &mut PgConnection,
    part_id_in: i32,
    quantity: i32,
) -> Result<Part, ServiceError> {
    if quantity <= 0 {
        return Err(ServiceError::invalid_input(
            "restock quantity must be positive",
        ));
    }

    conn.transaction(|conn| {
        let part: Part = parts::table
            .filter(parts::id.eq(part_id_in))
            .for_update()
            .first(conn)
            .optional()?
            .ok_or_else(|| ServiceError::not_found("part", part_id_in))?;

        let part = diesel::update(parts::table.filter(parts::id.eq(part.id)))
            .set(parts::stock.eq(part.stock + quantity))
            .get_result(conn)?;

        Ok(part)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_on_stock_before_budget() {
        let decision = decide(3, 100_000.0, 2000.0, 5);
        assert_eq!(
            decision,
            PurchaseDecision::StockInsufficient {
                in_stock: 3,
                requested: 5
            }
        );
    }

    #[test]
    fn rejects_when_budget_cannot_cover_the_cost() {
        // five units at 2000 against a balance of 9000
        let decision = decide(10, 9000.0, 2000.0, 5);
        assert_eq!(
            decision,
            PurchaseDecision::BudgetInsufficient {
                balance: 9000.0,
                required: 10_000.0
            }
        );
        assert!(!decision.is_approved());
    }

    #[test]
    fn approves_when_both_checks_pass() {
        let decision = decide(10, 10_000.0, 2000.0, 5);
        assert_eq!(
            decision,
            PurchaseDecision::Approved {
                total_cost: 10_000.0
            }
        );
        assert!(decision.is_approved());
    }

    #[test]
    fn exact_stock_and_budget_are_enough() {
        let decision = decide(5, 10_000.0, 2000.0, 5);
        assert!(decision.is_approved());
    }
}
