use rocket::{Build, Rocket};

use pitwall::modules::helpers::logging::setup_logging;
use pitwall::routes::api::{car, circuit, driver, part, simulation, standings, team};

#[macro_use]
extern crate rocket;

#[launch]
fn rocket() -> Rocket<Build> {
    setup_logging().expect("failed to setup logging");

    rocket::build()
        .mount("/api", routes![
            team::create,
            team::list_all,
            team::get_one,
            team::get_budget,
            team::add_sponsorship,
            team::get_holdings,
            team::get_orders,
            team::create_car,
            team::check_purchase,
            team::purchase,
        ])
        .mount("/api", routes![
            part::create,
            part::list_all,
            part::get_one,
            part::update,
            part::restock,
        ])
        .mount("/api", routes![
            driver::create,
            driver::list_all,
            driver::get_one,
            driver::set_skill,
            driver::get_stats,
        ])
        .mount("/api", routes![
            car::list_all,
            car::get_one,
            car::install_part,
            car::uninstall_part,
            car::set_driver,
            car::delete,
        ])
        .mount("/api", routes![
            circuit::create,
            circuit::list_all,
            circuit::get_one,
            circuit::update,
            circuit::get_simulations,
        ])
        .mount("/api", routes![
            simulation::run,
            simulation::get_one,
            standings::get_all,
        ])
}
