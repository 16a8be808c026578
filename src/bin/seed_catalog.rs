use dotenvy::dotenv;
use log::info;

use pitwall::models::{NewCircuit, NewPart, NewSponsorship};
use pitwall::modules::helpers::logging::setup_logging;
use pitwall::modules::models::circuit::Circuit;
use pitwall::modules::models::driver::Driver;
use pitwall::modules::models::general::establish_connection;
use pitwall::modules::models::part::Part;
use pitwall::modules::models::team::Team;

fn main() {
    dotenv().ok();
    setup_logging().expect("failed to setup logging");

    let conn = &mut establish_connection();

    for name in ["Scuderia Borealis", "Meridian Racing"] {
        let team = Team::new(conn, name).expect("Error saving team");
        Team::add_sponsorship(
            conn,
            &NewSponsorship {
                team_id: team.id,
                sponsor: "Launch Capital".to_string(),
                amount: 50_000.0,
            },
        )
        .expect("Error saving sponsorship");
        info!(target:"seed_catalog", "seeded team {}", team.name);
    }

    for (name, skill) in [("Elena Vasquez", 93), ("Marco Hale", 77), ("Pieter Jansen", 61)] {
        Driver::new(conn, name, skill).expect("Error saving driver");
    }

    for (name, distance, curves) in [
        ("Circuito del Lago", 5.793, 11),
        ("Kustbaan", 4.259, 8),
        ("Monte Arco", 6.102, 15),
    ] {
        Circuit::new(
            conn,
            &NewCircuit {
                name: name.to_string(),
                distance,
                curves,
            },
        )
        .expect("Error saving circuit");
    }

    // two parts per category, a budget and a premium option
    let catalog = [
        ("V6 Evo", "Hartmann", 1, 7, 2, 2, 18_000.0),
        ("V6 Base", "Hartmann", 1, 4, 1, 1, 9_000.0),
        ("Low Drag Wing", "AeroWorks", 2, 1, 8, 3, 14_000.0),
        ("Standard Wing", "AeroWorks", 2, 1, 5, 2, 7_000.0),
        ("Soft Compound", "Vulcan", 3, 1, 2, 8, 12_000.0),
        ("Hard Compound", "Vulcan", 3, 1, 1, 5, 6_000.0),
        ("Active Damper", "Kinetik", 4, 2, 3, 7, 11_000.0),
        ("Coil Damper", "Kinetik", 4, 1, 2, 4, 5_500.0),
        ("Seamless Shift", "Hartmann", 5, 5, 1, 4, 10_000.0),
        ("Manual Box", "Hartmann", 5, 3, 1, 2, 4_500.0),
    ];
    for (name, brand, category, power, aero, handling, price) in catalog {
        Part::new(
            conn,
            &NewPart {
                name: name.to_string(),
                brand: brand.to_string(),
                category,
                power,
                aero,
                handling,
                price,
                stock: 20,
            },
        )
        .expect("Error saving part");
    }

    info!(target:"seed_catalog", "catalog seeded");
}
