pub mod auth;
pub mod redis;

pub mod models {
    pub mod car;
    pub mod circuit;
    pub mod driver;
    pub mod part;
    pub mod simulation;
    pub mod team;

    pub mod general;
}

pub mod services {
    pub mod garage;
    pub mod purchasing;
    pub mod simulation;
    pub mod standings;
}

pub mod helpers {
    pub mod logging;
    pub mod math;
}
