use log::error;
use rocket::get;
use rocket::http::uri::Origin;
use rocket::http::Status;
use rocket::serde::json::Json;

use crate::macros::database_error_handeler::svc_handle_error_http;
use crate::macros::request_caching::{cache_response, read_cache_request};
use crate::modules::models::general::establish_connection;
use crate::modules::redis::Redis;
use crate::modules::services::standings;
use crate::modules::services::standings::StandingsEntry;

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # the championship table
/// every recorded result folded into points per driver
#[get("/standings")]
pub fn get_all(origin: &Origin) -> Result<Json<Vec<StandingsEntry>>, Status> {
    read_cache_request!(origin);

    let conn = &mut establish_connection();
    let table = svc_handle_error_http!(standings::ranking(conn), "routes/api/standings:get_all");

    cache_response!(origin, table);
}
