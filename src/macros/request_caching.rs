/// check if a request is in the cache, if it is, return it.
/// else follow the normal flow
///
/// does nothing when debug enabled
macro_rules! read_cache_request {
    ( $origin:expr ) => {
        if !cfg!(debug_assertions) {
            let uri = $origin.path().to_string();
            match &mut Redis::connect() {
                Ok(r_conn) => {
                    if Redis::has_data::<String>(r_conn, uri.clone()).unwrap_or(false) {
                        if let Ok(data) = Redis::get_data::<String, String>(r_conn, uri) {
                            if let Ok(cached) = serde_json::from_str(&data) {
                                return Ok(Json(cached));
                            }
                        }
                    }
                }
                Err(error) => {
                    error!(target:"macros/request_caching:read", "Error connecting to redis: {}", error);
                }
            }
        }
    };
}

/// add the response of the request to the cache and then return it.
///
/// if debug is enabled we wont add to cache.
macro_rules! cache_response {
    ( $origin:expr, $data:expr ) => {
        if !cfg!(debug_assertions) {
            let uri = $origin.path().to_string();
            match &mut Redis::connect() {
                Ok(r_conn) => {
                    let response_str = serde_json::to_string(&$data).unwrap();
                    let _ = Redis::set_data::<String, String>(r_conn, uri, response_str);
                }
                Err(error) => {
                    error!(target:"macros/request_caching:write", "Error connecting to redis: {}", error);
                }
            }
        }

        return Ok(Json($data));
    };
}

pub(crate) use cache_response;
pub(crate) use read_cache_request;
