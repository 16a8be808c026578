/// unwrap a `QueryResult` inside a route, translating the diesel error
/// into the http status of the response
macro_rules! db_handle_get_error_http {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => e,
            Err(diesel::result::Error::NotFound) => {
                return Err(Status::NotFound);
            }
            Err(error) => {
                error!(target:$target, "Error getting {}. (error: {})", $type_str, error);
                return Err(Status::InternalServerError);
            }
        }
    }
}

/// unwrap a `Result<_, ServiceError>` inside a route.
/// internal failures get logged, everything else only maps to its status
macro_rules! svc_handle_error_http {
    ( $data:expr, $target:expr) => {
        match $data {
            Ok(e) => e,
            Err(error) => {
                let status = error.status();
                if status == Status::InternalServerError {
                    error!(target:$target, "{}", error);
                }
                return Err(status);
            }
        }
    }
}

pub(crate) use db_handle_get_error_http;
pub(crate) use svc_handle_error_http;
