/// unwrap the result of a store call inside a route.
/// a failure is logged and answered with an internal server error
macro_rules! store_handle_error_http {
    ( $data:expr, $target:expr, $action:expr) => {
        match $data {
            Ok(e) => e,
            Err(error) => {
                error!(target:$target, "Error {}. (error: {})", $action, error);
                return Err(Status::InternalServerError);
            }
        }
    }
}

pub(crate) use store_handle_error_http;
