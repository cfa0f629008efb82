mod log_in;
mod log_out;
mod middleware;

pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};

#[cfg(test)]
pub use log_in::{ACCESS_DENIED_ERROR_MSG, LogInData};
