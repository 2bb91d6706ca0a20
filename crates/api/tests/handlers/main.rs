mod test_utils;

mod admin_test;
mod attendance_test;
mod auth_test;
mod configs_test;
mod leave_test;
mod middleware_test;
mod notices_test;
mod notifications_test;
