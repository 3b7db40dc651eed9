mod test_join_choreography;
mod test_leave_cleanup;
