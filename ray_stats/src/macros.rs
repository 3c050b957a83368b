#[macro_export]
macro_rules! expect {
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(t) => t,
            Err(why) => {
                panic!("{}: {:?}", $msg, why);
            }
        }
    };
}

// Diagnostics all go through the "ray_stats" target so hosts can filter them out
// of their own logs.
macro_rules! stats_trace {
    ($($arg:tt)+) => {
        log::trace!(target: "ray_stats", $($arg)+)
    };
}

macro_rules! stats_info {
    ($($arg:tt)+) => {
        log::info!(target: "ray_stats", $($arg)+)
    };
}

macro_rules! stats_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "ray_stats", $($arg)+)
    };
}

macro_rules! stats_error {
    ($($arg:tt)+) => {
        log::error!(target: "ray_stats", $($arg)+)
    };
}
