pub mod models {
    pub mod competitor;
    pub mod legacy;
    pub mod store;
}

pub mod helpers {
    pub mod logging;
    pub mod ranking;
    pub mod time;

    pub mod handelbars {
        pub mod format_penalty;
        pub mod format_time;
        pub mod params;
    }
}
