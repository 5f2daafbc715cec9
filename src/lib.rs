pub mod schema {
    pub mod geometry {
        pub mod vertex;
    }
    pub mod tile {
        pub mod config;
        pub mod error;
        pub mod identity;
        pub mod result;
        pub mod state;
        pub mod statistics;
    }
}
pub mod core {
    pub mod logger;
    pub mod quad;
}
pub mod adapter {
    pub mod mvt {
        pub mod geometry;
        pub mod parser;
        pub mod reader;
    }
}
pub mod use_case {
    pub mod interface;
    pub mod tile;
}
pub mod service {
    pub mod telemetry {
        pub mod interface;
        pub mod parse_analysis;
        pub mod statistics;
    }
}
