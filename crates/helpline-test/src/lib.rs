//! Helpline ticket service - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! one set of `helpline_test::` paths.

#![allow(ambiguous_glob_reexports)]

pub mod component {
    pub use helpline_core::*;
    pub use helpline_service::*;

    pub mod db {
        pub use helpline_db::db::*;

        // Additional db handlers from app
        pub mod connection {
            pub use helpline_app::db_handler::DbProviderHandler;
            pub use helpline_db::db::connection::*;
        }
    }

    pub mod model {
        pub use helpline_db::model::*;
    }

    pub mod middleware {
        pub use helpline_app::middleware::*;
    }

    pub mod config {
        pub use helpline_app::config::ConfigHandler;
        pub use helpline_core::config::*;
    }
}

pub mod app {
    pub use helpline_app::*;

    pub mod api {
        pub use helpline_app::app::api::*;
    }
}
