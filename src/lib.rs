pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;

pub mod state {
    pub mod codec;
    pub mod fields;
    pub mod form;
}

pub mod chart {
    pub mod table;
    pub mod view;
}
