pub mod cli;

pub mod config;

pub mod controller;

pub mod error;

pub mod nm;

pub mod output;

pub mod plugin;
