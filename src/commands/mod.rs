#![allow(clippy::needless_pass_by_value)]

pub mod backup;
pub mod clear;
pub mod init;
pub mod network;
pub mod post;
pub mod status;
