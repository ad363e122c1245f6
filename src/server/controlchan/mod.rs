//! Contains code pertaining to the FTP *control* channel

pub mod command;
pub mod commands;
pub mod dispatcher;
pub mod handler;
pub mod line_parser;
pub mod stub;

pub(crate) mod codecs;
pub(crate) mod control_loop;
pub(crate) mod error;
pub(crate) mod event;
