mod catalog;
mod common;
mod scoring;
