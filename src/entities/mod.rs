//! `Entity` implementations binding the domain records to the store.

mod appointment;
mod product;
mod sale;
