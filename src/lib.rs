//! Dataset engine for London borough COVID-19 mobility and case records:
//! load a static CSV once, then filter by date range and borough, sort by
//! any column, and compute aggregate statistics over the selection.

pub mod data;
