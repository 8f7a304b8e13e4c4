pub mod flights_csv;
