pub mod datefmt;
