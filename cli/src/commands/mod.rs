pub mod cli;
pub mod hexdump;
pub mod run;
pub mod scan;
pub mod tools;
