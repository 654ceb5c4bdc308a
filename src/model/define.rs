// Type aliases
pub type Score = i32; // point total / running balance
pub type Seat = usize; // seat index around the table

// Number
pub const SEAT: usize = 4; // seats at the table
