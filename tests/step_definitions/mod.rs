pub mod booking_steps;
pub mod initialization_steps;
pub mod workload_steps;
