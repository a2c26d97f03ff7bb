pub mod abilities;
